use linreg::{Dataset, Vector, build_poly, compute_rmse, ridge_regression, split_data};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::Rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Polynomial Ridge Regression ===\n");

    // y = sin(2πx) + noise on [0, 1]
    let mut rng = StdRng::seed_from_u64(1);
    let n = 50;
    let x = Vector::from_shape_fn(n, |i| i as f64 / (n - 1) as f64);
    let y = x.mapv(|v| (2.0 * std::f64::consts::PI * v).sin() + rng.gen_range(-0.2..0.2));

    let split = split_data(&x, &y, 0.5, 3)?;
    println!(
        "Training samples: {}, Test samples: {}\n",
        split.train_x.len(),
        split.test_x.len()
    );

    let degree = 7;
    let tx_train = build_poly(&split.train_x, degree);
    let tx_test = build_poly(&split.test_x, degree);

    println!("{:<12} {:>12} {:>12} {:>12}", "lambda", "train RMSE", "test RMSE", "|w|");
    println!("{}", "-".repeat(51));

    for exponent in -8..=0 {
        let lambda = 10f64.powi(exponent);
        let (_, w) = ridge_regression(&split.train_y, &tx_train, lambda)?;

        let rmse_tr = compute_rmse(&split.train_y, &tx_train, &w)?;
        let rmse_te = compute_rmse(&split.test_y, &tx_test, &w)?;

        println!(
            "{:<12.1e} {:>12.4} {:>12.4} {:>12.4}",
            lambda,
            rmse_tr,
            rmse_te,
            w.dot(&w).sqrt()
        );
    }

    // Same split through the Dataset container
    let dataset = Dataset::new(build_poly(&x, degree), y)?;
    let (train, test) = dataset.train_test_split(0.5, 3)?;
    println!(
        "\nDataset split: {} x {} train, {} x {} test",
        train.n_samples(),
        train.n_features(),
        test.n_samples(),
        test.n_features()
    );

    Ok(())
}
