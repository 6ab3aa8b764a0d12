use linreg::{LeastSquares, least_squares, metrics};
use ndarray::array;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Least Squares Example ===\n");

    // Bias column plus one feature: y = 3 + 2x with small noise
    let tx = array![[1.0, 1.0], [1.0, 2.0], [1.0, 3.0], [1.0, 4.0], [1.0, 5.0]];
    let y = array![5.1, 6.9, 9.2, 11.1, 12.8];

    println!("Design matrix:\n{}", tx);
    println!("Labels: {}", y);

    let (loss, w) = least_squares(&y, &tx)?;
    println!("\nNormal-equation solution:");
    println!("  w = {}", w);
    println!("  MSE = {:.6}", loss);

    let mut model = LeastSquares::new();
    model.fit(&tx, &y)?;
    let predictions = model.predict(&tx)?;

    println!("\nR² score: {:.4}", model.score(&tx, &y)?);
    println!("MAE: {:.4}", metrics::mean_absolute_error(&y, &predictions)?);

    println!("\nPredictions vs Actual:");
    for (i, (pred, actual)) in predictions.iter().zip(y.iter()).enumerate() {
        println!(
            "Sample {}: Predicted={:.2}, Actual={:.2}, Error={:.2}",
            i + 1,
            pred,
            actual,
            (pred - actual).abs()
        );
    }

    // A duplicated column makes the normal equations singular
    let degenerate = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
    match least_squares(&array![1.0, 2.0, 3.0], &degenerate) {
        Ok((_, w)) => println!("\nUnexpected solution: {}", w),
        Err(e) => println!("\nRank-deficient design rejected: {}", e),
    }

    Ok(())
}
