use linreg::{
    GradientDescent, Loss, Vector, gradient_descent, least_squares, make_regression,
    stochastic_gradient_descent,
};
use ndarray::array;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Gradient Descent Comparison ===\n");

    let mut rng = StdRng::seed_from_u64(7);
    let w_true = array![1.0, -2.0, 0.5];
    let (y, tx) = make_regression(500, &w_true, 0.1, &mut rng)?;
    let initial_w = Vector::zeros(w_true.len());

    let (ls_loss, ls_w) = least_squares(&y, &tx)?;
    println!("Closed form: w = {:.4}, MSE = {:.6}\n", ls_w, ls_loss);

    let gd = gradient_descent(&y, &tx, &initial_w, 200, 0.5)?;
    report("Full batch (γ=0.5)", &gd.losses, gd.final_weights());

    let sgd = stochastic_gradient_descent(&y, &tx, &initial_w, 32, 20, 0.1, &mut rng)?;
    report("Mini-batch 32 (γ=0.1)", &sgd.losses, sgd.final_weights());

    let rmse_trace = GradientDescent::new()
        .gamma(0.05)
        .max_iters(5)
        .batch_size(Some(1))
        .loss(Loss::Rmse)
        .run(&y, &tx, &initial_w, &mut rng)?;
    report("Single sample (γ=0.05, RMSE)", &rmse_trace.losses, rmse_trace.final_weights());

    println!("\nA step size that is too large diverges; nothing stops the loop:");
    let diverging = gradient_descent(&y, &tx, &initial_w, 20, 5.0)?;
    report("Full batch (γ=5.0)", &diverging.losses, diverging.final_weights());

    Ok(())
}

fn report(name: &str, losses: &[f64], w: Option<&Vector>) {
    let w = w.cloned().unwrap_or_default();
    let first = losses.first().copied().unwrap_or(f64::NAN);
    let last = losses.last().copied().unwrap_or(f64::NAN);
    println!(
        "{:<30} steps={:>6} first loss={:>12.4e} last loss={:>12.4e} w={:.4}",
        name,
        losses.len(),
        first,
        last,
        w
    );
}
