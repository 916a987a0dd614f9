use anyhow::Context;
use house_price_regression::{format_price, TrainConfig, Trainer};

// training script and entry point
// Steps
// 1. Load the housing CSV
// 2. Split into train and test set (seeded)
// 3. Fit the linear model on the train set
// 4. Report R2 / MSE on the test set
// 5. Save the model artifact

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TrainConfig::from_env();
    let trainer = Trainer::new(config);

    let report = trainer.run().with_context(|| {
        format!(
            "training from {} failed",
            trainer.config().dataset_path.display()
        )
    })?;

    println!(
        "Houses: {}  Avg price: {}  Avg area: {:.0}",
        report.summary.rows,
        format_price(report.summary.mean_price),
        report.summary.mean_area
    );
    println!("Train rows: {}  Test rows: {}", report.train_rows, report.test_rows);

    match report.evaluation {
        Some(eval) => {
            println!("R2 Score: {}", eval.r2);
            println!("MSE: {}", eval.mse);
        }
        None => println!("No test rows, evaluation skipped"),
    }

    println!("Model saved as {}", report.artifact_path.display());

    Ok(())
}
