use anyhow::{bail, Context};
use house_price_regression::config::artifact_path_from_env;
use house_price_regression::{format_price, Predictor, FEATURE_COLUMNS};

// usage: predict <area> <bedrooms> <bathrooms> <stories> <parking>
// artifact path comes from HOUSE_MODEL (default house_model.bin)

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != FEATURE_COLUMNS.len() {
        bail!(
            "expected {} values ({}), got {}",
            FEATURE_COLUMNS.len(),
            FEATURE_COLUMNS.join(", "),
            args.len()
        );
    }

    let features = args
        .iter()
        .zip(FEATURE_COLUMNS)
        .map(|(raw, name)| {
            raw.parse::<f64>()
                .with_context(|| format!("{name}: '{raw}' is not a number"))
        })
        .collect::<anyhow::Result<Vec<f64>>>()?;

    let path = artifact_path_from_env();
    let predictor = Predictor::load(&path)
        .with_context(|| format!("loading model from {}", path.display()))?;

    let price = predictor.predict(&features)?;
    log::debug!("features {features:?} -> {price}");

    println!("Estimated price: {}", format_price(price));

    Ok(())
}
