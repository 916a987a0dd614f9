use std::path::Path;

use crate::artifact;
use crate::error::{ArtifactLoadError, ShapeMismatchError};
use crate::model::{FeatureVector, LinearModel, N_FEATURES};

/// Scores houses with a model read from an artifact.
///
/// This is the only piece a front end needs: it never touches the dataset
/// or the training code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Predictor {
    model: LinearModel,
}

impl Predictor {
    pub fn load(path: &Path) -> Result<Self, ArtifactLoadError> {
        let model = artifact::load(path)?;
        Ok(Self { model })
    }

    pub fn from_model(model: LinearModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Price estimate for `(area, bedrooms, bathrooms, stories, parking)`.
    ///
    /// Values are not range checked; only the length is.
    pub fn predict(&self, features: &[f64]) -> Result<f64, ShapeMismatchError> {
        let row: &[f64; N_FEATURES] = features.try_into().map_err(|_| ShapeMismatchError {
            expected: N_FEATURES,
            found: features.len(),
        })?;
        Ok(self.model.predict_row(row))
    }

    pub fn predict_features(&self, features: &FeatureVector) -> f64 {
        self.model.predict_row(&features.to_array())
    }
}

/// `1234567.891` -> `"1,234,567.89"`
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predictor() -> Predictor {
        Predictor::from_model(LinearModel {
            weights: [100.0, 10_000.0, 20_000.0, 5_000.0, 2_500.0],
            intercept: 25_000.0,
        })
    }

    #[test]
    fn predicts_dot_product_plus_intercept() {
        let p = predictor();
        let price = p.predict(&[1500.0, 2.0, 1.0, 1.0, 1.0]).expect("five values");
        assert_eq!(price, 25_000.0 + 150_000.0 + 20_000.0 + 20_000.0 + 5_000.0 + 2_500.0);

        let fv = FeatureVector::from([1500.0, 2.0, 1.0, 1.0, 1.0]);
        assert_eq!(p.predict_features(&fv), price);
    }

    #[test]
    fn wrong_length_is_a_shape_mismatch() {
        let p = predictor();
        assert_eq!(
            p.predict(&[1.0, 2.0, 3.0, 4.0]),
            Err(ShapeMismatchError { expected: 5, found: 4 })
        );
        assert_eq!(
            p.predict(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
            Err(ShapeMismatchError { expected: 5, found: 6 })
        );
        assert!(p.predict(&[]).is_err());
    }

    #[test]
    fn out_of_domain_values_are_still_scored() {
        let p = predictor();
        let price = p.predict(&[-500.0, 0.0, 0.0, 0.0, -1.0]).expect("scored");
        assert_eq!(price, 25_000.0 - 50_000.0 - 2_500.0);
    }

    #[test]
    fn increments_move_by_the_weight() {
        let p = predictor();
        let base = [1800.0, 3.0, 2.0, 2.0, 1.0];
        let before = p.predict(&base).unwrap();
        for (i, w) in p.model().weights.iter().enumerate() {
            let mut bumped = base;
            bumped[i] += 2.0;
            let after = p.predict(&bumped).unwrap();
            assert!((before - after + 2.0 * w).abs() < 1e-6);
        }
    }

    #[test]
    fn formats_prices_with_grouping() {
        assert_eq!(format_price(1_234_567.891), "1,234,567.89");
        assert_eq!(format_price(999.999), "1,000.00");
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(12.5), "12.50");
        assert_eq!(format_price(-45_000.0), "-45,000.00");
        assert_eq!(format_price(100_000.0), "100,000.00");
    }
}
