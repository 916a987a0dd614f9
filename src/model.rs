//! Five-feature linear price model and its ordinary least squares fit.
//!
//! The fit centers the design and solves the least-squares problem through
//! an SVD of the centered columns. Singular values below
//! `ε · max(rows, cols) · σ_max` are dropped, which gives the minimum-norm
//! solution when a feature is constant or collinear.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::dataset::FEATURE_COLUMNS;
use crate::error::{FitError, ShapeMismatchError};

pub const N_FEATURES: usize = FEATURE_COLUMNS.len();

/// One house, in model order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub area: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub stories: f64,
    pub parking: f64,
}

impl FeatureVector {
    pub fn to_array(&self) -> [f64; N_FEATURES] {
        [
            self.area,
            self.bedrooms,
            self.bathrooms,
            self.stories,
            self.parking,
        ]
    }
}

impl From<[f64; N_FEATURES]> for FeatureVector {
    fn from(v: [f64; N_FEATURES]) -> Self {
        Self {
            area: v[0],
            bedrooms: v[1],
            bathrooms: v[2],
            stories: v[3],
            parking: v[4],
        }
    }
}

impl TryFrom<&[f64]> for FeatureVector {
    type Error = ShapeMismatchError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let array: [f64; N_FEATURES] = values.try_into().map_err(|_| ShapeMismatchError {
            expected: N_FEATURES,
            found: values.len(),
        })?;
        Ok(array.into())
    }
}

/// `price = weights · x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub weights: [f64; N_FEATURES],
    pub intercept: f64,
}

impl LinearModel {
    pub fn predict_row(&self, x: &[f64; N_FEATURES]) -> f64 {
        self.score(x.iter().copied())
    }

    /// Scores every row of `features`. Uses the same accumulation as
    /// [`LinearModel::predict_row`], so both agree bit for bit.
    pub fn predict_batch(&self, features: &Array2<f64>) -> Array1<f64> {
        features
            .rows()
            .into_iter()
            .map(|row| self.score_view(row))
            .collect()
    }

    fn score_view(&self, row: ArrayView1<'_, f64>) -> f64 {
        self.score(row.iter().copied())
    }

    fn score(&self, x: impl Iterator<Item = f64>) -> f64 {
        self.weights
            .iter()
            .zip(x)
            .fold(self.intercept, |acc, (w, v)| acc + w * v)
    }
}

/// Ordinary least squares on raw features: no scaling, no penalty.
pub fn fit(features: &Array2<f64>, target: &Array1<f64>) -> Result<LinearModel, FitError> {
    let (rows, cols) = features.dim();
    if cols != N_FEATURES {
        return Err(FitError::FeatureCount {
            expected: N_FEATURES,
            found: cols,
        });
    }
    if rows != target.len() {
        return Err(FitError::LengthMismatch {
            rows,
            targets: target.len(),
        });
    }

    let x_mean = features
        .mean_axis(Axis(0))
        .ok_or(FitError::NoTrainingRows)?;
    let y_mean = target.mean().ok_or(FitError::NoTrainingRows)?;

    // centered design, so the intercept drops out of the solve
    let xc = DMatrix::from_fn(rows, cols, |i, j| features[[i, j]] - x_mean[j]);
    let yc = DVector::from_iterator(rows, target.iter().map(|y| y - y_mean));

    let svd = xc.svd(true, true);
    let largest = svd.singular_values.max();
    let cutoff = f64::EPSILON * rows.max(cols) as f64 * largest;
    let solution = svd.solve(&yc, cutoff).map_err(FitError::Solver)?;

    let mut weights = [0.0; N_FEATURES];
    weights
        .iter_mut()
        .zip(solution.iter())
        .for_each(|(w, s)| *w = *s);
    let intercept = y_mean
        - x_mean
            .iter()
            .zip(weights.iter())
            .map(|(m, w)| m * w)
            .sum::<f64>();

    if !intercept.is_finite() || weights.iter().any(|w| !w.is_finite()) {
        return Err(FitError::NonFinite);
    }

    log::debug!("fitted weights {weights:?} intercept {intercept}");

    Ok(LinearModel { weights, intercept })
}
