use ndarray::Array1;

/// Fit quality on the held-out rows. Reported only, never used as a gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub r2: f64,
    pub mse: f64,
    pub rows: usize,
}

/// Coefficient of determination.
///
/// A constant `y_true` has no variance to explain: the score is 1.0 when the
/// predictions are exact and 0.0 otherwise.
pub fn r2_score(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    let mean = y_true.mean().unwrap_or(0.0);
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

pub fn mean_squared_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    let diff = y_true - y_pred;
    diff.mapv(|d| d * d).mean().unwrap_or(f64::NAN)
}

/// Both diagnostics at once, or `None` when there is nothing to score.
pub fn evaluate(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Option<Evaluation> {
    if y_true.is_empty() {
        return None;
    }
    Some(Evaluation {
        r2: r2_score(y_true, y_pred),
        mse: mean_squared_error(y_true, y_pred),
        rows: y_true.len(),
    })
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn perfect_predictions() {
        let y = array![3.0, 5.0, 7.0];
        let eval = evaluate(&y, &y).expect("rows");
        assert_eq!(eval.r2, 1.0);
        assert_eq!(eval.mse, 0.0);
        assert_eq!(eval.rows, 3);
    }

    #[test]
    fn known_values() {
        let y_true = array![3.0, -0.5, 2.0, 7.0];
        let y_pred = array![2.5, 0.0, 2.0, 8.0];
        assert!((mean_squared_error(&y_true, &y_pred) - 0.375).abs() < 1e-12);
        assert!((r2_score(&y_true, &y_pred) - 0.948_608_137_044_968_0).abs() < 1e-12);
    }

    #[test]
    fn predicting_the_mean_scores_zero() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![2.0, 2.0, 2.0];
        assert!(r2_score(&y_true, &y_pred).abs() < 1e-12);
    }

    #[test]
    fn constant_target() {
        let y = array![4.0, 4.0];
        assert_eq!(r2_score(&y, &array![4.0, 4.0]), 1.0);
        assert_eq!(r2_score(&y, &array![4.0, 5.0]), 0.0);
    }

    #[test]
    fn nothing_to_score() {
        assert!(evaluate(&Array1::zeros(0), &Array1::zeros(0)).is_none());
    }
}
