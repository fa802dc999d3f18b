//! Goodness-of-fit reductions over paired observed/modeled series.
//!
//! All functions take the observed series first. Degenerate inputs (constant
//! series) produce NaN rather than an error, matching what numerical array
//! libraries return for the same formulas.

use thiserror::Error;

use crate::model::Metric;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    #[error("Series length mismatch: {observed} observed vs {modeled} modeled values")]
    LengthMismatch { observed: usize, modeled: usize },

    #[error("Cannot compute statistics on an empty series")]
    EmptyInput,
}

fn check_pair(observed: &[f64], modeled: &[f64]) -> Result<(), MetricError> {
    if observed.len() != modeled.len() {
        return Err(MetricError::LengthMismatch {
            observed: observed.len(),
            modeled: modeled.len(),
        });
    }
    if observed.is_empty() {
        return Err(MetricError::EmptyInput);
    }
    Ok(())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sum_squared_error(observed: &[f64], modeled: &[f64]) -> f64 {
    observed
        .iter()
        .zip(modeled)
        .map(|(o, m)| (o - m).powi(2))
        .sum()
}

/// Root-mean-square error: sqrt(Σ(o − m)² / n)
pub fn rmse(observed: &[f64], modeled: &[f64]) -> Result<f64, MetricError> {
    check_pair(observed, modeled)?;
    Ok((sum_squared_error(observed, modeled) / observed.len() as f64).sqrt())
}

/// Mean bias: mean(modeled) − mean(observed)
pub fn bias(observed: &[f64], modeled: &[f64]) -> Result<f64, MetricError> {
    check_pair(observed, modeled)?;
    Ok(mean(modeled) - mean(observed))
}

/// Pearson correlation coefficient, clipped to [-1, 1]
///
/// Returns NaN when either series has zero variance.
pub fn correlation(observed: &[f64], modeled: &[f64]) -> Result<f64, MetricError> {
    check_pair(observed, modeled)?;

    let mean_o = mean(observed);
    let mean_m = mean(modeled);

    let mut cov = 0.0;
    let mut var_o = 0.0;
    let mut var_m = 0.0;
    for (o, m) in observed.iter().zip(modeled) {
        let d_o = o - mean_o;
        let d_m = m - mean_m;
        cov += d_o * d_m;
        var_o += d_o * d_o;
        var_m += d_m * d_m;
    }

    let denom = (var_o * var_m).sqrt();
    if denom == 0.0 {
        return Ok(f64::NAN);
    }
    Ok((cov / denom).clamp(-1.0, 1.0))
}

/// Population standard deviation (divides by n)
pub fn std_dev(values: &[f64]) -> Result<f64, MetricError> {
    if values.is_empty() {
        return Err(MetricError::EmptyInput);
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Ok(var.sqrt())
}

/// Nash-Sutcliffe efficiency: 1 − Σ(m − o)² / Σ(o − mean(o))²
///
/// Returns NaN when the observed series is constant.
pub fn nse(observed: &[f64], modeled: &[f64]) -> Result<f64, MetricError> {
    check_pair(observed, modeled)?;

    let mean_o = mean(observed);
    let denom: f64 = observed.iter().map(|o| (o - mean_o).powi(2)).sum();
    if denom == 0.0 {
        return Ok(f64::NAN);
    }
    Ok(1.0 - sum_squared_error(observed, modeled) / denom)
}

/// Compute one metric for a pair of series. Standard deviation is taken over
/// the modeled series.
pub fn compute(metric: Metric, observed: &[f64], modeled: &[f64]) -> Result<f64, MetricError> {
    match metric {
        Metric::Rmse => rmse(observed, modeled),
        Metric::MeanBias => bias(observed, modeled),
        Metric::Correlation => correlation(observed, modeled),
        Metric::StdDev => {
            check_pair(observed, modeled)?;
            std_dev(modeled)
        }
        Metric::Nse => nse(observed, modeled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_rmse_known_value() {
        // errors: 1, -1, 2, 0 -> mean square 6/4
        let obs = [1.0, 2.0, 3.0, 4.0];
        let model = [2.0, 1.0, 5.0, 4.0];
        assert_close(rmse(&obs, &model).unwrap(), (1.5f64).sqrt());
    }

    #[test]
    fn test_rmse_identical_is_zero() {
        let obs = [12.1, 14.3, 9.8];
        assert_eq!(rmse(&obs, &obs).unwrap(), 0.0);
    }

    #[test]
    fn test_rmse_positive_when_different() {
        let obs = [1.0, 2.0, 3.0];
        let model = [1.0, 2.0, 3.0001];
        assert!(rmse(&obs, &model).unwrap() > 0.0);
    }

    #[test]
    fn test_bias_sign_is_modeled_minus_observed() {
        let obs = [10.0, 20.0];
        let model = [12.0, 23.0];
        assert_close(bias(&obs, &model).unwrap(), 2.5);
        assert_close(bias(&model, &obs).unwrap(), -2.5);
    }

    #[test]
    fn test_correlation_perfect() {
        let obs = [1.0, 2.0, 3.0, 4.0];
        let model = [2.0, 4.0, 6.0, 8.0];
        assert_close(correlation(&obs, &model).unwrap(), 1.0);
    }

    #[test]
    fn test_correlation_inverse() {
        let obs = [1.0, 2.0, 3.0];
        let model = [3.0, 2.0, 1.0];
        assert_close(correlation(&obs, &model).unwrap(), -1.0);
    }

    #[test]
    fn test_correlation_known_value() {
        // r = 0.8 for this textbook pair
        let obs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let model = [2.0, 1.0, 4.0, 3.0, 5.0];
        assert_close(correlation(&obs, &model).unwrap(), 0.8);
    }

    #[test]
    fn test_correlation_constant_series_is_nan() {
        let obs = [1.0, 2.0, 3.0];
        let model = [5.0, 5.0, 5.0];
        assert!(correlation(&obs, &model).unwrap().is_nan());
    }

    #[test]
    fn test_std_dev_population() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_close(std_dev(&values).unwrap(), 2.0);
    }

    #[test]
    fn test_std_dev_single_value() {
        assert_eq!(std_dev(&[3.5]).unwrap(), 0.0);
    }

    #[test]
    fn test_nse_perfect_fit() {
        let obs = [3.0, 5.0, 7.0];
        assert_eq!(nse(&obs, &obs).unwrap(), 1.0);
    }

    #[test]
    fn test_nse_mean_model_is_zero() {
        let obs = [1.0, 2.0, 3.0];
        let model = [2.0, 2.0, 2.0];
        assert_close(nse(&obs, &model).unwrap(), 0.0);
    }

    #[test]
    fn test_nse_below_one_for_imperfect_model() {
        let obs = [1.0, 2.0, 3.0, 4.0];
        let model = [1.5, 2.0, 2.5, 4.5];
        assert!(nse(&obs, &model).unwrap() < 1.0);
    }

    #[test]
    fn test_nse_constant_observed_is_nan() {
        let obs = [4.0, 4.0];
        let model = [3.0, 5.0];
        assert!(nse(&obs, &model).unwrap().is_nan());
    }

    #[test]
    fn test_length_mismatch() {
        let err = rmse(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            MetricError::LengthMismatch {
                observed: 2,
                modeled: 1
            }
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(nse(&[], &[]).unwrap_err(), MetricError::EmptyInput);
        assert_eq!(std_dev(&[]).unwrap_err(), MetricError::EmptyInput);
    }

    #[test]
    fn test_compute_std_dev_uses_modeled() {
        let obs = [100.0, 100.0, 100.0, 100.0];
        let model = [1.0, 3.0, 1.0, 3.0];
        assert_close(compute(Metric::StdDev, &obs, &model).unwrap(), 1.0);
    }

    #[test]
    fn test_compute_std_dev_checks_lengths() {
        assert!(compute(Metric::StdDev, &[1.0], &[1.0, 2.0]).is_err());
    }
}
