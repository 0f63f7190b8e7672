// src/strategy/traits.rs

use crate::error::{EoqError, EoqResult};
use crate::strategy::optimization::inverse_normal_cdf;
use serde::Serialize;
use std::fmt::Debug;

/// Two-sided coverage of the band attached to every forecast.
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// One forecast period with its confidence band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// 1-based number of periods past the end of the history.
    pub period: usize,
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
}

/// A demand forecasting method.
///
/// Implementors only produce point forecasts; validation and the
/// confidence band are shared.
pub trait ForecastModel: Debug + Send {
    fn name(&self) -> &'static str;

    /// Point forecasts for the next `horizon` periods.
    ///
    /// Called with a non-empty, finite history and `horizon >= 1`.
    fn point_forecasts(&mut self, history: &[f64], horizon: usize) -> EoqResult<Vec<f64>>;

    /// Forecasts `horizon` periods past `history`, banded by
    /// `predicted +/- z * sigma * sqrt(h)` where sigma is the sample
    /// standard deviation of the history.
    fn forecast(&mut self, history: &[f64], horizon: usize) -> EoqResult<Vec<ForecastPoint>> {
        validate_history(history)?;
        if horizon == 0 {
            return Err(EoqError::invalid("horizon", "must be at least 1"));
        }

        let predictions = self.point_forecasts(history, horizon)?;
        let z = inverse_normal_cdf(0.5 + CONFIDENCE_LEVEL / 2.0);
        let sigma = sample_std_dev(history);

        Ok(predictions
            .into_iter()
            .enumerate()
            .map(|(i, predicted)| {
                let predicted = predicted.max(0.0);
                let half_width = z * sigma * ((i + 1) as f64).sqrt();
                ForecastPoint {
                    period: i + 1,
                    predicted,
                    lower: (predicted - half_width).max(0.0),
                    upper: predicted + half_width,
                }
            })
            .collect())
    }
}

fn validate_history(history: &[f64]) -> EoqResult<()> {
    if history.is_empty() {
        return Err(EoqError::invalid("history", "needs at least one observation"));
    }
    if let Some(bad) = history.iter().find(|v| !v.is_finite()) {
        return Err(EoqError::invalid("history", format!("contains non-finite value {}", bad)));
    }
    Ok(())
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Bessel-corrected standard deviation; zero for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}
