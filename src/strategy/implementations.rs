// src/strategy/implementations.rs

use crate::error::{ensure_non_negative, EoqError, EoqResult};
use crate::strategy::traits::{mean, ForecastModel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// =========================================================================
// 1. Naive Forecast
// =========================================================================

/// Tomorrow looks like today: repeats the last observation.
#[derive(Debug, Clone, Default)]
pub struct NaiveForecast;

impl NaiveForecast {
    pub fn new() -> Self {
        Self
    }
}

impl ForecastModel for NaiveForecast {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn point_forecasts(&mut self, history: &[f64], horizon: usize) -> EoqResult<Vec<f64>> {
        let last = history[history.len() - 1];
        Ok(vec![last; horizon])
    }
}

// =========================================================================
// 2. Moving Average
// =========================================================================

/// Mean of the most recent `window` observations.
/// A window longer than the history uses the whole history.
#[derive(Debug, Clone)]
pub struct MovingAverageForecast {
    window: usize,
}

impl MovingAverageForecast {
    pub fn new(window: usize) -> EoqResult<Self> {
        if window == 0 {
            return Err(EoqError::invalid("window", "must be at least 1"));
        }
        Ok(Self { window })
    }
}

impl ForecastModel for MovingAverageForecast {
    fn name(&self) -> &'static str {
        "moving-average"
    }

    fn point_forecasts(&mut self, history: &[f64], horizon: usize) -> EoqResult<Vec<f64>> {
        let take = self.window.min(history.len());
        let level = mean(&history[history.len() - take..]);
        Ok(vec![level; horizon])
    }
}

// =========================================================================
// 3. Exponential Smoothing
// =========================================================================

/// Simple exponential smoothing.
/// alpha near 0 is very stable, near 1 tracks the latest value.
#[derive(Debug, Clone)]
pub struct ExponentialSmoothingForecast {
    alpha: f64,
}

impl ExponentialSmoothingForecast {
    pub fn new(alpha: f64) -> EoqResult<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(EoqError::invalid(
                "alpha",
                format!("must be in (0, 1], got {}", alpha),
            ));
        }
        Ok(Self { alpha })
    }
}

impl ForecastModel for ExponentialSmoothingForecast {
    fn name(&self) -> &'static str {
        "exponential-smoothing"
    }

    fn point_forecasts(&mut self, history: &[f64], horizon: usize) -> EoqResult<Vec<f64>> {
        let level = history[1..]
            .iter()
            .fold(history[0], |level, &x| self.alpha * x + (1.0 - self.alpha) * level);
        Ok(vec![level; horizon])
    }
}

// =========================================================================
// 4. Jitter Forecast
// =========================================================================

/// Randomly perturbs the last observation each period.
/// Seeded, so runs are reproducible.
///
/// Each period: `last * (1 + (u - 0.48) * spread)` with `u ~ U[0, 1)`.
/// The 0.48 offset gives a slight upward drift.
#[derive(Debug, Clone)]
pub struct JitterForecast {
    rng: StdRng,
    spread: f64,
}

impl JitterForecast {
    pub fn new(seed: u64, spread: f64) -> EoqResult<Self> {
        ensure_non_negative("spread", spread)?;
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            spread,
        })
    }
}

impl ForecastModel for JitterForecast {
    fn name(&self) -> &'static str {
        "jitter"
    }

    fn point_forecasts(&mut self, history: &[f64], horizon: usize) -> EoqResult<Vec<f64>> {
        let last = history[history.len() - 1];
        Ok((0..horizon)
            .map(|_| {
                let u: f64 = self.rng.gen();
                (last * (1.0 + (u - 0.48) * self.spread)).round()
            })
            .collect())
    }
}

/// Forecast accuracy as `100 - MAPE`, in percent.
///
/// Periods with zero actual demand carry no percentage error and are skipped.
pub fn forecast_accuracy(actual: &[f64], predicted: &[f64]) -> EoqResult<f64> {
    if actual.is_empty() || actual.len() != predicted.len() {
        return Err(EoqError::invalid(
            "predicted",
            format!(
                "needs one prediction per actual ({} actual, {} predicted)",
                actual.len(),
                predicted.len()
            ),
        ));
    }

    let errors: Vec<f64> = actual
        .iter()
        .zip(predicted)
        .filter(|(a, _)| **a != 0.0)
        .map(|(a, p)| ((a - p) / a).abs())
        .collect();

    if errors.is_empty() {
        return Err(EoqError::invalid("actual", "every actual value is zero"));
    }

    Ok(100.0 * (1.0 - mean(&errors)))
}
