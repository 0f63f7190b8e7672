// src/config.rs

use crate::error::{EoqError, EoqResult};
use crate::model::cost::{EoqParameters, SweepRange};
use crate::simulation::config::SimulationConfig;
use crate::strategy::implementations::{
    ExponentialSmoothingForecast, JitterForecast, MovingAverageForecast, NaiveForecast,
};
use crate::strategy::optimization::ReorderInputs;
use crate::strategy::traits::ForecastModel;
use clap::ValueEnum;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ForecastMethod {
    Naive,
    MovingAverage,
    ExponentialSmoothing,
    Jitter,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    pub method: ForecastMethod,
    pub horizon: usize,
    pub window: usize,
    pub alpha: f64,
    pub spread: f64,
    pub seed: u64,
    /// Observed demand, oldest first.
    pub history: Vec<f64>,
}

impl ForecastSettings {
    pub fn build_model(&self) -> EoqResult<Box<dyn ForecastModel>> {
        Ok(match self.method {
            ForecastMethod::Naive => Box::new(NaiveForecast::new()),
            ForecastMethod::MovingAverage => Box::new(MovingAverageForecast::new(self.window)?),
            ForecastMethod::ExponentialSmoothing => {
                Box::new(ExponentialSmoothingForecast::new(self.alpha)?)
            }
            ForecastMethod::Jitter => Box::new(JitterForecast::new(self.seed, self.spread)?),
        })
    }
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            method: ForecastMethod::ExponentialSmoothing,
            horizon: 7,
            window: 3,
            alpha: 0.3,
            spread: 0.25,
            seed: 42,
            history: vec![40.0, 45.0, 60.0, 55.0, 30.0, 65.0, 70.0],
        }
    }
}

/// Everything the CLI can be told, loadable from one YAML file.
/// Missing sections fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub eoq: EoqParameters,
    pub sweep: SweepRange,
    pub reorder: ReorderInputs,
    pub forecast: ForecastSettings,
    pub simulation: SimulationConfig,
}

impl AnalysisConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, the YAML is malformed,
    /// or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> EoqResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> EoqResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks only; numeric domains are enforced by the
    /// operations themselves.
    pub fn validate(&self) -> EoqResult<()> {
        if self.forecast.horizon == 0 {
            return Err(EoqError::Config("forecast.horizon must be at least 1".into()));
        }
        if self.forecast.history.is_empty() {
            return Err(EoqError::Config("forecast.history must not be empty".into()));
        }
        if self.simulation.periods == 0 {
            return Err(EoqError::Config("simulation.periods must be at least 1".into()));
        }
        Ok(())
    }
}
