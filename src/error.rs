// src/error.rs

use thiserror::Error;

/// Result alias used across the crate.
pub type EoqResult<T> = Result<T, EoqError>;

#[derive(Debug, Error)]
pub enum EoqError {
    /// A caller supplied a value outside its allowed domain.
    /// Raised before any work is done, so no partial result exists.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl EoqError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        EoqError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Rejects values that are not finite and strictly greater than zero.
pub fn ensure_positive(name: &'static str, value: f64) -> EoqResult<()> {
    if !value.is_finite() {
        return Err(EoqError::invalid(name, format!("must be finite, got {}", value)));
    }
    if value <= 0.0 {
        return Err(EoqError::invalid(name, format!("must be > 0, got {}", value)));
    }
    Ok(())
}

/// Rejects values that are not finite or are negative.
pub fn ensure_non_negative(name: &'static str, value: f64) -> EoqResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EoqError::invalid(name, format!("must be >= 0, got {}", value)));
    }
    Ok(())
}
