// src/analysis/anomaly.rs

use crate::error::{ensure_positive, EoqError, EoqResult};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A signed change in stock level (sales negative, restocks positive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub label: String,
    pub stock_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyVerdict {
    pub label: String,
    pub stock_change: f64,
    pub z_score: f64,
    pub is_anomaly: bool,
}

/// Flags movements whose z-score magnitude exceeds `threshold`.
///
/// Scores use the population mean and standard deviation of all movements.
/// A series with zero variance has no anomalies.
pub fn detect_anomalies(movements: &[StockMovement], threshold: f64) -> EoqResult<Vec<AnomalyVerdict>> {
    ensure_positive("threshold", threshold)?;
    if movements.is_empty() {
        return Err(EoqError::invalid("movements", "needs at least one movement"));
    }
    // One NaN would poison the mean and hide every real outlier.
    if let Some(bad) = movements.iter().find(|m| !m.stock_change.is_finite()) {
        return Err(EoqError::invalid(
            "stock_change",
            format!("`{}` has non-finite value {}", bad.label, bad.stock_change),
        ));
    }

    let n = movements.len() as f64;
    let mean = movements.iter().map(|m| m.stock_change).sum::<f64>() / n;
    let variance = movements
        .iter()
        .map(|m| (m.stock_change - mean).powi(2))
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();

    let verdicts: Vec<AnomalyVerdict> = movements
        .iter()
        .map(|m| {
            let z_score = if std_dev > 0.0 {
                (m.stock_change - mean) / std_dev
            } else {
                0.0
            };
            AnomalyVerdict {
                label: m.label.clone(),
                stock_change: m.stock_change,
                z_score,
                is_anomaly: z_score.abs() > threshold,
            }
        })
        .collect();

    let flagged = verdicts.iter().filter(|v| v.is_anomaly).count();
    if flagged > 0 {
        info!(flagged, total = verdicts.len(), "stock anomalies detected");
    }

    Ok(verdicts)
}
