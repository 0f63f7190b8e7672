//! Inventory optimisation toolkit: EOQ cost curves, reorder points,
//! demand forecasts, stock anomaly detection and (Q, R) policy simulation.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use analysis::curve::generate_cost_curve;
pub use error::{EoqError, EoqResult};
pub use model::cost::{CostCurve, CostPoint, EoqParameters, SweepRange};
