// src/model/cost.rs

use serde::{Deserialize, Serialize};

/// One sample of the EOQ cost trade-off curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostPoint {
    pub order_quantity: f64,
    pub holding_cost: f64,
    pub ordering_cost: f64,
    pub total_cost: f64,
}

impl CostPoint {
    /// Evaluates the three cost components at a single order quantity.
    ///
    /// The caller guarantees `order_quantity > 0`.
    pub fn evaluate(order_quantity: f64, params: &EoqParameters) -> Self {
        let holding_cost = (order_quantity / 2.0) * params.holding_cost_per_unit;
        let ordering_cost = (params.annual_demand / order_quantity) * params.cost_per_order;
        Self {
            order_quantity,
            holding_cost,
            ordering_cost,
            total_cost: holding_cost + ordering_cost,
        }
    }
}

/// The swept table plus its arg-min.
#[derive(Debug, Clone, PartialEq)]
pub struct CostCurve {
    pub points: Vec<CostPoint>,
    pub optimal: CostPoint,
}

/// Cost structure of a single stocked item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EoqParameters {
    /// Units demanded per year (D).
    pub annual_demand: f64,
    /// Cost of holding one unit for a year (H).
    pub holding_cost_per_unit: f64,
    /// Fixed cost of placing one purchase order (C).
    pub cost_per_order: f64,
}

impl Default for EoqParameters {
    fn default() -> Self {
        Self {
            annual_demand: 5000.0,
            holding_cost_per_unit: 1.2,
            cost_per_order: 45.0,
        }
    }
}

/// Inclusive range of order quantities to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl SweepRange {
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Number of samples `floor((end - start) / step) + 1`, or `None` when
    /// the span is not finite or the count does not fit in `usize`.
    pub fn point_count(&self) -> Option<usize> {
        let span = (self.end - self.start) / self.step;
        if !span.is_finite() || span < 0.0 {
            return None;
        }
        // Nudge by a relative epsilon so 0.1-style steps don't lose the last sample.
        let steps = (span + span * 1e-12).floor();
        if steps >= usize::MAX as f64 {
            return None;
        }
        (steps as usize).checked_add(1)
    }

    /// The `index`-th swept quantity, computed directly rather than accumulated.
    pub fn value_at(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            start: 50.0,
            end: 800.0,
            step: 25.0,
        }
    }
}

/// Closed-form EOQ and the cycle metrics derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EoqSummary {
    pub quantity: f64,
    pub orders_per_year: f64,
    pub cycle_days: f64,
    pub total_cost: f64,
}
