// src/analysis/curve.rs

use crate::error::{ensure_positive, EoqError, EoqResult};
use crate::model::cost::{CostCurve, CostPoint, EoqParameters, SweepRange};
use tracing::debug;

/// Upper bound on samples per curve; larger sweeps are rejected up front.
pub const MAX_SWEEP_POINTS: usize = 1_000_000;

/// Sweeps order quantities and tabulates the EOQ cost trade-off.
///
/// Every point satisfies `total_cost == holding_cost + ordering_cost`.
/// The optimum is found by a linear scan in increasing quantity order, so
/// among equal minimums the smallest quantity wins.
///
/// # Errors
/// `InvalidParameter` if any cost parameter is non-positive, if the sweep
/// starts at or below zero, has a non-positive step, ends before it starts,
/// or would produce more than [`MAX_SWEEP_POINTS`] samples.
pub fn generate_cost_curve(params: &EoqParameters, sweep: &SweepRange) -> EoqResult<CostCurve> {
    validate_parameters(params)?;
    let count = validate_sweep(sweep)?;

    let mut points = Vec::with_capacity(count);
    let mut optimal: Option<CostPoint> = None;

    for i in 0..count {
        let point = CostPoint::evaluate(sweep.value_at(i), params);

        // Strict comparison: the first minimum encountered is kept.
        match optimal {
            Some(best) if best.total_cost <= point.total_cost => {}
            _ => optimal = Some(point),
        }

        points.push(point);
    }

    // `count >= 1` after validation, so the scan always saw a point.
    let optimal = optimal.ok_or_else(|| EoqError::invalid("sweep", "produced no points"))?;

    debug!(
        points = points.len(),
        optimal_quantity = optimal.order_quantity,
        optimal_cost = optimal.total_cost,
        "generated EOQ cost curve"
    );

    Ok(CostCurve { points, optimal })
}

pub(crate) fn validate_parameters(params: &EoqParameters) -> EoqResult<()> {
    ensure_positive("annual_demand", params.annual_demand)?;
    ensure_positive("holding_cost_per_unit", params.holding_cost_per_unit)?;
    ensure_positive("cost_per_order", params.cost_per_order)?;
    Ok(())
}

/// Returns the number of points the sweep will produce.
fn validate_sweep(sweep: &SweepRange) -> EoqResult<usize> {
    ensure_positive("sweep_start", sweep.start)?;
    ensure_positive("sweep_step", sweep.step)?;
    if !sweep.end.is_finite() || sweep.start > sweep.end {
        return Err(EoqError::invalid(
            "sweep_end",
            format!("must be >= sweep_start ({}), got {}", sweep.start, sweep.end),
        ));
    }
    match sweep.point_count() {
        Some(count) if count <= MAX_SWEEP_POINTS => Ok(count),
        _ => Err(EoqError::invalid(
            "sweep_step",
            format!(
                "range {}..={} with step {} exceeds {} points",
                sweep.start, sweep.end, sweep.step, MAX_SWEEP_POINTS
            ),
        )),
    }
}
