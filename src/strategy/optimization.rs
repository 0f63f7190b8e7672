// src/strategy/optimization.rs

//! Closed-form inventory formulas: the classical EOQ, the newsvendor
//! critical ratio, and reorder points with normally distributed demand.

use crate::analysis::curve::validate_parameters;
use crate::error::{ensure_non_negative, ensure_positive, EoqError, EoqResult};
use crate::model::cost::{EoqParameters, EoqSummary};
use serde::{Deserialize, Serialize};

const DAYS_PER_YEAR: f64 = 365.0;

/// Continuous EOQ: `q* = sqrt(2DC / H)`.
///
/// At `q*` holding and ordering cost are equal, so the minimum annual
/// cost is `sqrt(2DCH)`.
pub fn economic_order_quantity(params: &EoqParameters) -> EoqResult<EoqSummary> {
    validate_parameters(params)?;

    let quantity = (2.0 * params.annual_demand * params.cost_per_order
        / params.holding_cost_per_unit)
        .sqrt();
    let orders_per_year = params.annual_demand / quantity;

    Ok(EoqSummary {
        quantity,
        orders_per_year,
        cycle_days: DAYS_PER_YEAR / orders_per_year,
        total_cost: (2.0 * params.annual_demand * params.cost_per_order * params.holding_cost_per_unit)
            .sqrt(),
    })
}

/// Calculates the Critical Ratio (Target Service Level).
///
/// Formula: CR = ShortageCost / (ShortageCost + HoldingCost)
pub fn critical_ratio(shortage_cost: f64, holding_cost: f64) -> f64 {
    if shortage_cost + holding_cost == 0.0 {
        return 0.0;
    }
    shortage_cost / (shortage_cost + holding_cost)
}

/// Approximate quantile function of the standard normal distribution.
///
/// Abramowitz and Stegun 26.2.23, absolute error below 4.5e-4.
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if p >= 1.0 {
        return 5.0;
    }
    if p <= 0.0 {
        return -5.0;
    }
    if p == 0.5 {
        return 0.0;
    }

    // Valid for 0 < q <= 0.5; mirror the upper half.
    let q = if p < 0.5 { p } else { 1.0 - p };
    let t = (-2.0 * q.ln()).sqrt();

    let c0 = 2.515517;
    let c1 = 0.802853;
    let c2 = 0.010328;

    let d1 = 1.432788;
    let d2 = 0.189269;
    let d3 = 0.001308;

    let numerator = c0 + c1 * t + c2 * t * t;
    let denominator = 1.0 + d1 * t + d2 * t * t + d3 * t * t * t;
    let x = t - (numerator / denominator);

    if p < 0.5 {
        -x
    } else {
        x
    }
}

/// Demand and lead-time characteristics of an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderInputs {
    pub daily_demand: f64,
    pub demand_std_dev: f64,
    pub lead_time_days: f64,
    /// Probability of not stocking out during a replenishment cycle.
    pub service_level: f64,
}

impl Default for ReorderInputs {
    fn default() -> Self {
        Self {
            daily_demand: 5000.0 / DAYS_PER_YEAR,
            demand_std_dev: 4.0,
            lead_time_days: 7.0,
            service_level: 0.95,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReorderPoint {
    pub lead_time_demand: f64,
    pub safety_stock: f64,
    pub reorder_point: f64,
}

/// Reorder point under i.i.d. normal daily demand:
/// `ROP = d * L + z * sigma * sqrt(L)`.
///
/// Service levels below 50% would give negative safety stock; it is
/// clamped at zero.
pub fn reorder_point(inputs: &ReorderInputs) -> EoqResult<ReorderPoint> {
    ensure_non_negative("daily_demand", inputs.daily_demand)?;
    ensure_non_negative("demand_std_dev", inputs.demand_std_dev)?;
    ensure_positive("lead_time_days", inputs.lead_time_days)?;
    if !(inputs.service_level > 0.0 && inputs.service_level < 1.0) {
        return Err(EoqError::invalid(
            "service_level",
            format!("must be in (0, 1), got {}", inputs.service_level),
        ));
    }

    let z = inverse_normal_cdf(inputs.service_level);
    let lead_time_demand = inputs.daily_demand * inputs.lead_time_days;
    let safety_stock = (z * inputs.demand_std_dev * inputs.lead_time_days.sqrt()).max(0.0);

    Ok(ReorderPoint {
        lead_time_demand,
        safety_stock,
        reorder_point: lead_time_demand + safety_stock,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_form_default_scenario() {
        let eoq = economic_order_quantity(&EoqParameters::default()).unwrap();
        assert!((eoq.quantity - 612.372).abs() < 1e-3);
        assert!((eoq.total_cost - 734.847).abs() < 1e-3);
        assert!((eoq.orders_per_year - 8.165).abs() < 1e-3);
        assert!((eoq.cycle_days - 44.70).abs() < 1e-2);
    }

    #[test]
    fn test_closed_form_rejects_invalid_parameters() {
        let params = EoqParameters {
            holding_cost_per_unit: 0.0,
            ..EoqParameters::default()
        };
        assert!(economic_order_quantity(&params).is_err());
    }

    #[test]
    fn test_critical_ratio() {
        assert_eq!(critical_ratio(1.0, 0.5), 1.0 / 1.5);
        assert_eq!(critical_ratio(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_inverse_normal_cdf_known_quantiles() {
        assert_eq!(inverse_normal_cdf(0.5), 0.0);
        assert!((inverse_normal_cdf(0.95) - 1.645).abs() < 1e-3);
        assert!((inverse_normal_cdf(0.05) + 1.645).abs() < 1e-3);
        assert!((inverse_normal_cdf(0.975) - 1.960).abs() < 1e-3);
    }

    #[test]
    fn test_reorder_point_without_variability_is_lead_time_demand() {
        let inputs = ReorderInputs {
            daily_demand: 10.0,
            demand_std_dev: 0.0,
            lead_time_days: 5.0,
            service_level: 0.99,
        };
        let rop = reorder_point(&inputs).unwrap();
        assert_eq!(rop.safety_stock, 0.0);
        assert_eq!(rop.reorder_point, 50.0);
    }

    #[test]
    fn test_reorder_point_at_median_service_has_no_safety_stock() {
        let inputs = ReorderInputs {
            service_level: 0.5,
            ..ReorderInputs::default()
        };
        let rop = reorder_point(&inputs).unwrap();
        assert_eq!(rop.safety_stock, 0.0);
    }

    #[test]
    fn test_reorder_point_with_safety_stock() {
        let inputs = ReorderInputs {
            daily_demand: 20.0,
            demand_std_dev: 5.0,
            lead_time_days: 4.0,
            service_level: 0.95,
        };
        let rop = reorder_point(&inputs).unwrap();
        // z ~ 1.645, sigma_L = 5 * 2 = 10
        assert!((rop.safety_stock - 16.45).abs() < 0.01);
        assert!((rop.reorder_point - 96.45).abs() < 0.01);
    }

    #[test]
    fn test_reorder_point_rejects_bad_inputs() {
        let base = ReorderInputs::default();
        let bad = [
            ReorderInputs { service_level: 1.0, ..base },
            ReorderInputs { service_level: 0.0, ..base },
            ReorderInputs { lead_time_days: 0.0, ..base },
            ReorderInputs { daily_demand: -1.0, ..base },
            ReorderInputs { demand_std_dev: -0.1, ..base },
        ];
        for inputs in bad {
            assert!(reorder_point(&inputs).is_err(), "{:?}", inputs);
        }
    }
}
