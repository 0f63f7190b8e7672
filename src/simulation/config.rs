// src/simulation/config.rs

use serde::Deserialize;

/// Parameters of a continuous-review (Q, R) replenishment run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub periods: usize,
    /// Periods between placing an order and receiving it.
    pub lead_time: usize,
    pub initial_inventory: u32,
    /// Q: size of each replenishment order.
    pub order_quantity: u32,
    /// R: reorder when inventory position drops to this level.
    pub reorder_point: u32,
    /// Cost per unit on hand per period.
    pub holding_cost: f64,
    /// Fixed cost per order placed.
    pub ordering_cost: f64,
    /// Cost per backlogged unit per period.
    pub shortage_cost: f64,
    /// Mean of the normally distributed demand per period.
    pub demand_mean: f64,
    pub demand_std_dev: f64,
    /// Seed for the demand schedule; same seed, same run.
    pub demand_seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        // Default item in daily periods: H = 1.2 / 365, K = 45.
        Self {
            periods: 365,
            lead_time: 7,
            initial_inventory: 612,
            order_quantity: 612,
            reorder_point: 110,
            holding_cost: 1.2 / 365.0,
            ordering_cost: 45.0,
            shortage_cost: 0.05,
            demand_mean: 5000.0 / 365.0,
            demand_std_dev: 4.0,
            demand_seed: 7,
        }
    }
}
