// src/simulation/engine.rs

use crate::error::{ensure_non_negative, EoqError, EoqResult};
use crate::model::queues::LeadTimeQueue;
use crate::model::stock::StockPoint;
use crate::simulation::config::SimulationConfig;
use serde::Serialize;
use tracing::debug;

/// Largest Q, R or starting stock accepted; keeps position arithmetic
/// and batch sizes well inside `u32`.
pub const MAX_UNITS: u32 = u32::MAX / 2;

// Serialize so the log can go straight to CSV
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    pub period: usize,
    pub demand: u32,
    pub received: u32,
    pub shipped: u32,
    pub inventory: u32,
    pub backlog: u32,
    pub on_order: u32,
    pub order_placed: u32,
    pub cost: f64,
}

/// Runs a (Q, R) policy against a demand schedule.
pub struct ReplenishmentSimulation {
    config: SimulationConfig,
    pub stock: StockPoint,
    pub pipeline: LeadTimeQueue,
    pub demand_schedule: Vec<u32>,
    pub current_period: usize,
    pub history: Vec<HistoryRecord>,
}

impl ReplenishmentSimulation {
    pub fn new(config: SimulationConfig, demand_schedule: Vec<u32>) -> EoqResult<Self> {
        if config.periods == 0 {
            return Err(EoqError::invalid("periods", "must be at least 1"));
        }
        if config.lead_time == 0 {
            return Err(EoqError::invalid("lead_time", "must be at least 1 period"));
        }
        if config.order_quantity == 0 {
            return Err(EoqError::invalid("order_quantity", "must be at least 1 unit"));
        }
        for (name, units) in [
            ("order_quantity", config.order_quantity),
            ("reorder_point", config.reorder_point),
            ("initial_inventory", config.initial_inventory),
        ] {
            if units > MAX_UNITS {
                return Err(EoqError::invalid(name, format!("must be <= {}, got {}", MAX_UNITS, units)));
            }
        }
        ensure_non_negative("holding_cost", config.holding_cost)?;
        ensure_non_negative("ordering_cost", config.ordering_cost)?;
        ensure_non_negative("shortage_cost", config.shortage_cost)?;

        Ok(Self {
            stock: StockPoint::new(config.initial_inventory),
            pipeline: LeadTimeQueue::new(config.lead_time),
            demand_schedule,
            current_period: 1,
            history: Vec::with_capacity(config.periods),
            config,
        })
    }

    pub fn run(&mut self) {
        while self.current_period <= self.config.periods {
            self.step();
        }
        debug!(
            periods = self.config.periods,
            total_cost = self.total_cost(),
            fill_rate = self.fill_rate(),
            "replenishment simulation finished"
        );
    }

    fn step(&mut self) {
        let period = self.current_period;

        // 1. Arrivals ordered `lead_time` periods ago
        let arrival = self.pipeline.pop_arrival();
        self.stock.receive_shipment(arrival);

        // 2. Serve demand; shortages are backlogged.
        // A schedule shorter than the run means no demand.
        let demand = self.demand_schedule.get(period - 1).copied().unwrap_or(0);
        self.stock.serve_demand(demand);
        if self.stock.backlog > 0 {
            debug!(period, backlog = self.stock.backlog, "stock-out");
        }

        // 3. Review: order Q at a time until the position is above R
        let order = self.order_decision(self.pipeline.in_transit());
        let orders_placed = order / self.config.order_quantity;
        self.pipeline.push_departure(order);

        // 4. Record
        let cost = self.stock.period_cost(self.config.holding_cost, self.config.shortage_cost)
            + orders_placed as f64 * self.config.ordering_cost;

        self.history.push(HistoryRecord {
            period,
            demand: self.stock.last_demand,
            received: self.stock.last_received,
            shipped: self.stock.last_shipped,
            inventory: self.stock.inventory,
            backlog: self.stock.backlog,
            on_order: self.pipeline.in_transit(),
            order_placed: order,
            cost,
        });
        self.current_period += 1;
    }

    fn order_decision(&self, on_order: u32) -> u32 {
        let reorder_point = self.config.reorder_point as i64;
        let q = self.config.order_quantity as i64;
        let position = self.stock.position(on_order);

        if position > reorder_point {
            return 0;
        }
        // Smallest n with position + n * Q > R, in whole batches that fit a u32
        let batches = ((reorder_point - position) / q + 1).min(u32::MAX as i64 / q);
        (batches * q) as u32
    }

    pub fn total_cost(&self) -> f64 {
        self.history.iter().map(|r| r.cost).sum()
    }

    /// Units shipped over units demanded across the run.
    /// 1.0 when there was no demand.
    pub fn fill_rate(&self) -> f64 {
        let demanded: u64 = self.history.iter().map(|r| r.demand as u64).sum();
        if demanded == 0 {
            return 1.0;
        }
        let shipped: u64 = self.history.iter().map(|r| r.shipped as u64).sum();
        shipped as f64 / demanded as f64
    }

    pub fn stockout_periods(&self) -> usize {
        self.history.iter().filter(|r| r.backlog > 0).count()
    }

    pub fn orders_placed(&self) -> usize {
        self.history.iter().filter(|r| r.order_placed > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SimulationConfig {
        SimulationConfig {
            periods: 30,
            lead_time: 2,
            initial_inventory: 50,
            order_quantity: 40,
            reorder_point: 25,
            holding_cost: 0.5,
            ordering_cost: 10.0,
            shortage_cost: 2.0,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_stock_is_conserved() {
        let mut sim = ReplenishmentSimulation::new(config(), vec![8; 30]).unwrap();
        sim.run();

        let received: u32 = sim.history.iter().map(|r| r.received).sum();
        let shipped: u32 = sim.history.iter().map(|r| r.shipped).sum();
        let last = sim.history.last().unwrap();
        assert_eq!(50 + received - shipped, last.inventory);
        assert_eq!(sim.history.len(), 30);
    }

    #[test]
    fn test_no_demand_places_no_orders() {
        let mut sim = ReplenishmentSimulation::new(config(), vec![]).unwrap();
        sim.run();
        assert_eq!(sim.orders_placed(), 0);
        assert_eq!(sim.fill_rate(), 1.0);
        // 30 periods * 50 units * 0.5
        assert_eq!(sim.total_cost(), 750.0);
    }

    #[test]
    fn test_orders_when_position_reaches_reorder_point() {
        let mut sim = ReplenishmentSimulation::new(config(), vec![25; 3]).unwrap();
        sim.run();

        // Period 1: 50 - 25 = 25 <= R, order 40 (position 65)
        assert_eq!(sim.history[0].order_placed, 40);
        assert_eq!(sim.history[0].on_order, 40);
        // Period 2: 0 on hand + 40 on order = 40 > R
        assert_eq!(sim.history[1].order_placed, 0);
        // Period 3: the first order lands
        assert_eq!(sim.history[2].received, 40);
    }

    #[test]
    fn test_large_shortfall_orders_multiple_batches() {
        let mut cfg = config();
        cfg.initial_inventory = 0;
        let mut sim = ReplenishmentSimulation::new(cfg, vec![60]).unwrap();
        sim.run();

        // position -60, need > 25: 3 batches of 40 -> 60
        let first = &sim.history[0];
        assert_eq!(first.backlog, 60);
        assert_eq!(first.order_placed, 120);
        // 60 backlog * 2.0 + 3 orders * 10.0
        assert_eq!(first.cost, 150.0);
        assert!(sim.stockout_periods() >= 1);
    }

    #[test]
    fn test_largest_accepted_policy_does_not_overflow() {
        let mut cfg = config();
        cfg.initial_inventory = 0;
        cfg.order_quantity = MAX_UNITS;
        cfg.reorder_point = MAX_UNITS;
        cfg.periods = 5;
        let mut sim = ReplenishmentSimulation::new(cfg, vec![MAX_UNITS; 5]).unwrap();
        sim.run();

        assert_eq!(sim.history.len(), 5);
        assert!(sim.history.iter().all(|r| r.order_placed % MAX_UNITS == 0));
    }

    #[test]
    fn test_tight_policy_loses_fill_rate() {
        let mut cfg = config();
        cfg.reorder_point = 0;
        cfg.order_quantity = 5;
        let mut sim = ReplenishmentSimulation::new(cfg, vec![10; 30]).unwrap();
        sim.run();
        assert!(sim.fill_rate() < 1.0);
        assert!(sim.stockout_periods() > 0);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut cfg = config();
        cfg.order_quantity = 0;
        assert!(ReplenishmentSimulation::new(cfg, vec![]).is_err());

        let mut cfg = config();
        cfg.lead_time = 0;
        assert!(ReplenishmentSimulation::new(cfg, vec![]).is_err());

        let mut cfg = config();
        cfg.shortage_cost = -1.0;
        assert!(ReplenishmentSimulation::new(cfg, vec![]).is_err());

        let mut cfg = config();
        cfg.reorder_point = u32::MAX;
        assert!(matches!(
            ReplenishmentSimulation::new(cfg, vec![]),
            Err(EoqError::InvalidParameter { name: "reorder_point", .. })
        ));
    }
}
