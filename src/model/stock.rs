// src/model/stock.rs

/// On-hand state of a single stocking point under a (Q, R) policy.
#[derive(Debug, Clone, Default)]
pub struct StockPoint {
    pub inventory: u32,
    pub backlog: u32,

    // Tracking for the history log
    pub last_demand: u32,
    pub last_received: u32,
    pub last_shipped: u32,
}

impl StockPoint {
    pub fn new(initial_inventory: u32) -> Self {
        Self {
            inventory: initial_inventory,
            ..Self::default()
        }
    }

    /// Goods from the supplier land in inventory.
    pub fn receive_shipment(&mut self, quantity: u32) {
        self.inventory = self.inventory.saturating_add(quantity);
        self.last_received = quantity;
    }

    /// Serves this period's demand plus any backlog.
    ///
    /// Returns the quantity shipped to customers.
    pub fn serve_demand(&mut self, demand: u32) -> u32 {
        self.last_demand = demand;

        let obligation = demand.saturating_add(self.backlog);
        let shipped = obligation.min(self.inventory);

        self.inventory -= shipped;
        self.backlog = obligation - shipped;
        self.last_shipped = shipped;
        shipped
    }

    /// Inventory position: on hand minus backlog plus what is already on order.
    pub fn position(&self, on_order: u32) -> i64 {
        self.inventory as i64 - self.backlog as i64 + on_order as i64
    }

    /// Holding plus shortage cost for the current state.
    pub fn period_cost(&self, holding_cost: f64, shortage_cost: f64) -> f64 {
        self.inventory as f64 * holding_cost + self.backlog as f64 * shortage_cost
    }
}
