// src/model/queues.rs

use std::collections::VecDeque;

/// Fixed-length pipeline modelling supplier lead time.
///
/// Anything pushed at the end of period `t` pops out at the start of
/// period `t + delay`.
#[derive(Debug, Clone)]
pub struct LeadTimeQueue {
    buffer: VecDeque<u32>,
}

impl LeadTimeQueue {
    pub fn new(delay: usize) -> Self {
        // Pre-fill with empty slots so the first real order takes `delay` periods.
        let buffer = std::iter::repeat(0).take(delay).collect();
        Self { buffer }
    }

    /// Goods arriving this period. Call at the START of the period.
    pub fn pop_arrival(&mut self) -> u32 {
        self.buffer.pop_front().unwrap_or(0)
    }

    /// Goods leaving the supplier this period. Call at the END of the period.
    pub fn push_departure(&mut self, quantity: u32) {
        self.buffer.push_back(quantity);
    }

    /// Units ordered but not yet received.
    pub fn in_transit(&self) -> u32 {
        self.buffer.iter().fold(0u32, |total, q| total.saturating_add(*q))
    }
}
