pub mod cost;
pub mod queues;
pub mod stock;
