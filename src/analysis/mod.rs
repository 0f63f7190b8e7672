pub mod anomaly;
pub mod curve;
pub mod restock;
