// src/analysis/restock.rs

use crate::error::{ensure_non_negative, EoqError, EoqResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock status of one SKU, as read off the inventory table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuStatus {
    pub sku: String,
    pub on_hand: f64,
    pub reorder_point: f64,
    pub eoq: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestockRecommendation {
    pub sku: String,
    pub priority: Priority,
    pub recommended_quantity: u32,
}

/// Coverage = on_hand / reorder_point. Below half is urgent.
fn priority_for(item: &SkuStatus) -> Priority {
    if item.reorder_point <= 0.0 {
        return Priority::High;
    }
    let coverage = item.on_hand / item.reorder_point;
    if coverage < 0.5 {
        Priority::High
    } else if coverage < 0.8 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

fn validate_item(item: &SkuStatus) -> EoqResult<()> {
    if !item.on_hand.is_finite() {
        return Err(EoqError::invalid(
            "on_hand",
            format!("`{}` has non-finite value {}", item.sku, item.on_hand),
        ));
    }
    ensure_non_negative("reorder_point", item.reorder_point)
        .and_then(|_| ensure_non_negative("eoq", item.eoq))
        .map_err(|e| match e {
            EoqError::InvalidParameter { name, reason } => EoqError::InvalidParameter {
                name,
                reason: format!("`{}` {}", item.sku, reason),
            },
            other => other,
        })
}

/// Recommends an order for every SKU at or below its reorder point.
///
/// The order is the EOQ, or the shortfall to the reorder point if that is
/// larger. Results are sorted High to Low; equal priorities keep input order.
///
/// # Errors
/// `InvalidParameter` if any stock level is non-finite, or a reorder point
/// or EOQ is negative.
pub fn recommend_restock(items: &[SkuStatus]) -> EoqResult<Vec<RestockRecommendation>> {
    for item in items {
        validate_item(item)?;
    }

    let mut recommendations: Vec<RestockRecommendation> = items
        .iter()
        .filter(|item| item.on_hand <= item.reorder_point)
        .map(|item| {
            let shortfall = (item.reorder_point - item.on_hand).max(0.0);
            RestockRecommendation {
                sku: item.sku.clone(),
                priority: priority_for(item),
                recommended_quantity: item.eoq.max(shortfall).ceil() as u32,
            }
        })
        .collect();

    // sort_by_key is stable
    recommendations.sort_by_key(|r| r.priority);
    Ok(recommendations)
}
