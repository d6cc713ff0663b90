//! Row types shared across the crate.
//!
//! Sales facts and inventory snapshots are supplied by external feeds already
//! filtered to the caller's scope (date range, stores, products). Rotation
//! records are the derived output, one per inventory line, carrying the
//! snapshot fields through alongside the computed metrics.

use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// One day of sales for a (product, store) pair.
///
/// Facts are immutable and scoped to a caller-supplied inclusive date range.
/// Variants of the same product may appear as distinct `product_key` values;
/// the analyzer aggregates whatever keys it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesFact {
    /// Date the units were sold.
    pub date: NaiveDate,
    /// Product identifier.
    pub product_key: String,
    /// Store identifier.
    pub store_key: String,
    /// Units sold on this date. Non-negative by contract.
    pub units_sold: i64,
    /// Revenue for this date, in currency units. Non-negative by contract.
    pub revenue: f64,
}

/// Point-in-time stock position for a (product, store) pair.
///
/// Not a time series: one row per pair, read at analysis time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Product identifier.
    pub product_key: String,
    /// Store identifier.
    pub store_key: String,
    /// Units currently in stock.
    pub stock_on_hand: i64,
    /// Reorder threshold: below this the line is critical.
    pub stock_min: i64,
    /// Storage capacity: at or above this the line is excess.
    pub stock_max: i64,
    /// Acquisition cost per unit, in currency units.
    pub unit_cost: f64,
}

/// Stock-health level for one inventory line.
///
/// A pure function of `(stock_on_hand, stock_min, stock_max)`; sales have no
/// bearing on the level.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockLevel {
    /// Nothing on hand
    OutOfStock,
    /// Below the reorder threshold
    Critical,
    /// At or above capacity
    Excess,
    /// Between threshold and capacity
    Normal,
}

impl StockLevel {
    /// Classify a stock position. Rules are evaluated in order, first match
    /// wins:
    ///
    /// 1. `stock_on_hand == 0` → [`OutOfStock`](Self::OutOfStock)
    /// 2. `stock_on_hand < stock_min` → [`Critical`](Self::Critical)
    /// 3. `stock_on_hand >= stock_max` → [`Excess`](Self::Excess)
    /// 4. otherwise → [`Normal`](Self::Normal)
    pub const fn classify(stock_on_hand: i64, stock_min: i64, stock_max: i64) -> Self {
        if stock_on_hand == 0 {
            Self::OutOfStock
        } else if stock_on_hand < stock_min {
            Self::Critical
        } else if stock_on_hand >= stock_max {
            Self::Excess
        } else {
            Self::Normal
        }
    }

    /// Whether lines at this level get a reorder quantity.
    pub const fn needs_reorder(self) -> bool {
        matches!(self, Self::OutOfStock | Self::Critical)
    }
}

/// Derived rotation metrics for one inventory line.
///
/// Produced by [`RotationAnalyzer`](crate::RotationAnalyzer); recomputed on
/// every call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationRecord {
    /// Product identifier.
    pub product_key: String,
    /// Store identifier.
    pub store_key: String,
    /// Units currently in stock (from the snapshot).
    pub stock_on_hand: i64,
    /// Reorder threshold (from the snapshot).
    pub stock_min: i64,
    /// Storage capacity (from the snapshot).
    pub stock_max: i64,
    /// Acquisition cost per unit (from the snapshot).
    pub unit_cost: f64,
    /// Units sold over the reporting period; 0 when no sales matched.
    pub units_sold_period: i64,
    /// Average units sold per day, rounded to 2 decimals.
    pub avg_daily_sales: f64,
    /// Days until stock depletes at the average velocity, rounded to
    /// 1 decimal; 999 when there is no sales velocity.
    pub days_of_cover: f64,
    /// Units sold per unit in stock, rounded to 2 decimals; 0 when there is
    /// no stock.
    pub turnover_index: f64,
    /// Stock-health classification.
    pub stock_level: StockLevel,
    /// Units needed to restore the line to capacity; 0 unless the level is
    /// out-of-stock or critical.
    pub reorder_qty: i64,
    /// Cost of the reorder quantity at `unit_cost`.
    pub reorder_cost: f64,
}
