//! Inventory rotation analysis.
//!
//! Joins per-day sales facts against a current inventory snapshot per
//! (product, store), derives velocity and days-of-cover metrics, classifies
//! each line into a stock-health level, and computes reorder quantity and
//! cost. The computation is a stateless single-pass batch transform: no I/O,
//! no caching, no mutation of inputs.

use crate::{
    Result,
    error::RotationError,
    types::{InventorySnapshot, RotationRecord, SalesFact, StockLevel},
};
use chrono::NaiveDate;
use polars::prelude::*;

/// Days-of-cover sentinel reported for lines with no sales velocity.
pub const COVER_SENTINEL_DAYS: f64 = 999.0;

/// Configuration for [`RotationAnalyzer`].
#[derive(Debug, Clone)]
pub struct RotationConfig {
    /// Value reported as `days_of_cover` when `avg_daily_sales` is zero.
    /// Default is 999.
    pub cover_sentinel_days: f64,
    /// Reject malformed input rows (negative `stock_on_hand`, negative
    /// `units_sold`, `stock_min > stock_max`) instead of passing them
    /// through. Default is `false`: the feeds own row validity.
    pub strict: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            cover_sentinel_days: COVER_SENTINEL_DAYS,
            strict: false,
        }
    }
}

/// Computes rotation metrics from sales facts and an inventory snapshot.
///
/// The join is snapshot-driven: every inventory row produces exactly one
/// [`RotationRecord`], in snapshot input order. Inventory rows with no
/// matching sales are kept with zero units sold, not dropped. Sales rows
/// with no matching inventory line contribute nothing.
///
/// # Example
///
/// ```ignore
/// use rotation::{RotationAnalyzer, SalesFact, InventorySnapshot};
///
/// let analyzer = RotationAnalyzer::new();
/// let records = analyzer.analyze(&sales, &inventory, 10)?;
/// assert_eq!(records.len(), inventory.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RotationAnalyzer {
    config: RotationConfig,
}

impl RotationAnalyzer {
    /// Creates an analyzer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an analyzer with the given configuration.
    pub const fn with_config(config: RotationConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub const fn config(&self) -> &RotationConfig {
        &self.config
    }

    /// Computes one [`RotationRecord`] per inventory row.
    ///
    /// `period_length_days` must equal the length of the inclusive date
    /// range the sales facts were filtered to; it is the only validated
    /// precondition. Fails with [`RotationError::InvalidPeriod`] when it is
    /// less than 1.
    pub fn analyze(
        &self,
        sales: &[SalesFact],
        inventory: &[InventorySnapshot],
        period_length_days: i64,
    ) -> Result<Vec<RotationRecord>> {
        if period_length_days < 1 {
            return Err(RotationError::InvalidPeriod {
                days: period_length_days,
            });
        }
        if self.config.strict {
            validate_rows(sales, inventory)?;
        }
        if inventory.is_empty() {
            return Ok(Vec::new());
        }

        let joined = join_sales_onto_inventory(sales, inventory)?;
        self.derive_records(&joined, period_length_days)
    }

    /// Computes rotation metrics for an inclusive date range.
    ///
    /// Derives `period_length_days` as `(end - start) + 1` days and
    /// delegates to [`analyze`](Self::analyze). Fails with
    /// [`RotationError::InvalidDateRange`] when `start` is after `end`.
    pub fn analyze_range(
        &self,
        sales: &[SalesFact],
        inventory: &[InventorySnapshot],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RotationRecord>> {
        if start > end {
            return Err(RotationError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        let days = (end - start).num_days() + 1;
        self.analyze(sales, inventory, days)
    }

    /// Materializes typed records from the joined frame.
    fn derive_records(
        &self,
        joined: &DataFrame,
        period_length_days: i64,
    ) -> Result<Vec<RotationRecord>> {
        let product = joined.column("product_key")?.str()?;
        let store = joined.column("store_key")?.str()?;
        let stock_on_hand = joined.column("stock_on_hand")?.i64()?;
        let stock_min = joined.column("stock_min")?.i64()?;
        let stock_max = joined.column("stock_max")?.i64()?;
        let unit_cost = joined.column("unit_cost")?.f64()?;
        let units_sold = joined.column("units_sold_period")?.i64()?;

        let mut records = Vec::with_capacity(joined.height());
        for idx in 0..joined.height() {
            let on_hand = stock_on_hand.get(idx).unwrap_or(0);
            let min = stock_min.get(idx).unwrap_or(0);
            let max = stock_max.get(idx).unwrap_or(0);
            let cost = unit_cost.get(idx).unwrap_or(0.0);
            let units = units_sold.get(idx).unwrap_or(0);

            // The rounded average feeds the cover division so the reported
            // figures stay mutually consistent.
            let avg_daily_sales = round_to(units as f64 / period_length_days as f64, 2);
            let days_of_cover = if avg_daily_sales > 0.0 {
                round_to(on_hand as f64 / avg_daily_sales, 1)
            } else {
                self.config.cover_sentinel_days
            };
            let turnover_index = if on_hand > 0 {
                round_to(units as f64 / on_hand as f64, 2)
            } else {
                0.0
            };

            let stock_level = StockLevel::classify(on_hand, min, max);
            let reorder_qty = if stock_level.needs_reorder() {
                (max - on_hand).max(0)
            } else {
                0
            };
            let reorder_cost = reorder_qty as f64 * cost;

            records.push(RotationRecord {
                product_key: product.get(idx).unwrap_or_default().to_string(),
                store_key: store.get(idx).unwrap_or_default().to_string(),
                stock_on_hand: on_hand,
                stock_min: min,
                stock_max: max,
                unit_cost: cost,
                units_sold_period: units,
                avg_daily_sales,
                days_of_cover,
                turnover_index,
                stock_level,
                reorder_qty,
                reorder_cost,
            });
        }

        Ok(records)
    }
}

/// Aggregates sales per (product, store) and left-joins them onto the
/// inventory snapshot. Unmatched lines get `units_sold_period = 0`.
fn join_sales_onto_inventory(
    sales: &[SalesFact],
    inventory: &[InventorySnapshot],
) -> Result<DataFrame> {
    let sales_df = df![
        "product_key" => sales.iter().map(|f| f.product_key.as_str()).collect::<Vec<_>>(),
        "store_key" => sales.iter().map(|f| f.store_key.as_str()).collect::<Vec<_>>(),
        "units_sold" => sales.iter().map(|f| f.units_sold).collect::<Vec<_>>(),
    ]?;
    let inventory_df = df![
        "product_key" => inventory.iter().map(|s| s.product_key.as_str()).collect::<Vec<_>>(),
        "store_key" => inventory.iter().map(|s| s.store_key.as_str()).collect::<Vec<_>>(),
        "stock_on_hand" => inventory.iter().map(|s| s.stock_on_hand).collect::<Vec<_>>(),
        "stock_min" => inventory.iter().map(|s| s.stock_min).collect::<Vec<_>>(),
        "stock_max" => inventory.iter().map(|s| s.stock_max).collect::<Vec<_>>(),
        "unit_cost" => inventory.iter().map(|s| s.unit_cost).collect::<Vec<_>>(),
    ]?;

    let aggregated = sales_df
        .lazy()
        .group_by([col("product_key"), col("store_key")])
        .agg([col("units_sold").sum().alias("units_sold_period")]);

    // Join order is not guaranteed by the engine; the row index pins the
    // output to snapshot order, which also makes repeated calls identical.
    let joined = inventory_df
        .lazy()
        .with_row_index("snapshot_row", None)
        .join(
            aggregated,
            [col("product_key"), col("store_key")],
            [col("product_key"), col("store_key")],
            JoinArgs::new(JoinType::Left),
        )
        .with_column(col("units_sold_period").fill_null(lit(0i64)))
        .sort(["snapshot_row"], SortMultipleOptions::default())
        .drop(["snapshot_row"])
        .collect()?;

    Ok(joined)
}

/// Rejects rows that violate the documented input contract.
fn validate_rows(sales: &[SalesFact], inventory: &[InventorySnapshot]) -> Result<()> {
    for fact in sales {
        if fact.units_sold < 0 {
            return Err(RotationError::MalformedRecord {
                product: fact.product_key.clone(),
                store: fact.store_key.clone(),
                reason: format!("negative units_sold ({})", fact.units_sold),
            });
        }
    }
    for snapshot in inventory {
        if snapshot.stock_on_hand < 0 {
            return Err(RotationError::MalformedRecord {
                product: snapshot.product_key.clone(),
                store: snapshot.store_key.clone(),
                reason: format!("negative stock_on_hand ({})", snapshot.stock_on_hand),
            });
        }
        if snapshot.stock_min > snapshot.stock_max {
            return Err(RotationError::MalformedRecord {
                product: snapshot.product_key.clone(),
                store: snapshot.store_key.clone(),
                reason: format!(
                    "stock_min ({}) exceeds stock_max ({})",
                    snapshot.stock_min, snapshot.stock_max
                ),
            });
        }
    }
    Ok(())
}

/// Round to a fixed number of decimal places.
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
