//! Inventory headline figures and the reorder plan.
//!
//! Both operate on the output of the analyzer so the figures agree with the
//! rotation table they sit next to.

use serde::{Deserialize, Serialize};

use crate::types::{RotationRecord, StockLevel};

/// Headline inventory figures across a set of rotation records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    /// Total units on hand across all lines.
    pub total_stock: i64,
    /// Total value of stock on hand at unit cost.
    pub inventory_value: f64,
    /// Lines with nothing on hand.
    pub out_of_stock: usize,
    /// Lines below their reorder threshold.
    pub critical: usize,
    /// Lines at or above capacity.
    pub excess: usize,
    /// Lines between threshold and capacity.
    pub normal: usize,
}

/// Summarizes stock position and level counts.
pub fn summarize(records: &[RotationRecord]) -> InventorySummary {
    let mut summary = InventorySummary::default();
    for record in records {
        summary.total_stock += record.stock_on_hand;
        summary.inventory_value += record.stock_on_hand as f64 * record.unit_cost;
        match record.stock_level {
            StockLevel::OutOfStock => summary.out_of_stock += 1,
            StockLevel::Critical => summary.critical += 1,
            StockLevel::Excess => summary.excess += 1,
            StockLevel::Normal => summary.normal += 1,
        }
    }
    summary
}

/// Purchase order derived from depleted lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReorderPlan {
    /// Out-of-stock and critical lines, most depleted first.
    pub lines: Vec<RotationRecord>,
    /// Total units to reorder across all lines.
    pub total_units: i64,
    /// Total cost of the reorder at unit cost.
    pub total_cost: f64,
}

impl ReorderPlan {
    /// Whether any line needs reordering.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Builds the reorder plan from a set of rotation records.
///
/// Keeps only out-of-stock and critical lines, sorted ascending by stock on
/// hand (ties broken by product then store key so the plan is stable).
pub fn reorder_plan(records: &[RotationRecord]) -> ReorderPlan {
    let mut lines: Vec<RotationRecord> = records
        .iter()
        .filter(|r| r.stock_level.needs_reorder())
        .cloned()
        .collect();
    lines.sort_by(|a, b| {
        a.stock_on_hand
            .cmp(&b.stock_on_hand)
            .then_with(|| a.product_key.cmp(&b.product_key))
            .then_with(|| a.store_key.cmp(&b.store_key))
    });

    let total_units = lines.iter().map(|r| r.reorder_qty).sum();
    let total_cost = lines.iter().map(|r| r.reorder_cost).sum();

    ReorderPlan {
        lines,
        total_units,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(
        product: &str,
        on_hand: i64,
        min: i64,
        max: i64,
        cost: f64,
    ) -> RotationRecord {
        let stock_level = StockLevel::classify(on_hand, min, max);
        let reorder_qty = if stock_level.needs_reorder() {
            (max - on_hand).max(0)
        } else {
            0
        };
        RotationRecord {
            product_key: product.to_string(),
            store_key: "Store 101".to_string(),
            stock_on_hand: on_hand,
            stock_min: min,
            stock_max: max,
            unit_cost: cost,
            units_sold_period: 0,
            avg_daily_sales: 0.0,
            days_of_cover: 999.0,
            turnover_index: 0.0,
            stock_level,
            reorder_qty,
            reorder_cost: reorder_qty as f64 * cost,
        }
    }

    #[test]
    fn summary_totals_and_level_counts() {
        let records = vec![
            record("A", 0, 10, 50, 100.0),
            record("B", 5, 10, 50, 10.0),
            record("C", 60, 10, 50, 20.0),
            record("D", 25, 10, 50, 30.0),
        ];
        let summary = summarize(&records);

        assert_eq!(summary.total_stock, 90);
        // 0*100 + 5*10 + 60*20 + 25*30
        assert_relative_eq!(summary.inventory_value, 2_000.0);
        assert_eq!(summary.out_of_stock, 1);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.excess, 1);
        assert_eq!(summary.normal, 1);
    }

    #[test]
    fn plan_keeps_only_depleted_lines_most_depleted_first() {
        let records = vec![
            record("A", 25, 10, 50, 30.0),
            record("B", 5, 10, 50, 10.0),
            record("C", 0, 10, 50, 100.0),
            record("D", 60, 10, 50, 20.0),
        ];
        let plan = reorder_plan(&records);

        let keys: Vec<&str> = plan.lines.iter().map(|r| r.product_key.as_str()).collect();
        assert_eq!(keys, ["C", "B"]);
        // C: 50 units, B: 45 units
        assert_eq!(plan.total_units, 95);
        assert_relative_eq!(plan.total_cost, 50.0 * 100.0 + 45.0 * 10.0);
    }

    #[test]
    fn plan_tie_breaks_on_keys() {
        let records = vec![
            record("B", 3, 10, 50, 10.0),
            record("A", 3, 10, 50, 10.0),
        ];
        let plan = reorder_plan(&records);
        let keys: Vec<&str> = plan.lines.iter().map(|r| r.product_key.as_str()).collect();
        assert_eq!(keys, ["A", "B"]);
    }

    #[test]
    fn healthy_stock_yields_empty_plan() {
        let records = vec![record("A", 25, 10, 50, 30.0)];
        let plan = reorder_plan(&records);
        assert!(plan.is_empty());
        assert_eq!(plan.total_units, 0);
        assert_relative_eq!(plan.total_cost, 0.0);
    }
}
