//! Sales totals and revenue rankings.
//!
//! Aggregations the reporting layer renders as headline metrics and "top N"
//! tables. All figures come from the sales facts alone; inventory has no
//! bearing here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::SalesFact;

/// Overall sales figures for the reporting period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesTotals {
    /// Total revenue.
    pub revenue: f64,
    /// Total units sold.
    pub units: i64,
    /// Revenue per unit sold, rounded to 2 decimals; 0 when nothing sold.
    pub avg_ticket: f64,
}

/// Totals across all sales facts.
pub fn sales_totals(sales: &[SalesFact]) -> SalesTotals {
    let revenue: f64 = sales.iter().map(|f| f.revenue).sum();
    let units: i64 = sales.iter().map(|f| f.units_sold).sum();
    let avg_ticket = if units > 0 {
        round2(revenue / units as f64)
    } else {
        0.0
    };
    SalesTotals {
        revenue,
        units,
        avg_ticket,
    }
}

/// One row of a revenue ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position in the ranking.
    pub rank: usize,
    /// Product or store key this row aggregates.
    pub key: String,
    /// Revenue for the key over the period.
    pub revenue: f64,
    /// Units sold for the key over the period.
    pub units: i64,
    /// Revenue per unit, rounded to 2 decimals; 0 when nothing sold.
    pub avg_ticket: f64,
    /// Share of total revenue, in percent rounded to 1 decimal.
    pub share_pct: f64,
}

/// Ranks products by revenue, highest first.
///
/// Ties break by units descending, then key ascending. `top` truncates the
/// ranking after assigning positions.
pub fn rank_products(sales: &[SalesFact], top: Option<usize>) -> Vec<RankedEntry> {
    rank_by(sales, top, |f| f.product_key.as_str())
}

/// Ranks stores by revenue, highest first. Same ordering rules as
/// [`rank_products`].
pub fn rank_stores(sales: &[SalesFact], top: Option<usize>) -> Vec<RankedEntry> {
    rank_by(sales, top, |f| f.store_key.as_str())
}

fn rank_by<'a>(
    sales: &'a [SalesFact],
    top: Option<usize>,
    key: impl Fn(&'a SalesFact) -> &'a str,
) -> Vec<RankedEntry> {
    let mut grouped: BTreeMap<&str, (f64, i64)> = BTreeMap::new();
    for fact in sales {
        let entry = grouped.entry(key(fact)).or_default();
        entry.0 += fact.revenue;
        entry.1 += fact.units_sold;
    }

    let total_revenue: f64 = grouped.values().map(|(revenue, _)| revenue).sum();

    let mut entries: Vec<RankedEntry> = grouped
        .into_iter()
        .map(|(key, (revenue, units))| RankedEntry {
            rank: 0,
            key: key.to_string(),
            revenue,
            units,
            avg_ticket: if units > 0 {
                round2(revenue / units as f64)
            } else {
                0.0
            },
            share_pct: if total_revenue > 0.0 {
                round1(revenue / total_revenue * 100.0)
            } else {
                0.0
            },
        })
        .collect();

    // BTreeMap iteration already gave key-ascending order, so the sort only
    // needs revenue and units to be stable on ties.
    entries.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| b.units.cmp(&a.units))
    });
    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.rank = idx + 1;
    }

    if let Some(top) = top {
        entries.truncate(top);
    }
    entries
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fact(product: &str, store: &str, units: i64, revenue: f64) -> SalesFact {
        SalesFact {
            date: "2026-02-01".parse().unwrap(),
            product_key: product.to_string(),
            store_key: store.to_string(),
            units_sold: units,
            revenue,
        }
    }

    #[test]
    fn totals_sum_revenue_units_and_ticket() {
        let sales = vec![
            fact("A", "Store 101", 10, 500.0),
            fact("B", "Store 201", 30, 1_500.0),
        ];
        let totals = sales_totals(&sales);

        assert_relative_eq!(totals.revenue, 2_000.0);
        assert_eq!(totals.units, 40);
        assert_relative_eq!(totals.avg_ticket, 50.0);
    }

    #[test]
    fn totals_of_no_sales_are_zero() {
        let totals = sales_totals(&[]);
        assert_eq!(totals.units, 0);
        assert_relative_eq!(totals.avg_ticket, 0.0);
    }

    #[test]
    fn products_rank_by_revenue_descending() {
        let sales = vec![
            fact("A", "Store 101", 5, 250.0),
            fact("B", "Store 101", 10, 900.0),
            fact("A", "Store 201", 5, 350.0),
            fact("C", "Store 101", 1, 850.0),
        ];
        let ranking = rank_products(&sales, None);

        let keys: Vec<&str> = ranking.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["B", "C", "A"]);
        assert_eq!(ranking[0].rank, 1);
        assert_eq!(ranking[2].rank, 3);

        // A aggregated across stores: 10 units, 600 revenue
        assert_eq!(ranking[2].units, 10);
        assert_relative_eq!(ranking[2].revenue, 600.0);
        assert_relative_eq!(ranking[2].avg_ticket, 60.0);
        // 600 / 2350 = 25.53% -> 25.5
        assert_relative_eq!(ranking[2].share_pct, 25.5);
    }

    #[test]
    fn revenue_ties_break_by_units_then_key() {
        let sales = vec![
            fact("B", "Store 101", 4, 100.0),
            fact("A", "Store 101", 4, 100.0),
            fact("C", "Store 101", 9, 100.0),
        ];
        let ranking = rank_products(&sales, None);

        let keys: Vec<&str> = ranking.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["C", "A", "B"]);
    }

    #[test]
    fn top_n_truncates_after_ranking() {
        let sales = vec![
            fact("A", "Store 101", 1, 100.0),
            fact("B", "Store 101", 1, 300.0),
            fact("C", "Store 101", 1, 200.0),
        ];
        let ranking = rank_products(&sales, Some(2));

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].key, "B");
        assert_eq!(ranking[1].key, "C");
    }

    #[test]
    fn stores_rank_independently_of_products() {
        let sales = vec![
            fact("A", "Store 101", 2, 100.0),
            fact("B", "Store 101", 2, 100.0),
            fact("A", "Store 201", 2, 500.0),
        ];
        let ranking = rank_stores(&sales, None);

        assert_eq!(ranking[0].key, "Store 201");
        assert_eq!(ranking[1].key, "Store 101");
        assert_relative_eq!(ranking[1].revenue, 200.0);
        assert_eq!(ranking[1].units, 4);
    }

    #[test]
    fn shares_sum_to_roughly_one_hundred() {
        let sales = vec![
            fact("A", "Store 101", 1, 333.0),
            fact("B", "Store 101", 1, 333.0),
            fact("C", "Store 101", 1, 334.0),
        ];
        let ranking = rank_products(&sales, None);
        let total: f64 = ranking.iter().map(|e| e.share_pct).sum();
        assert!((total - 100.0).abs() < 0.2);
    }
}
