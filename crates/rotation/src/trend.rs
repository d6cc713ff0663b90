//! Daily sales series and half-over-half trend.
//!
//! The trend compares revenue in the second half of the period against the
//! first half. A short window (one point or less) reads as flat.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::types::SalesFact;

/// One day of aggregated sales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// Calendar date.
    pub date: NaiveDate,
    /// Revenue across all products and stores on this date.
    pub revenue: f64,
    /// Units sold across all products and stores on this date.
    pub units: i64,
}

/// Which way revenue is heading over the period.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendDirection {
    /// Second half more than 5% above the first
    Rising,
    /// Within the ±5% band
    Flat,
    /// Second half more than 5% below the first
    Falling,
}

/// Half-over-half revenue trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Direction under the ±5% band.
    pub direction: TrendDirection,
    /// Percentage change of second-half revenue over first-half revenue;
    /// 0 when the first half had no revenue.
    pub change_pct: f64,
}

/// Aggregates sales facts into a per-date series, date ascending.
///
/// Dates with no facts simply do not appear; the trend split works on
/// observed points, as the source dashboard did.
pub fn daily_series(sales: &[SalesFact]) -> Vec<DailyPoint> {
    let mut by_date: BTreeMap<NaiveDate, (f64, i64)> = BTreeMap::new();
    for fact in sales {
        let entry = by_date.entry(fact.date).or_default();
        entry.0 += fact.revenue;
        entry.1 += fact.units_sold;
    }
    by_date
        .into_iter()
        .map(|(date, (revenue, units))| DailyPoint {
            date,
            revenue,
            units,
        })
        .collect()
}

/// Trend of a daily series: split at the midpoint, compare half revenues.
pub fn trend(series: &[DailyPoint]) -> Trend {
    if series.len() < 2 {
        return Trend {
            direction: TrendDirection::Flat,
            change_pct: 0.0,
        };
    }

    let mid = series.len() / 2;
    let first: f64 = series[..mid].iter().map(|p| p.revenue).sum();
    let second: f64 = series[mid..].iter().map(|p| p.revenue).sum();

    let change_pct = if first > 0.0 {
        (second - first) / first * 100.0
    } else {
        0.0
    };

    let direction = if change_pct > 5.0 {
        TrendDirection::Rising
    } else if change_pct < -5.0 {
        TrendDirection::Falling
    } else {
        TrendDirection::Flat
    };

    Trend {
        direction,
        change_pct,
    }
}
