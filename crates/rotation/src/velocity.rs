//! Velocity banding over days-of-cover.
//!
//! Buckets rotation records by how fast their stock is moving. Thresholds
//! are configuration, not separate algorithms: reporting surfaces that want
//! different cut-offs pass their own [`VelocityThresholds`].

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::types::RotationRecord;

/// Days-of-cover cut-offs separating the velocity bands.
///
/// A line is `Fast` below `fast`, `Normal` below `normal`, `Slow` below
/// `slow`, and `Stalled` at or above `slow` (which includes the no-sales
/// sentinel).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityThresholds {
    /// Upper bound (exclusive) for fast-moving stock, in days.
    pub fast: f64,
    /// Upper bound (exclusive) for normal rotation, in days.
    pub normal: f64,
    /// Upper bound (exclusive) for slow rotation, in days.
    pub slow: f64,
}

impl Default for VelocityThresholds {
    fn default() -> Self {
        Self {
            fast: 15.0,
            normal: 30.0,
            slow: 60.0,
        }
    }
}

/// How fast a line's stock is turning over.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VelocityBand {
    /// Sells through well before the fast cut-off
    Fast,
    /// Healthy rotation
    Normal,
    /// Moving, but slowly
    Slow,
    /// Effectively not selling
    Stalled,
}

impl VelocityBand {
    /// Band for a days-of-cover figure under the given thresholds.
    pub fn classify(days_of_cover: f64, thresholds: &VelocityThresholds) -> Self {
        if days_of_cover < thresholds.fast {
            Self::Fast
        } else if days_of_cover < thresholds.normal {
            Self::Normal
        } else if days_of_cover < thresholds.slow {
            Self::Slow
        } else {
            Self::Stalled
        }
    }
}

/// Record counts per velocity band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VelocityBreakdown {
    /// Lines in the fast band.
    pub fast: usize,
    /// Lines in the normal band.
    pub normal: usize,
    /// Lines in the slow band.
    pub slow: usize,
    /// Lines in the stalled band.
    pub stalled: usize,
}

/// Counts records per velocity band.
pub fn band_counts(records: &[RotationRecord], thresholds: &VelocityThresholds) -> VelocityBreakdown {
    let mut breakdown = VelocityBreakdown::default();
    for record in records {
        match VelocityBand::classify(record.days_of_cover, thresholds) {
            VelocityBand::Fast => breakdown.fast += 1,
            VelocityBand::Normal => breakdown.normal += 1,
            VelocityBand::Slow => breakdown.slow += 1,
            VelocityBand::Stalled => breakdown.stalled += 1,
        }
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StockLevel;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, VelocityBand::Fast)]
    #[case(14.9, VelocityBand::Fast)]
    #[case(15.0, VelocityBand::Normal)]
    #[case(29.9, VelocityBand::Normal)]
    #[case(30.0, VelocityBand::Slow)]
    #[case(59.9, VelocityBand::Slow)]
    #[case(60.0, VelocityBand::Stalled)]
    #[case(999.0, VelocityBand::Stalled)]
    fn default_band_edges(#[case] cover: f64, #[case] expected: VelocityBand) {
        assert_eq!(
            VelocityBand::classify(cover, &VelocityThresholds::default()),
            expected
        );
    }

    #[test]
    fn custom_thresholds_shift_the_bands() {
        let tight = VelocityThresholds {
            fast: 5.0,
            normal: 10.0,
            slow: 20.0,
        };
        assert_eq!(VelocityBand::classify(7.0, &tight), VelocityBand::Normal);
        assert_eq!(VelocityBand::classify(25.0, &tight), VelocityBand::Stalled);
    }

    fn record_with_cover(days_of_cover: f64) -> RotationRecord {
        RotationRecord {
            product_key: "TOTE".to_string(),
            store_key: "Store 101".to_string(),
            stock_on_hand: 10,
            stock_min: 5,
            stock_max: 40,
            unit_cost: 60.0,
            units_sold_period: 10,
            avg_daily_sales: 1.0,
            days_of_cover,
            turnover_index: 1.0,
            stock_level: StockLevel::Normal,
            reorder_qty: 0,
            reorder_cost: 0.0,
        }
    }

    #[test]
    fn breakdown_counts_every_record_once() {
        let records = vec![
            record_with_cover(3.0),
            record_with_cover(20.0),
            record_with_cover(45.0),
            record_with_cover(999.0),
            record_with_cover(2.0),
        ];
        let breakdown = band_counts(&records, &VelocityThresholds::default());

        assert_eq!(breakdown.fast, 2);
        assert_eq!(breakdown.normal, 1);
        assert_eq!(breakdown.slow, 1);
        assert_eq!(breakdown.stalled, 1);
        assert_eq!(
            breakdown.fast + breakdown.normal + breakdown.slow + breakdown.stalled,
            records.len()
        );
    }
}
