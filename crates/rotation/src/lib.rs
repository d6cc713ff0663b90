#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/retanalytics/rotation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analyzer;
pub mod error;
pub mod ranking;
pub mod summary;
pub mod trend;
pub mod types;
pub mod velocity;

// Re-export core types
pub use analyzer::{COVER_SENTINEL_DAYS, RotationAnalyzer, RotationConfig};
pub use error::{Result, RotationError};
pub use ranking::{RankedEntry, SalesTotals, rank_products, rank_stores, sales_totals};
pub use summary::{InventorySummary, ReorderPlan, reorder_plan, summarize};
pub use trend::{DailyPoint, Trend, TrendDirection, daily_series, trend};
pub use types::{InventorySnapshot, RotationRecord, SalesFact, StockLevel};
pub use velocity::{VelocityBand, VelocityBreakdown, VelocityThresholds, band_counts};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
