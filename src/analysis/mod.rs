//! Analytics rollup engine
//!
//! Turns a batch of orders and rated products into the dashboard payload.
//! Every component is a pure, synchronous fold over in-memory records; no
//! state is kept between calls.
//!
//! ## Overview
//!
//! - **Time bucketing** - Day-of-week, range-of-month and month strategies
//! - **Sales rollup** - Dense, zero-filled series per strategy
//! - **Group extremum** - Revenue / units rankings, best and worst rated
//! - **Rating accumulator** - O(1) incremental mean updates
//! - **Pipeline** - Orchestrates all of the above into a `DashboardReport`
//! - **Report generation** - Console, JSON and Plotly output
//!
//! ## Usage
//!
//! ```rust
//! use storefront_analytics::analysis::AnalyticsPipeline;
//! use storefront_analytics::batch::InputBatch;
//! use storefront_analytics::errors::AppResult;
//!
//! fn example() -> AppResult<()> {
//!     let batch = InputBatch::from_json_str(r#"{"orders": [], "products": []}"#)?;
//!     let report = AnalyticsPipeline::default().aggregate(&batch)?;
//!     assert_eq!(report.week_series.len(), 7);
//!     assert!(report.top_revenue_product.is_none());
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod group_extremum;
pub mod pipeline;
pub mod rating_accumulator;
pub mod reports;
pub mod sales_rollup;
pub mod time_bucketer;

pub use group_extremum::{GroupExtremumFinder, RevenueBasis};
pub use pipeline::{delivered_lines, AnalyticsPipeline};
pub use rating_accumulator::RatingAccumulator;
pub use reports::{OutputFormat, ReportFormatter};
pub use sales_rollup::{SalesRollup, SeriesTotals};
pub use time_bucketer::{BucketKey, BucketStrategy, TimeBucketer};
