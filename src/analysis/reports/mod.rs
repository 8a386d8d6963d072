//! Report formatting and output generation
//!
//! Formats dashboard results via the [`ReportFormatter`] facade.
//! Supports Console, JSON, and Plotly output formats.

pub mod dashboard;
pub mod utils;

use crate::analysis::time_bucketer::BucketStrategy;
use crate::errors::AppResult;
use crate::types::{BucketSeriesEntry, DashboardReport, MonetaryAmount, RatedEntity, TopEntityResult};
use clap::ValueEnum;

/// Output format options for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Plotly,
}

impl OutputFormat {
    /// Lenient parse used for config values; unknown names fall back to console
    pub fn parse_lenient(format: &str) -> Self {
        match format.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "plotly" => OutputFormat::Plotly,
            _ => OutputFormat::Console,
        }
    }

    /// Machine-readable formats are written to files rather than stdout
    pub fn is_machine_readable(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Plotly)
    }
}

/// Facade for all report formatting operations
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format_dashboard(report: &DashboardReport, f: &OutputFormat) -> AppResult<String> {
        dashboard::format_dashboard(report, f)
    }

    pub fn format_series(
        strategy: BucketStrategy,
        series: &[BucketSeriesEntry],
        f: &OutputFormat,
    ) -> AppResult<String> {
        dashboard::format_series(strategy, series, f)
    }

    pub fn format_revenue_ranking(
        ranking: &[TopEntityResult<MonetaryAmount>],
        f: &OutputFormat,
    ) -> AppResult<String> {
        dashboard::format_revenue_ranking(ranking, f)
    }

    pub fn format_units_ranking(
        ranking: &[TopEntityResult<u64>],
        f: &OutputFormat,
    ) -> AppResult<String> {
        dashboard::format_units_ranking(ranking, f)
    }

    pub fn format_rated_entity(entity: &RatedEntity, f: &OutputFormat) -> AppResult<String> {
        dashboard::format_rated_entity(entity, f)
    }
}
