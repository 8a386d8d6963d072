//! Shared helpers for report formatters

use crate::errors::{AppError, AppResult};
use crate::utils::currency::group_thousands;
use serde::Serialize;

/// Format a count with thousand separators for console output
///
/// # Examples
///
/// ```
/// # use storefront_analytics::analysis::reports::utils::format_count;
/// assert_eq!(format_count(1234), "1,234");
/// assert_eq!(format_count(904233), "904,233");
/// ```
pub fn format_count(n: u64) -> String {
    group_thousands(&n.to_string())
}

/// Export data as pretty JSON for programmatic use
pub fn export_json<T: Serialize>(data: &T) -> AppResult<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| AppError::InvalidData(format!("JSON export failed: {}", e)))
}

/// Section heading used by every console report
pub fn section_header(title: &str) -> String {
    format!("\n{}\n{}\n", title, "━".repeat(title.chars().count().max(24)))
}
