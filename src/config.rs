use crate::analysis::group_extremum::RevenueBasis;
use chrono::FixedOffset;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Largest UTC offset in use anywhere (UTC+14:00)
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub analytics: AnalyticsConfig,
    pub report: ReportConfig,
}

/// Settings that change what the aggregation computes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Offset of the reporting time zone in minutes east of UTC.
    /// Day-of-week, day-of-month and month boundaries are taken in this zone.
    pub utc_offset_minutes: i32,
    pub revenue_basis: RevenueBasis,
    /// Compute the independent rollups on scoped worker threads
    pub parallel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub default_format: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            revenue_basis: RevenueBasis::LineTotal,
            parallel: false,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./output_data"),
            default_format: "console".to_string(),
        }
    }
}

impl AnalyticsConfig {
    /// Resolve the configured reporting time zone
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::Message(format!(
                "analytics.utc_offset_minutes must be within ±{} (got {})",
                MAX_UTC_OFFSET_MINUTES, self.utc_offset_minutes
            )));
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            ConfigError::Message(format!(
                "Invalid UTC offset: {} minutes",
                self.utc_offset_minutes
            ))
        })
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let analytics = AnalyticsConfig::default();
        let report = ReportConfig::default();
        let config = Config::builder()
            .set_default("analytics.utc_offset_minutes", analytics.utc_offset_minutes as i64)?
            .set_default("analytics.revenue_basis", analytics.revenue_basis.as_str())?
            .set_default("analytics.parallel", analytics.parallel)?
            .set_default(
                "report.output_dir",
                report.output_dir.to_string_lossy().to_string(),
            )?
            .set_default("report.default_format", report.default_format)?
            .add_source(File::with_name("config").required(false))
            // STOREFRONT_ANALYTICS__PARALLEL=true, STOREFRONT_REPORT__OUTPUT_DIR=...
            .add_source(
                config::Environment::with_prefix("STOREFRONT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if let Ok(offset) = env::var("ANALYTICS_UTC_OFFSET_MINUTES") {
            app_config.analytics.utc_offset_minutes = offset.trim().parse().map_err(|_| {
                ConfigError::Message(format!(
                    "ANALYTICS_UTC_OFFSET_MINUTES is not an integer: '{}'",
                    offset
                ))
            })?;
        }

        if let Ok(dir) = env::var("ANALYTICS_OUTPUT_DIR") {
            app_config.report.output_dir = PathBuf::from(dir);
        }

        app_config.analytics.utc_offset()?;

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Result<Self, ConfigError> {
        match Self::load() {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("Falling back to built-in configuration: {}", e);
                Ok(Self {
                    analytics: AnalyticsConfig::default(),
                    report: ReportConfig::default(),
                })
            }
        }
    }
}
