use crate::analysis::{
    AnalyticsPipeline, BucketStrategy, OutputFormat, RatingAccumulator, ReportFormatter,
    RevenueBasis,
};
use crate::batch::{InputBatch, ValidatedBatch};
use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::types::{EntityId, RatedEntity, RawRatedEntity};
use clap::{Args, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;

// ===== Helper Functions =====

/// CLI format if given, otherwise the configured default
fn resolve_format(cli_format: Option<OutputFormat>, app_config: &AppConfig) -> OutputFormat {
    cli_format.unwrap_or_else(|| OutputFormat::parse_lenient(&app_config.report.default_format))
}

/// Write output to file with safe directory creation
fn write_output_to_file(path: &Path, content: &str, description: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    println!("{} written to: {}", description, path.display());
    Ok(())
}

/// Print console output; write machine-readable output to a file
fn emit_output(
    formatted_output: &str,
    format: OutputFormat,
    output_path: &Option<PathBuf>,
    default_filename: &str,
    description: &str,
    app_config: &AppConfig,
) -> AppResult<()> {
    if let Some(path) = output_path {
        write_output_to_file(path, formatted_output, description)?;
    } else if format.is_machine_readable() {
        let default_path = app_config.report.output_dir.join(default_filename);
        write_output_to_file(&default_path, formatted_output, description)?;
    } else {
        print!("{}", formatted_output);
    }
    Ok(())
}

/// Build the pipeline from config, applying CLI overrides
fn build_pipeline(
    app_config: &AppConfig,
    utc_offset_minutes: Option<i32>,
    revenue_basis: Option<RevenueBasis>,
) -> AppResult<AnalyticsPipeline> {
    let mut analytics = app_config.analytics.clone();
    if let Some(offset) = utc_offset_minutes {
        analytics.utc_offset_minutes = offset;
    }
    if let Some(basis) = revenue_basis {
        analytics.revenue_basis = basis;
    }
    AnalyticsPipeline::from_config(&analytics)
}

fn load_validated_batch(input: &Path) -> AppResult<ValidatedBatch> {
    let batch = InputBatch::from_path(input)?;
    batch.validate()
}

// ===== Command Definitions =====

/// Analytics commands over an exported batch file
#[derive(Args)]
pub struct AnalyseCommand {
    #[command(subcommand)]
    pub analysis_type: AnalysisCommands,
}

impl AnalyseCommand {
    pub fn run(&self) -> AppResult<()> {
        run_analysis(&self.analysis_type)
    }
}

/// Ranking metric for `top-products`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RankingMetric {
    Revenue,
    Units,
}

/// Analysis command types
#[derive(Subcommand)]
pub enum AnalysisCommands {
    /// Build the full sales dashboard (three series and product highlights)
    Dashboard {
        /// JSON batch file with `orders` and `products`
        #[arg(long)]
        input: PathBuf,

        /// Output format (defaults to report.default_format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (JSON/Plotly default to the report output directory)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Reporting time zone as minutes east of UTC (overrides config)
        #[arg(long, allow_hyphen_values = true)]
        utc_offset_minutes: Option<i32>,
    },

    /// Build a single dense sales series
    Series {
        #[arg(long)]
        input: PathBuf,

        #[arg(long, value_enum)]
        strategy: BucketStrategy,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        #[arg(long)]
        output: Option<PathBuf>,

        #[arg(long, allow_hyphen_values = true)]
        utc_offset_minutes: Option<i32>,
    },

    /// Rank products by revenue or units sold over delivered orders
    TopProducts {
        #[arg(long)]
        input: PathBuf,

        #[arg(long, value_enum, default_value = "revenue")]
        metric: RankingMetric,

        /// Number of products to list
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Revenue measure (overrides analytics.revenue_basis)
        #[arg(long, value_enum)]
        revenue_basis: Option<RevenueBasis>,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Apply one new star rating to a product's running statistics
    ApplyRating {
        /// Current average rating (0 when unrated)
        #[arg(long, default_value_t = 0.0)]
        average: f64,

        /// Current number of ratings
        #[arg(long, default_value_t = 0)]
        count: i64,

        /// New star rating, 1 to 5
        #[arg(long)]
        rating: f64,

        #[arg(long, default_value = "product")]
        entity_id: String,

        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

pub fn run_analysis(analysis_type: &AnalysisCommands) -> AppResult<()> {
    let app_config = AppConfig::get_defaults()?;

    match analysis_type {
        AnalysisCommands::Dashboard {
            input,
            format,
            output,
            utc_offset_minutes,
        } => {
            let pipeline = build_pipeline(&app_config, *utc_offset_minutes, None)?;
            let batch = InputBatch::from_path(input)?;
            let report = pipeline.aggregate(&batch)?;
            let format = resolve_format(*format, &app_config);
            let formatted = ReportFormatter::format_dashboard(&report, &format)?;
            emit_output(
                &formatted,
                format,
                output,
                "dashboard.json",
                "Dashboard",
                &app_config,
            )
        }

        AnalysisCommands::Series {
            input,
            strategy,
            format,
            output,
            utc_offset_minutes,
        } => {
            let pipeline = build_pipeline(&app_config, *utc_offset_minutes, None)?;
            let batch = load_validated_batch(input)?;
            let series = pipeline.series(&batch.orders, *strategy)?;
            let format = resolve_format(*format, &app_config);
            let formatted = ReportFormatter::format_series(*strategy, &series, &format)?;
            emit_output(
                &formatted,
                format,
                output,
                &format!("{}_series.json", strategy),
                "Sales series",
                &app_config,
            )
        }

        AnalysisCommands::TopProducts {
            input,
            metric,
            limit,
            revenue_basis,
            format,
            output,
        } => {
            let pipeline = build_pipeline(&app_config, None, *revenue_basis)?;
            let batch = load_validated_batch(input)?;
            let format = resolve_format(*format, &app_config);
            let formatted = match metric {
                RankingMetric::Revenue => ReportFormatter::format_revenue_ranking(
                    &pipeline.top_products_by_revenue(&batch.orders, *limit)?,
                    &format,
                )?,
                RankingMetric::Units => ReportFormatter::format_units_ranking(
                    &pipeline.top_products_by_units(&batch.orders, *limit)?,
                    &format,
                )?,
            };
            emit_output(
                &formatted,
                format,
                output,
                "top_products.json",
                "Product ranking",
                &app_config,
            )
        }

        AnalysisCommands::ApplyRating {
            average,
            count,
            rating,
            entity_id,
            name,
            format,
        } => {
            let current = RatedEntity::try_from(&RawRatedEntity {
                entity_id: parse_entity_id(entity_id),
                name: name.clone(),
                average_rating: Some(*average),
                rating_count: *count,
            })?;
            let updated = RatingAccumulator::apply_new_rating(&current, *rating)?;
            info!(
                "Rating applied to {}: {:.4} -> {:.4}",
                updated.entity_id, current.average_rating, updated.average_rating
            );
            // Always stdout: a single small record
            let format = match resolve_format(*format, &app_config) {
                OutputFormat::Plotly => OutputFormat::Json,
                other => other,
            };
            print!("{}", ReportFormatter::format_rated_entity(&updated, &format)?);
            Ok(())
        }
    }
}

/// Numeric ids on the command line are treated as numeric entity ids
fn parse_entity_id(raw: &str) -> EntityId {
    raw.parse::<u64>()
        .map(EntityId::Numeric)
        .unwrap_or_else(|_| EntityId::Text(raw.to_string()))
}
