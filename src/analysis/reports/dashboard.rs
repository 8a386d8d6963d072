//! Dashboard report formatters
//!
//! Console output renders the three series as tables followed by the
//! product highlights. JSON output is the dashboard contract verbatim.
//! Plotly output turns each series into a sales/items chart and each
//! ranking into a bar chart.

use super::utils::{export_json, format_count, section_header};
use super::OutputFormat;
use crate::analysis::sales_rollup::SeriesTotals;
use crate::analysis::time_bucketer::BucketStrategy;
use crate::errors::AppResult;
use crate::types::visualisation::PlotlyChart;
use crate::types::{
    BucketSeriesEntry, DashboardReport, MonetaryAmount, RatedEntity, RatedProductSummary,
    TopEntityResult,
};
use crate::utils::currency::format_amount;
use serde::Serialize;

/// Plotly charts for the three dashboard series
#[derive(Debug, Clone, Serialize)]
pub struct DashboardCharts {
    pub week: PlotlyChart,
    pub month: PlotlyChart,
    pub year: PlotlyChart,
}

impl DashboardCharts {
    pub fn from_report(report: &DashboardReport) -> Self {
        Self {
            week: series_chart(BucketStrategy::Weekly, &report.week_series),
            month: series_chart(BucketStrategy::Monthly, &report.month_series),
            year: series_chart(BucketStrategy::Yearly, &report.year_series),
        }
    }
}

fn series_chart(strategy: BucketStrategy, series: &[BucketSeriesEntry]) -> PlotlyChart {
    PlotlyChart::from_series(&series_title(strategy), strategy.display_name(), series)
}

fn series_title(strategy: BucketStrategy) -> String {
    match strategy {
        BucketStrategy::Weekly => "Sales by day of week".to_string(),
        BucketStrategy::Monthly => "Sales by day of month".to_string(),
        BucketStrategy::Yearly => "Sales by month".to_string(),
    }
}

/// Format the full dashboard
pub fn format_dashboard(report: &DashboardReport, format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(report),
        OutputFormat::Plotly => export_json(&DashboardCharts::from_report(report)),
        OutputFormat::Console => {
            let mut output = String::new();
            output.push_str(&section_header("📊 Sales Dashboard"));

            output.push_str(&series_table(BucketStrategy::Weekly, &report.week_series)?);
            output.push_str(&series_table(BucketStrategy::Monthly, &report.month_series)?);
            output.push_str(&series_table(BucketStrategy::Yearly, &report.year_series)?);

            output.push_str(&section_header("Product Highlights"));
            output.push_str(&format!(
                "  {:<22} {}\n",
                "Top revenue:",
                report
                    .top_revenue_product
                    .as_ref()
                    .map(|p| format!("{} (#{}) - {}", p.name, p.entity_id, format_amount(&p.metric_value)))
                    .unwrap_or_else(|| "no sales yet".to_string())
            ));
            output.push_str(&format!(
                "  {:<22} {}\n",
                "Most units sold:",
                report
                    .top_units_sold_product
                    .as_ref()
                    .map(|p| format!(
                        "{} (#{}) - {} units",
                        p.name,
                        p.entity_id,
                        format_count(p.metric_value)
                    ))
                    .unwrap_or_else(|| "no sales yet".to_string())
            ));
            output.push_str(&format!(
                "  {:<22} {}\n",
                "Best rated:",
                rated_summary(report.best_rated_product.as_ref())
            ));
            output.push_str(&format!(
                "  {:<22} {}\n",
                "Worst rated:",
                rated_summary(report.worst_rated_product.as_ref())
            ));

            Ok(output)
        }
    }
}

/// Format a single dense series
pub fn format_series(
    strategy: BucketStrategy,
    series: &[BucketSeriesEntry],
    format: &OutputFormat,
) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(&series),
        OutputFormat::Plotly => export_json(&series_chart(strategy, series)),
        OutputFormat::Console => series_table(strategy, series),
    }
}

/// Format a revenue ranking
pub fn format_revenue_ranking(
    ranking: &[TopEntityResult<MonetaryAmount>],
    format: &OutputFormat,
) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(&ranking),
        OutputFormat::Plotly => export_json(&PlotlyChart::from_ranking(
            "Top products by revenue",
            "Revenue",
            ranking,
            MonetaryAmount::to_f64_lossy,
        )),
        OutputFormat::Console => Ok(ranking_table(
            "Top Products by Revenue",
            "Revenue",
            ranking.iter().map(|r| (r, format_amount(&r.metric_value))),
        )),
    }
}

/// Format a units-sold ranking
pub fn format_units_ranking(
    ranking: &[TopEntityResult<u64>],
    format: &OutputFormat,
) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(&ranking),
        OutputFormat::Plotly => export_json(&PlotlyChart::from_ranking(
            "Top products by units sold",
            "Units",
            ranking,
            |units| *units as f64,
        )),
        OutputFormat::Console => Ok(ranking_table(
            "Top Products by Units Sold",
            "Units",
            ranking.iter().map(|r| (r, format_count(r.metric_value))),
        )),
    }
}

/// Format a rated entity after a rating update
pub fn format_rated_entity(entity: &RatedEntity, format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json | OutputFormat::Plotly => export_json(entity),
        OutputFormat::Console => Ok(format!(
            "{}: {:.2} ★ from {} rating(s)\n",
            if entity.name.is_empty() {
                entity.entity_id.to_string()
            } else {
                entity.name.clone()
            },
            entity.average_rating,
            format_count(entity.rating_count)
        )),
    }
}

fn series_table(strategy: BucketStrategy, series: &[BucketSeriesEntry]) -> AppResult<String> {
    let mut output = String::new();
    output.push_str(&format!("\n{}:\n", series_title(strategy)));
    output.push_str(&format!("  {:<8} {:>16} {:>12}\n", "Bucket", "Sales", "Items sold"));
    output.push_str(&format!("  {:-<8} {:->16} {:->12}\n", "", "", ""));

    for entry in series {
        output.push_str(&format!(
            "  {:<8} {:>16} {:>12}\n",
            entry.bucket,
            format_amount(&entry.sales),
            format_count(entry.items_sold)
        ));
    }

    let totals = SeriesTotals::from_series(series)?;
    output.push_str(&format!(
        "  {:<8} {:>16} {:>12}\n",
        "Total",
        format_amount(&totals.total_sales),
        format_count(totals.total_items_sold)
    ));
    if let Some(busiest) = totals.busiest_bucket {
        output.push_str(&format!("  Busiest bucket: {}\n", busiest));
    }
    Ok(output)
}

fn ranking_table<'a, M: 'a, I>(title: &str, metric_title: &str, rows: I) -> String
where
    I: Iterator<Item = (&'a TopEntityResult<M>, String)>,
{
    let mut output = section_header(title);
    let mut empty = true;
    output.push_str(&format!(
        "  {:>4} {:<12} {:<28} {:>16}\n",
        "#", "Product", "Name", metric_title
    ));
    for (rank, (result, metric)) in rows.enumerate() {
        empty = false;
        output.push_str(&format!(
            "  {:>4} {:<12} {:<28} {:>16}\n",
            rank + 1,
            result.entity_id.to_string(),
            result.name,
            metric
        ));
    }
    if empty {
        output.push_str("  No delivered sales in this batch.\n");
    }
    output
}

fn rated_summary(product: Option<&RatedProductSummary>) -> String {
    product
        .map(|p| {
            format!(
                "{} (#{}) - {:.2} ★ from {} rating(s)",
                p.name, p.entity_id, p.average_rating, p.rating_count
            )
        })
        .unwrap_or_else(|| "no ratings yet".to_string())
}
