//! Plotly chart types for dashboard series and product rankings
//!
//! Charts are emitted in the Plotly.js-native `{data: [...], layout: {...}}`
//! shape so a front end can render them without further mapping.

use super::dashboard::{BucketSeriesEntry, TopEntityResult};
use serde::Serialize;

/// Sales bars
pub const SALES_COLOUR: &str = "#2E86C1";
/// Items-sold line
pub const ITEMS_COLOUR: &str = "#E67E22";

#[derive(Debug, Clone, Serialize)]
pub struct PlotlyChart {
    pub data: Vec<PlotlyTrace>,
    pub layout: PlotlyLayout,
}

/// A single data series in a chart
#[derive(Debug, Clone, Serialize)]
pub struct PlotlyTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub name: String,
    #[serde(rename = "type")]
    pub trace_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<PlotlyColour>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<PlotlyColour>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotlyColour {
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotlyLayout {
    pub title: PlotlyTitle,
    pub xaxis: PlotlyAxis,
    pub yaxis: PlotlyAxis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<PlotlySecondaryAxis>,
    pub hovermode: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotlyTitle {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotlyAxis {
    pub title: String,
    /// "category" keeps the canonical bucket order instead of sorting labels
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotlySecondaryAxis {
    pub title: String,
    pub overlaying: String,
    pub side: String,
}

impl PlotlyLayout {
    /// Layout with sales on the left axis and item counts on the right
    pub fn dual_axis(title: &str, x_title: &str, y1_title: &str, y2_title: &str) -> Self {
        Self {
            title: PlotlyTitle {
                text: title.to_string(),
            },
            xaxis: PlotlyAxis {
                title: x_title.to_string(),
                axis_type: Some("category".to_string()),
            },
            yaxis: PlotlyAxis {
                title: y1_title.to_string(),
                axis_type: None,
            },
            yaxis2: Some(PlotlySecondaryAxis {
                title: y2_title.to_string(),
                overlaying: "y".to_string(),
                side: "right".to_string(),
            }),
            hovermode: "x unified".to_string(),
        }
    }
}

impl PlotlyLayout {
    /// Layout with one value axis, categories kept in the given order
    pub fn single_axis(title: &str, x_title: &str, y_title: &str) -> Self {
        Self {
            title: PlotlyTitle {
                text: title.to_string(),
            },
            xaxis: PlotlyAxis {
                title: x_title.to_string(),
                axis_type: Some("category".to_string()),
            },
            yaxis: PlotlyAxis {
                title: y_title.to_string(),
                axis_type: None,
            },
            yaxis2: None,
            hovermode: "closest".to_string(),
        }
    }
}

impl PlotlyTrace {
    pub fn bar(x: Vec<String>, y: Vec<f64>, name: &str, color: &str) -> Self {
        Self {
            x,
            y,
            name: name.to_string(),
            trace_type: "bar".to_string(),
            mode: None,
            yaxis: None,
            marker: Some(PlotlyColour {
                color: color.to_string(),
            }),
            line: None,
        }
    }

    pub fn line(x: Vec<String>, y: Vec<f64>, name: &str, color: &str) -> Self {
        Self {
            x,
            y,
            name: name.to_string(),
            trace_type: "scatter".to_string(),
            mode: Some("lines+markers".to_string()),
            yaxis: None,
            marker: None,
            line: Some(PlotlyColour {
                color: color.to_string(),
            }),
        }
    }

    pub fn on_secondary_axis(mut self) -> Self {
        self.yaxis = Some("y2".to_string());
        self
    }
}

impl PlotlyChart {
    /// Sales bars plus an items-sold line for one dense series
    pub fn from_series(title: &str, x_title: &str, series: &[BucketSeriesEntry]) -> Self {
        let x: Vec<String> = series.iter().map(|e| e.bucket.clone()).collect();

        let sales = PlotlyTrace::bar(
            x.clone(),
            series.iter().map(|e| e.sales.to_f64_lossy()).collect(),
            "Sales",
            SALES_COLOUR,
        );
        let items = PlotlyTrace::line(
            x,
            series.iter().map(|e| e.items_sold as f64).collect(),
            "Items sold",
            ITEMS_COLOUR,
        )
        .on_secondary_axis();

        PlotlyChart {
            data: vec![sales, items],
            layout: PlotlyLayout::dual_axis(title, x_title, "Sales", "Items sold"),
        }
    }

    /// One bar per ranked product, best first
    ///
    /// Bars are labelled `name (#id)` so two products sharing a name
    /// still get distinct categories.
    pub fn from_ranking<M, F>(
        title: &str,
        metric_title: &str,
        ranking: &[TopEntityResult<M>],
        value: F,
    ) -> Self
    where
        F: Fn(&M) -> f64,
    {
        let x = ranking
            .iter()
            .map(|r| format!("{} (#{})", r.name, r.entity_id))
            .collect();
        let y = ranking.iter().map(|r| value(&r.metric_value)).collect();

        PlotlyChart {
            data: vec![PlotlyTrace::bar(x, y, metric_title, SALES_COLOUR)],
            layout: PlotlyLayout::single_axis(title, "Product", metric_title),
        }
    }
}
