//! Dashboard response types
//!
//! Field names are part of the contract with existing dashboard consumers
//! and are serialised verbatim (camelCase).

use super::common::EntityId;
use super::money::MonetaryAmount;
use super::ratings::RatedEntity;
use serde::Serialize;

/// One bucket of a dense sales series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketSeriesEntry {
    pub bucket: String,
    pub sales: MonetaryAmount,
    pub items_sold: u64,
}

impl BucketSeriesEntry {
    pub fn empty(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            sales: MonetaryAmount::ZERO,
            items_sold: 0,
        }
    }
}

/// A ranked entity with the metric it was ranked by
///
/// `M` is `MonetaryAmount` for revenue rankings and `u64` for unit counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEntityResult<M> {
    pub entity_id: EntityId,
    pub name: String,
    pub metric_value: M,
}

/// Rating summary of the best or worst rated product
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedProductSummary {
    pub entity_id: EntityId,
    pub name: String,
    pub average_rating: f64,
    pub rating_count: u64,
}

impl From<&RatedEntity> for RatedProductSummary {
    fn from(entity: &RatedEntity) -> Self {
        Self {
            entity_id: entity.entity_id.clone(),
            name: entity.name.clone(),
            average_rating: entity.average_rating,
            rating_count: entity.rating_count,
        }
    }
}

/// Complete dashboard payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    /// 7 entries, Sunday first
    pub week_series: Vec<BucketSeriesEntry>,
    /// 6 entries, 1-5 through 26-30
    pub month_series: Vec<BucketSeriesEntry>,
    /// 12 entries, January first
    pub year_series: Vec<BucketSeriesEntry>,
    pub top_revenue_product: Option<TopEntityResult<MonetaryAmount>>,
    pub top_units_sold_product: Option<TopEntityResult<u64>>,
    pub best_rated_product: Option<RatedProductSummary>,
    pub worst_rated_product: Option<RatedProductSummary>,
}
