//! Grouped rankings and rating extremes
//!
//! Groups order lines by product, reduces each group to a scalar metric and
//! ranks the groups. Every ranking is deterministic: metric first, then the
//! ascending product id. Empty input yields an empty ranking / `None`,
//! never an error, so callers can render "no sales yet". A revenue total
//! that leaves the amount range fails the ranking with `InvalidAmount`.

use crate::errors::ValidationResult;
use crate::types::{EntityId, MonetaryAmount, OrderLine, RatedEntity, TopEntityResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// How a product's revenue is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RevenueBasis {
    /// Σ unit_price × quantity
    #[default]
    LineTotal,
    /// Σ unit_price, ignoring quantity. Reproduces the legacy top-products
    /// endpoint; not used unless configured explicitly.
    UnitPrice,
}

impl RevenueBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevenueBasis::LineTotal => "line_total",
            RevenueBasis::UnitPrice => "unit_price",
        }
    }

    fn line_revenue(&self, line: &OrderLine) -> ValidationResult<MonetaryAmount> {
        match self {
            RevenueBasis::LineTotal => line.line_total(),
            RevenueBasis::UnitPrice => Ok(line.unit_price),
        }
    }
}

/// A per-group metric that can be folded line by line
trait Metric: Ord + Default + Copy {
    fn accumulate(self, other: Self) -> ValidationResult<Self>;
}

impl Metric for MonetaryAmount {
    fn accumulate(self, other: Self) -> ValidationResult<Self> {
        self.checked_add(other)
    }
}

// Sums of u32 quantities; u64 cannot overflow for any in-memory batch
impl Metric for u64 {
    fn accumulate(self, other: Self) -> ValidationResult<Self> {
        Ok(self + other)
    }
}

struct Group<M> {
    name: String,
    metric: M,
}

/// Extremum and top-N queries over grouped aggregates
pub struct GroupExtremumFinder;

impl GroupExtremumFinder {
    /// Products ranked by revenue (unit price × quantity), highest first
    pub fn top_by_revenue<'a, I>(
        lines: I,
        n: usize,
    ) -> ValidationResult<Vec<TopEntityResult<MonetaryAmount>>>
    where
        I: IntoIterator<Item = &'a OrderLine>,
    {
        Self::top_by_revenue_with(lines, n, RevenueBasis::LineTotal)
    }

    /// Products ranked by revenue measured on `basis`
    pub fn top_by_revenue_with<'a, I>(
        lines: I,
        n: usize,
        basis: RevenueBasis,
    ) -> ValidationResult<Vec<TopEntityResult<MonetaryAmount>>>
    where
        I: IntoIterator<Item = &'a OrderLine>,
    {
        Self::top_by(lines, n, |line| basis.line_revenue(line))
    }

    /// Products ranked by total quantity sold, highest first
    pub fn top_by_units_sold<'a, I>(
        lines: I,
        n: usize,
    ) -> ValidationResult<Vec<TopEntityResult<u64>>>
    where
        I: IntoIterator<Item = &'a OrderLine>,
    {
        Self::top_by(lines, n, |line| Ok(line.quantity as u64))
    }

    /// Highest average among rated entities
    ///
    /// Ties go to the higher rating count, then the smaller entity id.
    pub fn best_rated(entities: &[RatedEntity]) -> Option<&RatedEntity> {
        Self::rated_extreme(entities, |a, b| a.total_cmp(&b).reverse())
    }

    /// Lowest average among rated entities, same tie-break as `best_rated`
    pub fn worst_rated(entities: &[RatedEntity]) -> Option<&RatedEntity> {
        Self::rated_extreme(entities, |a, b| a.total_cmp(&b))
    }

    fn top_by<'a, I, M, F>(
        lines: I,
        n: usize,
        metric: F,
    ) -> ValidationResult<Vec<TopEntityResult<M>>>
    where
        I: IntoIterator<Item = &'a OrderLine>,
        M: Metric,
        F: Fn(&OrderLine) -> ValidationResult<M>,
    {
        // BTreeMap iterates in ascending id order; the stable sort keeps it on ties
        let mut groups: BTreeMap<&EntityId, Group<M>> = BTreeMap::new();
        for line in lines {
            let group = groups.entry(&line.product_id).or_insert_with(|| Group {
                name: line.product_name.clone(),
                metric: M::default(),
            });
            group.metric = group.metric.accumulate(metric(line)?)?;
        }

        let mut ranked: Vec<(&EntityId, Group<M>)> = groups.into_iter().collect();
        ranked.sort_by(|a, b| b.1.metric.cmp(&a.1.metric));
        Ok(ranked
            .into_iter()
            .take(n)
            .map(|(id, group)| TopEntityResult {
                entity_id: id.clone(),
                name: group.name,
                metric_value: group.metric,
            })
            .collect())
    }

    /// `rank` orders averages so that the wanted extreme sorts first
    fn rated_extreme<F>(entities: &[RatedEntity], rank: F) -> Option<&RatedEntity>
    where
        F: Fn(f64, f64) -> Ordering,
    {
        entities
            .iter()
            .filter(|e| e.is_rated())
            .min_by(|a, b| {
                rank(a.average_rating, b.average_rating)
                    .then_with(|| b.rating_count.cmp(&a.rating_count))
                    .then_with(|| a.entity_id.cmp(&b.entity_id))
            })
    }
}
