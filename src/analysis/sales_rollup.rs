//! Dense time-bucketed sales series
//!
//! Folds delivered orders into one accumulator per bucket of a strategy's
//! universe. The emitted series always has exactly one entry per universe
//! key, in canonical order, with zeros for buckets no order fell into.
//!
//! `sales` and `items_sold` are independent accumulators: `sales` sums the
//! order's `total_amount` and `items_sold` sums its line quantities. An order
//! without lines still contributes its total.
//!
//! A bucket whose sales leave the supported amount range fails the rollup
//! with `InvalidAmount`.

use super::time_bucketer::{BucketStrategy, TimeBucketer};
use crate::errors::ValidationResult;
use crate::types::{BucketSeriesEntry, MonetaryAmount, OrderRecord};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
struct BucketAccumulator {
    sales: MonetaryAmount,
    items_sold: u64,
}

/// Sales rollup over one bucketing strategy
pub struct SalesRollup;

impl SalesRollup {
    /// Roll delivered orders up into a dense series for `strategy`
    ///
    /// # Arguments
    /// * `orders` - Validated orders; non-delivered ones are ignored
    /// * `strategy` - Which universe to bucket into
    /// * `bucketer` - Carries the reporting time zone
    ///
    /// # Returns
    /// * `Vec<BucketSeriesEntry>` - Exactly `strategy.universe_size()` entries
    pub fn rollup(
        orders: &[OrderRecord],
        strategy: BucketStrategy,
        bucketer: &TimeBucketer,
    ) -> ValidationResult<Vec<BucketSeriesEntry>> {
        let universe = strategy.universe();
        let mut accumulators = vec![BucketAccumulator::default(); universe.len()];
        let mut delivered = 0usize;

        for order in orders.iter().filter(|o| o.status.is_realised_sale()) {
            let index = bucketer.bucket_index(strategy, order.occurred_at);
            let acc = &mut accumulators[index];
            acc.sales = acc.sales.checked_add(order.total_amount)?;
            acc.items_sold += order.items_count();
            delivered += 1;
        }

        debug!(
            "{} rollup: {} of {} orders delivered",
            strategy,
            delivered,
            orders.len()
        );

        Ok(universe
            .iter()
            .zip(accumulators)
            .map(|(label, acc)| BucketSeriesEntry {
                bucket: (*label).to_string(),
                sales: acc.sales,
                items_sold: acc.items_sold,
            })
            .collect())
    }
}

/// Summary figures of one series for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesTotals {
    pub total_sales: MonetaryAmount,
    pub total_items_sold: u64,
    /// Bucket with the highest sales; first in canonical order on ties,
    /// `None` when nothing was sold
    pub busiest_bucket: Option<String>,
}

impl SeriesTotals {
    pub fn from_series(series: &[BucketSeriesEntry]) -> ValidationResult<Self> {
        let busiest_bucket = series
            .iter()
            .filter(|e| !e.sales.is_zero())
            .fold(None::<&BucketSeriesEntry>, |best, entry| match best {
                Some(b) if b.sales >= entry.sales => Some(b),
                _ => Some(entry),
            })
            .map(|e| e.bucket.clone());

        Ok(Self {
            total_sales: MonetaryAmount::checked_sum(series.iter().map(|e| e.sales))?,
            total_items_sold: series.iter().map(|e| e.items_sold).sum(),
            busiest_bucket,
        })
    }
}
