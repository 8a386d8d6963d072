//! Dashboard aggregation pipeline
//!
//! Runs the three sales rollups and the four extremum queries over one
//! batch and assembles the dashboard payload. The pipeline performs no I/O;
//! batches are fetched by the caller beforehand.
//!
//! Validation happens up front over the whole batch, so a malformed record
//! fails the aggregation before anything is computed and no partial
//! dashboard is ever returned. The same holds when a sales total leaves
//! the amount range during aggregation.

use super::group_extremum::{GroupExtremumFinder, RevenueBasis};
use super::sales_rollup::SalesRollup;
use super::time_bucketer::{BucketStrategy, TimeBucketer};
use crate::batch::InputBatch;
use crate::config::AnalyticsConfig;
use crate::errors::{AppError, AppResult};
use crate::types::{
    BucketSeriesEntry, DashboardReport, MonetaryAmount, OrderLine, OrderRecord, RatedEntity,
    RatedProductSummary, TopEntityResult,
};
use crossbeam::thread::ScopedJoinHandle;
use tracing::{debug, info};

/// Orchestrates the rollup and ranking components
#[derive(Debug, Clone, Default)]
pub struct AnalyticsPipeline {
    bucketer: TimeBucketer,
    revenue_basis: RevenueBasis,
    parallel: bool,
}

impl AnalyticsPipeline {
    pub fn new(bucketer: TimeBucketer) -> Self {
        Self {
            bucketer,
            revenue_basis: RevenueBasis::default(),
            parallel: false,
        }
    }

    pub fn from_config(config: &AnalyticsConfig) -> AppResult<Self> {
        let offset = config.utc_offset()?;
        Ok(Self::new(TimeBucketer::new(offset))
            .with_revenue_basis(config.revenue_basis)
            .with_parallelism(config.parallel))
    }

    pub fn with_revenue_basis(mut self, basis: RevenueBasis) -> Self {
        self.revenue_basis = basis;
        self
    }

    /// Compute the independent sub-results on scoped worker threads
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn bucketer(&self) -> &TimeBucketer {
        &self.bucketer
    }

    /// Validate a raw batch and build the dashboard from it
    pub fn aggregate(&self, batch: &InputBatch) -> AppResult<DashboardReport> {
        let validated = batch.validate()?;
        self.aggregate_records(&validated.orders, &validated.products)
    }

    /// Build the dashboard from already validated records
    pub fn aggregate_records(
        &self,
        orders: &[OrderRecord],
        products: &[RatedEntity],
    ) -> AppResult<DashboardReport> {
        info!(
            "Aggregating dashboard: {} orders, {} products (basis: {}, parallel: {})",
            orders.len(),
            products.len(),
            self.revenue_basis.as_str(),
            self.parallel
        );

        let report = if self.parallel {
            self.aggregate_parallel(orders, products)?
        } else {
            DashboardReport {
                week_series: self.series(orders, BucketStrategy::Weekly)?,
                month_series: self.series(orders, BucketStrategy::Monthly)?,
                year_series: self.series(orders, BucketStrategy::Yearly)?,
                top_revenue_product: self.top_products_by_revenue(orders, 1)?.into_iter().next(),
                top_units_sold_product: self.top_products_by_units(orders, 1)?.into_iter().next(),
                best_rated_product: Self::best_rated(products),
                worst_rated_product: Self::worst_rated(products),
            }
        };

        info!(
            "Dashboard ready: top revenue product {}, best rated {}",
            report
                .top_revenue_product
                .as_ref()
                .map(|p| p.entity_id.to_string())
                .unwrap_or_else(|| "none".to_string()),
            report
                .best_rated_product
                .as_ref()
                .map(|p| p.entity_id.to_string())
                .unwrap_or_else(|| "none".to_string()),
        );
        Ok(report)
    }

    /// Dense sales series for one strategy
    pub fn series(
        &self,
        orders: &[OrderRecord],
        strategy: BucketStrategy,
    ) -> AppResult<Vec<BucketSeriesEntry>> {
        Ok(SalesRollup::rollup(orders, strategy, &self.bucketer)?)
    }

    /// Top `n` products by revenue over delivered orders
    pub fn top_products_by_revenue(
        &self,
        orders: &[OrderRecord],
        n: usize,
    ) -> AppResult<Vec<TopEntityResult<MonetaryAmount>>> {
        let top = GroupExtremumFinder::top_by_revenue_with(
            delivered_lines(orders),
            n,
            self.revenue_basis,
        )?;
        debug!("Revenue ranking: {} products", top.len());
        Ok(top)
    }

    /// Top `n` products by units sold over delivered orders
    pub fn top_products_by_units(
        &self,
        orders: &[OrderRecord],
        n: usize,
    ) -> AppResult<Vec<TopEntityResult<u64>>> {
        let top = GroupExtremumFinder::top_by_units_sold(delivered_lines(orders), n)?;
        debug!("Units ranking: {} products", top.len());
        Ok(top)
    }

    fn best_rated(products: &[RatedEntity]) -> Option<RatedProductSummary> {
        GroupExtremumFinder::best_rated(products).map(RatedProductSummary::from)
    }

    fn worst_rated(products: &[RatedEntity]) -> Option<RatedProductSummary> {
        GroupExtremumFinder::worst_rated(products).map(RatedProductSummary::from)
    }

    fn aggregate_parallel(
        &self,
        orders: &[OrderRecord],
        products: &[RatedEntity],
    ) -> AppResult<DashboardReport> {
        crossbeam::thread::scope(|s| -> AppResult<DashboardReport> {
            let week = s.spawn(move |_| self.series(orders, BucketStrategy::Weekly));
            let month = s.spawn(move |_| self.series(orders, BucketStrategy::Monthly));
            let year = s.spawn(move |_| self.series(orders, BucketStrategy::Yearly));
            let revenue = s.spawn(move |_| self.top_products_by_revenue(orders, 1));
            let units = s.spawn(move |_| self.top_products_by_units(orders, 1));
            let best = s.spawn(move |_| Self::best_rated(products));
            let worst = s.spawn(move |_| Self::worst_rated(products));

            Ok(DashboardReport {
                week_series: joined(week, "weekly rollup")??,
                month_series: joined(month, "monthly rollup")??,
                year_series: joined(year, "yearly rollup")??,
                top_revenue_product: joined(revenue, "revenue ranking")??.into_iter().next(),
                top_units_sold_product: joined(units, "units ranking")??.into_iter().next(),
                best_rated_product: joined(best, "best rated")?,
                worst_rated_product: joined(worst, "worst rated")?,
            })
        })
        .map_err(|_| AppError::Processing("aggregation worker panicked".to_string()))?
    }
}

/// Lines of delivered orders, in input order
pub fn delivered_lines(orders: &[OrderRecord]) -> impl Iterator<Item = &OrderLine> {
    orders
        .iter()
        .filter(|o| o.status.is_realised_sale())
        .flat_map(|o| o.lines.iter())
}

fn joined<T>(handle: ScopedJoinHandle<'_, T>, task: &str) -> AppResult<T> {
    handle
        .join()
        .map_err(|_| AppError::Processing(format!("{} worker panicked", task)))
}
