//! Storefront analytics - data model
//!
//! - `common`: identifiers shared by orders and products
//! - `money`: exact fixed-point monetary amounts
//! - `orders`: order and order line records (raw and validated)
//! - `ratings`: rated entities (raw and validated)
//! - `dashboard`: the aggregate response handed back to callers
//! - `visualisation`: Plotly chart shapes for the dense series

mod common;
pub mod dashboard;
pub mod money;
pub mod orders;
pub mod ratings;
pub mod visualisation;

pub use common::EntityId;
pub use dashboard::{BucketSeriesEntry, DashboardReport, RatedProductSummary, TopEntityResult};
pub use money::MonetaryAmount;
pub use orders::{
    OrderLine, OrderRecord, OrderStatus, RawAmount, RawOrderLine, RawOrderRecord, RawTimestamp,
};
pub use ratings::{RatedEntity, RawRatedEntity};
