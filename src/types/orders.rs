//! Order and order line records
//!
//! `Raw*` types mirror what the storage collaborator hands over (loosely
//! typed amounts and timestamps). They are converted into the validated
//! `OrderRecord` / `OrderLine` before any aggregation runs.

use super::common::EntityId;
use super::money::MonetaryAmount;
use crate::errors::{ValidationError, ValidationResult};
use crate::utils::time::{parse_timestamp, timestamp_from_unix};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "shipped")]
    Shipped,
    #[serde(alias = "delivered")]
    Delivered,
    #[serde(alias = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    /// Only delivered orders count as realised sales
    pub fn is_realised_sale(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

/// A validated order line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: EntityId,
    pub product_name: String,
    /// Always ≥ 1
    pub quantity: u32,
    pub unit_price: MonetaryAmount,
}

impl OrderLine {
    /// Unit price × quantity
    pub fn line_total(&self) -> ValidationResult<MonetaryAmount> {
        self.unit_price.checked_times(self.quantity as u64)
    }
}

/// A validated order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: EntityId,
    pub occurred_at: DateTime<Utc>,
    pub total_amount: MonetaryAmount,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
}

impl OrderRecord {
    /// Sum of line quantities, independent of `total_amount`
    pub fn items_count(&self) -> u64 {
        self.lines.iter().map(|line| line.quantity as u64).sum()
    }
}

/// Amount as it appears in collaborator JSON: `"19.90"` or `19.9`
///
/// Any other JSON value lands in `Other` so that it fails validation as an
/// invalid amount rather than as a malformed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

impl RawAmount {
    pub fn validate(&self) -> ValidationResult<MonetaryAmount> {
        match self {
            RawAmount::Text(text) => MonetaryAmount::parse(text),
            RawAmount::Number(number) => MonetaryAmount::parse(&number.to_string()),
            RawAmount::Other(value) => Err(ValidationError::amount(
                value.to_string(),
                "expected a decimal string or number",
            )),
        }
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

/// Timestamp as it appears in collaborator JSON: a string or Unix seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Unix(i64),
    Text(String),
    /// Fractional seconds, booleans, objects...
    Other(serde_json::Value),
}

impl RawTimestamp {
    pub fn validate(&self) -> ValidationResult<DateTime<Utc>> {
        match self {
            RawTimestamp::Unix(seconds) => timestamp_from_unix(*seconds),
            RawTimestamp::Text(text) => parse_timestamp(text),
            RawTimestamp::Other(value) => Err(ValidationError::timestamp(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrderLine {
    pub product_id: EntityId,
    #[serde(default)]
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: RawAmount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrderRecord {
    pub id: EntityId,
    #[serde(default)]
    pub occurred_at: Option<RawTimestamp>,
    pub total_amount: RawAmount,
    pub status: OrderStatus,
    #[serde(default)]
    pub lines: Vec<RawOrderLine>,
}

impl TryFrom<&RawOrderLine> for OrderLine {
    type Error = ValidationError;

    fn try_from(raw: &RawOrderLine) -> ValidationResult<Self> {
        let quantity = u32::try_from(raw.quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or_else(|| ValidationError::InvalidQuantity {
                product_id: raw.product_id.to_string(),
                quantity: raw.quantity,
            })?;

        Ok(OrderLine {
            product_id: raw.product_id.clone(),
            product_name: raw.product_name.clone(),
            quantity,
            unit_price: raw.unit_price.validate()?,
        })
    }
}

impl TryFrom<&RawOrderRecord> for OrderRecord {
    type Error = ValidationError;

    fn try_from(raw: &RawOrderRecord) -> ValidationResult<Self> {
        let occurred_at = raw
            .occurred_at
            .as_ref()
            .ok_or_else(|| ValidationError::timestamp("null"))?
            .validate()?;

        let lines = raw
            .lines
            .iter()
            .map(OrderLine::try_from)
            .collect::<ValidationResult<Vec<_>>>()?;

        Ok(OrderRecord {
            id: raw.id.clone(),
            occurred_at,
            total_amount: raw.total_amount.validate()?,
            status: raw.status,
            lines,
        })
    }
}
