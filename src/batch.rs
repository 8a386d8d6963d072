//! Input batches handed over by the storage collaborator
//!
//! A batch is the already-fetched set of orders (with their lines) and
//! products (with their rating statistics) for one reporting request. It is
//! validated as a whole: a single bad record rejects the batch.

use crate::errors::{AppError, AppResult};
use crate::types::{OrderRecord, RatedEntity, RawOrderRecord, RawRatedEntity};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Raw batch as serialised by the collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputBatch {
    #[serde(default)]
    pub orders: Vec<RawOrderRecord>,
    #[serde(default)]
    pub products: Vec<RawRatedEntity>,
}

/// Batch whose every record passed validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedBatch {
    pub orders: Vec<OrderRecord>,
    pub products: Vec<RatedEntity>,
}

impl InputBatch {
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON batch file
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let batch = Self::from_json_str(&content).map_err(|e| match e {
            AppError::InvalidData(msg) => {
                AppError::InvalidData(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        debug!(
            "Loaded batch from {}: {} orders, {} products",
            path.display(),
            batch.orders.len(),
            batch.products.len()
        );
        Ok(batch)
    }

    /// Validate every record; the first failure aborts the whole batch
    pub fn validate(&self) -> AppResult<ValidatedBatch> {
        let orders = self
            .orders
            .iter()
            .map(|raw| {
                OrderRecord::try_from(raw).map_err(|e| {
                    warn!("Rejecting batch: order {} is invalid: {}", raw.id, e);
                    AppError::from(e)
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let products = self
            .products
            .iter()
            .map(|raw| {
                RatedEntity::try_from(raw).map_err(|e| {
                    warn!("Rejecting batch: product {} is invalid: {}", raw.entity_id, e);
                    AppError::from(e)
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(ValidatedBatch { orders, products })
    }
}
