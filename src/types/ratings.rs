//! Rated entities (products with a running star rating)

use super::common::EntityId;
use crate::errors::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};

/// Highest star rating
pub const MAX_RATING: f64 = 5.0;

/// Lowest star a customer can give
pub const MIN_RATING: f64 = 1.0;

/// A product's running rating statistics
///
/// `average_rating` is 0 exactly when `rating_count` is 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedEntity {
    pub entity_id: EntityId,
    pub name: String,
    pub average_rating: f64,
    pub rating_count: u64,
}

impl RatedEntity {
    /// An entity nobody has rated yet
    pub fn unrated(entity_id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            name: name.into(),
            average_rating: 0.0,
            rating_count: 0,
        }
    }

    pub fn is_rated(&self) -> bool {
        self.rating_count > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRatedEntity {
    pub entity_id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub rating_count: i64,
}

impl TryFrom<&RawRatedEntity> for RatedEntity {
    type Error = ValidationError;

    fn try_from(raw: &RawRatedEntity) -> ValidationResult<Self> {
        let rating_count = u64::try_from(raw.rating_count).map_err(|_| {
            ValidationError::rating(raw.rating_count, "rating count cannot be negative")
        })?;
        // A missing average is the collaborator's way of saying "never rated"
        let average_rating = raw.average_rating.unwrap_or(0.0);

        if !average_rating.is_finite() || !(0.0..=MAX_RATING).contains(&average_rating) {
            return Err(ValidationError::rating(
                average_rating,
                format!("average rating of {} outside [0, 5]", raw.entity_id),
            ));
        }
        if rating_count == 0 && average_rating != 0.0 {
            return Err(ValidationError::rating(
                average_rating,
                format!("{} has an average but no ratings", raw.entity_id),
            ));
        }
        if rating_count > 0 && average_rating < MIN_RATING {
            return Err(ValidationError::rating(
                average_rating,
                format!("{} has ratings but an average below 1", raw.entity_id),
            ));
        }

        Ok(RatedEntity {
            entity_id: raw.entity_id.clone(),
            name: raw.name.clone(),
            average_rating,
            rating_count,
        })
    }
}
