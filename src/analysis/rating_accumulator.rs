//! Incremental rating statistics
//!
//! A product's average rating is maintained with the O(1) incremental-mean
//! update `avg' = (avg * count + r) / (count + 1)` instead of rescanning the
//! rating history. Entities are returned as new values, never mutated.

use crate::errors::{ValidationError, ValidationResult};
use crate::types::ratings::{MAX_RATING, MIN_RATING};
use crate::types::{EntityId, RatedEntity};

pub struct RatingAccumulator;

impl RatingAccumulator {
    /// Apply one new star rating to `current`
    ///
    /// # Errors
    /// `InvalidRating` unless `new_rating` is an integer in 1..=5.
    pub fn apply_new_rating(current: &RatedEntity, new_rating: f64) -> ValidationResult<RatedEntity> {
        Self::validate_rating(new_rating)?;

        let count = current.rating_count as f64;
        let rating_count = current.rating_count + 1;
        let average_rating = (current.average_rating * count + new_rating) / rating_count as f64;

        Ok(RatedEntity {
            entity_id: current.entity_id.clone(),
            name: current.name.clone(),
            average_rating,
            rating_count,
        })
    }

    /// Fold a full rating history starting from an unrated entity
    pub fn from_history(
        entity_id: impl Into<EntityId>,
        name: impl Into<String>,
        ratings: &[f64],
    ) -> ValidationResult<RatedEntity> {
        ratings
            .iter()
            .try_fold(RatedEntity::unrated(entity_id, name), |entity, rating| {
                Self::apply_new_rating(&entity, *rating)
            })
    }

    /// Direct mean of a rating history, `None` when it is empty
    pub fn recompute_mean(ratings: &[f64]) -> Option<f64> {
        if ratings.is_empty() {
            return None;
        }
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    }

    fn validate_rating(rating: f64) -> ValidationResult<()> {
        if !rating.is_finite() || rating.fract() != 0.0 {
            return Err(ValidationError::rating(rating, "star ratings are whole numbers"));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ValidationError::rating(rating, "star ratings range from 1 to 5"));
        }
        Ok(())
    }
}
