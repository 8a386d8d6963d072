//! Unit tests for incremental rating means

use crate::common::fixtures::rated;
use storefront_analytics::analysis::RatingAccumulator;
use storefront_analytics::errors::ValidationError;
use storefront_analytics::types::RatedEntity;

const TOLERANCE: f64 = 1e-9;

#[test]
fn test_incremental_mean_matches_direct_mean() {
    let histories: [&[f64]; 4] = [
        &[5.0, 5.0, 5.0, 1.0],
        &[1.0],
        &[3.0, 4.0, 2.0, 5.0, 1.0, 4.0, 4.0],
        &[2.0; 50],
    ];

    for history in histories {
        let entity = RatingAccumulator::from_history(1u64, "Mug", history).unwrap();
        let direct = RatingAccumulator::recompute_mean(history).unwrap();
        assert!(
            (entity.average_rating - direct).abs() < TOLERANCE,
            "{:?}: {} vs {}",
            history,
            entity.average_rating,
            direct
        );
        assert_eq!(entity.rating_count, history.len() as u64);
    }
}

#[test]
fn test_long_history_does_not_drift() {
    let history: Vec<f64> = (0..10_000).map(|i| (i % 5 + 1) as f64).collect();
    let entity = RatingAccumulator::from_history(1u64, "Mug", &history).unwrap();
    assert!((entity.average_rating - 3.0).abs() < TOLERANCE);
}

#[test]
fn test_apply_to_existing_statistics() {
    // 4.0 over 3 ratings, then a 2 -> (12 + 2) / 4
    let current = rated(7, "Teapot", 4.0, 3);
    let updated = RatingAccumulator::apply_new_rating(&current, 2.0).unwrap();
    assert_eq!(updated.rating_count, 4);
    assert!((updated.average_rating - 3.5).abs() < TOLERANCE);
    assert_eq!(updated.entity_id, current.entity_id);
    assert_eq!(updated.name, "Teapot");
    // Input is untouched
    assert_eq!(current.rating_count, 3);
}

#[test]
fn test_first_rating_on_unrated_entity() {
    let updated = RatingAccumulator::apply_new_rating(&RatedEntity::unrated(9u64, "New"), 4.0)
        .unwrap();
    assert_eq!(updated.rating_count, 1);
    assert_eq!(updated.average_rating, 4.0);
}

#[test]
fn test_invalid_ratings_are_rejected() {
    let current = rated(1, "Mug", 4.0, 2);
    for bad in [0.0, 6.0, -1.0, 3.5, f64::NAN, f64::INFINITY] {
        let err = RatingAccumulator::apply_new_rating(&current, bad).unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidRating { .. }),
            "{} should be rejected",
            bad
        );
    }
}

#[test]
fn test_history_with_invalid_rating_fails_whole_fold() {
    assert!(RatingAccumulator::from_history(1u64, "Mug", &[5.0, 9.0, 4.0]).is_err());
}

#[test]
fn test_recompute_mean_of_empty_history() {
    assert_eq!(RatingAccumulator::recompute_mean(&[]), None);
}
