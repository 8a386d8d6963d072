//! Unit tests for product rankings and rating extremes

use crate::common::fixtures::{amount, line, rated, sample_orders, sample_products};
use storefront_analytics::analysis::{delivered_lines, GroupExtremumFinder, RevenueBasis};
use storefront_analytics::errors::ValidationError;
use storefront_analytics::types::{EntityId, OrderLine};

#[test]
fn test_revenue_ranking_over_delivered_lines() {
    let orders = sample_orders();
    let top = GroupExtremumFinder::top_by_revenue(delivered_lines(&orders), 10).unwrap();

    let ranked: Vec<(EntityId, String)> = top
        .iter()
        .map(|r| (r.entity_id.clone(), r.metric_value.to_string()))
        .collect();
    assert_eq!(
        ranked,
        vec![
            (EntityId::Numeric(3), "80.00".to_string()),
            (EntityId::Numeric(1), "75.00".to_string()),
            (EntityId::Numeric(2), "40.00".to_string()),
        ]
    );
    // Samovar only appears on a pending order
    assert!(top.iter().all(|r| r.entity_id != EntityId::Numeric(4)));
}

#[test]
fn test_unit_price_basis_ignores_quantity() {
    let orders = sample_orders();
    let top = GroupExtremumFinder::top_by_revenue_with(
        delivered_lines(&orders),
        3,
        RevenueBasis::UnitPrice,
    )
    .unwrap();
    assert_eq!(top[0].name, "Kettle");
    assert_eq!(top[1].name, "Teapot");
    assert_eq!(top[2].name, "Mug");
    assert_eq!(top[2].metric_value, amount("25.00"));
}

#[test]
fn test_units_ranking_breaks_ties_by_ascending_id() {
    let orders = sample_orders();
    let top = GroupExtremumFinder::top_by_units_sold(delivered_lines(&orders), 3).unwrap();
    assert_eq!(top[0].entity_id, EntityId::Numeric(1));
    assert_eq!(top[0].metric_value, 6);
    // Teapot (2) and Kettle (3) both sold one unit
    assert_eq!(top[1].entity_id, EntityId::Numeric(2));
    assert_eq!(top[2].entity_id, EntityId::Numeric(3));
}

#[test]
fn test_ranking_is_independent_of_input_order() {
    let mut lines = vec![
        line(5, "E", 1, "10.00"),
        line(2, "B", 1, "10.00"),
        line(9, "I", 1, "10.00"),
    ];
    let forward = GroupExtremumFinder::top_by_revenue(&lines, 3).unwrap();
    lines.reverse();
    let backward = GroupExtremumFinder::top_by_revenue(&lines, 3).unwrap();
    assert_eq!(forward, backward);
    assert_eq!(forward[0].entity_id, EntityId::Numeric(2));
}

#[test]
fn test_numeric_ids_rank_before_text_ids_on_ties() {
    let lines = vec![
        OrderLine {
            product_id: EntityId::from("sku-1"),
            product_name: "Text".to_string(),
            quantity: 1,
            unit_price: amount("5.00"),
        },
        line(42, "Numeric", 1, "5.00"),
    ];
    let top = GroupExtremumFinder::top_by_units_sold(&lines, 2).unwrap();
    assert_eq!(top[0].entity_id, EntityId::Numeric(42));
    assert_eq!(top[1].entity_id, EntityId::from("sku-1"));
}

#[test]
fn test_limit_truncates_and_empty_input_is_empty() {
    let orders = sample_orders();
    assert_eq!(
        GroupExtremumFinder::top_by_revenue(delivered_lines(&orders), 1)
            .unwrap()
            .len(),
        1
    );
    assert!(GroupExtremumFinder::top_by_units_sold(delivered_lines(&orders), 0)
        .unwrap()
        .is_empty());

    let none: Vec<OrderLine> = Vec::new();
    assert!(GroupExtremumFinder::top_by_revenue(&none, 5).unwrap().is_empty());
}

#[test]
fn test_revenue_past_amount_range_is_invalid() {
    // 4e9 units at 1e20 each is far beyond the 26 integer digits an amount holds
    let bulk = vec![line(1, "Bulk", 4_000_000_000, "100000000000000000000")];
    assert!(matches!(
        GroupExtremumFinder::top_by_revenue(&bulk, 1),
        Err(ValidationError::InvalidAmount { .. })
    ));
    // Units ranking is unaffected by the amount range
    let top = GroupExtremumFinder::top_by_units_sold(&bulk, 1).unwrap();
    assert_eq!(top[0].metric_value, 4_000_000_000);
}

#[test]
fn test_best_and_worst_rated_of_sample_products() {
    let products = sample_products();
    // Mug and Kettle tie at 4.5; Kettle has more ratings
    let best = GroupExtremumFinder::best_rated(&products).unwrap();
    assert_eq!(best.name, "Kettle");
    // Unrated Samovar (0.0) is not a candidate for worst
    let worst = GroupExtremumFinder::worst_rated(&products).unwrap();
    assert_eq!(worst.name, "Teapot");
}

#[test]
fn test_rated_extremes_fall_back_to_smaller_id() {
    let products = vec![rated(8, "B", 4.0, 3), rated(3, "A", 4.0, 3)];
    assert_eq!(
        GroupExtremumFinder::best_rated(&products).unwrap().entity_id,
        EntityId::Numeric(3)
    );
    assert_eq!(
        GroupExtremumFinder::worst_rated(&products).unwrap().entity_id,
        EntityId::Numeric(3)
    );
}

#[test]
fn test_rated_extremes_absent_without_ratings() {
    assert!(GroupExtremumFinder::best_rated(&[]).is_none());
    let unrated = vec![rated(1, "New", 0.0, 0)];
    assert!(GroupExtremumFinder::best_rated(&unrated).is_none());
    assert!(GroupExtremumFinder::worst_rated(&unrated).is_none());
}
