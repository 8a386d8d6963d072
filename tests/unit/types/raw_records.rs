//! Unit tests for raw record validation
//!
//! Raw records arrive loosely typed; every conversion either produces a
//! fully validated record or a `ValidationError`, never a coerced value.

use storefront_analytics::errors::ValidationError;
use storefront_analytics::types::{
    EntityId, OrderRecord, OrderStatus, RatedEntity, RawOrderRecord, RawRatedEntity,
};

fn raw_order(json: serde_json::Value) -> RawOrderRecord {
    serde_json::from_value(json).unwrap()
}

fn raw_product(json: serde_json::Value) -> RawRatedEntity {
    serde_json::from_value(json).unwrap()
}

#[test]
fn test_unix_and_text_timestamps_agree() {
    let from_text = raw_order(serde_json::json!({
        "id": 1, "occurredAt": "2024-03-01T00:00:00Z", "totalAmount": "1", "status": "DELIVERED"
    }));
    let from_unix = raw_order(serde_json::json!({
        "id": 1, "occurredAt": 1709251200, "totalAmount": "1", "status": "DELIVERED"
    }));
    assert_eq!(
        OrderRecord::try_from(&from_text).unwrap().occurred_at,
        OrderRecord::try_from(&from_unix).unwrap().occurred_at
    );
}

#[test]
fn test_status_accepts_both_cases() {
    for (text, status) in [
        ("DELIVERED", OrderStatus::Delivered),
        ("delivered", OrderStatus::Delivered),
        ("SHIPPED", OrderStatus::Shipped),
        ("cancelled", OrderStatus::Cancelled),
        ("PENDING", OrderStatus::Pending),
    ] {
        let raw = raw_order(serde_json::json!({
            "id": 1, "occurredAt": "2024-03-01", "totalAmount": "1", "status": text
        }));
        assert_eq!(raw.status, status);
    }
}

#[test]
fn test_missing_timestamp_is_rejected() {
    let raw = raw_order(serde_json::json!({
        "id": 1, "occurredAt": null, "totalAmount": "10.00", "status": "DELIVERED"
    }));
    assert!(matches!(
        OrderRecord::try_from(&raw),
        Err(ValidationError::InvalidTimestamp { .. })
    ));
}

#[test]
fn test_unparsable_timestamp_is_rejected() {
    let raw = raw_order(serde_json::json!({
        "id": 1, "occurredAt": "yesterday", "totalAmount": "10.00", "status": "DELIVERED"
    }));
    assert!(matches!(
        OrderRecord::try_from(&raw),
        Err(ValidationError::InvalidTimestamp { .. })
    ));
}

#[test]
fn test_wrongly_typed_fields_are_validation_errors() {
    // Shape-level mismatches still deserialize; conversion names the field
    for occurred_at in [
        serde_json::json!(1.7e9),
        serde_json::json!(true),
        serde_json::json!({"seconds": 1}),
    ] {
        let raw = raw_order(serde_json::json!({
            "id": 1, "occurredAt": occurred_at, "totalAmount": "10.00", "status": "DELIVERED"
        }));
        assert!(matches!(
            OrderRecord::try_from(&raw),
            Err(ValidationError::InvalidTimestamp { .. })
        ));
    }

    for total in [serde_json::json!(true), serde_json::json!(["10.00"])] {
        let raw = raw_order(serde_json::json!({
            "id": 1, "occurredAt": "2024-03-01", "totalAmount": total, "status": "DELIVERED"
        }));
        assert!(matches!(
            OrderRecord::try_from(&raw),
            Err(ValidationError::InvalidAmount { .. })
        ));
    }

    let raw = raw_order(serde_json::json!({
        "id": 1, "occurredAt": "2024-03-01", "totalAmount": "10.00", "status": "DELIVERED",
        "lines": [{"productId": 1, "quantity": 1, "unitPrice": false}]
    }));
    assert!(matches!(
        OrderRecord::try_from(&raw),
        Err(ValidationError::InvalidAmount { .. })
    ));
}

#[test]
fn test_invalid_line_price_rejects_order() {
    let raw = raw_order(serde_json::json!({
        "id": 1, "occurredAt": "2024-03-01T00:00:00Z", "totalAmount": "10.00", "status": "DELIVERED",
        "lines": [{"productId": 1, "productName": "Mug", "quantity": 1, "unitPrice": "-10.00"}]
    }));
    assert!(matches!(
        OrderRecord::try_from(&raw),
        Err(ValidationError::InvalidAmount { .. })
    ));
}

#[test]
fn test_zero_quantity_rejects_order() {
    let raw = raw_order(serde_json::json!({
        "id": 1, "occurredAt": "2024-03-01T00:00:00Z", "totalAmount": "10.00", "status": "DELIVERED",
        "lines": [{"productId": "sku-9", "quantity": 0, "unitPrice": "10.00"}]
    }));
    assert_eq!(
        OrderRecord::try_from(&raw),
        Err(ValidationError::InvalidQuantity {
            product_id: "sku-9".to_string(),
            quantity: 0,
        })
    );
}

#[test]
fn test_unrated_product_converts() {
    let raw = raw_product(serde_json::json!({
        "entityId": "sku-1", "name": "New", "averageRating": null, "ratingCount": 0
    }));
    let entity = RatedEntity::try_from(&raw).unwrap();
    assert_eq!(entity.entity_id, EntityId::from("sku-1"));
    assert!(!entity.is_rated());
    assert_eq!(entity.average_rating, 0.0);
}

#[test]
fn test_inconsistent_products_are_rejected() {
    for json in [
        serde_json::json!({"entityId": 1, "averageRating": 5.5, "ratingCount": 3}),
        serde_json::json!({"entityId": 1, "averageRating": 4.0, "ratingCount": 0}),
        serde_json::json!({"entityId": 1, "averageRating": 0.5, "ratingCount": 2}),
        serde_json::json!({"entityId": 1, "averageRating": 3.0, "ratingCount": -1}),
    ] {
        let raw = raw_product(json.clone());
        assert!(
            matches!(
                RatedEntity::try_from(&raw),
                Err(ValidationError::InvalidRating { .. })
            ),
            "{} should be rejected",
            json
        );
    }
}
