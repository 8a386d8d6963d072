//! Record builders for analytics tests

use chrono::{DateTime, TimeZone, Utc};
use storefront_analytics::types::{
    EntityId, MonetaryAmount, OrderLine, OrderRecord, OrderStatus, RatedEntity,
};

/// Parse a fixture amount; panics on malformed literals
pub fn amount(value: &str) -> MonetaryAmount {
    MonetaryAmount::parse(value).unwrap()
}

/// UTC instant from calendar fields
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap()
}

pub fn line(product_id: u64, name: &str, quantity: u32, unit_price: &str) -> OrderLine {
    OrderLine {
        product_id: EntityId::Numeric(product_id),
        product_name: name.to_string(),
        quantity,
        unit_price: amount(unit_price),
    }
}

/// Order whose `total_amount` is given explicitly
pub fn order(
    id: u64,
    occurred_at: DateTime<Utc>,
    total: &str,
    status: OrderStatus,
    lines: Vec<OrderLine>,
) -> OrderRecord {
    OrderRecord {
        id: EntityId::Numeric(id),
        occurred_at,
        total_amount: amount(total),
        status,
        lines,
    }
}

/// Delivered order whose total is the sum of its line totals
pub fn delivered(id: u64, occurred_at: DateTime<Utc>, lines: Vec<OrderLine>) -> OrderRecord {
    let total =
        MonetaryAmount::checked_sum(lines.iter().map(|l| l.line_total().unwrap())).unwrap();
    OrderRecord {
        id: EntityId::Numeric(id),
        occurred_at,
        total_amount: total,
        status: OrderStatus::Delivered,
        lines,
    }
}

pub fn rated(id: u64, name: &str, average_rating: f64, rating_count: u64) -> RatedEntity {
    RatedEntity {
        entity_id: EntityId::Numeric(id),
        name: name.to_string(),
        average_rating,
        rating_count,
    }
}

/// A mixed batch spanning all statuses and several months
pub fn sample_orders() -> Vec<OrderRecord> {
    vec![
        // Monday 2024-01-01
        delivered(
            1,
            utc(2024, 1, 1, 10, 0),
            vec![line(1, "Mug", 2, "12.50"), line(2, "Teapot", 1, "40.00")],
        ),
        // Wednesday 2024-03-13
        delivered(2, utc(2024, 3, 13, 9, 30), vec![line(3, "Kettle", 1, "80.00")]),
        // Friday 2024-05-31: day 31 lands in 26-30
        delivered(3, utc(2024, 5, 31, 18, 0), vec![line(1, "Mug", 4, "12.50")]),
        order(
            4,
            utc(2024, 1, 2, 8, 0),
            "500.00",
            OrderStatus::Pending,
            vec![line(4, "Samovar", 1, "500.00")],
        ),
        order(
            5,
            utc(2024, 2, 20, 8, 0),
            "80.00",
            OrderStatus::Cancelled,
            vec![line(3, "Kettle", 1, "80.00")],
        ),
        order(
            6,
            utc(2024, 6, 5, 8, 0),
            "25.00",
            OrderStatus::Shipped,
            vec![line(1, "Mug", 2, "12.50")],
        ),
    ]
}

pub fn sample_products() -> Vec<RatedEntity> {
    vec![
        rated(1, "Mug", 4.5, 10),
        rated(2, "Teapot", 3.0, 2),
        rated(3, "Kettle", 4.5, 40),
        rated(4, "Samovar", 0.0, 0),
    ]
}
