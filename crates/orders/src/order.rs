//! The order aggregate and its state rules.
//!
//! The engine does not drive transitions. A fulfillment workflow (or an
//! operator) decides the next state; the predicates here only answer whether
//! that end state is legal from the order's current state. The shape of the
//! struct mirrors the boundary representation handed in by the persistence
//! layer, so fields are public and serde-visible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{AggregateId, Money, TenantId, UserId};

use crate::status::{OrderStatus, PaymentMethod, PaymentStatus, ShippingMethod};

/// Order identifier (tenant-scoped via `tenant_id` on the aggregate).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub AggregateId);

impl OrderId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Product identifier referenced by order lines.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Customer reference carried on the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_guest: bool,
}

/// One order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    /// At least 1; zero-quantity lines are rejected at the validation boundary.
    pub quantity: u32,
    pub unit_price: Money,
    pub total_price: Money,
}

impl OrderItem {
    /// Line total must equal unit price x quantity, in the line's currency.
    pub fn line_total_is_consistent(&self) -> bool {
        self.total_price == self.unit_price.times(self.quantity)
    }
}

/// Payment sub-record. Payment status moves independently of order status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub amount_paid: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// Structured shipping address; flattened to one cell on export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    /// Comma-joined single-cell form used by the tabular representation.
    pub fn to_joined_string(&self) -> String {
        let mut parts: Vec<&str> = vec![&self.line1];
        if let Some(line2) = &self.line2 {
            parts.push(line2);
        }
        parts.extend([
            self.city.as_str(),
            self.region.as_str(),
            self.postal_code.as_str(),
            self.country.as_str(),
        ]);
        parts.retain(|p| !p.is_empty());
        parts.join(", ")
    }
}

/// Shipping sub-record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub method: ShippingMethod,
    pub address: Address,
    pub shipping_cost: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

/// One entry in the append-only status timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
}

/// Aggregate root: Order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub tenant_id: TenantId,
    /// Human-facing number, unique within the tenant.
    pub order_number: String,
    /// Caller-supplied token that makes creation safe to retry; uniqueness
    /// within the tenant is enforced by the persistence layer.
    pub idempotency_key: String,
    pub customer: Customer,
    pub items: Vec<OrderItem>,
    pub subtotal: Money,
    pub tax: Money,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub payment: PaymentDetails,
    pub shipping: ShippingDetails,
    /// Append-only; entries are non-decreasing by timestamp.
    pub timeline: Vec<TimelineEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Cancellation is only legal early: before fulfillment starts.
    pub fn can_be_cancelled(&self) -> bool {
        matches!(self.status, OrderStatus::Pending | OrderStatus::Paid)
    }

    /// Refunds require a completed payment and an order that has not already
    /// reached a terminal state.
    pub fn can_be_refunded(&self) -> bool {
        matches!(
            self.status,
            OrderStatus::Paid | OrderStatus::Processing | OrderStatus::Shipped
        ) && self.payment.status == PaymentStatus::Completed
    }

    pub fn is_complete(&self) -> bool {
        self.status == OrderStatus::Delivered
    }

    /// Sum of line quantities.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Entry with the maximum timestamp. Wall clocks have coarse resolution,
    /// so timestamp ties resolve to the later insertion position
    /// (`max_by_key` keeps the last maximum).
    pub fn latest_timeline_entry(&self) -> Option<&TimelineEntry> {
        self.timeline.iter().max_by_key(|entry| entry.timestamp)
    }

    /// Advisory: `total == subtotal + tax + shipping_cost` in one currency.
    /// Not enforced at construction - discounts/rounding may be applied
    /// upstream - but property tests hold generated orders to it.
    pub fn totals_are_consistent(&self) -> bool {
        self.subtotal
            .checked_add(&self.tax)
            .and_then(|sum| sum.checked_add(&self.shipping.shipping_cost))
            .map(|sum| sum == self.total_amount)
            .unwrap_or(false)
    }

    /// Advisory: every line total equals unit price x quantity, in the same
    /// currency as the order total.
    pub fn items_are_consistent(&self) -> bool {
        self.items.iter().all(|item| {
            item.line_total_is_consistent()
                && item.total_price.currency == self.total_amount.currency
        })
    }

    /// Timestamps non-decreasing and the most recent entry's status equal to
    /// the order's current status. An empty timeline is inconsistent:
    /// creation always appends the first entry.
    pub fn timeline_is_consistent(&self) -> bool {
        let monotonic = self
            .timeline
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp);
        monotonic
            && self
                .latest_timeline_entry()
                .is_some_and(|entry| entry.status == self.status)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use storefront_core::CurrencyCode;

    pub fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    pub fn money(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2), usd())
    }

    pub fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    /// A fully-populated, internally consistent order in `Pending` status.
    pub fn sample_order() -> Order {
        let items = vec![
            OrderItem {
                product_id: ProductId::new(AggregateId::new()),
                name: "Espresso Cup".to_string(),
                quantity: 2,
                unit_price: money(1200),
                total_price: money(2400),
            },
            OrderItem {
                product_id: ProductId::new(AggregateId::new()),
                name: "Grinder".to_string(),
                quantity: 1,
                unit_price: money(8500),
                total_price: money(8500),
            },
        ];
        Order {
            id: OrderId::new(AggregateId::new()),
            tenant_id: TenantId::new(),
            order_number: "ORD-1001".to_string(),
            idempotency_key: "idem-1001".to_string(),
            customer: Customer {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "+44 20 7946 0000".to_string(),
                is_guest: false,
            },
            items,
            subtotal: money(10900),
            tax: money(1090),
            total_amount: money(12489),
            status: OrderStatus::Pending,
            payment: PaymentDetails {
                method: PaymentMethod::Card,
                status: PaymentStatus::Pending,
                amount_paid: money(0),
                transaction_id: None,
            },
            shipping: ShippingDetails {
                method: ShippingMethod::Standard,
                address: Address {
                    line1: "12 Analytical Way".to_string(),
                    line2: None,
                    city: "London".to_string(),
                    region: "Greater London".to_string(),
                    postal_code: "EC1A 1AA".to_string(),
                    country: "GB".to_string(),
                },
                shipping_cost: money(499),
                tracking_number: None,
            },
            timeline: vec![TimelineEntry {
                status: OrderStatus::Pending,
                timestamp: ts(0),
                notes: Some("Order placed".to_string()),
                created_by: None,
            }],
            source: Some("web".to_string()),
            notes: None,
            metadata: None,
            created_at: ts(0),
        }
    }
}
