//! Domain event factory: one immutable record per lifecycle transition.
//!
//! Factories only construct. They do not dispatch, persist or validate, and
//! they keep no state between calls - calling one twice produces two records
//! with distinct ids. Collapsing duplicates (idempotency keys) is the
//! caller's job at the call site; statelessness is what makes these safe to
//! call from any number of concurrent request handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{EventId, Money, TenantId, UserId};
use storefront_events::Event;

use crate::order::{Order, OrderId};
use crate::status::{OrderStatus, PaymentMethod, PaymentStatus, ShippingMethod};

/// Free-form key/value context attached by the caller.
///
/// `None` and an empty map are different facts on the wire: downstream
/// consumers branch on the *presence* of metadata, so factories never invent
/// an empty object.
pub type EventMetadata = serde_json::Map<String, serde_json::Value>;

/// Event: order admitted into the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreated {
    pub event_id: EventId,
    pub occurred_at: DateTime<Utc>,
    pub tenant_id: TenantId,
    pub order_id: OrderId,
    pub order_number: String,
    pub total_amount: Money,
    pub item_count: u64,
    pub customer_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

/// Event: lifecycle status moved from one state to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusChanged {
    pub event_id: EventId,
    pub occurred_at: DateTime<Utc>,
    pub tenant_id: TenantId,
    pub order_id: OrderId,
    pub order_number: String,
    pub previous_status: OrderStatus,
    pub new_status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

/// Event: payment reached a settled state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProcessed {
    pub event_id: EventId,
    pub occurred_at: DateTime<Utc>,
    pub tenant_id: TenantId,
    pub order_id: OrderId,
    pub order_number: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

/// Event: order handed to the carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderShipped {
    pub event_id: EventId,
    pub occurred_at: DateTime<Utc>,
    pub tenant_id: TenantId,
    pub order_id: OrderId,
    pub order_number: String,
    pub shipping_method: ShippingMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

/// Event: order reached the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDelivered {
    pub event_id: EventId,
    pub occurred_at: DateTime<Utc>,
    pub tenant_id: TenantId,
    pub order_id: OrderId,
    pub order_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_by: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

/// Event: order cancelled before fulfillment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelled {
    pub event_id: EventId,
    pub occurred_at: DateTime<Utc>,
    pub tenant_id: TenantId,
    pub order_id: OrderId,
    pub order_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_by: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

/// Event: money returned to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRefunded {
    pub event_id: EventId,
    pub occurred_at: DateTime<Utc>,
    pub tenant_id: TenantId,
    pub order_id: OrderId,
    pub order_number: String,
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum OrderEvent {
    #[serde(rename = "ORDER_CREATED")]
    OrderCreated(OrderCreated),
    #[serde(rename = "ORDER_STATUS_CHANGED")]
    OrderStatusChanged(OrderStatusChanged),
    #[serde(rename = "PAYMENT_PROCESSED")]
    PaymentProcessed(PaymentProcessed),
    #[serde(rename = "ORDER_SHIPPED")]
    OrderShipped(OrderShipped),
    #[serde(rename = "ORDER_DELIVERED")]
    OrderDelivered(OrderDelivered),
    #[serde(rename = "ORDER_CANCELLED")]
    OrderCancelled(OrderCancelled),
    #[serde(rename = "ORDER_REFUNDED")]
    OrderRefunded(OrderRefunded),
}

impl Event for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderCreated(_) => "ORDER_CREATED",
            OrderEvent::OrderStatusChanged(_) => "ORDER_STATUS_CHANGED",
            OrderEvent::PaymentProcessed(_) => "PAYMENT_PROCESSED",
            OrderEvent::OrderShipped(_) => "ORDER_SHIPPED",
            OrderEvent::OrderDelivered(_) => "ORDER_DELIVERED",
            OrderEvent::OrderCancelled(_) => "ORDER_CANCELLED",
            OrderEvent::OrderRefunded(_) => "ORDER_REFUNDED",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::OrderCreated(e) => e.occurred_at,
            OrderEvent::OrderStatusChanged(e) => e.occurred_at,
            OrderEvent::PaymentProcessed(e) => e.occurred_at,
            OrderEvent::OrderShipped(e) => e.occurred_at,
            OrderEvent::OrderDelivered(e) => e.occurred_at,
            OrderEvent::OrderCancelled(e) => e.occurred_at,
            OrderEvent::OrderRefunded(e) => e.occurred_at,
        }
    }
}

/// Record that `order` was created.
pub fn order_created(order: &Order, metadata: Option<EventMetadata>) -> OrderCreated {
    OrderCreated {
        event_id: EventId::new(),
        occurred_at: Utc::now(),
        tenant_id: order.tenant_id,
        order_id: order.id,
        order_number: order.order_number.clone(),
        total_amount: order.total_amount.clone(),
        item_count: order.total_items(),
        customer_email: order.customer.email.clone(),
        metadata,
    }
}

/// Record a status transition the caller has already decided on.
///
/// The factory does not check legality - that is the caller's decision,
/// validated beforehand against the state rules.
pub fn order_status_changed(
    order: &Order,
    previous_status: OrderStatus,
    new_status: OrderStatus,
    changed_by: Option<UserId>,
    notes: Option<String>,
    metadata: Option<EventMetadata>,
) -> OrderStatusChanged {
    OrderStatusChanged {
        event_id: EventId::new(),
        occurred_at: Utc::now(),
        tenant_id: order.tenant_id,
        order_id: order.id,
        order_number: order.order_number.clone(),
        previous_status,
        new_status,
        changed_by,
        notes,
        metadata,
    }
}

/// Record the payment snapshot currently on the order.
pub fn payment_processed(order: &Order, metadata: Option<EventMetadata>) -> PaymentProcessed {
    PaymentProcessed {
        event_id: EventId::new(),
        occurred_at: Utc::now(),
        tenant_id: order.tenant_id,
        order_id: order.id,
        order_number: order.order_number.clone(),
        method: order.payment.method,
        status: order.payment.status,
        amount: order.payment.amount_paid.clone(),
        transaction_id: order.payment.transaction_id.clone(),
        metadata,
    }
}

/// Record hand-off to the carrier, with whatever tracking data exists.
pub fn order_shipped(order: &Order, metadata: Option<EventMetadata>) -> OrderShipped {
    OrderShipped {
        event_id: EventId::new(),
        occurred_at: Utc::now(),
        tenant_id: order.tenant_id,
        order_id: order.id,
        order_number: order.order_number.clone(),
        shipping_method: order.shipping.method,
        tracking_number: order.shipping.tracking_number.clone(),
        metadata,
    }
}

/// Record delivery.
pub fn order_delivered(
    order: &Order,
    delivered_by: Option<UserId>,
    metadata: Option<EventMetadata>,
) -> OrderDelivered {
    OrderDelivered {
        event_id: EventId::new(),
        occurred_at: Utc::now(),
        tenant_id: order.tenant_id,
        order_id: order.id,
        order_number: order.order_number.clone(),
        delivered_by,
        metadata,
    }
}

/// Record cancellation.
pub fn order_cancelled(
    order: &Order,
    reason: Option<String>,
    cancelled_by: Option<UserId>,
    metadata: Option<EventMetadata>,
) -> OrderCancelled {
    OrderCancelled {
        event_id: EventId::new(),
        occurred_at: Utc::now(),
        tenant_id: order.tenant_id,
        order_id: order.id,
        order_number: order.order_number.clone(),
        reason,
        cancelled_by,
        metadata,
    }
}

/// Record a refund of `amount`.
pub fn order_refunded(
    order: &Order,
    amount: Money,
    reason: Option<String>,
    metadata: Option<EventMetadata>,
) -> OrderRefunded {
    OrderRefunded {
        event_id: EventId::new(),
        occurred_at: Utc::now(),
        tenant_id: order.tenant_id,
        order_id: order.id,
        order_number: order.order_number.clone(),
        amount,
        reason,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::test_support::{money, sample_order};

    #[test]
    fn status_changed_carries_transition_and_identity() {
        let order = sample_order();
        let event =
            order_status_changed(&order, OrderStatus::Pending, OrderStatus::Paid, None, None, None);

        assert_eq!(event.previous_status, OrderStatus::Pending);
        assert_eq!(event.new_status, OrderStatus::Paid);
        assert_eq!(event.tenant_id, order.tenant_id);
        assert_eq!(event.order_id, order.id);
        assert_eq!(event.order_number, order.order_number);
    }

    #[test]
    fn each_call_yields_a_fresh_event_id() {
        let order = sample_order();
        let a = order_created(&order, None);
        let b = order_created(&order, None);
        assert_ne!(a.event_id, b.event_id);
    }

    #[test]
    fn event_type_tags_match_the_wire_vocabulary() {
        let order = sample_order();
        let cases: Vec<(OrderEvent, &str)> = vec![
            (OrderEvent::OrderCreated(order_created(&order, None)), "ORDER_CREATED"),
            (
                OrderEvent::OrderStatusChanged(order_status_changed(
                    &order,
                    OrderStatus::Pending,
                    OrderStatus::Paid,
                    None,
                    None,
                    None,
                )),
                "ORDER_STATUS_CHANGED",
            ),
            (
                OrderEvent::PaymentProcessed(payment_processed(&order, None)),
                "PAYMENT_PROCESSED",
            ),
            (OrderEvent::OrderShipped(order_shipped(&order, None)), "ORDER_SHIPPED"),
            (
                OrderEvent::OrderDelivered(order_delivered(&order, None, None)),
                "ORDER_DELIVERED",
            ),
            (
                OrderEvent::OrderCancelled(order_cancelled(&order, None, None, None)),
                "ORDER_CANCELLED",
            ),
            (
                OrderEvent::OrderRefunded(order_refunded(&order, money(12489), None, None)),
                "ORDER_REFUNDED",
            ),
        ];

        for (event, expected) in cases {
            assert_eq!(event.event_type(), expected);
            assert_eq!(event.version(), 1);
        }
    }

    #[test]
    fn serialized_enum_carries_the_event_type_tag() {
        let order = sample_order();
        let event = OrderEvent::OrderCreated(order_created(&order, None));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event_type\":\"ORDER_CREATED\""));
    }

    #[test]
    fn omitted_metadata_is_absent_from_the_wire() {
        let order = sample_order();
        let event = order_created(&order, None);
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("\"metadata\""));
    }

    #[test]
    fn empty_metadata_is_distinguishable_from_omitted() {
        let order = sample_order();
        let event = order_created(&order, Some(EventMetadata::new()));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"metadata\":{}"));
    }

    #[test]
    fn supplied_metadata_round_trips() {
        let order = sample_order();
        let mut metadata = EventMetadata::new();
        metadata.insert("channel".to_string(), serde_json::json!("pos"));
        let event = order_cancelled(&order, Some("duplicate".to_string()), None, Some(metadata));

        let json = serde_json::to_string(&event).unwrap();
        let back: OrderCancelled = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.reason.as_deref(), Some("duplicate"));
    }

    #[test]
    fn payment_processed_snapshots_the_payment_subrecord() {
        let mut order = sample_order();
        order.payment.status = PaymentStatus::Completed;
        order.payment.amount_paid = money(12489);
        order.payment.transaction_id = Some("txn_42".to_string());

        let event = payment_processed(&order, None);
        assert_eq!(event.method, PaymentMethod::Card);
        assert_eq!(event.status, PaymentStatus::Completed);
        assert_eq!(event.amount, money(12489));
        assert_eq!(event.transaction_id.as_deref(), Some("txn_42"));
    }

    #[test]
    fn factories_do_not_mutate_the_order() {
        let order = sample_order();
        let snapshot = order.clone();
        let _ = order_created(&order, None);
        let _ = order_shipped(&order, None);
        let _ = order_refunded(&order, money(100), None, None);
        assert_eq!(order, snapshot);
    }
}
