//! Order lifecycle domain module.
//!
//! This crate contains the order aggregate, its state rules and the domain
//! event factory, implemented purely as deterministic domain logic (no IO,
//! no HTTP, no storage). State *transitions* are driven by the caller; this
//! crate only answers whether a requested end state is legal and records
//! what happened.

pub mod events;
pub mod order;
pub mod status;

pub use events::{
    EventMetadata, OrderCancelled, OrderCreated, OrderDelivered, OrderEvent, OrderRefunded,
    OrderShipped, OrderStatusChanged, PaymentProcessed,
};
pub use order::{
    Address, Customer, Order, OrderId, OrderItem, PaymentDetails, ProductId, ShippingDetails,
    TimelineEntry,
};
pub use status::{
    OrderStatus, PaymentMethod, PaymentStatus, ShippingMethod, is_valid_order_status,
    is_valid_payment_status, is_valid_shipping_method,
};
