//! `storefront-events` — domain-agnostic event machinery.
//!
//! The lifecycle engine *produces* events; delivering them (audit log,
//! notifications, webhooks) is an external concern. This crate holds the
//! pieces both sides agree on: the `Event` contract, the tenant-scoped
//! envelope that gets handed across the boundary, and the `EventBus` seam
//! the dispatcher plugs into.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;
pub mod tenant;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::InMemoryEventBus;
pub use tenant::TenantScoped;
