use serde::{Deserialize, Serialize};

use storefront_core::{AggregateId, EventId, TenantId};

/// Envelope for an event, containing multi-tenant + stream metadata.
///
/// This is the unit handed to the external dispatcher/audit log.
///
/// Notes:
/// - **Multi-tenancy** is enforced here via `tenant_id`.
/// - `sequence_number` is the externally-imposed counter for callers that
///   need a strict total order; event factories themselves only stamp
///   wall-clock time, which can collide within a call burst.
/// - `payload` is the domain-agnostic event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: EventId,
    tenant_id: TenantId,

    aggregate_id: AggregateId,
    aggregate_type: String,

    /// Monotonically increasing position in the aggregate stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: EventId,
        tenant_id: TenantId,
        aggregate_id: AggregateId,
        aggregate_type: impl Into<String>,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            tenant_id,
            aggregate_id,
            aggregate_type: aggregate_type.into(),
            sequence_number,
            payload,
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn aggregate_id(&self) -> AggregateId {
        self.aggregate_id
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_exposes_stream_metadata() {
        let envelope = EventEnvelope::new(
            EventId::new(),
            TenantId::new(),
            AggregateId::new(),
            "order",
            7,
            "payload",
        );
        assert_eq!(envelope.aggregate_type(), "order");
        assert_eq!(envelope.sequence_number(), 7);
        assert_eq!(*envelope.payload(), "payload");
        assert_eq!(envelope.into_payload(), "payload");
    }
}
