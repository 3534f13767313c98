use storefront_core::TenantId;

use crate::EventEnvelope;

/// Helper trait for tenant-scoped messages.
///
/// Every operation in this system is scoped to exactly one tenant; marking
/// message types with their tenant lets infrastructure components (workers,
/// dispatchers) filter or reject cross-tenant traffic before processing it.
pub trait TenantScoped {
    fn tenant_id(&self) -> TenantId;
}

impl<E> TenantScoped for EventEnvelope<E> {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id()
    }
}
