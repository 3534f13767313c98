//! Export flattening: one order becomes one tabular row.

use storefront_bulk::ImportedOrderRow;
use storefront_orders::{Order, OrderItem};

use crate::error::TransferError;

/// Column set shared by export and import, in on-disk order. Must stay in
/// sync with the field order of [`ImportedOrderRow`], which the csv
/// serializer derives its header row from.
pub const CSV_HEADERS: [&str; 16] = [
    "order_number",
    "created_at",
    "customer_name",
    "customer_email",
    "customer_phone",
    "status",
    "payment_status",
    "total_amount",
    "currency",
    "shipping_method",
    "shipping_address",
    "tracking_number",
    "notes",
    "source",
    "item_count",
    "products",
];

/// `"Espresso Cup (2); Grinder (1)"` - a human-reviewable summary, not a
/// faithful encoding. Unit prices, discounts and image references do not
/// survive; exported rows exist for review and bulk status/shipping edits,
/// not for order reconstruction.
fn summarize_items(items: &[OrderItem]) -> String {
    items
        .iter()
        .map(|item| format!("{} ({})", item.name, item.quantity))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Flatten one order into the tabular representation.
pub fn flatten_order(order: &Order) -> ImportedOrderRow {
    ImportedOrderRow {
        order_number: order.order_number.clone(),
        created_at: order.created_at.to_rfc3339(),
        customer_name: order.customer.name.clone(),
        customer_email: order.customer.email.clone(),
        customer_phone: order.customer.phone.clone(),
        status: order.status.as_str().to_string(),
        payment_status: order.payment.status.as_str().to_string(),
        total_amount: order.total_amount.to_string(),
        currency: order.total_amount.currency.as_str().to_string(),
        shipping_method: order.shipping.method.as_str().to_string(),
        shipping_address: order.shipping.address.to_joined_string(),
        tracking_number: order.shipping.tracking_number.clone().unwrap_or_default(),
        notes: order.notes.clone().unwrap_or_default(),
        source: order.source.clone().unwrap_or_default(),
        item_count: order.total_items().to_string(),
        products: summarize_items(&order.items),
    }
}

/// Render orders as CSV text, header row included.
pub fn export_orders_to_csv(orders: &[Order]) -> Result<String, TransferError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if orders.is_empty() {
        // serialize() only emits headers alongside a first record; an empty
        // export still needs the header row so the file stays re-importable.
        writer.write_record(CSV_HEADERS)?;
    }
    for order in orders {
        writer.serialize(flatten_order(order))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TransferError::WriterRecovery(e.to_string()))?;
    let content = String::from_utf8(bytes)?;

    tracing::debug!(orders = orders.len(), "exported orders to csv");
    Ok(content)
}
