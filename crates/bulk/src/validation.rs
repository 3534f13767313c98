//! Validation of bulk mutations and imported rows.
//!
//! Validation is decomposed by *operation kind* rather than one generic
//! order validator: a batch edit is sparse (only the fields being changed
//! arrive), an import row is dense (every business-required field must be
//! present). One validator for both would either reject legitimate partial
//! edits or admit incomplete imports.

use core::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use storefront_core::CurrencyCode;
use storefront_orders::{is_valid_order_status, is_valid_payment_status, is_valid_shipping_method};

use crate::result::{ValidationError, ValidationResult};
use crate::row::ImportedOrderRow;

/// Carrier tracking numbers are bounded; anything longer is garbage input.
pub const TRACKING_NUMBER_MAX_LEN: usize = 100;
/// Free-text notes cap.
pub const NOTES_MAX_LEN: usize = 5000;
/// Order ids arrive as opaque strings from the UI; cap their length.
const ORDER_ID_MAX_LEN: usize = 64;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

/// Opaque id shape: non-empty, bounded, no whitespace or control characters.
/// Applied uniformly to every bulk mutation, including deletes.
fn is_plausible_order_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= ORDER_ID_MAX_LEN
        && !id.chars().any(|c| c.is_whitespace() || c.is_control())
}

fn push_order_id_errors(order_ids: &[String], errors: &mut Vec<ValidationError>) {
    if order_ids.is_empty() {
        errors.push(ValidationError::new(
            "order_ids",
            "At least one order ID is required",
        ));
        return;
    }
    for (index, id) in order_ids.iter().enumerate() {
        if !is_plausible_order_id(id) {
            errors.push(ValidationError::at_index(
                "order_ids",
                format!("Invalid order ID: {id:?}"),
                index,
            ));
        }
    }
}

fn push_enum_error(
    field: &str,
    value: &Value,
    is_member: fn(&str) -> bool,
    label: &str,
    errors: &mut Vec<ValidationError>,
) {
    match value.as_str() {
        Some(s) if is_member(s) => {}
        Some(s) => errors.push(ValidationError::new(
            field,
            format!("Invalid {label}: {s}"),
        )),
        None => errors.push(ValidationError::new(
            field,
            format!("Expected a string for {label}"),
        )),
    }
}

fn push_length_error(
    field: &str,
    value: &Value,
    max_len: usize,
    errors: &mut Vec<ValidationError>,
) {
    match value.as_str() {
        Some(s) if s.chars().count() <= max_len => {}
        Some(_) => errors.push(ValidationError::new(
            field,
            format!("Exceeds maximum length of {max_len} characters"),
        )),
        None => errors.push(ValidationError::new(field, "Expected a string")),
    }
}

/// Validate a sparse batch edit: which orders, and which fields change.
///
/// Recognized fields get enum/length checks; unrecognized top-level fields
/// pass through unvalidated by design (batch edits must stay
/// forward-compatible with fields this engine does not know about), but each
/// one is logged so client-side typos are observable.
pub fn validate_batch_edit(order_ids: &[String], fields: &Map<String, Value>) -> ValidationResult {
    let mut errors = Vec::new();

    push_order_id_errors(order_ids, &mut errors);

    if fields.is_empty() {
        errors.push(ValidationError::new("fields", "No fields to update"));
    }

    for (key, value) in fields {
        match key.as_str() {
            "status" => {
                push_enum_error("status", value, is_valid_order_status, "order status", &mut errors)
            }
            "payment" => match value.as_object() {
                Some(payment) => {
                    if let Some(status) = payment.get("status") {
                        push_enum_error(
                            "payment.status",
                            status,
                            is_valid_payment_status,
                            "payment status",
                            &mut errors,
                        );
                    }
                }
                None => errors.push(ValidationError::new("payment", "Expected an object")),
            },
            "payment.status" => push_enum_error(
                "payment.status",
                value,
                is_valid_payment_status,
                "payment status",
                &mut errors,
            ),
            "shipping" => match value.as_object() {
                Some(shipping) => {
                    if let Some(method) = shipping.get("method") {
                        push_enum_error(
                            "shipping.method",
                            method,
                            is_valid_shipping_method,
                            "shipping method",
                            &mut errors,
                        );
                    }
                    if let Some(tracking) = shipping.get("tracking_number") {
                        push_length_error(
                            "shipping.tracking_number",
                            tracking,
                            TRACKING_NUMBER_MAX_LEN,
                            &mut errors,
                        );
                    }
                }
                None => errors.push(ValidationError::new("shipping", "Expected an object")),
            },
            "shipping.method" => push_enum_error(
                "shipping.method",
                value,
                is_valid_shipping_method,
                "shipping method",
                &mut errors,
            ),
            "shipping.tracking_number" => push_length_error(
                "shipping.tracking_number",
                value,
                TRACKING_NUMBER_MAX_LEN,
                &mut errors,
            ),
            "notes" => push_length_error("notes", value, NOTES_MAX_LEN, &mut errors),
            other => {
                tracing::warn!(field = other, "unrecognized batch-edit field passed through unvalidated");
            }
        }
    }

    ValidationResult::from_errors(errors)
}

/// Validate a bulk status change.
pub fn validate_status_update(order_ids: &[String], status: Option<&str>) -> ValidationResult {
    let mut errors = Vec::new();

    push_order_id_errors(order_ids, &mut errors);

    match status {
        None => errors.push(ValidationError::new("status", "Status is required")),
        Some(s) if s.is_empty() => {
            errors.push(ValidationError::new("status", "Status is required"))
        }
        Some(s) if !is_valid_order_status(s) => errors.push(ValidationError::new(
            "status",
            format!("Invalid order status: {s}"),
        )),
        Some(_) => {}
    }

    ValidationResult::from_errors(errors)
}

/// Validate a bulk delete. Id shape is checked here too, matching the other
/// bulk mutations - a delete addressed at a mangled id is as suspect as an
/// edit.
pub fn validate_bulk_delete(order_ids: &[String]) -> ValidationResult {
    let mut errors = Vec::new();
    push_order_id_errors(order_ids, &mut errors);
    ValidationResult::from_errors(errors)
}

/// Validate imported tabular rows, one error per offending (field, row) pair.
///
/// Never halts early: every row is evaluated so the caller can report
/// "row 7: missing customer email" for the whole file at once, then decide
/// whether to reject the import or admit the valid subset.
pub fn validate_imported_rows(rows: &[ImportedOrderRow]) -> ValidationResult {
    let mut errors = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        if row.order_number.is_empty() {
            errors.push(ValidationError::at_index(
                "order_number",
                "Order number is required",
                index,
            ));
        }
        if row.customer_name.is_empty() {
            errors.push(ValidationError::at_index(
                "customer_name",
                "Customer name is required",
                index,
            ));
        }
        if row.customer_email.is_empty() {
            errors.push(ValidationError::at_index(
                "customer_email",
                "Customer email is required",
                index,
            ));
        } else if !email_regex().is_match(&row.customer_email) {
            errors.push(ValidationError::at_index(
                "customer_email",
                "Invalid email format",
                index,
            ));
        }
        if row.customer_phone.is_empty() {
            errors.push(ValidationError::at_index(
                "customer_phone",
                "Customer phone is required",
                index,
            ));
        }

        // Optional cells still have to satisfy their constraints when present.
        if !row.status.is_empty() && !is_valid_order_status(&row.status) {
            errors.push(ValidationError::at_index(
                "status",
                format!("Invalid order status: {}", row.status),
                index,
            ));
        }
        if !row.payment_status.is_empty() && !is_valid_payment_status(&row.payment_status) {
            errors.push(ValidationError::at_index(
                "payment_status",
                format!("Invalid payment status: {}", row.payment_status),
                index,
            ));
        }
        if !row.shipping_method.is_empty() && !is_valid_shipping_method(&row.shipping_method) {
            errors.push(ValidationError::at_index(
                "shipping_method",
                format!("Invalid shipping method: {}", row.shipping_method),
                index,
            ));
        }
        if !row.currency.is_empty() && !CurrencyCode::is_valid(&row.currency) {
            errors.push(ValidationError::at_index(
                "currency",
                format!("Invalid currency code: {}", row.currency),
                index,
            ));
        }
        if !row.total_amount.is_empty() && Decimal::from_str(&row.total_amount).is_err() {
            errors.push(ValidationError::at_index(
                "total_amount",
                format!("Invalid total amount: {}", row.total_amount),
                index,
            ));
        }
    }

    tracing::debug!(
        rows = rows.len(),
        errors = errors.len(),
        "validated imported rows"
    );

    ValidationResult::from_errors(errors)
}
