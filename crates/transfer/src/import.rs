//! Import parsing and conversion toward the domain model.

use chrono::{DateTime, Utc};
use core::str::FromStr;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_bulk::{ImportedOrderRow, ValidationError, validate_imported_rows};
use storefront_core::{CurrencyCode, DomainError, DomainResult, Money};
use storefront_orders::{OrderStatus, PaymentStatus, ShippingMethod};

use crate::error::TransferError;

/// Result of parsing + validating an uploaded file: rows that passed every
/// check, and the full error set for everything else. The caller decides
/// whether to reject the file outright or admit the valid subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub valid: Vec<ImportedOrderRow>,
    pub errors: Vec<ValidationError>,
}

/// Parse raw CSV text and validate every row.
///
/// Validation is not optional: no row leaves this function marked `valid`
/// without having passed `validate_imported_rows`. Error indices refer to
/// the zero-based data-row position in the uploaded file.
pub fn import_orders_from_csv(content: &str) -> Result<ImportOutcome, TransferError> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let rows: Vec<ImportedOrderRow> = reader
        .deserialize()
        .collect::<Result<_, csv::Error>>()?;

    let report = validate_imported_rows(&rows);

    let valid: Vec<ImportedOrderRow> = rows
        .into_iter()
        .enumerate()
        .filter(|(index, _)| report.errors_for_index(*index).next().is_none())
        .map(|(_, row)| row)
        .collect();

    tracing::info!(
        valid = valid.len(),
        rejected = report.errors.len(),
        "imported orders from csv"
    );

    Ok(ImportOutcome {
        valid,
        errors: report.errors,
    })
}

/// Sparse patch derived from one validated row, shaped for the
/// order-mutation boundary. Everything except the order number is optional:
/// the flat format cannot express a full order, so nothing absent from it is
/// guessed, and callers must not assume full-order replacement semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPatch {
    pub order_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<ShippingMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn non_empty(cell: &str) -> Option<String> {
    (!cell.is_empty()).then(|| cell.to_string())
}

/// Empty cell -> absent. Present cell must parse; a failure here means the
/// caller skipped validation, which is a contract violation, not bad user
/// input.
fn parse_cell<T: FromStr>(cell: &str, index: usize, label: &str) -> DomainResult<Option<T>> {
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse::<T>().map(Some).map_err(|_| {
        DomainError::validation(format!("row {index}: invalid {label}: {cell}"))
    })
}

/// Map a validated row set into domain-adjacent patches.
///
/// Call order is fixed: parse, validate, *then* convert. Feeding rows that
/// never went through validation surfaces as `DomainError::Validation`.
pub fn convert_imported_rows(rows: &[ImportedOrderRow]) -> DomainResult<Vec<OrderPatch>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            if row.order_number.is_empty() {
                return Err(DomainError::validation(format!(
                    "row {index}: order number is required"
                )));
            }

            let amount = parse_cell::<Decimal>(&row.total_amount, index, "total amount")?;
            let currency = parse_cell::<CurrencyCode>(&row.currency, index, "currency code")?;
            // An amount is only usable with its currency; a currencyless
            // amount stays absent rather than guessed.
            let total_amount = match (amount, currency) {
                (Some(amount), Some(currency)) => Some(Money::new(amount, currency)),
                _ => None,
            };

            Ok(OrderPatch {
                order_number: row.order_number.clone(),
                customer_name: non_empty(&row.customer_name),
                customer_email: non_empty(&row.customer_email),
                customer_phone: non_empty(&row.customer_phone),
                status: parse_cell(&row.status, index, "order status")?,
                payment_status: parse_cell(&row.payment_status, index, "payment status")?,
                shipping_method: parse_cell(&row.shipping_method, index, "shipping method")?,
                tracking_number: non_empty(&row.tracking_number),
                total_amount,
                notes: non_empty(&row.notes),
                source: non_empty(&row.source),
                // Timestamps are advisory in the flat format; an unparseable
                // one degrades to absent instead of failing the batch.
                created_at: DateTime::parse_from_rfc3339(&row.created_at)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{CSV_HEADERS, export_orders_to_csv};
    use crate::test_support::sample_order;
    use rust_decimal::Decimal;

    fn csv_from_rows(rows: &[ImportedOrderRow]) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());
        if rows.is_empty() {
            writer.write_record(CSV_HEADERS).unwrap();
        }
        for row in rows {
            writer.serialize(row).unwrap();
        }
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    fn good_row() -> ImportedOrderRow {
        ImportedOrderRow {
            order_number: "ORD-2001".to_string(),
            created_at: "2026-03-01T10:00:00+00:00".to_string(),
            customer_name: "Grace Hopper".to_string(),
            customer_email: "grace@example.com".to_string(),
            customer_phone: "+1 555 0100".to_string(),
            status: "PAID".to_string(),
            payment_status: "COMPLETED".to_string(),
            total_amount: "59.90".to_string(),
            currency: "USD".to_string(),
            shipping_method: "EXPRESS".to_string(),
            shipping_address: "1 Harbor St, Arlington, VA, US".to_string(),
            tracking_number: "TRK-9".to_string(),
            notes: "priority customer".to_string(),
            source: "web".to_string(),
            item_count: "2".to_string(),
            products: "Compiler Manual (2)".to_string(),
        }
    }

    fn bad_email_row() -> ImportedOrderRow {
        ImportedOrderRow {
            order_number: "ORD-2002".to_string(),
            customer_name: "Alan Turing".to_string(),
            customer_email: "not-an-email".to_string(),
            customer_phone: "+1 555 0101".to_string(),
            ..ImportedOrderRow::default()
        }
    }

    #[test]
    fn import_parses_and_admits_a_valid_row() {
        let outcome = import_orders_from_csv(&csv_from_rows(&[good_row()])).unwrap();
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.valid.len(), 1);
        assert_eq!(outcome.valid[0].order_number, "ORD-2001");
        assert_eq!(outcome.valid[0].shipping_address, "1 Harbor St, Arlington, VA, US");
    }

    #[test]
    fn import_excludes_rows_with_bad_email_from_the_valid_set() {
        let outcome =
            import_orders_from_csv(&csv_from_rows(&[good_row(), bad_email_row()])).unwrap();

        assert_eq!(outcome.valid.len(), 1);
        assert_eq!(outcome.valid[0].order_number, "ORD-2001");
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].field, "customer_email");
        assert_eq!(outcome.errors[0].message, "Invalid email format");
        assert_eq!(outcome.errors[0].index, Some(1));
    }

    #[test]
    fn import_of_headers_only_yields_nothing() {
        let outcome = import_orders_from_csv(&csv_from_rows(&[])).unwrap();
        assert!(outcome.valid.is_empty());
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn import_surfaces_structurally_broken_csv_as_transfer_error() {
        // A data row with the wrong number of cells is a parse failure, not
        // a validation issue.
        let mut content = csv_from_rows(&[good_row()]);
        content.push_str("ORD-2002,only,three\n");
        let result = import_orders_from_csv(&content);
        assert!(matches!(result, Err(TransferError::Csv(_))));
    }

    #[test]
    fn convert_produces_sparse_patches() {
        let outcome = import_orders_from_csv(&csv_from_rows(&[good_row()])).unwrap();
        let patches = convert_imported_rows(&outcome.valid).unwrap();

        assert_eq!(patches.len(), 1);
        let patch = &patches[0];
        assert_eq!(patch.order_number, "ORD-2001");
        assert_eq!(patch.status, Some(OrderStatus::Paid));
        assert_eq!(patch.payment_status, Some(PaymentStatus::Completed));
        assert_eq!(patch.shipping_method, Some(ShippingMethod::Express));
        assert_eq!(patch.tracking_number.as_deref(), Some("TRK-9"));
        assert_eq!(patch.notes.as_deref(), Some("priority customer"));

        let total = patch.total_amount.as_ref().unwrap();
        assert_eq!(total.amount, Decimal::new(5990, 2));
        assert_eq!(total.currency.as_str(), "USD");
    }

    #[test]
    fn convert_leaves_absent_cells_absent() {
        let sparse = ImportedOrderRow {
            order_number: "ORD-2003".to_string(),
            customer_name: "Katherine Johnson".to_string(),
            customer_email: "kj@example.com".to_string(),
            customer_phone: "+1 555 0102".to_string(),
            ..ImportedOrderRow::default()
        };
        let outcome = import_orders_from_csv(&csv_from_rows(&[sparse])).unwrap();
        assert!(outcome.errors.is_empty());

        let patches = convert_imported_rows(&outcome.valid).unwrap();
        let patch = &patches[0];
        assert_eq!(patch.status, None);
        assert_eq!(patch.payment_status, None);
        assert_eq!(patch.shipping_method, None);
        assert_eq!(patch.total_amount, None);
        assert_eq!(patch.tracking_number, None);
        assert_eq!(patch.created_at, None);
        assert_eq!(patch.customer_name.as_deref(), Some("Katherine Johnson"));
    }

    #[test]
    fn convert_drops_currencyless_amounts_instead_of_guessing() {
        let row = ImportedOrderRow {
            order_number: "ORD-2004".to_string(),
            total_amount: "10.00".to_string(),
            ..ImportedOrderRow::default()
        };

        let patches = convert_imported_rows(&[row]).unwrap();
        assert_eq!(patches[0].total_amount, None);
    }

    #[test]
    fn convert_rejects_unvalidated_garbage_as_contract_violation() {
        let row = ImportedOrderRow {
            order_number: "ORD-2005".to_string(),
            status: "LIMBO".to_string(),
            ..ImportedOrderRow::default()
        };

        let err = convert_imported_rows(&[row]).unwrap_err();
        match err {
            DomainError::Validation(msg) => {
                assert!(msg.contains("row 0"));
                assert!(msg.contains("order status"));
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn round_trip_preserves_safe_fields() {
        let order = sample_order();
        let csv = export_orders_to_csv(&[order.clone()]).unwrap();

        let outcome = import_orders_from_csv(&csv).unwrap();
        assert!(outcome.errors.is_empty(), "errors: {:?}", outcome.errors);

        let patches = convert_imported_rows(&outcome.valid).unwrap();
        let patch = &patches[0];
        assert_eq!(patch.order_number, order.order_number);
        assert_eq!(patch.customer_email.as_deref(), Some(order.customer.email.as_str()));
        assert_eq!(patch.status, Some(order.status));
        assert_eq!(patch.payment_status, Some(order.payment.status));
        assert_eq!(patch.total_amount.as_ref(), Some(&order.total_amount));
        assert_eq!(patch.created_at, Some(order.created_at));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Parse -> validate -> split never invents or loses rows.
            #[test]
            fn import_partitions_every_row(bad_rows in 0usize..5, good_rows in 0usize..5) {
                let mut rows = Vec::new();
                for _ in 0..good_rows {
                    rows.push(good_row());
                }
                for _ in 0..bad_rows {
                    rows.push(bad_email_row());
                }

                let outcome = import_orders_from_csv(&csv_from_rows(&rows)).unwrap();
                prop_assert_eq!(outcome.valid.len(), good_rows);
                prop_assert_eq!(outcome.errors.len(), bad_rows);
            }
        }
    }
}
