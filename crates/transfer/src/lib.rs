//! Tabular (CSV) transcoding service.
//!
//! Bidirectional, lossy-by-design mapping between the order aggregate and a
//! flat one-row-per-order record for human-editable bulk interchange.
//! Export summarizes (item detail and address breakdown collapse into single
//! cells); import parses untrusted text into unvalidated rows and *always*
//! routes them through the bulk validation service before anything is
//! converted back toward the domain model.

pub mod error;
pub mod export;
pub mod import;

pub use error::TransferError;
pub use export::{CSV_HEADERS, export_orders_to_csv, flatten_order};
pub use import::{ImportOutcome, OrderPatch, convert_imported_rows, import_orders_from_csv};
