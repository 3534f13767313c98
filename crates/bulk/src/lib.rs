//! Bulk validation service.
//!
//! Gatekeeper for every multi-order mutation (batch field edit, bulk status
//! change, bulk delete) and for every imported tabular row, before any
//! persistence or domain-model conversion is attempted.
//!
//! Nothing here throws for bad *input data*: structural and vocabulary
//! problems are collected into a [`ValidationResult`] so a batch always runs
//! to completion and the caller can report every offending field/row at
//! once. All functions are stateless and side-effect-free; calling them
//! twice on the same input yields identical results.

pub mod result;
pub mod row;
pub mod validation;

pub use result::{ValidationError, ValidationResult};
pub use row::ImportedOrderRow;
pub use validation::{
    NOTES_MAX_LEN, TRACKING_NUMBER_MAX_LEN, validate_batch_edit, validate_bulk_delete,
    validate_imported_rows, validate_status_update,
};
