//! Transcoding failures.
//!
//! These cover the mechanics of reading/writing delimited text. Bad *cell
//! values* are not errors here - they surface through `ValidationResult`s so
//! an import can report every offending row.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    /// Malformed delimited text or a record that does not fit the column set.
    #[error("csv processing failed: {0}")]
    Csv(#[from] csv::Error),

    /// The export writer's buffer could not be recovered after flushing.
    #[error("csv writer buffer could not be recovered: {0}")]
    WriterRecovery(String),

    /// Exported bytes were not valid UTF-8.
    #[error("exported csv was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
