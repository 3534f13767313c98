//! Unvalidated imported row.
//!
//! CSV content is untrusted text, so every cell stays a `String` until the
//! validation pass has looked at it. This type is deliberately distinct from
//! any domain-adjacent patch type - code that wants typed values has to go
//! through validation and conversion, never around them.

use serde::{Deserialize, Serialize};

/// One parsed-but-unvalidated tabular row. Field names double as the CSV
/// column headers. Missing cells deserialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedOrderRow {
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub total_amount: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub shipping_method: String,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub tracking_number: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub item_count: String,
    #[serde(default)]
    pub products: String,
}
