//! Validation outcome types.

use serde::{Deserialize, Serialize};

/// One field-level problem.
///
/// `field` is a dot-separated path for nested fields (`payment.status`);
/// `index` is the zero-based position of the offending row/id in the
/// caller's input, so errors map back to the source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            index: None,
        }
    }

    pub fn at_index(field: impl Into<String>, message: impl Into<String>, index: usize) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            index: Some(index),
        }
    }
}

/// Outcome of one validation call. Produced fresh per call; the flag and the
/// error list always agree because construction goes through
/// [`ValidationResult::ok`] / [`ValidationResult::from_errors`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Errors belonging to a given input row.
    pub fn errors_for_index(&self, index: usize) -> impl Iterator<Item = &ValidationError> {
        self.errors
            .iter()
            .filter(move |error| error.index == Some(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_agrees_with_error_list() {
        assert!(ValidationResult::ok().is_valid);
        assert!(ValidationResult::from_errors(Vec::new()).is_valid);

        let failed =
            ValidationResult::from_errors(vec![ValidationError::new("status", "bad status")]);
        assert!(!failed.is_valid);
        assert_eq!(failed.errors.len(), 1);
    }

    #[test]
    fn errors_filter_by_row_index() {
        let result = ValidationResult::from_errors(vec![
            ValidationError::at_index("customer_email", "Invalid email format", 0),
            ValidationError::at_index("status", "bad", 2),
            ValidationError::at_index("currency", "bad", 2),
        ]);
        assert_eq!(result.errors_for_index(0).count(), 1);
        assert_eq!(result.errors_for_index(1).count(), 0);
        assert_eq!(result.errors_for_index(2).count(), 2);
    }

    #[test]
    fn index_is_absent_from_wire_when_not_set() {
        let error = ValidationError::new("fields", "No fields to update");
        let json = serde_json::to_string(&error).unwrap();
        assert!(!json.contains("\"index\""));
    }
}
