use thiserror::Error;

use crate::domain::payment::PaymentStatus;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("validation failed: {}", violations.join("; "))]
    Validation { violations: Vec<String> },
    #[error("invalid payment transition from {from:?} to {attempted:?}: requires one of {required:?}")]
    InvalidPaymentTransition {
        from: PaymentStatus,
        attempted: PaymentStatus,
        required: Vec<PaymentStatus>,
    },
}

impl DomainError {
    pub fn validation(violation: impl Into<String>) -> Self {
        Self::Validation { violations: vec![violation.into()] }
    }

    /// Flatten into the individual violation messages. Non-validation errors
    /// collapse to a single rendered message.
    pub fn into_violations(self) -> Vec<String> {
        match self {
            Self::Validation { violations } => violations,
            other => vec![other.to_string()],
        }
    }
}

/// Uniform error shape the layers above the core translate into.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorReport {
    pub success: bool,
    pub errors: Vec<String>,
}

impl From<DomainError> for ErrorReport {
    fn from(error: DomainError) -> Self {
        Self { success: false, errors: error.into_violations() }
    }
}

#[cfg(test)]
mod tests {
    use super::{DomainError, ErrorReport};

    #[test]
    fn validation_error_keeps_every_violation() {
        let error = DomainError::Validation {
            violations: vec!["name is empty".to_string(), "prompt is empty".to_string()],
        };

        let report = ErrorReport::from(error);
        assert!(!report.success);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn validation_display_joins_violations() {
        let error =
            DomainError::Validation { violations: vec!["a".to_string(), "b".to_string()] };
        assert_eq!(error.to_string(), "validation failed: a; b");
    }
}
