use std::fmt;
use serde::Serialize;
use thiserror::Error;

/// Lookups that came back empty
#[derive(Debug, Error, Clone, PartialEq, Serialize)]
pub enum NotFoundError {
    #[error("Child not found: {0}")]
    Child(String),

    #[error("Project not found: {0}")]
    Project(String),

    #[error("Screening #{number} not found")]
    Screening {
        number: u32,
    },

    #[error("No report generated for screening #{number}")]
    ScreeningReport {
        number: u32,
    },

    #[error("No touchpoint interventions target domain '{domain}'")]
    Interventions {
        domain: String,
    },
}

/// Domain-level errors
#[derive(Debug, Error, Clone, PartialEq, Serialize)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("Degenerate input: {field} must be greater than zero (got {value})")]
    DegenerateAge {
        field: String,
        value: f64,
    },

    #[error("Cannot compute over an empty set of {0}")]
    EmptyInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn degenerate_age(field: &str, value: f64) -> Self {
        Self::DegenerateAge {
            field: field.to_string(),
            value,
        }
    }

    pub fn empty_input(what: &str) -> Self {
        Self::EmptyInput(what.to_string())
    }

    /// True when the error is a lookup miss rather than bad input
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }
}

/// Service-level errors (application specific)
#[derive(Debug, Error, Clone, Serialize)]
pub enum ServiceError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Library not initialized")]
    NotInitialized,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ServiceError {
    fn from(error: ValidationError) -> Self {
        ServiceError::Domain(DomainError::Validation(error))
    }
}

impl From<NotFoundError> for ServiceError {
    fn from(error: NotFoundError) -> Self {
        ServiceError::Domain(DomainError::NotFound(error))
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(error: std::io::Error) -> Self {
        ServiceError::Export(format!("I/O error: {}", error))
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(error: serde_json::Error) -> Self {
        ServiceError::Export(format!("JSON serialization error: {}", error))
    }
}

impl From<csv::Error> for ServiceError {
    fn from(error: csv::Error) -> Self {
        ServiceError::Export(format!("CSV error: {}", error))
    }
}

/// Validation errors
#[derive(Debug, Error, Clone, PartialEq, Serialize)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    Required {
        field: String,
    },

    #[error("Field '{field}' must be at least {min} characters")]
    MinLength {
        field: String,
        min: usize,
    },

    #[error("Field '{field}' cannot exceed {max} characters")]
    MaxLength {
        field: String,
        max: usize,
    },

    #[error("Field '{field}' must be at least {min}")]
    Min {
        field: String,
        min: String,
    },

    #[error("Field '{field}' must be at most {max}")]
    Max {
        field: String,
        max: String,
    },

    #[error("Field '{field}' must be between {min} and {max}")]
    Range {
        field: String,
        min: String,
        max: String,
    },

    #[error("Field '{field}' contains invalid format: {reason}")]
    Format {
        field: String,
        reason: String,
    },

    #[error("Field '{field}' contains an invalid value: {reason}")]
    InvalidValue {
        field: String,
        reason: String,
    },

    #[error("Entity is invalid: {0}")]
    Entity(String),

    #[error("Validation error: {0}")]
    Custom(String),
}

impl ValidationError {
    pub fn required(field: &str) -> Self {
        Self::Required {
            field: field.to_string(),
        }
    }

    pub fn min_length(field: &str, min: usize) -> Self {
        Self::MinLength {
            field: field.to_string(),
            min,
        }
    }

    pub fn max_length(field: &str, max: usize) -> Self {
        Self::MaxLength {
            field: field.to_string(),
            max,
        }
    }

    pub fn min<T: fmt::Display>(field: &str, min: T) -> Self {
        Self::Min {
            field: field.to_string(),
            min: min.to_string(),
        }
    }

    pub fn max<T: fmt::Display>(field: &str, max: T) -> Self {
        Self::Max {
            field: field.to_string(),
            max: max.to_string(),
        }
    }

    pub fn range<T: fmt::Display>(field: &str, min: T, max: T) -> Self {
        Self::Range {
            field: field.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn format(field: &str, reason: &str) -> Self {
        Self::Format {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_value(field: &str, reason: &str) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn entity(message: &str) -> Self {
        Self::Entity(message.to_string())
    }

    pub fn custom(message: &str) -> Self {
        Self::Custom(message.to_string())
    }

    /// Name of the offending field, when the error is about one
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::Required { field }
            | ValidationError::MinLength { field, .. }
            | ValidationError::MaxLength { field, .. }
            | ValidationError::Min { field, .. }
            | ValidationError::Max { field, .. }
            | ValidationError::Range { field, .. }
            | ValidationError::Format { field, .. }
            | ValidationError::InvalidValue { field, .. } => Some(field),
            ValidationError::Entity(_) | ValidationError::Custom(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_field() {
        assert_eq!(ValidationError::required("name").field(), Some("name"));
        assert_eq!(ValidationError::range("score", 0, 100).field(), Some("score"));
        assert_eq!(ValidationError::custom("bad").field(), None);
    }

    #[test]
    fn test_error_messages() {
        let err = DomainError::degenerate_age("chronological_age_months", 0.0);
        assert_eq!(
            err.to_string(),
            "Degenerate input: chronological_age_months must be greater than zero (got 0)"
        );

        let err: DomainError = NotFoundError::Interventions { domain: "Cognitive Development".into() }.into();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Cognitive Development"));
    }

    #[test]
    fn test_service_error_conversions() {
        let err: ServiceError = ValidationError::required("child_id").into();
        assert!(matches!(err, ServiceError::Domain(DomainError::Validation(_))));

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing dir");
        let err: ServiceError = io.into();
        assert!(matches!(err, ServiceError::Export(_)));
    }
}
