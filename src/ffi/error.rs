use crate::errors::{DomainError, NotFoundError, ServiceError, ValidationError};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::ffi::CString;
use std::fmt;
use std::os::raw::c_char;

/// Error codes for FFI boundary
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Success (no error)
    Success = 0,

    // General errors (1-99)
    Unknown = 1,
    InvalidArgument = 2,
    NullPointer = 3,
    InvalidUtf8 = 4,
    InvalidJson = 5,
    InternalError = 6,

    // Domain errors (200-299)
    DomainGeneral = 200,
    EntityNotFound = 201,
    ValidationFailed = 202,
    DegenerateInput = 203,
    EmptyInput = 204,
    ScreeningReportUnavailable = 205,
    InterventionsNotFound = 206,

    // Service errors (300-399)
    ServiceGeneral = 300,
    NotInitialized = 301,
    ConfigurationError = 302,

    // Export errors (500-599)
    ExportGeneral = 500,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, *self as i32)
    }
}

/// Error type for FFI boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FFIError {
    /// Error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details (JSON string)
    pub details: Option<String>,
}

impl fmt::Display for FFIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(details) = &self.details {
            write!(f, "{}: {} ({})", self.code, self.message, details)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for FFIError {}

impl FFIError {
    pub fn new(code: ErrorCode, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
            details: None,
        }
    }

    pub fn with_details(code: ErrorCode, message: &str, details: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
            details: Some(details.to_string()),
        }
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    pub fn null_pointer(name: &str) -> Self {
        Self::new(ErrorCode::NullPointer, &format!("Null pointer provided for {}", name))
    }

    pub fn invalid_json(err: serde_json::Error) -> Self {
        Self::new(ErrorCode::InvalidJson, &format!("Invalid JSON payload: {}", err))
    }

    pub fn internal(message: String) -> Self {
        Self::new(ErrorCode::InternalError, &message)
    }

    pub fn from_service_error(err: ServiceError) -> Self {
        err.into()
    }
}

/// Serialized form of a structured error, used as the `details` payload
fn details_of<T: Serialize>(value: &T) -> Option<String> {
    serde_json::to_string(value).ok()
}

impl From<ValidationError> for FFIError {
    fn from(err: ValidationError) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: err.to_string(),
            details: details_of(&err),
        }
    }
}

impl From<NotFoundError> for FFIError {
    fn from(err: NotFoundError) -> Self {
        let code = match &err {
            NotFoundError::ScreeningReport { .. } => ErrorCode::ScreeningReportUnavailable,
            NotFoundError::Interventions { .. } => ErrorCode::InterventionsNotFound,
            _ => ErrorCode::EntityNotFound,
        };
        Self {
            code,
            message: err.to_string(),
            details: details_of(&err),
        }
    }
}

impl From<DomainError> for FFIError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::Validation(validation) => validation.into(),
            DomainError::NotFound(not_found) => not_found.into(),
            DomainError::DegenerateAge { field, value } => Self::with_details(
                ErrorCode::DegenerateInput,
                &message,
                &serde_json::json!({ "field": field, "value": value }).to_string(),
            ),
            DomainError::EmptyInput(_) => Self::new(ErrorCode::EmptyInput, &message),
            DomainError::Internal(msg) => Self::internal(msg),
        }
    }
}

impl From<ServiceError> for FFIError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err {
            ServiceError::Domain(domain) => domain.into(),
            ServiceError::Export(_) => Self::new(ErrorCode::ExportGeneral, &message),
            ServiceError::Configuration(_) => Self::new(ErrorCode::ConfigurationError, &message),
            ServiceError::NotInitialized => Self::new(
                ErrorCode::NotInitialized,
                "Library not initialized; call initialize_library first",
            ),
            ServiceError::Internal(msg) => Self::internal(msg),
        }
    }
}

impl From<std::ffi::NulError> for FFIError {
    fn from(_: std::ffi::NulError) -> Self {
        Self::new(ErrorCode::InvalidUtf8, "String contains null bytes, cannot create CString")
    }
}

thread_local! {
    static LAST_ERROR: RefCell<Option<FFIError>> = const { RefCell::new(None) };
}

pub fn set_last_error(error: &FFIError) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(error.clone()));
}

pub fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

pub fn last_error() -> Option<FFIError> {
    LAST_ERROR.with(|slot| slot.borrow().clone())
}

/// Last error on this thread as a JSON C string, or null when there is none
pub fn get_last_error_message() -> *mut c_char {
    let Some(error) = last_error() else {
        return std::ptr::null_mut();
    };
    let json = serde_json::to_string(&error).unwrap_or_else(|_| error.message.clone());
    CString::new(json).map_or(std::ptr::null_mut(), |c| c.into_raw())
}

// Result type alias for FFI functions
pub type FFIResult<T> = Result<T, FFIError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_by_layer() {
        let degenerate: FFIError = DomainError::degenerate_age("chronological_age_months", 0.0).into();
        assert_eq!(degenerate.code, ErrorCode::DegenerateInput);
        assert_eq!(degenerate.code as i32, 203);

        let missing: FFIError = ServiceError::from(NotFoundError::Child("x".to_string())).into();
        assert_eq!(missing.code, ErrorCode::EntityNotFound);

        let report: FFIError = ServiceError::from(NotFoundError::ScreeningReport { number: 3 }).into();
        assert_eq!(report.code as i32, 205);

        let uninit: FFIError = ServiceError::NotInitialized.into();
        assert_eq!(uninit.code as i32, 301);

        let export: FFIError = ServiceError::Export("disk full".to_string()).into();
        assert_eq!(export.code as i32, 500);
    }

    #[test]
    fn test_validation_details_carry_field() {
        let err: FFIError = ValidationError::range("score", 0, 100).into();
        let details: serde_json::Value = serde_json::from_str(err.details.as_deref().unwrap()).unwrap();
        assert_eq!(details["Range"]["field"], "score");
    }

    #[test]
    fn test_last_error_is_thread_local() {
        clear_last_error();
        assert!(last_error().is_none());
        assert!(get_last_error_message().is_null());

        set_last_error(&FFIError::invalid_argument("bad"));
        assert_eq!(last_error().map(|e| e.code), Some(ErrorCode::InvalidArgument));

        let other = std::thread::spawn(|| last_error().is_none()).join().unwrap();
        assert!(other);

        let ptr = get_last_error_message();
        assert!(!ptr.is_null());
        let json = unsafe { CString::from_raw(ptr) }.into_string().unwrap();
        assert!(json.contains("InvalidArgument"));
        clear_last_error();
    }
}
