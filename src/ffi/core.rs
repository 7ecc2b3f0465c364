// ============================================================================
// Core FFI functions for library initialization and management
// ============================================================================

use crate::domains::settings::MetricsConfig;
use crate::ffi::{handle_status_result, FFIResult, error::FFIError};
use std::ffi::{c_char, CStr, CString};
use std::os::raw::c_int;

/// Initialize the library. `config_json` may be null, in which case the
/// configuration is read from `CARENGROW_*` environment variables.
/// Returns 0 on success, non-zero on error
#[unsafe(no_mangle)]
pub unsafe extern "C" fn initialize_library(config_json: *const c_char) -> c_int {
    let result = std::panic::catch_unwind(|| -> FFIResult<()> {
        let config = if config_json.is_null() {
            MetricsConfig::from_env()?
        } else {
            let s = unsafe { CStr::from_ptr(config_json) }
                .to_str()
                .map_err(|_| FFIError::invalid_argument("Invalid config string"))?;
            serde_json::from_str::<MetricsConfig>(s).map_err(FFIError::invalid_json)?
        };
        crate::globals::initialize(config).map_err(FFIError::from_service_error)
    });

    match result {
        Ok(ffi_result) => handle_status_result(|| ffi_result),
        Err(panic_payload) => {
            let panic_msg = if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = panic_payload.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Panicked during FFI call, but panic message is not a string".to_string()
            };
            log::error!("[FFI] panic in initialize_library: {}", panic_msg);
            handle_status_result(|| Err(FFIError::internal(format!("Panic during initialization: {}", panic_msg))))
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn is_library_initialized() -> bool {
    crate::globals::is_initialized()
}

/// Frees a C string that was allocated by Rust and passed over FFI.
/// Every string handed out by this library must come back through here.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        let _ = unsafe { CString::from_raw(ptr) };
    }
}

/// Returns allocated string that must be freed with free_string()
#[unsafe(no_mangle)]
pub extern "C" fn get_library_version() -> *mut c_char {
    CString::new(env!("CARGO_PKG_VERSION")).map_or(std::ptr::null_mut(), |c| c.into_raw())
}

/// Get last error from thread-local storage as JSON
/// Returns allocated string that must be freed with free_string(), or null if no error
#[unsafe(no_mangle)]
pub extern "C" fn get_last_error() -> *mut c_char {
    crate::ffi::error::get_last_error_message()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::error::ErrorCode;

    #[test]
    fn test_version_string() {
        let ptr = get_library_version();
        let version = unsafe { CString::from_raw(ptr) }.into_string().unwrap();
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_initialize_with_json_config() {
        let config = CString::new(r#"{"dq_growth_target": 25.0, "report_validity_days": 30}"#).unwrap();
        let code = unsafe { initialize_library(config.as_ptr()) };
        assert_eq!(code, ErrorCode::Success as c_int);
        assert!(is_library_initialized());
        assert!(get_last_error().is_null());
    }

    #[test]
    fn test_initialize_rejects_bad_json() {
        let config = CString::new("{not json").unwrap();
        let code = unsafe { initialize_library(config.as_ptr()) };
        assert_eq!(code, ErrorCode::InvalidJson as c_int);

        let err = get_last_error();
        assert!(!err.is_null());
        let json = unsafe { CString::from_raw(err) }.into_string().unwrap();
        assert!(json.contains("InvalidJson"));
    }

    #[test]
    fn test_free_string_accepts_null() {
        unsafe { free_string(std::ptr::null_mut()) };
    }
}
