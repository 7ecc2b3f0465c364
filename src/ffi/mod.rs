use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use crate::ffi::error::{set_last_error, clear_last_error, ErrorCode, FFIError};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod core;
pub mod error;
pub mod report;

pub use error::FFIResult;

/// Error handling helper for FFI boundaries (returns error code).
/// Failures are kept for `get_last_error` on the calling thread.
pub fn handle_status_result<F>(func: F) -> c_int
where
    F: FnOnce() -> FFIResult<()>,
{
    match func() {
        Ok(_) => {
            clear_last_error();
            ErrorCode::Success as c_int
        }
        Err(e) => {
            log::error!(
                "[FFI] {}: {} ({})",
                e.code,
                e.message,
                e.details.as_deref().unwrap_or("no details")
            );
            set_last_error(&e);
            e.code as c_int
        }
    }
}

macro_rules! ensure_ptr {
    ($p:expr) => {
        if $p.is_null() {
            return Err($crate::ffi::error::FFIError::null_pointer(stringify!($p)));
        }
    };
}
pub(crate) use ensure_ptr;

/// Reads a JSON payload from a C string
///
/// # Safety
/// `payload` must be a valid, NUL-terminated C string.
pub unsafe fn parse_payload<T: DeserializeOwned>(payload: *const c_char) -> FFIResult<T> {
    ensure_ptr!(payload);
    let s = unsafe { CStr::from_ptr(payload) }
        .to_str()
        .map_err(|_| FFIError::new(ErrorCode::InvalidUtf8, "Payload is not valid UTF-8"))?;
    serde_json::from_str(s).map_err(FFIError::invalid_json)
}

/// Serializes `value` and hands ownership of the string to the caller
///
/// # Safety
/// `result` must point to writable storage for one pointer.
pub unsafe fn write_json_result<T: Serialize>(value: &T, result: *mut *mut c_char) -> FFIResult<()> {
    ensure_ptr!(result);
    let json = serde_json::to_string(value)
        .map_err(|e| FFIError::internal(format!("Failed to serialize result: {}", e)))?;
    let c_string = CString::new(json)?;
    unsafe { *result = c_string.into_raw() };
    Ok(())
}
