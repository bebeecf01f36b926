//! Utility functions for crossing the C boundary.

use crate::error::{OfficeError, Result, StatusCode};
use crate::sys::NativeApi;
use libc::c_char;
use std::ffi::{CStr, CString};
use std::path::Path;

/// Convert a path to a C string.
///
/// Fails if the path is not valid UTF-8 or contains a NUL byte; the engine
/// decodes paths as UTF-8.
pub fn path_to_cstring(path: &Path) -> Result<CString> {
    let s = path.to_str().ok_or_else(|| OfficeError::InvalidArgument {
        param: "path",
        reason: "not valid UTF-8".to_string(),
    })?;
    CString::new(s).map_err(|_| OfficeError::interior_nul("path"))
}

/// Convert a string argument to a C string.
pub fn str_to_cstring(s: &str, param_name: &'static str) -> Result<CString> {
    CString::new(s).map_err(|_| OfficeError::interior_nul(param_name))
}

/// Error message written by the engine into an `out_error` parameter.
///
/// Owns the native buffer and hands it back to `openxml_office_string_free`
/// on drop, so every exit path releases it exactly once. When the engine
/// exports no release function the buffer is leaked after the copy.
pub struct NativeMessage<'api> {
    ptr: *const c_char,
    api: &'api NativeApi,
}

impl<'api> NativeMessage<'api> {
    /// Take ownership of a message pointer. Null yields `None`.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a NUL-terminated string allocated by the engine
    /// behind `api` and not yet released.
    pub unsafe fn take(api: &'api NativeApi, ptr: *const c_char) -> Option<Self> {
        if ptr.is_null() {
            None
        } else {
            Some(Self { ptr, api })
        }
    }

    /// Copy the message into caller-owned memory.
    pub fn to_string_lossy(&self) -> String {
        unsafe { CStr::from_ptr(self.ptr) }
            .to_string_lossy()
            .into_owned()
    }
}

impl Drop for NativeMessage<'_> {
    fn drop(&mut self) {
        match self.api.string_free {
            Some(free) => unsafe { free(self.ptr as *mut c_char) },
            None => log::debug!("leaking native error message at {:p}", self.ptr),
        }
    }
}

/// Which family of errors a failed status maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Document creation; failures become `CreationFailed*`.
    Create,
    /// Any call on an existing document; failures become `OperationFailed*`.
    Operation(&'static str),
}

/// Turn a native status and error pointer into a `Result`.
///
/// The error pointer is released whether or not the status reports failure.
///
/// # Safety
///
/// `error` must satisfy the contract of [`NativeMessage::take`].
pub unsafe fn check_status(
    api: &NativeApi,
    kind: CallKind,
    status: i8,
    error: *const c_char,
) -> Result<()> {
    let message = unsafe { NativeMessage::take(api, error) };
    let status = StatusCode::from_raw(status);

    if status.is_success() {
        if let Some(message) = message {
            log::warn!(
                "native call reported success with an error message: {}",
                message.to_string_lossy()
            );
        }
        return Ok(());
    }
    if let StatusCode::Other(code) = status {
        log::warn!("native engine returned undocumented status {code}");
    }

    let message = message.map(|m| m.to_string_lossy());
    Err(match (kind, message) {
        (CallKind::Create, Some(message)) => OfficeError::CreationFailed { status, message },
        (CallKind::Create, None) => {
            log::warn!("document creation failed with {status} and no error message");
            OfficeError::CreationFailedUnknown { status }
        }
        (CallKind::Operation(operation), Some(message)) => OfficeError::OperationFailed {
            operation,
            status,
            message,
        },
        (CallKind::Operation(operation), None) => {
            log::warn!("{operation} failed with {status} and no error message");
            OfficeError::OperationFailedUnknown { operation, status }
        }
    })
}
