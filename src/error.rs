//! Error handling for the binding layer.
//!
//! Native status codes and error strings are converted into [`OfficeError`]
//! before they leave the adapter, so no error value ever borrows native memory.

use std::fmt;

/// Status codes returned by the native `excel_*` entry points.
///
/// Codes the engine does not document are kept verbatim in [`StatusCode::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// Unclassified engine failure
    UnknownError,
    /// No error
    Success,
    /// Null or malformed argument
    InvalidArgument,
    /// Configuration buffer failed FlatBuffers verification
    FlatBufferError,
    /// Source file does not exist
    FileNotFound,
    /// Read/write failure inside the engine
    IoError,
    /// Any other raw code
    Other(i8),
}

impl StatusCode {
    /// Classify a raw status byte.
    pub fn from_raw(code: i8) -> Self {
        match code {
            -1 => StatusCode::UnknownError,
            0 => StatusCode::Success,
            1 => StatusCode::InvalidArgument,
            2 => StatusCode::FlatBufferError,
            3 => StatusCode::FileNotFound,
            4 => StatusCode::IoError,
            other => StatusCode::Other(other),
        }
    }

    /// The raw status byte as the engine reports it.
    pub fn as_raw(self) -> i8 {
        match self {
            StatusCode::UnknownError => -1,
            StatusCode::Success => 0,
            StatusCode::InvalidArgument => 1,
            StatusCode::FlatBufferError => 2,
            StatusCode::FileNotFound => 3,
            StatusCode::IoError => 4,
            StatusCode::Other(code) => code,
        }
    }

    pub fn is_success(self) -> bool {
        self == StatusCode::Success
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::UnknownError => f.write_str("unknown error (-1)"),
            StatusCode::Success => f.write_str("success (0)"),
            StatusCode::InvalidArgument => f.write_str("invalid argument (1)"),
            StatusCode::FlatBufferError => f.write_str("flatbuffer error (2)"),
            StatusCode::FileNotFound => f.write_str("file not found (3)"),
            StatusCode::IoError => f.write_str("io error (4)"),
            StatusCode::Other(code) => write!(f, "status {code}"),
        }
    }
}

/// Errors surfaced by the binding.
#[derive(Debug, thiserror::Error)]
pub enum OfficeError {
    /// The engine refused to create the document and said why.
    #[error("document creation failed ({status}): {message}")]
    CreationFailed { status: StatusCode, message: String },

    /// The engine refused to create the document without an error message.
    #[error("document creation failed ({status}) without an error message")]
    CreationFailedUnknown { status: StatusCode },

    /// An operation was attempted on an empty or already released document.
    #[error("cannot {operation}: document is not valid")]
    InvalidState { operation: &'static str },

    /// A call on a valid document failed and the engine said why.
    #[error("{operation} failed ({status}): {message}")]
    OperationFailed {
        operation: &'static str,
        status: StatusCode,
        message: String,
    },

    /// A call on a valid document failed without an error message.
    #[error("{operation} failed ({status}) without an error message")]
    OperationFailedUnknown {
        operation: &'static str,
        status: StatusCode,
    },

    /// The engine reported success but handed back a null pointer.
    #[error("{operation} reported success but returned a null handle")]
    NullHandle { operation: &'static str },

    /// An argument cannot cross the C boundary.
    #[error("invalid argument `{param}`: {reason}")]
    InvalidArgument { param: &'static str, reason: String },

    /// Malformed document properties.
    #[error("invalid document properties: {0}")]
    Config(String),

    /// The native library or one of its symbols could not be loaded.
    #[error("failed to load native library: {0}")]
    Load(String),
}

impl OfficeError {
    /// The status code the engine reported, if this error came from a native call.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            OfficeError::CreationFailed { status, .. }
            | OfficeError::CreationFailedUnknown { status }
            | OfficeError::OperationFailed { status, .. }
            | OfficeError::OperationFailedUnknown { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn invalid_state(operation: &'static str) -> Self {
        OfficeError::InvalidState { operation }
    }

    pub(crate) fn interior_nul(param: &'static str) -> Self {
        OfficeError::InvalidArgument {
            param,
            reason: "contains an interior NUL byte".to_string(),
        }
    }
}

impl From<serde_json::Error> for OfficeError {
    fn from(e: serde_json::Error) -> Self {
        OfficeError::Config(format!("JSON parse error: {e}"))
    }
}

impl From<flatbuffers::InvalidFlatbuffer> for OfficeError {
    fn from(e: flatbuffers::InvalidFlatbuffer) -> Self {
        OfficeError::Config(format!("FlatBuffers verification error: {e}"))
    }
}

impl From<libloading::Error> for OfficeError {
    fn from(e: libloading::Error) -> Self {
        OfficeError::Load(e.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OfficeError>;
