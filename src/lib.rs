//! Safe Rust bindings for the OpenXML Office native engine.
//!
//! The engine (`libdraviavemal_openxml_office_ffi`) owns the workbook model and
//! the file format. This crate marshals arguments across its C interface,
//! wraps the opaque pointers it returns, and turns status codes and error
//! strings into [`OfficeError`] values.
//!
//! ```no_run
//! use openxml_office::{Excel, ExcelProperties, OfficeLibrary};
//!
//! let engine = OfficeLibrary::from_env()?;
//! let mut book = Excel::blank(&engine, ExcelProperties::default())?;
//! book.add_sheet(Some("Data"))?;
//! book.save_as("book.xlsx")?;
//! # Ok::<(), openxml_office::OfficeError>(())
//! ```
//!
//! # Thread Safety
//!
//! [`Excel`] and [`Worksheet`] are NOT `Send` or `Sync`. All operations on a
//! document must occur from the thread that created it, or external
//! synchronization must be provided. [`OfficeLibrary`] may be shared freely.
//!
//! # Memory Management
//!
//! - Workbooks are owned by the engine. `save_as` hands the workbook back to
//!   the engine, which releases it; the [`Excel`] value is invalid afterwards.
//!   The engine has no other release entry point, so a workbook that is never
//!   saved stays allocated until the process exits.
//! - Error messages written by the engine are copied into an owned `String`
//!   and then released with `openxml_office_string_free`, on every path, when
//!   the engine exports it. Released engines do not, and neither does a
//!   `linked` build; there the native buffer is intentionally leaked after
//!   the copy (one small allocation per failed call).
//! - Paths, names and the properties buffer are copied into Rust-owned
//!   C-compatible buffers that live only for the duration of the call.
//!
//! # Feature Flags
//!
//! - `linked`: link against the engine at build time and enable
//!   [`OfficeLibrary::linked`]. Set `OPENXML_OFFICE_LIB_DIR` if the library is
//!   not on the default search path.
//!
//! Without it, load the engine at runtime with [`OfficeLibrary::load`] or
//! [`OfficeLibrary::from_env`] (`OPENXML_OFFICE_LIBRARY`).

#![allow(clippy::missing_safety_doc)]

mod config;
mod error;
mod handle;
mod library;
mod lifecycle;
mod mutation;
pub mod sys;
mod util;

#[cfg(test)]
mod mock;

pub use config::{ExcelProperties, PROPERTIES_IDENTIFIER};
pub use error::{OfficeError, Result, StatusCode};
pub use handle::{DocumentState, Excel, NativeHandle, Worksheet};
pub use library::{OfficeLibrary, LIBRARY_ENV};

/// Version of this binding crate (e.g., "0.1.0").
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
