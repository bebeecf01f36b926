//! Locating the native engine.
//!
//! The engine can be linked at build time (`linked` feature) or loaded at
//! runtime with `libloading`. Either way the result is an [`OfficeLibrary`]
//! that documents keep alive through an `Arc`.

use crate::error::{OfficeError, Result};
use crate::sys::{
    ExcelCreateFn, ExcelHideSheetFn, ExcelRenameSheetFn, ExcelSaveAsFn, ExcelSheetFn, NativeApi,
    StringFreeFn,
};
use libloading::Library;
use std::path::Path;
use std::sync::Arc;

/// Environment variable naming the engine's shared library for [`OfficeLibrary::from_env`].
pub const LIBRARY_ENV: &str = "OPENXML_OFFICE_LIBRARY";

/// A loaded native engine.
#[derive(Debug)]
pub struct OfficeLibrary {
    api: NativeApi,
    // Keeps the symbols in `api` mapped; must outlive every call through them.
    _library: Option<Library>,
}

impl OfficeLibrary {
    /// Wrap an explicit function table.
    ///
    /// # Safety
    ///
    /// Every pointer in `api` must implement the contract of the matching
    /// native entry point, and must stay callable for the life of the
    /// returned library.
    pub unsafe fn from_api(api: NativeApi) -> Arc<Self> {
        Arc::new(Self {
            api,
            _library: None,
        })
    }

    /// The engine linked at build time.
    #[cfg(feature = "linked")]
    pub fn linked() -> Arc<Self> {
        Arc::new(Self {
            api: NativeApi::linked(),
            _library: None,
        })
    }

    /// Load the engine from a shared library on disk.
    ///
    /// All `excel_*` entry points are resolved up front; a missing one fails the
    /// load instead of the first call that needs it. `openxml_office_string_free`
    /// is optional.
    pub fn load(path: impl AsRef<Path>) -> Result<Arc<Self>> {
        let path = path.as_ref();
        log::debug!("loading OpenXML Office engine from {}", path.display());

        // Initialisers of the engine run here; there is nothing to check them against.
        let library = unsafe { Library::new(path) }
            .map_err(|e| OfficeError::Load(format!("{}: {e}", path.display())))?;

        let api = unsafe {
            NativeApi {
                excel_create: symbol::<ExcelCreateFn>(&library, "excel_create")?,
                excel_save_as: symbol::<ExcelSaveAsFn>(&library, "excel_save_as")?,
                excel_add_sheet: symbol::<ExcelSheetFn>(&library, "excel_add_sheet")?,
                excel_get_sheet: symbol::<ExcelSheetFn>(&library, "excel_get_sheet")?,
                excel_rename_sheet: symbol::<ExcelRenameSheetFn>(
                    &library,
                    "excel_rename_sheet",
                )?,
                excel_hide_sheet: symbol::<ExcelHideSheetFn>(&library, "excel_hide_sheet")?,
                string_free: library
                    .get::<StringFreeFn>(b"openxml_office_string_free\0")
                    .ok()
                    .map(|sym| *sym),
            }
        };

        if api.string_free.is_none() {
            log::debug!("engine exports no string release function; error messages will leak");
        }

        Ok(Arc::new(Self {
            api,
            _library: Some(library),
        }))
    }

    /// Load the engine from the path in `OPENXML_OFFICE_LIBRARY`.
    pub fn from_env() -> Result<Arc<Self>> {
        match std::env::var_os(LIBRARY_ENV) {
            Some(path) if !path.is_empty() => Self::load(path),
            _ => Err(OfficeError::Load(format!("{LIBRARY_ENV} is not set"))),
        }
    }

    pub fn api(&self) -> &NativeApi {
        &self.api
    }

    /// Whether the engine was loaded at runtime rather than linked or supplied.
    pub fn is_dynamic(&self) -> bool {
        self._library.is_some()
    }
}

/// Resolve one symbol and copy the function pointer out of the library.
///
/// # Safety
///
/// `T` must be the exact function pointer type the symbol was exported with.
unsafe fn symbol<T: Copy>(library: &Library, name: &str) -> Result<T> {
    let mut name_z = Vec::with_capacity(name.len() + 1);
    name_z.extend_from_slice(name.as_bytes());
    name_z.push(0);

    let sym = unsafe { library.get::<T>(&name_z) }
        .map_err(|e| OfficeError::Load(format!("symbol `{name}`: {e}")))?;
    Ok(*sym)
}
