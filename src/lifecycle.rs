//! Lifecycle management (create, save).

use crate::config::ExcelProperties;
use crate::error::{OfficeError, Result};
use crate::handle::{DocumentState, Excel, NativeHandle};
use crate::library::OfficeLibrary;
use crate::util::{check_status, path_to_cstring, CallKind};
use libc::{c_char, c_void};
use std::path::Path;
use std::sync::Arc;

impl Excel {
    /// Create a workbook in the native engine.
    ///
    /// # Parameters
    ///
    /// - `library`: Engine to create the workbook in
    /// - `file_name`: Existing file to open, or `None` for a blank workbook
    /// - `properties`: Engine options, sent as a FlatBuffers message
    ///
    /// # Errors
    ///
    /// - `CreationFailed` when the engine rejects the call with a message
    /// - `CreationFailedUnknown` when it rejects the call without one
    /// - `NullHandle` when it reports success without a workbook
    /// - `InvalidArgument` when `file_name` cannot cross the C boundary
    pub fn create(
        library: &Arc<OfficeLibrary>,
        file_name: Option<&Path>,
        properties: ExcelProperties,
    ) -> Result<Self> {
        let api = library.api();
        // Both copies live until the end of this frame, covering the native call.
        let file_name = file_name.map(path_to_cstring).transpose()?;
        let buffer = properties.encode();

        let mut out_excel: *mut c_void = std::ptr::null_mut();
        let mut out_error: *const c_char = std::ptr::null();
        let status = unsafe {
            (api.excel_create)(
                file_name.as_ref().map_or(std::ptr::null(), |f| f.as_ptr()),
                buffer.as_ptr(),
                buffer.len(),
                &mut out_excel,
                &mut out_error,
            )
        };
        unsafe { check_status(api, CallKind::Create, status, out_error) }?;

        let handle = NativeHandle::from_raw(out_excel).ok_or(OfficeError::NullHandle {
            operation: "create",
        })?;
        log::debug!(
            "created workbook {:#x} (in_memory={}, editable={})",
            handle.addr(),
            properties.is_in_memory,
            properties.is_editable
        );

        Ok(Self {
            state: DocumentState::Valid(handle),
            library: Some(Arc::clone(library)),
        })
    }

    /// Create a blank workbook.
    pub fn blank(library: &Arc<OfficeLibrary>, properties: ExcelProperties) -> Result<Self> {
        Self::create(library, None, properties)
    }

    /// Open an existing workbook file.
    pub fn open(
        library: &Arc<OfficeLibrary>,
        path: impl AsRef<Path>,
        properties: ExcelProperties,
    ) -> Result<Self> {
        Self::create(library, Some(path.as_ref()), properties)
    }

    /// Write the workbook to `path`.
    ///
    /// The engine consumes the workbook during this call whatever the outcome,
    /// so the document is invalid afterwards.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let (handle, library) = self.live("save")?;
        let file_name = path_to_cstring(path.as_ref())?;
        let api = library.api();

        let mut out_error: *const c_char = std::ptr::null();
        let status =
            unsafe { (api.excel_save_as)(handle.as_ptr(), file_name.as_ptr(), &mut out_error) };
        self.state = DocumentState::Invalid;

        unsafe { check_status(api, CallKind::Operation("save"), status, out_error) }?;
        log::debug!(
            "saved workbook {:#x} to {}",
            handle.addr(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// The live handle and engine, or `InvalidState` for `operation`.
    pub(crate) fn live(
        &self,
        operation: &'static str,
    ) -> Result<(NativeHandle, Arc<OfficeLibrary>)> {
        match (self.state, &self.library) {
            (DocumentState::Valid(handle), Some(library)) => Ok((handle, Arc::clone(library))),
            _ => Err(OfficeError::invalid_state(operation)),
        }
    }
}

impl Drop for Excel {
    fn drop(&mut self) {
        // The engine has no destroy entry point; only `save_as` releases a workbook.
        if let DocumentState::Valid(handle) = self.state {
            log::debug!("dropping unsaved workbook {:#x}", handle.addr());
        }
    }
}
