//! Workbook mutation (sheets).
//!
//! Every operation here requires a valid document and fails with
//! `OfficeError::InvalidState` otherwise, before any native call.

use crate::error::{OfficeError, Result};
use crate::handle::{Excel, NativeHandle, Worksheet};
use crate::util::{check_status, str_to_cstring, CallKind};
use libc::{c_char, c_void};

impl Excel {
    /// Append a worksheet. With `None` the engine picks the name.
    pub fn add_sheet(&mut self, name: Option<&str>) -> Result<Worksheet<'_>> {
        const OP: &str = "add sheet";
        let (handle, library) = self.live(OP)?;
        let c_name = name.map(|n| str_to_cstring(n, "sheet_name")).transpose()?;
        let api = library.api();

        let mut out_worksheet: *mut c_void = std::ptr::null_mut();
        let mut out_error: *const c_char = std::ptr::null();
        let status = unsafe {
            (api.excel_add_sheet)(
                handle.as_ptr(),
                c_name.as_ref().map_or(std::ptr::null(), |n| n.as_ptr()),
                &mut out_worksheet,
                &mut out_error,
            )
        };
        unsafe { check_status(api, CallKind::Operation(OP), status, out_error) }?;

        let sheet = NativeHandle::from_raw(out_worksheet)
            .ok_or(OfficeError::NullHandle { operation: OP })?;
        Ok(Worksheet::new(sheet, name.map(str::to_owned)))
    }

    /// Look up an existing worksheet by name.
    pub fn sheet(&mut self, name: &str) -> Result<Worksheet<'_>> {
        const OP: &str = "get sheet";
        let (handle, library) = self.live(OP)?;
        let c_name = str_to_cstring(name, "sheet_name")?;
        let api = library.api();

        let mut out_worksheet: *mut c_void = std::ptr::null_mut();
        let mut out_error: *const c_char = std::ptr::null();
        let status = unsafe {
            (api.excel_get_sheet)(
                handle.as_ptr(),
                c_name.as_ptr(),
                &mut out_worksheet,
                &mut out_error,
            )
        };
        unsafe { check_status(api, CallKind::Operation(OP), status, out_error) }?;

        let sheet = NativeHandle::from_raw(out_worksheet)
            .ok_or(OfficeError::NullHandle { operation: OP })?;
        Ok(Worksheet::new(sheet, Some(name.to_owned())))
    }

    pub fn rename_sheet(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        const OP: &str = "rename sheet";
        let (handle, library) = self.live(OP)?;
        let old = str_to_cstring(old_name, "old_sheet_name")?;
        let new = str_to_cstring(new_name, "new_sheet_name")?;
        let api = library.api();

        let mut out_error: *const c_char = std::ptr::null();
        let status = unsafe {
            (api.excel_rename_sheet)(handle.as_ptr(), old.as_ptr(), new.as_ptr(), &mut out_error)
        };
        unsafe { check_status(api, CallKind::Operation(OP), status, out_error) }
    }

    pub fn hide_sheet(&mut self, name: &str) -> Result<()> {
        const OP: &str = "hide sheet";
        let (handle, library) = self.live(OP)?;
        let c_name = str_to_cstring(name, "sheet_name")?;
        let api = library.api();

        let mut out_error: *const c_char = std::ptr::null();
        let status =
            unsafe { (api.excel_hide_sheet)(handle.as_ptr(), c_name.as_ptr(), &mut out_error) };
        unsafe { check_status(api, CallKind::Operation(OP), status, out_error) }
    }
}
