//! Raw boundary to the native engine.
//!
//! Every entry point returns an `i8` status and reports results through
//! out-parameters. Error messages written to `out_error` are allocated by the
//! engine. Engines that export `openxml_office_string_free` get them back
//! through it; the released engine exports no release function, so without it
//! the binding copies each message and leaks the native buffer.

use libc::{c_char, c_void, size_t};

pub type ExcelCreateFn = unsafe extern "C" fn(
    file_name: *const c_char,
    buffer: *const u8,
    buffer_size: size_t,
    out_excel: *mut *mut c_void,
    out_error: *mut *const c_char,
) -> i8;

pub type ExcelSaveAsFn = unsafe extern "C" fn(
    excel: *const c_void,
    file_name: *const c_char,
    out_error: *mut *const c_char,
) -> i8;

pub type ExcelSheetFn = unsafe extern "C" fn(
    excel: *const c_void,
    sheet_name: *const c_char,
    out_worksheet: *mut *mut c_void,
    out_error: *mut *const c_char,
) -> i8;

pub type ExcelRenameSheetFn = unsafe extern "C" fn(
    excel: *const c_void,
    old_sheet_name: *const c_char,
    new_sheet_name: *const c_char,
    out_error: *mut *const c_char,
) -> i8;

pub type ExcelHideSheetFn = unsafe extern "C" fn(
    excel: *const c_void,
    sheet_name: *const c_char,
    out_error: *mut *const c_char,
) -> i8;

pub type StringFreeFn = unsafe extern "C" fn(message: *mut c_char);

/// Table of native entry points.
///
/// A table is only as trustworthy as the functions in it: each pointer must
/// follow the calling contract documented on its type alias.
#[derive(Clone, Copy)]
pub struct NativeApi {
    pub excel_create: ExcelCreateFn,
    pub excel_save_as: ExcelSaveAsFn,
    pub excel_add_sheet: ExcelSheetFn,
    pub excel_get_sheet: ExcelSheetFn,
    pub excel_rename_sheet: ExcelRenameSheetFn,
    pub excel_hide_sheet: ExcelHideSheetFn,
    /// Optional: not exported by released engines.
    pub string_free: Option<StringFreeFn>,
}

impl std::fmt::Debug for NativeApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeApi")
            .field("excel_create", &(self.excel_create as *const c_void))
            .field("excel_save_as", &(self.excel_save_as as *const c_void))
            .field("string_free", &self.string_free.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "linked")]
mod linked {
    use libc::{c_char, c_void, size_t};

    #[link(name = "draviavemal_openxml_office_ffi")]
    unsafe extern "C" {
        pub fn excel_create(
            file_name: *const c_char,
            buffer: *const u8,
            buffer_size: size_t,
            out_excel: *mut *mut c_void,
            out_error: *mut *const c_char,
        ) -> i8;
        pub fn excel_save_as(
            excel: *const c_void,
            file_name: *const c_char,
            out_error: *mut *const c_char,
        ) -> i8;
        pub fn excel_add_sheet(
            excel: *const c_void,
            sheet_name: *const c_char,
            out_worksheet: *mut *mut c_void,
            out_error: *mut *const c_char,
        ) -> i8;
        pub fn excel_get_sheet(
            excel: *const c_void,
            sheet_name: *const c_char,
            out_worksheet: *mut *mut c_void,
            out_error: *mut *const c_char,
        ) -> i8;
        pub fn excel_rename_sheet(
            excel: *const c_void,
            old_sheet_name: *const c_char,
            new_sheet_name: *const c_char,
            out_error: *mut *const c_char,
        ) -> i8;
        pub fn excel_hide_sheet(
            excel: *const c_void,
            sheet_name: *const c_char,
            out_error: *mut *const c_char,
        ) -> i8;
    }
}

#[cfg(feature = "linked")]
impl NativeApi {
    /// Entry points of the engine linked at build time.
    ///
    /// The release function is left out: linking a symbol the engine does not
    /// export would fail the build, so linked messages are always leaked.
    pub fn linked() -> Self {
        Self {
            excel_create: linked::excel_create,
            excel_save_as: linked::excel_save_as,
            excel_add_sheet: linked::excel_add_sheet,
            excel_get_sheet: linked::excel_get_sheet,
            excel_rename_sheet: linked::excel_rename_sheet,
            excel_hide_sheet: linked::excel_hide_sheet,
            string_free: None,
        }
    }
}
