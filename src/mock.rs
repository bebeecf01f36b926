//! In-process stand-in for the native engine, used by unit tests.
//!
//! Every entry point has the engine's exact C signature. Behaviour is driven
//! by a thread-local [`Reply`], and calls are recorded per thread so tests
//! running in parallel do not see each other. Error messages are counted on
//! allocation and release to catch leaks across the boundary.

use crate::config::ExcelProperties;
use crate::library::OfficeLibrary;
use crate::sys::NativeApi;
use libc::{c_char, c_void, size_t};
use std::cell::{Cell, RefCell};
use std::ffi::{CStr, CString};
use std::sync::Arc;

/// What the next native call reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: i8,
    /// Address written to the out-handle parameter (0 leaves it null).
    pub handle: usize,
    pub message: Option<String>,
}

impl Reply {
    pub fn ok() -> Self {
        Self {
            status: 0,
            handle: 0,
            message: None,
        }
    }

    pub fn handle(addr: usize) -> Self {
        Self {
            status: 0,
            handle: addr,
            message: None,
        }
    }

    pub fn error(status: i8, message: Option<&str>) -> Self {
        Self {
            status,
            handle: 0,
            message: message.map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCall {
    pub file_name: Option<String>,
    pub properties: ExcelProperties,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetCall {
    Add { excel: usize, name: Option<String> },
    Get { excel: usize, name: String },
    Rename { excel: usize, old: String, new: String },
    Hide { excel: usize, name: String },
}

thread_local! {
    static REPLY: RefCell<Reply> = RefCell::new(Reply::ok());
    static CALLS: Cell<usize> = const { Cell::new(0) };
    static ALLOCATED: Cell<usize> = const { Cell::new(0) };
    static FREED: Cell<usize> = const { Cell::new(0) };
    static LAST_CREATE: RefCell<Option<CreateCall>> = const { RefCell::new(None) };
    static LAST_SAVE: RefCell<Option<(usize, String)>> = const { RefCell::new(None) };
    static LAST_SHEET: RefCell<Option<SheetCall>> = const { RefCell::new(None) };
}

/// Clear recorded calls and counters for the current thread.
pub fn reset() {
    REPLY.with(|r| *r.borrow_mut() = Reply::ok());
    CALLS.with(|c| c.set(0));
    ALLOCATED.with(|c| c.set(0));
    FREED.with(|c| c.set(0));
    LAST_CREATE.with(|c| *c.borrow_mut() = None);
    LAST_SAVE.with(|c| *c.borrow_mut() = None);
    LAST_SHEET.with(|c| *c.borrow_mut() = None);
}

pub fn set_reply(reply: Reply) {
    REPLY.with(|r| *r.borrow_mut() = reply);
}

pub fn native_calls() -> usize {
    CALLS.with(Cell::get)
}

pub fn freed_messages() -> usize {
    FREED.with(Cell::get)
}

/// Error messages handed out but not yet released.
pub fn outstanding_messages() -> usize {
    ALLOCATED.with(Cell::get) - FREED.with(Cell::get)
}

pub fn last_create() -> Option<CreateCall> {
    LAST_CREATE.with(|c| c.borrow().clone())
}

pub fn last_save() -> Option<(usize, String)> {
    LAST_SAVE.with(|c| c.borrow().clone())
}

pub fn last_sheet_call() -> Option<SheetCall> {
    LAST_SHEET.with(|c| c.borrow().clone())
}

/// Allocate an error message the way the engine does.
pub fn alloc_message(text: &str) -> *const c_char {
    ALLOCATED.with(|c| c.set(c.get() + 1));
    CString::new(text)
        .map(CString::into_raw)
        .unwrap_or(std::ptr::null_mut())
}

pub fn api() -> NativeApi {
    NativeApi {
        excel_create: mock_excel_create,
        excel_save_as: mock_excel_save_as,
        excel_add_sheet: mock_excel_add_sheet,
        excel_get_sheet: mock_excel_get_sheet,
        excel_rename_sheet: mock_excel_rename_sheet,
        excel_hide_sheet: mock_excel_hide_sheet,
        string_free: Some(mock_string_free),
    }
}

pub fn library() -> Arc<OfficeLibrary> {
    unsafe { OfficeLibrary::from_api(api()) }
}

/// The table a released engine yields: no string release function.
pub fn library_without_free() -> Arc<OfficeLibrary> {
    let api = NativeApi {
        string_free: None,
        ..api()
    };
    unsafe { OfficeLibrary::from_api(api) }
}

unsafe fn opt_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }
}

/// Count the call and write the current reply's error message, if any.
unsafe fn respond(out_error: *mut *const c_char) -> Reply {
    CALLS.with(|c| c.set(c.get() + 1));
    let reply = REPLY.with(|r| r.borrow().clone());
    if let Some(message) = &reply.message {
        unsafe { *out_error = alloc_message(message) };
    }
    reply
}

unsafe extern "C" fn mock_excel_create(
    file_name: *const c_char,
    buffer: *const u8,
    buffer_size: size_t,
    out_excel: *mut *mut c_void,
    out_error: *mut *const c_char,
) -> i8 {
    if buffer.is_null() || buffer_size == 0 {
        return 1;
    }
    let bytes = unsafe { std::slice::from_raw_parts(buffer, buffer_size) };
    let properties = match ExcelProperties::decode(bytes) {
        Ok(p) => p,
        Err(e) => {
            unsafe { *out_error = alloc_message(&e.to_string()) };
            return 2;
        }
    };
    LAST_CREATE.with(|c| {
        *c.borrow_mut() = Some(CreateCall {
            file_name: unsafe { opt_str(file_name) },
            properties,
        })
    });

    let reply = unsafe { respond(out_error) };
    if reply.handle != 0 {
        unsafe { *out_excel = reply.handle as *mut c_void };
    }
    reply.status
}

unsafe extern "C" fn mock_excel_save_as(
    excel: *const c_void,
    file_name: *const c_char,
    out_error: *mut *const c_char,
) -> i8 {
    if excel.is_null() || file_name.is_null() {
        return 1;
    }
    let file_name = unsafe { opt_str(file_name) }.unwrap_or_default();
    LAST_SAVE.with(|c| *c.borrow_mut() = Some((excel as usize, file_name)));
    unsafe { respond(out_error) }.status
}

unsafe fn sheet_reply(out_worksheet: *mut *mut c_void, out_error: *mut *const c_char) -> i8 {
    let reply = unsafe { respond(out_error) };
    if reply.handle != 0 {
        unsafe { *out_worksheet = reply.handle as *mut c_void };
    }
    reply.status
}

unsafe extern "C" fn mock_excel_add_sheet(
    excel: *const c_void,
    sheet_name: *const c_char,
    out_worksheet: *mut *mut c_void,
    out_error: *mut *const c_char,
) -> i8 {
    let name = unsafe { opt_str(sheet_name) };
    LAST_SHEET.with(|c| {
        *c.borrow_mut() = Some(SheetCall::Add {
            excel: excel as usize,
            name,
        })
    });
    unsafe { sheet_reply(out_worksheet, out_error) }
}

unsafe extern "C" fn mock_excel_get_sheet(
    excel: *const c_void,
    sheet_name: *const c_char,
    out_worksheet: *mut *mut c_void,
    out_error: *mut *const c_char,
) -> i8 {
    let name = unsafe { opt_str(sheet_name) }.unwrap_or_default();
    LAST_SHEET.with(|c| {
        *c.borrow_mut() = Some(SheetCall::Get {
            excel: excel as usize,
            name,
        })
    });
    unsafe { sheet_reply(out_worksheet, out_error) }
}

unsafe extern "C" fn mock_excel_rename_sheet(
    excel: *const c_void,
    old_sheet_name: *const c_char,
    new_sheet_name: *const c_char,
    out_error: *mut *const c_char,
) -> i8 {
    let old = unsafe { opt_str(old_sheet_name) }.unwrap_or_default();
    let new = unsafe { opt_str(new_sheet_name) }.unwrap_or_default();
    LAST_SHEET.with(|c| {
        *c.borrow_mut() = Some(SheetCall::Rename {
            excel: excel as usize,
            old,
            new,
        })
    });
    unsafe { respond(out_error) }.status
}

unsafe extern "C" fn mock_excel_hide_sheet(
    excel: *const c_void,
    sheet_name: *const c_char,
    out_error: *mut *const c_char,
) -> i8 {
    let name = unsafe { opt_str(sheet_name) }.unwrap_or_default();
    LAST_SHEET.with(|c| {
        *c.borrow_mut() = Some(SheetCall::Hide {
            excel: excel as usize,
            name,
        })
    });
    unsafe { respond(out_error) }.status
}

unsafe extern "C" fn mock_string_free(message: *mut c_char) {
    if message.is_null() {
        return;
    }
    FREED.with(|c| c.set(c.get() + 1));
    unsafe { drop(CString::from_raw(message)) };
}
