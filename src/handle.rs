//! Opaque handles to native engine objects.

use crate::library::OfficeLibrary;
use libc::c_void;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::sync::Arc;

/// Opaque pointer to an object owned by the native engine.
///
/// The binding never dereferences it; it is only passed back into engine
/// calls. It does not own the object, and it is neither `Send` nor `Sync`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(NonNull<c_void>);

impl NativeHandle {
    /// Wrap a raw pointer. Null yields `None`.
    pub fn from_raw(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }

    /// The handle's address, for logging.
    pub fn addr(self) -> usize {
        self.0.as_ptr() as usize
    }
}

/// Whether a document still refers to a live engine workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentState {
    Valid(NativeHandle),
    #[default]
    Invalid,
}

/// An Excel workbook held by the native engine.
///
/// Created with [`Excel::create`]. A default-constructed `Excel` is invalid:
/// every operation on it fails with `OfficeError::InvalidState`.
///
/// # Thread Safety
///
/// `Excel` is NOT `Send` or `Sync`. Callers that share a workbook across
/// threads must serialise access themselves.
#[derive(Debug, Default)]
pub struct Excel {
    pub(crate) state: DocumentState,
    pub(crate) library: Option<Arc<OfficeLibrary>>,
}

impl Excel {
    /// An empty, invalid document.
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.state, DocumentState::Valid(_))
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// The engine handle, if the document is valid.
    pub fn handle(&self) -> Option<NativeHandle> {
        match self.state {
            DocumentState::Valid(handle) => Some(handle),
            DocumentState::Invalid => None,
        }
    }
}

/// A worksheet inside an [`Excel`] workbook.
///
/// Borrows the workbook it came from, so it cannot outlive it or be used
/// across a `save_as`.
#[derive(Debug)]
pub struct Worksheet<'doc> {
    handle: NativeHandle,
    name: Option<String>,
    _doc: PhantomData<&'doc Excel>,
}

impl<'doc> Worksheet<'doc> {
    pub(crate) fn new(handle: NativeHandle, name: Option<String>) -> Self {
        Self {
            handle,
            name,
            _doc: PhantomData,
        }
    }

    pub fn handle(&self) -> NativeHandle {
        self.handle
    }

    /// The name the sheet was requested under. `None` when the engine picked it.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
