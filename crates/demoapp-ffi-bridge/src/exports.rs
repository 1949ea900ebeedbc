//! C ABI for managed callers.
//!
//! Only primitive types cross this boundary: opaque handle pointers, byte
//! pointers with explicit lengths, integers and status codes. Every function
//! uses `extern "C"` and C naming conventions.
//!
//! Handles follow the same two phases as [`ObjcObject`]:
//! `objc_object_alloc` then `objc_object_init*`, released with
//! `objc_object_free`. Strings returned by the bridge are NUL-terminated and
//! must be released with `objc_string_free`.

use crate::handle::{BridgeError, BridgeResult, ObjcObject};
use demoapp_cpp::NativeStatus;
use log::warn;
use std::cell::Cell;
use std::ffi::c_char;
use std::ptr;

// =============================================================================
// Thread-local status of the last call
// =============================================================================

thread_local! {
    /// Status of the most recent bridge call on this thread.
    static LAST_STATUS: Cell<NativeStatus> = const { Cell::new(NativeStatus::Success) };
}

fn set_status(status: NativeStatus) -> i32 {
    LAST_STATUS.with(|cell| cell.set(status));
    status.as_raw()
}

fn report<T>(result: BridgeResult<T>) -> Option<T> {
    match result {
        Ok(value) => {
            set_status(NativeStatus::Success);
            Some(value)
        }
        Err(e) => {
            warn!("bridge call failed: {}", e);
            set_status(e.status());
            None
        }
    }
}

// =============================================================================
// Opaque handle
// =============================================================================

/// Opaque handle given to C callers.
///
/// Empty between `objc_object_alloc` and a successful `objc_object_init*`.
#[derive(Debug, Default)]
pub struct ObjcHandle {
    object: Option<ObjcObject>,
}

impl ObjcHandle {
    pub fn is_initialized(&self) -> bool {
        self.object.is_some()
    }

    fn init_with(
        &mut self,
        init: impl FnOnce() -> BridgeResult<ObjcObject>,
    ) -> BridgeResult<()> {
        if self.object.is_some() {
            return Err(BridgeError::AlreadyInitialized);
        }
        self.object = Some(init()?);
        Ok(())
    }

    fn object(&self) -> BridgeResult<&ObjcObject> {
        self.object.as_ref().ok_or(BridgeError::Uninitialized)
    }
}

/// Converts a caller pointer into a handle reference.
///
/// # Safety
///
/// `handle` must be null or a pointer returned by this module and not yet freed.
unsafe fn handle_ref<'a>(handle: *const ObjcHandle) -> BridgeResult<&'a ObjcHandle> {
    handle.as_ref().ok_or(BridgeError::NullPointer)
}

/// # Safety
///
/// Same as [`handle_ref`], and no other reference to the handle may be live.
unsafe fn handle_mut<'a>(handle: *mut ObjcHandle) -> BridgeResult<&'a mut ObjcHandle> {
    handle.as_mut().ok_or(BridgeError::NullPointer)
}

/// Borrows caller text. A null pointer is a nil string and reads as empty.
///
/// # Safety
///
/// If non-null, `text` must point to `len` readable bytes.
unsafe fn text_arg<'a>(text: *const c_char, len: usize) -> &'a [u8] {
    if text.is_null() {
        &[]
    } else {
        std::slice::from_raw_parts(text.cast::<u8>(), len)
    }
}

/// Hands `bytes` to the caller as a NUL-terminated allocation.
///
/// # Safety
///
/// `out_len` must be null or valid for a write.
unsafe fn into_c_bytes(mut bytes: Vec<u8>, out_len: *mut usize) -> *mut c_char {
    if !out_len.is_null() {
        *out_len = bytes.len();
    }
    bytes.push(0);
    Box::into_raw(bytes.into_boxed_slice()).cast::<c_char>()
}

// =============================================================================
// Lifecycle
// =============================================================================

/// First phase: allocates an empty handle. Never returns null.
#[no_mangle]
pub extern "C" fn objc_object_alloc() -> *mut ObjcHandle {
    set_status(NativeStatus::Success);
    Box::into_raw(Box::default())
}

/// Second phase: constructs the wrapped object with the default window.
///
/// Returns a status code.
///
/// # Safety
///
/// `handle` must be null or a live pointer from `objc_object_alloc`.
#[no_mangle]
pub unsafe extern "C" fn objc_object_init(handle: *mut ObjcHandle) -> i32 {
    let result = handle_mut(handle).and_then(|h| h.init_with(|| ObjcObject::alloc().init()));
    match report(result) {
        Some(()) => NativeStatus::Success.as_raw(),
        None => objc_last_status(),
    }
}

/// Second phase with explicit window parameters.
///
/// Fails with `BufferOverflow` if `offset + max_count + 1 > capacity`; the
/// handle then stays uninitialized.
///
/// # Safety
///
/// `handle` must be null or a live pointer from `objc_object_alloc`.
#[no_mangle]
pub unsafe extern "C" fn objc_object_init_with_window(
    handle: *mut ObjcHandle,
    offset: usize,
    max_count: usize,
    capacity: usize,
) -> i32 {
    let result = handle_mut(handle).and_then(|h| {
        h.init_with(|| ObjcObject::alloc().init_with_parameters(offset, max_count, capacity))
    });
    match report(result) {
        Some(()) => NativeStatus::Success.as_raw(),
        None => objc_last_status(),
    }
}

/// Allocates and initializes with the default window.
///
/// Returns null on failure.
#[no_mangle]
pub extern "C" fn objc_object_new() -> *mut ObjcHandle {
    match report(ObjcObject::new()) {
        Some(object) => Box::into_raw(Box::new(ObjcHandle {
            object: Some(object),
        })),
        None => ptr::null_mut(),
    }
}

/// Allocates and initializes with explicit window parameters.
///
/// Returns null on failure and writes the status to `status_out` when it is
/// non-null.
///
/// # Safety
///
/// `status_out` must be null or valid for a write.
#[no_mangle]
pub unsafe extern "C" fn objc_object_new_with_window(
    offset: usize,
    max_count: usize,
    capacity: usize,
    status_out: *mut i32,
) -> *mut ObjcHandle {
    let object = report(ObjcObject::alloc().init_with_parameters(offset, max_count, capacity));
    if !status_out.is_null() {
        *status_out = objc_last_status();
    }
    match object {
        Some(object) => Box::into_raw(Box::new(ObjcHandle {
            object: Some(object),
        })),
        None => ptr::null_mut(),
    }
}

/// Returns true once the handle's wrapped object has been constructed.
///
/// # Safety
///
/// `handle` must be null or a live pointer from this module.
#[no_mangle]
pub unsafe extern "C" fn objc_object_is_initialized(handle: *const ObjcHandle) -> bool {
    report(handle_ref(handle))
        .map(ObjcHandle::is_initialized)
        .unwrap_or(false)
}

/// Releases a handle and, if initialized, its wrapped object. Null is a no-op.
///
/// # Safety
///
/// `handle` must be null or a live pointer from this module; it must not be
/// used afterwards.
#[no_mangle]
pub unsafe extern "C" fn objc_object_free(handle: *mut ObjcHandle) {
    if handle.is_null() {
        return;
    }
    drop(Box::from_raw(handle));
    set_status(NativeStatus::Success);
}

// =============================================================================
// Wrapped methods
// =============================================================================

/// Runs the wrapped method on `len` bytes at `text` and returns the copied
/// buffer contents.
///
/// A null `text` is a nil string. Bytes are taken as-is. The returned length,
/// terminator excluded, is written to `out_len` when it is non-null. Returns
/// null if the handle is null or uninitialized.
///
/// # Safety
///
/// - `handle` must be null or a live pointer from this module
/// - `text`, if non-null, must point to `len` readable bytes
/// - `out_len` must be null or valid for a write
#[no_mangle]
pub unsafe extern "C" fn objc_object_example_method(
    handle: *const ObjcHandle,
    text: *const c_char,
    len: usize,
    out_len: *mut usize,
) -> *mut c_char {
    let text = text_arg(text, len);
    let result = handle_ref(handle)
        .and_then(ObjcHandle::object)
        .map(|object| object.example_method_with_bytes(Some(text)));

    match report(result) {
        Some(bytes) => into_c_bytes(bytes, out_len),
        None => ptr::null_mut(),
    }
}

/// Like `objc_object_example_method` but returns the full report line.
///
/// # Safety
///
/// Same requirements as `objc_object_example_method`.
#[no_mangle]
pub unsafe extern "C" fn objc_object_report(
    handle: *const ObjcHandle,
    text: *const c_char,
    len: usize,
    out_len: *mut usize,
) -> *mut c_char {
    let text = text_arg(text, len);
    let result = handle_ref(handle)
        .and_then(ObjcHandle::object)
        .map(|object| object.report_with_bytes(Some(text)));

    match report(result) {
        Some(bytes) => into_c_bytes(bytes, out_len),
        None => ptr::null_mut(),
    }
}

/// Releases a string returned by this module. Null is a no-op.
///
/// # Safety
///
/// `ptr` must be null or a string returned by this module, and `len` must be
/// the length reported for it in `out_len`.
#[no_mangle]
pub unsafe extern "C" fn objc_string_free(ptr: *mut c_char, len: usize) {
    if ptr.is_null() {
        return;
    }
    let slice = ptr::slice_from_raw_parts_mut(ptr.cast::<u8>(), len + 1);
    drop(Box::from_raw(slice));
}

// =============================================================================
// Status
// =============================================================================

/// Status code of the most recent bridge call on this thread.
#[no_mangle]
pub extern "C" fn objc_last_status() -> i32 {
    LAST_STATUS.with(|cell| cell.get()).as_raw()
}

/// Static NUL-terminated name of a status code. Never null.
#[no_mangle]
pub extern "C" fn objc_status_description(code: i32) -> *const c_char {
    NativeStatus::from_raw(code).c_name().as_ptr().cast::<c_char>()
}

// =============================================================================
// Tests
// =============================================================================
