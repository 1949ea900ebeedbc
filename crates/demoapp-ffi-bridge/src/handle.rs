//! Owning handle around the native `CppObject`.
//!
//! The handle follows a two-phase lifecycle:
//!
//! ```text
//! ObjcObject::alloc()  -> AllocatedObject   (nothing native exists yet)
//! AllocatedObject::init*() -> ObjcObject    (CppObject constructed once, may fail)
//! drop / dealloc()                          (CppObject destroyed once)
//! ```
//!
//! A failed `init` consumes the allocation and returns an error, so no method
//! can ever run against a native object that was not constructed.

use demoapp_cpp::{CppObject, CppObjectError, FormatterConfig, NativeStatus};
use demoapp_types::CopyWindow;
use log::{info, warn};
use thiserror::Error;

/// Error type for bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Failed to construct wrapped object: {0}")]
    Construction(#[from] CppObjectError),

    #[error("Null pointer received from caller")]
    NullPointer,

    #[error("Wrapped object is not initialized")]
    Uninitialized,

    #[error("Wrapped object is already initialized")]
    AlreadyInitialized,
}

impl BridgeError {
    /// Returns the status code reported for this error at the C boundary.
    pub fn status(&self) -> NativeStatus {
        match self {
            BridgeError::Construction(e) => e.status(),
            BridgeError::NullPointer => NativeStatus::InvalidParameter,
            BridgeError::Uninitialized => NativeStatus::Uninitialized,
            BridgeError::AlreadyInitialized => NativeStatus::Failure,
        }
    }
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// A handle that has been allocated but not yet initialized.
///
/// Holds no native state. The only useful thing to do with it is call one of
/// the `init` methods.
#[derive(Debug)]
#[must_use = "an allocated handle does nothing until initialized"]
pub struct AllocatedObject {
    _private: (),
}

impl AllocatedObject {
    /// Initializes with the default copy window.
    pub fn init(self) -> BridgeResult<ObjcObject> {
        self.init_with_window(CopyWindow::DEFAULT)
    }

    /// Initializes with a validated copy window.
    pub fn init_with_window(self, window: CopyWindow) -> BridgeResult<ObjcObject> {
        Ok(ObjcObject::from_native(CppObject::with_window(window)))
    }

    /// Initializes from raw window parameters.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Construction`] if the window does not fit its
    /// capacity. Nothing native is constructed in that case.
    pub fn init_with_parameters(
        self,
        offset: usize,
        max_count: usize,
        capacity: usize,
    ) -> BridgeResult<ObjcObject> {
        let native = CppObject::try_with_window(offset, max_count, capacity).map_err(|e| {
            warn!("ObjcObject init failed: {}", e);
            BridgeError::Construction(e)
        })?;
        Ok(ObjcObject::from_native(native))
    }

    /// Initializes from a loaded configuration.
    pub fn init_with_config(self, config: &FormatterConfig) -> BridgeResult<ObjcObject> {
        let formatter = config.build_formatter()?;
        Ok(ObjcObject::from_native(CppObject::with_formatter(formatter)))
    }
}

/// Managed-side owner of a native `CppObject`.
///
/// The native object lives in its own heap allocation and never appears in
/// this type's public API; callers pass and receive only strings and bytes.
#[derive(Debug)]
pub struct ObjcObject {
    wrapped: Box<CppObject>,
}

impl ObjcObject {
    /// First phase: reserve the handle without constructing anything native.
    pub fn alloc() -> AllocatedObject {
        AllocatedObject { _private: () }
    }

    /// Shorthand for `ObjcObject::alloc().init()`.
    pub fn new() -> BridgeResult<Self> {
        Self::alloc().init()
    }

    fn from_native(native: CppObject) -> Self {
        info!("ObjcObject init (wrapping CppObject id {})", native.id());
        Self {
            wrapped: Box::new(native),
        }
    }

    /// Identity of the wrapped object, for correlating log lines.
    pub fn native_id(&self) -> u64 {
        self.wrapped.id()
    }

    pub fn window(&self) -> CopyWindow {
        *self.wrapped.window()
    }

    /// Runs the wrapped method and returns the copied buffer contents.
    ///
    /// `None` stands for a nil string and is treated as empty.
    pub fn example_method_with_string(&self, text: Option<&str>) -> String {
        self.wrapped.example_method(text.unwrap_or_default())
    }

    /// Byte-exact variant of
    /// [`example_method_with_string`](Self::example_method_with_string).
    pub fn example_method_with_bytes(&self, text: Option<&[u8]>) -> Vec<u8> {
        self.wrapped.example_method_bytes(text.unwrap_or_default())
    }

    /// Returns the full report line for `text` instead of just the buffer.
    pub fn report_with_string(&self, text: Option<&str>) -> String {
        self.wrapped.formatter().format(text.unwrap_or_default())
    }

    /// Returns the full report line for raw bytes.
    pub fn report_with_bytes(&self, text: Option<&[u8]>) -> Vec<u8> {
        self.wrapped.formatter().format_bytes(text.unwrap_or_default())
    }

    /// Explicit teardown; equivalent to dropping the handle.
    pub fn dealloc(self) {
        drop(self);
    }
}

impl Drop for ObjcObject {
    fn drop(&mut self) {
        info!("ObjcObject dealloc (releasing CppObject id {})", self.wrapped.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_alloc_constructs_nothing() {
        let before = CppObject::thread_lifecycle();
        let allocated = ObjcObject::alloc();
        assert_eq!(CppObject::thread_lifecycle(), before);
        drop(allocated);
        assert_eq!(CppObject::thread_lifecycle(), before);
    }

    #[test]
    fn test_init_and_call() {
        let object = ObjcObject::new().unwrap();
        assert_eq!(object.window(), CopyWindow::DEFAULT);
        assert_eq!(
            object.example_method_with_string(Some("HelloWonderfulWorld")),
            "Wonder"
        );
    }

    #[test]
    fn test_nil_string_is_empty() {
        let object = ObjcObject::new().unwrap();
        assert_eq!(object.example_method_with_string(None), "");
        assert_eq!(
            object.report_with_string(None),
            "CppObject method call with parameter: & buffer after copy contains: \n"
        );
    }

    #[test]
    fn test_init_failure_constructs_nothing() {
        let before = CppObject::thread_lifecycle();
        let err = ObjcObject::alloc()
            .init_with_parameters(5, 6, 11)
            .unwrap_err();
        assert_eq!(err.status(), NativeStatus::BufferOverflow);
        assert_eq!(CppObject::thread_lifecycle(), before);
    }

    #[test]
    fn test_construct_and_destroy_exactly_once() {
        let before = CppObject::thread_lifecycle();

        let object = ObjcObject::alloc().init_with_parameters(0, 4, 5).unwrap();
        let during = CppObject::thread_lifecycle();
        assert_eq!(during.constructed, before.constructed + 1);
        assert_eq!(during.destroyed, before.destroyed);

        object.dealloc();
        let after = CppObject::thread_lifecycle();
        assert_eq!(after.constructed, before.constructed + 1);
        assert_eq!(after.destroyed, before.destroyed + 1);
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(BridgeError::NullPointer.status(), NativeStatus::InvalidParameter);
        assert_eq!(BridgeError::Uninitialized.status(), NativeStatus::Uninitialized);
        assert_eq!(BridgeError::AlreadyInitialized.status(), NativeStatus::Failure);
    }
}
