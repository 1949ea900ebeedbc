//! Native status codes and error types.
//!
//! Status codes are what crosses the C boundary; [`CppObjectError`] is what
//! Rust callers see. Every error maps onto exactly one status.

use demoapp_types::WindowError;
use std::fmt;
use thiserror::Error;

/// Status codes returned across the C boundary.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeStatus {
    Success = 0,
    Failure = -1,
    InvalidParameter = -5,
    BufferOverflow = -8,
    Uninitialized = -12,
}

impl NativeStatus {
    /// Creates a NativeStatus from a raw i32 value.
    pub fn from_raw(status: i32) -> Self {
        match status {
            0 => NativeStatus::Success,
            -5 => NativeStatus::InvalidParameter,
            -8 => NativeStatus::BufferOverflow,
            -12 => NativeStatus::Uninitialized,
            _ => NativeStatus::Failure,
        }
    }

    /// Returns the raw code.
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Returns true if the status indicates success.
    pub fn is_success(&self) -> bool {
        *self == NativeStatus::Success
    }

    /// Converts to a Result, returning Ok(()) for success.
    pub fn into_result(self) -> CppObjectResult<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(CppObjectError::from_status(self))
        }
    }

    /// Static, NUL-terminated name of the status for C callers.
    pub fn c_name(&self) -> &'static [u8] {
        match self {
            NativeStatus::Success => b"NATIVE_STATUS_SUCCESS\0",
            NativeStatus::Failure => b"NATIVE_STATUS_FAILURE\0",
            NativeStatus::InvalidParameter => b"NATIVE_STATUS_INVALID_PARAMETER\0",
            NativeStatus::BufferOverflow => b"NATIVE_STATUS_BUFFER_OVERFLOW\0",
            NativeStatus::Uninitialized => b"NATIVE_STATUS_UNINITIALIZED\0",
        }
    }
}

impl fmt::Display for NativeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.c_name();
        // c_name() is ASCII and always ends in a single NUL.
        let name = std::str::from_utf8(&name[..name.len() - 1]).map_err(|_| fmt::Error)?;
        f.write_str(name)
    }
}

/// Error type for native object operations.
#[derive(Debug, Error)]
pub enum CppObjectError {
    /// The copy window was rejected.
    #[error("Invalid copy window: {0}")]
    Window(#[from] WindowError),

    /// Configuration could not be parsed or serialized.
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A native call returned an error status.
    #[error("Native operation failed: {status}")]
    Status { status: NativeStatus },

    /// The native object has not been constructed.
    #[error("Native object not initialized")]
    Uninitialized,

    /// Internal error.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CppObjectError {
    /// Creates an error from a status code.
    pub fn from_status(status: NativeStatus) -> Self {
        match status {
            NativeStatus::Success => CppObjectError::Internal {
                message: "from_status called with success status".to_string(),
            },
            NativeStatus::Uninitialized => CppObjectError::Uninitialized,
            NativeStatus::Failure
            | NativeStatus::InvalidParameter
            | NativeStatus::BufferOverflow => CppObjectError::Status { status },
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CppObjectError::Config {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CppObjectError::Internal {
            message: message.into(),
        }
    }

    /// Returns the status code reported for this error at the C boundary.
    pub fn status(&self) -> NativeStatus {
        match self {
            CppObjectError::Window(WindowError::BufferOverflowRisk { .. }) => {
                NativeStatus::BufferOverflow
            }
            CppObjectError::Config { .. } => NativeStatus::InvalidParameter,
            CppObjectError::Status { status } => *status,
            CppObjectError::Uninitialized => NativeStatus::Uninitialized,
            CppObjectError::Io(_) | CppObjectError::Internal { .. } => NativeStatus::Failure,
        }
    }
}

/// Result type for native object operations.
pub type CppObjectResult<T> = Result<T, CppObjectError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_success() {
        assert!(NativeStatus::Success.is_success());
        assert!(NativeStatus::Success.into_result().is_ok());
        assert!(NativeStatus::BufferOverflow.into_result().is_err());
    }

    #[test]
    fn test_status_from_raw() {
        assert_eq!(NativeStatus::from_raw(0), NativeStatus::Success);
        assert_eq!(NativeStatus::from_raw(-8), NativeStatus::BufferOverflow);
        assert_eq!(NativeStatus::from_raw(-999), NativeStatus::Failure);
        assert_eq!(NativeStatus::Uninitialized.as_raw(), -12);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(
            NativeStatus::BufferOverflow.to_string(),
            "NATIVE_STATUS_BUFFER_OVERFLOW"
        );
    }

    #[test]
    fn test_window_error_status() {
        let err: CppObjectError = WindowError::BufferOverflowRisk {
            offset: 5,
            max_count: 6,
            capacity: 11,
        }
        .into();
        assert_eq!(err.status(), NativeStatus::BufferOverflow);
        assert!(err.to_string().contains("capacity 11"));
    }

    #[test]
    fn test_error_status_round_trip() {
        let statuses = [
            NativeStatus::Failure,
            NativeStatus::InvalidParameter,
            NativeStatus::BufferOverflow,
            NativeStatus::Uninitialized,
        ];

        for status in statuses {
            let err = status.into_result().unwrap_err();
            assert_eq!(err.status(), status);
            assert_eq!(CppObjectError::from_status(status).status(), status);
        }
    }

    #[test]
    fn test_from_success_status_is_internal() {
        let err = CppObjectError::from_status(NativeStatus::Success);
        assert!(matches!(err, CppObjectError::Internal { .. }));
    }

    #[test]
    fn test_status_error_display() {
        let err = CppObjectError::from_status(NativeStatus::BufferOverflow);
        assert_eq!(
            err.to_string(),
            "Native operation failed: NATIVE_STATUS_BUFFER_OVERFLOW"
        );
    }

    #[test]
    fn test_other_error_status() {
        assert_eq!(
            CppObjectError::config("bad").status(),
            NativeStatus::InvalidParameter
        );
        assert_eq!(CppObjectError::internal("bug").status(), NativeStatus::Failure);
    }
}
