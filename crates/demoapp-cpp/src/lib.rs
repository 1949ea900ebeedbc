//! The native side of the DemoApp bridge.
//!
//! This crate holds the object that a managed caller wraps: a [`CppObject`]
//! whose one method copies a bounded slice of its input into a fixed-capacity
//! buffer and reports on the result.
//!
//! # Architecture
//!
//! - [`buffer`]: [`BoundedBuffer`], a byte store that always keeps room for a terminator
//! - [`formatter`]: [`BoundedCopyFormatter`], the copy-and-report operation
//! - [`object`]: [`CppObject`], the wrapped object with logged lifecycle
//! - [`config`]: TOML configuration for the copy window and report tag
//! - [`error`]: status codes and error types
//!
//! # Example
//!
//! ```
//! use demoapp_cpp::BoundedCopyFormatter;
//!
//! let formatter = BoundedCopyFormatter::default();
//! assert_eq!(
//!     formatter.format("HelloWonderfulWorld"),
//!     "CppObject method call with parameter:HelloWonderfulWorld & buffer after copy contains: Wonder\n"
//! );
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod formatter;
pub mod object;

pub use buffer::BoundedBuffer;
pub use config::{FormatterConfig, WindowConfig};
pub use error::{CppObjectError, CppObjectResult, NativeStatus};
pub use formatter::{BoundedCopyFormatter, CopyOutcome, DEFAULT_TAG};
pub use object::{CppObject, LifecycleCounts};

// Re-export the window type for convenience
pub use demoapp_types::{CopyWindow, WindowError};
