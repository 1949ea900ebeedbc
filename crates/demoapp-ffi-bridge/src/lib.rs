//! Bridge that exposes the native `CppObject` to managed callers.
//!
//! The native type never appears at this crate's boundary. Managed code holds
//! an [`ObjcObject`], an owning handle that constructs the wrapped object
//! exactly once and destroys it exactly once:
//!
//! ```text
//! [managed caller] --alloc--> [AllocatedObject] --init--> [ObjcObject] --owns--> [CppObject]
//!                                                          (drop / dealloc destroys it)
//! ```
//!
//! C callers use the same lifecycle through [`exports`], which passes only
//! opaque pointers, byte buffers with explicit lengths, and status codes.
//!
//! # Safety
//!
//! All exported functions use the `extern "C"` ABI and follow these rules:
//!
//! 1. Null handle and text pointers are checked before use
//! 2. Returned strings are NUL-terminated and paired with their length
//! 3. A handle owns its wrapped object; freeing the handle destroys it
//! 4. Failure details are reported through status codes, never by unwinding

pub mod exports;
mod handle;

pub use demoapp_cpp::NativeStatus;
pub use demoapp_types::CopyWindow;
pub use handle::{AllocatedObject, BridgeError, BridgeResult, ObjcObject};
