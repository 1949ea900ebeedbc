//! Value types shared by the DemoApp native object and its bridge.
//!
//! - [`CopyWindow`]: the `(offset, max_count)` slice of an input that may be
//!   copied, validated against the capacity of the buffer it is copied into

mod window;

pub use window::CopyWindow;

/// Errors raised while establishing a copy window.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// The window plus its terminator does not fit in the buffer.
    #[error(
        "buffer overflow risk: offset {offset} + max_count {max_count} + 1 > capacity {capacity}"
    )]
    BufferOverflowRisk {
        offset: usize,
        max_count: usize,
        capacity: usize,
    },
}
