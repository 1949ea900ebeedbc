//! The wrapped native object.
//!
//! `CppObject` owns a [`BoundedCopyFormatter`] and logs its own construction
//! and destruction. It is the resource that `demoapp-ffi-bridge` hides behind
//! an owning handle.

use crate::error::CppObjectResult;
use crate::formatter::BoundedCopyFormatter;
use demoapp_types::CopyWindow;
use log::info;
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static LIFECYCLE: Cell<LifecycleCounts> = const { Cell::new(LifecycleCounts::ZERO) };
}

/// Constructions and destructions observed on the current thread.
///
/// Counts are attributed to the thread that performs the event, not to the
/// object. `CppObject` is `Send`, so an object built on one thread and
/// dropped on another adds to `constructed` on the first and `destroyed` on
/// the second; `live()` is only meaningful when both happen on one thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleCounts {
    pub constructed: u64,
    pub destroyed: u64,
}

impl LifecycleCounts {
    const ZERO: LifecycleCounts = LifecycleCounts {
        constructed: 0,
        destroyed: 0,
    };

    /// Objects constructed but not yet destroyed.
    pub fn live(&self) -> u64 {
        self.constructed.saturating_sub(self.destroyed)
    }
}

/// Native object with a single bounded-copy method.
#[derive(Debug)]
pub struct CppObject {
    id: u64,
    formatter: BoundedCopyFormatter,
}

impl CppObject {
    /// Constructs an object using [`CopyWindow::DEFAULT`].
    pub fn new() -> Self {
        Self::with_formatter(BoundedCopyFormatter::default())
    }

    /// Constructs an object around an already validated window.
    pub fn with_window(window: CopyWindow) -> Self {
        Self::with_formatter(BoundedCopyFormatter::new(window))
    }

    /// Constructs an object from raw window parameters.
    ///
    /// # Errors
    ///
    /// Fails with `BufferOverflowRisk` before anything is constructed if the
    /// window does not fit its capacity.
    pub fn try_with_window(
        offset: usize,
        max_count: usize,
        capacity: usize,
    ) -> CppObjectResult<Self> {
        let window = CopyWindow::new(offset, max_count, capacity)?;
        Ok(Self::with_window(window))
    }

    pub fn with_formatter(formatter: BoundedCopyFormatter) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        LIFECYCLE.with(|cell| {
            let mut counts = cell.get();
            counts.constructed += 1;
            cell.set(counts);
        });
        info!("CppObject construct (id {}, {})", id, formatter.window());

        Self { id, formatter }
    }

    /// Process-unique identity of this object.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn window(&self) -> &CopyWindow {
        self.formatter.window()
    }

    pub fn formatter(&self) -> &BoundedCopyFormatter {
        &self.formatter
    }

    /// Logs the report for `text` and returns the copied buffer contents.
    pub fn example_method(&self, text: &str) -> String {
        let (_report, outcome) = self.formatter.format_with_outcome(text);
        outcome.text().into_owned()
    }

    /// Byte-exact variant of [`example_method`](Self::example_method).
    pub fn example_method_bytes(&self, text: &[u8]) -> Vec<u8> {
        let (_report, outcome) = self.formatter.format_bytes_with_outcome(text);
        outcome.bytes().to_vec()
    }

    /// Lifecycle counts for objects constructed or dropped on this thread.
    ///
    /// See [`LifecycleCounts`] for how objects moved between threads count.
    pub fn thread_lifecycle() -> LifecycleCounts {
        LIFECYCLE.with(Cell::get)
    }
}

impl Default for CppObject {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CppObject {
    fn drop(&mut self) {
        LIFECYCLE.with(|cell| {
            let mut counts = cell.get();
            counts.destroyed += 1;
            cell.set(counts);
        });
        info!("CppObject destruct (id {})", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_example_method_returns_buffer() {
        let object = CppObject::new();
        assert_eq!(object.example_method("HelloWonderfulWorld"), "Wonder");
        assert_eq!(object.example_method("Hi"), "");
    }

    #[test]
    fn test_example_method_bytes() {
        let object = CppObject::new();
        assert_eq!(object.example_method_bytes(b"Hello\x00\x01\x02"), b"\x00\x01\x02");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = CppObject::new();
        let b = CppObject::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_lifecycle_counts() {
        let before = CppObject::thread_lifecycle();
        {
            let _object = CppObject::new();
            let during = CppObject::thread_lifecycle();
            assert_eq!(during.constructed, before.constructed + 1);
            assert_eq!(during.live(), before.live() + 1);
        }
        let after = CppObject::thread_lifecycle();
        assert_eq!(after.destroyed, before.destroyed + 1);
        assert_eq!(after.live(), before.live());
    }

    #[test]
    fn test_lifecycle_counts_follow_dropping_thread() {
        let before = CppObject::thread_lifecycle();
        let object = CppObject::new();

        let remote = std::thread::spawn(move || {
            let start = CppObject::thread_lifecycle();
            drop(object);
            let end = CppObject::thread_lifecycle();
            (start, end)
        })
        .join()
        .unwrap();

        let (start, end) = remote;
        assert_eq!(end.destroyed, start.destroyed + 1);
        assert_eq!(end.constructed, start.constructed);

        let after = CppObject::thread_lifecycle();
        assert_eq!(after.constructed, before.constructed + 1);
        assert_eq!(after.destroyed, before.destroyed);
    }

    #[test]
    fn test_invalid_window_constructs_nothing() {
        let before = CppObject::thread_lifecycle();
        assert!(CppObject::try_with_window(5, 6, 11).is_err());
        assert_eq!(CppObject::thread_lifecycle(), before);
    }
}
