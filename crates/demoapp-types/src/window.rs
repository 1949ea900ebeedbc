//! Copy window type with capacity validation.

use crate::WindowError;
use std::fmt;

/// The slice of an input that a bounded copy may read, together with the
/// capacity of the buffer it writes into.
///
/// A window always satisfies `offset + max_count + 1 <= capacity`, so a copy
/// through it can never write past the terminator slot.
///
/// # Examples
///
/// ```
/// use demoapp_types::CopyWindow;
///
/// let window = CopyWindow::new(5, 6, 20).unwrap();
/// assert_eq!(window.max_count(), 6);
///
/// // 5 + 6 + 1 > 11
/// assert!(CopyWindow::new(5, 6, 11).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CopyWindow {
    offset: usize,
    max_count: usize,
    capacity: usize,
}

impl CopyWindow {
    /// Skip five characters, copy up to six, into a 20-byte buffer.
    pub const DEFAULT: CopyWindow = CopyWindow {
        offset: 5,
        max_count: 6,
        capacity: 20,
    };

    /// Creates a new copy window.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::BufferOverflowRisk`] if `offset + max_count + 1`
    /// exceeds `capacity` or overflows `usize`.
    pub const fn new(
        offset: usize,
        max_count: usize,
        capacity: usize,
    ) -> Result<Self, WindowError> {
        let required = match offset.checked_add(max_count) {
            Some(sum) => sum.checked_add(1),
            None => None,
        };

        match required {
            Some(required) if required <= capacity => Ok(CopyWindow {
                offset,
                max_count,
                capacity,
            }),
            _ => Err(WindowError::BufferOverflowRisk {
                offset,
                max_count,
                capacity,
            }),
        }
    }

    /// Number of leading characters skipped before copying starts.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Upper bound on the number of characters copied.
    pub const fn max_count(&self) -> usize {
        self.max_count
    }

    /// Capacity of the destination buffer, terminator included.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the range of `len`-long input that falls inside the window.
    ///
    /// Inputs shorter than the offset yield an empty range at `len`.
    pub fn eligible(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(len);
        let end = start + self.max_count.min(len - start);
        start..end
    }
}

impl Default for CopyWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CopyWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "offset={} max_count={} capacity={}",
            self.offset, self.max_count, self.capacity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_window() {
        let window = CopyWindow::default();
        assert_eq!(window.offset(), 5);
        assert_eq!(window.max_count(), 6);
        assert_eq!(window.capacity(), 20);
        assert_eq!(CopyWindow::new(5, 6, 20), Ok(window));
    }

    #[test]
    fn test_tightest_capacity_accepted() {
        assert!(CopyWindow::new(5, 6, 12).is_ok());
        assert!(CopyWindow::new(0, 0, 1).is_ok());
    }

    #[test]
    fn test_overflow_risk_rejected() {
        assert_eq!(
            CopyWindow::new(5, 6, 11),
            Err(WindowError::BufferOverflowRisk {
                offset: 5,
                max_count: 6,
                capacity: 11,
            })
        );
        assert!(CopyWindow::new(0, 0, 0).is_err());
        assert!(CopyWindow::new(0, 20, 20).is_err());
    }

    #[test]
    fn test_arithmetic_overflow_rejected() {
        assert!(CopyWindow::new(usize::MAX, 1, usize::MAX).is_err());
        assert!(CopyWindow::new(0, usize::MAX, usize::MAX).is_err());
    }

    #[test]
    fn test_eligible_range() {
        let window = CopyWindow::DEFAULT;
        assert_eq!(window.eligible(0), 0..0);
        assert_eq!(window.eligible(2), 2..2);
        assert_eq!(window.eligible(5), 5..5);
        assert_eq!(window.eligible(8), 5..8);
        assert_eq!(window.eligible(11), 5..11);
        assert_eq!(window.eligible(19), 5..11);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            CopyWindow::DEFAULT.to_string(),
            "offset=5 max_count=6 capacity=20"
        );
    }
}
