//! Bounded, terminator-aware byte buffer.

use demoapp_types::CopyWindow;

/// Byte written immediately after the copied region.
pub const TERMINATOR: u8 = 0;

/// A fixed-capacity byte store that always keeps room for a terminator.
///
/// The capacity is set at construction and never changes. At most
/// `capacity - 1` meaningful bytes are held at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedBuffer {
    bytes: Box<[u8]>,
    len: usize,
}

impl BoundedBuffer {
    /// Creates a zeroed buffer.
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![TERMINATOR; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Creates a zeroed buffer sized for `window`.
    pub fn for_window(window: &CopyWindow) -> Self {
        Self::new(window.capacity())
    }

    /// Copies the part of `src` that falls inside `window`, then terminates.
    ///
    /// Returns the number of bytes copied. Inputs shorter than the window
    /// offset copy nothing.
    ///
    /// # Panics
    ///
    /// Panics before writing anything if the copied bytes plus terminator
    /// would not fit. A `CopyWindow` whose capacity matches this buffer
    /// cannot trigger it.
    pub fn copy_window(&mut self, src: &[u8], window: &CopyWindow) -> usize {
        let range = window.eligible(src.len());
        let count = range.len();

        assert!(
            count < self.bytes.len(),
            "bounded copy of {} bytes does not fit capacity {}",
            count,
            self.bytes.len()
        );

        self.bytes[..count].copy_from_slice(&src[range]);
        self.bytes[count] = TERMINATOR;
        self.len = count;
        count
    }

    /// Bytes up to, not including, the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Bytes including the terminator.
    pub fn as_bytes_with_terminator(&self) -> &[u8] {
        &self.bytes[..(self.len + 1).min(self.bytes.len())]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_buffer_is_zeroed() {
        let buffer = BoundedBuffer::new(20);
        assert_eq!(buffer.capacity(), 20);
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_bytes(), b"");
    }

    #[test]
    fn test_copy_full_window() {
        let window = CopyWindow::DEFAULT;
        let mut buffer = BoundedBuffer::for_window(&window);

        let count = buffer.copy_window(b"HelloWonderfulWorld", &window);
        assert_eq!(count, 6);
        assert_eq!(buffer.as_bytes(), b"Wonder");
        assert_eq!(buffer.as_bytes_with_terminator(), b"Wonder\0");
    }

    #[test]
    fn test_copy_partial_window() {
        let window = CopyWindow::DEFAULT;
        let mut buffer = BoundedBuffer::for_window(&window);

        assert_eq!(buffer.copy_window(b"HelloWor", &window), 3);
        assert_eq!(buffer.as_bytes(), b"Wor");
    }

    #[test]
    fn test_copy_short_input() {
        let window = CopyWindow::DEFAULT;
        let mut buffer = BoundedBuffer::for_window(&window);

        assert_eq!(buffer.copy_window(b"Hi", &window), 0);
        assert_eq!(buffer.as_bytes(), b"");
        assert_eq!(buffer.copy_window(b"Hello", &window), 0);
        assert_eq!(buffer.as_bytes_with_terminator(), b"\0");
    }

    #[test]
    fn test_recopy_truncates_previous_contents() {
        let window = CopyWindow::DEFAULT;
        let mut buffer = BoundedBuffer::for_window(&window);

        buffer.copy_window(b"HelloWonderfulWorld", &window);
        buffer.copy_window(b"HelloAb", &window);
        assert_eq!(buffer.as_bytes(), b"Ab");
        assert_eq!(buffer.as_bytes_with_terminator(), b"Ab\0");
    }

    #[test]
    fn test_copy_raw_bytes() {
        let window = CopyWindow::new(1, 3, 5).unwrap();
        let mut buffer = BoundedBuffer::for_window(&window);

        assert_eq!(buffer.copy_window(&[0xff, 0xfe, 0x00, 0x80, 0x7f], &window), 3);
        assert_eq!(buffer.as_bytes(), &[0xfe, 0x00, 0x80]);
    }

    #[test]
    #[should_panic(expected = "does not fit capacity")]
    fn test_mismatched_capacity_panics_before_write() {
        let window = CopyWindow::DEFAULT;
        let mut buffer = BoundedBuffer::new(4);
        buffer.copy_window(b"HelloWonderfulWorld", &window);
    }
}
