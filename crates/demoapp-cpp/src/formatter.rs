//! Bounded copy formatter.
//!
//! Copies the windowed slice of an input into a fresh [`BoundedBuffer`] and
//! renders a report line combining the input with what was copied. No state
//! survives between calls.

use crate::buffer::BoundedBuffer;
use demoapp_types::CopyWindow;
use log::{debug, info};
use std::borrow::Cow;

/// Tag prefixed to every report.
pub const DEFAULT_TAG: &str = "CppObject method call";

const PARAMETER_LABEL: &str = " with parameter:";
const BUFFER_LABEL: &str = " & buffer after copy contains: ";

/// Result of one bounded copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    buffer: BoundedBuffer,
}

impl CopyOutcome {
    /// Number of bytes copied, terminator excluded.
    pub fn count(&self) -> usize {
        self.buffer.len()
    }

    /// The copied bytes.
    pub fn bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// The copied bytes as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.buffer.as_bytes())
    }

    pub fn into_buffer(self) -> BoundedBuffer {
        self.buffer
    }
}

/// Copies a bounded slice of its input and reports on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedCopyFormatter {
    window: CopyWindow,
    tag: String,
}

impl BoundedCopyFormatter {
    pub fn new(window: CopyWindow) -> Self {
        Self {
            window,
            tag: DEFAULT_TAG.to_string(),
        }
    }

    /// Replaces the report tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn window(&self) -> &CopyWindow {
        &self.window
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Copies the windowed slice of `text` into a fresh buffer.
    pub fn copy(&self, text: &[u8]) -> CopyOutcome {
        let mut buffer = BoundedBuffer::for_window(&self.window);
        let count = buffer.copy_window(text, &self.window);
        debug!("bounded copy ({}): {} of {} bytes", self.window, count, text.len());
        CopyOutcome { buffer }
    }

    /// Builds the report for `text`.
    ///
    /// A window that splits a multi-byte character shows the partial
    /// character as U+FFFD.
    pub fn format(&self, text: &str) -> String {
        self.format_with_outcome(text).0
    }

    /// Builds and logs the report, also returning the copy it describes.
    pub fn format_with_outcome(&self, text: &str) -> (String, CopyOutcome) {
        let outcome = self.copy(text.as_bytes());
        let report = self.render(text, &outcome.text());
        info!("{}", log_line(report.as_bytes()));
        (report, outcome)
    }

    /// Byte-exact variant of [`format`](Self::format).
    pub fn format_bytes(&self, text: &[u8]) -> Vec<u8> {
        self.format_bytes_with_outcome(text).0
    }

    pub fn format_bytes_with_outcome(&self, text: &[u8]) -> (Vec<u8>, CopyOutcome) {
        let outcome = self.copy(text);

        let mut report = Vec::with_capacity(
            self.tag.len()
                + PARAMETER_LABEL.len()
                + text.len()
                + BUFFER_LABEL.len()
                + outcome.count()
                + 1,
        );
        report.extend_from_slice(self.tag.as_bytes());
        report.extend_from_slice(PARAMETER_LABEL.as_bytes());
        report.extend_from_slice(text);
        report.extend_from_slice(BUFFER_LABEL.as_bytes());
        report.extend_from_slice(outcome.bytes());
        report.push(b'\n');
        info!("{}", log_line(&report));
        (report, outcome)
    }

    fn render(&self, text: &str, copied: &str) -> String {
        format!(
            "{}{}{}{}{}\n",
            self.tag, PARAMETER_LABEL, text, BUFFER_LABEL, copied
        )
    }
}

/// The report as logged: everything but the single newline that ends it.
fn log_line(report: &[u8]) -> Cow<'_, str> {
    let body = report.strip_suffix(b"\n").unwrap_or(report);
    String::from_utf8_lossy(body)
}

impl Default for BoundedCopyFormatter {
    fn default() -> Self {
        Self::new(CopyWindow::DEFAULT)
    }
}
