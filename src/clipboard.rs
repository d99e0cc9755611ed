//! System clipboard access
//!
//! Thin wrapper around the platform clipboard. The normalizer core never
//! touches this; the daemon reads a string here, cleans it, and writes the
//! result back verbatim.

use crate::error::{CleanError, CleanResult};
use arboard::Clipboard;
use tracing::debug;

/// Handle to the system clipboard
pub struct ClipboardHandle {
    inner: Clipboard,
}

impl ClipboardHandle {
    /// Connect to the system clipboard
    ///
    /// Fails when no display server is reachable; the daemon retries per
    /// clean cycle instead of holding a handle across its lifetime.
    pub fn new() -> CleanResult<Self> {
        let inner = Clipboard::new().map_err(|e| CleanError::Clipboard(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Read the current clipboard text
    ///
    /// Errors when the clipboard is empty or holds non-text content.
    pub fn read_text(&mut self) -> CleanResult<String> {
        let text = self
            .inner
            .get_text()
            .map_err(|e| CleanError::Clipboard(e.to_string()))?;
        debug!("📋 Read {} chars from clipboard", text.chars().count());
        Ok(text)
    }

    /// Write text to the clipboard, byte-for-byte
    pub fn write_text(&mut self, text: &str) -> CleanResult<()> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| CleanError::Clipboard(e.to_string()))?;
        debug!("📋 Wrote {} chars to clipboard", text.chars().count());
        Ok(())
    }
}
