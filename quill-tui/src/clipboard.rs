//! System clipboard bridge backed by arboard

use quill_core::{Clipboard, ClipboardError, MemoryClipboard};
use tracing::warn;

/// Uses the OS clipboard when one is reachable and keeps an in-process copy
/// so copy/paste still works in headless terminals.
pub struct SystemClipboard {
    system: Option<arboard::Clipboard>,
    fallback: MemoryClipboard,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let system = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                warn!(error = %err, "system clipboard unavailable, using in-process clipboard");
                None
            }
        };
        Self {
            system,
            fallback: MemoryClipboard::new(),
        }
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &[u8]) -> Result<(), ClipboardError> {
        self.fallback.set_text(text)?;
        if let Some(system) = self.system.as_mut() {
            system
                .set_text(String::from_utf8_lossy(text).into_owned())
                .map_err(|err| ClipboardError::Unavailable(err.to_string()))?;
        }
        Ok(())
    }

    fn get_text(&mut self) -> Result<Option<Vec<u8>>, ClipboardError> {
        let Some(system) = self.system.as_mut() else {
            return self.fallback.get_text();
        };
        match system.get_text() {
            Ok(text) => Ok(Some(text.into_bytes())),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(err) => Err(ClipboardError::Unavailable(err.to_string())),
        }
    }
}
