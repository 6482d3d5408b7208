//! Clipboard abstraction for the copy-name action.
//!
//! Copying the project name is the one menu entry with no confirmation and
//! no remote call: it writes to the platform clipboard synchronously and
//! reports nothing back. Failures are logged and swallowed because there is
//! no user-visible error surface for a copy.

use std::fmt;
use std::sync::Mutex;

/// Fire-and-forget text clipboard.
pub trait Clipboard: Send + Sync {
    /// Place `text` on the clipboard. Never fails from the caller's view.
    fn set_text(&self, text: &str);
}

/// Platform clipboard backed by `arboard`.
///
/// The underlying handle is opened lazily on first use and reopened after
/// an error, so a headless environment degrades to logged no-ops instead
/// of failing construction.
pub struct SystemClipboard {
    inner: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    /// Create a clipboard that connects on first use.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| {
            tracing::warn!("SystemClipboard lock poisoned, recovering");
            e.into_inner()
        });

        if inner.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => *inner = Some(clipboard),
                Err(error) => {
                    tracing::debug!(%error, "system clipboard unavailable");
                    return;
                },
            }
        }

        if let Some(clipboard) = inner.as_mut() {
            if let Err(error) = clipboard.set_text(text) {
                tracing::debug!(%error, "clipboard write failed");
                // Drop the handle so the next copy retries the connection.
                *inner = None;
            }
        }
    }
}

impl fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let connected = self.inner.lock().map(|i| i.is_some()).unwrap_or(false);
        f.debug_struct("SystemClipboard")
            .field("connected", &connected)
            .finish()
    }
}
