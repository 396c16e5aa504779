//! Clipboard access for copy/paste of translation text.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::types::errors::ClipboardError;

/// Reads and writes the full text contents of a clipboard.
#[async_trait]
pub trait ClipboardAccess: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
    async fn read_text(&self) -> Result<String, ClipboardError>;
}

/// Process-local clipboard. `denied()` builds one that refuses every access,
/// as a clipboard without permission would.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<String>,
    denied: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            contents: Mutex::new(text.to_string()),
            denied: false,
        }
    }

    pub fn denied() -> Self {
        Self {
            contents: Mutex::default(),
            denied: true,
        }
    }
}

#[async_trait]
impl ClipboardAccess for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.denied {
            return Err(ClipboardError::CopyDenied("permission denied".to_string()));
        }
        let mut contents = self
            .contents
            .lock()
            .map_err(|e| ClipboardError::CopyDenied(e.to_string()))?;
        *contents = text.to_string();
        Ok(())
    }

    async fn read_text(&self) -> Result<String, ClipboardError> {
        if self.denied {
            return Err(ClipboardError::PasteDenied("permission denied".to_string()));
        }
        let contents = self
            .contents
            .lock()
            .map_err(|e| ClipboardError::PasteDenied(e.to_string()))?;
        Ok(contents.clone())
    }
}

/// The desktop clipboard, accessed off the event loop.
#[cfg(feature = "system-clipboard")]
#[derive(Debug, Default)]
pub struct SystemClipboard;

#[cfg(feature = "system-clipboard")]
#[async_trait]
impl ClipboardAccess for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            cli_clipboard::set_contents(text).map_err(|e| ClipboardError::CopyDenied(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::CopyDenied(e.to_string()))?
    }

    async fn read_text(&self) -> Result<String, ClipboardError> {
        tokio::task::spawn_blocking(|| {
            cli_clipboard::get_contents().map_err(|e| ClipboardError::PasteDenied(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::PasteDenied(e.to_string()))?
    }
}
