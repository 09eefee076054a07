//! Seams for the two side effects the controller cannot perform itself:
//! telling the user something, and writing to the platform clipboard.

use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    EmptyInput,
    Busy,
    Copied,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::EmptyInput => "Please enter text to translate",
            Notice::Busy => "A translation is already in progress",
            Notice::Copied => "Translated text copied to clipboard!",
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

#[derive(thiserror::Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Keeps every notice; for tests and headless callers.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut n) = self.notices.lock() {
            n.push(notice);
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    writes: Arc<Mutex<Vec<String>>>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<String> {
        self.writes.lock().ok().and_then(|w| w.last().cloned())
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| w.len()).unwrap_or(0)
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes
            .lock()
            .map_err(|_| ClipboardError::Unavailable("poisoned".to_owned()))?
            .push(text.to_owned());
        Ok(())
    }
}
