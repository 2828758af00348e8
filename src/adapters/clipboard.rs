use crate::domain::ports::Clipboard;
use crate::utils::error::{Result, WidgetError};
use std::sync::Mutex;

/// Clipboard kept in memory. `denied()` builds one that refuses every write,
/// the way a browser does without a user gesture or permission.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    deny: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn denied() -> Self {
        Self {
            contents: Mutex::new(None),
            deny: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        if self.deny {
            return Err(WidgetError::ClipboardError {
                message: "write permission denied".to_string(),
            });
        }
        let mut contents = self.contents.lock().map_err(|_| WidgetError::ClipboardError {
            message: "clipboard lock poisoned".to_string(),
        })?;
        *contents = Some(text.to_string());
        Ok(())
    }
}
