use crate::utils::error::Result;
use async_trait::async_trait;

/// Browser local storage: flat string keys to string values.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Sends `prompt` as a single user turn and returns the reply text.
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String>;
}
