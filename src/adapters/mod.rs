// Adapters layer: concrete implementations of the domain ports.

pub mod clipboard;
pub mod http;
pub mod storage;

pub use clipboard::MemoryClipboard;
pub use http::GeminiClient;
pub use storage::{FileStore, MemoryStore};
