pub mod adapters;
pub mod config;
pub mod core;
pub mod dom;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{FileStore, GeminiClient, MemoryClipboard, MemoryStore};
pub use config::toml_config::WidgetConfig;
pub use crate::core::{Controller, Environment, Homepage};
pub use dom::{Document, ElementId, Event, EventOutcome, Key};
pub use domain::model::{ColorScheme, Theme};
pub use utils::error::{Result, WidgetError};
