//! Shared plumbing for the magic editor: errors, configuration, content
//! persistence and tracing setup.

pub mod config;
pub mod error;
pub mod store;
#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use crate::config::{EditorConfig, PersistMode};
pub use crate::error::{ConfigError, EditorError, StoreError};
pub use crate::store::{ContentStore, FileStore, MemoryStore};
