//! Error types for the magic editor.
//!
//! The HTML and style core never fails; only the I/O edges (content store,
//! configuration files) surface errors, and they all funnel into [`EditorError`].

use miette::Diagnostic;

/// Main error type for editor operations
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum EditorError {
    /// Content store failure (load or autosave)
    #[error(transparent)]
    #[diagnostic_source]
    Store(#[from] StoreError),

    /// Configuration load/save failure
    #[error(transparent)]
    #[diagnostic_source]
    Config(#[from] ConfigError),
}

/// Errors raised by a [`ContentStore`](crate::store::ContentStore).
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum StoreError {
    /// IO error while reading or writing a stored blob
    #[error("content store io error: {0}")]
    #[diagnostic(code(magic_editor::store::io))]
    Io(#[from] std::io::Error),

    /// Key can't be mapped onto the backing storage
    #[error("invalid storage key {key:?}")]
    #[diagnostic(
        code(magic_editor::store::key),
        help("keys may only contain ascii letters, digits, '-', '_' and '.'")
    )]
    InvalidKey { key: String },
}

/// Errors raised while loading or saving [`EditorConfig`](crate::config::EditorConfig).
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config io error: {0}")]
    #[diagnostic(code(magic_editor::config::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(magic_editor::config::serde))]
    Serde(#[from] serde_json::Error),

    #[error("unsupported config format: {0}")]
    #[diagnostic(
        code(magic_editor::config::format),
        help("configuration files must use the .json extension")
    )]
    UnsupportedFormat(String),
}
