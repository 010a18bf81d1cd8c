//! magic-editor-core: style synchronization and HTML repair for a rich-text
//! editor, independent of any UI framework.
//!
//! This crate provides:
//! - `StyleMap` - ordered inline-style declarations, plus color normalization
//! - `EditingSurface` trait for the external editing component, and
//!   `PlainSurface` as an in-memory implementation
//! - style projection (selection -> `StyleSnapshot`) and style writing
//! - material insertion for authored HTML fragments
//! - `export_html` - the repair pipeline run before content is persisted
//! - `EditorSession` tying a surface, a content store and style observers together

pub mod color;
pub mod document;
pub mod export;
pub mod material;
pub mod projector;
pub mod session;
pub mod style;
pub mod surface;
pub mod types;
pub mod writer;

pub use color::{FALLBACK_COLOR, normalize_color, normalize_inline_color};
pub use document::PlainSurface;
pub use export::export_html;
pub use material::{MaterialPlacement, insert_material, prepare_material, replace_content};
pub use projector::project_styles;
pub use session::EditorSession;
pub use smol_str::SmolStr;
pub use style::StyleMap;
pub use surface::{
    Attributes, CommandChain, EditingSurface, MarkKind, NodeInfo, NodeKind, Position,
    SurfaceCommand, SurfaceEvent,
};
pub use types::{BLOCK_PRIORITY, BlockKind, StyleSnapshot, StyleTarget};
pub use writer::{apply_style, style_target};

pub use magic_editor_common::{ContentStore, EditorConfig, EditorError, MemoryStore, PersistMode};
