//! Editing surface abstraction.
//!
//! The rich-text surface (document model, selection, undo, rendering) is an
//! external component. This module defines the small query/command interface
//! the core needs from it. A browser binding, a native widget or the in-memory
//! [`PlainSurface`](crate::document::PlainSurface) can all sit behind it.

use smol_str::SmolStr;

use crate::types::BlockKind;

/// Position in the surface's document.
pub type Position = usize;

/// Node and mark types that carry a `style` attribute through the surface.
///
/// Anything else drops inline styles when its HTML is parsed.
pub const STYLED_NODE_TYPES: &[&str] = &[
    "heading",
    "paragraph",
    "textStyle",
    "listItem",
    "image",
    "blockquote",
    "div",
];

/// Attribute set of a node or mark.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    pub style: Option<String>,
}

impl Attributes {
    pub fn with_style(style: impl Into<String>) -> Self {
        Self {
            style: Some(style.into()),
        }
    }

    /// Style string, empty when unset.
    pub fn style(&self) -> &str {
        self.style.as_deref().unwrap_or("")
    }
}

/// Inline mark kinds.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// Span carrying inline text styles (color, size, line height).
    TextStyle,
}

impl MarkKind {
    pub fn name(self) -> &'static str {
        match self {
            MarkKind::TextStyle => "textStyle",
        }
    }
}

/// Node type as reported by the surface.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Div,
    Heading,
    Paragraph,
    ListItem,
    Image,
    Blockquote,
    Text,
    Other(SmolStr),
}

impl NodeKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "div" => NodeKind::Div,
            "heading" => NodeKind::Heading,
            "paragraph" => NodeKind::Paragraph,
            "listItem" => NodeKind::ListItem,
            "image" => NodeKind::Image,
            "blockquote" => NodeKind::Blockquote,
            "text" => NodeKind::Text,
            other => NodeKind::Other(SmolStr::new(other)),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NodeKind::Div => "div",
            NodeKind::Heading => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::ListItem => "listItem",
            NodeKind::Image => "image",
            NodeKind::Blockquote => "blockquote",
            NodeKind::Text => "text",
            NodeKind::Other(name) => name.as_str(),
        }
    }

    /// Whether the surface keeps a `style` attribute on this node type.
    pub fn carries_style(&self) -> bool {
        STYLED_NODE_TYPES.iter().any(|name| *name == self.name())
    }
}

impl From<BlockKind> for NodeKind {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Div => NodeKind::Div,
            BlockKind::Heading => NodeKind::Heading,
            BlockKind::Paragraph => NodeKind::Paragraph,
        }
    }
}

/// A node looked up in the surface's document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeInfo {
    pub kind: NodeKind,
    pub attrs: Attributes,
}

impl NodeInfo {
    pub fn new(kind: NodeKind, attrs: Attributes) -> Self {
        Self { kind, attrs }
    }
}

/// Commands issued against the surface.
///
/// Commands run in order as a single chain; the surface serializes the
/// resulting mutations internally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceCommand {
    /// Give the surface input focus.
    Focus,
    /// Replace the whole document.
    SetContent { html: String },
    /// Insert at the current selection.
    InsertContent { html: String },
    /// Insert at an explicit position.
    InsertContentAt { position: Position, html: String },
    /// Collapse the selection to a position.
    SetTextSelection { position: Position },
    /// Apply a mark with the given attributes over the selection.
    SetMark { mark: MarkKind, attrs: Attributes },
    /// Update the attributes of the active node of the given kind.
    UpdateAttributes { kind: BlockKind, attrs: Attributes },
    /// Scroll the selection into view.
    ScrollIntoView,
}

/// Events the surface reports to its listener.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Document content changed.
    Update,
    /// Selection moved.
    SelectionUpdate,
}

/// The editing surface as seen by the core.
///
/// Queries read the current document and selection. All mutation goes through
/// [`run_commands`](EditingSurface::run_commands), usually via
/// [`chain`](EditingSurface::chain).
pub trait EditingSurface {
    // === Required: queries ===

    /// Attributes of the given mark at the selection, empty if not applied.
    fn mark_attributes(&self, mark: MarkKind) -> Attributes;

    /// Attributes of the active node of the given kind, empty if inactive.
    fn node_attributes(&self, kind: BlockKind) -> Attributes;

    /// Whether the selection is inside a node of the given kind.
    fn is_active(&self, kind: BlockKind) -> bool;

    /// Serialize the current document.
    fn html(&self) -> String;

    /// Node starting at the selection anchor, if any.
    fn node_at_anchor(&self) -> Option<NodeInfo>;

    /// Depth of the selection anchor. Depth 0 is the document root.
    fn anchor_depth(&self) -> usize;

    /// Ancestor of the anchor at `depth`.
    fn ancestor(&self, depth: usize) -> Option<NodeInfo>;

    /// Position immediately after the ancestor at `depth`.
    fn position_after(&self, depth: usize) -> Option<Position>;

    // === Required: commands ===

    /// Run a command chain. Returns true if every command applied.
    fn run_commands(&mut self, commands: &[SurfaceCommand]) -> bool;

    // === Provided ===

    /// Start a command chain.
    fn chain(&mut self) -> CommandChain<'_, Self>
    where
        Self: Sized,
    {
        CommandChain::new(self)
    }
}

/// Builder collecting commands for a single [`EditingSurface::run_commands`] call.
#[must_use = "a command chain does nothing until `run` is called"]
pub struct CommandChain<'a, S: EditingSurface> {
    surface: &'a mut S,
    commands: Vec<SurfaceCommand>,
}

impl<'a, S: EditingSurface> CommandChain<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        Self {
            surface,
            commands: Vec::new(),
        }
    }

    pub fn focus(mut self) -> Self {
        self.commands.push(SurfaceCommand::Focus);
        self
    }

    pub fn set_content(mut self, html: impl Into<String>) -> Self {
        self.commands.push(SurfaceCommand::SetContent { html: html.into() });
        self
    }

    pub fn insert_content(mut self, html: impl Into<String>) -> Self {
        self.commands
            .push(SurfaceCommand::InsertContent { html: html.into() });
        self
    }

    pub fn insert_content_at(mut self, position: Position, html: impl Into<String>) -> Self {
        self.commands.push(SurfaceCommand::InsertContentAt {
            position,
            html: html.into(),
        });
        self
    }

    pub fn set_text_selection(mut self, position: Position) -> Self {
        self.commands
            .push(SurfaceCommand::SetTextSelection { position });
        self
    }

    pub fn set_mark(mut self, mark: MarkKind, attrs: Attributes) -> Self {
        self.commands.push(SurfaceCommand::SetMark { mark, attrs });
        self
    }

    pub fn update_attributes(mut self, kind: BlockKind, attrs: Attributes) -> Self {
        self.commands
            .push(SurfaceCommand::UpdateAttributes { kind, attrs });
        self
    }

    pub fn scroll_into_view(mut self) -> Self {
        self.commands.push(SurfaceCommand::ScrollIntoView);
        self
    }

    /// Commands collected so far.
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Hand the chain to the surface.
    pub fn run(self) -> bool {
        self.surface.run_commands(&self.commands)
    }
}
