//! In-memory editing surface.
//!
//! `PlainSurface` stores everything as plain fields: the document as an HTML
//! string, the selection as a byte offset into it, and the selection context
//! (active blocks, anchor node, ancestor chain) as scripted values. Use it for
//! headless export or as a base for testing.

use crate::surface::{
    Attributes, EditingSurface, MarkKind, NodeInfo, Position, SurfaceCommand,
};
use crate::types::BlockKind;

/// An ancestor of the selection anchor plus the position right after it.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Ancestor {
    node: NodeInfo,
    after: Position,
}

/// Simple field-based implementation of [`EditingSurface`].
#[derive(Clone, Debug, Default)]
pub struct PlainSurface {
    html: String,
    selection: Position,
    text_style: Attributes,
    active_blocks: Vec<(BlockKind, Attributes)>,
    anchor_node: Option<NodeInfo>,
    ancestors: Vec<Ancestor>,
    focused: bool,
    scroll_requests: usize,
    log: Vec<SurfaceCommand>,
}

impl PlainSurface {
    /// Create a surface holding `html`, selection at the end.
    pub fn new(html: impl Into<String>) -> Self {
        let html = html.into();
        Self {
            selection: html.len(),
            html,
            ..Self::default()
        }
    }

    /// Set the `textStyle` mark style at the selection.
    pub fn with_text_style(mut self, style: impl Into<String>) -> Self {
        self.text_style = Attributes::with_style(style);
        self
    }

    /// Mark a block kind as active with the given attributes.
    pub fn with_active_block(mut self, kind: BlockKind, attrs: Attributes) -> Self {
        self.set_active_block(kind, attrs);
        self
    }

    /// Set the node found at the selection anchor.
    pub fn with_anchor_node(mut self, node: NodeInfo) -> Self {
        self.anchor_node = Some(node);
        self
    }

    /// Push the next (deeper) ancestor of the anchor and the position after it.
    ///
    /// The first call sets depth 1, the next depth 2 and so on.
    pub fn with_ancestor(mut self, node: NodeInfo, after: Position) -> Self {
        self.ancestors.push(Ancestor { node, after });
        self
    }

    /// Move the selection. Clamped to the document and to a char boundary.
    pub fn with_selection(mut self, position: Position) -> Self {
        self.selection = self.clamp(position);
        self
    }

    pub fn set_active_block(&mut self, kind: BlockKind, attrs: Attributes) {
        match self.active_blocks.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, existing)) => *existing = attrs,
            None => self.active_blocks.push((kind, attrs)),
        }
    }

    pub fn selection(&self) -> Position {
        self.selection
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn scroll_requests(&self) -> usize {
        self.scroll_requests
    }

    /// Every command run against this surface, in order.
    pub fn command_log(&self) -> &[SurfaceCommand] {
        &self.log
    }

    fn clamp(&self, position: Position) -> Position {
        let mut pos = position.min(self.html.len());
        while !self.html.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn insert_at(&mut self, position: Position, html: &str) {
        let pos = self.clamp(position);
        self.html.insert_str(pos, html);
        self.selection = pos + html.len();
    }

    fn execute(&mut self, command: &SurfaceCommand) -> bool {
        match command {
            SurfaceCommand::Focus => {
                self.focused = true;
                true
            }
            SurfaceCommand::SetContent { html } => {
                self.html = html.clone();
                self.selection = self.html.len();
                true
            }
            SurfaceCommand::InsertContent { html } => {
                self.insert_at(self.selection, html);
                true
            }
            SurfaceCommand::InsertContentAt { position, html } => {
                self.insert_at(*position, html);
                true
            }
            SurfaceCommand::SetTextSelection { position } => {
                self.selection = self.clamp(*position);
                true
            }
            SurfaceCommand::SetMark { mark, attrs } => match mark {
                MarkKind::TextStyle => {
                    self.text_style = attrs.clone();
                    true
                }
            },
            SurfaceCommand::UpdateAttributes { kind, attrs } => {
                match self.active_blocks.iter_mut().find(|(k, _)| k == kind) {
                    Some((_, existing)) => {
                        *existing = attrs.clone();
                        true
                    }
                    // Updating an inactive node type is a no-op on real surfaces too.
                    None => false,
                }
            }
            SurfaceCommand::ScrollIntoView => {
                self.scroll_requests += 1;
                true
            }
        }
    }
}

impl EditingSurface for PlainSurface {
    fn mark_attributes(&self, mark: MarkKind) -> Attributes {
        match mark {
            MarkKind::TextStyle => self.text_style.clone(),
        }
    }

    fn node_attributes(&self, kind: BlockKind) -> Attributes {
        self.active_blocks
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, attrs)| attrs.clone())
            .unwrap_or_default()
    }

    fn is_active(&self, kind: BlockKind) -> bool {
        self.active_blocks.iter().any(|(k, _)| *k == kind)
    }

    fn html(&self) -> String {
        self.html.clone()
    }

    fn node_at_anchor(&self) -> Option<NodeInfo> {
        self.anchor_node.clone()
    }

    fn anchor_depth(&self) -> usize {
        self.ancestors.len()
    }

    fn ancestor(&self, depth: usize) -> Option<NodeInfo> {
        let idx = depth.checked_sub(1)?;
        self.ancestors.get(idx).map(|a| a.node.clone())
    }

    fn position_after(&self, depth: usize) -> Option<Position> {
        let idx = depth.checked_sub(1)?;
        self.ancestors.get(idx).map(|a| a.after)
    }

    fn run_commands(&mut self, commands: &[SurfaceCommand]) -> bool {
        let mut all_applied = true;
        for command in commands {
            all_applied &= self.execute(command);
            self.log.push(command.clone());
        }
        all_applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::NodeKind;

    #[test]
    fn test_insert_at_selection_moves_selection() {
        let mut surface = PlainSurface::new("<p>a</p><p>b</p>").with_selection(8);
        assert!(surface.chain().insert_content("<hr />").run());
        assert_eq!(surface.html(), "<p>a</p><hr /><p>b</p>");
        assert_eq!(surface.selection(), 14);

        surface.chain().insert_content("<p></p>").run();
        assert_eq!(surface.html(), "<p>a</p><hr /><p></p><p>b</p>");
    }

    #[test]
    fn test_insert_content_at_clamps() {
        let mut surface = PlainSurface::new("ab");
        surface.chain().insert_content_at(99, "c").run();
        assert_eq!(surface.html(), "abc");

        // Never splits a multi-byte char
        let mut surface = PlainSurface::new("é");
        surface.chain().insert_content_at(1, "x").run();
        assert_eq!(surface.html(), "xé");
    }

    #[test]
    fn test_set_content_replaces_document() {
        let mut surface = PlainSurface::new("<p>old</p>");
        surface.chain().focus().set_content("<p>new</p>").scroll_into_view().run();
        assert_eq!(surface.html(), "<p>new</p>");
        assert!(surface.is_focused());
        assert_eq!(surface.scroll_requests(), 1);
        assert_eq!(surface.command_log().len(), 3);
    }

    #[test]
    fn test_update_attributes_requires_active_block() {
        let mut surface = PlainSurface::new("")
            .with_active_block(BlockKind::Paragraph, Attributes::default());

        let applied = surface
            .chain()
            .update_attributes(BlockKind::Div, Attributes::with_style("padding: 4px"))
            .run();
        assert!(!applied);
        assert!(!surface.is_active(BlockKind::Div));

        surface
            .chain()
            .update_attributes(BlockKind::Paragraph, Attributes::with_style("padding: 4px"))
            .run();
        assert_eq!(surface.node_attributes(BlockKind::Paragraph).style(), "padding: 4px");
    }

    #[test]
    fn test_ancestor_depths() {
        let surface = PlainSurface::new("")
            .with_ancestor(NodeInfo::new(NodeKind::Div, Attributes::default()), 40)
            .with_ancestor(NodeInfo::new(NodeKind::Paragraph, Attributes::default()), 20);

        assert_eq!(surface.anchor_depth(), 2);
        assert_eq!(surface.ancestor(0), None);
        assert_eq!(surface.ancestor(1).map(|n| n.kind), Some(NodeKind::Div));
        assert_eq!(surface.position_after(2), Some(20));
        assert_eq!(surface.position_after(3), None);
    }
}
