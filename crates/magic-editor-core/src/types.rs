//! Core style types: block kinds, write targets and the canonical snapshot.
//!
//! These types are framework-agnostic and shared by the projector, the writer
//! and the material inserter.

use serde::{Deserialize, Serialize};

/// Block-level element kinds the editor styles directly.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Div,
    Heading,
    Paragraph,
}

impl BlockKind {
    /// Node type name as used by the editing surface.
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Div => "div",
            BlockKind::Heading => "heading",
            BlockKind::Paragraph => "paragraph",
        }
    }
}

/// Order in which enclosing blocks are probed when resolving or writing
/// block-level styles. The first active kind wins.
pub const BLOCK_PRIORITY: [BlockKind; 3] = [BlockKind::Div, BlockKind::Heading, BlockKind::Paragraph];

/// Properties written to the text-run mark rather than the enclosing block.
pub const TEXT_RUN_PROPERTIES: &[&str] = &["color", "font-size", "line-height"];

/// Where a style write lands.
///
/// Never stored: recomputed from the selection context on every write.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum StyleTarget {
    /// The `textStyle` mark over the current selection.
    TextRun,
    /// The style attribute of the enclosing block.
    Block(BlockKind),
}

/// Canonical style summary for the current selection.
///
/// Every field is always populated, falling back to the defaults from
/// [`StyleSnapshot::default`]. Snapshots are replaced wholesale on each
/// projection, never patched field by field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSnapshot {
    pub color: String,
    pub background_color: String,
    pub font_size: String,
    pub line_height: String,
    pub padding: String,
    pub margin: String,
    pub border_radius: String,
    pub text_align: String,
}

impl StyleSnapshot {
    pub const DEFAULT_COLOR: &'static str = "#000000";
    pub const DEFAULT_BACKGROUND: &'static str = "transparent";
    pub const DEFAULT_FONT_SIZE: &'static str = "16px";
    pub const DEFAULT_LINE_HEIGHT: &'static str = "1.6";
    pub const DEFAULT_SPACING: &'static str = "0px";
    pub const DEFAULT_TEXT_ALIGN: &'static str = "left";

    /// Fields in declaration order, paired with their serialized names.
    pub fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("color", self.color.as_str()),
            ("backgroundColor", self.background_color.as_str()),
            ("fontSize", self.font_size.as_str()),
            ("lineHeight", self.line_height.as_str()),
            ("padding", self.padding.as_str()),
            ("margin", self.margin.as_str()),
            ("borderRadius", self.border_radius.as_str()),
            ("textAlign", self.text_align.as_str()),
        ]
    }
}

impl Default for StyleSnapshot {
    fn default() -> Self {
        Self {
            color: Self::DEFAULT_COLOR.to_owned(),
            background_color: Self::DEFAULT_BACKGROUND.to_owned(),
            font_size: Self::DEFAULT_FONT_SIZE.to_owned(),
            line_height: Self::DEFAULT_LINE_HEIGHT.to_owned(),
            padding: Self::DEFAULT_SPACING.to_owned(),
            margin: Self::DEFAULT_SPACING.to_owned(),
            border_radius: Self::DEFAULT_SPACING.to_owned(),
            text_align: Self::DEFAULT_TEXT_ALIGN.to_owned(),
        }
    }
}
