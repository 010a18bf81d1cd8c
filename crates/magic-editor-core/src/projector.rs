//! Projection of the selection's style context into a [`StyleSnapshot`].
//!
//! Text-run styles come from the `textStyle` mark; block styles from the node
//! at the anchor or, failing that, the first active block in
//! [`BLOCK_PRIORITY`]. Each snapshot field then takes the first non-empty
//! source in a fixed order, or its default.

use crate::color::normalize_color;
use crate::style::StyleMap;
use crate::surface::{EditingSurface, MarkKind};
use crate::types::{BLOCK_PRIORITY, StyleSnapshot};

/// Read the current selection context and build a fresh snapshot.
pub fn project_styles<S: EditingSurface>(surface: &S) -> StyleSnapshot {
    let text_style = surface.mark_attributes(MarkKind::TextStyle);
    let block_style = resolve_block_style(surface);

    let snapshot = snapshot_from_styles(
        &StyleMap::parse(text_style.style()),
        &StyleMap::parse(&block_style),
    );
    tracing::trace!(?snapshot, "projected styles");
    snapshot
}

/// Style string of the block enclosing the selection.
///
/// A styled node at the anchor wins; otherwise the active blocks are probed
/// in priority order and the first non-empty style is used.
pub fn resolve_block_style<S: EditingSurface>(surface: &S) -> String {
    if let Some(node) = surface.node_at_anchor() {
        if node.kind.carries_style() && !node.attrs.style().trim().is_empty() {
            return node.attrs.style().to_owned();
        }
    }

    BLOCK_PRIORITY
        .iter()
        .map(|kind| surface.node_attributes(*kind))
        .find(|attrs| !attrs.style().trim().is_empty())
        .and_then(|attrs| attrs.style)
        .unwrap_or_default()
}

/// Resolve every snapshot field from parsed text and block styles.
pub fn snapshot_from_styles(text: &StyleMap, block: &StyleMap) -> StyleSnapshot {
    let raw_color = text
        .get("color")
        .or_else(|| block.get("color"))
        .unwrap_or(StyleSnapshot::DEFAULT_COLOR);

    let raw_background = block
        .first_of(&["background-color", "backgroundColor", "background"])
        .unwrap_or(StyleSnapshot::DEFAULT_BACKGROUND);
    let background_color = if raw_background == "transparent" {
        raw_background.to_owned()
    } else {
        normalize_color(raw_background)
    };

    let font_size = text
        .first_of(&["font-size", "fontSize"])
        .or_else(|| block.first_of(&["font-size", "fontSize"]))
        .unwrap_or(StyleSnapshot::DEFAULT_FONT_SIZE);

    let line_height = text
        .get("line-height")
        .or_else(|| block.get("line-height"))
        .unwrap_or(StyleSnapshot::DEFAULT_LINE_HEIGHT);

    StyleSnapshot {
        color: normalize_color(raw_color),
        background_color,
        font_size: font_size.to_owned(),
        line_height: line_height.to_owned(),
        padding: block
            .get("padding")
            .unwrap_or(StyleSnapshot::DEFAULT_SPACING)
            .to_owned(),
        margin: block
            .get("margin")
            .unwrap_or(StyleSnapshot::DEFAULT_SPACING)
            .to_owned(),
        border_radius: block
            .first_of(&["border-radius", "borderRadius"])
            .unwrap_or(StyleSnapshot::DEFAULT_SPACING)
            .to_owned(),
        text_align: block
            .first_of(&["text-align", "textAlign"])
            .unwrap_or(StyleSnapshot::DEFAULT_TEXT_ALIGN)
            .to_owned(),
    }
}
