//! Writing style edits back through the editing surface.

use crate::projector::project_styles;
use crate::style::StyleMap;
use crate::surface::{Attributes, EditingSurface, MarkKind};
use crate::types::{BLOCK_PRIORITY, BlockKind, StyleSnapshot, StyleTarget, TEXT_RUN_PROPERTIES};

/// Decide where a write of `property` lands for the current selection.
///
/// Text properties go to the `textStyle` mark. Everything else goes to the
/// first active block in [`BLOCK_PRIORITY`], or a paragraph if none is active.
pub fn style_target<S: EditingSurface>(surface: &S, property: &str) -> StyleTarget {
    if TEXT_RUN_PROPERTIES.iter().any(|p| *p == property) {
        return StyleTarget::TextRun;
    }
    let kind = BLOCK_PRIORITY
        .into_iter()
        .find(|kind| surface.is_active(*kind))
        .unwrap_or(BlockKind::Paragraph);
    StyleTarget::Block(kind)
}

/// Set `property` to `value` on the right target, then re-project.
///
/// The target's existing style string is parsed, updated and serialized back,
/// so unrelated declarations survive. An empty `value` drops the property.
/// The returned snapshot already reflects the write.
pub fn apply_style<S: EditingSurface>(surface: &mut S, property: &str, value: &str) -> StyleSnapshot {
    let target = style_target(surface, property);
    let current = match target {
        StyleTarget::TextRun => surface.mark_attributes(MarkKind::TextStyle),
        StyleTarget::Block(kind) => surface.node_attributes(kind),
    };

    let mut styles = StyleMap::parse(current.style());
    styles.insert(property, value);
    let attrs = Attributes::with_style(styles.serialize());

    let applied = match target {
        StyleTarget::TextRun => surface
            .chain()
            .focus()
            .set_mark(MarkKind::TextStyle, attrs)
            .run(),
        StyleTarget::Block(kind) => surface
            .chain()
            .focus()
            .update_attributes(kind, attrs)
            .run(),
    };
    tracing::debug!(property, value, ?target, applied, "applied style");

    project_styles(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PlainSurface;
    use crate::surface::SurfaceCommand;

    #[test]
    fn test_text_properties_target_mark() {
        let surface = PlainSurface::new("").with_active_block(BlockKind::Div, Attributes::default());
        for property in ["color", "font-size", "line-height"] {
            assert_eq!(style_target(&surface, property), StyleTarget::TextRun);
        }
        assert_eq!(style_target(&surface, "padding"), StyleTarget::Block(BlockKind::Div));
    }

    #[test]
    fn test_block_target_defaults_to_paragraph() {
        let surface = PlainSurface::new("");
        assert_eq!(
            style_target(&surface, "margin"),
            StyleTarget::Block(BlockKind::Paragraph)
        );

        let surface = PlainSurface::new("")
            .with_active_block(BlockKind::Paragraph, Attributes::default())
            .with_active_block(BlockKind::Heading, Attributes::default());
        assert_eq!(
            style_target(&surface, "margin"),
            StyleTarget::Block(BlockKind::Heading)
        );
    }

    #[test]
    fn test_background_on_active_div() {
        let mut surface = PlainSurface::new("<div><p>x</p></div>")
            .with_active_block(BlockKind::Div, Attributes::with_style("padding: 10px"))
            .with_active_block(BlockKind::Paragraph, Attributes::default());

        let snapshot = apply_style(&mut surface, "background-color", "#fafafa");

        assert_eq!(
            surface.node_attributes(BlockKind::Div).style(),
            "padding: 10px; background-color: #fafafa"
        );
        assert_eq!(surface.mark_attributes(MarkKind::TextStyle), Attributes::default());
        assert_eq!(snapshot.background_color, "#fafafa");
        assert_eq!(snapshot.padding, "10px");
    }

    #[test]
    fn test_color_merges_into_text_style() {
        let mut surface = PlainSurface::new("<p>x</p>").with_text_style("font-size: 14px; color: red");

        let snapshot = apply_style(&mut surface, "color", "rgb(0, 128, 0)");

        assert_eq!(
            surface.mark_attributes(MarkKind::TextStyle).style(),
            "font-size: 14px; color: rgb(0, 128, 0)"
        );
        assert_eq!(snapshot.color, "#008000");
        assert_eq!(snapshot.font_size, "14px");
        assert_eq!(
            surface.command_log(),
            &[
                SurfaceCommand::Focus,
                SurfaceCommand::SetMark {
                    mark: MarkKind::TextStyle,
                    attrs: Attributes::with_style("font-size: 14px; color: rgb(0, 128, 0)"),
                },
            ]
        );
    }

    #[test]
    fn test_empty_value_removes_property() {
        let mut surface = PlainSurface::new("")
            .with_active_block(BlockKind::Paragraph, Attributes::with_style("margin: 4px; padding: 2px"));

        let snapshot = apply_style(&mut surface, "margin", "");

        assert_eq!(surface.node_attributes(BlockKind::Paragraph).style(), "padding: 2px");
        assert_eq!(snapshot.margin, "0px");
    }
}
