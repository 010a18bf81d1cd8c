//! Inserting authored HTML fragments ("material") into the document.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::surface::{EditingSurface, NodeKind};

/// Hidden paragraph that keeps an otherwise empty container alive when the
/// surface parses it.
pub const PLACEHOLDER_PARAGRAPH: &str = "<p style=\"margin: 0; padding: 0; height: 0; line-height: 0; visibility: hidden; overflow: hidden; font-size: 0;\">&nbsp;</p>";

/// Paragraph inserted after material so typing can continue below it.
const TRAILING_PARAGRAPH: &str = "<p></p>";

/// Where [`insert_material`] put the fragment.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum MaterialPlacement {
    /// Right after the innermost enclosing div, found at `depth`.
    AfterContainer { depth: usize },
    /// At the current selection.
    AtSelection,
}

fn empty_div_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)^(<div\b[^>]*>)\s*(</div>)$").unwrap())
}

fn section_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<section\b").unwrap())
}

fn section_close_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</section\s*>").unwrap())
}

fn div_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<div").unwrap())
}

/// Rewrite a fragment into something the surface keeps intact.
///
/// A lone empty `<div>` gets [`PLACEHOLDER_PARAGRAPH`] before its closing tag,
/// and `<section>` tags become `<div>` since the surface has no section node.
pub fn prepare_material(html: &str) -> String {
    let trimmed = html.trim();
    let filled: Cow<'_, str> = match empty_div_re().captures(trimmed) {
        Some(caps) => Cow::Owned(format!("{}{}{}", &caps[1], PLACEHOLDER_PARAGRAPH, &caps[2])),
        None => Cow::Borrowed(html),
    };

    let opened = section_open_re().replace_all(&filled, "<div");
    section_close_re().replace_all(&opened, "</div>").into_owned()
}

/// Whether the fragment contains block containers.
pub fn is_block_material(html: &str) -> bool {
    div_open_re().is_match(html)
}

/// Insert a material fragment and report where it went.
///
/// Block material escapes the innermost enclosing div so containers never
/// nest inside each other. Everything else goes in at the selection. Either
/// way an empty paragraph follows the fragment and the result is scrolled
/// into view.
pub fn insert_material<S: EditingSurface>(surface: &mut S, html: &str) -> MaterialPlacement {
    let material = prepare_material(html);

    if is_block_material(&material) {
        let container = (1..=surface.anchor_depth()).rev().find_map(|depth| {
            let node = surface.ancestor(depth)?;
            if node.kind != NodeKind::Div {
                return None;
            }
            surface.position_after(depth).map(|after| (depth, after))
        });

        if let Some((depth, after)) = container {
            surface
                .chain()
                .set_text_selection(after)
                .insert_content(material)
                .insert_content(TRAILING_PARAGRAPH)
                .scroll_into_view()
                .run();
            tracing::debug!(depth, after, "inserted material after container");
            return MaterialPlacement::AfterContainer { depth };
        }
    }

    surface
        .chain()
        .focus()
        .insert_content(material)
        .insert_content(TRAILING_PARAGRAPH)
        .scroll_into_view()
        .run();
    tracing::debug!("inserted material at selection");
    MaterialPlacement::AtSelection
}

/// Replace the whole document, e.g. when applying a template.
pub fn replace_content<S: EditingSurface>(surface: &mut S, html: &str) {
    surface
        .chain()
        .focus()
        .set_content(html)
        .scroll_into_view()
        .run();
}
