//! HTML export: repair and normalize the surface's HTML for storage.
//!
//! The surface serializes whatever its document model holds. Before the result
//! is saved or handed to another renderer it goes through a fixed pipeline of
//! stages, each a pure `&str -> String` function. Order matters: later stages
//! assume earlier repairs are done (void tags are closed before styles are
//! rewritten, paragraph spacing is injected before empty paragraphs are
//! pruned).
//!
//! Stages 1-7 walk a tag-event stream from [`tokenizer`]. Stages 8-12 only
//! format whitespace, so running the pipeline on its own output changes
//! newline runs and nothing structural.

mod balance;
mod inline;
mod layout;
mod paragraph;
pub mod tokenizer;

#[cfg(test)]
mod tests;

pub use balance::balance_divs;
pub use inline::PRIORITY_PROPERTIES;
pub use paragraph::DEFAULT_PARAGRAPH_STYLE;

/// A single pipeline stage.
pub type Stage = fn(&str) -> String;

/// All stages, in the order they run.
pub const STAGES: &[(&str, Stage)] = &[
    ("balance_divs", balance::balance_divs),
    ("close_void_tags", inline::close_void_tags),
    ("normalize_inline_styles", inline::normalize_inline_styles),
    ("sections_to_divs", inline::sections_to_divs),
    ("normalize_paragraphs", paragraph::normalize_paragraphs),
    ("prune_empty_paragraphs", paragraph::prune_empty_paragraphs),
    ("embolden_strong", inline::embolden_strong),
    ("break_after_blocks", layout::break_after_blocks),
    ("close_container_gaps", layout::close_container_gaps),
    ("break_after_containers", layout::break_after_containers),
    ("collapse_blank_lines", layout::collapse_blank_lines),
    ("trim_document", layout::trim_document),
];

/// Run the full export pipeline over raw surface HTML.
pub fn export_html(raw: &str) -> String {
    let mut html = raw.to_owned();
    for (name, stage) in STAGES {
        let next = stage(&html);
        if tracing::enabled!(target: "magic_editor::export", tracing::Level::TRACE) && next != html {
            tracing::trace!(
                target: "magic_editor::export",
                stage = name,
                before = html.len(),
                after = next.len(),
                "stage rewrote html"
            );
        }
        html = next;
    }

    tracing::debug!(
        target: "magic_editor::export",
        input_len = raw.len(),
        output_len = html.len(),
        "exported html"
    );
    html
}
