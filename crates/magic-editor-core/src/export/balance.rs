//! Div balance repair.

use super::tokenizer::{Token, render_tokens, tokenize};

/// Make `<div>` nesting well formed.
///
/// Walks the tag stream with a stack of open divs. A `</div>` with nothing
/// open is dropped, and every div still open at the end is closed. Other
/// tags are not checked. Well-formed input comes back unchanged.
pub fn balance_divs(html: &str) -> String {
    let tokens = tokenize(html);
    let mut kept = Vec::with_capacity(tokens.len());
    let mut open = 0usize;
    let mut dropped = 0usize;

    for token in tokens {
        if token.is_start("div") {
            open += 1;
        } else if token.is_end("div") {
            if open == 0 {
                dropped += 1;
                continue;
            }
            open -= 1;
        }
        kept.push(token);
    }

    if dropped == 0 && open == 0 {
        return html.to_owned();
    }
    tracing::trace!(dropped, appended = open, "repaired div nesting");

    let mut out = render_tokens(&kept);
    for _ in 0..open {
        out.push_str("</div>");
    }
    out
}

/// Count of `(<div…>, </div>)` tags.
#[cfg(test)]
pub(crate) fn div_counts(html: &str) -> (usize, usize) {
    tokenize(html)
        .iter()
        .fold((0, 0), |(opens, closes), token| match token {
            t if t.is_start("div") => (opens + 1, closes),
            t if t.is_end("div") => (opens, closes + 1),
            _ => (opens, closes),
        })
}

/// Whether a stack scan over `html` never closes a div that isn't open.
#[cfg(test)]
pub(crate) fn never_underflows(html: &str) -> bool {
    let mut depth = 0usize;
    for token in tokenize(html) {
        if token.is_start("div") {
            depth += 1;
        } else if token.is_end("div") {
            let Some(next) = depth.checked_sub(1) else {
                return false;
            };
            depth = next;
        }
    }
    true
}
