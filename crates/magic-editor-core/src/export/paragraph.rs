//! Paragraph cleanup: content whitespace, default spacing, empty removal.

use std::sync::OnceLock;

use regex::Regex;

use crate::style::StyleMap;

use super::inline::append_declaration;
use super::tokenizer::{StartTag, Token, render_tokens, tokenize};

/// Style given to paragraphs that have none.
pub const DEFAULT_PARAGRAPH_STYLE: &str = "margin-bottom: 10px; line-height: 1.6;";

fn whitespace_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn line_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\s*<br\b[^>]*>\s*").unwrap())
}

/// For every token index, the index of the first `</p>` after it.
///
/// A paragraph opened at `i` closes at `closes[i]`, whatever sits in between.
/// Built in one backward pass so pairing stays linear on unclosed input.
fn paragraph_closes(tokens: &[Token<'_>]) -> Vec<Option<usize>> {
    let mut closes = vec![None; tokens.len()];
    let mut next = None;
    for (i, token) in tokens.iter().enumerate().rev() {
        closes[i] = next;
        if token.is_end("p") {
            next = Some(i);
        }
    }
    closes
}

fn is_line_break(token: &Token<'_>) -> bool {
    token.is_start("br") || token.is_end("br")
}

/// Element markup other than line breaks.
fn is_nested_markup(token: &Token<'_>) -> bool {
    match token {
        Token::Start(tag) => tag.name() != "br",
        Token::Other(_) => true,
        Token::Text(_) | Token::End(_) => false,
    }
}

/// Clean paragraph content and give every paragraph its spacing.
///
/// Flat content gets whitespace runs collapsed and `<br>` variants rewritten
/// to a bare `<br />`. Content with nested elements is only trimmed.
pub fn normalize_paragraphs(html: &str) -> String {
    let tokens = tokenize(html);
    let closes = paragraph_closes(&tokens);
    let mut out = String::with_capacity(html.len() + html.len() / 4);
    let mut i = 0;

    while i < tokens.len() {
        let paragraph = match &tokens[i] {
            Token::Start(tag) if tag.name() == "p" => {
                closes[i].map(|close| (tag.clone(), close))
            }
            _ => None,
        };
        let Some((mut tag, close)) = paragraph else {
            tokens[i].render_into(&mut out);
            i += 1;
            continue;
        };

        apply_paragraph_spacing(&mut tag);
        out.push_str(&tag.render());
        out.push_str(&clean_content(&tokens[i + 1..close]));
        tokens[close].render_into(&mut out);
        i = close + 1;
    }
    out
}

fn clean_content(content: &[Token<'_>]) -> String {
    let raw = render_tokens(content);
    if content.iter().any(is_nested_markup) {
        return raw.trim().to_owned();
    }
    let collapsed = whitespace_run_re().replace_all(&raw, " ");
    line_break_re()
        .replace_all(&collapsed, "<br />")
        .trim()
        .to_owned()
}

fn apply_paragraph_spacing(tag: &mut StartTag<'_>) {
    let Some(style) = tag.attr("style").map(str::to_owned) else {
        tag.set_attr("style", DEFAULT_PARAGRAPH_STYLE);
        return;
    };

    let styles = StyleMap::parse(&style);
    let mut updated = style;
    let mut changed = false;
    if !styles.contains_key("margin-bottom") {
        updated = append_declaration(&updated, "margin-bottom: 10px");
        changed = true;
    }
    if !styles.contains_key("line-height") {
        updated = append_declaration(&updated, "line-height: 1.6");
        changed = true;
    }
    if changed {
        tag.set_attr("style", updated);
    }
}

/// Drop paragraphs that render as nothing.
///
/// Empty, whitespace-only and lone-`<br>` paragraphs go. Spacer paragraphs
/// (a zero `height` in their style) stay even when empty. Divs are never
/// touched.
pub fn prune_empty_paragraphs(html: &str) -> String {
    let tokens = tokenize(html);
    let closes = paragraph_closes(&tokens);
    let mut out = String::with_capacity(html.len());
    let mut removed = 0usize;
    let mut i = 0;

    while i < tokens.len() {
        if let Some(close) = removable_paragraph(&tokens, i, closes[i]) {
            removed += 1;
            i = close + 1;
            continue;
        }
        tokens[i].render_into(&mut out);
        i += 1;
    }

    if removed > 0 {
        tracing::trace!(removed, "pruned empty paragraphs");
    }
    out
}

fn removable_paragraph(tokens: &[Token<'_>], open: usize, close: Option<usize>) -> Option<usize> {
    let Token::Start(tag) = &tokens[open] else {
        return None;
    };
    if tag.name() != "p" || is_spacer(tag) {
        return None;
    }
    let close = close?;
    is_visually_empty(&tokens[open + 1..close]).then_some(close)
}

fn is_spacer(tag: &StartTag<'_>) -> bool {
    tag.attr("style")
        .and_then(|style| {
            StyleMap::parse(style)
                .get("height")
                .map(is_zero_length)
        })
        .unwrap_or(false)
}

/// `0`, `0px`, `0.0em` and the like.
fn is_zero_length(value: &str) -> bool {
    let number = value.trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%');
    !number.is_empty() && number.parse::<f64>().is_ok_and(|n| n == 0.0)
}

fn is_visually_empty(content: &[Token<'_>]) -> bool {
    let mut breaks = 0;
    for token in content {
        match token {
            Token::Text(text) if text.trim().is_empty() => {}
            t if is_line_break(t) => breaks += 1,
            _ => return false,
        }
    }
    breaks <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_content_collapsed() {
        assert_eq!(
            normalize_paragraphs("<p>  a \n\t b <BR>  c <br/> </p>"),
            "<p style=\"margin-bottom: 10px; line-height: 1.6;\">a b<br />c<br /></p>"
        );
    }

    #[test]
    fn test_nested_content_only_trimmed() {
        assert_eq!(
            normalize_paragraphs("<p>\n  a  <em>b</em>\n</p>"),
            "<p style=\"margin-bottom: 10px; line-height: 1.6;\">a  <em>b</em></p>"
        );
    }

    #[test]
    fn test_styled_paragraph_gets_missing_spacing() {
        assert_eq!(
            normalize_paragraphs("<p style=\"color: red;\">x</p>"),
            "<p style=\"color: red; margin-bottom: 10px; line-height: 1.6\">x</p>"
        );
        assert_eq!(
            normalize_paragraphs("<p style=\"\">x</p>"),
            "<p style=\"margin-bottom: 10px; line-height: 1.6\">x</p>"
        );
        let complete = "<p style=\"line-height: 2; margin-bottom: 0px\">x</p>";
        assert_eq!(normalize_paragraphs(complete), complete);
    }

    #[test]
    fn test_other_tags_untouched() {
        let html = "<pre>  a  </pre><param name=x><p>unclosed";
        assert_eq!(normalize_paragraphs(html), html);
    }

    #[test]
    fn test_prune_empty_paragraphs() {
        let html = "<p></p><p style=\"a: b\"> \n </p><p><br /></p><p> <BR> </p><p>x</p><p><br><br></p>";
        assert_eq!(prune_empty_paragraphs(html), "<p>x</p><p><br><br></p>");
    }

    #[test]
    fn test_spacer_survives_pruning() {
        let html = "<div style=\"color: red\"><p style=\"margin: 0; height: 0; visibility: hidden\"></p></div>";
        assert_eq!(prune_empty_paragraphs(html), html);

        // Only an actual zero height protects
        let html = "<p style=\"line-height: 0\"></p><p style=\"height: 10px\"> </p>";
        assert_eq!(prune_empty_paragraphs(html), "");
    }

    #[test]
    fn test_empty_divs_kept() {
        let html = "<div style=\"height: 2px; background: #eee\"></div><div></div>";
        assert_eq!(prune_empty_paragraphs(html), html);
    }

    #[test]
    fn test_paragraph_closes_pair_with_next_close() {
        let tokens = tokenize("<p>a<p>b</p>c</p>");
        let closes = paragraph_closes(&tokens);
        assert_eq!(closes[0], Some(4));
        assert_eq!(closes[2], Some(4));
        assert_eq!(closes[4], Some(6));
        assert_eq!(closes[6], None);
    }

    #[test]
    fn test_many_unclosed_paragraphs() {
        let html = "<p>a".repeat(50_000);
        assert_eq!(normalize_paragraphs(&html), html);
        assert_eq!(prune_empty_paragraphs(&html), html);

        // Every open pairs with the single trailing close. Only the last
        // paragraph has nothing but whitespace before it.
        let html = format!("{}</p>", "<p> ".repeat(50_000));
        assert_eq!(prune_empty_paragraphs(&html), "<p> ".repeat(49_999));
    }

    #[test]
    fn test_zero_lengths() {
        for value in ["0", "0px", "0.0em", "0%"] {
            assert!(is_zero_length(value), "{value}");
        }
        for value in ["", "auto", "1px", "0.5", "px"] {
            assert!(!is_zero_length(value), "{value}");
        }
    }
}
