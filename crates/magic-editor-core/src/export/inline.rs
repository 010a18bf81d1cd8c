//! Per-tag rewrites: void tags, inline styles, sections and `<strong>`.

use crate::color::normalize_inline_color;
use crate::style::StyleMap;

use super::tokenizer::{StartTag, Token, render_tokens, tokenize};

/// Properties written last, in this order, when a style is reassembled.
pub const PRIORITY_PROPERTIES: [&str; 4] = ["margin-bottom", "box-sizing", "display", "border-radius"];

/// Properties where a bare number means pixels.
const PIXEL_PROPERTIES: &[&str] = &[
    "font-size",
    "margin",
    "margin-top",
    "margin-bottom",
    "margin-left",
    "margin-right",
    "padding",
    "padding-top",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "border-radius",
];

const VOID_TAGS: &[&str] = &["br", "hr", "img"];

const FLEX_PROPERTIES: &[&str] = &["flex-wrap", "justify-content", "align-items"];

/// Declarations appended to a styled `<section>` when its key is missing.
const SECTION_LAYOUT: [(&str, &str); 3] = [
    ("display", "display: block"),
    ("box-sizing", "box-sizing: border-box"),
    ("margin-bottom", "margin-bottom: 20px"),
];

/// Rewrite every start tag with `f`, leaving everything else as is.
fn map_start_tags(html: &str, mut f: impl FnMut(&mut StartTag<'_>)) -> String {
    let mut tokens = tokenize(html);
    for token in &mut tokens {
        if let Token::Start(tag) = token {
            f(tag);
        }
    }
    render_tokens(&tokens)
}

/// `<br>`, `<hr>` and `<img …>` in `<x … />` form.
pub fn close_void_tags(html: &str) -> String {
    map_start_tags(html, |tag| {
        if VOID_TAGS.iter().any(|t| *t == tag.name()) && !tag.is_canonical_void() {
            tag.set_self_closing();
        }
    })
}

/// Normalize every non-empty `style` attribute.
pub fn normalize_inline_styles(html: &str) -> String {
    map_start_tags(html, |tag| {
        let Some(style) = tag.attr("style") else {
            return;
        };
        if style.is_empty() {
            return;
        }
        let mut styles = StyleMap::parse(style);
        normalize_declarations(&mut styles);
        if tag.name() == "div" {
            force_block_layout(&mut styles);
        }
        let normalized = styles.serialize_with_priority(&PRIORITY_PROPERTIES);
        if normalized != style {
            tag.set_attr("style", normalized);
        }
    })
}

fn normalize_declarations(styles: &mut StyleMap) {
    for (key, value) in styles.values_mut() {
        if key == "font-weight" {
            let weight = match value.as_str() {
                "bold" => Some("700"),
                "normal" => Some("400"),
                _ => None,
            };
            if let Some(weight) = weight {
                *value = weight.into();
            }
        }
        if PIXEL_PROPERTIES.iter().any(|p| *p == key) && is_bare_number(value) {
            *value = format!("{value}px").into();
        }
        if key.contains("color") || key.contains("background") {
            let normalized = normalize_inline_color(value).into_owned();
            if normalized != value.as_str() {
                *value = normalized.into();
            }
        }
    }
}

/// Keep divs laid out as blocks with a bottom gap.
fn force_block_layout(styles: &mut StyleMap) {
    styles.insert_if_absent("box-sizing", "border-box");

    let is_flex_layout = FLEX_PROPERTIES.iter().any(|p| styles.contains_key(p));
    if !is_flex_layout {
        styles.insert_if_absent("display", "block");
    }

    let has_margin_bottom = styles.contains_key("margin-bottom")
        || styles.get("margin").is_some_and(|m| m.contains("px"));
    if !has_margin_bottom && styles.get("display") != Some("flex") {
        styles.insert("margin-bottom", "20px");
    }
}

/// A plain number such as `12`, `-4` or `1.5`, with no unit.
fn is_bare_number(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let mut seen_digit = false;
    let mut seen_dot = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}

/// Turn `<section>` into `<div>`, giving styled sections the div layout.
pub fn sections_to_divs(html: &str) -> String {
    let mut tokens = tokenize(html);
    for token in &mut tokens {
        match token {
            Token::Start(tag) if tag.name() == "section" => {
                if let Some(style) = tag.attr("style") {
                    let present = StyleMap::parse(style);
                    let mut style = style.to_owned();
                    for (key, declaration) in SECTION_LAYOUT {
                        if !present.contains_key(key) {
                            style = append_declaration(&style, declaration);
                        }
                    }
                    tag.set_attr("style", style);
                }
                tag.rename("div");
            }
            Token::End(tag) if tag.name() == "section" => tag.rename("div"),
            _ => {}
        }
    }
    render_tokens(&tokens)
}

/// Give every `<strong>` an explicit `font-weight: 700`.
pub fn embolden_strong(html: &str) -> String {
    map_start_tags(html, |tag| {
        if tag.name() != "strong" {
            return;
        }
        match tag.attr("style") {
            None => tag.set_attr("style", "font-weight: 700"),
            Some(style) if StyleMap::parse(style).contains_key("font-weight") => {}
            Some(style) => {
                let style = append_declaration(style, "font-weight: 700");
                tag.set_attr("style", style);
            }
        }
    })
}

/// Append `declaration` to a style string, dropping any trailing `;` first.
pub(super) fn append_declaration(style: &str, declaration: &str) -> String {
    let base = style.trim().trim_end_matches(';').trim_end();
    if base.is_empty() {
        declaration.to_owned()
    } else {
        format!("{base}; {declaration}")
    }
}
