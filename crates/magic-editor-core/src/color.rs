//! Color value normalization.
//!
//! Two flavors live here. [`normalize_color`] feeds the style panel and is
//! total: whatever comes in, a 6/8-digit hex color or `transparent` comes out.
//! [`normalize_inline_color`] is used by the exporter and only rewrites what
//! it recognizes, passing everything else through untouched.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// Returned for anything [`normalize_color`] can't interpret.
pub const FALLBACK_COLOR: &str = "#000000";

const NAMED_COLORS: &[(&str, &str)] = &[
    ("red", "#ff0000"),
    ("green", "#008000"),
    ("blue", "#0000ff"),
    ("white", "#ffffff"),
    ("black", "#000000"),
    ("gray", "#808080"),
    ("grey", "#808080"),
];

fn rgb_function_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*[\d.]+%?\s*)?\)$").unwrap()
    })
}

fn inline_rgb_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)rgb\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)").unwrap())
}

/// Normalize a color for display in the style panel.
///
/// - `transparent` stays as is
/// - `rgb()`/`rgba()` become `#rrggbb`, alpha is dropped
/// - `#abc` expands to `#aabbcc`, 6- and 8-digit hex pass through
/// - a handful of named colors map to hex
/// - everything else, including `hsl()`, becomes [`FALLBACK_COLOR`]
pub fn normalize_color(value: &str) -> String {
    let color = value.trim();
    if color.eq_ignore_ascii_case("transparent") {
        return "transparent".to_owned();
    }

    let lower = color.to_ascii_lowercase();
    if lower.starts_with("rgb") {
        return rgb_function_re()
            .captures(&lower)
            .map(|caps| hex_from_channels(&caps[1], &caps[2], &caps[3]))
            .unwrap_or_else(|| FALLBACK_COLOR.to_owned());
    }
    // HSL isn't converted.
    if lower.starts_with("hsl") {
        return FALLBACK_COLOR.to_owned();
    }

    if let Some(hex) = color.strip_prefix('#') {
        if hex.chars().all(|c| c.is_ascii_hexdigit()) {
            match hex.len() {
                3 => return expand_short_hex(hex),
                6 | 8 => return color.to_owned(),
                _ => {}
            }
        }
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, hex)| (*hex).to_owned())
        .unwrap_or_else(|| FALLBACK_COLOR.to_owned())
}

/// Normalize a color-bearing declaration value during export.
///
/// Every `rgb(r, g, b)` occurrence becomes `#rrggbb` and a bare `#abc` value
/// expands to `#aabbcc`. Unlike [`normalize_color`], unrecognized values
/// (`rgba()`, `hsl()`, names, gradients) are returned unchanged.
pub fn normalize_inline_color(value: &str) -> Cow<'_, str> {
    let replaced = inline_rgb_re().replace_all(value, |caps: &regex::Captures<'_>| {
        hex_from_channels(&caps[1], &caps[2], &caps[3])
    });

    let trimmed = replaced.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        if hex.len() == 3 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Cow::Owned(expand_short_hex(hex));
        }
    }
    replaced
}

fn hex_from_channels(r: &str, g: &str, b: &str) -> String {
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

/// Decimal channel clamped to 0..=255. Digit strings only fail on overflow.
fn channel(digits: &str) -> u8 {
    digits
        .parse::<u32>()
        .map(|n| n.min(255) as u8)
        .unwrap_or(u8::MAX)
}

fn expand_short_hex(hex: &str) -> String {
    let mut out = String::with_capacity(7);
    out.push('#');
    for c in hex.chars() {
        out.push(c);
        out.push(c);
    }
    out
}
