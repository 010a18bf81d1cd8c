//! Lightweight tag-event tokenizer for the export pipeline.
//!
//! Splits HTML into text runs, start tags, end tags and everything else
//! (comments, doctypes, processing instructions). No entity decoding and no
//! tree building: tokens keep their source slice, and an untouched token is
//! rendered back byte for byte. Only tags a stage modifies are re-serialized.
//!
//! Tag and attribute names use the ASCII class `[A-Za-z0-9:_-]`. A `<` that
//! doesn't start a complete tag is kept as text.

use std::borrow::Cow;

use smol_str::SmolStr;

/// Quote style of an attribute value as written.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Quote {
    Double,
    Single,
    Unquoted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// Name as written.
    pub name: SmolStr,
    pub value: Option<String>,
    pub quote: Quote,
}

/// An opening tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartTag<'a> {
    raw: &'a str,
    raw_name: SmolStr,
    name: SmolStr,
    attrs: Vec<Attribute>,
    self_closing: bool,
    dirty: bool,
}

impl<'a> StartTag<'a> {
    /// Lowercased tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the attribute `name` (case-insensitive). Valueless attributes
    /// read as an empty string.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    /// Set an attribute, keeping its position and quote style if present.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attrs
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            Some(attr) => attr.value = Some(value),
            None => self.attrs.push(Attribute {
                name: SmolStr::new(name),
                value: Some(value),
                quote: Quote::Double,
            }),
        }
        self.dirty = true;
    }

    pub fn rename(&mut self, name: &str) {
        self.raw_name = SmolStr::new(name);
        self.name = SmolStr::new(name.to_ascii_lowercase());
        self.dirty = true;
    }

    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Whether the tag is written in the canonical `<x ... />` form.
    pub fn is_canonical_void(&self) -> bool {
        !self.dirty && self.raw.ends_with(" />")
    }

    pub fn set_self_closing(&mut self) {
        self.self_closing = true;
        self.dirty = true;
    }

    pub fn render(&self) -> Cow<'a, str> {
        if !self.dirty {
            return Cow::Borrowed(self.raw);
        }
        let mut out = String::with_capacity(self.raw.len() + 16);
        out.push('<');
        out.push_str(&self.raw_name);
        for attr in &self.attrs {
            out.push(' ');
            out.push_str(&attr.name);
            if let Some(value) = &attr.value {
                out.push('=');
                push_quoted(&mut out, value, attr.quote);
            }
        }
        out.push_str(if self.self_closing { " />" } else { ">" });
        Cow::Owned(out)
    }
}

/// Quote `value`, keeping the written style where the value allows it. A value
/// holding both quote characters is double quoted with `"` as `&quot;`.
fn push_quoted(out: &mut String, value: &str, written: Quote) {
    let has_double = value.contains('"');
    let has_single = value.contains('\'');
    let quote = match written {
        Quote::Single if !has_single => '\'',
        _ if !has_double => '"',
        _ if !has_single => '\'',
        _ => {
            out.push('"');
            out.push_str(&value.replace('"', "&quot;"));
            out.push('"');
            return;
        }
    };
    out.push(quote);
    out.push_str(value);
    out.push(quote);
}

/// A closing tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndTag<'a> {
    raw: Cow<'a, str>,
    name: SmolStr,
}

impl<'a> EndTag<'a> {
    /// Lowercased tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: &str) {
        self.name = SmolStr::new(name.to_ascii_lowercase());
        self.raw = Cow::Owned(format!("</{name}>"));
    }

    pub fn render(&self) -> &str {
        &self.raw
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Start(StartTag<'a>),
    End(EndTag<'a>),
    /// Comment, doctype or processing instruction, passed through verbatim.
    Other(&'a str),
}

impl<'a> Token<'a> {
    pub fn is_start(&self, name: &str) -> bool {
        matches!(self, Token::Start(tag) if tag.name() == name)
    }

    pub fn is_end(&self, name: &str) -> bool {
        matches!(self, Token::End(tag) if tag.name() == name)
    }

    pub fn render_into(&self, out: &mut String) {
        match self {
            Token::Text(text) | Token::Other(text) => out.push_str(text),
            Token::Start(tag) => out.push_str(&tag.render()),
            Token::End(tag) => out.push_str(tag.render()),
        }
    }
}

/// Serialize a token slice back to HTML.
pub fn render_tokens(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        token.render_into(&mut out);
    }
    out
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':')
}

fn scan_name(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_name_byte(bytes[i]) {
        i += 1;
    }
    i
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Tokenize `input`. Never fails; concatenating the rendered tokens yields
/// `input` again.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    // Start of the pending text run.
    let mut text_start = 0;
    let mut i = 0;

    // Slice endpoints only ever land on ASCII bytes, so they are char boundaries.
    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }

        let Some((token, end)) = scan_markup(input, i) else {
            i += 1;
            continue;
        };
        if text_start < i {
            tokens.push(Token::Text(&input[text_start..i]));
        }
        tokens.push(token);
        i = end;
        text_start = end;
    }

    if text_start < bytes.len() {
        tokens.push(Token::Text(&input[text_start..]));
    }
    tokens
}

/// Try to read a markup token at `start` (which holds `<`). Returns the token
/// and the index right after it, or `None` if this `<` is plain text.
fn scan_markup(input: &str, start: usize) -> Option<(Token<'_>, usize)> {
    let bytes = input.as_bytes();
    let rest = &input[start..];

    if rest.starts_with("<!--") {
        let end = match rest[4..].find("-->") {
            Some(offset) => start + 4 + offset + 3,
            None => input.len(),
        };
        return Some((Token::Other(&input[start..end]), end));
    }

    match *bytes.get(start + 1)? {
        b'!' | b'?' => {
            let end = start + rest.find('>')? + 1;
            Some((Token::Other(&input[start..end]), end))
        }
        b'/' => {
            let name_start = start + 2;
            let name_end = scan_name(bytes, name_start);
            if name_end == name_start || !bytes[name_start].is_ascii_alphabetic() {
                return None;
            }
            let end = start + rest.find('>')? + 1;
            let tag = EndTag {
                raw: Cow::Borrowed(&input[start..end]),
                name: SmolStr::new(input[name_start..name_end].to_ascii_lowercase()),
            };
            Some((Token::End(tag), end))
        }
        b if b.is_ascii_alphabetic() => scan_start_tag(input, start),
        _ => None,
    }
}

fn scan_start_tag(input: &str, start: usize) -> Option<(Token<'_>, usize)> {
    let bytes = input.as_bytes();
    let name_end = scan_name(bytes, start + 1);
    let raw_name = &input[start + 1..name_end];

    let mut attrs = Vec::new();
    let mut self_closing = false;
    let mut i = name_end;

    loop {
        i = skip_whitespace(bytes, i);
        match *bytes.get(i)? {
            b'>' => {
                i += 1;
                break;
            }
            b'/' => {
                if bytes.get(i + 1) == Some(&b'>') {
                    self_closing = true;
                    i += 2;
                    break;
                }
                i += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        if i == attr_start {
            // Stray `=`: skip it.
            i += 1;
            continue;
        }
        let name = SmolStr::new(&input[attr_start..i]);

        let after_name = skip_whitespace(bytes, i);
        if bytes.get(after_name) != Some(&b'=') {
            attrs.push(Attribute {
                name,
                value: None,
                quote: Quote::Unquoted,
            });
            continue;
        }

        i = skip_whitespace(bytes, after_name + 1);
        let (value, quote) = match *bytes.get(i)? {
            q @ (b'"' | b'\'') => {
                let close = input[i + 1..].find(q as char)?;
                let value = &input[i + 1..i + 1 + close];
                i += close + 2;
                let quote = if q == b'"' { Quote::Double } else { Quote::Single };
                (value, quote)
            }
            _ => {
                let value_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                (&input[value_start..i], Quote::Unquoted)
            }
        };
        attrs.push(Attribute {
            name,
            value: Some(value.to_owned()),
            quote,
        });
    }

    let tag = StartTag {
        raw: &input[start..i],
        raw_name: SmolStr::new(raw_name),
        name: SmolStr::new(raw_name.to_ascii_lowercase()),
        attrs,
        self_closing,
        dirty: false,
    };
    Some((Token::Start(tag), i))
}
