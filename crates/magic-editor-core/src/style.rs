//! Inline style strings as ordered property maps.
//!
//! `"color: red; font-size: 14px"` parses into an insertion-ordered map and
//! serializes back in the same order. Both the live style panel and the export
//! pipeline go through this type, so they agree on what a declaration is.

use std::fmt;

use smol_str::SmolStr;

/// Ordered CSS declaration list.
///
/// Keys are unique. Re-inserting an existing key replaces its value in place,
/// so the key keeps its original position. Keys are stored as written, no case
/// folding, which keeps camelCase fallbacks like `backgroundColor` addressable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<(SmolStr, SmolStr)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a declaration list.
    ///
    /// Splits on `;`, then each rule on its first `:`. Rules with an empty
    /// property or value after trimming are dropped. Later declarations win.
    pub fn parse(style: &str) -> Self {
        let mut map = Self::new();
        for rule in style.split(';') {
            let Some((key, value)) = rule.split_once(':') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                continue;
            }
            map.insert(key, value);
        }
        map
    }

    /// Set `key` to `value`, keeping the key's position if already present.
    pub fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = SmolStr::new(value),
            None => self.entries.push((SmolStr::new(key), SmolStr::new(value))),
        }
    }

    /// Insert only when `key` has no non-empty value yet.
    ///
    /// Returns true if the value was inserted.
    pub fn insert_if_absent(&mut self, key: &str, value: &str) -> bool {
        if self.get(key).is_some() {
            return false;
        }
        self.insert(key, value);
        true
    }

    pub fn remove(&mut self, key: &str) -> Option<SmolStr> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Value for `key`, treating empty values as missing.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// First non-empty value among `keys`, in order.
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Mutable access to values, in order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = (&str, &mut SmolStr)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as `"key: value; key: value"`, skipping empty values.
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Serialize with `priority` keys moved to the end in the given order.
    ///
    /// Later declarations take precedence in some consumers, so properties the
    /// exporter forces are written last.
    pub fn serialize_with_priority(&self, priority: &[&str]) -> String {
        let normal = self
            .iter()
            .filter(|(k, _)| !priority.iter().any(|p| p == k));
        let prioritized = priority
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)));
        join_declarations(normal.chain(prioritized))
    }
}

fn join_declarations<'a>(declarations: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    let mut out = String::new();
    for (key, value) in declarations.filter(|(_, v)| !v.is_empty()) {
        if !out.is_empty() {
            out.push_str("; ");
        }
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
    }
    out
}

impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_declarations(self.iter()))
    }
}

impl From<&str> for StyleMap {
    fn from(style: &str) -> Self {
        Self::parse(style)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
