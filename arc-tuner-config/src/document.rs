//! In-memory sectioned key/value document and its INI text form.
//!
//! Sections and keys keep their insertion order so a file that is read and
//! written back changes only the values that were edited. Entries that no
//! setting definition knows about are carried along untouched.

use crate::error::ConfigError;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One `[name]` block of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or overwrite `key`. New keys are appended.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A whole config file: ordered sections of ordered `key=value` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    sections: Vec<Section>,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INI text leniently.
    ///
    /// Blank lines, lines without `=` and lines before the first section
    /// header are skipped. Keys and values are trimmed; a line such as
    /// `=value` is kept under the empty key.
    /// Section names are taken verbatim from between the brackets. A repeated
    /// header continues the earlier section; a repeated key keeps the last
    /// value.
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::new();
        let mut current: Option<usize> = None;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        for (line_no, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
                current = Some(doc.section_index(&line[1..line.len() - 1]));
                continue;
            }

            match (current, line.split_once('=')) {
                (Some(idx), Some((key, value))) => {
                    doc.sections[idx].set(key.trim(), value.trim());
                }
                _ => log::trace!("Skipping config line {}: {:?}", line_no + 1, line),
            }
        }
        doc
    }

    /// Index of section `name`, appending an empty one if absent.
    fn section_index(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        }
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Write `key` into `section`, creating the section when needed. No type
    /// checking happens here.
    pub fn set(&mut self, section: &str, key: impl Into<String>, value: impl Into<String>) {
        let idx = self.section_index(section);
        self.sections[idx].set(key, value);
    }

    /// Remove one entry. Empty sections are kept so their position survives.
    pub fn remove(&mut self, section: &str, key: &str) -> Option<String> {
        self.sections
            .iter_mut()
            .find(|s| s.name == section)
            .and_then(|s| s.remove(key))
    }

    pub fn contains(&self, section: &str, key: &str) -> bool {
        self.section(section).is_some_and(|s| s.contains(key))
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of entries across all sections.
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Check that every name survives a write/read cycle: no line breaks
    /// anywhere and no `=` in a key.
    pub fn validate_for_write(&self) -> Result<(), ConfigError> {
        let has_break = |s: &str| s.contains(['\n', '\r']);
        for section in &self.sections {
            if has_break(&section.name) {
                return Err(ConfigError::Validation(format!(
                    "section name {:?} contains a line break",
                    section.name
                )));
            }
            for (key, value) in &section.entries {
                if key.contains('=') || has_break(key) {
                    return Err(ConfigError::Validation(format!(
                        "key {key:?} in [{}] cannot be written",
                        section.name
                    )));
                }
                if has_break(value) {
                    return Err(ConfigError::Validation(format!(
                        "value of {key} in [{}] contains a line break",
                        section.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Serializes to the on-disk INI form: header, entries, one blank line after
/// each section.
impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in &section.entries {
                writeln!(f, "{key}={value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ── Serde: nested object {section: {key: value}} with order preserved ────

struct EntriesRef<'a>(&'a [(String, String)]);

impl Serialize for EntriesRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for ConfigDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.name, &EntriesRef(&section.entries))?;
        }
        map.end()
    }
}

struct OrderedEntries(Vec<(String, String)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of setting keys to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, String)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    match entries.iter_mut().find(|(k, _)| *k == key) {
                        Some((_, existing)) => *existing = value,
                        None => entries.push((key, value)),
                    }
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl<'de> Deserialize<'de> for ConfigDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = ConfigDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of section names to key/value maps")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut doc = ConfigDocument::new();
                while let Some((name, OrderedEntries(entries))) =
                    access.next_entry::<String, OrderedEntries>()?
                {
                    let idx = doc.section_index(&name);
                    for (key, value) in entries {
                        doc.sections[idx].set(key, value);
                    }
                }
                Ok(doc)
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}
