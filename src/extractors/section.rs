// src/extractors/section.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

// --- Constants ---
/// Marker that opens a level-3 heading and terminates any section body.
const HEADING_MARKER: &str = "###";

// --- Regex Patterns (Lazy Static) ---
// `###`, optional whitespace (may span lines), the field name, then whitespace
// containing at least one line break.
static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"###\s*([A-Za-z0-9_]+)\s*\n").expect("Failed to compile HEADING_RE")
});

// --- Data Structures ---
/// One recognised heading and the text that follows it, both trimmed.
/// The body may be empty; filtering happens in [`SectionExtractor::extract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedSection<'a> {
    pub name: &'a str,
    pub body: &'a str,
}

impl ExtractedSection<'_> {
    /// A section only counts as a field when both parts carry text.
    pub fn is_usable(&self) -> bool {
        !self.name.is_empty() && !self.body.is_empty()
    }
}

/// Ordered name -> body mapping built from one issue body.
///
/// Keys are unique and kept in the order they first appear in the document.
/// Inserting an existing key replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    entries: Vec<(String, String)>,
}

impl ParsedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or updates a field, returning the previous value if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<'a> IntoIterator for &'a ParsedFields {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        fn as_strs((k, v): &(String, String)) -> (&str, &str) {
            (k.as_str(), v.as_str())
        }
        self.entries
            .iter()
            .map(as_strs as fn(&'a (String, String)) -> (&'a str, &'a str))
    }
}

// Serialized as a flat JSON object, in insertion order.
impl Serialize for ParsedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// --- Extractor ---
/// Splits a Markdown issue body into fields delimited by `### NAME` headings.
#[derive(Debug, Default, Clone, Copy)]
pub struct SectionExtractor;

impl SectionExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Iterates over every recognised heading in document order, empty bodies included.
    pub fn sections<'a>(&self, document: &'a str) -> Sections<'a> {
        Sections { document, pos: 0 }
    }

    /// Builds the field mapping, dropping sections with an empty name or body.
    /// Never fails: a document without headings yields an empty mapping.
    pub fn extract(&self, document: &str) -> ParsedFields {
        let mut fields = ParsedFields::new();
        let mut skipped = 0usize;

        for section in self.sections(document) {
            if !section.is_usable() {
                tracing::debug!("Skipping section '{}' with empty body", section.name);
                skipped += 1;
                continue;
            }
            if let Some(previous) = fields.insert(section.name, section.body) {
                tracing::debug!(
                    "Duplicate heading '{}' replaces earlier value ({} bytes)",
                    section.name,
                    previous.len()
                );
            }
        }

        tracing::info!(
            "Extracted {} field(s) from issue body ({} bytes, {} empty section(s) skipped)",
            fields.len(),
            document.len(),
            skipped
        );
        fields
    }
}

/// Iterator returned by [`SectionExtractor::sections`].
#[derive(Debug, Clone)]
pub struct Sections<'a> {
    document: &'a str,
    pos: usize,
}

impl<'a> Iterator for Sections<'a> {
    type Item = ExtractedSection<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = HEADING_RE.captures_at(self.document, self.pos)?;
        let heading = caps.get(0)?;
        let name = caps.get(1)?.as_str();

        // The body stops at the next marker wherever it appears, not only at line start.
        let body_start = heading.end();
        let body_end = self.document[body_start..]
            .find(HEADING_MARKER)
            .map_or(self.document.len(), |offset| body_start + offset);

        // Resume at the terminating marker so it is tested as a heading itself.
        self.pos = body_end;

        Some(ExtractedSection {
            name: name.trim(),
            body: self.document[body_start..body_end].trim(),
        })
    }
}
