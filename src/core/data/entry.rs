use std::{collections::BTreeSet, fmt, path::Path};

/// Localization file format, selected once per file from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// XML DTD entity declarations (`.dtd`).
    Entity,
    /// Line-based string bundles (`.properties`).
    Properties,
}

impl FileFormat {
    /// Returns `None` for files that are not localization files.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("dtd") => Some(FileFormat::Entity),
            Some("properties") => Some(FileFormat::Properties),
            _ => None,
        }
    }
}

/// Identity of an entry within a locale: the file it lives in plus its key.
///
/// The same key may appear in several files of one locale.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey {
    pub file: String,
    pub key: String,
}

impl EntryKey {
    pub fn new(file: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.file, self.key)
    }
}

/// The shape of the string substitutions in one value.
///
/// `%S` markers are counted; `%n$S` markers are collected as a set, so a number
/// used twice counts once. Two signatures are equivalent when both parts are
/// equal, regardless of the order the markers appear in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderSignature {
    pub positional: usize,
    pub numbered: BTreeSet<u64>,
}

impl PlaceholderSignature {
    /// Number of distinct substitution identifiers.
    pub fn unique_count(&self) -> usize {
        self.positional + self.numbered.len()
    }

    pub fn is_equivalent(&self, other: &PlaceholderSignature) -> bool {
        self.positional == other.positional && self.numbered == other.numbered
    }
}

impl fmt::Display for PlaceholderSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numbered: Vec<String> = self.numbered.iter().map(|n| format!("%{}$S", n)).collect();
        write!(
            f,
            "{} positional (%S), numbered [{}]",
            self.positional,
            numbered.join(", ")
        )
    }
}

/// One key/value pair read from a localization file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationEntry {
    /// File name (without directory) the entry was read from.
    pub file: String,
    pub key: String,
    pub value: String,
    /// 1-based line of the declaration.
    pub line: usize,
    /// Substitution signature for properties values with valid syntax.
    /// Always `None` for DTD entries.
    pub placeholders: Option<PlaceholderSignature>,
}

impl LocalizationEntry {
    pub fn entry_key(&self) -> EntryKey {
        EntryKey::new(&self.file, &self.key)
    }
}
