use std::{
    collections::{BTreeMap, BTreeSet},
    path::PathBuf,
};

use super::{EntryKey, LocaleId, LocalizationEntry};
use crate::diagnostics::Diagnostic;

/// Everything parsed from one locale folder.
///
/// Built once by [`crate::core::language::load_language`] and never mutated
/// afterwards; rules only borrow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageModel {
    pub locale: LocaleId,
    /// The locale folder the model was read from.
    pub dir: PathBuf,
    /// Names of the localization files present in the folder, including files
    /// that could not be read or parsed.
    pub files: BTreeSet<String>,
    pub entries: BTreeMap<EntryKey, LocalizationEntry>,
    /// Diagnostics produced while reading and parsing this locale's files.
    pub diagnostics: Vec<Diagnostic>,
}

impl LanguageModel {
    pub fn new(locale: impl Into<LocaleId>) -> Self {
        Self {
            locale: locale.into(),
            ..Default::default()
        }
    }

    /// Display path of one of this locale's files.
    pub fn file_path(&self, file: &str) -> String {
        self.dir.join(file).display().to_string()
    }

    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &EntryKey) -> Option<&LocalizationEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &EntryKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries belonging to one file, in key order.
    pub fn entries_in_file<'a>(
        &'a self,
        file: &'a str,
    ) -> impl Iterator<Item = &'a LocalizationEntry> + 'a {
        self.entries.values().filter(move |e| e.file == file)
    }
}
