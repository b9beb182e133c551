use std::{fmt, path::PathBuf};

use super::LocaleId;
use crate::diagnostics::Diagnostic;

/// Which file a registration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationSource {
    /// `chrome.manifest` style `locale` lines.
    Manifest,
    /// `install.rdf` style `em:locale` elements.
    Descriptor,
}

impl fmt::Display for RegistrationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationSource::Manifest => write!(f, "manifest"),
            RegistrationSource::Descriptor => write!(f, "install descriptor"),
        }
    }
}

/// One locale registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    pub locale: LocaleId,
    /// Path of the locale folder relative to the manifest (manifest only).
    pub relative_path: Option<PathBuf>,
    /// 1-based line the registration was found on.
    pub line: usize,
}

/// All registrations read from one source, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSet {
    pub source: RegistrationSource,
    /// Display path of the source file.
    pub path: String,
    pub records: Vec<RegistrationRecord>,
    pub diagnostics: Vec<Diagnostic>,
    /// False when the source could not be parsed and extraction was aborted.
    pub complete: bool,
}

impl RegistrationSet {
    pub fn new(source: RegistrationSource, path: impl Into<String>) -> Self {
        Self {
            source,
            path: path.into(),
            records: Vec::new(),
            diagnostics: Vec::new(),
            complete: true,
        }
    }

    pub fn get(&self, locale: &str) -> Option<&RegistrationRecord> {
        self.records.iter().find(|r| r.locale == locale)
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.get(locale).is_some()
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.locale.as_str())
    }

    /// File name of the source, for messages.
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.path.as_str())
    }
}
