//! Diagnostic types for localization checks.
//!
//! Every finding produced while parsing or comparing locales is a [`Diagnostic`].
//! Diagnostics are append-only: once pushed into a [`Diagnostics`] collection they
//! are never removed or rewritten. The ordered collection (or its grouping by
//! locale) is the only result of a check run.

use std::collections::BTreeMap;

use serde::Serialize;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each kind of diagnostic.
///
/// The severity of a diagnostic is fully determined by its rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    // File-level problems
    ParseError,
    IoError,
    ByteOrderMark,
    UnrecognizedFile,
    EmptyFile,

    // Entry syntax
    InvalidKey,
    InvalidValue,
    InvalidComment,
    BlankValue,
    KeyContainsSpaces,
    DuplicateKey,
    InvalidSubstitution,
    TooManySubstitutions,

    // Cross-locale comparison
    MissingFile,
    ExtraFile,
    MissingKey,
    ExtraKey,
    NoKeys,
    SubstitutionMismatch,

    // Registration sources
    InvalidRegistration,
    DuplicateRegistration,
    InvalidDescriptor,
    MissingFolder,
    UnregisteredFolder,
    UnknownLocaleCode,
    MissingManifestRegistration,
}

impl Rule {
    pub fn severity(self) -> Severity {
        match self {
            Rule::UnrecognizedFile
            | Rule::EmptyFile
            | Rule::BlankValue
            | Rule::UnregisteredFolder
            | Rule::UnknownLocaleCode
            | Rule::MissingManifestRegistration => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rule::ParseError => "parse-error",
            Rule::IoError => "io-error",
            Rule::ByteOrderMark => "byte-order-mark",
            Rule::UnrecognizedFile => "unrecognized-file",
            Rule::EmptyFile => "empty-file",
            Rule::InvalidKey => "invalid-key",
            Rule::InvalidValue => "invalid-value",
            Rule::InvalidComment => "invalid-comment",
            Rule::BlankValue => "blank-value",
            Rule::KeyContainsSpaces => "key-contains-spaces",
            Rule::DuplicateKey => "duplicate-key",
            Rule::InvalidSubstitution => "invalid-substitution",
            Rule::TooManySubstitutions => "too-many-substitutions",
            Rule::MissingFile => "missing-file",
            Rule::ExtraFile => "extra-file",
            Rule::MissingKey => "missing-key",
            Rule::ExtraKey => "extra-key",
            Rule::NoKeys => "no-keys",
            Rule::SubstitutionMismatch => "substitution-mismatch",
            Rule::InvalidRegistration => "invalid-registration",
            Rule::DuplicateRegistration => "duplicate-registration",
            Rule::InvalidDescriptor => "invalid-descriptor",
            Rule::MissingFolder => "missing-folder",
            Rule::UnregisteredFolder => "unregistered-folder",
            Rule::UnknownLocaleCode => "unknown-locale-code",
            Rule::MissingManifestRegistration => "missing-manifest-registration",
        };
        write!(f, "{}", name)
    }
}

// ============================================================
// Location
// ============================================================

/// Where in a file a diagnostic points to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub file_path: String,
    /// 1-based line number, 0 when the diagnostic concerns the whole file.
    pub line: usize,
    /// 1-based column (in characters), 0 when unknown.
    pub col: usize,
    /// Text of the offending line, used to draw a caret marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
}

impl Location {
    pub fn file(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            line: 0,
            col: 0,
            source_line: None,
        }
    }

    pub fn line(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col: 0,
            source_line: None,
        }
    }

    pub fn with_col(mut self, col: usize) -> Self {
        self.col = col;
        self
    }

    pub fn with_source_line(mut self, source_line: impl Into<String>) -> Self {
        self.source_line = Some(source_line.into());
        self
    }

    /// The source line followed by a caret under the column, if both are known.
    pub fn caret_snippet(&self) -> Option<String> {
        let source_line = self.source_line.as_ref()?;
        if self.col == 0 {
            return None;
        }
        Some(format!(
            "{}\n{}^",
            source_line,
            " ".repeat(self.col.saturating_sub(1))
        ))
    }
}

// ============================================================
// Diagnostic
// ============================================================

/// A single warning or error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: Severity,
    pub rule: Rule,
    /// The locale the finding belongs to; `None` for findings about the
    /// extension as a whole (e.g. manifest syntax).
    pub locale: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Diagnostic {
    pub fn new(rule: Rule, locale: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            severity: rule.severity(),
            rule,
            locale: locale.map(str::to_string),
            message: message.into(),
            location: None,
        }
    }

    /// Diagnostic attached to a locale.
    pub fn for_locale(rule: Rule, locale: &str, message: impl Into<String>) -> Self {
        Self::new(rule, Some(locale), message)
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}) {}",
            self.locale.as_deref().unwrap_or(GENERAL_GROUP),
            self.message
        )?;
        if let Some(snippet) = self.location.as_ref().and_then(Location::caret_snippet) {
            write!(f, "\n{}", snippet)?;
        }
        Ok(())
    }
}

// ============================================================
// Diagnostics collection
// ============================================================

/// Group name used for diagnostics that are not tied to a locale.
pub const GENERAL_GROUP: &str = "general";

/// Ordered, append-only sink of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.items.extend(diagnostics);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.items.len() - self.error_count()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    /// Group diagnostics by locale, preserving emission order inside each group.
    ///
    /// Diagnostics without a locale are grouped under `None`, which sorts first.
    pub fn by_locale(&self) -> BTreeMap<Option<&str>, Vec<&Diagnostic>> {
        let mut groups: BTreeMap<Option<&str>, Vec<&Diagnostic>> = BTreeMap::new();
        for diagnostic in &self.items {
            groups
                .entry(diagnostic.locale.as_deref())
                .or_default()
                .push(diagnostic);
        }
        groups
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
