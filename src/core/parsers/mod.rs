//! Parsers for localization files and locale registration sources.
//!
//! - `entity`: DTD entity files (`.dtd`)
//! - `properties`: string bundle files (`.properties`)
//! - `manifest`: `locale` lines of `chrome.manifest`
//! - `descriptor`: `em:locale` elements of `install.rdf`
//!
//! Parsers never fail: problems are reported as diagnostics alongside whatever
//! could be parsed.

pub mod descriptor;
pub mod entity;
pub mod manifest;
pub mod properties;

use std::collections::BTreeMap;

use crate::{
    core::data::{FileFormat, LocalizationEntry},
    diagnostics::{Diagnostic, Location, Rule},
};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Identifies the file being parsed, for entries and diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct SourceFile<'a> {
    pub locale: &'a str,
    /// File name without directory, used as the first half of an entry's identity.
    pub file_name: &'a str,
    /// Display path used in messages.
    pub path: &'a str,
}

impl SourceFile<'_> {
    pub fn diagnostic(&self, rule: Rule, message: impl Into<String>) -> Diagnostic {
        Diagnostic::for_locale(rule, self.locale, message)
    }
}

/// Result of parsing one localization file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutput {
    /// Entries keyed by key name.
    pub entries: BTreeMap<String, LocalizationEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse raw file bytes with the parser for `format`.
///
/// A leading byte order mark is reported once, whatever the format, and then
/// stripped so the rest of the file is still checked.
pub fn parse_file(format: FileFormat, bytes: &[u8], src: &SourceFile) -> ParseOutput {
    let mut diagnostics = Vec::new();

    if has_bom(bytes) {
        diagnostics.push(
            src.diagnostic(
                Rule::ByteOrderMark,
                format!(
                    "File '{}' contains BOM (byte order mark); localization files should not contain BOM",
                    src.path
                ),
            )
            .with_location(Location::file(src.path)),
        );
    }

    let content = match decode(bytes) {
        Ok(content) => content,
        Err(reason) => {
            diagnostics.push(
                src.diagnostic(
                    Rule::ParseError,
                    format!("Could not parse {}: {}", src.path, reason),
                )
                .with_location(Location::file(src.path)),
            );
            return ParseOutput {
                entries: BTreeMap::new(),
                diagnostics,
            };
        }
    };

    let mut output = match format {
        FileFormat::Entity => entity::parse(&content, src),
        FileFormat::Properties => properties::parse(&content, src),
    };
    diagnostics.append(&mut output.diagnostics);
    output.diagnostics = diagnostics;
    output
}

pub fn has_bom(bytes: &[u8]) -> bool {
    bytes.starts_with(UTF8_BOM) || bytes.starts_with(UTF16_LE_BOM) || bytes.starts_with(UTF16_BE_BOM)
}

/// Decode file content to text, honouring (and dropping) a byte order mark.
fn decode(bytes: &[u8]) -> Result<String, String> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return utf8(rest);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        return utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        return utf16(rest, u16::from_be_bytes);
    }
    utf8(bytes)
}

fn utf8(bytes: &[u8]) -> Result<String, String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| {
        format!(
            "file is not valid UTF-8 (invalid byte at offset {})",
            e.utf8_error().valid_up_to()
        )
    })
}

fn utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String, String> {
    if bytes.len() % 2 != 0 {
        return Err("file is not valid UTF-16 (odd number of bytes)".to_string());
    }
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|e| format!("file is not valid UTF-16 ({})", e))
}

/// Byte offsets of line starts, for offset to line/column lookups.
pub struct LineIndex<'a> {
    content: &'a str,
    offsets: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(content: &'a str) -> Self {
        let mut offsets = vec![0]; // Line 1 starts at offset 0
        for (i, c) in content.char_indices() {
            if c == '\n' {
                offsets.push(i + 1);
            }
        }
        Self { content, offsets }
    }

    /// 1-based line number containing `offset`.
    pub fn line(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(line) => line + 1, // Exact match at line start
            Err(line) => line,    // Falls within this line
        }
    }

    /// 1-based line and column (counted in characters) of `offset`.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.line(offset);
        let start = self.offsets[line - 1];
        let end = offset.min(self.content.len());
        let col = self
            .content
            .get(start..end)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(0)
            + 1;
        (line, col)
    }

    /// Text of a 1-based line without its line terminator.
    pub fn line_text(&self, line: usize) -> &'a str {
        let Some(&start) = self.offsets.get(line.saturating_sub(1)) else {
            return "";
        };
        let end = self
            .offsets
            .get(line)
            .copied()
            .unwrap_or(self.content.len());
        self.content[start..end].trim_end_matches(['\n', '\r'])
    }

    /// Location pointing at `offset`, including the line text for caret rendering.
    pub fn location(&self, path: &str, offset: usize) -> Location {
        let (line, col) = self.line_col(offset);
        Location::line(path, line)
            .with_col(col)
            .with_source_line(self.line_text(line))
    }
}
