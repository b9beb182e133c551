//! Parser for Mozilla DTD localization files.
//!
//! Only the subset used for UI strings is supported:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <!-- comment -->
//! <!ENTITY app.title "Title">
//! <!ENTITY app.quote 'Single-quoted value'>
//! ```
//!
//! Structural errors make the whole file unusable: a single `parse-error`
//! diagnostic with a caret is emitted and no entries are returned. Problems with
//! an individual key, value or comment are reported without stopping the parse.
//!
//! Duplicate keys are tolerated: the last declaration wins and nothing is
//! reported, matching what XML DTD processors do.

use std::collections::BTreeMap;

use log::debug;

use super::{LineIndex, ParseOutput, SourceFile};
use crate::{
    core::data::LocalizationEntry,
    diagnostics::{Diagnostic, Rule},
};

/// Characters that may not appear in an entity name.
const INVALID_KEY_CHARS: &[char] = &[
    '"', '!', '@', '#', '$', '%', '^', '&', '*', '<', '>', '[', ']', '(', ')', '{', '}', ' ', '?',
    '\'',
];

/// Characters that may not appear in an entity value (`&` is checked separately).
const INVALID_VALUE_CHARS: &[char] = &['"', '%', '<'];

const PREDEFINED_ENTITIES: &[&str] = &["amp", "lt", "gt", "quot", "apos"];

const ENTITY_START: &str = "<!ENTITY";
const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";
const PI_START: &str = "<?";
const PI_END: &str = "?>";

/// A structural problem that stops parsing of the file.
struct SyntaxError {
    offset: usize,
    message: &'static str,
}

impl SyntaxError {
    fn at(offset: usize, message: &'static str) -> Self {
        Self { offset, message }
    }
}

pub fn parse(content: &str, src: &SourceFile) -> ParseOutput {
    let index = LineIndex::new(content);
    let mut parser = EntityParser {
        content,
        index: &index,
        src,
        pos: 0,
        entries: BTreeMap::new(),
        diagnostics: Vec::new(),
    };

    match parser.run() {
        Ok(()) => ParseOutput {
            entries: parser.entries,
            diagnostics: parser.diagnostics,
        },
        Err(err) => {
            let mut diagnostics = parser.diagnostics;
            diagnostics.push(syntax_diagnostic(&err, &index, src));
            ParseOutput {
                entries: BTreeMap::new(),
                diagnostics,
            }
        }
    }
}

fn syntax_diagnostic(err: &SyntaxError, index: &LineIndex, src: &SourceFile) -> Diagnostic {
    let location = index.location(src.path, err.offset);
    src.diagnostic(
        Rule::ParseError,
        format!(
            "Could not parse {}: DTD syntax error starting at line {}, col {}: {}",
            src.path, location.line, location.col, err.message
        ),
    )
    .with_location(location)
}

struct EntityParser<'a, 'i> {
    content: &'a str,
    index: &'i LineIndex<'a>,
    src: &'i SourceFile<'i>,
    pos: usize,
    entries: BTreeMap<String, LocalizationEntry>,
    diagnostics: Vec<Diagnostic>,
}

impl EntityParser<'_, '_> {
    fn rest(&self) -> &str {
        &self.content[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let skipped = rest.len() - rest.trim_start().len();
        self.pos += skipped;
    }

    fn run(&mut self) -> Result<(), SyntaxError> {
        loop {
            self.skip_whitespace();
            if self.pos >= self.content.len() {
                return Ok(());
            }

            if self.rest().starts_with(COMMENT_START) {
                self.comment()?;
            } else if self.rest().starts_with(ENTITY_START) {
                self.entity()?;
            } else if self.rest().starts_with(PI_START) {
                let end = self
                    .find_from(self.pos + PI_START.len(), PI_END)
                    .ok_or_else(|| SyntaxError::at(self.pos, "unterminated processing instruction"))?;
                self.pos = end + PI_END.len();
            } else {
                return Err(SyntaxError::at(
                    self.pos,
                    "expected an entity declaration or a comment",
                ));
            }
        }
    }

    fn find_from(&self, start: usize, needle: &str) -> Option<usize> {
        self.content[start..].find(needle).map(|i| start + i)
    }

    fn comment(&mut self) -> Result<(), SyntaxError> {
        let content = self.content;
        let body_start = self.pos + COMMENT_START.len();
        let end = self
            .find_from(body_start, COMMENT_END)
            .ok_or_else(|| SyntaxError::at(self.pos, "unterminated comment"))?;

        let body = &content[body_start..end];
        if let Some(i) = body.find("--") {
            let location = self.index.location(self.src.path, body_start + i);
            self.diagnostics.push(
                self.src
                    .diagnostic(
                        Rule::InvalidComment,
                        format!(
                            "Comment on line {} of {} contains '--'; this is not allowed inside XML comments",
                            location.line, self.src.path
                        ),
                    )
                    .with_location(location),
            );
        }

        self.pos = end + COMMENT_END.len();
        Ok(())
    }

    fn entity(&mut self) -> Result<(), SyntaxError> {
        let content = self.content;
        let decl_start = self.pos;
        let name_start = decl_start + ENTITY_START.len();

        if !content[name_start..].starts_with(char::is_whitespace) {
            return Err(SyntaxError::at(
                name_start,
                "expected whitespace after '<!ENTITY'",
            ));
        }

        // The value opens at the first quote that follows whitespace, so
        // quotes inside the name are left to the key check.
        let mut prev_is_space = false;
        let mut opening = None;
        for (i, c) in content[name_start..].char_indices() {
            if c == '>' {
                return Err(SyntaxError::at(name_start + i, "entity value required"));
            }
            if (c == '"' || c == '\'') && prev_is_space {
                opening = Some((name_start + i, c));
                break;
            }
            prev_is_space = c.is_whitespace();
        }
        let (quote_pos, quote) = opening
            .ok_or_else(|| SyntaxError::at(decl_start, "unterminated entity declaration"))?;

        let key = content[name_start..quote_pos].trim();
        if key.is_empty() {
            return Err(SyntaxError::at(quote_pos, "entity name required"));
        }

        let value_start = quote_pos + 1;
        let value_end = self
            .find_from(value_start, if quote == '"' { "\"" } else { "'" })
            .ok_or_else(|| SyntaxError::at(quote_pos, "unterminated entity value"))?;
        let value = &content[value_start..value_end];

        self.pos = value_end + 1;
        self.skip_whitespace();
        if !self.rest().starts_with('>') {
            return Err(SyntaxError::at(
                self.pos,
                "expected '>' to close the entity declaration",
            ));
        }
        self.pos += 1;

        self.add_entry(key, value, decl_start, value_start);
        Ok(())
    }

    fn add_entry(&mut self, key: &str, value: &str, decl_start: usize, value_start: usize) {
        let line = self.index.line(decl_start);
        let qualified = format!("{}/{}", self.src.file_name, key);

        if let Some(c) = key.chars().find(|c| INVALID_KEY_CHARS.contains(c)) {
            self.diagnostics.push(
                self.src
                    .diagnostic(
                        Rule::InvalidKey,
                        format!(
                            "Invalid character '{}' in key '{}' in {} line {}",
                            c, qualified, self.src.path, line
                        ),
                    )
                    .with_location(self.index.location(self.src.path, decl_start)),
            );
            return;
        }

        if let Some(offset) = invalid_value_offset(value) {
            let c = value[offset..].chars().next().unwrap_or('&');
            self.diagnostics.push(
                self.src
                    .diagnostic(
                        Rule::InvalidValue,
                        format!(
                            "Invalid character '{}' in value for '{}' in {} line {}",
                            c, qualified, self.src.path, line
                        ),
                    )
                    .with_location(self.index.location(self.src.path, value_start + offset)),
            );
            return;
        }

        if value.is_empty() {
            self.diagnostics.push(
                self.src
                    .diagnostic(
                        Rule::BlankValue,
                        format!(
                            "Key '{}' in {} has a blank value. Is this desired?",
                            qualified, self.src.path
                        ),
                    )
                    .with_location(self.index.location(self.src.path, decl_start)),
            );
        }

        debug!("{}: entity '{}' on line {}", self.src.path, key, line);
        self.entries.insert(
            key.to_string(),
            LocalizationEntry {
                file: self.src.file_name.to_string(),
                key: key.to_string(),
                value: value.to_string(),
                line,
                placeholders: None,
            },
        );
    }
}

/// Byte offset of the first character not allowed in an entity value.
fn invalid_value_offset(value: &str) -> Option<usize> {
    let mut chars = value.char_indices();
    while let Some((i, c)) = chars.next() {
        if INVALID_VALUE_CHARS.contains(&c) {
            return Some(i);
        }
        if c == '&' {
            let Some(len) = reference_len(&value[i..]) else {
                return Some(i);
            };
            // Skip the rest of the reference.
            for _ in 1..len {
                chars.next();
            }
        }
    }
    None
}

/// Length in bytes (all ASCII) of a legal reference at the start of `text`,
/// or `None` to mark the `&` itself as invalid.
fn reference_len(text: &str) -> Option<usize> {
    let semi = text.find(';')?;
    let body = &text[1..semi];
    let valid = if let Some(hex) = body.strip_prefix("#x") {
        !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
    } else if let Some(dec) = body.strip_prefix('#') {
        !dec.is_empty() && dec.chars().all(|c| c.is_ascii_digit())
    } else {
        PREDEFINED_ENTITIES.contains(&body)
    };
    valid.then_some(semi + 1)
}
