//! Parser for Mozilla `.properties` string bundles.
//!
//! ```text
//! # comment
//! ! also a comment
//! greeting=Hello %S
//! files.count:%1$S of %2$S files
//! ```
//!
//! Values are checked against the string bundle substitution grammar:
//! `%%` is a literal percent sign, `%S` a positional argument and `%n$S` a
//! numbered argument. Anything else after a `%` is an error.

use std::{collections::HashMap, sync::LazyLock};

use log::debug;
use regex::Regex;

use super::{LineIndex, ParseOutput, SourceFile};
use crate::{
    core::data::{LocalizationEntry, PlaceholderSignature},
    diagnostics::{Location, Rule},
};

/// Firefox refuses to format strings with more than ten substitution
/// arguments (see `nsStringBundle.cpp`); anything above is flagged.
pub const MAX_SUBSTITUTIONS: usize = 10;

static SUBSTITUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^%(?:([0-9]+)\$)?S").expect("valid substitution regex"));

pub fn parse(content: &str, src: &SourceFile) -> ParseOutput {
    let mut output = ParseOutput::default();

    if content.is_empty() {
        output.diagnostics.push(
            src.diagnostic(
                Rule::EmptyFile,
                format!("{} does not contain any lines", src.path),
            )
            .with_location(Location::file(src.path)),
        );
        return output;
    }

    let index = LineIndex::new(content);
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (i, raw_line) in content.lines().enumerate() {
        let line_no = i + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let (key, value) = split_key_value(line);
        let location =
            || Location::line(src.path, line_no).with_source_line(index.line_text(line_no));

        if key.is_empty() {
            output.diagnostics.push(
                src.diagnostic(
                    Rule::ParseError,
                    format!("Line {} of {} has no key: '{}'", line_no, src.path, line),
                )
                .with_location(location().with_col(1)),
            );
            continue;
        }

        let qualified = format!("{}/{}", src.file_name, key);

        if key.chars().any(char::is_whitespace) {
            output.diagnostics.push(
                src.diagnostic(
                    Rule::KeyContainsSpaces,
                    format!(
                        "Key '{}' in {} line {} contains spaces",
                        qualified, src.path, line_no
                    ),
                )
                .with_location(location()),
            );
            continue;
        }

        if let Some(&first_line) = first_seen.get(key) {
            output.diagnostics.push(
                src.diagnostic(
                    Rule::DuplicateKey,
                    format!(
                        "Duplicate key '{}' in {} (lines {} and {})",
                        qualified, src.path, first_line, line_no
                    ),
                )
                .with_location(location()),
            );
            continue;
        }
        first_seen.insert(key, line_no);

        let placeholders = match scan_placeholders(value) {
            Ok(signature) => {
                if signature.unique_count() > MAX_SUBSTITUTIONS {
                    output.diagnostics.push(
                        src.diagnostic(
                            Rule::TooManySubstitutions,
                            format!(
                                "More than {} string substitutions found for key '{}' in {} line {}; \
                                 Firefox does not support this",
                                MAX_SUBSTITUTIONS, qualified, src.path, line_no
                            ),
                        )
                        .with_location(location()),
                    );
                }
                Some(signature)
            }
            Err(offset) => {
                // Column of the '%' inside the original (untrimmed) line.
                let value_start =
                    raw_line.len() - raw_line.trim_start().len() + (line.len() - value.len());
                let col = raw_line[..value_start + offset].chars().count() + 1;
                output.diagnostics.push(
                    src.diagnostic(
                        Rule::InvalidSubstitution,
                        format!(
                            "Key '{}' contains improper use of % in {} line {}",
                            qualified, src.path, line_no
                        ),
                    )
                    .with_location(location().with_col(col)),
                );
                None
            }
        };

        debug!("{}: property '{}' on line {}", src.path, key, line_no);
        output.entries.insert(
            key.to_string(),
            LocalizationEntry {
                file: src.file_name.to_string(),
                key: key.to_string(),
                value: value.to_string(),
                line: line_no,
                placeholders,
            },
        );
    }

    output
}

/// Split a trimmed line on its first unescaped `=` or `:`.
///
/// A line without a separator is a key with an empty value.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (line[..i].trim_end(), line[i + 1..].trim_start()),
            _ => {}
        }
    }
    (line, "")
}

/// Compute the substitution signature of a value.
///
/// Returns the byte offset of the first invalid `%` on error.
pub fn scan_placeholders(value: &str) -> Result<PlaceholderSignature, usize> {
    let mut signature = PlaceholderSignature::default();
    let mut pos = 0;

    while let Some(rel) = value[pos..].find('%') {
        let start = pos + rel;
        let rest = &value[start..];

        if rest[1..].starts_with('%') {
            pos = start + 2;
            continue;
        }

        let caps = SUBSTITUTION.captures(rest).ok_or(start)?;
        match caps.get(1) {
            Some(number) => {
                // The regex only matches digits, so parsing fails on overflow alone
                let n = number.as_str().parse::<u64>().unwrap_or(u64::MAX);
                signature.numbered.insert(n);
            }
            None => signature.positional += 1,
        }
        pos = start + caps[0].len();
    }

    Ok(signature)
}
