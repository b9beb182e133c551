//! Parser for the `em:locale` elements of an `install.rdf` descriptor.
//!
//! Only elements named `locale` in the `http://www.mozilla.org/2004/em-rdf#`
//! namespace are collected, whatever prefix the document binds to it. Any XML
//! syntax error aborts extraction: the returned set is marked incomplete and
//! carries a single `invalid-descriptor` diagnostic.

use std::collections::HashMap;

use log::debug;
use quick_xml::{
    events::Event,
    name::{Namespace, ResolveResult},
    reader::NsReader,
};

use super::LineIndex;
use crate::{
    core::data::{RegistrationRecord, RegistrationSet, RegistrationSource},
    diagnostics::{Diagnostic, Location, Rule},
};

pub const EM_NAMESPACE: &[u8] = b"http://www.mozilla.org/2004/em-rdf#";
const LOCALE_ELEMENT: &[u8] = b"locale";

/// An `em:locale` element whose end tag has not been seen yet.
struct OpenLocale {
    depth: usize,
    line: usize,
    text: String,
}

struct SyntaxError {
    offset: usize,
    message: String,
}

pub fn parse_descriptor(content: &str, path: &str) -> RegistrationSet {
    let mut set = RegistrationSet::new(RegistrationSource::Descriptor, path);
    let index = LineIndex::new(content);

    let found = match read_locales(content, &index) {
        Ok(found) => found,
        Err(err) => {
            let location = index.location(path, err.offset);
            set.diagnostics.push(
                Diagnostic::new(
                    Rule::InvalidDescriptor,
                    None,
                    format!(
                        "Could not parse {}: invalid XML at line {}, col {}: {}",
                        path, location.line, location.col, err.message
                    ),
                )
                .with_location(location),
            );
            set.complete = false;
            return set;
        }
    };

    let mut first_seen: HashMap<String, usize> = HashMap::new();
    for (locale, line) in found {
        if locale.is_empty() {
            set.diagnostics.push(
                Diagnostic::new(
                    Rule::InvalidRegistration,
                    None,
                    format!("Empty locale element in {} on line {}", path, line),
                )
                .with_location(
                    Location::line(path, line).with_source_line(index.line_text(line)),
                ),
            );
            continue;
        }

        if let Some(first_line) = first_seen.get(&locale) {
            set.diagnostics.push(
                Diagnostic::for_locale(
                    Rule::DuplicateRegistration,
                    &locale,
                    format!(
                        "Locale '{}' is registered more than once in {} (lines {} and {}); \
                         each locale should only be registered once",
                        locale, path, first_line, line
                    ),
                )
                .with_location(
                    Location::line(path, line).with_source_line(index.line_text(line)),
                ),
            );
            continue;
        }
        first_seen.insert(locale.clone(), line);

        debug!("{}: locale '{}' listed on line {}", path, locale, line);
        set.records.push(RegistrationRecord {
            locale,
            relative_path: None,
            line,
        });
    }

    set
}

/// Collect the trimmed text of every `em:locale` element with its line.
fn read_locales(content: &str, index: &LineIndex) -> Result<Vec<(String, usize)>, SyntaxError> {
    let mut reader = NsReader::from_str(content);
    let mut found = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut open: Option<OpenLocale> = None;

    loop {
        let (resolved, event) = match reader.read_resolved_event() {
            Ok(pair) => pair,
            Err(e) => {
                return Err(SyntaxError {
                    offset: reader.error_position() as usize,
                    message: e.to_string(),
                });
            }
        };
        let is_locale = matches!(resolved, ResolveResult::Bound(Namespace(ns)) if ns == EM_NAMESPACE);

        match event {
            Event::Start(e) => {
                depth += 1;
                seen_root = true;
                if is_locale && e.local_name().as_ref() == LOCALE_ELEMENT && open.is_none() {
                    open = Some(OpenLocale {
                        depth,
                        line: index.line(reader.buffer_position() as usize),
                        text: String::new(),
                    });
                }
            }
            Event::Empty(e) => {
                seen_root = true;
                if is_locale && e.local_name().as_ref() == LOCALE_ELEMENT {
                    found.push((
                        String::new(),
                        index.line(reader.buffer_position() as usize),
                    ));
                }
            }
            Event::Text(e) => {
                if let Some(locale) = open.as_mut() {
                    let text = e.unescape().map_err(|err| SyntaxError {
                        offset: reader.buffer_position() as usize,
                        message: err.to_string(),
                    })?;
                    locale.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(locale) = open.as_mut() {
                    locale.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => {
                if open.as_ref().is_some_and(|locale| locale.depth == depth) {
                    if let Some(locale) = open.take() {
                        found.push((locale.text.trim().to_string(), locale.line));
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => {
                if depth > 0 {
                    return Err(SyntaxError {
                        offset: content.len(),
                        message: "unexpected end of document; an element was not closed"
                            .to_string(),
                    });
                }
                if !seen_root {
                    return Err(SyntaxError {
                        offset: 0,
                        message: "document has no root element".to_string(),
                    });
                }
                break;
            }
            _ => {}
        }
    }

    Ok(found)
}
