//! Parser for the `locale` lines of a `chrome.manifest`.
//!
//! The manifest is line based; locale packages are registered as
//!
//! ```text
//! locale <package> <locale-code> <path/to/locale/folder/> [flags...]
//! ```
//!
//! Every other instruction is ignored.

use std::{collections::HashMap, path::PathBuf};

use log::debug;

use crate::{
    core::data::{RegistrationRecord, RegistrationSet, RegistrationSource},
    diagnostics::{Diagnostic, Location, Rule},
};

const LOCALE_INSTRUCTION: &str = "locale";

pub fn parse_manifest(content: &str, path: &str) -> RegistrationSet {
    let mut set = RegistrationSet::new(RegistrationSource::Manifest, path);
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    for (i, line) in content.lines().enumerate() {
        let line_no = i + 1;
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some(LOCALE_INSTRUCTION) {
            continue;
        }

        let args: Vec<&str> = tokens.collect();
        let [_package, locale, relative_path, ..] = args.as_slice() else {
            set.diagnostics.push(
                Diagnostic::new(
                    Rule::InvalidRegistration,
                    None,
                    format!(
                        "Invalid locale registration syntax in {} on line {}: '{}'",
                        path,
                        line_no,
                        line.trim()
                    ),
                )
                .with_location(Location::line(path, line_no).with_source_line(line)),
            );
            continue;
        };

        if let Some(first_line) = first_seen.get(*locale) {
            set.diagnostics.push(
                Diagnostic::for_locale(
                    Rule::DuplicateRegistration,
                    locale,
                    format!(
                        "Locale '{}' is registered more than once in {} (lines {} and {}); \
                         each locale should only be registered once",
                        locale, path, first_line, line_no
                    ),
                )
                .with_location(Location::line(path, line_no).with_source_line(line)),
            );
            continue;
        }
        first_seen.insert(locale.to_string(), line_no);

        debug!("{}: locale '{}' registered at '{}'", path, locale, relative_path);
        set.records.push(RegistrationRecord {
            locale: locale.to_string(),
            relative_path: Some(PathBuf::from(relative_path)),
            line: line_no,
        });
    }

    set
}
