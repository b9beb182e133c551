//! Key set comparison.
//!
//! Keys are compared per file, and only for files both locales have: a whole
//! missing file is already reported by the file set rule.

use crate::{
    core::data::LanguageModel,
    diagnostics::{Diagnostic, Location, Rule},
};

/// A locale without a single usable key is an error, baseline included.
pub fn check_no_keys(model: &LanguageModel) -> Option<Diagnostic> {
    if model.key_count() > 0 {
        return None;
    }
    Some(Diagnostic::for_locale(
        Rule::NoKeys,
        &model.locale,
        format!(
            "No keys found in '{}' ({})",
            model.locale,
            model.dir.display()
        ),
    ))
}

pub fn check_key_set(baseline: &LanguageModel, locale: &LanguageModel) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for file in baseline.files.intersection(&locale.files) {
        for entry in locale.entries_in_file(file) {
            if !baseline.contains(&entry.entry_key()) {
                diagnostics.push(
                    Diagnostic::for_locale(
                        Rule::ExtraKey,
                        &locale.locale,
                        format!(
                            "Key '{}' in '{}' but not in baseline '{}'",
                            entry.entry_key(),
                            locale.locale,
                            baseline.locale
                        ),
                    )
                    .with_location(Location::line(locale.file_path(file), entry.line)),
                );
            }
        }

        for entry in baseline.entries_in_file(file) {
            if !locale.contains(&entry.entry_key()) {
                diagnostics.push(
                    Diagnostic::for_locale(
                        Rule::MissingKey,
                        &locale.locale,
                        format!(
                            "Key '{}' in baseline '{}' but not in '{}'",
                            entry.entry_key(),
                            baseline.locale,
                            locale.locale
                        ),
                    )
                    .with_location(Location::file(locale.file_path(file))),
                );
            }
        }
    }

    diagnostics
}
