//! File set comparison.
//!
//! Every locale must ship exactly the localization files the baseline ships.

use crate::{
    core::data::LanguageModel,
    diagnostics::{Diagnostic, Location, Rule},
};

pub fn check_file_set(baseline: &LanguageModel, locale: &LanguageModel) -> Vec<Diagnostic> {
    let missing = baseline
        .files
        .difference(&locale.files)
        .map(|file| {
            Diagnostic::for_locale(
                Rule::MissingFile,
                &locale.locale,
                format!(
                    "File '{}' exists in baseline '{}' but not in '{}'",
                    file, baseline.locale, locale.locale
                ),
            )
            .with_location(Location::file(locale.file_path(file)))
        });

    let extra = locale.files.difference(&baseline.files).map(|file| {
        Diagnostic::for_locale(
            Rule::ExtraFile,
            &locale.locale,
            format!(
                "File '{}' exists in '{}' but not in baseline '{}'",
                file, locale.locale, baseline.locale
            ),
        )
        .with_location(Location::file(locale.file_path(file)))
    });

    missing.chain(extra).collect()
}
