//! Cross-reference locale registrations with the locale folders on disk.
//!
//! A manifest registration must point at an existing folder. Descriptor
//! entries carry no path and are matched against the folders by locale code.
//! A source whose XML could not be parsed is skipped entirely; its parse error
//! is already reported.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use crate::{
    core::data::{LocaleId, RegistrationSet, RegistrationSource},
    diagnostics::{Diagnostic, Location, Rule},
};

/// Inputs shared by the checks of both registration sources.
pub struct RegistrationContext<'a> {
    /// Locale folders found on disk.
    pub folders: &'a BTreeMap<LocaleId, PathBuf>,
    /// Directory registered paths are relative to.
    pub root_dir: &'a Path,
    pub known_locales: &'a BTreeSet<String>,
}

/// Check one registration source.
///
/// `manifest` is given when checking the install descriptor, so descriptor
/// entries can be matched against manifest registrations.
pub fn check_registrations(
    set: &RegistrationSet,
    ctx: &RegistrationContext,
    manifest: Option<&RegistrationSet>,
) -> Vec<Diagnostic> {
    if !set.complete {
        return Vec::new();
    }

    let mut diagnostics = Vec::new();
    let file = set.file_name();

    for record in &set.records {
        let location = || Location::line(&set.path, record.line);

        // Manifest records name a path; descriptor records only a code
        let expected = match &record.relative_path {
            Some(relative) => {
                let path = ctx.root_dir.join(relative);
                (!path.is_dir()).then(|| format!("{} does not exist", path.display()))
            }
            None => (!ctx.folders.contains_key(&record.locale))
                .then(|| format!("no folder named '{}' exists", record.locale)),
        };
        if let Some(expected) = expected {
            diagnostics.push(
                Diagnostic::for_locale(
                    Rule::MissingFolder,
                    &record.locale,
                    format!(
                        "Locale '{}' is registered in {} line {}, but {}",
                        record.locale, file, record.line, expected
                    ),
                )
                .with_location(location()),
            );
        }

        if !ctx.known_locales.contains(&record.locale) {
            diagnostics.push(
                Diagnostic::for_locale(
                    Rule::UnknownLocaleCode,
                    &record.locale,
                    format!(
                        "{} locale '{}' is not in the list of Mozilla locale codes",
                        file, record.locale
                    ),
                )
                .with_location(location()),
            );
        }

        if set.source == RegistrationSource::Descriptor {
            if let Some(manifest) = manifest.filter(|m| m.complete) {
                if !manifest.contains(&record.locale) {
                    diagnostics.push(
                        Diagnostic::for_locale(
                            Rule::MissingManifestRegistration,
                            &record.locale,
                            format!(
                                "Locale '{}' is listed in {} but not registered in {}",
                                record.locale,
                                file,
                                manifest.file_name()
                            ),
                        )
                        .with_location(location()),
                    );
                }
            }
        }
    }

    for (locale, folder) in ctx.folders {
        if set.contains(locale) {
            continue;
        }
        let parent = folder.parent().unwrap_or(folder);
        diagnostics.push(
            Diagnostic::for_locale(
                Rule::UnregisteredFolder,
                locale,
                format!(
                    "Locale folder '{}' exists in {}, but no corresponding registration exists in {}",
                    locale,
                    parent.display(),
                    file
                ),
            )
            .with_location(Location::file(&set.path)),
        );
    }

    diagnostics
}
