//! Build a [`LanguageModel`] from one locale folder.

use std::{fs, path::Path};

use glob::Pattern;
use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    core::{
        data::{EntryKey, FileFormat, LanguageModel},
        parsers::{SourceFile, parse_file},
    },
    diagnostics::{Diagnostic, Location, Rule},
};

/// Read and parse every localization file directly inside `dir`.
///
/// Files matching one of `ignores` (by file name) are skipped silently; other
/// files that are neither `.dtd` nor `.properties` produce a warning. Nothing
/// here fails: unreadable files become `io-error` diagnostics.
pub fn load_language(locale: &str, dir: &Path, ignores: &[Pattern]) -> LanguageModel {
    let mut model = LanguageModel::new(locale);
    model.dir = dir.to_path_buf();
    info!("Checking files in {}", dir.display());

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| dir.display().to_string());
                model.diagnostics.push(
                    Diagnostic::for_locale(
                        Rule::IoError,
                        locale,
                        format!("Could not read {}: {}", path, e),
                    )
                    .with_location(Location::file(path)),
                );
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        let display_path = path.display().to_string();
        let file_name = entry.file_name().to_string_lossy().to_string();

        if ignores.iter().any(|pattern| pattern.matches(&file_name)) {
            debug!("Ignoring {}", display_path);
            continue;
        }

        let Some(format) = FileFormat::from_path(path) else {
            model.diagnostics.push(
                Diagnostic::for_locale(
                    Rule::UnrecognizedFile,
                    locale,
                    format!(
                        "File {} is not a .dtd or .properties file; ignoring",
                        display_path
                    ),
                )
                .with_location(Location::file(&display_path)),
            );
            continue;
        };

        model.files.insert(file_name.clone());

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Could not read {}: {}", display_path, e);
                model.diagnostics.push(
                    Diagnostic::for_locale(
                        Rule::IoError,
                        locale,
                        format!("Could not read {}: {}", display_path, e),
                    )
                    .with_location(Location::file(&display_path)),
                );
                continue;
            }
        };

        let src = SourceFile {
            locale,
            file_name: &file_name,
            path: &display_path,
        };
        let output = parse_file(format, &bytes, &src);
        debug!(
            "{}: {} entries, {} diagnostics",
            display_path,
            output.entries.len(),
            output.diagnostics.len()
        );

        model.diagnostics.extend(output.diagnostics);
        for (key, entry) in output.entries {
            model.entries.insert(EntryKey::new(&file_name, key), entry);
        }
    }

    model
}
