//! Locate locale folders and registration sources under a check root.
//!
//! Two layouts are supported:
//! - **Manifest mode** (default): the root holds `chrome.manifest` and
//!   `install.rdf`. Locale base directories are the parents of the folders
//!   registered in the manifest, and every subfolder of a base directory is a
//!   locale.
//! - **Locales-only mode**: the root is itself the locale base directory and
//!   registration sources are not read.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};
use walkdir::WalkDir;

use crate::core::{
    data::{LocaleId, RegistrationSet},
    error::ConfigurationError,
    parsers::{descriptor::parse_descriptor, manifest::parse_manifest},
};

#[derive(Debug, Clone, Copy)]
pub struct DiscoveryOptions<'a> {
    pub locales_only: bool,
    pub manifest_file: &'a str,
    pub descriptor_file: &'a str,
}

/// Everything found on disk before any localization file is read.
#[derive(Debug)]
pub struct Discovery {
    /// Directory the check runs in (the manifest's directory in manifest mode).
    pub root_dir: PathBuf,
    /// Locale folders by folder name.
    pub locales: BTreeMap<LocaleId, PathBuf>,
    pub manifest: Option<RegistrationSet>,
    pub descriptor: Option<RegistrationSet>,
}

pub fn discover(root: &Path, options: DiscoveryOptions) -> Result<Discovery, ConfigurationError> {
    if !root.exists() {
        return Err(ConfigurationError::RootNotFound(root.to_path_buf()));
    }

    // The root may point straight at the manifest file
    let root_dir = if root.is_file() {
        if options.locales_only {
            return Err(ConfigurationError::NotADirectory(root.to_path_buf()));
        }
        match root.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    } else {
        root.to_path_buf()
    };

    if options.locales_only {
        let locales = list_locale_folders(&root_dir);
        if locales.is_empty() {
            return Err(ConfigurationError::NoLocales(root_dir));
        }
        info!("Found {} locale folders in {}", locales.len(), root_dir.display());
        return Ok(Discovery {
            root_dir,
            locales,
            manifest: None,
            descriptor: None,
        });
    }

    let manifest_path = root_dir.join(options.manifest_file);
    let manifest = parse_manifest(
        &read_source(&root_dir, &manifest_path, options.manifest_file)?,
        &manifest_path.display().to_string(),
    );

    let base_dirs: BTreeSet<PathBuf> = manifest
        .records
        .iter()
        .filter_map(|record| record.relative_path.as_ref())
        .filter_map(|relative| root_dir.join(relative).parent().map(Path::to_path_buf))
        .collect();
    if base_dirs.is_empty() {
        return Err(ConfigurationError::NoLocaleDirs(manifest_path));
    }

    let mut locales = BTreeMap::new();
    for base_dir in &base_dirs {
        if !base_dir.is_dir() {
            warn!("Locale base directory {} does not exist", base_dir.display());
            continue;
        }
        for (locale, path) in list_locale_folders(base_dir) {
            locales.entry(locale).or_insert(path);
        }
    }
    if locales.is_empty() {
        return Err(ConfigurationError::NoLocales(root_dir));
    }
    info!(
        "Found {} locale folders in {} base director{}",
        locales.len(),
        base_dirs.len(),
        if base_dirs.len() == 1 { "y" } else { "ies" }
    );

    let descriptor_path = root_dir.join(options.descriptor_file);
    let descriptor = parse_descriptor(
        &read_source(&root_dir, &descriptor_path, options.descriptor_file)?,
        &descriptor_path.display().to_string(),
    );

    Ok(Discovery {
        root_dir,
        locales,
        manifest: Some(manifest),
        descriptor: Some(descriptor),
    })
}

fn read_source(root_dir: &Path, path: &Path, file: &str) -> Result<String, ConfigurationError> {
    if !path.exists() {
        return Err(ConfigurationError::MissingRegistrationFile {
            file: file.to_string(),
            dir: root_dir.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|source| ConfigurationError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Immediate subdirectories of `dir`, by name. Hidden folders are skipped.
fn list_locale_folders(dir: &Path) -> BTreeMap<LocaleId, PathBuf> {
    let mut folders = BTreeMap::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Cannot access path: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            warn!("Skipping folder with non UTF-8 name: {}", entry.path().display());
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        folders.insert(name.to_string(), entry.path().to_path_buf());
    }

    folders
}
