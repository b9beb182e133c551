use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use anyhow::Result;
use glob::Pattern;
use log::info;
use rayon::prelude::*;

use crate::{
    cli::args::CheckArgs,
    config::{Config, load_config},
    core::{
        data::{LanguageModel, LocaleId},
        discovery::{Discovery, DiscoveryOptions, discover},
        error::ConfigurationError,
        language::load_language,
    },
    locale_codes::known_locale_codes,
};

/// Everything a check run reads from disk, loaded once up front.
///
/// `CheckContext` owns the language models and registration sets; rules only
/// borrow them.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--baseline en-GB`)
/// 2. `.checklocrc.json` config file
/// 3. Built-in defaults
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Locale folders and registration sources found on disk.
    pub discovery: Discovery,

    /// One model per locale folder, in locale order.
    pub models: BTreeMap<LocaleId, LanguageModel>,

    /// Locale codes registrations are validated against.
    pub known_locales: BTreeSet<String>,
}

impl CheckContext {
    /// Create a new `CheckContext` from command line arguments.
    ///
    /// The config file is searched from the check path upwards.
    pub fn new(args: &CheckArgs) -> Result<Self> {
        let config_dir = if args.path.is_file() {
            args.path.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            args.path.clone()
        };

        let config_result = load_config(&config_dir)?;
        match &config_result.path {
            Some(path) => info!("Using configuration from {}", path.display()),
            None => info!("No .checklocrc.json found, using default configuration"),
        }

        let mut config = config_result.config;
        if let Some(ref baseline) = args.baseline {
            config.baseline_locale = baseline.clone();
        }
        if args.locales_only {
            config.locales_only = true;
        }

        Ok(Self::from_config(&args.path, config)?)
    }

    /// Discover and load everything under `root` with an explicit configuration.
    pub fn from_config(root: &Path, config: Config) -> Result<Self, ConfigurationError> {
        let ignores = config
            .ignores
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|e| ConfigurationError::InvalidIgnorePattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let discovery = discover(
            root,
            DiscoveryOptions {
                locales_only: config.locales_only,
                manifest_file: &config.manifest_file,
                descriptor_file: &config.descriptor_file,
            },
        )?;

        if !discovery.locales.contains_key(&config.baseline_locale) {
            return Err(ConfigurationError::MissingBaseline {
                locale: config.baseline_locale.clone(),
                available: discovery.locales.keys().cloned().collect(),
            });
        }

        // One task per locale; the BTreeMap puts the results back in locale order
        let models: BTreeMap<LocaleId, LanguageModel> = discovery
            .locales
            .par_iter()
            .map(|(locale, dir)| (locale.clone(), load_language(locale, dir, &ignores)))
            .collect();
        info!("Loaded {} locales", models.len());

        let known_locales = known_locale_codes(config.extra_locale_codes.iter().cloned());

        Ok(Self {
            config,
            discovery,
            models,
            known_locales,
        })
    }

    pub fn baseline(&self) -> &LanguageModel {
        // Presence is checked in `from_config`
        &self.models[&self.config.baseline_locale]
    }

    /// All models except the baseline, in locale order.
    pub fn others(&self) -> impl Iterator<Item = &LanguageModel> {
        self.models
            .values()
            .filter(|model| model.locale != self.config.baseline_locale)
    }

    /// Number of recognized localization files across all locales.
    pub fn locale_files_checked(&self) -> usize {
        self.models.values().map(|model| model.files.len()).sum()
    }
}
