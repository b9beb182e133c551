use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".checklocrc.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_baseline_locale")]
    pub baseline_locale: String,
    #[serde(default)]
    pub locales_only: bool,
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,
    #[serde(default = "default_descriptor_file")]
    pub descriptor_file: String,
    /// Glob patterns matched against file names inside locale folders.
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Locale codes to accept in addition to the Mozilla list.
    #[serde(default)]
    pub extra_locale_codes: Vec<String>,
}

fn default_baseline_locale() -> String {
    "en-US".to_string()
}

fn default_manifest_file() -> String {
    "chrome.manifest".to_string()
}

fn default_descriptor_file() -> String {
    "install.rdf".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            baseline_locale: default_baseline_locale(),
            locales_only: false,
            manifest_file: default_manifest_file(),
            descriptor_file: default_descriptor_file(),
            ignores: Vec::new(),
            extra_locale_codes: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or a
    /// required name is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for (field, value) in [
            ("baselineLocale", &self.baseline_locale),
            ("manifestFile", &self.manifest_file),
            ("descriptorFile", &self.descriptor_file),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("'{}' must not be empty", field);
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the file the config was read from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
