//! The consistency engine: compare every locale against the baseline.
//!
//! Diagnostics are emitted in a fixed order so output is stable between runs:
//!
//! 1. Registration source parse diagnostics (manifest, then descriptor)
//! 2. Per-locale parse diagnostics, baseline first, then other locales sorted
//! 3. Key count checks, same locale order
//! 4. Per-locale comparisons (files, keys, substitutions), sorted locale order
//! 5. Registration cross-reference (manifest, then descriptor)

use std::collections::BTreeSet;

use clap::ValueEnum;
use log::{debug, info};
use serde::Serialize;

use crate::{
    core::CheckContext,
    diagnostics::Diagnostics,
    rules::{
        file_set::check_file_set,
        key_set::{check_key_set, check_no_keys},
        registration::{RegistrationContext, check_registrations},
        substitution::check_substitutions,
    },
};

/// Families of comparisons that can be selected with `--only`.
///
/// Parse diagnostics are always reported, whatever is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Check {
    /// Same localization files as the baseline
    Files,
    /// Same keys as the baseline, and at least one key per locale
    Keys,
    /// Same string substitutions as the baseline
    Substitutions,
    /// Manifest and install descriptor registrations match the locale folders
    Registrations,
}

impl Check {
    pub fn all() -> Vec<Check> {
        vec![
            Check::Files,
            Check::Keys,
            Check::Substitutions,
            Check::Registrations,
        ]
    }
}

/// Facts about a run, reported alongside the diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub baseline: String,
    pub locale_count: usize,
    pub baseline_key_count: usize,
    pub locale_files_checked: usize,
}

pub struct ConsistencyEngine<'a> {
    ctx: &'a CheckContext,
    checks: BTreeSet<Check>,
}

impl<'a> ConsistencyEngine<'a> {
    /// An engine running `checks`, or every check when empty.
    pub fn new(ctx: &'a CheckContext, checks: &[Check]) -> Self {
        let checks = if checks.is_empty() {
            Check::all()
        } else {
            checks.to_vec()
        };
        Self {
            ctx,
            checks: checks.into_iter().collect(),
        }
    }

    fn enabled(&self, check: Check) -> bool {
        self.checks.contains(&check)
    }

    pub fn summary(&self) -> RunSummary {
        let baseline = self.ctx.baseline();
        RunSummary {
            baseline: baseline.locale.clone(),
            locale_count: self.ctx.models.len(),
            baseline_key_count: baseline.key_count(),
            locale_files_checked: self.ctx.locale_files_checked(),
        }
    }

    pub fn run(&self) -> Diagnostics {
        let ctx = self.ctx;
        let baseline = ctx.baseline();
        let mut diagnostics = Diagnostics::new();

        let manifest = ctx.discovery.manifest.as_ref();
        let descriptor = ctx.discovery.descriptor.as_ref();
        for set in manifest.into_iter().chain(descriptor) {
            diagnostics.extend(set.diagnostics.iter().cloned());
        }

        let ordered: Vec<_> = std::iter::once(baseline).chain(ctx.others()).collect();
        for model in &ordered {
            diagnostics.extend(model.diagnostics.iter().cloned());
        }

        if self.enabled(Check::Keys) {
            diagnostics.extend(ordered.iter().filter_map(|model| check_no_keys(model)));
        }

        for model in ctx.others() {
            debug!("Comparing '{}' against '{}'", model.locale, baseline.locale);
            if self.enabled(Check::Files) {
                diagnostics.extend(check_file_set(baseline, model));
            }
            if self.enabled(Check::Keys) {
                diagnostics.extend(check_key_set(baseline, model));
            }
            if self.enabled(Check::Substitutions) {
                diagnostics.extend(check_substitutions(baseline, model));
            }
        }

        if self.enabled(Check::Registrations) {
            let registration_ctx = RegistrationContext {
                folders: &ctx.discovery.locales,
                root_dir: &ctx.discovery.root_dir,
                known_locales: &ctx.known_locales,
            };
            if let Some(manifest) = manifest {
                diagnostics.extend(check_registrations(manifest, &registration_ctx, None));
            }
            if let Some(descriptor) = descriptor {
                diagnostics.extend(check_registrations(
                    descriptor,
                    &registration_ctx,
                    manifest,
                ));
            }
        }

        info!(
            "{} errors, {} warnings",
            diagnostics.error_count(),
            diagnostics.warning_count()
        );
        diagnostics
    }
}
