//! Substitution signature comparison.
//!
//! A translated string must take exactly the same arguments as the baseline
//! string: the same number of `%S` and the same set of `%n$S`.

use crate::{
    core::data::LanguageModel,
    diagnostics::{Diagnostic, Location, Rule},
};

pub fn check_substitutions(baseline: &LanguageModel, locale: &LanguageModel) -> Vec<Diagnostic> {
    baseline
        .entries
        .iter()
        .filter_map(|(key, base_entry)| {
            let entry = locale.get(key)?;
            // Entries with invalid substitution syntax were reported while parsing
            let base_sig = base_entry.placeholders.as_ref()?;
            let sig = entry.placeholders.as_ref()?;
            if base_sig.is_equivalent(sig) {
                return None;
            }

            Some(
                Diagnostic::for_locale(
                    Rule::SubstitutionMismatch,
                    &locale.locale,
                    format!(
                        "String substitutions for key '{}' in '{}' do not match baseline '{}'; \
                         substitution count and type must match ({}: {}; {}: {})",
                        key, locale.locale, baseline.locale, locale.locale, sig, baseline.locale,
                        base_sig
                    ),
                )
                .with_location(Location::line(locale.file_path(&key.file), entry.line)),
            )
        })
        .collect()
}
