//! Core data types shared by the parsers, the engine and the rules.
//!
//! ## Module Structure
//!
//! - `entry`: Localization entries, their `(file, key)` identity and placeholder signatures
//! - `language`: The per-locale `LanguageModel`
//! - `registration`: Locale registrations read from the manifest and install descriptor

pub mod entry;
pub mod language;
pub mod registration;

pub use entry::{EntryKey, FileFormat, LocalizationEntry, PlaceholderSignature};
pub use language::LanguageModel;
pub use registration::{RegistrationRecord, RegistrationSet, RegistrationSource};

/// A locale code as found on disk or in a registration source (e.g. `en-US`).
///
/// Compared case-sensitively.
pub type LocaleId = String;
