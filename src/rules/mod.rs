//! Comparison rules.
//!
//! Each rule is a pure function over borrowed language models or registration
//! sets and returns the diagnostics it found, in a deterministic order.
//!
//! ## Module Structure
//!
//! - `file_set`: Missing and extra localization files
//! - `key_set`: Missing and extra keys, locales without keys
//! - `substitution`: Mismatched string substitutions
//! - `registration`: Manifest and install descriptor cross-reference

pub mod file_set;
pub mod key_set;
pub mod registration;
pub mod substitution;
