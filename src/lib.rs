//! Checkloc - localization consistency checker for Mozilla-style extensions
//!
//! Checkloc is a CLI tool and library that compares every locale of an
//! extension against a baseline locale. It parses DTD and `.properties`
//! files, compares files, keys and string substitutions, and cross-checks
//! the locale registrations in `chrome.manifest` and `install.rdf` against
//! the locale folders on disk.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Discovery, parsers, language models and the consistency engine
//! - `diagnostics`: Diagnostic types shared by every stage
//! - `locale_codes`: Known Mozilla locale codes
//! - `rules`: Comparison rules between a locale and the baseline

pub mod cli;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod locale_codes;
pub mod rules;
