//! Core checking engine.
//!
//! ## Module Structure
//!
//! - `data`: Entries, language models and registration records
//! - `parsers`: DTD, properties, manifest and install descriptor parsers
//! - `discovery`: Locating locale folders and registration sources
//! - `language`: Building one `LanguageModel` per locale folder
//! - `context`: Configuration plus everything loaded from disk
//! - `engine`: Running the comparison rules in a fixed order
//! - `error`: Fatal configuration errors

pub mod context;
pub mod data;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod language;
pub mod parsers;

pub use context::CheckContext;
pub use engine::{Check, ConsistencyEngine, RunSummary};
pub use error::ConfigurationError;
