use std::{io, path::PathBuf};

use thiserror::Error;

/// Fatal problems with the check setup itself.
///
/// Anything wrong inside a localization file is a diagnostic instead; these
/// errors mean there is nothing meaningful to compare.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Path '{}' does not exist", .0.display())]
    RootNotFound(PathBuf),

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// A registration source exists but cannot be read.
    #[error("Could not read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "File {file} does not exist in '{}'; \
         use --locales-only to skip registration checks",
        .dir.display()
    )]
    MissingRegistrationFile { file: String, dir: PathBuf },

    #[error("No locale directories are registered in {}", .0.display())]
    NoLocaleDirs(PathBuf),

    #[error("No locale folders found under '{}'", .0.display())]
    NoLocales(PathBuf),

    #[error("Baseline locale '{locale}' has no folder (found: {})", .available.join(", "))]
    MissingBaseline {
        locale: String,
        available: Vec<String>,
    },

    #[error("Invalid ignore pattern \"{pattern}\": {reason}")]
    InvalidIgnorePattern { pattern: String, reason: String },
}
