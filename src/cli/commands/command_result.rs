use crate::{cli::args::OutputFormat, core::RunSummary, diagnostics::Diagnostics};

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CheckSummary {
    pub run: RunSummary,
    pub format: OutputFormat,
    /// Suppress status lines, print diagnostics only.
    pub quiet: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running checkloc commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// All diagnostics in emission order. Empty for non-check commands.
    pub diagnostics: Diagnostics,
    pub error_count: usize,
    pub warning_count: usize,
}

impl CommandResult {
    pub fn new(summary: CommandSummary, diagnostics: Diagnostics) -> Self {
        Self {
            summary,
            error_count: diagnostics.error_count(),
            warning_count: diagnostics.warning_count(),
            diagnostics,
        }
    }
}
