//! Report formatting and printing utilities.
//!
//! Diagnostics are displayed in cargo-style format, either in emission order
//! or grouped under one header per locale, or as a single JSON document.
//! Separate from core logic to allow checkloc to be used as a library.

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::{Map, Value};
use unicode_width::UnicodeWidthStr;

use super::{
    args::OutputFormat,
    commands::{CheckSummary, CommandResult, CommandSummary, InitSummary},
};
use crate::{
    config::CONFIG_FILE_NAME,
    core::RunSummary,
    diagnostics::{Diagnostic, Diagnostics, GENERAL_GROUP, Severity},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult) -> Result<()> {
    print_to(result, &mut io::stdout().lock())
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) -> Result<()> {
    match &result.summary {
        CommandSummary::Check(summary) => print_check(summary, &result.diagnostics, writer)?,
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
    Ok(())
}

fn print_check<W: Write>(
    summary: &CheckSummary,
    diagnostics: &Diagnostics,
    writer: &mut W,
) -> Result<()> {
    if summary.format == OutputFormat::Json {
        let _ = writeln!(writer, "{}", render_json(&summary.run, diagnostics)?);
        return Ok(());
    }

    if !summary.quiet {
        print_intro(&summary.run, writer);
    }

    match summary.format {
        OutputFormat::Grouped => report_grouped_to(diagnostics, writer),
        _ => report_to(diagnostics, writer),
    }

    if diagnostics.is_empty() && !summary.quiet {
        print_success_to(&summary.run, writer);
    }
    Ok(())
}

/// Print diagnostics in emission order, followed by a problem summary.
pub fn report_to<W: Write>(diagnostics: &Diagnostics, writer: &mut W) {
    if diagnostics.is_empty() {
        return;
    }

    let max_line_width = calculate_max_line_width(diagnostics.iter());
    for diagnostic in diagnostics.iter() {
        print_diagnostic(diagnostic, writer, max_line_width);
    }

    print_summary(diagnostics, writer);
}

/// Print diagnostics under one header per locale, general diagnostics first.
pub fn report_grouped_to<W: Write>(diagnostics: &Diagnostics, writer: &mut W) {
    if diagnostics.is_empty() {
        return;
    }

    let max_line_width = calculate_max_line_width(diagnostics.iter());
    for (locale, group) in diagnostics.by_locale() {
        let errors = group.iter().filter(|d| d.is_error()).count();
        let _ = writeln!(
            writer,
            "{} ({} {}, {} {})",
            locale.unwrap_or(GENERAL_GROUP).bold(),
            errors,
            if errors == 1 { "error" } else { "errors" },
            group.len() - errors,
            if group.len() - errors == 1 {
                "warning"
            } else {
                "warnings"
            }
        );
        for diagnostic in group {
            print_diagnostic(diagnostic, writer, max_line_width);
        }
    }

    print_summary(diagnostics, writer);
}

/// The JSON document printed by `check --json`.
pub fn render_json(run: &RunSummary, diagnostics: &Diagnostics) -> Result<String> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct JsonReport<'a> {
        #[serde(flatten)]
        run: &'a RunSummary,
        error_count: usize,
        warning_count: usize,
        diagnostics: Map<String, Value>,
    }

    // serde_json preserves insertion order, so "general" stays first
    let mut groups = Map::new();
    for (locale, group) in diagnostics.by_locale() {
        groups.insert(
            locale.unwrap_or(GENERAL_GROUP).to_string(),
            serde_json::to_value(group)?,
        );
    }

    let report = JsonReport {
        run,
        error_count: diagnostics.error_count(),
        warning_count: diagnostics.warning_count(),
        diagnostics: groups,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn print_intro<W: Write>(run: &RunSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "Found {} {}; {} {} in baseline '{}'",
        run.locale_count,
        if run.locale_count == 1 { "locale" } else { "locales" },
        run.baseline_key_count,
        if run.baseline_key_count == 1 { "key" } else { "keys" },
        run.baseline
    );
    let _ = writeln!(writer);
}

/// Print a success message when no diagnostics were emitted.
pub fn print_success_to<W: Write>(run: &RunSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} {} ({} {}) against '{}' - no problems found",
            run.locale_count,
            if run.locale_count == 1 { "locale" } else { "locales" },
            run.locale_files_checked,
            if run.locale_files_checked == 1 { "file" } else { "files" },
            run.baseline
        )
        .green()
    );
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_diagnostic<W: Write>(diagnostic: &Diagnostic, writer: &mut W, max_line_width: usize) {
    let severity_str = match diagnostic.severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        diagnostic.message,
        diagnostic.rule.to_string().dimmed().cyan()
    );

    let Some(loc) = &diagnostic.location else {
        let _ = writeln!(writer);
        return;
    };

    // Clickable location: --> path[:line[:col]]
    let position = match (loc.line, loc.col) {
        (0, _) => String::new(),
        (line, 0) => format!(":{}", line),
        (line, col) => format!(":{}:{}", line, col),
    };
    let _ = writeln!(
        writer,
        "  {} {}{}",
        "-->".blue(),
        loc.file_path,
        position
    );

    if let Some(source_line) = &loc.source_line {
        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            loc.line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        if loc.col > 0 {
            let caret_char = match diagnostic.severity {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
            };
            // Caret pointing to the column (col is 1-based)
            let prefix: String = source_line.chars().take(loc.col - 1).collect();
            let caret_padding = UnicodeWidthStr::width(prefix.as_str());
            let _ = writeln!(
                writer,
                "{:>width$} {} {:>padding$}{}",
                "",
                "|".blue(),
                "",
                caret_char,
                width = max_line_width,
                padding = caret_padding
            );
        }
    }

    let _ = writeln!(writer); // Empty line between diagnostics
}

fn print_summary<W: Write>(diagnostics: &Diagnostics, writer: &mut W) {
    let total_errors = diagnostics.error_count();
    let total_warnings = diagnostics.warning_count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            if total_problems == 1 { "problem" } else { "problems" },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn calculate_max_line_width<'a>(diagnostics: impl Iterator<Item = &'a Diagnostic>) -> usize {
    diagnostics
        .filter_map(|d| d.location.as_ref())
        .filter(|loc| loc.source_line.is_some())
        .map(|loc| loc.line)
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Tests
// ============================================================
