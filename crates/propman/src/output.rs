//! Report formatting.

use clap::ValueEnum;

use propman_core::tenancy::MigrationReport;

/// How the final report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single-line JSON object
    #[default]
    Json,
    /// Human-readable summary
    Pretty,
}

/// Format a report for output.
pub fn format_report(
    report: &MigrationReport,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(report),
        OutputFormat::Pretty => Ok(format_pretty(report)),
    }
}

fn format_pretty(report: &MigrationReport) -> String {
    let title = if report.dry_run {
        "MIGRATION REPORT (dry run)"
    } else {
        "MIGRATION REPORT"
    };
    let mut output = format!("{}\n{}", title, "-".repeat(40));
    output.push_str(&format!("\n  Scanned:  {}", report.scanned));
    output.push_str(&format!("\n  Migrated: {}", report.migrated));
    output.push_str(&format!("\n  Skipped:  {}", report.skipped));
    for (reason, count) in report.skip_reasons() {
        output.push_str(&format!("\n    {}: {}", reason, count));
    }
    output.push_str(&format!("\n  Errors:   {}", report.errors.len()));
    for error in &report.errors {
        output.push_str(&format!("\n    - {}", error));
    }
    output
}
