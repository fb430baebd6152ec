//! Output formatting and writing utilities
//!
//! This module renders session reports and other results in JSON, YAML or a
//! human-readable layout, and owns the progress indicators.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use serde::Serialize;
use specaudit_schemas::{Finding, SessionReport};
use std::io::{self, Write};
use tracing::trace;

/// Trait for formatting output with specialized support for reports
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a session report with its findings and verdict
    fn format_report(&self, report: &SessionReport, use_color: bool) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_report(&self, report: &SessionReport, use_color: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_report_human(report, use_color)),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && format == OutputFormat::Human && io::stdout().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[cfg(test)]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress bars with custom writers
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");

        if self.format == OutputFormat::Human {
            self.writeln(&formatted)
        } else {
            self.write(&formatted)
        }
    }

    /// Write a session report.
    ///
    /// Quiet human output keeps only the findings and the verdict line.
    pub fn report(&mut self, report: &SessionReport) -> Result<()> {
        if self.format == OutputFormat::Human && self.quiet {
            let mut out = String::new();
            push_findings(&mut out, &report.errors, &report.warnings, self.use_color);
            out.push_str(&verdict_line(report, self.use_color));
            return self.writeln(&out);
        }

        let formatted = self.format.format_report(report, self.use_color)?;
        self.writeln(formatted.trim_end())
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        let mut widths = headers.iter().map(|h| h.len()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.len());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" | ");

        if self.use_color {
            self.writeln(&header_row.bold().to_string())?;
        } else {
            self.writeln(&header_row)?;
        }

        let separator = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i < widths.len() {
                        format!("{:width$}", cell, width = widths[i])
                    } else {
                        cell.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" | ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }

    /// Create a progress bar for long operations
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        Some(pb)
    }
}

/// Helper function to create a progress bar style
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

fn push_findings(out: &mut String, errors: &[Finding], warnings: &[Finding], use_color: bool) {
    if !errors.is_empty() {
        let title = if use_color {
            format!("❌ Errors ({}):", errors.len()).red().bold().to_string()
        } else {
            format!("Errors ({}):", errors.len())
        };
        out.push_str(&title);
        out.push('\n');
        for error in errors {
            let marker = if use_color { "  •".red().to_string() } else { "  [ERROR]".to_string() };
            out.push_str(&format!("{} {}\n", marker, error.message));
        }
        out.push('\n');
    }

    if !warnings.is_empty() {
        let title = if use_color {
            format!("⚠️  Warnings ({}):", warnings.len()).yellow().bold().to_string()
        } else {
            format!("Warnings ({}):", warnings.len())
        };
        out.push_str(&title);
        out.push('\n');
        for warning in warnings {
            let marker = if use_color { "  •".yellow().to_string() } else { "  [WARN]".to_string() };
            out.push_str(&format!("{} {}\n", marker, warning.message));
        }
        out.push('\n');
    }
}

fn verdict_line(report: &SessionReport, use_color: bool) -> String {
    let text = match (report.passed, report.errors.is_empty()) {
        (true, _) if report.warnings.is_empty() => "All specifications are valid!".to_string(),
        (true, _) => format!(
            "Validation passed with {} warning(s)",
            report.warnings.len()
        ),
        (false, true) => format!(
            "Validation failed: {} warning(s) in strict mode",
            report.warnings.len()
        ),
        (false, false) => format!(
            "Validation failed with {} error(s)",
            report.errors.len()
        ),
    };

    match (report.passed, use_color) {
        (true, true) => format!("✅ {}", text).green().bold().to_string(),
        (false, true) => format!("❌ {}", text).red().bold().to_string(),
        (true, false) => format!("[PASS] {}", text),
        (false, false) => format!("[FAIL] {}", text),
    }
}

/// Format a session report for human reading
fn format_report_human(report: &SessionReport, use_color: bool) -> String {
    let mut output = String::new();

    output.push_str(if use_color { "═══ Validation Summary ═══\n" } else { "=== Validation Summary ===\n" });
    let summary = &report.summary;
    output.push_str(&format!(
        "  Files checked: {} ({} valid)\n",
        summary.files_checked, summary.files_valid
    ));
    if summary.documents_cross_checked > 0 {
        output.push_str(&format!(
            "  Documents cross-checked: {}\n",
            summary.documents_cross_checked
        ));
    }
    if report.strict {
        output.push_str("  Strict mode: warnings are fatal\n");
    }
    output.push('\n');

    push_findings(&mut output, &report.errors, &report.warnings, use_color);
    output.push_str(&verdict_line(report, use_color));
    output.push('\n');
    output
}
