pub mod interactions;
pub mod search;

use crate::exit_code::ExitCode;
use crate::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use opentargets_client::{ErrorResult, OpenTargetsError};
use std::io::Write;

/// Reports a failed operation and returns the matching exit code.
///
/// JSON output gets an `{"error": ...}` payload on stdout so pipelines always
/// receive a parseable document; human output goes to stderr.
pub(crate) fn report_error(err: &OpenTargetsError, format: OutputFormat) -> Result<ExitCode> {
    match format {
        OutputFormat::Json => {
            write_error_json(&mut std::io::stdout().lock(), &ErrorResult::from(err))?;
        }
        OutputFormat::Human | OutputFormat::Csv => {
            eprintln!("{} {err}", "error:".red().bold());
        }
    }
    Ok(ExitCode::from(err))
}

/// Reports a failure raised outside the client (config, output).
///
/// Falls back to stderr when the JSON payload itself cannot be written.
pub(crate) fn report_failure(err: &anyhow::Error, format: OutputFormat) {
    let payload = failure_payload(err);
    if matches!(format, OutputFormat::Json)
        && write_error_json(&mut std::io::stdout().lock(), &payload).is_ok()
    {
        return;
    }
    eprintln!("{} {}", "error:".red().bold(), payload.error);
}

fn failure_payload(err: &anyhow::Error) -> ErrorResult {
    ErrorResult {
        error: format!("{err:#}"),
    }
}

fn write_error_json(out: &mut impl Write, payload: &ErrorResult) -> Result<()> {
    let json = serde_json::to_string_pretty(payload)?;
    writeln!(out, "{json}")?;
    Ok(())
}

/// Left-aligned plain text table with a bold header row.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<&str>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{h:<w$}"))
        .collect();
    println!("  {}", header_line.join("  ").bold());

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect();
        println!("  {}", line.join("  ").trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_failure_payload_keeps_context_chain() {
        let err = std::fs::read_to_string("/nonexistent/.opentargetsrc.yml")
            .context("Failed to load config /nonexistent/.opentargetsrc.yml")
            .unwrap_err();
        let payload = failure_payload(&err);
        assert!(payload
            .error
            .starts_with("Failed to load config /nonexistent/.opentargetsrc.yml: "));
    }

    #[test]
    fn test_write_error_json_is_error_document() {
        let mut out = Vec::new();
        let payload = failure_payload(&anyhow::anyhow!("--timeout must be at least 1 second"));
        write_error_json(&mut out, &payload).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "error": "--timeout must be at least 1 second" })
        );
    }
}
