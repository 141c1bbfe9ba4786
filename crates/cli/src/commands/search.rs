//! `opentargets search`: free-text search across drugs, targets and diseases.

use crate::commands::{print_table, report_error};
use crate::exit_code::ExitCode;
use crate::{OutputFormat, OutputOptions};
use anyhow::{Context, Result};
use colored::Colorize;
use opentargets_client::{OpenTargetsClient, SearchResult};
use std::io::Write;

#[tracing::instrument(skip(client, output))]
pub async fn run(
    client: &OpenTargetsClient,
    keywords: &str,
    size: i64,
    format: OutputFormat,
    output: OutputOptions,
) -> Result<ExitCode> {
    let start_time = std::time::Instant::now();
    let spinner = crate::progress::request_spinner(
        &format!("Searching for '{keywords}'..."),
        output.show_progress,
    );

    let result = client.search(keywords, size).await;
    spinner.finish_and_clear();

    let result = match result {
        Ok(result) => result,
        Err(err) => return report_error(&err, format),
    };

    match format {
        OutputFormat::Human => print_human(keywords, &result, output.show_info),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&result).context("Failed to serialize results")?;
            writeln!(std::io::stdout().lock(), "{json}").context("Failed to write to stdout")?;
        }
        OutputFormat::Csv => write_hits_csv(&result, std::io::stdout().lock())?,
    }

    if output.show_info && matches!(format, OutputFormat::Human) {
        println!();
        println!("  {} {:.2}s", "⏱".dimmed(), start_time.elapsed().as_secs_f64());
    }

    Ok(ExitCode::Success)
}

fn print_human(keywords: &str, result: &SearchResult, show_info: bool) {
    if show_info {
        println!(
            "{} {} of {} matches for {}",
            "✓".green(),
            result.hits().len().to_string().bold(),
            result.total(),
            format!("'{keywords}'").cyan()
        );
    }

    for (entity, categories) in result.entities() {
        println!();
        println!("{}:", entity.cyan().bold());
        if categories.is_empty() {
            println!("  {}", "(no categories)".dimmed());
            continue;
        }
        let totals: Vec<String> = categories.iter().map(|c| c.total.to_string()).collect();
        let rows: Vec<Vec<&str>> = categories
            .iter()
            .zip(&totals)
            .map(|(c, total)| vec![c.name.as_str(), total.as_str()])
            .collect();
        print_table(&["CATEGORY", "TOTAL"], &rows);
    }

    println!();
    println!("{}:", "Hits".cyan().bold());
    if result.hits().is_empty() {
        println!("  {}", "(none)".dimmed());
        return;
    }
    let rows: Vec<Vec<&str>> = result
        .hits()
        .iter()
        .map(|h| vec![h.entity.as_str(), h.id.as_str(), h.name.as_str()])
        .collect();
    print_table(&["ENTITY", "ID", "NAME"], &rows);
}

fn write_hits_csv<W: Write>(result: &SearchResult, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for hit in result.hits() {
        csv.serialize(hit).context("Failed to write CSV row")?;
    }
    csv.flush().context("Failed to flush CSV output")?;
    Ok(())
}
