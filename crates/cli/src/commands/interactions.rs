//! `opentargets interactions`: known drugs for a drug, target or disease.

use crate::commands::{print_table, report_error};
use crate::exit_code::ExitCode;
use crate::{OutputFormat, OutputOptions};
use anyhow::{Context, Result};
use colored::Colorize;
use opentargets_client::{InteractionRow, OpenTargetsClient};
use std::io::Write;

#[tracing::instrument(skip(client, output))]
pub async fn run(
    client: &OpenTargetsClient,
    query_id: &str,
    id_type: &str,
    format: OutputFormat,
    output: OutputOptions,
) -> Result<ExitCode> {
    let spinner = crate::progress::request_spinner(
        &format!("Fetching known drugs for {id_type} {query_id}..."),
        output.show_progress,
    );

    let rows = client.get_interactions(query_id, id_type).await;
    spinner.finish_and_clear();

    let rows = match rows {
        Ok(rows) => rows,
        Err(err) => return report_error(&err, format),
    };

    match format {
        OutputFormat::Human => print_human(query_id, &rows, output.show_info),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows).context("Failed to serialize rows")?;
            writeln!(std::io::stdout().lock(), "{json}").context("Failed to write to stdout")?;
        }
        OutputFormat::Csv => write_csv(&rows, std::io::stdout().lock())?,
    }

    Ok(ExitCode::Success)
}

fn print_human(query_id: &str, rows: &[InteractionRow], show_info: bool) {
    if rows.is_empty() {
        if show_info {
            println!(
                "{} No known drug interactions for {}",
                "!".yellow(),
                query_id.cyan()
            );
        }
        return;
    }

    if show_info {
        println!(
            "{} {} known drug interactions for {}",
            "✓".green(),
            rows.len().to_string().bold(),
            query_id.cyan()
        );
        println!();
    }

    let table: Vec<Vec<&str>> = rows
        .iter()
        .map(|r| {
            vec![
                r.drug_id.as_str(),
                r.approved_name.as_str(),
                r.target_id.as_str(),
                r.approved_symbol.as_str(),
                r.disease_id.as_str(),
            ]
        })
        .collect();
    print_table(&["DRUG", "NAME", "TARGET", "SYMBOL", "DISEASE"], &table);
}

fn write_csv<W: Write>(rows: &[InteractionRow], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row).context("Failed to write CSV row")?;
    }
    csv.flush().context("Failed to flush CSV output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv_uses_api_field_names() {
        let rows = vec![InteractionRow {
            approved_name: "ASPIRIN".to_string(),
            approved_symbol: "PTGS1".to_string(),
            target_id: "ENSG00000095303".to_string(),
            disease_id: "EFO_0003785".to_string(),
            drug_id: "CHEMBL25".to_string(),
        }];

        let mut buf = Vec::new();
        write_csv(&rows, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "approvedName,approvedSymbol,targetId,diseaseId,drugId\n\
             ASPIRIN,PTGS1,ENSG00000095303,EFO_0003785,CHEMBL25\n"
        );
    }

    #[test]
    fn test_write_csv_empty() {
        let mut buf = Vec::new();
        write_csv(&[], &mut buf).unwrap();
        assert!(buf.is_empty());
    }
}
