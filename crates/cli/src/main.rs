mod commands;
mod exit_code;
mod progress;
mod settings;

use clap::{Parser, Subcommand};
use exit_code::ExitCode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "opentargets")]
#[command(about = "Search the Open Targets Platform and look up known drug interactions", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file (default: nearest .opentargetsrc.yml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// GraphQL endpoint URL (overrides config file)
    #[arg(long, value_name = "URL", global = true)]
    endpoint: Option<String>,

    /// Request timeout in seconds (overrides config file)
    #[arg(long, value_name = "SECS", global = true)]
    timeout: Option<u64>,

    /// HTTP headers to include in the request (can be specified multiple times)
    /// Format: "Header-Name: Header-Value"
    #[arg(long = "header", short = 'H', value_name = "HEADER", global = true)]
    headers: Vec<String>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except results and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Suppress progress indicators (spinners)
    #[arg(long, global = true)]
    no_progress: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show progress indicators (spinners)
    pub show_progress: bool,
    /// Whether to show informational output (summaries, timings)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Free-text search across drugs, targets and diseases
    Search {
        /// Search terms, e.g. a gene symbol, drug or disease name
        #[arg(value_name = "KEYWORDS")]
        keywords: String,

        /// Number of hits to request; values above 10000 are clamped
        /// (default: config searchSize, else 10000)
        #[arg(short, long, allow_negative_numbers = true)]
        size: Option<i64>,

        /// Output format (csv lists the hits only)
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Known drug interactions for a drug, target or disease identifier
    ///
    /// Identifiers are ChEMBL IDs for drugs (CHEMBL25), Ensembl gene IDs for
    /// targets (ENSG00000157764) and EFO IDs for diseases (EFO_0000685).
    Interactions {
        /// Identifier to look up
        #[arg(value_name = "ID")]
        query_id: String,

        /// Kind of identifier: drug, target or disease
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        id_type: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables with colors
    Human,
    /// JSON output; failures print {"error": "..."}
    Json,
    /// CSV with the API's field names as header
    Csv,
}

impl Commands {
    fn format(&self) -> OutputFormat {
        match self {
            Self::Search { format, .. } | Self::Interactions { format, .. } => *format,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let format = cli.command.format();

    init_tracing(cli.quiet);
    configure_colors(cli.color, cli.no_color);

    let output = OutputOptions {
        show_progress: !cli.quiet && !cli.no_progress,
        show_info: !cli.quiet,
    };

    let settings = match settings::resolve(settings::CliOverrides {
        config: cli.config,
        endpoint: cli.endpoint,
        timeout: cli.timeout,
        headers: cli.headers,
    }) {
        Ok(settings) => settings,
        Err(err) => {
            commands::report_failure(&err, format);
            ExitCode::ConfigError.exit();
        }
    };
    tracing::debug!(?settings, "Resolved client settings");
    let client = settings.client();

    let code = match cli.command {
        Commands::Search {
            keywords,
            size,
            format,
        } => {
            let size = size.unwrap_or(settings.search_size);
            commands::search::run(&client, &keywords, size, format, output).await
        }
        Commands::Interactions {
            query_id,
            id_type,
            format,
        } => commands::interactions::run(&client, &query_id, &id_type, format, output).await,
    };

    match code {
        Ok(ExitCode::Success) => {}
        Ok(code) => code.exit(),
        Err(err) => {
            commands::report_failure(&err, format);
            ExitCode::IoError.exit();
        }
    }
}

/// Diagnostics go to stderr. Client notices (size clamped, results truncated)
/// are shown by default; `RUST_LOG` overrides the filter.
fn init_tracing(quiet: bool) {
    let default_filter = if quiet {
        "error"
    } else {
        "warn,opentargets_client=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        control::set_override(false);
    }
}
