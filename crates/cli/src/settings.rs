//! Client settings resolved from the config file and command-line flags.

use anyhow::{Context, Result};
use opentargets_client::{OpenTargetsClient, DEFAULT_ENDPOINT, MAX_PAGE_SIZE};
use opentargets_config::{find_config, load_config, OpenTargetsConfig};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Flags that override config file values.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub timeout: Option<u64>,
    pub headers: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ClientSettings {
    pub endpoint: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub search_size: i64,
}

impl ClientSettings {
    #[must_use]
    pub fn client(&self) -> OpenTargetsClient {
        OpenTargetsClient::new()
            .with_endpoint(&self.endpoint)
            .with_timeout(self.timeout)
            .with_connect_timeout(self.connect_timeout)
            .with_headers(self.headers.iter().cloned())
    }
}

/// Loads the config named by `--config`, or the nearest discovered one.
/// No config file at all is fine and yields defaults.
fn load_file_config(config_path: Option<PathBuf>) -> Result<OpenTargetsConfig> {
    let path = if let Some(path) = config_path {
        path
    } else {
        let current_dir = std::env::current_dir()?;
        match find_config(&current_dir).context("Failed to search for config")? {
            Some(path) => path,
            None => return Ok(OpenTargetsConfig::default()),
        }
    };

    load_config(&path).with_context(|| format!("Failed to load config {}", path.display()))
}

/// Parses a header string in "Name: Value" format.
fn parse_header(header: &str) -> Result<(String, String)> {
    let Some((name, value)) = header.split_once(':') else {
        anyhow::bail!("Invalid header format: '{header}'. Expected 'Header-Name: Header-Value'");
    };
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Header name cannot be empty");
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Merges flags over file values over defaults.
pub fn resolve(overrides: CliOverrides) -> Result<ClientSettings> {
    let file = load_file_config(overrides.config)?;
    merge(file, overrides.endpoint, overrides.timeout, &overrides.headers)
}

fn merge(
    file: OpenTargetsConfig,
    cli_endpoint: Option<String>,
    cli_timeout: Option<u64>,
    cli_headers: &[String],
) -> Result<ClientSettings> {
    let mut headers = file.header_pairs();

    let cli_parsed = cli_headers
        .iter()
        .map(|h| parse_header(h))
        .collect::<Result<Vec<_>>>()
        .context("Failed to parse headers")?;

    for (name, value) in cli_parsed {
        // CLI wins over config, header names are case-insensitive
        headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        headers.push((name, value));
    }

    if cli_timeout == Some(0) {
        anyhow::bail!("--timeout must be at least 1 second");
    }

    let timeout = cli_timeout
        .map(Duration::from_secs)
        .or_else(|| file.timeout())
        .unwrap_or(DEFAULT_TIMEOUT);
    let connect_timeout = file.connect_timeout().unwrap_or(DEFAULT_CONNECT_TIMEOUT);

    Ok(ClientSettings {
        endpoint: cli_endpoint
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        headers,
        timeout,
        connect_timeout,
        search_size: file.search_size.unwrap_or(MAX_PAGE_SIZE),
    })
}
