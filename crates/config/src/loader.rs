use crate::{ConfigError, OpenTargetsConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
const CONFIG_FILES: &[&str] = &[
    ".opentargetsrc.yml",
    ".opentargetsrc.yaml",
    ".opentargetsrc.json",
    ".opentargetsrc",
    "opentargets.config.yml",
    "opentargets.config.yaml",
    "opentargets.config.json",
];

/// Find a config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a config from the specified path.
/// Automatically detects the format based on file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<OpenTargetsConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        endpoint = config.endpoint.as_deref().unwrap_or("<default>"),
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load a config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<OpenTargetsConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    tracing::debug!(extension, file_name, "Detecting config format");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        "" if file_name == ".opentargetsrc" => {
            // No extension - try YAML first, then JSON
            tracing::trace!("Trying YAML then JSON for .opentargetsrc");
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;

    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<OpenTargetsConfig> {
    // An empty file is a valid config with no overrides
    if contents.trim().is_empty() {
        return Ok(OpenTargetsConfig::default());
    }
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<OpenTargetsConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

#[tracing::instrument(skip(config, path), fields(path = %path.display()))]
fn validate_config(config: &OpenTargetsConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    if let Some(endpoint) = &config.endpoint {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(invalid("endpoint cannot be empty".to_string()));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(invalid(format!(
                "endpoint '{endpoint}' must be an http:// or https:// URL"
            )));
        }
    }

    if config.timeout == Some(0) {
        return Err(invalid("timeout must be at least 1 second".to_string()));
    }
    if config.connect_timeout == Some(0) {
        return Err(invalid(
            "connectTimeout must be at least 1 second".to_string(),
        ));
    }

    for name in config.headers.iter().flatten().map(|(name, _)| name) {
        if name.trim().is_empty() {
            return Err(invalid("header name cannot be empty".to_string()));
        }
    }

    tracing::debug!("Config validation passed");
    Ok(())
}
