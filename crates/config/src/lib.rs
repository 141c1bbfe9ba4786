//! Configuration for the Open Targets client.
//!
//! Settings live in an optional `.opentargetsrc.yml` (or `.yaml`, `.json`,
//! extension-less `.opentargetsrc`, `opentargets.config.yml`,
//! `opentargets.config.json`) found by walking up from the working directory.
//! Every field is optional; command-line flags take precedence over the file.

mod config;
mod error;
mod loader;

pub use config::OpenTargetsConfig;
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str};
