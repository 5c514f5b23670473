// dartnml/src/config.rs

use crate::constants::DEFAULT_CONFIG_NAME;
use anyhow::Context;
use f90defaults::{ExtractOptions, WriteOptions};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tool configuration parsed from dartnml.yml.
///
/// ```yaml
/// makefile: ../build/Makefile
/// extract:
///   missing_defaults: omit
///   member_order: namelist
/// write:
///   indent: "    "
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Makefile used by `collect` when `--makefile` is not given
    pub makefile: Option<PathBuf>,
    pub extract: ExtractOptions,
    pub write: WriteOptions,
}

impl Config {
    /// Load the configuration named on the command line, or `dartnml.yml`
    /// in `dir` when it exists, or fall back to the defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Config::try_from(path);
        }
        let implicit = dir.join(DEFAULT_CONFIG_NAME);
        if implicit.is_file() {
            return Config::try_from(implicit.as_path());
        }
        debug!("no {} found, using default configuration", DEFAULT_CONFIG_NAME);
        Ok(Config::default())
    }
}

impl TryFrom<&Path> for Config {
    type Error = anyhow::Error;

    fn try_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs_err::read_to_string(path)
            .context(format!("Error reading {} to string.", path.display()))?;

        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let config = serde_saphyr::from_str::<Config>(&content)
            .context(format!("Error parsing YAML file: {}", path.display()))?;
        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }
}

impl TryFrom<&PathBuf> for Config {
    type Error = anyhow::Error;

    fn try_from(path: &PathBuf) -> anyhow::Result<Self> {
        Config::try_from(path.as_path())
    }
}
