//! Configuration management for `rt`.
//!
//! Configuration is resolved in layers, later layers winning:
//! - Built-in default (root at `~/rtckt`)
//! - User config (`~/.config/rtckt/config.yaml`, or `$RTCKT_CONFIG`)
//! - Environment / command-line overrides (`RTCKT_ROOT`, `--root`, `--project`)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RtError, Result};

/// Environment variable naming an alternate config file.
pub const CONFIG_ENV: &str = "RTCKT_CONFIG";

/// On-disk config file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Root project directory.
    pub root: Option<PathBuf>,
    /// Project (relative to the root) used when `--project` is absent.
    pub default_project: Option<String>,
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub project: Option<String>,
    pub config_path: Option<PathBuf>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub root: PathBuf,
    pub project: Option<String>,
}

impl Config {
    /// Resolve configuration from the config file and overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` if the config file is malformed, or a ticket
    /// error if no root is configured and the home directory is unknown.
    pub fn load(overrides: &CliOverrides) -> Result<Self> {
        let file = match config_path(overrides) {
            Some(path) => load_file(&path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(file, overrides)
    }

    /// Merge a parsed config file with overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if no root is given anywhere and the home
    /// directory cannot be determined.
    pub fn resolve(file: ConfigFile, overrides: &CliOverrides) -> Result<Self> {
        let root = match overrides.root.clone().or(file.root) {
            Some(root) => expand_home(&root),
            None => rtckt_lib::project::default_root()?,
        };
        let project = overrides
            .project
            .clone()
            .or(file.default_project)
            .filter(|p| !p.trim().is_empty());

        Ok(Self { root, project })
    }
}

/// Locate the config file, if any.
fn config_path(overrides: &CliOverrides) -> Option<PathBuf> {
    if let Some(path) = &overrides.config_path {
        return Some(path.clone());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("rtckt").join("config.yaml"))
}

/// Parse a config file. A missing file is an empty config.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read or `ConfigParse` if it is not
/// valid YAML for [`ConfigFile`].
pub fn load_file(path: &Path) -> Result<ConfigFile> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No config file");
            return Ok(ConfigFile::default());
        }
        Err(e) => return Err(RtError::Io(e)),
    };

    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    serde_yaml::from_str(&contents).map_err(|source| RtError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}
