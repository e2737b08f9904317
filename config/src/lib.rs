//! Configuration loading for the ownable CLI.
//!
//! ```toml
//! [log]
//! filter = "ownable=debug"
//!
//! [state]
//! path = "${HOME}/.ownable/state.json"
//! ```
//!
//! The file lives at `$OWNABLE_CONFIG` if set, else `~/.ownable/config.toml`.
//! A missing file is not an error; every section is optional.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "OWNABLE_CONFIG";

#[derive(Debug, Default, Deserialize)]
pub struct OwnableConfig {
    pub log: Option<LogConfig>,
    pub state: Option<StateConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` still wins.
    pub filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StateConfig {
    /// Default registry state file. `${VAR}` references are expanded.
    pub path: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Expand `${VAR}` references. Unset variables expand to nothing; an
/// unterminated `${` is kept verbatim.
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".ownable").join("config.toml"))
}

impl OwnableConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(config))
    }

    #[must_use]
    pub fn log_filter(&self) -> Option<&str> {
        self.log
            .as_ref()
            .and_then(|log| log.filter.as_deref())
            .map(str::trim)
            .filter(|filter| !filter.is_empty())
    }

    /// Configured state file with environment variables expanded.
    #[must_use]
    pub fn state_path(&self) -> Option<PathBuf> {
        let raw = self.state.as_ref()?.path.as_deref()?;
        let expanded = expand_env_vars(raw.trim());
        if expanded.is_empty() {
            None
        } else {
            Some(PathBuf::from(expanded))
        }
    }
}
