//! Environment-aware settings loader.
//!
//! Settings come from the process environment layered over the first env
//! file found for the selected [`Environment`]:
//!
//! | Order | File                 |
//! |-------|----------------------|
//! | 1     | `.env.{environment}` |
//! | 2     | `.env`               |
//!
//! For `local` the first candidate is `.env.local`.
//!
//! The file is read into an [`EnvSource`] instead of being exported into
//! the process, so two loaders in one process never see each other's
//! values.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::environment::{Environment, ParseEnvironmentError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No environment file found. Looked for: {}", .candidates.join(", "))]
    EnvFileNotFound { candidates: Vec<String> },

    #[error("Failed to read environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Environment(#[from] ParseEnvironmentError),
}

/// Key/value lookup backed by an env file, with the process environment
/// taking precedence.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    values: HashMap<String, String>,
    process_env: bool,
    loaded_from: Option<PathBuf>,
}

impl EnvSource {
    /// Read the first existing env file for `environment` under `root`.
    pub fn load(root: &Path, environment: Environment) -> Result<Self, ConfigError> {
        let candidates = candidate_files(root, environment);
        let Some(path) = candidates.iter().find(|p| p.is_file()) else {
            return Err(ConfigError::EnvFileNotFound {
                candidates: candidates.iter().map(|p| p.display().to_string()).collect(),
            });
        };

        let iter = dotenvy::from_path_iter(path).map_err(|source| ConfigError::EnvFile {
            path: path.clone(),
            source,
        })?;

        let mut values = HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                path: path.clone(),
                source,
            })?;
            values.insert(key, value);
        }

        tracing::debug!(path = %path.display(), keys = values.len(), "Loaded environment file");

        Ok(Self {
            values,
            process_env: true,
            loaded_from: Some(path.clone()),
        })
    }

    /// Build a source from explicit pairs, ignoring the process environment.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            process_env: false,
            loaded_from: None,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if self.process_env {
            if let Ok(value) = std::env::var(key) {
                return Some(value);
            }
        }
        self.values.get(key).cloned()
    }

    pub fn require(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(key))
    }

    /// Parse an optional key, falling back to `default` when absent.
    pub fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                value: raw,
                reason: e.to_string(),
            }),
        }
    }

    /// The file the values were read from, if any.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}

/// Env files considered for `environment`, in order of precedence.
pub fn candidate_files(root: &Path, environment: Environment) -> Vec<PathBuf> {
    vec![root.join(format!(".env.{environment}")), root.join(".env")]
}

/// Pick the environment: an explicit choice wins, then `ENVIRONMENT`,
/// then [`Environment::Development`].
pub fn resolve_environment(explicit: Option<Environment>) -> Result<Environment, ConfigError> {
    if let Some(env) = explicit {
        return Ok(env);
    }
    match std::env::var("ENVIRONMENT") {
        Ok(raw) if !raw.trim().is_empty() => Ok(raw.parse()?),
        _ => Ok(Environment::default()),
    }
}

/// Application settings shared by the server and the seeder.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Version string reported by the API.
    pub version: String,
    /// Base URL of the backend project, e.g. `https://xyz.example.co`.
    pub api_url: String,
    /// Backend API key, sent on every request.
    pub api_key: String,
    pub environment: Environment,
    pub debug: bool,
}

impl Settings {
    /// Load settings for `environment` from the env files under `root`.
    pub fn load(root: &Path, environment: Environment) -> Result<(Self, EnvSource), ConfigError> {
        let source = EnvSource::load(root, environment)?;
        let settings = Self::from_source(&source, environment)?;
        Ok((settings, source))
    }

    /// Build settings from an already-loaded source.
    ///
    /// | Key       | Required | Default |
    /// |-----------|----------|---------|
    /// | `VERSION` | yes      |         |
    /// | `API_URL` | yes      |         |
    /// | `KEY`     | yes      |         |
    /// | `DEBUG`   | no       | `false` |
    pub fn from_source(source: &EnvSource, environment: Environment) -> Result<Self, ConfigError> {
        Ok(Self {
            version: source.require("VERSION")?,
            api_url: source.require("API_URL")?.trim_end_matches('/').to_string(),
            api_key: source.require("KEY")?,
            environment,
            debug: source.parse_or("DEBUG", false)?,
        })
    }
}
