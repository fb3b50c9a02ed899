//! Runtime configuration handling
//!
//! Only diagnostics are configurable. The encoded URL, the output path and
//! the rendering parameters are fixed.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Top-level configuration structure read from disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QrLocalConfig {
    /// Logging configuration
    pub logging: LoggingOptions,
    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
    /// Problems found while loading that did not stop it
    #[serde(skip)]
    pub warnings: Vec<String>,
}

impl QrLocalConfig {
    /// Load configuration from the working directory / XDG config, then apply
    /// `QRLOCAL_*` environment overrides.
    pub fn load() -> Result<Self> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        let xdg = env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);

        let mut config = match Self::discover_file(&cwd, xdg.as_deref()) {
            Some(path) => {
                let mut config = Self::from_file(&path)?;
                config.source = Some(path);
                config
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Log where the configuration came from and any load warnings.
    ///
    /// Loading happens before the subscriber exists, so call this after `logging::init`.
    pub fn report(&self) {
        match &self.source {
            Some(path) => tracing::info!("Using configuration file: {}", path.display()),
            None => tracing::debug!("No qrlocal.toml / qrlocal.yaml found, using defaults"),
        }
        for warning in &self.warnings {
            tracing::warn!("{warning}");
        }
    }

    /// Attempt to locate a configuration file in `cwd`, then under `xdg_config/qrlocal`.
    pub fn discover_file(cwd: &Path, xdg_config: Option<&Path>) -> Option<PathBuf> {
        let local = ["qrlocal.toml", "qrlocal.yaml", "qrlocal.yml"]
            .iter()
            .map(|candidate| cwd.join(candidate));

        let xdg = xdg_config.into_iter().flat_map(|base| {
            let base = base.join("qrlocal");
            ["config.toml", "config.yaml"]
                .into_iter()
                .map(move |candidate| base.join(candidate))
        });

        local.chain(xdg).find(|path| path.exists())
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply overrides from a variable lookup (the process environment in `load`).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.logging.apply_overrides(lookup, &mut self.warnings)
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level or filter directive (overridable via `QRLOCAL_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
    /// ANSI colors in stderr logging
    pub color: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            rotation: None,
            color: false,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_overrides<F>(
        &mut self,
        lookup: F,
        warnings: &mut Vec<String>,
    ) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("QRLOCAL_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = lookup("QRLOCAL_LOG_FILE") {
            self.file = if file.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(file))
            };
        }
        if let Some(rotation) = lookup("QRLOCAL_LOG_ROTATION") {
            self.rotation = Some(rotation.parse().map_err(Error::Config)?);
        }
        if let Some(color) = lookup("QRLOCAL_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "no" => self.color = false,
                "1" | "true" | "yes" => self.color = true,
                _ => warnings.push(format!(
                    "Ignoring QRLOCAL_LOG_COLOR={color}, expected 1/true/yes or 0/false/no"
                )),
            }
        }
        Ok(())
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl FromStr for LogRotation {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            _ => Err(format!(
                "Unsupported log rotation '{value}', expected 'hourly' or 'daily'"
            )),
        }
    }
}
