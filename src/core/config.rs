//! User settings - persisted preferences passed explicitly into the core
//!
//! Settings live in a YAML file in the platform config directory
//! (e.g. `~/.config/roofquote/config.yaml`). Nothing in the pricing code reads
//! them directly; commands load them once and hand the values down.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pricing::{PriceBook, RuleSet};
use crate::yaml::{parse_yaml, YamlError};

const CONFIG_FILE: &str = "config.yaml";

/// Keys accepted by [`Settings::set`]
pub const SETTING_KEYS: &[&str] = &[
    "markup_pct",
    "hide_prices",
    "logo",
    "price_book",
    "rules.z_metal_wall_addend",
    "rules.staples_without_fastener",
];

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Yaml(#[from] YamlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_yml::Error),

    #[error("Unknown setting: {0}. Valid settings: {keys}", keys = SETTING_KEYS.join(", "))]
    UnknownKey(String),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Could not determine a configuration directory for this platform")]
    NoConfigDir,
}

/// Persisted preferences
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Markup used for the last estimate; the default for the next one
    pub markup_pct: f64,

    /// Omit unit and extended prices from printed quotes
    pub hide_prices: bool,

    /// PNG or JPEG logo for the quote header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<PathBuf>,

    /// YAML price book replacing the built-in prices
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_book: Option<PathBuf>,

    pub rules: RuleSet,
}

impl Settings {
    /// Platform default location of the settings file
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        directories::ProjectDirs::from("", "", "roofquote")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load settings from a file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings = parse_yaml(&content, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Write settings, creating the parent directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_yml::to_string(self)?)?;
        tracing::debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Update one setting from its textual form
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        match key {
            "markup_pct" | "markup" => {
                let pct: f64 = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid("expected a number"))?;
                if !pct.is_finite() || pct < 0.0 {
                    return Err(invalid("must be a non-negative number"));
                }
                self.markup_pct = pct;
            }
            "hide_prices" => {
                self.hide_prices =
                    parse_bool(value).ok_or_else(|| invalid("expected true or false"))?
            }
            "logo" => {
                let logo = optional_path(value);
                if logo.as_deref().is_some_and(|p| !is_supported_logo(p)) {
                    return Err(invalid("logo must be a PNG or JPEG image"));
                }
                self.logo = logo;
            }
            "price_book" => self.price_book = optional_path(value),
            "rules.z_metal_wall_addend" => {
                self.rules.z_metal_wall_addend =
                    parse_bool(value).ok_or_else(|| invalid("expected true or false"))?
            }
            "rules.staples_without_fastener" => {
                self.rules.staples_without_fastener =
                    parse_bool(value).ok_or_else(|| invalid("expected true or false"))?
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// The configured price book, or the built-in one
    pub fn load_price_book(&self) -> Result<PriceBook, YamlError> {
        match &self.price_book {
            Some(path) => PriceBook::load(path),
            None => Ok(PriceBook::builtin()),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Empty or "none" clears an optional path
fn optional_path(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

fn is_supported_logo(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load_from(&tmp.path().join("config.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/config.yaml");

        let mut settings = Settings::default();
        settings.set("markup_pct", "12.5").unwrap();
        settings.set("hide_prices", "yes").unwrap();
        settings.set("rules.z_metal_wall_addend", "true").unwrap();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.markup_pct, 12.5);
        assert!(loaded.hide_prices);
        assert!(loaded.rules.z_metal_wall_addend);
        assert!(!loaded.rules.staples_without_fastener);
    }

    #[test]
    fn test_partial_file_defaults_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "hide_prices: true\nunknown_field: 3\n").unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert!(loaded.hide_prices);
        assert_eq!(loaded.markup_pct, 0.0);
        assert_eq!(loaded.rules, RuleSet::default());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set("markup_pct", "lots"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.set("markup_pct", "-3"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.set("logo", "logo.gif"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.set("colour", "blue"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_logo_can_be_cleared() {
        let mut settings = Settings::default();
        settings.set("logo", "brand/Logo.PNG").unwrap();
        assert_eq!(settings.logo, Some(PathBuf::from("brand/Logo.PNG")));
        settings.set("logo", "none").unwrap();
        assert_eq!(settings.logo, None);
    }

    #[test]
    fn test_builtin_price_book_by_default() {
        let settings = Settings::default();
        assert_eq!(settings.load_price_book().unwrap(), PriceBook::builtin());
    }
}
