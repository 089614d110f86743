//! Configuration for buchregal-core
//!
//! Centralized configuration for the backing sheet names, lookup and
//! sweep pacing, and the blurb endpoint.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// System-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LibraryConfig {
    /// Backing sheet names
    pub sheet: SheetConfig,
    /// Metadata lookup settings
    pub lookup: LookupConfig,
    /// Enrichment sweep settings
    pub sweep: SweepConfig,
    /// Blurb generation settings
    pub llm: LlmConfig,
}

/// Backing sheet configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Spreadsheet name
    pub spreadsheet: String,
    /// Worksheet holding the author directory
    pub directory_worksheet: String,
    /// Delay between single-cell writes in milliseconds
    pub write_delay_ms: u64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            spreadsheet: "Bücherliste".to_string(),
            directory_worksheet: "Autoren".to_string(),
            write_delay_ms: 300,
        }
    }
}

/// Metadata lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// User agent sent to the book APIs
    pub user_agent: String,
    /// Whether to look up covers at all
    pub fetch_covers: bool,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            user_agent: "buchregal/0.1".to_string(),
            fetch_covers: true,
        }
    }
}

/// Enrichment sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Delay between records in milliseconds
    pub record_delay_ms: u64,
    /// Fill missing covers and genres
    pub fill_covers: bool,
    /// Fill empty notes with generated blurbs
    pub fill_notes: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            record_delay_ms: 500,
            fill_covers: true,
            fill_notes: false,
        }
    }
}

/// Blurb generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Chat-completions endpoint URL
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            api_key_env: "BUCHREGAL_LLM_KEY".to_string(),
        }
    }
}

impl LibraryConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// The default config file location, `<config_dir>/buchregal/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("buchregal").join("config.toml"))
    }

    /// Load the default config file; a missing file yields the defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let Some(path) = Self::default_path() else {
            return Ok(Self::default());
        };
        Self::load_from(&path)
    }

    /// Load from a specific path; a missing file yields the defaults.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let config = Self::from_toml(&contents)?;
                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io(e.to_string())),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sheet.spreadsheet.trim().is_empty() {
            return Err(ConfigError::MissingField(
                "sheet.spreadsheet must not be empty".to_string(),
            ));
        }
        if self.sheet.directory_worksheet.trim().is_empty() {
            return Err(ConfigError::MissingField(
                "sheet.directory_worksheet must not be empty".to_string(),
            ));
        }
        if self.sweep.fill_notes && self.llm.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingField(
                "llm.endpoint is required when sweep.fill_notes is set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialize error: {0}")]
    Serialize(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Missing field: {0}")]
    MissingField(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = LibraryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sheet.spreadsheet, "Bücherliste");
        assert_eq!(config.sheet.directory_worksheet, "Autoren");
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = LibraryConfig::default();
        let toml = config.to_toml().unwrap();
        let parsed = LibraryConfig::from_toml(&toml).unwrap();
        assert_eq!(parsed.sheet.write_delay_ms, config.sheet.write_delay_ms);
        assert_eq!(parsed.llm.model, config.llm.model);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let parsed = LibraryConfig::from_toml(
            r#"
            [sheet]
            spreadsheet = "Leseliste"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.sheet.spreadsheet, "Leseliste");
        assert_eq!(parsed.sweep.record_delay_ms, 500);
    }

    #[test]
    fn test_empty_spreadsheet_rejected() {
        let mut config = LibraryConfig::default();
        config.sheet.spreadsheet = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fill_notes_requires_endpoint() {
        let mut config = LibraryConfig::default();
        config.sweep.fill_notes = true;
        config.llm.endpoint = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = LibraryConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.sheet.spreadsheet, "Bücherliste");
    }

    #[test]
    fn test_load_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = LibraryConfig::default();
        config.sweep.record_delay_ms = 50;
        std::fs::write(&path, config.to_toml().unwrap()).unwrap();
        let loaded = LibraryConfig::load_from(&path).unwrap();
        assert_eq!(loaded.sweep.record_delay_ms, 50);
    }
}
