//! Codec configuration file
//!
//! JSON document, every key optional:
//!
//! ```json
//! {
//!   "dialect": "windows",
//!   "header": true,
//!   "strict": false,
//!   "include_header": true,
//!   "log_level": "warn"
//! }
//! ```
//!
//! `dialect` is either a preset name or an object with `delimiter`, `quote`
//! and `line_delimiter` keys. `log_level` accepts `off` to silence logging.
//!
//! Error codes:
//! - CSV_CONFIG_READ
//! - CSV_CONFIG_PARSE
//! - CSV_CONFIG_INVALID

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{CodecOptions, HeaderMode};
use crate::dialect::{Dialect, DialectError, DialectPreset};
use crate::observability::{log_event, Event, Logger, Severity};

/// Configuration failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid dialect: {0}")]
    Dialect(#[from] DialectError),

    #[error("invalid log_level '{0}'")]
    LogLevel(String),
}

impl ConfigError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "CSV_CONFIG_READ",
            ConfigError::Parse(_) => "CSV_CONFIG_PARSE",
            ConfigError::Dialect(_) | ConfigError::LogLevel(_) => "CSV_CONFIG_INVALID",
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Dialect as written in a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DialectSetting {
    Preset(DialectPreset),
    Custom {
        delimiter: String,
        quote: String,
        line_delimiter: String,
    },
}

impl Default for DialectSetting {
    fn default() -> Self {
        DialectSetting::Preset(DialectPreset::Windows)
    }
}

impl DialectSetting {
    pub fn to_dialect(&self) -> ConfigResult<Dialect> {
        match self {
            DialectSetting::Preset(preset) => Ok(Dialect::preset(*preset)),
            DialectSetting::Custom {
                delimiter,
                quote,
                line_delimiter,
            } => Ok(Dialect::new(
                delimiter.as_str(),
                quote.as_str(),
                line_delimiter.as_str(),
            )?),
        }
    }
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    #[serde(default)]
    pub dialect: DialectSetting,

    /// First row is a header (default: true)
    #[serde(default = "default_true")]
    pub header: bool,

    /// Unmatched columns fail resolution (default: false)
    #[serde(default)]
    pub strict: bool,

    /// Write a header row (default: true)
    #[serde(default = "default_true")]
    pub include_header: bool,

    /// Minimum log severity or `off` (default: "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            dialect: DialectSetting::default(),
            header: true,
            strict: false,
            include_header: true,
            log_level: default_log_level(),
        }
    }
}

impl CodecConfig {
    /// Loads and validates a config file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::from_json(&content)?;

        let path_text = path.display().to_string();
        log_event(Event::ConfigLoaded, &[("path", path_text.as_str())]);

        Ok(config)
    }

    /// Parses and validates a config document
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: CodecConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the dialect tokens and the log level
    pub fn validate(&self) -> ConfigResult<()> {
        self.dialect.to_dialect()?;
        self.min_severity()?;
        Ok(())
    }

    pub fn to_dialect(&self) -> ConfigResult<Dialect> {
        self.dialect.to_dialect()
    }

    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            header_mode: if self.header {
                HeaderMode::FirstRow
            } else {
                HeaderMode::None
            },
            strict: self.strict,
            include_header: self.include_header,
        }
    }

    /// Parsed log level, `None` for `off`
    pub fn min_severity(&self) -> ConfigResult<Option<Severity>> {
        if self.log_level.eq_ignore_ascii_case("off") {
            return Ok(None);
        }
        self.log_level
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// Sets the process-wide log level
    pub fn apply_log_level(&self) -> ConfigResult<()> {
        Logger::set_min_severity(self.min_severity()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = CodecConfig::from_json("{}").unwrap();
        assert_eq!(config, CodecConfig::default());
        assert_eq!(config.codec_options(), CodecOptions::default());
        assert_eq!(config.to_dialect().unwrap(), Dialect::default());
        assert_eq!(config.min_severity().unwrap(), Some(Severity::Warn));
    }

    #[test]
    fn test_preset_name() {
        let config = CodecConfig::from_json(r#"{"dialect": "unix_text"}"#).unwrap();
        assert_eq!(
            config.to_dialect().unwrap(),
            Dialect::preset(DialectPreset::UnixText)
        );
    }

    #[test]
    fn test_custom_dialect() {
        let config = CodecConfig::from_json(
            r#"{"dialect": {"delimiter": ";", "quote": "'", "line_delimiter": "\n"}}"#,
        )
        .unwrap();
        let dialect = config.to_dialect().unwrap();
        assert_eq!(dialect.delimiter(), ";");
        assert_eq!(dialect.quote(), "'");
    }

    #[test]
    fn test_invalid_custom_dialect() {
        let err = CodecConfig::from_json(
            r#"{"dialect": {"delimiter": ",", "quote": ",", "line_delimiter": "\n"}}"#,
        )
        .unwrap_err();
        assert_eq!(err.code(), "CSV_CONFIG_INVALID");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = CodecConfig::from_json(r#"{"delimiter": ";"}"#).unwrap_err();
        assert_eq!(err.code(), "CSV_CONFIG_PARSE");
    }

    #[test]
    fn test_headerless_options() {
        let config =
            CodecConfig::from_json(r#"{"header": false, "strict": true, "log_level": "off"}"#)
                .unwrap();
        let options = config.codec_options();
        assert_eq!(options.header_mode, HeaderMode::None);
        assert!(options.strict);
        assert_eq!(config.min_severity().unwrap(), None);
    }

    #[test]
    fn test_bad_log_level() {
        let err = CodecConfig::from_json(r#"{"log_level": "loud"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::LogLevel(ref level) if level == "loud"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"dialect": "macintosh", "include_header": false}}"#).unwrap();

        let config = CodecConfig::load(file.path()).unwrap();
        assert_eq!(
            config.dialect,
            DialectSetting::Preset(DialectPreset::Macintosh)
        );
        assert!(!config.include_header);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CodecConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code(), "CSV_CONFIG_READ");
    }
}
