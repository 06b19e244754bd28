//! Job configuration.
//!
//! A job is described by a small JSON document. Only `input` and `output` are required; every
//! other section falls back to its `Default`:
//!
//! ```json
//! {
//!   "input": "data/raw/salary_survey.csv",
//!   "output": "data/clean/salary_survey.csv",
//!   "ingestion": { "encoding": "windows1252_fallback", "delimiter": ",", "na_values": ["N/A", "NULL"] },
//!   "transform": { "drop_null_rows": false },
//!   "logging": { "level": "debug", "format": "json" }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};
use crate::ingestion::IngestionOptions;
use crate::logging::LogConfig;
use crate::transform::TransformOptions;

/// Everything needed to run one [`crate::job::EtlJob`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EtlConfig {
    /// Raw survey export to read.
    pub input: PathBuf,
    /// Where the cleaned CSV is written.
    pub output: PathBuf,
    #[serde(default)]
    pub ingestion: IngestionOptions,
    #[serde(default)]
    pub transform: TransformOptions,
    #[serde(default)]
    pub logging: LogConfig,
}

impl EtlConfig {
    /// Config with default options for the given paths.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ingestion: IngestionOptions::default(),
            transform: TransformOptions::default(),
            logging: LogConfig::default(),
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.input.as_os_str().is_empty() {
            return Err(invalid("input path is empty"));
        }
        if self.output.as_os_str().is_empty() {
            return Err(invalid("output path is empty"));
        }
        if self.input == self.output {
            return Err(invalid(format!(
                "output would overwrite the input file {}",
                self.input.display()
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::EncodingPolicy;
    use crate::logging::{LogFormat, LogLevel};

    #[test]
    fn minimal_config_takes_defaults() {
        let cfg = EtlConfig::from_json_str(r#"{"input": "in.csv", "output": "out/clean.csv"}"#)
            .unwrap();
        assert_eq!(cfg, EtlConfig::new("in.csv", "out/clean.csv"));
        assert!(cfg.ingestion.required_headers);
        assert_eq!(cfg.ingestion.delimiter, b',');
        assert!(cfg.ingestion.na_values.iter().any(|na| na == "N/A"));
    }

    #[test]
    fn full_config_parses() {
        let cfg = EtlConfig::from_json_str(
            r#"{
                "input": "in.csv",
                "output": "out.csv",
                "ingestion": {"encoding": "windows1252_fallback", "delimiter": ";"},
                "transform": {"drop_null_rows": true},
                "logging": {"level": "debug", "format": "json", "with_target": true}
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.ingestion.encoding, EncodingPolicy::Windows1252Fallback);
        assert_eq!(cfg.ingestion.delimiter, b';');
        assert!(cfg.ingestion.required_headers);
        assert!(cfg.transform.drop_null_rows);
        assert_eq!(cfg.logging.level, LogLevel::Debug);
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn na_values_can_be_replaced() {
        let cfg = EtlConfig::from_json_str(
            r#"{"input": "a.csv", "output": "b.csv", "ingestion": {"na_values": ["-", "?"]}}"#,
        )
        .unwrap();
        assert_eq!(cfg.ingestion.na_values, vec!["-", "?"]);
        assert_eq!(cfg.ingestion.delimiter, b',');
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = EtlConfig::from_json_str(
            r#"{"input": "a.csv", "output": "b.csv", "transform": {"seniority": 3}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn multi_character_delimiter_is_rejected() {
        let err = EtlConfig::from_json_str(
            r#"{"input": "a.csv", "output": "b.csv", "ingestion": {"delimiter": ";;"}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("single ASCII character"));
    }

    #[test]
    fn output_must_differ_from_input() {
        let err = EtlConfig::from_json_str(r#"{"input": "a.csv", "output": "a.csv"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = EtlConfig::from_json_str(r#"{"input": "", "output": "a.csv"}"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid config: input path is empty");
    }
}
