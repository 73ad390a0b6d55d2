use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

pub const DEFAULT_NO_CANDIDATE_MARKER: &str = "N/A";

/// Zero-based column positions in the roster sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterLayout {
    pub name_column: usize,
    pub expiry_column: usize,
    pub first_task_column: usize,
}

impl Default for RosterLayout {
    fn default() -> Self {
        Self {
            name_column: 0,
            expiry_column: 2,
            first_task_column: 3,
        }
    }
}

impl RosterLayout {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name_column == self.expiry_column {
            return Err(ConfigError::Invalid(format!(
                "name and expiry columns must differ (both {})",
                self.name_column
            )));
        }
        if self.first_task_column <= self.name_column.max(self.expiry_column) {
            return Err(ConfigError::Invalid(format!(
                "first task column {} must come after the name ({}) and expiry ({}) columns",
                self.first_task_column, self.name_column, self.expiry_column
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    #[serde(flatten)]
    pub layout: RosterLayout,
    pub no_candidate_marker: String,
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            layout: RosterLayout::default(),
            no_candidate_marker: DEFAULT_NO_CANDIDATE_MARKER.to_string(),
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl DrawConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: DrawConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        if self.no_candidate_marker.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "no_candidate_marker must not be blank".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "unable to read config: {err}"),
            ConfigError::Parse(err) => write!(f, "invalid config json: {err}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: DrawConfig =
            serde_json::from_str(r#"{ "seed": 9, "first_task_column": 4 }"#).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.layout.first_task_column, 4);
        assert_eq!(config.layout.expiry_column, 2);
        assert_eq!(config.no_candidate_marker, "N/A");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn task_columns_must_follow_fixed_columns() {
        let layout = RosterLayout {
            name_column: 0,
            expiry_column: 3,
            first_task_column: 3,
        };
        assert!(matches!(layout.validate(), Err(ConfigError::Invalid(_))));
    }
}
