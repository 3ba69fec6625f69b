use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for the load-progress mediator and simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressSettings {
    /// Floor applied to every progress write so the bar is visible at once.
    pub minimum_progress: f32,
    pub simulator_increment: f32,
    pub simulator_tick_delay_ms: u64,
    /// Finish the bar when the active-tab supplier reports no tab at all.
    pub finish_without_tab: bool,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            minimum_progress: 0.05,
            simulator_increment: 0.1,
            simulator_tick_delay_ms: 10,
            finish_without_tab: false,
        }
    }
}

impl ProgressSettings {
    pub fn from_ron_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = ron::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.minimum_progress > 0.0 && self.minimum_progress < 1.0) {
            return Err(SettingsError::Invalid {
                field: "minimum_progress",
                reason: format!("{} is outside (0, 1)", self.minimum_progress),
            });
        }
        if !(self.simulator_increment > 0.0 && self.simulator_increment <= 1.0) {
            return Err(SettingsError::Invalid {
                field: "simulator_increment",
                reason: format!("{} is outside (0, 1]", self.simulator_increment),
            });
        }
        if self.simulator_tick_delay_ms == 0 {
            return Err(SettingsError::Invalid {
                field: "simulator_tick_delay_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn simulator_tick_delay(&self) -> Duration {
        Duration::from_millis(self.simulator_tick_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let settings = ProgressSettings::default();
        assert_eq!(settings.minimum_progress, 0.05);
        assert_eq!(settings.simulator_increment, 0.1);
        assert_eq!(settings.simulator_tick_delay(), Duration::from_millis(10));
        assert!(!settings.finish_without_tab);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings = ProgressSettings::from_ron_str("(finish_without_tab: true)").unwrap();
        assert!(settings.finish_without_tab);
        assert_eq!(settings.minimum_progress, 0.05);
    }

    #[test]
    fn out_of_range_minimum_is_rejected() {
        let err = ProgressSettings::from_ron_str("(minimum_progress: 1.5)").unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "minimum_progress",
                ..
            }
        ));
    }

    #[test]
    fn zero_delay_is_rejected() {
        let err = ProgressSettings::from_ron_str("(simulator_tick_delay_ms: 0)").unwrap_err();
        assert!(err.to_string().contains("simulator_tick_delay_ms"));
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let err = ProgressSettings::from_ron_str("(minimum_progress: )").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.ron");
        fs::write(&path, "(simulator_increment: 0.25)").unwrap();
        let settings = ProgressSettings::load(&path).unwrap();
        assert_eq!(settings.simulator_increment, 0.25);

        let missing = ProgressSettings::load(&dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(missing, SettingsError::Io(_)));
    }
}
