use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use toolbar_progress_core::ProgressSettings;
use toolbar_progress_engine::EngineCommand;

fn default_settle_ms() -> u64 {
    500
}

/// A scripted sequence of browser operations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Trace {
    /// How long to keep collecting widget calls after the last step.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    #[serde(default)]
    pub settings: Option<ProgressSettings>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    /// Delay before this step, relative to the previous one.
    #[serde(default)]
    pub after_ms: u64,
    pub command: EngineCommand,
}

impl Trace {
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let trace: Self = ron::from_str(text).context("malformed trace")?;
        if let Some(settings) = &trace.settings {
            settings.validate().context("invalid settings in trace")?;
        }
        Ok(trace)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read trace {}", path.display()))?;
        Self::from_ron_str(&text).with_context(|| format!("in {}", path.display()))
    }
}
