use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use engine_logging::engine_info;
use qa_engine::{AnalysisSettings, EngineConfig, LayoutConfig, DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};

/// Timestamp format of the document's "Generated:" line.
const GENERATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Settings loaded from an optional RON file. Missing fields keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub endpoint: String,
    pub output_dir: PathBuf,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub layout: Option<LayoutConfig>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output_dir: PathBuf::from("output"),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            layout: None,
        }
    }
}

impl AppSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings = Self::parse(&text)
            .with_context(|| format!("invalid settings file {}", path.display()))?;
        engine_info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    fn parse(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn with_overrides(mut self, endpoint: Option<String>, output_dir: Option<PathBuf>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir;
        }
        self
    }

    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default_with_output(self.output_dir.clone());
        config.analysis = AnalysisSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        };
        if let Some(layout) = &self.layout {
            config.layout = layout.clone();
        }
        config.generated_at = Arc::new(|| Local::now().format(GENERATED_FORMAT).to_string());
        config
    }
}
