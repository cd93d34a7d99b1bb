//! Persisted planner settings.
//!
//! Only non-secret values are written to disk. The API key is always read from
//! the environment when the model settings are resolved.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use retouch_llm::ModelSettings;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::host::batch_play::DEFAULT_PREVIEW_QUALITY;
use crate::host::{ActionBridge, BatchPlayEditor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetouchSettings {
    /// Candidate models in priority order. Empty means the built-in list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    /// JPEG quality of the preview sent for analysis.
    #[serde(default = "default_preview_quality")]
    pub preview_quality: u8,
}

fn default_preview_quality() -> u8 {
    DEFAULT_PREVIEW_QUALITY
}

impl Default for RetouchSettings {
    fn default() -> Self {
        Self {
            models: Vec::new(),
            base_url: None,
            temperature: None,
            request_timeout_secs: None,
            preview_quality: DEFAULT_PREVIEW_QUALITY,
        }
    }
}

impl RetouchSettings {
    /// Environment-derived model settings with the stored values applied on top.
    pub fn to_model_settings(&self) -> ModelSettings {
        self.apply_to(ModelSettings::from_env())
    }

    /// Host editor over `bridge` using the stored preview quality.
    pub fn editor<B: ActionBridge>(&self, bridge: B) -> BatchPlayEditor<B> {
        BatchPlayEditor::new(bridge).with_preview_quality(self.preview_quality)
    }

    fn apply_to(&self, mut settings: ModelSettings) -> ModelSettings {
        if !self.models.is_empty() {
            settings.models = self.models.clone();
        }
        if let Some(base_url) = self.base_url.as_ref().filter(|url| !url.is_empty()) {
            settings.base_url = base_url.clone();
        }
        if let Some(temperature) = self.temperature {
            settings.temperature = temperature;
        }
        if let Some(secs) = self.request_timeout_secs {
            settings.request_timeout = Duration::from_secs(secs);
        }
        settings
    }
}

/// Settings store that persists to disk.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Uses `RETOUCH_SETTINGS_PATH` or falls back to the user config directory.
    pub fn default_location() -> Self {
        let path = std::env::var("RETOUCH_SETTINGS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("retouch")
                    .join("settings.json")
            });
        Self::new(path)
    }

    /// Load settings from disk, returning defaults if not found.
    pub fn load(&self) -> CoreResult<RetouchSettings> {
        if !self.path.exists() {
            return Ok(RetouchSettings::default());
        }
        let data = fs::read_to_string(&self.path).map_err(|e| self.error("read", e))?;
        serde_json::from_str(&data).map_err(|e| self.error("parse", e))
    }

    pub fn save(&self, settings: &RetouchSettings) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.error("create directory for", e))?;
        }
        let data =
            serde_json::to_string_pretty(settings).map_err(|e| self.error("serialize", e))?;
        fs::write(&self.path, data).map_err(|e| self.error("write", e))?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn error(&self, action: &str, error: impl std::fmt::Display) -> CoreError {
        CoreError::Settings(format!(
            "failed to {action} {}: {error}",
            self.path.display()
        ))
    }
}
