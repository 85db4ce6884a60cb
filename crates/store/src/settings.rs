//! Export settings management
//!
//! This module provides persistence, loading, and updating of the settings
//! that shape DITA export output.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name used when settings live in a configuration directory
pub const SETTINGS_FILE_NAME: &str = "export-settings.json";

/// Settings for DITA export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    /// Title of the root topic
    pub document_title: String,
    /// Spaces per indentation level (0 writes everything on one line)
    pub indent_width: usize,
    /// Whether empty paragraphs and titles export their placeholder default
    pub emit_placeholder_defaults: bool,
    /// Write `undefined` for an absent color channel in `ph` props
    pub legacy_undefined_colors: bool,
    /// Prefix for generated topic ids
    pub topic_id_prefix: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            document_title: "Extended DITA Test".to_string(),
            indent_width: 2,
            emit_placeholder_defaults: true,
            legacy_undefined_colors: false,
            topic_id_prefix: "topic_".to_string(),
        }
    }
}

/// Settings manager for loading, saving, and updating export settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: ExportSettings,
}

impl SettingsManager {
    /// Create a settings manager for the settings file inside `config_dir`
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self::with_path(config_dir.as_ref().join(SETTINGS_FILE_NAME))
    }

    /// Create a settings manager for an explicit settings file
    pub fn with_path(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
            current: ExportSettings::default(),
        }
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or fall back to defaults if the file is
    /// missing or unreadable
    pub fn load_sync(&mut self) -> Result<&ExportSettings> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            match serde_json::from_str::<ExportSettings>(&content) {
                Ok(settings) => {
                    self.current = settings;
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse settings file {}, using defaults: {}",
                        self.settings_path.display(),
                        e
                    );
                    self.current = ExportSettings::default();
                }
            }
        } else {
            self.current = ExportSettings::default();
        }
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    /// Get the current settings
    pub fn get(&self) -> &ExportSettings {
        &self.current
    }

    /// Replace the current settings (not persisted until `save_sync`)
    pub fn update(&mut self, settings: ExportSettings) {
        self.current = settings;
    }
}
