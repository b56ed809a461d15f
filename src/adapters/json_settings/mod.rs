// JSON settings adapter - Prompt settings persisted as a JSON file

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Prompt settings stored as pretty-printed JSON
pub struct JsonSettingsAdapter {
    path: PathBuf,
}

impl JsonSettingsAdapter {
    /// Create adapter for the given settings file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default settings location under the system temp directory
    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join("reelcut").join("settings.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `settings` next to the target and rename it into place
    fn write_atomic(&self, settings: &PromptSettings) -> Result<(), DomainError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| DomainError::InternalError(format!("JSON serialization failed: {}", e)))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path)
            .map_err(|e| DomainError::FsFail(format!("Failed to replace settings file: {}", e)))?;
        Ok(())
    }

    /// Read settings, creating the file with defaults when it does not exist
    fn read_or_init(&self) -> Result<PromptSettings, DomainError> {
        if !self.path.exists() {
            let defaults = PromptSettings::default();
            self.write_atomic(&defaults)?;
            info!("Created default settings at {}", self.path.display());
            return Ok(defaults);
        }

        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content)
            .map_err(|e| DomainError::InvalidFormat(format!("Invalid settings file: {}", e)))
    }
}

#[async_trait]
impl SettingsPort for JsonSettingsAdapter {
    async fn load(&self) -> PromptSettings {
        match self.read_or_init() {
            Ok(settings) => settings,
            Err(e) => {
                error!("Error reading settings from {}: {}", self.path.display(), e);
                PromptSettings::default()
            }
        }
    }

    async fn save(&self, settings: &PromptSettings) -> Result<(), DomainError> {
        self.write_atomic(settings)?;
        info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_creates_defaults() {
        let dir = TempDir::new().unwrap();
        let adapter = JsonSettingsAdapter::new(dir.path().join("nested").join("settings.json"));

        let settings = adapter.load().await;
        assert_eq!(settings, PromptSettings::default());
        assert!(adapter.path().exists());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let adapter = JsonSettingsAdapter::new(dir.path().join("settings.json"));
        let custom = PromptSettings {
            content_criteria: "1. Violence".to_string(),
            priority_guidelines: "HIGH: everything".to_string(),
        };

        adapter.save(&custom).await.unwrap();
        assert_eq!(adapter.load().await, custom);

        let raw = std::fs::read_to_string(adapter.path()).unwrap();
        assert!(raw.contains("\"contentCriteria\""));
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let adapter = JsonSettingsAdapter::new(&path);
        assert_eq!(adapter.load().await, PromptSettings::default());
        // The unreadable file is left for the user to inspect.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
