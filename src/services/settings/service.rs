use crate::models::settings::AgendaSettings;
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "agenda.toml";

/// Loads and stores [`AgendaSettings`] as TOML.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to `agenda.toml` in the platform config directory,
    /// or the current directory when none can be resolved.
    pub fn from_default_location() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("com", "Marketplace", "Agenda") {
            dirs.config_dir().join(SETTINGS_FILE)
        } else {
            log::warn!("Unable to resolve project directory; using current dir for settings");
            PathBuf::from(SETTINGS_FILE)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current settings. A missing file yields the defaults.
    pub fn get(&self) -> Result<AgendaSettings> {
        if !self.path.exists() {
            log::info!(
                "No settings file at {}; using defaults",
                self.path.display()
            );
            return Ok(AgendaSettings::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let settings: AgendaSettings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;

        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        log::info!("Loaded settings from {}", self.path.display());
        Ok(settings)
    }

    /// Write settings, creating the parent directory if needed
    pub fn update(&self, settings: &AgendaSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;

        Ok(())
    }

    /// Reset settings to defaults
    pub fn reset(&self) -> Result<()> {
        self.update(&AgendaSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("agenda.toml"));

        let settings = service.get().unwrap();
        assert_eq!(settings, AgendaSettings::default());
    }

    #[test]
    fn test_update_then_get() {
        let dir = tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("nested").join("agenda.toml"));

        let mut settings = AgendaSettings::default();
        settings.api_base_url = "https://api.example.com".to_string();
        settings.grid.start_hour = 7;
        settings.auth_token = Some("token".to_string());
        service.update(&settings).unwrap();

        let loaded = service.get().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_update_rejects_invalid_settings() {
        let dir = tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("agenda.toml"));

        let mut settings = AgendaSettings::default();
        settings.grid.end_hour = 30;
        assert!(service.update(&settings).is_err());
        assert!(!service.path().exists());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("agenda.toml");
        fs::write(&path, "grid = 12").unwrap();

        let service = SettingsService::new(&path);
        assert!(service.get().is_err());
    }

    #[test]
    fn test_file_with_invalid_values_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("agenda.toml");
        fs::write(&path, "[grid]\nstart_hour = 22\nend_hour = 6\n").unwrap();

        let err = SettingsService::new(&path).get().unwrap_err();
        assert!(err.to_string().contains("Invalid settings"));
    }

    #[test]
    fn test_reset() {
        let dir = tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("agenda.toml"));

        let mut settings = AgendaSettings::default();
        settings.demo.event_count = 3;
        service.update(&settings).unwrap();
        service.reset().unwrap();

        assert_eq!(service.get().unwrap(), AgendaSettings::default());
    }
}
