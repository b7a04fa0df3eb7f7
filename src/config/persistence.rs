//! Configuration file persistence for Markview
//!
//! Loads and saves `Settings` as JSON in the platform config directory,
//! falling back to defaults whenever the file is missing or unreadable.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "markview";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Temporary file name used during atomic writes
const CONFIG_BACKUP_NAME: &str = "config.json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\markview\`
/// - **macOS**: `~/Library/Application Support/markview/`
/// - **Linux**: `~/.config/markview/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the directory cannot be determined.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the configuration file.
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Load configuration from the default config file location.
///
/// Never fails: a missing, empty or corrupted file yields default settings
/// and a logged warning.
pub fn load_config() -> Settings {
    get_config_file_path()
        .and_then(|path| load_config_from(&path))
        .unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

/// Load and sanitize settings from a specific file.
///
/// A missing or empty file is not an error and yields defaults.
pub fn load_config_from(config_path: &Path) -> Result<Settings> {
    if !config_path.exists() {
        debug!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        return Ok(Settings::default());
    }

    debug!("Loading config from: {}", config_path.display());

    let contents = fs::read_to_string(config_path).map_err(|e| Error::ConfigLoad {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("Config file is empty, using defaults");
        return Ok(Settings::default());
    }

    let settings = Settings::from_json_sanitized(&contents).map_err(|e| {
        warn!(
            "Config file at {} contains invalid JSON: {}",
            config_path.display(),
            e
        );
        Error::ConfigParse {
            message: format!("Failed to parse config file: {}", e),
            source: Some(Box::new(e)),
        }
    })?;

    info!(
        "Configuration loaded successfully from {}",
        config_path.display()
    );
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Save configuration to the default config file location.
pub fn save_config(settings: &Settings) -> Result<()> {
    save_config_to(&get_config_dir()?, settings)
}

/// Save configuration into `config_dir`, creating it if necessary.
///
/// Writes to a temporary file first and renames it over the real one so a
/// crash mid-write never leaves a truncated config behind.
pub fn save_config_to(config_dir: &Path, settings: &Settings) -> Result<()> {
    if !config_dir.exists() {
        debug!("Creating config directory: {}", config_dir.display());
        fs::create_dir_all(config_dir).map_err(|e| Error::ConfigSave {
            path: config_dir.to_path_buf(),
            source: Box::new(e),
        })?;
    }

    let config_path = config_dir.join(CONFIG_FILE_NAME);
    let backup_path = config_dir.join(CONFIG_BACKUP_NAME);

    debug!("Saving config to: {}", config_path.display());

    let json = serde_json::to_string_pretty(settings).map_err(|e| Error::ConfigSave {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    fs::write(&backup_path, &json).map_err(|e| Error::ConfigSave {
        path: backup_path.clone(),
        source: Box::new(e),
    })?;

    fs::rename(&backup_path, &config_path).map_err(|e| Error::ConfigSave {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    info!(
        "Configuration saved successfully to {}",
        config_path.display()
    );
    Ok(())
}

/// Save configuration, logging instead of returning errors.
///
/// Returns `true` if the save was successful.
pub fn save_config_silent(settings: &Settings) -> bool {
    match save_config(settings) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to save configuration: {}", e);
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use tempfile::TempDir;

    fn config_file(dir: &TempDir) -> PathBuf {
        dir.path().join(APP_NAME).join(CONFIG_FILE_NAME)
    }

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = config_file(dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_get_config_dir_contains_app_name() {
        // Some CI sandboxes have no config dir; only check the shape when present
        if let Ok(path) = get_config_dir() {
            assert!(path.ends_with(APP_NAME));
        }
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_config_from(&config_file(&dir)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_empty_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "  \n");
        assert_eq!(load_config_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_partial_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"theme": "dark", "unknown_field": 1}"#);
        let settings = load_config_from(&path).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.font_size, 14.0);
    }

    #[test]
    fn test_load_sanitizes_values() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"font_size": 1.0, "split_ratio": 7.0}"#);
        let settings = load_config_from(&path).unwrap();
        assert_eq!(settings.font_size, Settings::MIN_FONT_SIZE);
        assert_eq!(settings.split_ratio, Settings::MAX_SPLIT_RATIO);
    }

    #[test]
    fn test_load_corrupted_config_returns_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{ invalid json }");
        let result = load_config_from(&path);
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_load_wrong_types_returns_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"font_size": "huge"}"#);
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_save_creates_directory_and_roundtrips() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join(APP_NAME);
        let original = Settings {
            theme: Theme::Dark,
            font_size: 20.0,
            word_wrap: false,
            ..Settings::default()
        };

        save_config_to(&config_dir, &original).unwrap();

        assert!(config_dir.join(CONFIG_FILE_NAME).exists());
        assert!(!config_dir.join(CONFIG_BACKUP_NAME).exists());
        let loaded = load_config_from(&config_dir.join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"theme": "dark"}"#);
        let config_dir = path.parent().unwrap();

        save_config_to(config_dir, &Settings::default()).unwrap();

        assert_eq!(load_config_from(&path).unwrap().theme, Theme::Light);
    }

    #[test]
    fn test_load_config_graceful_fallback() {
        // Whatever is on disk, the public API always produces sane settings
        let settings = load_config();
        assert!(settings.font_size >= Settings::MIN_FONT_SIZE);
        assert!(settings.font_size <= Settings::MAX_FONT_SIZE);
    }
}
