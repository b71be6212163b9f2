//! Lock settings persistence
//!
//! Settings live in a single JSON file, `config.json`, under the user's
//! config directory. The passcode is stored as an Argon2id hash.

use std::fs;
use std::path::{Path, PathBuf};

use applock_core::{ConfigError, ConfigStore, LockConfig};

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Configuration directory under ~/.config
const CONFIG_DIR_NAME: &str = "applock";

/// JSON file backed [`ConfigStore`]
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    /// Store at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location
    pub fn open_default() -> Result<Self, ConfigError> {
        Self::default_path()
            .map(Self::new)
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        // Try XDG_CONFIG_HOME first, then fall back to ~/.config
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            if !xdg_config.is_empty() {
                return Some(PathBuf::from(xdg_config).join(CONFIG_DIR_NAME));
            }
        }

        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME))
    }

    /// Get the full config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonConfigStore {
    /// Load settings, or defaults when the file does not exist yet
    fn load(&self) -> Result<LockConfig, ConfigError> {
        if !self.path.exists() {
            tracing::debug!("No config at {:?}, using defaults", self.path);
            return Ok(LockConfig::default());
        }

        let contents = fs::read_to_string(&self.path)?;
        let config: LockConfig = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn save(&mut self, config: &LockConfig) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        // Ensure directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &contents)?;

        // Set restrictive permissions before the hash becomes visible (Unix only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&temp_path, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved config to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use applock_core::{ExpiryPolicy, PasscodeHasher};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let store = JsonConfigStore::new(dir.path().join("config.json"));
        assert_eq!(store.load().unwrap(), LockConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonConfigStore::new(dir.path().join("nested").join("config.json"));

        let config = LockConfig {
            passcode: Some(PasscodeHasher::insecure_fast().hash("1234").unwrap()),
            max_attempts: 3,
            expiry_policy: ExpiryPolicy::KeepAttempts,
            ..Default::default()
        };
        store.save(&config).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, config);
        assert!(loaded.passcode.unwrap().verify("1234").unwrap());
        assert!(!dir.path().join("nested").join("config.json.tmp").exists());
    }

    #[test]
    fn test_passcode_not_stored_in_plaintext() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut store = JsonConfigStore::new(&path);

        let config = LockConfig {
            passcode: Some(PasscodeHasher::insecure_fast().hash("hunter22").unwrap()),
            ..Default::default()
        };
        store.save(&config).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("hunter22"));
        assert!(contents.contains("$argon2id$"));
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        JsonConfigStore::new(&path)
            .save(&LockConfig::default())
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonConfigStore::new(&path);
        assert!(matches!(store.load(), Err(ConfigError::Serialize(_))));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"max_attempts": 0}"#).unwrap();

        let store = JsonConfigStore::new(&path);
        assert!(matches!(store.load(), Err(ConfigError::InvalidMaxAttempts)));
    }
}
