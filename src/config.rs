//! Portal configuration, read from TOML. Every field has a default, so an
//! empty file (or no file) yields a working in-memory setup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::password::PasswordScheme;

pub const DEFAULT_SUPER_ADMIN_EMAIL: &str = "superadmin@businessos.com";
pub const DEFAULT_SUPER_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_USERS_KEY: &str = "storeos_users";
pub const DEFAULT_SESSION_KEY: &str = "storeos_current_user";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub bootstrap: BootstrapConfig,
    pub security: SecurityConfig,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory for the file backend.
    pub dir: PathBuf,
    pub users_key: String,
    pub session_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            dir: PathBuf::from(".storeos"),
            users_key: DEFAULT_USERS_KEY.to_string(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
        }
    }
}

/// The canonical super-admin account created at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub email: String,
    pub password: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            email: DEFAULT_SUPER_ADMIN_EMAIL.to_string(),
            password: DEFAULT_SUPER_ADMIN_PASSWORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub password_scheme: PasswordScheme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Buffer size of the user service request channel.
    pub channel_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { channel_capacity: 32 }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.service.channel_capacity == 0 {
            return Err(ConfigError::Parse("service.channel_capacity must be at least 1".into()));
        }
        if self.storage.users_key == self.storage.session_key {
            return Err(ConfigError::Parse("storage.users_key and storage.session_key must differ".into()));
        }
        if self.bootstrap.email.trim().is_empty() {
            return Err(ConfigError::Parse("bootstrap.email must not be empty".into()));
        }
        Ok(())
    }
}
