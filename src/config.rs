use crate::error::{GraffitiError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_FOLDER_ID: &str = "GOOGLE_DRIVE_FOLDER_ID";
pub const ENV_API_KEY: &str = "GOOGLE_DRIVE_API_KEY";

/// Optional file configuration (map defaults, pacing). Environment variables
/// carry the required Drive credentials; see [`DriveEnv::from_env`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fixed regional default the map centers on when no markers exist.
    pub map_center_lat: f64,
    pub map_center_lng: f64,
    pub map_zoom: u8,
    /// Browser-side key for the Google Maps JS SDK; required by the Google
    /// adapter only.
    pub google_maps_api_key: Option<String>,
    /// Tile URL template for the Leaflet adapter.
    pub tile_url: String,
    /// Pause between per-file metadata requests, in milliseconds.
    pub request_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        // Valencia city center.
        Self {
            map_center_lat: 39.4699,
            map_center_lng: -0.3763,
            map_zoom: 12,
            google_maps_api_key: None,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            request_interval_ms: 100,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GraffitiError::Config("Home directory not found".into()))?;
        Ok(home.join(".config").join("graffiti-archive").join("config.json"))
    }
}

/// Required environment for the fetch job.
#[derive(Debug, Clone)]
pub struct DriveEnv {
    pub folder_id: String,
    pub api_key: String,
}

impl DriveEnv {
    /// Reads the required variables, reporting *all* missing names in one
    /// error so a misconfigured CI run fails with the complete list.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut missing = Vec::new();

        let folder_id = match lookup(ENV_FOLDER_ID).filter(|v| !v.trim().is_empty()) {
            Some(v) => v,
            None => {
                missing.push(ENV_FOLDER_ID);
                String::new()
            }
        };
        let api_key = match lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
            Some(v) => v,
            None => {
                missing.push(ENV_API_KEY);
                String::new()
            }
        };

        if !missing.is_empty() {
            return Err(GraffitiError::MissingEnv(missing.join(", ")));
        }

        Ok(Self { folder_id, api_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_targets_valencia() {
        let config = Config::default();
        assert_eq!(config.map_center_lat, 39.4699);
        assert_eq!(config.map_center_lng, -0.3763);
        assert_eq!(config.map_zoom, 12);
    }

    #[test]
    fn test_drive_env_complete() {
        let env = DriveEnv::from_lookup(|name| match name {
            ENV_FOLDER_ID => Some("folder123".to_string()),
            ENV_API_KEY => Some("key456".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(env.folder_id, "folder123");
        assert_eq!(env.api_key, "key456");
    }

    #[test]
    fn test_drive_env_lists_all_missing() {
        let err = DriveEnv::from_lookup(|_| None).unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains(ENV_FOLDER_ID));
        assert!(message.contains(ENV_API_KEY));
    }

    #[test]
    fn test_drive_env_empty_counts_as_missing() {
        let err = DriveEnv::from_lookup(|name| match name {
            ENV_FOLDER_ID => Some("  ".to_string()),
            ENV_API_KEY => Some("key".to_string()),
            _ => None,
        })
        .unwrap_err();

        assert!(matches!(err, GraffitiError::MissingEnv(ref vars) if vars.contains(ENV_FOLDER_ID)));
    }
}
