//! Sidebar configuration.
//!
//! Loaded from a JSON file; every field falls back to its default, so an
//! empty object is a valid configuration.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::nav::{NavigationEntry, NavigationList, default_entries};
use crate::viewport::{Breakpoints, DEFAULT_COMPACT_BREAKPOINT_PX};

/// Default route prefix of message threads. Compose is hidden below it.
pub const DEFAULT_MESSAGE_THREAD_PREFIX: &str = "/messages/";

/// Default capacity of the snapshot event channel.
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 32;

/// Sidebar configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarConfig {
    /// Navigation entries, in display order.
    #[serde(default = "default_entries")]
    pub entries: Vec<NavigationEntry>,
    /// Widths below this are rendered compact.
    #[serde(default = "default_breakpoint")]
    pub compact_breakpoint_px: u32,
    /// Routes starting with this prefix hide the compose button.
    #[serde(default = "default_message_thread_prefix")]
    pub message_thread_prefix: String,
    /// Capacity of the snapshot event channel.
    #[serde(default = "default_channel_capacity")]
    pub event_channel_capacity: usize,
    /// Label of the profile link.
    #[serde(default = "default_profile_label")]
    pub profile_label: String,
    /// Label of the compose button.
    #[serde(default = "default_compose_label")]
    pub compose_label: String,
}

const fn default_breakpoint() -> u32 {
    DEFAULT_COMPACT_BREAKPOINT_PX
}

fn default_message_thread_prefix() -> String {
    DEFAULT_MESSAGE_THREAD_PREFIX.to_string()
}

const fn default_channel_capacity() -> usize {
    DEFAULT_EVENT_CHANNEL_CAPACITY
}

fn default_profile_label() -> String {
    "Perfil".to_string()
}

fn default_compose_label() -> String {
    "Fofocar".to_string()
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            entries: default_entries(),
            compact_breakpoint_px: DEFAULT_COMPACT_BREAKPOINT_PX,
            message_thread_prefix: default_message_thread_prefix(),
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
            profile_label: default_profile_label(),
            compose_label: default_compose_label(),
        }
    }
}

impl SidebarConfig {
    /// Load configuration from `path`, or defaults if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| Error::FileSystem {
            path: path.to_path_buf(),
            message: format!("Failed to read config file: {e}"),
        })?;

        let config: Self = serde_json::from_str(&content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {e}")))?;
        config.validate()?;

        info!("Loaded sidebar config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| Error::FileSystem {
                path: parent.to_path_buf(),
                message: format!("Failed to create config directory: {e}"),
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::FileSystem {
            path: path.to_path_buf(),
            message: format!("Failed to write config file: {e}"),
        })?;

        info!("Saved sidebar config to {}", path.display());
        Ok(())
    }

    /// Check invariants serde can't express.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate routes or a zero channel capacity.
    pub fn validate(&self) -> Result<()> {
        let mut routes = HashSet::new();
        if let Some(dup) = self.entries.iter().find(|e| !routes.insert(e.route.as_str())) {
            return Err(Error::DuplicateRoute(dup.route.clone()));
        }
        if self.event_channel_capacity == 0 {
            return Err(Error::Configuration(
                "event_channel_capacity must be at least 1".to_string(),
            ));
        }
        if self.message_thread_prefix.is_empty() {
            return Err(Error::Configuration(
                "message_thread_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the navigation list from the configured entries.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate routes.
    pub fn navigation_list(&self) -> Result<NavigationList> {
        NavigationList::new(self.entries.clone())
    }

    /// Viewport breakpoints.
    #[must_use]
    pub const fn breakpoints(&self) -> Breakpoints {
        Breakpoints {
            compact_below_px: self.compact_breakpoint_px,
        }
    }

    /// Platform location of the config file.
    #[cfg(feature = "runtime")]
    #[must_use]
    pub fn default_path() -> std::path::PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("fofoca")
            .join("sidebar.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::IconToken;

    #[test]
    fn test_default_config() {
        let config = SidebarConfig::default();
        assert_eq!(config.entries.len(), 6);
        assert_eq!(config.compact_breakpoint_px, 500);
        assert_eq!(config.message_thread_prefix, "/messages/");
        assert_eq!(config.event_channel_capacity, 32);
        assert_eq!(config.profile_label, "Perfil");
        assert_eq!(config.compose_label, "Fofocar");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_object_is_default() {
        let config: SidebarConfig = serde_json::from_str("{}").expect("deserialize failed");
        assert_eq!(config, SidebarConfig::default());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = SidebarConfig::load(&dir.path().join("absent.json")).expect("load failed");
        assert_eq!(config, SidebarConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("sidebar.json");

        let config = SidebarConfig {
            compact_breakpoint_px: 640,
            entries: vec![
                NavigationEntry::new("/home", "Home", IconToken::Home),
                NavigationEntry::new("/alerts", "Alertas", IconToken::Bell).notification_target(),
            ],
            ..SidebarConfig::default()
        };
        config.save(&path).expect("save failed");

        let loaded = SidebarConfig::load(&path).expect("load failed");
        assert_eq!(loaded, config);
        assert_eq!(loaded.breakpoints().compact_below_px, 640);
        let list = loaded.navigation_list().expect("valid list");
        assert_eq!(
            list.notification_target().map(|e| e.route.as_str()),
            Some("/alerts")
        );
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sidebar.json");
        fs::write(&path, "{ not json").expect("write failed");

        let result = SidebarConfig::load(&path);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_routes() {
        let config = SidebarConfig {
            entries: vec![
                NavigationEntry::new("/home", "Home", IconToken::Home),
                NavigationEntry::new("/home", "Again", IconToken::Home),
            ],
            ..SidebarConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::DuplicateRoute(_))));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = SidebarConfig {
            event_channel_capacity: 0,
            ..SidebarConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }

    #[cfg(feature = "runtime")]
    #[test]
    fn test_default_path() {
        let path = SidebarConfig::default_path();
        assert!(path.ends_with("fofoca/sidebar.json"));
    }
}
