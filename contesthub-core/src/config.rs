//! Global contesthub configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::coordinator::PlatformSelection;
use crate::error::{ContestHubError, ContestHubResult};
use crate::platform::Platform;

static DEFAULT_CONTESTS_FILE: &str = "~/.local/share/contesthub/contests.json";
static DEFAULT_DOWNLOAD_DIR: &str = "~/Downloads";

fn default_contests_file() -> PathBuf {
    PathBuf::from(DEFAULT_CONTESTS_FILE)
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DOWNLOAD_DIR)
}

fn default_notifications() -> bool {
    true
}

/// Configuration at ~/.config/contesthub/config.toml, overridable with
/// `CONTESTHUB_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestHubConfig {
    /// Where the latest contest snapshot (a JSON array) is read from.
    #[serde(default = "default_contests_file")]
    pub contests_file: PathBuf,

    /// Where .ics files are saved.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Platforms selected at startup. All of them when unset.
    #[serde(default)]
    pub platforms: Option<Vec<Platform>>,

    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

impl Default for ContestHubConfig {
    fn default() -> Self {
        ContestHubConfig {
            contests_file: default_contests_file(),
            download_dir: default_download_dir(),
            platforms: None,
            notifications: default_notifications(),
        }
    }
}

impl ContestHubConfig {
    pub fn config_path() -> ContestHubResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ContestHubError::Config("Could not determine config directory".into()))?
            .join("contesthub");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file first if
    /// there is none yet.
    pub fn load() -> ContestHubResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> ContestHubResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("CONTESTHUB").try_parsing(true))
            .build()
            .map_err(|e| ContestHubError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ContestHubError::Config(e.to_string()))
    }

    pub fn contests_path(&self) -> PathBuf {
        expand(&self.contests_file)
    }

    pub fn download_path(&self) -> PathBuf {
        expand(&self.download_dir)
    }

    pub fn initial_selection(&self) -> PlatformSelection {
        match &self.platforms {
            Some(platforms) => PlatformSelection::only(platforms),
            None => PlatformSelection::default(),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ContestHubResult<()> {
        let contents = format!(
            "\
# contesthub configuration

# Contest snapshot to read (JSON array of contest records):
# contests_file = \"{}\"

# Where calendar files are saved:
# download_dir = \"{}\"

# Platforms selected at startup (default: all):
# platforms = [\"Codeforces\", \"AtCoder\"]

# Desktop reminder five minutes before a contest starts:
# notifications = true
",
            DEFAULT_CONTESTS_FILE, DEFAULT_DOWNLOAD_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ContestHubError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ContestHubError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        ContestHubConfig::create_default_config(&path).unwrap();
        let config = ContestHubConfig::load_from(&path).unwrap();

        assert_eq!(config.contests_file, default_contests_file());
        assert_eq!(config.download_dir, default_download_dir());
        assert!(config.platforms.is_none());
        assert!(config.notifications);
        assert_eq!(config.initial_selection(), PlatformSelection::default());
    }

    #[test]
    fn test_load_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "contests_file = \"/tmp/contests.json\"\n\
             platforms = [\"Codeforces\", \"AtCoder\"]\n\
             notifications = false\n",
        )
        .unwrap();

        let config = ContestHubConfig::load_from(&path).unwrap();

        assert_eq!(config.contests_path(), PathBuf::from("/tmp/contests.json"));
        assert!(!config.notifications);

        let selection = config.initial_selection();
        assert!(selection.is_selected(Platform::Codeforces));
        assert!(selection.is_selected(Platform::AtCoder));
        assert!(!selection.is_selected(Platform::LeetCode));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ContestHubConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.download_dir, default_download_dir());
    }

    #[test]
    fn test_invalid_platform_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "platforms = [\"TopCoder\"]\n").unwrap();

        let err = ContestHubConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ContestHubError::Config(_)), "Got {:?}", err);
    }
}
