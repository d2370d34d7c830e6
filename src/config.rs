use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::plan::DEFAULT_COMMIT_MESSAGE;
use crate::domain::tag::DEFAULT_TAG_PATTERN;
use crate::domain::TagPattern;
use crate::error::{Error, Result};
use crate::manifest::{DEFAULT_MANIFEST, DEFAULT_VERSION_KEY};

pub const CONFIG_FILE_NAME: &str = "gitbump.toml";

fn default_manifest() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFEST)
}

fn default_version_key() -> String {
    DEFAULT_VERSION_KEY.to_string()
}

fn default_tag_pattern() -> String {
    DEFAULT_TAG_PATTERN.to_string()
}

fn default_commit_message() -> String {
    DEFAULT_COMMIT_MESSAGE.to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_true() -> bool {
    true
}

/// Represents the complete configuration for git-bump.
///
/// Every field is optional in the file; missing fields take the defaults below.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Manifest path, relative to the project root
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Dotted key path of the version field inside the manifest
    #[serde(default = "default_version_key")]
    pub version_key: String,

    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_true")]
    pub annotated_tags: bool,

    /// Refuse explicit versions that are not greater than the current one
    #[serde(default)]
    pub require_increasing_explicit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            manifest: default_manifest(),
            version_key: default_version_key(),
            tag_pattern: default_tag_pattern(),
            commit_message: default_commit_message(),
            remote: default_remote(),
            annotated_tags: true,
            require_increasing_explicit: false,
        }
    }
}

impl Config {
    /// Parse configuration text and check its templates
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| Error::config(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        TagPattern::new(self.tag_pattern.as_str())?;
        if !self.commit_message.contains("{version}") {
            return Err(Error::config(format!(
                "commit message '{}' must contain {{version}} placeholder",
                self.commit_message
            )));
        }
        if self.remote.trim().is_empty() {
            return Err(Error::config("remote name is empty"));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitbump.toml` in the project root
/// 3. `git-bump/config.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(project_root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        Some(path.to_path_buf())
    } else {
        let project_config = project_root.join(CONFIG_FILE_NAME);
        if project_config.exists() {
            Some(project_config)
        } else {
            dirs::config_dir()
                .map(|dir| dir.join("git-bump").join("config.toml"))
                .filter(|path| path.exists())
        }
    };

    match path {
        Some(path) => {
            let text = fs::read_to_string(&path).map_err(|e| {
                Error::config(format!("cannot read {}: {}", path.display(), e))
            })?;
            Config::from_toml(&text)
        }
        None => Ok(Config::default()),
    }
}
