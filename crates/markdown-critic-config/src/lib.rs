use markdown_critic_engine::{DEFAULT_BUFFER_SIZE, FilterPolicy, TransduceOptions, UnclosedPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Which side of the edits to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    All,
    Original,
    Edited,
}

/// Mirror of [`UnclosedPolicy`] for the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Unclosed {
    #[default]
    Close,
    Passthrough,
}

impl From<Unclosed> for UnclosedPolicy {
    fn from(value: Unclosed) -> Self {
        match value {
            Unclosed::Close => UnclosedPolicy::Close,
            Unclosed::Passthrough => UnclosedPolicy::Passthrough,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub view: View,
    /// Strip tags and comments from the chosen view.
    pub raw: bool,
    pub hide_comments: bool,
    pub hide_tags: bool,
    /// Render the filtered document through the Markdown stage.
    pub markdown: bool,
    pub unclosed: Unclosed,
    pub read_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            view: View::All,
            raw: false,
            hide_comments: false,
            hide_tags: false,
            markdown: false,
            unclosed: Unclosed::Close,
            read_buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-critic");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expands `~` and environment variables in a user-supplied path.
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    pub fn filter_policy(&self) -> FilterPolicy {
        let base = FilterPolicy::show_all();
        let mut policy = match self.view {
            View::All => base,
            View::Original => base.only_original(),
            View::Edited => base.only_edited(),
        };
        if self.raw || self.hide_comments {
            policy = policy.hide_comments();
        }
        if self.raw || self.hide_tags {
            policy = policy.hide_tags();
        }
        policy
    }

    pub fn options(&self) -> TransduceOptions {
        TransduceOptions {
            policy: self.filter_policy(),
            unclosed: self.unclosed.into(),
            buffer_size: self.read_buffer_size,
        }
    }
}
