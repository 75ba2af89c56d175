use crate::events::Theme;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables checked for the provider credential, in order
const API_KEY_ENV: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API key for the Gemini endpoint
    pub api_key: Option<String>,

    /// Model identifier sent with every request
    pub model: String,

    /// Base URL of the generative language API
    pub base_url: String,

    /// Seconds before an outstanding request is abandoned
    pub request_timeout_secs: u64,

    /// Whose resume the assistant speaks about
    pub owner_name: String,

    /// JSON file holding the resume and project archive, relative to `home`
    /// unless absolute. Defaults to `knowledge.json` next to the config file.
    pub knowledge_base: Option<PathBuf>,

    /// Palette token handed to the view
    pub theme: Theme,

    /// Retrochat home directory
    #[serde(skip)]
    pub home: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let home = default_home();

        Config {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            request_timeout_secs: 60,
            owner_name: "Jia Song".to_string(),
            knowledge_base: None,
            theme: Theme::default(),
            home,
        }
    }
}

fn default_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("~"))
        .join(".retrochat")
}

impl Config {
    /// Load configuration from `~/.retrochat/config.toml`, falling back to defaults
    pub fn load() -> Result<Self> {
        let home = default_home();
        fs::create_dir_all(&home).context("Failed to create .retrochat directory")?;
        Self::load_from(&home.join("config.toml"))
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str::<Config>(&content).context("Failed to parse config file")?
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Config::default()
        };

        if let Some(parent) = path.parent() {
            config.home = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.home).context("Failed to create config directory")?;
        let config_path = self.home.join("config.toml");
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Where the knowledge base is read from
    pub fn knowledge_path(&self) -> PathBuf {
        match &self.knowledge_base {
            Some(path) => self.home.join(path),
            None => self.home.join("knowledge.json"),
        }
    }

    /// Check if API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    /// Get API key from environment or config; the environment wins
    pub fn api_key(&self) -> Option<String> {
        resolve_key(|name| std::env::var(name).ok(), self.api_key.clone())
    }
}

/// First non-blank key from the environment variables, then the config file
fn resolve_key(env: impl Fn(&str) -> Option<String>, file: Option<String>) -> Option<String> {
    API_KEY_ENV
        .iter()
        .filter_map(|name| env(name))
        .chain(file)
        .find(|key| !key.trim().is_empty())
}
