//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Training-accounts page to scrape.
    pub wiki_url: String,

    /// Timeout for the page fetch, in seconds.
    pub request_timeout_secs: u64,

    /// How many trainers `xp trainers` lists by default.
    pub trainer_limit: usize,

    /// Source table JSON to use instead of fetching the page.
    pub table_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wiki_url: xp_wiki::DEFAULT_WIKI_URL.to_string(),
            request_timeout_secs: xp_wiki::DEFAULT_TIMEOUT.as_secs(),
            trainer_limit: 10,
            table_path: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (XP_*)
        figment = figment.merge(Env::prefixed("XP_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for xp.
///
/// On Linux: `~/.config/xp`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("xp"))
}
