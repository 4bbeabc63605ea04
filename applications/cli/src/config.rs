//! CLI configuration

use podcastr_core::{CoreError, FeedQuery, Result};
use podcastr_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_feed")]
    pub feed: FeedSettings,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default = "default_log")]
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedSettings {
    /// JSON file holding the episode records
    #[serde(default = "default_feed_path")]
    pub path: PathBuf,

    #[serde(default = "default_limit")]
    pub limit: usize,

    /// How many episodes count as latest releases
    #[serde(default = "default_latest")]
    pub latest: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl CliConfig {
    /// Default config file, read when present in the working directory
    pub const DEFAULT_FILE: &'static str = "podcastr.toml";

    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `podcastr.toml`; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(Self::DEFAULT_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (PODCASTR_FEED__LIMIT=20)
        settings = settings.add_source(
            config::Environment::with_prefix("PODCASTR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CoreError::config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CoreError::config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.feed.limit == 0 {
            return Err(CoreError::config("feed.limit must be at least 1"));
        }
        if self.log.filter.trim().is_empty() {
            return Err(CoreError::config("log.filter must not be empty"));
        }
        Ok(())
    }

    /// Query for the configured feed
    pub fn feed_query(&self) -> FeedQuery {
        FeedQuery {
            limit: self.feed.limit,
        }
    }
}

// Default values
fn default_feed() -> FeedSettings {
    FeedSettings {
        path: default_feed_path(),
        limit: default_limit(),
        latest: default_latest(),
    }
}

fn default_feed_path() -> PathBuf {
    PathBuf::from("episodes.json")
}

fn default_limit() -> usize {
    FeedQuery::default().limit
}

fn default_latest() -> usize {
    podcastr_core::EpisodeFeed::DEFAULT_LATEST_COUNT
}

fn default_log() -> LogSettings {
    LogSettings {
        filter: default_filter(),
    }
}

fn default_filter() -> String {
    "podcastr=info,podcastr_cli=info,podcastr_playback=info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            feed: default_feed(),
            playback: PlaybackConfig::default(),
            log: default_log(),
        }
    }
}
