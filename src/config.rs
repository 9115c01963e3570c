use serde::Deserialize;

use crate::server::{ServerOptions, DEFAULT_MAX_LINE_LENGTH};
use crate::services::{Recommender, DEFAULT_RECOMMENDATION_LIMIT};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum number of connections served at once; unbounded when unset
    #[serde(default)]
    pub max_connections: Option<usize>,

    /// Maximum number of videos in a recommendation list
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    /// Maximum length in bytes of a single command line
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Default log directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5555
}

fn default_recommendation_limit() -> usize {
    DEFAULT_RECOMMENDATION_LIMIT
}

fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LENGTH
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// `host:port` to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn recommender(&self) -> Recommender {
        Recommender::new(self.recommendation_limit)
    }

    pub fn server_options(&self) -> ServerOptions {
        ServerOptions {
            max_connections: self.max_connections,
            max_line_length: self.max_line_length,
        }
    }
}
