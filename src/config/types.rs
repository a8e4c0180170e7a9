use serde::{Deserialize, Serialize};

use crate::domain::Counter;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    /// Counters preloaded into the repository at startup.
    #[serde(default)]
    pub seed: Vec<SeedCounter>,
}

/// REST server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default: 127.0.0.1).
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind. No default: it must come from here, `PORT` or `--port`.
    #[serde(default)]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCounter {
    pub title: String,
    #[serde(default)]
    pub count: u32,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: None,
        }
    }
}

impl Config {
    /// Counters built from the `[[seed]]` entries, with fresh ids.
    pub fn seed_counters(&self) -> Vec<Counter> {
        self.seed
            .iter()
            .map(|seed| Counter::new(seed.title.trim(), seed.count))
            .collect()
    }
}
