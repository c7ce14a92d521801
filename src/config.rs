use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Phone catalog CSV
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Bonus suggestions CSV
    #[serde(default = "default_bonus_path")]
    pub bonus_path: PathBuf,

    /// Phones per page in console listings
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4567
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/phones.csv")
}

fn default_bonus_path() -> PathBuf {
    PathBuf::from("data/bonus_suggestions.csv")
}

fn default_page_size() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_path: default_catalog_path(),
            bonus_path: default_bonus_path(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
