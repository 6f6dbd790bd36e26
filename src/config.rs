use serde::Deserialize;

/// Storage backend used for favorites and the theme preference
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackendKind {
    /// JSON document on the local filesystem
    File,
    /// Redis server, one key per logical entry
    Redis,
    /// Process memory only, nothing survives a restart
    Memory,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OMDb API key, sent as the `apikey` query parameter
    pub omdb_api_key: String,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Which backend holds persisted state
    #[serde(default = "default_store_backend")]
    pub store_backend: StoreBackendKind,

    /// Location of the state file for the file backend
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Redis connection URL for the redis backend
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Connect, read and write timeout for the redis backend, in milliseconds
    #[serde(default = "default_redis_timeout_ms")]
    pub redis_timeout_ms: u64,

    /// Number of titles in the featured sample
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,

    /// Fixed search term used to browse for featured titles
    #[serde(default = "default_featured_query")]
    pub featured_query: String,

    /// Transport timeout for outbound requests, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_omdb_api_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_store_backend() -> StoreBackendKind {
    StoreBackendKind::File
}

fn default_store_path() -> String {
    ".movie-finder/state.json".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_redis_timeout_ms() -> u64 {
    2000
}

fn default_featured_count() -> usize {
    8
}

fn default_featured_query() -> String {
    "movie".to_string()
}

fn default_http_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.featured_count == 0 {
            anyhow::bail!("FEATURED_COUNT must be a positive integer");
        }

        Ok(config)
    }
}
