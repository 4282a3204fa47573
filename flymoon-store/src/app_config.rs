use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub site: SiteConfig,
    pub cache: CacheConfig,
    pub redis: RedisConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// The external booking supplier this deployment talks to.
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub client_id: Option<String>,
    /// No timeout when unset; the supplier's pricing calls can run long.
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Bare domain all `www.`-prefixed traffic is redirected to.
    pub canonical_host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// How long a cached pricing snapshot stays usable for submission.
    #[serde(default = "default_pricing_fresh_seconds")]
    pub pricing_fresh_seconds: u64,
}

fn default_pricing_fresh_seconds() -> u64 {
    900
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of FLYMOON)
            // Eg.. `FLYMOON_SERVER__PORT=8080` would set `server.port`
            .add_source(config::Environment::with_prefix("FLYMOON").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
