use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub stackexchange: StackExchangeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// TTL for the read-side cache. Writes never invalidate entries, so
    /// reads may be stale up to this long.
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

fn default_cache_ttl() -> u64 {
    3600
}

#[derive(Debug, Deserialize, Clone)]
pub struct StackExchangeConfig {
    pub base_url: String,
    #[serde(default = "default_tag")]
    pub default_tag: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_tag() -> String {
    "perl".to_string()
}

fn default_timeout() -> u64 {
    10
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
            // Add in settings from the environment (with a prefix of AEROMOV)
            // Eg.. `AEROMOV__SERVER__PORT=8080` would set the server port
            .add_source(config::Environment::with_prefix("AEROMOV").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
