use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    /// Absent means no Postgres: the API falls back to the in-memory store
    /// seeded with the demo catalog.
    pub database: Option<DatabaseConfig>,
    pub admin: AdminConfig,
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
pub struct AdminConfig {
    /// Shared secret expected in the x-admin-secret header.
    pub secret: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Base configuration, always present
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Environment variables with a prefix of ECOTOUR
            // Eg. `ECOTOUR__SERVER__PORT=9000` sets `server.port`
            .add_source(config::Environment::with_prefix("ECOTOUR").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
