use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, fs};

#[derive(Deserialize)]
pub struct Config {
    pub access: AccessConfig,
}

/// Raw allowlist configuration, both values comma-separated lists of
/// address, dash-range, or CIDR tokens.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AccessConfig {
    pub trusted_proxies: Option<String>,
    pub admin_ranges: Option<String>,
}

impl AccessConfig {
    /// Reads the two lists from the environment: `X_FORWARDED_FOR` for
    /// trusted proxies and `ADMIN_IP` for the admin allowlist. An unset or
    /// blank variable leaves the corresponding set empty.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            trusted_proxies: env_list("X_FORWARDED_FOR"),
            admin_ranges: env_list("ADMIN_IP"),
        }
    }
}

fn env_list(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

pub fn load_config() -> Result<Config> {
    let content = fs::read_to_string("config.toml").context("Failed to read config.toml file")?;
    toml::from_str(&content).context("Failed to parse config.toml as valid TOML")
}
