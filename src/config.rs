use std::{env, net::SocketAddr, time::Duration};

use anyhow::{Context, Result, bail};

use crate::{application::SeedSource, infrastructure::http_adapter::HttpClientConfig};

pub const DEFAULT_SEED_SOURCE_URL: &str = "https://pokeapi.co/api/v2/pokemon";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub default_limit: i64,
    pub seed_source_url: String,
    pub seed_page_size: u32,
    pub http_connect_timeout: Duration,
    pub http_request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let bind_addr = env_string("CATALOG_BIND_ADDR", "127.0.0.1:3000")
            .parse::<SocketAddr>()
            .context("CATALOG_BIND_ADDR must be a valid host:port")?;

        let default_limit = env_string("DEFAULT_LIMIT", "7")
            .parse::<i64>()
            .context("DEFAULT_LIMIT must be an integer")?;
        if default_limit < 1 {
            bail!("DEFAULT_LIMIT must be a positive integer");
        }

        let seed_source_url = env_string("SEED_SOURCE_URL", DEFAULT_SEED_SOURCE_URL);

        let seed_page_size = env_string("SEED_PAGE_SIZE", "650")
            .parse::<u32>()
            .context("SEED_PAGE_SIZE must be u32")?;

        let http_connect_timeout = env_secs("HTTP_CONNECT_TIMEOUT_SECS", "5")?;
        let http_request_timeout = env_secs("HTTP_REQUEST_TIMEOUT_SECS", "30")?;

        Ok(Self {
            bind_addr,
            default_limit,
            seed_source_url,
            seed_page_size,
            http_connect_timeout,
            http_request_timeout,
        })
    }

    pub fn seed_source(&self) -> SeedSource {
        SeedSource::new(self.seed_source_url.clone(), self.seed_page_size)
    }

    pub fn http_client(&self) -> HttpClientConfig {
        HttpClientConfig {
            connect_timeout: self.http_connect_timeout,
            request_timeout: self.http_request_timeout,
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_secs(key: &str, default: &str) -> Result<Duration> {
    let secs = env_string(key, default)
        .parse::<u64>()
        .with_context(|| format!("{key} must be a whole number of seconds"))?;
    Ok(Duration::from_secs(secs))
}
