//! Process configuration read from the environment

use anyhow::{Context, Result};
use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Settings loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the document backend.
    pub backend_url: String,
    /// Optional credential forwarded as the Authorization header on uploads.
    pub auth_token: Option<String>,
    /// Address the trigger route listens on.
    pub bind_host: String,
    pub bind_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let backend_url =
            env::var("POCKETBASE_URL").context("POCKETBASE_URL must be set")?;
        let auth_token = env::var("POCKETBASE_AUTH_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        let bind_host = env::var("FORMFILL_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let bind_port = match env::var("FORMFILL_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("FORMFILL_PORT is not a valid port: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            backend_url,
            auth_token,
            bind_host,
            bind_port,
        })
    }
}
