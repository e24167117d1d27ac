//! API server configuration

use anyhow::{Context, Result};
use std::env;

use certmint_issuer::IssuerConfig;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub issuer: IssuerConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            host: env::var("CERTMINT_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("CERTMINT_API_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid CERTMINT_API_PORT")?,
            issuer: IssuerConfig::from_env().context("Failed to load issuer configuration")?,
        };

        if config.port == 0 {
            anyhow::bail!("CERTMINT_API_PORT must be greater than 0");
        }

        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
