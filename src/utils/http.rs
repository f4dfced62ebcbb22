// src/utils/http.rs

//! HTTP client utilities.
//!
//! Every network call in the crate goes through [`Fetcher`], so pipelines can
//! run against any transport that returns page text and raw bytes.

use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::error::{AppError, Result};
use crate::models::ClientConfig;

/// Blocking source of page text and raw payloads.
pub trait Fetcher {
    /// GET `url` and return the body as text. Fails on non-success status.
    fn fetch_text(&self, url: &str) -> Result<String>;

    /// GET `url` and return the raw body. Fails on non-success status.
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch_text(&self, url: &str) -> Result<String> {
        (**self).fetch_text(url)
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch_bytes(url)
    }
}

/// Create a configured blocking HTTP client.
pub fn create_client(config: &ClientConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// [`Fetcher`] backed by a shared `reqwest` blocking client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher from client settings.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
        })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn get(&self, url: &str) -> Result<Response> {
        log::debug!("GET {url}");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(url, status));
        }
        Ok(response)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        Ok(self.get(url)?.text()?)
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        Ok(self.get(url)?.bytes()?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        assert!(create_client(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_http_fetcher_new() {
        assert!(HttpFetcher::new(&ClientConfig::default()).is_ok());
    }
}
