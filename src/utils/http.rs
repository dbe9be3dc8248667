// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ScraperConfig;

/// Source of raw HTML pages.
///
/// The scraper only talks to the network through this trait so that it can
/// be driven from fixtures in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the response body.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Create a configured asynchronous HTTP client.
///
/// The configured timeout bounds each request; expiry surfaces as an
/// [`AppError::Http`](crate::error::AppError::Http).
pub fn create_async_client(config: &ScraperConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// [`PageFetcher`] backed by a `reqwest` client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a fetcher with a client configured from `config`.
    pub fn from_config(config: &ScraperConfig) -> Result<Self> {
        Ok(Self::new(create_async_client(config)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::AppError;

    #[test]
    fn test_client_builds_from_default_config() {
        assert!(HttpFetcher::from_config(&ScraperConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        // Accept and hold the connection without ever answering.
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let config = ScraperConfig {
            timeout_secs: 1,
            ..ScraperConfig::default()
        };
        let fetcher = HttpFetcher::from_config(&config).unwrap();

        let started = std::time::Instant::now();
        let result = fetcher.fetch(&format!("http://{address}/")).await;
        assert!(started.elapsed() < Duration::from_secs(5));
        match result {
            Err(AppError::Http(e)) => assert!(e.is_timeout(), "{e}"),
            other => panic!("expected a timeout, got {other:?}"),
        }
        server.abort();
    }
}
