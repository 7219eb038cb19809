use crate::error::TransportError;
use crate::traits::RemoteCatalogClient;
use crate::watchmode::api;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use watchly_config::ApiConfig;
use watchly_models::{CatalogItem, ItemDetail, MediaKind};

/// Watchmode v1 API client. The API key rides along as the `apiKey` query
/// parameter on every request.
#[derive(Clone)]
pub struct WatchmodeClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for WatchmodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchmodeClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl WatchmodeClient {
    pub fn new(base_url: &str, api_key: String, timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("watchly/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let client = Self::new(
            &config.base_url,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
        )?;
        info!("Using catalog API at {}", client.base_url);
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RemoteCatalogClient for WatchmodeClient {
    fn source_name(&self) -> &str {
        "watchmode"
    }

    async fn list_items(&self, kind: MediaKind) -> Result<Vec<CatalogItem>, TransportError> {
        api::list_titles(&self.client, &self.base_url, &self.api_key, kind).await
    }

    async fn get_item_detail(&self, id: u64) -> Result<ItemDetail, TransportError> {
        api::get_title_details(&self.client, &self.base_url, &self.api_key, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let client = WatchmodeClient::new(
            "https://api.watchmode.com/v1/",
            "key".to_string(),
            Duration::from_secs(5),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url(), "https://api.watchmode.com/v1");
        assert_eq!(client.source_name(), "watchmode");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = ApiConfig {
            api_key: "super-secret".to_string(),
            ..ApiConfig::default()
        };
        let client = WatchmodeClient::from_config(&config).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
    }
}
