//! Upstream menu sources
//!
//! Fetching is the only fallible step of serving a menu. Sources return the
//! raw JSON untouched; [`fetch_menu`] hands it to the normalizer.

use crate::core::error::{FetchError, KapiResult};
use crate::core::menu::MenuResponse;
use crate::menu::normalizer::MenuNormalizer;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

/// Provider of raw menu payloads
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Fetch the raw menu of a restaurant near the given coordinates
    async fn fetch_menu(&self, restaurant_id: &str, lat: f64, lng: f64) -> KapiResult<Value>;
}

/// Fetch a menu and normalize it
///
/// Transport and status failures abort with `KapiError::Fetch`; anything
/// wrong with the payload itself only shrinks the resulting menu.
pub async fn fetch_menu(
    source: &dyn MenuSource,
    normalizer: &MenuNormalizer,
    restaurant_id: &str,
    lat: f64,
    lng: f64,
) -> KapiResult<MenuResponse> {
    let raw = source
        .fetch_menu(restaurant_id, lat, lng)
        .await
        .inspect_err(|e| tracing::warn!(restaurant_id = %restaurant_id, error = %e, "menu fetch failed"))?;
    Ok(normalizer.normalize(&raw, restaurant_id, lat, lng))
}

/// Serves one fixed payload for every restaurant
///
/// Used in development and tests in place of the live upstream.
#[derive(Debug, Clone)]
pub struct FixtureMenuSource {
    payload: Value,
}

impl FixtureMenuSource {
    pub fn from_value(payload: Value) -> Self {
        Self { payload }
    }

    /// Load the payload from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_value(serde_json::from_str(&content)?))
    }
}

#[async_trait]
impl MenuSource for FixtureMenuSource {
    async fn fetch_menu(&self, _restaurant_id: &str, _lat: f64, _lng: f64) -> KapiResult<Value> {
        Ok(self.payload.clone())
    }
}

#[cfg(feature = "upstream")]
pub use http::HttpMenuSource;

#[cfg(feature = "upstream")]
mod http {
    use super::*;
    use crate::config::UpstreamConfig;
    use std::time::Duration;

    /// Live upstream menu API over HTTP
    ///
    /// No retries: a failed request surfaces as `FetchError` and the caller
    /// decides what to do.
    #[derive(Debug, Clone)]
    pub struct HttpMenuSource {
        client: reqwest::Client,
        menu_url: String,
    }

    impl HttpMenuSource {
        pub fn new(config: &UpstreamConfig) -> Result<Self> {
            let client = reqwest::Client::builder()
                .user_agent(config.user_agent.clone())
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()?;
            Ok(Self {
                client,
                menu_url: config.menu_url.clone(),
            })
        }
    }

    #[async_trait]
    impl MenuSource for HttpMenuSource {
        async fn fetch_menu(&self, restaurant_id: &str, lat: f64, lng: f64) -> KapiResult<Value> {
            let lat = lat.to_string();
            let lng = lng.to_string();
            let response = self
                .client
                .get(&self.menu_url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .query(&[
                    ("page-type", "REGULAR_MENU"),
                    ("complete-menu", "true"),
                    ("lat", lat.as_str()),
                    ("lng", lng.as_str()),
                    ("restaurantId", restaurant_id),
                ])
                .send()
                .await
                .map_err(|e| FetchError::Transport {
                    message: e.to_string(),
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    message: status.canonical_reason().unwrap_or_default().to_string(),
                }
                .into());
            }

            response.json::<Value>().await.map_err(|e| {
                let err = if e.is_decode() {
                    FetchError::Decode {
                        message: e.to_string(),
                    }
                } else {
                    FetchError::Transport {
                        message: e.to_string(),
                    }
                };
                err.into()
            })
        }
    }
}
