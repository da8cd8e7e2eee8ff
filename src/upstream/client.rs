//! disease.sh REST API Client
//!
//! HTTP client for the upstream statistics API. Each fetch is a single
//! best-effort GET: no retries, no backoff.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::cache::ResponseCache;
use super::endpoint::{Endpoint, DEFAULT_BASE_URL};
use super::error::{FetchError, FetchResult};
use super::types::{CountryRecord, GlobalSummary};

/// Source of raw upstream payloads
///
/// Implemented by [`UpstreamClient`]; the dashboard pipeline only sees this
/// trait so it can be driven from fixed data.
#[async_trait]
pub trait CovidSource: Send + Sync {
    /// Fetch `endpoint` and return its JSON body unmodified
    async fn fetch(&self, endpoint: Endpoint) -> FetchResult<Value>;

    /// URL that `endpoint` resolves to, for error reporting
    fn url(&self, endpoint: Endpoint) -> String;

    /// Forget any memoized responses
    async fn clear_cache(&self) {}
}

/// Configuration for the upstream client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the API (e.g., "https://disease.sh")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Memoize successful responses by URL
    pub cache_enabled: bool,
    /// Cache entry lifetime; `None` keeps entries for the life of the process
    pub cache_ttl: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 30_000,
            cache_enabled: true,
            cache_ttl: None,
        }
    }
}

/// HTTP client for the statistics API
pub struct UpstreamClient {
    client: Client,
    config: ClientConfig,
    cache: Option<ResponseCache>,
}

impl UpstreamClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(concat!("covid-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;

        let cache = config
            .cache_enabled
            .then(|| ResponseCache::new(config.cache_ttl));

        Ok(Self {
            client,
            config,
            cache,
        })
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    /// One GET, status check, JSON parse
    async fn get_json(&self, url: &str) -> FetchResult<Value> {
        tracing::debug!(url = %url, "fetching upstream");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::parse(url, e))
    }
}

#[async_trait]
impl CovidSource for UpstreamClient {
    async fn fetch(&self, endpoint: Endpoint) -> FetchResult<Value> {
        let url = self.url(endpoint);

        let result = match &self.cache {
            Some(cache) => cache.get_or_fetch(&url, || self.get_json(&url)).await,
            None => self.get_json(&url).await,
        };

        // Callers decide whether a failure is worth a warning
        if let Err(e) = &result {
            tracing::debug!(endpoint = %endpoint, error = %e, "fetch failed");
        }

        result
    }

    fn url(&self, endpoint: Endpoint) -> String {
        endpoint.url(&self.config.base_url)
    }

    async fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear().await;
        }
    }
}

/// Fetch and decode the worldwide totals
pub async fn fetch_global_summary(source: &dyn CovidSource) -> FetchResult<GlobalSummary> {
    fetch_typed(source, Endpoint::GlobalSummary).await
}

/// Fetch and decode the per-country list, preserving upstream order
pub async fn fetch_countries(source: &dyn CovidSource) -> FetchResult<Vec<CountryRecord>> {
    fetch_typed(source, Endpoint::Countries).await
}

async fn fetch_typed<T: DeserializeOwned>(
    source: &dyn CovidSource,
    endpoint: Endpoint,
) -> FetchResult<T> {
    let value = source.fetch(endpoint).await?;
    serde_json::from_value(value).map_err(|e| FetchError::parse(&source.url(endpoint), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::view::RenderOptions;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Serve `router` on an ephemeral local port and return its base URL
    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn test_config(base_url: String, cache_enabled: bool) -> ClientConfig {
        ClientConfig {
            base_url,
            request_timeout_ms: 5_000,
            cache_enabled,
            cache_ttl: None,
        }
    }

    fn healthy_upstream() -> Router {
        Router::new()
            .route(
                "/v3/covid-19/all",
                get(|| async {
                    Json(serde_json::json!({
                        "cases": 100,
                        "deaths": 10,
                        "recovered": 80,
                        "active": 10,
                        "updated": 1700000000000i64
                    }))
                }),
            )
            .route(
                "/v3/covid-19/countries",
                get(|| async {
                    Json(serde_json::json!([
                        { "country": "A", "cases": 5, "deaths": 1, "recovered": 4, "continent": "Europe" },
                        { "country": "B", "cases": 50, "deaths": 2, "recovered": 40 }
                    ]))
                }),
            )
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://disease.sh");
        assert!(config.cache_enabled);
        assert!(config.cache_ttl.is_none());
    }

    #[tokio::test]
    async fn test_fetch_passes_json_through() {
        let base = spawn_upstream(healthy_upstream()).await;
        let client = UpstreamClient::new(test_config(base, false)).unwrap();

        let value = client.fetch(Endpoint::GlobalSummary).await.unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "cases": 100,
                "deaths": 10,
                "recovered": 80,
                "active": 10,
                "updated": 1700000000000i64
            })
        );
    }

    #[tokio::test]
    async fn test_typed_helpers() {
        let base = spawn_upstream(healthy_upstream()).await;
        let client = UpstreamClient::new(test_config(base, false)).unwrap();

        let summary = fetch_global_summary(&client).await.unwrap();
        assert_eq!((summary.cases, summary.deaths, summary.recovered), (100, 10, 80));

        let countries = fetch_countries(&client).await.unwrap();
        assert_eq!(
            countries,
            vec![
                CountryRecord::new("A", 5, 1, 4),
                CountryRecord::new("B", 50, 2, 40),
            ]
        );
    }

    #[tokio::test]
    async fn test_http_500_is_status_error() {
        let router = Router::new().route(
            "/v3/covid-19/all",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn_upstream(router).await;
        let client = UpstreamClient::new(test_config(base, true)).unwrap();

        let err = client.fetch(Endpoint::GlobalSummary).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
        assert!(client.cache().unwrap().is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_route_is_status_error() {
        let base = spawn_upstream(Router::new()).await;
        let client = UpstreamClient::new(test_config(base, false)).unwrap();

        let err = client.fetch(Endpoint::Countries).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let router = Router::new().route("/v3/covid-19/all", get(|| async { "not json" }));
        let base = spawn_upstream(router).await;
        let client = UpstreamClient::new(test_config(base, false)).unwrap();

        let err = client.fetch(Endpoint::GlobalSummary).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_parse_error() {
        let router = Router::new().route(
            "/v3/covid-19/countries",
            get(|| async { Json(serde_json::json!({ "message": "moved" })) }),
        );
        let base = spawn_upstream(router).await;
        let client = UpstreamClient::new(test_config(base, false)).unwrap();

        let err = fetch_countries(&client).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_is_transport_error() {
        // Bind then drop to get a port with nothing listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = UpstreamClient::new(test_config(format!("http://{}", addr), false)).unwrap();

        let err = client.fetch(Endpoint::GlobalSummary).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_slow_upstream_is_timeout_error() {
        let router = Router::new().route(
            "/v3/covid-19/all",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(serde_json::json!({ "cases": 1 }))
            }),
        );
        let base = spawn_upstream(router).await;
        let client = UpstreamClient::new(ClientConfig {
            request_timeout_ms: 100,
            ..test_config(base, false)
        })
        .unwrap();

        let err = client.fetch(Endpoint::GlobalSummary).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }), "got {:?}", err);

        let dashboard = Dashboard::new(Arc::new(client), RenderOptions::default());
        let snapshot = dashboard.load().await;
        assert!(snapshot.global.is_none());
        assert!(snapshot.warnings[0].ends_with("/v3/covid-19/all timed out"));
    }

    #[tokio::test]
    async fn test_cache_memoizes_by_url() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let router = Router::new().route(
            "/v3/covid-19/all",
            get(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(serde_json::json!({ "cases": 1, "deaths": 0, "recovered": 0 }))
                }
            }),
        );
        let base = spawn_upstream(router).await;
        let client = UpstreamClient::new(test_config(base, true)).unwrap();

        client.fetch(Endpoint::GlobalSummary).await.unwrap();
        client.fetch(Endpoint::GlobalSummary).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        client.clear_cache().await;
        client.fetch(Endpoint::GlobalSummary).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
