//! Analytics REST API client
//!
//! [`AnalyticsApi`] is the seam between the view driver and a data source.
//! [`HttpClient`] talks to the live backend; `DemoApi` serves fixture data.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use uuid::Uuid;

use crate::decode::{decode_dashboard, decode_drilldown, decode_tenants, DashboardSnapshot};
use crate::dto::UserDrilldown;
use crate::error::{ApiError, ApiResult};
use crate::model::TenantSummary;
use crate::query::{
    build_url, DashboardQuery, DrilldownQuery, QueryParams, TenantQuery, DASHBOARD_PATH,
    TENANTS_PATH,
};

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Read-only access to the analytics backend
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// Tenants active in the query's window
    async fn fetch_tenants(&self, query: &TenantQuery) -> ApiResult<Vec<TenantSummary>>;

    /// Dashboard snapshot for one tenant and window
    async fn fetch_dashboard(&self, query: &DashboardQuery) -> ApiResult<DashboardSnapshot>;

    /// Counts-only breakdown for one user
    async fn fetch_user_drilldown(&self, query: &DrilldownQuery) -> ApiResult<UserDrilldown>;
}

/// HTTP client settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g. "http://localhost:8000")
    pub base_url: String,
    /// Per-request timeout; `None` waits as long as the transport allows
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: None,
        }
    }
}

/// reqwest-backed [`AnalyticsApi`]
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        reqwest::Url::parse(&config.base_url).map_err(|e| {
            ApiError::InvalidRequest(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and return the body of a 2xx response
    async fn get(&self, path: &str, params: &QueryParams) -> ApiResult<String> {
        let url = build_url(&self.base_url, path, params);
        let request_id = Uuid::new_v4();
        let started = Instant::now();
        tracing::debug!(%request_id, %url, "Sending request");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(%request_id, path, error = %e, "Request failed");
                ApiError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok();
            let err = ApiError::from_status(status.as_u16(), body);
            tracing::warn!(%request_id, path, status = status.as_u16(), error = %err, "Request rejected");
            return Err(err);
        }

        let body = response.text().await?;
        tracing::info!(
            %request_id,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = body.len(),
            "Request complete"
        );
        Ok(body)
    }
}

#[async_trait]
impl AnalyticsApi for HttpClient {
    async fn fetch_tenants(&self, query: &TenantQuery) -> ApiResult<Vec<TenantSummary>> {
        let body = self.get(TENANTS_PATH, &query.params()).await?;
        decode_tenants(&body)
    }

    async fn fetch_dashboard(&self, query: &DashboardQuery) -> ApiResult<DashboardSnapshot> {
        query.validate()?;
        let body = self.get(DASHBOARD_PATH, &query.params()).await?;
        decode_dashboard(&body)
    }

    async fn fetch_user_drilldown(&self, query: &DrilldownQuery) -> ApiResult<UserDrilldown> {
        query.validate()?;
        let body = self.get(&query.path(), &query.params()).await?;
        decode_drilldown(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = HttpClient::new(ClientConfig {
            base_url: "not a url".to_string(),
            timeout: None,
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = HttpClient::new(ClientConfig {
            base_url: "http://localhost:8000/".to_string(),
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_empty_user_id_never_reaches_the_network() {
        let client = HttpClient::new(ClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: None,
        })
        .unwrap();
        let window = crate::test_support::window();
        let err = client
            .fetch_user_drilldown(&DrilldownQuery::new("t1", "", window))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(ref m) if m.contains("user_id")));
    }
}
