//! HTTP API Client
//!
//! Runs the fetches requested by the view state against the analytics API.
//! Bodies are decoded and validated by the core crate, so the browser and
//! the CLI reject the same malformed responses.

use gloo_net::http::Request;

use querylens::decode::{decode_dashboard, decode_drilldown, decode_tenants};
use querylens::query::{build_url, QueryParams, DASHBOARD_PATH, TENANTS_PATH};
use querylens::view::FetchRequest;
use querylens::{ApiError, ApiResult, Event};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Local storage key overriding [`DEFAULT_API_BASE`]
pub const API_BASE_KEY: &str = "querylens_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// GET `path` and return the body of a 2xx response
async fn get(path: &str, params: &QueryParams) -> ApiResult<String> {
    let url = build_url(&get_api_base(), path, params);

    let response = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| {
            web_sys::console::error_1(&format!("Request to {} failed: {}", path, e).into());
            ApiError::Transport(e.to_string())
        })?;

    if !response.ok() {
        let body = response.text().await.ok();
        return Err(ApiError::from_status(response.status(), body));
    }

    response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))
}

/// Perform one fetch and wrap the outcome as the matching completion event
pub async fn execute(request: FetchRequest) -> Event {
    match request {
        FetchRequest::Tenants { token, query } => Event::TenantsLoaded {
            token,
            result: get(TENANTS_PATH, &query.params())
                .await
                .and_then(|body| decode_tenants(&body)),
        },
        FetchRequest::Dashboard { token, query } => {
            let result = match query.validate() {
                Ok(()) => get(DASHBOARD_PATH, &query.params())
                    .await
                    .and_then(|body| decode_dashboard(&body)),
                Err(err) => Err(err),
            };
            Event::DashboardLoaded { token, result }
        }
        FetchRequest::Drilldown { token, query } => {
            let result = match query.validate() {
                Ok(()) => get(&query.path(), &query.params())
                    .await
                    .and_then(|body| decode_drilldown(&body)),
                Err(err) => Err(err),
            };
            Event::DrilldownLoaded { token, result }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://localhost:8000/"), "http://localhost:8000");
        assert_eq!(normalize_base(" https://analytics.example.com//"), "https://analytics.example.com");
    }

    #[wasm_bindgen_test]
    fn test_api_base_follows_local_storage() {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .unwrap();

        storage.remove_item(API_BASE_KEY).unwrap();
        assert_eq!(get_api_base(), DEFAULT_API_BASE);

        storage.set_item(API_BASE_KEY, "http://10.0.0.5:9000/").unwrap();
        assert_eq!(get_api_base(), "http://10.0.0.5:9000");

        storage.remove_item(API_BASE_KEY).unwrap();
    }
}
