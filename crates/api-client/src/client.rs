//! PostgREST client for the hosted Souk tables

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::listings::SupabaseListingStore;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// API key header for Supabase
const APIKEY_HEADER: &str = "apikey";

/// Client for the Supabase REST interface
///
/// Wraps `reqwest` with the project's keys, a request timeout and request
/// correlation IDs. Failed requests are returned as-is; retrying is left to
/// the caller.
#[derive(Clone)]
pub struct SoukClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl SoukClient {
    /// Create a new client with configuration from the environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("souk-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        if let Some(key) = config.api_key() {
            let value = HeaderValue::from_str(key)
                .map_err(|_| ApiError::config("API key contains invalid header characters"))?;
            default_headers.insert(APIKEY_HEADER, value);

            let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| ApiError::config("API key contains invalid header characters"))?;
            default_headers.insert(AUTHORIZATION, bearer);
        }

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Listings table as an entity store for proximity search
    #[must_use]
    pub fn listings(&self) -> SupabaseListingStore {
        SupabaseListingStore::new(self.clone())
    }

    /// GET rows from a table with PostgREST query parameters
    #[instrument(skip(self, query), fields(request_id))]
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(String, String)],
    ) -> ApiResult<Vec<T>> {
        let url = format!("{}/{}", self.config.rest_url(), table);
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let start = Instant::now();
        let response = self
            .inner
            .get(&url)
            .header(X_REQUEST_ID, &request_id)
            .query(query)
            .send()
            .await?;

        let rows = handle_response(response).await;
        debug!(
            request_id = %request_id,
            elapsed_ms = start.elapsed().as_millis(),
            ok = rows.is_ok(),
            "Select finished"
        );
        rows
    }
}

/// Handle HTTP response and deserialize
async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();

    if status.is_success() {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    } else {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::api_response(status.as_u16(), message))
    }
}
