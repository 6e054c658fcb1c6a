//! HTTP transport shared by remote pricing providers.
//!
//! Every failure is converted into a [`ProviderError`] attributed to the
//! provider: transport and upstream failures become
//! [`PricingError`]s (with the HTTP status as `code` when a response
//! arrived), undecodable bodies become [`ProviderError::Decode`].
//! Retrying is left to the caller.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api_types::ApiErrorResponse;
use crate::application::ports::{PricingError, ProviderError};
use crate::config::ProviderConfig;

const UNKNOWN_API_ERROR: &str = "Unknown API error";

/// Query string parameters, serialized with repeated keys (`k=a&k=b`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Create an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a single key/value pair.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    /// Append one pair per value, all under `key`.
    #[must_use]
    pub fn with_all<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        self.0
            .extend(values.into_iter().map(|v| (key.to_string(), v.to_string())));
        self
    }

    /// Pairs in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// HTTP client for a single provider.
#[derive(Debug, Clone)]
pub struct ProviderHttpClient {
    client: Client,
    provider: String,
    base_url: String,
}

impl ProviderHttpClient {
    /// Create a client with bearer auth, JSON headers and the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Validation` if the API key is not a valid
    /// header value or the client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| ProviderError::validation(&config.name, "apiKey is not a valid header value"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(|e| ProviderError::validation(&config.name, e.to_string()))?;

        Ok(Self {
            client,
            provider: config.name.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Provider the client is attributed to.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Absolute URL for an endpoint.
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// GET `endpoint` with query parameters.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` on transport, status, or decode failure.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &QueryParams,
    ) -> Result<T, ProviderError> {
        let request = self.client.get(self.url(endpoint)).query(query.pairs());
        self.send(request).await
    }

    /// POST a JSON body to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` on transport, status, or decode failure.
    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ProviderError> {
        let request = self.client.post(self.url(endpoint)).json(body);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ProviderError> {
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if !status.is_success() => {
                return Err(self.unreadable_error_body(status, e.to_string()).into());
            }
            Err(e) => return Err(self.transport_error(&e)),
        };

        if !status.is_success() {
            return Err(self.status_error(status, &body).into());
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::Decode {
            provider: self.provider.clone(),
            message: e.to_string(),
        })
    }

    fn transport_error(&self, error: &reqwest::Error) -> ProviderError {
        let message = error.to_string();
        let code = error.status().map(|s| s.as_u16().to_string());
        PricingError::new(&self.provider, non_empty_or_unknown(message), code).into()
    }

    /// The status is known even when the error body cannot be read.
    fn unreadable_error_body(&self, status: StatusCode, message: String) -> PricingError {
        PricingError::new(
            &self.provider,
            non_empty_or_unknown(message),
            Some(status.as_u16().to_string()),
        )
    }

    fn status_error(&self, status: StatusCode, body: &str) -> PricingError {
        let fallback = format!("Request failed with status code {}", status.as_u16());
        PricingError::new(
            &self.provider,
            extract_message(body, &fallback),
            Some(status.as_u16().to_string()),
        )
    }
}

/// Upstream `message` field, else `fallback`, else "Unknown API error".
#[must_use]
pub fn extract_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|err| err.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| non_empty_or_unknown(fallback.to_string()))
}

fn non_empty_or_unknown(message: String) -> String {
    if message.trim().is_empty() {
        UNKNOWN_API_ERROR.to_string()
    } else {
        message
    }
}
