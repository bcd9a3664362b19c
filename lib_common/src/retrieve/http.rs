//! # HTTP Retrieval Utilities
//!
//! An asynchronous API client wrapper around `reqwest` with standardized
//! JSON response handling. Authentication is a configurable header name and
//! value pair, which covers both `Authorization: Bearer` and secret-token
//! style APIs.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// A standardized container for API responses.
///
/// Wraps the deserialized data along with the status of the HTTP transaction.
#[derive(Debug)]
pub struct ApiResponse<T> {
    /// The successfully deserialized response body, if any.
    pub data: Option<T>,
    /// The raw error body returned by the server if the request failed.
    pub error_body: Option<String>,
    /// The numeric HTTP status code.
    pub status: u16,
    /// Indicates if the status code was in the 2xx range.
    pub success: bool,
}

/// A flexible asynchronous HTTP client.
///
/// Handles base URLs, header authentication and per-request timeouts. One
/// instance is reused across calls to leverage connection pooling.
pub struct ApiClient {
    inner: reqwest::Client,
    base_url: Url,
    auth_header: Option<(HeaderName, HeaderValue)>,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Arguments
    /// * `base_url` - The absolute base URL for the API.
    /// * `auth` - Optional `(header name, value)` pair injected on every request.
    /// * `timeout` - Hard per-request timeout.
    ///
    /// # Errors
    /// Fails when the base URL is not absolute or the auth header is malformed.
    pub fn new(base_url: &str, auth: Option<(&str, &str)>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).context("Invalid base URL (must be absolute)")?;

        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("signage-monitor/1.0")
            .build()
            .context("Failed to build HTTP client")?;

        let auth_header = match auth {
            Some((name, value)) => Some((
                HeaderName::from_bytes(name.as_bytes()).context("Invalid auth header name")?,
                HeaderValue::from_str(value).context("Invalid auth header value")?,
            )),
            None => None,
        };

        Ok(Self {
            inner,
            base_url,
            auth_header,
        })
    }

    /// Performs a generic HTTP request and handles the response.
    ///
    /// Manages URL joining, header injection, authentication, and JSON
    /// serialization/deserialization. A non-2xx status is not an `Err`: it is
    /// reported through `ApiResponse::success` with the raw error body
    /// captured for logging.
    ///
    /// # Errors
    /// Returns an `anyhow::Error` if URL joining, network execution or
    /// success-body decoding fails.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        headers: Option<HeaderMap>,
        body: Option<B>,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let full_url = self.base_url.join(path)?;
        let mut req = self.inner.request(method, full_url);

        if let Some(h) = headers {
            req = req.headers(h);
        }

        if let Some((name, value)) = &self.auth_header {
            req = req.header(name.clone(), value.clone());
        }

        if let Some(b) = body {
            req = req.json(&b);
        }

        let response = req.send().await?;
        let status = response.status();
        let success = status.is_success();

        if success {
            let data = response.json::<T>().await?;
            Ok(ApiResponse {
                data: Some(data),
                error_body: None,
                status: status.as_u16(),
                success: true,
            })
        } else {
            let error_text = response.text().await.ok();
            Ok(ApiResponse {
                data: None,
                error_body: error_text,
                status: status.as_u16(),
                success: false,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_base_url_is_rejected() {
        let client = ApiClient::new("not-a-url", None, Duration::from_secs(5));
        assert!(client.is_err());
    }

    #[test]
    fn malformed_auth_header_is_rejected() {
        let client = ApiClient::new(
            "https://api.example.com/",
            Some(("Secret Token\n", "abc")),
            Duration::from_secs(5),
        );
        assert!(client.is_err());
    }
}
