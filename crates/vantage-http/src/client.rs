//! Low-level HTTP client for the backend API.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use vantage_core::error::{ApiError, Error, TransportError};
use vantage_core::{AccessToken, ApiUrl};

/// Default per-request timeout. The backend has no long-running
/// endpoints, so anything slower than this is treated as a failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP plumbing shared by all backend calls.
///
/// Knows how to send requests and decode success or error bodies.
/// Credential policy lives in [`crate::Dispatcher`], not here.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: ApiUrl,
}

impl ApiClient {
    /// Create a new client for the given backend base URL.
    pub fn new(base: ApiUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("vantage/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self { client, base }
    }

    /// Returns the base URL this client is configured for.
    pub fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// Send a GET request, optionally with query parameters and a token.
    #[instrument(skip(self, params, token), fields(base = %self.base))]
    pub(crate) async fn get<Q, R>(
        &self,
        path: &str,
        params: Option<&Q>,
        token: Option<&AccessToken>,
    ) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint_url(path);
        debug!(path, authed = token.is_some(), "GET");
        trace!(?params, "query parameters");

        let mut request = self.client.get(&url);
        if let Some(params) = params {
            request = request.query(params);
        }
        if let Some(token) = token {
            request = request.headers(auth_headers(token));
        }

        let response = request.send().await.map_err(transport_error)?;
        self.handle_response(response).await
    }

    /// Send a form-encoded POST request, optionally with a token.
    #[instrument(skip(self, form, token), fields(base = %self.base))]
    pub(crate) async fn post_form<F, R>(
        &self,
        path: &str,
        form: &F,
        token: Option<&AccessToken>,
    ) -> Result<R, Error>
    where
        F: Serialize,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint_url(path);
        debug!(path, authed = token.is_some(), "POST (form)");

        let mut request = self.client.post(&url).form(form);
        if let Some(token) = token {
            request = request.headers(auth_headers(token));
        }

        let response = request.send().await.map_err(transport_error)?;
        self.handle_response(response).await
    }

    /// Handle a backend response, decoding the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            let body = response.json::<R>().await.map_err(transport_error)?;
            Ok(body)
        } else {
            Err(Error::Api(parse_error_response(response).await))
        }
    }
}

/// Create authorization headers for authenticated requests.
fn auth_headers(token: &AccessToken) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let auth_value = format!("Bearer {}", token.as_str());
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&auth_value).expect("invalid token characters"),
    );
    headers
}

/// Parse a failure response body.
///
/// The backend reports errors as `{"detail": ...}` where `detail` is
/// usually a string but may be structured (validation errors).
async fn parse_error_response(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();

    let detail = match response.json::<serde_json::Value>().await {
        Ok(body) => match body.get("detail") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        },
        Err(_) => None,
    };

    ApiError::new(status, detail)
}

/// Classify a reqwest failure into the transport error taxonomy.
fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}
