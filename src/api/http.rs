//! `reqwest`-backed [`ApiClient`]. A single cookie jar is shared across calls so
//! the anti-forgery cookie issued by the handshake rides along on the login
//! request, the same way a browser would attach it. The `XSRF-TOKEN` cookie is
//! echoed back as `X-XSRF-TOKEN` on state-changing requests. The client never
//! logs request bodies; they may carry passwords.

use super::ApiClient;
use crate::{config::AppConfig, errors::AppError, session::SessionStore};
use async_trait::async_trait;
use reqwest::{
    cookie::{CookieStore, Jar},
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client, RequestBuilder, Response,
};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info_span, Instrument};
use url::Url;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;
const XSRF_COOKIE: &str = "XSRF-TOKEN";
const XSRF_HEADER: &str = "X-XSRF-TOKEN";

pub struct HttpApiClient {
    client: Client,
    jar: Arc<Jar>,
    base_url: Url,
    store: Arc<dyn SessionStore>,
}

impl HttpApiClient {
    /// Builds a client for the configured base URL. The session store supplies
    /// the bearer token, when one is held.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the underlying HTTP client cannot be built.
    pub fn new(config: &AppConfig, store: Arc<dyn SessionStore>) -> Result<Self, AppError> {
        let jar = Arc::new(Jar::default());

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .default_headers(headers)
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            jar,
            base_url: config.api_base_url.clone(),
            store,
        })
    }

    fn url(&self, path: &str) -> Result<Url, AppError> {
        let joined = build_url_with_base(self.base_url.as_str(), path);
        Url::parse(&joined)
            .map_err(|err| AppError::Config(format!("Invalid request URL {joined}: {err}")))
    }

    /// Reads the anti-forgery token the server left in the cookie jar.
    fn xsrf_token(&self, url: &Url) -> Option<String> {
        let header = self.jar.cookies(url)?;
        let cookies = header.to_str().ok()?;
        cookie_value(cookies, XSRF_COOKIE)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.store.get() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get(&self, path: &str) -> Result<Value, AppError> {
        let url = self.url(path)?;
        let span = info_span!("http.request", http.method = "GET", url = %url);
        let builder = self.authorize(self.client.get(url.clone()));

        let response = builder
            .send()
            .instrument(span)
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, AppError> {
        let url = self.url(path)?;
        let span = info_span!("http.request", http.method = "POST", url = %url);

        let mut builder = self.authorize(self.client.post(url.clone()));
        if let Some(token) = self.xsrf_token(&url) {
            builder = builder.header(XSRF_HEADER, token);
        } else {
            debug!("no anti-forgery cookie in jar");
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .instrument(span)
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key != name {
            return None;
        }
        urlencoding::decode(value).ok().map(|decoded| decoded.into_owned())
    })
}

/// Maps transport errors into `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response(response: Response) -> Result<Value, AppError> {
    let status = response.status();
    let body = response.text().await.map_err(map_request_error)?;

    if status.is_success() {
        decode_body(&body)
    } else {
        debug!(status = status.as_u16(), "request rejected");
        Err(AppError::Http {
            status: status.as_u16(),
            message: sanitize_body(&body),
            server_message: extract_message(&body),
        })
    }
}

fn decode_body(body: &str) -> Result<Value, AppError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body)
        .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
}

/// Pulls the `message` field out of a structured error body.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = value.get("message")?.as_str()?.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.chars().take(MAX_ERROR_CHARS).collect())
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
