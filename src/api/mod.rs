//! The API client seam. Feature clients (`features::*::client`) describe the
//! portal endpoints on top of the two verbs exposed here, so the session and
//! navigation logic can run against [`HttpApiClient`] in production and a
//! scripted fake in tests. Implementations attach cookies and tokens
//! themselves; callers never pass credentials per request.

mod http;

pub use http::HttpApiClient;

use crate::errors::AppError;
use async_trait::async_trait;
use serde_json::Value;

pub mod endpoints {
    pub const CSRF_COOKIE: &str = "/sanctum/csrf-cookie";
    pub const LOGIN: &str = "/api/login";
    pub const INVENTORY_SETTINGS: &str = "/api/inventory/settings";
    pub const LOGOUT: &str = "/logout";
}

#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Issues a `GET` and decodes the JSON body. Empty bodies decode to `Value::Null`.
    async fn get(&self, path: &str) -> Result<Value, AppError>;

    /// Issues a `POST` with an optional JSON body and decodes the JSON response.
    async fn post(&self, path: &str, body: Option<&Value>) -> Result<Value, AppError>;
}
