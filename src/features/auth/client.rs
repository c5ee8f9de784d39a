//! Client wrappers for the authentication endpoints. Request bodies carry the
//! password and device id; never log them.

use super::types::{LoginRequest, LoginResponse};
use crate::{
    api::{endpoints, ApiClient},
    errors::AppError,
};

/// Asks the server for the anti-forgery cookie used by later calls.
pub async fn csrf_cookie(api: &dyn ApiClient) -> Result<(), AppError> {
    api.get(endpoints::CSRF_COOKIE).await.map(|_| ())
}

/// Submits credentials and normalizes whichever response shape comes back.
pub async fn login(
    api: &dyn ApiClient,
    request: &LoginRequest<'_>,
) -> Result<LoginResponse, AppError> {
    let body = serde_json::to_value(request)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
    let response = api.post(endpoints::LOGIN, Some(&body)).await?;
    Ok(LoginResponse::from_value(response))
}

/// Ends the server-side session.
pub async fn logout(api: &dyn ApiClient) -> Result<(), AppError> {
    api.post(endpoints::LOGOUT, None).await.map(|_| ())
}
