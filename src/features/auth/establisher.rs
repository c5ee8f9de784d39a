//! Session establishment: anti-forgery handshake, fingerprint, credential
//! submission, role interpretation and navigation, strictly in that order.
//!
//! Each network step yields its own typed result so a failure is attributable
//! to exactly one step. Progress is published through a `watch` channel as a
//! [`LoginStatus`]; the pending flag is held by a drop guard, so it is released
//! on success, on failure, and when the caller drops the future mid-flight.

use super::{
    client,
    fingerprint::{FingerprintError, FingerprintSource},
    types::{Credentials, DeviceFingerprint, LoginRequest, LoginResponse, Role, SessionUser},
};
use crate::{
    api::ApiClient,
    errors::AppError,
    routes::{Route, Router},
    session::SessionStore,
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use ulid::Ulid;

pub const MSG_SUCCESS: &str = "Login successful!";
pub const MSG_NO_DASHBOARD: &str = "Login successful, but no dashboard yet for this role.";
pub const MSG_FAILED: &str = "Login failed";
pub const MSG_REQUIRED: &str = "Email and password are required.";

/// What the login view shows: the busy indicator and the last message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginStatus {
    pub pending: bool,
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum LoginFailure {
    #[error("anti-forgery handshake failed: {0}")]
    Handshake(#[source] AppError),
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),
    #[error("credential submission failed: {0}")]
    Submit(#[source] AppError),
}

impl LoginFailure {
    /// Text for the login view: the server's own message when it sent one.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            LoginFailure::Handshake(err) | LoginFailure::Submit(err) => err
                .server_message()
                .map_or_else(|| MSG_FAILED.to_string(), str::to_string),
            LoginFailure::Fingerprint(_) => MSG_FAILED.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum LoginOutcome {
    /// Authenticated and sent to the role's area.
    Navigated { user: SessionUser, route: Route },
    /// Authenticated, but the role has no area wired yet (patients).
    NoDestination { user: SessionUser },
    /// Authenticated with a role this client does not know.
    UnknownRole { user: SessionUser },
    Failed(LoginFailure),
    /// Input rejected before any network call.
    Invalid,
    /// Another attempt is still pending; nothing was sent.
    Busy,
}

/// Marker for a completed anti-forgery handshake.
#[derive(Debug)]
struct Handshake;

pub struct SessionEstablisher {
    api: Arc<dyn ApiClient>,
    fingerprints: Arc<dyn FingerprintSource>,
    store: Arc<dyn SessionStore>,
    router: Arc<dyn Router>,
    status: watch::Sender<LoginStatus>,
}

impl SessionEstablisher {
    pub fn new(
        api: Arc<dyn ApiClient>,
        fingerprints: Arc<dyn FingerprintSource>,
        store: Arc<dyn SessionStore>,
        router: Arc<dyn Router>,
    ) -> Self {
        let (status, _) = watch::channel(LoginStatus::default());
        Self {
            api,
            fingerprints,
            store,
            router,
            status,
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoginStatus> {
        self.status.subscribe()
    }

    #[must_use]
    pub fn status(&self) -> LoginStatus {
        self.status.borrow().clone()
    }

    /// Runs one login attempt to completion.
    #[instrument(skip_all, fields(attempt = %Ulid::new()))]
    pub async fn submit(&self, credentials: Credentials) -> LoginOutcome {
        let email = credentials.email.trim();
        if email.is_empty() || credentials.password.expose_secret().is_empty() {
            self.set_message(MSG_REQUIRED);
            return LoginOutcome::Invalid;
        }

        let Some(_pending) = PendingGuard::acquire(&self.status) else {
            debug!("login already in progress");
            return LoginOutcome::Busy;
        };

        match self.authenticate(email, &credentials.password).await {
            Ok(response) => self.dispatch(response).await,
            Err(failure) => {
                warn!(error = %failure, "login failed");
                self.set_message(&failure.user_message());
                LoginOutcome::Failed(failure)
            }
        }
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, LoginFailure> {
        let Handshake = self.handshake().await?;
        let device = self.fingerprint().await?;
        self.submit_credentials(email, password, &device).await
    }

    async fn handshake(&self) -> Result<Handshake, LoginFailure> {
        client::csrf_cookie(self.api.as_ref())
            .await
            .map_err(LoginFailure::Handshake)?;
        debug!("anti-forgery handshake complete");
        Ok(Handshake)
    }

    async fn fingerprint(&self) -> Result<DeviceFingerprint, LoginFailure> {
        let device = self.fingerprints.fingerprint().await?;
        debug!("device fingerprint acquired");
        Ok(device)
    }

    async fn submit_credentials(
        &self,
        email: &str,
        password: &SecretString,
        device: &DeviceFingerprint,
    ) -> Result<LoginResponse, LoginFailure> {
        let request = LoginRequest {
            email,
            password,
            device_id: device.as_str(),
        };
        client::login(self.api.as_ref(), &request)
            .await
            .map_err(LoginFailure::Submit)
    }

    async fn dispatch(&self, response: LoginResponse) -> LoginOutcome {
        let (user, token) = response.into_parts();
        info!(role = %user.role, "login accepted");

        // A token from an earlier session must not outlive this login.
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear previous session token");
        }
        if let Some(token) = token {
            if let Err(err) = self.store.set(token.0) {
                warn!(error = %err, "failed to persist session token");
            }
        }

        self.set_message(MSG_SUCCESS);

        match destination(&user.role) {
            Some(route) => {
                self.router.navigate(route).await;
                LoginOutcome::Navigated { user, route }
            }
            None if user.role == Role::Patient => {
                debug!("patient area is not available yet");
                LoginOutcome::NoDestination { user }
            }
            None => {
                self.set_message(MSG_NO_DASHBOARD);
                LoginOutcome::UnknownRole { user }
            }
        }
    }

    fn set_message(&self, message: &str) {
        self.status.send_modify(|status| {
            status.message = Some(message.to_string());
        });
    }
}

/// Area a role lands in after login.
#[must_use]
pub fn destination(role: &Role) -> Option<Route> {
    match role {
        Role::Admin => Some(Route::Admin),
        Role::Staff => Some(Route::Staff),
        Role::Patient | Role::Other(_) => None,
    }
}

/// Owns the pending flag for one attempt and clears it when dropped.
struct PendingGuard<'a> {
    status: &'a watch::Sender<LoginStatus>,
}

impl<'a> PendingGuard<'a> {
    fn acquire(status: &'a watch::Sender<LoginStatus>) -> Option<Self> {
        let acquired = status.send_if_modified(|current| {
            if current.pending {
                false
            } else {
                current.pending = true;
                current.message = None;
                true
            }
        });
        acquired.then_some(Self { status })
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.status.send_modify(|current| current.pending = false);
    }
}
