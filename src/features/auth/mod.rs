//! Auth feature: the login pipeline and its collaborators. It touches security
//! boundaries (passwords, device ids, session tokens) and must avoid logging
//! any of them.
//!
//! Flow Overview: the establisher performs the anti-forgery handshake, obtains
//! a device fingerprint, submits credentials, normalizes the response shape and
//! routes by role. Logout lives with the staff navigator but reuses
//! [`client::logout`].

pub mod client;
pub mod establisher;
pub mod fingerprint;
pub mod types;

pub use establisher::{LoginFailure, LoginOutcome, LoginStatus, SessionEstablisher};
pub use fingerprint::{FingerprintSource, HostFingerprint};
pub use types::{Credentials, DeviceFingerprint, LoginResponse, Role, SessionUser};
