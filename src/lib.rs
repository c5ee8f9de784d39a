//! # clinic-portal
//!
//! Client side of the clinic portal: session establishment and the staff
//! area's capability-gated navigation.
//!
//! ## Core Flows
//!
//! ### Login
//!
//! 1. **Handshake:** `GET /sanctum/csrf-cookie` plants the anti-forgery cookie.
//! 2. **Fingerprint:** a [`features::auth::FingerprintSource`] yields the device id.
//! 3. **Submit:** `POST /api/login` with `{ email, password, device_id }`.
//! 4. **Route:** the returned role picks the area: admins to `/admin`, staff to
//!    `/staff`. Patients and unknown roles stay on the login view.
//!
//! ### Staff area
//!
//! Mounting a [`features::staff::StaffNavigator`] fetches
//! `/api/inventory/settings` once. The Inventory entry appears only after the
//! fetch succeeds with a truthy `staff_can_receive`. Logout always clears the
//! local session and returns to `/`, whatever the server answers.
//!
//! Collaborators ([`api::ApiClient`], [`session::SessionStore`],
//! [`routes::Router`]) are injected so both flows can be exercised without a
//! network or a UI.

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod features;
pub mod routes;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;
