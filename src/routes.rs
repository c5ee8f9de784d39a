//! Navigation destinations and the router seam. Routes are opaque to the core:
//! the establisher and the navigator only decide *where* to go, while a
//! [`Router`] decides *how* and *when* the view changes.

use async_trait::async_trait;
use std::{
    fmt,
    sync::{Arc, Mutex},
    time::Duration,
};
use tracing::debug;

pub mod paths {
    pub const ENTRY: &str = "/";
    pub const ADMIN: &str = "/admin";
    pub const STAFF: &str = "/staff";
    pub const STAFF_APPOINTMENTS: &str = "/staff/appointments";
    pub const STAFF_REMINDERS: &str = "/staff/appointment-reminders";
    pub const STAFF_INVENTORY: &str = "/staff/inventory";
    pub const STAFF_PROFILE: &str = "/staff/profile";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Entry,
    Admin,
    Staff,
    StaffAppointments,
    StaffReminders,
    StaffInventory,
    StaffProfile,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Route::Entry => paths::ENTRY,
            Route::Admin => paths::ADMIN,
            Route::Staff => paths::STAFF,
            Route::StaffAppointments => paths::STAFF_APPOINTMENTS,
            Route::StaffReminders => paths::STAFF_REMINDERS,
            Route::StaffInventory => paths::STAFF_INVENTORY,
            Route::StaffProfile => paths::STAFF_PROFILE,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Capability to change the current view.
#[async_trait]
pub trait Router: Send + Sync {
    async fn navigate(&self, route: Route);
}

#[async_trait]
impl<R: Router + ?Sized> Router for Arc<R> {
    async fn navigate(&self, route: Route) {
        (**self).navigate(route).await;
    }
}

/// In-memory router that records every navigation, newest last.
#[derive(Debug, Default)]
pub struct HistoryRouter {
    visited: Mutex<Vec<Route>>,
}

impl HistoryRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<Route> {
        self.visited
            .lock()
            .ok()
            .and_then(|visited| visited.last().copied())
    }

    #[must_use]
    pub fn history(&self) -> Vec<Route> {
        self.visited
            .lock()
            .map(|visited| visited.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Router for HistoryRouter {
    async fn navigate(&self, route: Route) {
        debug!(%route, "navigate");
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(route);
        }
    }
}

/// Holds each navigation back by a fixed delay so the message shown just
/// before it stays visible for a moment.
#[derive(Debug)]
pub struct DeferredRouter<R> {
    inner: R,
    delay: Duration,
}

impl<R> DeferredRouter<R> {
    pub fn new(inner: R, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: Router> Router for DeferredRouter<R> {
    async fn navigate(&self, route: Route) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.navigate(route).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn route_paths() {
        assert_eq!(Route::Entry.path(), "/");
        assert_eq!(Route::Admin.path(), "/admin");
        assert_eq!(Route::Staff.to_string(), "/staff");
        assert_eq!(Route::StaffInventory.path(), "/staff/inventory");
    }

    #[tokio::test]
    async fn history_router_records_in_order() {
        let router = HistoryRouter::new();
        assert_eq!(router.current(), None);

        router.navigate(Route::Staff).await;
        router.navigate(Route::Entry).await;

        assert_eq!(router.history(), vec![Route::Staff, Route::Entry]);
        assert_eq!(router.current(), Some(Route::Entry));
    }

    #[tokio::test(start_paused = true)]
    async fn deferred_router_waits_before_forwarding() {
        let router = DeferredRouter::new(HistoryRouter::new(), Duration::from_millis(150));
        let started = Instant::now();

        router.navigate(Route::Admin).await;

        assert!(started.elapsed() >= Duration::from_millis(150));
        assert_eq!(router.inner().current(), Some(Route::Admin));
    }
}
