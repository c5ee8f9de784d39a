//! Mounted staff navigator.
//!
//! Mounting spawns a single settings fetch. Until it settles the gate stays
//! closed, and a failed fetch leaves it closed: gated entries are simply left
//! out, never shown disabled. The fetch task holds only a weak handle to the
//! gate, so a navigator dropped mid-fetch discards the late result. Dropping
//! the navigator also aborts the task.

use super::{client, navigation::NavigationModel, types::FeatureGate};
use crate::{
    api::ApiClient,
    features::auth,
    routes::{Route, Router},
    session::SessionStore,
};
use std::sync::{Arc, Weak};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, info_span, instrument, warn, Instrument};

pub struct StaffNavigator {
    gate: Arc<watch::Sender<FeatureGate>>,
    fetch: JoinHandle<()>,
    api: Arc<dyn ApiClient>,
    store: Arc<dyn SessionStore>,
    router: Arc<dyn Router>,
}

impl StaffNavigator {
    /// Mounts the navigator and starts resolving entitlement in the background.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn mount(
        api: Arc<dyn ApiClient>,
        store: Arc<dyn SessionStore>,
        router: Arc<dyn Router>,
    ) -> Self {
        let (sender, _) = watch::channel(FeatureGate::default());
        let gate = Arc::new(sender);

        let fetch = tokio::spawn(
            resolve_entitlement(Arc::clone(&api), Arc::downgrade(&gate))
                .instrument(info_span!("staff.entitlement")),
        );

        Self {
            gate,
            fetch,
            api,
            store,
            router,
        }
    }

    #[must_use]
    pub fn gate(&self) -> FeatureGate {
        *self.gate.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FeatureGate> {
        self.gate.subscribe()
    }

    /// Menu for the current gate state.
    #[must_use]
    pub fn menu(&self) -> NavigationModel {
        NavigationModel::staff(self.gate())
    }

    /// Waits until the settings fetch has settled and returns the final gate.
    pub async fn resolved(&self) -> FeatureGate {
        let mut receiver = self.subscribe();
        let gate = match receiver.wait_for(|gate| gate.resolved).await {
            Ok(gate) => *gate,
            Err(_) => self.gate(),
        };
        gate
    }

    /// Ends the session through this navigator's collaborators.
    pub async fn logout(&self) {
        logout(self.api.as_ref(), self.store.as_ref(), self.router.as_ref()).await;
    }

    /// Tears the navigator down. Equivalent to dropping it.
    pub fn unmount(self) {}
}

impl Drop for StaffNavigator {
    fn drop(&mut self) {
        self.fetch.abort();
    }
}

/// Ends the session. Always clears local state and returns to the entry view,
/// even when the server call fails. Needs no mounted navigator, so no settings
/// fetch is started.
#[instrument(skip_all)]
pub async fn logout(api: &dyn ApiClient, store: &dyn SessionStore, router: &dyn Router) {
    match auth::client::logout(api).await {
        Ok(()) => info!("server session closed"),
        Err(err) => warn!(error = %err, "Logout failed"),
    }

    if let Err(err) = store.clear() {
        warn!(error = %err, "failed to clear local session");
    }

    router.navigate(Route::Entry).await;
}

async fn resolve_entitlement(api: Arc<dyn ApiClient>, gate: Weak<watch::Sender<FeatureGate>>) {
    let entitled = match client::inventory_settings(api.as_ref()).await {
        Ok(flags) => flags.staff_can_receive,
        Err(err) => {
            warn!(error = %err, "inventory settings unavailable, hiding gated entries");
            false
        }
    };

    let Some(gate) = gate.upgrade() else {
        debug!("navigator unmounted before settings resolved");
        return;
    };
    gate.send_replace(FeatureGate::resolved(entitled));
}
