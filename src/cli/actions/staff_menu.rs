use super::connect;
use crate::{cli::globals::GlobalArgs, features::staff::StaffNavigator, routes::HistoryRouter};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Mounts the staff navigator with the stored session and prints the menu
/// once entitlement has settled.
/// # Errors
/// Returns an error if the client cannot be built.
pub async fn execute(globals: &GlobalArgs) -> Result<()> {
    let (store, api) = connect(globals)?;
    if store.get().is_none() {
        info!("no stored session token, relying on cookies only");
    }

    let navigator = StaffNavigator::mount(api, store, Arc::new(HistoryRouter::new()));
    navigator.resolved().await;
    print!("{}", navigator.menu());

    Ok(())
}
