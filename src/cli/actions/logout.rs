use super::connect;
use crate::{cli::globals::GlobalArgs, features::staff, routes::HistoryRouter};
use anyhow::Result;

/// Runs the staff area's logout sequence. Succeeds even when the server
/// rejects the call; the local token is always removed.
/// # Errors
/// Returns an error if the client cannot be built.
pub async fn execute(globals: &GlobalArgs) -> Result<()> {
    let (store, api) = connect(globals)?;
    let history = HistoryRouter::new();

    staff::logout(api.as_ref(), store.as_ref(), &history).await;

    if let Some(route) = history.current() {
        println!("Signed out, back to {route}");
    }
    Ok(())
}
