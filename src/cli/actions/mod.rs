pub mod login;
pub mod logout;
pub mod staff_menu;

// Internal "interpreter" for `Action`.
// We keep the match in a separate module so `mod.rs` stays small as more actions are added.
mod run;

use crate::{
    api::{ApiClient, HttpApiClient},
    cli::globals::GlobalArgs,
    session::{FileSessionStore, SessionStore},
};
use anyhow::Result;
use std::sync::Arc;

#[derive(Debug)]
pub enum Action {
    Login(login::Args),
    StaffMenu,
    Logout,
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: &GlobalArgs) -> Result<()> {
        run::execute(self, globals).await
    }
}

/// Collaborators shared by every action: the on-disk session store and an
/// HTTP client that attaches its token.
fn connect(globals: &GlobalArgs) -> Result<(Arc<dyn SessionStore>, Arc<dyn ApiClient>)> {
    let store: Arc<dyn SessionStore> =
        Arc::new(FileSessionStore::new(&globals.config.session_file));
    let api = HttpApiClient::new(&globals.config, Arc::clone(&store))?;
    Ok((store, Arc::new(api)))
}
