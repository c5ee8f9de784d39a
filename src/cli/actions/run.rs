use crate::cli::{
    actions::{login, logout, staff_menu, Action},
    globals::GlobalArgs,
};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Login(args) => login::execute(args, globals).await,
        Action::StaffMenu => staff_menu::execute(globals).await,
        Action::Logout => logout::execute(globals).await,
    }
}
