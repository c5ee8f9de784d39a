use super::connect;
use crate::{
    cli::globals::GlobalArgs,
    features::{
        auth::{Credentials, HostFingerprint, LoginOutcome, SessionEstablisher},
        staff::StaffNavigator,
    },
    routes::{DeferredRouter, HistoryRouter, Route},
};
use anyhow::{bail, Result};
use secrecy::SecretString;
use std::{fmt, sync::Arc};
use tracing::debug;

pub struct Args {
    pub email: String,
    pub password: SecretString,
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Runs the login pipeline. Staff accounts land on their menu right away,
/// reusing the same client so the session cookie carries over.
/// # Errors
/// Returns an error if the client cannot be built or the login fails.
pub async fn execute(args: Args, globals: &GlobalArgs) -> Result<()> {
    let (store, api) = connect(globals)?;
    let history = Arc::new(HistoryRouter::new());
    let router = Arc::new(DeferredRouter::new(
        Arc::clone(&history),
        globals.config.navigation_delay,
    ));

    let establisher = SessionEstablisher::new(
        Arc::clone(&api),
        Arc::new(HostFingerprint),
        Arc::clone(&store),
        router,
    );

    let credentials = Credentials {
        email: args.email,
        password: args.password,
    };
    let outcome = establisher.submit(credentials).await;

    if let Some(message) = establisher.status().message {
        println!("{message}");
    }

    match outcome {
        LoginOutcome::Navigated { route, .. } => {
            println!("Opened {route}");
            if route == Route::Staff {
                let navigator = StaffNavigator::mount(api, store, history);
                navigator.resolved().await;
                print!("{}", navigator.menu());
            }
            Ok(())
        }
        LoginOutcome::NoDestination { user } | LoginOutcome::UnknownRole { user } => {
            debug!(role = %user.role, "no area to open");
            Ok(())
        }
        LoginOutcome::Failed(failure) => Err(failure.into()),
        LoginOutcome::Invalid => bail!("missing credentials"),
        LoginOutcome::Busy => bail!("a login is already in progress"),
    }
}
