use crate::cli::{
    actions::{login, Action},
    globals::GlobalArgs,
};
use crate::config::{AppConfig, ConfigOverrides};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;

/// Builds the shared settings from global arguments.
/// # Errors
/// Returns an error if the API URL is missing or invalid.
pub fn globals(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let api_url = matches
        .get_one::<String>("api-url")
        .context("missing required argument: --api-url")?;

    let mut config = AppConfig::new(api_url).context("invalid CLINIC_PORTAL_API_URL")?;
    config.apply_overrides(ConfigOverrides {
        request_timeout_secs: matches.get_one::<u64>("timeout").copied(),
        navigation_delay_ms: matches.get_one::<u64>("nav-delay").copied(),
        session_file: matches.get_one::<String>("session-file").cloned(),
    });

    Ok(GlobalArgs::new(config))
}

/// # Errors
/// Returns an error if the subcommand or its required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("login", sub_m)) => {
            let email = sub_m
                .get_one::<String>("email")
                .cloned()
                .context("missing required argument: --email")?;
            let password = sub_m
                .get_one::<String>("password")
                .cloned()
                .context("missing required argument: --password")?;

            Ok(Action::Login(login::Args {
                email,
                password: SecretString::from(password),
            }))
        }
        Some(("staff-menu", _)) => Ok(Action::StaffMenu),
        Some(("logout", _)) => Ok(Action::Logout),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("missing command")),
    }
}
