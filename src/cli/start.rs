use crate::cli::{
    actions::Action,
    commands,
    dispatch::{globals, handler},
    globals::{GlobalArgs, LogFormat},
    telemetry,
};
use anyhow::Result;

/// Start the CLI
/// # Errors
/// Returns an error if logging cannot be initialized or the arguments are invalid.
pub fn start() -> Result<(Action, GlobalArgs)> {
    let matches = commands::new().get_matches();

    let verbosity = matches.get_one::<u8>("verbosity").copied().unwrap_or(0);
    let format = matches
        .get_one::<String>("log-format")
        .map_or(LogFormat::Text, |value| LogFormat::parse(value));

    telemetry::init(Some(telemetry::level_from_verbosity(verbosity)), format)?;

    let globals = globals(&matches)?;
    let action = handler(&matches)?;

    Ok((action, globals))
}
