use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 4 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("clinic-portal")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .short('u')
                .long("api-url")
                .help("Portal API base URL, example: https://clinic.example.com")
                .env("CLINIC_PORTAL_API_URL")
                .global(true),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Request timeout in seconds")
                .env("CLINIC_PORTAL_TIMEOUT_SECS")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("nav-delay")
                .long("nav-delay")
                .help("Milliseconds to keep the login message visible before navigating")
                .env("CLINIC_PORTAL_NAV_DELAY_MS")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("session-file")
                .long("session-file")
                .help("Where the session token is kept between runs")
                .env("CLINIC_PORTAL_SESSION_FILE")
                .global(true),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .help("Log output format")
                .env("CLINIC_PORTAL_LOG_FORMAT")
                .global(true)
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("CLINIC_PORTAL_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in and open the area for your role")
                .arg(
                    Arg::new("email")
                        .short('e')
                        .long("email")
                        .help("Account email")
                        .env("CLINIC_PORTAL_EMAIL")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .short('p')
                        .long("password")
                        .help("Account password")
                        .env("CLINIC_PORTAL_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(Command::new("staff-menu").about("Show the staff menu for the stored session"))
        .subcommand(Command::new("logout").about("End the session and forget the stored token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "clinic-portal");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some(env!("CARGO_PKG_DESCRIPTION").to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_login_args() {
        temp_env::with_vars(
            [
                ("CLINIC_PORTAL_PASSWORD", None::<&str>),
                ("CLINIC_PORTAL_EMAIL", None),
                ("CLINIC_PORTAL_API_URL", None),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "clinic-portal",
                    "--api-url",
                    "https://clinic.test",
                    "login",
                    "--email",
                    "nurse@clinic.test",
                    "--password",
                    "secret",
                ]);

                assert_eq!(
                    matches.get_one::<String>("api-url").map(String::as_str),
                    Some("https://clinic.test")
                );
                let login = matches.subcommand_matches("login");
                assert_eq!(
                    login
                        .and_then(|m| m.get_one::<String>("email"))
                        .map(String::as_str),
                    Some("nurse@clinic.test")
                );
                assert_eq!(
                    login
                        .and_then(|m| m.get_one::<String>("password"))
                        .map(String::as_str),
                    Some("secret")
                );
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("CLINIC_PORTAL_API_URL", Some("https://clinic.test")),
                ("CLINIC_PORTAL_TIMEOUT_SECS", Some("3")),
                ("CLINIC_PORTAL_NAV_DELAY_MS", Some("0")),
                ("CLINIC_PORTAL_SESSION_FILE", Some("/tmp/portal-session")),
                ("CLINIC_PORTAL_LOG_LEVEL", Some("info")),
                ("CLINIC_PORTAL_LOG_FORMAT", Some("json")),
            ],
            || {
                let matches = new().get_matches_from(vec!["clinic-portal", "staff-menu"]);
                assert_eq!(
                    matches.get_one::<String>("api-url").map(String::as_str),
                    Some("https://clinic.test")
                );
                assert_eq!(matches.get_one::<u64>("timeout").copied(), Some(3));
                assert_eq!(matches.get_one::<u64>("nav-delay").copied(), Some(0));
                assert_eq!(
                    matches.get_one::<String>("session-file").map(String::as_str),
                    Some("/tmp/portal-session")
                );
                assert_eq!(matches.get_one::<u8>("verbosity").copied(), Some(2));
                assert_eq!(
                    matches.get_one::<String>("log-format").map(String::as_str),
                    Some("json")
                );
                assert_eq!(matches.subcommand_name(), Some("staff-menu"));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("CLINIC_PORTAL_LOG_LEVEL", Some(level)),
                    ("CLINIC_PORTAL_API_URL", Some("https://clinic.test")),
                ],
                || {
                    let matches = new().get_matches_from(vec!["clinic-portal", "logout"]);
                    assert_eq!(
                        matches.get_one::<u8>("verbosity").copied(),
                        u8::try_from(index).ok()
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("CLINIC_PORTAL_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "clinic-portal".to_string(),
                    "--api-url".to_string(),
                    "https://clinic.test".to_string(),
                ];

                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }
                args.push("logout".to_string());

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        let result = new().try_get_matches_from(vec!["clinic-portal", "--api-url", "http://x"]);
        assert!(result.is_err());
    }
}
