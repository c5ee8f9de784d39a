//! Runtime configuration for the portal client. Values come from CLI arguments
//! with environment fallbacks; blank overrides are ignored so a stray empty
//! variable never clears a default. Configuration values are public; do not
//! store secrets here.

use anyhow::{anyhow, Result};
use std::{path::PathBuf, time::Duration};
use url::Url;

/// Default request timeout applied by the HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default pause between the success message and navigation.
pub const DEFAULT_NAVIGATION_DELAY: Duration = Duration::from_millis(150);

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: Url,
    pub request_timeout: Duration,
    pub navigation_delay: Duration,
    pub session_file: PathBuf,
    pub user_agent: String,
}

/// Optional values layered on top of the defaults.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub request_timeout_secs: Option<u64>,
    pub navigation_delay_ms: Option<u64>,
    pub session_file: Option<String>,
}

impl AppConfig {
    /// Builds a config for `api_base_url` with default timings and session path.
    ///
    /// # Errors
    /// Returns an error if the URL cannot be parsed or is not http(s).
    pub fn new(api_base_url: &str) -> Result<Self> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            request_timeout: DEFAULT_TIMEOUT,
            navigation_delay: DEFAULT_NAVIGATION_DELAY,
            session_file: default_session_file(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        })
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(secs) = overrides.request_timeout_secs.filter(|secs| *secs > 0) {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = overrides.navigation_delay_ms {
            self.navigation_delay = Duration::from_millis(ms);
        }
        if let Some(path) = overrides
            .session_file
            .as_deref()
            .and_then(normalize_value)
        {
            self.session_file = PathBuf::from(path);
        }
    }
}

fn parse_base_url(value: &str) -> Result<Url> {
    let trimmed = normalize_value(value).ok_or_else(|| anyhow!("API base URL is empty"))?;
    let url = Url::parse(&trimmed)?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(anyhow!("unsupported API URL scheme: {scheme}")),
    }

    if url.host().is_none() {
        return Err(anyhow!("API base URL has no host"));
    }

    Ok(url)
}

fn default_session_file() -> PathBuf {
    std::env::var_os("HOME")
        .map_or_else(std::env::temp_dir, PathBuf::from)
        .join(".clinic-portal")
        .join("session")
}

pub(crate) fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_value_trims_and_rejects_empty() {
        assert_eq!(normalize_value(""), None);
        assert_eq!(normalize_value("   "), None);
        assert_eq!(
            normalize_value("  https://clinic.test "),
            Some("https://clinic.test".to_string())
        );
    }

    #[test]
    fn new_rejects_bad_urls() {
        assert!(AppConfig::new("").is_err());
        assert!(AppConfig::new("ftp://clinic.test").is_err());
        assert!(AppConfig::new("not a url").is_err());
        assert!(AppConfig::new("http://127.0.0.1:8000").is_ok());
    }

    #[test]
    fn new_uses_defaults() -> Result<()> {
        let config = AppConfig::new("https://clinic.test")?;
        assert_eq!(config.request_timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.navigation_delay, DEFAULT_NAVIGATION_DELAY);
        assert!(config.session_file.ends_with(".clinic-portal/session"));
        Ok(())
    }

    #[test]
    fn apply_overrides_ignores_empty_values() -> Result<()> {
        let mut config = AppConfig::new("https://clinic.test")?;
        let default_session = config.session_file.clone();

        config.apply_overrides(ConfigOverrides {
            request_timeout_secs: Some(0),
            navigation_delay_ms: None,
            session_file: Some("  ".to_string()),
        });

        assert_eq!(config.request_timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.navigation_delay, DEFAULT_NAVIGATION_DELAY);
        assert_eq!(config.session_file, default_session);
        Ok(())
    }

    #[test]
    fn apply_overrides_overwrites_when_present() -> Result<()> {
        let mut config = AppConfig::new("https://clinic.test")?;

        config.apply_overrides(ConfigOverrides {
            request_timeout_secs: Some(3),
            navigation_delay_ms: Some(0),
            session_file: Some("/tmp/portal-session".to_string()),
        });

        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.navigation_delay, Duration::ZERO);
        assert_eq!(config.session_file, PathBuf::from("/tmp/portal-session"));
        Ok(())
    }
}
