use std::path::PathBuf;
use std::time::Duration;

use campus_core::pagination::DEFAULT_PAGE_SIZE;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Console configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend base URL without a trailing slash.
    pub api_url: String,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Rows per list page (default: `17`).
    pub page_size: usize,
    /// Where the bearer token is persisted. `None` keeps it in memory.
    pub token_path: Option<PathBuf>,
    /// Directory certificate downloads are written to (default: `.`).
    pub download_dir: PathBuf,
}

impl ConsoleConfig {
    /// Configuration with defaults for everything except the backend URL.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            request_timeout_secs: 30,
            page_size: DEFAULT_PAGE_SIZE,
            token_path: None,
            download_dir: PathBuf::from("."),
        }
    }

    /// Load configuration from environment variables, reading `.env` first
    /// when present.
    ///
    /// | Env Var                       | Default          |
    /// |-------------------------------|------------------|
    /// | `CAMPUS_API_URL`              | required         |
    /// | `CAMPUS_REQUEST_TIMEOUT_SECS` | `30`             |
    /// | `CAMPUS_PAGE_SIZE`            | `17`             |
    /// | `CAMPUS_TOKEN_PATH`           | unset (memory)   |
    /// | `CAMPUS_DOWNLOAD_DIR`         | `.`              |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("CAMPUS_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("CAMPUS_API_URL"))?;
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "CAMPUS_API_URL",
                reason: format!("'{api_url}' is not an http(s) URL"),
            });
        }

        let mut config = Self::new(api_url);

        if let Some(raw) = lookup("CAMPUS_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = parse_positive("CAMPUS_REQUEST_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = lookup("CAMPUS_PAGE_SIZE") {
            config.page_size = parse_positive("CAMPUS_PAGE_SIZE", &raw)?;
        }
        config.token_path = lookup("CAMPUS_TOKEN_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        if let Some(dir) = lookup("CAMPUS_DOWNLOAD_DIR").filter(|s| !s.trim().is_empty()) {
            config.download_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_positive<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let value: T = raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })?;
    if value <= T::default() {
        return Err(ConfigError::Invalid {
            var,
            reason: "must be greater than zero".into(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = ConsoleConfig::from_lookup(lookup(&[("CAMPUS_API_URL", "http://api.local/")])).unwrap();
        assert_eq!(config.api_url, "http://api.local");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.page_size, 17);
        assert_eq!(config.token_path, None);
        assert_eq!(config.download_dir, PathBuf::from("."));
    }

    #[test]
    fn overrides_are_read() {
        let config = ConsoleConfig::from_lookup(lookup(&[
            ("CAMPUS_API_URL", "https://api.college.edu"),
            ("CAMPUS_REQUEST_TIMEOUT_SECS", "5"),
            ("CAMPUS_PAGE_SIZE", "25"),
            ("CAMPUS_TOKEN_PATH", "/tmp/campus-token"),
            ("CAMPUS_DOWNLOAD_DIR", "/tmp/downloads"),
        ]))
        .unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.token_path, Some(PathBuf::from("/tmp/campus-token")));
        assert_eq!(config.download_dir, PathBuf::from("/tmp/downloads"));
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = ConsoleConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_matches!(err, ConfigError::Missing("CAMPUS_API_URL"));
    }

    #[test]
    fn bad_values_are_errors() {
        let err = ConsoleConfig::from_lookup(lookup(&[("CAMPUS_API_URL", "ftp://x")])).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "CAMPUS_API_URL", .. });

        let err = ConsoleConfig::from_lookup(lookup(&[
            ("CAMPUS_API_URL", "http://x"),
            ("CAMPUS_PAGE_SIZE", "0"),
        ]))
        .unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "CAMPUS_PAGE_SIZE", .. });

        let err = ConsoleConfig::from_lookup(lookup(&[
            ("CAMPUS_API_URL", "http://x"),
            ("CAMPUS_REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "CAMPUS_REQUEST_TIMEOUT_SECS", .. });
    }
}
