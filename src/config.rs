//! Process configuration read once from the environment.

use std::env;

/// Default base URL for the DevLake instance.
pub const DEFAULT_DEVLAKE_URL: &str = "http://localhost:4000/";

/// Default base URL for the Backstage instance.
pub const DEFAULT_BACKSTAGE_URL: &str = "http://localhost:7007/";

/// Runtime configuration for one sync run.
///
/// Built once at startup and passed by reference into the service context;
/// nothing below the entrypoint reads the environment directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the DevLake instance, with trailing slash.
    pub devlake_url: String,
    /// Base URL of the Backstage instance, with trailing slash.
    pub backstage_url: String,
    /// When set, skip fetching the existing team table and rebuild it from
    /// scratch (header row only).
    pub replace_teams: bool,
}

impl Config {
    /// Builds the configuration from process environment variables
    /// (`DEVLAKE_URL`, `BACKSTAGE_URL`, `REPLACE_DEVLAKE_TEAMS`).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary lookup function.
    ///
    /// `REPLACE_DEVLAKE_TEAMS` enables replace mode when present with any
    /// value.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            devlake_url: lookup("DEVLAKE_URL").unwrap_or_else(|| DEFAULT_DEVLAKE_URL.to_string()),
            backstage_url: lookup("BACKSTAGE_URL")
                .unwrap_or_else(|| DEFAULT_BACKSTAGE_URL.to_string()),
            replace_teams: lookup("REPLACE_DEVLAKE_TEAMS").is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, DEFAULT_BACKSTAGE_URL, DEFAULT_DEVLAKE_URL};

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.devlake_url, DEFAULT_DEVLAKE_URL);
        assert_eq!(config.backstage_url, DEFAULT_BACKSTAGE_URL);
        assert!(!config.replace_teams);
    }

    #[test]
    fn explicit_urls_override_defaults() {
        let config = Config::from_lookup(|key| match key {
            "DEVLAKE_URL" => Some("http://devlake.internal/".to_string()),
            "BACKSTAGE_URL" => Some("http://backstage.internal/".to_string()),
            _ => None,
        });
        assert_eq!(config.devlake_url, "http://devlake.internal/");
        assert_eq!(config.backstage_url, "http://backstage.internal/");
    }

    #[test]
    fn replace_flag_counts_as_set_for_any_value() {
        let config =
            Config::from_lookup(|key| (key == "REPLACE_DEVLAKE_TEAMS").then_some(String::new()));
        assert!(config.replace_teams);
    }
}
