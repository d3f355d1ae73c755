//! Server configuration, read from the environment at start-up.
//!
//! | variable               | default            |
//! |------------------------|--------------------|
//! | `TEMPLATES_HOST`       | `127.0.0.1`        |
//! | `TEMPLATES_PORT`       | `8080`             |
//! | `TEMPLATES_DB`         | `templates.sqlite` |
//! | `TEMPLATES_JSON_LIMIT` | `1048576` (bytes)  |

use log::warn;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Largest JSON request body accepted.
    pub json_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            db_path: PathBuf::from("templates.sqlite"),
            json_limit: 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("TEMPLATES_HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port: parse_or("TEMPLATES_PORT", lookup("TEMPLATES_PORT"), defaults.port),
            db_path: lookup("TEMPLATES_DB")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            json_limit: parse_or(
                "TEMPLATES_JSON_LIMIT",
                lookup("TEMPLATES_JSON_LIMIT"),
                defaults.json_limit,
            ),
        }
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_variables() {
        assert_eq!(config_from(&[]), AppConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("TEMPLATES_HOST", "0.0.0.0"),
            ("TEMPLATES_PORT", "9000"),
            ("TEMPLATES_DB", "/tmp/t.sqlite"),
        ]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.db_path, PathBuf::from("/tmp/t.sqlite"));
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = config_from(&[("TEMPLATES_PORT", "eighty"), ("TEMPLATES_JSON_LIMIT", "-1")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.json_limit, 1024 * 1024);
    }
}
