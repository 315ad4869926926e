use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub database_max_connections: u32,
    /// PostgreSQL only. `None` leaves the URL's `sslmode` in charge.
    pub database_ssl: Option<bool>,

    pub api_prefix: String,

    // Rate limiting, 0 disables it
    pub rate_api_per_min: u32,

    // Logging
    pub log_dir: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "0.0.0.0:5000".to_string(),
            database_url: "sqlite://hrms.db".to_string(),
            database_max_connections: 5,
            database_ssl: None,
            api_prefix: "/api".to_string(),
            rate_api_per_min: 1000,
            log_dir: "logs".to_string(),
            log_level: "info".to_string(),
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a valid number, got {raw:?}")),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key/value source; `from_env` uses the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let port: u16 = parse_var(&lookup, "PORT", 5000)?;
        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| format!("0.0.0.0:{port}"));

        let database_ssl = match lookup("DATABASE_SSL").as_deref().map(str::trim) {
            None | Some("") => None,
            Some("false") | Some("0") => Some(false),
            Some(_) => Some(true),
        };

        Ok(Self {
            server_addr,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_var(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,
            database_ssl,
            api_prefix: lookup("API_PREFIX").unwrap_or(defaults.api_prefix),
            rate_api_per_min: parse_var(&lookup, "RATE_API_PER_MIN", defaults.rate_api_per_min)?,
            log_dir: lookup("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(move |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_addr, "0.0.0.0:5000");
        assert_eq!(config.database_url, "sqlite://hrms.db");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.database_ssl, None);
        assert_eq!(config.rate_api_per_min, 1000);
    }

    #[test]
    fn port_is_used_without_server_addr() {
        let config = config_from(&[("PORT", "8080")]).unwrap();
        assert_eq!(config.server_addr, "0.0.0.0:8080");

        let config = config_from(&[("PORT", "8080"), ("SERVER_ADDR", "127.0.0.1:9000")]).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:9000");
    }

    #[test]
    fn database_ssl_flag() {
        assert_eq!(
            config_from(&[("DATABASE_SSL", "false")]).unwrap().database_ssl,
            Some(false)
        );
        assert_eq!(
            config_from(&[("DATABASE_SSL", "true")]).unwrap().database_ssl,
            Some(true)
        );
    }

    #[test]
    fn bad_numbers_are_errors() {
        let err = config_from(&[("RATE_API_PER_MIN", "lots")]).unwrap_err();
        assert!(err.to_string().contains("RATE_API_PER_MIN"));
    }
}
