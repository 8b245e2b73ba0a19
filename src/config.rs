use std::{str::FromStr, time::Duration};

use crate::error::config::ConfigError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE_PORT: u16 = 5432;

/// Process configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration reading each variable through `lookup`.
    ///
    /// `DATABASE_URL` takes precedence over the individual `DATABASE_*` parts.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        let url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => {
                let host = require(&lookup, "DATABASE_HOST")?;
                let name = require(&lookup, "DATABASE_NAME")?;
                let user = require(&lookup, "DATABASE_USER")?;
                let password = require(&lookup, "DATABASE_PASSWORD")?;
                let db_port: u16 = parse_or(&lookup, "DATABASE_PORT", DEFAULT_DATABASE_PORT)?;
                format!("postgres://{user}:{password}@{host}:{db_port}/{name}")
            }
        };

        let database = DatabaseConfig {
            url,
            min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", 1)?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            acquire_timeout: Duration::from_millis(parse_or(
                &lookup,
                "DATABASE_ACQUIRE_TIMEOUT_MS",
                1000,
            )?),
            idle_timeout: Duration::from_millis(1000 * 30),
            max_lifetime: Duration::from_millis(1000 * 60 * 30),
        };

        Ok(Self { port, database })
    }

    pub fn listen_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn require<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    lookup(name).ok_or(ConfigError::Missing(name))
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup_in(vars: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let vars: HashMap<&'static str, String> =
            vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn compose_database_url_from_parts() {
        let config = Config::from_lookup(lookup_in(&[
            ("DATABASE_HOST", "db"),
            ("DATABASE_NAME", "gobank"),
            ("DATABASE_USER", "postgres"),
            ("DATABASE_PASSWORD", "root"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database.url, "postgres://postgres:root@db:5432/gobank");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.listen_address(), "0.0.0.0:8080");
    }

    #[test]
    fn database_url_takes_precedence() {
        let config = Config::from_lookup(lookup_in(&[
            ("PORT", "3000"),
            ("DATABASE_URL", "postgres://u:p@h/d"),
            ("DATABASE_HOST", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.database.url, "postgres://u:p@h/d");
    }

    #[test]
    fn missing_database_part() {
        let err = Config::from_lookup(lookup_in(&[("DATABASE_HOST", "db")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_NAME"));
    }

    #[test]
    fn invalid_port() {
        let err = Config::from_lookup(lookup_in(&[
            ("PORT", "http"),
            ("DATABASE_URL", "postgres://u:p@h/d"),
        ]))
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "http".into()
            }
        );
    }
}
