//! Connection configuration sourced from the environment.
//!
//! The configuration keys match the ones the POS services have always used
//! (`DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`, `DB_SSL`);
//! unset or unparseable values fall back to the hard-coded defaults.

use std::env;
use std::time::Duration;

use tokio_postgres::config::SslMode;

/// Database connection and pool settings.
#[derive(Clone, Debug)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    /// TLS toggle; maps to `sslmode=prefer` when set.
    pub ssl: bool,
    /// Maximum number of pooled connections.
    pub pool_size: usize,
    /// How long a checkout may wait for a free connection before failing.
    pub checkout_timeout: Option<Duration>,
    /// Server-side `statement_timeout` applied to every connection.
    pub statement_timeout: Option<Duration>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            dbname: "pos".to_string(),
            ssl: false,
            pool_size: 16,
            checkout_timeout: Some(Duration::from_secs(30)),
            statement_timeout: None,
        }
    }
}

impl DbConfig {
    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_string("DB_HOST", defaults.host),
            port: env_parse("DB_PORT", defaults.port),
            user: env_string("DB_USER", defaults.user),
            password: env_string("DB_PASSWORD", defaults.password),
            dbname: env_string("DB_NAME", defaults.dbname),
            ssl: env_flag("DB_SSL", defaults.ssl),
            pool_size: env_parse("DB_POOL_SIZE", defaults.pool_size),
            checkout_timeout: env_parse_opt("DB_CHECKOUT_TIMEOUT_MS")
                .map(Duration::from_millis)
                .or(defaults.checkout_timeout),
            statement_timeout: env_parse_opt("DB_STATEMENT_TIMEOUT_MS")
                .map(Duration::from_millis),
        }
    }

    /// Translate into a `tokio_postgres::Config` for the pool manager.
    pub fn to_pg_config(&self) -> tokio_postgres::Config {
        let mut cfg = tokio_postgres::Config::new();
        cfg.host(&self.host)
            .port(self.port)
            .user(&self.user)
            .password(&self.password)
            .dbname(&self.dbname)
            .ssl_mode(if self.ssl { SslMode::Prefer } else { SslMode::Disable });

        if let Some(timeout) = self.statement_timeout {
            cfg.options(&format!("-c statement_timeout={}", timeout.as_millis()));
        }

        cfg
    }
}

fn env_string(key: &str, default: String) -> String {
    match env::var(key) {
        Ok(v) if !v.is_empty() => v,
        _ => default,
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_parse_opt(key).unwrap_or(default)
}

fn env_parse_opt<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key).as_deref() {
        Ok("1") | Ok("true") | Ok("TRUE") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("FALSE") | Ok("no") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_fallbacks() {
        let cfg = DbConfig::default();
        assert_eq!(cfg.host, "localhost");
        assert_eq!(cfg.port, 5432);
        assert_eq!(cfg.dbname, "pos");
        assert!(!cfg.ssl);
        assert_eq!(cfg.pool_size, 16);
    }

    #[test]
    fn pg_config_carries_statement_timeout() {
        let cfg = DbConfig {
            statement_timeout: Some(Duration::from_millis(2500)),
            ..DbConfig::default()
        };
        let pg = cfg.to_pg_config();
        assert_eq!(pg.get_options(), Some("-c statement_timeout=2500"));
    }

    #[test]
    fn flag_parsing() {
        assert!(env_flag("TILLDB_TEST_FLAG_UNSET", true));
        assert!(!env_flag("TILLDB_TEST_FLAG_UNSET", false));
    }
}
