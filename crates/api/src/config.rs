use anyhow::{bail, Context, Result};
use std::env;

use infra::db::{PgConfig, StoreBackend, StoreConfig};

pub const DEFAULT_PORT: u16 = 4005;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub port: u16,
    pub introspection: bool,
    pub max_query_depth: usize,
    pub max_query_complexity: usize,
    /// How many levels of `subgroups` a single query may resolve.
    pub subgroup_max_depth: usize,
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    /// In-memory store with the same limits `from_env` falls back to.
    fn default() -> Self {
        Self {
            store: StoreConfig {
                backend: StoreBackend::Memory,
            },
            port: DEFAULT_PORT,
            introspection: false,
            max_query_depth: 15,
            max_query_complexity: 200,
            subgroup_max_depth: 8,
            allowed_origins: default_origins(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let backend = match lookup("STORE_BACKEND")
            .unwrap_or_else(|| "postgres".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "postgres" => {
                let url = lookup("DATABASE_URL")
                    .or_else(|| lookup("MONGO_DB_CONNECTION_STRING"))
                    .filter(|url| !url.trim().is_empty())
                    .context("DATABASE_URL must be set")?;
                StoreBackend::Postgres(PgConfig {
                    url,
                    max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(30),
                    run_migrations: !lookup("SKIP_MIGRATIONS")
                        .map(|v| v.to_lowercase() == "true")
                        .unwrap_or(false),
                })
            }
            other => bail!("unknown STORE_BACKEND: {other}"),
        };

        let port = match lookup("PORT") {
            Some(port) => port.parse().context("PORT must be a valid port number")?,
            None => defaults.port,
        };

        Ok(Self {
            store: StoreConfig { backend },
            port,
            introspection: lookup("GQL_INTROSPECTION")
                .map(|v| v == "true")
                .unwrap_or(defaults.introspection),
            max_query_depth: lookup("GQL_MAX_DEPTH")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_query_depth),
            max_query_complexity: lookup("GQL_MAX_COMPLEXITY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_query_complexity),
            subgroup_max_depth: lookup("SUBGROUP_MAX_DEPTH")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.subgroup_max_depth),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.allowed_origins),
        })
    }
}

fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:3001".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn postgres_requires_connection_string() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        let err = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn legacy_connection_string_name_is_accepted() {
        let config = AppConfig::from_lookup(lookup_from(&[(
            "MONGO_DB_CONNECTION_STRING",
            "postgres://localhost/budget",
        )]))
        .unwrap();

        match config.store.backend {
            StoreBackend::Postgres(pg) => {
                assert_eq!(pg.url, "postgres://localhost/budget");
                assert_eq!(pg.max_connections, 30);
                assert!(pg.run_migrations);
            }
            StoreBackend::Memory => panic!("expected postgres backend"),
        }
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn memory_backend_with_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("PORT", "9000"),
            ("SUBGROUP_MAX_DEPTH", "3"),
            ("GQL_INTROSPECTION", "true"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ]))
        .unwrap();

        assert!(matches!(config.store.backend, StoreBackend::Memory));
        assert_eq!(config.port, 9000);
        assert_eq!(config.subgroup_max_depth, 3);
        assert!(config.introspection);
        assert_eq!(
            config.allowed_origins,
            ["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn invalid_port_and_backend_are_rejected() {
        assert!(AppConfig::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("PORT", "not-a-port"),
        ]))
        .is_err());

        assert!(AppConfig::from_lookup(lookup_from(&[("STORE_BACKEND", "mongo")])).is_err());
    }
}
