//! Introspection options and connection configuration.
//!
//! [`Options`] is the single options record accepted by the entrypoints.
//! The subset that affects assembly is frozen into [`Config`], stored on
//! [`Db`](crate::Db) and captured by snapshots. Connection settings can be
//! given explicitly, as a connection string, or loaded from prefixed
//! environment variables (`DB_HOST`, `DB_PORT`, ...).

use config::{Config as ConfigLoader, Environment};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::relation::RelationNameFunction;

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "DB";

/// Default comment-data token.
pub const DEFAULT_COMMENT_DATA_TOKEN: &str = "pg-structure";

/// Connection settings for creating a client.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    /// Takes precedence over the discrete fields when set.
    #[serde(default)]
    pub connection_string: Option<String>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_user() -> String {
    "postgres".to_string()
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: None,
            database: None,
            connection_string: None,
        }
    }
}

impl ConnectionConfig {
    /// Loads connection settings from environment variables with the given
    /// prefix: `<PREFIX>_HOST`, `<PREFIX>_PORT`, `<PREFIX>_USER`,
    /// `<PREFIX>_PASSWORD`, `<PREFIX>_DATABASE`,
    /// `<PREFIX>_CONNECTION_STRING`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Environment` if loading or deserialization
    /// fails.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let loaded = ConfigLoader::builder()
            .add_source(Environment::with_prefix(prefix))
            .build()?
            .try_deserialize::<ConnectionConfig>()?;
        Ok(loaded)
    }

    /// Renders a `may_postgres` connection string, preferring an explicit
    /// `connection_string` over the discrete fields.
    pub fn to_connection_string(&self) -> String {
        if let Some(s) = &self.connection_string {
            return s.clone();
        }
        let mut parts = vec![
            format!("host={}", self.host),
            format!("port={}", self.port),
            format!("user={}", self.user),
        ];
        if let Some(password) = &self.password {
            parts.push(format!("password={password}"));
        }
        if let Some(database) = &self.database {
            parts.push(format!("dbname={database}"));
        }
        parts.join(" ")
    }
}

/// The assembly-relevant configuration, frozen onto [`Db`](crate::Db) and
/// captured by snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Overrides the database name reported by the server.
    #[serde(default)]
    pub name: Option<String>,
    /// Token marking a JSON block inside object comments.
    #[serde(default = "default_comment_data_token")]
    pub comment_data_token: String,
    /// SQL `LIKE` patterns for schemas to load; all non-system schemas when
    /// empty.
    #[serde(default)]
    pub include_schemas: Vec<String>,
    /// SQL `NOT LIKE` patterns for schemas to skip.
    #[serde(default)]
    pub exclude_schemas: Vec<String>,
    /// Adds `pg_%` and `information_schema` to the include list.
    #[serde(default)]
    pub include_system_schemas: bool,
    /// Separator splitting alias lists embedded in constraint names.
    #[serde(default = "default_alias_separator")]
    pub foreign_key_alias_separator: String,
    /// Swaps source/target in composed aliases.
    #[serde(default)]
    pub foreign_key_alias_target_first: bool,
    /// Relation naming strategy; builtins round-trip by name.
    #[serde(default)]
    pub relation_name_function: RelationNameFunction,
}

fn default_comment_data_token() -> String {
    DEFAULT_COMMENT_DATA_TOKEN.to_string()
}

fn default_alias_separator() -> String {
    ",".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            name: None,
            comment_data_token: default_comment_data_token(),
            include_schemas: Vec::new(),
            exclude_schemas: Vec::new(),
            include_system_schemas: false,
            foreign_key_alias_separator: default_alias_separator(),
            foreign_key_alias_target_first: false,
            relation_name_function: RelationNameFunction::default(),
        }
    }
}

/// The full options record accepted by the entrypoints.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Explicit connection settings. When absent, along with
    /// `connection_string`, the environment is consulted through
    /// `env_prefix`.
    pub connection: Option<ConnectionConfig>,
    /// Connection string; shorthand for a [`ConnectionConfig`] carrying only
    /// one.
    pub connection_string: Option<String>,
    /// Environment variable prefix used when no explicit connection source
    /// is given.
    pub env_prefix: Option<String>,
    /// Hand the open client back instead of closing it after assembly. Only
    /// meaningful through [`introspect_keep`](crate::introspect_keep).
    pub keep_connection: bool,
    /// Assembly configuration.
    pub config: Config,
}

impl Options {
    /// Resolves the connection source, in precedence order: explicit
    /// config, connection string, environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when the environment cannot be loaded.
    pub(crate) fn resolve_connection(&self) -> Result<ConnectionConfig, ConfigError> {
        if let Some(connection) = &self.connection {
            return Ok(connection.clone());
        }
        if let Some(s) = &self.connection_string {
            return Ok(ConnectionConfig {
                connection_string: Some(s.clone()),
                ..ConnectionConfig::default()
            });
        }
        let prefix = self.env_prefix.as_deref().unwrap_or(DEFAULT_ENV_PREFIX);
        ConnectionConfig::from_env(prefix)
    }
}

/// Schema filter patterns derived from a [`Config`], ready to feed the
/// discovery query as `LIKE` / `NOT LIKE` parameter arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SchemaFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl SchemaFilter {
    pub fn from_config(config: &Config) -> SchemaFilter {
        let mut include = config.include_schemas.clone();
        if include.is_empty() {
            include.push("%".to_string());
        }
        if config.include_system_schemas {
            include.push("pg\\_%".to_string());
            include.push("information_schema".to_string());
        }

        let mut exclude = config.exclude_schemas.clone();
        if !config.include_system_schemas {
            exclude.push("pg\\_%".to_string());
            exclude.push("information_schema".to_string());
        }
        // pg_catalog is always loaded as a system schema, never as a user
        // schema. TOAST and other backends' temp schemas are never loaded.
        exclude.push("pg_catalog".to_string());
        exclude.push("pg\\_toast%".to_string());
        exclude.push("pg\\_temp\\_%".to_string());
        exclude.push("pg\\_toast\\_temp\\_%".to_string());

        SchemaFilter { include, exclude }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_string_from_fields() {
        let config = ConnectionConfig {
            host: "db.example.com".into(),
            port: 5433,
            user: "app".into(),
            password: Some("secret".into()),
            database: Some("orders".into()),
            connection_string: None,
        };
        assert_eq!(
            config.to_connection_string(),
            "host=db.example.com port=5433 user=app password=secret dbname=orders"
        );
    }

    #[test]
    fn test_explicit_connection_string_wins() {
        let config = ConnectionConfig {
            connection_string: Some("postgresql://u:p@h:5432/d".into()),
            ..ConnectionConfig::default()
        };
        assert_eq!(config.to_connection_string(), "postgresql://u:p@h:5432/d");
    }

    #[test]
    fn test_schema_filter_defaults() {
        let filter = SchemaFilter::from_config(&Config::default());
        assert_eq!(filter.include, vec!["%"]);
        assert!(filter.exclude.contains(&"pg\\_%".to_string()));
        assert!(filter.exclude.contains(&"information_schema".to_string()));
        assert!(filter.exclude.contains(&"pg\\_toast%".to_string()));
    }

    #[test]
    fn test_schema_filter_system_schemas_join_include() {
        let config = Config { include_system_schemas: true, ..Config::default() };
        let filter = SchemaFilter::from_config(&config);
        assert!(filter.include.contains(&"pg\\_%".to_string()));
        assert!(!filter.exclude.contains(&"pg\\_%".to_string()));
        // pg_catalog, TOAST and temp schemas stay excluded regardless.
        assert!(filter.exclude.contains(&"pg_catalog".to_string()));
        assert!(filter.exclude.contains(&"pg\\_toast%".to_string()));
        assert!(filter.exclude.contains(&"pg\\_temp\\_%".to_string()));
    }

    #[test]
    fn test_schema_filter_patterns_pass_through() {
        let config = Config {
            include_schemas: vec!["pub%".into()],
            exclude_schemas: vec!["pub_test".into()],
            ..Config::default()
        };
        let filter = SchemaFilter::from_config(&config);
        assert_eq!(filter.include, vec!["pub%"]);
        assert_eq!(filter.exclude[0], "pub_test");
    }

    #[test]
    fn test_options_resolve_connection_precedence() {
        let options = Options {
            connection: Some(ConnectionConfig {
                host: "explicit".into(),
                ..ConnectionConfig::default()
            }),
            connection_string: Some("postgresql://ignored@h/d".into()),
            ..Options::default()
        };
        assert_eq!(options.resolve_connection().unwrap().host, "explicit");

        let options = Options {
            connection_string: Some("postgresql://u@h/d".into()),
            ..Options::default()
        };
        assert_eq!(
            options.resolve_connection().unwrap().to_connection_string(),
            "postgresql://u@h/d"
        );
    }
}
