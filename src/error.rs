//! Error types for introspection, assembly and lookup.
//!
//! Each failure domain has its own enum (`ConfigError`, `ConnectionError`,
//! `CollectionError`) and everything converges into [`StructureError`] at the
//! public entrypoints.

use std::fmt;

use may_postgres::Error as PostgresError;

/// Configuration errors, raised before any query is issued.
#[derive(Debug)]
pub enum ConfigError {
    /// Environment or file based configuration could not be loaded.
    Environment(config::ConfigError),
    /// No usable connection source (config object, connection string or
    /// environment) could be resolved.
    MissingConnection(String),
    /// A custom relation name function cannot be represented in a snapshot.
    UnserializableNameFunction,
    /// An unknown relation name function was requested by name.
    UnknownNameFunction(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Environment(e) => write!(f, "Configuration error: {e}"),
            ConfigError::MissingConnection(s) => {
                write!(f, "No connection source available: {s}")
            }
            ConfigError::UnserializableNameFunction => write!(
                f,
                "Custom relation name functions cannot be serialized; \
                 use a builtin strategy or re-inject the function on deserialize"
            ),
            ConfigError::UnknownNameFunction(name) => {
                write!(f, "Unknown relation name function: {name}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Environment(err)
    }
}

/// Connection string validation and driver connection errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// Invalid connection string format.
    InvalidConnectionString(String),
    /// Network/authentication error from `may_postgres`.
    PostgresError(PostgresError),
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::InvalidConnectionString(s) => {
                write!(f, "Invalid connection string: {s}")
            }
            ConnectionError::PostgresError(e) => write!(f, "PostgreSQL error: {e}"),
        }
    }
}

impl std::error::Error for ConnectionError {}

impl From<PostgresError> for ConnectionError {
    fn from(err: PostgresError) -> Self {
        ConnectionError::PostgresError(err)
    }
}

/// Lookup failures on an indexed [`Collection`](crate::Collection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// No element with the given key on the chosen index.
    NotFound { key: String },
    /// An element with the same key already exists on one of the indexes.
    Duplicate { index: &'static str, key: String },
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::NotFound { key } => write!(f, "Not found: {key}"),
            CollectionError::Duplicate { index, key } => {
                write!(f, "Duplicate {index} key: {key}")
            }
        }
    }
}

impl std::error::Error for CollectionError {}

/// Top level error type returned by the public entrypoints.
#[derive(Debug)]
pub enum StructureError {
    /// Missing or contradictory options, unresolved environment.
    Config(ConfigError),
    /// Connection establishment failed.
    Connection(ConnectionError),
    /// A catalog query failed.
    Query(PostgresError),
    /// A mandatory reference did not resolve during assembly.
    Integrity { object: &'static str, oid: u32 },
    /// A graph collection rejected an element during assembly.
    Collection(CollectionError),
    /// Snapshot serialization or deserialization failed.
    Serde(serde_json::Error),
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::Config(e) => write!(f, "{e}"),
            StructureError::Connection(e) => write!(f, "{e}"),
            StructureError::Query(e) => write!(f, "Catalog query error: {e}"),
            StructureError::Integrity { object, oid } => {
                write!(f, "Catalog integrity error: {object} reference {oid} not found")
            }
            StructureError::Collection(e) => write!(f, "Catalog integrity error: {e}"),
            StructureError::Serde(e) => write!(f, "Snapshot error: {e}"),
        }
    }
}

impl std::error::Error for StructureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StructureError::Config(e) => Some(e),
            StructureError::Connection(e) => Some(e),
            StructureError::Query(e) => Some(e),
            StructureError::Collection(e) => Some(e),
            StructureError::Serde(e) => Some(e),
            StructureError::Integrity { .. } => None,
        }
    }
}

impl From<ConfigError> for StructureError {
    fn from(err: ConfigError) -> Self {
        StructureError::Config(err)
    }
}

impl From<ConnectionError> for StructureError {
    fn from(err: ConnectionError) -> Self {
        StructureError::Connection(err)
    }
}

impl From<PostgresError> for StructureError {
    fn from(err: PostgresError) -> Self {
        StructureError::Query(err)
    }
}

impl From<CollectionError> for StructureError {
    fn from(err: CollectionError) -> Self {
        StructureError::Collection(err)
    }
}

impl From<serde_json::Error> for StructureError {
    fn from(err: serde_json::Error) -> Self {
        StructureError::Serde(err)
    }
}
