//! Database execution abstraction.
//!
//! The catalog reader only needs two operations from a driver: run a query
//! returning rows and run a query returning a single row. Keeping that
//! behind [`StructureExecutor`] means the assembler never sees a concrete
//! client, and borrowed and owned clients share one code path.

use may_postgres::types::ToSql;
use may_postgres::{Client, Error as PostgresError, Row};

/// Executes catalog queries against a database.
pub trait StructureExecutor {
    /// Executes a query and returns all rows.
    ///
    /// # Errors
    ///
    /// Returns the driver error unchanged.
    fn query_all(&self, query: &str, params: &[&dyn ToSql]) -> Result<Vec<Row>, PostgresError>;

    /// Executes a query expected to return exactly one row.
    ///
    /// # Errors
    ///
    /// Returns the driver error unchanged, including when zero or multiple
    /// rows come back.
    fn query_one(&self, query: &str, params: &[&dyn ToSql]) -> Result<Row, PostgresError>;
}

impl StructureExecutor for Client {
    fn query_all(&self, query: &str, params: &[&dyn ToSql]) -> Result<Vec<Row>, PostgresError> {
        self.query(query, params)
    }

    fn query_one(&self, query: &str, params: &[&dyn ToSql]) -> Result<Row, PostgresError> {
        self.query_one(query, params)
    }
}

/// Owning executor around a `may_postgres::Client`.
///
/// Used when the crate creates the connection itself; dropping the executor
/// closes the connection.
pub struct MayPostgresExecutor {
    client: Client,
}

impl MayPostgresExecutor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Consumes the executor and returns the underlying client.
    pub fn into_client(self) -> Client {
        self.client
    }
}

impl StructureExecutor for MayPostgresExecutor {
    fn query_all(&self, query: &str, params: &[&dyn ToSql]) -> Result<Vec<Row>, PostgresError> {
        self.client.query(query, params)
    }

    fn query_one(&self, query: &str, params: &[&dyn ToSql]) -> Result<Row, PostgresError> {
        self.client.query_one(query, params)
    }
}
