//! Public entrypoints: connect, run the catalog queries, assemble.
//!
//! The nine catalog queries are issued sequentially in assembler phase
//! order against a read-consistent server. When this module creates the
//! client it also owns it: the connection closes when the executor drops,
//! on success and failure alike. A caller-supplied client is never closed.

use may_postgres::Client;
use tracing::debug;

use crate::assemble::assemble;
use crate::config::{Options, SchemaFilter};
use crate::connection::connect;
use crate::error::StructureError;
use crate::executor::{MayPostgresExecutor, StructureExecutor};
use crate::model::Db;
use crate::rows::{
    bind_rows, ColumnRow, ConstraintRow, EntityRow, FunctionRow, IndexRow, QueryResults,
    SchemaRow, TriggerRow,
};
use crate::sql::{self, CatalogQuery};

/// Introspects the database reachable through the given options and
/// returns the assembled graph. The connection is created from the options
/// (explicit config, connection string, or environment) and closed before
/// returning.
///
/// # Errors
///
/// Configuration errors surface before any query is issued; connection,
/// query and assembly errors are propagated after the connection is
/// cleaned up.
pub fn introspect(options: Options) -> Result<Db, StructureError> {
    let connection = options.resolve_connection()?;
    let client = connect(&connection.to_connection_string())?;
    let executor = MayPostgresExecutor::new(client);
    build(&executor, options)
}

/// Like [`introspect`], but hands the open client back alongside the graph
/// instead of closing it. This is the `keep_connection` path.
///
/// # Errors
///
/// As [`introspect`]; on error the connection is closed.
pub fn introspect_keep(options: Options) -> Result<(Db, Client), StructureError> {
    let connection = options.resolve_connection()?;
    let client = connect(&connection.to_connection_string())?;
    let executor = MayPostgresExecutor::new(client);
    let db = build(&executor, options)?;
    Ok((db, executor.into_client()))
}

/// Introspects through a caller-owned client. Ownership stays with the
/// caller; the client is never closed here.
///
/// # Errors
///
/// Query and assembly errors are propagated unchanged.
pub fn introspect_client(client: &Client, options: Options) -> Result<Db, StructureError> {
    build(client, options)
}

fn build<E: StructureExecutor>(executor: &E, options: Options) -> Result<Db, StructureError> {
    let config = options.config;

    let row = executor.query_one("SELECT current_setting('server_version')", &[])?;
    let server_version: String = row.try_get(0)?;
    let tier = sql::version_tier(&server_version);
    debug!(server_version = %server_version, tier, "introspecting");

    let name = match &config.name {
        Some(name) => name.clone(),
        None => {
            let row = executor.query_one("SELECT current_database()", &[])?;
            row.try_get(0)?
        }
    };

    // Schema discovery, then the phase queries in assembly order.
    let filter = SchemaFilter::from_config(&config);
    let schema_sql = sql::text(tier, CatalogQuery::Schema);
    let schemas: Vec<SchemaRow> =
        bind_rows(&executor.query_all(schema_sql, &[&filter.include, &filter.exclude])?)?;

    let system_include = vec!["pg_catalog".to_string()];
    let system_exclude: Vec<String> = Vec::new();
    let system_schemas: Vec<SchemaRow> =
        bind_rows(&executor.query_all(schema_sql, &[&system_include, &system_exclude])?)?;

    let user_oids: Vec<u32> = schemas.iter().map(|s| s.oid).collect();
    // Types come from system schemas too: user objects routinely reference
    // pg_catalog types.
    let mut type_oids = user_oids.clone();
    type_oids.extend(system_schemas.iter().map(|s| s.oid));

    let types = bind_rows(&executor.query_all(sql::text(tier, CatalogQuery::Type), &[&type_oids])?)?;
    let entities: Vec<EntityRow> =
        bind_rows(&executor.query_all(sql::text(tier, CatalogQuery::Entity), &[&user_oids])?)?;
    let columns: Vec<ColumnRow> =
        bind_rows(&executor.query_all(sql::text(tier, CatalogQuery::Column), &[&user_oids])?)?;
    let indexes: Vec<IndexRow> =
        bind_rows(&executor.query_all(sql::text(tier, CatalogQuery::Index), &[&user_oids])?)?;
    let constraints: Vec<ConstraintRow> =
        bind_rows(&executor.query_all(sql::text(tier, CatalogQuery::Constraint), &[&user_oids])?)?;
    let functions: Vec<FunctionRow> =
        bind_rows(&executor.query_all(sql::text(tier, CatalogQuery::Function), &[&user_oids])?)?;
    let triggers: Vec<TriggerRow> =
        bind_rows(&executor.query_all(sql::text(tier, CatalogQuery::Trigger), &[&user_oids])?)?;

    let results = QueryResults {
        schemas,
        system_schemas,
        types,
        entities,
        columns,
        indexes,
        constraints,
        functions,
        triggers,
    };
    assemble(name, server_version, config, results)
}
