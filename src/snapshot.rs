//! Snapshot serialization.
//!
//! A snapshot is `{ name, server_version, config, query_results }` — the
//! raw catalog rows plus top-level configuration, nothing derived. Assembly
//! is pure over those inputs, so deserialization simply replays it. Builtin
//! naming strategies round-trip by name; custom functions cannot be
//! represented and must be re-injected through [`deserialize_with`].

use serde::{Deserialize, Serialize};

use crate::assemble::assemble;
use crate::config::Config;
use crate::error::{ConfigError, StructureError};
use crate::model::Db;
use crate::relation::RelationNameFunction;
use crate::rows::QueryResults;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    name: &'a str,
    server_version: &'a str,
    config: &'a Config,
    query_results: &'a QueryResults,
}

#[derive(Deserialize)]
struct Snapshot {
    name: String,
    server_version: String,
    config: Config,
    query_results: QueryResults,
}

impl Db {
    /// Serializes the snapshot this graph was assembled from.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error when a custom relation name
    /// function is installed, and with a serde error if JSON encoding
    /// fails.
    pub fn serialize(&self) -> Result<String, StructureError> {
        if self.config.relation_name_function.is_custom() {
            return Err(ConfigError::UnserializableNameFunction.into());
        }
        let snapshot = SnapshotRef {
            name: &self.name,
            server_version: &self.server_version,
            config: &self.config,
            query_results: &self.query_results,
        };
        Ok(serde_json::to_string(&snapshot)?)
    }

    /// The raw query results this graph was assembled from.
    pub fn query_results(&self) -> &QueryResults {
        &self.query_results
    }
}

/// Reconstructs a [`Db`] from a serialized snapshot by replaying assembly.
///
/// # Errors
///
/// Returns a serde error for malformed input and assembly errors unchanged.
pub fn deserialize(json: &str) -> Result<Db, StructureError> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    assemble(snapshot.name, snapshot.server_version, snapshot.config, snapshot.query_results)
}

/// Like [`deserialize`], but re-injects a naming function first — the path
/// for snapshots of databases that were configured with a custom one.
pub fn deserialize_with(
    json: &str,
    relation_name_function: RelationNameFunction,
) -> Result<Db, StructureError> {
    let mut snapshot: Snapshot = serde_json::from_str(json)?;
    snapshot.config.relation_name_function = relation_name_function;
    assemble(snapshot.name, snapshot.server_version, snapshot.config, snapshot.query_results)
}
