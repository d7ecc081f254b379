//! The catalog object model.
//!
//! Thin value objects over their catalog rows plus resolved references.
//! Everything is created during assembly and never mutated afterwards; the
//! public surface is read-only accessors. Ownership follows the catalog
//! hierarchy (db → schema → entity → column/index/constraint/trigger) and
//! cross-links are lightweight references resolved through [`Db`] by OID.

mod column;
mod constraint;
mod db;
mod entity;
mod function;
mod index;
mod schema;
mod trigger;
mod types;

pub use column::{Column, ColumnParent};
pub use constraint::{Constraint, ConstraintKind, ForeignKey};
pub use db::{Db, DbObject};
pub use entity::{Entity, SequenceAttributes};
pub use function::{Function, FunctionArgument};
pub use index::{Index, IndexElement};
pub use schema::Schema;
pub use trigger::Trigger;
pub use types::{builtin_alias, BuiltinAlias, Type, TypeKind};

pub(crate) use db::{EntityLoc, FunctionLoc, IndexLoc, SchemaLoc, TypeLoc};

use std::fmt;

use serde::{Deserialize, Serialize};

/// A resolved reference to a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRef {
    pub(crate) oid: u32,
    pub(crate) name: String,
}

impl SchemaRef {
    pub fn oid(&self) -> u32 {
        self.oid
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A resolved reference to a schema-qualified object (entity, type,
/// function). The full object is reachable through the [`Db`] OID accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub(crate) oid: u32,
    pub(crate) schema: String,
    pub(crate) name: String,
}

impl ObjectRef {
    pub fn oid(&self) -> u32 {
        self.oid
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `schema.name`
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

/// A resolved reference to an index. Indexes live on their table; the full
/// object is reachable through [`Db::index_by_oid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRef {
    pub(crate) oid: u32,
    pub(crate) name: String,
}

impl IndexRef {
    pub fn oid(&self) -> u32 {
        self.oid
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Parses the JSON block a comment may carry after the configured token.
///
/// `COMMENT ON TABLE account IS 'User accounts. pg-structure{"hidden":true}'`
/// yields `Some({"hidden":true})` for token `pg-structure`. Trailing text
/// after the JSON block is allowed; any parse failure yields `None`, never
/// an error.
pub(crate) fn parse_comment_data(
    comment: Option<&str>,
    token: &str,
) -> Option<serde_json::Value> {
    let comment = comment?;
    let start = comment.find(token)? + token.len();
    let rest = comment[start..].trim_start();
    serde_json::Deserializer::from_str(rest)
        .into_iter::<serde_json::Value>()
        .next()?
        .ok()
}
