//! The root of the object graph.

use std::collections::HashMap;

use crate::collection::Collection;
use crate::config::Config;
use crate::error::CollectionError;
use crate::model::{Column, Entity, Function, Index, Schema, Type};
use crate::rows::QueryResults;

/// Location of a schema within the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SchemaLoc {
    pub system: bool,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TypeLoc {
    pub schema: SchemaLoc,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EntityLoc {
    pub schema: SchemaLoc,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IndexLoc {
    pub entity: EntityLoc,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FunctionLoc {
    pub schema: SchemaLoc,
    pub index: usize,
}

/// A node returned by dotted-path navigation.
#[derive(Debug, Clone, Copy)]
pub enum DbObject<'a> {
    Schema(&'a Schema),
    Entity(&'a Entity),
    Type(&'a Type),
    Function(&'a Function),
    Column(&'a Column),
}

impl<'a> DbObject<'a> {
    pub fn as_schema(&self) -> Option<&'a Schema> {
        match *self {
            DbObject::Schema(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&'a Entity> {
        match *self {
            DbObject::Entity(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&'a Type> {
        match *self {
            DbObject::Type(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&'a Function> {
        match *self {
            DbObject::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_column(&self) -> Option<&'a Column> {
        match *self {
            DbObject::Column(c) => Some(c),
            _ => None,
        }
    }
}

/// The assembled database graph.
///
/// Owns the user schemas, the system schemas (`pg_catalog`), the frozen
/// configuration and the raw query-result snapshot the graph was assembled
/// from. OID lookup tables are frozen at the end of assembly.
#[derive(Debug)]
pub struct Db {
    pub(crate) name: String,
    pub(crate) server_version: String,
    pub(crate) config: Config,
    pub(crate) schemas: Collection<Schema>,
    pub(crate) system_schemas: Collection<Schema>,
    pub(crate) query_results: QueryResults,
    pub(crate) type_locs: HashMap<u32, TypeLoc>,
    /// Composite types addressed by their backing class OID.
    pub(crate) type_class_locs: HashMap<u32, TypeLoc>,
    pub(crate) entity_locs: HashMap<u32, EntityLoc>,
    pub(crate) index_locs: HashMap<u32, IndexLoc>,
    pub(crate) function_locs: HashMap<u32, FunctionLoc>,
}

impl Db {
    /// Database name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Server version string the snapshot was taken from.
    pub fn server_version(&self) -> &str {
        &self.server_version
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// User schemas, after filtering.
    pub fn schemas(&self) -> &Collection<Schema> {
        &self.schemas
    }

    /// System schemas (`pg_catalog`).
    pub fn system_schemas(&self) -> &Collection<Schema> {
        &self.system_schemas
    }

    /// A user or system schema by name, user schemas first.
    pub fn schema_maybe(&self, name: &str) -> Option<&Schema> {
        self.schemas.get_maybe(name).or_else(|| self.system_schemas.get_maybe(name))
    }

    /// Every table across all user schemas, in schema then catalog order.
    pub fn tables(&self) -> impl Iterator<Item = &Entity> {
        self.schemas.iter().flat_map(|schema| schema.tables())
    }

    /// Resolves a dotted path: `"public"` yields a schema,
    /// `"public.account"` an entity (or type or function) and
    /// `"public.account.id"` a column.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] when any segment fails to
    /// resolve.
    pub fn get(&self, path: &str) -> Result<DbObject<'_>, CollectionError> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let schema = self
            .schema_maybe(head)
            .ok_or_else(|| CollectionError::NotFound { key: path.to_string() })?;
        match rest {
            None => Ok(DbObject::Schema(schema)),
            Some(rest) => schema.get(rest),
        }
    }

    pub fn get_maybe(&self, path: &str) -> Option<DbObject<'_>> {
        self.get(path).ok()
    }

    pub(crate) fn schema_at(&self, loc: SchemaLoc) -> Option<&Schema> {
        let collection = if loc.system { &self.system_schemas } else { &self.schemas };
        collection.at(loc.index)
    }

    pub(crate) fn schema_at_mut(&mut self, loc: SchemaLoc) -> Option<&mut Schema> {
        let collection =
            if loc.system { &mut self.system_schemas } else { &mut self.schemas };
        collection.at_mut(loc.index)
    }

    pub(crate) fn entity_at(&self, loc: EntityLoc) -> Option<&Entity> {
        self.schema_at(loc.schema)?.entities.at(loc.index)
    }

    pub(crate) fn entity_at_mut(&mut self, loc: EntityLoc) -> Option<&mut Entity> {
        self.schema_at_mut(loc.schema)?.entities.at_mut(loc.index)
    }

    pub(crate) fn type_at(&self, loc: TypeLoc) -> Option<&Type> {
        self.schema_at(loc.schema)?.types.at(loc.index)
    }

    pub(crate) fn type_at_mut(&mut self, loc: TypeLoc) -> Option<&mut Type> {
        self.schema_at_mut(loc.schema)?.types.at_mut(loc.index)
    }

    /// A type anywhere in the graph by OID.
    pub fn type_by_oid(&self, oid: u32) -> Option<&Type> {
        self.type_at(*self.type_locs.get(&oid)?)
    }

    /// The composite type backed by the given class (relation) OID.
    pub fn type_by_class_oid(&self, class_oid: u32) -> Option<&Type> {
        self.type_at(*self.type_class_locs.get(&class_oid)?)
    }

    /// An entity anywhere in the graph by OID.
    pub fn entity_by_oid(&self, oid: u32) -> Option<&Entity> {
        self.entity_at(*self.entity_locs.get(&oid)?)
    }

    /// An index anywhere in the graph by OID.
    pub fn index_by_oid(&self, oid: u32) -> Option<&Index> {
        let loc = *self.index_locs.get(&oid)?;
        self.entity_at(loc.entity)?.indexes.at(loc.index)
    }

    /// A function anywhere in the graph by OID.
    pub fn function_by_oid(&self, oid: u32) -> Option<&Function> {
        let loc = *self.function_locs.get(&oid)?;
        self.schema_at(loc.schema)?.functions.at(loc.index)
    }
}
