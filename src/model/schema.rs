//! Schemas.

use serde_json::Value;

use crate::collection::{Collection, Keyed};
use crate::error::CollectionError;
use crate::kind::{EntityKind, FunctionKind};
use crate::model::db::DbObject;
use crate::model::{Entity, Function, Type};

/// A namespace: owns its entities, types and functions.
#[derive(Debug)]
pub struct Schema {
    pub(crate) oid: u32,
    pub(crate) name: String,
    pub(crate) comment: Option<String>,
    pub(crate) comment_data: Option<Value>,
    /// All relations, in catalog order. Relation names share one namespace
    /// in PostgreSQL, so a single keyed collection serves every kind.
    pub(crate) entities: Collection<Entity>,
    /// Types including entity-backed composites.
    pub(crate) types: Collection<Type>,
    /// Keyed by signature; overloads share a name.
    pub(crate) functions: Collection<Function>,
}

impl Schema {
    pub fn oid(&self) -> u32 {
        self.oid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn comment_data(&self) -> Option<&Value> {
        self.comment_data.as_ref()
    }

    /// Every relation in the schema, whatever the kind.
    pub fn entities(&self) -> &Collection<Entity> {
        &self.entities
    }

    /// All types, including the composite types backing tables.
    pub fn types_including_entities(&self) -> &Collection<Type> {
        &self.types
    }

    /// Types without the entity-backed composites.
    pub fn types_excluding_entities(&self) -> impl Iterator<Item = &Type> {
        self.types.iter().filter(|t| !t.is_entity_backed())
    }

    pub fn functions(&self) -> &Collection<Function> {
        &self.functions
    }

    pub fn tables(&self) -> impl Iterator<Item = &Entity> {
        self.entities_of(EntityKind::Table)
    }

    pub fn views(&self) -> impl Iterator<Item = &Entity> {
        self.entities_of(EntityKind::View)
    }

    pub fn materialized_views(&self) -> impl Iterator<Item = &Entity> {
        self.entities_of(EntityKind::MaterializedView)
    }

    pub fn sequences(&self) -> impl Iterator<Item = &Entity> {
        self.entities_of(EntityKind::Sequence)
    }

    fn entities_of(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.kind() == kind)
    }

    pub fn normal_functions(&self) -> impl Iterator<Item = &Function> {
        self.functions_of(FunctionKind::Normal)
    }

    pub fn procedures(&self) -> impl Iterator<Item = &Function> {
        self.functions_of(FunctionKind::Procedure)
    }

    pub fn aggregate_functions(&self) -> impl Iterator<Item = &Function> {
        self.functions_of(FunctionKind::Aggregate)
    }

    pub fn window_functions(&self) -> impl Iterator<Item = &Function> {
        self.functions_of(FunctionKind::Window)
    }

    fn functions_of(&self, kind: FunctionKind) -> impl Iterator<Item = &Function> {
        self.functions.iter().filter(move |f| f.kind() == kind)
    }

    /// A table by name, when the name resolves to a table.
    pub fn table(&self, name: &str) -> Option<&Entity> {
        self.entities.get_maybe(name).filter(|e| e.kind() == EntityKind::Table)
    }

    /// Resolves a one- or two-segment dotted path within this schema:
    /// `"account"` yields the entity (or type, or function) of that name,
    /// `"account.id"` descends into its columns.
    pub fn get(&self, path: &str) -> Result<DbObject<'_>, CollectionError> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };

        let object = if let Some(entity) = self.entities.get_maybe(head) {
            DbObject::Entity(entity)
        } else if let Some(ty) = self.types.get_maybe(head) {
            DbObject::Type(ty)
        } else if let Some(function) = self.functions.get_maybe(head) {
            DbObject::Function(function)
        } else {
            return Err(CollectionError::NotFound { key: path.to_string() });
        };

        match (object, rest) {
            (object, None) => Ok(object),
            (DbObject::Entity(entity), Some(rest)) => {
                entity.columns().get(rest).map(DbObject::Column)
            }
            (DbObject::Type(ty), Some(rest)) => match ty.kind() {
                crate::TypeKind::Composite { columns, .. } => {
                    columns.get(rest).map(DbObject::Column)
                }
                _ => Err(CollectionError::NotFound { key: path.to_string() }),
            },
            (_, Some(_)) => Err(CollectionError::NotFound { key: path.to_string() }),
        }
    }
}

impl Keyed for Schema {
    fn key_name(&self) -> &str {
        &self.name
    }

    fn key_oid(&self) -> Option<u32> {
        Some(self.oid)
    }
}
