//! Entities: tables, views, materialized views and sequences.

use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::collection::{Collection, Keyed};
use crate::kind::EntityKind;
use crate::model::{Column, Constraint, Db, ForeignKey, Index, SchemaRef, Trigger};
use crate::relation::{self, ManyToMany, ManyToOne, OneToMany};

/// Sequence attributes, present on entities of kind
/// [`EntityKind::Sequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceAttributes {
    pub start_value: i64,
    pub minimum_value: i64,
    pub maximum_value: i64,
    pub increment: i64,
    pub cache_size: i64,
    pub cycle: bool,
}

/// A relation from `pg_class`.
///
/// All kinds own columns. Indexes, constraints and triggers are populated
/// only for the kinds the catalog records them for and stay empty
/// otherwise. Relations (`many_to_ones` and friends) are derived lazily on
/// first access and memoized.
#[derive(Debug)]
pub struct Entity {
    pub(crate) oid: u32,
    pub(crate) name: String,
    pub(crate) kind: EntityKind,
    pub(crate) schema: SchemaRef,
    pub(crate) comment: Option<String>,
    pub(crate) comment_data: Option<Value>,
    pub(crate) columns: Collection<Column>,
    pub(crate) indexes: Collection<Index>,
    pub(crate) constraints: Collection<Constraint>,
    pub(crate) triggers: Collection<Trigger>,
    /// Foreign keys on other tables that reference this one.
    pub(crate) foreign_keys_to_this: Vec<ForeignKey>,
    pub(crate) sequence: Option<SequenceAttributes>,
    pub(crate) m2o: OnceCell<Vec<ManyToOne>>,
    pub(crate) o2m: OnceCell<Vec<OneToMany>>,
    pub(crate) m2m: OnceCell<Vec<ManyToMany>>,
}

impl Entity {
    pub fn oid(&self) -> u32 {
        self.oid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// `schema.name`
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema.name, self.name)
    }

    /// A lightweight reference to this entity.
    pub fn object_ref(&self) -> crate::model::ObjectRef {
        crate::model::ObjectRef {
            oid: self.oid,
            schema: self.schema.name.clone(),
            name: self.name.clone(),
        }
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn comment_data(&self) -> Option<&Value> {
        self.comment_data.as_ref()
    }

    /// Columns in attribute-number order.
    pub fn columns(&self) -> &Collection<Column> {
        &self.columns
    }

    pub fn indexes(&self) -> &Collection<Index> {
        &self.indexes
    }

    pub fn constraints(&self) -> &Collection<Constraint> {
        &self.constraints
    }

    pub fn triggers(&self) -> &Collection<Trigger> {
        &self.triggers
    }

    /// Foreign keys owned by this table, in constraint order.
    pub fn foreign_keys(&self) -> Vec<&ForeignKey> {
        self.constraints.iter().filter_map(Constraint::as_foreign_key).collect()
    }

    /// Foreign keys on other tables pointing at this one, across all loaded
    /// schemas.
    pub fn foreign_keys_to_this(&self) -> &[ForeignKey] {
        &self.foreign_keys_to_this
    }

    /// The primary key constraint, if the table has one.
    pub fn primary_key(&self) -> Option<&Constraint> {
        self.constraints
            .iter()
            .find(|c| matches!(c.kind(), crate::ConstraintKind::PrimaryKey { .. }))
    }

    /// Sequence attributes for sequence entities.
    pub fn sequence(&self) -> Option<&SequenceAttributes> {
        self.sequence.as_ref()
    }

    /// Many-to-one relations: one per outgoing foreign key.
    pub fn many_to_ones(&self, db: &Db) -> &[ManyToOne] {
        self.m2o.get_or_init(|| relation::many_to_ones(db, self))
    }

    /// One-to-many relations: inverses of the foreign keys pointing here.
    pub fn one_to_manys(&self, db: &Db) -> &[OneToMany] {
        self.o2m.get_or_init(|| relation::one_to_manys(db, self))
    }

    /// Many-to-many relations through join tables.
    pub fn many_to_manys(&self, db: &Db) -> &[ManyToMany] {
        self.m2m.get_or_init(|| relation::many_to_manys(db, self))
    }

    /// Whether this table is an M2M join table: it has a primary key whose
    /// column set equals the union of the columns of two of its outgoing
    /// foreign keys.
    pub fn is_join_table(&self) -> bool {
        relation::is_join_table(self)
    }
}

impl Keyed for Entity {
    fn key_name(&self) -> &str {
        &self.name
    }

    fn key_oid(&self) -> Option<u32> {
        Some(self.oid)
    }
}
