//! Typed catalog rows.
//!
//! Each catalog query binds into one of these structs through [`FromRow`].
//! The structs are plain data: together they form the [`QueryResults`]
//! snapshot that assembly is a pure function of, and that the serializer
//! persists.

use may_postgres::Row;
use serde::{Deserialize, Serialize};

/// Binds a driver row into a typed value.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error>;
}

/// Row of the schema discovery query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRow {
    pub oid: u32,
    pub name: String,
    pub comment: Option<String>,
}

impl FromRow for SchemaRow {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(SchemaRow {
            oid: row.try_get("oid")?,
            name: row.try_get("name")?,
            comment: row.try_get("comment")?,
        })
    }
}

/// Row of the type query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRow {
    pub oid: u32,
    /// `pg_type.typrelid`; zero for types without a backing relation.
    pub class_oid: u32,
    pub schema_oid: u32,
    pub name: String,
    /// `pg_type.typtype` letter.
    pub kind: String,
    /// Domain nullability.
    pub not_null: bool,
    /// Underlying type of a domain.
    pub base_type_oid: Option<u32>,
    /// Subtype of a range type.
    pub subtype_oid: Option<u32>,
    /// Backing range of a multirange type.
    pub range_type_oid: Option<u32>,
    /// Enum labels in sort order.
    pub enum_labels: Option<Vec<String>>,
    pub comment: Option<String>,
}

impl FromRow for TypeRow {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(TypeRow {
            oid: row.try_get("oid")?,
            class_oid: row.try_get("class_oid")?,
            schema_oid: row.try_get("schema_oid")?,
            name: row.try_get("name")?,
            kind: row.try_get("kind")?,
            not_null: row.try_get("not_null")?,
            base_type_oid: row.try_get("base_type_oid")?,
            subtype_oid: row.try_get("subtype_oid")?,
            range_type_oid: row.try_get("range_type_oid")?,
            enum_labels: row.try_get("enum_labels")?,
            comment: row.try_get("comment")?,
        })
    }
}

/// Row of the entity query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRow {
    pub oid: u32,
    pub schema_oid: u32,
    pub name: String,
    /// `pg_class.relkind` letter.
    pub kind: String,
    pub comment: Option<String>,
    // Sequence attributes; null for other kinds.
    pub start_value: Option<i64>,
    pub minimum_value: Option<i64>,
    pub maximum_value: Option<i64>,
    pub increment: Option<i64>,
    pub cache_size: Option<i64>,
    pub cycle: Option<bool>,
}

impl FromRow for EntityRow {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(EntityRow {
            oid: row.try_get("oid")?,
            schema_oid: row.try_get("schema_oid")?,
            name: row.try_get("name")?,
            kind: row.try_get("kind")?,
            comment: row.try_get("comment")?,
            start_value: row.try_get("start_value")?,
            minimum_value: row.try_get("minimum_value")?,
            maximum_value: row.try_get("maximum_value")?,
            increment: row.try_get("increment")?,
            cache_size: row.try_get("cache_size")?,
            cycle: row.try_get("cycle")?,
        })
    }
}

/// Row of the column query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRow {
    /// `pg_attribute.attrelid`: the owning relation or composite class.
    pub class_oid: u32,
    /// `relkind` of the owner; `c` selects a composite-type parent.
    pub parent_kind: String,
    pub name: String,
    pub attribute_number: i16,
    pub type_oid: u32,
    pub not_null: bool,
    pub default: Option<String>,
    pub length: Option<i32>,
    pub precision: Option<i32>,
    pub scale: Option<i32>,
    /// `pg_attribute.attidentity` letter, absent before v10.
    pub identity: Option<String>,
    /// Expression of a generated column, absent before v12.
    pub generated_expression: Option<String>,
    pub comment: Option<String>,
}

impl FromRow for ColumnRow {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(ColumnRow {
            class_oid: row.try_get("class_oid")?,
            parent_kind: row.try_get("parent_kind")?,
            name: row.try_get("name")?,
            attribute_number: row.try_get("attribute_number")?,
            type_oid: row.try_get("type_oid")?,
            not_null: row.try_get("not_null")?,
            default: row.try_get("default")?,
            length: row.try_get("length")?,
            precision: row.try_get("precision")?,
            scale: row.try_get("scale")?,
            identity: row.try_get("identity")?,
            generated_expression: row.try_get("generated_expression")?,
            comment: row.try_get("comment")?,
        })
    }
}

/// Row of the index query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRow {
    pub oid: u32,
    pub name: String,
    pub table_oid: u32,
    pub is_unique: bool,
    pub is_primary: bool,
    pub is_exclusion: bool,
    /// `pg_index.indkey` positions; zero marks an expression position.
    pub column_positions: Vec<i32>,
    /// Expression texts, consumed in order for each zero position.
    pub expressions: Option<Vec<String>>,
    /// Predicate of a partial index.
    pub predicate: Option<String>,
    pub comment: Option<String>,
}

impl FromRow for IndexRow {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(IndexRow {
            oid: row.try_get("oid")?,
            name: row.try_get("name")?,
            table_oid: row.try_get("table_oid")?,
            is_unique: row.try_get("is_unique")?,
            is_primary: row.try_get("is_primary")?,
            is_exclusion: row.try_get("is_exclusion")?,
            column_positions: row.try_get("column_positions")?,
            expressions: row.try_get("expressions")?,
            predicate: row.try_get("predicate")?,
            comment: row.try_get("comment")?,
        })
    }
}

/// Row of the constraint query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintRow {
    pub oid: u32,
    pub name: String,
    /// `pg_constraint.contype` letter.
    pub kind: String,
    /// Owning table; null for domain checks.
    pub table_oid: Option<u32>,
    /// Owning domain for domain checks.
    pub type_oid: Option<u32>,
    /// `pg_constraint.conindid`: the backing index for PK/unique/exclusion,
    /// the referenced index for foreign keys.
    pub index_oid: Option<u32>,
    /// Source column attribute numbers, in constraint order.
    pub columns: Option<Vec<i32>>,
    /// Check expression text.
    pub expression: Option<String>,
    pub on_update: Option<String>,
    pub on_delete: Option<String>,
    pub match_type: Option<String>,
    pub comment: Option<String>,
}

impl FromRow for ConstraintRow {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(ConstraintRow {
            oid: row.try_get("oid")?,
            name: row.try_get("name")?,
            kind: row.try_get("kind")?,
            table_oid: row.try_get("table_oid")?,
            type_oid: row.try_get("type_oid")?,
            index_oid: row.try_get("index_oid")?,
            columns: row.try_get("columns")?,
            expression: row.try_get("expression")?,
            on_update: row.try_get("on_update")?,
            on_delete: row.try_get("on_delete")?,
            match_type: row.try_get("match_type")?,
            comment: row.try_get("comment")?,
        })
    }
}

/// Row of the function query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionRow {
    pub oid: u32,
    pub schema_oid: u32,
    pub name: String,
    /// `pg_proc.prokind` letter (synthesized from `proisagg`/`proiswindow`
    /// before v11).
    pub kind: String,
    pub volatility: String,
    pub is_strict: bool,
    pub parallel_safety: String,
    pub returns_set: bool,
    pub return_type_oid: Option<u32>,
    pub language: String,
    pub argument_type_oids: Vec<u32>,
    pub argument_names: Option<Vec<String>>,
    /// Argument mode letters; empty means all `i`.
    pub argument_modes: Option<Vec<String>>,
    pub comment: Option<String>,
}

impl FromRow for FunctionRow {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(FunctionRow {
            oid: row.try_get("oid")?,
            schema_oid: row.try_get("schema_oid")?,
            name: row.try_get("name")?,
            kind: row.try_get("kind")?,
            volatility: row.try_get("volatility")?,
            is_strict: row.try_get("is_strict")?,
            parallel_safety: row.try_get("parallel_safety")?,
            returns_set: row.try_get("returns_set")?,
            return_type_oid: row.try_get("return_type_oid")?,
            language: row.try_get("language")?,
            argument_type_oids: row.try_get("argument_type_oids")?,
            argument_names: row.try_get("argument_names")?,
            argument_modes: row.try_get("argument_modes")?,
            comment: row.try_get("comment")?,
        })
    }
}

/// Row of the trigger query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRow {
    pub oid: u32,
    pub name: String,
    pub table_oid: u32,
    pub function_oid: u32,
    /// Raw `pg_trigger.tgtype` bits.
    pub tgtype: i16,
    /// `WHEN` condition text, if any.
    pub condition: Option<String>,
    pub comment: Option<String>,
}

impl FromRow for TriggerRow {
    fn from_row(row: &Row) -> Result<Self, may_postgres::Error> {
        Ok(TriggerRow {
            oid: row.try_get("oid")?,
            name: row.try_get("name")?,
            table_oid: row.try_get("table_oid")?,
            function_oid: row.try_get("function_oid")?,
            tgtype: row.try_get("tgtype")?,
            condition: row.try_get("condition")?,
            comment: row.try_get("comment")?,
        })
    }
}

/// Raw result sets of the catalog queries, in assembler phase order.
///
/// Assembly is a pure function of this value plus the configuration, which
/// is what makes snapshots replayable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResults {
    pub schemas: Vec<SchemaRow>,
    pub system_schemas: Vec<SchemaRow>,
    pub types: Vec<TypeRow>,
    pub entities: Vec<EntityRow>,
    pub columns: Vec<ColumnRow>,
    pub indexes: Vec<IndexRow>,
    pub constraints: Vec<ConstraintRow>,
    pub functions: Vec<FunctionRow>,
    pub triggers: Vec<TriggerRow>,
}

/// Binds every row of a result set.
pub(crate) fn bind_rows<T: FromRow>(rows: &[Row]) -> Result<Vec<T>, may_postgres::Error> {
    rows.iter().map(T::from_row).collect()
}
