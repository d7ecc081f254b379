//! Types: base, enum, domain, composite, range, multirange and pseudo.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::collection::{Collection, Keyed};
use crate::model::{Column, Constraint, ObjectRef, SchemaRef};

/// A PostgreSQL type.
///
/// Every table also has a corresponding composite type; those carry the
/// backing entity's OID in [`TypeKind::Composite`], which is how
/// "types including entities" differs from "types excluding entities" on
/// [`Schema`](crate::Schema).
#[derive(Debug, Clone)]
pub struct Type {
    pub(crate) oid: u32,
    /// `pg_type.typrelid`; zero for types without a backing relation.
    pub(crate) class_oid: u32,
    pub(crate) name: String,
    pub(crate) schema: SchemaRef,
    pub(crate) internal_name: Option<String>,
    pub(crate) comment: Option<String>,
    pub(crate) comment_data: Option<Value>,
    pub(crate) kind: TypeKind,
}

/// Variant payload of a [`Type`].
#[derive(Debug, Clone)]
pub enum TypeKind {
    Base,
    Enum {
        /// Labels in sort order.
        labels: Vec<String>,
    },
    Domain {
        /// The underlying type.
        sql_type: ObjectRef,
        not_null: bool,
        /// Check constraints attached to the domain.
        checks: Vec<Constraint>,
    },
    Composite {
        columns: Collection<Column>,
        /// The backing table's OID for table-backed composites.
        entity_oid: Option<u32>,
    },
    Range {
        subtype: Option<ObjectRef>,
    },
    MultiRange {
        range: Option<ObjectRef>,
    },
    Pseudo,
}

impl Type {
    pub fn oid(&self) -> u32 {
        self.oid
    }

    pub fn class_oid(&self) -> u32 {
        self.class_oid
    }

    /// SQL-standard name when the type is a known builtin (`integer` for
    /// `int4`), the catalog name otherwise.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The catalog's internal name when it differs from [`Type::name`].
    pub fn internal_name(&self) -> Option<&str> {
        self.internal_name.as_deref()
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema.name, self.name)
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn comment_data(&self) -> Option<&Value> {
        self.comment_data.as_ref()
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Builtin alias record for base types that have one.
    pub fn alias(&self) -> Option<&'static BuiltinAlias> {
        self.internal_name.as_deref().and_then(builtin_alias)
    }

    /// Whether this is the composite type backing a table.
    pub fn is_entity_backed(&self) -> bool {
        matches!(self.kind, TypeKind::Composite { entity_oid: Some(_), .. })
    }
}

impl Keyed for Type {
    fn key_name(&self) -> &str {
        &self.name
    }

    fn key_oid(&self) -> Option<u32> {
        Some(self.oid)
    }
}

/// Alias record for a builtin base type: the SQL-standard spelling of an
/// internal catalog name plus its type-modifier capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinAlias {
    /// Catalog name, e.g. `int4`.
    pub internal_name: &'static str,
    /// SQL-standard name, e.g. `integer`.
    pub name: &'static str,
    /// Common short form, e.g. `int`.
    pub short_name: Option<&'static str>,
    pub has_length: bool,
    pub has_precision: bool,
    pub has_scale: bool,
}

const fn alias(
    internal_name: &'static str,
    name: &'static str,
    short_name: Option<&'static str>,
    has_length: bool,
    has_precision: bool,
    has_scale: bool,
) -> BuiltinAlias {
    BuiltinAlias { internal_name, name, short_name, has_length, has_precision, has_scale }
}

static BUILTIN_ALIASES: Lazy<HashMap<&'static str, BuiltinAlias>> = Lazy::new(|| {
    [
        alias("int2", "smallint", None, false, false, false),
        alias("int4", "integer", Some("int"), false, false, false),
        alias("int8", "bigint", None, false, false, false),
        alias("float4", "real", None, false, false, false),
        alias("float8", "double precision", None, false, false, false),
        alias("numeric", "numeric", Some("decimal"), false, true, true),
        alias("bool", "boolean", None, false, false, false),
        alias("varchar", "character varying", Some("varchar"), true, false, false),
        alias("bpchar", "character", Some("char"), true, false, false),
        alias("bit", "bit", None, true, false, false),
        alias("varbit", "bit varying", None, true, false, false),
        alias("timestamp", "timestamp without time zone", Some("timestamp"), false, true, false),
        alias("timestamptz", "timestamp with time zone", Some("timestamptz"), false, true, false),
        alias("time", "time without time zone", Some("time"), false, true, false),
        alias("timetz", "time with time zone", Some("timetz"), false, true, false),
        alias("interval", "interval", None, false, true, false),
    ]
    .into_iter()
    .map(|a| (a.internal_name, a))
    .collect()
});

/// Looks up the alias record for an internal builtin type name.
pub fn builtin_alias(internal_name: &str) -> Option<&'static BuiltinAlias> {
    BUILTIN_ALIASES.get(internal_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_alias_lookup() {
        let a = builtin_alias("int4").unwrap();
        assert_eq!(a.name, "integer");
        assert_eq!(a.short_name, Some("int"));
        assert!(!a.has_length);

        let a = builtin_alias("varchar").unwrap();
        assert_eq!(a.name, "character varying");
        assert!(a.has_length);

        let a = builtin_alias("numeric").unwrap();
        assert!(a.has_precision);
        assert!(a.has_scale);

        assert!(builtin_alias("my_custom_type").is_none());
    }
}
