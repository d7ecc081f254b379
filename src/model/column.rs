//! Columns of entities and composite types.

use serde_json::Value;

use crate::collection::Keyed;
use crate::kind::IdentityKind;
use crate::model::ObjectRef;

/// Owner of a column: an entity or a free-standing composite type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnParent {
    Entity(ObjectRef),
    CompositeType(ObjectRef),
}

impl ColumnParent {
    pub fn object_ref(&self) -> &ObjectRef {
        match self {
            ColumnParent::Entity(r) | ColumnParent::CompositeType(r) => r,
        }
    }
}

/// A column, ordered by its attribute number within the parent.
#[derive(Debug, Clone)]
pub struct Column {
    pub(crate) name: String,
    pub(crate) attribute_number: i16,
    pub(crate) parent: ColumnParent,
    pub(crate) data_type: ObjectRef,
    pub(crate) not_null: bool,
    pub(crate) default: Option<String>,
    pub(crate) length: Option<i32>,
    pub(crate) precision: Option<i32>,
    pub(crate) scale: Option<i32>,
    pub(crate) identity: Option<IdentityKind>,
    pub(crate) generated_expression: Option<String>,
    pub(crate) comment: Option<String>,
    pub(crate) comment_data: Option<Value>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1-based catalog position; the stable key within the parent.
    pub fn attribute_number(&self) -> i16 {
        self.attribute_number
    }

    pub fn parent(&self) -> &ColumnParent {
        &self.parent
    }

    /// Reference to the column's data type; the full [`Type`](crate::Type)
    /// is reachable through [`Db::type_by_oid`](crate::Db::type_by_oid).
    pub fn data_type(&self) -> &ObjectRef {
        &self.data_type
    }

    pub fn not_null(&self) -> bool {
        self.not_null
    }

    /// Default expression as stored in the catalog, if any.
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Character maximum length for length-typed columns (`varchar(64)`).
    pub fn length(&self) -> Option<i32> {
        self.length
    }

    pub fn precision(&self) -> Option<i32> {
        self.precision
    }

    pub fn scale(&self) -> Option<i32> {
        self.scale
    }

    pub fn identity(&self) -> Option<IdentityKind> {
        self.identity
    }

    /// Expression of a generated (stored) column.
    pub fn generated_expression(&self) -> Option<&str> {
        self.generated_expression.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn comment_data(&self) -> Option<&Value> {
        self.comment_data.as_ref()
    }

    /// `schema.parent.column`
    pub fn full_name(&self) -> String {
        let parent = self.parent.object_ref();
        format!("{}.{}.{}", parent.schema, parent.name, self.name)
    }
}

impl Keyed for Column {
    fn key_name(&self) -> &str {
        &self.name
    }

    fn key_ordinal(&self) -> Option<i16> {
        Some(self.attribute_number)
    }
}
