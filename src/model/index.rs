//! Indexes.

use serde_json::Value;

use crate::collection::Keyed;
use crate::model::ObjectRef;

/// One position of an index: a plain column, or an expression for positions
/// the catalog records as attribute number zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexElement {
    Column { name: String, attribute_number: i16 },
    Expression(String),
}

impl IndexElement {
    /// Column name for plain-column positions.
    pub fn column_name(&self) -> Option<&str> {
        match self {
            IndexElement::Column { name, .. } => Some(name.as_str()),
            IndexElement::Expression(_) => None,
        }
    }
}

/// An index on a table or materialized view.
#[derive(Debug, Clone)]
pub struct Index {
    pub(crate) oid: u32,
    pub(crate) name: String,
    pub(crate) table: ObjectRef,
    pub(crate) elements: Vec<IndexElement>,
    pub(crate) unique: bool,
    pub(crate) primary: bool,
    pub(crate) exclusion: bool,
    pub(crate) predicate: Option<String>,
    pub(crate) comment: Option<String>,
    pub(crate) comment_data: Option<Value>,
}

impl Index {
    pub fn oid(&self) -> u32 {
        self.oid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &ObjectRef {
        &self.table
    }

    /// Ordered columns and expressions, as declared.
    pub fn columns_and_expressions(&self) -> &[IndexElement] {
        &self.elements
    }

    /// Names of the plain-column positions, in index order.
    pub fn column_names(&self) -> Vec<&str> {
        self.elements.iter().filter_map(IndexElement::column_name).collect()
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary
    }

    pub fn is_exclusion(&self) -> bool {
        self.exclusion
    }

    /// Predicate of a partial index.
    pub fn partial_predicate(&self) -> Option<&str> {
        self.predicate.as_deref()
    }

    pub fn is_partial(&self) -> bool {
        self.predicate.is_some()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn comment_data(&self) -> Option<&Value> {
        self.comment_data.as_ref()
    }
}

impl Keyed for Index {
    fn key_name(&self) -> &str {
        &self.name
    }

    fn key_oid(&self) -> Option<u32> {
        Some(self.oid)
    }
}
