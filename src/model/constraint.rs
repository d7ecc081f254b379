//! Constraints: primary key, unique, check, exclusion and foreign key.

use serde_json::Value;

use crate::collection::Keyed;
use crate::kind::{MatchType, ReferentialAction};
use crate::model::{IndexRef, ObjectRef};

/// A table (or domain, for checks) constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub(crate) name: String,
    pub(crate) comment: Option<String>,
    pub(crate) comment_data: Option<Value>,
    pub(crate) kind: ConstraintKind,
}

/// Variant payload of a [`Constraint`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintKind {
    /// Columns delegate to the backing index.
    PrimaryKey { index: IndexRef },
    Unique { index: IndexRef },
    Check {
        expression: String,
        /// Set when the check belongs to a domain rather than a table.
        domain: Option<ObjectRef>,
    },
    Exclusion { index: IndexRef },
    ForeignKey(ForeignKey),
}

impl Constraint {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn comment_data(&self) -> Option<&Value> {
        self.comment_data.as_ref()
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    /// The backing index for primary key, unique and exclusion constraints.
    pub fn index(&self) -> Option<&IndexRef> {
        match &self.kind {
            ConstraintKind::PrimaryKey { index }
            | ConstraintKind::Unique { index }
            | ConstraintKind::Exclusion { index } => Some(index),
            _ => None,
        }
    }

    pub fn as_foreign_key(&self) -> Option<&ForeignKey> {
        match &self.kind {
            ConstraintKind::ForeignKey(fk) => Some(fk),
            _ => None,
        }
    }
}

impl Keyed for Constraint {
    fn key_name(&self) -> &str {
        &self.name
    }
}

/// A foreign key.
///
/// Source columns are resolved on the owning table in catalog order; the
/// referenced columns come from the referenced index. Both lists always have
/// the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub(crate) name: String,
    pub(crate) table: ObjectRef,
    pub(crate) columns: Vec<String>,
    pub(crate) referenced_table: ObjectRef,
    pub(crate) referenced_index: IndexRef,
    pub(crate) referenced_columns: Vec<String>,
    pub(crate) on_update: ReferentialAction,
    pub(crate) on_delete: ReferentialAction,
    pub(crate) match_type: MatchType,
}

impl ForeignKey {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owning (source) table.
    pub fn table(&self) -> &ObjectRef {
        &self.table
    }

    /// Source column names, in constraint order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Derived from the referenced index's table.
    pub fn referenced_table(&self) -> &ObjectRef {
        &self.referenced_table
    }

    pub fn referenced_index(&self) -> &IndexRef {
        &self.referenced_index
    }

    /// Referenced column names, position-matched with [`ForeignKey::columns`].
    pub fn referenced_columns(&self) -> &[String] {
        &self.referenced_columns
    }

    pub fn on_update(&self) -> ReferentialAction {
        self.on_update
    }

    pub fn on_delete(&self) -> ReferentialAction {
        self.on_delete
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }
}
