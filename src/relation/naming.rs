//! Relation naming strategies.
//!
//! Every derived relation gets a name from a naming function: one of the
//! builtins (`short`, `optimal`) selected by name, or a custom function
//! injected by the caller. Naming is pure: identical structural context
//! yields identical names.
//!
//! Constraint names may embed an alias list split on the configured
//! separator (`account_owner,owned_accounts` with the default `","`). The
//! first part aliases the foreign key's source side and the second its
//! target side, swapped when `foreign_key_alias_target_first` is set.

use std::fmt;
use std::sync::Arc;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::Config;
use crate::error::ConfigError;
use crate::model::{ForeignKey, ObjectRef};

/// Kind of a derived relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    ManyToOne,
    OneToMany,
    ManyToMany,
}

/// Structural context a naming function sees.
///
/// For many-to-many relations, `foreign_key` is the join table's constraint
/// toward the far side and `foreign_key_to_self` the one pointing back.
pub struct RelationContext<'a> {
    pub kind: RelationKind,
    pub source_table: &'a ObjectRef,
    pub target_table: &'a ObjectRef,
    pub join_table: Option<&'a ObjectRef>,
    pub foreign_key: &'a ForeignKey,
    pub foreign_key_to_self: Option<&'a ForeignKey>,
    pub config: &'a Config,
}

/// A relation naming strategy.
///
/// Builtins are serializable by name; a custom function is not, which is why
/// [`Db::serialize`](crate::Db::serialize) rejects snapshots of databases
/// configured with one. Re-inject custom functions through
/// [`deserialize_with`](crate::deserialize_with).
#[derive(Clone, Default)]
pub enum RelationNameFunction {
    /// Table- and alias-based names.
    #[default]
    Short,
    /// Prefers column-derived names (`account_id` → `account`), falling
    /// back to `Short`.
    Optimal,
    /// Caller-provided function.
    Custom(Arc<dyn Fn(&RelationContext) -> String + Send + Sync>),
}

impl RelationNameFunction {
    /// Resolves a builtin strategy by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownNameFunction` for anything but `short`
    /// and `optimal`.
    pub fn by_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "short" => Ok(RelationNameFunction::Short),
            "optimal" => Ok(RelationNameFunction::Optimal),
            other => Err(ConfigError::UnknownNameFunction(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RelationNameFunction::Short => "short",
            RelationNameFunction::Optimal => "optimal",
            RelationNameFunction::Custom(_) => "custom",
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, RelationNameFunction::Custom(_))
    }

    /// Produces the relation name for the given context.
    pub fn call(&self, context: &RelationContext) -> String {
        match self {
            RelationNameFunction::Short => short_name(context),
            RelationNameFunction::Optimal => optimal_name(context),
            RelationNameFunction::Custom(f) => f(context),
        }
    }
}

impl fmt::Debug for RelationNameFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for RelationNameFunction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for RelationNameFunction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        RelationNameFunction::by_name(&name).map_err(|_| {
            D::Error::custom(format!(
                "unknown relation name function '{name}'; custom functions must be re-injected"
            ))
        })
    }
}

fn short_name(context: &RelationContext) -> String {
    let (source_alias, target_alias) = aliases(context.foreign_key, context.config);
    match context.kind {
        RelationKind::ManyToOne | RelationKind::ManyToMany => {
            target_alias.unwrap_or_else(|| context.foreign_key.referenced_table().name().to_string())
        }
        RelationKind::OneToMany => {
            source_alias.unwrap_or_else(|| context.foreign_key.table().name().to_string())
        }
    }
}

fn optimal_name(context: &RelationContext) -> String {
    if context.kind == RelationKind::ManyToOne {
        if let [column] = context.foreign_key.columns() {
            if let Some(stem) = column.strip_suffix("_id").filter(|s| !s.is_empty()) {
                return stem.to_string();
            }
        }
    }
    short_name(context)
}

/// Splits an alias list out of a constraint name. Only a two-part split
/// counts; anything else means the constraint name carries no aliases.
fn aliases(fk: &ForeignKey, config: &Config) -> (Option<String>, Option<String>) {
    let separator = &config.foreign_key_alias_separator;
    if separator.is_empty() {
        return (None, None);
    }
    let parts: Vec<&str> = fk.name().split(separator.as_str()).collect();
    if parts.len() != 2 {
        return (None, None);
    }
    let (first, second) = (parts[0].trim().to_string(), parts[1].trim().to_string());
    if config.foreign_key_alias_target_first {
        (Some(second), Some(first))
    } else {
        (Some(first), Some(second))
    }
}
