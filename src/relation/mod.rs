//! Derived relations.
//!
//! Relations are not catalog-backed: they are inferred from foreign-key
//! topology once the graph is complete, lazily per table, and memoized on
//! the entity. A many-to-one exists per outgoing foreign key, a one-to-many
//! per incoming one, and a many-to-many per pair of foreign keys on a join
//! table whose primary key is exactly the union of the pair's columns.

mod naming;

pub use naming::{RelationKind, RelationContext, RelationNameFunction};

use std::collections::HashSet;

use crate::model::{Db, Entity, ForeignKey, ObjectRef};

/// A relation following an outgoing foreign key to its referenced table.
#[derive(Debug, Clone)]
pub struct ManyToOne {
    pub(crate) name: String,
    pub(crate) source_table: ObjectRef,
    pub(crate) target_table: ObjectRef,
    pub(crate) foreign_key: ForeignKey,
}

impl ManyToOne {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_table(&self) -> &ObjectRef {
        &self.source_table
    }

    pub fn target_table(&self) -> &ObjectRef {
        &self.target_table
    }

    pub fn foreign_key(&self) -> &ForeignKey {
        &self.foreign_key
    }
}

/// The inverse of a [`ManyToOne`], exposed from the referenced table.
#[derive(Debug, Clone)]
pub struct OneToMany {
    pub(crate) name: String,
    pub(crate) source_table: ObjectRef,
    pub(crate) target_table: ObjectRef,
    pub(crate) foreign_key: ForeignKey,
}

impl OneToMany {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_table(&self) -> &ObjectRef {
        &self.source_table
    }

    /// The table owning the foreign key.
    pub fn target_table(&self) -> &ObjectRef {
        &self.target_table
    }

    pub fn foreign_key(&self) -> &ForeignKey {
        &self.foreign_key
    }
}

/// A relation through a join table to a far table.
#[derive(Debug, Clone)]
pub struct ManyToMany {
    pub(crate) name: String,
    pub(crate) source_table: ObjectRef,
    pub(crate) join_table: ObjectRef,
    pub(crate) target_table: ObjectRef,
    pub(crate) through_foreign_key: ForeignKey,
    pub(crate) through_foreign_key_to_self: ForeignKey,
}

impl ManyToMany {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_table(&self) -> &ObjectRef {
        &self.source_table
    }

    pub fn join_table(&self) -> &ObjectRef {
        &self.join_table
    }

    pub fn target_table(&self) -> &ObjectRef {
        &self.target_table
    }

    /// The join table's foreign key toward the far side.
    pub fn through_foreign_key_constraint(&self) -> &ForeignKey {
        &self.through_foreign_key
    }

    /// The join table's foreign key pointing back at the source.
    pub fn through_foreign_key_constraint_to_self(&self) -> &ForeignKey {
        &self.through_foreign_key_to_self
    }
}

pub(crate) fn many_to_ones(db: &Db, table: &Entity) -> Vec<ManyToOne> {
    let source = table.object_ref();
    let mut relations: Vec<ManyToOne> = Vec::new();
    let mut names: Vec<String> = Vec::new();
    for fk in table.foreign_keys() {
        let target = fk.referenced_table().clone();
        let context = RelationContext {
            kind: RelationKind::ManyToOne,
            source_table: &source,
            target_table: &target,
            join_table: None,
            foreign_key: fk,
            foreign_key_to_self: None,
            config: db.config(),
        };
        names.push(db.config().relation_name_function.call(&context));
        relations.push(ManyToOne {
            name: String::new(),
            source_table: source.clone(),
            target_table: target,
            foreign_key: fk.clone(),
        });
    }
    resolve_collisions(&mut names, |i| suffix(&relations[i].foreign_key, None));
    for (relation, name) in relations.iter_mut().zip(names) {
        relation.name = name;
    }
    relations
}

pub(crate) fn one_to_manys(db: &Db, table: &Entity) -> Vec<OneToMany> {
    let source = table.object_ref();
    let mut relations: Vec<OneToMany> = Vec::new();
    let mut names: Vec<String> = Vec::new();
    for fk in table.foreign_keys_to_this() {
        let target = fk.table().clone();
        let context = RelationContext {
            kind: RelationKind::OneToMany,
            source_table: &source,
            target_table: &target,
            join_table: None,
            foreign_key: fk,
            foreign_key_to_self: None,
            config: db.config(),
        };
        names.push(db.config().relation_name_function.call(&context));
        relations.push(OneToMany {
            name: String::new(),
            source_table: source.clone(),
            target_table: target,
            foreign_key: fk.clone(),
        });
    }
    resolve_collisions(&mut names, |i| suffix(&relations[i].foreign_key, None));
    for (relation, name) in relations.iter_mut().zip(names) {
        relation.name = name;
    }
    relations
}

pub(crate) fn many_to_manys(db: &Db, table: &Entity) -> Vec<ManyToMany> {
    let source = table.object_ref();
    let mut relations: Vec<ManyToMany> = Vec::new();
    let mut names: Vec<String> = Vec::new();
    for fk_to_self in table.foreign_keys_to_this() {
        let join = match db.entity_by_oid(fk_to_self.table().oid()) {
            Some(join) => join,
            None => continue,
        };
        let pk_columns = match primary_key_columns(join) {
            Some(columns) => columns,
            None => continue,
        };
        for other in join.foreign_keys() {
            // Self-joins pair two distinct constraints on the same table.
            if other.name() == fk_to_self.name() {
                continue;
            }
            if column_union(fk_to_self, other) != pk_columns {
                continue;
            }
            let target = other.referenced_table().clone();
            let join_ref = join.object_ref();
            let context = RelationContext {
                kind: RelationKind::ManyToMany,
                source_table: &source,
                target_table: &target,
                join_table: Some(&join_ref),
                foreign_key: other,
                foreign_key_to_self: Some(fk_to_self),
                config: db.config(),
            };
            names.push(db.config().relation_name_function.call(&context));
            relations.push(ManyToMany {
                name: String::new(),
                source_table: source.clone(),
                join_table: join_ref,
                target_table: target,
                through_foreign_key: other.clone(),
                through_foreign_key_to_self: fk_to_self.clone(),
            });
        }
    }
    resolve_collisions(&mut names, |i| {
        suffix(&relations[i].through_foreign_key, Some(&relations[i].join_table))
    });
    for (relation, name) in relations.iter_mut().zip(names) {
        relation.name = name;
    }
    relations
}

/// Join-table test: the table has a primary key whose column set equals the
/// set-union of the columns of two of its outgoing foreign keys. The two
/// need not be disjoint; self-references are allowed.
pub(crate) fn is_join_table(table: &Entity) -> bool {
    let pk_columns = match primary_key_columns(table) {
        Some(columns) => columns,
        None => return false,
    };
    let fks = table.foreign_keys();
    for (i, a) in fks.iter().enumerate() {
        for b in &fks[i + 1..] {
            if column_union(a, b) == pk_columns {
                return true;
            }
        }
    }
    false
}

fn primary_key_columns(table: &Entity) -> Option<HashSet<String>> {
    let index = table.indexes().iter().find(|i| i.is_primary_key())?;
    Some(index.column_names().iter().map(|s| s.to_string()).collect())
}

fn column_union(a: &ForeignKey, b: &ForeignKey) -> HashSet<String> {
    a.columns().iter().chain(b.columns().iter()).cloned().collect()
}

/// Keeps the first occurrence of a duplicated name unchanged and suffixes
/// later occurrences, in iteration order, with `__<constraint-name>` (and
/// `__<join-table-name>` for many-to-many).
fn resolve_collisions(names: &mut [String], suffix_for: impl Fn(usize) -> String) {
    let mut seen: HashSet<String> = HashSet::new();
    for i in 0..names.len() {
        if !seen.insert(names[i].clone()) {
            let disambiguated = format!("{}{}", names[i], suffix_for(i));
            names[i] = disambiguated;
        }
        seen.insert(names[i].clone());
    }
}

fn suffix(fk: &ForeignKey, join_table: Option<&ObjectRef>) -> String {
    match join_table {
        Some(join) => format!("__{}__{}", fk.name(), join.name()),
        None => format!("__{}", fk.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_collisions_keeps_first_and_suffixes_later() {
        let mut names = vec!["person".to_string(), "person".to_string(), "pet".to_string()];
        resolve_collisions(&mut names, |i| format!("__fk{i}"));
        assert_eq!(names, vec!["person", "person__fk1", "pet"]);
    }

    #[test]
    fn test_resolve_collisions_is_stable_for_unique_names() {
        let mut names = vec!["a".to_string(), "b".to_string()];
        resolve_collisions(&mut names, |_| "__x".to_string());
        assert_eq!(names, vec!["a", "b"]);
    }
}
