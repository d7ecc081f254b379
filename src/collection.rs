//! Ordered collections with secondary indexes.
//!
//! PostgreSQL catalogs key the same object several ways at once: OID for
//! cross-references, name for humans, attribute number for columns. A
//! [`Collection`] preserves catalog (insertion) order and maintains one
//! index per key an element declares through [`Keyed`], so the rest of the
//! model never needs ad-hoc lookup maps.

use std::collections::HashMap;

use crate::error::CollectionError;

/// Keys an element exposes to the [`Collection`] that owns it.
///
/// `key_name` is mandatory and unique within a collection. The optional keys
/// are indexed only for elements that return `Some`; they must be unique as
/// well.
pub trait Keyed {
    /// Primary, human-facing key. Case-sensitive.
    fn key_name(&self) -> &str;

    /// Catalog OID, where the element has one.
    fn key_oid(&self) -> Option<u32> {
        None
    }

    /// Ordinal catalog position (attribute number for columns).
    fn key_ordinal(&self) -> Option<i16> {
        None
    }
}

/// Insertion-ordered collection with name, OID and ordinal indexes.
///
/// Iteration order is catalog order. Lookups are exact-match; name lookups
/// are case-sensitive with a separate case-insensitive view via
/// [`Collection::get_maybe_ci`].
#[derive(Debug, Clone)]
pub struct Collection<T: Keyed> {
    items: Vec<T>,
    by_name: HashMap<String, usize>,
    // Lowercase view. First occurrence wins; never treated as a uniqueness
    // constraint.
    by_name_ci: HashMap<String, usize>,
    by_oid: HashMap<u32, usize>,
    by_ordinal: HashMap<i16, usize>,
}

impl<T: Keyed> Default for Collection<T> {
    fn default() -> Self {
        Collection {
            items: Vec::new(),
            by_name: HashMap::new(),
            by_name_ci: HashMap::new(),
            by_oid: HashMap::new(),
            by_ordinal: HashMap::new(),
        }
    }
}

impl<T: Keyed> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element, indexing every key it declares.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Duplicate`] when any declared key is
    /// already present. The collection is left unchanged in that case.
    pub fn push(&mut self, item: T) -> Result<(), CollectionError> {
        if self.by_name.contains_key(item.key_name()) {
            return Err(CollectionError::Duplicate {
                index: "name",
                key: item.key_name().to_string(),
            });
        }
        if let Some(oid) = item.key_oid() {
            if self.by_oid.contains_key(&oid) {
                return Err(CollectionError::Duplicate { index: "oid", key: oid.to_string() });
            }
        }
        if let Some(ordinal) = item.key_ordinal() {
            if self.by_ordinal.contains_key(&ordinal) {
                return Err(CollectionError::Duplicate {
                    index: "ordinal",
                    key: ordinal.to_string(),
                });
            }
        }

        let pos = self.items.len();
        self.by_name.insert(item.key_name().to_string(), pos);
        self.by_name_ci.entry(item.key_name().to_lowercase()).or_insert(pos);
        if let Some(oid) = item.key_oid() {
            self.by_oid.insert(oid, pos);
        }
        if let Some(ordinal) = item.key_ordinal() {
            self.by_ordinal.insert(ordinal, pos);
        }
        self.items.push(item);
        Ok(())
    }

    /// Exact name lookup.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] when the key is absent. Callers
    /// that tolerate absence use [`Collection::get_maybe`].
    pub fn get(&self, name: &str) -> Result<&T, CollectionError> {
        self.get_maybe(name)
            .ok_or_else(|| CollectionError::NotFound { key: name.to_string() })
    }

    pub fn get_maybe(&self, name: &str) -> Option<&T> {
        self.by_name.get(name).map(|&i| &self.items[i])
    }

    /// Case-insensitive name lookup. When two names differ only by case the
    /// first inserted element is returned.
    pub fn get_maybe_ci(&self, name: &str) -> Option<&T> {
        self.by_name_ci.get(&name.to_lowercase()).map(|&i| &self.items[i])
    }

    pub fn get_ci(&self, name: &str) -> Result<&T, CollectionError> {
        self.get_maybe_ci(name)
            .ok_or_else(|| CollectionError::NotFound { key: name.to_string() })
    }

    /// Exact OID lookup.
    pub fn by_oid(&self, oid: u32) -> Option<&T> {
        self.by_oid.get(&oid).map(|&i| &self.items[i])
    }

    /// Exact ordinal-key lookup (attribute number for columns).
    pub fn by_ordinal(&self, ordinal: i16) -> Option<&T> {
        self.by_ordinal.get(&ordinal).map(|&i| &self.items[i])
    }

    /// Positional access in insertion order.
    pub fn at(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    pub(crate) fn at_mut(&mut self, position: usize) -> Option<&mut T> {
        self.items.get_mut(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T: Keyed> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: String,
        oid: Option<u32>,
        ordinal: Option<i16>,
    }

    impl Item {
        fn new(name: &str, oid: Option<u32>, ordinal: Option<i16>) -> Item {
            Item { name: name.into(), oid, ordinal }
        }
    }

    impl Keyed for Item {
        fn key_name(&self) -> &str {
            &self.name
        }
        fn key_oid(&self) -> Option<u32> {
            self.oid
        }
        fn key_ordinal(&self) -> Option<i16> {
            self.ordinal
        }
    }

    #[test]
    fn test_push_and_lookup_by_every_key() {
        let mut c = Collection::new();
        c.push(Item::new("id", Some(100), Some(1))).unwrap();
        c.push(Item::new("email", Some(101), Some(2))).unwrap();

        assert_eq!(c.get("email").unwrap().name, "email");
        assert_eq!(c.by_oid(100).unwrap().name, "id");
        assert_eq!(c.by_ordinal(2).unwrap().name, "email");
        assert_eq!(c.at(0).unwrap().name, "id");
        assert!(c.at(2).is_none());
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_insertion_order_is_iteration_order() {
        let mut c = Collection::new();
        for name in ["c", "a", "b"] {
            c.push(Item::new(name, None, None)).unwrap();
        }
        let names: Vec<&str> = c.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_duplicate_name_fails() {
        let mut c = Collection::new();
        c.push(Item::new("id", None, None)).unwrap();
        let err = c.push(Item::new("id", None, None)).unwrap_err();
        assert_eq!(err, CollectionError::Duplicate { index: "name", key: "id".into() });
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_duplicate_oid_fails_and_leaves_collection_unchanged() {
        let mut c = Collection::new();
        c.push(Item::new("a", Some(7), None)).unwrap();
        let err = c.push(Item::new("b", Some(7), None)).unwrap_err();
        assert_eq!(err, CollectionError::Duplicate { index: "oid", key: "7".into() });
        assert!(c.get_maybe("b").is_none());
    }

    #[test]
    fn test_case_sensitivity() {
        let mut c = Collection::new();
        c.push(Item::new("Account", None, None)).unwrap();

        assert!(c.get_maybe("account").is_none());
        assert_eq!(c.get_maybe_ci("ACCOUNT").unwrap().name, "Account");
        assert!(c.get("account").is_err());
        assert_eq!(c.get_ci("account").unwrap().name, "Account");
    }

    #[test]
    fn test_case_insensitive_view_keeps_first() {
        let mut c = Collection::new();
        c.push(Item::new("Name", None, None)).unwrap();
        c.push(Item::new("name", None, None)).unwrap();
        // Both exact lookups work; the ci view resolves to the first insert.
        assert_eq!(c.get("name").unwrap().name, "name");
        assert_eq!(c.get_maybe_ci("NAME").unwrap().name, "Name");
    }

    #[test]
    fn test_not_found() {
        let c: Collection<Item> = Collection::new();
        assert!(matches!(c.get("missing"), Err(CollectionError::NotFound { .. })));
        assert!(c.get_maybe("missing").is_none());
        assert!(c.by_oid(1).is_none());
    }
}
