//! Versioned catalog SQL resources.
//!
//! The SQL text is opaque to the rest of the crate: queries are embedded at
//! compile time under `queries/<tier>/<name>.sql` and selected by server
//! version. A query for tier `N` is served by the nearest tier at or below
//! `N`, so only the queries that actually change between versions carry an
//! override.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Logical catalog query names, one per assembler input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CatalogQuery {
    Schema,
    Type,
    Entity,
    Column,
    Index,
    Constraint,
    Function,
    Trigger,
}

impl CatalogQuery {
    /// The base (tier 9) text; every query has one.
    fn base(self) -> &'static str {
        match self {
            CatalogQuery::Schema => include_str!("../queries/9/schema.sql"),
            CatalogQuery::Type => include_str!("../queries/9/type.sql"),
            CatalogQuery::Entity => include_str!("../queries/9/entity.sql"),
            CatalogQuery::Column => include_str!("../queries/9/column.sql"),
            CatalogQuery::Index => include_str!("../queries/9/index.sql"),
            CatalogQuery::Constraint => include_str!("../queries/9/constraint.sql"),
            CatalogQuery::Function => include_str!("../queries/9/function.sql"),
            CatalogQuery::Trigger => include_str!("../queries/9/trigger.sql"),
        }
    }
}

// Version-specific overrides: identity columns arrive in 10, prokind in 11,
// generated columns in 12, multiranges in 14.
const OVERRIDES: &[(u32, CatalogQuery, &str)] = &[
    (10, CatalogQuery::Entity, include_str!("../queries/10/entity.sql")),
    (10, CatalogQuery::Column, include_str!("../queries/10/column.sql")),
    (11, CatalogQuery::Function, include_str!("../queries/11/function.sql")),
    (12, CatalogQuery::Column, include_str!("../queries/12/column.sql")),
    (14, CatalogQuery::Type, include_str!("../queries/14/type.sql")),
];

// Per-query override lists sorted by tier, built once per process.
static OVERRIDE_INDEX: Lazy<HashMap<CatalogQuery, Vec<(u32, &'static str)>>> = Lazy::new(|| {
    let mut index: HashMap<CatalogQuery, Vec<(u32, &'static str)>> = HashMap::new();
    for &(tier, query, text) in OVERRIDES {
        index.entry(query).or_default().push((tier, text));
    }
    for versions in index.values_mut() {
        versions.sort_by_key(|&(tier, _)| tier);
    }
    index
});

/// SQL text for a query at the given server-version tier.
pub(crate) fn text(tier: u32, query: CatalogQuery) -> &'static str {
    OVERRIDE_INDEX
        .get(&query)
        .and_then(|versions| {
            versions.iter().rev().find(|&&(t, _)| t <= tier).map(|&(_, text)| text)
        })
        .unwrap_or_else(|| query.base())
}

/// Major server version from a `server_version` setting string
/// (`"15.3 (Debian 15.3-1)"` → 15, `"9.6.24"` → 9).
pub(crate) fn version_tier(server_version: &str) -> u32 {
    server_version
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_tier() {
        assert_eq!(version_tier("15.3 (Debian 15.3-1.pgdg110+1)"), 15);
        assert_eq!(version_tier("9.6.24"), 9);
        assert_eq!(version_tier("10.0"), 10);
        assert_eq!(version_tier("garbage"), 9);
    }

    #[test]
    fn test_nearest_lower_tier_wins() {
        // Columns: 9 for old servers, 10 once identity exists, 12 once
        // generated columns exist.
        assert_eq!(text(9, CatalogQuery::Column), include_str!("../queries/9/column.sql"));
        assert_eq!(text(11, CatalogQuery::Column), include_str!("../queries/10/column.sql"));
        assert_eq!(text(15, CatalogQuery::Column), include_str!("../queries/12/column.sql"));
        // Queries without overrides always serve the base text.
        assert_eq!(text(15, CatalogQuery::Schema), include_str!("../queries/9/schema.sql"));
    }

    #[test]
    fn test_every_query_has_base_text() {
        for query in [
            CatalogQuery::Schema,
            CatalogQuery::Type,
            CatalogQuery::Entity,
            CatalogQuery::Column,
            CatalogQuery::Index,
            CatalogQuery::Constraint,
            CatalogQuery::Function,
            CatalogQuery::Trigger,
        ] {
            assert!(!text(9, query).is_empty());
        }
    }
}
