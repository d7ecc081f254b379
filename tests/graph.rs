//! Graph assembly tests over synthetic snapshots.
//!
//! Snapshots are built programmatically and replayed through `deserialize`,
//! the same pure path a live introspection feeds. No database required.

use pg_structure::{
    deserialize, deserialize_with, ColumnRow, ConstraintKind, ConstraintRow, EntityKind,
    EntityRow, FunctionRow, IndexElement, IndexRow, MatchType, QueryResults,
    ReferentialAction, RelationNameFunction, SchemaRow, StructureError, TriggerEvent,
    TriggerRow, TriggerTiming, TypeKind, TypeRow,
};

const PUBLIC: u32 = 2200;
const PG_CATALOG: u32 = 11;
const INT4: u32 = 23;
const TEXT: u32 = 25;
const VARCHAR: u32 = 1043;
const TRIGGER_PSEUDO: u32 = 2279;

fn snapshot_json(results: &QueryResults, config: serde_json::Value) -> String {
    serde_json::json!({
        "name": "shop",
        "server_version": "15.3 (Debian 15.3-1.pgdg110+1)",
        "config": config,
        "query_results": results,
    })
    .to_string()
}

fn build(results: &QueryResults) -> pg_structure::Db {
    deserialize(&snapshot_json(results, serde_json::json!({}))).unwrap()
}

fn schema_row(oid: u32, name: &str) -> SchemaRow {
    SchemaRow { oid, name: name.into(), comment: None }
}

fn type_row(oid: u32, schema_oid: u32, name: &str, kind: &str) -> TypeRow {
    TypeRow {
        oid,
        class_oid: 0,
        schema_oid,
        name: name.into(),
        kind: kind.into(),
        not_null: false,
        base_type_oid: None,
        subtype_oid: None,
        range_type_oid: None,
        enum_labels: None,
        comment: None,
    }
}

fn entity_row(oid: u32, schema_oid: u32, name: &str, kind: &str) -> EntityRow {
    EntityRow {
        oid,
        schema_oid,
        name: name.into(),
        kind: kind.into(),
        comment: None,
        start_value: None,
        minimum_value: None,
        maximum_value: None,
        increment: None,
        cache_size: None,
        cycle: None,
    }
}

fn column_row(class_oid: u32, name: &str, attribute_number: i16, type_oid: u32) -> ColumnRow {
    ColumnRow {
        class_oid,
        parent_kind: "r".into(),
        name: name.into(),
        attribute_number,
        type_oid,
        not_null: false,
        default: None,
        length: None,
        precision: None,
        scale: None,
        identity: None,
        generated_expression: None,
        comment: None,
    }
}

fn index_row(oid: u32, name: &str, table_oid: u32, positions: &[i32], primary: bool) -> IndexRow {
    IndexRow {
        oid,
        name: name.into(),
        table_oid,
        is_unique: primary,
        is_primary: primary,
        is_exclusion: false,
        column_positions: positions.to_vec(),
        expressions: None,
        predicate: None,
        comment: None,
    }
}

fn constraint_row(oid: u32, name: &str, kind: &str, table_oid: u32) -> ConstraintRow {
    ConstraintRow {
        oid,
        name: name.into(),
        kind: kind.into(),
        table_oid: Some(table_oid),
        type_oid: None,
        index_oid: None,
        columns: None,
        expression: None,
        on_update: None,
        on_delete: None,
        match_type: None,
        comment: None,
    }
}

fn pk_constraint(oid: u32, name: &str, table_oid: u32, index_oid: u32, columns: &[i32]) -> ConstraintRow {
    ConstraintRow {
        index_oid: Some(index_oid),
        columns: Some(columns.to_vec()),
        ..constraint_row(oid, name, "p", table_oid)
    }
}

fn fk_constraint(oid: u32, name: &str, table_oid: u32, index_oid: u32, columns: &[i32]) -> ConstraintRow {
    ConstraintRow {
        index_oid: Some(index_oid),
        columns: Some(columns.to_vec()),
        on_update: Some("a".into()),
        on_delete: Some("c".into()),
        match_type: Some("s".into()),
        ..constraint_row(oid, name, "f", table_oid)
    }
}

fn base_types() -> Vec<TypeRow> {
    vec![
        type_row(INT4, PG_CATALOG, "int4", "b"),
        type_row(TEXT, PG_CATALOG, "text", "b"),
        type_row(VARCHAR, PG_CATALOG, "varchar", "b"),
        type_row(TRIGGER_PSEUDO, PG_CATALOG, "trigger", "p"),
    ]
}

/// `public` with `account`, `order`, a cart/product pair joined through
/// `cart_product`, and a self-joining `person`/`friendship` pair.
fn shop() -> QueryResults {
    QueryResults {
        schemas: vec![schema_row(PUBLIC, "public")],
        system_schemas: vec![schema_row(PG_CATALOG, "pg_catalog")],
        types: base_types(),
        entities: vec![
            EntityRow {
                comment: Some(r#"User accounts. pg-structure{"hidden": true}"#.into()),
                ..entity_row(16384, PUBLIC, "account", "r")
            },
            entity_row(16390, PUBLIC, "order", "r"),
            entity_row(16400, PUBLIC, "cart", "r"),
            entity_row(16410, PUBLIC, "product", "r"),
            entity_row(16420, PUBLIC, "cart_product", "r"),
            entity_row(16430, PUBLIC, "person", "r"),
            entity_row(16440, PUBLIC, "friendship", "r"),
        ],
        columns: vec![
            ColumnRow { not_null: true, ..column_row(16384, "id", 1, INT4) },
            ColumnRow {
                not_null: true,
                length: Some(64),
                ..column_row(16384, "email", 2, VARCHAR)
            },
            ColumnRow { not_null: true, ..column_row(16390, "id", 1, INT4) },
            ColumnRow { not_null: true, ..column_row(16390, "account_id", 2, INT4) },
            ColumnRow { not_null: true, ..column_row(16400, "id", 1, INT4) },
            ColumnRow { not_null: true, ..column_row(16410, "id", 1, INT4) },
            ColumnRow { not_null: true, ..column_row(16420, "cart_id", 1, INT4) },
            ColumnRow { not_null: true, ..column_row(16420, "product_id", 2, INT4) },
            ColumnRow { not_null: true, ..column_row(16430, "id", 1, INT4) },
            ColumnRow { not_null: true, ..column_row(16440, "a", 1, INT4) },
            ColumnRow { not_null: true, ..column_row(16440, "b", 2, INT4) },
        ],
        indexes: vec![
            index_row(16385, "account_pkey", 16384, &[1], true),
            index_row(16391, "order_pkey", 16390, &[1], true),
            index_row(16401, "cart_pkey", 16400, &[1], true),
            index_row(16411, "product_pkey", 16410, &[1], true),
            index_row(16421, "cart_product_pkey", 16420, &[1, 2], true),
            index_row(16431, "person_pkey", 16430, &[1], true),
            index_row(16441, "friendship_pkey", 16440, &[1, 2], true),
        ],
        constraints: vec![
            pk_constraint(1, "account_pkey", 16384, 16385, &[1]),
            pk_constraint(2, "order_pkey", 16390, 16391, &[1]),
            pk_constraint(3, "cart_pkey", 16400, 16401, &[1]),
            pk_constraint(4, "product_pkey", 16410, 16411, &[1]),
            pk_constraint(5, "cart_product_pkey", 16420, 16421, &[1, 2]),
            pk_constraint(6, "person_pkey", 16430, 16431, &[1]),
            pk_constraint(7, "friendship_pkey", 16440, 16441, &[1, 2]),
            fk_constraint(8, "order_account_id_fkey", 16390, 16385, &[2]),
            fk_constraint(9, "cart_product_cart_id_fkey", 16420, 16401, &[1]),
            fk_constraint(10, "cart_product_product_id_fkey", 16420, 16411, &[2]),
            fk_constraint(11, "friendship_a_fkey", 16440, 16431, &[1]),
            fk_constraint(12, "friendship_b_fkey", 16440, 16431, &[2]),
        ],
        functions: Vec::new(),
        triggers: Vec::new(),
    }
}

#[test]
fn empty_database_keeps_system_schemas() {
    // S1: no user schemas at all.
    let results = QueryResults {
        system_schemas: vec![schema_row(PG_CATALOG, "pg_catalog")],
        types: base_types(),
        ..QueryResults::default()
    };
    let db = build(&results);

    assert!(db.schemas().is_empty());
    assert_eq!(db.system_schemas().len(), 1);
    assert_eq!(db.system_schemas().get("pg_catalog").unwrap().name(), "pg_catalog");
    assert!(db.tables().next().is_none());
}

#[test]
fn single_table_columns_and_types() {
    // S2: account(id int pk, email varchar(64) not null).
    let db = build(&shop());

    let id = db.get("public.account.id").unwrap();
    let id = id.as_column().unwrap();
    assert!(id.not_null());
    assert_eq!(id.attribute_number(), 1);

    let email = db.get("public.account.email").unwrap();
    let email = email.as_column().unwrap();
    assert_eq!(email.data_type().name(), "character varying");
    assert_eq!(email.length(), Some(64));

    // The builtin alias keeps the internal spelling reachable.
    let varchar = db.type_by_oid(VARCHAR).unwrap();
    assert_eq!(varchar.name(), "character varying");
    assert_eq!(varchar.internal_name(), Some("varchar"));
    assert!(varchar.alias().unwrap().has_length);
}

#[test]
fn dotted_lookup_matches_stepwise_navigation() {
    let db = build(&shop());

    let via_path = db.get("public.account.id").unwrap();
    let via_path = via_path.as_column().unwrap();
    let stepwise = db
        .schemas()
        .get("public")
        .unwrap()
        .entities()
        .get("account")
        .unwrap()
        .columns()
        .get("id")
        .unwrap();
    assert_eq!(via_path.full_name(), stepwise.full_name());

    // A single segment resolves a schema; misses fail with NotFound.
    assert!(db.get("public").unwrap().as_schema().is_some());
    assert!(db.get("public.missing").is_err());
    assert!(db.get_maybe("nope.account.id").is_none());
}

#[test]
fn foreign_key_resolution_and_symmetry() {
    // S3: order.account_id references account.id on delete cascade.
    let db = build(&shop());
    let order = db.get("public.order").unwrap();
    let order = order.as_entity().unwrap();

    let fks = order.foreign_keys();
    assert_eq!(fks.len(), 1);
    let fk = fks[0];
    assert_eq!(fk.on_delete(), ReferentialAction::Cascade);
    assert_eq!(fk.on_update(), ReferentialAction::NoAction);
    assert_eq!(fk.match_type(), MatchType::Simple);
    assert_eq!(fk.referenced_table().name(), "account");
    assert_eq!(fk.columns(), &["account_id".to_string()]);
    assert_eq!(fk.referenced_columns(), &["id".to_string()]);
    assert_eq!(fk.columns().len(), fk.referenced_columns().len());

    // The referenced table sees the same constraint exactly once.
    let account = db.get("public.account").unwrap();
    let account = account.as_entity().unwrap();
    let incoming: Vec<_> = account
        .foreign_keys_to_this()
        .iter()
        .filter(|f| f.name() == "order_account_id_fkey")
        .collect();
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0].table().name(), "order");
}

#[test]
fn primary_key_borrows_columns_from_index() {
    let db = build(&shop());
    let account = db.get("public.account").unwrap();
    let account = account.as_entity().unwrap();

    let pk = account.primary_key().unwrap();
    let index_ref = pk.index().unwrap();
    assert_eq!(index_ref.name(), "account_pkey");

    let index = db.index_by_oid(index_ref.oid()).unwrap();
    assert!(index.is_primary_key());
    assert_eq!(index.column_names(), vec!["id"]);
    assert_eq!(
        index.columns_and_expressions(),
        &[IndexElement::Column { name: "id".into(), attribute_number: 1 }]
    );
}

#[test]
fn many_to_one_and_one_to_many() {
    let db = build(&shop());
    let order = db.get("public.order").unwrap().as_entity().unwrap();
    let account = db.get("public.account").unwrap().as_entity().unwrap();

    let m2o = order.many_to_ones(&db);
    assert_eq!(m2o.len(), 1);
    assert_eq!(m2o[0].name(), "account");
    assert_eq!(m2o[0].target_table().name(), "account");

    let o2m = account.one_to_manys(&db);
    assert_eq!(o2m.len(), 1);
    assert_eq!(o2m[0].name(), "order");
    assert_eq!(o2m[0].target_table().name(), "order");

    // Memoized: same computation on every access.
    assert_eq!(order.many_to_ones(&db)[0].name(), "account");
}

#[test]
fn many_to_many_through_join_table() {
    // S4: cart ↔ product through cart_product.
    let db = build(&shop());
    let cart = db.get("public.cart").unwrap().as_entity().unwrap();
    let join = db.get("public.cart_product").unwrap().as_entity().unwrap();

    assert!(join.is_join_table());
    assert!(!cart.is_join_table());

    let m2m = cart.many_to_manys(&db);
    assert_eq!(m2m.len(), 1);
    let relation = &m2m[0];
    assert_eq!(relation.name(), "product");
    assert_eq!(relation.join_table().name(), "cart_product");
    assert_eq!(relation.target_table().name(), "product");
    assert_eq!(relation.through_foreign_key_constraint().name(), "cart_product_product_id_fkey");
    assert_eq!(
        relation.through_foreign_key_constraint_to_self().name(),
        "cart_product_cart_id_fkey"
    );
}

#[test]
fn self_referencing_many_to_many_gets_distinct_names() {
    // S5: person ↔ person through friendship(a, b).
    let db = build(&shop());
    let person = db.get("public.person").unwrap().as_entity().unwrap();

    let m2m = person.many_to_manys(&db);
    assert_eq!(m2m.len(), 2);
    assert_eq!(m2m[0].name(), "person");
    assert_eq!(m2m[1].name(), "person__friendship_a_fkey__friendship");
    assert_ne!(m2m[0].name(), m2m[1].name());
    assert_eq!(m2m[0].target_table().name(), "person");
    assert_eq!(m2m[1].target_table().name(), "person");
}

#[test]
fn optimal_naming_strips_column_suffix() {
    let results = shop();
    let json = snapshot_json(&results, serde_json::json!({ "relation_name_function": "optimal" }));
    let db = deserialize(&json).unwrap();

    let order = db.get("public.order").unwrap().as_entity().unwrap();
    // account_id → account, same as the table here; the strategy is applied
    // either way.
    assert_eq!(order.many_to_ones(&db)[0].name(), "account");
    assert_eq!(db.config().relation_name_function.name(), "optimal");
}

#[test]
fn custom_naming_is_injectable_but_not_serializable() {
    let results = shop();
    let json = snapshot_json(&results, serde_json::json!({}));
    let custom = RelationNameFunction::Custom(std::sync::Arc::new(|ctx: &pg_structure::RelationContext| {
        format!("{}_rel", ctx.target_table.name())
    }));
    let db = deserialize_with(&json, custom).unwrap();

    let order = db.get("public.order").unwrap().as_entity().unwrap();
    assert_eq!(order.many_to_ones(&db)[0].name(), "account_rel");

    match db.serialize() {
        Err(StructureError::Config(_)) => {}
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn serialization_round_trips_and_is_idempotent() {
    let db = build(&shop());

    let first = db.serialize().unwrap();
    let replayed = deserialize(&first).unwrap();
    let second = replayed.serialize().unwrap();
    assert_eq!(first, second);

    assert_eq!(replayed.name(), db.name());
    assert_eq!(replayed.server_version(), db.server_version());
    assert_eq!(replayed.query_results(), db.query_results());

    // The replayed graph navigates identically.
    let email = replayed.get("public.account.email").unwrap();
    assert_eq!(email.as_column().unwrap().length(), Some(64));
}

#[test]
fn foreign_key_with_unresolved_index_is_dropped() {
    let mut results = shop();
    results
        .constraints
        .push(fk_constraint(99, "order_ghost_fkey", 16390, 999_999, &[2]));
    let db = build(&results);

    let order = db.get("public.order").unwrap().as_entity().unwrap();
    assert!(order.constraints().get_maybe("order_ghost_fkey").is_none());
    // The rest of the graph is unaffected.
    assert_eq!(order.foreign_keys().len(), 1);
}

#[test]
fn trigger_with_unresolved_function_is_dropped() {
    let mut results = shop();
    results.triggers.push(TriggerRow {
        oid: 16601,
        name: "account_ghost_trigger".into(),
        table_oid: 16384,
        function_oid: 999_999,
        tgtype: 23,
        condition: None,
        comment: None,
    });
    let db = build(&results);

    let account = db.get("public.account").unwrap().as_entity().unwrap();
    assert!(account.triggers().is_empty());
}

#[test]
fn missing_column_parent_is_fatal() {
    let mut results = shop();
    results.columns.push(column_row(999_999, "orphan", 1, INT4));
    let err = deserialize(&snapshot_json(&results, serde_json::json!({}))).unwrap_err();
    match err {
        StructureError::Integrity { object, oid } => {
            assert_eq!(object, "entity");
            assert_eq!(oid, 999_999);
        }
        other => panic!("expected integrity error, got {other:?}"),
    }
}

#[test]
fn comment_data_is_parsed_from_token() {
    let db = build(&shop());
    let account = db.get("public.account").unwrap().as_entity().unwrap();
    assert!(account.comment().unwrap().starts_with("User accounts."));
    assert_eq!(account.comment_data().unwrap()["hidden"], serde_json::json!(true));

    let order = db.get("public.order").unwrap().as_entity().unwrap();
    assert!(order.comment_data().is_none());
}

#[test]
fn triggers_decode_type_bits_and_resolve_functions() {
    let mut results = shop();
    results.functions.push(FunctionRow {
        oid: 16600,
        schema_oid: PUBLIC,
        name: "log_account_change".into(),
        kind: "f".into(),
        volatility: "v".into(),
        is_strict: false,
        parallel_safety: "u".into(),
        returns_set: false,
        return_type_oid: Some(TRIGGER_PSEUDO),
        language: "plpgsql".into(),
        argument_type_oids: Vec::new(),
        argument_names: None,
        argument_modes: None,
        comment: None,
    });
    // BEFORE INSERT OR UPDATE ... FOR EACH ROW
    results.triggers.push(TriggerRow {
        oid: 16601,
        name: "account_audit".into(),
        table_oid: 16384,
        function_oid: 16600,
        tgtype: 1 | 2 | 4 | 16,
        condition: Some("(old.email IS DISTINCT FROM new.email)".into()),
        comment: None,
    });
    let db = build(&results);

    let account = db.get("public.account").unwrap().as_entity().unwrap();
    let trigger = account.triggers().get("account_audit").unwrap();
    assert_eq!(trigger.timing(), TriggerTiming::Before);
    assert_eq!(trigger.events(), &[TriggerEvent::Insert, TriggerEvent::Update]);
    assert_eq!(trigger.function().name(), "log_account_change");
    assert!(trigger.condition().is_some());

    let function = db.function_by_oid(16600).unwrap();
    assert_eq!(function.language(), "plpgsql");
    assert_eq!(function.signature(), "log_account_change()");
    let resolved = db.get("public.log_account_change()").unwrap();
    assert_eq!(resolved.as_function().unwrap().name(), "log_account_change");
}

#[test]
fn enums_domains_and_composites() {
    let mut results = shop();
    results.types.push(TypeRow {
        enum_labels: Some(vec!["sad".into(), "ok".into(), "happy".into()]),
        ..type_row(16500, PUBLIC, "mood", "e")
    });
    results.types.push(TypeRow {
        not_null: true,
        base_type_oid: Some(INT4),
        ..type_row(16502, PUBLIC, "positive_int", "d")
    });
    results.constraints.push(ConstraintRow {
        oid: 50,
        name: "positive_int_check".into(),
        kind: "c".into(),
        table_oid: None,
        type_oid: Some(16502),
        index_oid: None,
        columns: None,
        expression: Some("CHECK ((VALUE > 0))".into()),
        on_update: None,
        on_delete: None,
        match_type: None,
        comment: None,
    });
    results.types.push(TypeRow {
        class_oid: 16505,
        ..type_row(16504, PUBLIC, "address", "c")
    });
    results.columns.push(ColumnRow {
        parent_kind: "c".into(),
        ..column_row(16505, "street", 1, TEXT)
    });
    results.columns.push(ColumnRow {
        parent_kind: "c".into(),
        ..column_row(16505, "city", 2, TEXT)
    });

    let db = build(&results);
    let public = db.get("public").unwrap();
    let public = public.as_schema().unwrap();

    let mood = public.types_including_entities().get("mood").unwrap();
    match mood.kind() {
        TypeKind::Enum { labels } => assert_eq!(labels, &["sad", "ok", "happy"]),
        other => panic!("expected enum, got {other:?}"),
    }

    let domain = public.types_including_entities().get("positive_int").unwrap();
    match domain.kind() {
        TypeKind::Domain { sql_type, not_null, checks } => {
            assert_eq!(sql_type.name(), "integer");
            assert!(*not_null);
            assert_eq!(checks.len(), 1);
            match checks[0].kind() {
                ConstraintKind::Check { expression, domain } => {
                    assert!(expression.contains("VALUE > 0"));
                    assert_eq!(domain.as_ref().unwrap().name(), "positive_int");
                }
                other => panic!("expected check, got {other:?}"),
            }
        }
        other => panic!("expected domain, got {other:?}"),
    }

    let address = db.get("public.address.city").unwrap();
    assert_eq!(address.as_column().unwrap().data_type().name(), "text");
    let composite = db.type_by_class_oid(16505).unwrap();
    assert_eq!(composite.name(), "address");
    assert!(!composite.is_entity_backed());
}

#[test]
fn table_backed_composite_types_are_linked() {
    let mut results = shop();
    results.types.push(TypeRow {
        class_oid: 16384,
        ..type_row(16386, PUBLIC, "account", "c")
    });
    let db = build(&results);

    let composite = db.type_by_class_oid(16384).unwrap();
    assert!(composite.is_entity_backed());
    match composite.kind() {
        TypeKind::Composite { entity_oid, .. } => assert_eq!(*entity_oid, Some(16384)),
        other => panic!("expected composite, got {other:?}"),
    }

    let public = db.get("public").unwrap();
    let public = public.as_schema().unwrap();
    let excluding: Vec<&str> =
        public.types_excluding_entities().map(|t| t.name()).collect();
    assert!(!excluding.contains(&"account"));
}

#[test]
fn sequences_and_views_are_dispatched_by_kind() {
    let mut results = shop();
    results.entities.push(EntityRow {
        start_value: Some(1),
        minimum_value: Some(1),
        maximum_value: Some(i64::MAX),
        increment: Some(1),
        cache_size: Some(1),
        cycle: Some(false),
        ..entity_row(16700, PUBLIC, "account_id_seq", "S")
    });
    results.entities.push(entity_row(16710, PUBLIC, "active_accounts", "v"));
    results.columns.push(ColumnRow {
        parent_kind: "v".into(),
        ..column_row(16710, "id", 1, INT4)
    });
    let db = build(&results);

    let public = db.get("public").unwrap();
    let public = public.as_schema().unwrap();
    assert_eq!(public.sequences().count(), 1);
    assert_eq!(public.views().count(), 1);
    assert_eq!(public.tables().count(), 7);

    let sequence = public.entities().get("account_id_seq").unwrap();
    assert_eq!(sequence.kind(), EntityKind::Sequence);
    let attributes = sequence.sequence().unwrap();
    assert_eq!(attributes.increment, 1);
    assert!(!attributes.cycle);

    let view = public.entities().get("active_accounts").unwrap();
    assert_eq!(view.kind(), EntityKind::View);
    assert_eq!(view.columns().len(), 1);
    assert!(view.indexes().is_empty());
}

#[test]
fn expression_indexes_consume_expressions_in_order() {
    let mut results = shop();
    results.indexes.push(IndexRow {
        expressions: Some(vec!["lower(email)".into()]),
        is_unique: true,
        is_primary: false,
        ..index_row(16388, "account_email_lower_idx", 16384, &[0, 1], false)
    });
    let db = build(&results);

    let account = db.get("public.account").unwrap().as_entity().unwrap();
    let index = account.indexes().get("account_email_lower_idx").unwrap();
    assert_eq!(
        index.columns_and_expressions(),
        &[
            IndexElement::Expression("lower(email)".into()),
            IndexElement::Column { name: "id".into(), attribute_number: 1 },
        ]
    );
    assert!(index.is_unique());
    assert!(!index.is_primary_key());
}

#[test]
fn collection_order_follows_catalog_order() {
    let db = build(&shop());
    let account = db.get("public.account").unwrap().as_entity().unwrap();

    let names: Vec<&str> = account.columns().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["id", "email"]);
    assert_eq!(account.columns().at(1).unwrap().name(), "email");
    assert_eq!(account.columns().by_ordinal(2).unwrap().name(), "email");
    assert!(account.columns().get_maybe_ci("EMAIL").is_some());
    assert!(account.columns().get_maybe("EMAIL").is_none());
}
