//! Graph assembly.
//!
//! A fixed-order, multi-phase build over a [`QueryResults`] snapshot. The
//! order is part of the contract: types precede entities so composite
//! parents exist for columns, indexes precede constraints so key
//! constraints can borrow columns from their index, and entities precede
//! triggers. Assembly is pure over `(results, config)`; a failed build
//! yields no [`Db`].
//!
//! Mandatory references (a column's parent, an entity's schema) abort the
//! build with an integrity error naming the OID. Optional references (a
//! foreign key's referenced index, a trigger's function) log a warning and
//! drop the object.

use std::collections::HashMap;

use tracing::warn;

use crate::collection::Collection;
use crate::config::Config;
use crate::error::StructureError;
use crate::kind::{
    ConstraintCategory, EntityKind, FunctionKind, IdentityKind, MatchType, ParallelSafety,
    ReferentialAction, TypeCategory, Volatility,
};
use crate::model::{
    parse_comment_data, Column, ColumnParent, Constraint, ConstraintKind, Db, Entity,
    EntityLoc, ForeignKey, Function, FunctionArgument, Index, IndexElement, IndexLoc,
    IndexRef, ObjectRef, Schema, SchemaLoc, SchemaRef, SequenceAttributes, Trigger, Type,
    TypeKind, TypeLoc,
};
use crate::rows::{ConstraintRow, QueryResults};

/// Assembles a [`Db`] from a snapshot.
pub(crate) fn assemble(
    name: String,
    server_version: String,
    config: Config,
    results: QueryResults,
) -> Result<Db, StructureError> {
    let mut builder = Builder {
        db: Db {
            name,
            server_version,
            config,
            schemas: Collection::new(),
            system_schemas: Collection::new(),
            query_results: QueryResults::default(),
            type_locs: HashMap::new(),
            type_class_locs: HashMap::new(),
            entity_locs: HashMap::new(),
            index_locs: HashMap::new(),
            function_locs: HashMap::new(),
        },
        schema_locs: HashMap::new(),
    };

    builder.add_schemas(&results.schemas, false)?;
    builder.add_schemas(&results.system_schemas, true)?;
    builder.add_types(&results)?;
    builder.add_entities(&results)?;
    builder.add_columns(&results)?;
    builder.add_indexes(&results)?;
    builder.add_constraints(&results)?;
    builder.add_functions(&results)?;
    builder.add_triggers(&results)?;

    let mut db = builder.db;
    db.query_results = results;
    Ok(db)
}

fn integrity(object: &'static str, oid: u32) -> StructureError {
    StructureError::Integrity { object, oid }
}

struct Builder {
    db: Db,
    schema_locs: HashMap<u32, SchemaLoc>,
}

impl Builder {
    fn add_schemas(
        &mut self,
        rows: &[crate::rows::SchemaRow],
        system: bool,
    ) -> Result<(), StructureError> {
        for row in rows {
            let token = &self.db.config.comment_data_token;
            let schema = Schema {
                oid: row.oid,
                name: row.name.clone(),
                comment: row.comment.clone(),
                comment_data: parse_comment_data(row.comment.as_deref(), token),
                entities: Collection::new(),
                types: Collection::new(),
                functions: Collection::new(),
            };
            let collection =
                if system { &mut self.db.system_schemas } else { &mut self.db.schemas };
            let index = collection.len();
            collection.push(schema)?;
            self.schema_locs.insert(row.oid, SchemaLoc { system, index });
        }
        Ok(())
    }

    fn schema_ref(&self, oid: u32) -> Option<SchemaRef> {
        let loc = *self.schema_locs.get(&oid)?;
        let schema = self.db.schema_at(loc)?;
        Some(SchemaRef { oid: schema.oid, name: schema.name.clone() })
    }

    fn type_ref(&self, oid: u32) -> Option<ObjectRef> {
        let ty = self.db.type_by_oid(oid)?;
        Some(ObjectRef { oid: ty.oid, schema: ty.schema.name.clone(), name: ty.name.clone() })
    }

    fn add_types(&mut self, results: &QueryResults) -> Result<(), StructureError> {
        // Insert first, then resolve type-to-type references: a domain or
        // range may precede its underlying type in catalog order.
        struct Fixup {
            loc: TypeLoc,
            base_type_oid: Option<u32>,
            subtype_oid: Option<u32>,
            range_type_oid: Option<u32>,
        }
        let mut fixups: Vec<Fixup> = Vec::new();

        for row in &results.types {
            // System schemas are consulted first through the shared OID map;
            // user objects routinely reference pg_catalog types.
            let schema_loc = *self
                .schema_locs
                .get(&row.schema_oid)
                .ok_or_else(|| integrity("schema", row.schema_oid))?;
            let schema_ref = self
                .schema_ref(row.schema_oid)
                .ok_or_else(|| integrity("schema", row.schema_oid))?;

            let category = match TypeCategory::from_code(&row.kind) {
                Some(category) => category,
                None => {
                    warn!(name = %row.name, kind = %row.kind, "skipping type of unknown kind");
                    continue;
                }
            };

            let (name, internal_name) = match crate::model::builtin_alias(&row.name) {
                Some(alias) => (alias.name.to_string(), Some(row.name.clone())),
                None => (row.name.clone(), None),
            };

            let kind = match category {
                TypeCategory::Base => TypeKind::Base,
                TypeCategory::Enum => TypeKind::Enum {
                    labels: row.enum_labels.clone().unwrap_or_default(),
                },
                TypeCategory::Domain => TypeKind::Domain {
                    // Placeholder until the fixup pass below.
                    sql_type: ObjectRef { oid: 0, schema: String::new(), name: String::new() },
                    not_null: row.not_null,
                    checks: Vec::new(),
                },
                TypeCategory::Composite => TypeKind::Composite {
                    columns: Collection::new(),
                    entity_oid: None,
                },
                TypeCategory::Range => TypeKind::Range { subtype: None },
                TypeCategory::MultiRange => TypeKind::MultiRange { range: None },
                TypeCategory::Pseudo => TypeKind::Pseudo,
            };

            let token = &self.db.config.comment_data_token;
            let ty = Type {
                oid: row.oid,
                class_oid: row.class_oid,
                name,
                schema: schema_ref,
                internal_name,
                comment: row.comment.clone(),
                comment_data: parse_comment_data(row.comment.as_deref(), token),
                kind,
            };

            let loc = {
                let schema = self
                    .db
                    .schema_at_mut(schema_loc)
                    .ok_or_else(|| integrity("schema", row.schema_oid))?;
                let index = schema.types.len();
                schema.types.push(ty)?;
                TypeLoc { schema: schema_loc, index }
            };
            self.db.type_locs.insert(row.oid, loc);
            if row.class_oid != 0 {
                self.db.type_class_locs.insert(row.class_oid, loc);
            }
            if row.base_type_oid.is_some()
                || row.subtype_oid.is_some()
                || row.range_type_oid.is_some()
            {
                fixups.push(Fixup {
                    loc,
                    base_type_oid: row.base_type_oid,
                    subtype_oid: row.subtype_oid,
                    range_type_oid: row.range_type_oid,
                });
            }
        }

        for fixup in fixups {
            let sql_type = match fixup.base_type_oid {
                Some(oid) => Some(self.type_ref(oid).ok_or_else(|| integrity("type", oid))?),
                None => None,
            };
            let subtype = fixup.subtype_oid.and_then(|oid| self.type_ref(oid));
            let range = fixup.range_type_oid.and_then(|oid| self.type_ref(oid));

            let ty = match self.db.type_at_mut(fixup.loc) {
                Some(ty) => ty,
                None => continue,
            };
            match &mut ty.kind {
                TypeKind::Domain { sql_type: slot, .. } => {
                    if let Some(sql_type) = sql_type {
                        *slot = sql_type;
                    }
                }
                TypeKind::Range { subtype: slot } => *slot = subtype,
                TypeKind::MultiRange { range: slot } => *slot = range,
                _ => {}
            }
        }
        Ok(())
    }

    fn add_entities(&mut self, results: &QueryResults) -> Result<(), StructureError> {
        for row in &results.entities {
            let schema_loc = *self
                .schema_locs
                .get(&row.schema_oid)
                .ok_or_else(|| integrity("schema", row.schema_oid))?;
            let schema_ref = self
                .schema_ref(row.schema_oid)
                .ok_or_else(|| integrity("schema", row.schema_oid))?;

            let kind = match EntityKind::from_code(&row.kind) {
                Some(kind) => kind,
                None => {
                    warn!(name = %row.name, kind = %row.kind, "skipping entity of unknown kind");
                    continue;
                }
            };

            let sequence = if kind == EntityKind::Sequence {
                match (row.start_value, row.minimum_value, row.maximum_value, row.increment) {
                    (Some(start), Some(min), Some(max), Some(increment)) => {
                        Some(SequenceAttributes {
                            start_value: start,
                            minimum_value: min,
                            maximum_value: max,
                            increment,
                            cache_size: row.cache_size.unwrap_or(1),
                            cycle: row.cycle.unwrap_or(false),
                        })
                    }
                    _ => None,
                }
            } else {
                None
            };

            let token = &self.db.config.comment_data_token;
            let entity = Entity {
                oid: row.oid,
                name: row.name.clone(),
                kind,
                schema: schema_ref,
                comment: row.comment.clone(),
                comment_data: parse_comment_data(row.comment.as_deref(), token),
                columns: Collection::new(),
                indexes: Collection::new(),
                constraints: Collection::new(),
                triggers: Collection::new(),
                foreign_keys_to_this: Vec::new(),
                sequence,
                m2o: Default::default(),
                o2m: Default::default(),
                m2m: Default::default(),
            };

            let loc = {
                let schema = self
                    .db
                    .schema_at_mut(schema_loc)
                    .ok_or_else(|| integrity("schema", row.schema_oid))?;
                let index = schema.entities.len();
                schema.entities.push(entity)?;
                EntityLoc { schema: schema_loc, index }
            };
            self.db.entity_locs.insert(row.oid, loc);

            // Every table has a backing composite type; link it back.
            if let Some(&type_loc) = self.db.type_class_locs.get(&row.oid) {
                if let Some(ty) = self.db.type_at_mut(type_loc) {
                    if let TypeKind::Composite { entity_oid, .. } = &mut ty.kind {
                        *entity_oid = Some(row.oid);
                    }
                }
            }
        }
        Ok(())
    }

    fn add_columns(&mut self, results: &QueryResults) -> Result<(), StructureError> {
        for row in &results.columns {
            let data_type = self
                .type_ref(row.type_oid)
                .ok_or_else(|| integrity("type", row.type_oid))?;

            let token = self.db.config.comment_data_token.clone();
            let build = |parent: ColumnParent| Column {
                name: row.name.clone(),
                attribute_number: row.attribute_number,
                parent,
                data_type: data_type.clone(),
                not_null: row.not_null,
                default: row.default.clone(),
                length: row.length,
                precision: row.precision,
                scale: row.scale,
                identity: row.identity.as_deref().and_then(IdentityKind::from_code),
                generated_expression: row.generated_expression.clone(),
                comment: row.comment.clone(),
                comment_data: parse_comment_data(row.comment.as_deref(), &token),
            };

            if row.parent_kind == "c" {
                let loc = *self
                    .db
                    .type_class_locs
                    .get(&row.class_oid)
                    .ok_or_else(|| integrity("composite type", row.class_oid))?;
                let parent_ref = {
                    let ty =
                        self.db.type_at(loc).ok_or_else(|| integrity("composite type", row.class_oid))?;
                    ObjectRef { oid: ty.oid, schema: ty.schema.name.clone(), name: ty.name.clone() }
                };
                let column = build(ColumnParent::CompositeType(parent_ref));
                let ty = self
                    .db
                    .type_at_mut(loc)
                    .ok_or_else(|| integrity("composite type", row.class_oid))?;
                match &mut ty.kind {
                    TypeKind::Composite { columns, .. } => columns.push(column)?,
                    _ => return Err(integrity("composite type", row.class_oid)),
                }
            } else {
                let loc = *self
                    .db
                    .entity_locs
                    .get(&row.class_oid)
                    .ok_or_else(|| integrity("entity", row.class_oid))?;
                let parent_ref = {
                    let entity =
                        self.db.entity_at(loc).ok_or_else(|| integrity("entity", row.class_oid))?;
                    entity.object_ref()
                };
                let column = build(ColumnParent::Entity(parent_ref));
                let entity = self
                    .db
                    .entity_at_mut(loc)
                    .ok_or_else(|| integrity("entity", row.class_oid))?;
                entity.columns.push(column)?;
            }
        }
        Ok(())
    }

    fn add_indexes(&mut self, results: &QueryResults) -> Result<(), StructureError> {
        for row in &results.indexes {
            let loc = *self
                .db
                .entity_locs
                .get(&row.table_oid)
                .ok_or_else(|| integrity("entity", row.table_oid))?;

            let (table_ref, elements) = {
                let entity = self
                    .db
                    .entity_at(loc)
                    .ok_or_else(|| integrity("entity", row.table_oid))?;
                let mut expressions = row.expressions.as_deref().unwrap_or(&[]).iter();
                let mut elements = Vec::with_capacity(row.column_positions.len());
                for &position in &row.column_positions {
                    if position > 0 {
                        let column = entity
                            .columns
                            .by_ordinal(position as i16)
                            .ok_or_else(|| integrity("index column", row.oid))?;
                        elements.push(IndexElement::Column {
                            name: column.name.clone(),
                            attribute_number: column.attribute_number,
                        });
                    } else {
                        let expression = expressions
                            .next()
                            .ok_or_else(|| integrity("index expression", row.oid))?;
                        elements.push(IndexElement::Expression(expression.clone()));
                    }
                }
                (entity.object_ref(), elements)
            };

            let token = &self.db.config.comment_data_token;
            let index = Index {
                oid: row.oid,
                name: row.name.clone(),
                table: table_ref,
                elements,
                unique: row.is_unique,
                primary: row.is_primary,
                exclusion: row.is_exclusion,
                predicate: row.predicate.clone(),
                comment: row.comment.clone(),
                comment_data: parse_comment_data(row.comment.as_deref(), token),
            };

            let entity = self
                .db
                .entity_at_mut(loc)
                .ok_or_else(|| integrity("entity", row.table_oid))?;
            let position = entity.indexes.len();
            entity.indexes.push(index)?;
            self.db.index_locs.insert(row.oid, IndexLoc { entity: loc, index: position });
        }
        Ok(())
    }

    fn add_constraints(&mut self, results: &QueryResults) -> Result<(), StructureError> {
        for row in &results.constraints {
            let category = match ConstraintCategory::from_code(&row.kind) {
                Some(category) => category,
                None => {
                    warn!(name = %row.name, kind = %row.kind, "skipping constraint of unknown kind");
                    continue;
                }
            };
            match category {
                ConstraintCategory::PrimaryKey
                | ConstraintCategory::Unique
                | ConstraintCategory::Exclusion => self.add_key_constraint(row, category)?,
                ConstraintCategory::Check => self.add_check_constraint(row)?,
                ConstraintCategory::ForeignKey => self.add_foreign_key(row)?,
            }
        }
        Ok(())
    }

    fn add_key_constraint(
        &mut self,
        row: &ConstraintRow,
        category: ConstraintCategory,
    ) -> Result<(), StructureError> {
        let table_oid = row.table_oid.ok_or_else(|| integrity("entity", row.oid))?;
        let loc = *self
            .db
            .entity_locs
            .get(&table_oid)
            .ok_or_else(|| integrity("entity", table_oid))?;
        let index_oid = row.index_oid.ok_or_else(|| integrity("index", row.oid))?;
        let index = self
            .db
            .index_by_oid(index_oid)
            .ok_or_else(|| integrity("index", index_oid))?;
        let index_ref = IndexRef { oid: index.oid, name: index.name.clone() };

        let kind = match category {
            ConstraintCategory::PrimaryKey => ConstraintKind::PrimaryKey { index: index_ref },
            ConstraintCategory::Unique => ConstraintKind::Unique { index: index_ref },
            _ => ConstraintKind::Exclusion { index: index_ref },
        };
        let constraint = self.build_constraint(row, kind);
        let entity = self
            .db
            .entity_at_mut(loc)
            .ok_or_else(|| integrity("entity", table_oid))?;
        entity.constraints.push(constraint)?;
        Ok(())
    }

    fn add_check_constraint(&mut self, row: &ConstraintRow) -> Result<(), StructureError> {
        let expression = row.expression.clone().unwrap_or_default();
        if let Some(type_oid) = row.type_oid {
            // Domain check.
            let domain_ref =
                self.type_ref(type_oid).ok_or_else(|| integrity("type", type_oid))?;
            let constraint = self.build_constraint(
                row,
                ConstraintKind::Check { expression, domain: Some(domain_ref) },
            );
            let loc = *self
                .db
                .type_locs
                .get(&type_oid)
                .ok_or_else(|| integrity("type", type_oid))?;
            let ty =
                self.db.type_at_mut(loc).ok_or_else(|| integrity("type", type_oid))?;
            match &mut ty.kind {
                TypeKind::Domain { checks, .. } => checks.push(constraint),
                _ => return Err(integrity("domain", type_oid)),
            }
        } else {
            let table_oid = row.table_oid.ok_or_else(|| integrity("entity", row.oid))?;
            let loc = *self
                .db
                .entity_locs
                .get(&table_oid)
                .ok_or_else(|| integrity("entity", table_oid))?;
            let constraint = self
                .build_constraint(row, ConstraintKind::Check { expression, domain: None });
            let entity = self
                .db
                .entity_at_mut(loc)
                .ok_or_else(|| integrity("entity", table_oid))?;
            entity.constraints.push(constraint)?;
        }
        Ok(())
    }

    fn add_foreign_key(&mut self, row: &ConstraintRow) -> Result<(), StructureError> {
        let table_oid = row.table_oid.ok_or_else(|| integrity("entity", row.oid))?;
        let source_loc = *self
            .db
            .entity_locs
            .get(&table_oid)
            .ok_or_else(|| integrity("entity", table_oid))?;

        // The referenced index is optional by design: it may have been
        // filtered out with its schema. The constraint is dropped, not the
        // build.
        let referenced = row.index_oid.and_then(|oid| {
            let loc = *self.db.index_locs.get(&oid)?;
            let index = self.db.entity_at(loc.entity)?.indexes.at(loc.index)?;
            let referenced_table = self.db.entity_at(loc.entity)?.object_ref();
            Some((
                IndexRef { oid: index.oid, name: index.name.clone() },
                referenced_table,
                index.column_names().iter().map(|s| s.to_string()).collect::<Vec<_>>(),
                loc.entity,
            ))
        });
        let (index_ref, referenced_table, referenced_columns, referenced_loc) = match referenced
        {
            Some(parts) => parts,
            None => {
                warn!(
                    constraint = %row.name,
                    "skipping foreign key with unresolved referenced index"
                );
                return Ok(());
            }
        };

        let (source_table, columns) = {
            let entity = self
                .db
                .entity_at(source_loc)
                .ok_or_else(|| integrity("entity", table_oid))?;
            let mut columns = Vec::new();
            for &attribute_number in row.columns.as_deref().unwrap_or(&[]) {
                let column = entity
                    .columns
                    .by_ordinal(attribute_number as i16)
                    .ok_or_else(|| integrity("constraint column", row.oid))?;
                columns.push(column.name.clone());
            }
            (entity.object_ref(), columns)
        };

        let foreign_key = ForeignKey {
            name: row.name.clone(),
            table: source_table,
            columns,
            referenced_table,
            referenced_index: index_ref,
            referenced_columns,
            on_update: row
                .on_update
                .as_deref()
                .and_then(ReferentialAction::from_code)
                .unwrap_or(ReferentialAction::NoAction),
            on_delete: row
                .on_delete
                .as_deref()
                .and_then(ReferentialAction::from_code)
                .unwrap_or(ReferentialAction::NoAction),
            match_type: row
                .match_type
                .as_deref()
                .and_then(MatchType::from_code)
                .unwrap_or(MatchType::Simple),
        };

        let constraint =
            self.build_constraint(row, ConstraintKind::ForeignKey(foreign_key.clone()));
        let entity = self
            .db
            .entity_at_mut(source_loc)
            .ok_or_else(|| integrity("entity", table_oid))?;
        entity.constraints.push(constraint)?;

        let referenced_entity = self
            .db
            .entity_at_mut(referenced_loc)
            .ok_or_else(|| integrity("entity", foreign_key.referenced_table.oid))?;
        referenced_entity.foreign_keys_to_this.push(foreign_key);
        Ok(())
    }

    fn build_constraint(&self, row: &ConstraintRow, kind: ConstraintKind) -> Constraint {
        Constraint {
            name: row.name.clone(),
            comment: row.comment.clone(),
            comment_data: parse_comment_data(
                row.comment.as_deref(),
                &self.db.config.comment_data_token,
            ),
            kind,
        }
    }

    fn add_functions(&mut self, results: &QueryResults) -> Result<(), StructureError> {
        for row in &results.functions {
            let schema_loc = *self
                .schema_locs
                .get(&row.schema_oid)
                .ok_or_else(|| integrity("schema", row.schema_oid))?;
            let schema_ref = self
                .schema_ref(row.schema_oid)
                .ok_or_else(|| integrity("schema", row.schema_oid))?;

            let kind = match FunctionKind::from_code(&row.kind) {
                Some(kind) => kind,
                None => {
                    warn!(name = %row.name, kind = %row.kind, "skipping function of unknown kind");
                    continue;
                }
            };

            let mut arguments = Vec::with_capacity(row.argument_type_oids.len());
            let mut unresolved = None;
            for (position, &type_oid) in row.argument_type_oids.iter().enumerate() {
                match self.type_ref(type_oid) {
                    Some(data_type) => {
                        let name = row
                            .argument_names
                            .as_ref()
                            .and_then(|names| names.get(position))
                            .filter(|name| !name.is_empty())
                            .cloned();
                        let mode = row
                            .argument_modes
                            .as_ref()
                            .and_then(|modes| modes.get(position))
                            .and_then(|mode| crate::kind::ArgumentMode::from_code(mode))
                            .unwrap_or(crate::kind::ArgumentMode::In);
                        arguments.push(FunctionArgument { name, data_type, mode });
                    }
                    None => {
                        unresolved = Some(type_oid);
                        break;
                    }
                }
            }
            let return_type = match row.return_type_oid {
                Some(oid) => match self.type_ref(oid) {
                    Some(data_type) => Some(data_type),
                    None => {
                        unresolved = Some(oid);
                        None
                    }
                },
                None => None,
            };
            if let Some(oid) = unresolved {
                warn!(name = %row.name, type_oid = oid, "skipping function with unresolved type");
                continue;
            }

            let signature = format!(
                "{}({})",
                row.name,
                arguments
                    .iter()
                    .map(|a| a.data_type.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            let token = &self.db.config.comment_data_token;
            let function = Function {
                oid: row.oid,
                name: row.name.clone(),
                signature,
                schema: schema_ref,
                kind,
                arguments,
                return_type,
                returns_set: row.returns_set,
                volatility: Volatility::from_code(&row.volatility).unwrap_or(Volatility::Volatile),
                is_strict: row.is_strict,
                parallel_safety: ParallelSafety::from_code(&row.parallel_safety)
                    .unwrap_or(ParallelSafety::Unsafe),
                language: row.language.clone(),
                comment: row.comment.clone(),
                comment_data: parse_comment_data(row.comment.as_deref(), token),
            };

            let loc = {
                let schema = self
                    .db
                    .schema_at_mut(schema_loc)
                    .ok_or_else(|| integrity("schema", row.schema_oid))?;
                let index = schema.functions.len();
                schema.functions.push(function)?;
                crate::model::FunctionLoc { schema: schema_loc, index }
            };
            self.db.function_locs.insert(row.oid, loc);
        }
        Ok(())
    }

    fn add_triggers(&mut self, results: &QueryResults) -> Result<(), StructureError> {
        for row in &results.triggers {
            let loc = *self
                .db
                .entity_locs
                .get(&row.table_oid)
                .ok_or_else(|| integrity("entity", row.table_oid))?;

            // Optional by design: the function may live in a filtered-out
            // schema. The trigger is dropped, not the build.
            let function_ref = match self.db.function_by_oid(row.function_oid) {
                Some(function) => ObjectRef {
                    oid: function.oid,
                    schema: function.schema.name.clone(),
                    name: function.name.clone(),
                },
                None => {
                    warn!(
                        trigger = %row.name,
                        function_oid = row.function_oid,
                        "skipping trigger with unresolved function"
                    );
                    continue;
                }
            };

            let table_ref = self
                .db
                .entity_at(loc)
                .ok_or_else(|| integrity("entity", row.table_oid))?
                .object_ref();

            let token = &self.db.config.comment_data_token;
            let trigger = Trigger {
                oid: row.oid,
                name: row.name.clone(),
                table: table_ref,
                function: function_ref,
                timing: crate::kind::trigger_timing(row.tgtype),
                events: crate::kind::trigger_events(row.tgtype),
                orientation: crate::kind::trigger_orientation(row.tgtype),
                condition: row.condition.clone(),
                comment: row.comment.clone(),
                comment_data: parse_comment_data(row.comment.as_deref(), token),
            };

            let entity = self
                .db
                .entity_at_mut(loc)
                .ok_or_else(|| integrity("entity", row.table_oid))?;
            entity.triggers.push(trigger)?;
        }
        Ok(())
    }
}
