//! Catalog discriminators.
//!
//! PostgreSQL tags object kinds with one-letter codes (`pg_class.relkind`,
//! `pg_type.typtype`, `pg_proc.prokind`, `pg_constraint.contype`, ...).
//! Every letter map lives here so the bindings cannot diverge.

use serde::{Deserialize, Serialize};

/// Kind of a relation in `pg_class`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// `r` (ordinary table) or `p` (partitioned table).
    Table,
    /// `v`
    View,
    /// `m`
    MaterializedView,
    /// `S`
    Sequence,
}

impl EntityKind {
    pub fn from_code(code: &str) -> Option<EntityKind> {
        match code {
            "r" | "p" => Some(EntityKind::Table),
            "v" => Some(EntityKind::View),
            "m" => Some(EntityKind::MaterializedView),
            "S" => Some(EntityKind::Sequence),
            _ => None,
        }
    }
}

/// Kind of a type in `pg_type.typtype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCategory {
    /// `b`
    Base,
    /// `c`
    Composite,
    /// `d`
    Domain,
    /// `e`
    Enum,
    /// `p`
    Pseudo,
    /// `r`
    Range,
    /// `m`
    MultiRange,
}

impl TypeCategory {
    pub fn from_code(code: &str) -> Option<TypeCategory> {
        match code {
            "b" => Some(TypeCategory::Base),
            "c" => Some(TypeCategory::Composite),
            "d" => Some(TypeCategory::Domain),
            "e" => Some(TypeCategory::Enum),
            "p" => Some(TypeCategory::Pseudo),
            "r" => Some(TypeCategory::Range),
            "m" => Some(TypeCategory::MultiRange),
            _ => None,
        }
    }
}

/// Kind of a function in `pg_proc.prokind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionKind {
    /// `f`
    Normal,
    /// `p`
    Procedure,
    /// `a`
    Aggregate,
    /// `w`
    Window,
}

impl FunctionKind {
    pub fn from_code(code: &str) -> Option<FunctionKind> {
        match code {
            "f" => Some(FunctionKind::Normal),
            "p" => Some(FunctionKind::Procedure),
            "a" => Some(FunctionKind::Aggregate),
            "w" => Some(FunctionKind::Window),
            _ => None,
        }
    }
}

/// Kind of a constraint in `pg_constraint.contype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// `p`
    PrimaryKey,
    /// `u`
    Unique,
    /// `c`
    Check,
    /// `x`
    Exclusion,
    /// `f`
    ForeignKey,
}

impl ConstraintCategory {
    pub fn from_code(code: &str) -> Option<ConstraintCategory> {
        match code {
            "p" => Some(ConstraintCategory::PrimaryKey),
            "u" => Some(ConstraintCategory::Unique),
            "c" => Some(ConstraintCategory::Check),
            "x" => Some(ConstraintCategory::Exclusion),
            "f" => Some(ConstraintCategory::ForeignKey),
            _ => None,
        }
    }
}

/// Referential action on a foreign key (`confupdtype` / `confdeltype`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferentialAction {
    /// `a`
    NoAction,
    /// `r`
    Restrict,
    /// `c`
    Cascade,
    /// `n`
    SetNull,
    /// `d`
    SetDefault,
}

impl ReferentialAction {
    pub fn from_code(code: &str) -> Option<ReferentialAction> {
        match code {
            "a" => Some(ReferentialAction::NoAction),
            "r" => Some(ReferentialAction::Restrict),
            "c" => Some(ReferentialAction::Cascade),
            "n" => Some(ReferentialAction::SetNull),
            "d" => Some(ReferentialAction::SetDefault),
            _ => None,
        }
    }

    /// SQL spelling, e.g. `SET NULL`.
    pub fn as_sql(&self) -> &'static str {
        match self {
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::SetDefault => "SET DEFAULT",
        }
    }
}

/// Match type of a foreign key (`confmatchtype`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    /// `f`
    Full,
    /// `p`
    Partial,
    /// `s`
    Simple,
}

impl MatchType {
    pub fn from_code(code: &str) -> Option<MatchType> {
        match code {
            "f" => Some(MatchType::Full),
            "p" => Some(MatchType::Partial),
            "s" => Some(MatchType::Simple),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            MatchType::Full => "FULL",
            MatchType::Partial => "PARTIAL",
            MatchType::Simple => "SIMPLE",
        }
    }
}

/// Function volatility (`provolatile`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Volatility {
    /// `i`
    Immutable,
    /// `s`
    Stable,
    /// `v`
    Volatile,
}

impl Volatility {
    pub fn from_code(code: &str) -> Option<Volatility> {
        match code {
            "i" => Some(Volatility::Immutable),
            "s" => Some(Volatility::Stable),
            "v" => Some(Volatility::Volatile),
            _ => None,
        }
    }
}

/// Parallel safety of a function (`proparallel`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParallelSafety {
    /// `s`
    Safe,
    /// `r`
    Restricted,
    /// `u`
    Unsafe,
}

impl ParallelSafety {
    pub fn from_code(code: &str) -> Option<ParallelSafety> {
        match code {
            "s" => Some(ParallelSafety::Safe),
            "r" => Some(ParallelSafety::Restricted),
            "u" => Some(ParallelSafety::Unsafe),
            _ => None,
        }
    }
}

/// Argument mode in `pg_proc.proargmodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgumentMode {
    /// `i`
    In,
    /// `o`
    Out,
    /// `b`
    InOut,
    /// `v`
    Variadic,
    /// `t`
    Table,
}

impl ArgumentMode {
    pub fn from_code(code: &str) -> Option<ArgumentMode> {
        match code {
            "i" => Some(ArgumentMode::In),
            "o" => Some(ArgumentMode::Out),
            "b" => Some(ArgumentMode::InOut),
            "v" => Some(ArgumentMode::Variadic),
            "t" => Some(ArgumentMode::Table),
            _ => None,
        }
    }
}

/// Identity column kind (`pg_attribute.attidentity`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityKind {
    /// `a`
    GeneratedAlways,
    /// `d`
    GeneratedByDefault,
}

impl IdentityKind {
    pub fn from_code(code: &str) -> Option<IdentityKind> {
        match code {
            "a" => Some(IdentityKind::GeneratedAlways),
            "d" => Some(IdentityKind::GeneratedByDefault),
            _ => None,
        }
    }
}

/// Trigger firing time, decoded from `pg_trigger.tgtype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerTiming {
    Before,
    After,
    InsteadOf,
}

/// Trigger event, decoded from `pg_trigger.tgtype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerEvent {
    Insert,
    Delete,
    Update,
    Truncate,
}

/// Trigger orientation, decoded from `pg_trigger.tgtype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerOrientation {
    Row,
    Statement,
}

// tgtype bit layout, per the server's trigger.h.
const TRIGGER_TYPE_ROW: i16 = 1 << 0;
const TRIGGER_TYPE_BEFORE: i16 = 1 << 1;
const TRIGGER_TYPE_INSERT: i16 = 1 << 2;
const TRIGGER_TYPE_DELETE: i16 = 1 << 3;
const TRIGGER_TYPE_UPDATE: i16 = 1 << 4;
const TRIGGER_TYPE_TRUNCATE: i16 = 1 << 5;
const TRIGGER_TYPE_INSTEAD: i16 = 1 << 6;

pub fn trigger_timing(tgtype: i16) -> TriggerTiming {
    if tgtype & TRIGGER_TYPE_INSTEAD != 0 {
        TriggerTiming::InsteadOf
    } else if tgtype & TRIGGER_TYPE_BEFORE != 0 {
        TriggerTiming::Before
    } else {
        TriggerTiming::After
    }
}

pub fn trigger_orientation(tgtype: i16) -> TriggerOrientation {
    if tgtype & TRIGGER_TYPE_ROW != 0 {
        TriggerOrientation::Row
    } else {
        TriggerOrientation::Statement
    }
}

pub fn trigger_events(tgtype: i16) -> Vec<TriggerEvent> {
    let mut events = Vec::new();
    if tgtype & TRIGGER_TYPE_INSERT != 0 {
        events.push(TriggerEvent::Insert);
    }
    if tgtype & TRIGGER_TYPE_DELETE != 0 {
        events.push(TriggerEvent::Delete);
    }
    if tgtype & TRIGGER_TYPE_UPDATE != 0 {
        events.push(TriggerEvent::Update);
    }
    if tgtype & TRIGGER_TYPE_TRUNCATE != 0 {
        events.push(TriggerEvent::Truncate);
    }
    events
}
