//! Functions, procedures, aggregates and window functions.

use serde_json::Value;

use crate::collection::Keyed;
use crate::kind::{ArgumentMode, FunctionKind, ParallelSafety, Volatility};
use crate::model::{ObjectRef, SchemaRef};

/// One argument of a [`Function`], in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionArgument {
    pub(crate) name: Option<String>,
    pub(crate) data_type: ObjectRef,
    pub(crate) mode: ArgumentMode,
}

impl FunctionArgument {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn data_type(&self) -> &ObjectRef {
        &self.data_type
    }

    pub fn mode(&self) -> ArgumentMode {
        self.mode
    }
}

/// A function-like object from `pg_proc`.
///
/// Overloads share a name, so the collection key is the full signature
/// (`concat(text, text)`); [`Function::name`] stays the bare name.
#[derive(Debug, Clone)]
pub struct Function {
    pub(crate) oid: u32,
    pub(crate) name: String,
    pub(crate) signature: String,
    pub(crate) schema: SchemaRef,
    pub(crate) kind: FunctionKind,
    pub(crate) arguments: Vec<FunctionArgument>,
    pub(crate) return_type: Option<ObjectRef>,
    pub(crate) returns_set: bool,
    pub(crate) volatility: Volatility,
    pub(crate) is_strict: bool,
    pub(crate) parallel_safety: ParallelSafety,
    pub(crate) language: String,
    pub(crate) comment: Option<String>,
    pub(crate) comment_data: Option<Value>,
}

impl Function {
    pub fn oid(&self) -> u32 {
        self.oid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `name(argtype, ...)` — the collection key.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema.name, self.name)
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// Arguments in declaration order.
    pub fn arguments(&self) -> &[FunctionArgument] {
        &self.arguments
    }

    /// Return type; procedures have none.
    pub fn return_type(&self) -> Option<&ObjectRef> {
        self.return_type.as_ref()
    }

    pub fn returns_set(&self) -> bool {
        self.returns_set
    }

    pub fn volatility(&self) -> Volatility {
        self.volatility
    }

    pub fn is_strict(&self) -> bool {
        self.is_strict
    }

    pub fn parallel_safety(&self) -> ParallelSafety {
        self.parallel_safety
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn comment_data(&self) -> Option<&Value> {
        self.comment_data.as_ref()
    }
}

impl Keyed for Function {
    fn key_name(&self) -> &str {
        &self.signature
    }

    fn key_oid(&self) -> Option<u32> {
        Some(self.oid)
    }
}
