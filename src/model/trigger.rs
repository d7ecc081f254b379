//! Triggers.

use serde_json::Value;

use crate::collection::Keyed;
use crate::kind::{TriggerEvent, TriggerOrientation, TriggerTiming};
use crate::model::ObjectRef;

/// A trigger on a table or view, referencing the function it executes.
#[derive(Debug, Clone)]
pub struct Trigger {
    pub(crate) oid: u32,
    pub(crate) name: String,
    pub(crate) table: ObjectRef,
    pub(crate) function: ObjectRef,
    pub(crate) timing: TriggerTiming,
    pub(crate) events: Vec<TriggerEvent>,
    pub(crate) orientation: TriggerOrientation,
    pub(crate) condition: Option<String>,
    pub(crate) comment: Option<String>,
    pub(crate) comment_data: Option<Value>,
}

impl Trigger {
    pub fn oid(&self) -> u32 {
        self.oid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &ObjectRef {
        &self.table
    }

    /// The trigger function; the full object is reachable through
    /// [`Db::function_by_oid`](crate::Db::function_by_oid).
    pub fn function(&self) -> &ObjectRef {
        &self.function
    }

    pub fn timing(&self) -> TriggerTiming {
        self.timing
    }

    pub fn events(&self) -> &[TriggerEvent] {
        &self.events
    }

    pub fn orientation(&self) -> TriggerOrientation {
        self.orientation
    }

    /// `WHEN` condition text, if any.
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn comment_data(&self) -> Option<&Value> {
        self.comment_data.as_ref()
    }
}

impl Keyed for Trigger {
    fn key_name(&self) -> &str {
        &self.name
    }

    fn key_oid(&self) -> Option<u32> {
        Some(self.oid)
    }
}
