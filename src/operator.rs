//! Operator markers: a verb plus the payload the verb applies.
//!
//! An [`Operator`] placed anywhere in a tree tells the flatten engine "apply
//! this verb here" instead of "replace this field with literal data". The
//! engine only ever reads an operator through [`operator_type`] and
//! [`operator_payload`] (or the equivalent methods), which answer `None` for
//! anything that is not an operator.

use crate::value::Value;

/// Verb names emitted by the builders.
pub mod verb {
    pub const SET: &str = "$set";
    pub const INC: &str = "$inc";
    pub const MUL: &str = "$mul";
    pub const RENAME: &str = "$rename";
    pub const SET_ON_INSERT: &str = "$setOnInsert";
    pub const UNSET: &str = "$unset";
    pub const MIN: &str = "$min";
    pub const MAX: &str = "$max";
    pub const CURRENT_DATE: &str = "$currentDate";
    pub const BIT: &str = "$bit";
    pub const PUSH: &str = "$push";
    pub const ADD_TO_SET: &str = "$addToSet";
    pub const POP: &str = "$pop";
    pub const PULL: &str = "$pull";
    pub const PULL_ALL: &str = "$pullAll";

    /// Fuses a sub-tree into the enclosing document instead of writing one leaf.
    pub const MERGE: &str = "merge";
}

/// Keys that appear inside operator payloads.
pub mod key {
    pub const EACH: &str = "$each";
    pub const SORT: &str = "$sort";
    pub const SLICE: &str = "$slice";
    pub const POSITION: &str = "$position";
    pub const IN: &str = "$in";
    pub const TYPE: &str = "$type";
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    verb: String,
    payload: Box<Value>,
}

impl Operator {
    pub fn new(verb: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self {
            verb: verb.into(),
            payload: Box::new(payload.into()),
        }
    }

    pub fn verb(&self) -> &str {
        &self.verb
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.verb, *self.payload)
    }
}

pub fn is_operator(value: &Value) -> bool {
    value.as_operator().is_some()
}

pub fn operator_type(value: &Value) -> Option<&str> {
    value.as_operator().map(Operator::verb)
}

pub fn operator_payload(value: &Value) -> Option<&Value> {
    value.as_operator().map(Operator::payload)
}
