//! Field update builders.

use crate::map;
use crate::operator::{Operator, key, verb};
use crate::value::Value;

/// Replace the field with `value`, verbatim (including null).
pub fn set(value: impl Into<Value>) -> Operator {
    Operator::new(verb::SET, value)
}

/// Increment by `amount`, or by `1` when `None`.
pub fn inc(amount: Option<Value>) -> Operator {
    Operator::new(verb::INC, amount.unwrap_or_else(|| Value::from(1)))
}

/// Multiply by `factor`, or by `1` when `None`.
pub fn mul(factor: Option<Value>) -> Operator {
    Operator::new(verb::MUL, factor.unwrap_or_else(|| Value::from(1)))
}

pub fn min(value: impl Into<Value>) -> Operator {
    Operator::new(verb::MIN, value)
}

pub fn max(value: impl Into<Value>) -> Operator {
    Operator::new(verb::MAX, value)
}

/// Rename the field to `field`.
pub fn rename(field: impl Into<String>) -> Operator {
    Operator::new(verb::RENAME, field.into())
}

/// Assign `value` only when an upsert inserts a new document.
pub fn set_on_insert(value: impl Into<Value>) -> Operator {
    Operator::new(verb::SET_ON_INSERT, value)
}

/// Delete the field. The payload is an empty-string placeholder.
pub fn unset() -> Operator {
    Operator::new(verb::UNSET, "")
}

/// Representation written by [`current_date`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateKind {
    #[default]
    Date,
    Timestamp,
}

impl DateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DateKind::Date => "date",
            DateKind::Timestamp => "timestamp",
        }
    }
}

/// Set the field to the store's current time: `{ $type: "date" | "timestamp" }`.
pub fn current_date(kind: DateKind) -> Operator {
    Operator::new(verb::CURRENT_DATE, map! { key::TYPE => kind.as_str() })
}

/// Shorthand for `current_date(DateKind::Timestamp)`.
pub fn timestamp() -> Operator {
    current_date(DateKind::Timestamp)
}
