//! Array update builders.
//!
//! `push` and `add_to_set` append one value, or many once `each()` has been
//! requested. After `each()`, `push` also accepts `sort`, `slice` and
//! `position` refinements in any order; the payload always lists them as
//! `$each`, `$sort`, `$slice`, `$position` regardless of call order.
//!
//! `positional` addresses one or all elements of an array field and relays a
//! single field operator to them.

use super::Build;
use super::field::{self, DateKind};
use crate::error::BuildError;
use crate::operator::{Operator, key, verb};
use crate::value::{Map, Value};
use regex::Regex;
use std::sync::LazyLock;

/// Wrap a non-array value as a one-element list.
fn into_elements(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

const REQUIRES_EACH: &str = "is available only after `each`";

/// Draft of an append operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Push {
    value: Option<Value>,
    each: bool,
    sort: Option<Value>,
    slice: Option<i64>,
    position: Option<i64>,
}

/// Append `value` (null when `None`). Chain `each()` to append many.
pub fn push(value: Option<Value>) -> Push {
    Push {
        value,
        each: false,
        sort: None,
        slice: None,
        position: None,
    }
}

/// Keep only `count` elements after appending nothing; negative keeps from the end.
///
/// Same payload as `push(None).each().slice(count)`.
pub fn slice(count: i64) -> Push {
    push(None).each().with_slice(count)
}

/// Sort the array (ascending when `None`) after appending nothing.
///
/// Same payload as `push(None).each().sort(order)`.
pub fn sort(order: Option<Value>) -> Push {
    push(None).each().with_sort(order)
}

impl Push {
    /// Treat the value as a list of elements to append.
    pub fn each(mut self) -> Self {
        self.each = true;
        self
    }

    /// Cap the number of elements kept; negative counts keep from the end.
    pub fn slice(self, count: i64) -> Result<Self, BuildError> {
        self.require_each("slice")?;
        Ok(self.with_slice(count))
    }

    /// Order the elements; `None` means ascending (`1`).
    pub fn sort(self, order: Option<Value>) -> Result<Self, BuildError> {
        self.require_each("sort")?;
        Ok(self.with_sort(order))
    }

    /// Insert at zero-based `index` instead of at the end.
    pub fn position(mut self, index: i64) -> Result<Self, BuildError> {
        self.require_each("position")?;
        self.position = Some(index);
        Ok(self)
    }

    fn require_each(&self, refinement: &'static str) -> Result<(), BuildError> {
        if self.each {
            Ok(())
        } else {
            Err(BuildError::Configuration {
                refinement,
                reason: REQUIRES_EACH,
            })
        }
    }

    fn with_slice(mut self, count: i64) -> Self {
        self.slice = Some(count);
        self
    }

    fn with_sort(mut self, order: Option<Value>) -> Self {
        self.sort = Some(order.unwrap_or_else(|| Value::from(1)));
        self
    }

    /// The payload as it would be written right now.
    pub fn payload(&self) -> Value {
        if !self.each {
            return self.value.clone().unwrap_or_default();
        }

        let elements = self.value.clone().map(into_elements).unwrap_or_default();
        let mut payload = Map::new();
        payload.insert(key::EACH.to_string(), Value::Array(elements));
        if let Some(sort) = &self.sort {
            payload.insert(key::SORT.to_string(), sort.clone());
        }
        if let Some(slice) = self.slice {
            payload.insert(key::SLICE.to_string(), Value::from(slice));
        }
        if let Some(position) = self.position {
            payload.insert(key::POSITION.to_string(), Value::from(position));
        }
        Value::Map(payload)
    }

    pub fn into_operator(self) -> Operator {
        Operator::new(verb::PUSH, self.payload())
    }
}

impl Build for Push {
    fn build(self) -> Result<Operator, BuildError> {
        Ok(self.into_operator())
    }
}

impl From<Push> for Value {
    fn from(push: Push) -> Self {
        Value::Operator(push.into_operator())
    }
}

/// Draft of an add-unless-present operation.
#[derive(Debug, Clone, PartialEq)]
pub struct AddToSet {
    value: Option<Value>,
    each: bool,
}

/// Add `value` (null when `None`) unless already present. Chain `each()` to add many.
pub fn add_to_set(value: Option<Value>) -> AddToSet {
    AddToSet { value, each: false }
}

impl AddToSet {
    /// Treat the value as a list of elements to add.
    pub fn each(mut self) -> Self {
        self.each = true;
        self
    }

    pub fn payload(&self) -> Value {
        if !self.each {
            return self.value.clone().unwrap_or_default();
        }
        let elements = self.value.clone().map(into_elements).unwrap_or_default();
        let mut payload = Map::new();
        payload.insert(key::EACH.to_string(), Value::Array(elements));
        Value::Map(payload)
    }

    pub fn into_operator(self) -> Operator {
        Operator::new(verb::ADD_TO_SET, self.payload())
    }
}

impl Build for AddToSet {
    fn build(self) -> Result<Operator, BuildError> {
        Ok(self.into_operator())
    }
}

impl From<AddToSet> for Value {
    fn from(add: AddToSet) -> Self {
        Value::Operator(add.into_operator())
    }
}

/// Draft of a remove-first-or-last operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pop {
    direction: i64,
}

/// Remove an end element: `1` (default) removes the last, `-1` the first.
pub fn pop(direction: Option<i64>) -> Pop {
    Pop {
        direction: direction.unwrap_or(1),
    }
}

impl Pop {
    pub fn first(self) -> Self {
        Self { direction: -1 }
    }

    pub fn last(self) -> Self {
        Self { direction: 1 }
    }

    pub fn direction(&self) -> i64 {
        self.direction
    }

    pub fn into_operator(self) -> Operator {
        Operator::new(verb::POP, self.direction)
    }
}

impl Build for Pop {
    fn build(self) -> Result<Operator, BuildError> {
        Ok(self.into_operator())
    }
}

impl From<Pop> for Value {
    fn from(pop: Pop) -> Self {
        Value::Operator(pop.into_operator())
    }
}

/// Remove every element equal to `value`, or to any member when given a list.
pub fn pull_all(value: impl Into<Value>) -> Operator {
    Operator::new(verb::PULL_ALL, Value::Array(into_elements(value.into())))
}

/// Remove elements matching `value`; a list becomes an `$in` matcher.
pub fn pull(value: impl Into<Value>) -> Operator {
    let payload = match value.into() {
        Value::Array(items) => {
            let mut matcher = Map::new();
            matcher.insert(key::IN.to_string(), Value::Array(items));
            Value::Map(matcher)
        }
        other => other,
    };
    Operator::new(verb::PULL, payload)
}

/// Which array element(s) a positional builder targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Index(usize),
    Field(String),
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Selector::Index(index)
    }
}

impl From<&str> for Selector {
    fn from(field: &str) -> Self {
        Selector::Field(field.to_string())
    }
}

impl From<String> for Selector {
    fn from(field: String) -> Self {
        Selector::Field(field)
    }
}

/// Digits followed by end of text or a `.` address an element by index.
static INDEX_SELECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.|$)").expect("index selector pattern compiles"));

/// Path segment a positional selector expands to.
///
/// * none or empty: `$`
/// * `Index(n)` or text such as `"3"` / `"2.name"`: verbatim
/// * text starting with `[`: `$[...]` (all or filtered elements)
/// * any other text: `$.<text>`
pub fn positional_tag(selector: Option<&Selector>) -> String {
    match selector {
        None => "$".to_string(),
        Some(Selector::Index(index)) => index.to_string(),
        Some(Selector::Field(field)) if field.is_empty() => "$".to_string(),
        Some(Selector::Field(field)) if INDEX_SELECTOR.is_match(field) => field.clone(),
        Some(Selector::Field(field)) if field.starts_with('[') => format!("${}", field),
        Some(Selector::Field(field)) => format!("$.{}", field),
    }
}

/// Verbs a positional builder may relay.
const POSITIONAL_VERBS: [&str; 8] = [
    verb::SET,
    verb::INC,
    verb::MUL,
    verb::UNSET,
    verb::RENAME,
    verb::MIN,
    verb::MAX,
    verb::CURRENT_DATE,
];

/// Draft of an update addressed to matched array element(s).
#[derive(Debug, Clone, PartialEq)]
pub struct Positional {
    tag: String,
    value: Option<Operator>,
}

/// Address the matched element (`None`), an index, a field within the
/// matched element, or all/filtered elements (`"[]"`, `"[id].field"`).
pub fn positional(selector: Option<Selector>) -> Positional {
    Positional {
        tag: positional_tag(selector.as_ref()),
        value: None,
    }
}

impl Positional {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Relay `value`: plain data is wrapped in `$set`, operators must be one
    /// of the field verbs the positional form supports.
    pub fn apply(mut self, value: impl Into<Value>) -> Result<Self, BuildError> {
        let op = match value.into() {
            Value::Operator(op) => {
                if !POSITIONAL_VERBS.contains(&op.verb()) {
                    return Err(BuildError::UnsupportedOperator {
                        verb: op.verb().to_string(),
                        tag: self.tag,
                    });
                }
                op
            }
            plain => field::set(plain),
        };
        self.value = Some(op);
        Ok(self)
    }

    /// Fuse `value` into the matched element(s) field by field.
    pub fn merge(self, value: impl Into<Value>) -> Operator {
        Operator::new(self.tag, Operator::new(verb::MERGE, value))
    }

    pub fn set(self, value: impl Into<Value>) -> Operator {
        self.relay(field::set(value))
    }

    pub fn inc(self, amount: Option<Value>) -> Operator {
        self.relay(field::inc(amount))
    }

    pub fn mul(self, factor: Option<Value>) -> Operator {
        self.relay(field::mul(factor))
    }

    pub fn unset(self) -> Operator {
        self.relay(field::unset())
    }

    pub fn rename(self, field: impl Into<String>) -> Operator {
        self.relay(field::rename(field))
    }

    pub fn min(self, value: impl Into<Value>) -> Operator {
        self.relay(field::min(value))
    }

    pub fn max(self, value: impl Into<Value>) -> Operator {
        self.relay(field::max(value))
    }

    pub fn current_date(self, kind: DateKind) -> Operator {
        self.relay(field::current_date(kind))
    }

    pub fn timestamp(self) -> Operator {
        self.relay(field::timestamp())
    }

    fn relay(self, op: Operator) -> Operator {
        Operator::new(self.tag, op)
    }

    /// The relayed operator.
    pub fn payload(&self) -> Result<Value, BuildError> {
        self.value
            .clone()
            .map(Value::Operator)
            .ok_or_else(|| BuildError::MissingValue {
                tag: self.tag.clone(),
            })
    }
}

impl Build for Positional {
    fn build(self) -> Result<Operator, BuildError> {
        match self.value {
            Some(op) => Ok(Operator::new(self.tag, op)),
            None => Err(BuildError::MissingValue { tag: self.tag }),
        }
    }
}
