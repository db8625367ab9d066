//! The tree the flatten engine consumes.
//!
//! A [`Value`] is either a leaf ([`Atomic`]), a container (`Map` or `Array`),
//! or an [`Operator`] marker. Operators are a variant of their own, so a map's
//! keys never include operator bookkeeping.

pub mod atomic;

pub use atomic::{Atomic, ForeignKind, ForeignLeaf};

use crate::operator::Operator;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Keyed container. Iteration follows insertion order.
pub type Map = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Atomic(Atomic),
    Map(Map),
    Array(Vec<Value>),
    Operator(Operator),
}

impl Value {
    pub const NULL: Value = Value::Atomic(Atomic::Null);

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Atomic(Atomic::Null))
    }

    /// True for a map or array with no entries.
    pub fn is_empty_container(&self) -> bool {
        match self {
            Value::Map(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn as_operator(&self) -> Option<&Operator> {
        match self {
            Value::Operator(op) => Some(op),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a direct child of a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::NULL
    }
}

impl From<Atomic> for Value {
    fn from(atomic: Atomic) -> Self {
        Value::Atomic(atomic)
    }
}

impl From<Operator> for Value {
    fn from(op: Operator) -> Self {
        Value::Operator(op)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::NULL)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::NULL
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Atomic(Atomic::Bool(b))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Atomic(Atomic::Int(i64::from(n)))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Atomic(Atomic::Int(i64::from(n)))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Atomic(Atomic::Int(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Atomic(Atomic::Float(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Atomic(Atomic::Text(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Atomic(Atomic::Text(s))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(at: DateTime<Utc>) -> Self {
        Value::Atomic(Atomic::DateTime(at))
    }
}

impl From<ForeignLeaf> for Value {
    fn from(leaf: ForeignLeaf) -> Self {
        Value::Atomic(Atomic::Foreign(leaf))
    }
}

/// Build a [`Value::Map`] from `key => value` pairs.
///
/// ```
/// use updoc::{map, Value};
///
/// let tree = map! { "name" => "Jack", "address" => map! { "city" => "Boston" } };
/// assert_eq!(tree.get("name"), Some(&Value::from("Jack")));
/// ```
#[macro_export]
macro_rules! map {
    () => {
        $crate::Value::Map($crate::Map::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Map::new();
        $(
            map.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        $crate::Value::Map(map)
    }};
}
