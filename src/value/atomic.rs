//! Leaf values the flatten walk never descends into.
//!
//! Native leaves cover what a JSON-ish host carries directly (null, booleans,
//! numbers, text) plus date-time, binary and regular expressions. Everything
//! else a document store treats as a scalar is a [`ForeignLeaf`]: an opaque
//! textual representation tagged with a [`ForeignKind`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum Atomic {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(DateTime<Utc>),
    Binary(Vec<u8>),
    Regex { pattern: String, flags: String },
    Foreign(ForeignLeaf),
}

/// Store-native scalar carried verbatim (decimal, object id, min/max key, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignLeaf {
    pub kind: ForeignKind,
    #[serde(default)]
    pub value: String,
}

impl ForeignLeaf {
    pub fn new(kind: ForeignKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ForeignKind {
    Binary,
    Code,
    #[serde(rename = "DBRef")]
    DbRef,
    Decimal128,
    Double,
    Int32,
    Long,
    MaxKey,
    MinKey,
    #[serde(alias = "ObjectID")]
    ObjectId,
    #[serde(rename = "BSONRegExp")]
    RegExp,
    Symbol,
    Timestamp,
}
