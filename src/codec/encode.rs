//! [`Value`] → JSON, in the same tagged shape [`super::decode`] reads.

use super::tag;
use crate::Result;
use crate::flatten::{Flattened, InstructionDocument};
use crate::operator::Operator;
use crate::value::{Atomic, Value};

use chrono::SecondsFormat;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;

#[derive(Serialize)]
struct RegexBody<'a> {
    pattern: &'a str,
    flags: &'a str,
}

#[derive(Serialize)]
struct OperatorBody<'a> {
    #[serde(rename = "type")]
    verb: &'a str,
    payload: &'a Value,
}

fn tagged<S, T>(serializer: S, tag: &str, body: &T) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize + ?Sized,
{
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(tag, body)?;
    map.end()
}

impl Serialize for Atomic {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Atomic::Null => serializer.serialize_unit(),
            Atomic::Bool(b) => serializer.serialize_bool(*b),
            Atomic::Int(i) => serializer.serialize_i64(*i),
            Atomic::Float(f) => serializer.serialize_f64(*f),
            Atomic::Text(s) => serializer.serialize_str(s),
            Atomic::DateTime(at) => tagged(
                serializer,
                tag::DATE,
                &at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            ),
            Atomic::Binary(bytes) => tagged(serializer, tag::BINARY, &hex::encode(bytes)),
            Atomic::Regex { pattern, flags } => {
                tagged(serializer, tag::REGEX, &RegexBody { pattern, flags })
            }
            Atomic::Foreign(leaf) => tagged(serializer, tag::FOREIGN, leaf),
        }
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let body = OperatorBody {
            verb: self.verb(),
            payload: self.payload(),
        };
        tagged(serializer, tag::OPERATOR, &body)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Atomic(atomic) => atomic.serialize(serializer),
            Value::Operator(op) => op.serialize(serializer),
            Value::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Value::Array(items) => {
                let mut out = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    out.serialize_element(item)?;
                }
                out.end()
            }
        }
    }
}

impl Serialize for InstructionDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(None)?;
        for (verb, group) in self.iter() {
            out.serialize_entry(verb, group)?;
        }
        out.end()
    }
}

impl Serialize for Flattened {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Flattened::Unchanged(value) => value.serialize(serializer),
            Flattened::Document(doc) => doc.serialize(serializer),
        }
    }
}

pub fn to_json_string<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}
