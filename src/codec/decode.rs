//! JSON → [`Value`].
//!
//! Plain JSON maps onto atomics, arrays and maps. Objects whose only key is a
//! reserved tag carry the leaves JSON cannot express, and operators:
//!
//! ```text
//! {"$date": "2018-06-02T01:05:00Z"}
//! {"$binary": "62756600"}
//! {"$regex": {"pattern": "^a", "flags": "i"}}
//! {"$foreign": {"kind": "Decimal128", "value": "1.23"}}
//! {"$op": {"type": "$inc", "payload": 2}}
//! ```

use super::tag;
use crate::Result;
use crate::operator::Operator;
use crate::value::{Atomic, ForeignLeaf, Map, Value};

use anyhow::{Context, anyhow, bail};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::io::Read;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRegex {
    pattern: String,
    #[serde(default)]
    flags: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOperator {
    #[serde(rename = "type")]
    verb: String,
    #[serde(default)]
    payload: serde_json::Value,
}

/// Read a tree from `path`, or from stdin when `path` is `-`.
pub fn read_tree_file(path: &str) -> Result<Value> {
    let text = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read tree from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("read tree file {}", path))?
    };
    parse_tree(&text).with_context(|| format!("parse tree file {}", path))
}

pub fn parse_tree(text: &str) -> Result<Value> {
    let raw: serde_json::Value = serde_json::from_str(text)?;
    decode(&raw)
}

pub fn decode(raw: &serde_json::Value) -> Result<Value> {
    match raw {
        serde_json::Value::Null => Ok(Value::NULL),
        serde_json::Value::Bool(b) => Ok(Value::from(*b)),
        serde_json::Value::Number(n) => decode_number(n),
        serde_json::Value::String(s) => Ok(Value::from(s.as_str())),
        serde_json::Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| decode(item).with_context(|| format!("at index {}", index)))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        serde_json::Value::Object(object) => decode_object(object),
    }
}

fn decode_number(n: &serde_json::Number) -> Result<Value> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    n.as_f64()
        .map(Value::from)
        .ok_or_else(|| anyhow!("number {} is not representable", n))
}

fn decode_object(object: &serde_json::Map<String, serde_json::Value>) -> Result<Value> {
    let reserved: Vec<&str> = object
        .keys()
        .map(String::as_str)
        .filter(|key| tag::RESERVED.contains(key))
        .collect();

    match reserved.as_slice() {
        [] => {}
        [tag] if object.len() == 1 => {
            let body = &object[*tag];
            return decode_tagged(tag, body).with_context(|| format!("decode {} object", tag));
        }
        [tag, ..] => bail!("{} must be the only key of its object", tag),
    }

    let mut map = Map::with_capacity(object.len());
    for (key, raw) in object {
        let value = decode(raw).with_context(|| format!("at key {:?}", key))?;
        map.insert(key.clone(), value);
    }
    Ok(Value::Map(map))
}

fn decode_tagged(tag: &str, body: &serde_json::Value) -> Result<Value> {
    let atomic = match tag {
        tag::DATE => {
            let text = body.as_str().ok_or_else(|| anyhow!("expected an RFC 3339 string"))?;
            let at = DateTime::parse_from_rfc3339(text)
                .with_context(|| format!("bad date {:?}", text))?
                .with_timezone(&Utc);
            Atomic::DateTime(at)
        }
        tag::BINARY => {
            let text = body.as_str().ok_or_else(|| anyhow!("expected a hex string"))?;
            Atomic::Binary(hex::decode(text).with_context(|| format!("bad hex {:?}", text))?)
        }
        tag::REGEX => {
            let RawRegex { pattern, flags } = RawRegex::deserialize(body)?;
            Atomic::Regex { pattern, flags }
        }
        tag::FOREIGN => Atomic::Foreign(ForeignLeaf::deserialize(body)?),
        tag::OPERATOR => {
            let RawOperator { verb, payload } = RawOperator::deserialize(body)?;
            if verb.is_empty() {
                bail!("operator type cannot be empty");
            }
            let payload = decode(&payload).with_context(|| format!("payload of {}", verb))?;
            return Ok(Value::Operator(Operator::new(verb, payload)));
        }
        other => bail!("unknown reserved tag {}", other),
    };
    Ok(Value::Atomic(atomic))
}
