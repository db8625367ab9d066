//! JSON codec for trees and instruction documents.
//!
//! Decoding is strict about reserved tags and lenient about everything else:
//! any JSON object without a reserved key is an ordinary map.

pub mod decode;
pub mod encode;

pub use decode::{decode, parse_tree, read_tree_file};
pub use encode::to_json_string;

use crate::value::Value;
use serde::{Deserialize, Deserializer};

/// Reserved single-key object tags.
pub mod tag {
    pub const DATE: &str = "$date";
    pub const BINARY: &str = "$binary";
    pub const REGEX: &str = "$regex";
    pub const FOREIGN: &str = "$foreign";
    pub const OPERATOR: &str = "$op";

    pub const RESERVED: [&str; 5] = [DATE, BINARY, REGEX, FOREIGN, OPERATOR];
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        decode(&raw).map_err(|err| serde::de::Error::custom(format!("{:#}", err)))
    }
}
