//! The grouped output of a flatten call: `{ verb: { dotted.path: value } }`.

use crate::value::{Map, Value};
use indexmap::IndexMap;

/// Writes grouped by verb. Verbs and paths keep first-write order; writing an
/// existing (verb, path) pair replaces its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstructionDocument {
    groups: IndexMap<String, IndexMap<String, Value>>,
}

impl InstructionDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, verb: &str, path: String, value: Value) {
        self.groups
            .entry(verb.to_string())
            .or_default()
            .insert(path, value);
    }

    pub fn get(&self, verb: &str, path: &str) -> Option<&Value> {
        self.groups.get(verb).and_then(|group| group.get(path))
    }

    pub fn group(&self, verb: &str) -> Option<&IndexMap<String, Value>> {
        self.groups.get(verb)
    }

    pub fn verbs(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexMap<String, Value>)> {
        self.groups
            .iter()
            .map(|(verb, group)| (verb.as_str(), group))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of (verb, path) writes.
    pub fn len(&self) -> usize {
        self.groups.values().map(IndexMap::len).sum()
    }

    /// Same document as a plain map of maps.
    pub fn into_value(self) -> Value {
        let groups: Map = self
            .groups
            .into_iter()
            .map(|(verb, group)| (verb, Value::Map(group)))
            .collect();
        Value::Map(groups)
    }
}

impl<V: Into<Value>> FromIterator<(&'static str, &'static str, V)> for InstructionDocument {
    fn from_iter<I: IntoIterator<Item = (&'static str, &'static str, V)>>(iter: I) -> Self {
        let mut doc = InstructionDocument::new();
        for (verb, path, value) in iter {
            doc.write(verb, path.to_string(), value.into());
        }
        doc
    }
}
