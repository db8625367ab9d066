//! Flatten engine: turn a tree into an [`InstructionDocument`].
//!
//! One depth-first pass over the tree, driven by an explicit work stack so
//! deep trees do not exhaust the call stack. Children are visited in their
//! container's own order; writes land in the document in that order.
//!
//! Per node:
//! - leaves (and arrays, unless `expand_arrays`) are written under `$set`
//! - an operator `t` with payload `p` writes `p` under `t`; when `p` is itself
//!   an operator the path gains a `.t` segment and the inner verb is used
//! - a `merge` operator re-flattens its payload in place with
//!   [`FlattenOptions::MERGE`], whatever the caller's options
//! - non-empty containers recurse with `path.key` (array indexes as keys)
//! - empty containers are written under `$set` unless skipped

pub mod document;
pub mod options;

pub use document::InstructionDocument;
pub use options::FlattenOptions;

use crate::operator::verb;
use crate::value::Value;

/// Result of [`flatten`].
#[derive(Debug, Clone, PartialEq)]
pub enum Flattened {
    /// The input had nothing to walk (leaf, operator, un-expanded array or
    /// empty container) and is returned as-is.
    Unchanged(Value),
    Document(InstructionDocument),
}

impl Flattened {
    pub fn document(&self) -> Option<&InstructionDocument> {
        match self {
            Flattened::Document(doc) => Some(doc),
            Flattened::Unchanged(_) => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Flattened::Unchanged(value) => value,
            Flattened::Document(doc) => doc.into_value(),
        }
    }
}

/// Flatten `tree` into grouped update instructions.
///
/// ```
/// use updoc::{map, flatten, FlattenOptions, builders::inc};
///
/// let tree = map! { "x" => 1, "y" => map! { "z" => inc(None) } };
/// let out = flatten(&tree, FlattenOptions::default()).into_value();
/// assert_eq!(out, map! { "$set" => map! { "x" => 1 }, "$inc" => map! { "y.z" => 1 } });
/// ```
pub fn flatten(tree: &Value, options: FlattenOptions) -> Flattened {
    let unchanged = match tree {
        Value::Atomic(_) | Value::Operator(_) => true,
        Value::Array(items) => !options.expand_arrays || items.is_empty(),
        Value::Map(map) => map.is_empty(),
    };
    if unchanged {
        return Flattened::Unchanged(tree.clone());
    }

    let mut walker = Walker::default();
    walker.push_children(None, tree, options);
    Flattened::Document(walker.run())
}

/// Pending visit of one node.
struct Visit<'a> {
    path: String,
    value: &'a Value,
    options: FlattenOptions,
}

#[derive(Default)]
struct Walker<'a> {
    stack: Vec<Visit<'a>>,
    doc: InstructionDocument,
}

impl<'a> Walker<'a> {
    fn run(mut self) -> InstructionDocument {
        while let Some(Visit {
            path,
            value,
            options,
        }) = self.stack.pop()
        {
            self.visit(path, value, options);
        }
        self.doc
    }

    fn visit(&mut self, path: String, value: &'a Value, options: FlattenOptions) {
        match value {
            Value::Atomic(_) => self.write(verb::SET, path, value),
            Value::Array(_) if !options.expand_arrays => self.write(verb::SET, path, value),
            Value::Operator(op) if op.verb() == verb::MERGE => self.merge(path, op.payload()),
            Value::Operator(op) => self.write(op.verb(), path, op.payload()),
            Value::Map(_) | Value::Array(_) if value.is_empty_container() => {
                let skip = options.skip_empty_containers
                    || (options.expand_arrays && matches!(value, Value::Array(_)));
                if !skip {
                    self.write(verb::SET, path, value);
                }
            }
            Value::Map(_) | Value::Array(_) => self.push_children(Some(&path), value, options),
        }
    }

    /// Write `value` under `bucket` at `path`. An operator value is unwrapped
    /// instead: its verb becomes the bucket and `bucket` a path segment.
    fn write(&mut self, bucket: &'a str, path: String, value: &'a Value) {
        let (mut bucket, mut path, mut value) = (bucket, path, value);
        loop {
            match value {
                Value::Operator(op) if op.verb() == verb::MERGE => {
                    return self.merge(join(&path, bucket), op.payload());
                }
                Value::Operator(op) => {
                    path = join(&path, bucket);
                    bucket = op.verb();
                    value = op.payload();
                }
                _ => {
                    self.doc.write(bucket, path, value.clone());
                    return;
                }
            }
        }
    }

    fn merge(&mut self, path: String, payload: &'a Value) {
        if payload.is_null() {
            return;
        }
        self.stack.push(Visit {
            path,
            value: payload,
            options: FlattenOptions::MERGE,
        });
    }

    /// Queue the children of a container so they pop in container order.
    fn push_children(&mut self, prefix: Option<&str>, container: &'a Value, options: FlattenOptions) {
        let path_for = |key: &str| match prefix {
            Some(prefix) => join(prefix, key),
            None => key.to_string(),
        };
        match container {
            Value::Map(map) => {
                for (key, value) in map.iter().rev() {
                    self.stack.push(Visit {
                        path: path_for(key),
                        value,
                        options,
                    });
                }
            }
            Value::Array(items) => {
                for (index, value) in items.iter().enumerate().rev() {
                    self.stack.push(Visit {
                        path: path_for(&index.to_string()),
                        value,
                        options,
                    });
                }
            }
            Value::Atomic(_) | Value::Operator(_) => {}
        }
    }
}

fn join(path: &str, segment: &str) -> String {
    format!("{}.{}", path, segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{self, Build, DateKind, Selector, inc, positional, set};
    use crate::map;
    use crate::operator::Operator;
    use pretty_assertions::assert_eq;

    fn run(tree: Value) -> Value {
        flatten(&tree, FlattenOptions::default()).into_value()
    }

    fn run_with(tree: Value, options: FlattenOptions) -> Value {
        flatten(&tree, options).into_value()
    }

    fn arrays() -> FlattenOptions {
        FlattenOptions::default().expand_arrays(true)
    }

    fn skip_empty() -> FlattenOptions {
        FlattenOptions::default().skip_empty_containers(true)
    }

    #[test]
    fn top_level_leaves_are_returned_unchanged() {
        for value in [
            Value::NULL,
            Value::from(0),
            Value::from("test"),
            Value::from(false),
            Value::from(vec![1, 2, 3]),
            Value::Array(vec![]),
            map! {},
        ] {
            assert_eq!(
                flatten(&value, FlattenOptions::default()),
                Flattened::Unchanged(value.clone())
            );
            assert_eq!(run(map! { "value" => value.clone() }), map! { "$set" => map! { "value" => value } });
        }
    }

    #[test]
    fn top_level_operator_is_returned_unchanged() {
        let op = Value::from(inc(None));
        assert_eq!(flatten(&op, FlattenOptions::default()), Flattened::Unchanged(op.clone()));
    }

    #[test]
    fn plain_maps_group_under_set() {
        let tree = map! { "a" => vec![1, 2, 3], "b" => "test", "c" => map! {}, "d" => Value::NULL };
        assert_eq!(
            run(tree),
            map! { "$set" => map! { "a" => vec![1, 2, 3], "b" => "test", "c" => map! {}, "d" => Value::NULL } }
        );
    }

    #[test]
    fn nested_paths_are_dotted() {
        let tree = map! { "a" => map! { "b" => map! { "c" => 7 } } };
        assert_eq!(run(tree), map! { "$set" => map! { "a.b.c" => 7 } });
    }

    #[test]
    fn operators_group_by_verb() {
        let tree = map! { "x" => 1, "y" => inc(Some(Value::from(2))) };
        assert_eq!(
            run(tree),
            map! { "$set" => map! { "x" => 1 }, "$inc" => map! { "y" => 2 } }
        );
    }

    #[test]
    fn positional_adds_tag_segment() -> Result<(), crate::error::BuildError> {
        let tree = map! {
            "points" => positional(None).set(10),
            "scores" => positional(None).inc(Some(Value::from(-1))),
            "stats" => map! { "group" => map! { "points" => positional(Some("std".into())).apply(0.5)?.build()? } },
            "grades" => positional(Some(Selector::Index(2))).timestamp(),
        };
        assert_eq!(
            run(tree),
            map! {
                "$set" => map! { "points.$" => 10, "stats.group.points.$.std" => 0.5 },
                "$inc" => map! { "scores.$" => -1 },
                "$currentDate" => map! { "grades.2" => map! { "$type" => "timestamp" } },
            }
        );
        Ok(())
    }

    #[test]
    fn expand_arrays_toggles_index_paths() {
        let tree = map! { "a" => vec![1, 2] };
        assert_eq!(run(tree.clone()), map! { "$set" => map! { "a" => vec![1, 2] } });
        assert_eq!(
            run_with(tree, arrays()),
            map! { "$set" => map! { "a.0" => 1, "a.1" => 2 } }
        );
    }

    #[test]
    fn expanded_arrays_nest() {
        let cases = vec![
            (map! { "x" => Vec::<Value>::new() }, map! {}),
            (map! { "x" => vec![10] }, map! { "$set" => map! { "x.0" => 10 } }),
            (
                map! { "x" => vec![Value::from(1)], "y" => vec![Value::from(inc(Some(Value::from(2))))] },
                map! { "$set" => map! { "x.0" => 1 }, "$inc" => map! { "y.0" => 2 } },
            ),
            (
                map! { "x" => map! { "y" => vec![map! { "z" => builders::mul(Some(Value::from(2))) }] } },
                map! { "$mul" => map! { "x.y.0.z" => 2 } },
            ),
            (
                map! { "x" => vec![Value::from(vec![Value::from(vec![map! { "y" => inc(None) }])])] },
                map! { "$inc" => map! { "x.0.0.0.y" => 1 } },
            ),
        ];
        for (tree, expected) in cases {
            assert_eq!(run_with(tree, arrays()), expected);
        }
    }

    #[test]
    fn expanded_top_level_array_is_walked() {
        let tree = Value::from(vec![map! { "a" => 1 }, map! { "b" => 2 }]);
        assert_eq!(
            run_with(tree, arrays()),
            map! { "$set" => map! { "0.a" => 1, "1.b" => 2 } }
        );
    }

    #[test]
    fn skip_empty_containers_toggles() {
        let tree = map! { "a" => map! {} };
        assert_eq!(run_with(tree.clone(), skip_empty()), map! {});
        assert_eq!(run(tree), map! { "$set" => map! { "a" => map! {} } });
    }

    #[test]
    fn skip_empty_containers_cases() {
        let cases = vec![
            (map! { "x" => Vec::<Value>::new() }, map! { "$set" => map! { "x" => Vec::<Value>::new() } }),
            (map! { "x" => map! {}, "y" => 1 }, map! { "$set" => map! { "y" => 1 } }),
            (map! { "x" => map! { "y" => map! { "z" => map! {} } } }, map! {}),
            (
                map! { "x" => map! { "y" => map! { "z" => map! {}, "a" => 1 } } },
                map! { "$set" => map! { "x.y.a" => 1 } },
            ),
        ];
        for (tree, expected) in cases {
            assert_eq!(run_with(tree, skip_empty()), expected);
        }
    }

    #[test]
    fn option_combinations_on_empty_elements() {
        let both = arrays().skip_empty_containers(true);
        assert_eq!(run_with(map! { "x" => Vec::<Value>::new() }, both), map! {});
        assert_eq!(run_with(map! { "x" => vec![map! {}] }, both), map! {});
        assert_eq!(run_with(map! { "x" => vec![map! {}] }, arrays()), map! { "$set" => map! { "x.0" => map! {} } });
        assert_eq!(
            run_with(map! { "x" => vec![Value::from(vec![map! {}])] }, arrays()),
            map! { "$set" => map! { "x.0.0" => map! {} } }
        );
    }

    #[test]
    fn merge_re_flattens_compactly() {
        let tree = map! {
            "points" => positional(Some("[]".into())).merge(map! { "x" => 0, "y" => Vec::<Value>::new(), "z" => vec![5] }),
        };
        assert_eq!(
            run(tree),
            map! { "$set" => map! { "points.$[].x" => 0, "points.$[].z.0" => 5 } }
        );
    }

    #[test]
    fn merge_keeps_nested_operators() {
        let tree = map! {
            "grades" => positional(Some("[g]".into())).merge(map! { "score" => inc(Some(Value::from(10))), "note" => "ok" }),
        };
        assert_eq!(
            run(tree),
            map! {
                "$inc" => map! { "grades.$[g].score" => 10 },
                "$set" => map! { "grades.$[g].note" => "ok" },
            }
        );
    }

    #[test]
    fn merge_of_null_contributes_nothing() {
        let tree = map! { "a" => 1, "points" => positional(None).merge(Value::NULL) };
        assert_eq!(run(tree), map! { "$set" => map! { "a" => 1 } });
    }

    #[test]
    fn bare_merge_operator_flattens_at_its_own_path() {
        let tree = map! { "doc" => Operator::new(verb::MERGE, map! { "a" => map! {}, "b" => 2 }) };
        assert_eq!(run(tree), map! { "$set" => map! { "doc.b" => 2 } });
    }

    #[test]
    fn double_operator_composes_paths() {
        let tree = map! { "a" => Operator::new("$x", Operator::new("$y", Operator::new("$z", 1))) };
        assert_eq!(run(tree), map! { "$z" => map! { "a.$x.$y" => 1 } });
    }

    #[test]
    fn operator_inside_set_payload_is_unwrapped() {
        let tree = map! { "a" => set(inc(None)) };
        assert_eq!(run(tree), map! { "$inc" => map! { "a.$set" => 1 } });
    }

    #[test]
    fn current_date_payload_is_not_walked() {
        let tree = map! { "updated" => builders::current_date(DateKind::Date) };
        assert_eq!(
            run(tree),
            map! { "$currentDate" => map! { "updated" => map! { "$type" => "date" } } }
        );
    }

    #[test]
    fn deep_trees_do_not_overflow() {
        let mut tree = Value::from(1);
        for _ in 0..10_000 {
            tree = map! { "n" => tree };
        }
        let out = flatten(&tree, FlattenOptions::default());
        let doc = out.document().cloned().unwrap_or_default();
        assert_eq!(doc.len(), 1);
        let path = doc
            .group("$set")
            .and_then(|group| group.keys().next().cloned())
            .unwrap_or_default();
        assert_eq!(path.len(), "n".len() * 10_000 + 9_999);
        // Dropping a tree this deep recurses; unwind it by hand.
        let mut current = tree;
        while let Value::Map(mut map) = current {
            current = map.swap_remove("n").unwrap_or_default();
        }
    }
}
