//! Property-based tests for the flatten engine and push refinements.

use proptest::prelude::*;

use updoc::builders::{Push, push};
use updoc::codec::to_json_string;
use updoc::{FlattenOptions, Flattened, Map, Value, flatten, map};

/// Atomic leaves only.
fn atomic() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::NULL),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1.0e6..1.0e6f64).prop_map(Value::from),
        "[a-z0-9 ]{0,12}".prop_map(Value::from),
    ]
}

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

/// Plain trees without operators; arrays hold atomics only.
fn plain_tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        4 => atomic(),
        1 => prop::collection::vec(atomic(), 0..4).prop_map(Value::Array),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop::collection::vec((key(), inner), 1..4)
            .prop_map(|entries| Value::Map(entries.into_iter().collect::<Map>()))
    })
}

/// A plain tree hung under one key, so flatten always has fields to walk.
fn rooted_tree() -> impl Strategy<Value = Value> {
    plain_tree().prop_map(|tree| map! { "root" => tree })
}

/// Every dotted path that reaches a leaf, paired with that leaf.
fn leaf_paths(prefix: Option<&str>, value: &Value, out: &mut Map) {
    match value {
        Value::Map(map) if !map.is_empty() => {
            for (key, child) in map {
                let path = match prefix {
                    Some(prefix) => format!("{}.{}", prefix, key),
                    None => key.clone(),
                };
                leaf_paths(Some(&path), child, out);
            }
        }
        other => {
            if let Some(prefix) = prefix {
                out.insert(prefix.to_string(), other.clone());
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Refinement {
    Slice(i64),
    Sort(i64),
    Position(i64),
}

fn refine(draft: Push, refinement: Refinement) -> Push {
    let refined = match refinement {
        Refinement::Slice(n) => draft.slice(n),
        Refinement::Sort(n) => draft.sort(Some(Value::from(n))),
        Refinement::Position(n) => draft.position(n),
    };
    refined.expect("each was requested")
}

proptest! {
    #[test]
    fn atomics_flatten_to_themselves(value in atomic()) {
        prop_assert_eq!(flatten(&value, FlattenOptions::default()), Flattened::Unchanged(value.clone()));
        let arrays = FlattenOptions::default().expand_arrays(true).skip_empty_containers(true);
        prop_assert_eq!(flatten(&value, arrays), Flattened::Unchanged(value));
    }

    #[test]
    fn plain_trees_group_every_leaf_under_set(tree in rooted_tree()) {
        let mut expected = Map::new();
        leaf_paths(None, &tree, &mut expected);

        let out = flatten(&tree, FlattenOptions::default()).into_value();
        prop_assert_eq!(out, map! { "$set" => Value::Map(expected) });
    }

    #[test]
    fn flatten_is_deterministic(tree in rooted_tree()) {
        let options = FlattenOptions::default().expand_arrays(true);
        let first = to_json_string(&flatten(&tree, options), false).unwrap_or_default();
        let second = to_json_string(&flatten(&tree, options), false).unwrap_or_default();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn push_refinement_order_does_not_matter(
        slice in -10i64..10,
        sort in prop_oneof![Just(1i64), Just(-1i64)],
        position in 0i64..10,
        elements in prop::collection::vec(any::<i32>(), 0..5),
        order in Just(vec![0usize, 1, 2]).prop_shuffle(),
    ) {
        let refinements = [Refinement::Slice(slice), Refinement::Sort(sort), Refinement::Position(position)];
        let base = push(Some(Value::from(elements.clone()))).each();

        let shuffled = order.iter().fold(base.clone(), |draft, &i| refine(draft, refinements[i]));
        let canonical = refinements.iter().fold(base, |draft, &r| refine(draft, r));

        let shuffled = to_json_string(&shuffled.payload(), false).unwrap_or_default();
        let canonical = to_json_string(&canonical.payload(), false).unwrap_or_default();
        prop_assert_eq!(&shuffled, &canonical);
        prop_assert!(shuffled.starts_with(r#"{"$each":"#), "{}", shuffled);
    }
}
