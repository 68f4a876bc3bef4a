//! Unit tests for the nesting, path and merge operations on Dict.

use rstest::rstest;
use std::collections::BTreeMap;
use tupdict::dict::{Dict, DictError, Key, Value};
use tupdict::{dict, key};

fn flat() -> Dict {
    dict! {
        ("a", "b") => 1,
        ("b", "c") => 0,
        "c" => 1,
    }
}

// =============================================================================
// to_nested / flatten_to_tuples
// =============================================================================

#[rstest]
fn test_to_nested_keeps_scalar_keys_top_level() {
    let nested = flat().to_nested();
    assert_eq!(
        nested,
        dict! {
            "a" => dict! { "b" => 1 },
            "b" => dict! { "c" => 0 },
            "c" => 1,
        }
    );
}

#[rstest]
fn test_to_nested_later_path_wins() {
    let dict = dict! { ("a", "b") => 1, "a" => 2 };
    assert_eq!(dict.to_nested(), dict! { "a" => 2 });

    let dict = dict! { "a" => 2, ("a", "b") => 1 };
    assert_eq!(dict.to_nested(), dict! { "a" => dict! { "b" => 1 } });
}

#[rstest]
fn test_to_nested_drops_empty_tuple_key() {
    let dict = dict! { Key::tuple(Vec::<&str>::new()) => 1, "a" => 2 };
    assert_eq!(dict.to_nested(), dict! { "a" => 2 });
}

#[rstest]
fn test_round_trip_tuple_keys() {
    let dict = dict! {
        ("x", 1, true) => "leaf",
        ("x", 2, true) => 2.5,
        ("y", 1, false) => Value::None,
    };
    assert_eq!(dict.to_nested().flatten_to_tuples(), dict);
}

#[rstest]
fn test_flatten_wraps_top_level_scalars() {
    let flattened = flat().to_nested().flatten_to_tuples();
    assert_eq!(flattened.get(&Key::tuple(["c"])), Some(&Value::from(1)));
    assert_eq!(flattened.get(&key!("c")), None);
}

#[rstest]
fn test_flatten_treats_lists_as_leaves() {
    let dict = dict! { "a" => dict! { "b" => vec![1, 2] } };
    assert_eq!(
        dict.flatten_to_tuples(),
        dict! { ("a", "b") => vec![1, 2] }
    );
}

// =============================================================================
// from_nested
// =============================================================================

#[rstest]
fn test_from_nested_reconstructs_structure() {
    let plain = BTreeMap::from([
        ("a", BTreeMap::from([("x", 1), ("y", 2)])),
        ("b", BTreeMap::from([("z", 3)])),
    ]);
    let dict = Dict::from_nested(plain);

    assert_eq!(dict.flatten_to_tuples().to_nested(), dict);
    assert_eq!(dict.get_path(&[key!("a"), key!("y")]), Some(&Value::from(2)));
}

#[rstest]
fn test_from_nested_is_idempotent() {
    let dict = flat().to_nested();
    assert_eq!(Dict::from_nested(dict.clone()), dict);
}

// =============================================================================
// set_path / get_path
// =============================================================================

#[rstest]
fn test_set_path_creates_branch_leaving_others_untouched() {
    let mut nested = flat().to_nested();
    nested.set_path(&[key!("c"), key!("d"), key!("a")], Value::from(1));

    assert_eq!(
        nested,
        dict! {
            "a" => dict! { "b" => 1 },
            "b" => dict! { "c" => 0 },
            "c" => dict! { "d" => dict! { "a" => 1 } },
        }
    );
}

#[rstest]
fn test_set_path_chains() {
    let mut dict = Dict::new();
    dict.set_path(&[key!("a"), key!("b")], Value::from(1))
        .set_path(&[key!("a"), key!("c")], Value::from(2));
    assert_eq!(dict, dict! { "a" => dict! { "b" => 1, "c" => 2 } });
}

#[rstest]
#[case(&[key!("a"), key!("b")], Some(Value::from(1)))]
#[case(&[key!("a"), key!("z")], None)]
#[case(&[key!("c"), key!("d")], None)]
#[case(&[key!("list"), key!(1)], Some(Value::from("y")))]
#[case(&[key!("list"), key!(5)], None)]
#[case(&[key!("list"), key!(-1)], None)]
fn test_get_path(#[case] path: &[Key], #[case] expected: Option<Value>) {
    let mut dict = flat().to_nested();
    dict.insert(key!("list"), Value::from(vec!["x", "y"]));
    assert_eq!(dict.get_path(path), expected.as_ref());
}

#[rstest]
fn test_get_path_with_empty_path_is_none() {
    let empty: &[Key] = &[];
    assert_eq!(flat().get_path(empty), None);
}

// =============================================================================
// merge_update
// =============================================================================

#[rstest]
fn test_merge_update_recurses_into_shared_dictionaries() {
    let mut dict = dict! { "db" => dict! { "host" => "a", "port" => 1 }, "debug" => false };
    dict.merge_update(&dict! { "db" => dict! { "port" => 2 } });
    assert_eq!(
        dict,
        dict! { "db" => dict! { "host" => "a", "port" => 2 }, "debug" => false }
    );
}

#[rstest]
fn test_merge_update_sequential_equals_fresh_merge() {
    let a = dict! { "x" => dict! { "p" => 1, "q" => 1 } };
    let b = dict! { "x" => dict! { "q" => 2 }, "y" => 1 };
    let c = dict! { "x" => dict! { "r" => 3 }, "y" => dict! { "z" => 0 } };

    let mut sequential = a.clone();
    sequential.merge_update(&b);
    sequential.merge_update(&c);

    let mut fresh = Dict::new();
    fresh.merge_update(&a).merge_update(&b).merge_update(&c);
    assert_eq!(sequential, fresh);
    assert_eq!(
        sequential,
        dict! { "x" => dict! { "p" => 1, "q" => 2, "r" => 3 }, "y" => dict! { "z" => 0 } }
    );
}

#[rstest]
fn test_merged_copy_leaves_source_untouched() {
    let source = dict! { "a" => dict! { "b" => 1 } };
    let merged = source.merged_copy(&dict! { "a" => dict! { "c" => 2 } });
    assert_eq!(source, dict! { "a" => dict! { "b" => 1 } });
    assert_eq!(merged, dict! { "a" => dict! { "b" => 1, "c" => 2 } });
}

#[rstest]
fn test_merge_update_entries() {
    let mut dict = dict! { "a" => dict! { "b" => 1 } };
    dict.merge_update_entries([("a", dict! { "c" => 2 }), ("d", dict! {})]);
    assert_eq!(
        dict,
        dict! { "a" => dict! { "b" => 1, "c" => 2 }, "d" => Dict::new() }
    );
}

#[rstest]
fn test_merge_update_with_rejects_mapping_and_overrides() {
    let mut dict = flat();
    let result = dict.merge_update_with(Some(&dict! { "z" => 1 }), [("y", 2)]);
    assert_eq!(result.map(|merged| merged.clone()), Err(DictError::ArgumentConflict));
    assert_eq!(dict, flat());
}
