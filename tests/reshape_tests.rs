//! Unit tests for the regrouping and projection operations on Dict.

use rstest::rstest;
use tupdict::dict::{Dict, DictError, IndexingError, Key, SuperDict, Value};
use tupdict::{dict, key};

fn people() -> Dict {
    dict! {
        "ann" => dict! { "city" => "paris", "tags" => vec!["a", "b"] },
        "ben" => dict! { "city" => "rome", "tags" => vec!["b"] },
        "cat" => dict! { "city" => "paris" },
    }
}

// =============================================================================
// get_property / to_length_dict
// =============================================================================

#[rstest]
fn test_get_property_skips_entries_without_property() {
    let tags = people().get_property(&key!("tags"));
    assert_eq!(
        tags,
        dict! { "ann" => vec!["a", "b"], "ben" => vec!["b"] }
    );
}

#[rstest]
fn test_get_property_on_typed_keys() {
    let dict: SuperDict<u32, Value> = [(1, Value::from(dict! { "p" => true })), (2, Value::from(3))]
        .into_iter()
        .collect();
    let projected = dict.get_property(&key!("p"));
    assert_eq!(projected.keys_list(), vec![1]);
}

#[rstest]
fn test_to_length_dict() {
    let dict = dict! {
        "text" => "héllo",
        "list" => vec![1, 2],
        "tuple" => (1, 2, 3),
        "nested" => people(),
    };
    let lengths = dict.to_length_dict().unwrap();
    assert_eq!(lengths.values_list(), vec![5, 2, 3, 3]);
}

#[rstest]
#[case(Value::None, "none")]
#[case(Value::from(1.0), "float")]
#[case(Value::from(true), "bool")]
fn test_to_length_dict_fails_without_length(#[case] value: Value, #[case] found: &'static str) {
    let dict = dict! { "ok" => "x", "bad" => value };
    assert_eq!(
        dict.to_length_dict(),
        Err(DictError::TypeMismatch {
            key: key!("bad"),
            expected: "a value with a length",
            found,
        })
    );
}

// =============================================================================
// index_by_property
// =============================================================================

#[rstest]
fn test_index_by_property_groups_original_entries() {
    let by_city = people().index_by_property(&key!("city")).unwrap();

    assert_eq!(by_city.keys_list(), vec![key!("paris"), key!("rome")]);
    assert_eq!(
        by_city[&key!("paris")].keys_list(),
        vec![key!("ann"), key!("cat")]
    );
    assert_eq!(
        by_city[&key!("rome")].get(&key!("ben")),
        people().get(&key!("ben"))
    );
}

#[rstest]
fn test_index_by_property_as_list() {
    let groups = people().index_by_property_list(&key!("city")).unwrap();
    let sizes: Vec<usize> = groups.iter().map(Dict::len).collect();
    assert_eq!(sizes, vec![2, 1]);
}

#[rstest]
fn test_index_by_property_on_tuple_values() {
    let dict = dict! { "a" => ("x", 1), "b" => ("y", 1), "c" => ("z", 2) };
    let groups = dict.index_by_property(&key!(1)).unwrap();
    assert_eq!(groups.keys_list(), vec![key!(1), key!(2)]);
}

#[rstest]
fn test_index_by_property_errors() {
    assert_eq!(
        Dict::new().index_by_property(&key!("city")),
        Err(DictError::Indexing(IndexingError::Empty))
    );

    let error = dict! { "x" => 1 }
        .index_by_property(&key!("city"))
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "property city is not present in element x"
    );
}

#[rstest]
fn test_index_by_property_reports_later_missing_property() {
    let mut dict = people();
    dict.insert(key!("dan"), Value::from(dict! { "age" => 40 }));
    let error = dict.index_by_property(&key!("city")).unwrap_err();
    assert!(matches!(error, DictError::TypeMismatch { key, .. } if key == key!("dan")));
}

// =============================================================================
// index_by_tuple_position
// =============================================================================

fn sales() -> SuperDict<Key, f64> {
    [
        (key!("2024", "north"), 1.0),
        (key!("2024", "south"), 2.0),
        (key!("2025", "north"), 3.0),
    ]
    .into_iter()
    .collect()
}

#[rstest]
#[case(0, vec![key!("2024"), key!("2025")])]
#[case(1, vec![key!("north"), key!("south")])]
fn test_index_by_tuple_position_group_keys(#[case] position: usize, #[case] expected: Vec<Key>) {
    let groups = sales().index_by_tuple_position(position).unwrap();
    assert_eq!(groups.keys_list(), expected);
}

#[rstest]
fn test_index_by_tuple_position_keeps_full_keys() {
    let groups = sales().index_by_tuple_position(1).unwrap();
    assert_eq!(
        groups[&key!("north")].keys_list(),
        vec![key!("2024", "north"), key!("2025", "north")]
    );
}

#[rstest]
fn test_index_by_tuple_position_list() {
    let groups = sales().index_by_tuple_position_list(0).unwrap();
    assert_eq!(groups[0].values_list(), vec![1.0, 2.0]);
    assert_eq!(groups[1].values_list(), vec![3.0]);
}

#[rstest]
fn test_index_by_tuple_position_scalar_keys_are_one_tuples() {
    let dict: SuperDict<Key, i32> = [(key!("a"), 1), (key!("b"), 2)].into_iter().collect();
    assert_eq!(dict.index_by_tuple_position(0).unwrap().len(), 2);
    assert_eq!(
        dict.index_by_tuple_position(1),
        Err(IndexingError::PositionOutOfRange {
            position: 1,
            key: key!("a"),
        })
    );
}

#[rstest]
fn test_index_by_tuple_position_empty() {
    let dict: SuperDict<Key, i32> = SuperDict::new();
    assert_eq!(dict.index_by_tuple_position(0), Err(IndexingError::Empty));
}

// =============================================================================
// try_invert_list_values / to_tuple_list
// =============================================================================

#[rstest]
fn test_try_invert_list_values_accepts_tuples() {
    let dict = dict! { "x" => ("a", "b"), "y" => vec!["b"] };
    let inverted = dict.try_invert_list_values().unwrap();
    assert_eq!(inverted[&key!("b")], Value::from(vec!["x", "y"]));
}

#[rstest]
fn test_to_tuple_list_spreads_entries() {
    let dict = dict! {
        ("a", 1) => vec![Value::from("x"), Value::from(("y", 2))],
        "b" => 3,
    };
    let rows = dict.to_tuple_list();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows.to_string(), "[(a, 1, x), (a, 1, y, 2), (b, 3)]");
}

#[rstest]
fn test_to_tuple_list_empty_list_emits_nothing() {
    let dict = dict! { "a" => Vec::<i32>::new(), "b" => 1 };
    assert_eq!(dict.to_tuple_list().to_string(), "[(b, 1)]");
}

#[rstest]
fn test_to_tuple_list_round_trips_through_to_dict() {
    let dict = dict! { ("a", 1) => "x", ("b", 2) => "y" };
    let back = dict.to_tuple_list().to_dict(2).unwrap();
    assert_eq!(back, dict);
}
