//! Unit tests for TupleList.

use rstest::rstest;
use tupdict::dict::{DictError, Key, Value};
use tupdict::tuple_list::TupleList;
use tupdict::{dict, key};

fn rows() -> TupleList<Vec<Value>> {
    vec![
        vec![Value::from("a"), Value::from(1), Value::from(10)],
        vec![Value::from("a"), Value::from(2), Value::from(20)],
        vec![Value::from("b"), Value::from(1), Value::from(30)],
    ]
    .into_iter()
    .collect()
}

// =============================================================================
// Sequence Operations
// =============================================================================

#[rstest]
fn test_new_is_empty() {
    let list: TupleList<Vec<Value>> = TupleList::new();
    assert!(list.is_empty());
    assert_eq!(list.to_string(), "[]");
}

#[rstest]
fn test_get_and_iter_follow_insertion_order() {
    let list = rows();
    assert_eq!(list.len(), 3);
    assert_eq!(list.get(1).map(|row| row[2].clone()), Some(Value::from(20)));
    assert_eq!(list.get(3), None);

    let firsts: Vec<String> = list.iter().map(|row| row[0].to_string()).collect();
    assert_eq!(firsts, vec!["a", "a", "b"]);
}

#[rstest]
fn test_extend_appends() {
    let mut list = rows();
    list.extend([vec![Value::from("c")]]);
    assert_eq!(list.len(), 4);
    assert_eq!(list.into_iter().last(), Some(vec![Value::from("c")]));
}

#[rstest]
fn test_display_uses_tuple_notation() {
    assert_eq!(
        rows().to_string(),
        "[(a, 1, 10), (a, 2, 20), (b, 1, 30)]"
    );
}

// =============================================================================
// to_dict
// =============================================================================

#[rstest]
fn test_to_dict_with_tuple_keys() {
    let dict = rows().to_dict(2).unwrap();
    assert_eq!(
        dict,
        dict! { ("a", 1) => 10, ("a", 2) => 20, ("b", 1) => 30 }
    );
}

#[rstest]
fn test_to_dict_with_scalar_keys_overwrites() {
    let dict = rows().to_dict(1).unwrap();
    assert_eq!(dict.keys_list(), vec![key!("a"), key!("b")]);
    assert_eq!(dict[&key!("a")], Value::from((2, 20)));
}

#[rstest]
fn test_to_dict_rejects_short_rows() {
    let mut list = rows();
    list.push(vec![Value::from("c")]);
    assert_eq!(
        list.to_dict(2),
        Err(DictError::RowTooShort {
            row_len: 1,
            key_len: 2,
        })
    );
}

#[rstest]
fn test_to_dict_inverts_to_tuple_list() {
    let dict = dict! { ("x", 1) => "p", "y" => (true, 2.5) };
    let rows = dict.to_tuple_list();
    assert_eq!(rows.get(1), Some(&vec![Value::from("y"), Value::from(true), Value::from(2.5)]));

    let back = rows.to_dict(2).unwrap();
    assert_eq!(back.get(&Key::from(("x", 1))), Some(&Value::from("p")));
}
