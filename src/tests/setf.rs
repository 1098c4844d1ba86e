use super::*;

fn setf(src: &str, path: &str, fmt: &str, args: &[FmtArg]) -> (bool, String) {
    let mut out = Vec::new();
    let hit = json_setf(src, &mut out, path, Some((fmt, args))).unwrap();
    (hit, String::from_utf8(out).unwrap())
}

fn delete(src: &str, path: &str) -> (bool, String) {
    let mut out = Vec::new();
    let hit = json_setf(src, &mut out, path, None).unwrap();
    (hit, String::from_utf8(out).unwrap())
}

fn assert_valid(s: &str) {
    serde_json::from_str::<serde_json::Value>(s)
        .unwrap_or_else(|e| panic!("invalid JSON {s:?}: {e}"));
}

#[test]
fn replace_number_preserves_surrounding_text() {
    let (hit, out) = setf("{ \"a\": 123, \"b\": true }", ".a", "%d", &json_args![42]);
    assert!(hit);
    assert_eq!(out, "{ \"a\": 42, \"b\": true }");
}

#[test]
fn replace_string_replaces_quotes_too() {
    let (hit, out) = setf(r#"{"a":"x"}"#, ".a", "%Q", &json_args!["yy"]);
    assert!(hit);
    assert_eq!(out, r#"{"a":"yy"}"#);
}

#[test]
fn replace_container_value() {
    let (hit, out) = setf(r#"{"a":[1,2],"b":3}"#, ".a", "%d", &json_args![7]);
    assert!(hit);
    assert_eq!(out, r#"{"a":7,"b":3}"#);
}

#[test]
fn replace_root() {
    let (hit, out) = setf(r#"{"a":1}"#, "", "%B", &json_args![true]);
    assert!(hit);
    assert_eq!(out, "true");
}

#[test]
fn insert_new_key() {
    let (hit, out) = setf(r#"{"a":1}"#, ".b", "%d", &json_args![2]);
    assert!(hit);
    assert_eq!(out, r#"{"a":1,"b":2}"#);
}

#[test]
fn insert_into_empty_object() {
    let (hit, out) = setf("{}", ".a", "%d", &json_args![1]);
    assert!(hit);
    assert_eq!(out, r#"{"a":1}"#);
}

#[test]
fn insert_into_empty_array() {
    let (hit, out) = setf("[]", "[0]", "%d", &json_args![1]);
    assert!(hit);
    assert_eq!(out, "[1]");
}

#[test]
fn insert_past_end_of_array() {
    let (hit, out) = setf("[1,2]", "[5]", "%d", &json_args![3]);
    assert!(hit);
    assert_eq!(out, "[1,2,3]");
}

#[test]
fn insert_synthesises_missing_objects() {
    let (hit, out) = setf(r#"{"a":1}"#, ".b.c", "%d", &json_args![2]);
    assert!(hit);
    assert_eq!(out, r#"{"a":1,"b":{"c":2}}"#);
    assert_valid(&out);
}

#[test]
fn insert_synthesises_missing_arrays() {
    let (hit, out) = setf("{}", ".list[0]", "%d", &json_args![5]);
    assert!(hit);
    assert_eq!(out, r#"{"list":[5]}"#);

    let (hit, out) = setf(r#"{"a":1}"#, ".b[0].c", "%Q", &json_args!["v"]);
    assert!(hit);
    assert_eq!(out, r#"{"a":1,"b":[{"c":"v"}]}"#);
    assert_valid(&out);
}

#[test]
fn insert_below_existing_structure() {
    let (hit, out) = setf(r#"{"a":{}}"#, ".a.b", "%d", &json_args![1]);
    assert!(hit);
    assert_eq!(out, r#"{"a":{"b":1}}"#);

    let (hit, out) = setf(r#"{"a":{"x":1}}"#, ".a.y", "%d", &json_args![2]);
    assert!(hit);
    assert_eq!(out, r#"{"a":{"x":1,"y":2}}"#);

    let (hit, out) = setf(r#"{"a":[1]}"#, ".a[9]", "%d", &json_args![2]);
    assert!(hit);
    assert_eq!(out, r#"{"a":[1,2]}"#);
}

#[test]
fn partial_key_names_are_not_prefixes() {
    let (hit, out) = setf(r#"{"abd":1}"#, ".abc", "%d", &json_args![2]);
    assert!(hit);
    assert_eq!(out, r#"{"abd":1,"abc":2}"#);
}

#[test]
fn setf_is_idempotent() {
    let src = r#"{ "a": [1, 2], "b": {} }"#;
    let (_, once) = setf(src, ".b.c", "%d", &json_args![9]);
    let (_, twice) = setf(&once, ".b.c", "%d", &json_args![9]);
    assert_eq!(once, twice);
}

#[test]
fn delete_key() {
    let (hit, out) = delete(r#"{"a":1,"b":2}"#, ".a");
    assert!(hit);
    assert_eq!(out, r#"{"b":2}"#);

    let (hit, out) = delete(r#"{"a":1,"b":2}"#, ".b");
    assert!(hit);
    assert_eq!(out, r#"{"a":1}"#);
}

#[test]
fn delete_string_value_takes_its_quotes() {
    let (hit, out) = delete(r#"{"a":"x","b":2}"#, ".a");
    assert!(hit);
    assert_eq!(out, r#"{"b":2}"#);
}

#[test]
fn delete_container_value() {
    let (hit, out) = delete(r#"{"a":1,"b":{"x":2}}"#, ".b");
    assert!(hit);
    assert_eq!(out, r#"{"a":1}"#);

    let (hit, out) = delete(r#"{"a":[1,2],"b":3}"#, ".a");
    assert!(hit);
    assert_eq!(out, r#"{"b":3}"#);
}

#[test]
fn delete_array_elements() {
    let (hit, out) = delete("[1]", "[0]");
    assert!(hit);
    assert_eq!(out, "[]");

    let (hit, out) = delete("[1,2]", "[0]");
    assert!(hit);
    assert_eq!(out, "[2]");

    let (hit, out) = delete("[1,2]", "[1]");
    assert!(hit);
    assert_eq!(out, "[1]");
}

#[test]
fn delete_missing_path_is_a_noop() {
    let src = r#"{"a":1}"#;
    let (hit, out) = delete(src, ".zz");
    assert!(!hit);
    assert_eq!(out, src);
}

#[test]
fn deleting_every_key_in_any_order_yields_empty_object() {
    let src = r#"{"a":1,"b":[2,3],"c":{"d":4},"e":"s"}"#;
    let orders: &[[&str; 4]] = &[
        [".a", ".b", ".c", ".e"],
        [".e", ".c", ".b", ".a"],
        [".b", ".e", ".a", ".c"],
        [".c", ".a", ".e", ".b"],
    ];
    for order in orders {
        let mut doc = src.to_string();
        for path in order {
            let (hit, out) = delete(&doc, path);
            assert!(hit, "deleting {path} from {doc}");
            assert_valid(&out);
            doc = out;
        }
        assert_eq!(doc, "{}");
    }
}

#[test]
fn walker_errors_propagate() {
    let mut out = Vec::new();
    assert_eq!(
        json_setf("{\"a\":", &mut out, ".a", Some(("1", &json_args![]))),
        Err(JsonError::Incomplete)
    );
    let mut out = Vec::new();
    assert_eq!(
        json_setf("@", &mut out, ".a", None),
        Err(JsonError::Invalid)
    );
}

#[test]
fn formatted_replacement_goes_through_the_printer() {
    let (hit, out) = setf(
        r#"{"cfg":0}"#,
        ".cfg",
        "{level:%d, name:%Q}",
        &json_args![3, "deep"],
    );
    assert!(hit);
    assert_eq!(out, r#"{"cfg":{"level":3, "name":"deep"}}"#);
    assert_valid(&out);
}
