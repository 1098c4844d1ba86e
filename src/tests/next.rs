use super::*;

const DOC: &str = r#"{"a":1,"b":{"x":true},"c":[10,20],"d":"s"}"#;

#[test]
fn next_key_steps_through_members() {
    let mut handle = None;
    let mut seen = Vec::new();
    while let Some((h, key, val)) = json_next_key(DOC, handle, "") {
        handle = Some(h);
        seen.push((key, val.text));
    }
    assert_eq!(
        seen,
        [
            ("a", "1"),
            ("b", r#"{"x":true}"#),
            ("c", "[10,20]"),
            ("d", "s"),
        ]
    );
}

#[test]
fn next_key_descends_by_path() {
    let (_, key, val) = json_next_key(DOC, None, ".b").unwrap();
    assert_eq!((key, val.text, val.ty), ("x", "true", TokenType::True));
    assert!(json_next_key(DOC, None, ".d").is_none());
}

#[test]
fn next_elem_steps_through_elements() {
    let mut handle = None;
    let mut seen = Vec::new();
    while let Some((h, idx, val)) = json_next_elem(DOC, handle, ".c") {
        handle = Some(h);
        seen.push((idx, val.text));
    }
    assert_eq!(seen, [(0, "10"), (1, "20")]);
}

#[test]
fn next_elem_on_object_yields_nothing() {
    assert!(json_next_elem(DOC, None, ".b").is_none());
}

#[test]
fn nested_values_are_not_direct_children() {
    let doc = r#"{"a":{"deep":{"deeper":1}},"b":2}"#;
    let mut handle = None;
    let mut keys_seen = Vec::new();
    while let Some((h, key, _)) = json_next_key(doc, handle, "") {
        handle = Some(h);
        keys_seen.push(key);
    }
    assert_eq!(keys_seen, ["a", "b"]);
}

#[test]
fn iterator_adapters() {
    let names: Vec<_> = keys(DOC, "").map(|(k, _)| k).collect();
    assert_eq!(names, ["a", "b", "c", "d"]);

    let values: Vec<_> = elems(DOC, ".c").map(|(_, v)| v.text).collect();
    assert_eq!(values, ["10", "20"]);

    assert_eq!(keys("{}", "").count(), 0);
    assert_eq!(elems("[]", "").count(), 0);
}
