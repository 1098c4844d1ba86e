use super::*;

fn pretty(src: &str) -> String {
    let mut out = Vec::new();
    json_prettify(src, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn two_space_indentation() {
    assert_eq!(
        pretty(r#"{"a":[1,{"b":2}]}"#),
        "{\n  \"a\": [\n    1,\n    {\n      \"b\": 2\n    }\n  ]\n}"
    );
}

#[test]
fn empty_containers_stay_closed_up() {
    assert_eq!(pretty("{}"), "{}");
    assert_eq!(pretty("[]"), "[]");
    assert_eq!(pretty(r#"{"a":{}}"#), "{\n  \"a\": {}\n}");
    assert_eq!(pretty(r#"[[]]"#), "[\n  []\n]");
}

#[test]
fn scalars_and_strings() {
    assert_eq!(pretty("true"), "true");
    assert_eq!(pretty("\"x\""), "\"x\"");
    // Escapes are copied raw, not re-encoded
    assert_eq!(
        pretty(r#"{"a":"x\ny"}"#),
        "{\n  \"a\": \"x\\ny\"\n}"
    );
}

#[test]
fn prettify_is_a_whitespace_only_transform() {
    let cases = [
        r#"{"a":[1,2,{"b":true}],"c":null}"#,
        r#"[{"x":"a b  c"},[],{},"s",-1.5e-3]"#,
        "{ \"k\" :\t[ 1 ,\n2 ] }",
    ];
    for src in cases {
        let out = pretty(src);
        assert_eq!(strip_ws(&out), strip_ws(src), "case {src:?}");
    }
}

#[test]
fn prettify_twice_is_stable() {
    let once = pretty(r#"{"a":[1,{"b":2}]}"#);
    assert_eq!(pretty(&once), once);
}

#[test]
fn errors_pass_through() {
    let mut out = Vec::new();
    assert_eq!(json_prettify("{\"a\":1", &mut out), Err(JsonError::Incomplete));
    let mut out = Vec::new();
    assert_eq!(json_prettify("<html>", &mut out), Err(JsonError::Invalid));
}
