use dyno_json::{DynamicValue, JsonReader, Kind, Position};

fn parse(text: &str) -> DynamicValue {
    JsonReader::default().parse_str(text).unwrap()
}

#[test]
fn vivified_arrays_should_be_backfilled_with_empty_strings() {
    let mut value = DynamicValue::new();
    value.element_mut(5);
    assert_eq!(value.kind(), Kind::Array);
    assert_eq!(value.length(), 6);
    assert!(value.iter().all(|(_, v)| v.kind() == Kind::String && v.length() == 0));
}

#[test]
fn merging_arrays_should_append_or_overwrite() {
    let b = parse("[8,9]");

    let mut a = parse("[1,2,3]");
    a.merge(&b, true);
    assert_eq!(a, parse("[1,2,3,8,9]"));

    let mut a = parse("[1,2,3]");
    a.merge(&b, false);
    assert_eq!(a, parse("[8,9,3]"));
}

#[test]
fn merging_parsed_documents_should_combine_members() {
    let mut config = parse(r#"{"server": {"host": "localhost", "port": 80}, "debug": false}"#);
    let overrides = parse(r#"{"server": {"port": 8080}, "debug": true, "extra": [1]}"#);
    config.merge(&overrides, false);
    assert_eq!(
        config,
        parse(r#"{"server": {"host": "localhost", "port": 8080}, "debug": true, "extra": [1]}"#)
    );
    assert!(overrides.is_subset(&config));
}

#[test]
fn subsets_should_follow_member_values() {
    assert!(parse(r#"{"a":1}"#).is_subset(&parse(r#"{"a":1,"b":2}"#)));
    assert!(!parse(r#"{"a":1,"c":3}"#).is_subset(&parse(r#"{"a":1,"b":2}"#)));
    assert!(!parse(r#"{"a":2}"#).is_subset(&parse(r#"{"a":1,"b":2}"#)));
}

#[test]
fn parsed_numbers_should_equal_their_text() {
    let value = parse(r#"{"n": 1, "s": "1"}"#);
    assert_eq!(value["n"], value["s"]);
    assert_eq!(value["n"].length(), 8);
    assert_eq!(value["s"].length(), 1);
}

#[test]
fn iteration_should_expose_keys_and_indices() {
    let value = parse(r#"{"first": [10, 20], "second": {}}"#);
    let mut iter = value.iter();
    let (position, first) = iter.next().unwrap();
    assert_eq!(position, Position::Key("first"));
    let indices: Vec<usize> = first.iter().filter_map(|(p, _)| p.index()).collect();
    assert_eq!(indices, vec![0, 1]);
    assert_eq!(iter.next().unwrap().0.to_string(), "second");
    assert!(iter.next().is_none());
}

#[test]
fn diffs_should_describe_document_changes() {
    let before = parse(r#"{"a": 1, "b": [1, 2], "c": "gone"}"#);
    let after = parse(r#"{"a": "1", "b": [1, 3, 4], "d": true}"#);
    let report = before.diff(&after).unwrap();
    assert_eq!(report.length(), 4);
    assert_eq!(report[0]["key"].as_str(), Some("a"));
    assert_eq!(report[0]["changed"]["type"].as_str(), Some("typeChanged"));
    assert_eq!(report[1]["key"].as_str(), Some("b"));
    assert_eq!(report[1]["changed"].length(), 2);
    assert_eq!(report[2]["removed"].as_str(), Some("gone"));
    assert!(report[3]["added"].as_bool());
    assert!(before.diff(&before.clone()).is_none());
}
