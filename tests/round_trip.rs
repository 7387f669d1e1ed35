use dyno_json::{DynamicValue, JsonReader, JsonWriter, Kind};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample() -> DynamicValue {
    let mut value = DynamicValue::new();
    value["text"] = DynamicValue::from("quotes \" slashes \\ / newlines \n tabs \t bell \u{7} é 😀");
    value["int"] = DynamicValue::from(-42);
    value["big"] = DynamicValue::from(u64::MAX);
    value["float"] = DynamicValue::from(0.1);
    value["flag"] = DynamicValue::from(true);
    value["list"][3]["inner"] = DynamicValue::from("x");
    value["list"][1].push(1);
    value["empty_map"] = DynamicValue::with_kind(Kind::Map);
    value["empty_list"] = DynamicValue::with_kind(Kind::Array);
    value["we\"ird key\n"] = DynamicValue::from(1.5e300);
    value
}

#[test]
fn reading_written_values_should_reproduce_them() {
    init();
    let value = sample();
    for writer in [
        JsonWriter::default(),
        JsonWriter::default().with_compact(false),
        JsonWriter::default().with_compact(false).with_indentation(2, 1),
    ] {
        let json = writer.write_to_string(&value).unwrap();
        let read = JsonReader::default().parse_str(&json).unwrap();
        assert_eq!(read, value, "{}", json);
    }
}

#[test]
fn compact_writing_should_be_idempotent() {
    init();
    for f in std::fs::read_dir("fixtures/json/valid").unwrap() {
        let path = f.unwrap().path();
        if !path.is_file() {
            continue;
        }
        let value = JsonReader::default().parse_file(&path).unwrap();
        let first = JsonWriter::default().write_to_string(&value).unwrap();
        let second = JsonWriter::default()
            .write_to_string(&JsonReader::default().parse_str(&first).unwrap())
            .unwrap();
        assert_eq!(first, second, "{:?}", path);
        assert_eq!(
            JsonWriter::default().write_to_string(&value).unwrap(),
            first,
            "{:?}",
            path
        );
    }
}

#[test]
fn fixtures_should_survive_a_round_trip() {
    init();
    for f in std::fs::read_dir("fixtures/json/valid").unwrap() {
        let path = f.unwrap().path();
        if !path.is_file() {
            continue;
        }
        let value = JsonReader::default().parse_file(&path).unwrap();
        let pretty = JsonWriter::default()
            .with_compact(false)
            .write_to_string(&value)
            .unwrap();
        assert_eq!(JsonReader::default().parse_str(&pretty).unwrap(), value, "{:?}", path);
    }
}
