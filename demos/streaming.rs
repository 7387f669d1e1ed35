use dyno_json::{DynamicValue, JsonReader, Position};
use std::collections::BTreeSet;
use std::fs;

/// Collect the distinct member paths within a value
fn collect_paths(value: &DynamicValue, prefix: &str, paths: &mut BTreeSet<String>) {
    if !value.is_container() {
        return;
    }
    for (position, child) in value {
        let path = match position {
            Position::Key(k) => format!("{}/{}", prefix, k),
            Position::Index(_) => format!("{}/*", prefix),
        };
        collect_paths(child, &path, paths);
        paths.insert(path);
    }
}

/// Feed a document through the reader a few bytes at a time, as it would arrive from a socket,
/// then list the distinct paths it contains and the differences against a modified copy
fn main() {
    env_logger::init();
    let bytes = fs::read("fixtures/json/valid/blog_entries.json").unwrap();
    let mut reader = JsonReader::default();
    reader.start(DynamicValue::new());
    for chunk in bytes.chunks(16) {
        reader.feed(chunk).unwrap();
    }
    let entries = reader.finish().unwrap();

    let mut paths = BTreeSet::new();
    collect_paths(&entries, "", &mut paths);
    paths.iter().for_each(|p| println!("Found distinct path: {}", p));

    let mut edited = entries.clone();
    edited[0]["draft"] = DynamicValue::from(true);
    edited[1]["tags"].push("vivified");
    edited.append().set_member("id", 4);
    if let Some(report) = entries.diff(&edited) {
        println!("Changes: {}", report);
    }
}
