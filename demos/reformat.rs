use dyno_json::{decoders::Encoding, JsonReader, JsonWriter};
use std::io::stdout;
use std::time::Instant;

/// Read a JSON document (the first argument, or a bundled fixture) and write it back out to stdout
/// with indentation. Pass `--compact` as the second argument for compact output instead
fn main() {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .unwrap_or_else(|| "fixtures/json/valid/blog_entries.json".to_string());
    let compact = matches!(args.next().as_deref(), Some("--compact"));

    let start = Instant::now();
    let mut reader = JsonReader::with_encoding(Encoding::Utf8);
    let value = match reader.parse_file(&path) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("{}: {}", path, err);
            std::process::exit(1);
        }
    };
    let writer = JsonWriter::default()
        .with_compact(compact)
        .with_indentation(0, 2);
    if let Err(err) = writer.write(&value, stdout()) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
    println!();
    eprintln!("Reformatted {} in {:?}", path, start.elapsed());
}
