//! The JSON writer
//!
//! Values are written by recursive descent over their kind. In compact mode no whitespace is
//! written outside of string literals. Otherwise every map member and array element goes on its
//! own line, indented by `level * spaces` spaces, with the level increasing by one per nesting
//! depth.
use crate::errors::{Details, JsonResult};
use crate::value::DynamicValue;
use crate::writer_error;
use log::trace;
use std::io::{BufWriter, Write};

/// Main JSON writer struct
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct JsonWriter {
    compact: bool,
    level: usize,
    spaces: usize,
}

impl Default for JsonWriter {
    /// Compact output, with an indentation of 3 spaces per level starting from level 0 should
    /// compact mode be switched off
    fn default() -> Self {
        JsonWriter {
            compact: true,
            level: 0,
            spaces: 3,
        }
    }
}

impl JsonWriter {
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn with_indentation(mut self, level: usize, spaces: usize) -> Self {
        self.level = level;
        self.spaces = spaces;
        self
    }

    pub fn set_compact(&mut self, compact: bool) {
        self.compact = compact;
    }

    /// Set the starting indentation level and the number of spaces per level. Only used when
    /// compact mode is off
    pub fn set_indentation(&mut self, level: usize, spaces: usize) {
        self.level = level;
        self.spaces = spaces;
    }

    /// Write a value to a sink. Output is buffered and flushed before returning
    pub fn write<W: Write>(&self, value: &DynamicValue, sink: W) -> JsonResult<()> {
        self.write_optional(Some(value), sink)
    }

    /// Write a possibly absent value to a sink. An absent value is written as `null`
    pub fn write_optional<W: Write>(&self, value: Option<&DynamicValue>, sink: W) -> JsonResult<()> {
        let mut out = BufWriter::new(sink);
        match value {
            Some(value) => self.write_value(value, self.level, &mut out)?,
            None => out.write_all(b"null")?,
        }
        out.flush()?;
        Ok(())
    }

    /// Write a value into a new [String]
    pub fn write_to_string(&self, value: &DynamicValue) -> JsonResult<String> {
        let mut bytes: Vec<u8> = vec![];
        self.write(value, &mut bytes)?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(err) => writer_error!(Details::StreamFailure(err.to_string())),
        }
    }

    fn write_value<W: Write>(&self, value: &DynamicValue, level: usize, out: &mut W) -> JsonResult<()> {
        match value {
            DynamicValue::String(s) => write_string(s, out),
            DynamicValue::Boolean(b) => Ok(write!(out, "{}", b)?),
            DynamicValue::Number(n) if n.is_finite() => Ok(write!(out, "{}", n)?),
            DynamicValue::Number(_) => Ok(out.write_all(b"null")?),
            DynamicValue::Map(map) => {
                trace!("writing map of {} members at level {}", map.len(), level);
                self.open(b'{', out)?;
                for (i, (name, member)) in map.iter().enumerate() {
                    self.write_indentation(level + 1, out)?;
                    write_string(name, out)?;
                    out.write_all(if self.compact { b":" } else { b" : " })?;
                    self.write_value(member, level + 1, out)?;
                    self.separate(i + 1 < map.len(), out)?;
                }
                self.close(b'}', level, out)
            }
            DynamicValue::Array(array) => {
                trace!("writing array of {} elements at level {}", array.len(), level);
                self.open(b'[', out)?;
                for (i, element) in array.iter().enumerate() {
                    self.write_indentation(level + 1, out)?;
                    self.write_value(element, level + 1, out)?;
                    self.separate(i + 1 < array.len(), out)?;
                }
                self.close(b']', level, out)
            }
        }
    }

    fn open<W: Write>(&self, bracket: u8, out: &mut W) -> JsonResult<()> {
        out.write_all(&[bracket])?;
        if !self.compact {
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn separate<W: Write>(&self, more: bool, out: &mut W) -> JsonResult<()> {
        if more {
            out.write_all(b",")?;
        }
        if !self.compact {
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn close<W: Write>(&self, bracket: u8, level: usize, out: &mut W) -> JsonResult<()> {
        self.write_indentation(level, out)?;
        out.write_all(&[bracket])?;
        Ok(())
    }

    fn write_indentation<W: Write>(&self, level: usize, out: &mut W) -> JsonResult<()> {
        if !self.compact {
            write!(out, "{:width$}", "", width = level * self.spaces)?;
        }
        Ok(())
    }
}

/// Characters written without escaping: space, `!`, everything from `#` to `[`, and everything
/// from `]` upwards
#[inline]
fn is_safe(c: char) -> bool {
    c >= ']' || ('#'..='[').contains(&c) || c == '!' || c == ' '
}

fn write_string<W: Write>(s: &str, out: &mut W) -> JsonResult<()> {
    out.write_all(b"\"")?;
    let mut encoded = [0u8; 4];
    for c in s.chars() {
        if is_safe(c) {
            out.write_all(c.encode_utf8(&mut encoded).as_bytes())?;
            continue;
        }
        match c {
            '"' => out.write_all(b"\\\"")?,
            '\\' => out.write_all(b"\\\\")?,
            '\u{8}' => out.write_all(b"\\b")?,
            '\u{c}' => out.write_all(b"\\f")?,
            '\n' => out.write_all(b"\\n")?,
            '\r' => out.write_all(b"\\r")?,
            '\t' => out.write_all(b"\\t")?,
            other => write!(out, "\\u{:04x}", other as u32)?,
        }
    }
    out.write_all(b"\"")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::errors::Details;
    use crate::value::{DynamicValue, Kind};
    use crate::value_from_str;
    use crate::writer::JsonWriter;
    use std::io::{self, Write};

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn should_write_compact_maps() {
        let mut value = DynamicValue::new();
        value.set_member("x", 1);
        assert_eq!(JsonWriter::default().write_to_string(&value).unwrap(), r#"{"x":1}"#);
    }

    #[test]
    fn should_write_indented_maps() {
        let mut value = DynamicValue::new();
        value.set_member("x", 1);
        value["y"].push("a");
        value["y"].push(false);
        let writer = JsonWriter::default()
            .with_compact(false)
            .with_indentation(0, 2);
        assert_eq!(
            writer.write_to_string(&value).unwrap(),
            "{\n  \"x\" : 1,\n  \"y\" : [\n    \"a\",\n    false\n  ]\n}"
        );
    }

    #[test]
    fn should_start_from_the_configured_level() {
        let value = DynamicValue::from(vec![DynamicValue::from(1)]);
        let mut writer = JsonWriter::default();
        writer.set_compact(false);
        writer.set_indentation(1, 4);
        assert_eq!(writer.write_to_string(&value).unwrap(), "[\n        1\n    ]");
    }

    #[test]
    fn should_write_empty_containers() {
        let compact = JsonWriter::default();
        let indented = JsonWriter::default().with_compact(false);
        let map = DynamicValue::with_kind(Kind::Map);
        let array = DynamicValue::with_kind(Kind::Array);
        assert_eq!(compact.write_to_string(&map).unwrap(), "{}");
        assert_eq!(compact.write_to_string(&array).unwrap(), "[]");
        assert_eq!(indented.write_to_string(&map).unwrap(), "{\n}");
    }

    #[test]
    fn should_escape_strings() {
        let value = DynamicValue::from(vec![DynamicValue::from(
            "q\" b\\ /\u{8}\u{c}\n\r\t\u{1}\u{1f}é",
        )]);
        assert_eq!(
            JsonWriter::default().write_to_string(&value).unwrap(),
            "[\"q\\\" b\\\\ /\\b\\f\\n\\r\\t\\u0001\\u001fé\"]"
        );
    }

    #[test]
    fn should_escape_keys() {
        let mut value = DynamicValue::new();
        value.set_member("a\"b", true);
        assert_eq!(
            JsonWriter::default().write_to_string(&value).unwrap(),
            r#"{"a\"b":true}"#
        );
    }

    #[test]
    fn should_write_scalars_in_canonical_form() {
        let value = value_from_str!("[1.5, -3, true, null, 1e2]");
        assert_eq!(
            JsonWriter::default().write_to_string(&value).unwrap(),
            r#"[1.5,-3,true,"",100]"#
        );
    }

    #[test]
    fn should_write_non_finite_numbers_as_null() {
        let value = DynamicValue::from(vec![
            DynamicValue::from(f64::NAN),
            DynamicValue::from(f64::INFINITY),
        ]);
        assert_eq!(
            JsonWriter::default().write_to_string(&value).unwrap(),
            "[null,null]"
        );
    }

    #[test]
    fn should_write_absent_values_as_null() {
        let mut out: Vec<u8> = vec![];
        JsonWriter::default().write_optional(None, &mut out).unwrap();
        assert_eq!(out, b"null");
    }

    #[test]
    fn should_keep_member_order() {
        let value = value_from_str!(r#"{"z":1,"a":2,"m":3}"#);
        assert_eq!(value.to_string(), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn sink_failures_should_be_reported() {
        let value = value_from_str!(r#"{"a":[1,2,3]}"#);
        let err = JsonWriter::default().write(&value, BrokenSink).unwrap_err();
        assert!(matches!(err.details, Details::StreamFailure(_)));
    }
}
