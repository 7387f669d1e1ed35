//! A dynamic value runtime together with a streaming, table driven JSON reader and a compact or
//! indented JSON writer.
//!
//! ```
//! use dyno_json::{DynamicValue, JsonReader, JsonWriter};
//!
//! let mut value = JsonReader::default().parse_str(r#"{"a": 1}"#).unwrap();
//! value["b"][2] = DynamicValue::from(true);
//! let json = JsonWriter::default().write_to_string(&value).unwrap();
//! assert_eq!(json, r#"{"a":1,"b":["","",true]}"#);
//! ```
pub mod coords;
pub mod decoders;
pub mod errors;
pub mod iter;
pub mod number;
pub mod reader;
mod tables;
#[cfg(test)]
mod test_macros;
pub mod value;
pub mod writer;

pub use crate::decoders::Encoding;
pub use crate::errors::{Error, JsonResult};
pub use crate::iter::{Iter, Position};
pub use crate::number::Number;
pub use crate::reader::JsonReader;
pub use crate::value::{DynamicValue, Kind, Map};
pub use crate::writer::JsonWriter;
