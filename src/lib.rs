//! A single pass JSON parser which builds a mutable, order preserving document tree, together
//! with a serializer which renders a tree back into compact JSON text.
//!
//! ```
//! use chisel_tree::{parse, to_text, JsonValue};
//!
//! let mut doc = parse(r#"{"name":"chisel","tags":["json"]}"#).unwrap();
//! doc.get_mut("tags").unwrap().push(JsonValue::from("dom")).unwrap();
//! doc.set("stars", JsonValue::from(5)).unwrap();
//! assert_eq!(
//!     to_text(&doc),
//!     r#"{"name":"chisel","tags":["json","dom"],"stars":5}"#
//! );
//! ```
pub mod coords;
pub mod decoders;
pub mod errors;
pub mod parser;
pub mod serializer;
#[cfg(test)]
mod test_macros;
pub mod value;

pub use errors::{Details, Error, JsonResult, Stage};
pub use parser::Parser;
pub use serializer::to_text;
pub use value::{JsonValue, Kind};

/// Parse a complete JSON document held within a string, using a default [Parser]
pub fn parse(text: &str) -> JsonResult<JsonValue> {
    Parser::default().parse_str(text)
}
