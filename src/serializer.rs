//! Renders a [JsonValue] tree as compact JSON text.
//!
//! Object entries are written in insertion order, strings are written verbatim between quotes
//! (they already hold the raw text captured by the parser), and no whitespace is emitted.
use std::fmt::{Display, Formatter};

use crate::value::JsonValue;

/// A pending unit of output. Containers are expanded into their parts on a work stack rather
/// than by recursion, so the depth of a tree is bounded only by the heap.
enum Pending<'a> {
    Value(&'a JsonValue),
    Entry(&'a str, &'a JsonValue),
    Punctuation(char),
}

/// Serialize a [JsonValue] to compact JSON text
pub fn to_text(value: &JsonValue) -> String {
    let mut output = String::new();
    let mut pending = vec![Pending::Value(value)];
    while let Some(next) = pending.pop() {
        match next {
            Pending::Value(value) => serialize_value(value, &mut output, &mut pending),
            Pending::Entry(key, value) => {
                serialize_string(key, &mut output);
                output.push(':');
                pending.push(Pending::Value(value));
            }
            Pending::Punctuation(c) => output.push(c),
        }
    }
    output
}

/// Write a scalar directly, or open a container and schedule its contents (last first)
fn serialize_value<'a>(value: &'a JsonValue, output: &mut String, pending: &mut Vec<Pending<'a>>) {
    match value {
        JsonValue::Null => output.push_str("null"),
        JsonValue::Boolean(true) => output.push_str("true"),
        JsonValue::Boolean(false) => output.push_str("false"),
        JsonValue::Integer(i) => output.push_str(&i.to_string()),
        JsonValue::Float(f) => output.push_str(&serialize_float(*f)),
        JsonValue::String(s) => serialize_string(s, output),
        JsonValue::Array(values) => {
            output.push('[');
            pending.push(Pending::Punctuation(']'));
            for (i, value) in values.iter().enumerate().rev() {
                pending.push(Pending::Value(value));
                if i > 0 {
                    pending.push(Pending::Punctuation(','));
                }
            }
        }
        JsonValue::Object(pairs) => {
            output.push('{');
            pending.push(Pending::Punctuation('}'));
            for (i, (key, value)) in pairs.iter().enumerate().rev() {
                pending.push(Pending::Entry(key, value));
                if i > 0 {
                    pending.push(Pending::Punctuation(','));
                }
            }
        }
    }
}

/// Floats use the shortest representation that reads back to the same value, which always
/// carries a fraction or an exponent (`300.0`, `1e20`) so the text re-parses as a float
fn serialize_float(f: f32) -> String {
    format!("{:?}", f).to_lowercase()
}

fn serialize_string(s: &str, output: &mut String) {
    output.push('"');
    output.push_str(s);
    output.push('"');
}

impl Display for JsonValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&to_text(self))
    }
}
