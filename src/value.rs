//! The document tree. Every node in a parsed (or hand-built) document is a [JsonValue], and
//! each node exclusively owns its children so a tree can never contain cycles or shared nodes.
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;

use crate::errors::{Details, Error, JsonResult};
use crate::value_error;

/// The discriminant of a [JsonValue]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Kind {
    Null,
    Object,
    Array,
    String,
    Integer,
    Float,
    Boolean,
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Null => write!(f, "null"),
            Kind::Object => write!(f, "object"),
            Kind::Array => write!(f, "array"),
            Kind::String => write!(f, "string"),
            Kind::Integer => write!(f, "integer"),
            Kind::Float => write!(f, "float"),
            Kind::Boolean => write!(f, "boolean"),
        }
    }
}

/// Basic enumeration of different Json values
#[derive(Debug, Clone, Default)]
pub enum JsonValue {
    /// Canonical null value
    #[default]
    Null,
    /// Map of values, kept in insertion order with unique keys
    Object(IndexMap<String, JsonValue>),
    /// Array of values
    Array(Vec<JsonValue>),
    /// Raw string value. Escape sequences are kept exactly as they appeared in the input
    String(String),
    /// Integer numeric value
    Integer(i32),
    /// Floating point numeric value
    Float(f32),
    /// Canonical boolean value
    Boolean(bool),
}

impl JsonValue {
    /// The current [Kind] of this value
    pub fn kind(&self) -> Kind {
        match self {
            JsonValue::Null => Kind::Null,
            JsonValue::Object(_) => Kind::Object,
            JsonValue::Array(_) => Kind::Array,
            JsonValue::String(_) => Kind::String,
            JsonValue::Integer(_) => Kind::Integer,
            JsonValue::Float(_) => Kind::Float,
            JsonValue::Boolean(_) => Kind::Boolean,
        }
    }

    /// Reassign the [Kind] of this value. The previous payload is always discarded and
    /// replaced with the empty/zero payload of the new kind, so that switching to
    /// [Kind::Object] or [Kind::Array] always yields a fresh, empty container.
    pub fn set_kind(&mut self, kind: Kind) {
        *self = match kind {
            Kind::Null => JsonValue::Null,
            Kind::Object => JsonValue::Object(IndexMap::new()),
            Kind::Array => JsonValue::Array(vec![]),
            Kind::String => JsonValue::String(String::new()),
            Kind::Integer => JsonValue::Integer(0),
            Kind::Float => JsonValue::Float(0.0),
            Kind::Boolean => JsonValue::Boolean(false),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    /// True for both integers and floats
    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Integer(_) | JsonValue::Float(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, JsonValue::Boolean(_))
    }

    /// Get the raw string payload
    pub fn as_string(&self) -> JsonResult<&str> {
        match self {
            JsonValue::String(s) => Ok(s),
            other => value_error!(Details::TypeMismatch {
                expected: "string",
                found: other.kind()
            }),
        }
    }

    /// Get an integer from a numeric value. Floats are truncated towards zero
    /// (saturating at the bounds of an [i32])
    pub fn as_int(&self) -> JsonResult<i32> {
        match self {
            JsonValue::Integer(i) => Ok(*i),
            JsonValue::Float(f) => Ok(*f as i32),
            other => value_error!(Details::TypeMismatch {
                expected: "number",
                found: other.kind()
            }),
        }
    }

    /// Get a float from a numeric value. Integers are widened
    pub fn as_float(&self) -> JsonResult<f32> {
        match self {
            JsonValue::Float(f) => Ok(*f),
            JsonValue::Integer(i) => Ok(*i as f32),
            other => value_error!(Details::TypeMismatch {
                expected: "number",
                found: other.kind()
            }),
        }
    }

    pub fn as_bool(&self) -> JsonResult<bool> {
        match self {
            JsonValue::Boolean(b) => Ok(*b),
            other => value_error!(Details::TypeMismatch {
                expected: "boolean",
                found: other.kind()
            }),
        }
    }

    /// Look up the value stored against a given key within an object
    pub fn get(&self, key: &str) -> JsonResult<&JsonValue> {
        match self {
            JsonValue::Object(pairs) => match pairs.get(key) {
                Some(value) => Ok(value),
                None => value_error!(Details::KeyNotFound(key.to_string())),
            },
            other => value_error!(Details::NotAnObject(other.kind())),
        }
    }

    /// Mutable version of [JsonValue::get]
    pub fn get_mut(&mut self, key: &str) -> JsonResult<&mut JsonValue> {
        match self {
            JsonValue::Object(pairs) => match pairs.get_mut(key) {
                Some(value) => Ok(value),
                None => value_error!(Details::KeyNotFound(key.to_string())),
            },
            other => value_error!(Details::NotAnObject(other.kind())),
        }
    }

    /// Store a value against a key, overwriting (in place) any existing entry for the key.
    /// A null receiver is promoted to an empty object first.
    pub fn set<K: Into<String>>(&mut self, key: K, value: JsonValue) -> JsonResult<()> {
        if self.is_null() {
            self.set_kind(Kind::Object);
        }
        match self {
            JsonValue::Object(pairs) => {
                pairs.insert(key.into(), value);
                Ok(())
            }
            other => value_error!(Details::NotAnObject(other.kind())),
        }
    }

    /// Strictly insert a new entry into an object. Unlike [JsonValue::set], an existing entry
    /// for the key is an error. A null receiver is promoted to an empty object first.
    pub fn add<K: Into<String>>(&mut self, key: K, value: JsonValue) -> JsonResult<()> {
        if self.is_null() {
            self.set_kind(Kind::Object);
        }
        match self {
            JsonValue::Object(pairs) => {
                let key = key.into();
                if pairs.contains_key(&key) {
                    return value_error!(Details::DuplicateKey(key));
                }
                pairs.insert(key, value);
                Ok(())
            }
            other => value_error!(Details::NotAnObject(other.kind())),
        }
    }

    /// Get the element at a given position within an array
    pub fn at(&self, index: usize) -> JsonResult<&JsonValue> {
        match self {
            JsonValue::Array(values) => match values.get(index) {
                Some(value) => Ok(value),
                None => value_error!(Details::IndexOutOfRange {
                    index,
                    len: values.len()
                }),
            },
            other => value_error!(Details::NotAnArray(other.kind())),
        }
    }

    /// Mutable version of [JsonValue::at]
    pub fn at_mut(&mut self, index: usize) -> JsonResult<&mut JsonValue> {
        match self {
            JsonValue::Array(values) => {
                let len = values.len();
                match values.get_mut(index) {
                    Some(value) => Ok(value),
                    None => value_error!(Details::IndexOutOfRange { index, len }),
                }
            }
            other => value_error!(Details::NotAnArray(other.kind())),
        }
    }

    /// Append a value to an array. A null receiver is promoted to an empty array first.
    pub fn push(&mut self, value: JsonValue) -> JsonResult<()> {
        if self.is_null() {
            self.set_kind(Kind::Array);
        }
        match self {
            JsonValue::Array(values) => {
                values.push(value);
                Ok(())
            }
            other => value_error!(Details::NotAnArray(other.kind())),
        }
    }

    /// The number of elements within an array
    pub fn count(&self) -> JsonResult<usize> {
        match self {
            JsonValue::Array(values) => Ok(values.len()),
            other => value_error!(Details::NotAnArray(other.kind())),
        }
    }

    /// Iterate over the elements of an array, in order
    pub fn iter(&self) -> JsonResult<std::slice::Iter<'_, JsonValue>> {
        match self {
            JsonValue::Array(values) => Ok(values.iter()),
            other => value_error!(Details::NotAnArray(other.kind())),
        }
    }

    /// Iterate over the key/value pairs of an object, in insertion order
    pub fn entries(&self) -> JsonResult<impl Iterator<Item = (&str, &JsonValue)> + '_> {
        match self {
            JsonValue::Object(pairs) => Ok(pairs.iter().map(|(k, v)| (k.as_str(), v))),
            other => value_error!(Details::NotAnObject(other.kind())),
        }
    }

    /// Iterate over the keys of an object, in insertion order
    pub fn keys(&self) -> JsonResult<impl Iterator<Item = &str> + '_> {
        Ok(self.entries()?.map(|(k, _)| k))
    }
}

/// Structural equality. Objects compare their entries in insertion order, and nesting is walked
/// with an explicit stack so arbitrarily deep trees can be compared.
impl PartialEq for JsonValue {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (JsonValue::Null, JsonValue::Null) => (),
                (JsonValue::String(a), JsonValue::String(b)) if a == b => (),
                (JsonValue::Integer(a), JsonValue::Integer(b)) if a == b => (),
                (JsonValue::Float(a), JsonValue::Float(b)) if a == b => (),
                (JsonValue::Boolean(a), JsonValue::Boolean(b)) if a == b => (),
                (JsonValue::Array(a), JsonValue::Array(b)) if a.len() == b.len() => {
                    pending.extend(a.iter().zip(b.iter()))
                }
                (JsonValue::Object(a), JsonValue::Object(b)) if a.len() == b.len() => {
                    for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
                        if ka != kb {
                            return false;
                        }
                        pending.push((va, vb));
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

/// Children are moved onto a heap allocated stack before being released, so dropping a deeply
/// nested tree never recurses
impl Drop for JsonValue {
    fn drop(&mut self) {
        let mut pending = match self {
            JsonValue::Array(values) if !values.is_empty() => std::mem::take(values),
            JsonValue::Object(pairs) if !pairs.is_empty() => {
                pairs.drain(..).map(|(_, v)| v).collect()
            }
            _ => return,
        };
        while let Some(mut value) = pending.pop() {
            match &mut value {
                JsonValue::Array(values) => pending.append(values),
                JsonValue::Object(pairs) => pending.extend(pairs.drain(..).map(|(_, v)| v)),
                _ => (),
            }
        }
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<i32> for JsonValue {
    fn from(value: i32) -> Self {
        JsonValue::Integer(value)
    }
}

impl From<f32> for JsonValue {
    fn from(value: f32) -> Self {
        JsonValue::Float(value)
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Boolean(value)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(values: Vec<JsonValue>) -> Self {
        JsonValue::Array(values)
    }
}

impl<'a> TryFrom<&'a JsonValue> for &'a str {
    type Error = Error;

    fn try_from(value: &'a JsonValue) -> Result<Self, Self::Error> {
        value.as_string()
    }
}

impl TryFrom<&JsonValue> for i32 {
    type Error = Error;

    fn try_from(value: &JsonValue) -> Result<Self, Self::Error> {
        value.as_int()
    }
}

impl TryFrom<&JsonValue> for f32 {
    type Error = Error;

    fn try_from(value: &JsonValue) -> Result<Self, Self::Error> {
        value.as_float()
    }
}

impl TryFrom<&JsonValue> for bool {
    type Error = Error;

    fn try_from(value: &JsonValue) -> Result<Self, Self::Error> {
        value.as_bool()
    }
}
