//! The DOM parser
//!
//! Builds a complete [JsonValue] tree in a single forward scan over the input, without
//! recursion. The parser keeps an explicit stack of partially built nodes: the top of the stack
//! is the *cursor* (the node currently being filled), and each node below it is the parent that
//! the node above will be attached to once it is complete.
//!
//! Arrays are built speculatively. Whenever the cursor enters an array, or a value within an
//! array completes, a fresh empty slot is opened for the next element. Closing the array
//! discards whichever slot is open at that point, so `[1,2]` has two elements.
use std::io::BufReader;

use crate::coords::Coords;
use crate::decoders::{DecoderSelector, Encoding};
use crate::errors::{Details, JsonResult};
use crate::parser::input::ParserInput;
use crate::parser_error;
use crate::value::{JsonValue, Kind};

/// Characters that may appear within the run of a numeric value
const NUMERIC_CHARS: &str = "0123456789.eE+-";

/// A partially built node, along with the key it will be stored under within its parent
struct Frame {
    /// Present when the parent is an object
    key: Option<String>,
    /// The node being built
    value: JsonValue,
}

impl Frame {
    fn root() -> Self {
        Frame {
            key: None,
            value: JsonValue::Null,
        }
    }
}

/// Whether parsing should carry on after a step
#[derive(Debug, Copy, Clone, PartialEq)]
enum Step {
    Continue,
    Done,
}

/// Cursor state for a single parse. The stack is never empty; the bottom frame is the root.
struct TreeBuilder {
    frames: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        TreeBuilder {
            frames: vec![Frame::root()],
        }
    }

    fn at_root(&self) -> bool {
        self.frames.len() == 1
    }

    fn current(&mut self) -> &mut JsonValue {
        let last = self.frames.len() - 1;
        &mut self.frames[last].value
    }

    /// Move the cursor down into a new, empty child of the current node
    fn descend(&mut self, key: Option<String>) {
        self.frames.push(Frame {
            key,
            value: JsonValue::Null,
        })
    }

    /// Open a new speculative trailing slot in the current array
    fn open_slot(&mut self) {
        self.descend(None)
    }

    /// Detach the current node and store it within its parent, moving the cursor up
    fn attach(&mut self) -> JsonResult<()> {
        if let Some(frame) = self.frames.pop() {
            let parent = self.current();
            match frame.key {
                Some(key) => parent.set(key, frame.value)?,
                None => parent.push(frame.value)?,
            }
        }
        Ok(())
    }

    /// Move the cursor up to the parent of the current node. When the parent is an array a new
    /// slot is opened immediately, so the cursor always sits within an array's trailing slot.
    /// Completing the root means the whole document is complete.
    fn ascend(&mut self) -> JsonResult<Step> {
        if self.at_root() {
            return Ok(Step::Done);
        }
        self.attach()?;
        if self.current().is_array() {
            self.open_slot();
        }
        Ok(Step::Continue)
    }

    /// Handle a closing `]`. The open slot is discarded and the cursor moves up to the parent
    /// of the array being closed.
    fn close_array(&mut self, coords: Coords) -> JsonResult<Step> {
        let len = self.frames.len();
        if len < 2 || !self.frames[len - 2].value.is_array() {
            return parser_error!(Details::UnbalancedClosingDelimiter, coords);
        }
        self.frames.pop();
        if self.at_root() {
            return Ok(Step::Done);
        }
        self.ascend()
    }

    /// Handle an opening `[`
    fn open_array(&mut self, coords: Coords) -> JsonResult<Step> {
        if self.at_root() && !self.current().is_null() {
            return Ok(Step::Done);
        }
        if self.current().is_null() {
            self.current().set_kind(Kind::Array);
        }
        if !self.current().is_array() {
            return parser_error!(Details::UnexpectedDelimiter('['), coords);
        }
        self.open_slot();
        Ok(Step::Continue)
    }

    /// Unwind any frames still open at the end of the input, and hand back the root
    fn finish(mut self) -> JsonResult<JsonValue> {
        while !self.at_root() {
            self.attach()?;
        }
        Ok(self.frames.pop().map(|f| f.value).unwrap_or_default())
    }
}

/// Main JSON parser struct
#[derive(Default)]
pub struct Parser {
    decoders: DecoderSelector,
    encoding: Encoding,
}

impl Parser {
    /// Create a new instance of the parser using a specific [Encoding]
    pub fn with_encoding(encoding: Encoding) -> Self {
        Self {
            decoders: Default::default(),
            encoding,
        }
    }

    /// Parse a slice of bytes, decoded using the configured [Encoding]
    pub fn parse_bytes(&self, bytes: &[u8]) -> JsonResult<JsonValue> {
        let mut reader = BufReader::new(bytes);
        let mut chars = self.decoders.new_decoder(&mut reader, self.encoding);
        self.parse(&mut chars)
    }

    pub fn parse_str(&self, str: &str) -> JsonResult<JsonValue> {
        self.parse(&mut str.chars())
    }

    /// Parse a stream of characters into a [JsonValue]. Scanning stops at the end of the input,
    /// or as soon as the root value is complete; anything that follows is never examined.
    pub fn parse(&self, chars: &mut impl Iterator<Item = char>) -> JsonResult<JsonValue> {
        let mut input = ParserInput::new(chars);
        let mut builder = TreeBuilder::new();
        while let Some((c, coords)) = input.next() {
            let step = match c {
                '{' => {
                    builder.current().set_kind(Kind::Object);
                    Step::Continue
                }
                '}' => {
                    if builder.at_root() {
                        Step::Done
                    } else {
                        builder.ascend()?
                    }
                }
                '[' => builder.open_array(coords)?,
                ']' => builder.close_array(coords)?,
                '"' => match builder.current().kind() {
                    Kind::Null => {
                        let str = self.match_string(&mut input, coords)?;
                        *builder.current() = JsonValue::String(str);
                        builder.ascend()?
                    }
                    Kind::Object => {
                        let key = self.match_string(&mut input, coords)?;
                        builder.descend(Some(key));
                        Step::Continue
                    }
                    // Unreachable while the cursor never rests on an array (one always has an
                    // open slot) or on a completed scalar (those are ascended from at once)
                    _ => return parser_error!(Details::UnexpectedString, coords),
                },
                'n' | 't' | 'f' => {
                    if !builder.current().is_null() {
                        return parser_error!(Details::UnexpectedLiteral, coords);
                    }
                    *builder.current() = self.match_literal(&mut input, c, coords)?;
                    builder.ascend()?
                }
                '-' | '0'..='9' => {
                    if !builder.current().is_null() {
                        return parser_error!(Details::NumberNotAllowed, coords);
                    }
                    *builder.current() = self.match_number(&mut input, c, coords)?;
                    builder.ascend()?
                }
                ' ' | '\t' | '\n' | '\r' | '\u{8}' | ':' | ',' => Step::Continue,
                c => return parser_error!(Details::UnexpectedSymbol(c), coords),
            };
            if step == Step::Done {
                break;
            }
        }
        builder.finish()
    }

    /// Scan the remainder of a string whose opening quote has just been consumed. A quote
    /// directly preceded by a backslash does not terminate the string; no other escape
    /// processing takes place and the raw contents are returned.
    fn match_string(&self, input: &mut ParserInput, start: Coords) -> JsonResult<String> {
        let mut buffer = String::new();
        let mut previous = '"';
        loop {
            match input.next() {
                Some(('"', _)) if previous != '\\' => return Ok(buffer),
                Some((c, _)) => {
                    buffer.push(c);
                    previous = c;
                }
                None => return parser_error!(Details::UnterminatedString, start),
            }
        }
    }

    /// Match one of the `null`, `true` or `false` literals, given its first character
    fn match_literal(
        &self,
        input: &mut ParserInput,
        first: char,
        start: Coords,
    ) -> JsonResult<JsonValue> {
        let (literal, value): (&'static str, JsonValue) = match first {
            'n' => ("null", JsonValue::Null),
            't' => ("true", JsonValue::Boolean(true)),
            _ => ("false", JsonValue::Boolean(false)),
        };
        for expected in literal.chars().skip(1) {
            match input.next() {
                Some((c, _)) if c == expected => (),
                _ => return parser_error!(Details::ExpectedLiteral(literal), start),
            }
        }
        Ok(value)
    }

    /// Consume the longest run of numeric characters and interpret it as an integer if
    /// possible, otherwise as a float
    fn match_number(
        &self,
        input: &mut ParserInput,
        first: char,
        start: Coords,
    ) -> JsonResult<JsonValue> {
        let mut buffer = String::new();
        buffer.push(first);
        while let Some(c) = input.next_if(|c| NUMERIC_CHARS.contains(c)) {
            buffer.push(c);
        }
        if let Some(value) = parse_integer(&buffer) {
            return Ok(JsonValue::Integer(value));
        }
        match fast_float::parse::<f32, _>(&buffer) {
            Ok(value) if value.is_finite() => Ok(JsonValue::Float(value)),
            _ => parser_error!(Details::InvalidNumber(buffer), start),
        }
    }
}

#[cfg(feature = "mixed_numerics")]
fn parse_integer(run: &str) -> Option<i32> {
    lexical::parse::<i32, _>(run).ok()
}

#[cfg(not(feature = "mixed_numerics"))]
fn parse_integer(run: &str) -> Option<i32> {
    run.parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use crate::errors::Details;
    use crate::parser::dom::Parser;
    use crate::value::{JsonValue, Kind};
    use crate::{assert_syntax_error, reader_from_bytes};
    use std::io::Read;

    fn parse(text: &str) -> JsonValue {
        Parser::default().parse_str(text).unwrap()
    }

    #[test]
    fn should_parse_char_iterators_directly() {
        let source = r#"{
            "test" : 1232.0,
            "some other" : "thasdasd",
            "a bool" : true,
            "an array" : [1,2,3,4,5.8,6,7.2,7,8,10]
        }"#;
        let parser = Parser::default();
        let parsed = parser.parse(&mut source.chars()).unwrap();
        assert_eq!(parsed.get("test").unwrap().kind(), Kind::Float);
        assert_eq!(parsed.get("some other").unwrap().as_string().unwrap(), "thasdasd");
        assert!(parsed.get("a bool").unwrap().as_bool().unwrap());
        assert_eq!(parsed.get("an array").unwrap().count().unwrap(), 10);
    }

    #[test]
    fn should_parse_bytes_from_a_reader() {
        let mut reader = reader_from_bytes!(r#"{"name":"chisel"}"#);
        let mut bytes = vec![];
        reader.read_to_end(&mut bytes).unwrap();
        let parsed = Parser::default().parse_bytes(&bytes).unwrap();
        assert_eq!(parsed.get("name").unwrap().as_string().unwrap(), "chisel");
    }

    #[test]
    fn should_return_null_for_empty_input() {
        assert_eq!(parse(""), JsonValue::Null);
        assert_eq!(parse(" \n\t "), JsonValue::Null);
    }

    #[test]
    fn should_discard_the_speculative_array_slot() {
        let parsed = parse("[1,2]");
        assert_eq!(parsed.count().unwrap(), 2);
        let parsed = parse(r#"{"a":[]}"#);
        assert_eq!(parsed.get("a").unwrap().count().unwrap(), 0);
        let parsed = parse(r#"{"a":[1,2,]}"#);
        assert_eq!(parsed.get("a").unwrap().count().unwrap(), 2);
    }

    #[test]
    fn should_parse_nested_arrays() {
        let parsed = parse("[[1],[],[[2,3]]]");
        assert_eq!(parsed.count().unwrap(), 3);
        assert_eq!(parsed.at(0).unwrap().count().unwrap(), 1);
        assert_eq!(parsed.at(1).unwrap().count().unwrap(), 0);
        let inner = parsed.at(2).unwrap().at(0).unwrap();
        assert_eq!(inner.at(1).unwrap().as_int().unwrap(), 3);
    }

    #[test]
    fn should_place_strings_after_completed_values_in_fresh_slots() {
        let parsed = parse(r#"["a" "b"]"#);
        assert_eq!(parsed.count().unwrap(), 2);
        assert_eq!(parsed.at(1).unwrap().as_string().unwrap(), "b");
        let parsed = parse(r#"[1 "x" true "y"]"#);
        assert_eq!(parsed.count().unwrap(), 4);
        let parsed = parse(r#"{"a":1 "b":"c" "d":[]}"#);
        let keys: Vec<&str> = parsed.keys().unwrap().collect();
        assert_eq!(keys, vec!["a", "b", "d"]);
        assert_eq!(parsed.get("b").unwrap().as_string().unwrap(), "c");
    }

    #[test]
    fn should_keep_raw_string_contents() {
        let parsed = parse(r#"{"quote":"say \"hi\"\n"}"#);
        assert_eq!(
            parsed.get("quote").unwrap().as_string().unwrap(),
            r#"say \"hi\"\n"#
        );
    }

    #[test]
    fn should_overwrite_duplicate_keys_in_place() {
        let parsed = parse(r#"{"a":1,"b":2,"a":3}"#);
        let keys: Vec<&str> = parsed.keys().unwrap().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(parsed.get("a").unwrap().as_int().unwrap(), 3);
    }

    #[test]
    fn should_disambiguate_numbers() {
        assert_eq!(parse("42"), JsonValue::Integer(42));
        assert_eq!(parse("-17"), JsonValue::Integer(-17));
        assert_eq!(parse("42.5"), JsonValue::Float(42.5));
        assert_eq!(parse("-3e2"), JsonValue::Float(-300.0));
        assert_eq!(parse("3000000000"), JsonValue::Float(3000000000.0));
    }

    #[test]
    fn should_parse_root_scalars() {
        assert_eq!(parse(r#""text""#), JsonValue::from("text"));
        assert_eq!(parse("true"), JsonValue::Boolean(true));
        assert_eq!(parse("false"), JsonValue::Boolean(false));
        assert_eq!(parse("null"), JsonValue::Null);
    }

    #[test]
    fn should_stop_once_the_root_is_complete() {
        assert_eq!(parse("1 garbage"), JsonValue::Integer(1));
        let parsed = parse(r#"{"a":1} ] trailing"#);
        assert_eq!(parsed.get("a").unwrap().as_int().unwrap(), 1);
        assert_eq!(parse("[1] }").count().unwrap(), 1);
    }

    #[test]
    fn should_return_early_on_bracket_within_root_object() {
        let parsed = parse(r#"{"a":1 [2]"#);
        assert_eq!(parsed.keys().unwrap().count(), 1);
    }

    #[test]
    fn should_keep_partial_trees_at_end_of_input() {
        let parsed = parse(r#"{"a":{"b":1"#);
        assert_eq!(
            parsed.get("a").unwrap().get("b").unwrap().as_int().unwrap(),
            1
        );
        let parsed = parse(r#"{"a":"#);
        assert!(parsed.get("a").unwrap().is_null());
        let parsed = parse("[1,2");
        assert_eq!(parsed.count().unwrap(), 3);
        assert!(parsed.at(2).unwrap().is_null());
    }

    #[test]
    fn should_reset_objects_on_repeated_open_brace() {
        let parsed = parse(r#"{"a":1,{"b":2}"#);
        let keys: Vec<&str> = parsed.keys().unwrap().collect();
        assert_eq!(keys, vec!["b"]);
    }

    #[test]
    fn should_fail_on_bad_literals() {
        assert_syntax_error!(r#"{"a": tru}"#, Details::ExpectedLiteral("true"), 6);
        assert_syntax_error!("nul", Details::ExpectedLiteral("null"), 0);
        assert_syntax_error!("[fals]", Details::ExpectedLiteral("false"), 1);
    }

    #[test]
    fn should_fail_on_invalid_numbers() {
        assert_syntax_error!("[1-2]", Details::InvalidNumber("1-2".to_string()), 1);
        assert_syntax_error!("-", Details::InvalidNumber("-".to_string()), 0);
        assert_syntax_error!("1e99", Details::InvalidNumber("1e99".to_string()), 0);
    }

    #[test]
    fn should_fail_on_misplaced_values() {
        assert_syntax_error!("{1}", Details::NumberNotAllowed, 1);
        assert_syntax_error!("{true}", Details::UnexpectedLiteral, 1);
        assert_syntax_error!(r#"{"a":{[1]}}"#, Details::UnexpectedDelimiter('['), 6);
    }

    #[test]
    fn should_fail_on_unexpected_symbols() {
        assert_syntax_error!(r#"{"a":x}"#, Details::UnexpectedSymbol('x'), 5);
        assert_syntax_error!("[1;2]", Details::UnexpectedSymbol(';'), 2);
    }

    #[test]
    fn should_fail_on_unterminated_strings() {
        assert_syntax_error!(r#"{"a":"abc"#, Details::UnterminatedString, 5);
        assert_syntax_error!(r#"{"key"#, Details::UnterminatedString, 1);
    }

    #[test]
    fn should_fail_on_unbalanced_closers() {
        assert_syntax_error!("]", Details::UnbalancedClosingDelimiter, 0);
        assert_syntax_error!(r#"{"a":1]"#, Details::UnbalancedClosingDelimiter, 6);
        assert_syntax_error!(r#"{"a":{"b":1]}"#, Details::UnbalancedClosingDelimiter, 11);
    }
}
