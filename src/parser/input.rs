use crate::coords::Coords;

/// Structure to manage input state for the parser. Wraps an underlying source of characters,
/// tracking the [Coords] of each character consumed and providing a single character of
/// lookahead
pub(crate) struct ParserInput<'a> {
    /// The underlying source of characters
    chars: &'a mut dyn Iterator<Item = char>,

    /// A character pulled from the source by a lookahead but not yet consumed
    pending: Option<char>,

    /// The [Coords] of the next character to be consumed
    coords: Coords,
}

impl<'a> ParserInput<'a> {
    /// Create a new input positioned at the start of the supplied characters
    pub fn new(chars: &'a mut dyn Iterator<Item = char>) -> Self {
        ParserInput {
            chars,
            pending: None,
            coords: Coords::default(),
        }
    }

    /// Consume the next character, along with the [Coords] it was found at
    pub fn next(&mut self) -> Option<(char, Coords)> {
        let c = match self.pending.take() {
            Some(c) => c,
            None => self.chars.next()?,
        };
        let coords = self.coords;
        self.coords = coords.after(c);
        Some((c, coords))
    }

    /// Look at the next character without consuming it
    pub fn peek(&mut self) -> Option<char> {
        if self.pending.is_none() {
            self.pending = self.chars.next();
        }
        self.pending
    }

    /// Consume the next character only if it satisfies a given predicate
    pub fn next_if<P: Fn(char) -> bool>(&mut self, predicate: P) -> Option<char> {
        match self.peek() {
            Some(c) if predicate(c) => self.next().map(|(c, _)| c),
            _ => None,
        }
    }
}
