//! Coordinate structure used to reference specific locations within parser input
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A [Coords] represents a single location within the parser input
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Coords {
    /// The absolute (zero-based) character position
    pub absolute: usize,
    /// The row position, starting at 1
    pub line: usize,
    /// The column position within the current row, starting at 1
    pub column: usize,
}

impl Coords {
    /// Produce the coordinates of the character that follows a given character found at
    /// the current coordinates. Newlines bump the line count and reset the column.
    pub fn after(&self, c: char) -> Coords {
        match c {
            '\n' => Coords {
                absolute: self.absolute + 1,
                line: self.line + 1,
                column: 1,
            },
            _ => Coords {
                absolute: self.absolute + 1,
                line: self.line,
                column: self.column + 1,
            },
        }
    }
}

impl Display for Coords {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[abs: {}, line: {}, column: {}]",
            self.absolute, self.line, self.column
        )
    }
}

impl Default for Coords {
    /// The default set of coordinates are positioned at the first character of the first row
    fn default() -> Self {
        Coords {
            absolute: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Eq for Coords {}

impl PartialOrd<Self> for Coords {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coords {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute.cmp(&other.absolute)
    }
}
