//! Coordinate structure used to reference specific locations within reader input
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A [Coords] represents a single location within the reader input. Lines are 1-based, columns
/// and absolute positions count input bytes
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Coords {
    /// The absolute byte position
    pub absolute: usize,
    /// The line position (number of `\n` seen, plus one)
    pub line: usize,
    /// The column position within the current line
    pub column: usize,
}

impl Coords {
    /// Move the coordinates over a single input byte
    pub fn advance(&mut self, byte: u8) {
        self.absolute += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
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
    /// The default set of coordinates are positioned before the first byte of the first line
    fn default() -> Self {
        Coords {
            absolute: 0,
            line: 1,
            column: 0,
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

#[cfg(test)]
mod tests {
    use super::Coords;

    #[test]
    fn default_coords_should_start_on_the_first_line() {
        let coords = Coords::default();
        assert_eq!(coords.line, 1);
        assert_eq!(coords.column, 0);
        assert_eq!(coords.absolute, 0);
    }

    #[test]
    fn newlines_should_bump_the_line_and_reset_the_column() {
        let mut coords = Coords::default();
        for b in "ab\ncd".bytes() {
            coords.advance(b);
        }
        assert_eq!(coords.line, 2);
        assert_eq!(coords.column, 2);
        assert_eq!(coords.absolute, 5);
    }

    #[test]
    fn coords_should_order_by_absolute_position() {
        let mut early = Coords::default();
        early.advance(b'x');
        let mut late = early;
        late.advance(b'\n');
        assert!(early < late);
    }
}
