//! Errors that may be encountered when reading a grid from a string
use crate::board::Cell;

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// An invalid entry encountered during parsing.
pub struct InvalidEntry {
    /// Cell number goes from 0..=80, 0..=8 for first line, 9..=17 for 2nd and so on
    pub cell: u8,
    /// The parsed invalid char
    pub ch: char,
}

impl InvalidEntry {
    /// Row index from 0..=8, topmost row is 0
    #[inline]
    pub fn row(self) -> u8 {
        Cell::new(self.cell).row()
    }
    /// Column index from 0..=8, leftmost col is 0
    #[inline]
    pub fn col(self) -> u8 {
        Cell::new(self.cell).col()
    }
    /// Block index from 0..=8, numbering from left to right, top to bottom. Example: Top-row is 0, 1, 2
    #[inline]
    pub fn block(self) -> u8 {
        Cell::new(self.cell).block()
    }
}

impl fmt::Display for InvalidEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell {} contains invalid character '{}'", self.cell, self.ch)
    }
}

/// A structure representing an error caused when parsing the grid
#[derive(Clone, Debug, Eq, Hash, PartialEq, thiserror::Error)]
pub enum LineParseError {
    /// Accepted values are numbers 1...9 and '0', '.' or '_' for empty cells
    #[error("{0}")]
    InvalidEntry(InvalidEntry),
    /// Returns number of cells supplied
    #[error("grid contains {0} cells instead of required 81")]
    NotEnoughCells(u8),
    /// Returned if >=82 valid cell positions are supplied
    #[error("grid contains more than 81 cells or is missing comment delimiter")]
    TooManyCells,
    /// Comments must be delimited by a space or tab.
    #[error("missing comment delimiter")]
    MissingCommentDelimiter,
}
