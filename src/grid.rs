//! The 81-cell value container and its construction/formatting surface.
use crate::board::{Cell, N_CELLS};
use crate::errors::{FromBytesError, FromBytesSliceError};
use crate::parse_errors::{InvalidEntry, LineParseError};
use crate::solver::Solver;

use std::fmt;

/// A 9x9 sudoku grid in row-major order. A value of 0 marks an empty cell.
///
/// `Grid` enforces only the value range 0..=9. Whether the clues conflict
/// with each other is a question for [`BoardState::is_valid_board`]
/// (or simply for [`Grid::solve_one`], which checks before searching).
///
/// [`BoardState::is_valid_board`]: crate::BoardState::is_valid_board
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Grid(pub(crate) [u8; N_CELLS]);

impl Grid {
    /// Creates a grid from a byte array, with 0 for empty cells.
    ///
    /// Returns an error if any entry is above 9.
    pub fn from_bytes(bytes: [u8; 81]) -> Result<Grid, FromBytesError> {
        if bytes.iter().all(|&byte| byte <= 9) {
            Ok(Grid(bytes))
        } else {
            Err(FromBytesError(()))
        }
    }

    /// Creates a grid from a byte slice, with 0 for empty cells.
    ///
    /// Returns an error if the slice is not 81 long or any entry is above 9.
    /// This is the runtime shape check for callers that do not hold a fixed
    /// size array.
    pub fn from_bytes_slice(bytes: &[u8]) -> Result<Grid, FromBytesSliceError> {
        if bytes.len() != 81 {
            return Err(FromBytesSliceError::WrongLength(bytes.len()));
        }
        let mut array = [0; N_CELLS];
        array.copy_from_slice(bytes);
        Ok(Grid::from_bytes(array)?)
    }

    /// Reads a grid in line format.
    ///
    /// The line format is a sequence of 81 cell entries: digits 1..=9 for
    /// clues and `'0'`, `'.'` or `'_'` for empty cells. Anything after the
    /// 81st entry must be separated by a space or tab and is ignored as a
    /// comment.
    pub fn from_str_line(s: &str) -> Result<Grid, LineParseError> {
        let mut grid = [0; N_CELLS];
        let mut n_cells = 0;
        for ch in s.chars() {
            if n_cells == 81 {
                return match ch {
                    ' ' | '\t' => Ok(Grid(grid)),
                    '1'..='9' | '0' | '.' | '_' => Err(LineParseError::TooManyCells),
                    _ => Err(LineParseError::MissingCommentDelimiter),
                };
            }
            match ch {
                '1'..='9' => grid[n_cells] = ch as u8 - b'0',
                '0' | '.' | '_' => grid[n_cells] = 0,
                _ => {
                    return Err(LineParseError::InvalidEntry(InvalidEntry {
                        cell: n_cells as u8,
                        ch,
                    }))
                }
            }
            n_cells += 1;
        }
        if n_cells < 81 {
            return Err(LineParseError::NotEnoughCells(n_cells as u8));
        }
        Ok(Grid(grid))
    }

    /// Returns the underlying byte array, with 0 for empty cells.
    pub fn to_bytes(self) -> [u8; 81] {
        self.0
    }

    /// Prints the grid in line format, with `'.'` for empty cells.
    pub fn to_str_line(&self) -> String {
        self.0
            .iter()
            .map(|&num| match num {
                0 => '.',
                num => (b'0' + num) as char,
            })
            .collect()
    }

    /// The value at `cell`, 0 if empty.
    #[inline]
    pub fn get(&self, cell: Cell) -> u8 {
        self.0[cell.as_index()]
    }

    /// Returns an iterator over the grid, going from left to right, top to
    /// bottom. Empty cells are returned as `None`.
    pub fn iter(&self) -> impl Iterator<Item = Option<u8>> + '_ {
        self.0.iter().map(|&num| match num {
            0 => None,
            num => Some(num),
        })
    }

    /// Number of filled cells.
    pub fn n_clues(&self) -> u8 {
        self.0.iter().filter(|&&num| num != 0).count() as u8
    }

    /// Checks that all cells are filled and no value repeats in any row,
    /// column or block.
    pub fn is_solved(&self) -> bool {
        Cell::all().all(|cell| {
            let num = self.get(cell);
            num != 0 && cell.peers().all(|peer| self.get(peer) != num)
        })
    }

    /// Finds a solution to the grid. If multiple solutions exist, the search
    /// order makes the result deterministic, but which solution is found is
    /// not otherwise specified. Returns `None` if no solution exists or the
    /// clues already conflict.
    pub fn solve_one(self) -> Option<Grid> {
        Solver::new().solve(self)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in Cell::all() {
            match (cell.row(), cell.col()) {
                (_, 3) | (_, 6) => write!(f, " ")?,    // separate blocks in a row
                (3, 0) | (6, 0) => write!(f, "\n\n")?, // separate bands
                (_, 0) if cell.val() != 0 => writeln!(f)?,
                _ => {}
            }
            match self.get(cell) {
                0 => write!(f, "_")?,
                num => write!(f, "{}", num)?,
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::Grid;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    // A grid round-trips through its line format. That keeps serialized
    // sudokus greppable and independent of the in-memory layout.
    impl Serialize for Grid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_str_line())
        }
    }

    impl<'de> Deserialize<'de> for Grid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let line = String::deserialize(deserializer)?;
            Grid::from_str_line(&line).map_err(D::Error::custom)
        }
    }
}
