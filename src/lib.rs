#![warn(missing_docs)]
//! A 9x9 sudoku solver built on constraint propagation and backtracking.
//!
//! ## Overview
//!
//! The crate keeps the classic split of a constraint solver: [`BoardState`]
//! owns the fixed values and the candidate digits of every empty cell and
//! knows how to derive a successor when a digit is fixed (eliminating it
//! from all peers and collapsing forced chains), while [`Solver`] performs
//! the depth-first search over those states, always branching on the most
//! constrained cell.
//!
//! ## Example
//!
//! ```
//! use sudoku_csp::Grid;
//!
//! let puzzle = "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...";
//!
//! let grid = Grid::from_str_line(puzzle).unwrap();
//! if let Some(solution) = grid.solve_one() {
//!     println!("{}", solution);
//!     assert!(solution.is_solved());
//! }
//! ```
//!
//! Harnesses that speak plain matrices can use [`solve`] instead, which
//! reports "no solution" as a matrix filled with `-1`:
//!
//! ```
//! let empty = [[0i8; 9]; 9];
//! let completed = sudoku_csp::solve(&empty).unwrap();
//! assert_ne!(completed, [[-1; 9]; 9]);
//! ```

mod board;
mod digit_set;
mod grid;
mod solver;
mod state;

pub mod errors;
pub mod parse_errors;

pub use crate::board::{Cell, Digit};
pub use crate::digit_set::DigitSet;
pub use crate::grid::Grid;
pub use crate::solver::{solve, Solver};
pub use crate::state::BoardState;
