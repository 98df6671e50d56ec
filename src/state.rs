//! The immutable board snapshot that search branches on.
use crate::board::{Cell, Digit, N_CELLS};
use crate::digit_set::DigitSet;
use crate::grid::Grid;

/// One node in the search tree: the fixed values plus the candidate digits
/// of every empty cell.
///
/// A state is never mutated once handed to the search; fixing a digit via
/// [`place`](Self::place) produces a fresh state. Backtracking is therefore
/// just dropping the child — there is no undo step to get wrong.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    grid: Grid,
    candidates: [DigitSet; N_CELLS],
}

impl BoardState {
    /// Creates a state holding `grid`. The candidate table starts out empty;
    /// run [`init_candidates`](Self::init_candidates) once the grid has
    /// passed [`is_valid_board`](Self::is_valid_board).
    pub fn new(grid: Grid) -> Self {
        BoardState {
            grid,
            candidates: [DigitSet::NONE; N_CELLS],
        }
    }

    /// The grid of fixed values.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consumes the state and returns its grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Checks that no fixed value repeats within a row, column or block.
    ///
    /// This runs once at the top level before any search. Conflicting clues
    /// are rejected up front instead of being discovered mid-search.
    pub fn is_valid_board(&self) -> bool {
        Cell::all().all(|cell| match self.grid.get(cell) {
            0 => true,
            num => cell.peers().all(|peer| self.grid.get(peer) != num),
        })
    }

    /// The baseline propagation pass: sets the candidates of every empty
    /// cell to {1..9} minus the values among its 20 peers.
    ///
    /// Must run exactly once per constructed state, after validity has been
    /// confirmed and before any search. Derived states keep their candidate
    /// tables up to date incrementally and never run this again.
    pub fn init_candidates(&mut self) {
        for cell in Cell::all() {
            self.candidates[cell.as_index()] = match self.grid.get(cell) {
                0 => {
                    let mut candidates = DigitSet::ALL;
                    for peer in cell.peers() {
                        if let Some(digit) = Digit::new_checked(self.grid.get(peer)) {
                            candidates.remove(digit);
                        }
                    }
                    candidates
                }
                _ => DigitSet::NONE,
            };
        }
    }

    /// True iff no cell is empty.
    pub fn is_goal(&self) -> bool {
        self.grid.0.iter().all(|&num| num != 0)
    }

    /// True iff some empty cell has no candidate left.
    ///
    /// This is the forward checking signal: an invalid state cannot lead to
    /// a goal and the solver prunes it without expanding.
    pub fn is_invalid(&self) -> bool {
        Cell::all()
            .any(|cell| self.grid.get(cell) == 0 && self.candidates(cell).is_empty())
    }

    /// Complement of [`is_invalid`](Self::is_invalid).
    pub fn is_solvable(&self) -> bool {
        !self.is_invalid()
    }

    /// The candidate digits of `cell`. Empty for fixed cells.
    #[inline]
    pub fn candidates(&self, cell: Cell) -> DigitSet {
        self.candidates[cell.as_index()]
    }

    /// Returns the state that results from fixing `digit` at `cell`.
    ///
    /// `cell` must be empty and `digit` must be one of its candidates.
    /// Callers obtain values from [`candidates`](Self::candidates), so a
    /// violation is a programming error; it is checked in debug builds only.
    ///
    /// After the direct elimination from all peers, any empty cell left with
    /// exactly one candidate is forced: it gets fixed and propagated as
    /// well, in row-major order, until no singleton remains. If a cell runs
    /// out of candidates along the way the returned state is invalid —
    /// detectable via [`is_invalid`](Self::is_invalid), never a panic.
    pub fn place(&self, cell: Cell, digit: Digit) -> BoardState {
        debug_assert!(self.grid.get(cell) == 0);
        debug_assert!(self.candidates(cell).contains(digit));

        let mut state = self.clone();
        state.fix(cell, digit);

        // every fix strictly shrinks the total candidate count, so the
        // cascade terminates
        while let Some((forced_cell, forced_digit)) = state.first_singleton() {
            state.fix(forced_cell, forced_digit);
        }
        state
    }

    fn fix(&mut self, cell: Cell, digit: Digit) {
        self.grid.0[cell.as_index()] = digit.val();
        self.candidates[cell.as_index()] = DigitSet::NONE;
        for peer in cell.peers() {
            self.candidates[peer.as_index()].remove(digit);
        }
    }

    // First empty cell in row-major order whose candidate set is down to a
    // single digit.
    fn first_singleton(&self) -> Option<(Cell, Digit)> {
        Cell::all().find_map(|cell| {
            if self.grid.get(cell) != 0 {
                return None;
            }
            self.candidates(cell).unique().map(|digit| (cell, digit))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_state(line: &str) -> BoardState {
        let grid = Grid::from_str_line(line).unwrap();
        let mut state = BoardState::new(grid);
        assert!(state.is_valid_board());
        state.init_candidates();
        state
    }

    // row 0 is missing 5 and 9, and the 9 in block 0 forces both open cells
    // of row 0 down to the single candidate 5
    const TWIN_FIVES: &str =
        "..12346789.......................................................................";

    #[test]
    fn init_candidates_is_idempotent() {
        let mut state =
            ready_state("...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...");
        let reference = state.clone();
        state.init_candidates();
        assert_eq!(state, reference);
    }

    #[test]
    fn candidates_exclude_peer_values() {
        let state = ready_state(TWIN_FIVES);
        let corner = state.candidates(Cell::from_row_col(0, 0));
        assert_eq!(corner.unique(), Some(Digit::new(5)));
        // row 8 sees nothing but the column values of row 0
        let below = state.candidates(Cell::from_row_col(8, 4));
        assert!(!below.contains(Digit::new(3)));
        assert_eq!(below.len(), 8);
    }

    #[test]
    fn place_keeps_the_board_valid() {
        let state = ready_state(
            "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...",
        );
        let cell = Cell::from_row_col(0, 0);
        for digit in state.candidates(cell) {
            let child = state.place(cell, digit);
            assert!(child.is_valid_board() || child.is_invalid());
        }
    }

    #[test]
    fn cascade_fixes_forced_cells() {
        // clearing two cells of a solved grid leaves each with one
        // candidate; placing the first must pull in the second
        let solved =
            "693784512487512936125963874932651487568247391741398625319475268856129743274836159";
        let mut bytes = Grid::from_str_line(solved).unwrap().to_bytes();
        let (a, b) = (Cell::from_row_col(4, 2), Cell::from_row_col(4, 7));
        let (val_a, val_b) = (bytes[a.as_index()], bytes[b.as_index()]);
        bytes[a.as_index()] = 0;
        bytes[b.as_index()] = 0;

        let mut state = BoardState::new(Grid::from_bytes(bytes).unwrap());
        assert!(state.is_valid_board());
        state.init_candidates();

        let child = state.place(a, Digit::new(val_a));
        assert!(child.is_goal());
        assert_eq!(child.grid().get(b), val_b);
    }

    #[test]
    fn cascade_leaves_no_singleton() {
        let state = ready_state(
            "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......",
        );
        let cell = Cell::all()
            .find(|&cell| state.grid().get(cell) == 0 && !state.candidates(cell).is_empty())
            .unwrap();
        let digit = state.candidates(cell).into_iter().next().unwrap();
        let child = state.place(cell, digit);
        if !child.is_invalid() {
            assert_eq!(child.first_singleton(), None);
        }
    }

    #[test]
    fn contradiction_mid_cascade_turns_the_state_invalid() {
        let state = ready_state(TWIN_FIVES);
        // both open cells of row 0 want the 5; fixing anything elsewhere
        // triggers the cascade, which fixes one and starves the other
        let far_corner = Cell::from_row_col(8, 8);
        let digit = state.candidates(far_corner).into_iter().next().unwrap();
        let child = state.place(far_corner, digit);
        assert!(child.is_invalid());
        assert!(!child.is_solvable());
    }

    #[test]
    fn goal_and_validity_queries() {
        let solved =
            "693784512487512936125963874932651487568247391741398625319475268856129743274836159";
        let state = ready_state(solved);
        assert!(state.is_goal());
        assert!(!state.is_invalid());

        let mut bytes = state.grid().to_bytes();
        bytes[0] = 0;
        let open = BoardState::new(Grid::from_bytes(bytes).unwrap());
        assert!(!open.is_goal());
    }
}
