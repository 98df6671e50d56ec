//! Depth-first backtracking search with propagation-based pruning.
use crate::board::Cell;
use crate::errors::FromBytesError;
use crate::grid::Grid;
use crate::state::BoardState;

use log::debug;

/// Solves a 9x9 sudoku given as a row-major matrix, with 0 for empty cells.
///
/// This is the harness-facing entry point with the sentinel convention:
/// conflicting clues and exhausted searches both yield a matrix with every
/// cell set to `-1`. A solvable input yields the completed matrix; the
/// search order is fixed, so the result is deterministic for a given input.
///
/// # Errors
///
/// Cell values outside 0..=9 are rejected before any processing. This is the
/// only condition reported as an error rather than through the sentinel.
///
/// # Example
///
/// ```
/// let mut grid = [[0i8; 9]; 9];
/// grid[0][0] = 5;
/// grid[0][1] = 5; // clue conflict
/// assert_eq!(sudoku_csp::solve(&grid), Ok([[-1; 9]; 9]));
/// ```
pub fn solve(grid: &[[i8; 9]; 9]) -> Result<[[i8; 9]; 9], FromBytesError> {
    let mut bytes = [0; 81];
    for (slot, &num) in bytes.iter_mut().zip(grid.iter().flatten()) {
        if !(0..=9).contains(&num) {
            return Err(FromBytesError(()));
        }
        *slot = num as u8;
    }
    let grid = Grid::from_bytes(bytes)?;

    Ok(match grid.solve_one() {
        Some(solution) => {
            let mut matrix = [[0; 9]; 9];
            for cell in Cell::all() {
                matrix[cell.row() as usize][cell.col() as usize] = solution.get(cell) as i8;
            }
            matrix
        }
        None => [[-1; 9]; 9],
    })
}

/// Recursive backtracking solver over [`BoardState`]s.
///
/// The solver itself only holds search statistics; all board data lives in
/// the states, one owned copy per branch.
#[derive(Debug, Default)]
pub struct Solver {
    nodes_expanded: u64,
}

impl Solver {
    /// Creates a solver with zeroed statistics.
    pub fn new() -> Self {
        Solver::default()
    }

    /// Number of candidate placements tried so far. Accumulates across
    /// calls to [`solve`](Self::solve) on the same solver.
    pub fn nodes_expanded(&self) -> u64 {
        self.nodes_expanded
    }

    /// Solves `grid`, returning the first solution found. Returns `None` if
    /// the clues conflict or the search exhausts every branch.
    pub fn solve(&mut self, grid: Grid) -> Option<Grid> {
        let mut state = BoardState::new(grid);
        if !state.is_valid_board() {
            debug!("rejected grid with conflicting clues: {}", grid.to_str_line());
            return None;
        }
        state.init_candidates();

        let solution = self.search(state);
        match &solution {
            Some(_) => debug!("solved after {} nodes", self.nodes_expanded),
            None => debug!("exhausted search after {} nodes", self.nodes_expanded),
        }
        solution.map(BoardState::into_grid)
    }

    fn search(&mut self, state: BoardState) -> Option<BoardState> {
        if state.is_goal() {
            return Some(state);
        }
        // None only happens on full boards, which were caught above
        let cell = pick_next_cell(&state)?;
        for digit in state.candidates(cell) {
            self.nodes_expanded += 1;
            let child = state.place(cell, digit);
            if child.is_goal() {
                return Some(child);
            }
            if !child.is_invalid() {
                if let Some(solution) = self.search(child) {
                    return Some(solution);
                }
            }
            // dead branch: the child is dropped, the next candidate tried
        }
        None
    }
}

/// Chooses the empty cell to branch on, `None` iff no empty cell remains.
///
/// Minimum remaining values first: the cell with the fewest candidates is
/// the cheapest to refute, so contradictions surface with minimal
/// branching. A cell with no candidate left ranks below everything — its
/// empty candidate loop fails the branch on the spot. Ties are broken by
/// the degree heuristic: prefer the cell with the most empty peers, as it
/// constrains the most other cells. Remaining ties go row-major.
fn pick_next_cell(state: &BoardState) -> Option<Cell> {
    let mut best: Option<(u8, u8, Cell)> = None;
    for cell in Cell::all() {
        if state.grid().get(cell) != 0 {
            continue;
        }
        let n_candidates = state.candidates(cell).len();
        let degree = n_empty_peers(state, cell);
        let better = match best {
            None => true,
            Some((best_n, best_degree, _)) => {
                n_candidates < best_n || (n_candidates == best_n && degree > best_degree)
            }
        };
        if better {
            best = Some((n_candidates, degree, cell));
        }
    }
    best.map(|(_, _, cell)| cell)
}

// degree of a cell: how many other empty cells it constrains
fn n_empty_peers(state: &BoardState, cell: Cell) -> u8 {
    cell.peers()
        .filter(|&peer| state.grid().get(peer) == 0)
        .count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_state(line: &str) -> BoardState {
        let mut state = BoardState::new(Grid::from_str_line(line).unwrap());
        assert!(state.is_valid_board());
        state.init_candidates();
        state
    }

    #[test]
    fn picks_the_most_constrained_cell() {
        // (0, 8) is the only cell with a single candidate
        let state = ready_state(
            "12345678......................................................................9..",
        );
        let cell = pick_next_cell(&state).unwrap();
        assert_eq!((cell.row(), cell.col()), (0, 8));
        assert_eq!(state.candidates(cell).len(), 1);
    }

    #[test]
    fn breaks_ties_by_degree() {
        // (0, 7) and (0, 8) both hold candidates {8, 9}, but the clue at
        // (8, 7) costs (0, 7) one empty peer. The tie must go to (0, 8)
        // even though (0, 7) comes first in row-major order.
        let line = format!("1234567..{}.......1.", ".".repeat(63));
        let state = ready_state(&line);

        let a = Cell::from_row_col(0, 7);
        let b = Cell::from_row_col(0, 8);
        assert_eq!(state.candidates(a).len(), 2);
        assert_eq!(state.candidates(b).len(), 2);
        assert!(n_empty_peers(&state, b) > n_empty_peers(&state, a));

        assert_eq!(pick_next_cell(&state), Some(b));
    }

    #[test]
    fn no_cell_on_full_boards() {
        let solved =
            "693784512487512936125963874932651487568247391741398625319475268856129743274836159";
        let state = ready_state(solved);
        assert_eq!(pick_next_cell(&state), None);
    }

    #[test]
    fn counts_nodes() {
        let mut solver = Solver::new();
        let grid = Grid::from_str_line(
            "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...",
        )
        .unwrap();
        let solution = solver.solve(grid).unwrap();
        assert!(solution.is_solved());
        assert!(solver.nodes_expanded() > 0);
    }
}
