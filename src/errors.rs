//! Errors for constructing a [`Grid`] from raw cell values.
#[cfg(doc)]
use crate::Grid;

/// Error for [`Grid::from_bytes`] and the matrix entry point [`solve`](crate::solve)
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("input contains cell values outside 0..=9")]
pub struct FromBytesError(pub(crate) ());

/// Error for [`Grid::from_bytes_slice`]
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FromBytesSliceError {
    /// Slice is not 81 long
    #[error("byte slice should have length 81, found {0}")]
    WrongLength(usize),
    /// Slice contains invalid entries
    #[error(transparent)]
    FromBytesError(#[from] FromBytesError),
}
