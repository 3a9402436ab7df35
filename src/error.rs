//! Error types for row reduction and solution classification.

use thiserror::Error;

/// Problems with the matrix handed in by the caller.
///
/// These are raised before any elimination step is taken, so a caller never
/// sees a partial result next to an input error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The matrix has no rows
    #[error("matrix has no rows")]
    Empty,

    /// The first row has no cells
    #[error("matrix has no columns")]
    NoColumns,

    /// A row length differs from the first row
    #[error("row {} has {found} cells, expected {expected}", .row + 1)]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Classification needs at least one coefficient column plus constants
    #[error("augmented matrix needs at least 2 columns, got {cols}")]
    NotAugmented { cols: usize },

    /// A cell could not be read as a number
    #[error("cell ({}, {}) is not a number: {text:?}", .row + 1, .col + 1)]
    NonNumeric {
        row: usize,
        col: usize,
        text: String,
    },
}

/// Errors returned by [`reduce`](crate::reduce) and [`classify`](crate::classify).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EchelonError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// Division by an entry the policy considers zero. The engine only divides
    /// by confirmed pivots, so this means pivot search is broken.
    #[error("division by zero")]
    DivisionByZero,

    /// A structural property of the reduced form did not hold.
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, EchelonError>;

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
