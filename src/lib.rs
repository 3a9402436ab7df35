//! Step-by-step row reduction and solution classification for linear systems.
//!
//! A matrix is reduced to row echelon form, row echelon form with leading
//! ones, or reduced row echelon form. Every elementary row operation is kept
//! as a [`Step`] with its own snapshot, so a front end can show the work. The
//! same engine runs on `f64` ([`FloatPolicy`], partial pivoting with a zero
//! tolerance) or on exact rationals ([`ExactPolicy`]).
//!
//! ```
//! use echelon::{classify, parse_matrix, ExactPolicy, SolutionDescriptor};
//!
//! let m = parse_matrix(&[vec!["2", "1", "5"], vec!["4", "2", "10"]], &ExactPolicy).unwrap();
//! let solution = classify(&m, &ExactPolicy).unwrap();
//! assert_eq!(
//!     solution,
//!     SolutionDescriptor::Infinite { free_variable_indices: vec![1] }
//! );
//! ```

pub mod elimination {
    pub mod engine;
    pub mod mode;
    pub mod step;
}
pub mod matrix {
    pub mod matrix;
    pub mod parse;
}
pub mod policy {
    pub mod exact;
    pub mod float;
    pub mod policy;
}
pub mod rings {
    pub mod fraction;
}
pub mod solution {
    pub mod classifier;
    pub mod descriptor;
}

pub mod error;

#[cfg(feature = "python")]
pub mod python;

mod proptests;

pub use elimination::engine::{reduce, reduce_augmented, Reduction};
pub use elimination::mode::Mode;
pub use elimination::step::{RowOperation, Step};
pub use error::{EchelonError, InputError, Result};
pub use matrix::matrix::{Element, Matrix};
pub use matrix::parse::parse_matrix;
pub use policy::exact::ExactPolicy;
pub use policy::float::FloatPolicy;
pub use policy::policy::{NumericPolicy, Pivoting};
pub use rings::fraction::{Fraction, ParseFractionError};
pub use solution::classifier::{analyze, classify, Analysis};
pub use solution::descriptor::SolutionDescriptor;
