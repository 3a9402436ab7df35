use std::cmp::Ordering;

use crate::error::Result;
use crate::matrix::matrix::{Element, Matrix};

/// How the engine picks a pivot row within a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pivoting {
    /// Largest magnitude wins, ties keep the topmost row.
    Partial,
    /// First row holding a nonzero entry.
    FirstNonZero,
}

/// Arithmetic capabilities the elimination engine and classifier rely on.
///
/// The engine is written once against this trait; floating point and exact
/// rationals differ only in how they answer these questions.
pub trait NumericPolicy {
    type Scalar: Element;

    fn is_zero(&self, x: &Self::Scalar) -> bool;

    /// Compare `|a|` with `|b|`. Only consulted under [`Pivoting::Partial`].
    fn compare_magnitude(&self, a: &Self::Scalar, b: &Self::Scalar) -> Ordering;

    /// `a / b`, failing with [`DivisionByZero`](crate::EchelonError::DivisionByZero)
    /// when `b` is zero by [`is_zero`](Self::is_zero).
    fn divide(&self, a: &Self::Scalar, b: &Self::Scalar) -> Result<Self::Scalar>;

    fn format(&self, x: &Self::Scalar) -> String;

    /// Read one matrix cell, `None` when the text is not a number.
    fn parse(&self, text: &str) -> Option<Self::Scalar>;

    fn pivoting(&self) -> Pivoting;

    /// Whether `x` may enter a reduction at all.
    fn is_valid(&self, _x: &Self::Scalar) -> bool {
        true
    }

    /// Clean up after a full elimination pass.
    fn snap(&self, _matrix: &mut Matrix<Self::Scalar>) {}
}
