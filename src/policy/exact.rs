use num_traits::Zero;
use std::cmp::Ordering;

use crate::error::{EchelonError, Result};
use crate::policy::policy::{NumericPolicy, Pivoting};
use crate::rings::fraction::Fraction;

/// Exact rational arithmetic: no tolerance, no snapping, first-nonzero pivots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactPolicy;

impl NumericPolicy for ExactPolicy {
    type Scalar = Fraction;

    fn is_zero(&self, x: &Fraction) -> bool {
        x.is_zero()
    }

    fn compare_magnitude(&self, a: &Fraction, b: &Fraction) -> Ordering {
        a.abs().cmp(&b.abs())
    }

    fn divide(&self, a: &Fraction, b: &Fraction) -> Result<Fraction> {
        a.checked_div(b).ok_or(EchelonError::DivisionByZero)
    }

    fn format(&self, x: &Fraction) -> String {
        x.to_string()
    }

    fn parse(&self, text: &str) -> Option<Fraction> {
        text.parse().ok()
    }

    fn pivoting(&self) -> Pivoting {
        Pivoting::FirstNonZero
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
