use std::cmp::Ordering;

use crate::error::{EchelonError, Result};
use crate::matrix::matrix::Matrix;
use crate::policy::policy::{NumericPolicy, Pivoting};

pub const DEFAULT_TOLERANCE: f64 = 1e-10;
pub const DEFAULT_PRECISION: usize = 2;

/// `f64` arithmetic with a zero tolerance and fixed display precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatPolicy {
    /// Magnitudes below this count as zero and get snapped after a pass.
    pub tolerance: f64,
    /// Decimals kept by [`format`](NumericPolicy::format).
    pub precision: usize,
}

impl FloatPolicy {
    pub fn new(tolerance: f64, precision: usize) -> Self {
        Self {
            tolerance,
            precision,
        }
    }
}

impl Default for FloatPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_PRECISION)
    }
}

impl NumericPolicy for FloatPolicy {
    type Scalar = f64;

    fn is_zero(&self, x: &f64) -> bool {
        x.abs() < self.tolerance
    }

    fn compare_magnitude(&self, a: &f64, b: &f64) -> Ordering {
        a.abs().total_cmp(&b.abs())
    }

    fn divide(&self, a: &f64, b: &f64) -> Result<f64> {
        if self.is_zero(b) {
            return Err(EchelonError::DivisionByZero);
        }
        Ok(a / b)
    }

    fn format(&self, x: &f64) -> String {
        let text = format!("{:.*}", self.precision, x);
        let text = if text.contains('.') {
            text.trim_end_matches('0').trim_end_matches('.')
        } else {
            text.as_str()
        };
        match text {
            "-0" => "0".to_string(),
            _ => text.to_string(),
        }
    }

    fn parse(&self, text: &str) -> Option<f64> {
        text.trim().parse::<f64>().ok().filter(|x| self.is_valid(x))
    }

    fn pivoting(&self) -> Pivoting {
        Pivoting::Partial
    }

    fn is_valid(&self, x: &f64) -> bool {
        x.is_finite()
    }

    fn snap(&self, matrix: &mut Matrix<f64>) {
        for x in matrix.cells_mut() {
            if self.is_zero(x) {
                *x = 0.0;
            }
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
