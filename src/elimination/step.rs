//! Step history recorded while a matrix is reduced.
//!
//! Each [`Step`] owns its own copy of the matrix taken right after the
//! operation it describes. Nothing hands out mutable access to a stored
//! snapshot, so later work on the live matrix (or on a matrix the caller pulls
//! out of a [`Reduction`](crate::Reduction)) never changes the history.

use tracing::trace;

use crate::elimination::mode::Mode;
use crate::matrix::matrix::{Element, Matrix};
use crate::policy::policy::NumericPolicy;

/// What happened to the matrix in one step. Row indices are 0-based.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RowOperation<T> {
    Initial,
    Swap { first: usize, second: usize },
    Scale { row: usize, divisor: T },
    Combine { target: usize, factor: T, source: usize },
    Result(Mode),
}

impl<T> RowOperation<T> {
    /// Human readable text with 1-based row numbers.
    pub fn describe<P: NumericPolicy<Scalar = T>>(&self, policy: &P) -> String {
        match self {
            RowOperation::Initial => "Initial matrix".to_string(),
            RowOperation::Swap { first, second } => {
                format!("swap rows {} and {}", first + 1, second + 1)
            }
            RowOperation::Scale { row, divisor } => {
                format!("row {0} = row {0} / {1}", row + 1, operand(policy, divisor))
            }
            RowOperation::Combine {
                target,
                factor,
                source,
            } => format!(
                "row {0} = row {0} − {1} × row {2}",
                target + 1,
                operand(policy, factor),
                source + 1
            ),
            RowOperation::Result(mode) => mode.result_name().to_string(),
        }
    }
}

fn operand<P: NumericPolicy>(policy: &P, x: &P::Scalar) -> String {
    let text = policy.format(x);
    if text.starts_with('-') {
        format!("({text})")
    } else {
        text
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Step<T> {
    operation: RowOperation<T>,
    description: String,
    matrix: Matrix<T>,
}

impl<T: Element> Step<T> {
    pub fn operation(&self) -> &RowOperation<T> {
        &self.operation
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn matrix(&self) -> &Matrix<T> {
        &self.matrix
    }

    /// Independent copy of the matrix as it was after this step.
    pub fn snapshot(&self) -> Matrix<T> {
        self.matrix.clone()
    }
}

/// Append-only step list used by the engine.
pub(crate) struct History<'p, P: NumericPolicy> {
    policy: &'p P,
    steps: Vec<Step<P::Scalar>>,
}

impl<'p, P: NumericPolicy> History<'p, P> {
    pub(crate) fn new(policy: &'p P) -> Self {
        History {
            policy,
            steps: vec![],
        }
    }

    /// Append `operation` with a copy of `matrix` as it is right now.
    pub(crate) fn record(
        &mut self,
        operation: RowOperation<P::Scalar>,
        matrix: &Matrix<P::Scalar>,
    ) {
        let description = operation.describe(self.policy);
        trace!(step = self.steps.len(), %description, "recorded row operation");

        self.steps.push(Step {
            operation,
            description,
            matrix: matrix.clone(),
        });
    }

    pub(crate) fn into_steps(self) -> Vec<Step<P::Scalar>> {
        self.steps
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
