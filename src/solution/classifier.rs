use std::collections::BTreeMap;
use tracing::{debug, error};

use crate::elimination::engine::{reduce_augmented, Reduction};
use crate::error::{EchelonError, Result};
use crate::matrix::matrix::{Element, Matrix};
use crate::policy::policy::NumericPolicy;
use crate::solution::descriptor::SolutionDescriptor;

/// Reduced form of an augmented system together with its verdict.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Analysis<T> {
    reduction: Reduction<T>,
    solution: SolutionDescriptor<T>,
}

impl<T: Element> Analysis<T> {
    pub fn reduction(&self) -> &Reduction<T> {
        &self.reduction
    }

    pub fn solution(&self) -> &SolutionDescriptor<T> {
        &self.solution
    }

    pub fn into_parts(self) -> (Reduction<T>, SolutionDescriptor<T>) {
        (self.reduction, self.solution)
    }
}

/// Classify the solution set of the augmented system `matrix`.
///
/// The last column holds the constants. `matrix` is always reduced here,
/// whatever form it is already in.
pub fn classify<P: NumericPolicy>(
    matrix: &Matrix<P::Scalar>,
    policy: &P,
) -> Result<SolutionDescriptor<P::Scalar>> {
    Ok(analyze(matrix, policy)?.solution)
}

/// Like [`classify`], also returning the Gauss-Jordan steps behind the verdict.
pub fn analyze<P: NumericPolicy>(
    matrix: &Matrix<P::Scalar>,
    policy: &P,
) -> Result<Analysis<P::Scalar>> {
    let reduction = reduce_augmented(matrix, policy)?;
    let solution = classify_reduced(reduction.matrix(), policy)?;
    debug!(kind = solution.kind(), rank = reduction.rank(), "classified system");

    Ok(Analysis {
        reduction,
        solution,
    })
}

fn classify_reduced<P: NumericPolicy>(
    rref: &Matrix<P::Scalar>,
    policy: &P,
) -> Result<SolutionDescriptor<P::Scalar>> {
    let num_vars = rref.cols() - 1;

    // First `0 = c` row wins.
    for row in 0..rref.rows() {
        let constant = rref.get(row, num_vars);
        if rref.leading_col(row, num_vars, policy).is_none() && !policy.is_zero(constant) {
            return Ok(SolutionDescriptor::Inconsistent {
                row_index: row,
                constant: constant.clone(),
            });
        }
    }

    let pivots: Vec<(usize, usize)> = (0..rref.rows())
        .filter_map(|row| rref.leading_col(row, num_vars, policy).map(|col| (row, col)))
        .collect();

    if pivots.len() < num_vars {
        let free_variable_indices = (0..num_vars)
            .filter(|c| !pivots.iter().any(|(_, col)| col == c))
            .collect();
        return Ok(SolutionDescriptor::Infinite {
            free_variable_indices,
        });
    }

    let assignments: BTreeMap<usize, P::Scalar> = pivots
        .iter()
        .map(|&(row, col)| (col, rref.get(row, num_vars).clone()))
        .collect();

    if let Some(missing) = (0..num_vars).find(|v| !assignments.contains_key(v)) {
        error!(variable = missing, "full rank system left a variable unassigned");
        return Err(EchelonError::Invariant(format!(
            "no pivot row assigns x{}",
            missing + 1
        )));
    }
    Ok(SolutionDescriptor::Unique { assignments })
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
