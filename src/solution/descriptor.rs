use itertools::Itertools;
use std::collections::BTreeMap;

use crate::policy::policy::NumericPolicy;

/// What the solution set of an augmented system looks like.
///
/// Row and variable indices are 0-based; variable `i` is `x{i+1}` in text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SolutionDescriptor<T> {
    /// A reduced row reads `0 = constant` with a nonzero constant.
    Inconsistent { row_index: usize, constant: T },
    /// Consistent, with these columns free.
    Infinite { free_variable_indices: Vec<usize> },
    /// Exactly one value per variable.
    Unique { assignments: BTreeMap<usize, T> },
}

impl<T> SolutionDescriptor<T> {
    pub fn is_consistent(&self) -> bool {
        !matches!(self, SolutionDescriptor::Inconsistent { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SolutionDescriptor::Inconsistent { .. } => "inconsistent",
            SolutionDescriptor::Infinite { .. } => "infinite",
            SolutionDescriptor::Unique { .. } => "unique",
        }
    }

    /// Verdict text for display, values rendered by `policy`.
    pub fn explain<P: NumericPolicy<Scalar = T>>(&self, policy: &P) -> String {
        match self {
            SolutionDescriptor::Inconsistent {
                row_index,
                constant,
            } => format!(
                "No solution.\nInconsistent row {}: 0 = {}",
                row_index + 1,
                policy.format(constant)
            ),
            SolutionDescriptor::Infinite {
                free_variable_indices,
            } => format!(
                "Infinitely many solutions.\nFree variables: {}",
                free_variable_indices
                    .iter()
                    .map(|i| format!("x{}", i + 1))
                    .join(", ")
            ),
            SolutionDescriptor::Unique { assignments } => {
                let lines = assignments
                    .iter()
                    .map(|(i, value)| format!("x{} = {}", i + 1, policy.format(value)));
                std::iter::once("Unique solution.".to_string())
                    .chain(lines)
                    .join("\n")
            }
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
