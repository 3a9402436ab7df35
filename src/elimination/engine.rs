use num_traits::{One, Zero};
use std::cmp::Ordering;
use tracing::{debug, error};

use crate::elimination::mode::Mode;
use crate::elimination::step::{History, RowOperation, Step};
use crate::error::{InputError, Result};
use crate::matrix::matrix::{Element, Matrix};
use crate::policy::policy::{NumericPolicy, Pivoting};

/// Outcome of [`reduce`]: the final matrix plus the full step history.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Reduction<T> {
    mode: Mode,
    matrix: Matrix<T>,
    steps: Vec<Step<T>>,
    pivots: Vec<(usize, usize)>,
}

impl<T: Element> Reduction<T> {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn matrix(&self) -> &Matrix<T> {
        &self.matrix
    }

    pub fn into_matrix(self) -> Matrix<T> {
        self.matrix
    }

    /// Every recorded step, the untouched input first and the result last.
    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    /// `(row, col)` of each pivot, in the order they were found.
    pub fn pivots(&self) -> &[(usize, usize)] {
        &self.pivots
    }

    pub fn pivot_cols(&self) -> Vec<usize> {
        self.pivots.iter().map(|&(_, col)| col).collect()
    }

    pub fn rank(&self) -> usize {
        self.pivots.len()
    }
}

/// Row-reduce `matrix` to the form selected by `mode`.
///
/// The input is copied on entry and never modified. Every swap, scale and
/// combine is recorded as a [`Step`] with its own snapshot.
pub fn reduce<P: NumericPolicy>(
    matrix: &Matrix<P::Scalar>,
    mode: Mode,
    policy: &P,
) -> Result<Reduction<P::Scalar>> {
    eliminate(matrix, mode, policy, matrix.cols())
}

/// Gauss-Jordan on an augmented matrix, pivoting on coefficient columns only.
///
/// The constants column is carried along by the row operations but never
/// hosts a pivot, so an inconsistent row keeps the constant it was reduced to
/// instead of being scaled to `0 = 1`. For a consistent system the result is
/// the same as `reduce(matrix, Mode::Rref, policy)`.
pub fn reduce_augmented<P: NumericPolicy>(
    matrix: &Matrix<P::Scalar>,
    policy: &P,
) -> Result<Reduction<P::Scalar>> {
    let cols = matrix.cols();
    if cols < 2 {
        return Err(InputError::NotAugmented { cols }.into());
    }
    eliminate(matrix, Mode::Rref, policy, cols - 1)
}

// Pivots are searched in columns `0..pivot_cols`; row operations always span
// the full width.
fn eliminate<P: NumericPolicy>(
    matrix: &Matrix<P::Scalar>,
    mode: Mode,
    policy: &P,
    pivot_cols: usize,
) -> Result<Reduction<P::Scalar>> {
    debug!(rows = matrix.rows(), cols = matrix.cols(), pivot_cols, %mode, "reducing matrix");
    matrix.check_cells(policy)?;

    let mut mat = matrix.clone();
    let mut history = History::new(policy);
    let mut pivots = vec![];
    history.record(RowOperation::Initial, &mat);

    let mut pivot_row = 0;
    for col in 0..pivot_cols {
        if pivot_row >= mat.rows() {
            break;
        }

        let Some(found) = find_pivot(&mat, pivot_row, col, policy) else {
            continue;
        };

        if found != pivot_row {
            mat.swap_rows(pivot_row, found);
            history.record(
                RowOperation::Swap {
                    first: pivot_row,
                    second: found,
                },
                &mat,
            );
        }

        if mode.normalizes() && !mat.get(pivot_row, col).is_one() {
            let divisor = mat.get(pivot_row, col).clone();
            mat.map_row(pivot_row, |x| policy.divide(x, &divisor))
                .inspect_err(|_| error!(row = pivot_row, col, "pivot divided by zero"))?;
            history.record(
                RowOperation::Scale {
                    row: pivot_row,
                    divisor,
                },
                &mat,
            );
        }

        let pivot = mat.get(pivot_row, col).clone();
        let targets: Vec<usize> = if mode.clears_above() {
            (0..mat.rows()).filter(|&r| r != pivot_row).collect()
        } else {
            (pivot_row + 1..mat.rows()).collect()
        };

        for row in targets {
            let entry = mat.get(row, col);
            if policy.is_zero(entry) {
                continue;
            }

            let factor = if mode.normalizes() {
                entry.clone()
            } else {
                policy.divide(entry, &pivot)?
            };
            // A factor under the tolerance still has to clear `entry`.
            if factor.is_zero() {
                continue;
            }

            mat.sub_scaled_row(row, &factor, pivot_row);
            history.record(
                RowOperation::Combine {
                    target: row,
                    factor,
                    source: pivot_row,
                },
                &mat,
            );
        }

        pivots.push((pivot_row, col));
        pivot_row += 1;
    }

    policy.snap(&mut mat);
    history.record(RowOperation::Result(mode), &mat);

    let steps = history.into_steps();
    debug!(%mode, rank = pivots.len(), steps = steps.len(), "reduction finished");

    Ok(Reduction {
        mode,
        matrix: mat,
        steps,
        pivots,
    })
}

// Row holding the pivot for `col`, searching from `start` down.
fn find_pivot<P: NumericPolicy>(
    mat: &Matrix<P::Scalar>,
    start: usize,
    col: usize,
    policy: &P,
) -> Option<usize> {
    let candidate = match policy.pivoting() {
        Pivoting::Partial => (start + 1..mat.rows()).fold(start, |best, r| {
            match policy.compare_magnitude(mat.get(r, col), mat.get(best, col)) {
                Ordering::Greater => r,
                _ => best,
            }
        }),
        Pivoting::FirstNonZero => (start..mat.rows()).find(|&r| !policy.is_zero(mat.get(r, col)))?,
    };

    if policy.is_zero(mat.get(candidate, col)) {
        return None;
    }
    Some(candidate)
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EchelonError;
    use crate::policy::exact::ExactPolicy;
    use crate::policy::float::FloatPolicy;
    use crate::rings::fraction::Fraction;

    fn float(lines: Vec<Vec<f64>>) -> Matrix<f64> {
        Matrix::from_rows(lines).unwrap()
    }

    fn exact(lines: Vec<Vec<&str>>) -> Matrix<Fraction> {
        crate::parse_matrix(&lines, &ExactPolicy).unwrap()
    }

    fn descriptions<T: Element>(reduction: &Reduction<T>) -> Vec<&str> {
        reduction.steps().iter().map(|s| s.description()).collect()
    }

    #[test]
    fn test_ref_keeps_pivot() {
        let m = float(vec![vec![2.0, 4.0, 2.0]]);
        let r = reduce(&m, Mode::Ref, &FloatPolicy::default()).unwrap();

        assert_eq!(r.matrix().to_rows(), vec![vec![2.0, 4.0, 2.0]]);
        assert_eq!(descriptions(&r), vec!["Initial matrix", "Row echelon form"]);
    }

    #[test]
    fn test_ref_normalized_scales_once() {
        let m = float(vec![vec![2.0, 4.0, 2.0]]);
        let r = reduce(&m, Mode::RefNormalized, &FloatPolicy::default()).unwrap();

        assert_eq!(r.matrix().to_rows(), vec![vec![1.0, 2.0, 1.0]]);
        assert_eq!(
            descriptions(&r),
            vec![
                "Initial matrix",
                "row 1 = row 1 / 2",
                "Row echelon form (leading ones)"
            ]
        );
        let scales = r
            .steps()
            .iter()
            .filter(|s| matches!(s.operation(), RowOperation::Scale { .. }))
            .count();
        assert_eq!(scales, 1);
    }

    #[test]
    fn test_partial_pivoting_steps() {
        let m = float(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 10.0]]);
        let r = reduce(&m, Mode::Ref, &FloatPolicy::default()).unwrap();

        assert_eq!(r.steps()[1].description(), "swap rows 1 and 3");
        assert_eq!(r.steps()[1].matrix().row(0), &[7.0, 8.0, 10.0]);
        assert_eq!(r.steps()[4].description(), "swap rows 2 and 3");
        assert_eq!(r.pivots(), &[(0, 0), (1, 1), (2, 2)]);
        assert_eq!(r.rank(), 3);
        assert!((r.matrix().get(2, 2) + 0.5).abs() < 1e-12);
        assert!(r.matrix().is_row_echelon(&FloatPolicy::default()));
        assert_eq!(r.steps().last().unwrap().matrix(), r.matrix());
    }

    #[test]
    fn test_ref_clears_small_entry_under_large_pivot() {
        let policy = FloatPolicy::default();
        let m = float(vec![vec![1e6, 1.0], vec![1e-5, 1.0]]);
        let r = reduce(&m, Mode::Ref, &policy).unwrap();

        assert_eq!(r.steps().len(), 3);
        assert!(matches!(
            r.steps()[1].operation(),
            RowOperation::Combine {
                target: 1,
                source: 0,
                ..
            }
        ));
        assert_eq!(*r.matrix().get(1, 0), 0.0);
        assert!((r.matrix().get(1, 1) - 1.0).abs() < 1e-9);
        assert!(r.matrix().is_row_echelon(&policy));
        assert_eq!(r.rank(), 2);
    }

    #[test]
    fn test_exact_rref() {
        let m = exact(vec![vec!["1", "2", "3"], vec!["4", "5", "6"], vec!["7", "8", "10"]]);
        let r = reduce(&m, Mode::Rref, &ExactPolicy).unwrap();

        assert_eq!(
            r.matrix().to_rows(),
            exact(vec![vec!["1", "0", "0"], vec!["0", "1", "0"], vec!["0", "0", "1"]]).to_rows()
        );
        assert_eq!(
            descriptions(&r),
            vec![
                "Initial matrix",
                "row 2 = row 2 − 4 × row 1",
                "row 3 = row 3 − 7 × row 1",
                "row 2 = row 2 / (-3)",
                "row 1 = row 1 − 2 × row 2",
                "row 3 = row 3 − (-6) × row 2",
                "row 1 = row 1 − (-1) × row 3",
                "row 2 = row 2 − 2 × row 3",
                "Reduced row echelon form",
            ]
        );
        assert_eq!(r.pivot_cols(), vec![0, 1, 2]);

        let m = exact(vec![vec!["1", "2", "3"], vec!["4", "5", "6"], vec!["7", "8", "9"]]);
        let r = reduce(&m, Mode::Rref, &ExactPolicy).unwrap();
        assert_eq!(
            r.matrix().to_rows(),
            exact(vec![vec!["1", "0", "-1"], vec!["0", "1", "2"], vec!["0", "0", "0"]]).to_rows()
        );
        assert_eq!(r.rank(), 2);
    }

    #[test]
    fn test_exact_first_nonzero_pivot() {
        let m = exact(vec![vec!["0", "1"], vec!["1", "0"], vec!["5", "0"]]);
        let r = reduce(&m, Mode::Ref, &ExactPolicy).unwrap();

        // first nonzero, not largest
        assert_eq!(r.steps()[1].description(), "swap rows 1 and 2");
        assert_eq!(r.steps()[2].description(), "row 3 = row 3 − 5 × row 1");
    }

    #[test]
    fn test_zero_matrix() {
        let m = float(vec![vec![0.0, 0.0], vec![0.0, 0.0]]);
        for mode in [Mode::Ref, Mode::RefNormalized, Mode::Rref] {
            let r = reduce(&m, mode, &FloatPolicy::default()).unwrap();
            assert_eq!(r.steps().len(), 2);
            assert_eq!(r.rank(), 0);
            assert_eq!(r.steps()[1].operation(), &RowOperation::Result(mode));
        }
    }

    #[test]
    fn test_wide_matrix_leaves_free_columns() {
        let m = exact(vec![vec!["1", "2", "3", "4"], vec!["2", "4", "7", "9"]]);
        let r = reduce(&m, Mode::Rref, &ExactPolicy).unwrap();

        assert_eq!(r.pivot_cols(), vec![0, 2]);
        assert!(r.matrix().is_rref(&ExactPolicy));
    }

    #[test]
    fn test_float_noise_is_snapped() {
        let m = float(vec![vec![0.1, 0.2, 0.3], vec![0.3, 0.6, 0.9]]);
        let r = reduce(&m, Mode::Rref, &FloatPolicy::default()).unwrap();

        assert_eq!(r.rank(), 1);
        assert_eq!(r.matrix().row(1), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_reduce_augmented_skips_constants_column() {
        let m = exact(vec![vec!["0", "0", "5"]]);

        let full = reduce(&m, Mode::Rref, &ExactPolicy).unwrap();
        assert_eq!(full.pivot_cols(), vec![2]);
        assert_eq!(full.matrix().to_rows(), exact(vec![vec!["0", "0", "1"]]).to_rows());

        let augmented = reduce_augmented(&m, &ExactPolicy).unwrap();
        assert_eq!(augmented.rank(), 0);
        assert_eq!(augmented.matrix(), &m);
        assert_eq!(augmented.steps().len(), 2);

        let m = exact(vec![vec!["2", "1", "5"], vec!["1", "3", "10"]]);
        assert_eq!(
            reduce_augmented(&m, &ExactPolicy).unwrap().matrix(),
            reduce(&m, Mode::Rref, &ExactPolicy).unwrap().matrix()
        );

        let narrow = exact(vec![vec!["1"], vec!["2"]]);
        assert_eq!(
            reduce_augmented(&narrow, &ExactPolicy).unwrap_err(),
            EchelonError::Input(InputError::NotAugmented { cols: 1 })
        );
    }

    #[test]
    fn test_non_finite_cells_are_rejected() {
        let policy = FloatPolicy::default();
        let m = float(vec![vec![1.0, f64::NAN], vec![0.0, 1.0]]);
        for mode in [Mode::Ref, Mode::RefNormalized, Mode::Rref] {
            assert!(matches!(
                reduce(&m, mode, &policy),
                Err(EchelonError::Input(InputError::NonNumeric { row: 0, col: 1, .. }))
            ));
        }

        let m = float(vec![vec![1.0, 2.0], vec![f64::INFINITY, 3.0]]);
        assert!(matches!(
            reduce_augmented(&m, &policy),
            Err(EchelonError::Input(InputError::NonNumeric { row: 1, col: 0, .. }))
        ));
    }

    #[test]
    fn test_input_not_mutated() {
        let m = float(vec![vec![0.0, 2.0], vec![3.0, 1.0]]);
        let before = m.clone();
        let r = reduce(&m, Mode::Rref, &FloatPolicy::default()).unwrap();

        assert_eq!(m, before);
        assert_eq!(r.steps()[0].matrix(), &before);
    }

    #[test]
    fn test_result_copy_does_not_touch_history() {
        let m = float(vec![vec![2.0, 1.0], vec![1.0, 3.0]]);
        let r = reduce(&m, Mode::Rref, &FloatPolicy::default()).unwrap();
        let recorded: Vec<Matrix<f64>> = r.steps().iter().map(|s| s.snapshot()).collect();

        let mut out = r.clone().into_matrix();
        for x in out.cells_mut() {
            *x = 42.0;
        }

        let after: Vec<Matrix<f64>> = r.steps().iter().map(|s| s.snapshot()).collect();
        assert_eq!(recorded, after);
        assert_eq!(r.matrix().to_rows(), vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }
}
