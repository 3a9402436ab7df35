use crate::error::InputError;
use crate::matrix::matrix::{check_shape, Matrix};
use crate::policy::policy::NumericPolicy;

/// Build a matrix from text cells, reading each one with `policy`.
///
/// The shape is checked before any cell is read; the first unreadable cell
/// (row-major order) is reported with its position.
pub fn parse_matrix<P, S>(lines: &[Vec<S>], policy: &P) -> Result<Matrix<P::Scalar>, InputError>
where
    P: NumericPolicy,
    S: AsRef<str>,
{
    check_shape(lines)?;

    let values = lines
        .iter()
        .enumerate()
        .map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(|(col, cell)| {
                    policy
                        .parse(cell.as_ref())
                        .ok_or_else(|| InputError::NonNumeric {
                            row,
                            col,
                            text: cell.as_ref().to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Matrix::from_rows(values)
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
