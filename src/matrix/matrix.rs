use itertools::Itertools;
use num_traits::{One, Zero};
use std::ops::{Add, Div, Index, Mul, Sub};

use crate::error::InputError;
use crate::policy::policy::NumericPolicy;

pub trait Element:  // Avoid repeating all the traits
    Clone
    + Zero
    + One
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + std::fmt::Debug
{
}

impl<T> Element for T where
    T: Clone
        + Zero
        + One
        + PartialEq
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
        + std::fmt::Debug
{
}

/// Dense rectangular matrix stored row by row.
///
/// Construction goes through [`Matrix::from_rows`] (or
/// [`parse_matrix`](crate::parse_matrix)), which rejects empty and ragged
/// input, so every `Matrix` has at least one row and one column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Element> Matrix<T> {
    pub fn from_rows(lines: Vec<Vec<T>>) -> Result<Self, InputError> {
        let (rows, cols) = check_shape(&lines)?;

        Ok(Matrix {
            rows,
            cols,
            cells: lines.into_iter().flatten().collect(),
        })
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.cells
            .chunks(self.cols)
            .map(|line| line.into())
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> &T {
        &self.cells[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.cells[row * self.cols + col] = value;
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.cells.iter_mut()
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for k in 0..self.cols {
            self.cells.swap(a * self.cols + k, b * self.cols + k);
        }
    }

    /// Replace every entry of `row` with `divide(entry)`.
    pub fn map_row<E>(
        &mut self,
        row: usize,
        mut divide: impl FnMut(&T) -> Result<T, E>,
    ) -> Result<(), E> {
        for k in 0..self.cols {
            let value = divide(self.get(row, k))?;
            self.set(row, k, value);
        }
        Ok(())
    }

    /// `row[target] = row[target] - factor * row[source]`
    pub fn sub_scaled_row(&mut self, target: usize, factor: &T, source: usize) {
        for k in 0..self.cols {
            let value = self.get(target, k).clone() - factor.clone() * self.get(source, k).clone();
            self.set(target, k, value);
        }
    }

    /// Column of the first entry in `row` that `policy` considers nonzero,
    /// looking only at the first `width` columns.
    pub fn leading_col<P: NumericPolicy<Scalar = T>>(
        &self,
        row: usize,
        width: usize,
        policy: &P,
    ) -> Option<usize> {
        self.row(row)[..width]
            .iter()
            .position(|x| !policy.is_zero(x))
    }

    pub fn is_zero_row<P: NumericPolicy<Scalar = T>>(&self, row: usize, policy: &P) -> bool {
        self.leading_col(row, self.cols, policy).is_none()
    }

    pub fn nonzero_rows<P: NumericPolicy<Scalar = T>>(&self, policy: &P) -> usize {
        (0..self.rows)
            .filter(|&r| !self.is_zero_row(r, policy))
            .count()
    }

    /// Zero rows at the bottom and leading entries moving strictly right.
    pub fn is_row_echelon<P: NumericPolicy<Scalar = T>>(&self, policy: &P) -> bool {
        self.leading_cols(policy).is_some()
    }

    pub fn is_rref<P: NumericPolicy<Scalar = T>>(&self, policy: &P) -> bool {
        let Some(leads) = self.leading_cols(policy) else {
            return false;
        };

        leads.iter().enumerate().all(|(i, &pivot_col)| {
            *self.get(i, pivot_col) == T::one()
                && (0..self.rows).all(|r| r == i || policy.is_zero(self.get(r, pivot_col)))
        })
    }

    // Leading column of each nonzero row, or `None` when the echelon shape is
    // broken.
    fn leading_cols<P: NumericPolicy<Scalar = T>>(&self, policy: &P) -> Option<Vec<usize>> {
        let mut leads: Vec<usize> = vec![];

        for i in 0..self.rows {
            match self.leading_col(i, self.cols, policy) {
                None => {
                    if (i + 1..self.rows).any(|r| !self.is_zero_row(r, policy)) {
                        return None;
                    }
                    break;
                }
                Some(pivot_col) => {
                    if leads.last().is_some_and(|&prev| pivot_col <= prev) {
                        return None;
                    }
                    leads.push(pivot_col);
                }
            }
        }
        Some(leads)
    }

    /// Reject the first cell `policy` does not accept, e.g. a NaN float.
    pub fn check_cells<P: NumericPolicy<Scalar = T>>(
        &self,
        policy: &P,
    ) -> Result<(), InputError> {
        match self.cells.iter().position(|x| !policy.is_valid(x)) {
            Some(i) => Err(InputError::NonNumeric {
                row: i / self.cols,
                col: i % self.cols,
                text: policy.format(&self.cells[i]),
            }),
            None => Ok(()),
        }
    }

    /// Text grid with columns right-aligned and separated by two spaces.
    pub fn render<P: NumericPolicy<Scalar = T>>(&self, policy: &P) -> String {
        let text: Vec<Vec<String>> = self
            .to_rows()
            .iter()
            .map(|line| line.iter().map(|x| policy.format(x)).collect())
            .collect();

        let widths: Vec<usize> = (0..self.cols)
            .map(|c| text.iter().map(|line| line[c].len()).max().unwrap_or(0))
            .collect();

        text.iter()
            .map(|line| {
                line.iter()
                    .zip(&widths)
                    .map(|(cell, &width)| format!("{cell:>width$}"))
                    .join("  ")
            })
            .join("\n")
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.cells[row * self.cols + col]
    }
}

/// Validate that `lines` is a non-empty rectangle and return its shape.
pub(crate) fn check_shape<C>(lines: &[Vec<C>]) -> Result<(usize, usize), InputError> {
    let first = lines.first().ok_or(InputError::Empty)?;
    let cols = first.len();
    if cols == 0 {
        return Err(InputError::NoColumns);
    }

    if let Some((row, line)) = lines.iter().find_position(|line| line.len() != cols) {
        return Err(InputError::Ragged {
            row,
            expected: cols,
            found: line.len(),
        });
    }
    Ok((lines.len(), cols))
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
