//! Python bindings for front ends (desktop or web) that render the steps.
//!
//! Cells come in as text so both arithmetic modes share one signature; with
//! `exact=True` they are read as rationals (`"1/3"`, `"0.25"`), otherwise as
//! floats.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::elimination::engine::Reduction;
use crate::elimination::mode::Mode;
use crate::error::EchelonError;
use crate::policy::exact::ExactPolicy;
use crate::policy::float::FloatPolicy;
use crate::policy::policy::NumericPolicy;
use crate::solution::descriptor::SolutionDescriptor;

type TextStep = (String, Vec<Vec<String>>);

fn to_py_err(error: EchelonError) -> PyErr {
    PyValueError::new_err(error.to_string())
}

fn text_steps<P: NumericPolicy>(reduction: &Reduction<P::Scalar>, policy: &P) -> Vec<TextStep> {
    reduction
        .steps()
        .iter()
        .map(|step| {
            let cells = step
                .matrix()
                .to_rows()
                .iter()
                .map(|line| line.iter().map(|x| policy.format(x)).collect())
                .collect();
            (step.description().to_string(), cells)
        })
        .collect()
}

fn reduce_text<P: NumericPolicy>(
    matrix: &[Vec<String>],
    mode: Mode,
    policy: &P,
) -> Result<Vec<TextStep>, EchelonError> {
    let matrix = crate::parse_matrix(matrix, policy)?;
    let reduction = crate::reduce(&matrix, mode, policy)?;
    Ok(text_steps(&reduction, policy))
}

/// Result of `classify`, with every scalar already formatted.
#[pyclass(frozen, get_all)]
#[derive(Debug, Clone)]
pub struct Solution {
    pub kind: String,
    pub row_index: Option<usize>,
    pub constant: Option<String>,
    pub free_variables: Vec<usize>,
    pub assignments: Vec<(usize, String)>,
    pub explanation: String,
    pub steps: Vec<TextStep>,
}

#[pymethods]
impl Solution {
    fn __repr__(&self) -> String {
        format!("Solution(kind={:?})", self.kind)
    }
}

fn classify_text<P: NumericPolicy>(
    matrix: &[Vec<String>],
    policy: &P,
) -> Result<Solution, EchelonError> {
    let matrix = crate::parse_matrix(matrix, policy)?;
    let (reduction, solution) = crate::analyze(&matrix, policy)?.into_parts();

    let mut out = Solution {
        kind: solution.kind().to_string(),
        row_index: None,
        constant: None,
        free_variables: vec![],
        assignments: vec![],
        explanation: solution.explain(policy),
        steps: text_steps(&reduction, policy),
    };
    match solution {
        SolutionDescriptor::Inconsistent {
            row_index,
            constant,
        } => {
            out.row_index = Some(row_index);
            out.constant = Some(policy.format(&constant));
        }
        SolutionDescriptor::Infinite {
            free_variable_indices,
        } => out.free_variables = free_variable_indices,
        SolutionDescriptor::Unique { assignments } => {
            out.assignments = assignments
                .iter()
                .map(|(v, x)| (*v, policy.format(x)))
                .collect();
        }
    }
    Ok(out)
}

#[pyfunction]
#[pyo3(signature = (matrix, mode = "rref", exact = false))]
fn reduce(matrix: Vec<Vec<String>>, mode: &str, exact: bool) -> PyResult<Vec<TextStep>> {
    let mode: Mode = mode.parse().map_err(PyValueError::new_err)?;
    let result = if exact {
        reduce_text(&matrix, mode, &ExactPolicy)
    } else {
        reduce_text(&matrix, mode, &FloatPolicy::default())
    };
    result.map_err(to_py_err)
}

#[pyfunction]
#[pyo3(signature = (matrix, exact = false))]
fn classify(matrix: Vec<Vec<String>>, exact: bool) -> PyResult<Solution> {
    let result = if exact {
        classify_text(&matrix, &ExactPolicy)
    } else {
        classify_text(&matrix, &FloatPolicy::default())
    };
    result.map_err(to_py_err)
}

/// A Python module implemented in Rust.
#[pymodule]
#[pyo3(name = "echelon")]
fn echelon_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(reduce, m)?)?;
    m.add_function(wrap_pyfunction!(classify, m)?)?;
    m.add_class::<Solution>()?;
    Ok(())
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
