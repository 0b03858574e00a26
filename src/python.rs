//! Python bindings for fracfact.
//!
//! This module exposes the core functionality of the library to Python
//! using PyO3. Enable the `python` feature to use this.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::design::Design;

fn to_rows(design: &Design) -> Vec<Vec<f64>> {
    design.data().rows().into_iter().map(|r| r.to_vec()).collect()
}

fn value_error(err: crate::Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Build a fractional-factorial design from a generator string.
#[pyfunction]
#[pyo3(name = "fracfact")]
fn py_fracfact(gen: &str) -> PyResult<Vec<Vec<f64>>> {
    let design = crate::fracfact(gen).map_err(value_error)?;
    Ok(to_rows(&design))
}

/// Build a minimal-run design with `n` factors at resolution `res`.
#[pyfunction]
#[pyo3(name = "fracfact_by_res")]
fn py_fracfact_by_res(n: usize, res: usize) -> PyResult<Vec<Vec<f64>>> {
    let design = crate::fracfact_by_res(n, res).map_err(value_error)?;
    Ok(to_rows(&design))
}

/// Analyze the confounding structure of a design built from `gen`.
///
/// Returns `(alias_map, alias_vector)`.
#[pyfunction]
#[pyo3(name = "fracfact_aliasing")]
fn py_fracfact_aliasing(gen: &str) -> PyResult<(Vec<String>, Vec<u32>)> {
    let design = crate::fracfact(gen).map_err(value_error)?;
    let analysis = crate::fracfact_aliasing(&design).map_err(value_error)?;
    Ok((analysis.readable(), analysis.cost_vector().to_vec()))
}

/// Search for the generator minimizing aliasing.
///
/// Returns `(gen, alias_map, alias_vector, exhaustive)`.
#[pyfunction]
#[pyo3(name = "fracfact_opt")]
#[pyo3(signature = (n_factors, n_erased, max_attempts=0))]
fn py_fracfact_opt(
    n_factors: usize,
    n_erased: usize,
    max_attempts: usize,
) -> PyResult<(String, Vec<String>, Vec<u32>, bool)> {
    let best = crate::fracfact_opt(n_factors, n_erased, max_attempts).map_err(value_error)?;
    Ok((
        best.generator(),
        best.analysis().readable(),
        best.cost_vector().to_vec(),
        best.is_exhaustive(),
    ))
}

/// The fracfact Python module.
#[pymodule]
fn fracfact(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_fracfact, m)?)?;
    m.add_function(wrap_pyfunction!(py_fracfact_by_res, m)?)?;
    m.add_function(wrap_pyfunction!(py_fracfact_aliasing, m)?)?;
    m.add_function(wrap_pyfunction!(py_fracfact_opt, m)?)?;
    Ok(())
}
