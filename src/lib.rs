//! voxelstats — batch numerical-statistics primitives with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the core batch-statistics primitives to Python via the
//! `_voxelstats` extension module. When the `python-bindings` feature is
//! enabled, this module defines the Python-facing functions used by the
//! `voxelstats` package inside a larger neuroimaging analysis pipeline.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module (`numeric`) as the public crate surface.
//! - Define `#[pyfunction]` wrappers and the `#[pymodule]` initializer for
//!   the `_voxelstats` Python extension: `check_cast_bin8`, `z_score`,
//!   `batch_inverse`, `mahalanobis`, and `mahalanobis_single`.
//! - Convert NumPy arrays to `ndarray` views on the way in and back to
//!   NumPy arrays on the way out, with dtype-polymorphic extraction for
//!   the binary cast.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner `numeric` module; this
//!   file performs only FFI glue, input extraction, and error mapping.
//! - The core module compiles and runs without the `python-bindings`
//!   feature; nothing outside the gated items depends on PyO3.
//! - Errors from core Rust code are propagated as `NumError` values
//!   internally and converted to `ValueError` at the PyO3 boundary.
//!
//! Conventions
//! -----------
//! - Matrix stacks for inversion are batch-major `(N, n, n)`; Mahalanobis
//!   vectors are column-packed `(n, K)` with per-column matrices packed as
//!   `(n, n, K)`. Probabilities are upper-tail.
//! - Python-exposed functions mirror the signatures of their Rust
//!   counterparts one to one; no Python-side state is kept.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on [`numeric`] and can ignore
//!   the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports the `_voxelstats` module defined
//!   here; the statistical-mapping layer calls these primitives per
//!   analysis volume.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in `numeric` and by
//!   the integration suite in `tests/`.
//! - Smoke tests for the PyO3 bindings (construction, call, round trip)
//!   are expected to live at the Python level.

pub mod numeric;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray, PyArray1, PyArray3, PyArrayDyn, PyReadonlyArray1, PyReadonlyArray2,
    PyReadonlyArray3, PyReadonlyArrayDyn,
};

#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

#[cfg(feature = "python-bindings")]
use crate::{
    numeric::mahalanobis::CovarianceStack,
    utils::{CovarianceInput, NumericArrayDyn, extract_covariance, extract_numeric_arrayd},
};

/// Validate a NumPy array as binary and cast it to uint8.
///
/// Accepts int64 or float64 arrays of any dimensionality; every element
/// must represent exactly 0 or 1 (float inputs may use `-0.0`). Raises
/// `ValueError` on the first non-binary element and `TypeError` for
/// unsupported dtypes.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(data, /)")]
fn check_cast_bin8<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArrayDyn<u8>>> {
    let out = match extract_numeric_arrayd(data)? {
        NumericArrayDyn::Int(arr) => numeric::binary::check_cast_bin8(&arr.as_array())?,
        NumericArrayDyn::Float(arr) => numeric::binary::check_cast_bin8(&arr.as_array())?,
    };
    Ok(out.into_pyarray(py))
}

/// Convert an array of upper-tail probabilities to standard-normal deviates.
///
/// `p = 0` maps to `+inf` and `p = 1` to `-inf`; values outside `[0, 1]`
/// raise `ValueError`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(p, /)")]
fn z_score<'py>(
    py: Python<'py>, p: PyReadonlyArrayDyn<'py, f64>,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let z = numeric::zscore::z_score(&p.as_array())?;
    Ok(z.into_pyarray(py))
}

/// Invert every member of an `(N, n, n)` matrix stack.
///
/// Raises `ValueError` naming the offending batch index when a member is
/// numerically singular.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(stack, /)")]
fn batch_inverse<'py>(
    py: Python<'py>, stack: PyReadonlyArray3<'py, f64>,
) -> PyResult<Bound<'py, PyArray3<f64>>> {
    let inv = numeric::inverse::batch_inverse(stack.as_array())?;
    Ok(inv.into_pyarray(py))
}

/// Mahalanobis quadratic forms for K column vectors.
///
/// `x` has shape `(n, K)`; `a` is either a shared `(n, n)` matrix or an
/// `(n, n, K)` per-column stack. Returns a length-K float64 array.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(x, a, /)")]
fn mahalanobis<'py>(
    py: Python<'py>, x: PyReadonlyArray2<'py, f64>, a: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let cov_input = extract_covariance(a)?;
    let cov = match &cov_input {
        CovarianceInput::Shared(m) => CovarianceStack::Shared(m.as_array()),
        CovarianceInput::PerColumn(s) => CovarianceStack::PerColumn(s.as_array()),
    };
    let d = numeric::mahalanobis::mahalanobis(x.as_array(), cov)?;
    Ok(d.into_pyarray(py))
}

/// Mahalanobis quadratic form for a single vector against one matrix.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(x, a, /)")]
fn mahalanobis_single<'py>(
    x: PyReadonlyArray1<'py, f64>, a: PyReadonlyArray2<'py, f64>,
) -> PyResult<f64> {
    let d = numeric::mahalanobis::mahalanobis_single(x.as_array(), a.as_array())?;
    Ok(d)
}

/// _voxelstats — PyO3 module initializer for the Python extension.
///
/// Registers the five primitive functions on the `_voxelstats` module; the
/// public `voxelstats` Python package wraps them in thin facades.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _voxelstats<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(check_cast_bin8, m)?)?;
    m.add_function(wrap_pyfunction!(z_score, m)?)?;
    m.add_function(wrap_pyfunction!(batch_inverse, m)?)?;
    m.add_function(wrap_pyfunction!(mahalanobis, m)?)?;
    m.add_function(wrap_pyfunction!(mahalanobis_single, m)?)?;
    Ok(())
}
