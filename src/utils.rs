#[cfg(feature = "python-bindings")]
use numpy::{PyReadonlyArray2, PyReadonlyArray3, PyReadonlyArrayDyn};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*};

/// A NumPy array extracted as one of the two supported element families.
///
/// The binary cast accepts both integer and floating inputs with
/// family-specific validation rules, so the binding layer must preserve the
/// family rather than coerce everything to float.
#[cfg(feature = "python-bindings")]
pub enum NumericArrayDyn<'py> {
    Int(PyReadonlyArrayDyn<'py, i64>),
    Float(PyReadonlyArrayDyn<'py, f64>),
}

/// The matrix side of a Python-facing Mahalanobis call.
#[cfg(feature = "python-bindings")]
pub enum CovarianceInput<'py> {
    Shared(PyReadonlyArray2<'py, f64>),
    PerColumn(PyReadonlyArray3<'py, f64>),
}

/// Extract a NumPy array as int64 or float64, in that order.
///
/// Mirrors the element-family split of the core binary cast: integer
/// arrays keep integer validation semantics, floating arrays keep the
/// signed-zero tolerance. Anything else is a `TypeError`.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_numeric_arrayd<'py>(raw: &Bound<'py, PyAny>) -> PyResult<NumericArrayDyn<'py>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArrayDyn<i64>>() {
        return Ok(NumericArrayDyn::Int(arr));
    }
    if let Ok(arr) = raw.extract::<PyReadonlyArrayDyn<f64>>() {
        return Ok(NumericArrayDyn::Float(arr));
    }
    Err(PyTypeError::new_err(
        "expected an int64 or float64 numpy.ndarray",
    ))
}

/// Extract the covariance argument of `mahalanobis` as a shared `(n, n)`
/// matrix or an `(n, n, K)` per-column stack, in that order.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_covariance<'py>(raw: &Bound<'py, PyAny>) -> PyResult<CovarianceInput<'py>> {
    if let Ok(shared) = raw.extract::<PyReadonlyArray2<f64>>() {
        return Ok(CovarianceInput::Shared(shared));
    }
    if let Ok(stack) = raw.extract::<PyReadonlyArray3<f64>>() {
        return Ok(CovarianceInput::PerColumn(stack));
    }
    Err(PyTypeError::new_err(
        "expected a 2-D (n, n) or 3-D (n, n, K) float64 numpy.ndarray",
    ))
}
