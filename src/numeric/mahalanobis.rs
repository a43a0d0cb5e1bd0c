//! numeric::mahalanobis — batched Mahalanobis quadratic forms.
//!
//! Purpose
//! -------
//! Evaluate, for K column vectors xₖ and K paired square matrices Aₖ, the
//! quadratic forms xₖᵀ·Aₖ⁻¹·xₖ — the scale-normalized squared distances
//! downstream statistical mapping computes per voxel. Mathematically this
//! composes batch inversion with a per-column quadratic form, but the two
//! steps are fused: each Aₖ is LU-factored and the system Aₖ·y = xₖ is
//! solved, so no explicit inverse is ever materialized and no inversion
//! error is amplified through a matrix–vector product.
//!
//! Key behaviors
//! -------------
//! - Accept either one shared matrix for all K columns or one matrix per
//!   column, expressed as the two arms of [`CovarianceStack`].
//! - For a shared matrix, factor exactly once and reuse the factorization
//!   across all K columns. Recomputing it per column is the dominant cost
//!   this component exists to avoid, so the single factorization is a
//!   contract, not an optimization opportunity.
//! - For per-column matrices, reuse one scratch slab and pivot record
//!   across the batch, as `batch_inverse` does.
//! - Fail with [`NumError::SingularMatrix`] carrying the offending column
//!   index (0 for the shared matrix), and with the ShapeMismatch-family
//!   errors when the vector/matrix pairing is inconsistent.
//!
//! Invariants & assumptions
//! ------------------------
//! - Vectors are packed as columns of an `(n, K)` array; per-column
//!   matrices are packed as an `(n, n, K)` stack. Index k of the vectors
//!   pairs with index k of the matrices, and this positional pairing is
//!   preserved exactly.
//! - Matrices are assumed non-singular; singularity is detected during
//!   factorization and reported, never masked.
//! - A batch with K = 0 columns is valid and returns an empty result.
//!
//! Conventions
//! -----------
//! - Shape validation is delegated to `numeric::validation`; the LU core
//!   is shared with `numeric::inverse` through `numeric::lu`.
//!
//! Downstream usage
//! ----------------
//! - Per-voxel distance maps: `mahalanobis(effects.view(),
//!   CovarianceStack::PerColumn(covariances.view()))?`.
//! - Single-vector checks against one covariance structure:
//!   [`mahalanobis_single`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover agreement with the explicit x·A⁻¹·x form on small
//!   systems for both arms, the singular-index report, pairing errors, and
//!   the single-vector wrapper.
//! - The integration suite checks both arms against explicit per-index
//!   computation on 100-dimensional seeded random SPD systems.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayView3, Axis, s};

use crate::numeric::errors::{NumError, NumResult};
use crate::numeric::lu::{lu_factor, lu_solve};
use crate::numeric::validation::{validate_batch_counts, validate_square, validate_vector_pairing};

/// CovarianceStack — the matrix side of a Mahalanobis evaluation.
///
/// Purpose
/// -------
/// Express the two admissible pairings between K column vectors and their
/// precision-source matrices: one matrix shared by every column, or one
/// matrix per column.
///
/// Variants
/// --------
/// - `Shared(a)`
///   A single `(n, n)` matrix applied to all K columns. Its factorization
///   is computed once and reused.
/// - `PerColumn(stack)`
///   An `(n, n, K)` stack supplying matrix k for column vector k.
///
/// Notes
/// -----
/// - Borrowing views keeps the enum copy-free; callers retain ownership of
///   their arrays.
#[derive(Debug, Clone, Copy)]
pub enum CovarianceStack<'a> {
    Shared(ArrayView2<'a, f64>),
    PerColumn(ArrayView3<'a, f64>),
}

/// Evaluate Mahalanobis quadratic forms for a batch of column vectors.
///
/// Parameters
/// ----------
/// - `x`: `ArrayView2<f64>`
///   K column vectors of length n, shape `(n, K)`.
/// - `cov`: [`CovarianceStack`]
///   Either a shared `(n, n)` matrix or an `(n, n, K)` per-column stack.
///
/// Returns
/// -------
/// `NumResult<Array1<f64>>`
///   - `Ok(d)` of length K with `d[k] = xₖᵀ·Aₖ⁻¹·xₖ`.
///   - `Err(NumError::NotSquare { .. })` when a matrix is rectangular.
///   - `Err(NumError::DimensionMismatch { .. })` when vector length and
///     matrix dimension disagree.
///   - `Err(NumError::BatchCountMismatch { .. })` when K vectors pair with
///     a different number of matrices.
///   - `Err(NumError::SingularMatrix(k))` when matrix k is numerically
///     singular (k = 0 for a shared matrix).
///
/// Errors
/// ------
/// - Shape errors are raised before any factorization; singularity is
///   raised at the offending column and aborts the batch.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `NumError`.
///
/// Notes
/// -----
/// - Each quadratic form costs one triangular solve pair plus one dot
///   product; the shared arm additionally amortizes its single
///   factorization over all K columns.
/// - Since solves replace explicit inversion, accuracy degrades with the
///   conditioning of Aₖ rather than with the error of a materialized
///   inverse.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use voxelstats::numeric::mahalanobis::{CovarianceStack, mahalanobis};
/// // Identity covariance: the quadratic form is the squared norm.
/// let x = array![[1.0_f64, 0.0], [2.0, 3.0]];
/// let eye = array![[1.0_f64, 0.0], [0.0, 1.0]];
///
/// let d = mahalanobis(x.view(), CovarianceStack::Shared(eye.view())).unwrap();
/// assert!((d[0] - 5.0).abs() < 1e-12);
/// assert!((d[1] - 9.0).abs() < 1e-12);
/// ```
pub fn mahalanobis(x: ArrayView2<f64>, cov: CovarianceStack) -> NumResult<Array1<f64>> {
    let (n, k_count) = x.dim();
    match cov {
        CovarianceStack::Shared(a) => {
            let dim = validate_square(&a)?;
            validate_vector_pairing(n, dim)?;

            // Factor once, reuse across all K columns.
            let mut slab = a.to_owned();
            let mut piv = vec![0_usize; n];
            lu_factor(&mut slab.view_mut(), &mut piv, 0)?;

            let mut out = Array1::<f64>::zeros(k_count);
            let mut y = Array1::<f64>::zeros(n);
            for k in 0..k_count {
                let xk = x.column(k);
                y.assign(&xk);
                lu_solve(&slab.view(), &piv, &mut y.view_mut());
                out[k] = xk.dot(&y);
            }
            Ok(out)
        }
        CovarianceStack::PerColumn(stack) => {
            let (rows, cols, m_count) = stack.dim();
            if rows != cols {
                return Err(NumError::NotSquare { rows, cols });
            }
            validate_vector_pairing(n, rows)?;
            validate_batch_counts(k_count, m_count)?;

            // Scratch shared across the whole batch.
            let mut slab = Array2::<f64>::zeros((n, n));
            let mut piv = vec![0_usize; n];
            let mut y = Array1::<f64>::zeros(n);

            let mut out = Array1::<f64>::zeros(k_count);
            for k in 0..k_count {
                slab.assign(&stack.slice(s![.., .., k]));
                lu_factor(&mut slab.view_mut(), &mut piv, k)?;

                let xk = x.column(k);
                y.assign(&xk);
                lu_solve(&slab.view(), &piv, &mut y.view_mut());
                out[k] = xk.dot(&y);
            }
            Ok(out)
        }
    }
}

/// Evaluate one Mahalanobis quadratic form for a single vector.
///
/// Parameters
/// ----------
/// - `x`: `ArrayView1<f64>`
///   Vector of length n.
/// - `a`: `ArrayView2<f64>`
///   Square `(n, n)` matrix.
///
/// Returns
/// -------
/// `NumResult<f64>`
///   The scalar `xᵀ·A⁻¹·x`, with the same error conditions as
///   [`mahalanobis`] for K = 1.
///
/// Notes
/// -----
/// - Thin wrapper that views `x` as a one-column batch and delegates.
pub fn mahalanobis_single(x: ArrayView1<f64>, a: ArrayView2<f64>) -> NumResult<f64> {
    let column = x.insert_axis(Axis(1));
    let d = mahalanobis(column, CovarianceStack::Shared(a))?;
    Ok(d[0])
}
