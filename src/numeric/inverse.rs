//! numeric::inverse — batched inversion of a stack of square matrices.
//!
//! Purpose
//! -------
//! Invert every member of an `(N, n, n)` matrix stack in one call. In the
//! target domain the stack holds per-voxel covariance matrices across a
//! brain volume, so `N` reaches the tens of thousands; the point of this
//! module is to amortize everything amortizable across the batch rather
//! than dispatching `N` independent general inversion calls.
//!
//! Key behaviors
//! -------------
//! - [`batch_inverse`] factors each member once (in-place LU with partial
//!   pivoting on a single reusable slab) and back-substitutes the identity
//!   columns directly into the output stack. The slab, pivot record, and
//!   solve column are allocated once per call, not once per matrix.
//! - [`reference_inverse`] is the deliberately slow per-index path: each
//!   member is copied into a `nalgebra::DMatrix` and inverted with
//!   `try_inverse`. It exists as an independent implementation of the same
//!   contract so the test suite can assert numerical agreement between the
//!   two; it is not a fallback used by the production path.
//! - A numerically singular member fails the whole call with
//!   [`NumError::SingularMatrix`] carrying the offending batch index;
//!   nothing garbage or infinite is ever returned silently.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input members are assumed non-singular but this is *verified*, not
//!   trusted: a vanishing pivot (or non-finite entries, which fail the
//!   pivot test) aborts with the member's index.
//! - On success, member `k` of the output is the inverse of member `k` of
//!   the input to within the accuracy of partial-pivoted LU; batch order
//!   is preserved exactly.
//! - An empty batch (`N = 0`) is valid and returns an empty stack.
//!
//! Conventions
//! -----------
//! - Stacks are batch-major, `(N, n, n)`, matching the layout the
//!   statistical layer hands over.
//! - Shape validation is delegated to `numeric::validation`; this module
//!   only performs numerical work.
//!
//! Downstream usage
//! ----------------
//! - Statistical-mapping code calls `batch_inverse(stack.view())` on
//!   per-voxel covariance stacks.
//! - Code needing quadratic forms rather than explicit inverses should use
//!   `numeric::mahalanobis`, which shares the same LU core but never
//!   materializes an inverse.
//!
//! Testing notes
//! -------------
//! - Unit tests cover a hand-checkable inverse, agreement between the
//!   batched and reference paths on a mixed deterministic batch, the
//!   singular-index report, and the empty batch.
//! - The integration suite compares both paths on seeded random SPD
//!   batches at 1e-6 tolerance.

use nalgebra::DMatrix;
use ndarray::{Array1, Array2, Array3, ArrayView2, ArrayView3, Axis};

use crate::numeric::errors::{NumError, NumResult};
use crate::numeric::lu::{lu_factor, lu_solve};
use crate::numeric::validation::validate_square_stack;

/// Invert every member of a matrix stack.
///
/// Parameters
/// ----------
/// - `stack`: `ArrayView3<f64>`
///   Matrix stack of shape `(N, n, n)`. Members are assumed non-singular;
///   singular members are detected and reported, never masked.
///
/// Returns
/// -------
/// `NumResult<Array3<f64>>`
///   - `Ok(out)` of shape `(N, n, n)` where `out[k]` is the inverse of
///     `stack[k]`.
///   - `Err(NumError::NotSquare { .. })` when the last two axes disagree.
///   - `Err(NumError::SingularMatrix(k))` when member `k` is numerically
///     singular; the whole batch fails and `k` identifies the offender.
///
/// Errors
/// ------
/// - `NumError::NotSquare`
///   The stack members are rectangular.
/// - `NumError::SingularMatrix(k)`
///   A pivot of member `k` fell below the singularity threshold.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `NumError`.
///
/// Notes
/// -----
/// - Per member, the work is one LU factorization plus `n` substitutions
///   into the output slab — the classical factor-once-solve-many shape.
///   Across members, every scratch buffer is reused, so the batch costs
///   exactly three allocations beyond its output regardless of `N`.
/// - Members are processed independently, so the loop body is safe to
///   parallelize across the batch dimension should that ever be needed;
///   no ordering is observable in the result.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use voxelstats::numeric::inverse::batch_inverse;
/// let stack = array![[[2.0_f64, 0.0], [0.0, 4.0]], [[1.0, 1.0], [0.0, 1.0]]];
/// let inv = batch_inverse(stack.view()).unwrap();
///
/// assert!((inv[[0, 0, 0]] - 0.5).abs() < 1e-12);
/// assert!((inv[[0, 1, 1]] - 0.25).abs() < 1e-12);
/// assert!((inv[[1, 0, 1]] + 1.0).abs() < 1e-12);
/// ```
pub fn batch_inverse(stack: ArrayView3<f64>) -> NumResult<Array3<f64>> {
    let n = validate_square_stack(&stack)?;
    let mut out = Array3::<f64>::zeros(stack.raw_dim());

    // Scratch shared across the whole batch.
    let mut slab = Array2::<f64>::zeros((n, n));
    let mut piv = vec![0_usize; n];
    let mut col = Array1::<f64>::zeros(n);

    for (k, member) in stack.outer_iter().enumerate() {
        slab.assign(&member);
        lu_factor(&mut slab.view_mut(), &mut piv, k)?;

        let mut inv = out.index_axis_mut(Axis(0), k);
        for j in 0..n {
            col.fill(0.0);
            col[j] = 1.0;
            lu_solve(&slab.view(), &piv, &mut col.view_mut());
            inv.column_mut(j).assign(&col);
        }
    }
    Ok(out)
}

/// Invert every member of a matrix stack through per-index `nalgebra` calls.
///
/// Parameters
/// ----------
/// - `stack`: `ArrayView3<f64>`
///   Matrix stack of shape `(N, n, n)`.
///
/// Returns
/// -------
/// `NumResult<Array3<f64>>`
///   Same contract as [`batch_inverse`], computed the slow way: one
///   `DMatrix` copy and one `try_inverse` per member.
///
/// Notes
/// -----
/// - This is the reference half of the batch-vs-scalar duality: an
///   independent implementation of the inversion contract kept alive so
///   tests can assert that the batched path matches it numerically. Do not
///   use it on large batches.
pub fn reference_inverse(stack: ArrayView3<f64>) -> NumResult<Array3<f64>> {
    let n = validate_square_stack(&stack)?;
    let mut out = Array3::<f64>::zeros(stack.raw_dim());

    for (k, member) in stack.outer_iter().enumerate() {
        let mut dm = DMatrix::<f64>::zeros(n, n);
        fill_dmatrix(&member, &mut dm);
        let inv = dm.try_inverse().ok_or(NumError::SingularMatrix(k))?;
        let mut dst = out.index_axis_mut(Axis(0), k);
        for j in 0..n {
            for i in 0..n {
                dst[[i, j]] = inv[(i, j)];
            }
        }
    }
    Ok(out)
}

/// Copy an `ndarray` matrix view into a preallocated `nalgebra::DMatrix`.
///
/// Parameters
/// ----------
/// - `src`: `&ArrayView2<f64>`
///   Source matrix of shape `n×n`.
/// - `dst`: `&mut DMatrix<f64>`
///   Preallocated `n×n` destination.
///
/// Notes
/// -----
/// - Column-by-column writes, matching the column-major storage of
///   `DMatrix`.
fn fill_dmatrix(src: &ArrayView2<f64>, dst: &mut DMatrix<f64>) {
    let n = src.ncols();
    for j in 0..n {
        for i in 0..n {
            dst[(i, j)] = src[[i, j]];
        }
    }
}
