//! numeric::lu — in-place LU factorization and substitution core.
//!
//! Purpose
//! -------
//! Provide the single factor/solve kernel shared by the batch inverter and
//! the Mahalanobis evaluator: an in-place LU decomposition with partial
//! pivoting on a caller-owned slab, plus forward/back substitution against
//! a caller-owned right-hand side. Keeping the kernel allocation-free is
//! what lets the batch entry points hoist every scratch buffer out of their
//! loops, which is the whole batch-efficiency story of this crate.
//!
//! Key behaviors
//! -------------
//! - [`lu_factor`] overwrites a square slab with its combined L\U factors
//!   (unit-diagonal L below, U on and above the diagonal) and records the
//!   row permutation in a caller-owned pivot slice.
//! - [`lu_solve`] applies the recorded permutation and both substitutions
//!   in place on a right-hand-side vector, yielding `A⁻¹·b` without ever
//!   forming `A⁻¹`.
//! - A vanishing pivot aborts factorization with
//!   [`NumError::SingularMatrix`] carrying the batch index the caller is
//!   currently processing.
//!
//! Invariants & assumptions
//! ------------------------
//! - `lu_factor` must complete successfully on a slab before `lu_solve` is
//!   called with it; the pivot slice passed to `lu_solve` must be the one
//!   filled by that factorization.
//! - The pivot slice has length `n` and entry `k` names the row swapped
//!   into position `k` at elimination step `k`.
//! - A pivot whose magnitude does not exceed `ε · n · max|aᵢⱼ|` is treated
//!   as numerically zero. Slabs containing non-finite entries fail the
//!   pivot test and surface as singular rather than propagating NaNs.
//!
//! Conventions
//! -----------
//! - Both routines are crate-internal plumbing beneath the public
//!   `batch_inverse` and `mahalanobis` surfaces; they perform no shape
//!   validation of their own.
//! - Errors are reported via [`NumResult`]; the routines never panic under
//!   the documented invariants.
//!
//! Downstream usage
//! ----------------
//! - `numeric::inverse::batch_inverse` factors each stack member once and
//!   substitutes the identity columns into the output stack.
//! - `numeric::mahalanobis::mahalanobis` factors each covariance matrix
//!   once (exactly once for a shared matrix) and substitutes the paired
//!   column vector.
//!
//! Testing notes
//! -------------
//! - Unit tests cover factor/solve agreement with a hand-computed system,
//!   correct handling of a matrix that requires row exchanges, and the
//!   singularity report with a non-zero batch index.

use ndarray::{ArrayView2, ArrayViewMut1, ArrayViewMut2};

use crate::numeric::errors::{NumError, NumResult};

/// Factor a square slab in place as P·A = L·U with partial pivoting.
///
/// Parameters
/// ----------
/// - `a`: `&mut ArrayViewMut2<f64>`
///   Square slab holding the matrix to factor. On success it holds the
///   combined factors: the strictly lower triangle stores the unit-diagonal
///   L multipliers, the upper triangle (diagonal included) stores U.
/// - `piv`: `&mut [usize]`
///   Pivot record of length `n`; entry `k` receives the index of the row
///   exchanged into position `k` at step `k`.
/// - `batch_index`: `usize`
///   Index of the matrix within the caller's batch, used only to label a
///   singularity failure.
///
/// Returns
/// -------
/// `NumResult<()>`
///   - `Ok(())` when all `n` pivots clear the singularity threshold.
///   - `Err(NumError::SingularMatrix(batch_index))` when a pivot is
///     numerically zero; the slab contents are unspecified afterwards.
///
/// Notes
/// -----
/// - The threshold scales with the magnitude of the matrix
///   (`ε · n · max|aᵢⱼ|`), so uniformly scaling a non-singular matrix does
///   not flip the verdict.
/// - The pivot comparison is written so that NaN magnitudes fail it,
///   turning non-finite input into a singularity report instead of a NaN
///   cascade.
pub(crate) fn lu_factor(
    a: &mut ArrayViewMut2<f64>, piv: &mut [usize], batch_index: usize,
) -> NumResult<()> {
    let n = a.nrows();
    let max_abs = a.iter().fold(0.0_f64, |acc, &v| acc.max(v.abs()));
    let tol = f64::EPSILON * n as f64 * max_abs;

    for k in 0..n {
        // Partial pivoting: largest magnitude in column k at or below row k.
        let mut p = k;
        let mut best = a[[k, k]].abs();
        for i in (k + 1)..n {
            let candidate = a[[i, k]].abs();
            if candidate > best {
                best = candidate;
                p = i;
            }
        }
        if !(best > tol) {
            return Err(NumError::SingularMatrix(batch_index));
        }
        piv[k] = p;
        if p != k {
            for j in 0..n {
                a.swap([k, j], [p, j]);
            }
        }

        let pivot = a[[k, k]];
        for i in (k + 1)..n {
            let m = a[[i, k]] / pivot;
            a[[i, k]] = m;
            for j in (k + 1)..n {
                a[[i, j]] -= m * a[[k, j]];
            }
        }
    }
    Ok(())
}

/// Solve A·x = b in place against a previously factored slab.
///
/// Parameters
/// ----------
/// - `lu`: `&ArrayView2<f64>`
///   Combined L\U factors produced by a successful [`lu_factor`] call.
/// - `piv`: `&[usize]`
///   Pivot record filled by that same factorization.
/// - `b`: `&mut ArrayViewMut1<f64>`
///   Right-hand side of length `n`; overwritten with the solution `x`.
///
/// Notes
/// -----
/// - Applies the row permutation, then unit-lower forward substitution,
///   then upper back substitution. No allocation and no division besides
///   the `n` diagonal divisions of the back pass.
pub(crate) fn lu_solve(lu: &ArrayView2<f64>, piv: &[usize], b: &mut ArrayViewMut1<f64>) {
    let n = piv.len();

    for k in 0..n {
        if piv[k] != k {
            b.swap(k, piv[k]);
        }
    }

    // Forward: L has an implicit unit diagonal.
    for i in 1..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= lu[[i, j]] * b[j];
        }
        b[i] = sum;
    }

    // Back: U carries the true diagonal.
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= lu[[i, j]] * b[j];
        }
        b[i] = sum / lu[[i, i]];
    }
}
