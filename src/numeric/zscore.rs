//! numeric::zscore — upper-tail probabilities to standard-normal deviates.
//!
//! Purpose
//! -------
//! Convert arrays of upper-tail probabilities p into the standard-normal
//! deviates z satisfying P(Z > z) = p, staying numerically accurate across
//! the full open interval (0, 1) — including the extreme tail, where
//! multiple-comparison-corrected p-values routinely fall far below machine
//! epsilon around the 0.5 scale and a naive `1 - cdf` inversion loses every
//! significant digit.
//!
//! Key behaviors
//! -------------
//! - Invert the survival function through the complementary error function:
//!   for p ≤ ½, z = √2 · erfc⁻¹(2p); for p > ½, z = −√2 · erfc⁻¹(2(1−p)).
//!   Each branch evaluates erfc⁻¹ near 0, where it is well conditioned, so
//!   no cancellation occurs in either tail.
//! - Map the boundary inputs deterministically: p = 0 → +∞, p = 1 → −∞.
//! - Reject p outside [0, 1] (or NaN) with
//!   [`NumError::InvalidProbability`].
//! - Expose the matching upper-tail survival function [`sf`] so callers can
//!   verify the round trip without reintroducing `1 - cdf` cancellation.
//!
//! Invariants & assumptions
//! ------------------------
//! - For every p in (0, 1), `sf(z_score_scalar(p))` reproduces p to at
//!   least 6 decimal places; in the extreme tail the relative error of the
//!   round trip stays small down to the smallest positive normals.
//! - The output array has the same shape as the input; element order is
//!   preserved.
//!
//! Conventions
//! -----------
//! - Probabilities are *upper-tail* throughout: small p corresponds to
//!   large positive z. Callers holding lower-tail probabilities should pass
//!   `1 - p` (or negate the result).
//! - Special functions come from `statrs::function::erf`; no distribution
//!   object is constructed.
//!
//! Downstream usage
//! ----------------
//! - Statistical-mapping layers call [`z_score`] to turn corrected p-value
//!   volumes into z-maps, e.g. `let z = z_score(&p_map)?;`.
//! - [`sf`] is the inverse operation for a single deviate and is also used
//!   by the test suite to assert the round-trip law.
//!
//! Testing notes
//! -------------
//! - Unit tests here cover the boundary policy, rejection of out-of-range
//!   inputs, and the round trip on a fixed probability grid spanning both
//!   tails down to 1e-300.
//! - The integration suite checks the round trip on randomly sampled
//!   probabilities.

use std::f64::consts::SQRT_2;

use ndarray::{Array, ArrayBase, Data, Dimension};
use statrs::function::erf::{erfc, erfc_inv};

use crate::numeric::errors::{NumError, NumResult};

/// Convert an array of upper-tail probabilities to standard-normal deviates.
///
/// Parameters
/// ----------
/// - `p`: `&ArrayBase<S, D>`
///   Array of probabilities, each in the closed interval [0, 1]. Values are
///   interpreted as upper-tail probabilities P(Z > z).
///
/// Returns
/// -------
/// `NumResult<Array<f64, D>>`
///   - `Ok(z)` with `z.shape() == p.shape()` and each element the unique
///     real deviate satisfying P(Z > z) = p (with p = 0 → +∞ and
///     p = 1 → −∞).
///   - `Err(NumError::InvalidProbability(v))` when any element lies outside
///     [0, 1] or is NaN, with `v` set to the first offending element.
///
/// Errors
/// ------
/// - `NumError::InvalidProbability(v)`
///   An element has no standard-normal deviate; nothing is clamped.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `NumError`.
///
/// Notes
/// -----
/// - The two-branch erfc⁻¹ inversion keeps full precision in *both* tails;
///   the branch point at ½ is exact in either branch, so no seam is
///   observable there.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use voxelstats::numeric::zscore::{sf, z_score};
/// let p = array![0.5_f64, 1e-12, 0.975];
/// let z = z_score(&p).unwrap();
///
/// assert!((z[0]).abs() < 1e-15); // median maps to 0
/// assert!(z[1] > 6.0);           // deep upper tail
/// assert!(z[2] < 0.0);           // p > 1/2 maps below 0
///
/// for (&zi, &pi) in z.iter().zip(p.iter()) {
///     assert!((sf(zi) - pi).abs() <= 1e-6 * pi.max(1e-6));
/// }
/// ```
pub fn z_score<S, D>(p: &ArrayBase<S, D>) -> NumResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let mut out = Array::<f64, D>::zeros(p.raw_dim());
    for (&pi, zi) in p.iter().zip(out.iter_mut()) {
        *zi = z_score_scalar(pi)?;
    }
    Ok(out)
}

/// Convert a single upper-tail probability to its standard-normal deviate.
///
/// Parameters
/// ----------
/// - `p`: `f64`
///   Upper-tail probability in [0, 1].
///
/// Returns
/// -------
/// `NumResult<f64>`
///   - `Ok(z)` with P(Z > z) = p; `Ok(+∞)` for p = 0 and `Ok(−∞)` for
///     p = 1.
///   - `Err(NumError::InvalidProbability(p))` for p outside [0, 1] or NaN.
///
/// Notes
/// -----
/// - This is the scalar kernel behind [`z_score`]; the array entry point
///   only adds traversal.
pub fn z_score_scalar(p: f64) -> NumResult<f64> {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return Err(NumError::InvalidProbability(p));
    }
    if p == 0.0 {
        return Ok(f64::INFINITY);
    }
    if p == 1.0 {
        return Ok(f64::NEG_INFINITY);
    }
    // Invert through whichever tail keeps the erfc⁻¹ argument near 0.
    let z = if p <= 0.5 {
        SQRT_2 * erfc_inv(2.0 * p)
    } else {
        -SQRT_2 * erfc_inv(2.0 * (1.0 - p))
    };
    Ok(z)
}

/// Upper-tail survival function of the standard normal distribution.
///
/// Parameters
/// ----------
/// - `z`: `f64`
///   Standard-normal deviate; ±∞ are accepted and map to 0 and 1.
///
/// Returns
/// -------
/// `f64`
///   P(Z > z) = erfc(z / √2) / 2, accurate in the upper tail where
///   `1 - cdf(z)` would cancel.
///
/// Notes
/// -----
/// - Exact inverse of [`z_score_scalar`] up to floating rounding; the test
///   suite relies on this pairing for the round-trip law.
pub fn sf(z: f64) -> f64 {
    0.5 * erfc(z / SQRT_2)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::numeric::errors::NumError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The boundary policy (p = 0 and p = 1).
    // - Rejection of out-of-range and NaN probabilities.
    // - Round-trip accuracy sf(z_score(p)) ≈ p on a fixed grid spanning
    //   the bulk and both tails, down to p = 1e-300.
    // - Basic symmetry, z(p) = -z(1 - p), away from the tails.
    //
    // They intentionally DO NOT cover:
    // - Randomly sampled probabilities, which are exercised by the
    //   integration suite.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the deterministic boundary policy: p = 0 maps to +∞ and
    // p = 1 maps to −∞.
    //
    // Given
    // -----
    // - The array [0.0, 1.0].
    //
    // Expect
    // ------
    // - `z_score` returns [+∞, −∞].
    fn z_score_boundary_probabilities_map_to_signed_infinity() {
        // Arrange
        let p = array![0.0_f64, 1.0];

        // Act
        let z = z_score(&p).unwrap();

        // Assert
        assert_eq!(z[0], f64::INFINITY);
        assert_eq!(z[1], f64::NEG_INFINITY);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that probabilities outside [0, 1] and NaN are rejected with
    // `InvalidProbability` carrying the offending value.
    //
    // Given
    // -----
    // - The arrays [0.5, -0.1], [0.5, 1.5], and [0.5, NaN].
    //
    // Expect
    // ------
    // - All three fail with `InvalidProbability`.
    fn z_score_out_of_range_probability_returns_invalid_probability() {
        // Arrange
        let below = array![0.5_f64, -0.1];
        let above = array![0.5_f64, 1.5];
        let nan = array![0.5_f64, f64::NAN];

        // Act / Assert
        match z_score(&below) {
            Err(NumError::InvalidProbability(v)) => assert_eq!(v, -0.1),
            other => panic!("expected InvalidProbability error, got {other:?}"),
        }
        match z_score(&above) {
            Err(NumError::InvalidProbability(v)) => assert_eq!(v, 1.5),
            other => panic!("expected InvalidProbability error, got {other:?}"),
        }
        match z_score(&nan) {
            Err(NumError::InvalidProbability(v)) => assert!(v.is_nan()),
            other => panic!("expected InvalidProbability error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the round-trip law sf(z_score(p)) ≈ p across the bulk of the
    // distribution, to at least 6 decimal places in absolute terms.
    //
    // Given
    // -----
    // - A fixed grid of probabilities in [0.001, 0.999].
    //
    // Expect
    // ------
    // - |sf(z) − p| < 1e-9 for every grid point.
    fn z_score_round_trip_holds_in_the_bulk() {
        // Arrange
        let p = array![0.001_f64, 0.01, 0.1, 0.25, 0.5, 0.75, 0.9, 0.99, 0.999];

        // Act
        let z = z_score(&p).unwrap();

        // Assert
        for (&zi, &pi) in z.iter().zip(p.iter()) {
            let back = sf(zi);
            assert!(
                (back - pi).abs() < 1e-9,
                "round trip drifted at p = {pi}: sf(z) = {back}"
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that the extreme upper tail keeps *relative* precision: the
    // regime where corrected p-values live and where a cdf-based inversion
    // would return garbage.
    //
    // Given
    // -----
    // - Probabilities 1e-10, 1e-50, 1e-100, 1e-300.
    //
    // Expect
    // ------
    // - sf(z_score(p)) matches p to within a 1e-6 relative error.
    fn z_score_round_trip_keeps_relative_precision_in_extreme_tail() {
        // Arrange
        let p = array![1e-10_f64, 1e-50, 1e-100, 1e-300];

        // Act
        let z = z_score(&p).unwrap();

        // Assert
        for (&zi, &pi) in z.iter().zip(p.iter()) {
            let back = sf(zi);
            assert!(
                ((back - pi) / pi).abs() < 1e-6,
                "relative round-trip error too large at p = {pi}: sf(z) = {back}"
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the reflection symmetry z(p) = −z(1 − p), which ties the two
    // inversion branches together across the ½ seam.
    //
    // Given
    // -----
    // - Probabilities 0.05, 0.2, 0.4 paired with their complements.
    //
    // Expect
    // ------
    // - z(p) + z(1 − p) vanishes to near machine precision.
    fn z_score_branches_are_reflection_symmetric() {
        // Arrange
        let lower = array![0.05_f64, 0.2, 0.4];
        let upper = array![0.95_f64, 0.8, 0.6];

        // Act
        let z_lo = z_score(&lower).unwrap();
        let z_hi = z_score(&upper).unwrap();

        // Assert
        for (&a, &b) in z_lo.iter().zip(z_hi.iter()) {
            assert!((a + b).abs() < 1e-12, "branches disagree: {a} vs {b}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that the median maps to exactly zero deviate and that the
    // output shape matches a 2-D input.
    //
    // Given
    // -----
    // - The 2×2 array [[0.5, 0.025], [0.975, 0.5]].
    //
    // Expect
    // ------
    // - Shape (2, 2), z[0,0] ≈ 0, z[0,1] ≈ 1.96, z[1,0] ≈ −1.96.
    fn z_score_median_and_familiar_quantiles_are_reproduced() {
        // Arrange
        let p = array![[0.5_f64, 0.025], [0.975, 0.5]];

        // Act
        let z = z_score(&p).unwrap();

        // Assert
        assert_eq!(z.shape(), &[2, 2]);
        assert!(z[[0, 0]].abs() < 1e-15);
        assert!((z[[0, 1]] - 1.959964).abs() < 1e-5);
        assert!((z[[1, 0]] + 1.959964).abs() < 1e-5);
    }
}
