//! numeric::binary — strict binary-array validation and u8 casting.
//!
//! Purpose
//! -------
//! Validate that every element of a numeric array represents exactly 0 or 1
//! and produce a compact unsigned-byte array of the same shape. Downstream
//! statistical-mapping code treats indicator arrays as hard binary masks; a
//! silent truncation (e.g. casting 2 to `u8` modulo 256) would corrupt
//! results without warning, so anything outside {0, 1} is rejected.
//!
//! Key behaviors
//! -------------
//! - Accept any integer or floating element type through the
//!   [`Bin8Element`] trait, which encodes the family-specific validation
//!   rules (the floating family additionally tolerates signed zero).
//! - Return a `u8` array with identical shape and values on success.
//! - Fail with [`NumError::NonBinaryValue`] on the first offending element;
//!   never clip, round, or coerce.
//!
//! Invariants & assumptions
//! ------------------------
//! - Integer elements are valid iff they equal 0 or 1 exactly.
//! - Floating elements are valid iff they compare equal to 0.0 (which
//!   includes `-0.0` under IEEE 754 comparison) or to 1.0. Any fractional,
//!   negative, NaN, or infinite value is a domain violation.
//! - The output array has the same shape as the input; element order is
//!   preserved.
//!
//! Conventions
//! -----------
//! - The family split is expressed as one polymorphic entry point over a
//!   trait rather than duck-typed dispatch: each element type declares its
//!   own membership test via [`Bin8Element::as_bin8`].
//! - Error payloads widen the offending element to `f64` so a single error
//!   variant covers every element type.
//!
//! Downstream usage
//! ----------------
//! - Call [`check_cast_bin8`] on mask/indicator arrays before using them as
//!   binary weights, e.g. `let mask = check_cast_bin8(&labels)?;`.
//! - The Python bindings expose this routine for NumPy integer and floating
//!   arrays of any dimensionality.
//!
//! Testing notes
//! -------------
//! - Unit tests here cover the per-family accept/reject rules, including
//!   signed zero, and shape preservation for 2-D inputs.
//! - The integration suite runs the full accept/reject grid across all
//!   supported element types.

use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::numeric::errors::{NumError, NumResult};

/// Bin8Element — membership test for the binary domain {0, 1}.
///
/// Purpose
/// -------
/// Encode, per numeric element type, whether a value is a valid binary
/// element and what its `u8` representation is. This is the seam through
/// which [`check_cast_bin8`] stays polymorphic over integer and floating
/// families while keeping their validation rules distinct.
///
/// Key behaviors
/// -------------
/// - `as_bin8` returns `Some(0)` or `Some(1)` for valid elements and `None`
///   for anything else.
/// - `as_f64` widens the element for error reporting; it is only called on
///   rejected values.
///
/// Invariants
/// ----------
/// - Integer implementations accept exactly the values 0 and 1.
/// - Floating implementations accept exactly 0.0 and 1.0 under IEEE 754
///   equality, so `-0.0` is accepted and maps to 0, while NaN (which
///   compares unequal to everything) is rejected.
///
/// Notes
/// -----
/// - Implemented for `i8`–`i64`, `isize`, `u8`–`u64`, `usize`, `f32`, and
///   `f64`. Adding a new element type only requires implementing this
///   trait; `check_cast_bin8` picks it up unchanged.
pub trait Bin8Element: Copy {
    /// `Some(0 | 1)` when the value is a valid binary element, else `None`.
    fn as_bin8(self) -> Option<u8>;

    /// The value widened to `f64`, used for error payloads.
    fn as_f64(self) -> f64;
}

macro_rules! impl_bin8_for_int {
    ($($t:ty),*) => {$(
        impl Bin8Element for $t {
            #[inline]
            fn as_bin8(self) -> Option<u8> {
                match self {
                    0 => Some(0),
                    1 => Some(1),
                    _ => None,
                }
            }

            #[inline]
            fn as_f64(self) -> f64 {
                self as f64
            }
        }
    )*};
}

macro_rules! impl_bin8_for_float {
    ($($t:ty),*) => {$(
        impl Bin8Element for $t {
            #[inline]
            fn as_bin8(self) -> Option<u8> {
                // IEEE 754 equality: -0.0 == 0.0, NaN != NaN.
                if self == 0.0 {
                    Some(0)
                } else if self == 1.0 {
                    Some(1)
                } else {
                    None
                }
            }

            #[inline]
            fn as_f64(self) -> f64 {
                self as f64
            }
        }
    )*};
}

impl_bin8_for_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_bin8_for_float!(f32, f64);

/// Validate a numeric array as binary and cast it to `u8`.
///
/// Parameters
/// ----------
/// - `data`: `&ArrayBase<S, D>`
///   Array of any dimensionality whose elements implement [`Bin8Element`].
///   Every element must represent exactly 0 or 1 (floating inputs may use
///   `-0.0` for 0).
///
/// Returns
/// -------
/// `NumResult<Array<u8, D>>`
///   - `Ok(out)` with `out.shape() == data.shape()` and each element equal
///     to the `u8` representation of the corresponding input element.
///   - `Err(NumError::NonBinaryValue(v))` when any element represents a
///     value other than 0 or 1, with `v` set to the first offending
///     element widened to `f64`.
///
/// Errors
/// ------
/// - `NumError::NonBinaryValue(v)`
///   Returned on the first element outside {0, 1}: any other integer, any
///   fractional or genuinely negative floating value, NaN, or ±∞.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `NumError`.
///
/// Notes
/// -----
/// - The transform is purely functional; the input is not modified.
/// - Validation and casting happen in one pass, so the cost is a single
///   traversal of the input regardless of outcome.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use voxelstats::numeric::binary::check_cast_bin8;
/// # use voxelstats::numeric::errors::NumError;
/// let mask = array![[0.0_f64, 1.0], [1.0, -0.0]];
/// let bin = check_cast_bin8(&mask).unwrap();
/// assert_eq!(bin, array![[0_u8, 1], [1, 0]]);
///
/// // A fractional value is a domain violation, not a rounding candidate:
/// match check_cast_bin8(&array![0.0_f64, 0.1, 1.0]) {
///     Err(NumError::NonBinaryValue(_)) => (),
///     other => panic!("expected NonBinaryValue error, got {other:?}"),
/// }
/// ```
pub fn check_cast_bin8<T, S, D>(data: &ArrayBase<S, D>) -> NumResult<Array<u8, D>>
where
    T: Bin8Element,
    S: Data<Elem = T>,
    D: Dimension,
{
    let mut out = Array::<u8, D>::zeros(data.raw_dim());
    for (src, dst) in data.iter().zip(out.iter_mut()) {
        match src.as_bin8() {
            Some(bit) => *dst = bit,
            None => return Err(NumError::NonBinaryValue(src.as_f64())),
        }
    }
    Ok(out)
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
    // - Acceptance of {0, 1} arrays for representative integer, unsigned,
    //   and floating element types, including `-0.0`.
    // - Rejection of out-of-range integers, fractional floats, genuinely
    //   negative floats, and NaN.
    // - Shape preservation for 2-D inputs.
    //
    // They intentionally DO NOT cover:
    // - The exhaustive element-type grid, which lives in the integration
    //   suite.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a signed-integer {0, 1} array casts to an identical u8
    // array.
    //
    // Given
    // -----
    // - The i32 array [0, 1, 1, 1].
    //
    // Expect
    // ------
    // - `check_cast_bin8` returns [0, 1, 1, 1] as u8.
    fn check_cast_bin8_integer_binary_array_casts_unchanged() {
        // Arrange
        let data = array![0_i32, 1, 1, 1];

        // Act
        let result = check_cast_bin8(&data);

        // Assert
        assert_eq!(result, Ok(array![0_u8, 1, 1, 1]));
    }

    #[test]
    // Purpose
    // -------
    // Verify that a floating array using -0.0 for zero is accepted and
    // that -0.0 maps to 0.
    //
    // Given
    // -----
    // - The f64 array [0.0, 1.0, 1.0, -0.0].
    //
    // Expect
    // ------
    // - `check_cast_bin8` returns [0, 1, 1, 0] as u8.
    fn check_cast_bin8_signed_zero_maps_to_zero() {
        // Arrange
        let data = array![0.0_f64, 1.0, 1.0, -0.0];

        // Act
        let result = check_cast_bin8(&data);

        // Assert
        assert_eq!(result, Ok(array![0_u8, 1, 1, 0]));
    }

    #[test]
    // Purpose
    // -------
    // Verify that 2-D inputs keep their shape through the cast.
    //
    // Given
    // -----
    // - The u16 array [[0, 1], [1, 1]].
    //
    // Expect
    // ------
    // - `check_cast_bin8` returns [[0, 1], [1, 1]] as u8, shape (2, 2).
    fn check_cast_bin8_two_dimensional_input_preserves_shape() {
        // Arrange
        let data = array![[0_u16, 1], [1, 1]];

        // Act
        let result = check_cast_bin8(&data).unwrap();

        // Assert
        assert_eq!(result.shape(), &[2, 2]);
        assert_eq!(result, array![[0_u8, 1], [1, 1]]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that an integer value of 2 is rejected rather than truncated
    // to fit in u8.
    //
    // Given
    // -----
    // - The i64 array [0, 1, 2].
    //
    // Expect
    // ------
    // - `check_cast_bin8` returns `Err(NonBinaryValue(2.0))`.
    fn check_cast_bin8_out_of_range_integer_returns_non_binary_value() {
        // Arrange
        let data = array![0_i64, 1, 2];

        // Act
        let result = check_cast_bin8(&data);

        // Assert
        match result {
            Err(NumError::NonBinaryValue(v)) => assert_eq!(v, 2.0),
            other => panic!("expected NonBinaryValue error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure that fractional and genuinely negative floating values are
    // rejected with the offending value as payload.
    //
    // Given
    // -----
    // - The f64 arrays [0.0, 0.1, 1.0] and [0.0, -1.0, 1.0].
    //
    // Expect
    // ------
    // - Both fail with `NonBinaryValue` carrying 0.1 and -1.0 respectively.
    fn check_cast_bin8_fractional_and_negative_floats_return_non_binary_value() {
        // Arrange
        let fractional = array![0.0_f64, 0.1, 1.0];
        let negative = array![0.0_f64, -1.0, 1.0];

        // Act / Assert
        match check_cast_bin8(&fractional) {
            Err(NumError::NonBinaryValue(v)) => assert_eq!(v, 0.1),
            other => panic!("expected NonBinaryValue error, got {other:?}"),
        }
        match check_cast_bin8(&negative) {
            Err(NumError::NonBinaryValue(v)) => assert_eq!(v, -1.0),
            other => panic!("expected NonBinaryValue error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure that NaN is rejected: it compares unequal to both 0.0 and
    // 1.0 and must not slip through as a mask value.
    //
    // Given
    // -----
    // - The f64 array [0.0, NaN, 1.0].
    //
    // Expect
    // ------
    // - `check_cast_bin8` returns `Err(NonBinaryValue(v))` with `v` NaN.
    fn check_cast_bin8_nan_returns_non_binary_value() {
        // Arrange
        let data = array![0.0_f64, f64::NAN, 1.0];

        // Act
        let result = check_cast_bin8(&data);

        // Assert
        match result {
            Err(NumError::NonBinaryValue(v)) => assert!(v.is_nan()),
            other => panic!("expected NonBinaryValue error, got {other:?}"),
        }
    }
}
