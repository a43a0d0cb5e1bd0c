//! numeric — batch numerical-statistics primitives.
//!
//! Purpose
//! -------
//! Collect the four numeric primitives consumed by downstream
//! statistical-mapping code, together with their shared validation, error
//! handling, and linear-algebra core: strict binary-array casting, upper-tail
//! probability to z-score conversion, batched matrix inversion, and batched
//! Mahalanobis quadratic-form evaluation.
//!
//! Key behaviors
//! -------------
//! - Expose strict binary validation and casting via
//!   [`check_cast_bin8`](binary::check_cast_bin8), polymorphic over integer
//!   and floating element types through the [`Bin8Element`](binary::Bin8Element)
//!   trait.
//! - Expose tail-accurate probability inversion via
//!   [`z_score`](zscore::z_score) and its inverse [`sf`](zscore::sf).
//! - Expose batch-efficient inversion of `(N, n, n)` stacks via
//!   [`batch_inverse`](inverse::batch_inverse), with a per-index
//!   [`reference_inverse`](inverse::reference_inverse) kept as an independent
//!   verification path.
//! - Expose fused factor-and-solve quadratic forms via
//!   [`mahalanobis`](mahalanobis::mahalanobis) over a shared matrix or a
//!   per-column [`CovarianceStack`](mahalanobis::CovarianceStack).
//! - Centralize shape guards in [`validation`] and failure reporting in
//!   [`errors`] ([`NumError`]/[`NumResult`]), including PyO3 bridges behind
//!   the `python-bindings` feature.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every primitive is a synchronous, pure function over in-memory
//!   `ndarray` values: no shared mutable state, no I/O, no caching. Each is
//!   independently safe to call from multiple threads.
//! - The only ordering contract is positional pairing within a batch:
//!   vector k corresponds to matrix k, and output index k corresponds to
//!   input index k.
//! - Domain violations, shape mismatches, and singular matrices are raised
//!   immediately as [`NumError`] values and never recovered, retried, or
//!   replaced by clamped defaults.
//!
//! Conventions
//! -----------
//! - Matrix stacks for inversion are batch-major `(N, n, n)`; Mahalanobis
//!   vectors are column-packed `(n, K)` with per-column matrices as
//!   `(n, n, K)`.
//! - Probabilities are upper-tail throughout.
//! - Batch entry points hoist all scratch out of their loops; the shared
//!   factor/solve kernel in `lu` is allocation-free.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use voxelstats::numeric::{batch_inverse, check_cast_bin8, mahalanobis, z_score};
//!   use voxelstats::numeric::CovarianceStack;
//!   ```
//!
//! - Python callers reach the same primitives through the `_voxelstats`
//!   extension module when the crate is built with `python-bindings`.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own contract; the
//!   `tests/integration_numeric_pipeline.rs` suite exercises the
//!   round-trip, batch-vs-reference, and pairing properties on seeded
//!   random data.

pub mod binary;
pub mod errors;
pub mod inverse;
pub(crate) mod lu;
pub mod mahalanobis;
pub mod validation;
pub mod zscore;

pub use binary::{Bin8Element, check_cast_bin8};
pub use errors::{NumError, NumResult};
pub use inverse::{batch_inverse, reference_inverse};
pub use mahalanobis::{CovarianceStack, mahalanobis, mahalanobis_single};
pub use zscore::{sf, z_score, z_score_scalar};
