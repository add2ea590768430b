//! Acceptance-interval engine for GPU floating-point conformance testing.
//!
//! Given a floating-point operation and an accuracy contract (correctly
//! rounded, N-ULP, or absolute error), this crate computes the closed interval
//! of results a conformant implementation is allowed to produce for given
//! inputs. Hardware is permitted to round intermediates in more than one
//! valid way and to flush subnormals to zero at any step, so each operation is
//! evaluated over every admissible rounding/flush combination of its input
//! domain and the results are spanned.
//!
//! The layers, leaves first:
//! - [`interval`]: the [`FpInterval`] value type and the universal `ANY`
//!   sentinel meaning "no defined accuracy, accept anything".
//! - [`vector`]: fixed-arity (2-4) interval vectors and matrices.
//! - [`ops`]: generic drivers that turn an operation descriptor into an
//!   acceptance interval, handling candidate expansion, extrema narrowing and
//!   the collapse to `ANY`.
//! - [`builtins`]: the three error-bound primitives and the scalar operation
//!   library.
//! - [`geometry`]: vector/matrix operations and the pack/unpack data
//!   reinterpretations.
//!
//! A test harness feeds the value actually produced by a shader execution
//! into [`FpInterval::contains`]; `false` is a test failure. The engine is
//! pure and deterministic, so concurrent callers need no synchronization.

pub mod builtins;
pub mod geometry;
pub mod interval;
pub mod ops;
pub mod vector;

pub use interval::FpInterval;
pub use vector::{FpMatrix, FpVector, IntoFpMatrix, IntoFpVector};
