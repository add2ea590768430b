//! Bit-exact floating-point primitives for acceptance-interval computation.
//!
//! Values are carried as `f64` and interpreted against a narrower target
//! width (binary32 or binary16). The per-width modules provide:
//! - finite and subnormal range predicates, and flush-to-zero projection
//! - round-to-nearest-even quantization and representable-neighbor stepping
//! - ULP magnitude at a value, under both subnormal-flushing modes
//! - the correctly-rounded candidate set of a real number
//!
//! Everything here is pure and deterministic. NaN inputs are caller bugs and
//! panic.

pub mod f16;
pub mod f32;

use serde::{Deserialize, Serialize};

/// Direction to step in for `next_after`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

/// Whether subnormal values are flushed to zero before and after an
/// operation. Hardware is permitted either behavior, so ULP bounds take the
/// max over both modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlushMode {
    Flushed,
    Retained,
}
