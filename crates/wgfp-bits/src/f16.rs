//! Primitives targeting the IEEE 754 binary16 layout, via [`half::f16`].

use half::f16;

use crate::{Direction, FlushMode};

/// Largest finite binary16 value.
pub const POSITIVE_MAX: f64 = 65504.0;
/// Second-largest finite binary16 value.
pub const POSITIVE_NEAREST_MAX: f64 = 65472.0;
/// Smallest positive normal binary16 value (2^-14).
pub const POSITIVE_MIN: f64 = 6.103515625e-5;
/// Largest negative normal binary16 value.
pub const NEGATIVE_MAX: f64 = -6.103515625e-5;
/// Most negative finite binary16 value.
pub const NEGATIVE_MIN: f64 = -65504.0;
/// Second-most-negative finite binary16 value.
pub const NEGATIVE_NEAREST_MIN: f64 = -65472.0;

/// Smallest positive subnormal binary16 value (2^-24).
pub const SUBNORMAL_POSITIVE_MIN: f64 = 5.9604644775390625e-8;
/// Largest positive subnormal binary16 value.
pub const SUBNORMAL_POSITIVE_MAX: f64 = 6.0975551605224609375e-5;
/// Most negative subnormal binary16 value.
pub const SUBNORMAL_NEGATIVE_MIN: f64 = -6.0975551605224609375e-5;
/// Negative subnormal closest to zero.
pub const SUBNORMAL_NEGATIVE_MAX: f64 = -5.9604644775390625e-8;

/// Whether `n` lies within the binary16 finite range.
#[inline]
pub fn is_finite(n: f64) -> bool {
    n >= NEGATIVE_MIN && n <= POSITIVE_MAX
}

/// Whether `n` lies in the open binary16 subnormal range, ±0 included.
#[inline]
pub fn is_subnormal(n: f64) -> bool {
    n > NEGATIVE_MAX && n < POSITIVE_MIN
}

/// Flush-to-zero projection at binary16 width.
#[inline]
pub fn flush_subnormal(n: f64) -> f64 {
    if is_subnormal(n) {
        0.0
    } else {
        n
    }
}

/// Round-to-nearest-even at binary16 width. Overflow saturates to ±inf.
#[inline]
pub fn quantize(n: f64) -> f64 {
    f16::from_f64(n).to_f64()
}

/// Appends 0 to a candidate set when some candidate is a nonzero binary16
/// subnormal.
pub fn add_flushed_if_needed(mut values: Vec<f64>) -> Vec<f64> {
    let subnormals: Vec<f64> = values.iter().copied().filter(|&v| is_subnormal(v)).collect();
    if !subnormals.is_empty() && subnormals.iter().all(|&v| v != 0.0) {
        values.push(0.0);
    }
    values
}

/// The next representable binary16 value after `val` in direction `dir`.
/// Same contract as the binary32 version.
pub fn next_after(val: f64, dir: Direction, flush: FlushMode) -> f64 {
    assert!(!val.is_nan(), "next_after is not defined for NaN");
    if val == f64::INFINITY {
        return f64::INFINITY;
    }
    if val == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    assert!(
        (NEGATIVE_MIN..=POSITIVE_MAX).contains(&val),
        "{val} is outside the binary16 finite range"
    );

    let val = match flush {
        FlushMode::Flushed => flush_subnormal(val),
        FlushMode::Retained => val,
    };

    if val == 0.0 {
        return match (dir, flush) {
            (Direction::Up, FlushMode::Flushed) => POSITIVE_MIN,
            (Direction::Up, FlushMode::Retained) => SUBNORMAL_POSITIVE_MIN,
            (Direction::Down, FlushMode::Flushed) => NEGATIVE_MAX,
            (Direction::Down, FlushMode::Retained) => SUBNORMAL_NEGATIVE_MAX,
        };
    }

    let converted = f16::from_f64(val);
    let conv64 = converted.to_f64();
    let bits = if val == conv64 {
        let b = converted.to_bits();
        let is_positive = b & 0x8000 == 0;
        if (dir == Direction::Up) == is_positive {
            b + 1
        } else {
            b - 1
        }
    } else if (dir == Direction::Up) == (conv64 > val) {
        converted.to_bits()
    } else {
        // Rounding moved the other way; step from the representable value.
        return next_after(conv64, dir, flush);
    };

    if bits & 0x7c00 == 0x7c00 {
        return match dir {
            Direction::Up => f64::INFINITY,
            Direction::Down => f64::NEG_INFINITY,
        };
    }
    let result = f16::from_bits(bits).to_f64();
    match flush {
        FlushMode::Flushed => flush_subnormal(result),
        FlushMode::Retained => result,
    }
}

/// ULP magnitude at `target` under one flushing mode, binary16 width.
pub fn one_ulp_mode(target: f64, flush: FlushMode) -> f64 {
    assert!(!target.is_nan(), "one_ulp is not defined for NaN");
    let target = match flush {
        FlushMode::Flushed => flush_subnormal(target),
        FlushMode::Retained => target,
    };

    if target == f64::INFINITY || target >= POSITIVE_MAX {
        return POSITIVE_MAX - POSITIVE_NEAREST_MAX;
    }
    if target == f64::NEG_INFINITY || target <= NEGATIVE_MIN {
        return POSITIVE_MAX - POSITIVE_NEAREST_MAX;
    }

    let before = next_after(target, Direction::Down, flush);
    let after = next_after(target, Direction::Up, flush);
    let converted = f16::from_f64(target).to_f64();
    if target == converted {
        f64::min(target - before, after - target)
    } else {
        after - before
    }
}

/// ULP magnitude at `target`, the max over both flushing modes.
#[inline]
pub fn one_ulp(target: f64) -> f64 {
    f64::max(
        one_ulp_mode(target, FlushMode::Flushed),
        one_ulp_mode(target, FlushMode::Retained),
    )
}

/// The correctly-rounded binary16 candidate set of `n`, ascending.
pub fn correctly_rounded(n: f64) -> Vec<f64> {
    assert!(!n.is_nan(), "correctly_rounded is not defined for NaN");
    if n == f64::INFINITY || n > POSITIVE_MAX {
        return vec![POSITIVE_MAX, f64::INFINITY];
    }
    if n == f64::NEG_INFINITY || n < NEGATIVE_MIN {
        return vec![f64::NEG_INFINITY, NEGATIVE_MIN];
    }

    let converted = f16::from_f64(n).to_f64();
    if n == converted {
        return vec![n];
    }

    if converted > n {
        vec![next_after(converted, Direction::Down, FlushMode::Retained), converted]
    } else {
        vec![converted, next_after(converted, Direction::Up, FlushMode::Retained)]
    }
}
