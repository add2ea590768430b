//! Primitives targeting the IEEE 754 binary32 layout.

use crate::{Direction, FlushMode};

/// Largest finite binary32 value.
pub const POSITIVE_MAX: f64 = f32::MAX as f64;
/// Second-largest finite binary32 value.
pub const POSITIVE_NEAREST_MAX: f64 = f32::from_bits(0x7f7f_fffe) as f64;
/// Smallest positive normal binary32 value.
pub const POSITIVE_MIN: f64 = f32::MIN_POSITIVE as f64;
/// Largest negative normal binary32 value.
pub const NEGATIVE_MAX: f64 = -(f32::MIN_POSITIVE as f64);
/// Most negative finite binary32 value.
pub const NEGATIVE_MIN: f64 = f32::MIN as f64;
/// Second-most-negative finite binary32 value.
pub const NEGATIVE_NEAREST_MIN: f64 = f32::from_bits(0xff7f_fffe) as f64;

/// Smallest positive subnormal binary32 value.
pub const SUBNORMAL_POSITIVE_MIN: f64 = f32::from_bits(0x0000_0001) as f64;
/// Largest positive subnormal binary32 value.
pub const SUBNORMAL_POSITIVE_MAX: f64 = f32::from_bits(0x007f_ffff) as f64;
/// Most negative subnormal binary32 value.
pub const SUBNORMAL_NEGATIVE_MIN: f64 = f32::from_bits(0x807f_ffff) as f64;
/// Negative subnormal closest to zero.
pub const SUBNORMAL_NEGATIVE_MAX: f64 = f32::from_bits(0x8000_0001) as f64;

/// Largest binary32 value strictly below 1.0.
pub const LESS_THAN_ONE: f64 = f32::from_bits(0x3f7f_ffff) as f64;

/// Binary32 roundings of pi and its common fractions.
pub const PI: f64 = std::f64::consts::PI as f32 as f64;
pub const PI_THREE_QUARTERS: f64 = (0.75 * std::f64::consts::PI) as f32 as f64;
pub const PI_HALF: f64 = std::f64::consts::FRAC_PI_2 as f32 as f64;
pub const PI_THIRD: f64 = std::f64::consts::FRAC_PI_3 as f32 as f64;
pub const PI_QUARTER: f64 = std::f64::consts::FRAC_PI_4 as f32 as f64;
pub const PI_SIXTH: f64 = std::f64::consts::FRAC_PI_6 as f32 as f64;
pub const NEGATIVE_PI: f64 = -PI;

/// Binary32 rounding of Euler's number.
pub const E: f64 = std::f64::consts::E as f32 as f64;

/// Whether `n` lies within the binary32 finite range.
#[inline]
pub fn is_finite(n: f64) -> bool {
    n >= NEGATIVE_MIN && n <= POSITIVE_MAX
}

/// Whether `n` lies in the open subnormal range. This deliberately includes
/// ±0: flush-to-zero treats zero as already flushed, and the min/max
/// both-subnormal rule depends on the same classification.
#[inline]
pub fn is_subnormal(n: f64) -> bool {
    n > NEGATIVE_MAX && n < POSITIVE_MIN
}

/// Flush-to-zero projection: subnormals (and ±0) map to +0, everything else
/// is unchanged.
#[inline]
pub fn flush_subnormal(n: f64) -> f64 {
    if is_subnormal(n) {
        0.0
    } else {
        n
    }
}

/// Round-to-nearest-even at binary32 width. Overflow saturates to ±inf.
#[inline]
pub fn quantize(n: f64) -> f64 {
    n as f32 as f64
}

/// Appends 0 to a correctly-rounded candidate set when some candidate is a
/// nonzero subnormal, modeling an implementation that flushes before
/// consuming the value. No-op when 0 is already a candidate.
pub fn add_flushed_if_needed(mut values: Vec<f64>) -> Vec<f64> {
    let subnormals: Vec<f64> = values.iter().copied().filter(|&v| is_subnormal(v)).collect();
    if !subnormals.is_empty() && subnormals.iter().all(|&v| v != 0.0) {
        values.push(0.0);
    }
    values
}

/// The next representable binary32 value after `val` in direction `dir`.
///
/// ±inf are fixed points. In [`FlushMode::Flushed`] the input and result are
/// flushed to zero when subnormal, so stepping from 0 lands on the smallest
/// normal; in [`FlushMode::Retained`] it lands on the smallest subnormal.
/// `val` must be non-NaN and within the binary32 finite range.
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
        "{val} is outside the binary32 finite range"
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

    let converted = val as f32;
    let bits = if val == converted as f64 {
        // Representable: step one ulp in the requested direction.
        let b = converted.to_bits();
        let is_positive = b & 0x8000_0000 == 0;
        if (dir == Direction::Up) == is_positive {
            b + 1
        } else {
            b - 1
        }
    } else if (dir == Direction::Up) == (converted as f64 > val) {
        // Rounding already moved in the requested direction.
        converted.to_bits()
    } else {
        // Rounding moved the other way; step from the representable value.
        // Does not recurse further since `converted` is exact.
        return next_after(converted as f64, dir, flush);
    };

    if bits & 0x7f80_0000 == 0x7f80_0000 {
        return match dir {
            Direction::Up => f64::INFINITY,
            Direction::Down => f64::NEG_INFINITY,
        };
    }
    let result = f32::from_bits(bits) as f64;
    match flush {
        FlushMode::Flushed => flush_subnormal(result),
        FlushMode::Retained => result,
    }
}

/// ULP magnitude at `target` under one flushing mode. At or beyond the finite
/// extremes this is the gap between the two outermost finite values.
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
    let converted = target as f32 as f64;
    if target == converted {
        // Representable: take the smaller of the two adjacent gaps.
        f64::min(target - before, after - target)
    } else {
        after - before
    }
}

/// ULP magnitude at `target`, the max over both flushing modes. This is the
/// value N-ULP error bounds scale.
#[inline]
pub fn one_ulp(target: f64) -> f64 {
    f64::max(
        one_ulp_mode(target, FlushMode::Flushed),
        one_ulp_mode(target, FlushMode::Retained),
    )
}

/// The correctly-rounded binary32 candidate set of the real number `n`, in
/// ascending order: one value when `n` is exactly representable, the two
/// bracketing representables otherwise. Values beyond the finite range yield
/// a half-open escape to the matching infinity.
pub fn correctly_rounded(n: f64) -> Vec<f64> {
    assert!(!n.is_nan(), "correctly_rounded is not defined for NaN");
    if n == f64::INFINITY || n > POSITIVE_MAX {
        return vec![POSITIVE_MAX, f64::INFINITY];
    }
    if n == f64::NEG_INFINITY || n < NEGATIVE_MIN {
        return vec![f64::NEG_INFINITY, NEGATIVE_MIN];
    }

    let converted = n as f32 as f64;
    if n == converted {
        return vec![n];
    }

    if converted > n {
        vec![next_after(converted, Direction::Down, FlushMode::Retained), converted]
    } else {
        vec![converted, next_after(converted, Direction::Up, FlushMode::Retained)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_match_bit_patterns() {
        assert_eq!(POSITIVE_MAX, 3.4028234663852886e38);
        assert_eq!(POSITIVE_MIN, 1.1754943508222875e-38);
        assert_eq!(SUBNORMAL_POSITIVE_MIN, 1.401298464324817e-45);
        assert!(LESS_THAN_ONE < 1.0);
        assert_eq!(quantize(LESS_THAN_ONE), LESS_THAN_ONE);
        assert_eq!(quantize(PI), PI);
        assert!(PI < std::f64::consts::PI);
    }

    #[test]
    fn test_is_subnormal_includes_zero() {
        assert!(is_subnormal(0.0));
        assert!(is_subnormal(-0.0));
        assert!(is_subnormal(SUBNORMAL_POSITIVE_MAX));
        assert!(is_subnormal(SUBNORMAL_NEGATIVE_MIN));
        assert!(!is_subnormal(POSITIVE_MIN));
        assert!(!is_subnormal(NEGATIVE_MAX));
        assert!(!is_subnormal(f64::NAN));
    }

    #[test]
    fn test_flush_subnormal() {
        assert_eq!(flush_subnormal(SUBNORMAL_POSITIVE_MIN), 0.0);
        assert_eq!(flush_subnormal(SUBNORMAL_NEGATIVE_MAX), 0.0);
        assert_eq!(flush_subnormal(1.5), 1.5);
        assert_eq!(flush_subnormal(POSITIVE_MIN), POSITIVE_MIN);
    }

    #[test]
    fn test_add_flushed_appends_zero_for_nonzero_subnormal() {
        let out = add_flushed_if_needed(vec![SUBNORMAL_POSITIVE_MIN]);
        assert_eq!(out, vec![SUBNORMAL_POSITIVE_MIN, 0.0]);
    }

    #[test]
    fn test_add_flushed_skips_when_zero_present() {
        let out = add_flushed_if_needed(vec![0.0, SUBNORMAL_POSITIVE_MIN]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_add_flushed_no_subnormals() {
        let out = add_flushed_if_needed(vec![1.0, 2.0]);
        assert_eq!(out, vec![1.0, 2.0]);
    }

    #[test]
    fn test_next_after_from_zero() {
        assert_eq!(
            next_after(0.0, Direction::Up, FlushMode::Retained),
            SUBNORMAL_POSITIVE_MIN
        );
        assert_eq!(next_after(0.0, Direction::Up, FlushMode::Flushed), POSITIVE_MIN);
        assert_eq!(
            next_after(0.0, Direction::Down, FlushMode::Retained),
            SUBNORMAL_NEGATIVE_MAX
        );
        assert_eq!(next_after(0.0, Direction::Down, FlushMode::Flushed), NEGATIVE_MAX);
    }

    #[test]
    fn test_next_after_representable_steps_one_ulp() {
        let up = next_after(1.0, Direction::Up, FlushMode::Retained);
        assert_eq!(up, f32::from_bits(1.0f32.to_bits() + 1) as f64);
        let down = next_after(1.0, Direction::Down, FlushMode::Retained);
        assert_eq!(down, f32::from_bits(1.0f32.to_bits() - 1) as f64);
    }

    #[test]
    fn test_next_after_overflows_to_infinity() {
        assert_eq!(
            next_after(POSITIVE_MAX, Direction::Up, FlushMode::Retained),
            f64::INFINITY
        );
        assert_eq!(
            next_after(NEGATIVE_MIN, Direction::Down, FlushMode::Retained),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_next_after_unrepresentable_value() {
        // 0.1 is not representable; the two neighbors bracket it.
        let up = next_after(0.1, Direction::Up, FlushMode::Retained);
        let down = next_after(0.1, Direction::Down, FlushMode::Retained);
        assert!(down < 0.1 && 0.1 < up);
        assert_eq!(quantize(up), up);
        assert_eq!(quantize(down), down);
        assert_eq!(f32::from_bits((down as f32).to_bits() + 1) as f64, up);
    }

    #[test]
    fn test_one_ulp_at_one() {
        // Gap below 1.0 is 2^-24, above is 2^-23; the smaller wins.
        let expected = (2.0f64).powi(-24);
        assert_eq!(one_ulp_mode(1.0, FlushMode::Retained), expected);
        assert_eq!(one_ulp(1.0), expected);
    }

    #[test]
    fn test_one_ulp_at_max_is_top_gap() {
        let top_gap = POSITIVE_MAX - POSITIVE_NEAREST_MAX;
        assert_eq!(one_ulp(POSITIVE_MAX), top_gap);
        assert_eq!(one_ulp(f64::INFINITY), top_gap);
        assert_eq!(one_ulp(f64::NEG_INFINITY), top_gap);
    }

    #[test]
    fn test_one_ulp_subnormal_differs_by_mode() {
        let flushed = one_ulp_mode(SUBNORMAL_POSITIVE_MIN, FlushMode::Flushed);
        let retained = one_ulp_mode(SUBNORMAL_POSITIVE_MIN, FlushMode::Retained);
        // Flushing widens: the flushed ulp spans from 0 to the smallest normal.
        assert_eq!(flushed, POSITIVE_MIN);
        assert!(retained < flushed);
        assert_eq!(one_ulp(SUBNORMAL_POSITIVE_MIN), flushed);
    }

    #[test]
    fn test_correctly_rounded_exact() {
        assert_eq!(correctly_rounded(1.5), vec![1.5]);
        assert_eq!(correctly_rounded(0.0), vec![0.0]);
        assert_eq!(correctly_rounded(POSITIVE_MAX), vec![POSITIVE_MAX]);
    }

    #[test]
    fn test_correctly_rounded_brackets_inexact() {
        let c = correctly_rounded(0.1);
        assert_eq!(c.len(), 2);
        assert!(c[0] < 0.1 && 0.1 < c[1]);
        assert!(c.iter().all(|&v| quantize(v) == v));
    }

    #[test]
    fn test_correctly_rounded_overflow() {
        assert_eq!(correctly_rounded(1e39), vec![POSITIVE_MAX, f64::INFINITY]);
        assert_eq!(correctly_rounded(-1e39), vec![f64::NEG_INFINITY, NEGATIVE_MIN]);
        assert_eq!(correctly_rounded(f64::INFINITY), vec![POSITIVE_MAX, f64::INFINITY]);
    }

    #[test]
    #[should_panic(expected = "NaN")]
    fn test_correctly_rounded_nan_panics() {
        correctly_rounded(f64::NAN);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(2000))]

            /// Candidates bracket the input and are themselves representable.
            #[test]
            fn correctly_rounded_brackets_input(n in -3.4e38f64..3.4e38f64) {
                let c = correctly_rounded(n);
                prop_assert!(!c.is_empty() && c.len() <= 2);
                prop_assert!(c[0] <= n && n <= c[c.len() - 1]);
                prop_assert!(c.iter().all(|&v| quantize(v) == v));
            }

            /// Stepping up then down from a representable value returns to it.
            #[test]
            fn next_after_round_trips(
                v in any::<f32>().prop_filter("finite", |v| v.is_finite())
            ) {
                let v = v as f64;
                let up = next_after(v, Direction::Up, FlushMode::Retained);
                if up.is_finite() {
                    prop_assert_eq!(next_after(up, Direction::Down, FlushMode::Retained), v);
                }
            }

            /// The ULP magnitude is positive and dominated by the flushed mode.
            #[test]
            fn one_ulp_is_positive(n in -3.4e38f64..3.4e38f64) {
                let ulp = one_ulp(n);
                prop_assert!(ulp > 0.0);
                prop_assert!(ulp >= one_ulp_mode(n, FlushMode::Retained));
            }
        }
    }
}
