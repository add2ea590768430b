//! Error-bound constructors and the scalar operation library.
//!
//! Each operation either invokes one of the three accuracy primitives
//! (correctly-rounded, absolute-error, ULP) directly, or composes other
//! operations algebraically so the error bound is inherited from the parts.
//! Operands are accepted as raw numbers or previously computed intervals, so
//! compositions nest without losing conservatism.

use wgfp_bits::f32::{
    flush_subnormal, is_finite, is_subnormal, one_ulp, LESS_THAN_ONE, NEGATIVE_MAX, NEGATIVE_MIN,
    NEGATIVE_PI, PI, POSITIVE_MAX, POSITIVE_MIN, SUBNORMAL_POSITIVE_MIN,
};

use crate::interval::FpInterval;
use crate::ops::{
    limit_scalar_pair_to_interval_domain, limit_scalar_to_interval_domain,
    round_and_flush_scalar_pair_to_interval, run_scalar_pair_to_interval_op,
    run_scalar_to_interval_op, run_scalar_triple_to_interval_op, ScalarPairDomain,
    ScalarPairToIntervalOp, ScalarToIntervalOp, ScalarTripleToIntervalOp,
};

// Fundamental error intervals

pub(crate) fn correctly_rounded_eval(n: f64) -> FpInterval {
    FpInterval::point(n)
}

/// The interval of correctly rounded values around the point.
pub fn correctly_rounded_interval(n: impl Into<FpInterval>) -> FpInterval {
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &correctly_rounded_eval,
            extrema: None,
        },
    )
}

/// `[n - |error_range|, n + |error_range|]`, or the universal interval when
/// the error bound itself is not finite.
pub fn absolute_error_interval(n: f64, error_range: f64) -> FpInterval {
    let error_range = error_range.abs();
    if !is_finite(error_range) {
        return run_scalar_to_interval_op(
            FpInterval::point(n),
            &ScalarToIntervalOp {
                eval: &|_| FpInterval::ANY,
                extrema: None,
            },
        );
    }

    let eval = move |n: f64| FpInterval::new(n - error_range, n + error_range);
    run_scalar_to_interval_op(
        FpInterval::point(n),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// `[n - k * ULP(n), n + k * ULP(n)]` with each bound widened to its
/// flush-to-zero projection, since an implementation may flush a subnormal
/// bound independently. Non-finite `k` yields the universal interval.
pub fn ulp_interval(n: f64, num_ulp: f64) -> FpInterval {
    let num_ulp = num_ulp.abs();
    if !is_finite(num_ulp) {
        return run_scalar_to_interval_op(
            FpInterval::point(n),
            &ScalarToIntervalOp {
                eval: &|_| FpInterval::ANY,
                extrema: None,
            },
        );
    }

    let eval = move |n: f64| {
        let ulp = one_ulp(n);
        let begin = n - num_ulp * ulp;
        let end = n + num_ulp * ulp;
        FpInterval::new(
            f64::min(begin, flush_subnormal(begin)),
            f64::max(end, flush_subnormal(end)),
        )
    };
    run_scalar_to_interval_op(
        FpInterval::point(n),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

// Acceptance intervals

/// Acceptance interval for `abs(n)`.
pub fn abs_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| correctly_rounded_interval(n.abs());
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `acos(n)`, defined on [-1, 1].
pub fn acos_interval(n: impl Into<FpInterval>) -> FpInterval {
    // acos(n) = atan2(sqrt(1.0 - n * n), n), or a polynomial approximation
    // with absolute error.
    let eval = limit_scalar_to_interval_domain(FpInterval::new(-1.0, 1.0), |n: f64| {
        let y = sqrt_interval(subtraction_interval(1.0, multiplication_interval(n, n)));
        atan2_interval(y, n).span_with(absolute_error_interval(n.acos(), 6.77e-5))
    });
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `acosh(x)` via `log(x + sqrt((x + 1.0) * (x - 1.0)))`.
pub fn acosh_alternative_interval(x: impl Into<FpInterval>) -> FpInterval {
    let eval = |x: f64| {
        let inner_value =
            multiplication_interval(addition_interval(x, 1.0), subtraction_interval(x, 1.0));
        log_interval(addition_interval(x, sqrt_interval(inner_value)))
    };
    run_scalar_to_interval_op(
        x.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `acosh(x)` via `log(x + sqrt(x * x - 1.0))`.
pub fn acosh_primary_interval(x: impl Into<FpInterval>) -> FpInterval {
    let eval = |x: f64| {
        let inner_value = subtraction_interval(multiplication_interval(x, x), 1.0);
        log_interval(addition_interval(x, sqrt_interval(inner_value)))
    };
    run_scalar_to_interval_op(
        x.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Both sanctioned algebraic forms of `acosh(x)`; a result matching either is
/// acceptable.
pub fn acosh_intervals(x: impl Into<FpInterval> + Copy) -> [FpInterval; 2] {
    [acosh_alternative_interval(x), acosh_primary_interval(x)]
}

pub(crate) fn addition_eval(x: f64, y: f64) -> FpInterval {
    correctly_rounded_interval(x + y)
}

/// Acceptance interval for `x + y`.
pub fn addition_interval(x: impl Into<FpInterval>, y: impl Into<FpInterval>) -> FpInterval {
    run_scalar_pair_to_interval_op(
        x.into(),
        y.into(),
        &ScalarPairToIntervalOp {
            eval: &addition_eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `asin(n)`, defined on [-1, 1].
pub fn asin_interval(n: impl Into<FpInterval>) -> FpInterval {
    // asin(n) = atan2(n, sqrt(1.0 - n * n)), or a polynomial approximation
    // with absolute error.
    let eval = limit_scalar_to_interval_domain(FpInterval::new(-1.0, 1.0), |n: f64| {
        let x = sqrt_interval(subtraction_interval(1.0, multiplication_interval(n, n)));
        atan2_interval(n, x).span_with(absolute_error_interval(n.asin(), 6.77e-5))
    });
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `asinh(x)` via `log(x + sqrt(x * x + 1.0))`.
pub fn asinh_interval(x: impl Into<FpInterval>) -> FpInterval {
    let eval = |x: f64| {
        let inner_value = addition_interval(multiplication_interval(x, x), 1.0);
        log_interval(addition_interval(x, sqrt_interval(inner_value)))
    };
    run_scalar_to_interval_op(
        x.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `atan(n)`: 4096 ULP.
pub fn atan_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| ulp_interval(n.atan(), 4096.0);
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `atan2(y, x)`, quadrant-corrected and restricted
/// to operands where the accuracy is specified.
pub fn atan2_interval(y: impl Into<FpInterval>, x: impl Into<FpInterval>) -> FpInterval {
    let domain = ScalarPairDomain {
        // First parameter (y) must be finite and normal.
        x: vec![
            FpInterval::new(NEGATIVE_MIN, NEGATIVE_MAX),
            FpInterval::new(POSITIVE_MIN, POSITIVE_MAX),
        ],
        // Second parameter (x) inherits the division domain.
        y: vec![
            FpInterval::new(-(2f64.powi(126)), -(2f64.powi(-126))),
            FpInterval::new(2f64.powi(-126), 2f64.powi(126)),
        ],
    };
    let eval = limit_scalar_pair_to_interval_domain(domain, |y: f64, x: f64| {
        let atan_yx = (y / x).atan();
        if x > 0.0 {
            // x > 0, atan(y/x)
            return ulp_interval(atan_yx, 4096.0);
        }
        if y > 0.0 {
            // x < 0, y > 0, atan(y/x) + π
            return ulp_interval(atan_yx + PI, 4096.0);
        }
        // x < 0, y < 0, atan(y/x) - π
        ulp_interval(atan_yx - PI, 4096.0)
    });
    // The discontinuity and undefined behavior at y/x = 0 dominate the
    // accuracy.
    let extrema = |y: FpInterval, x: FpInterval| -> (FpInterval, FpInterval) {
        if y.contains(0.0) {
            if x.contains(0.0) {
                return (FpInterval::point(0.0), FpInterval::point(0.0));
            }
            return (FpInterval::point(0.0), x);
        }
        (y, x)
    };
    run_scalar_pair_to_interval_op(
        y.into(),
        x.into(),
        &ScalarPairToIntervalOp {
            eval: &eval,
            extrema: Some(&extrema),
        },
    )
}

/// Acceptance interval for `atanh(x)` via `log((1.0 + x) / (1.0 - x)) * 0.5`.
pub fn atanh_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| {
        let numerator = addition_interval(1.0, n);
        let denominator = subtraction_interval(1.0, n);
        let log_value = log_interval(division_interval(numerator, denominator));
        multiplication_interval(log_value, 0.5)
    };
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `ceil(n)`.
pub fn ceil_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| correctly_rounded_interval(n.ceil());
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `clamp(x, y, z)` via `median(x, y, z)`.
pub fn clamp_median_interval(
    x: impl Into<FpInterval>,
    y: impl Into<FpInterval>,
    z: impl Into<FpInterval>,
) -> FpInterval {
    let eval = |x: f64, y: f64, z: f64| {
        let mut values = [x, y, z];
        values.sort_by(f64::total_cmp);
        correctly_rounded_interval(values[1])
    };
    run_scalar_triple_to_interval_op(
        x.into(),
        y.into(),
        z.into(),
        &ScalarTripleToIntervalOp { eval: &eval },
    )
}

pub(crate) fn clamp_min_max_eval(x: f64, low: f64, high: f64) -> FpInterval {
    min_interval(max_interval(x, low), high)
}

/// Acceptance interval for `clamp(x, low, high)` via `min(max(x, low), high)`.
pub fn clamp_min_max_interval(
    x: impl Into<FpInterval>,
    low: impl Into<FpInterval>,
    high: impl Into<FpInterval>,
) -> FpInterval {
    run_scalar_triple_to_interval_op(
        x.into(),
        low.into(),
        high.into(),
        &ScalarTripleToIntervalOp {
            eval: &clamp_min_max_eval,
        },
    )
}

/// Both sanctioned forms of `clamp(x, y, z)`.
pub fn clamp_intervals(
    x: impl Into<FpInterval> + Copy,
    y: impl Into<FpInterval> + Copy,
    z: impl Into<FpInterval> + Copy,
) -> [FpInterval; 2] {
    [clamp_median_interval(x, y, z), clamp_min_max_interval(x, y, z)]
}

/// Acceptance interval for `cos(n)`: absolute error 2^-11 on [-π, π].
pub fn cos_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = limit_scalar_to_interval_domain(FpInterval::new(NEGATIVE_PI, PI), |n: f64| {
        absolute_error_interval(n.cos(), (2f64).powi(-11))
    });
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `cosh(n)` via `(exp(n) + exp(-n)) * 0.5`.
pub fn cosh_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| {
        let minus_n = negation_interval(n);
        multiplication_interval(
            addition_interval(exp_interval(n), exp_interval(minus_n)),
            0.5,
        )
    };
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `degrees(n)`.
pub fn degrees_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| multiplication_interval(n, 57.295779513082322865);
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `x / y`: 2.5 ULP on the specified domain, with the
/// discontinuity at `y = 0` handled by extrema narrowing.
pub fn division_interval(x: impl Into<FpInterval>, y: impl Into<FpInterval>) -> FpInterval {
    let domain = ScalarPairDomain {
        x: vec![FpInterval::new(NEGATIVE_MIN, POSITIVE_MAX)],
        y: vec![
            FpInterval::new(-(2f64.powi(126)), -(2f64.powi(-126))),
            FpInterval::new(2f64.powi(-126), 2f64.powi(126)),
        ],
    };
    let eval = limit_scalar_pair_to_interval_domain(domain, |x: f64, y: f64| {
        if y == 0.0 {
            return FpInterval::ANY;
        }
        ulp_interval(x / y, 2.5)
    });
    let extrema = |x: FpInterval, y: FpInterval| -> (FpInterval, FpInterval) {
        if y.contains(0.0) {
            return (x, FpInterval::point(0.0));
        }
        (x, y)
    };
    run_scalar_pair_to_interval_op(
        x.into(),
        y.into(),
        &ScalarPairToIntervalOp {
            eval: &eval,
            extrema: Some(&extrema),
        },
    )
}

/// Acceptance interval for `exp(n)`: 3 + 2 * |n| ULP.
pub fn exp_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| ulp_interval(n.exp(), 3.0 + 2.0 * n.abs());
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `exp2(n)`: 3 + 2 * |n| ULP.
pub fn exp2_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| ulp_interval(n.exp2(), 3.0 + 2.0 * n.abs());
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `floor(n)`.
pub fn floor_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| correctly_rounded_interval(n.floor());
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `fma(x, y, z)`.
pub fn fma_interval(
    x: impl Into<FpInterval>,
    y: impl Into<FpInterval>,
    z: impl Into<FpInterval>,
) -> FpInterval {
    let eval = |x: f64, y: f64, z: f64| addition_interval(multiplication_interval(x, y), z);
    run_scalar_triple_to_interval_op(
        x.into(),
        y.into(),
        z.into(),
        &ScalarTripleToIntervalOp { eval: &eval },
    )
}

/// Acceptance interval for `fract(n) = n - floor(n)`.
pub fn fract_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| {
        let result = subtraction_interval(n, floor_interval(n));
        if result.contains(1.0) {
            // Catastrophic cancellation on very small negatives can produce a
            // fract of 1.0; some implementations clamp to the next nearest
            // value below one.
            return result.span_with(FpInterval::point(LESS_THAN_ONE));
        }
        result
    };
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `inverseSqrt(n)`: 2 ULP on (0, max].
pub fn inverse_sqrt_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = limit_scalar_to_interval_domain(
        FpInterval::new(SUBNORMAL_POSITIVE_MIN, POSITIVE_MAX),
        |n: f64| ulp_interval(1.0 / n.sqrt(), 2.0),
    );
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `ldexp(e1, e2) = e1 * 2^e2`, correctly rounded.
///
/// Evaluated through rounding/flushing only: overflow here escapes to a
/// half-open interval rather than collapsing to the universal interval.
pub fn ldexp_interval(e1: f64, e2: f64) -> FpInterval {
    let domain = ScalarPairDomain {
        x: vec![FpInterval::new(NEGATIVE_MIN, POSITIVE_MAX)],
        y: vec![FpInterval::new(-126.0, 128.0)],
    };
    let eval = limit_scalar_pair_to_interval_domain(domain, |e1: f64, e2: f64| {
        let result = e1 * e2.exp2();
        if result.is_nan() {
            return FpInterval::ANY;
        }
        correctly_rounded_interval(result)
    });
    round_and_flush_scalar_pair_to_interval(
        e1,
        e2,
        &ScalarPairToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `length(n)` over a scalar, via `sqrt(n * n)`.
pub fn length_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| sqrt_interval(multiplication_interval(n, n));
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `distance(x, y)` over scalars, via `length(x - y)`.
pub fn distance_interval(x: impl Into<FpInterval>, y: impl Into<FpInterval>) -> FpInterval {
    let eval = |x: f64, y: f64| length_interval(subtraction_interval(x, y));
    run_scalar_pair_to_interval_op(
        x.into(),
        y.into(),
        &ScalarPairToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `log(n)`: absolute error 2^-21 on [0.5, 2],
/// otherwise 3 ULP, defined for n > 0.
pub fn log_interval(x: impl Into<FpInterval>) -> FpInterval {
    let eval = limit_scalar_to_interval_domain(
        FpInterval::new(SUBNORMAL_POSITIVE_MIN, POSITIVE_MAX),
        |n: f64| {
            if (0.5..=2.0).contains(&n) {
                return absolute_error_interval(n.ln(), (2f64).powi(-21));
            }
            ulp_interval(n.ln(), 3.0)
        },
    );
    run_scalar_to_interval_op(
        x.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `log2(n)`, same contract as `log`.
pub fn log2_interval(x: impl Into<FpInterval>) -> FpInterval {
    let eval = limit_scalar_to_interval_domain(
        FpInterval::new(SUBNORMAL_POSITIVE_MIN, POSITIVE_MAX),
        |n: f64| {
            if (0.5..=2.0).contains(&n) {
                return absolute_error_interval(n.log2(), (2f64).powi(-21));
            }
            ulp_interval(n.log2(), 3.0)
        },
    );
    run_scalar_to_interval_op(
        x.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `max(x, y)`. When both inputs are subnormal,
/// either input is an acceptable result.
pub fn max_interval(x: impl Into<FpInterval>, y: impl Into<FpInterval>) -> FpInterval {
    let eval = |x: f64, y: f64| {
        if is_subnormal(x) && is_subnormal(y) {
            return correctly_rounded_interval(FpInterval::point(x).span_with(FpInterval::point(y)));
        }
        correctly_rounded_interval(x.max(y))
    };
    run_scalar_pair_to_interval_op(
        x.into(),
        y.into(),
        &ScalarPairToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `min(x, y)`. When both inputs are subnormal,
/// either input is an acceptable result.
pub fn min_interval(x: impl Into<FpInterval>, y: impl Into<FpInterval>) -> FpInterval {
    let eval = |x: f64, y: f64| {
        if is_subnormal(x) && is_subnormal(y) {
            return correctly_rounded_interval(FpInterval::point(x).span_with(FpInterval::point(y)));
        }
        correctly_rounded_interval(x.min(y))
    };
    run_scalar_pair_to_interval_op(
        x.into(),
        y.into(),
        &ScalarPairToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `mix(x, y, z)` via `x + (y - x) * z`.
pub fn mix_imprecise_interval(
    x: impl Into<FpInterval>,
    y: impl Into<FpInterval>,
    z: impl Into<FpInterval>,
) -> FpInterval {
    let eval = |x: f64, y: f64, z: f64| {
        let t = multiplication_interval(subtraction_interval(y, x), z);
        addition_interval(x, t)
    };
    run_scalar_triple_to_interval_op(
        x.into(),
        y.into(),
        z.into(),
        &ScalarTripleToIntervalOp { eval: &eval },
    )
}

/// Acceptance interval for `mix(x, y, z)` via `x * (1.0 - z) + y * z`.
pub fn mix_precise_interval(
    x: impl Into<FpInterval>,
    y: impl Into<FpInterval>,
    z: impl Into<FpInterval>,
) -> FpInterval {
    let eval = |x: f64, y: f64, z: f64| {
        let t = multiplication_interval(x, subtraction_interval(1.0, z));
        let s = multiplication_interval(y, z);
        addition_interval(t, s)
    };
    run_scalar_triple_to_interval_op(
        x.into(),
        y.into(),
        z.into(),
        &ScalarTripleToIntervalOp { eval: &eval },
    )
}

/// Both sanctioned forms of `mix(x, y, z)`.
pub fn mix_intervals(
    x: impl Into<FpInterval> + Copy,
    y: impl Into<FpInterval> + Copy,
    z: impl Into<FpInterval> + Copy,
) -> [FpInterval; 2] {
    [
        mix_imprecise_interval(x, y, z),
        mix_precise_interval(x, y, z),
    ]
}

/// The pair of intervals produced by `modf(n)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModfIntervals {
    pub fract: FpInterval,
    pub whole: FpInterval,
}

/// Acceptance intervals for `modf(n)`.
pub fn modf_interval(n: f64) -> ModfIntervals {
    ModfIntervals {
        fract: correctly_rounded_interval(n % 1.0),
        whole: correctly_rounded_interval(n - n % 1.0),
    }
}

// The product of two candidates is itself rounded and flushed before the
// correctly-rounded interval is taken, so sign and flush interplay is exact.
pub(crate) fn multiplication_eval(x: f64, y: f64) -> FpInterval {
    let inner = ScalarPairToIntervalOp {
        eval: &|x, y| correctly_rounded_interval(x * y),
        extrema: None,
    };
    round_and_flush_scalar_pair_to_interval(x, y, &inner)
}

/// Acceptance interval for `x * y`.
pub fn multiplication_interval(x: impl Into<FpInterval>, y: impl Into<FpInterval>) -> FpInterval {
    run_scalar_pair_to_interval_op(
        x.into(),
        y.into(),
        &ScalarPairToIntervalOp {
            eval: &multiplication_eval,
            extrema: None,
        },
    )
}

pub(crate) fn negation_eval(n: f64) -> FpInterval {
    correctly_rounded_interval(-n)
}

/// Acceptance interval for `-n`.
pub fn negation_interval(n: impl Into<FpInterval>) -> FpInterval {
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &negation_eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `pow(x, y)` via `exp2(y * log2(x))`. The x <= 0
/// domain restriction is inherited from `log2`.
pub fn pow_interval(x: impl Into<FpInterval>, y: impl Into<FpInterval>) -> FpInterval {
    let eval = |x: f64, y: f64| exp2_interval(multiplication_interval(y, log2_interval(x)));
    run_scalar_pair_to_interval_op(
        x.into(),
        y.into(),
        &ScalarPairToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `quantizeToF16(n)`: the binary16 rounding
/// candidates of `n`, with binary16 flushing applied.
pub fn quantize_to_f16_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| {
        let flushed = wgfp_bits::f16::add_flushed_if_needed(wgfp_bits::f16::correctly_rounded(n));
        FpInterval::span(flushed.into_iter().map(FpInterval::point))
    };
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `radians(n)`.
pub fn radians_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| multiplication_interval(n, 0.017453292519943295474);
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `x % y` via `x - y * trunc(x / y)`.
pub fn remainder_interval(x: impl Into<FpInterval>, y: impl Into<FpInterval>) -> FpInterval {
    let eval = |x: f64, y: f64| {
        subtraction_interval(
            x,
            multiplication_interval(y, trunc_interval(division_interval(x, y))),
        )
    };
    run_scalar_pair_to_interval_op(
        x.into(),
        y.into(),
        &ScalarPairToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `round(n)`: round half to even.
pub fn round_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| {
        let k = n.floor();
        let diff_before = n - k;
        let diff_after = k + 1.0 - n;
        if diff_before < diff_after {
            return correctly_rounded_interval(k);
        }
        if diff_before > diff_after {
            return correctly_rounded_interval(k + 1.0);
        }
        // Exactly between two integers: k if k is even, k + 1 otherwise.
        if k % 2.0 == 0.0 {
            correctly_rounded_interval(k)
        } else {
            correctly_rounded_interval(k + 1.0)
        }
    };
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `saturate(n)` as `clamp(n, 0.0, 1.0)`. The min-max
/// clamp is used since its intervals contain all of median's.
pub fn saturate_interval(n: impl Into<FpInterval>) -> FpInterval {
    run_scalar_triple_to_interval_op(
        n.into(),
        FpInterval::point(0.0),
        FpInterval::point(1.0),
        &ScalarTripleToIntervalOp {
            eval: &clamp_min_max_eval,
        },
    )
}

/// Acceptance interval for `sign(n)`.
pub fn sign_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| {
        if n > 0.0 {
            return correctly_rounded_interval(1.0);
        }
        if n < 0.0 {
            return correctly_rounded_interval(-1.0);
        }
        correctly_rounded_interval(0.0)
    };
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `sin(n)`: absolute error 2^-11 on [-π, π].
pub fn sin_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = limit_scalar_to_interval_domain(FpInterval::new(NEGATIVE_PI, PI), |n: f64| {
        absolute_error_interval(n.sin(), (2f64).powi(-11))
    });
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `sinh(n)` via `(exp(n) - exp(-n)) * 0.5`.
pub fn sinh_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| {
        let minus_n = negation_interval(n);
        multiplication_interval(
            subtraction_interval(exp_interval(n), exp_interval(minus_n)),
            0.5,
        )
    };
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `smoothstep(low, high, x)`.
pub fn smooth_step_interval(
    low: impl Into<FpInterval>,
    high: impl Into<FpInterval>,
    x: impl Into<FpInterval>,
) -> FpInterval {
    let eval = |low: f64, high: f64, x: f64| {
        // t = clamp((x - low) / (high - low), 0.0, 1.0)
        let t = clamp_median_interval(
            division_interval(
                subtraction_interval(x, low),
                subtraction_interval(high, low),
            ),
            0.0,
            1.0,
        );
        // Inherited from t * t * (3.0 - 2.0 * t)
        multiplication_interval(
            t,
            multiplication_interval(
                t,
                subtraction_interval(3.0, multiplication_interval(2.0, t)),
            ),
        )
    };
    run_scalar_triple_to_interval_op(
        low.into(),
        high.into(),
        x.into(),
        &ScalarTripleToIntervalOp { eval: &eval },
    )
}

/// Acceptance interval for `sqrt(n)` via `1.0 / inverseSqrt(n)`.
pub fn sqrt_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| division_interval(1.0, inverse_sqrt_interval(n));
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `step(edge, x)`.
///
/// The result is one of [0, 0], [1, 1], [0, 1] or the universal interval.
/// [0, 1] means either 0.0 or 1.0 is acceptable, not any value in between.
pub fn step_interval(edge: impl Into<FpInterval>, x: impl Into<FpInterval>) -> FpInterval {
    let eval = |edge: f64, x: f64| {
        if edge <= x {
            correctly_rounded_interval(1.0)
        } else {
            correctly_rounded_interval(0.0)
        }
    };
    run_scalar_pair_to_interval_op(
        edge.into(),
        x.into(),
        &ScalarPairToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

pub(crate) fn subtraction_eval(x: f64, y: f64) -> FpInterval {
    correctly_rounded_interval(x - y)
}

/// Acceptance interval for `x - y`.
pub fn subtraction_interval(x: impl Into<FpInterval>, y: impl Into<FpInterval>) -> FpInterval {
    run_scalar_pair_to_interval_op(
        x.into(),
        y.into(),
        &ScalarPairToIntervalOp {
            eval: &subtraction_eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `tan(n)` via `sin(n) / cos(n)`, each recomputed
/// independently.
pub fn tan_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| division_interval(sin_interval(n), cos_interval(n));
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `tanh(n)` via `sinh(n) / cosh(n)`.
pub fn tanh_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| division_interval(sinh_interval(n), cosh_interval(n));
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}

/// Acceptance interval for `trunc(n)`.
pub fn trunc_interval(n: impl Into<FpInterval>) -> FpInterval {
    let eval = |n: f64| correctly_rounded_interval(n.trunc());
    run_scalar_to_interval_op(
        n.into(),
        &ScalarToIntervalOp {
            eval: &eval,
            extrema: None,
        },
    )
}
