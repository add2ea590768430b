//! The acceptance-interval value type.

use std::fmt;

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use wgfp_bits::f32::{is_finite, SUBNORMAL_NEGATIVE_MIN, SUBNORMAL_POSITIVE_MAX};

/// A closed range of reals, extended with ±inf: any result inside is an
/// acceptable output of the operation being bounded. Bounds are carried at
/// `f64` precision; finiteness is judged against the binary32 range.
///
/// Intervals are immutable value objects. The distinguished [`FpInterval::ANY`]
/// sentinel means "no defined accuracy, accept anything".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FpInterval {
    pub begin: f64,
    pub end: f64,
}

impl FpInterval {
    /// The universal interval: accepts every value, including NaN.
    pub const ANY: FpInterval = FpInterval {
        begin: f64::NEG_INFINITY,
        end: f64::INFINITY,
    };

    /// Panics if either bound is NaN or if `begin > end`.
    pub fn new(begin: f64, end: f64) -> Self {
        assert!(!begin.is_nan(), "interval begin must not be NaN");
        assert!(!end.is_nan(), "interval end must not be NaN");
        assert!(begin <= end, "begin ({begin}) must not exceed end ({end})");
        Self { begin, end }
    }

    /// The degenerate interval containing exactly `n`.
    #[inline]
    pub fn point(n: f64) -> Self {
        Self::new(n, n)
    }

    #[inline]
    pub fn is_point(&self) -> bool {
        self.begin == self.end
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        self.begin == f64::NEG_INFINITY && self.end == f64::INFINITY
    }

    /// Both bounds lie within the binary32 finite range.
    #[inline]
    pub fn is_finite(&self) -> bool {
        is_finite(self.begin) && is_finite(self.end)
    }

    /// Whether `n` is an acceptable value. NaN is accepted only by the
    /// universal interval, since that is the sentinel for undefined behavior.
    pub fn contains(&self, n: f64) -> bool {
        if n.is_nan() {
            return self.is_any();
        }
        self.begin <= n && n <= self.end
    }

    pub fn contains_interval(&self, other: &FpInterval) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    /// Overlap test against the binary32 subnormal range, zero included.
    /// Used by operations with a discontinuity near zero.
    pub fn contains_zero_or_subnormals(&self) -> bool {
        !(self.end < SUBNORMAL_NEGATIVE_MIN || self.begin > SUBNORMAL_POSITIVE_MAX)
    }

    /// The domain points a driver must evaluate: one for a point interval,
    /// both bounds otherwise.
    pub fn bounds(&self) -> Vec<f64> {
        if self.is_point() {
            vec![self.begin]
        } else {
            vec![self.begin, self.end]
        }
    }

    /// The tightest interval covering every interval in `intervals`.
    /// Panics on an empty set.
    pub fn span<I: IntoIterator<Item = FpInterval>>(intervals: I) -> FpInterval {
        let mut iter = intervals.into_iter();
        let first = iter.next().expect("span of an empty set of intervals is not allowed");
        let mut begin = first.begin;
        let mut end = first.end;
        for i in iter {
            begin = begin.min(i.begin);
            end = end.max(i.end);
        }
        FpInterval::new(begin, end)
    }

    /// Span of `self` and `other`.
    pub fn span_with(self, other: FpInterval) -> FpInterval {
        FpInterval::span([self, other])
    }
}

impl From<f64> for FpInterval {
    fn from(n: f64) -> Self {
        FpInterval::point(n)
    }
}

impl From<f32> for FpInterval {
    fn from(n: f32) -> Self {
        FpInterval::point(n as f64)
    }
}

impl fmt::Display for FpInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.begin, self.end)
    }
}

// Wire form: `"any"` or the bounds as binary32 bit patterns, so a serialized
// case is stable across hosts regardless of extended-precision quirks.
impl Serialize for FpInterval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_any() {
            serializer.serialize_str("any")
        } else {
            let mut st = serializer.serialize_struct("FpInterval", 2)?;
            st.serialize_field("begin", &(self.begin as f32).to_bits())?;
            st.serialize_field("end", &(self.end as f32).to_bits())?;
            st.end()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireInterval {
    Tag(String),
    Bounds { begin: u32, end: u32 },
}

impl<'de> Deserialize<'de> for FpInterval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match WireInterval::deserialize(deserializer)? {
            WireInterval::Tag(tag) if tag == "any" => Ok(FpInterval::ANY),
            WireInterval::Tag(tag) => Err(D::Error::custom(format!("unknown interval tag `{tag}`"))),
            WireInterval::Bounds { begin, end } => {
                let begin = f32::from_bits(begin) as f64;
                let end = f32::from_bits(end) as f64;
                if begin.is_nan() || end.is_nan() || begin > end {
                    return Err(D::Error::custom("invalid interval bounds"));
                }
                Ok(FpInterval { begin, end })
            }
        }
    }
}
