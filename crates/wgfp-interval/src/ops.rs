//! Generic drivers that turn an operation descriptor into an acceptance
//! interval, handling multi-candidate rounding, subnormal flushing, extrema
//! narrowing and the collapse to the universal interval.

use tracing::debug;
use wgfp_bits::f32::{add_flushed_if_needed, correctly_rounded};

use crate::interval::FpInterval;
use crate::vector::{FpMatrix, FpVector};

/// Declarative rule for a unary scalar operation: a point implementation and
/// an optional domain-narrowing hook whose output bounds bracket all interior
/// extrema of the implementation.
pub struct ScalarToIntervalOp<'a> {
    pub eval: &'a dyn Fn(f64) -> FpInterval,
    pub extrema: Option<&'a dyn Fn(FpInterval) -> FpInterval>,
}

/// Rule for a binary scalar operation.
pub struct ScalarPairToIntervalOp<'a> {
    pub eval: &'a dyn Fn(f64, f64) -> FpInterval,
    pub extrema: Option<&'a dyn Fn(FpInterval, FpInterval) -> (FpInterval, FpInterval)>,
}

/// Rule for a ternary scalar operation.
pub struct ScalarTripleToIntervalOp<'a> {
    pub eval: &'a dyn Fn(f64, f64, f64) -> FpInterval,
}

/// Restricts a unary implementation to `domain`; outside it the accuracy is
/// undefined and the universal interval is returned.
pub fn limit_scalar_to_interval_domain<'a>(
    domain: FpInterval,
    eval: impl Fn(f64) -> FpInterval + 'a,
) -> impl Fn(f64) -> FpInterval + 'a {
    move |n| {
        if domain.contains(n) {
            eval(n)
        } else {
            FpInterval::ANY
        }
    }
}

/// Per-operand domains for a binary operation, each a set of disjoint
/// intervals.
pub struct ScalarPairDomain {
    pub x: Vec<FpInterval>,
    pub y: Vec<FpInterval>,
}

/// Restricts a binary implementation to `domain`, per operand.
pub fn limit_scalar_pair_to_interval_domain<'a>(
    domain: ScalarPairDomain,
    eval: impl Fn(f64, f64) -> FpInterval + 'a,
) -> impl Fn(f64, f64) -> FpInterval + 'a {
    move |x, y| {
        if !domain.x.iter().any(|d| d.contains(x)) || !domain.y.iter().any(|d| d.contains(y)) {
            return FpInterval::ANY;
        }
        eval(x, y)
    }
}

/// All combinations of one element from each candidate set, in order.
fn cartesian_product(sets: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let mut result: Vec<Vec<f64>> = vec![Vec::new()];
    for set in sets {
        result = result
            .into_iter()
            .flat_map(|prefix| {
                set.iter().map(move |&v| {
                    let mut next = prefix.clone();
                    next.push(v);
                    next
                })
            })
            .collect();
    }
    result
}

/// The hardware-admissible pre-images of `n`: its correctly-rounded
/// candidates, plus zero when any candidate could be flushed.
fn candidates(n: f64) -> Vec<f64> {
    assert!(!n.is_nan(), "flush is not defined for NaN");
    add_flushed_if_needed(correctly_rounded(n))
}

pub fn round_and_flush_scalar_to_interval(
    n: f64,
    op: &ScalarToIntervalOp<'_>,
) -> FpInterval {
    FpInterval::span(candidates(n).into_iter().map(|c| (op.eval)(c)))
}

pub fn round_and_flush_scalar_pair_to_interval(
    x: f64,
    y: f64,
    op: &ScalarPairToIntervalOp<'_>,
) -> FpInterval {
    let xs = candidates(x);
    let ys = candidates(y);
    FpInterval::span(
        xs.iter()
            .flat_map(|&cx| ys.iter().map(move |&cy| (cx, cy)))
            .map(|(cx, cy)| (op.eval)(cx, cy)),
    )
}

pub fn round_and_flush_scalar_triple_to_interval(
    x: f64,
    y: f64,
    z: f64,
    op: &ScalarTripleToIntervalOp<'_>,
) -> FpInterval {
    let xs = candidates(x);
    let ys = candidates(y);
    let zs = candidates(z);
    let mut outputs = Vec::with_capacity(xs.len() * ys.len() * zs.len());
    for &cx in &xs {
        for &cy in &ys {
            for &cz in &zs {
                outputs.push((op.eval)(cx, cy, cz));
            }
        }
    }
    FpInterval::span(outputs)
}

pub fn round_and_flush_vector_to_interval(
    x: &[f64],
    eval: &dyn Fn(&[f64]) -> FpInterval,
) -> FpInterval {
    let lanes: Vec<Vec<f64>> = x.iter().map(|&e| candidates(e)).collect();
    FpInterval::span(cartesian_product(&lanes).iter().map(|c| eval(c)))
}

pub fn round_and_flush_vector_pair_to_interval(
    x: &[f64],
    y: &[f64],
    eval: &dyn Fn(&[f64], &[f64]) -> FpInterval,
) -> FpInterval {
    let x_lanes: Vec<Vec<f64>> = x.iter().map(|&e| candidates(e)).collect();
    let y_lanes: Vec<Vec<f64>> = y.iter().map(|&e| candidates(e)).collect();
    let x_inputs = cartesian_product(&x_lanes);
    let y_inputs = cartesian_product(&y_lanes);
    FpInterval::span(
        x_inputs
            .iter()
            .flat_map(|cx| y_inputs.iter().map(move |cy| (cx, cy)))
            .map(|(cx, cy)| eval(cx, cy)),
    )
}

pub fn round_and_flush_vector_to_vector(
    x: &[f64],
    eval: &dyn Fn(&[f64]) -> FpVector,
) -> FpVector {
    let lanes: Vec<Vec<f64>> = x.iter().map(|&e| candidates(e)).collect();
    FpVector::span_vectors(cartesian_product(&lanes).iter().map(|c| eval(c)))
}

pub fn round_and_flush_vector_pair_to_vector(
    x: &[f64],
    y: &[f64],
    eval: &dyn Fn(&[f64], &[f64]) -> FpVector,
) -> FpVector {
    let x_lanes: Vec<Vec<f64>> = x.iter().map(|&e| candidates(e)).collect();
    let y_lanes: Vec<Vec<f64>> = y.iter().map(|&e| candidates(e)).collect();
    let x_inputs = cartesian_product(&x_lanes);
    let y_inputs = cartesian_product(&y_lanes);
    FpVector::span_vectors(
        x_inputs
            .iter()
            .flat_map(|cx| y_inputs.iter().map(move |cy| (cx, cy)))
            .map(|(cx, cy)| eval(cx, cy)),
    )
}

pub fn round_and_flush_matrix_to_matrix(
    m: &[Vec<f64>],
    eval: &dyn Fn(&[Vec<f64>]) -> FpMatrix,
) -> FpMatrix {
    let num_rows = m[0].len();
    let cells: Vec<Vec<f64>> = m.iter().flatten().map(|&e| candidates(e)).collect();
    FpMatrix::span_matrices(cartesian_product(&cells).iter().map(|flat| {
        let inner: Vec<Vec<f64>> = flat.chunks(num_rows).map(|c| c.to_vec()).collect();
        eval(&inner)
    }))
}

/// Evaluates a unary operation over a domain interval: both domain bounds are
/// driven through rounding/flushing and the results spanned. Non-finite input
/// or output collapses to the universal interval.
pub fn run_scalar_to_interval_op(x: FpInterval, op: &ScalarToIntervalOp<'_>) -> FpInterval {
    if !x.is_finite() {
        debug!(%x, "non-finite input domain, accuracy undefined");
        return FpInterval::ANY;
    }

    let x = match op.extrema {
        Some(extrema) => extrema(x),
        None => x,
    };

    let result = FpInterval::span(
        x.bounds()
            .into_iter()
            .map(|b| round_and_flush_scalar_to_interval(b, op)),
    );
    if result.is_finite() {
        result
    } else {
        debug!(%result, "result escaped the finite range, accuracy undefined");
        FpInterval::ANY
    }
}

pub fn run_scalar_pair_to_interval_op(
    x: FpInterval,
    y: FpInterval,
    op: &ScalarPairToIntervalOp<'_>,
) -> FpInterval {
    if !x.is_finite() || !y.is_finite() {
        debug!(%x, %y, "non-finite input domain, accuracy undefined");
        return FpInterval::ANY;
    }

    let (x, y) = match op.extrema {
        Some(extrema) => extrema(x, y),
        None => (x, y),
    };

    let mut outputs = Vec::with_capacity(4);
    for &bx in &x.bounds() {
        for &by in &y.bounds() {
            outputs.push(round_and_flush_scalar_pair_to_interval(bx, by, op));
        }
    }

    let result = FpInterval::span(outputs);
    if result.is_finite() {
        result
    } else {
        debug!(%result, "result escaped the finite range, accuracy undefined");
        FpInterval::ANY
    }
}

pub fn run_scalar_triple_to_interval_op(
    x: FpInterval,
    y: FpInterval,
    z: FpInterval,
    op: &ScalarTripleToIntervalOp<'_>,
) -> FpInterval {
    if !x.is_finite() || !y.is_finite() || !z.is_finite() {
        debug!(%x, %y, %z, "non-finite input domain, accuracy undefined");
        return FpInterval::ANY;
    }

    let mut outputs = Vec::with_capacity(8);
    for &bx in &x.bounds() {
        for &by in &y.bounds() {
            for &bz in &z.bounds() {
                outputs.push(round_and_flush_scalar_triple_to_interval(bx, by, bz, op));
            }
        }
    }

    let result = FpInterval::span(outputs);
    if result.is_finite() {
        result
    } else {
        debug!(%result, "result escaped the finite range, accuracy undefined");
        FpInterval::ANY
    }
}

fn lane_bounds(x: &FpVector) -> Vec<Vec<f64>> {
    x.iter().map(|e| e.bounds()).collect()
}

pub fn run_vector_to_interval_op(
    x: &FpVector,
    eval: &dyn Fn(&[f64]) -> FpInterval,
) -> FpInterval {
    if !x.is_finite() {
        return FpInterval::ANY;
    }

    let result = FpInterval::span(
        cartesian_product(&lane_bounds(x))
            .iter()
            .map(|c| round_and_flush_vector_to_interval(c, eval)),
    );
    if result.is_finite() {
        result
    } else {
        FpInterval::ANY
    }
}

pub fn run_vector_pair_to_interval_op(
    x: &FpVector,
    y: &FpVector,
    eval: &dyn Fn(&[f64], &[f64]) -> FpInterval,
) -> FpInterval {
    if !x.is_finite() || !y.is_finite() {
        return FpInterval::ANY;
    }

    let x_values = cartesian_product(&lane_bounds(x));
    let y_values = cartesian_product(&lane_bounds(y));
    let result = FpInterval::span(
        x_values
            .iter()
            .flat_map(|cx| y_values.iter().map(move |cy| (cx, cy)))
            .map(|(cx, cy)| round_and_flush_vector_pair_to_interval(cx, cy, eval)),
    );
    if result.is_finite() {
        result
    } else {
        FpInterval::ANY
    }
}

pub fn run_vector_to_vector_op(
    x: &FpVector,
    eval: &dyn Fn(&[f64]) -> FpVector,
) -> FpVector {
    if !x.is_finite() {
        return FpVector::any(x.len());
    }

    let result = FpVector::span_vectors(
        cartesian_product(&lane_bounds(x))
            .iter()
            .map(|c| round_and_flush_vector_to_vector(c, eval)),
    );
    if result.is_finite() {
        result
    } else {
        FpVector::any(result.len())
    }
}

pub fn run_vector_pair_to_vector_op(
    x: &FpVector,
    y: &FpVector,
    eval: &dyn Fn(&[f64], &[f64]) -> FpVector,
) -> FpVector {
    if !x.is_finite() || !y.is_finite() {
        return FpVector::any(x.len());
    }

    let x_values = cartesian_product(&lane_bounds(x));
    let y_values = cartesian_product(&lane_bounds(y));
    let result = FpVector::span_vectors(
        x_values
            .iter()
            .flat_map(|cx| y_values.iter().map(move |cy| (cx, cy)))
            .map(|(cx, cy)| round_and_flush_vector_pair_to_vector(cx, cy, eval)),
    );
    if result.is_finite() {
        result
    } else {
        FpVector::any(result.len())
    }
}

pub fn run_matrix_to_matrix_op(
    m: &FpMatrix,
    eval: &dyn Fn(&[Vec<f64>]) -> FpMatrix,
) -> FpMatrix {
    let (num_cols, num_rows) = m.dims();
    if !m.is_finite() {
        return FpMatrix::any(num_cols, num_rows);
    }

    let cell_bounds: Vec<Vec<f64>> = m.flatten().iter().map(|e| e.bounds()).collect();
    let result = FpMatrix::span_matrices(cartesian_product(&cell_bounds).iter().map(|flat| {
        let inner: Vec<Vec<f64>> = flat.chunks(num_rows).map(|c| c.to_vec()).collect();
        round_and_flush_matrix_to_matrix(&inner, eval)
    }));
    if result.is_finite() {
        result
    } else {
        let (result_cols, result_rows) = result.dims();
        FpMatrix::any(result_cols, result_rows)
    }
}

/// Maps a scalar operation across a vector's lanes, for component-wise use
/// inside inherited accuracies (vector negation, vector subtraction, ...).
pub fn run_scalar_to_interval_op_component_wise(
    x: &FpVector,
    op: &ScalarToIntervalOp<'_>,
) -> FpVector {
    FpVector::new(x.iter().map(|&e| run_scalar_to_interval_op(e, op)).collect())
}

pub fn run_scalar_pair_to_interval_op_vector_component_wise(
    x: &FpVector,
    y: &FpVector,
    op: &ScalarPairToIntervalOp<'_>,
) -> FpVector {
    assert_eq!(
        x.len(),
        y.len(),
        "component-wise operations require vectors of the same arity"
    );
    FpVector::new(
        x.iter()
            .zip(y.iter())
            .map(|(&ex, &ey)| run_scalar_pair_to_interval_op(ex, ey, op))
            .collect(),
    )
}

pub fn run_scalar_pair_to_interval_op_matrix_component_wise(
    x: &FpMatrix,
    y: &FpMatrix,
    op: &ScalarPairToIntervalOp<'_>,
) -> FpMatrix {
    assert_eq!(
        x.dims(),
        y.dims(),
        "component-wise operations require matrices of the same dimensions"
    );
    let (num_cols, num_rows) = x.dims();
    let cells = x
        .flatten()
        .into_iter()
        .zip(y.flatten())
        .map(|(ex, ey)| run_scalar_pair_to_interval_op(ex, ey, op))
        .collect();
    FpMatrix::unflatten(cells, num_cols, num_rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgfp_bits::f32::SUBNORMAL_POSITIVE_MIN;

    fn identity_op<'a>() -> ScalarToIntervalOp<'a> {
        ScalarToIntervalOp {
            eval: &|n| FpInterval::point(n),
            extrema: None,
        }
    }

    #[test]
    fn test_cartesian_product_orders_and_counts() {
        let combos = cartesian_product(&[vec![1.0, 2.0], vec![3.0], vec![4.0, 5.0]]);
        assert_eq!(combos.len(), 4);
        assert_eq!(combos[0], vec![1.0, 3.0, 4.0]);
        assert_eq!(combos[3], vec![2.0, 3.0, 5.0]);
    }

    #[test]
    fn test_round_and_flush_exact_value_is_point() {
        let op = identity_op();
        assert_eq!(round_and_flush_scalar_to_interval(1.5, &op), FpInterval::point(1.5));
    }

    #[test]
    fn test_round_and_flush_subnormal_includes_zero() {
        let op = identity_op();
        let result = round_and_flush_scalar_to_interval(SUBNORMAL_POSITIVE_MIN, &op);
        assert!(result.contains(0.0));
        assert!(result.contains(SUBNORMAL_POSITIVE_MIN));
    }

    #[test]
    fn test_run_scalar_non_finite_input_collapses() {
        let op = identity_op();
        assert!(run_scalar_to_interval_op(FpInterval::ANY, &op).is_any());
        assert!(run_scalar_to_interval_op(FpInterval::new(0.0, 1e39), &op).is_any());
    }

    #[test]
    fn test_run_scalar_extrema_narrows_domain() {
        // An extrema hook that pins the domain to zero must make the result
        // independent of the original bounds.
        let op = ScalarToIntervalOp {
            eval: &|n| FpInterval::point(n),
            extrema: Some(&|_| FpInterval::point(0.0)),
        };
        let result = run_scalar_to_interval_op(FpInterval::new(-5.0, 7.0), &op);
        assert_eq!(result, FpInterval::point(0.0));
    }

    #[test]
    fn test_run_scalar_pair_evaluates_all_bound_combinations() {
        let op = ScalarPairToIntervalOp {
            eval: &|x, y| FpInterval::point(x + y),
            extrema: None,
        };
        let result = run_scalar_pair_to_interval_op(
            FpInterval::new(0.0, 1.0),
            FpInterval::new(10.0, 20.0),
            &op,
        );
        assert_eq!(result, FpInterval::new(10.0, 21.0));
    }

    #[test]
    fn test_run_vector_non_finite_lane_collapses() {
        let x = FpVector::new(vec![FpInterval::ANY, FpInterval::point(1.0), FpInterval::point(2.0)]);
        let result = run_vector_to_vector_op(&x, &|lanes| FpVector::from_points(lanes));
        assert_eq!(result, FpVector::any(3));
    }

    #[test]
    fn test_run_vector_mixed_subnormal_expansion() {
        // Lane 0 subnormal, lane 1 normal: the expansion must include the
        // combination with lane 0 flushed and lane 1 unflushed.
        let x = FpVector::from_points(&[SUBNORMAL_POSITIVE_MIN, 1.0]);
        let seen_flushed_combo = std::cell::Cell::new(false);
        let result = run_vector_to_interval_op(&x, &|lanes| {
            if lanes[0] == 0.0 && lanes[1] == 1.0 {
                seen_flushed_combo.set(true);
            }
            FpInterval::point(lanes[0] + lanes[1])
        });
        assert!(seen_flushed_combo.get());
        assert!(result.contains(1.0));
        assert!(result.contains(1.0 + SUBNORMAL_POSITIVE_MIN));
    }
}
