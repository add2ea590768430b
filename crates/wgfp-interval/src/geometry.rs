//! Vector and matrix operations: geometric builtins and the pack/unpack data
//! reinterpretations.
//!
//! Everything here composes the scalar operation library, so accuracy is
//! inherited from the parts. Summations with more than two addends evaluate
//! every ordering and span the results, since float addition is not
//! associative and the summation order is unspecified.

use half::f16;

use crate::builtins::{
    addition_eval, addition_interval, correctly_rounded_eval, correctly_rounded_interval,
    division_interval, max_interval, multiplication_eval, multiplication_interval, negation_eval,
    quantize_to_f16_interval, sqrt_interval, subtraction_eval, subtraction_interval,
};
use crate::interval::FpInterval;
use crate::ops::{
    run_matrix_to_matrix_op, run_scalar_pair_to_interval_op_matrix_component_wise,
    run_scalar_pair_to_interval_op_vector_component_wise, run_scalar_to_interval_op_component_wise,
    run_vector_pair_to_interval_op, run_vector_pair_to_vector_op, run_vector_to_interval_op,
    run_vector_to_vector_op, ScalarPairToIntervalOp, ScalarToIntervalOp,
};
use crate::vector::{FpMatrix, FpVector, IntoFpMatrix, IntoFpVector};

/// All orderings of `items`.
fn permutations(items: &[FpInterval]) -> Vec<Vec<FpInterval>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            result.push(tail);
        }
    }
    result
}

/// Sums the addends in every order and spans the results. Two addends need no
/// permutations, since a + b = b + a holds for floats.
fn span_summation_orders(addends: &[FpInterval]) -> FpInterval {
    if addends.len() == 2 {
        return addition_interval(addends[0], addends[1]);
    }
    FpInterval::span(permutations(addends).into_iter().map(|p| {
        p.into_iter()
            .reduce(|acc, cur| addition_interval(acc, cur))
            .expect("summation requires at least one addend")
    }))
}

fn dot_eval(x: &[f64], y: &[f64]) -> FpInterval {
    let products: Vec<FpInterval> = x
        .iter()
        .zip(y)
        .map(|(&ex, &ey)| multiplication_interval(ex, ey))
        .collect();
    span_summation_orders(&products)
}

/// Acceptance interval for `dot(x, y)`.
pub fn dot_interval(x: impl IntoFpVector, y: impl IntoFpVector) -> FpInterval {
    let x = x.into_fp_vector();
    let y = y.into_fp_vector();
    assert_eq!(x.len(), y.len(), "dot is not defined for vectors of differing arities");
    run_vector_pair_to_interval_op(&x, &y, &dot_eval)
}

fn cross_eval(x: &[f64], y: &[f64]) -> FpVector {
    // cross(x, y) = r, where
    //   r[0] = x[1] * y[2] - x[2] * y[1]
    //   r[1] = x[2] * y[0] - x[0] * y[2]
    //   r[2] = x[0] * y[1] - x[1] * y[0]
    FpVector::new(vec![
        subtraction_interval(
            multiplication_interval(x[1], y[2]),
            multiplication_interval(x[2], y[1]),
        ),
        subtraction_interval(
            multiplication_interval(x[2], y[0]),
            multiplication_interval(x[0], y[2]),
        ),
        subtraction_interval(
            multiplication_interval(x[0], y[1]),
            multiplication_interval(x[1], y[0]),
        ),
    ])
}

/// Acceptance interval vector for `cross(x, y)`, defined for vec3 only.
pub fn cross_interval(x: impl IntoFpVector, y: impl IntoFpVector) -> FpVector {
    let x = x.into_fp_vector();
    let y = y.into_fp_vector();
    assert_eq!(x.len(), 3, "cross is only defined for three-element vectors");
    assert_eq!(y.len(), 3, "cross is only defined for three-element vectors");
    run_vector_pair_to_vector_op(&x, &y, &cross_eval)
}

/// Acceptance interval for `length(n)` over a vector, via `sqrt(dot(n, n))`.
pub fn length_vector_interval(n: impl IntoFpVector) -> FpInterval {
    run_vector_to_interval_op(&n.into_fp_vector(), &|lanes| {
        sqrt_interval(dot_interval(lanes, lanes))
    })
}

/// Acceptance interval for `distance(x, y)` over vectors, via `length(x - y)`.
pub fn distance_vector_interval(x: impl IntoFpVector, y: impl IntoFpVector) -> FpInterval {
    let x = x.into_fp_vector();
    let y = y.into_fp_vector();
    assert_eq!(
        x.len(),
        y.len(),
        "distance is not defined for vectors of differing arities"
    );
    run_vector_pair_to_interval_op(&x, &y, &|cx, cy| {
        let difference = run_scalar_pair_to_interval_op_vector_component_wise(
            &FpVector::from_points(cx),
            &FpVector::from_points(cy),
            &ScalarPairToIntervalOp {
                eval: &subtraction_eval,
                extrema: None,
            },
        );
        length_vector_interval(difference)
    })
}

/// Acceptance interval vector for `normalize(n) = n / length(n)`.
pub fn normalize_interval(n: impl IntoFpVector) -> FpVector {
    run_vector_to_vector_op(&n.into_fp_vector(), &|lanes| {
        let length = length_vector_interval(lanes);
        FpVector::new(lanes.iter().map(|&e| division_interval(e, length)).collect())
    })
}

/// Each lane of `v` multiplied by the scalar interval `c`.
pub fn multiplication_vector_scalar_interval(v: &[f64], c: impl Into<FpInterval>) -> FpVector {
    let c = c.into();
    FpVector::new(v.iter().map(|&e| multiplication_interval(e, c)).collect())
}

fn reflect_eval(x: &[f64], y: &[f64]) -> FpVector {
    // reflect(x, y) = x - t * y, t = 2.0 * dot(x, y)
    // x is the incident vector, y the normal of the reflecting surface.
    let t = multiplication_interval(2.0, dot_interval(x, y));
    let rhs = multiplication_vector_scalar_interval(y, t);
    run_scalar_pair_to_interval_op_vector_component_wise(
        &FpVector::from_points(x),
        &rhs,
        &ScalarPairToIntervalOp {
            eval: &subtraction_eval,
            extrema: None,
        },
    )
}

/// Acceptance interval vector for `reflect(x, y)`.
pub fn reflect_interval(x: impl IntoFpVector, y: impl IntoFpVector) -> FpVector {
    let x = x.into_fp_vector();
    let y = y.into_fp_vector();
    assert_eq!(
        x.len(),
        y.len(),
        "reflect is only defined for vectors of the same arity"
    );
    run_vector_pair_to_vector_op(&x, &y, &reflect_eval)
}

/// Acceptance interval vectors for `faceForward(x, y, z)`.
///
/// `faceForward(x, y, z) = select(-x, x, dot(z, y) < 0.0)` selects between two
/// discrete results rather than spanning a range, so the admissible vectors
/// are returned as a list. Because `dot(z, y)` is itself an interval it may
/// straddle zero, in which case both `x` and `-x` are acceptable. A non-finite
/// dot contributes `None`, meaning any result is acceptable there.
pub fn face_forward_intervals(
    x: impl IntoFpVector,
    y: impl IntoFpVector,
    z: impl IntoFpVector,
) -> Vec<Option<FpVector>> {
    let x = x.into_fp_vector();
    // Coercion alone does not apply rounding or flushing to x, so both signs
    // are driven through the component-wise framework.
    let positive_x = run_scalar_to_interval_op_component_wise(
        &x,
        &ScalarToIntervalOp {
            eval: &correctly_rounded_eval,
            extrema: None,
        },
    );
    let negative_x = run_scalar_to_interval_op_component_wise(
        &x,
        &ScalarToIntervalOp {
            eval: &negation_eval,
            extrema: None,
        },
    );

    let dot = dot_interval(z, y);

    let mut results: Vec<Option<FpVector>> = Vec::new();
    if !dot.is_finite() {
        results.push(None);
    }
    if dot.begin < 0.0 || dot.end < 0.0 {
        results.push(Some(positive_x));
    }
    if dot.begin >= 0.0 || dot.end >= 0.0 {
        results.push(Some(negative_x));
    }
    assert!(
        !results.is_empty(),
        "faceForward selected neither x nor -x, which should not be possible"
    );
    results
}

/// Acceptance interval vector for `refract(i, s, r)`.
///
/// `k = 1 - r^2 * (1 - dot(s, i)^2)` classifies the result: a `k` that is
/// non-finite or touches zero/subnormals hits the `sqrt(k)` discontinuity and
/// yields the unconstrained vector; a negative `k` yields the zero vector;
/// otherwise the result is `i * r - s * (dot(s, i) * r + sqrt(k))`.
pub fn refract_interval(i: &[f64], s: &[f64], r: f64) -> FpVector {
    assert_eq!(
        i.len(),
        s.len(),
        "refract is only defined for vectors of the same arity"
    );

    let r_squared = multiplication_interval(r, r);
    let dot = dot_interval(i, s);
    let dot_squared = multiplication_interval(dot, dot);
    let one_minus_dot_squared = subtraction_interval(1.0, dot_squared);
    let k = subtraction_interval(
        1.0,
        multiplication_interval(r_squared, one_minus_dot_squared),
    );

    if !k.is_finite() || k.contains_zero_or_subnormals() {
        return FpVector::any(i.len());
    }
    if k.end < 0.0 {
        return FpVector::zero(i.len());
    }

    let dot_times_r = multiplication_interval(dot, r);
    let t = addition_interval(dot_times_r, sqrt_interval(k));
    run_scalar_pair_to_interval_op_vector_component_wise(
        &multiplication_vector_scalar_interval(i, r),
        &multiplication_vector_scalar_interval(s, t),
        &ScalarPairToIntervalOp {
            eval: &subtraction_eval,
            extrema: None,
        },
    )
}

/// The (col, row) minor: the matrix with column `col` and row `row` removed.
fn minor(m: &[Vec<f64>], col: usize, row: usize) -> Vec<Vec<f64>> {
    m.iter()
        .enumerate()
        .filter(|&(c, _)| c != col)
        .map(|(_, column)| {
            column
                .iter()
                .enumerate()
                .filter(|&(r, _)| r != row)
                .map(|(_, &v)| v)
                .collect()
        })
        .collect()
}

fn determinant_2x2(m: &[Vec<f64>]) -> FpInterval {
    subtraction_interval(
        multiplication_interval(m[0][0], m[1][1]),
        multiplication_interval(m[0][1], m[1][0]),
    )
}

fn determinant_3x3(m: &[Vec<f64>]) -> FpInterval {
    // Cofactor expansion down the first column. The summation order of the
    // cofactors is unspecified, so all orderings are spanned.
    let cofactors = [
        multiplication_interval(m[0][0], determinant_2x2(&minor(m, 0, 0))),
        multiplication_interval(-m[0][1], determinant_2x2(&minor(m, 0, 1))),
        multiplication_interval(m[0][2], determinant_2x2(&minor(m, 0, 2))),
    ];
    span_summation_orders(&cofactors)
}

fn determinant_4x4(m: &[Vec<f64>]) -> FpInterval {
    let cofactors = [
        multiplication_interval(m[0][0], determinant_3x3(&minor(m, 0, 0))),
        multiplication_interval(-m[0][1], determinant_3x3(&minor(m, 0, 1))),
        multiplication_interval(m[0][2], determinant_3x3(&minor(m, 0, 2))),
        multiplication_interval(-m[0][3], determinant_3x3(&minor(m, 0, 3))),
    ];
    span_summation_orders(&cofactors)
}

/// Acceptance interval for `determinant(m)`, by first-column cofactor
/// expansion.
///
/// The cofactor method is only accurate where the different cofactor
/// definitions of the determinant agree, which holds for the integer-valued
/// matrices the accuracy is specified on. Evaluating every operation order of
/// the fully worked-out formula is intractable for 4x4.
pub fn determinant_interval(m: &[Vec<f64>]) -> FpInterval {
    let dim = m.len();
    assert!(
        (2..=4).contains(&dim) && m.iter().all(|c| c.len() == dim),
        "determinant is only defined for 2x2, 3x3 and 4x4 matrices"
    );
    match dim {
        2 => determinant_2x2(m),
        3 => determinant_3x3(m),
        _ => determinant_4x4(m),
    }
}

/// Acceptance interval matrix for `transpose(m)`.
pub fn transpose_interval(m: impl IntoFpMatrix) -> FpMatrix {
    run_matrix_to_matrix_op(&m.into_fp_matrix(), &|cells| {
        let num_rows = cells[0].len();
        let mut cols: Vec<Vec<FpInterval>> = vec![Vec::with_capacity(cells.len()); num_rows];
        for col in cells {
            for (j, &v) in col.iter().enumerate() {
                cols[j].push(correctly_rounded_interval(v));
            }
        }
        FpMatrix::new(cols)
    })
}

/// Acceptance interval matrix for `x + y` over matrices, component-wise.
pub fn addition_matrix_interval(x: impl IntoFpMatrix, y: impl IntoFpMatrix) -> FpMatrix {
    run_scalar_pair_to_interval_op_matrix_component_wise(
        &x.into_fp_matrix(),
        &y.into_fp_matrix(),
        &ScalarPairToIntervalOp {
            eval: &addition_eval,
            extrema: None,
        },
    )
}

/// Acceptance interval matrix for `x - y` over matrices, component-wise.
pub fn subtraction_matrix_interval(x: impl IntoFpMatrix, y: impl IntoFpMatrix) -> FpMatrix {
    run_scalar_pair_to_interval_op_matrix_component_wise(
        &x.into_fp_matrix(),
        &y.into_fp_matrix(),
        &ScalarPairToIntervalOp {
            eval: &subtraction_eval,
            extrema: None,
        },
    )
}

/// Acceptance interval matrix for `m * scalar`.
pub fn multiplication_matrix_scalar_interval(m: &[Vec<f64>], scalar: f64) -> FpMatrix {
    FpMatrix::new(
        m.iter()
            .map(|col| col.iter().map(|&e| multiplication_eval(e, scalar)).collect())
            .collect(),
    )
}

/// Acceptance interval matrix for `scalar * m`.
pub fn multiplication_scalar_matrix_interval(scalar: f64, m: &[Vec<f64>]) -> FpMatrix {
    multiplication_matrix_scalar_interval(m, scalar)
}

/// Acceptance interval matrix for `x * y` over matrices. Each result cell is
/// the dot of a row of `x` (taken through the transpose) with a column of `y`.
pub fn multiplication_matrix_matrix_interval(x: &[Vec<f64>], y: &[Vec<f64>]) -> FpMatrix {
    let (x_cols, x_rows) = (x.len(), x[0].len());
    let (y_cols, y_rows) = (y.len(), y[0].len());
    assert_eq!(
        x_cols, y_rows,
        "mat{x_cols}x{x_rows} * mat{y_cols}x{y_rows} is not defined"
    );

    let x_transposed = transpose_interval(x);
    FpMatrix::new(
        y.iter()
            .map(|y_col| {
                (0..x_rows)
                    .map(|j| dot_interval(x_transposed.col(j), y_col.as_slice()))
                    .collect()
            })
            .collect(),
    )
}

/// Acceptance interval vector for `x * y`, where x is a matrix and y a vector.
pub fn multiplication_matrix_vector_interval(x: &[Vec<f64>], y: &[f64]) -> FpVector {
    let (cols, rows) = (x.len(), x[0].len());
    assert_eq!(y.len(), cols, "mat{cols}x{rows} * vec{} is not defined", y.len());

    let transposed = transpose_interval(x);
    FpVector::new(
        (0..rows)
            .map(|j| dot_interval(transposed.col(j), y))
            .collect(),
    )
}

/// Acceptance interval vector for `x * y`, where x is a vector and y a matrix.
pub fn multiplication_vector_matrix_interval(x: &[f64], y: &[Vec<f64>]) -> FpVector {
    let (cols, rows) = (y.len(), y[0].len());
    assert_eq!(x.len(), rows, "vec{} * mat{cols}x{rows} is not defined", x.len());

    FpVector::new(y.iter().map(|col| dot_interval(x, col.as_slice())).collect())
}

// Pack/unpack data reinterpretations. The u32 is split into its packed fields
// little-endian, matching the GPU-side memory layout.

/// Acceptance interval vector for `unpack2x16float(n)`.
pub fn unpack2x16float_interval(n: u32) -> FpVector {
    let bytes = n.to_le_bytes();
    let low = f16::from_bits(u16::from_le_bytes([bytes[0], bytes[1]])).to_f64();
    let high = f16::from_bits(u16::from_le_bytes([bytes[2], bytes[3]])).to_f64();
    if !wgfp_bits::f16::is_finite(low) || !wgfp_bits::f16::is_finite(high) {
        return FpVector::any(2);
    }

    let result = FpVector::new(vec![
        quantize_to_f16_interval(low),
        quantize_to_f16_interval(high),
    ]);
    if !result.is_finite() {
        return FpVector::any(2);
    }
    result
}

/// Acceptance interval vector for `unpack2x16snorm(n)`.
pub fn unpack2x16snorm_interval(n: u32) -> FpVector {
    // Clamped below so -32768 maps to -1 rather than past it.
    let lane = |e: i16| max_interval(division_interval(e as f64, 32767.0), -1.0);
    let bytes = n.to_le_bytes();
    FpVector::new(vec![
        lane(i16::from_le_bytes([bytes[0], bytes[1]])),
        lane(i16::from_le_bytes([bytes[2], bytes[3]])),
    ])
}

/// Acceptance interval vector for `unpack2x16unorm(n)`.
pub fn unpack2x16unorm_interval(n: u32) -> FpVector {
    let lane = |e: u16| division_interval(e as f64, 65535.0);
    let bytes = n.to_le_bytes();
    FpVector::new(vec![
        lane(u16::from_le_bytes([bytes[0], bytes[1]])),
        lane(u16::from_le_bytes([bytes[2], bytes[3]])),
    ])
}

/// Acceptance interval vector for `unpack4x8snorm(n)`.
pub fn unpack4x8snorm_interval(n: u32) -> FpVector {
    let lane = |e: i8| max_interval(division_interval(e as f64, 127.0), -1.0);
    let bytes = n.to_le_bytes();
    FpVector::new(bytes.iter().map(|&b| lane(b as i8)).collect())
}

/// Acceptance interval vector for `unpack4x8unorm(n)`.
pub fn unpack4x8unorm_interval(n: u32) -> FpVector {
    let lane = |e: u8| division_interval(e as f64, 255.0);
    let bytes = n.to_le_bytes();
    FpVector::new(bytes.iter().map(|&b| lane(b)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_of_axis_vectors_is_zero() {
        let result = dot_interval([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(result.contains(0.0));
        assert!(result.is_point());
    }

    #[test]
    fn test_dot_exact_integers() {
        // 1*4 + 2*5 + 3*6 = 32, all exactly representable.
        let result = dot_interval([1.0, 2.0, 3.0], [4.0, 5.0, 6.0]);
        assert!(result.contains(32.0));
    }

    #[test]
    #[should_panic(expected = "differing arities")]
    fn test_dot_arity_mismatch_panics() {
        dot_interval([1.0, 2.0], [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_cross_of_unit_axes() {
        // x cross y = z
        let result = cross_interval([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(result.contains(&[0.0, 0.0, 1.0]));
    }

    #[test]
    #[should_panic(expected = "three-element")]
    fn test_cross_rejects_vec2() {
        cross_interval([1.0, 0.0], [0.0, 1.0]);
    }

    #[test]
    fn test_length_of_unit_vector() {
        let result = length_vector_interval([0.0, 1.0, 0.0]);
        assert!(result.contains(1.0));
    }

    #[test]
    fn test_length_three_four_five() {
        let result = length_vector_interval([3.0, 4.0]);
        assert!(result.contains(5.0));
    }

    #[test]
    fn test_distance_matches_length_of_difference() {
        let result = distance_vector_interval([1.0, 2.0], [1.0, 0.0]);
        assert!(result.contains(2.0));
    }

    #[test]
    fn test_normalize_unit_axis() {
        let result = normalize_interval([0.0, 2.0, 0.0]);
        assert!(result[1].contains(1.0));
        assert!(result[0].contains(0.0));
        assert!(result[2].contains(0.0));
    }

    #[test]
    fn test_reflect_off_perpendicular_normal() {
        // Incident along +x, normal along +y: unchanged.
        let result = reflect_interval([1.0, 0.0], [0.0, 1.0]);
        assert!(result.contains(&[1.0, 0.0]));
        // Incident along +y, normal along +y: negated.
        let result = reflect_interval([0.0, 1.0], [0.0, 1.0]);
        assert!(result.contains(&[0.0, -1.0]));
    }

    #[test]
    fn test_face_forward_selects_by_dot_sign() {
        // dot(z, y) < 0: x is kept.
        let results = face_forward_intervals([1.0, 0.0], [0.0, 1.0], [0.0, -1.0]);
        assert_eq!(results.len(), 1);
        assert!(results[0].as_ref().unwrap().contains(&[1.0, 0.0]));

        // dot(z, y) > 0: x is negated.
        let results = face_forward_intervals([1.0, 0.0], [0.0, 1.0], [0.0, 1.0]);
        assert_eq!(results.len(), 1);
        assert!(results[0].as_ref().unwrap().contains(&[-1.0, 0.0]));
    }

    #[test]
    fn test_refract_total_internal_reflection_is_zero_vector() {
        // Large refraction ratio forces k < 0.
        let result = refract_interval(&[1.0, 0.0], &[0.0, 1.0], 10.0);
        assert_eq!(result, FpVector::zero(2));
    }

    #[test]
    fn test_refract_straight_through() {
        // Incident anti-parallel to the normal, r = 1: i passes through.
        let result = refract_interval(&[0.0, -1.0], &[0.0, 1.0], 1.0);
        assert!(result.contains(&[0.0, -1.0]));
    }

    #[test]
    fn test_determinant_identity_matrices() {
        let m2 = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        assert!(determinant_interval(&m2).contains(1.0));
        let m3 = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        assert!(determinant_interval(&m3).contains(1.0));
        let m4 = vec![
            vec![1.0, 0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0],
        ];
        assert!(determinant_interval(&m4).contains(1.0));
    }

    #[test]
    fn test_determinant_2x2_integers() {
        // det([[1, 3], [2, 4]]) with columns [1,3] and [2,4] = 1*4 - 2*3 = -2.
        let m = vec![vec![1.0, 3.0], vec![2.0, 4.0]];
        assert!(determinant_interval(&m).contains(-2.0));
    }

    #[test]
    #[should_panic(expected = "2x2, 3x3 and 4x4")]
    fn test_determinant_rejects_non_square() {
        determinant_interval(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_transpose_swaps_cells() {
        let m = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let t = transpose_interval(m.as_slice());
        assert_eq!(t.dims(), (2, 3));
        assert!(t[(0, 2)].contains(5.0));
        assert!(t[(1, 0)].contains(2.0));
    }

    #[test]
    fn test_matrix_addition_component_wise() {
        let x = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let y = vec![vec![10.0, 20.0], vec![30.0, 40.0]];
        let result = addition_matrix_interval(x.as_slice(), y.as_slice());
        assert!(result[(0, 0)].contains(11.0));
        assert!(result[(1, 1)].contains(44.0));
    }

    #[test]
    fn test_matrix_multiplication_by_identity() {
        let identity = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let m = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let result = multiplication_matrix_matrix_interval(&m, &identity);
        assert!(result[(0, 0)].contains(1.0));
        assert!(result[(0, 1)].contains(2.0));
        assert!(result[(1, 0)].contains(3.0));
        assert!(result[(1, 1)].contains(4.0));
    }

    #[test]
    fn test_matrix_vector_multiplication() {
        // Columns [1, 0] and [0, 1] scaled: identity times [5, 7].
        let identity = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let result = multiplication_matrix_vector_interval(&identity, &[5.0, 7.0]);
        assert!(result.contains(&[5.0, 7.0]));
    }

    #[test]
    fn test_vector_matrix_multiplication() {
        let identity = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let result = multiplication_vector_matrix_interval(&[5.0, 7.0], &identity);
        assert!(result.contains(&[5.0, 7.0]));
    }

    #[test]
    fn test_matrix_scalar_multiplication() {
        let m = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let result = multiplication_matrix_scalar_interval(&m, 2.0);
        assert!(result[(1, 1)].contains(8.0));
        let result = multiplication_scalar_matrix_interval(2.0, &m);
        assert!(result[(0, 0)].contains(2.0));
    }

    #[test]
    fn test_unpack2x16unorm_extremes() {
        // Low half 0x0000 -> 0.0, high half 0xffff -> 1.0.
        let result = unpack2x16unorm_interval(0xffff_0000);
        assert!(result[0].contains(0.0));
        assert!(result[1].contains(1.0));
    }

    #[test]
    fn test_unpack2x16snorm_clamps_most_negative() {
        // 0x8000 is -32768; division by 32767 lands just below -1, clamped.
        let result = unpack2x16snorm_interval(0x0000_8000);
        assert!(result[0].contains(-1.0));
    }

    #[test]
    fn test_unpack4x8unorm_extremes() {
        let result = unpack4x8unorm_interval(0xff00_00ff);
        assert!(result[0].contains(1.0));
        assert!(result[1].contains(0.0));
        assert!(result[2].contains(0.0));
        assert!(result[3].contains(1.0));
    }

    #[test]
    fn test_unpack2x16float_non_finite_half_is_any() {
        // 0x7c00 is +inf in binary16.
        let result = unpack2x16float_interval(0x0000_7c00);
        assert_eq!(result, FpVector::any(2));
    }

    #[test]
    fn test_unpack2x16float_one() {
        // 0x3c00 is 1.0 in binary16.
        let result = unpack2x16float_interval(0x3c00_3c00);
        assert!(result.contains(&[1.0, 1.0]));
    }
}
