//! Fixed-arity vectors and matrices of acceptance intervals.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::interval::FpInterval;

fn assert_arity(n: usize) {
    assert!((2..=4).contains(&n), "vector arity must be 2, 3 or 4, got {n}");
}

/// A 2, 3 or 4 element tuple of intervals bounding a vector-valued result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FpVector {
    elements: Vec<FpInterval>,
}

impl FpVector {
    pub fn new(elements: Vec<FpInterval>) -> Self {
        assert_arity(elements.len());
        Self { elements }
    }

    /// Point intervals for each lane of a concrete vector.
    pub fn from_points(values: &[f64]) -> Self {
        Self::new(values.iter().map(|&v| FpInterval::point(v)).collect())
    }

    /// The unconstrained vector: every lane accepts anything.
    pub fn any(arity: usize) -> Self {
        Self::new(vec![FpInterval::ANY; arity])
    }

    pub fn zero(arity: usize) -> Self {
        Self::new(vec![FpInterval::point(0.0); arity])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn elements(&self) -> &[FpInterval] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FpInterval> {
        self.elements.iter()
    }

    pub fn is_finite(&self) -> bool {
        self.elements.iter().all(|e| e.is_finite())
    }

    /// Per-lane containment of a concrete result vector. Arity must match.
    pub fn contains(&self, values: &[f64]) -> bool {
        assert_eq!(
            self.len(),
            values.len(),
            "containment is not defined for differing arities"
        );
        self.elements.iter().zip(values).all(|(e, &v)| e.contains(v))
    }

    /// Element-wise span of a non-empty set of equal-arity vectors.
    pub fn span_vectors<I: IntoIterator<Item = FpVector>>(vectors: I) -> FpVector {
        let mut iter = vectors.into_iter();
        let first = iter.next().expect("span of an empty set of vectors is not allowed");
        let mut elements = first.elements;
        for v in iter {
            assert_eq!(
                elements.len(),
                v.len(),
                "vector span is not defined for vectors of differing arities"
            );
            for (acc, e) in elements.iter_mut().zip(v.elements) {
                *acc = acc.span_with(e);
            }
        }
        FpVector { elements }
    }
}

impl Index<usize> for FpVector {
    type Output = FpInterval;

    fn index(&self, index: usize) -> &FpInterval {
        &self.elements[index]
    }
}

impl<'a> IntoIterator for &'a FpVector {
    type Item = &'a FpInterval;
    type IntoIter = std::slice::Iter<'a, FpInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Coercion of caller-supplied operands into an interval vector, so composed
/// calls can pass prior results where tests pass raw lanes.
pub trait IntoFpVector {
    fn into_fp_vector(self) -> FpVector;
}

impl IntoFpVector for FpVector {
    fn into_fp_vector(self) -> FpVector {
        self
    }
}

impl IntoFpVector for &FpVector {
    fn into_fp_vector(self) -> FpVector {
        self.clone()
    }
}

impl IntoFpVector for Vec<FpInterval> {
    fn into_fp_vector(self) -> FpVector {
        FpVector::new(self)
    }
}

impl IntoFpVector for &[FpInterval] {
    fn into_fp_vector(self) -> FpVector {
        FpVector::new(self.to_vec())
    }
}

impl IntoFpVector for &[f64] {
    fn into_fp_vector(self) -> FpVector {
        FpVector::from_points(self)
    }
}

impl<const N: usize> IntoFpVector for [f64; N] {
    fn into_fp_vector(self) -> FpVector {
        FpVector::from_points(&self)
    }
}

impl<const N: usize> IntoFpVector for &[f64; N] {
    fn into_fp_vector(self) -> FpVector {
        FpVector::from_points(self)
    }
}

/// A column-major grid of intervals bounding a matrix-valued result.
/// Dimensions are 2-4 columns by 2-4 rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FpMatrix {
    cols: Vec<Vec<FpInterval>>,
}

impl FpMatrix {
    pub fn new(cols: Vec<Vec<FpInterval>>) -> Self {
        assert_arity(cols.len());
        assert_arity(cols[0].len());
        assert!(
            cols.iter().all(|c| c.len() == cols[0].len()),
            "matrix columns must all have the same number of rows"
        );
        Self { cols }
    }

    pub fn from_points(values: &[Vec<f64>]) -> Self {
        Self::new(
            values
                .iter()
                .map(|col| col.iter().map(|&v| FpInterval::point(v)).collect())
                .collect(),
        )
    }

    pub fn any(num_cols: usize, num_rows: usize) -> Self {
        Self::new(vec![vec![FpInterval::ANY; num_rows]; num_cols])
    }

    /// (columns, rows)
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.cols.len(), self.cols[0].len())
    }

    #[inline]
    pub fn columns(&self) -> &[Vec<FpInterval>] {
        &self.cols
    }

    pub fn col(&self, i: usize) -> &[FpInterval] {
        &self.cols[i]
    }

    pub fn is_finite(&self) -> bool {
        self.cols.iter().all(|c| c.iter().all(|e| e.is_finite()))
    }

    /// Cells in column-major order.
    pub fn flatten(&self) -> Vec<FpInterval> {
        self.cols.iter().flatten().copied().collect()
    }

    /// Rebuilds a matrix from column-major cells.
    pub fn unflatten(cells: Vec<FpInterval>, num_cols: usize, num_rows: usize) -> Self {
        assert_eq!(cells.len(), num_cols * num_rows, "cell count does not match dimensions");
        Self::new(cells.chunks(num_rows).map(|c| c.to_vec()).collect())
    }

    /// Element-wise span of a non-empty set of equal-dimension matrices.
    pub fn span_matrices<I: IntoIterator<Item = FpMatrix>>(matrices: I) -> FpMatrix {
        let mut iter = matrices.into_iter();
        let first = iter.next().expect("span of an empty set of matrices is not allowed");
        let mut cols = first.cols;
        for m in iter {
            assert_eq!(
                (cols.len(), cols[0].len()),
                m.dims(),
                "matrix span is not defined for matrices of differing dimensions"
            );
            for (acc_col, col) in cols.iter_mut().zip(m.cols) {
                for (acc, e) in acc_col.iter_mut().zip(col) {
                    *acc = acc.span_with(e);
                }
            }
        }
        FpMatrix { cols }
    }
}

impl Index<(usize, usize)> for FpMatrix {
    type Output = FpInterval;

    fn index(&self, (col, row): (usize, usize)) -> &FpInterval {
        &self.cols[col][row]
    }
}

/// Matrix operand coercion, mirroring [`IntoFpVector`].
pub trait IntoFpMatrix {
    fn into_fp_matrix(self) -> FpMatrix;
}

impl IntoFpMatrix for FpMatrix {
    fn into_fp_matrix(self) -> FpMatrix {
        self
    }
}

impl IntoFpMatrix for &FpMatrix {
    fn into_fp_matrix(self) -> FpMatrix {
        self.clone()
    }
}

impl IntoFpMatrix for &[Vec<f64>] {
    fn into_fp_matrix(self) -> FpMatrix {
        FpMatrix::from_points(self)
    }
}

impl IntoFpMatrix for Vec<Vec<FpInterval>> {
    fn into_fp_matrix(self) -> FpMatrix {
        FpMatrix::new(self)
    }
}
