//! Core types for QFIT
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Type aliases and validated wrapper types used throughout QFIT.

use crate::error::{QfitError, QfitResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed, wire 0 is the most significant bit)
/// Gantree: QubitId // pub type QubitId = usize
pub type QubitId = usize;

/// Rotation angle in radians
/// Gantree: Angle // pub type Angle = f64
pub type Angle = f64;

/// Weight array shape as (rows, cols)
pub type Shape = (usize, usize);

// ============================================================================
// Probability (Validated Wrapper)
// ============================================================================

/// Probability value in range [0, 1]
/// Gantree: Probability // 범위 검증 구조체
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probability(f64);

impl Probability {
    /// Create a new Probability with validation
    pub fn new(value: f64) -> QfitResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(QfitError::InvalidProbability(value));
        }
        Ok(Self(value))
    }

    /// Create by clamping into [0, 1] (NaN maps to 0)
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the probability value
    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Get the complement (1 - p)
    #[inline]
    pub fn complement(&self) -> f64 {
        1.0 - self.0
    }

    /// Zero probability
    pub const ZERO: Self = Self(0.0);

    /// Certainty (p = 1)
    pub const ONE: Self = Self(1.0);
}

impl Default for Probability {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

impl TryFrom<f64> for Probability {
    type Error = QfitError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ============================================================================
// Weights
// ============================================================================

/// Row-major 2-D weight array, one row per circuit layer
/// Gantree: Weights // 가중치 배열
///
/// Serializes as a nested `[[f64]]` array so hosts can persist it as plain
/// data. An empty array (`[]`) is a valid value meaning "no weights yet".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Weights {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Weights {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create from flat row-major data
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> QfitResult<Self> {
        if data.len() != rows * cols {
            return Err(QfitError::LengthMismatch {
                what: "weight data",
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create an all-zero array
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create the empty array
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create from nested rows, rejecting ragged input
    /// Gantree: from_rows(rows) -> Result<Self> // 중첩 배열
    pub fn from_rows(rows: Vec<Vec<f64>>) -> QfitResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);

        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(QfitError::RaggedWeights {
                    row,
                    len: values.len(),
                    expected: cols,
                });
            }
            data.extend_from_slice(values);
        }

        // [[]] collapses to the empty array
        let n_rows = if cols == 0 { 0 } else { rows.len() };
        Ok(Self {
            rows: n_rows,
            cols,
            data,
        })
    }

    /// Create by applying `f(row, col)` to every entry
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Shape as (rows, cols)
    #[inline]
    pub fn shape(&self) -> Shape {
        (self.rows, self.cols)
    }

    /// Number of rows (layers)
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (parameters per layer)
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for the empty array
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow row `r`
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Flat row-major view
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable flat row-major view
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Copy into nested rows
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    /// True if every entry is finite
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|w| w.is_finite())
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Fail with a shape error unless the shape equals `expected`
    /// Gantree: check_shape(&self, expected) -> Result // 형상 검증
    pub fn check_shape(&self, expected: Shape) -> QfitResult<()> {
        if self.shape() != expected {
            return Err(QfitError::WeightShapeMismatch {
                expected,
                got: self.shape(),
            });
        }
        Ok(())
    }
}

impl Index<(usize, usize)> for Weights {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        &self.data[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Weights {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        &mut self.data[r * self.cols + c]
    }
}

impl TryFrom<Vec<Vec<f64>>> for Weights {
    type Error = QfitError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Weights> for Vec<Vec<f64>> {
    fn from(weights: Weights) -> Self {
        weights.to_rows()
    }
}

impl fmt::Display for Weights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Weights({}x{})", self.rows, self.cols)
    }
}

// ============================================================================
// Tests
// ============================================================================
