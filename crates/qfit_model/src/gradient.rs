//! Parameter-shift gradients
//!
//! Gantree: L4_Model → Gradient
//!
//! Exact derivatives of a circuit expectation from shifted evaluations.
//! Noise channels do not depend on the weights, so the rules stay exact
//! on the noisy circuit.

use crate::ansatz::ParamKind;
use qfit_core::constants::shift;
use qfit_core::{QfitError, QfitResult, Weights};

/// (coefficient, shift) terms of a shift rule
pub type ShiftRule = &'static [(f64, f64)];

const TWO_TERM: [(f64, f64); 2] = [(0.5, shift::HALF_PI), (-0.5, -shift::HALF_PI)];

const FOUR_TERM: [(f64, f64); 4] = [
    (shift::C_PLUS, shift::HALF_PI),
    (-shift::C_PLUS, -shift::HALF_PI),
    (-shift::C_MINUS, shift::THREE_HALF_PI),
    (shift::C_MINUS, -shift::THREE_HALF_PI),
];

/// Shift rule for a parameter kind
/// Gantree: shift_rule(kind) -> ShiftRule // 시프트 규칙
///
/// Pauli rotations use the two-term rule `(f(θ+π/2) − f(θ−π/2)) / 2`.
/// Controlled rotations have three generator eigenvalues and need four terms.
pub fn shift_rule(kind: ParamKind) -> ShiftRule {
    match kind {
        ParamKind::Rotation => &TWO_TERM,
        ParamKind::ControlledRotation => &FOUR_TERM,
    }
}

/// Gradient of `f` at `weights`, one entry per weight
/// Gantree: parameter_shift(f, w, kinds) -> Result<Weights> // 파라미터 시프트
///
/// `kinds` describes one weight row and is reused for every row.
pub fn parameter_shift<F>(mut f: F, weights: &Weights, kinds: &[ParamKind]) -> QfitResult<Weights>
where
    F: FnMut(&Weights) -> QfitResult<f64>,
{
    if kinds.len() != weights.cols() {
        return Err(QfitError::LengthMismatch {
            what: "parameter kinds",
            expected: weights.cols(),
            got: kinds.len(),
        });
    }

    let mut grad = Weights::zeros(weights.rows(), weights.cols());
    let mut shifted = weights.clone();

    for r in 0..weights.rows() {
        for (c, kind) in kinds.iter().enumerate() {
            let theta = weights[(r, c)];
            let mut sum = 0.0;
            for &(coeff, s) in shift_rule(*kind) {
                shifted[(r, c)] = theta + s;
                sum += coeff * f(&shifted)?;
            }
            shifted[(r, c)] = theta;
            grad[(r, c)] = sum;
        }
    }

    Ok(grad)
}

/// Central finite-difference gradient, for cross-checking
pub fn finite_difference<F>(mut f: F, weights: &Weights, h: f64) -> QfitResult<Weights>
where
    F: FnMut(&Weights) -> QfitResult<f64>,
{
    let mut grad = Weights::zeros(weights.rows(), weights.cols());
    let mut shifted = weights.clone();

    for r in 0..weights.rows() {
        for c in 0..weights.cols() {
            let theta = weights[(r, c)];
            shifted[(r, c)] = theta + h;
            let plus = f(&shifted)?;
            shifted[(r, c)] = theta - h;
            let minus = f(&shifted)?;
            shifted[(r, c)] = theta;
            grad[(r, c)] = (plus - minus) / (2.0 * h);
        }
    }

    Ok(grad)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_two_term_on_cosine() {
        // d/dθ cos θ = -sin θ
        let w = Weights::new(1, 1, vec![0.7]).unwrap();
        let grad = parameter_shift(|w| Ok(w[(0, 0)].cos()), &w, &[ParamKind::Rotation]).unwrap();
        assert_abs_diff_eq!(grad[(0, 0)], -(0.7f64).sin(), epsilon = 1e-12);
    }

    #[test]
    fn test_four_term_on_half_frequency() {
        // Controlled rotations yield terms in cos(θ/2) as well as cos θ
        let f = |w: &Weights| Ok((w[(0, 0)] / 2.0).cos() + 0.3 * w[(0, 0)].sin());
        let w = Weights::new(1, 1, vec![1.1]).unwrap();
        let grad = parameter_shift(f, &w, &[ParamKind::ControlledRotation]).unwrap();
        let expected = -0.5 * (0.55f64).sin() + 0.3 * (1.1f64).cos();
        assert_abs_diff_eq!(grad[(0, 0)], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_kind_count_mismatch() {
        let w = Weights::zeros(2, 3);
        let result = parameter_shift(|_| Ok(0.0), &w, &[ParamKind::Rotation]);
        assert!(result.unwrap_err().is_shape_error());
    }

    #[test]
    fn test_finite_difference() {
        let w = Weights::new(1, 2, vec![0.2, -0.4]).unwrap();
        let f = |w: &Weights| Ok(w[(0, 0)] * w[(0, 0)] + 3.0 * w[(0, 1)]);
        let grad = finite_difference(f, &w, 1e-6).unwrap();
        assert_abs_diff_eq!(grad[(0, 0)], 0.4, epsilon = 1e-6);
        assert_abs_diff_eq!(grad[(0, 1)], 3.0, epsilon = 1e-6);
    }
}
