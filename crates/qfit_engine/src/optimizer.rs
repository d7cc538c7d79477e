//! Adam optimizer
//!
//! Gantree: L6_Training → AdamOptimizer
//!
//! Bias correction is folded into the step size and ε is added to the raw
//! second-moment root:
//!
//! ```text
//! fm ← β1·fm + (1−β1)·g
//! sm ← β2·sm + (1−β2)·g²
//! α_t = stepsize·√(1−β2^t)/(1−β1^t)
//! w ← w − α_t·fm/(√sm + ε)
//! ```

use qfit_core::constants::training;
use qfit_core::{QfitResult, Weights};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Adam with moment state
/// Gantree: AdamOptimizer // 아담 옵티마이저
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdamOptimizer {
    /// Base step size
    stepsize: f64,

    /// First-moment decay
    beta1: f64,

    /// Second-moment decay
    beta2: f64,

    /// Denominator offset
    eps: f64,

    /// First moment
    fm: Vec<f64>,

    /// Second moment
    sm: Vec<f64>,

    /// Steps taken
    t: u32,
}

impl Default for AdamOptimizer {
    fn default() -> Self {
        Self::new(training::STEPSIZE)
    }
}

impl AdamOptimizer {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create with the default betas and ε
    pub fn new(stepsize: f64) -> Self {
        Self {
            stepsize,
            beta1: training::BETA1,
            beta2: training::BETA2,
            eps: training::EPSILON,
            fm: Vec::new(),
            sm: Vec::new(),
            t: 0,
        }
    }

    /// Set betas
    pub fn with_betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    /// Set ε
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Base step size
    pub fn stepsize(&self) -> f64 {
        self.stepsize
    }

    /// Steps taken since construction or reset
    pub fn steps(&self) -> u32 {
        self.t
    }

    /// First moment
    pub fn first_moment(&self) -> &[f64] {
        &self.fm
    }

    /// Second moment
    pub fn second_moment(&self) -> &[f64] {
        &self.sm
    }

    // ========================================================================
    // Update
    // ========================================================================

    /// Apply one update and return the new weights
    /// Gantree: apply_grad(w, g) -> Weights // 가중치 갱신
    pub fn apply_grad(&mut self, weights: &Weights, grad: &Weights) -> QfitResult<Weights> {
        grad.check_shape(weights.shape())?;

        let n = weights.len();
        if self.fm.len() != n {
            self.fm = vec![0.0; n];
            self.sm = vec![0.0; n];
        }

        self.t += 1;
        let t = self.t as i32;
        let alpha = self.stepsize * (1.0 - self.beta2.powi(t)).sqrt() / (1.0 - self.beta1.powi(t));

        let mut next = weights.clone();
        let params = next.as_mut_slice();
        for (i, &g) in grad.as_slice().iter().enumerate() {
            self.fm[i] = self.beta1 * self.fm[i] + (1.0 - self.beta1) * g;
            self.sm[i] = self.beta2 * self.sm[i] + (1.0 - self.beta2) * g * g;
            params[i] -= alpha * self.fm[i] / (self.sm[i].sqrt() + self.eps);
        }

        Ok(next)
    }

    /// One update from an objective returning `(cost, grad)`
    ///
    /// Returns the new weights and the cost at the weights passed in.
    pub fn step_and_cost<F>(&mut self, mut objective: F, weights: &Weights) -> QfitResult<(Weights, f64)>
    where
        F: FnMut(&Weights) -> QfitResult<(f64, Weights)>,
    {
        let (cost, grad) = objective(weights)?;
        let next = self.apply_grad(weights, &grad)?;
        Ok((next, cost))
    }

    /// Clear moments and the step counter
    pub fn reset(&mut self) {
        self.fm.clear();
        self.sm.clear();
        self.t = 0;
    }
}

impl fmt::Display for AdamOptimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Adam(stepsize={}, beta1={}, beta2={}, t={})",
            self.stepsize, self.beta1, self.beta2, self.t
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_first_step_moves_by_stepsize() {
        let mut opt = AdamOptimizer::new(0.05);
        let w = Weights::new(1, 3, vec![0.0, 1.0, -2.0]).unwrap();
        let g = Weights::new(1, 3, vec![0.3, -4.0, 1e-3]).unwrap();

        let next = opt.apply_grad(&w, &g).unwrap();
        // fm/√sm = sign(g) on the first step and α_1 = stepsize
        assert_abs_diff_eq!(next[(0, 0)], -0.05, epsilon = 1e-6);
        assert_abs_diff_eq!(next[(0, 1)], 1.05, epsilon = 1e-6);
        assert_abs_diff_eq!(next[(0, 2)], -2.05, epsilon = 1e-4);
        assert_eq!(opt.steps(), 1);
    }

    #[test]
    fn test_zero_gradient_keeps_weights() {
        let mut opt = AdamOptimizer::default();
        let w = Weights::new(1, 2, vec![0.4, 0.5]).unwrap();
        let next = opt.apply_grad(&w, &Weights::zeros(1, 2)).unwrap();
        assert_eq!(next, w);
    }

    #[test]
    fn test_step_and_cost_reports_old_cost() {
        let mut opt = AdamOptimizer::default();
        let w = Weights::new(1, 1, vec![1.0]).unwrap();
        // cost = w², grad = 2w
        let quad = |w: &Weights| -> QfitResult<(f64, Weights)> {
            let x = w[(0, 0)];
            Ok((x * x, Weights::new(1, 1, vec![2.0 * x])?))
        };

        let (next, cost) = opt.step_and_cost(quad, &w).unwrap();
        assert_abs_diff_eq!(cost, 1.0);
        assert!(next[(0, 0)] < 1.0);
    }

    #[test]
    fn test_converges_on_quadratic() {
        let mut opt = AdamOptimizer::new(0.1);
        let mut w = Weights::new(1, 2, vec![2.0, -1.5]).unwrap();
        let bowl = |w: &Weights| -> QfitResult<(f64, Weights)> {
            let (a, b) = (w[(0, 0)], w[(0, 1)]);
            Ok((a * a + b * b, Weights::new(1, 2, vec![2.0 * a, 2.0 * b])?))
        };

        for _ in 0..300 {
            w = opt.step_and_cost(bowl, &w).unwrap().0;
        }
        assert!(w[(0, 0)].abs() < 0.2 && w[(0, 1)].abs() < 0.2, "{}", w);
    }

    #[test]
    fn test_reset() {
        let mut opt = AdamOptimizer::default();
        let w = Weights::zeros(2, 2);
        let g = Weights::from_fn(2, 2, |r, c| (r + c) as f64);
        opt.apply_grad(&w, &g).unwrap();
        assert_eq!(opt.first_moment().len(), 4);

        opt.reset();
        assert_eq!(opt.steps(), 0);
        assert!(opt.first_moment().is_empty());
    }

    #[test]
    fn test_shape_mismatch() {
        let mut opt = AdamOptimizer::default();
        let result = opt.apply_grad(&Weights::zeros(2, 2), &Weights::zeros(2, 3));
        assert!(result.unwrap_err().is_shape_error());
    }
}
