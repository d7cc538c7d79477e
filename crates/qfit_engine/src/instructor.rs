//! Training engine
//!
//! Gantree: L6_Training → Instructor
//!
//! Owns a model, the fixed training domain and target, the seeded initial
//! weights, and one Adam state. Everything except `step` is a pure function
//! of its arguments.

use crate::config::SessionConfig;
use crate::frame::PredictionPoint;
use crate::optimizer::AdamOptimizer;
use log::debug;
use qfit_backend::{Backend, MixedStateSimulator};
use qfit_core::constants::training;
use qfit_core::{QfitError, QfitResult, Weights};
use qfit_model::{Model, OutputMode};
use qfit_noise::NoiseParams;
use qfit_spectrum::{analyze, SpectrumData};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Result of one optimizer step
/// Gantree: StepOutcome // 스텝 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Weights after the update
    pub weights: Weights,

    /// Cost at the weights before the update
    pub loss: f64,
}

/// Training engine for one session
/// Gantree: Instructor // 학습 엔진
#[derive(Debug, Clone)]
pub struct Instructor<B: Backend = MixedStateSimulator> {
    /// Model
    model: Model<B>,

    /// Training inputs
    x_domain: Vec<f64>,

    /// Targets at `x_domain`
    y_target: Vec<f64>,

    /// Seeded initial weights
    initial_weights: Weights,

    /// Adam state
    optimizer: AdamOptimizer,

    /// Seed of the initial weights
    seed: u64,
}

impl Instructor<MixedStateSimulator> {
    /// Create with the Circuit19 ansatz on the density-matrix simulator
    /// Gantree: new(n_qubits, n_layers, seed) -> Result<Instructor>
    pub fn new(n_qubits: usize, n_layers: usize, seed: u64) -> QfitResult<Self> {
        let model = Model::new(n_qubits, n_layers, training::CIRCUIT19_ID, OutputMode::Expectation)?;
        Ok(Self::with_model(model, seed, training::STEPSIZE))
    }

    /// Create from a session configuration
    pub fn from_config(config: &SessionConfig) -> QfitResult<Self> {
        config.validate()?;
        let model = Model::from_config(config.circuit_config())?;
        Ok(Self::with_model(model, config.seed, config.stepsize))
    }
}

impl<B: Backend> Instructor<B> {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create around an existing model
    pub fn with_model(model: Model<B>, seed: u64, stepsize: f64) -> Self {
        let x_domain = training_domain();
        let y_target = x_domain.iter().map(|&x| training::target(x)).collect();
        let (rows, cols) = model.param_shape();
        let initial_weights = initial_weights(rows, cols, seed);

        Self {
            model,
            x_domain,
            y_target,
            initial_weights,
            optimizer: AdamOptimizer::new(stepsize),
            seed,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Model
    pub fn model(&self) -> &Model<B> {
        &self.model
    }

    /// Training inputs
    pub fn x_domain(&self) -> &[f64] {
        &self.x_domain
    }

    /// Targets at the training inputs
    pub fn y_target(&self) -> &[f64] {
        &self.y_target
    }

    /// Seeded initial weights
    pub fn initial_weights(&self) -> &Weights {
        &self.initial_weights
    }

    /// Highest frequency the model can express
    pub fn max_freq(&self) -> usize {
        self.model.max_frequency()
    }

    /// Adam state
    pub fn optimizer(&self) -> &AdamOptimizer {
        &self.optimizer
    }

    /// Seed
    pub fn seed(&self) -> u64 {
        self.seed
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Model output at every input; `None` uses the initial weights
    /// Gantree: forward(xs, w?, noise) -> Result<Vec<f64>>
    pub fn forward(&self, xs: &[f64], weights: Option<&Weights>, noise: &NoiseParams) -> QfitResult<Vec<f64>> {
        let w = weights.unwrap_or(&self.initial_weights);
        self.model.expectations(w, xs, noise)
    }

    /// Mean squared error against `y_target` over the training domain
    /// Gantree: cost(w, y, noise) -> Result<f64>
    pub fn cost(&self, weights: &Weights, y_target: &[f64], noise: &NoiseParams) -> QfitResult<f64> {
        if y_target.len() != self.x_domain.len() {
            return Err(QfitError::LengthMismatch {
                what: "target values",
                expected: self.x_domain.len(),
                got: y_target.len(),
            });
        }

        let predicted = self.forward(&self.x_domain, Some(weights), noise)?;
        Ok(mean_squared_error(y_target, &predicted))
    }

    /// Training cost and its gradient
    ///
    /// ∂L/∂w = mean(−2(y − f)·∂f/∂w), with ∂f/∂w by parameter shift.
    pub fn cost_and_grad(&self, weights: &Weights, noise: &NoiseParams) -> QfitResult<(f64, Weights)> {
        weights.check_shape(self.model.param_shape())?;
        cost_and_grad(&self.model, &self.x_domain, &self.y_target, weights, noise)
    }

    // ========================================================================
    // Training
    // ========================================================================

    /// One Adam update; empty `weights` start from the initial weights
    /// Gantree: step(&mut, w, noise) -> Result<StepOutcome> // 1 스텝
    pub fn step(&mut self, weights: &Weights, noise: &NoiseParams) -> QfitResult<StepOutcome> {
        let start = if weights.is_empty() {
            self.initial_weights.clone()
        } else {
            weights.clone()
        };
        start.check_shape(self.model.param_shape())?;

        let (model, xs, ys) = (&self.model, &self.x_domain, &self.y_target);
        let (next, loss) = self
            .optimizer
            .step_and_cost(|w| cost_and_grad(model, xs, ys, w, noise), &start)?;

        debug!("step {}: loss={:.6} ({})", self.optimizer.steps(), loss, noise);
        Ok(StepOutcome { weights: next, loss })
    }

    // ========================================================================
    // Analysis
    // ========================================================================

    /// Fourier spectrum of the model output up to `max_freq`
    /// Gantree: calc_hist(w, noise) -> Result<(usize, SpectrumData)>
    pub fn calc_hist(&self, weights: &Weights, noise: &NoiseParams) -> QfitResult<(usize, SpectrumData)> {
        weights.check_shape(self.model.param_shape())?;
        analyze(|x| self.model.expectation(weights, x, noise), self.max_freq())
    }

    /// `(x, predicted, target)` over the training domain
    pub fn predictions(&self, weights: &Weights, noise: &NoiseParams) -> QfitResult<Vec<PredictionPoint>> {
        let predicted = self.forward(&self.x_domain, Some(weights), noise)?;
        Ok(self
            .x_domain
            .iter()
            .zip(predicted)
            .zip(&self.y_target)
            .map(|((&x, predicted), &target)| PredictionPoint {
                x,
                predicted,
                target,
            })
            .collect())
    }

    /// Clear the Adam moments
    pub fn reset_optimizer(&mut self) {
        self.optimizer.reset();
    }
}

impl<B: Backend> fmt::Display for Instructor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Instructor({}, {} samples, seed={}, {})",
            self.model,
            self.x_domain.len(),
            self.seed,
            self.optimizer
        )
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn cost_and_grad<B: Backend>(
    model: &Model<B>,
    xs: &[f64],
    ys: &[f64],
    weights: &Weights,
    noise: &NoiseParams,
) -> QfitResult<(f64, Weights)> {
    let n = xs.len() as f64;
    let mut cost = 0.0;
    let mut grad = Weights::zeros(weights.rows(), weights.cols());

    for (&x, &y) in xs.iter().zip(ys) {
        let f = model.expectation(weights, x, noise)?;
        let jac = model.jacobian(weights, x, noise)?;
        let residual = y - f;
        cost += residual * residual / n;
        for (g, d) in grad.as_mut_slice().iter_mut().zip(jac.as_slice()) {
            *g += -2.0 * residual * d / n;
        }
    }

    Ok((cost, grad))
}

/// Evenly spaced inputs over [−π, π], endpoints included
pub fn training_domain() -> Vec<f64> {
    linspace(training::DOMAIN_MIN, training::DOMAIN_MAX, training::sample_count())
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Uniform weights on (−2π, 2π], deterministic per seed
pub fn initial_weights(rows: usize, cols: usize, seed: u64) -> Weights {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Weights::from_fn(rows, cols, |_, _| 2.0 * PI * (1.0 - 2.0 * rng.gen::<f64>()))
}

fn mean_squared_error(target: &[f64], predicted: &[f64]) -> f64 {
    let n = target.len() as f64;
    target
        .iter()
        .zip(predicted)
        .map(|(y, f)| (y - f) * (y - f))
        .sum::<f64>()
        / n
}

// ============================================================================
// Tests
// ============================================================================
