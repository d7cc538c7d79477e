//! Noisy variational quantum model
//!
//! Gantree: L4_Model → Model
//!
//! Per layer: RY angle encoding of the scalar input on every qubit, one
//! ansatz layer with that layer's weight row, then the five noise channels on
//! every qubit. Reads out ⟨Z⟩ on qubit 0 or the final mixed state.

use crate::ansatz::{AnsatzKind, ParamKind};
use crate::gradient::parameter_shift;
use log::trace;
use qfit_backend::{Backend, MixedStateSimulator, Readout};
use qfit_core::constants::training;
use qfit_core::{Circuit, CircuitBuilder, QfitError, QfitResult, Shape, Weights};
use qfit_noise::NoiseParams;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Model output: ⟨Z0⟩ or the full state
pub type ModelOutput = Readout;

/// Qubit whose ⟨Z⟩ is the model's scalar output
pub const READOUT_QUBIT: usize = 0;

/// What `evaluate` returns
/// Gantree: OutputMode // 출력 모드
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// ⟨Z⟩ on qubit 0
    #[default]
    Expectation,
    /// Full (mixed) state
    StateVector,
}

/// Circuit configuration, immutable after model construction
/// Gantree: CircuitConfig // 회로 설정
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitConfig {
    /// Number of qubits (≥ 1)
    pub n_qubits: usize,
    /// Number of layers (≥ 1)
    pub n_layers: usize,
    /// Ansatz id
    #[serde(default = "default_ansatz_id")]
    pub ansatz_id: u32,
    /// Output mode
    #[serde(default)]
    pub output_mode: OutputMode,
}

fn default_ansatz_id() -> u32 {
    training::CIRCUIT19_ID
}

impl CircuitConfig {
    /// Expectation-mode Circuit19 configuration
    pub fn new(n_qubits: usize, n_layers: usize) -> Self {
        Self {
            n_qubits,
            n_layers,
            ansatz_id: training::CIRCUIT19_ID,
            output_mode: OutputMode::Expectation,
        }
    }

    /// Set ansatz id
    pub fn with_ansatz_id(mut self, ansatz_id: u32) -> Self {
        self.ansatz_id = ansatz_id;
        self
    }

    /// Set output mode
    pub fn with_output_mode(mut self, output_mode: OutputMode) -> Self {
        self.output_mode = output_mode;
        self
    }

    /// Validate counts and resolve the ansatz
    pub fn validate(&self) -> QfitResult<AnsatzKind> {
        if self.n_qubits == 0 {
            return Err(QfitError::InvalidQubitCount(self.n_qubits));
        }
        if self.n_layers == 0 {
            return Err(QfitError::InvalidLayerCount(self.n_layers));
        }
        AnsatzKind::from_id(self.ansatz_id)
    }
}

/// Quantum model over a backend
/// Gantree: Model // 양자 모델
#[derive(Debug, Clone)]
pub struct Model<B: Backend = MixedStateSimulator> {
    /// Circuit configuration
    config: CircuitConfig,

    /// Resolved ansatz
    ansatz: AnsatzKind,

    /// Per-row parameter kinds
    param_kinds: Vec<ParamKind>,

    /// Execution backend
    backend: B,
}

impl Model<MixedStateSimulator> {
    /// Create a model on the density-matrix simulator
    /// Gantree: new(n_qubits, n_layers, ansatz_id, mode) -> Result<Model>
    pub fn new(
        n_qubits: usize,
        n_layers: usize,
        ansatz_id: u32,
        output_mode: OutputMode,
    ) -> QfitResult<Self> {
        let config = CircuitConfig::new(n_qubits, n_layers)
            .with_ansatz_id(ansatz_id)
            .with_output_mode(output_mode);
        Self::from_config(config)
    }

    /// Create from a configuration
    pub fn from_config(config: CircuitConfig) -> QfitResult<Self> {
        Self::with_backend(config, MixedStateSimulator::new())
    }
}

impl<B: Backend> Model<B> {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a model on a specific backend
    pub fn with_backend(config: CircuitConfig, backend: B) -> QfitResult<Self> {
        let ansatz = config.validate()?;
        if config.n_qubits > backend.num_qubits() {
            return Err(QfitError::InvalidQubitCount(config.n_qubits));
        }

        Ok(Self {
            param_kinds: ansatz.param_kinds(config.n_qubits),
            config,
            ansatz,
            backend,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Circuit configuration
    pub fn config(&self) -> &CircuitConfig {
        &self.config
    }

    /// Number of qubits
    pub fn n_qubits(&self) -> usize {
        self.config.n_qubits
    }

    /// Number of layers
    pub fn n_layers(&self) -> usize {
        self.config.n_layers
    }

    /// Resolved ansatz
    pub fn ansatz(&self) -> AnsatzKind {
        self.ansatz
    }

    /// Output mode
    pub fn output_mode(&self) -> OutputMode {
        self.config.output_mode
    }

    /// Backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Required weight shape `(n_layers, 3·n_qubits − 1)`
    pub fn param_shape(&self) -> Shape {
        self.ansatz.param_shape(self.n_qubits(), self.n_layers())
    }

    /// Highest frequency the encoding can produce: one per RY per layer
    pub fn max_frequency(&self) -> usize {
        self.n_qubits() * self.n_layers()
    }

    // ========================================================================
    // Circuit Construction
    // ========================================================================

    /// Angle encoding: RY(x) on every qubit
    /// Gantree: encode(builder, x) -> CircuitBuilder // iec
    pub fn encode(&self, builder: CircuitBuilder, x: f64) -> CircuitBuilder {
        builder.ry_all(x)
    }

    /// Full noisy circuit for one input
    /// Gantree: build_circuit(w, x, noise) -> Result<Circuit>
    pub fn build_circuit(&self, weights: &Weights, x: f64, noise: &NoiseParams) -> QfitResult<Circuit> {
        weights.check_shape(self.param_shape())?;

        let channels = noise.channels();
        let mut builder = CircuitBuilder::new(self.n_qubits());
        for l in 0..self.n_layers() {
            builder = self.encode(builder, x);
            builder = self.ansatz.apply_layer(builder, weights.row(l));
            builder = builder.noise_layer(&channels);
        }
        builder.build()
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Evaluate in the configured output mode
    /// Gantree: evaluate(w, x, noise) -> Result<ModelOutput>
    pub fn evaluate(&self, weights: &Weights, x: f64, noise: &NoiseParams) -> QfitResult<ModelOutput> {
        let circuit = self.build_circuit(weights, x, noise)?;
        let full_state = self.output_mode() == OutputMode::StateVector;
        self.backend.readout(&circuit, READOUT_QUBIT, full_state)
    }

    /// ⟨Z0⟩ regardless of output mode
    pub fn expectation(&self, weights: &Weights, x: f64, noise: &NoiseParams) -> QfitResult<f64> {
        let circuit = self.build_circuit(weights, x, noise)?;
        let value = self.backend.expectation_z(&circuit, READOUT_QUBIT)?;
        trace!("f({:.4}) = {:.6}", x, value);
        Ok(value)
    }

    /// ⟨Z0⟩ at every input, in order
    pub fn expectations(&self, weights: &Weights, xs: &[f64], noise: &NoiseParams) -> QfitResult<Vec<f64>> {
        weights.check_shape(self.param_shape())?;
        xs.iter().map(|&x| self.expectation(weights, x, noise)).collect()
    }

    /// ∂⟨Z0⟩/∂w for every weight, by parameter shift
    /// Gantree: jacobian(w, x, noise) -> Result<Weights> // 기울기
    pub fn jacobian(&self, weights: &Weights, x: f64, noise: &NoiseParams) -> QfitResult<Weights> {
        weights.check_shape(self.param_shape())?;
        parameter_shift(
            |w| self.expectation(w, x, noise),
            weights,
            &self.param_kinds,
        )
    }
}

impl<B: Backend> fmt::Display for Model<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Model({} qubits, {} layers, {}, {:?}, backend={})",
            self.n_qubits(),
            self.n_layers(),
            self.ansatz,
            self.output_mode(),
            self.backend.name()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::finite_difference;
    use approx::assert_abs_diff_eq;
    use qfit_core::ChannelKind;

    fn model(n_qubits: usize, n_layers: usize) -> Model {
        Model::new(n_qubits, n_layers, 19, OutputMode::Expectation).unwrap()
    }

    fn sample_weights(shape: Shape) -> Weights {
        Weights::from_fn(shape.0, shape.1, |r, c| 0.37 * (r as f64 + 1.0) - 0.21 * c as f64)
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            Model::new(0, 2, 19, OutputMode::Expectation),
            Err(QfitError::InvalidQubitCount(0))
        ));
        assert!(matches!(
            Model::new(2, 0, 19, OutputMode::Expectation),
            Err(QfitError::InvalidLayerCount(0))
        ));
        assert!(matches!(
            Model::new(2, 2, 5, OutputMode::Expectation),
            Err(QfitError::UnsupportedAnsatz(5))
        ));
    }

    #[test]
    fn test_param_shape() {
        assert_eq!(model(2, 4).param_shape(), (4, 5));
        assert_eq!(model(3, 2).param_shape(), (2, 8));
        assert_eq!(model(2, 4).max_frequency(), 8);
    }

    #[test]
    fn test_zero_reference_value() {
        // Zero input and zero weights leave |0…0⟩ untouched: ⟨Z0⟩ = 1
        for (n, l) in [(1, 1), (2, 4), (3, 2)] {
            let m = model(n, l);
            let (rows, cols) = m.param_shape();
            let z = m
                .expectation(&Weights::zeros(rows, cols), 0.0, &NoiseParams::noiseless())
                .unwrap();
            assert_abs_diff_eq!(z, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_qubit_closed_form() {
        // One qubit, one layer, zero weights: RY(x)|0⟩ gives ⟨Z⟩ = cos x
        let m = model(1, 1);
        for x in [-2.0, -0.5, 0.3, 1.7] {
            let z = m.expectation(&Weights::zeros(1, 2), x, &NoiseParams::noiseless()).unwrap();
            assert_abs_diff_eq!(z, x.cos(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_bit_flip_scales_single_qubit() {
        let m = model(1, 1);
        let noise = NoiseParams::only(ChannelKind::BitFlip, 0.2);
        let z = m.expectation(&Weights::zeros(1, 2), 0.0, &noise).unwrap();
        assert_abs_diff_eq!(z, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_shape_mismatch() {
        let m = model(2, 4);
        let noise = NoiseParams::noiseless();
        for bad in [Weights::zeros(4, 6), Weights::zeros(3, 5), Weights::empty()] {
            assert!(m.evaluate(&bad, 0.1, &noise).unwrap_err().is_shape_error());
            assert!(m.jacobian(&bad, 0.1, &noise).unwrap_err().is_shape_error());
        }
    }

    #[test]
    fn test_circuit_layout() {
        let m = model(2, 4);
        let circuit = m
            .build_circuit(&Weights::zeros(4, 5), 0.5, &NoiseParams::noiseless())
            .unwrap();
        // per layer: 2 RY + 4 rotations + 1 CRX, and 5 channels on each of 2 qubits
        assert_eq!(circuit.gate_count(), 4 * 7);
        assert_eq!(circuit.channel_count(), 4 * 10);
        assert!(circuit.is_noiseless());
    }

    #[test]
    fn test_state_vector_mode() {
        let m = Model::new(2, 2, 19, OutputMode::StateVector).unwrap();
        let w = sample_weights(m.param_shape());
        let noise = NoiseParams::new(0.05, 0.05, 0.1, 0.1, 0.05);

        let out = m.evaluate(&w, 0.4, &noise).unwrap();
        let rho = out.state().unwrap();
        assert_eq!(rho.dim(), 4);
        assert_abs_diff_eq!(rho.trace().re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            rho.expectation_z(0),
            m.expectation(&w, 0.4, &noise).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_output_bounded_over_noise_grid() {
        let m = model(2, 2);
        let w = sample_weights(m.param_shape());
        for kind in ChannelKind::ORDER {
            for p in [0.0, 0.25, 0.5, 0.75, 1.0] {
                let noise = NoiseParams::only(kind, p);
                let z = m.expectation(&w, 0.9, &noise).unwrap();
                assert!((-1.0 - 1e-12..=1.0 + 1e-12).contains(&z), "{} p={} -> {}", kind, p, z);
            }
        }
        let all = NoiseParams::new(1.0, 1.0, 1.0, 1.0, 1.0);
        let z = m.expectation(&w, 0.9, &all).unwrap();
        assert!(z.abs() <= 1.0 + 1e-12);
    }

    #[test]
    fn test_jacobian_matches_finite_difference() {
        let m = model(2, 2);
        let w = sample_weights(m.param_shape());
        let noise = NoiseParams::new(0.02, 0.03, 0.05, 0.04, 0.01);

        let shift = m.jacobian(&w, 0.8, &noise).unwrap();
        let fd = finite_difference(|w| m.expectation(w, 0.8, &noise), &w, 1e-5).unwrap();

        for (a, b) in shift.as_slice().iter().zip(fd.as_slice()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_evaluate_is_pure() {
        let m = model(2, 3);
        let w = sample_weights(m.param_shape());
        let noise = NoiseParams::new(0.1, 0.0, 0.2, 0.0, 0.1);
        let a = m.expectation(&w, -1.2, &noise).unwrap();
        let b = m.expectation(&w, -1.2, &noise).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
