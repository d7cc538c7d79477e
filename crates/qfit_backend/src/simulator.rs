//! Mixed-state simulator backend for QFIT
//!
//! Gantree: L3_Backend → MixedStateSimulator
//!
//! Exact density-matrix simulation: gates as ρ → UρU†, noise channels as
//! Kraus sums. No sampling, so every run is deterministic.

use crate::density::DensityMatrix;
use crate::execution::Backend;
use log::trace;
use num_complex::Complex64;
use qfit_core::{Circuit, Gate, Instruction, QfitError, QfitResult};
use qfit_noise::kraus::{self, kraus_operators, Matrix2};

/// Largest register the simulator accepts by default (4^10 entries)
pub const DEFAULT_MAX_QUBITS: usize = 10;

/// Density-matrix simulator
/// Gantree: MixedStateSimulator // 혼합 상태 시뮬레이터
#[derive(Debug, Clone)]
pub struct MixedStateSimulator {
    /// Backend name
    name: String,

    /// Largest accepted circuit
    max_qubits: usize,
}

impl Default for MixedStateSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl MixedStateSimulator {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create simulator with the default qubit limit
    pub fn new() -> Self {
        Self {
            name: "qfit_mixed_simulator".to_string(),
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }

    /// Set the qubit limit
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set backend name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    fn apply_instruction(&self, rho: &mut DensityMatrix, instruction: &Instruction) {
        match instruction {
            Instruction::Gate(gate) => Self::apply_gate(rho, gate),
            Instruction::Noise(channel) => {
                if channel.is_identity() {
                    return;
                }
                rho.apply_kraus(
                    channel.qubit,
                    &kraus_operators(channel.kind, channel.probability),
                );
            }
        }
    }

    fn apply_gate(rho: &mut DensityMatrix, gate: &Gate) {
        match *gate {
            Gate::H(q) => rho.apply_single(q, &hadamard()),
            Gate::X(q) => rho.apply_single(q, &kraus::pauli_x()),
            Gate::Y(q) => rho.apply_single(q, &kraus::pauli_y()),
            Gate::Z(q) => rho.apply_single(q, &kraus::pauli_z()),
            Gate::Rx(q, angle) => rho.apply_single(q, &rx(angle)),
            Gate::Ry(q, angle) => rho.apply_single(q, &ry(angle)),
            Gate::Rz(q, angle) => rho.apply_single(q, &rz(angle)),
            Gate::Cnot(c, t) => rho.apply_controlled(c, t, &kraus::pauli_x()),
            Gate::Crx(c, t, angle) => rho.apply_controlled(c, t, &rx(angle)),
        }
    }
}

impl Backend for MixedStateSimulator {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_qubits(&self) -> usize {
        self.max_qubits
    }

    fn run(&self, circuit: &Circuit) -> QfitResult<DensityMatrix> {
        let n = circuit.num_qubits();
        if n == 0 || n > self.max_qubits {
            return Err(QfitError::InvalidQubitCount(n));
        }

        let mut rho = DensityMatrix::new(n);
        for instruction in circuit.instructions() {
            self.apply_instruction(&mut rho, instruction);
        }

        trace!("{} ran {} -> {}", self.name, circuit, rho);
        Ok(rho)
    }
}

// ============================================================================
// Gate Matrices
// ============================================================================

fn real(x: f64) -> Complex64 {
    Complex64::new(x, 0.0)
}

/// Hadamard
pub fn hadamard() -> Matrix2 {
    let h = std::f64::consts::FRAC_1_SQRT_2;
    [[real(h), real(h)], [real(h), real(-h)]]
}

/// RX(θ) = exp(-iθX/2)
pub fn rx(angle: f64) -> Matrix2 {
    let c = (angle / 2.0).cos();
    let s = (angle / 2.0).sin();
    [
        [real(c), Complex64::new(0.0, -s)],
        [Complex64::new(0.0, -s), real(c)],
    ]
}

/// RY(θ) = exp(-iθY/2)
pub fn ry(angle: f64) -> Matrix2 {
    let c = (angle / 2.0).cos();
    let s = (angle / 2.0).sin();
    [[real(c), real(-s)], [real(s), real(c)]]
}

/// RZ(θ) = exp(-iθZ/2)
pub fn rz(angle: f64) -> Matrix2 {
    [
        [Complex64::from_polar(1.0, -angle / 2.0), real(0.0)],
        [real(0.0), Complex64::from_polar(1.0, angle / 2.0)],
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qfit_core::{CircuitBuilder, ChannelKind};
    use std::f64::consts::PI;

    #[test]
    fn test_ry_rotation_expectation() {
        let sim = MixedStateSimulator::new();
        for theta in [0.0, 0.4, 1.3, PI] {
            let circuit = CircuitBuilder::new(1).ry(0, theta).build().unwrap();
            let z = sim.expectation_z(&circuit, 0).unwrap();
            assert_abs_diff_eq!(z, theta.cos(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rx_pi_flips() {
        let sim = MixedStateSimulator::new();
        let circuit = CircuitBuilder::new(1).rx(0, PI).build().unwrap();
        let rho = sim.run(&circuit).unwrap();
        assert_abs_diff_eq!(rho.probabilities()[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rz_keeps_populations() {
        let sim = MixedStateSimulator::new();
        let circuit = CircuitBuilder::new(1).h(0).rz(0, 0.9).build().unwrap();
        let rho = sim.run(&circuit).unwrap();
        assert_abs_diff_eq!(rho.expectation_z(0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rho.purity(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bell_state() {
        let sim = MixedStateSimulator::new();
        let circuit = CircuitBuilder::new(2).h(0).cnot(0, 1).build().unwrap();
        let probs = sim.run(&circuit).unwrap().probabilities();
        assert_abs_diff_eq!(probs[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(probs[3], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_crx_on_excited_control() {
        let sim = MixedStateSimulator::new();
        let theta = 0.8;
        let circuit = CircuitBuilder::new(2)
            .x(0)
            .crx(0, 1, theta)
            .build()
            .unwrap();
        let z1 = sim.expectation_z(&circuit, 1).unwrap();
        assert_abs_diff_eq!(z1, theta.cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_noise_preserves_trace() {
        let sim = MixedStateSimulator::new();
        let circuit = CircuitBuilder::new(2)
            .h(0)
            .crx(0, 1, 1.1)
            .noise_layer(&[
                (ChannelKind::BitFlip, 0.1),
                (ChannelKind::PhaseFlip, 0.2),
                (ChannelKind::AmplitudeDamping, 0.3),
                (ChannelKind::PhaseDamping, 0.4),
                (ChannelKind::Depolarizing, 0.5),
            ])
            .build()
            .unwrap();
        let rho = sim.run(&circuit).unwrap();
        assert_abs_diff_eq!(rho.trace().re, 1.0, epsilon = 1e-12);
        assert!(rho.is_hermitian(1e-12));
        assert!(rho.purity() < 1.0);
    }

    #[test]
    fn test_qubit_limit() {
        let sim = MixedStateSimulator::new().with_max_qubits(2);
        let circuit = CircuitBuilder::new(3).h(0).build().unwrap();
        assert!(matches!(
            sim.run(&circuit),
            Err(QfitError::InvalidQubitCount(3))
        ));
    }
}
