//! Circuit builder for QFIT
//!
//! Gantree: L1_Circuit → CircuitBuilder
//!
//! Fluent builder for the encoding, ansatz, and noise layers.

use crate::channel::{Channel, ChannelKind};
use crate::circuit::{Circuit, Instruction};
use crate::error::{QfitError, QfitResult};
use crate::gate::Gate;
use crate::types::{Angle, QubitId};

/// Fluent circuit builder (consuming self pattern)
/// Gantree: CircuitBuilder // 빌더 패턴
///
/// The first invalid instruction is remembered and reported by [`build`].
///
/// [`build`]: CircuitBuilder::build
pub struct CircuitBuilder {
    /// Internal circuit being built
    circuit: Circuit,

    /// First error encountered while appending
    error: Option<QfitError>,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Create a new circuit builder
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
            error: None,
        }
    }

    fn push(mut self, instruction: Instruction) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.circuit.push(instruction) {
                self.error = Some(e);
            }
        }
        self
    }

    // ========================================================================
    // Gates
    // ========================================================================

    /// Add Hadamard gate
    pub fn h(self, qubit: QubitId) -> Self {
        self.push(Instruction::Gate(Gate::H(qubit)))
    }

    /// Add Pauli-X gate
    pub fn x(self, qubit: QubitId) -> Self {
        self.push(Instruction::Gate(Gate::X(qubit)))
    }

    /// Add Rx rotation
    /// Gantree: rx(self, q, a) -> Self // Rx 추가
    pub fn rx(self, qubit: QubitId, angle: Angle) -> Self {
        self.push(Instruction::Gate(Gate::Rx(qubit, angle)))
    }

    /// Add Ry rotation
    pub fn ry(self, qubit: QubitId, angle: Angle) -> Self {
        self.push(Instruction::Gate(Gate::Ry(qubit, angle)))
    }

    /// Add Rz rotation
    pub fn rz(self, qubit: QubitId, angle: Angle) -> Self {
        self.push(Instruction::Gate(Gate::Rz(qubit, angle)))
    }

    /// Add CNOT gate
    pub fn cnot(self, control: QubitId, target: QubitId) -> Self {
        self.push(Instruction::Gate(Gate::Cnot(control, target)))
    }

    /// Add controlled-Rx
    /// Gantree: crx(self, c, t, a) -> Self // CRx 추가
    pub fn crx(self, control: QubitId, target: QubitId, angle: Angle) -> Self {
        self.push(Instruction::Gate(Gate::Crx(control, target, angle)))
    }

    /// Add an arbitrary gate
    pub fn gate(self, gate: Gate) -> Self {
        self.push(Instruction::Gate(gate))
    }

    // ========================================================================
    // Noise
    // ========================================================================

    /// Add a noise channel on one qubit
    pub fn channel(self, kind: ChannelKind, qubit: QubitId, probability: f64) -> Self {
        self.push(Instruction::Noise(Channel::new(kind, qubit, probability)))
    }

    /// Add `channels` to every qubit: qubit-major, list order within a qubit
    /// Gantree: noise_layer(self, channels) -> Self // 노이즈 레이어
    pub fn noise_layer(mut self, channels: &[(ChannelKind, f64)]) -> Self {
        for q in 0..self.circuit.num_qubits() {
            for &(kind, p) in channels {
                self = self.channel(kind, q, p);
            }
        }
        self
    }

    // ========================================================================
    // Layer Patterns
    // ========================================================================

    /// Ry on every qubit with the same angle (angle encoding)
    pub fn ry_all(mut self, angle: Angle) -> Self {
        for q in 0..self.circuit.num_qubits() {
            self = self.ry(q, angle);
        }
        self
    }

    /// Hadamard on every qubit
    pub fn h_layer(mut self) -> Self {
        for q in 0..self.circuit.num_qubits() {
            self = self.h(q);
        }
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Finish building, reporting the first invalid instruction
    pub fn build(self) -> QfitResult<Circuit> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.circuit),
        }
    }

    /// Get reference to circuit being built
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let circuit = CircuitBuilder::new(2)
            .rx(0, 0.1)
            .rz(0, 0.2)
            .crx(1, 0, 0.3)
            .build()
            .unwrap();

        assert_eq!(circuit.gate_count(), 3);
        assert_eq!(circuit.count_2q(), 1);
    }

    #[test]
    fn test_builder_ry_all() {
        let circuit = CircuitBuilder::new(3).ry_all(0.7).build().unwrap();
        assert_eq!(circuit.gate_count(), 3);
        assert!(circuit.gates().all(|g| *g == Gate::Ry(g.qubits()[0], 0.7)));
    }

    #[test]
    fn test_builder_noise_layer_order() {
        let channels = [(ChannelKind::BitFlip, 0.1), (ChannelKind::Depolarizing, 0.2)];
        let circuit = CircuitBuilder::new(2).noise_layer(&channels).build().unwrap();

        let order: Vec<(ChannelKind, usize)> =
            circuit.channels().map(|c| (c.kind, c.qubit)).collect();
        assert_eq!(
            order,
            vec![
                (ChannelKind::BitFlip, 0),
                (ChannelKind::Depolarizing, 0),
                (ChannelKind::BitFlip, 1),
                (ChannelKind::Depolarizing, 1),
            ]
        );
    }

    #[test]
    fn test_builder_reports_first_error() {
        let result = CircuitBuilder::new(1).rx(0, 0.1).crx(0, 3, 0.2).rx(7, 0.0).build();
        assert!(matches!(
            result,
            Err(QfitError::QubitOutOfRange { qubit: 3, .. })
        ));
    }
}
