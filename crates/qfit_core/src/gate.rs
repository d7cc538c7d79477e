//! Quantum gate definitions for QFIT
//!
//! Gantree: L1_Circuit → Gate
//!
//! The gate set needed by the data-encoding and ansatz layers, plus a few
//! fixed gates used to prepare reference states.

use crate::types::{Angle, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum gate enumeration
/// Gantree: Gate // 게이트 enum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    // ========================================================================
    // Single-Qubit Gates (Non-Parameterized)
    // ========================================================================
    /// Hadamard gate
    H(QubitId),

    /// Pauli-X gate (NOT)
    X(QubitId),

    /// Pauli-Y gate
    Y(QubitId),

    /// Pauli-Z gate
    Z(QubitId),

    // ========================================================================
    // Single-Qubit Parameterized Rotation Gates
    // ========================================================================
    /// Rotation around X-axis
    /// Gantree: Rx(QubitId, Angle) // X 회전
    Rx(QubitId, Angle),

    /// Rotation around Y-axis (data encoding)
    /// Gantree: Ry(QubitId, Angle) // Y 회전
    Ry(QubitId, Angle),

    /// Rotation around Z-axis
    /// Gantree: Rz(QubitId, Angle) // Z 회전
    Rz(QubitId, Angle),

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================
    /// Controlled-NOT (CX)
    Cnot(QubitId, QubitId),

    /// Controlled-Rx (control, target, angle)
    /// Gantree: Crx(QubitId, QubitId, Angle) // 제어 X 회전
    Crx(QubitId, QubitId, Angle),
}

impl Gate {
    // ========================================================================
    // Gate Properties
    // ========================================================================

    /// Get qubits involved in this gate
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::H(q)
            | Gate::X(q)
            | Gate::Y(q)
            | Gate::Z(q)
            | Gate::Rx(q, _)
            | Gate::Ry(q, _)
            | Gate::Rz(q, _) => vec![*q],

            Gate::Cnot(c, t) | Gate::Crx(c, t, _) => vec![*c, *t],
        }
    }

    /// Check if gate is single-qubit
    pub fn is_single_qubit(&self) -> bool {
        !self.is_two_qubit()
    }

    /// Check if gate is two-qubit
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Gate::Cnot(_, _) | Gate::Crx(_, _, _))
    }

    /// Check if gate is parameterized
    pub fn is_parameterized(&self) -> bool {
        self.angle().is_some()
    }

    /// Rotation angle, if any
    pub fn angle(&self) -> Option<Angle> {
        match self {
            Gate::Rx(_, a) | Gate::Ry(_, a) | Gate::Rz(_, a) | Gate::Crx(_, _, a) => Some(*a),
            _ => None,
        }
    }

    /// Get gate name
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H(_) => "h",
            Gate::X(_) => "x",
            Gate::Y(_) => "y",
            Gate::Z(_) => "z",
            Gate::Rx(_, _) => "rx",
            Gate::Ry(_, _) => "ry",
            Gate::Rz(_, _) => "rz",
            Gate::Cnot(_, _) => "cx",
            Gate::Crx(_, _, _) => "crx",
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::H(q) | Gate::X(q) | Gate::Y(q) | Gate::Z(q) => write!(f, "{} q[{}]", self.name(), q),
            Gate::Rx(q, theta) | Gate::Ry(q, theta) | Gate::Rz(q, theta) => {
                write!(f, "{}({}) q[{}]", self.name(), theta, q)
            }
            Gate::Cnot(c, t) => write!(f, "cx q[{}],q[{}]", c, t),
            Gate::Crx(c, t, theta) => write!(f, "crx({}) q[{}],q[{}]", theta, c, t),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_qubits() {
        assert_eq!(Gate::H(0).qubits(), vec![0]);
        assert_eq!(Gate::Crx(1, 0, 0.3).qubits(), vec![1, 0]);
    }

    #[test]
    fn test_gate_classification() {
        assert!(Gate::Ry(0, 1.0).is_single_qubit());
        assert!(Gate::Crx(0, 1, 1.0).is_two_qubit());
        assert!(Gate::Crx(0, 1, 1.0).is_parameterized());
        assert!(!Gate::Cnot(0, 1).is_parameterized());
        assert_eq!(Gate::Rz(0, 0.25).angle(), Some(0.25));
    }

    #[test]
    fn test_gate_display() {
        assert_eq!(Gate::H(0).to_string(), "h q[0]");
        assert_eq!(Gate::Cnot(0, 1).to_string(), "cx q[0],q[1]");
        assert_eq!(Gate::Crx(1, 0, 0.5).to_string(), "crx(0.5) q[1],q[0]");
    }
}
