//! Quantum circuit structure for QFIT
//!
//! Gantree: L1_Circuit → Circuit
//!
//! A circuit is an ordered list of gate and noise-channel instructions on a
//! fixed number of qubits.

use crate::channel::Channel;
use crate::error::{QfitError, QfitResult};
use crate::gate::Gate;
use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single circuit instruction
/// Gantree: Instruction // 명령
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Unitary gate
    Gate(Gate),
    /// Noise channel
    Noise(Channel),
}

impl Instruction {
    /// Qubits touched by this instruction
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Instruction::Gate(gate) => gate.qubits(),
            Instruction::Noise(channel) => vec![channel.qubit],
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Gate(gate) => write!(f, "{}", gate),
            Instruction::Noise(channel) => write!(f, "{}", channel),
        }
    }
}

/// Quantum circuit
/// Gantree: Circuit // 회로 구조체
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits
    num_qubits: usize,

    /// Instruction sequence
    instructions: Vec<Instruction>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            instructions: Vec::new(),
        }
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Append an instruction after checking its qubits
    /// Gantree: push(&mut, Instruction) -> Result // 명령 추가
    pub fn push(&mut self, instruction: Instruction) -> QfitResult<()> {
        for qubit in instruction.qubits() {
            if qubit >= self.num_qubits {
                return Err(QfitError::QubitOutOfRange {
                    qubit,
                    max: self.num_qubits.saturating_sub(1),
                });
            }
        }
        self.instructions.push(instruction);
        Ok(())
    }

    /// Append a gate
    pub fn add_gate(&mut self, gate: Gate) -> QfitResult<()> {
        self.push(Instruction::Gate(gate))
    }

    /// Append a noise channel
    pub fn add_channel(&mut self, channel: Channel) -> QfitResult<()> {
        self.push(Instruction::Noise(channel))
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get instructions
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Check if circuit is empty
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Total instruction count
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    // ========================================================================
    // Circuit Analysis
    // ========================================================================

    /// Iterate over gates only
    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.instructions.iter().filter_map(|inst| match inst {
            Instruction::Gate(gate) => Some(gate),
            Instruction::Noise(_) => None,
        })
    }

    /// Iterate over noise channels only
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.instructions.iter().filter_map(|inst| match inst {
            Instruction::Noise(channel) => Some(channel),
            Instruction::Gate(_) => None,
        })
    }

    /// Count gates
    pub fn gate_count(&self) -> usize {
        self.gates().count()
    }

    /// Count noise channels
    pub fn channel_count(&self) -> usize {
        self.channels().count()
    }

    /// Count two-qubit gates
    pub fn count_2q(&self) -> usize {
        self.gates().filter(|g| g.is_two_qubit()).count()
    }

    /// Count parameterized gates
    pub fn count_parameterized(&self) -> usize {
        self.gates().filter(|g| g.is_parameterized()).count()
    }

    /// True if no channel has a non-zero probability
    pub fn is_noiseless(&self) -> bool {
        self.channels().all(Channel::is_identity)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Circuit({} qubits, {} gates, {} channels)",
            self.num_qubits,
            self.gate_count(),
            self.channel_count()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
