//! Noise channel instructions for the circuit IR
//!
//! Gantree: L1_Circuit → Channel
//!
//! Channels are first-class circuit instructions so a circuit fully describes
//! the noisy evolution the simulator performs. Their Kraus representation
//! lives in `qfit_noise`.

use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Single-qubit noise channel kinds
/// Gantree: ChannelKind // 채널 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Applies X with probability p
    BitFlip,
    /// Applies Z with probability p
    PhaseFlip,
    /// Energy relaxation |1⟩ → |0⟩ with probability γ
    AmplitudeDamping,
    /// Dephasing without energy loss with parameter γ
    PhaseDamping,
    /// Applies X, Y or Z each with probability p/3
    Depolarizing,
}

impl ChannelKind {
    /// Fixed per-qubit application order after every ansatz layer
    pub const ORDER: [ChannelKind; 5] = [
        ChannelKind::BitFlip,
        ChannelKind::PhaseFlip,
        ChannelKind::AmplitudeDamping,
        ChannelKind::PhaseDamping,
        ChannelKind::Depolarizing,
    ];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            ChannelKind::BitFlip => "bit_flip",
            ChannelKind::PhaseFlip => "phase_flip",
            ChannelKind::AmplitudeDamping => "amplitude_damping",
            ChannelKind::PhaseDamping => "phase_damping",
            ChannelKind::Depolarizing => "depolarizing",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A noise channel acting on one qubit
/// Gantree: Channel // 노이즈 채널
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel kind
    pub kind: ChannelKind,

    /// Target qubit
    pub qubit: QubitId,

    /// Probability (γ for the damping channels); not range-checked
    pub probability: f64,
}

impl Channel {
    /// Create a channel instruction
    pub fn new(kind: ChannelKind, qubit: QubitId, probability: f64) -> Self {
        Self {
            kind,
            qubit,
            probability,
        }
    }

    /// Probability 0 leaves the state unchanged
    pub fn is_identity(&self) -> bool {
        self.probability == 0.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) q[{}]", self.kind, self.probability, self.qubit)
    }
}
