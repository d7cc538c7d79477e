//! Backend execution types and traits
//!
//! Gantree: L3_Backend → BackendTrait
//!
//! Defines the interface the model uses to run a noisy circuit.

use crate::density::DensityMatrix;
use qfit_core::{Circuit, QfitResult, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a circuit run hands back to the caller
/// Gantree: Readout // 측정 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Readout {
    /// ⟨Z⟩ on the readout qubit
    Expectation(f64),
    /// The full mixed state
    State(DensityMatrix),
}

impl Readout {
    /// Expectation value, if this is one
    pub fn expectation(&self) -> Option<f64> {
        match self {
            Readout::Expectation(v) => Some(*v),
            Readout::State(_) => None,
        }
    }

    /// State, if this is one
    pub fn state(&self) -> Option<&DensityMatrix> {
        match self {
            Readout::State(rho) => Some(rho),
            Readout::Expectation(_) => None,
        }
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readout::Expectation(v) => write!(f, "⟨Z⟩={:.6}", v),
            Readout::State(rho) => write!(f, "{}", rho),
        }
    }
}

/// Quantum backend trait
/// Gantree: BackendTrait // 백엔드 인터페이스
pub trait Backend: Send + Sync {
    /// Get backend name
    fn name(&self) -> &str;

    /// Largest circuit this backend accepts
    fn num_qubits(&self) -> usize;

    /// Run a circuit from |0…0⟩ and return the final state
    /// Gantree: run(circuit) -> Result<DensityMatrix>
    fn run(&self, circuit: &Circuit) -> QfitResult<DensityMatrix>;

    /// Run several circuits
    fn run_batch(&self, circuits: &[Circuit]) -> QfitResult<Vec<DensityMatrix>> {
        circuits.iter().map(|c| self.run(c)).collect()
    }

    /// ⟨Z⟩ on `qubit` after running `circuit`
    fn expectation_z(&self, circuit: &Circuit, qubit: QubitId) -> QfitResult<f64> {
        Ok(self.run(circuit)?.expectation_z(qubit))
    }

    /// Run and read out either ⟨Z_qubit⟩ or the whole state
    fn readout(&self, circuit: &Circuit, qubit: QubitId, full_state: bool) -> QfitResult<Readout> {
        let rho = self.run(circuit)?;
        Ok(if full_state {
            Readout::State(rho)
        } else {
            Readout::Expectation(rho.expectation_z(qubit))
        })
    }

    /// Check if backend is simulator
    fn is_simulator(&self) -> bool {
        true
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_accessors() {
        let e = Readout::Expectation(0.25);
        assert_eq!(e.expectation(), Some(0.25));
        assert!(e.state().is_none());

        let s = Readout::State(DensityMatrix::new(1));
        assert!(s.expectation().is_none());
        assert_eq!(s.state().map(|r| r.num_qubits()), Some(1));
    }

    #[test]
    fn test_readout_display() {
        assert_eq!(Readout::Expectation(0.5).to_string(), "⟨Z⟩=0.500000");
    }
}
