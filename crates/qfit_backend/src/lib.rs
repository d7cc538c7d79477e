//! # QFIT Backend
//!
//! Noisy circuit execution on an exact density-matrix simulator.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qfit_backend // L3: Backend
//!     DensityMatrix // 밀도 행렬
//!         apply_single(), apply_controlled(), apply_kraus()
//!         trace(), purity(), expectation_z(), probabilities()
//!     BackendTrait // 백엔드 인터페이스
//!         run(), run_batch(), expectation_z(), readout()
//!     MixedStateSimulator // 혼합 상태 시뮬레이터
//!         rx(), ry(), rz(), hadamard()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qfit_backend::prelude::*;
//! use qfit_core::CircuitBuilder;
//!
//! let backend = MixedStateSimulator::new();
//!
//! let circuit = CircuitBuilder::new(2)
//!     .h(0)
//!     .cnot(0, 1)
//!     .build()
//!     .unwrap();
//!
//! let rho = backend.run(&circuit).unwrap();
//! assert!((rho.probabilities()[0] - 0.5).abs() < 1e-12);
//! ```
//!
//! ## Noisy Simulation
//!
//! ```rust
//! use qfit_backend::prelude::*;
//! use qfit_core::{CircuitBuilder, ChannelKind};
//!
//! let backend = MixedStateSimulator::new();
//! let circuit = CircuitBuilder::new(1)
//!     .channel(ChannelKind::BitFlip, 0, 0.25)
//!     .build()
//!     .unwrap();
//!
//! // ⟨Z⟩ = 1 - 2p
//! let z = backend.expectation_z(&circuit, 0).unwrap();
//! assert!((z - 0.5).abs() < 1e-12);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Density matrix (Gantree: L3_Backend → DensityMatrix)
pub mod density;

/// Execution types and backend trait (Gantree: L3_Backend → BackendTrait)
pub mod execution;

/// Simulator backend (Gantree: L3_Backend → MixedStateSimulator)
pub mod simulator;

// ============================================================================
// Re-exports
// ============================================================================

pub use density::DensityMatrix;
pub use execution::{Backend, Readout};
pub use simulator::MixedStateSimulator;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qfit_backend::prelude::*;
    //! ```

    pub use crate::density::DensityMatrix;
    pub use crate::execution::{Backend, Readout};
    pub use crate::simulator::MixedStateSimulator;
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_abs_diff_eq;
    use qfit_core::{ChannelKind, CircuitBuilder};

    #[test]
    fn test_noise_shrinks_expectation() {
        let backend = MixedStateSimulator::new();
        let levels = [0.0, 0.1, 0.2, 0.3];

        let values: Vec<f64> = levels
            .iter()
            .map(|&p| {
                let circuit = CircuitBuilder::new(2)
                    .ry(0, 0.3)
                    .noise_layer(&[(ChannelKind::Depolarizing, p)])
                    .build()
                    .unwrap();
                backend.expectation_z(&circuit, 0).unwrap()
            })
            .collect();

        for pair in values.windows(2) {
            assert!(pair[1] < pair[0], "noise should shrink ⟨Z⟩: {:?}", values);
        }
    }

    #[test]
    fn test_zero_probability_is_noop() {
        let backend = MixedStateSimulator::new();
        let clean = CircuitBuilder::new(2).h(0).crx(0, 1, 0.7).build().unwrap();
        let with_noops = CircuitBuilder::new(2)
            .h(0)
            .crx(0, 1, 0.7)
            .noise_layer(&ChannelKind::ORDER.map(|k| (k, 0.0)))
            .build()
            .unwrap();

        assert_eq!(backend.run(&clean).unwrap(), backend.run(&with_noops).unwrap());
    }

    #[test]
    fn test_readout_modes() {
        let backend = MixedStateSimulator::new();
        let circuit = CircuitBuilder::new(1).ry(0, 1.0).build().unwrap();

        let e = backend.readout(&circuit, 0, false).unwrap();
        assert_abs_diff_eq!(e.expectation().unwrap(), 1.0f64.cos(), epsilon = 1e-12);

        let s = backend.readout(&circuit, 0, true).unwrap();
        assert_eq!(s.state().unwrap().dim(), 2);
    }

    #[test]
    fn test_batch() {
        let backend = MixedStateSimulator::new();
        let circuits: Vec<_> = (0..4)
            .map(|i| CircuitBuilder::new(1).rx(0, i as f64 * 0.3).build().unwrap())
            .collect();
        assert_eq!(backend.run_batch(&circuits).unwrap().len(), 4);
    }
}
