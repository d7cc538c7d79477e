//! # QFIT Noise
//!
//! Noise parameters and Kraus channel representations for the noisy
//! density-matrix simulation.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qfit_noise // L2: Noise
//!     NoiseParams // 5채널 확률
//!         bit_flip, phase_flip, amplitude_damping, phase_damping, depolarization
//!         new(), noiseless(), from_coherence()
//!         channels(), validate(), clamped()
//!     Kraus // 크라우스 연산자
//!         kraus_operators(kind, p)
//!         pauli_x(), pauli_y(), pauli_z(), completeness()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qfit_noise::prelude::*;
//!
//! // Host slider values may drift out of range; clamp before use
//! let noise = NoiseParams::new(0.05, 0.0, 1.3, 0.0, 0.01).clamped();
//! assert_eq!(noise.amplitude_damping(), 1.0);
//!
//! for (kind, p) in noise.channels() {
//!     let ops = kraus_operators(kind, p);
//!     assert!(!ops.is_empty());
//! }
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Channel probabilities (Gantree: L2_Noise → NoiseParams)
pub mod noise_params;

/// Kraus operators (Gantree: L2_Noise → Kraus)
pub mod kraus;

// ============================================================================
// Re-exports
// ============================================================================

pub use kraus::{kraus_operators, Matrix2};
pub use noise_params::NoiseParams;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports

    pub use crate::kraus::{kraus_operators, Matrix2};
    pub use crate::noise_params::NoiseParams;
    pub use qfit_core::ChannelKind;
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_noise_params_feed_kraus_sets() {
        let noise = NoiseParams::new(0.1, 0.2, 0.3, 0.4, 0.5);
        let counts: Vec<usize> = noise
            .channels()
            .iter()
            .map(|&(kind, p)| kraus_operators(kind, p).len())
            .collect();
        assert_eq!(counts, vec![2, 2, 2, 2, 4]);
    }

    #[test]
    fn test_full_bit_flip_is_pauli_x() {
        let ops = kraus_operators(ChannelKind::BitFlip, 1.0);
        assert_abs_diff_eq!(ops[0][0][0].norm(), 0.0, epsilon = 1e-12);
        assert_eq!(ops[1], crate::kraus::pauli_x());
    }
}
