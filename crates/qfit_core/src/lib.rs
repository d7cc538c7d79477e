//! # QFIT Core
//!
//! Foundation types, errors, and circuit IR for the noisy variational
//! quantum circuit trainer.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qfit_core // L0+L1: Foundation + Circuit
//!     L0_Foundation // 기반 타입/상수/에러
//!         CoreTypes // Probability, Weights, QubitId
//!         Constants // 학습/시프트/스펙트럼 상수
//!         Errors // QfitError, QfitResult
//!     L1_Circuit // 회로 구조
//!         Gate // 게이트 enum
//!         Channel // 노이즈 채널 명령
//!         Circuit // 회로 구조체
//!         CircuitBuilder // 빌더 패턴
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qfit_core::prelude::*;
//!
//! // One encoding + ansatz layer on two qubits, followed by noise
//! let circuit = CircuitBuilder::new(2)
//!     .ry_all(0.3)
//!     .rx(0, 0.1)
//!     .rz(0, 0.2)
//!     .rx(1, 0.3)
//!     .rz(1, 0.4)
//!     .crx(1, 0, 0.5)
//!     .noise_layer(&[(ChannelKind::BitFlip, 0.05)])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(circuit.gate_count(), 7);
//! assert_eq!(circuit.channel_count(), 2);
//! ```
//!
//! ## Weights
//!
//! ```rust
//! use qfit_core::prelude::*;
//!
//! let weights = Weights::zeros(4, 5);
//! assert!(weights.check_shape((4, 5)).is_ok());
//! assert!(weights.check_shape((4, 6)).unwrap_err().is_shape_error());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Quantum gates (Gantree: L1_Circuit → Gate)
pub mod gate;

/// Noise channel instructions (Gantree: L1_Circuit → Channel)
pub mod channel;

/// Circuit structure (Gantree: L1_Circuit → Circuit)
pub mod circuit;

/// Circuit builder (Gantree: L1_Circuit → CircuitBuilder)
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use channel::{Channel, ChannelKind};
pub use circuit::{Circuit, Instruction};
pub use constants::{shift, spectrum, training};
pub use error::{QfitError, QfitResult};
pub use gate::Gate;
pub use types::{Angle, Probability, QubitId, Shape, Weights};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qfit_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::channel::{Channel, ChannelKind};
    pub use crate::circuit::{Circuit, Instruction};
    pub use crate::constants::{shift, spectrum, training};
    pub use crate::error::{QfitError, QfitResult};
    pub use crate::gate::Gate;
    pub use crate::types::{Angle, Probability, QubitId, Shape, Weights};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_circuit19_layer_structure() {
        // 2 qubits: 2 rotation pairs + 1 ring CRX = 5 parameters
        let w = [0.1, 0.2, 0.3, 0.4, 0.5];
        let circuit = CircuitBuilder::new(2)
            .ry_all(0.0)
            .rx(0, w[0])
            .rz(0, w[1])
            .rx(1, w[2])
            .rz(1, w[3])
            .crx(1, 0, w[4])
            .build()
            .unwrap();

        assert_eq!(circuit.count_parameterized(), 7);
        assert_eq!(circuit.count_2q(), 1);
    }

    #[test]
    fn test_training_constants() {
        assert_eq!(training::STEPSIZE, 0.05);
        assert_eq!(training::LOG_CAPACITY, 30);
        assert_eq!(training::CIRCUIT19_ID, 19);
        assert_eq!(training::TARGET_FREQUENCIES, [1, 2, 3]);
    }

    #[test]
    fn test_weights_json_roundtrip_shape() {
        let w = Weights::zeros(4, 5);
        let json = serde_json::to_string(&w).unwrap();
        let back: Weights = serde_json::from_str(&json).unwrap();
        assert_eq!(back.shape(), (4, 5));
    }
}
