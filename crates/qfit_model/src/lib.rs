//! # QFIT Model
//!
//! Variational quantum model: angle encoding, a resolvable ansatz, per-layer
//! noise, and exact gradients by parameter shift.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qfit_model // L4: Model
//!     Ansatz // 안자츠 디스패치
//!         AnsatzKind::from_id(), param_shape(), param_kinds(), apply_layer()
//!         circuit19_layer // RX·RZ per qubit + CRX ring
//!     Model // 모델
//!         CircuitConfig, OutputMode
//!         encode(), build_circuit(), evaluate(), expectation(), jacobian()
//!     Gradient // 파라미터 시프트
//!         shift_rule(), parameter_shift(), finite_difference()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qfit_model::prelude::*;
//!
//! let model = Model::new(2, 4, 19, OutputMode::Expectation).unwrap();
//! assert_eq!(model.param_shape(), (4, 5));
//!
//! let weights = Weights::zeros(4, 5);
//! let noise = NoiseParams::noiseless().with_depolarization(0.01);
//!
//! let z = model.expectation(&weights, 0.0, &noise).unwrap();
//! assert!(z.abs() <= 1.0);
//!
//! let grad = model.jacobian(&weights, 0.3, &noise).unwrap();
//! assert_eq!(grad.shape(), (4, 5));
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Ansatz dispatch (Gantree: L4_Model → Ansatz)
pub mod ansatz;

/// Parameter-shift gradients (Gantree: L4_Model → Gradient)
pub mod gradient;

/// Model (Gantree: L4_Model → Model)
pub mod model;

// ============================================================================
// Re-exports
// ============================================================================

pub use ansatz::{AnsatzEntry, AnsatzKind, ParamKind};
pub use gradient::{parameter_shift, shift_rule};
pub use model::{CircuitConfig, Model, ModelOutput, OutputMode, READOUT_QUBIT};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports

    pub use crate::ansatz::{AnsatzKind, ParamKind};
    pub use crate::model::{CircuitConfig, Model, ModelOutput, OutputMode};
    pub use qfit_core::{QfitError, QfitResult, Weights};
    pub use qfit_noise::NoiseParams;
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_config_json() {
        let json = r#"{"n_qubits": 3, "n_layers": 2}"#;
        let config: CircuitConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.ansatz_id, 19);
        assert_eq!(config.output_mode, OutputMode::Expectation);

        let model = Model::from_config(config).unwrap();
        assert_eq!(model.param_shape(), (2, 8));

        let state: CircuitConfig =
            serde_json::from_str(r#"{"n_qubits": 1, "n_layers": 1, "output_mode": "state_vector"}"#)
                .unwrap();
        assert_eq!(state.output_mode, OutputMode::StateVector);
    }

    #[test]
    fn test_layers_raise_frequency_content() {
        // One qubit, zero weights, L layers: RY(x)^L|0⟩ gives cos(Lx)
        for layers in 1..=3 {
            let model = Model::new(1, layers, 19, OutputMode::Expectation).unwrap();
            let w = Weights::zeros(layers, 2);
            let z = model.expectation(&w, 0.4, &NoiseParams::noiseless()).unwrap();
            assert_abs_diff_eq!(z, (0.4 * layers as f64).cos(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_damping_pulls_toward_ground() {
        let model = Model::new(1, 1, 19, OutputMode::Expectation).unwrap();
        let w = Weights::zeros(1, 2);
        let noise = NoiseParams::noiseless().with_amplitude_damping(1.0);
        let z = model.expectation(&w, 2.5, &noise).unwrap();
        assert_abs_diff_eq!(z, 1.0, epsilon = 1e-12);
    }
}
