//! # QFIT Engine
//!
//! Trains a noisy variational circuit to fit a truncated Fourier series and
//! reports the model's frequency spectrum as it learns.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qfit_engine // L6: Training
//!     SessionConfig // 세션 설정
//!         niq, nil, seed, stepsize, log_capacity, optimizer_policy
//!     AdamOptimizer // 아담 옵티마이저
//!         apply_grad(), step_and_cost(), reset()
//!     Instructor // 학습 엔진
//!         forward(), cost(), step(), calc_hist(), predictions()
//!     Session // 호스트 계약
//!         TrainingLog - loss (append-only), weights (replace-only)
//!         training_tick() - reset past capacity, one step, append
//!         visualization_refresh() - spectrum row, predictions, loss
//!         TrainingSession - policy-aware tick/refresh/end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qfit_engine::prelude::*;
//!
//! let config = SessionConfig::new(1, 2, 100);
//! let noise = NoiseParams::noiseless().with_phase_flip(0.05);
//!
//! let log = training_tick(&config, &noise, TrainingLog::new()).unwrap();
//! assert_eq!(log.len(), 1);
//!
//! let frame = visualization_refresh(&config, &noise, &log, None).unwrap();
//! assert_eq!(frame.bin_count, 5);
//! assert!(frame.has_training_data());
//! ```
//!
//! ## Session
//!
//! ```rust
//! use qfit_engine::prelude::*;
//!
//! let config = SessionConfig::new(1, 1, 7).with_optimizer_policy(OptimizerPolicy::Persistent);
//! let mut session = TrainingSession::new(config).unwrap();
//! let noise = NoiseParams::noiseless();
//!
//! while session.should_continue() && session.log().len() < 3 {
//!     session.tick(&noise).unwrap();
//! }
//! let frame = session.refresh(&noise).unwrap();
//! assert_eq!(frame.loss.len(), 3);
//! session.end();
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Configuration (Gantree: L6_Training → SessionConfig)
pub mod config;

/// Visualization frame (Gantree: L6_Training → VisualizationFrame)
pub mod frame;

/// Instructor (Gantree: L6_Training → Instructor)
pub mod instructor;

/// Adam (Gantree: L6_Training → AdamOptimizer)
pub mod optimizer;

/// Host contract (Gantree: L6_Training → Session)
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{OptimizerPolicy, SessionConfig};
pub use frame::{PredictionPoint, VisualizationFrame};
pub use instructor::{initial_weights, training_domain, Instructor, StepOutcome};
pub use optimizer::AdamOptimizer;
pub use session::{training_tick, visualization_refresh, TrainingLog, TrainingSession};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qfit_engine::prelude::*;
    //! ```

    pub use crate::config::{OptimizerPolicy, SessionConfig};
    pub use crate::frame::{PredictionPoint, VisualizationFrame};
    pub use crate::instructor::{Instructor, StepOutcome};
    pub use crate::optimizer::AdamOptimizer;
    pub use crate::session::{training_tick, visualization_refresh, TrainingLog, TrainingSession};
    pub use qfit_core::{QfitError, QfitResult, Weights};
    pub use qfit_noise::NoiseParams;
    pub use qfit_spectrum::{SpectrumData, SpectrumRecord};
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_session_shapes() {
        let config = SessionConfig::default();
        let noise = NoiseParams::noiseless();

        let log = training_tick(&config, &noise, TrainingLog::new()).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.weights.shape(), (4, 5));
        assert!(log.loss[0] >= 0.0 && log.loss[0] <= 4.0);

        let frame = visualization_refresh(&config, &noise, &log, None).unwrap();
        assert_eq!(frame.bin_count, 17);
        assert_eq!(frame.histogram.x.first(), Some(&-8));
        assert_eq!(frame.histogram.x.last(), Some(&8));
        assert_eq!(frame.histogram.y, vec![0]);
        assert_eq!(frame.predictions.len(), 19);
    }

    #[test]
    fn test_host_json_round_trip() {
        let config = SessionConfig::from_json(r#"{"niq": 1, "nil": 2, "seed": 100}"#).unwrap();
        let noise: NoiseParams = serde_json::from_str(r#"{"bf": 0.02, "dp": 0.01}"#).unwrap();
        let mut log = TrainingLog::new();

        for _ in 0..3 {
            let json = serde_json::to_string(&log).unwrap();
            let restored: TrainingLog = serde_json::from_str(&json).unwrap();
            log = training_tick(&config, &noise, restored).unwrap();
        }

        assert_eq!(log.len(), 3);
        assert!(log.weights.is_finite());
    }

    #[test]
    fn test_noiseless_loss_decreases() {
        let config = SessionConfig::new(1, 2, 100);
        let noise = NoiseParams::noiseless();
        let mut session = TrainingSession::new(config).unwrap();

        session.run(&noise, 20).unwrap();
        let loss = &session.log().loss;
        assert!(loss.last().unwrap() < loss.first().unwrap());
    }

    #[test]
    fn test_full_damping_pins_output() {
        let config = SessionConfig::new(1, 2, 100);
        let noise = NoiseParams::noiseless().with_amplitude_damping(1.0);
        let instructor = Instructor::from_config(&config).unwrap();

        let ys = instructor.forward(instructor.x_domain(), None, &noise).unwrap();
        for y in ys {
            assert_abs_diff_eq!(y, 1.0, epsilon = 1e-12);
        }

        // Constant output: only the zero-frequency bin survives
        let (n, spectrum) = instructor.calc_hist(instructor.initial_weights(), &noise).unwrap();
        for (i, c) in spectrum.comb.iter().enumerate() {
            let expected = if i == n / 2 { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(*c, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_out_of_range_noise_is_not_rejected() {
        let config = SessionConfig::new(1, 1, 3);
        let noise = NoiseParams::new(0.0, 1.2, 0.0, 0.0, 0.0);

        let log = training_tick(&config, &noise, TrainingLog::new()).unwrap();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_session_spans_a_reset() {
        let config = SessionConfig::new(1, 1, 5).with_log_capacity(2);
        let noise = NoiseParams::noiseless();
        let mut session = TrainingSession::new(config).unwrap();

        for _ in 0..3 {
            session.tick(&noise).unwrap();
            session.refresh(&noise).unwrap();
        }
        assert!(!session.should_continue());
        assert_eq!(session.record().map(|r| r.len()), Some(3));

        session.tick(&noise).unwrap();
        let frame = session.refresh(&noise).unwrap();
        assert_eq!(session.log().len(), 1);
        assert_eq!(frame.histogram.len(), 4);
    }
}
