//! Error types for QFIT
//!
//! Gantree: L0_Foundation → Errors
//!
//! Configuration, shape, and validation errors shared by every QFIT crate.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QFIT
/// Gantree: QfitError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QfitError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Ansatz id has no entry in the ansatz table
    /// Gantree: UnsupportedAnsatz(u32) // 미지원 안자츠
    #[error("Unsupported ansatz id {0}")]
    UnsupportedAnsatz(u32),

    /// Qubit count must be >= 1
    #[error("Invalid qubit count {0}: must be >= 1")]
    InvalidQubitCount(usize),

    /// Layer count must be >= 1
    #[error("Invalid layer count {0}: must be >= 1")]
    InvalidLayerCount(usize),

    /// Other session configuration problem
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Shape Errors
    // ========================================================================
    /// Weight array does not match (n_layers, n_qubits*3 - 1)
    /// Gantree: WeightShapeMismatch{{expected,got}} // 가중치 형상
    #[error(
        "Weight shape mismatch: expected ({}, {}), got ({}, {})",
        expected.0, expected.1, got.0, got.1
    )]
    WeightShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// Nested weight rows of unequal length
    #[error("Ragged weight array: row {row} has {len} entries, expected {expected}")]
    RaggedWeights {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// Sequence length does not match its counterpart
    #[error("Length mismatch for {what}: expected {expected}, got {got}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Probability value out of range [0, 1]
    /// Gantree: InvalidProbability(f64) // 확률 범위
    #[error("Invalid probability {0}: must be in range [0, 1]")]
    InvalidProbability(f64),

    /// Qubit index out of range
    #[error("Qubit {qubit} out of range: max is {max}")]
    QubitOutOfRange { qubit: usize, max: usize },

    /// Maximum Fourier frequency must be >= 1
    #[error("Invalid maximum frequency {0}: must be >= 1")]
    InvalidFrequency(usize),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type alias for QFIT operations
/// Gantree: QfitResult<T> // type alias
pub type QfitResult<T> = Result<T, QfitError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QfitError {
    fn from(err: serde_json::Error) -> Self {
        QfitError::JsonError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QfitError {
    /// Check if error is a configuration error (fatal at construction)
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            QfitError::UnsupportedAnsatz(_)
                | QfitError::InvalidQubitCount(_)
                | QfitError::InvalidLayerCount(_)
                | QfitError::InvalidConfig(_)
        )
    }

    /// Check if error is a shape error
    ///
    /// The offending input must be discarded or rebuilt; retrying it fails again.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            QfitError::WeightShapeMismatch { .. }
                | QfitError::RaggedWeights { .. }
                | QfitError::LengthMismatch { .. }
        )
    }

    /// Check if error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            QfitError::InvalidProbability(_)
                | QfitError::QubitOutOfRange { .. }
                | QfitError::InvalidFrequency(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QfitError::InvalidProbability(1.5);
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = QfitError::WeightShapeMismatch {
            expected: (4, 5),
            got: (3, 5),
        };
        let msg = err.to_string();
        assert!(msg.contains("(4, 5)"));
        assert!(msg.contains("(3, 5)"));
    }

    #[test]
    fn test_is_configuration_error() {
        assert!(QfitError::UnsupportedAnsatz(7).is_configuration_error());
        assert!(QfitError::InvalidQubitCount(0).is_configuration_error());
        assert!(!QfitError::InvalidProbability(2.0).is_configuration_error());
    }

    #[test]
    fn test_is_shape_error() {
        assert!(QfitError::RaggedWeights {
            row: 1,
            len: 2,
            expected: 5
        }
        .is_shape_error());
        assert!(!QfitError::InvalidLayerCount(0).is_shape_error());
    }

    #[test]
    fn test_json_conversion() {
        let err: QfitError = serde_json::from_str::<f64>("not json").unwrap_err().into();
        assert!(matches!(err, QfitError::JsonError(_)));
    }
}
