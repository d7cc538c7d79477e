//! Session configuration for QFIT
//!
//! Gantree: L6_Training → SessionConfig
//!
//! Session-scoped constants of one training run. Hosts persist this record
//! next to the training log and pass it to every tick.

use qfit_core::constants::training;
use qfit_core::{QfitError, QfitResult};
use qfit_model::CircuitConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Optimizer lifetime across ticks
/// Gantree: OptimizerPolicy // 옵티마이저 수명
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerPolicy {
    /// A fresh instructor (and Adam state) on every tick
    #[default]
    ResetPerTick,
    /// One instructor kept for the whole session, moments carried across ticks
    Persistent,
}

/// Training session configuration
/// Gantree: SessionConfig // 세션 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    // ========================================================================
    // Model Parameters
    // ========================================================================
    /// Number of qubits
    #[serde(alias = "niq")]
    pub n_qubits: usize,

    /// Number of layers
    #[serde(alias = "nil")]
    pub n_layers: usize,

    /// Seed for the initial weights
    pub seed: u64,

    /// Ansatz id
    #[serde(default = "default_ansatz_id")]
    pub ansatz_id: u32,

    // ========================================================================
    // Training Parameters
    // ========================================================================
    /// Adam step size
    #[serde(default = "default_stepsize")]
    pub stepsize: f64,

    /// Loss entries kept before the log resets
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,

    /// Optimizer lifetime
    #[serde(default)]
    pub optimizer_policy: OptimizerPolicy,
}

fn default_ansatz_id() -> u32 {
    training::CIRCUIT19_ID
}

fn default_stepsize() -> f64 {
    training::STEPSIZE
}

fn default_log_capacity() -> usize {
    training::LOG_CAPACITY
}

impl SessionConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create with defaults for everything but the model size and seed
    pub fn new(n_qubits: usize, n_layers: usize, seed: u64) -> Self {
        Self {
            n_qubits,
            n_layers,
            seed,
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set number of qubits
    pub fn with_qubits(mut self, n: usize) -> Self {
        self.n_qubits = n;
        self
    }

    /// Set number of layers
    pub fn with_layers(mut self, n: usize) -> Self {
        self.n_layers = n;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set ansatz id
    pub fn with_ansatz_id(mut self, id: u32) -> Self {
        self.ansatz_id = id;
        self
    }

    /// Set Adam step size
    pub fn with_stepsize(mut self, stepsize: f64) -> Self {
        self.stepsize = stepsize;
        self
    }

    /// Set log capacity
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// Set optimizer policy
    pub fn with_optimizer_policy(mut self, policy: OptimizerPolicy) -> Self {
        self.optimizer_policy = policy;
        self
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Circuit configuration for the model
    pub fn circuit_config(&self) -> CircuitConfig {
        CircuitConfig::new(self.n_qubits, self.n_layers).with_ansatz_id(self.ansatz_id)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> QfitResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> QfitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> QfitResult<()> {
        self.circuit_config().validate()?;

        if !(self.stepsize.is_finite() && self.stepsize > 0.0) {
            return Err(QfitError::InvalidConfig(format!(
                "stepsize must be positive, got {}",
                self.stepsize
            )));
        }

        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            n_qubits: training::DEFAULT_QUBITS,
            n_layers: training::DEFAULT_LAYERS,
            seed: training::DEFAULT_SEED,
            ansatz_id: training::CIRCUIT19_ID,
            stepsize: training::STEPSIZE,
            log_capacity: training::LOG_CAPACITY,
            optimizer_policy: OptimizerPolicy::ResetPerTick,
        }
    }
}

impl fmt::Display for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Session Configuration:")?;
        writeln!(f, "  Qubits: {}", self.n_qubits)?;
        writeln!(f, "  Layers: {}", self.n_layers)?;
        writeln!(f, "  Seed: {}", self.seed)?;
        writeln!(f, "  Ansatz: {}", self.ansatz_id)?;
        writeln!(f, "  Stepsize: {}", self.stepsize)?;
        writeln!(f, "  Log capacity: {}", self.log_capacity)?;
        write!(f, "  Optimizer: {:?}", self.optimizer_policy)
    }
}

// ============================================================================
// Tests
// ============================================================================
