//! Host-facing training contract
//!
//! Gantree: L6_Training → Session
//!
//! Each tick is one synchronous call: read the persisted log, take one
//! optimizer step, append the loss, hand the log back. The host owns
//! persistence; nothing here is process-wide.

use crate::config::{OptimizerPolicy, SessionConfig};
use crate::frame::VisualizationFrame;
use crate::instructor::{Instructor, StepOutcome};
use log::{debug, info, warn};
use qfit_backend::Backend;
use qfit_core::{QfitResult, Weights};
use qfit_noise::NoiseParams;
use qfit_spectrum::SpectrumRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Training Log
// ============================================================================

/// Persisted loss history and latest weights
/// Gantree: TrainingLog // 학습 로그
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingLog {
    /// Loss per tick, append-only
    #[serde(default)]
    pub loss: Vec<f64>,

    /// Latest weights, replace-only; empty before the first tick
    #[serde(default)]
    pub weights: Weights,
}

impl TrainingLog {
    /// Empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded ticks
    pub fn len(&self) -> usize {
        self.loss.len()
    }

    /// True before the first tick
    pub fn is_empty(&self) -> bool {
        self.loss.is_empty()
    }

    /// Strictly more than `capacity` entries
    pub fn exceeds(&self, capacity: usize) -> bool {
        self.loss.len() > capacity
    }

    /// Polling guard: keep ticking until the log overflows `capacity`
    pub fn should_continue(&self, capacity: usize) -> bool {
        !self.exceeds(capacity)
    }

    /// Clear loss and weights
    pub fn reset(&mut self) {
        self.loss.clear();
        self.weights = Weights::empty();
    }

    /// Append a step's loss and take its weights
    pub fn record(&mut self, outcome: StepOutcome) {
        self.loss.push(outcome.loss);
        self.weights = outcome.weights;
    }

    /// Most recent loss
    pub fn last_loss(&self) -> Option<f64> {
        self.loss.last().copied()
    }
}

impl fmt::Display for TrainingLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last_loss() {
            Some(loss) => write!(f, "TrainingLog({} steps, last loss={:.6})", self.len(), loss),
            None => write!(f, "TrainingLog(empty)"),
        }
    }
}

// ============================================================================
// Stateless Host Operations
// ============================================================================

/// One training tick with a freshly constructed instructor
/// Gantree: training_tick(config, noise, log) -> Result<TrainingLog> // 학습 틱
///
/// A log holding more than `log_capacity` losses is reset first. The new
/// instructor carries no Adam moments from earlier ticks.
pub fn training_tick(config: &SessionConfig, noise: &NoiseParams, log: TrainingLog) -> QfitResult<TrainingLog> {
    let mut instructor = Instructor::from_config(config)?;
    tick_with(&mut instructor, config.log_capacity, noise, log)
}

/// Spectrum row, predictions, and loss for the current log
/// Gantree: visualization_refresh(config, noise, log, record) -> Result<VisualizationFrame>
///
/// `record` restarts when absent or when the log has no losses yet.
pub fn visualization_refresh(
    config: &SessionConfig,
    noise: &NoiseParams,
    log: &TrainingLog,
    record: Option<SpectrumRecord>,
) -> QfitResult<VisualizationFrame> {
    let instructor = Instructor::from_config(config)?;
    refresh_with(&instructor, noise, log, record)
}

fn tick_with<B: Backend>(
    instructor: &mut Instructor<B>,
    capacity: usize,
    noise: &NoiseParams,
    mut log: TrainingLog,
) -> QfitResult<TrainingLog> {
    if log.exceeds(capacity) {
        info!("training log exceeded {} entries, resetting", capacity);
        log.reset();
    }
    if !noise.is_valid() {
        warn!("noise probabilities outside [0, 1]: {}", noise);
    }

    let outcome = instructor.step(&log.weights, noise)?;
    log.record(outcome);
    Ok(log)
}

fn refresh_with<B: Backend>(
    instructor: &Instructor<B>,
    noise: &NoiseParams,
    log: &TrainingLog,
    record: Option<SpectrumRecord>,
) -> QfitResult<VisualizationFrame> {
    let mut histogram = match record {
        Some(record) if !log.is_empty() => record,
        _ => SpectrumRecord::new(),
    };

    let weights = if log.weights.is_empty() {
        instructor.initial_weights()
    } else {
        &log.weights
    };

    let (bin_count, spectrum) = instructor.calc_hist(weights, noise)?;
    histogram.push_row(&spectrum, log.len());
    let predictions = instructor.predictions(weights, noise)?;

    Ok(VisualizationFrame {
        bin_count,
        spectrum,
        histogram,
        predictions,
        loss: log.loss.clone(),
    })
}

// ============================================================================
// Training Session
// ============================================================================

/// Session-scoped training state
/// Gantree: TrainingSession // 학습 세션
///
/// Under [`OptimizerPolicy::Persistent`] one instructor lives from the first
/// tick until [`TrainingSession::end`]; otherwise every tick builds its own.
#[derive(Debug)]
pub struct TrainingSession {
    /// Session configuration
    config: SessionConfig,

    /// Loss history and weights
    log: TrainingLog,

    /// Spectrum surface, absent until the first refresh
    record: Option<SpectrumRecord>,

    /// Long-lived instructor (persistent policy only)
    instructor: Option<Instructor>,
}

impl TrainingSession {
    /// Create a session after validating `config`
    pub fn new(config: SessionConfig) -> QfitResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            log: TrainingLog::new(),
            record: None,
            instructor: None,
        })
    }

    /// Resume from a persisted log and record
    pub fn resume(config: SessionConfig, log: TrainingLog, record: Option<SpectrumRecord>) -> QfitResult<Self> {
        let mut session = Self::new(config)?;
        session.log = log;
        session.record = record;
        Ok(session)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Training log
    pub fn log(&self) -> &TrainingLog {
        &self.log
    }

    /// Spectrum record
    pub fn record(&self) -> Option<&SpectrumRecord> {
        self.record.as_ref()
    }

    /// True while a persistent instructor is alive
    pub fn has_instructor(&self) -> bool {
        self.instructor.is_some()
    }

    /// Polling guard for the host's timer
    pub fn should_continue(&self) -> bool {
        self.log.should_continue(self.config.log_capacity)
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// One training tick under the configured optimizer policy
    ///
    /// A failed step leaves the stored log untouched.
    pub fn tick(&mut self, noise: &NoiseParams) -> QfitResult<&TrainingLog> {
        let log = self.log.clone();
        let capacity = self.config.log_capacity;

        let next = match self.config.optimizer_policy {
            OptimizerPolicy::ResetPerTick => training_tick(&self.config, noise, log)?,
            OptimizerPolicy::Persistent => {
                let instructor = match self.instructor.take() {
                    Some(instructor) => instructor,
                    None => {
                        debug!("creating persistent instructor: {}", self.config.seed);
                        Instructor::from_config(&self.config)?
                    }
                };
                let instructor = self.instructor.insert(instructor);
                if log.exceeds(capacity) {
                    instructor.reset_optimizer();
                }
                tick_with(instructor, capacity, noise, log)?
            }
        };

        self.log = next;
        Ok(&self.log)
    }

    /// Tick until the polling guard stops or `max_ticks` is reached
    pub fn run(&mut self, noise: &NoiseParams, max_ticks: usize) -> QfitResult<usize> {
        let mut ticks = 0;
        while ticks < max_ticks && self.should_continue() {
            self.tick(noise)?;
            ticks += 1;
        }
        Ok(ticks)
    }

    /// Refresh the spectrum record and return the frame
    pub fn refresh(&mut self, noise: &NoiseParams) -> QfitResult<VisualizationFrame> {
        let record = self.record.take();
        let frame = match &self.instructor {
            Some(instructor) => refresh_with(instructor, noise, &self.log, record)?,
            None => visualization_refresh(&self.config, noise, &self.log, record)?,
        };
        self.record = Some(frame.histogram.clone());
        Ok(frame)
    }

    /// Tear down the session: drop the instructor and clear all state
    pub fn end(&mut self) {
        if self.instructor.take().is_some() {
            debug!("dropping persistent instructor");
        }
        self.log.reset();
        self.record = None;
    }
}

// ============================================================================
// Tests
// ============================================================================
