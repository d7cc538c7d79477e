#![allow(non_local_definitions)]
//! # QFIT Python Bindings
//!
//! Python bindings for the QFIT noisy quantum Fourier-fit trainer.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qfit_python // L9: Python Bindings
//!     PySessionConfig // 세션 설정 바인딩
//!         niq, nil, seed, with_stepsize(), with_persistent_optimizer()
//!     PyNoiseParams // 노이즈 바인딩
//!         bf, pf, ad, pd, dp, from_coherence()
//!     PyInstructor // 학습 엔진 바인딩
//!         forward(), cost(), step(), calc_hist()
//!     PyTrainingSession // 학습 세션 바인딩
//!         tick(), should_continue(), refresh(), end()
//!     training_tick(), visualization_refresh() // JSON 호스트 계약
//! ```
//!
//! ## Quick Start (Python)
//!
//! ```python
//! import qfit
//!
//! config = qfit.SessionConfig(niq=2, nil=4, seed=100)
//! noise = qfit.NoiseParams(dp=0.01)
//!
//! session = qfit.TrainingSession(config)
//! while session.should_continue():
//!     loss = session.tick(noise)
//!     frame = session.refresh(noise)
//!     print(f"{len(frame['loss'])}: {loss:.4f}")
//! ```
//!
//! ## Installation
//!
//! ```bash
//! pip install maturin
//! cd crates/qfit_python
//! maturin develop --release
//! ```

use pyo3::prelude::*;

// ============================================================================
// Module Declarations
// ============================================================================

/// Configuration bindings
pub mod config;

/// Error conversion
mod error;

/// Instructor bindings
pub mod instructor;

/// Session bindings
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{PyNoiseParams, PySessionConfig};
pub use instructor::PyInstructor;
pub use session::PyTrainingSession;

// ============================================================================
// Python Module
// ============================================================================

/// QFIT - noisy variational circuits fitting a Fourier series
///
/// ## Example
///
/// ```python
/// import qfit
///
/// log = qfit.training_tick('{"niq": 1, "nil": 2, "seed": 100}', '{"pf": 0.05}')
/// frame = qfit.visualization_refresh('{"niq": 1, "nil": 2, "seed": 100}', '{"pf": 0.05}', log)
/// ```
#[pymodule]
fn qfit(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    // ========================================================================
    // Classes
    // ========================================================================

    m.add_class::<PySessionConfig>()?;
    m.add_class::<PyNoiseParams>()?;
    m.add_class::<PyInstructor>()?;
    m.add_class::<PyTrainingSession>()?;

    // ========================================================================
    // Host Contract
    // ========================================================================

    m.add_function(wrap_pyfunction!(session::training_tick, m)?)?;
    m.add_function(wrap_pyfunction!(session::visualization_refresh, m)?)?;

    // ========================================================================
    // Module Metadata
    // ========================================================================

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("__doc__", "QFIT - noisy quantum Fourier-fit trainer")?;

    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================
