//! Constants for QFIT
//!
//! Gantree: L0_Foundation → Constants
//!
//! Training, optimizer, gradient, and spectrum constants.

// ============================================================================
// Training Constants
// Gantree: training // 학습 상수
// ============================================================================

pub mod training {
    //! Fixed training-session constants

    /// Default number of qubits for a session
    pub const DEFAULT_QUBITS: usize = 2;

    /// Default number of layers for a session
    pub const DEFAULT_LAYERS: usize = 4;

    /// Default seed for the initial weight distribution
    pub const DEFAULT_SEED: u64 = 100;

    /// Id of the Circuit19 ansatz (the only supported one)
    pub const CIRCUIT19_ID: u32 = 19;

    /// Adam step size
    /// Gantree: STEPSIZE: f64 = 0.05
    pub const STEPSIZE: f64 = 0.05;

    /// Adam first-moment decay
    pub const BETA1: f64 = 0.9;

    /// Adam second-moment decay
    pub const BETA2: f64 = 0.99;

    /// Adam denominator offset
    pub const EPSILON: f64 = 1e-8;

    /// Training log capacity; a log holding more entries is reset
    /// Gantree: LOG_CAPACITY: usize = 30
    pub const LOG_CAPACITY: usize = 30;

    /// Target function frequencies
    pub const TARGET_FREQUENCIES: [u32; 3] = [1, 2, 3];

    /// Training domain lower bound
    pub const DOMAIN_MIN: f64 = -std::f64::consts::PI;

    /// Training domain upper bound
    pub const DOMAIN_MAX: f64 = std::f64::consts::PI;

    /// Number of Nyquist-consistent samples over the domain
    /// n = ceil(2 * max|domain| * max(frequencies))
    pub fn sample_count() -> usize {
        let max_abs = DOMAIN_MIN.abs().max(DOMAIN_MAX.abs());
        let max_freq = TARGET_FREQUENCIES.iter().copied().max().unwrap_or(1) as f64;
        (2.0 * max_abs * max_freq).ceil() as usize
    }

    /// Norm of the frequency vector
    pub fn frequency_norm() -> f64 {
        TARGET_FREQUENCIES
            .iter()
            .map(|&w| (w as f64).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Target function y(x) = (1/|w|) * sum_w cos(w x)
    pub fn target(x: f64) -> f64 {
        let sum: f64 = TARGET_FREQUENCIES
            .iter()
            .map(|&w| (w as f64 * x).cos())
            .sum();
        sum / frequency_norm()
    }
}

// ============================================================================
// Gradient Constants
// Gantree: shift // 파라미터 시프트
// ============================================================================

pub mod shift {
    //! Parameter-shift rule coefficients

    use std::f64::consts::{FRAC_PI_2, SQRT_2};

    /// Shift for the two-term rule and the first four-term pair
    pub const HALF_PI: f64 = FRAC_PI_2;

    /// Shift for the second four-term pair
    pub const THREE_HALF_PI: f64 = 3.0 * FRAC_PI_2;

    /// Four-term rule coefficient for the pi/2 pair: (sqrt2 + 1) / (4 sqrt2)
    pub const C_PLUS: f64 = (SQRT_2 + 1.0) / (4.0 * SQRT_2);

    /// Four-term rule coefficient for the 3pi/2 pair: (sqrt2 - 1) / (4 sqrt2)
    pub const C_MINUS: f64 = (SQRT_2 - 1.0) / (4.0 * SQRT_2);
}

// ============================================================================
// Spectrum Constants
// ============================================================================

pub mod spectrum {
    //! Fourier spectrum constants

    /// Period of the analyzed function
    pub const PERIOD: f64 = 2.0 * std::f64::consts::PI;

    /// Number of frequency bins for max frequency d: 2d + 1
    #[inline]
    pub const fn bin_count(max_freq: usize) -> usize {
        2 * max_freq + 1
    }
}

// ============================================================================
// Tests
// ============================================================================
