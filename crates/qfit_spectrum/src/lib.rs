//! # QFIT Spectrum
//!
//! Fourier analysis of a model's output as a function of its encoded input.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qfit_spectrum // L5: Spectrum
//!     Coefficients // 푸리에 계수
//!         coefficients(f, max_freq) // DFT over 2d+1 samples
//!         FourierCoefficients: get(), real(), imag(), magnitudes()
//!     Histogram // 히스토그램
//!         analyze(f, max_freq) -> (bin_count, SpectrumData)
//!         SpectrumRecord: push_row(), reset()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qfit_spectrum::prelude::*;
//!
//! let (bins, data) = analyze(|x| Ok((3.0 * x).cos()), 4).unwrap();
//! assert_eq!(bins, 9);
//! assert!((data.comb[1] - 0.5).abs() < 1e-12);
//!
//! let mut record = SpectrumRecord::new();
//! record.push_row(&data, 1);
//! assert_eq!(record.x, vec![-4, -3, -2, -1, 0, 1, 2, 3, 4]);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Fourier coefficients (Gantree: L5_Spectrum → Coefficients)
pub mod coefficients;

/// Spectrum data and records (Gantree: L5_Spectrum → Histogram)
pub mod histogram;

// ============================================================================
// Re-exports
// ============================================================================

pub use coefficients::{coefficients, FourierCoefficients};
pub use histogram::{analyze, bin_labels, SpectrumData, SpectrumRecord};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports

    pub use crate::coefficients::{coefficients, FourierCoefficients};
    pub use crate::histogram::{analyze, bin_labels, SpectrumData, SpectrumRecord};
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_real_function_is_symmetric() {
        let f = |x: f64| Ok(0.3 * x.cos() - 0.7 * (2.0 * x).sin() + 0.1 * (5.0 * x).cos());
        let coeffs = coefficients(f, 6).unwrap();
        assert!(coeffs.is_conjugate_symmetric(1e-12));

        let mags = coeffs.magnitudes();
        for k in 1..=6 {
            assert_abs_diff_eq!(mags[6 + k], mags[6 - k], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_reconstruction() {
        let f = |x: f64| 0.2 + 0.4 * (2.0 * x).cos() + 0.1 * x.sin();
        let coeffs = coefficients(|x| Ok(f(x)), 3).unwrap();

        let x = 0.77;
        let rebuilt: f64 = coeffs
            .frequencies()
            .iter()
            .zip(coeffs.as_slice())
            .map(|(&n, c)| (c * num_complex::Complex64::from_polar(1.0, n as f64 * x)).re)
            .sum();
        assert_abs_diff_eq!(rebuilt, f(x), epsilon = 1e-12);
    }
}
