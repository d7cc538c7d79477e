//! Fourier coefficients of a scalar periodic function
//!
//! Gantree: L5_Spectrum → Coefficients
//!
//! Samples `f` at `t_k = 2πk / N` for `N = 2d + 1`, runs a forward FFT and
//! divides by `N`. With a band limit of `d` this recovers `c_n` in
//! `f(t) = Σ c_n e^{int}` exactly. FFT output holds `0..=d` first and the
//! negative frequencies after, so bins are rotated into `-d..=d`.

use num_complex::Complex64;
use qfit_core::constants::spectrum;
use qfit_core::{QfitError, QfitResult};
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

/// Coefficients for frequencies `-max_freq..=max_freq`
/// Gantree: FourierCoefficients // 푸리에 계수
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FourierCoefficients {
    /// Highest frequency
    max_freq: usize,

    /// `c_n` ordered from `-max_freq` to `+max_freq`
    values: Vec<Complex64>,
}

impl FourierCoefficients {
    // ========================================================================
    // Accessors
    // ========================================================================

    /// Highest frequency
    pub fn max_freq(&self) -> usize {
        self.max_freq
    }

    /// `2·max_freq + 1`
    pub fn bin_count(&self) -> usize {
        self.values.len()
    }

    /// Frequency of every bin, ascending
    pub fn frequencies(&self) -> Vec<i64> {
        let d = self.max_freq as i64;
        (-d..=d).collect()
    }

    /// Coefficients ordered from `-max_freq` to `+max_freq`
    pub fn as_slice(&self) -> &[Complex64] {
        &self.values
    }

    /// Coefficient of frequency `n`
    pub fn get(&self, n: i64) -> QfitResult<Complex64> {
        let d = self.max_freq as i64;
        if n.abs() > d {
            return Err(QfitError::InvalidFrequency(n.unsigned_abs() as usize));
        }
        Ok(self.values[(n + d) as usize])
    }

    /// Real parts
    pub fn real(&self) -> Vec<f64> {
        self.values.iter().map(|c| c.re).collect()
    }

    /// Imaginary parts
    pub fn imag(&self) -> Vec<f64> {
        self.values.iter().map(|c| c.im).collect()
    }

    /// `sqrt(re² + im²)` per bin
    pub fn magnitudes(&self) -> Vec<f64> {
        self.values.iter().map(|c| c.norm()).collect()
    }

    /// `c_{-n} = conj(c_n)` within `tol`, as for any real-valued function
    pub fn is_conjugate_symmetric(&self, tol: f64) -> bool {
        let d = self.max_freq;
        (1..=d).all(|k| (self.values[d + k] - self.values[d - k].conj()).norm() <= tol)
    }
}

/// Fourier coefficients of `f` up to `max_freq`
/// Gantree: coefficients(f, max_freq) -> Result<FourierCoefficients> // DFT
pub fn coefficients<F>(mut f: F, max_freq: usize) -> QfitResult<FourierCoefficients>
where
    F: FnMut(f64) -> QfitResult<f64>,
{
    let n = spectrum::bin_count(max_freq);
    let mut buffer = (0..n)
        .map(|k| f(spectrum::PERIOD * k as f64 / n as f64).map(|y| Complex64::new(y, 0.0)))
        .collect::<QfitResult<Vec<Complex64>>>()?;

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    let d = max_freq as i64;
    let values = (-d..=d)
        .map(|freq| buffer[freq.rem_euclid(n as i64) as usize] / n as f64)
        .collect();

    Ok(FourierCoefficients { max_freq, values })
}

// ============================================================================
// Tests
// ============================================================================
