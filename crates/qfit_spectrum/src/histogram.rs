//! Spectrum data and the accumulated step × frequency surface
//!
//! Gantree: L5_Spectrum → Histogram

use crate::coefficients::{coefficients, FourierCoefficients};
use qfit_core::QfitResult;
use serde::{Deserialize, Serialize};

/// Real, imaginary, and magnitude arrays of one spectrum, ordered `-d..=d`
/// Gantree: SpectrumData // 스펙트럼 데이터
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectrumData {
    /// Real parts
    pub real: Vec<f64>,
    /// Imaginary parts
    pub imag: Vec<f64>,
    /// `sqrt(real² + imag²)`
    pub comb: Vec<f64>,
}

impl SpectrumData {
    /// Number of bins
    pub fn len(&self) -> usize {
        self.comb.len()
    }

    /// True if there are no bins
    pub fn is_empty(&self) -> bool {
        self.comb.is_empty()
    }
}

impl From<&FourierCoefficients> for SpectrumData {
    fn from(coeffs: &FourierCoefficients) -> Self {
        Self {
            real: coeffs.real(),
            imag: coeffs.imag(),
            comb: coeffs.magnitudes(),
        }
    }
}

/// Spectrum of `f` up to `max_freq` as `(bin_count, data)`
/// Gantree: analyze(f, max_freq) -> Result<(usize, SpectrumData)> // 스펙트럼 분석
pub fn analyze<F>(f: F, max_freq: usize) -> QfitResult<(usize, SpectrumData)>
where
    F: FnMut(f64) -> QfitResult<f64>,
{
    let coeffs = coefficients(f, max_freq)?;
    Ok((coeffs.bin_count(), SpectrumData::from(&coeffs)))
}

/// Integer axis labels for `bin_count` bins, centered on zero
///
/// Runs from `floor(-n/2) + 1` to `floor(n/2)`, so an odd count gives
/// `-d..=d`.
pub fn bin_labels(bin_count: usize) -> Vec<i64> {
    let n = bin_count as i64;
    ((-n).div_euclid(2) + 1..=n / 2).collect()
}

/// Surface of magnitude rows, one per training step
/// Gantree: SpectrumRecord // 스펙트럼 기록
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectrumRecord {
    /// Frequency bin labels
    pub x: Vec<i64>,
    /// Step indices
    pub y: Vec<usize>,
    /// Magnitude rows, one per step
    pub z: Vec<Vec<f64>>,
}

impl SpectrumRecord {
    /// Empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no row has been added
    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.z.len()
    }

    /// Clear all axes
    pub fn reset(&mut self) {
        self.x.clear();
        self.y.clear();
        self.z.clear();
    }

    /// Relabel both axes and append one magnitude row
    /// Gantree: push_row(data, steps) // 행 추가
    pub fn push_row(&mut self, data: &SpectrumData, steps: usize) {
        self.x = bin_labels(data.len());
        self.y = (0..steps).collect();
        self.z.push(data.comb.clone());
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bin_labels() {
        assert_eq!(bin_labels(17), (-8..=8).collect::<Vec<i64>>());
        assert_eq!(bin_labels(1), vec![0]);
        assert_eq!(bin_labels(4), vec![-1, 0, 1, 2]);
        assert!(bin_labels(0).is_empty());
    }

    #[test]
    fn test_analyze() {
        let (bins, data) = analyze(|x| Ok(x.cos() + 0.5), 8).unwrap();
        assert_eq!(bins, 17);
        assert_eq!(data.len(), 17);
        assert!(data.comb.iter().all(|&m| m >= 0.0));
        assert_abs_diff_eq!(data.comb[8], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(data.comb[7], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(data.comb[9], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_record_accumulates() {
        let (_, data) = analyze(|x| Ok(x.sin()), 2).unwrap();
        let mut record = SpectrumRecord::new();
        record.push_row(&data, 1);
        record.push_row(&data, 2);

        assert_eq!(record.x, vec![-2, -1, 0, 1, 2]);
        assert_eq!(record.y, vec![0, 1]);
        assert_eq!(record.len(), 2);

        record.reset();
        assert!(record.is_empty());
        assert!(record.x.is_empty());
    }

    #[test]
    fn test_record_json_keys() {
        let record: SpectrumRecord = serde_json::from_str(r#"{"x": [], "y": [], "z": []}"#).unwrap();
        assert!(record.is_empty());
    }
}
