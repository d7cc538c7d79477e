//! Visualization payload handed back to the host
//!
//! Gantree: L6_Training → VisualizationFrame

use qfit_core::QfitResult;
use qfit_spectrum::{SpectrumData, SpectrumRecord};
use serde::{Deserialize, Serialize};

/// One point of the prediction plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    /// Input
    pub x: f64,
    /// Model output
    pub predicted: f64,
    /// Target
    pub target: f64,
}

impl PredictionPoint {
    /// `(x, predicted, target)`
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.predicted, self.target)
    }
}

/// Everything one visualization refresh produces
/// Gantree: VisualizationFrame // 시각화 프레임
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationFrame {
    /// Bins in the latest spectrum
    pub bin_count: usize,

    /// Latest spectrum
    pub spectrum: SpectrumData,

    /// Accumulated step × frequency surface
    pub histogram: SpectrumRecord,

    /// Prediction over the training domain
    pub predictions: Vec<PredictionPoint>,

    /// Full loss sequence
    pub loss: Vec<f64>,
}

impl VisualizationFrame {
    /// Hosts draw the plots only once training has produced a loss
    pub fn has_training_data(&self) -> bool {
        !self.loss.is_empty()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> QfitResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_json() {
        let frame = VisualizationFrame {
            bin_count: 1,
            spectrum: SpectrumData {
                real: vec![0.5],
                imag: vec![0.0],
                comb: vec![0.5],
            },
            histogram: SpectrumRecord::new(),
            predictions: vec![PredictionPoint {
                x: 0.0,
                predicted: 0.1,
                target: 0.2,
            }],
            loss: Vec::new(),
        };

        assert!(!frame.has_training_data());
        assert_eq!(frame.predictions[0].as_tuple(), (0.0, 0.1, 0.2));

        let json = frame.to_json().unwrap();
        assert!(json.contains("\"histogram\":{\"x\":[],\"y\":[],\"z\":[]}"));
        let back: VisualizationFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frame);
    }
}
