//! Noise parameters for QFIT
//!
//! Gantree: L2_Noise → NoiseParams
//!
//! The five per-qubit channel probabilities applied after every ansatz layer.
//! Passed per call; never stored on the model.

use qfit_core::error::{QfitError, QfitResult};
use qfit_core::{ChannelKind, Probability};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-qubit noise channel probabilities
/// Gantree: NoiseParams // 노이즈 파라미터
///
/// Values are not range-checked on construction: channel semantics outside
/// [0, 1] are undefined and hosts are expected to clamp upstream (see
/// [`NoiseParams::clamped`]). [`NoiseParams::validate`] is available for
/// hosts that prefer to reject.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NoiseParams {
    /// Bit-flip probability
    /// Gantree: bit_flip: f64 // 비트 플립
    #[serde(default, alias = "bf")]
    bit_flip: f64,

    /// Phase-flip probability
    /// Gantree: phase_flip: f64 // 위상 플립
    #[serde(default, alias = "pf")]
    phase_flip: f64,

    /// Amplitude-damping γ
    /// Gantree: amplitude_damping: f64 // 진폭 감쇠
    #[serde(default, alias = "ad")]
    amplitude_damping: f64,

    /// Phase-damping γ
    /// Gantree: phase_damping: f64 // 위상 감쇠
    #[serde(default, alias = "pd")]
    phase_damping: f64,

    /// Depolarization probability
    /// Gantree: depolarization: f64 // 탈분극
    #[serde(default, alias = "dp")]
    depolarization: f64,
}

impl NoiseParams {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create from the five probabilities (bit-flip, phase-flip,
    /// amplitude damping, phase damping, depolarization)
    pub fn new(
        bit_flip: f64,
        phase_flip: f64,
        amplitude_damping: f64,
        phase_damping: f64,
        depolarization: f64,
    ) -> Self {
        Self {
            bit_flip,
            phase_flip,
            amplitude_damping,
            phase_damping,
            depolarization,
        }
    }

    /// Create and reject any probability outside [0, 1]
    pub fn validated(
        bit_flip: f64,
        phase_flip: f64,
        amplitude_damping: f64,
        phase_damping: f64,
        depolarization: f64,
    ) -> QfitResult<Self> {
        let params = Self::new(
            bit_flip,
            phase_flip,
            amplitude_damping,
            phase_damping,
            depolarization,
        );
        params.validate()?;
        Ok(params)
    }

    /// All channels off
    pub fn noiseless() -> Self {
        Self::default()
    }

    /// A single channel switched on
    pub fn only(kind: ChannelKind, probability: f64) -> Self {
        Self::noiseless().with(kind, probability)
    }

    /// Derive damping probabilities from coherence times over one layer
    ///
    /// γ = 1 - exp(-t/T1); the phase-damping λ supplies the remaining
    /// dephasing so that off-diagonals decay as exp(-t/T2) overall.
    pub fn from_coherence(t1_us: f64, t2_us: f64, layer_time_us: f64) -> QfitResult<Self> {
        if !(t1_us > 0.0 && t2_us > 0.0 && layer_time_us >= 0.0) {
            return Err(QfitError::InvalidConfig(format!(
                "coherence times must be positive: T1={}, T2={}, t={}",
                t1_us, t2_us, layer_time_us
            )));
        }
        if t2_us > 2.0 * t1_us {
            return Err(QfitError::InvalidConfig(format!(
                "T2 ({}) must be <= 2*T1 ({})",
                t2_us,
                2.0 * t1_us
            )));
        }

        let gamma = 1.0 - (-layer_time_us / t1_us).exp();
        let lambda = 1.0 - (layer_time_us / t1_us - 2.0 * layer_time_us / t2_us).exp();

        Ok(Self::noiseless()
            .with_amplitude_damping(gamma)
            .with_phase_damping(lambda.max(0.0)))
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set the probability of one channel
    pub fn with(mut self, kind: ChannelKind, probability: f64) -> Self {
        *self.slot_mut(kind) = probability;
        self
    }

    /// Set bit-flip probability
    pub fn with_bit_flip(self, p: f64) -> Self {
        self.with(ChannelKind::BitFlip, p)
    }

    /// Set phase-flip probability
    pub fn with_phase_flip(self, p: f64) -> Self {
        self.with(ChannelKind::PhaseFlip, p)
    }

    /// Set amplitude-damping γ
    pub fn with_amplitude_damping(self, gamma: f64) -> Self {
        self.with(ChannelKind::AmplitudeDamping, gamma)
    }

    /// Set phase-damping γ
    pub fn with_phase_damping(self, gamma: f64) -> Self {
        self.with(ChannelKind::PhaseDamping, gamma)
    }

    /// Set depolarization probability
    pub fn with_depolarization(self, p: f64) -> Self {
        self.with(ChannelKind::Depolarizing, p)
    }

    fn slot_mut(&mut self, kind: ChannelKind) -> &mut f64 {
        match kind {
            ChannelKind::BitFlip => &mut self.bit_flip,
            ChannelKind::PhaseFlip => &mut self.phase_flip,
            ChannelKind::AmplitudeDamping => &mut self.amplitude_damping,
            ChannelKind::PhaseDamping => &mut self.phase_damping,
            ChannelKind::Depolarizing => &mut self.depolarization,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Probability of one channel
    pub fn get(&self, kind: ChannelKind) -> f64 {
        match kind {
            ChannelKind::BitFlip => self.bit_flip,
            ChannelKind::PhaseFlip => self.phase_flip,
            ChannelKind::AmplitudeDamping => self.amplitude_damping,
            ChannelKind::PhaseDamping => self.phase_damping,
            ChannelKind::Depolarizing => self.depolarization,
        }
    }

    /// Get bit-flip probability
    pub fn bit_flip(&self) -> f64 {
        self.bit_flip
    }

    /// Get phase-flip probability
    pub fn phase_flip(&self) -> f64 {
        self.phase_flip
    }

    /// Get amplitude-damping γ
    pub fn amplitude_damping(&self) -> f64 {
        self.amplitude_damping
    }

    /// Get phase-damping γ
    pub fn phase_damping(&self) -> f64 {
        self.phase_damping
    }

    /// Get depolarization probability
    pub fn depolarization(&self) -> f64 {
        self.depolarization
    }

    /// Channels in application order with their probabilities
    /// Gantree: channels(&self) -> [(kind,p);5] // 적용 순서
    pub fn channels(&self) -> [(ChannelKind, f64); 5] {
        ChannelKind::ORDER.map(|kind| (kind, self.get(kind)))
    }

    /// True if every channel is off
    pub fn is_noiseless(&self) -> bool {
        self.channels().iter().all(|&(_, p)| p == 0.0)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Reject any probability outside [0, 1]
    pub fn validate(&self) -> QfitResult<()> {
        for (_, p) in self.channels() {
            Probability::new(p)?;
        }
        Ok(())
    }

    /// True if every probability is in [0, 1]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Copy with every probability clamped into [0, 1]
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for kind in ChannelKind::ORDER {
            *out.slot_mut(kind) = Probability::clamped(self.get(kind)).value();
        }
        out
    }
}

impl fmt::Display for NoiseParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NoiseParams(bf={:.3}, pf={:.3}, ad={:.3}, pd={:.3}, dp={:.3})",
            self.bit_flip,
            self.phase_flip,
            self.amplitude_damping,
            self.phase_damping,
            self.depolarization
        )
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
    fn test_noiseless() {
        let params = NoiseParams::noiseless();
        assert!(params.is_noiseless());
        assert!(params.is_valid());
    }

    #[test]
    fn test_channel_order() {
        let params = NoiseParams::new(0.1, 0.2, 0.3, 0.4, 0.5);
        let channels = params.channels();
        assert_eq!(channels[0], (ChannelKind::BitFlip, 0.1));
        assert_eq!(channels[2], (ChannelKind::AmplitudeDamping, 0.3));
        assert_eq!(channels[4], (ChannelKind::Depolarizing, 0.5));
    }

    #[test]
    fn test_only() {
        let params = NoiseParams::only(ChannelKind::PhaseDamping, 0.3);
        assert_eq!(params.phase_damping(), 0.3);
        assert_eq!(params.bit_flip(), 0.0);
        assert!(!params.is_noiseless());
    }

    #[test]
    fn test_validate_and_clamp() {
        let params = NoiseParams::new(1.2, -0.1, 0.5, 0.0, 0.0);
        assert!(matches!(
            params.validate(),
            Err(QfitError::InvalidProbability(_))
        ));

        let clamped = params.clamped();
        assert_eq!(clamped.bit_flip(), 1.0);
        assert_eq!(clamped.phase_flip(), 0.0);
        assert_eq!(clamped.amplitude_damping(), 0.5);
        assert!(clamped.is_valid());

        assert!(NoiseParams::validated(0.0, 0.0, 2.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_short_key_aliases() {
        let json = r#"{"bf": 0.1, "pf": 0.2, "ad": 0.3, "pd": 0.4, "dp": 0.5}"#;
        let params: NoiseParams = serde_json::from_str(json).unwrap();
        assert_eq!(params, NoiseParams::new(0.1, 0.2, 0.3, 0.4, 0.5));

        let partial: NoiseParams = serde_json::from_str(r#"{"dp": 0.2}"#).unwrap();
        assert_eq!(partial, NoiseParams::only(ChannelKind::Depolarizing, 0.2));
    }

    #[test]
    fn test_from_coherence() {
        let params = NoiseParams::from_coherence(100.0, 60.0, 1.0).unwrap();
        assert_abs_diff_eq!(
            params.amplitude_damping(),
            1.0 - (-0.01f64).exp(),
            epsilon = 1e-12
        );

        // Off-diagonal decay sqrt(1-γ) sqrt(1-λ) matches exp(-t/T2)
        let decay = (1.0 - params.amplitude_damping()).sqrt()
            * (1.0 - params.phase_damping()).sqrt();
        assert_abs_diff_eq!(decay, (-1.0f64 / 60.0).exp(), epsilon = 1e-12);

        assert!(NoiseParams::from_coherence(100.0, 250.0, 1.0).is_err());
        assert!(NoiseParams::from_coherence(0.0, 50.0, 1.0).is_err());
    }
}
