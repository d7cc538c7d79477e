//! Density matrix for mixed-state simulation
//!
//! Gantree: L3_Backend → DensityMatrix
//!
//! Row-major `2^n × 2^n` complex matrix. Wire 0 is the most significant bit
//! of a basis index, so `|q0 q1 … q(n-1)⟩` reads left to right.

use num_complex::Complex64;
use qfit_core::error::{QfitError, QfitResult};
use qfit_core::QubitId;
use qfit_noise::Matrix2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mixed quantum state
/// Gantree: DensityMatrix // 밀도 행렬
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityMatrix {
    /// Number of qubits
    num_qubits: usize,

    /// Row-major entries, `dim * dim` long
    data: Vec<Complex64>,
}

impl DensityMatrix {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Ground state |0…0⟩⟨0…0|
    pub fn new(num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits;
        let mut data = vec![Complex64::new(0.0, 0.0); dim * dim];
        data[0] = Complex64::new(1.0, 0.0);
        Self { num_qubits, data }
    }

    /// Build from raw row-major entries
    pub fn from_data(num_qubits: usize, data: Vec<Complex64>) -> QfitResult<Self> {
        let dim = 1usize << num_qubits;
        if data.len() != dim * dim {
            return Err(QfitError::LengthMismatch {
                what: "density matrix entries",
                expected: dim * dim,
                got: data.len(),
            });
        }
        Ok(Self { num_qubits, data })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Matrix dimension `2^n`
    pub fn dim(&self) -> usize {
        1 << self.num_qubits
    }

    /// Entry ρ[row][col]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim() + col]
    }

    /// Row-major entries
    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }

    /// Nested rows
    pub fn to_rows(&self) -> Vec<Vec<Complex64>> {
        self.data.chunks(self.dim()).map(|r| r.to_vec()).collect()
    }

    fn mask(&self, qubit: QubitId) -> usize {
        1 << (self.num_qubits - 1 - qubit)
    }

    // ========================================================================
    // Observables
    // ========================================================================

    /// Tr ρ
    pub fn trace(&self) -> Complex64 {
        (0..self.dim()).map(|i| self.get(i, i)).sum()
    }

    /// Tr ρ² (1 for pure states, 1/2^n for the maximally mixed state)
    pub fn purity(&self) -> f64 {
        // ρ is Hermitian, so Tr ρ² = Σ |ρ_ij|²
        self.data.iter().map(|z| z.norm_sqr()).sum()
    }

    /// Computational-basis probabilities (the diagonal)
    pub fn probabilities(&self) -> Vec<f64> {
        (0..self.dim()).map(|i| self.get(i, i).re).collect()
    }

    /// ⟨Z⟩ on one qubit
    /// Gantree: expectation_z(q) -> f64 // Z 기대값
    pub fn expectation_z(&self, qubit: QubitId) -> f64 {
        let mask = self.mask(qubit);
        self.probabilities()
            .iter()
            .enumerate()
            .map(|(i, p)| if i & mask == 0 { *p } else { -*p })
            .sum()
    }

    /// True if ρ = ρ† within `tol`
    pub fn is_hermitian(&self, tol: f64) -> bool {
        let dim = self.dim();
        (0..dim).all(|i| (i..dim).all(|j| (self.get(i, j) - self.get(j, i).conj()).norm() <= tol))
    }

    // ========================================================================
    // Evolution
    // ========================================================================

    /// ρ → UρU† for a single-qubit matrix
    /// Gantree: apply_single(q, U) // 단일 큐비트 적용
    pub fn apply_single(&mut self, qubit: QubitId, u: &Matrix2) {
        self.conjugate(qubit, None, u);
    }

    /// ρ → UρU† where U acts on `target` only when `control` is |1⟩
    pub fn apply_controlled(&mut self, control: QubitId, target: QubitId, u: &Matrix2) {
        self.conjugate(target, Some(control), u);
    }

    /// ρ → Σ_k K_k ρ K_k†
    /// Gantree: apply_kraus(q, ops) // 크라우스 채널
    pub fn apply_kraus(&mut self, qubit: QubitId, operators: &[Matrix2]) {
        let mut acc = vec![Complex64::new(0.0, 0.0); self.data.len()];
        for k in operators {
            let mut branch = self.clone();
            branch.conjugate(qubit, None, k);
            for (a, b) in acc.iter_mut().zip(&branch.data) {
                *a += b;
            }
        }
        self.data = acc;
    }

    /// ρ → MρM† with M = I on every basis pair whose control bit is 0
    fn conjugate(&mut self, target: QubitId, control: Option<QubitId>, m: &Matrix2) {
        let dim = self.dim();
        let t = self.mask(target);
        let c = control.map(|q| self.mask(q)).unwrap_or(0);
        let pairs: Vec<(usize, usize)> = (0..dim)
            .filter(|i| i & t == 0 && i & c == c)
            .map(|i| (i, i | t))
            .collect();

        // Left: M ρ
        for col in 0..dim {
            for &(i, j) in &pairs {
                let a = self.data[i * dim + col];
                let b = self.data[j * dim + col];
                self.data[i * dim + col] = m[0][0] * a + m[0][1] * b;
                self.data[j * dim + col] = m[1][0] * a + m[1][1] * b;
            }
        }

        // Right: (Mρ) M†
        for row in 0..dim {
            for &(i, j) in &pairs {
                let a = self.data[row * dim + i];
                let b = self.data[row * dim + j];
                self.data[row * dim + i] = a * m[0][0].conj() + b * m[0][1].conj();
                self.data[row * dim + j] = a * m[1][0].conj() + b * m[1][1].conj();
            }
        }
    }
}

impl fmt::Display for DensityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DensityMatrix({} qubits, trace={:.6}, purity={:.6})",
            self.num_qubits,
            self.trace().re,
            self.purity()
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
    use qfit_core::ChannelKind;
    use qfit_noise::kraus::{kraus_operators, pauli_x};

    #[test]
    fn test_ground_state() {
        let rho = DensityMatrix::new(2);
        assert_eq!(rho.dim(), 4);
        assert_abs_diff_eq!(rho.trace().re, 1.0);
        assert_abs_diff_eq!(rho.purity(), 1.0);
        assert_abs_diff_eq!(rho.expectation_z(0), 1.0);
        assert_abs_diff_eq!(rho.expectation_z(1), 1.0);
    }

    #[test]
    fn test_wire_zero_is_msb() {
        let mut rho = DensityMatrix::new(2);
        rho.apply_single(0, &pauli_x());
        // |10⟩ is basis index 2
        assert_abs_diff_eq!(rho.probabilities()[2], 1.0);
        assert_abs_diff_eq!(rho.expectation_z(0), -1.0);
        assert_abs_diff_eq!(rho.expectation_z(1), 1.0);
    }

    #[test]
    fn test_controlled_respects_control() {
        let mut rho = DensityMatrix::new(2);
        rho.apply_controlled(0, 1, &pauli_x());
        assert_abs_diff_eq!(rho.probabilities()[0], 1.0);

        rho.apply_single(0, &pauli_x());
        rho.apply_controlled(0, 1, &pauli_x());
        assert_abs_diff_eq!(rho.probabilities()[3], 1.0);
    }

    #[test]
    fn test_full_depolarizing_mixes_qubit() {
        let mut rho = DensityMatrix::new(1);
        rho.apply_kraus(0, &kraus_operators(ChannelKind::Depolarizing, 0.75));
        // p = 3/4 is the fully depolarizing point
        assert_abs_diff_eq!(rho.expectation_z(0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rho.purity(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(rho.trace().re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_amplitude_damping_relaxes() {
        let mut rho = DensityMatrix::new(1);
        rho.apply_single(0, &pauli_x());
        rho.apply_kraus(0, &kraus_operators(ChannelKind::AmplitudeDamping, 1.0));
        assert_abs_diff_eq!(rho.expectation_z(0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_data_length() {
        let result = DensityMatrix::from_data(1, vec![Complex64::new(1.0, 0.0); 3]);
        assert!(result.unwrap_err().is_shape_error());
    }
}
