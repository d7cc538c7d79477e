//! Kraus representations of the single-qubit noise channels
//!
//! Gantree: L2_Noise → Kraus
//!
//! ρ → Σ_k K_k ρ K_k†, with Σ_k K_k† K_k = I for p in [0, 1].

use num_complex::Complex64;
use qfit_core::ChannelKind;

/// 2×2 complex matrix, row-major
pub type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

// ============================================================================
// Pauli Matrices
// ============================================================================

/// Identity
pub fn identity() -> Matrix2 {
    [[ONE, ZERO], [ZERO, ONE]]
}

/// Pauli X
pub fn pauli_x() -> Matrix2 {
    [[ZERO, ONE], [ONE, ZERO]]
}

/// Pauli Y
pub fn pauli_y() -> Matrix2 {
    [[ZERO, -I], [I, ZERO]]
}

/// Pauli Z
pub fn pauli_z() -> Matrix2 {
    [[ONE, ZERO], [ZERO, -ONE]]
}

/// Multiply every entry by a real factor
pub fn scale(m: Matrix2, factor: f64) -> Matrix2 {
    m.map(|row| row.map(|z| z * factor))
}

/// Conjugate transpose
pub fn dagger(m: &Matrix2) -> Matrix2 {
    [
        [m[0][0].conj(), m[1][0].conj()],
        [m[0][1].conj(), m[1][1].conj()],
    ]
}

/// Matrix product a·b
pub fn matmul(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    let mut out = [[ZERO; 2]; 2];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j];
        }
    }
    out
}

// ============================================================================
// Kraus Sets
// ============================================================================

/// Kraus operators for `kind` at probability `p`
/// Gantree: kraus_operators(kind, p) -> Vec<Matrix2> // 크라우스 연산자
///
/// `p` is not range-checked; negative values produce NaN entries.
pub fn kraus_operators(kind: ChannelKind, p: f64) -> Vec<Matrix2> {
    match kind {
        ChannelKind::BitFlip => vec![
            scale(identity(), (1.0 - p).sqrt()),
            scale(pauli_x(), p.sqrt()),
        ],
        ChannelKind::PhaseFlip => vec![
            scale(identity(), (1.0 - p).sqrt()),
            scale(pauli_z(), p.sqrt()),
        ],
        ChannelKind::AmplitudeDamping => {
            let keep = Complex64::new((1.0 - p).sqrt(), 0.0);
            let decay = Complex64::new(p.sqrt(), 0.0);
            vec![[[ONE, ZERO], [ZERO, keep]], [[ZERO, decay], [ZERO, ZERO]]]
        }
        ChannelKind::PhaseDamping => {
            let keep = Complex64::new((1.0 - p).sqrt(), 0.0);
            let dephase = Complex64::new(p.sqrt(), 0.0);
            vec![[[ONE, ZERO], [ZERO, keep]], [[ZERO, ZERO], [ZERO, dephase]]]
        }
        ChannelKind::Depolarizing => {
            let pauli_weight = (p / 3.0).sqrt();
            vec![
                scale(identity(), (1.0 - p).sqrt()),
                scale(pauli_x(), pauli_weight),
                scale(pauli_y(), pauli_weight),
                scale(pauli_z(), pauli_weight),
            ]
        }
    }
}

/// Σ K† K for a Kraus set
pub fn completeness(operators: &[Matrix2]) -> Matrix2 {
    operators.iter().fold([[ZERO; 2]; 2], |acc, k| {
        let term = matmul(&dagger(k), k);
        let mut sum = acc;
        for i in 0..2 {
            for j in 0..2 {
                sum[i][j] += term[i][j];
            }
        }
        sum
    })
}

// ============================================================================
// Tests
// ============================================================================
