//! Ansatz variants and their dispatch table
//!
//! Gantree: L4_Model → Ansatz
//!
//! Each variant maps to one table entry holding its layer builder, parameter
//! count, and per-parameter shift-rule kind. Ids are resolved once, at model
//! construction.

use qfit_core::constants::training;
use qfit_core::{CircuitBuilder, QfitError, QfitResult, Shape};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a parameter enters the circuit; selects its gradient rule
/// Gantree: ParamKind // 파라미터 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    /// Single-qubit Pauli rotation (generator eigenvalues ±½)
    Rotation,
    /// Controlled Pauli rotation (generator eigenvalues 0, ±½)
    ControlledRotation,
}

/// Appends one ansatz layer for a single weight row
pub type LayerFn = fn(CircuitBuilder, &[f64]) -> CircuitBuilder;

/// Parameters per layer for a qubit count
pub type ParamCountFn = fn(usize) -> usize;

/// Parameter kinds of one weight row, in consumption order
pub type ParamKindsFn = fn(usize) -> Vec<ParamKind>;

/// Dispatch table entry
/// Gantree: AnsatzEntry // 디스패치 항목
#[derive(Clone, Copy)]
pub struct AnsatzEntry {
    /// Numeric id used by hosts
    pub id: u32,
    /// Display name
    pub name: &'static str,
    /// Layer builder
    pub layer: LayerFn,
    /// Weight-row length
    pub param_count: ParamCountFn,
    /// Weight-row parameter kinds
    pub param_kinds: ParamKindsFn,
}

impl fmt::Debug for AnsatzEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnsatzEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

static ANSATZ_TABLE: [AnsatzEntry; 1] = [AnsatzEntry {
    id: training::CIRCUIT19_ID,
    name: "circuit19",
    layer: circuit19_layer,
    param_count: circuit19_param_count,
    param_kinds: circuit19_param_kinds,
}];

/// Supported ansatz variants
/// Gantree: AnsatzKind // 안자츠 종류
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnsatzKind {
    /// RX·RZ per qubit, then a CRX ring over qubits 1..n
    #[default]
    Circuit19,
}

impl AnsatzKind {
    /// Resolve a host-facing id
    /// Gantree: from_id(u32) -> Result<AnsatzKind> // ID 해석
    pub fn from_id(id: u32) -> QfitResult<Self> {
        match id {
            training::CIRCUIT19_ID => Ok(AnsatzKind::Circuit19),
            other => Err(QfitError::UnsupportedAnsatz(other)),
        }
    }

    /// Host-facing id
    pub fn id(&self) -> u32 {
        self.entry().id
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        self.entry().name
    }

    /// Table entry for this variant
    pub fn entry(&self) -> &'static AnsatzEntry {
        match self {
            AnsatzKind::Circuit19 => &ANSATZ_TABLE[0],
        }
    }

    /// Weight shape `(n_layers, params_per_layer)`
    pub fn param_shape(&self, n_qubits: usize, n_layers: usize) -> Shape {
        (n_layers, (self.entry().param_count)(n_qubits))
    }

    /// Gradient rule kind of every weight in a row
    pub fn param_kinds(&self, n_qubits: usize) -> Vec<ParamKind> {
        (self.entry().param_kinds)(n_qubits)
    }

    /// Append one layer for `row`
    pub fn apply_layer(&self, builder: CircuitBuilder, row: &[f64]) -> CircuitBuilder {
        (self.entry().layer)(builder, row)
    }
}

impl fmt::Display for AnsatzKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(id={})", self.name(), self.id())
    }
}

// ============================================================================
// Circuit19
// ============================================================================

fn circuit19_param_count(n_qubits: usize) -> usize {
    (3 * n_qubits).saturating_sub(1)
}

fn circuit19_param_kinds(n_qubits: usize) -> Vec<ParamKind> {
    let ring = n_qubits.saturating_sub(1);
    let mut kinds = vec![ParamKind::Rotation; 2 * n_qubits];
    kinds.extend(std::iter::repeat(ParamKind::ControlledRotation).take(ring));
    kinds
}

/// RX(w)·RZ(w) on qubits 0..n, then CRX(w) from q to (q+1) mod n for q in 1..n.
/// Weights are consumed in exactly that order.
fn circuit19_layer(mut builder: CircuitBuilder, w: &[f64]) -> CircuitBuilder {
    let n = builder.num_qubits();
    let mut idx = 0;

    for q in 0..n {
        builder = builder.rx(q, w[idx]).rz(q, w[idx + 1]);
        idx += 2;
    }

    for q in 1..n {
        builder = builder.crx(q, (q + 1) % n, w[idx]);
        idx += 1;
    }

    builder
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qfit_core::Gate;

    #[test]
    fn test_from_id() {
        assert_eq!(AnsatzKind::from_id(19).unwrap(), AnsatzKind::Circuit19);
        let err = AnsatzKind::from_id(7).unwrap_err();
        assert!(matches!(err, QfitError::UnsupportedAnsatz(7)));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_param_shape() {
        let ansatz = AnsatzKind::Circuit19;
        assert_eq!(ansatz.param_shape(2, 4), (4, 5));
        assert_eq!(ansatz.param_shape(1, 3), (3, 2));
        assert_eq!(ansatz.param_shape(4, 1), (1, 11));
    }

    #[test]
    fn test_param_kinds_order() {
        let kinds = AnsatzKind::Circuit19.param_kinds(3);
        assert_eq!(kinds.len(), 8);
        assert!(kinds[..6].iter().all(|k| *k == ParamKind::Rotation));
        assert!(kinds[6..].iter().all(|k| *k == ParamKind::ControlledRotation));
    }

    #[test]
    fn test_circuit19_consumption_order() {
        let w = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let circuit = AnsatzKind::Circuit19
            .apply_layer(CircuitBuilder::new(3), &w)
            .build()
            .unwrap();

        let gates: Vec<Gate> = circuit.gates().copied().collect();
        assert_eq!(
            gates,
            vec![
                Gate::Rx(0, 0.0),
                Gate::Rz(0, 1.0),
                Gate::Rx(1, 2.0),
                Gate::Rz(1, 3.0),
                Gate::Rx(2, 4.0),
                Gate::Rz(2, 5.0),
                Gate::Crx(1, 2, 6.0),
                Gate::Crx(2, 0, 7.0),
            ]
        );
    }

    #[test]
    fn test_single_qubit_has_no_ring() {
        let circuit = AnsatzKind::Circuit19
            .apply_layer(CircuitBuilder::new(1), &[0.3, 0.4])
            .build()
            .unwrap();
        assert_eq!(circuit.count_2q(), 0);
        assert_eq!(circuit.gate_count(), 2);
    }
}
