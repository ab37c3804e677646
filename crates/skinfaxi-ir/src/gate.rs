//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// Standard gates with known semantics.
///
/// Rotation angles are concrete `f64` radians; this IR has no symbolic
/// parameters because every circuit is fully bound at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// SWAP gate.
    Swap,
    /// Controlled rotation around Z.
    CRz(f64),
    /// Controlled phase gate.
    CP(f64),

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
}

impl StandardGate {
    /// Get the OpenQASM 3 name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::Swap => "swap",
            StandardGate::CRz(_) => "crz",
            StandardGate::CP(_) => "cp",
            StandardGate::CCX => "ccx",
        }
    }

    /// Number of qubits this gate acts on.
    pub fn num_qubits(&self) -> usize {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_) => 1,
            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::Swap
            | StandardGate::CRz(_)
            | StandardGate::CP(_) => 2,
            StandardGate::CCX => 3,
        }
    }

    /// Rotation parameter, if the gate carries one.
    pub fn parameter(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(t)
            | StandardGate::Ry(t)
            | StandardGate::Rz(t)
            | StandardGate::P(t)
            | StandardGate::CRz(t)
            | StandardGate::CP(t) => Some(*t),
            _ => None,
        }
    }

    /// Look up a gate by OpenQASM 3 name with an optional parameter.
    ///
    /// Used by the custom-circuit builder to resolve user-supplied gate
    /// names. Parameterized gates require `param`; fixed gates ignore it.
    pub fn from_name(name: &str, param: Option<f64>) -> IrResult<Self> {
        let gate = match name.to_lowercase().as_str() {
            "id" | "i" => StandardGate::I,
            "x" => StandardGate::X,
            "y" => StandardGate::Y,
            "z" => StandardGate::Z,
            "h" => StandardGate::H,
            "s" => StandardGate::S,
            "sdg" => StandardGate::Sdg,
            "t" => StandardGate::T,
            "tdg" => StandardGate::Tdg,
            "rx" => StandardGate::Rx(param.ok_or_else(|| missing_param("rx"))?),
            "ry" => StandardGate::Ry(param.ok_or_else(|| missing_param("ry"))?),
            "rz" => StandardGate::Rz(param.ok_or_else(|| missing_param("rz"))?),
            "p" | "phase" => StandardGate::P(param.ok_or_else(|| missing_param("p"))?),
            "cx" | "cnot" => StandardGate::CX,
            "cy" => StandardGate::CY,
            "cz" => StandardGate::CZ,
            "ch" => StandardGate::CH,
            "swap" => StandardGate::Swap,
            "crz" => StandardGate::CRz(param.ok_or_else(|| missing_param("crz"))?),
            "cp" => StandardGate::CP(param.ok_or_else(|| missing_param("cp"))?),
            "ccx" | "toffoli" => StandardGate::CCX,
            other => return Err(IrError::UnknownGate(other.to_string())),
        };
        Ok(gate)
    }
}

fn missing_param(name: &str) -> IrError {
    IrError::InvalidInstruction(format!("gate '{name}' requires a rotation parameter"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_names() {
        assert_eq!(StandardGate::H.name(), "h");
        assert_eq!(StandardGate::CX.name(), "cx");
        assert_eq!(StandardGate::CP(1.0).name(), "cp");
    }

    #[test]
    fn test_gate_arity() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::Swap.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(StandardGate::from_name("h", None).unwrap(), StandardGate::H);
        assert_eq!(
            StandardGate::from_name("CNOT", None).unwrap(),
            StandardGate::CX
        );
        assert_eq!(
            StandardGate::from_name("rz", Some(0.5)).unwrap(),
            StandardGate::Rz(0.5)
        );
        assert!(StandardGate::from_name("rz", None).is_err());
        assert!(matches!(
            StandardGate::from_name("frobnicate", None),
            Err(IrError::UnknownGate(_))
        ));
    }
}
