//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while building or transforming circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A qubit index is outside the circuit's register.
    #[error("Qubit index {index} out of range (circuit has {num_qubits} qubits)")]
    QubitOutOfRange {
        /// The offending index.
        index: u32,
        /// Number of qubits in the circuit.
        num_qubits: usize,
    },

    /// A classical bit index is outside the circuit's register.
    #[error("Classical bit index {index} out of range (circuit has {num_clbits} bits)")]
    ClbitOutOfRange {
        /// The offending index.
        index: u32,
        /// Number of classical bits in the circuit.
        num_clbits: usize,
    },

    /// An instruction received an invalid operand combination.
    #[error("Invalid instruction: {0}")]
    InvalidInstruction(String),

    /// An unknown gate name was requested.
    #[error("Unknown gate: {0}")]
    UnknownGate(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
