//! Skinfaxi circuit intermediate representation.
//!
//! A circuit is an ordered list of [`Instruction`]s over a fixed number of
//! qubits and classical bits. The representation is deliberately linear:
//! every consumer in the workspace (the statevector simulator, the QASM3
//! emitter, the text renderer) walks the instruction list front to back.
//!
//! # Example
//!
//! ```
//! use skinfaxi_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.depth(), 3);
//! assert_eq!(circuit.width(), 4);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qasm;
pub mod qubit;
pub mod render;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qasm::emit;
pub use qubit::{ClbitId, QubitId};
pub use render::draw;
