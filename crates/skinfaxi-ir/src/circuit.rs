//! High-level circuit builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit.
///
/// An ordered instruction list over a fixed-size qubit register and
/// classical register, with convenient methods for common gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: usize,
    /// Number of classical bits.
    num_clbits: usize,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: usize, num_clbits: usize) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
        }
    }

    fn check_qubit(&self, qubit: QubitId) -> IrResult<()> {
        if (qubit.0 as usize) < self.num_qubits {
            Ok(())
        } else {
            Err(IrError::QubitOutOfRange {
                index: qubit.0,
                num_qubits: self.num_qubits,
            })
        }
    }

    fn check_clbit(&self, clbit: ClbitId) -> IrResult<()> {
        if (clbit.0 as usize) < self.num_clbits {
            Ok(())
        } else {
            Err(IrError::ClbitOutOfRange {
                index: clbit.0,
                num_clbits: self.num_clbits,
            })
        }
    }

    /// Append a gate instruction after validating its operands.
    pub fn apply(&mut self, gate: StandardGate, qubits: &[QubitId]) -> IrResult<&mut Self> {
        if qubits.len() != gate.num_qubits() {
            return Err(IrError::InvalidInstruction(format!(
                "gate '{}' takes {} qubit(s), got {}",
                gate.name(),
                gate.num_qubits(),
                qubits.len()
            )));
        }
        for &q in qubits {
            self.check_qubit(q)?;
        }
        // Two-qubit gates on the same wire are degenerate.
        for (i, &a) in qubits.iter().enumerate() {
            if qubits[i + 1..].contains(&a) {
                return Err(IrError::InvalidInstruction(format!(
                    "gate '{}' applied with duplicate qubit {a}",
                    gate.name()
                )));
            }
        }
        self.instructions
            .push(Instruction::gate(gate, qubits.iter().copied()));
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::H, &[qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::X, &[qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::Y, &[qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::Z, &[qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::S, &[qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::T, &[qubit])
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::Rx(theta), &[qubit])
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::Ry(theta), &[qubit])
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::Rz(theta), &[qubit])
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::P(theta), &[qubit])
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::CX, &[control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::CZ, &[control, target])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::Swap, &[q1, q2])
    }

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::CP(theta), &[control, target])
    }

    /// Apply controlled-Rz gate.
    pub fn crz(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::CRz(theta), &[control, target])
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(StandardGate::CCX, &[c1, c2, target])
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.check_qubit(qubit)?;
        self.check_clbit(clbit)?;
        self.instructions.push(Instruction::measure(qubit, clbit));
        Ok(self)
    }

    /// Measure several qubits into classical bits as one instruction.
    pub fn measure_many(&mut self, qubits: &[QubitId], clbits: &[ClbitId]) -> IrResult<&mut Self> {
        for &q in qubits {
            self.check_qubit(q)?;
        }
        for &c in clbits {
            self.check_clbit(c)?;
        }
        self.instructions.push(Instruction::measure_many(
            qubits.iter().copied(),
            clbits.iter().copied(),
        )?);
        Ok(self)
    }

    /// Measure all qubits to corresponding classical bits.
    ///
    /// Grows the classical register if it is smaller than the qubit register.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        if self.num_clbits < self.num_qubits {
            self.num_clbits = self.num_qubits;
        }
        let qubits: Vec<_> = (0..self.num_qubits as u32).map(QubitId).collect();
        let clbits: Vec<_> = (0..self.num_qubits as u32).map(ClbitId).collect();
        self.instructions
            .push(Instruction::measure_many(qubits, clbits)?);
        Ok(self)
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = (0..self.num_qubits as u32).map(QubitId).collect();
        self.instructions.push(Instruction::barrier(qubits));
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions, barriers included.
    pub fn num_instructions(&self) -> usize {
        self.instructions.len()
    }

    /// Circuit width: qubits plus classical bits.
    pub fn width(&self) -> usize {
        self.num_qubits + self.num_clbits
    }

    /// Circuit depth: the longest chain of gate/measure instructions.
    ///
    /// Computed by advancing a per-wire frontier; barriers synchronize
    /// their wires without adding a layer.
    pub fn depth(&self) -> usize {
        let mut qubit_level = vec![0usize; self.num_qubits];
        let mut clbit_level = vec![0usize; self.num_clbits];
        let mut depth = 0;

        for inst in &self.instructions {
            let level = inst
                .qubits
                .iter()
                .map(|q| qubit_level[q.0 as usize])
                .chain(inst.clbits.iter().map(|c| clbit_level[c.0 as usize]))
                .max()
                .unwrap_or(0);

            let next = match inst.kind {
                InstructionKind::Barrier => level,
                _ => level + 1,
            };

            for q in &inst.qubits {
                qubit_level[q.0 as usize] = next;
            }
            for c in &inst.clbits {
                clbit_level[c.0 as usize] = next;
            }
            depth = depth.max(next);
        }

        depth
    }

    /// Count gate instructions matching a predicate.
    pub fn count_gates(&self, pred: impl Fn(&StandardGate) -> bool) -> usize {
        self.instructions
            .iter()
            .filter_map(Instruction::as_gate)
            .filter(|g| pred(g))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_with_size() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_bell_shape() {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure_all().unwrap();

        assert_eq!(circuit.depth(), 3); // H, CX, measure
        assert_eq!(circuit.width(), 4);
        assert_eq!(circuit.count_gates(|g| *g == StandardGate::H), 1);
        assert_eq!(circuit.count_gates(|g| *g == StandardGate::CX), 1);
    }

    #[test]
    fn test_barrier_does_not_add_depth() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.barrier_all().unwrap();
        circuit.h(QubitId(1)).unwrap();
        // q1's H is forced after the barrier, which sits at q0's level.
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_out_of_range() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        assert!(matches!(
            circuit.h(QubitId(1)),
            Err(IrError::QubitOutOfRange { .. })
        ));
        assert!(matches!(
            circuit.measure(QubitId(0), ClbitId(4)),
            Err(IrError::ClbitOutOfRange { .. })
        ));
    }

    #[test]
    fn test_duplicate_operand_rejected() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        assert!(circuit.cx(QubitId(0), QubitId(0)).is_err());
    }

    #[test]
    fn test_measure_all_grows_clbits() {
        let mut circuit = Circuit::with_size("test", 3, 0);
        circuit.measure_all().unwrap();
        assert_eq!(circuit.num_clbits(), 3);
        assert_eq!(circuit.width(), 6);
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cp(PI / 2.0, QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap();
        assert_eq!(circuit.num_instructions(), 3);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Depth never exceeds the number of applied gates, and equals
            // the busiest wire's gate count for single-qubit circuits.
            #[test]
            fn prop_depth_bounds(
                n in 1usize..6,
                ops in proptest::collection::vec(0u32..6, 0..40),
            ) {
                let mut circuit = Circuit::with_size("prop", n, 0);
                let mut per_wire = vec![0usize; n];
                for q in ops {
                    if (q as usize) < n {
                        circuit.h(QubitId(q)).unwrap();
                        per_wire[q as usize] += 1;
                    }
                }
                let busiest = per_wire.iter().copied().max().unwrap_or(0);
                prop_assert_eq!(circuit.depth(), busiest);
                prop_assert!(circuit.depth() <= circuit.num_instructions());
            }
        }
    }
}
