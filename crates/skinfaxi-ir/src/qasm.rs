//! QASM3 emitter for serializing circuits.

use std::fmt::Write;

use crate::circuit::Circuit;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::QubitId;

/// Emit a circuit as QASM3 source code.
///
/// The output targets runtimes that resolve standard gates via
/// `stdgates.inc`; all gates in [`crate::StandardGate`] use their
/// include names.
pub fn emit(circuit: &Circuit) -> String {
    let mut out = String::new();

    out.push_str("OPENQASM 3.0;\n");
    out.push_str("include \"stdgates.inc\";\n\n");

    if circuit.num_qubits() > 0 {
        let _ = writeln!(out, "qubit[{}] q;", circuit.num_qubits());
    }
    if circuit.num_clbits() > 0 {
        let _ = writeln!(out, "bit[{}] c;", circuit.num_clbits());
    }
    if circuit.num_qubits() > 0 || circuit.num_clbits() > 0 {
        out.push('\n');
    }

    for instruction in circuit.instructions() {
        emit_instruction(&mut out, instruction);
    }

    out
}

fn emit_instruction(out: &mut String, instruction: &Instruction) {
    match &instruction.kind {
        InstructionKind::Gate(gate) => {
            let qubits = qubit_list(&instruction.qubits);
            match gate.parameter() {
                Some(theta) => {
                    let _ = writeln!(out, "{}({}) {};", gate.name(), format_angle(theta), qubits);
                }
                None => {
                    let _ = writeln!(out, "{} {};", gate.name(), qubits);
                }
            }
        }
        InstructionKind::Measure => {
            for (q, c) in instruction.qubits.iter().zip(instruction.clbits.iter()) {
                let _ = writeln!(out, "c[{}] = measure q[{}];", c.0, q.0);
            }
        }
        InstructionKind::Barrier => {
            let qubits = qubit_list(&instruction.qubits);
            if qubits.is_empty() {
                out.push_str("barrier;\n");
            } else {
                let _ = writeln!(out, "barrier {qubits};");
            }
        }
    }
}

fn qubit_list(qubits: &[QubitId]) -> String {
    qubits
        .iter()
        .map(|q| format!("q[{}]", q.0))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a rotation angle, folding exact multiples of pi into `pi/n` form.
fn format_angle(theta: f64) -> String {
    use std::f64::consts::PI;

    for (num, den) in [(1.0, 1.0), (1.0, 2.0), (1.0, 4.0), (1.0, 8.0), (3.0, 4.0)] {
        let value = PI * num / den;
        if (theta - value).abs() < 1e-12 {
            return if den == 1.0 {
                "pi".to_string()
            } else if num == 1.0 {
                format!("pi/{}", den as u32)
            } else {
                format!("{}*pi/{}", num as u32, den as u32)
            };
        }
        if (theta + value).abs() < 1e-12 {
            return if den == 1.0 {
                "-pi".to_string()
            } else if num == 1.0 {
                format!("-pi/{}", den as u32)
            } else {
                format!("-{}*pi/{}", num as u32, den as u32)
            };
        }
    }

    format!("{theta}")
}
