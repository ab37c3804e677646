//! Plain-text circuit diagrams.
//!
//! Renders one column per instruction, one wire row per qubit, with
//! connector rows between wires for multi-qubit gates:
//!
//! ```text
//! q0: ──[H]───■───[M]──
//!             │
//! q1: ────────X───[M]──
//! ```

use crate::circuit::Circuit;
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};

/// Render a circuit as a text diagram.
pub fn draw(circuit: &Circuit) -> String {
    let num_qubits = circuit.num_qubits();
    if num_qubits == 0 {
        return String::new();
    }

    let label_width = format!("q{}: ", num_qubits - 1).len();
    // Row 2*i is qubit i's wire; row 2*i+1 is the gap below it.
    let mut rows = vec![String::new(); 2 * num_qubits - 1];

    for (i, row) in rows.iter_mut().enumerate() {
        if i % 2 == 0 {
            let label = format!("q{}: ", i / 2);
            row.push_str(&format!("{label:<label_width$}"));
        } else {
            row.push_str(&" ".repeat(label_width));
        }
    }

    for instruction in circuit.instructions() {
        append_column(&mut rows, num_qubits, instruction);
    }

    for (i, row) in rows.iter_mut().enumerate() {
        if i % 2 == 0 {
            row.push('─');
        }
    }

    let mut out = rows.join("\n");
    out.push('\n');
    out
}

/// Append one instruction column, padding every row to equal display width.
fn append_column(rows: &mut [String], num_qubits: usize, instruction: &Instruction) {
    let cells = instruction_cells(instruction, num_qubits);
    let width = cells
        .iter()
        .flatten()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(1)
        + 2;

    let (lo, hi) = match (
        instruction.qubits.iter().map(|q| q.0 as usize).min(),
        instruction.qubits.iter().map(|q| q.0 as usize).max(),
    ) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => (0, 0),
    };
    let is_barrier = instruction.is_barrier();

    for (i, row) in rows.iter_mut().enumerate() {
        if i % 2 == 0 {
            let qubit = i / 2;
            let cell = cells[qubit].as_deref().unwrap_or("");
            push_centered(row, cell, width, '─');
        } else {
            let gap = i / 2; // between qubit `gap` and `gap + 1`
            let spanned = !instruction.qubits.is_empty() && lo <= gap && gap + 1 <= hi;
            let mark = match (is_barrier, spanned) {
                (true, true) => "░",
                (false, true) => "│",
                _ => "",
            };
            push_centered(row, mark, width, ' ');
        }
    }
}

/// The display cell for each qubit wire, `None` for untouched wires.
fn instruction_cells(instruction: &Instruction, num_qubits: usize) -> Vec<Option<String>> {
    let mut cells = vec![None; num_qubits];
    let on = |cells: &mut Vec<Option<String>>, idx: usize, s: &str| {
        cells[idx] = Some(s.to_string());
    };

    match &instruction.kind {
        InstructionKind::Gate(gate) => {
            let q: Vec<usize> = instruction.qubits.iter().map(|q| q.0 as usize).collect();
            match gate {
                StandardGate::CX => {
                    on(&mut cells, q[0], "■");
                    on(&mut cells, q[1], "X");
                }
                StandardGate::CY => {
                    on(&mut cells, q[0], "■");
                    on(&mut cells, q[1], "Y");
                }
                StandardGate::CZ => {
                    on(&mut cells, q[0], "■");
                    on(&mut cells, q[1], "■");
                }
                StandardGate::CH => {
                    on(&mut cells, q[0], "■");
                    on(&mut cells, q[1], "[H]");
                }
                StandardGate::Swap => {
                    on(&mut cells, q[0], "x");
                    on(&mut cells, q[1], "x");
                }
                StandardGate::CRz(theta) => {
                    on(&mut cells, q[0], "■");
                    on(&mut cells, q[1], &format!("[RZ({})]", short_angle(*theta)));
                }
                StandardGate::CP(theta) => {
                    on(&mut cells, q[0], "■");
                    on(&mut cells, q[1], &format!("[P({})]", short_angle(*theta)));
                }
                StandardGate::CCX => {
                    on(&mut cells, q[0], "■");
                    on(&mut cells, q[1], "■");
                    on(&mut cells, q[2], "X");
                }
                single => {
                    let label = match single.parameter() {
                        Some(theta) => format!(
                            "[{}({})]",
                            single.name().to_uppercase(),
                            short_angle(theta)
                        ),
                        None => format!("[{}]", single.name().to_uppercase()),
                    };
                    on(&mut cells, q[0], &label);
                }
            }
        }
        InstructionKind::Measure => {
            for q in &instruction.qubits {
                on(&mut cells, q.0 as usize, "[M]");
            }
        }
        InstructionKind::Barrier => {
            for q in &instruction.qubits {
                on(&mut cells, q.0 as usize, "░");
            }
        }
    }

    cells
}

fn push_centered(row: &mut String, cell: &str, width: usize, fill: char) {
    let len = cell.chars().count();
    let pad = width.saturating_sub(len);
    let left = pad / 2;
    for _ in 0..left {
        row.push(fill);
    }
    row.push_str(cell);
    for _ in 0..(pad - left) {
        row.push(fill);
    }
}

fn short_angle(theta: f64) -> String {
    use std::f64::consts::PI;

    if (theta - PI / 2.0).abs() < 1e-12 {
        "π/2".to_string()
    } else if (theta - PI / 4.0).abs() < 1e-12 {
        "π/4".to_string()
    } else if (theta - PI).abs() < 1e-12 {
        "π".to_string()
    } else {
        format!("{theta:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::QubitId;

    #[test]
    fn test_draw_bell() {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure_all().unwrap();

        let diagram = draw(&circuit);
        let lines: Vec<&str> = diagram.lines().collect();
        assert_eq!(lines.len(), 3); // q0 wire, gap, q1 wire
        assert!(lines[0].starts_with("q0: "));
        assert!(lines[0].contains("[H]"));
        assert!(lines[0].contains("■"));
        assert!(lines[1].contains("│"));
        assert!(lines[2].contains("X"));
        assert!(lines[2].contains("[M]"));
    }

    #[test]
    fn test_draw_empty() {
        let circuit = Circuit::with_size("empty", 0, 0);
        assert!(draw(&circuit).is_empty());
    }

    #[test]
    fn test_rows_aligned() {
        let mut circuit = Circuit::with_size("t", 3, 3);
        circuit.h(QubitId(0)).unwrap();
        circuit.barrier_all().unwrap();
        circuit.cx(QubitId(0), QubitId(2)).unwrap();
        circuit.measure_all().unwrap();

        let diagram = draw(&circuit);
        let widths: Vec<usize> = diagram.lines().map(|l| l.chars().count()).collect();
        // Gap rows are one narrower (wire rows get the closing dash).
        assert_eq!(widths[0], widths[2]);
        assert_eq!(widths[0], widths[4]);
        assert_eq!(widths[1], widths[0] - 1);
    }
}
