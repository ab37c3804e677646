//! Report rendering: measurement results → human-readable text.
//!
//! Two paths: a specialized frequency-analysis report for the Fourier
//! transform, and a generic report for everything else. The frequency
//! narratives are static lookup content keyed by the input-state tag;
//! they describe the theoretical expectation, not the observed counts.

use std::fmt::Write;

use skinfaxi_hal::{BackendKind, ExecutionResult};
use skinfaxi_ir::Circuit;

use crate::intent::{ComputationRequest, InputState, OperationKind};

/// Render the report for a completed computation.
pub fn format_report(
    request: &ComputationRequest,
    circuit: &Circuit,
    result: &ExecutionResult,
) -> String {
    match request.operation {
        OperationKind::FourierTransform => format_qft_report(request, circuit, result),
        _ => format_general_report(request, circuit, result),
    }
}

fn format_general_report(
    request: &ComputationRequest,
    circuit: &Circuit,
    result: &ExecutionResult,
) -> String {
    let mut out = String::new();

    out.push_str("Quantum Computation Results\n");
    out.push_str("===========================\n\n");
    let _ = writeln!(out, "Query: \"{}\"\n", request.query);

    let _ = writeln!(out, "Operation: {}", request.operation);
    let _ = writeln!(out, "Qubits: {}", circuit.num_qubits());
    let _ = writeln!(
        out,
        "Backend: {} ({})",
        result.backend_name, result.backend_kind
    );
    let _ = writeln!(out, "Shots: {}\n", result.shots);

    out.push_str("Measurement Results:\n");
    push_histogram(&mut out, result);

    push_circuit_properties(&mut out, result);

    if let Some(analysis) = operation_analysis(request, result) {
        out.push_str("\nAnalysis:\n");
        out.push_str(&analysis);
    }

    if result.backend_kind == BackendKind::Hardware {
        push_hardware_note(&mut out);
    }

    out.push_str("\nCircuit Diagram:\n");
    out.push_str(&skinfaxi_ir::draw(circuit));

    out.push_str("\n✓ Quantum computation completed successfully\n");
    out
}

fn format_qft_report(
    request: &ComputationRequest,
    circuit: &Circuit,
    result: &ExecutionResult,
) -> String {
    let input_state = InputState::for_request(request);
    let mut out = String::new();

    out.push_str("Quantum Fourier Transform Results\n");
    out.push_str("=================================\n\n");
    let _ = writeln!(out, "Query: \"{}\"\n", request.query);

    let _ = writeln!(out, "Operation: {} (2-qubit QFT)", request.operation);
    let _ = writeln!(out, "Input State: {}", input_state_description(input_state));
    let _ = writeln!(
        out,
        "Backend: {} ({})",
        result.backend_name, result.backend_kind
    );
    let _ = writeln!(out, "Shots: {}\n", result.shots);

    out.push_str("QFT Output Measurements:\n");
    push_histogram(&mut out, result);

    push_circuit_properties(&mut out, result);

    out.push_str("\nFrequency Analysis:\n");
    out.push_str(frequency_analysis(input_state));

    if result.backend_kind == BackendKind::Hardware {
        push_hardware_note(&mut out);
    }

    out.push_str("\nCircuit Diagram:\n");
    out.push_str(&skinfaxi_ir::draw(circuit));

    out.push_str("\n✓ Quantum Fourier Transform completed successfully\n");
    out
}

/// Observed outcomes, descending by count, with percentages.
fn push_histogram(out: &mut String, result: &ExecutionResult) {
    let total = result.counts.total_shots();
    for (bitstring, &count) in result.counts.sorted() {
        let percentage = if total > 0 {
            count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let _ = writeln!(out, "  |{bitstring}⟩: {count:>5} ({percentage:5.1}%)");
    }
}

fn push_circuit_properties(out: &mut String, result: &ExecutionResult) {
    out.push_str("\nCircuit Properties:\n");
    let _ = writeln!(out, "  Depth: {}", result.circuit_depth);
    let _ = writeln!(out, "  Width: {}", result.circuit_width);
}

fn push_hardware_note(out: &mut String) {
    out.push_str("\nNote: these results came from real quantum hardware.\n");
    out.push_str("  - Each measurement is a genuine quantum event\n");
    out.push_str("  - Results may show quantum noise and decoherence\n");
}

/// Operation-specific interpretive note for the generic report.
fn operation_analysis(request: &ComputationRequest, result: &ExecutionResult) -> Option<String> {
    match request.operation {
        OperationKind::BellState => Some(
            "  - Bell state created successfully\n\
             \x20 - Shows quantum entanglement between qubits\n\
             \x20 - Expect roughly equal probabilities for |00⟩ and |11⟩\n"
                .to_string(),
        ),
        OperationKind::RandomNumber => {
            let entropy = shannon_entropy(result);
            let mut analysis = String::new();
            analysis.push_str("  - Quantum randomness generated\n");
            let _ = writeln!(analysis, "  - Entropy: {entropy:.3} bits");
            let _ = writeln!(
                analysis,
                "  - Maximum possible entropy: {} bits",
                request.qubit_count
            );
            Some(analysis)
        }
        OperationKind::GroverSearch => Some(
            "  - Grover's algorithm executed\n\
             \x20 - Amplifies probability of marked states\n\
             \x20 - Look for states with higher probabilities\n"
                .to_string(),
        ),
        _ => None,
    }
}

/// Shannon entropy of the observed distribution: -Σ p·log2(p).
fn shannon_entropy(result: &ExecutionResult) -> f64 {
    let total = result.counts.total_shots();
    if total == 0 {
        return 0.0;
    }
    result
        .counts
        .iter()
        .filter(|&(_, &count)| count > 0)
        .map(|(_, &count)| {
            let p = count as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}

/// Human-readable description of a QFT input state.
fn input_state_description(input_state: InputState) -> &'static str {
    match input_state {
        InputState::Superposition02 => "|ψ⟩ = (1/√2)(|00⟩ + |10⟩) - states 0 and 2",
        InputState::Superposition13 => "|ψ⟩ = (1/√2)(|01⟩ + |11⟩) - states 1 and 3",
        InputState::Superposition01 => "|ψ⟩ = (1/√2)(|0⟩ + |1⟩) - single qubit superposition",
        InputState::EqualSuperposition => {
            "|ψ⟩ = (1/2)(|00⟩ + |01⟩ + |10⟩ + |11⟩) - all basis states"
        }
    }
}

/// Canned theoretical frequency narrative per input state.
///
/// Static content: describes what an ideal QFT produces for the prepared
/// state, independent of the observed histogram.
fn frequency_analysis(input_state: InputState) -> &'static str {
    match input_state {
        InputState::Superposition02 => {
            "Expected QFT result for |ψ⟩ = (1/√2)(|00⟩ + |10⟩):\n\
             \x20 - |00⟩: 50% (k=0, DC component)\n\
             \x20 - |01⟩:  0% (k=1, forbidden by symmetry)\n\
             \x20 - |10⟩: 50% (k=2, Nyquist frequency)\n\
             \x20 - |11⟩:  0% (k=3, forbidden by symmetry)\n\
             Only the DC and Nyquist components survive: the state has\n\
             even-parity frequency filtering. Remarkably, QFT(|ψ⟩) = |ψ⟩,\n\
             so this input is an eigenstate of the QFT operator.\n"
        }
        InputState::Superposition13 => {
            "Expected QFT result for |ψ⟩ = (1/√2)(|01⟩ + |11⟩):\n\
             \x20 - |00⟩:  0% (k=0, forbidden)\n\
             \x20 - |01⟩: 50% (k=1, fundamental frequency)\n\
             \x20 - |10⟩:  0% (k=2, forbidden)\n\
             \x20 - |11⟩: 50% (k=3, high frequency)\n\
             Odd-parity frequency components only, complementary to the\n\
             even-parity case.\n"
        }
        InputState::Superposition01 => {
            "Expected QFT result for |ψ⟩ = (1/√2)(|0⟩ + |1⟩):\n\
             \x20 - concentrated low-frequency components\n\
             The single-qubit superposition spreads across neighboring\n\
             frequency bins after the transform.\n"
        }
        InputState::EqualSuperposition => {
            "Expected QFT result for the equal superposition:\n\
             \x20 - |00⟩: 100% (only k=0 survives)\n\
             \x20 - all other states: 0%\n\
             A uniform input is pure DC: all frequency information is\n\
             washed out by averaging.\n"
        }
    }
}

/// Canned description of an operation, for the `info` surface.
pub fn operation_info(operation: &str) -> String {
    let info = match operation.to_lowercase().as_str() {
        "bell_state" => {
            "Bell states are maximally entangled quantum states of two qubits. \
             They demonstrate quantum superposition and entanglement."
        }
        "qft" => {
            "Quantum Fourier Transform is a quantum algorithm that applies the \
             discrete Fourier transform to quantum amplitudes."
        }
        "grover" => {
            "Grover's algorithm provides quadratic speedup for searching \
             unsorted databases using quantum amplitude amplification."
        }
        "teleportation" => {
            "Quantum teleportation transfers quantum information from one \
             location to another using entanglement and classical communication."
        }
        "vqe" => {
            "Variational Quantum Eigensolver finds the ground state energy of \
             molecules using a hybrid quantum-classical approach."
        }
        "qaoa" => {
            "Quantum Approximate Optimization Algorithm solves combinatorial \
             optimization problems on near-term quantum devices."
        }
        other => {
            let known = OperationKind::all()
                .iter()
                .map(OperationKind::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            return format!(
                "Information about '{other}' is not available. Available operations: {known}"
            );
        }
    };
    info.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use skinfaxi_hal::Counts;
    use skinfaxi_ir::QubitId;

    fn bell_request() -> ComputationRequest {
        ComputationRequest {
            query: "Create a Bell state to demonstrate quantum entanglement".into(),
            operation: OperationKind::BellState,
            parameters: Map::new(),
            qubit_count: 2,
            shot_count: 1024,
        }
    }

    fn bell_circuit() -> Circuit {
        let mut circuit = Circuit::with_size("bell_state", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure_all().unwrap();
        circuit
    }

    fn bell_result(kind: BackendKind) -> ExecutionResult {
        let mut counts = Counts::new();
        counts.insert("00", 530);
        counts.insert("11", 494);
        ExecutionResult::new(counts, 1024)
            .with_backend("aer_simulator", kind)
            .with_circuit_shape(3, 4)
    }

    #[test]
    fn test_general_report_contents() {
        let request = bell_request();
        let circuit = bell_circuit();
        let report = format_report(&request, &circuit, &bell_result(BackendKind::LocalSimulator));

        assert!(report.contains("bell_state"));
        assert!(report.contains(&request.query));
        assert!(report.contains("aer_simulator"));
        assert!(report.contains("|00⟩"));
        assert!(report.contains("|11⟩"));
        assert!(report.contains("Depth: 3"));
        assert!(report.contains("entanglement"));
        assert!(report.contains("✓"));
        assert!(!report.contains("real quantum hardware"));
    }

    #[test]
    fn test_hardware_remark_appended() {
        let report = format_report(
            &bell_request(),
            &bell_circuit(),
            &bell_result(BackendKind::Hardware),
        );
        assert!(report.contains("real quantum hardware"));
    }

    #[test]
    fn test_entropy_bounds_for_random() {
        let mut request = bell_request();
        request.operation = OperationKind::RandomNumber;
        request.qubit_count = 3;

        let mut counts = Counts::new();
        for (i, n) in [130, 120, 135, 125, 131, 129, 126, 128].into_iter().enumerate() {
            counts.insert(format!("{i:03b}"), n);
        }
        let result = ExecutionResult::new(counts, 1024)
            .with_backend("aer_simulator", BackendKind::LocalSimulator)
            .with_circuit_shape(2, 6);

        let entropy = shannon_entropy(&result);
        assert!(entropy > 0.0 && entropy <= 3.0);

        let mut circuit = Circuit::with_size("random", 3, 3);
        for i in 0..3 {
            circuit.h(QubitId(i)).unwrap();
        }
        circuit.measure_all().unwrap();

        let report = format_report(&request, &circuit, &result);
        assert!(report.contains("Entropy:"));
        assert!(report.contains("Maximum possible entropy: 3 bits"));
    }

    #[test]
    fn test_entropy_of_deterministic_distribution_is_zero() {
        let mut counts = Counts::new();
        counts.insert("000", 1024);
        let result = ExecutionResult::new(counts, 1024);
        assert_eq!(shannon_entropy(&result), 0.0);
    }

    #[test]
    fn test_qft_report_uses_canned_narrative() {
        let mut request = bell_request();
        request.operation = OperationKind::FourierTransform;
        request.query = "Apply QFT to |00⟩ + |10⟩".into();

        let mut counts = Counts::new();
        counts.insert("00", 510);
        counts.insert("10", 514);
        let result = ExecutionResult::new(counts, 1024)
            .with_backend("aer_simulator", BackendKind::LocalSimulator)
            .with_circuit_shape(5, 4);

        let report = format_report(&request, &bell_circuit(), &result);
        assert!(report.contains("Quantum Fourier Transform Results"));
        assert!(report.contains("states 0 and 2"));
        assert!(report.contains("Nyquist"));
        assert!(report.contains("eigenstate of the QFT operator"));
    }

    #[test]
    fn test_operation_info_known_and_unknown() {
        assert!(operation_info("bell_state").contains("entangle"));
        assert!(operation_info("QAOA").contains("optimization"));

        let unknown = operation_info("warp_drive");
        assert!(unknown.contains("not available"));
        assert!(unknown.contains("bell_state"));
        assert!(unknown.contains("bernstein_vazirani"));
    }
}
