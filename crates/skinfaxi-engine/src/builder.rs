//! Circuit templates: one builder per operation kind.
//!
//! Fixed-size operations (Bell state, QFT, Grover, teleportation) ignore
//! the requested qubit count and silently use their required size; sized
//! operations clamp to their minimum instead of rejecting the request.

use std::f64::consts::PI;

use serde_json::Value;
use tracing::debug;

use skinfaxi_ir::{Circuit, ClbitId, QubitId, StandardGate};

use crate::error::{EngineError, EngineResult};
use crate::intent::{ComputationRequest, InputState, OperationKind};

/// Build the circuit for a classified request.
pub fn build(request: &ComputationRequest) -> EngineResult<Circuit> {
    let circuit = match request.operation {
        OperationKind::BellState => build_bell()?,
        OperationKind::FourierTransform => build_qft(request)?,
        OperationKind::GroverSearch => build_grover(request)?,
        OperationKind::Teleportation => build_teleportation()?,
        OperationKind::VariationalEigensolver => build_vqe(request)?,
        OperationKind::ApproxOptimization => build_qaoa(request)?,
        OperationKind::CustomCircuit => build_custom(request)?,
        OperationKind::RandomNumber => build_random(request)?,
        OperationKind::DeutschJozsa => build_deutsch_jozsa(request)?,
        OperationKind::BernsteinVazirani => build_bernstein_vazirani(request)?,
    };

    debug!(
        operation = %request.operation,
        qubits = circuit.num_qubits(),
        depth = circuit.depth(),
        "circuit built"
    );

    Ok(circuit)
}

/// Bell state: H + CX. Always two qubits regardless of the request.
fn build_bell() -> EngineResult<Circuit> {
    let mut circuit = Circuit::with_size("bell_state", 2, 2);
    circuit.h(QubitId(0))?;
    circuit.cx(QubitId(0), QubitId(1))?;
    circuit.measure_all()?;
    Ok(circuit)
}

/// Uniform superposition over the full register.
fn build_random(request: &ComputationRequest) -> EngineResult<Circuit> {
    let n = request.qubit_count.max(1);
    let mut circuit = Circuit::with_size("random", n, n);
    for i in 0..n as u32 {
        circuit.h(QubitId(i))?;
    }
    circuit.measure_all()?;
    Ok(circuit)
}

/// Two-qubit QFT over a prepared input state.
///
/// Stage 1 prepares one of the four canonical input states, stage 2 is
/// the fixed QFT gate sequence; a barrier separates them so the diagram
/// reads as preparation | transform.
fn build_qft(request: &ComputationRequest) -> EngineResult<Circuit> {
    let input_state = InputState::for_request(request);
    let mut circuit = Circuit::with_size("qft", 2, 2);

    match input_state {
        InputState::Superposition02 => {
            circuit.h(QubitId(1))?;
        }
        InputState::Superposition13 => {
            circuit.x(QubitId(0))?;
            circuit.h(QubitId(1))?;
        }
        InputState::Superposition01 => {
            circuit.h(QubitId(0))?;
        }
        InputState::EqualSuperposition => {
            circuit.h(QubitId(0))?;
            circuit.h(QubitId(1))?;
        }
    }

    circuit.barrier_all()?;

    // 2-qubit QFT: H on the high qubit, controlled phase, H on the low
    // qubit, bit-reversal swap.
    circuit.h(QubitId(1))?;
    circuit.cp(PI / 2.0, QubitId(0), QubitId(1))?;
    circuit.h(QubitId(0))?;
    circuit.swap(QubitId(0), QubitId(1))?;

    circuit.measure_all()?;
    Ok(circuit)
}

/// Single Grover iteration over two qubits.
///
/// The oracle marks `parameters["marked_state"]` (a two-character
/// bitstring, default `"11"`); the diffusion operator then amplifies it.
fn build_grover(request: &ComputationRequest) -> EngineResult<Circuit> {
    let marked = request.param_str("marked_state").unwrap_or("11");
    let bits = parse_bitstring(marked, 2, "marked_state")?;

    let mut circuit = Circuit::with_size("grover", 2, 2);

    circuit.h(QubitId(0))?;
    circuit.h(QubitId(1))?;

    // Phase oracle: X-conjugated CZ flips the sign of the marked state.
    for (qubit, bit) in bits.iter().enumerate() {
        if !bit {
            circuit.x(QubitId(qubit as u32))?;
        }
    }
    circuit.cz(QubitId(0), QubitId(1))?;
    for (qubit, bit) in bits.iter().enumerate() {
        if !bit {
            circuit.x(QubitId(qubit as u32))?;
        }
    }

    // Diffusion operator.
    circuit.h(QubitId(0))?;
    circuit.h(QubitId(1))?;
    circuit.x(QubitId(0))?;
    circuit.x(QubitId(1))?;
    circuit.cz(QubitId(0), QubitId(1))?;
    circuit.x(QubitId(0))?;
    circuit.x(QubitId(1))?;
    circuit.h(QubitId(0))?;
    circuit.h(QubitId(1))?;

    circuit.measure_all()?;
    Ok(circuit)
}

/// Teleportation of a |+⟩ state with deferred-measurement corrections.
///
/// Qubit 0 carries the message, qubits 1 and 2 share a Bell pair; the
/// usual classically-controlled X/Z corrections become CX/CZ so the whole
/// protocol runs before the terminal measurement.
fn build_teleportation() -> EngineResult<Circuit> {
    let mut circuit = Circuit::with_size("teleportation", 3, 3);

    circuit.h(QubitId(0))?;

    circuit.h(QubitId(1))?;
    circuit.cx(QubitId(1), QubitId(2))?;
    circuit.barrier_all()?;

    circuit.cx(QubitId(0), QubitId(1))?;
    circuit.h(QubitId(0))?;
    circuit.barrier_all()?;

    circuit.cx(QubitId(1), QubitId(2))?;
    circuit.cz(QubitId(0), QubitId(2))?;

    circuit.measure_all()?;
    Ok(circuit)
}

/// Hardware-efficient VQE ansatz preview with fixed angles.
fn build_vqe(request: &ComputationRequest) -> EngineResult<Circuit> {
    let n = request.qubit_count.max(2);
    let mut circuit = Circuit::with_size("vqe", n, n);

    for i in 0..n as u32 {
        circuit.ry(PI / 4.0, QubitId(i))?;
    }
    for i in 0..(n - 1) as u32 {
        circuit.cx(QubitId(i), QubitId(i + 1))?;
    }
    for i in 0..n as u32 {
        circuit.ry(PI / 4.0, QubitId(i))?;
    }

    circuit.measure_all()?;
    Ok(circuit)
}

/// One QAOA round for MaxCut on a ring.
fn build_qaoa(request: &ComputationRequest) -> EngineResult<Circuit> {
    let n = request.qubit_count.max(2);
    let gamma = request.param_f64("gamma").unwrap_or(PI / 4.0);
    let beta = request.param_f64("beta").unwrap_or(PI / 8.0);

    let mut circuit = Circuit::with_size("qaoa", n, n);

    for i in 0..n as u32 {
        circuit.h(QubitId(i))?;
    }

    // Cost layer: ZZ interactions along the ring edges.
    let mut edges: Vec<(u32, u32)> = (0..(n - 1) as u32).map(|i| (i, i + 1)).collect();
    if n > 2 {
        edges.push((n as u32 - 1, 0));
    }
    for (u, v) in edges {
        circuit.cx(QubitId(u), QubitId(v))?;
        circuit.rz(2.0 * gamma, QubitId(v))?;
        circuit.cx(QubitId(u), QubitId(v))?;
    }

    // Mixer layer.
    for i in 0..n as u32 {
        circuit.rx(2.0 * beta, QubitId(i))?;
    }

    circuit.measure_all()?;
    Ok(circuit)
}

/// Circuit from a user-supplied gate list.
///
/// `parameters["gates"]` is an array of `{gate, qubits, param?}` objects.
/// An absent or empty list falls back to a uniform superposition.
fn build_custom(request: &ComputationRequest) -> EngineResult<Circuit> {
    let n = request.qubit_count.max(1);
    let mut circuit = Circuit::with_size("custom", n, n);

    let gates = request
        .parameters
        .get("gates")
        .and_then(Value::as_array)
        .filter(|entries| !entries.is_empty());

    match gates {
        Some(entries) => {
            for entry in entries {
                apply_custom_gate(&mut circuit, entry)?;
            }
        }
        None => {
            for i in 0..n as u32 {
                circuit.h(QubitId(i))?;
            }
        }
    }

    circuit.measure_all()?;
    Ok(circuit)
}

fn apply_custom_gate(circuit: &mut Circuit, entry: &Value) -> EngineResult<()> {
    let name = entry
        .get("gate")
        .and_then(Value::as_str)
        .ok_or_else(|| EngineError::Build("custom gate entry missing 'gate' name".into()))?;

    let qubits: Vec<QubitId> = entry
        .get("qubits")
        .and_then(Value::as_array)
        .ok_or_else(|| EngineError::Build(format!("custom gate '{name}' missing 'qubits' list")))?
        .iter()
        .map(|q| {
            q.as_u64()
                .map(|i| QubitId(i as u32))
                .ok_or_else(|| EngineError::Build(format!("custom gate '{name}' has a non-integer qubit")))
        })
        .collect::<EngineResult<_>>()?;

    let param = entry.get("param").and_then(Value::as_f64);
    let gate = StandardGate::from_name(name, param)?;
    circuit.apply(gate, &qubits)?;
    Ok(())
}

/// Deutsch-Jozsa over `qubit_count` input qubits plus one ancilla.
///
/// `parameters["oracle"]` selects `"constant"` or `"balanced"` (default).
fn build_deutsch_jozsa(request: &ComputationRequest) -> EngineResult<Circuit> {
    let n = request.qubit_count.max(1);
    let oracle = request.param_str("oracle").unwrap_or("balanced");
    if !matches!(oracle, "constant" | "balanced") {
        return Err(EngineError::Build(format!(
            "unknown Deutsch-Jozsa oracle '{oracle}' (expected 'constant' or 'balanced')"
        )));
    }

    let ancilla = QubitId(n as u32);
    let mut circuit = Circuit::with_size("deutsch_jozsa", n + 1, n);

    circuit.x(ancilla)?;
    for i in 0..=n as u32 {
        circuit.h(QubitId(i))?;
    }
    circuit.barrier_all()?;

    if oracle == "balanced" {
        for i in 0..n as u32 {
            circuit.cx(QubitId(i), ancilla)?;
        }
    }

    circuit.barrier_all()?;
    for i in 0..n as u32 {
        circuit.h(QubitId(i))?;
    }

    let inputs: Vec<QubitId> = (0..n as u32).map(QubitId).collect();
    let clbits: Vec<ClbitId> = (0..n as u32).map(ClbitId).collect();
    circuit.measure_many(&inputs, &clbits)?;

    Ok(circuit)
}

/// Bernstein-Vazirani: recover `parameters["secret"]` (default "101").
fn build_bernstein_vazirani(request: &ComputationRequest) -> EngineResult<Circuit> {
    let secret = request.param_str("secret").unwrap_or("101");
    let n = secret.len();
    let bits = parse_bitstring(secret, n, "secret")?;

    let ancilla = QubitId(n as u32);
    let mut circuit = Circuit::with_size("bernstein_vazirani", n + 1, n);

    circuit.x(ancilla)?;
    for i in 0..=n as u32 {
        circuit.h(QubitId(i))?;
    }
    circuit.barrier_all()?;

    // Oracle: CX from every qubit where the secret bit is set.
    for (qubit, bit) in bits.iter().enumerate() {
        if *bit {
            circuit.cx(QubitId(qubit as u32), ancilla)?;
        }
    }

    circuit.barrier_all()?;
    for i in 0..n as u32 {
        circuit.h(QubitId(i))?;
    }

    let inputs: Vec<QubitId> = (0..n as u32).map(QubitId).collect();
    let clbits: Vec<ClbitId> = (0..n as u32).map(ClbitId).collect();
    circuit.measure_many(&inputs, &clbits)?;

    Ok(circuit)
}

/// Parse an MSB-first bitstring into per-qubit booleans (qubit 0 is the
/// rightmost character).
fn parse_bitstring(text: &str, expected_len: usize, what: &str) -> EngineResult<Vec<bool>> {
    if text.len() != expected_len || !text.chars().all(|c| c == '0' || c == '1') {
        return Err(EngineError::Build(format!(
            "'{what}' must be a {expected_len}-bit string of 0s and 1s, got '{text}'"
        )));
    }
    Ok(text.chars().rev().map(|c| c == '1').collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    fn request(operation: OperationKind, qubit_count: usize) -> ComputationRequest {
        ComputationRequest {
            query: String::new(),
            operation,
            parameters: Map::new(),
            qubit_count,
            shot_count: 1024,
        }
    }

    #[test]
    fn test_bell_ignores_requested_qubits() {
        for requested in [1, 2, 7] {
            let circuit = build(&request(OperationKind::BellState, requested)).unwrap();
            assert_eq!(circuit.num_qubits(), 2);
            assert_eq!(circuit.num_clbits(), 2);
            assert_eq!(circuit.count_gates(|g| *g == StandardGate::H), 1);
            assert_eq!(circuit.count_gates(|g| *g == StandardGate::CX), 1);
        }
    }

    #[test]
    fn test_random_has_n_hadamards_and_no_entanglers() {
        let circuit = build(&request(OperationKind::RandomNumber, 4)).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.count_gates(|g| *g == StandardGate::H), 4);
        assert_eq!(circuit.count_gates(|g| g.num_qubits() > 1), 0);
    }

    #[test]
    fn test_qft_default_input_state() {
        let circuit = build(&request(OperationKind::FourierTransform, 2)).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        // Prep H + QFT (H, CP, H, Swap): three Hadamards in total.
        assert_eq!(circuit.count_gates(|g| *g == StandardGate::H), 3);
        assert_eq!(circuit.count_gates(|g| matches!(g, StandardGate::CP(_))), 1);
        assert_eq!(circuit.count_gates(|g| *g == StandardGate::Swap), 1);
    }

    #[test]
    fn test_qft_equal_superposition_from_query() {
        let mut req = request(OperationKind::FourierTransform, 2);
        req.query = "QFT of the equal superposition".into();
        let circuit = build(&req).unwrap();
        assert_eq!(circuit.count_gates(|g| *g == StandardGate::H), 4);
    }

    #[test]
    fn test_grover_default_marks_11() {
        let circuit = build(&request(OperationKind::GroverSearch, 2)).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        // No X-conjugation for "11": only the diffusion operator's four.
        assert_eq!(circuit.count_gates(|g| *g == StandardGate::X), 4);
        assert_eq!(circuit.count_gates(|g| *g == StandardGate::CZ), 2);
    }

    #[test]
    fn test_grover_marked_00_conjugates_oracle() {
        let mut req = request(OperationKind::GroverSearch, 2);
        req.parameters
            .insert("marked_state".into(), json!("00"));
        let circuit = build(&req).unwrap();
        // Four oracle X's plus four diffusion X's.
        assert_eq!(circuit.count_gates(|g| *g == StandardGate::X), 8);
    }

    #[test]
    fn test_grover_rejects_bad_marked_state() {
        let mut req = request(OperationKind::GroverSearch, 2);
        req.parameters.insert("marked_state".into(), json!("2x"));
        assert!(matches!(build(&req), Err(EngineError::Build(_))));
    }

    #[test]
    fn test_teleportation_is_three_qubits() {
        let circuit = build(&request(OperationKind::Teleportation, 1)).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 3);
    }

    #[test]
    fn test_deutsch_jozsa_shapes() {
        let circuit = build(&request(OperationKind::DeutschJozsa, 3)).unwrap();
        assert_eq!(circuit.num_qubits(), 4); // 3 inputs + ancilla
        assert_eq!(circuit.num_clbits(), 3); // inputs only
        // Balanced oracle: one CX per input qubit.
        assert_eq!(circuit.count_gates(|g| *g == StandardGate::CX), 3);
    }

    #[test]
    fn test_deutsch_jozsa_constant_oracle() {
        let mut req = request(OperationKind::DeutschJozsa, 3);
        req.parameters.insert("oracle".into(), json!("constant"));
        let circuit = build(&req).unwrap();
        assert_eq!(circuit.count_gates(|g| *g == StandardGate::CX), 0);
    }

    #[test]
    fn test_bernstein_vazirani_sizes_from_secret() {
        let mut req = request(OperationKind::BernsteinVazirani, 2);
        req.parameters.insert("secret".into(), json!("1011"));
        let circuit = build(&req).unwrap();
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.num_clbits(), 4);
        // One CX per set bit.
        assert_eq!(circuit.count_gates(|g| *g == StandardGate::CX), 3);
    }

    #[test]
    fn test_vqe_and_qaoa_clamp_to_two() {
        let vqe = build(&request(OperationKind::VariationalEigensolver, 1)).unwrap();
        assert_eq!(vqe.num_qubits(), 2);

        let qaoa = build(&request(OperationKind::ApproxOptimization, 1)).unwrap();
        assert_eq!(qaoa.num_qubits(), 2);
        // Two qubits: a single edge, no ring closure.
        assert_eq!(qaoa.count_gates(|g| *g == StandardGate::CX), 2);
    }

    #[test]
    fn test_custom_gate_list() {
        let mut req = request(OperationKind::CustomCircuit, 2);
        req.parameters.insert(
            "gates".into(),
            json!([
                {"gate": "h", "qubits": [0]},
                {"gate": "cx", "qubits": [0, 1]},
                {"gate": "rz", "qubits": [1], "param": 0.5}
            ]),
        );
        let circuit = build(&req).unwrap();
        assert_eq!(circuit.count_gates(|g| *g == StandardGate::H), 1);
        assert_eq!(circuit.count_gates(|g| *g == StandardGate::CX), 1);
        assert_eq!(circuit.count_gates(|g| matches!(g, StandardGate::Rz(_))), 1);
    }

    #[test]
    fn test_custom_unknown_gate_errors() {
        let mut req = request(OperationKind::CustomCircuit, 1);
        req.parameters
            .insert("gates".into(), json!([{"gate": "warp", "qubits": [0]}]));
        assert!(build(&req).is_err());
    }

    #[test]
    fn test_custom_default_is_uniform() {
        let circuit = build(&request(OperationKind::CustomCircuit, 3)).unwrap();
        assert_eq!(circuit.count_gates(|g| *g == StandardGate::H), 3);
    }
}
