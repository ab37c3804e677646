//! Intent classification: free text → `ComputationRequest`.
//!
//! Two paths, tried in order:
//!
//! 1. **Language model** (when a client is configured): a structured
//!    prompt enumerating the supported operations, answered as JSON.
//! 2. **Deterministic fallback**: case-insensitive keyword matching.
//!    Covers the bell and random families; everything else defaults to a
//!    Bell state. The other operations are reachable through the language
//!    model path.
//!
//! `classify` never fails: any language-model problem (network, parse,
//! unknown operation string) is logged and recovered by the fallback.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::llm::LlmClient;

/// The closed set of supported quantum operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Maximally entangled two-qubit pair.
    BellState,
    /// Quantum Fourier Transform over two qubits.
    FourierTransform,
    /// Grover search, single iteration.
    GroverSearch,
    /// Quantum teleportation of a prepared state.
    Teleportation,
    /// Variational eigensolver ansatz preview.
    VariationalEigensolver,
    /// One QAOA round for ring MaxCut.
    ApproxOptimization,
    /// User-supplied gate list.
    CustomCircuit,
    /// Uniform superposition sampling.
    RandomNumber,
    /// Deutsch-Jozsa constant-vs-balanced test.
    DeutschJozsa,
    /// Bernstein-Vazirani hidden-string recovery.
    BernsteinVazirani,
}

impl OperationKind {
    /// Wire/report name for this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::BellState => "bell_state",
            OperationKind::FourierTransform => "qft",
            OperationKind::GroverSearch => "grover",
            OperationKind::Teleportation => "teleportation",
            OperationKind::VariationalEigensolver => "vqe",
            OperationKind::ApproxOptimization => "qaoa",
            OperationKind::CustomCircuit => "custom",
            OperationKind::RandomNumber => "random",
            OperationKind::DeutschJozsa => "deutsch_jozsa",
            OperationKind::BernsteinVazirani => "bernstein_vazirani",
        }
    }

    /// Parse a wire name back into an operation.
    pub fn from_wire(name: &str) -> Option<Self> {
        let kind = match name {
            "bell_state" => OperationKind::BellState,
            "qft" => OperationKind::FourierTransform,
            "grover" => OperationKind::GroverSearch,
            "teleportation" => OperationKind::Teleportation,
            "vqe" => OperationKind::VariationalEigensolver,
            "qaoa" => OperationKind::ApproxOptimization,
            "custom" => OperationKind::CustomCircuit,
            "random" => OperationKind::RandomNumber,
            "deutsch_jozsa" => OperationKind::DeutschJozsa,
            "bernstein_vazirani" => OperationKind::BernsteinVazirani,
            _ => return None,
        };
        Some(kind)
    }

    /// Every operation, in declaration order.
    pub fn all() -> [OperationKind; 10] {
        [
            OperationKind::BellState,
            OperationKind::FourierTransform,
            OperationKind::GroverSearch,
            OperationKind::Teleportation,
            OperationKind::VariationalEigensolver,
            OperationKind::ApproxOptimization,
            OperationKind::CustomCircuit,
            OperationKind::RandomNumber,
            OperationKind::DeutschJozsa,
            OperationKind::BernsteinVazirani,
        ]
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified computation request.
///
/// Built once per incoming query; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationRequest {
    /// The original query text.
    pub query: String,
    /// The classified operation.
    pub operation: OperationKind,
    /// Operation parameters (marked state, secret string, gate list, ...).
    pub parameters: Map<String, Value>,
    /// Requested qubit count. Fixed-size operations override this.
    pub qubit_count: usize,
    /// Requested shot count.
    pub shot_count: u32,
}

impl ComputationRequest {
    fn new(query: &str, operation: OperationKind, qubit_count: usize, shot_count: u32) -> Self {
        Self {
            query: query.to_string(),
            operation,
            parameters: Map::new(),
            qubit_count,
            shot_count,
        }
    }

    /// String parameter accessor.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).and_then(Value::as_str)
    }

    /// Float parameter accessor.
    pub fn param_f64(&self, key: &str) -> Option<f64> {
        self.parameters.get(key).and_then(Value::as_f64)
    }
}

/// Canonical 2-qubit input states for the Fourier-transform operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    /// (1/√2)(|00⟩ + |10⟩), basis states 0 and 2. The default.
    Superposition02,
    /// (1/√2)(|01⟩ + |11⟩), basis states 1 and 3.
    Superposition13,
    /// (1/√2)(|0⟩ + |1⟩), single-qubit superposition.
    Superposition01,
    /// (1/2)(|00⟩ + |01⟩ + |10⟩ + |11⟩), all four basis states.
    EqualSuperposition,
}

impl InputState {
    /// Tag stored under `parameters["input_state"]`.
    pub fn tag(&self) -> &'static str {
        match self {
            InputState::Superposition02 => "superposition_0_2",
            InputState::Superposition13 => "superposition_1_3",
            InputState::Superposition01 => "superposition_0_1",
            InputState::EqualSuperposition => "equal_superposition",
        }
    }

    /// Parse a stored tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let state = match tag {
            "superposition_0_2" => InputState::Superposition02,
            "superposition_1_3" => InputState::Superposition13,
            "superposition_0_1" => InputState::Superposition01,
            "equal_superposition" => InputState::EqualSuperposition,
            _ => return None,
        };
        Some(state)
    }

    /// Scan query text for a state specification in ket notation.
    ///
    /// Recognizes both `|ψ⟩` and ASCII `|psi>` spellings; anything
    /// unrecognized falls back to the 0-and-2 superposition.
    pub fn scan(query: &str) -> Self {
        if query.contains("|00⟩ + |10⟩") || query.contains("|00> + |10>") {
            InputState::Superposition02
        } else if query.contains("|0⟩ + |2⟩") || query.contains("|0> + |2>") {
            InputState::Superposition02
        } else if query.contains("|01⟩ + |11⟩") || query.contains("|01> + |11>") {
            InputState::Superposition13
        } else if query.contains("|0⟩ + |1⟩") || query.contains("|0> + |1>") {
            InputState::Superposition01
        } else if query.to_lowercase().contains("equal superposition") {
            InputState::EqualSuperposition
        } else {
            InputState::Superposition02
        }
    }

    /// Resolve the input state for a request: stored parameter first,
    /// then a scan of the query text.
    pub fn for_request(request: &ComputationRequest) -> Self {
        request
            .param_str("input_state")
            .and_then(InputState::from_tag)
            .unwrap_or_else(|| InputState::scan(&request.query))
    }
}

/// What the language model is asked to return.
#[derive(Debug, Deserialize)]
struct LlmClassification {
    operation_type: String,
    #[serde(default)]
    num_qubits: Option<u64>,
    #[serde(default)]
    parameters: Map<String, Value>,
    #[serde(default)]
    #[allow(dead_code)]
    reasoning: String,
}

/// Classify a query into a computation request.
///
/// Never fails; the deterministic fallback absorbs every language-model
/// problem.
pub async fn classify(llm: Option<&LlmClient>, query: &str, shots: u32) -> ComputationRequest {
    if let Some(client) = llm {
        match classify_with_llm(client, query, shots).await {
            Ok(request) => {
                debug!(operation = %request.operation, "language model classified query");
                return request;
            }
            Err(err) => {
                warn!("language model classification failed: {err}; using local fallback");
            }
        }
    }

    classify_fallback(query, shots)
}

async fn classify_with_llm(
    client: &LlmClient,
    query: &str,
    shots: u32,
) -> Result<ComputationRequest, crate::llm::LlmError> {
    let content = client.complete(&classification_prompt(query)).await?;
    let parsed: LlmClassification = serde_json::from_str(strip_fences(&content))?;

    let operation = OperationKind::from_wire(&parsed.operation_type)
        .ok_or_else(|| crate::llm::LlmError::UnknownOperation(parsed.operation_type.clone()))?;

    let qubit_count = parsed.num_qubits.map_or(2, |n| n.max(1) as usize);

    let mut request = ComputationRequest::new(query, operation, qubit_count, shots);
    request.parameters = parsed.parameters;

    // The frequency report needs the input-state tag even when the model
    // didn't extract one.
    if operation == OperationKind::FourierTransform
        && !request.parameters.contains_key("input_state")
    {
        request.parameters.insert(
            "input_state".to_string(),
            Value::String(InputState::scan(query).tag().to_string()),
        );
    }

    Ok(request)
}

/// Deterministic keyword classification.
///
/// First match wins; unmatched queries default to a Bell state.
pub fn classify_fallback(query: &str, shots: u32) -> ComputationRequest {
    let lowered = query.to_lowercase();

    if ["bell", "entangl", "epr"].iter().any(|k| lowered.contains(k)) {
        return ComputationRequest::new(query, OperationKind::BellState, 2, shots);
    }

    if ["random", "rng", "number"].iter().any(|k| lowered.contains(k)) {
        let qubit_count = first_integer(query).map_or(3, |n| n.clamp(1, 5));
        return ComputationRequest::new(query, OperationKind::RandomNumber, qubit_count, shots);
    }

    ComputationRequest::new(query, OperationKind::BellState, 2, shots)
}

/// First unsigned integer literal in the text.
fn first_integer(text: &str) -> Option<usize> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// The structured prompt sent to the language model.
fn classification_prompt(query: &str) -> String {
    format!(
        r#"Analyze this quantum computation request and extract the key information:
Query: "{query}"

Determine:
1. What type of quantum operation is being requested?
2. How many qubits are needed?
3. What parameters are specified?

Available operations:
- bell_state: Create Bell states (entangled pairs)
- qft: Quantum Fourier Transform
- grover: Grover's search algorithm
- teleportation: Quantum teleportation
- vqe: Variational Quantum Eigensolver
- qaoa: Quantum Approximate Optimization Algorithm
- custom: Custom quantum circuit
- random: Quantum random number generation
- deutsch_jozsa: Deutsch-Jozsa algorithm
- bernstein_vazirani: Bernstein-Vazirani algorithm

Respond with JSON only:
{{
    "operation_type": "operation_name",
    "num_qubits": number,
    "parameters": {{}},
    "reasoning": "explanation"
}}"#
    )
}

/// Strip a markdown code fence, if the model wrapped its JSON in one.
fn strip_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wire_names_round_trip() {
        for kind in OperationKind::all() {
            assert_eq!(OperationKind::from_wire(kind.as_str()), Some(kind));
        }
        assert_eq!(OperationKind::from_wire("nonsense"), None);
    }

    #[test]
    fn test_fallback_bell_keywords() {
        for query in [
            "Create a Bell state to demonstrate quantum entanglement",
            "show me EPR pairs",
            "I want entangled qubits",
        ] {
            let request = classify_fallback(query, 1024);
            assert_eq!(request.operation, OperationKind::BellState);
            assert_eq!(request.qubit_count, 2);
            assert_eq!(request.shot_count, 1024);
        }
    }

    #[test]
    fn test_fallback_random_with_qubit_count() {
        let request = classify_fallback("Generate quantum random numbers using 3 qubits", 1024);
        assert_eq!(request.operation, OperationKind::RandomNumber);
        assert_eq!(request.qubit_count, 3);
    }

    #[test]
    fn test_fallback_random_clamps_to_five() {
        let request = classify_fallback("random number with 12 qubits", 100);
        assert_eq!(request.qubit_count, 5);
    }

    #[test]
    fn test_fallback_random_default_qubits() {
        let request = classify_fallback("quantum rng please", 100);
        assert_eq!(request.operation, OperationKind::RandomNumber);
        assert_eq!(request.qubit_count, 3);
    }

    #[test]
    fn test_fallback_bell_takes_precedence_over_random() {
        // "bell" matches first even though "number" also appears.
        let request = classify_fallback("a number of bell pairs", 100);
        assert_eq!(request.operation, OperationKind::BellState);
    }

    #[test]
    fn test_fallback_default_is_bell() {
        let request = classify_fallback("simulate a hydrogen molecule", 100);
        assert_eq!(request.operation, OperationKind::BellState);
        assert_eq!(request.qubit_count, 2);
    }

    #[test]
    fn test_input_state_scan() {
        assert_eq!(
            InputState::scan("apply QFT to |00⟩ + |10⟩"),
            InputState::Superposition02
        );
        assert_eq!(
            InputState::scan("QFT of |01> + |11>"),
            InputState::Superposition13
        );
        assert_eq!(
            InputState::scan("transform |0> + |1>"),
            InputState::Superposition01
        );
        assert_eq!(
            InputState::scan("QFT of the equal superposition"),
            InputState::EqualSuperposition
        );
        assert_eq!(InputState::scan("just a QFT"), InputState::Superposition02);
    }

    #[test]
    fn test_strip_fences() {
        assert_eq!(strip_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_first_integer() {
        assert_eq!(first_integer("use 4 qubits"), Some(4));
        assert_eq!(first_integer("no digits here"), None);
        assert_eq!(first_integer("12 then 99"), Some(12));
    }

    #[tokio::test]
    async fn test_classify_without_llm_uses_fallback() {
        let request = classify(None, "entangle two qubits", 512).await;
        assert_eq!(request.operation, OperationKind::BellState);
        assert_eq!(request.shot_count, 512);
    }

    proptest! {
        // Classification without a language model is a pure function of
        // the query text.
        #[test]
        fn prop_fallback_deterministic(query in ".{0,120}", shots in 1u32..10_000) {
            let a = classify_fallback(&query, shots);
            let b = classify_fallback(&query, shots);
            prop_assert_eq!(a.operation, b.operation);
            prop_assert_eq!(a.qubit_count, b.qubit_count);
            prop_assert_eq!(a.shot_count, b.shot_count);
        }

        // The random family never exceeds the five-qubit clamp.
        #[test]
        fn prop_random_qubits_clamped(n in 0usize..1000) {
            let request = classify_fallback(&format!("random number with {n} qubits"), 10);
            prop_assert!(request.qubit_count <= 5);
            prop_assert!(request.qubit_count >= 1);
        }
    }
}
