//! Measurement counts and normalized execution results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Where a result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendKind {
    /// Real quantum hardware.
    Hardware,
    /// A simulator hosted by a cloud provider.
    CloudSimulator,
    /// The in-process statevector simulator.
    LocalSimulator,
}

impl BackendKind {
    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            BackendKind::Hardware => "Quantum Hardware",
            BackendKind::CloudSimulator => "Cloud Simulator",
            BackendKind::LocalSimulator => "Local Simulator",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Histogram of measurement outcomes: bitstring → occurrence count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts(FxHashMap<String, u64>);

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self(FxHashMap::default())
    }

    /// Add `count` occurrences of a bitstring.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Occurrences of a bitstring (zero if never observed).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of shots recorded.
    pub fn total_shots(&self) -> u64 {
        self.0.values().sum()
    }

    /// Outcomes sorted by descending count (ties broken by bitstring).
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequent outcome, if any.
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        self.sorted().first().map(|(s, c)| (*s, **c))
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no outcomes were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (bitstring, count) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        let mut counts = Counts::new();
        for (bitstring, count) in iter {
            counts.insert(bitstring, count);
        }
        counts
    }
}

/// Normalized result of one circuit execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Name of the backend that produced the result.
    pub backend_name: String,
    /// Where the result came from.
    pub backend_kind: BackendKind,
    /// Number of shots executed.
    pub shots: u32,
    /// Measurement histogram. For well-behaved backends the values sum
    /// to `shots`; the dispatcher trusts this rather than re-verifying.
    pub counts: Counts,
    /// Depth of the executed circuit.
    pub circuit_depth: usize,
    /// Width (qubits + classical bits) of the executed circuit.
    pub circuit_width: usize,
    /// Wall-clock execution time, when the backend reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a result from a histogram.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            backend_name: String::new(),
            backend_kind: BackendKind::LocalSimulator,
            shots,
            counts,
            circuit_depth: 0,
            circuit_width: 0,
            execution_time_ms: None,
        }
    }

    /// Tag the producing backend.
    pub fn with_backend(mut self, name: impl Into<String>, kind: BackendKind) -> Self {
        self.backend_name = name.into();
        self.backend_kind = kind;
        self
    }

    /// Record the executed circuit's shape.
    pub fn with_circuit_shape(mut self, depth: usize, width: usize) -> Self {
        self.circuit_depth = depth;
        self.circuit_width = width;
        self
    }

    /// Record execution time.
    pub fn with_execution_time(mut self, millis: u64) -> Self {
        self.execution_time_ms = Some(millis);
        self
    }
}
