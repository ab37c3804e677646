//! Simulator backend implementation.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use skinfaxi_hal::{
    Backend, BackendAvailability, BackendKind, Capabilities, Counts, ExecutionResult, HalError,
    HalResult, Job, JobId, JobStatus,
};
use skinfaxi_ir::Circuit;

use crate::statevector::Statevector;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local statevector simulator backend.
///
/// Supports circuits up to ~20 qubits (limited by memory). Jobs complete
/// inline at submit time; `status` reports `Completed` immediately after.
pub struct SimulatorBackend {
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Completed jobs.
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    /// Maximum number of qubits supported.
    max_qubits: u32,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(20)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            max_qubits,
        }
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> ExecutionResult {
        let start = Instant::now();

        let num_qubits = circuit.num_qubits();
        debug!("Starting simulation: {} qubits, {} shots", num_qubits, shots);

        // Qubit → clbit assignments from the circuit's measure instructions.
        let measures: Vec<(usize, usize)> = circuit
            .instructions()
            .iter()
            .filter(|inst| inst.is_measure())
            .flat_map(|inst| {
                inst.qubits
                    .iter()
                    .zip(inst.clbits.iter())
                    .map(|(q, c)| (q.0 as usize, c.0 as usize))
            })
            .collect();

        let mut counts = Counts::new();

        for shot in 0..shots {
            let mut sv = Statevector::new(num_qubits);
            for inst in circuit.instructions() {
                sv.apply(inst);
            }

            let outcome = sv.sample();
            let bitstring = render_bitstring(outcome, &measures, circuit.num_clbits(), num_qubits);
            counts.insert(bitstring, 1);

            if shot > 0 && shot % 1000 == 0 {
                debug!("Completed {} shots", shot);
            }
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        ExecutionResult::new(counts, shots)
            .with_backend(self.name(), BackendKind::LocalSimulator)
            .with_circuit_shape(circuit.depth(), circuit.width())
            .with_execution_time(elapsed.as_millis() as u64)
    }
}

/// Render a sampled basis-state index as a classical bitstring.
///
/// Most-significant bit leftmost: clbit 0 is the rightmost character.
/// Circuits without measurements render the full qubit register.
fn render_bitstring(
    outcome: usize,
    measures: &[(usize, usize)],
    num_clbits: usize,
    num_qubits: usize,
) -> String {
    if measures.is_empty() {
        return format!("{outcome:0num_qubits$b}");
    }

    let mut bits = vec!['0'; num_clbits];
    for &(qubit, clbit) in measures {
        if (outcome >> qubit) & 1 == 1 {
            bits[num_clbits - 1 - clbit] = '1';
        }
    }
    bits.into_iter().collect()
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn kind(&self) -> BackendKind {
        BackendKind::LocalSimulator
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let result = self.run_simulation(circuit, shots);

        let sim_job = SimJob {
            job: Job::new(job_id.clone(), shots)
                .with_backend(self.name())
                .with_status(JobStatus::Completed),
            result: Some(result),
        };

        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            jobs.insert(job_id.0.clone(), sim_job);
        }

        debug!("Submitted job: {}", job_id);
        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .and_then(|j| j.result.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(sim_job) = jobs.get_mut(&job_id.0) {
            sim_job.job = sim_job.job.clone().with_status(JobStatus::Cancelled);
            Ok(())
        } else {
            Err(HalError::JobNotFound(job_id.0.clone()))
        }
    }
}
