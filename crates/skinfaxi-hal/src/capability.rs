//! Backend capability introspection.

use serde::{Deserialize, Serialize};

/// What a quantum backend can do: qubit count, shot limit, and whether it
/// is a simulator. The dispatcher uses this for routing; the CLI for
/// listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) vs real hardware (`false`).
    /// MUST be set from authoritative source data, not string heuristics.
    pub is_simulator: bool,
}

impl Capabilities {
    /// Capabilities of the local statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "aer_simulator".into(),
            num_qubits,
            max_shots: 100_000,
            is_simulator: true,
        }
    }

    /// Capabilities of a remote hardware device.
    pub fn hardware(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            max_shots: 20_000,
            is_simulator: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(20);
        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
        assert_eq!(caps.name, "aer_simulator");
    }

    #[test]
    fn test_hardware_capabilities() {
        let caps = Capabilities::hardware("ibm_torino", 133);
        assert!(!caps.is_simulator);
        assert_eq!(caps.num_qubits, 133);
    }
}
