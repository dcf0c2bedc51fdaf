use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Number of qubits must be positive, got {0}")]
    InvalidQubitCount(usize),

    #[error("Number of qubits {num_qubits} outside accepted range {min}..={max}")]
    QubitCountOutOfRange {
        num_qubits: usize,
        min: usize,
        max: usize,
    },

    #[error("Seed {seed} outside accepted range 0..={max}")]
    SeedOutOfRange { seed: u64, max: u64 },

    #[error("Invalid probability: {0}. Must be between 0.0 and 1.0")]
    InvalidProbability(f64),

    #[error("Unknown protocol: {0}")]
    UnknownProtocol(String),
}
