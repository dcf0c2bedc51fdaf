//! E91 Quantum Key Distribution Protocol.
//!
//! E91 distributes entangled pairs and detects an eavesdropper through the
//! correlations between Alice's and Bob's measurements. This simulation reduces
//! that test to a basis-agreement statistic: both parties draw independent
//! random bases and the fraction of agreeing positions is compared against a
//! fixed threshold. It is a coarse proxy, not a Bell-inequality test.

use crate::core::{Basis, RandomSource, errors::SimulationError};
use serde::{Serialize, Serializer};
use tracing::debug;

/// Correlation rate below which the channel is considered compromised.
pub const CORRELATION_THRESHOLD: f64 = 0.7;

/// The result of the E91 protocol execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct E91Result {
    /// Alice's chosen bases, serialized as 0 (`+`) or 1 (`X`).
    #[serde(serialize_with = "as_indices")]
    pub alice_bases: Vec<Basis>,
    /// Bob's chosen bases, serialized as 0 (`+`) or 1 (`X`).
    #[serde(serialize_with = "as_indices")]
    pub bob_bases: Vec<Basis>,
    /// Fraction of positions where both bases agree, in `[0, 1]`.
    pub correlation_rate: f64,
    pub eavesdropped: bool,
}

impl E91Result {
    pub fn num_qubits(&self) -> usize {
        self.alice_bases.len()
    }

    pub fn agreement_count(&self) -> usize {
        self.alice_bases
            .iter()
            .zip(&self.bob_bases)
            .filter(|(a, b)| a == b)
            .count()
    }
}

/// Executes the E91 protocol.
///
/// # Arguments
///
/// * `num_qubits` - Number of entangled pairs. Must be positive.
/// * `seed` - Seed for the run's random stream; `None` draws from system entropy.
pub fn run(num_qubits: usize, seed: Option<u64>) -> Result<E91Result, SimulationError> {
    let mut source = RandomSource::new(seed);
    run_with(num_qubits, &mut source)
}

/// Executes the E91 protocol on an explicit random stream.
pub fn run_with(num_qubits: usize, source: &mut RandomSource) -> Result<E91Result, SimulationError> {
    if num_qubits == 0 {
        return Err(SimulationError::InvalidQubitCount(num_qubits));
    }

    let alice_bases = source.bases(num_qubits);
    let bob_bases = source.bases(num_qubits);

    let agreements = alice_bases
        .iter()
        .zip(&bob_bases)
        .filter(|(a, b)| a == b)
        .count();
    let correlation_rate = agreements as f64 / num_qubits as f64;
    let eavesdropped = correlation_rate < CORRELATION_THRESHOLD;

    debug!(
        num_qubits,
        seed = ?source.seed(),
        correlation_rate,
        eavesdropped,
        "E91 run complete"
    );

    Ok(E91Result {
        alice_bases,
        bob_bases,
        correlation_rate,
        eavesdropped,
    })
}

fn as_indices<S: Serializer>(bases: &[Basis], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(bases.iter().map(|b| b.index()))
}
