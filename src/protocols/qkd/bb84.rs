//! BB84 Quantum Key Distribution Protocol.
//!
//! Alice sends random bits encoded in random bases, Bob measures in his own
//! random bases, and both keep only the positions where the bases agree. An
//! intercept-and-resend eavesdropper corrupts some of those positions, which
//! shows up as an elevated error rate on a randomly chosen check sample.
//!
//! The simulation is a classical analogue: matched-basis measurements are
//! noiseless and mismatched ones yield an independent coin flip.

use crate::core::{Basis, Polarization, RandomSource, UNMEASURABLE, errors::SimulationError};
use crate::protocols::qkd::eavesdropper::{Eavesdropper, InterceptResend};
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

/// Error rate above which the channel is considered compromised.
pub const DETECTION_THRESHOLD: f64 = 0.15;

/// Per-qubit view of a BB84 run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QubitRecord {
    pub bit: bool,
    pub alice_basis: Basis,
    pub bob_basis: Basis,
    pub polarization_sent: Polarization,
    /// `None` when Bob measured in the wrong basis.
    pub polarization_measured: Option<Polarization>,
    pub eve_intervened: bool,
    pub bases_matched: bool,
    pub bob_bit: bool,
}

/// BB84 results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bb84Result {
    #[serde(serialize_with = "as_bits")]
    pub alice_bits: Vec<bool>,
    #[serde(serialize_with = "as_bits")]
    pub bob_bits: Vec<bool>,
    pub alice_bases: Vec<Basis>,
    pub bob_bases: Vec<Basis>,
    pub alice_polarizations: Vec<Polarization>,
    #[serde(serialize_with = "as_measured")]
    pub bob_polarizations: Vec<Option<Polarization>>,
    pub matched_bases: Vec<bool>,
    pub eve_interventions: Vec<bool>,
    /// Bob's bits at matched-basis positions, in index order.
    #[serde(serialize_with = "as_bits")]
    pub shared_key: Vec<bool>,
    /// Fraction of mismatching bits in the check sample, in `[0, 1]`.
    pub error_rate: f64,
    pub eavesdropping_detected: bool,
}

impl Bb84Result {
    pub fn num_qubits(&self) -> usize {
        self.alice_bits.len()
    }

    pub fn matched_count(&self) -> usize {
        self.matched_bases.iter().filter(|&&m| m).count()
    }

    pub fn intercepted_count(&self) -> usize {
        self.eve_interventions.iter().filter(|&&e| e).count()
    }

    /// Iterates over the run one qubit at a time.
    pub fn records(&self) -> impl Iterator<Item = QubitRecord> + '_ {
        (0..self.num_qubits()).map(move |i| QubitRecord {
            bit: self.alice_bits[i],
            alice_basis: self.alice_bases[i],
            bob_basis: self.bob_bases[i],
            polarization_sent: self.alice_polarizations[i],
            polarization_measured: self.bob_polarizations[i],
            eve_intervened: self.eve_interventions[i],
            bases_matched: self.matched_bases[i],
            bob_bit: self.bob_bits[i],
        })
    }
}

/// Runs BB84 with the default intercept-and-resend eavesdropper.
///
/// # Arguments
///
/// * `num_qubits` - Number of qubits Alice sends. Must be positive.
/// * `seed` - Seed for the run's random stream; `None` draws from system entropy.
pub fn run(num_qubits: usize, seed: Option<u64>) -> Result<Bb84Result, SimulationError> {
    let mut source = RandomSource::new(seed);
    run_with(num_qubits, &mut source, &InterceptResend::default())
}

/// Runs BB84 on an explicit random stream with a custom eavesdropper.
pub fn run_with<E: Eavesdropper + ?Sized>(
    num_qubits: usize,
    source: &mut RandomSource,
    eve: &E,
) -> Result<Bb84Result, SimulationError> {
    if num_qubits == 0 {
        return Err(SimulationError::InvalidQubitCount(num_qubits));
    }

    // Alice prepares, Bob picks bases
    let alice_bits = source.bits(num_qubits);
    let alice_bases = source.bases(num_qubits);
    let bob_bases = source.bases(num_qubits);

    let alice_polarizations: Vec<Polarization> = alice_bits
        .iter()
        .zip(&alice_bases)
        .map(|(&bit, &basis)| Polarization::encode(bit, basis))
        .collect();

    let mut bob_bits = Vec::with_capacity(num_qubits);
    let mut bob_polarizations = Vec::with_capacity(num_qubits);
    let mut matched_bases = Vec::with_capacity(num_qubits);
    let mut eve_interventions = Vec::with_capacity(num_qubits);
    let mut shared_key = Vec::new();

    for i in 0..num_qubits {
        let intervention = eve.intercept(alice_bits[i], alice_bases[i], source);
        eve_interventions.push(intervention.is_some());

        // Sifting stage
        if alice_bases[i] == bob_bases[i] {
            let bob_bit = intervention.unwrap_or(alice_bits[i]);
            matched_bases.push(true);
            bob_bits.push(bob_bit);
            shared_key.push(bob_bit);
            bob_polarizations.push(Some(alice_polarizations[i]));
        } else {
            matched_bases.push(false);
            bob_bits.push(source.bit());
            bob_polarizations.push(None);
        }

        trace!(
            index = i,
            bit = alice_bits[i],
            alice_basis = %alice_bases[i],
            bob_basis = %bob_bases[i],
            intercepted = intervention.is_some(),
            matched = matched_bases[i],
            "qubit exchanged"
        );
    }

    let error_rate = estimate_error_rate(&alice_bits, &bob_bits, source);
    let eavesdropping_detected = error_rate > DETECTION_THRESHOLD;

    debug!(
        num_qubits,
        seed = ?source.seed(),
        matched = shared_key.len(),
        error_rate,
        eavesdropping_detected,
        "BB84 run complete"
    );

    Ok(Bb84Result {
        alice_bits,
        bob_bits,
        alice_bases,
        bob_bases,
        alice_polarizations,
        bob_polarizations,
        matched_bases,
        eve_interventions,
        shared_key,
        error_rate,
        eavesdropping_detected,
    })
}

/// Compares Alice's and Bob's bits on a random half of all positions.
///
/// The check sample is drawn from every index, not only the sifted ones, so
/// mismatched-basis guesses contribute to the rate as well. An empty sample
/// yields `0.0`.
fn estimate_error_rate(alice_bits: &[bool], bob_bits: &[bool], source: &mut RandomSource) -> f64 {
    let num_qubits = alice_bits.len();
    let sample = source.sample_indices(num_qubits, num_qubits / 2);

    if sample.is_empty() {
        debug!(num_qubits, "check sample is empty, error rate defaults to 0");
        return 0.0;
    }

    let errors = sample
        .iter()
        .filter(|&&i| alice_bits[i] != bob_bits[i])
        .count();

    errors as f64 / sample.len() as f64
}

fn as_bits<S: Serializer>(bits: &[bool], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(bits.iter().map(|&b| u8::from(b)))
}

fn as_measured<S: Serializer>(
    measured: &[Option<Polarization>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(
        measured
            .iter()
            .map(|m| m.map_or(UNMEASURABLE, Polarization::symbol)),
    )
}
