use crate::core::errors::SimulationError;
use crate::protocols::Protocol;
use serde::Serialize;
use tracing::debug;

/// Aggregate statistics over many runs of one protocol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary {
    pub protocol: Protocol,
    pub num_qubits: usize,
    pub num_shots: usize,
    /// Number of runs that flagged eavesdropping.
    pub detections: usize,
    /// Mean of the per-run statistic (error rate or correlation rate).
    pub mean_statistic: f64,
    pub min_statistic: f64,
    pub max_statistic: f64,
}

impl SampleSummary {
    /// Fraction of runs that flagged eavesdropping.
    pub fn detection_rate(&self) -> f64 {
        if self.num_shots == 0 {
            0.0
        } else {
            self.detections as f64 / self.num_shots as f64
        }
    }
}

/// Repeats a protocol simulation over consecutive seeds.
///
/// A single run only shows one draw of the channel statistic; the `Sampler`
/// runs `num_shots` of them so the detection rate itself can be read off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    pub protocol: Protocol,
    pub num_qubits: usize,
}

impl Sampler {
    pub fn new(protocol: Protocol, num_qubits: usize) -> Self {
        Self {
            protocol,
            num_qubits,
        }
    }

    /// Runs `num_shots` simulations seeded `base_seed`, `base_seed + 1`, ...
    ///
    /// # Arguments
    ///
    /// * `base_seed` - Seed of the first run. Later seeds wrap on overflow.
    /// * `num_shots` - The number of runs.
    ///
    /// # Returns
    ///
    /// A `SampleSummary`, or the `SimulationError` of the first failing run.
    pub fn run(&self, base_seed: u64, num_shots: usize) -> Result<SampleSummary, SimulationError> {
        let mut detections = 0;
        let mut sum = 0.0;
        let mut min_statistic = f64::INFINITY;
        let mut max_statistic = f64::NEG_INFINITY;

        for shot in 0..num_shots {
            let seed = base_seed.wrapping_add(shot as u64);
            let outcome = self.protocol.run(self.num_qubits, Some(seed))?;

            if outcome.eavesdropping_detected() {
                detections += 1;
            }
            let statistic = outcome.statistic();
            sum += statistic;
            min_statistic = min_statistic.min(statistic);
            max_statistic = max_statistic.max(statistic);
        }

        if num_shots == 0 {
            min_statistic = 0.0;
            max_statistic = 0.0;
        }
        let mean_statistic = if num_shots > 0 {
            sum / num_shots as f64
        } else {
            0.0
        };

        debug!(
            protocol = %self.protocol,
            num_qubits = self.num_qubits,
            num_shots,
            detections,
            mean_statistic,
            "sampling complete"
        );

        Ok(SampleSummary {
            protocol: self.protocol,
            num_qubits: self.num_qubits,
            num_shots,
            detections,
            mean_statistic,
            min_statistic,
            max_statistic,
        })
    }
}
