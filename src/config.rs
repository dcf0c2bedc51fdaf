//! Parameter limits applied at the boundary before any simulation runs.
//!
//! The core simulators accept any positive qubit count. Drivers validate their
//! input against [`Limits`] first so out-of-range requests are rejected rather
//! than clamped.

use crate::core::errors::SimulationError;
use crate::protocols::Protocol;

pub const DEFAULT_MIN_QUBITS: usize = 5;
pub const DEFAULT_MAX_QUBITS: usize = 50;
pub const DEFAULT_MAX_SEED: u64 = 1000;
pub const DEFAULT_QUBITS: usize = 10;
pub const DEFAULT_SEED: u64 = 42;

/// Accepted ranges for user-supplied parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub min_qubits: usize,
    pub max_qubits: usize,
    pub max_seed: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_qubits: DEFAULT_MIN_QUBITS,
            max_qubits: DEFAULT_MAX_QUBITS,
            max_seed: DEFAULT_MAX_SEED,
        }
    }
}

impl Limits {
    pub fn validate(
        &self,
        protocol: Protocol,
        num_qubits: usize,
        seed: Option<u64>,
    ) -> Result<SimulationParams, SimulationError> {
        if num_qubits == 0 {
            return Err(SimulationError::InvalidQubitCount(num_qubits));
        }
        if !(self.min_qubits..=self.max_qubits).contains(&num_qubits) {
            return Err(SimulationError::QubitCountOutOfRange {
                num_qubits,
                min: self.min_qubits,
                max: self.max_qubits,
            });
        }
        if let Some(seed) = seed
            && seed > self.max_seed
        {
            return Err(SimulationError::SeedOutOfRange {
                seed,
                max: self.max_seed,
            });
        }

        Ok(SimulationParams {
            protocol,
            num_qubits,
            seed,
        })
    }
}

/// A validated simulation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimulationParams {
    protocol: Protocol,
    num_qubits: usize,
    seed: Option<u64>,
}

impl SimulationParams {
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_in_range_parameters() {
        let params = Limits::default()
            .validate(Protocol::Bb84, 10, Some(42))
            .unwrap();
        assert_eq!(params.protocol(), Protocol::Bb84);
        assert_eq!(params.num_qubits(), 10);
        assert_eq!(params.seed(), Some(42));

        assert!(Limits::default().validate(Protocol::E91, 5, None).is_ok());
        assert!(Limits::default().validate(Protocol::E91, 50, Some(1000)).is_ok());
    }

    #[test]
    fn rejects_zero_qubits() {
        assert_eq!(
            Limits::default().validate(Protocol::Bb84, 0, Some(1)),
            Err(SimulationError::InvalidQubitCount(0))
        );
    }

    #[test]
    fn rejects_out_of_range_qubits() {
        assert_eq!(
            Limits::default().validate(Protocol::Bb84, 51, None),
            Err(SimulationError::QubitCountOutOfRange {
                num_qubits: 51,
                min: 5,
                max: 50
            })
        );
        assert!(Limits::default().validate(Protocol::Bb84, 4, None).is_err());

        let err = Limits::default()
            .validate(Protocol::E91, 60, Some(1))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Number of qubits 60 outside accepted range 5..=50"
        );
    }

    #[test]
    fn seed_limit_is_inclusive() {
        let limits = Limits::default();
        assert!(limits.validate(Protocol::Bb84, 10, Some(1000)).is_ok());
        assert!(limits.validate(Protocol::Bb84, 10, None).is_ok());
        assert!(limits.validate(Protocol::Bb84, 10, Some(1001)).is_err());
    }

    #[test]
    fn rejects_out_of_range_seed() {
        assert_eq!(
            Limits::default().validate(Protocol::E91, 10, Some(1001)),
            Err(SimulationError::SeedOutOfRange {
                seed: 1001,
                max: 1000
            })
        );
    }

    #[test]
    fn custom_limits() {
        let limits = Limits {
            min_qubits: 1,
            max_qubits: 500,
            max_seed: u64::MAX,
        };
        assert!(limits.validate(Protocol::Bb84, 1, Some(u64::MAX)).is_ok());
        assert!(limits.validate(Protocol::Bb84, 300, None).is_ok());
    }
}
