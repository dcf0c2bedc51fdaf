//! Quantum Cryptography Protocols.
//!
//! This module contains the QKD protocol simulations and a protocol-agnostic
//! dispatch layer used by the cache, the sampler and the command-line driver.

pub mod qkd;
pub use qkd::{bb84, e91, eavesdropper};

use crate::core::errors::SimulationError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which QKD protocol to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Bb84,
    E91,
}

impl Protocol {
    pub fn name(self) -> &'static str {
        match self {
            Protocol::Bb84 => "BB84",
            Protocol::E91 => "E91",
        }
    }

    /// Runs one simulation of this protocol.
    pub fn run(self, num_qubits: usize, seed: Option<u64>) -> Result<Outcome, SimulationError> {
        match self {
            Protocol::Bb84 => bb84::run(num_qubits, seed).map(Outcome::Bb84),
            Protocol::E91 => e91::run(num_qubits, seed).map(Outcome::E91),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Protocol {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bb84" => Ok(Protocol::Bb84),
            "e91" => Ok(Protocol::E91),
            _ => Err(SimulationError::UnknownProtocol(s.to_string())),
        }
    }
}

/// Whether a run's statistics point at an eavesdropper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChannelStatus {
    Secure,
    Compromised,
}

impl ChannelStatus {
    pub fn from_detection(detected: bool) -> Self {
        if detected {
            ChannelStatus::Compromised
        } else {
            ChannelStatus::Secure
        }
    }
}

impl fmt::Display for ChannelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelStatus::Secure => f.write_str("Secure"),
            ChannelStatus::Compromised => f.write_str("Compromised"),
        }
    }
}

/// The result of a single run of either protocol.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "protocol", rename_all = "lowercase")]
pub enum Outcome {
    Bb84(bb84::Bb84Result),
    E91(e91::E91Result),
}

impl Outcome {
    pub fn protocol(&self) -> Protocol {
        match self {
            Outcome::Bb84(_) => Protocol::Bb84,
            Outcome::E91(_) => Protocol::E91,
        }
    }

    pub fn eavesdropping_detected(&self) -> bool {
        match self {
            Outcome::Bb84(r) => r.eavesdropping_detected,
            Outcome::E91(r) => r.eavesdropped,
        }
    }

    /// The statistic the detection decision is based on: the BB84 error rate
    /// or the E91 correlation rate.
    pub fn statistic(&self) -> f64 {
        match self {
            Outcome::Bb84(r) => r.error_rate,
            Outcome::E91(r) => r.correlation_rate,
        }
    }

    pub fn status(&self) -> ChannelStatus {
        ChannelStatus::from_detection(self.eavesdropping_detected())
    }
}
