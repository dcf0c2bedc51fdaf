//! Eavesdropper models for the BB84 channel.

use crate::core::{Basis, RandomSource, errors::SimulationError};

/// Interception probability used by the default eavesdropper.
pub const DEFAULT_INTERCEPT_PROBABILITY: f64 = 0.2;

/// An adversary sitting on the quantum channel between Alice and Bob.
pub trait Eavesdropper {
    /// Decides whether to intercept the qubit carrying `bit` in `basis`.
    ///
    /// Returns `Some(guess)` with the bit Eve resends to Bob, or `None` if she
    /// lets the qubit through untouched.
    fn intercept(&self, bit: bool, basis: Basis, source: &mut RandomSource) -> Option<bool>;
}

/// Intercept-and-resend attack.
///
/// With probability `probability` Eve captures the qubit and forwards a fresh
/// uniform guess, independent of the true bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptResend {
    probability: f64,
}

impl InterceptResend {
    pub fn new(probability: f64) -> Result<Self, SimulationError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(SimulationError::InvalidProbability(probability));
        }
        Ok(Self { probability })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Default for InterceptResend {
    fn default() -> Self {
        Self {
            probability: DEFAULT_INTERCEPT_PROBABILITY,
        }
    }
}

impl Eavesdropper for InterceptResend {
    fn intercept(&self, _bit: bool, _basis: Basis, source: &mut RandomSource) -> Option<bool> {
        // Always consume the uniform draw so streams stay aligned across probabilities.
        if source.uniform() < self.probability {
            Some(source.bit())
        } else {
            None
        }
    }
}

/// A passive channel with nobody listening.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEavesdropper;

impl Eavesdropper for NoEavesdropper {
    fn intercept(&self, _bit: bool, _basis: Basis, _source: &mut RandomSource) -> Option<bool> {
        None
    }
}
