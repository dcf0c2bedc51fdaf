//! Quantum Key Distribution (QKD) Protocols.
//!
//! This module contains statistical simulations of two QKD protocols:
//! - **BB84**: prepare-and-measure with four polarization states.
//! - **E91**: entanglement-based, reduced to a basis-agreement check.

pub mod bb84;
pub mod e91;
pub mod eavesdropper;
