mod core;
pub mod cache;
pub mod config;
pub mod protocols;
mod sampler;

pub use crate::cache::{CacheKey, SimulationCache};
pub use crate::config::{Limits, SimulationParams};
pub use crate::core::{Basis, Polarization, RandomSource, UNMEASURABLE, errors};
pub use crate::protocols::{ChannelStatus, Outcome, Protocol};
pub use crate::sampler::{SampleSummary, Sampler};
