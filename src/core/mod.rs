pub mod errors;
mod polarization;
mod source;

pub use polarization::{Basis, Polarization, UNMEASURABLE};
pub use source::RandomSource;
