//! Orbit classification and SGP4 propagation
//!
//! Wraps satkit's SGP4 implementation behind a geocentric
//! latitude/longitude/altitude interface, classifies orbits from their
//! element parameters, and generates track polylines for rendering.

mod classify;
mod propagator;
mod track;

pub use classify::*;
pub use propagator::*;
pub use track::*;
