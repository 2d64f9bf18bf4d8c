//! Data ingestion and reference data
//!
//! Handles parsing of raw two-line element text, the static satellite
//! catalog, and the upstream HTTP sources for element sets and
//! space-weather notifications.

mod catalog;
mod elements;
mod sources;

pub use catalog::*;
pub use elements::*;
pub use sources::*;
