//! Dashboard panels and host window capabilities

mod fullscreen;
mod panels;

pub use fullscreen::*;
pub use panels::*;
