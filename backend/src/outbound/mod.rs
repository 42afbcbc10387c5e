//! Outbound (driven) adapters.

pub mod generation;
pub mod memory;
