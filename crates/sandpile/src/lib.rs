//! Sandpile avalanche simulation engine.
//!
//! Grains are dropped one at a time near the center of a square grid. A
//! cell that stands more than `stability_threshold` above a neighbor sends
//! it a grain, and the resulting avalanche is propagated breadth-first. Each
//! drop's number of moves ("falls") is collected into a [`FallsHistogram`].

pub mod error;
pub mod histogram;
pub mod pile;
pub mod random;
pub mod simulation;
pub mod wasm;

#[cfg(test)]
mod avalanche_test;

pub use error::{CascadeError, ConfigError, SimulationError};
pub use histogram::FallsHistogram;
pub use pile::Pile;
pub use random::{RandomSource, SeededSource};
pub use simulation::{Simulation, SimulationParams, SimulationReport};
pub use wasm::SandpileRun;
