//! Error types for pile construction, cascades and simulation runs.

use thiserror::Error;

/// Parameters that cannot describe a meaningful run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("grid {rows}x{cols} is too large to address")]
    GridTooLarge { rows: usize, cols: usize },

    #[error("drop variance must be finite and non-negative, got {0}")]
    InvalidDropVariance(f64),

    #[error("fall limit must be at least 1")]
    ZeroFallLimit,
}

/// A cascade that kept moving grains past its fall limit.
///
/// Treated as fatal: stopping early would leave the pile in a state no
/// complete cascade produces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CascadeError {
    #[error("cascade started at ({x}, {y}) did not settle within {limit} falls")]
    Exhausted { x: i64, y: i64, limit: u64 },
}

/// Anything that stops a simulation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("step {step}: {source}")]
    Cascade {
        step: u64,
        #[source]
        source: CascadeError,
    },
}
