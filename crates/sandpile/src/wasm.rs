//! Browser-facing handle: drive a pile one drop at a time and read it back.

use wasm_bindgen::prelude::*;

use crate::error::{CascadeError, ConfigError};
use crate::histogram::FallsHistogram;
use crate::pile::Pile;
use crate::random::SeededSource;
use crate::simulation::SimulationParams;

/// A square pile plus its placement source and running histogram.
#[wasm_bindgen]
#[derive(Debug)]
pub struct SandpileRun {
    pile: Pile,
    source: SeededSource,
    drop_variance: f64,
    histogram: FallsHistogram,
}

impl SandpileRun {
    pub(crate) fn try_new(
        size: usize,
        stability_threshold: u32,
        drop_variance: f64,
        seed: Option<u32>,
    ) -> Result<Self, ConfigError> {
        let params = SimulationParams {
            size,
            seed: seed.map(u64::from),
            stability_threshold,
            drop_variance,
            ..SimulationParams::default()
        };
        params.validate()?;
        Ok(Self {
            pile: Pile::new(size, size, stability_threshold)?,
            source: SeededSource::new(params.seed),
            drop_variance,
            histogram: FallsHistogram::new(),
        })
    }

    pub(crate) fn advance(&mut self) -> Result<u64, CascadeError> {
        let falls = self.pile.drop(&mut self.source, self.drop_variance)?;
        self.histogram.record(falls);
        Ok(falls)
    }
}

#[wasm_bindgen]
impl SandpileRun {
    #[wasm_bindgen(constructor)]
    pub fn new(
        size: usize,
        stability_threshold: u32,
        drop_variance: f64,
        seed: Option<u32>,
    ) -> Result<SandpileRun, JsError> {
        Ok(Self::try_new(size, stability_threshold, drop_variance, seed)?)
    }

    /// Drop one grain; returns its fall count.
    pub fn step(&mut self) -> Result<u64, JsError> {
        Ok(self.advance()?)
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.pile.rows()
    }

    /// Row-major heights, clamped to the `i32` range.
    #[must_use]
    pub fn heights(&self) -> Vec<i32> {
        self.pile
            .heights()
            .iter()
            .map(|&h| h.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
            .collect()
    }

    /// Flattened `[falls, drops, falls, drops, ...]`, ascending by falls.
    #[must_use]
    pub fn histogram(&self) -> Vec<u64> {
        self.histogram
            .iter()
            .flat_map(|(falls, drops)| [falls, drops])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_validates_like_simulation_params() {
        assert_eq!(
            SandpileRun::try_new(0, 2, 0.1, None).unwrap_err(),
            ConfigError::EmptyGrid { rows: 0, cols: 0 }
        );
        assert!(matches!(
            SandpileRun::try_new(4, 2, -1.0, Some(1)),
            Err(ConfigError::InvalidDropVariance(_))
        ));
    }

    #[test]
    fn zero_variance_steps_fill_the_center() {
        let mut run = SandpileRun::try_new(3, 2, 0.0, Some(5)).unwrap();
        assert_eq!(run.size(), 3);
        for _ in 0..2 {
            assert_eq!(run.advance(), Ok(0));
        }
        assert_eq!(run.heights(), vec![0, 0, 0, 0, 2, 0, 0, 0, 0]);
        assert_eq!(run.histogram(), vec![0, 2]);
    }

    #[test]
    fn seeded_runs_match() {
        let mut a = SandpileRun::try_new(6, 1, 0.3, Some(9)).unwrap();
        let mut b = SandpileRun::try_new(6, 1, 0.3, Some(9)).unwrap();
        for _ in 0..50 {
            assert_eq!(a.advance(), b.advance());
        }
        assert_eq!(a.heights(), b.heights());
        assert_eq!(a.histogram(), b.histogram());
    }
}
