//! Step loop: repeated random drops on one pile, aggregated into a histogram.

use log::{debug, info};

use crate::error::{ConfigError, SimulationError};
use crate::histogram::FallsHistogram;
use crate::pile::Pile;
use crate::random::{RandomSource, SeededSource};

/// Configuration of one run. The grid is `size × size`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub size: usize,
    pub steps: u64,
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,
    pub stability_threshold: u32,
    /// Standard deviation of the placement distribution, in grid widths.
    pub drop_variance: f64,
    /// Falls a single cascade may perform; `None` keeps the pile default.
    pub fall_limit: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            size: 12,
            steps: 100,
            seed: None,
            stability_threshold: 2,
            drop_variance: 0.1,
            fall_limit: None,
        }
    }
}

impl SimulationParams {
    /// # Errors
    ///
    /// The first [`ConfigError`] found: empty or unaddressable grid,
    /// negative or non-finite drop variance, zero fall limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_pile().map(|_| ())
    }

    fn build_pile(&self) -> Result<Pile, ConfigError> {
        if !self.drop_variance.is_finite() || self.drop_variance < 0.0 {
            return Err(ConfigError::InvalidDropVariance(self.drop_variance));
        }
        let pile = Pile::new(self.size, self.size, self.stability_threshold)?;
        match self.fall_limit {
            Some(limit) => pile.with_fall_limit(limit),
            None => Ok(pile),
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// Final heights, one `Vec` per row.
    pub grid: Vec<Vec<i64>>,
    pub histogram: FallsHistogram,
    pub steps: u64,
    /// Drops that missed the grid. They are also counted under 0 falls.
    pub lost_drops: u64,
}

/// One configured run.
#[derive(Debug, Clone)]
pub struct Simulation {
    params: SimulationParams,
}

impl Simulation {
    /// # Errors
    ///
    /// [`ConfigError`] if `params` fail validation.
    pub fn new(params: SimulationParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    #[must_use]
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Run `params.steps` drops.
    ///
    /// # Errors
    ///
    /// See [`Simulation::simulate`].
    pub fn run(&self) -> Result<SimulationReport, SimulationError> {
        self.simulate(self.params.steps)
    }

    /// Run `steps` drops with a source seeded from `params.seed`.
    ///
    /// # Errors
    ///
    /// [`SimulationError::Cascade`] if a cascade exceeds its fall limit.
    pub fn simulate(&self, steps: u64) -> Result<SimulationReport, SimulationError> {
        let mut source = SeededSource::new(self.params.seed);
        self.simulate_with(steps, &mut source)
    }

    /// Run `steps` drops placed by `source`.
    ///
    /// # Errors
    ///
    /// [`SimulationError::Cascade`] if a cascade exceeds its fall limit.
    pub fn simulate_with<R: RandomSource + ?Sized>(
        &self,
        steps: u64,
        source: &mut R,
    ) -> Result<SimulationReport, SimulationError> {
        let params = &self.params;
        info!("Starting simulation with parameters");
        info!("size={}", params.size);
        info!("steps={}", params.steps);
        match params.seed {
            Some(seed) => info!("seed={seed}"),
            None => info!("seed=None"),
        }
        info!("stability_threshold={}", params.stability_threshold);
        info!("drop_variance={}", params.drop_variance);

        let mut pile = params.build_pile()?;
        info!("fall_limit={}", pile.fall_limit());

        let mut histogram = FallsHistogram::new();
        for step in 0..steps {
            let falls = pile
                .drop(source, params.drop_variance)
                .map_err(|err| SimulationError::Cascade { step, source: err })?;
            debug!("step {step}: {falls} falls");
            histogram.record(falls);
        }

        info!("Final pile data:\n{pile}");
        info!("Falls histogram:");
        for (falls, drops) in histogram.iter() {
            info!("{falls}: {drops}");
        }
        if pile.lost_drops() > 0 {
            info!("{} grains dropped outside of the pile", pile.lost_drops());
        }
        info!("Simulation done");

        Ok(SimulationReport {
            grid: pile.to_rows(),
            histogram,
            steps,
            lost_drops: pile.lost_drops(),
        })
    }
}
