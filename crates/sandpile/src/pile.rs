//! The grain grid and its cascade rule.

use std::collections::VecDeque;
use std::fmt;

use log::{info, trace};

use crate::error::{CascadeError, ConfigError};
use crate::random::RandomSource;

/// Default cascade budget, multiplied by the number of cells.
pub const DEFAULT_FALLS_PER_CELL: u64 = 1 << 16;

/// Neighbor offsets in enumeration order: `dx` outer, `dy` inner.
static OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Coordinates around `(x, y)`. Without `diag` only the four orthogonal
/// offsets are kept. Off-grid coordinates are included.
fn around(x: i64, y: i64, diag: bool) -> impl Iterator<Item = (i64, i64)> {
    OFFSETS
        .iter()
        .filter(move |&&(dx, dy)| diag || ((dx == 0) != (dy == 0)))
        .filter_map(move |&(dx, dy)| Some((x.checked_add(dx)?, y.checked_add(dy)?)))
}

/// 2D grid of grain heights. `x` selects the row, `y` the column.
///
/// Out-of-bounds reads return 0, writes are no-ops. Heights are signed: a
/// cell that out-tops several neighbors in one dequeue gives a grain to each
/// of them and can end up below zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pile {
    rows: usize,
    cols: usize,
    heights: Vec<i64>,
    stability_threshold: u32,
    fall_limit: u64,
    lost_drops: u64,
}

impl Pile {
    /// Empty pile of `rows × cols` cells.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyGrid`] when either dimension is zero and
    /// [`ConfigError::GridTooLarge`] when the cells cannot be addressed.
    pub fn new(rows: usize, cols: usize, stability_threshold: u32) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        let too_large = ConfigError::GridTooLarge { rows, cols };
        let cells = rows.checked_mul(cols).ok_or_else(|| too_large.clone())?;
        if i64::try_from(rows).is_err() || i64::try_from(cols).is_err() {
            return Err(too_large);
        }
        Ok(Self {
            rows,
            cols,
            heights: vec![0; cells],
            stability_threshold,
            fall_limit: (cells as u64).saturating_mul(DEFAULT_FALLS_PER_CELL),
            lost_drops: 0,
        })
    }

    /// Replace the number of falls a single cascade may perform.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroFallLimit`] for a limit of 0.
    pub fn with_fall_limit(mut self, fall_limit: u64) -> Result<Self, ConfigError> {
        if fall_limit == 0 {
            return Err(ConfigError::ZeroFallLimit);
        }
        self.fall_limit = fall_limit;
        Ok(self)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn stability_threshold(&self) -> u32 {
        self.stability_threshold
    }

    #[must_use]
    pub fn fall_limit(&self) -> u64 {
        self.fall_limit
    }

    /// Drops whose placement missed the grid.
    #[must_use]
    pub fn lost_drops(&self) -> u64 {
        self.lost_drops
    }

    /// Row-major heights.
    #[must_use]
    pub fn heights(&self) -> &[i64] {
        &self.heights
    }

    /// Heights as one `Vec` per row.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.heights.chunks(self.cols).map(<[i64]>::to_vec).collect()
    }

    /// Sum of all stored heights.
    #[must_use]
    pub fn total_grains(&self) -> i64 {
        self.heights.iter().sum()
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let row = usize::try_from(x).ok().filter(|&row| row < self.rows)?;
        let col = usize::try_from(y).ok().filter(|&col| col < self.cols)?;
        Some(row * self.cols + col)
    }

    #[must_use]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        self.index(x, y).is_some()
    }

    #[must_use]
    pub fn get(&self, x: i64, y: i64) -> i64 {
        self.index(x, y).map_or(0, |i| self.heights[i])
    }

    pub fn set(&mut self, x: i64, y: i64, value: i64) {
        if let Some(i) = self.index(x, y) {
            self.heights[i] = value;
        }
    }

    pub fn inc(&mut self, x: i64, y: i64) {
        self.set(x, y, self.get(x, y) + 1);
    }

    pub fn dec(&mut self, x: i64, y: i64) {
        self.set(x, y, self.get(x, y) - 1);
    }

    /// Coordinates around `(x, y)`: the four orthogonal ones, plus the four
    /// diagonal ones with `diag`. Off-grid coordinates are yielded unless
    /// `in_bounds_only` is set.
    pub fn neighbors(
        &self,
        x: i64,
        y: i64,
        diag: bool,
        in_bounds_only: bool,
    ) -> impl Iterator<Item = (i64, i64)> + '_ {
        around(x, y, diag).filter(move |&(nx, ny)| !in_bounds_only || self.in_bounds(nx, ny))
    }

    /// Target cell for a pair of placement samples, or `None` if it misses
    /// the grid.
    ///
    /// `x = trunc(x_rand * rows + rows / 2)`, likewise for `y`. Truncation
    /// rounds toward zero, so samples landing in `(-1, 0)` still hit row or
    /// column 0.
    #[must_use]
    pub fn placement(&self, x_rand: f64, y_rand: f64) -> Option<(i64, i64)> {
        let rows = self.rows as f64;
        let cols = self.cols as f64;
        let fx = (x_rand * rows + rows / 2.0).trunc();
        let fy = (y_rand * cols + cols / 2.0).trunc();
        if !fx.is_finite() || !fy.is_finite() {
            return None;
        }
        let (x, y) = (fx as i64, fy as i64);
        self.in_bounds(x, y).then_some((x, y))
    }

    /// Drop one grain at a cell drawn from `Normal(0, variance)` around the
    /// center and let it cascade. Returns the number of falls.
    ///
    /// A grain placed off the grid is lost: nothing changes and 0 is
    /// returned.
    ///
    /// # Errors
    ///
    /// [`CascadeError::Exhausted`] if the cascade runs past the fall limit.
    pub fn drop<R: RandomSource + ?Sized>(
        &mut self,
        source: &mut R,
        variance: f64,
    ) -> Result<u64, CascadeError> {
        let x_rand = source.normal(0.0, variance);
        let y_rand = source.normal(0.0, variance);
        if let Some((x, y)) = self.placement(x_rand, y_rand) {
            self.inc(x, y);
            self.cascade(x, y)
        } else {
            self.lost_drops += 1;
            info!("Dropped outside of the pile");
            Ok(0)
        }
    }

    /// Drop one grain at a fixed cell and let it cascade. Off-grid cells are
    /// a no-op returning 0.
    ///
    /// # Errors
    ///
    /// [`CascadeError::Exhausted`] if the cascade runs past the fall limit.
    pub fn drop_at(&mut self, x: i64, y: i64) -> Result<u64, CascadeError> {
        if !self.in_bounds(x, y) {
            self.lost_drops += 1;
            info!("Dropped outside of the pile");
            return Ok(0);
        }
        self.inc(x, y);
        self.cascade(x, y)
    }

    /// Breadth-first redistribution of excess grains starting at `(x, y)`.
    ///
    /// Each dequeued cell whose live height is at least the threshold reads
    /// its height `h` once, then moves one grain to every orthogonal neighbor
    /// `n` with `h - n > threshold`, enqueueing `n`. `h` is not re-read
    /// between neighbors. Neighbors off the grid read as 0 and swallow the
    /// grains sent to them. Returns the number of moves.
    ///
    /// # Errors
    ///
    /// [`CascadeError::Exhausted`] when another move is due after
    /// `fall_limit` moves. The pile keeps the moves made so far.
    pub fn cascade(&mut self, x: i64, y: i64) -> Result<u64, CascadeError> {
        let threshold = i64::from(self.stability_threshold);
        let mut falls = 0u64;
        let mut queue = VecDeque::from([(x, y)]);

        while let Some((cx, cy)) = queue.pop_front() {
            let h = self.get(cx, cy);
            if h < threshold {
                continue;
            }
            for (nx, ny) in around(cx, cy, false) {
                if h - self.get(nx, ny) <= threshold {
                    continue;
                }
                if falls >= self.fall_limit {
                    return Err(CascadeError::Exhausted {
                        x,
                        y,
                        limit: self.fall_limit,
                    });
                }
                self.dec(cx, cy);
                self.inc(nx, ny);
                queue.push_back((nx, ny));
                falls += 1;
                trace!("fall ({cx}, {cy}) -> ({nx}, {ny})");
            }
        }
        Ok(falls)
    }
}

impl fmt::Display for Pile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .heights
            .iter()
            .map(|h| h.to_string().len())
            .max()
            .unwrap_or(1);
        for row in self.heights.chunks(self.cols) {
            let cells: Vec<String> = row.iter().map(|h| format!("{h:>width$}")).collect();
            writeln!(f, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}
