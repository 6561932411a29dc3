use crate::grid::{Cell, CostGrid};
use crate::{Error, Result};
use rand::prelude::*;

/// Cost used for soft obstacles in generated terrain
pub const SOFT_OBSTACLE_COST: f64 = 1.0e6;

/// Generates a `rows x cols` terrain with costs drawn uniformly from
/// `min_cost..max_cost`. The same seed always gives the same grid.
pub fn random_terrain(
    rows: usize,
    cols: usize,
    min_cost: f64,
    max_cost: f64,
    seed: u64,
) -> Result<CostGrid> {
    if !(min_cost > 0.0 && min_cost < max_cost && max_cost.is_finite()) {
        return Err(Error::ConfigError(format!(
            "cost range {}..{} must be positive, finite and non-empty",
            min_cost, max_cost
        )));
    }

    let len = rows
        .checked_mul(cols)
        .ok_or_else(|| Error::InvalidGrid(format!("{}x{} grid is too large", rows, cols)))?;
    let mut rng = StdRng::seed_from_u64(seed);
    let costs = (0..len)
        .map(|_| rng.gen_range(min_cost..max_cost))
        .collect();

    CostGrid::from_flat(rows, cols, costs)
}

/// Returns a copy of `grid` where roughly `fraction` of the cells have been
/// turned into soft obstacles. The cells in `keep_clear` are never touched.
pub fn with_soft_obstacles(
    grid: &CostGrid,
    fraction: f64,
    keep_clear: &[Cell],
    seed: u64,
) -> Result<CostGrid> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(Error::ConfigError(format!(
            "obstacle fraction must be within 0..=1, got {}",
            fraction
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut costs = Vec::with_capacity(grid.len());
    for (idx, cost) in grid.row_slices().flatten().enumerate() {
        let cell = grid.cell_at(idx);
        if !keep_clear.contains(&cell) && rng.gen_bool(fraction) {
            costs.push(SOFT_OBSTACLE_COST);
        } else {
            costs.push(*cost);
        }
    }

    CostGrid::from_flat(grid.rows(), grid.cols(), costs)
}

/// Draws `count` start/end pairs uniformly over the grid
pub fn random_pairs(grid: &CostGrid, count: usize, seed: u64) -> Vec<(Cell, Cell)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let pick = |rng: &mut StdRng| {
        Cell::new(rng.gen_range(0..grid.rows()), rng.gen_range(0..grid.cols()))
    };
    (0..count)
        .map(|_| {
            let start = pick(&mut rng);
            let end = pick(&mut rng);
            (start, end)
        })
        .collect()
}
