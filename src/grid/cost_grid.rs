use crate::grid::Cell;
use crate::{Error, Result};

/// An immutable rectangular grid of positive, finite per-cell costs.
///
/// Costs are stored row-major. A cell's cost is the penalty for entering
/// it. Very large finite costs act as soft obstacles: they are never
/// treated specially, they just lose against any cheaper route.
#[derive(Debug, Clone, PartialEq)]
pub struct CostGrid {
    rows: usize,
    cols: usize,
    costs: Vec<f64>,
}

impl CostGrid {
    /// Builds a grid from nested rows, checking shape and costs
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(Error::InvalidGrid("grid has no cells".to_string())),
        };

        let mut costs = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::InvalidGrid(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    cols
                )));
            }
            costs.extend_from_slice(row);
        }

        Self::from_flat(rows.len(), cols, costs)
    }

    /// Builds a grid from a row-major cost buffer
    pub fn from_flat(rows: usize, cols: usize, costs: Vec<f64>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidGrid(format!(
                "dimensions must be at least 1x1, got {}x{}",
                rows, cols
            )));
        }
        let len = rows.checked_mul(cols).ok_or_else(|| {
            Error::InvalidGrid(format!("{}x{} grid is too large", rows, cols))
        })?;
        if costs.len() != len {
            return Err(Error::InvalidGrid(format!(
                "expected {} costs for a {}x{} grid, got {}",
                len,
                rows,
                cols,
                costs.len()
            )));
        }
        if let Some(idx) = costs.iter().position(|c| !c.is_finite() || *c <= 0.0) {
            return Err(Error::InvalidGrid(format!(
                "cost {} at {} is not a positive finite number",
                costs[idx],
                Cell::new(idx / cols, idx % cols)
            )));
        }

        Ok(CostGrid { rows, cols, costs })
    }

    /// Builds a grid where every cell has the same cost
    pub fn uniform(rows: usize, cols: usize, cost: f64) -> Result<Self> {
        let len = rows
            .checked_mul(cols)
            .ok_or_else(|| Error::InvalidGrid(format!("{}x{} grid is too large", rows, cols)))?;
        Self::from_flat(rows, cols, vec![cost; len])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Always false; a grid has at least one cell
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Cost of entering `cell`
    pub fn cost(&self, cell: Cell) -> Result<f64> {
        let idx = self.check(cell)?;
        Ok(self.costs[idx])
    }

    /// Row-major index of `cell`, or `OutOfBounds`
    pub fn check(&self, cell: Cell) -> Result<usize> {
        self.index_of(cell).ok_or(Error::OutOfBounds {
            cell,
            rows: self.rows,
            cols: self.cols,
        })
    }

    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.row * self.cols + cell.col)
        } else {
            None
        }
    }

    /// Inverse of [`CostGrid::index_of`]; `index` must be below `len()`
    pub fn cell_at(&self, index: usize) -> Cell {
        Cell::new(index / self.cols, index % self.cols)
    }

    /// Largest cost on the grid
    pub fn max_cost(&self) -> f64 {
        self.costs.iter().copied().fold(f64::MIN_POSITIVE, f64::max)
    }

    pub(crate) fn cost_at(&self, index: usize) -> f64 {
        self.costs[index]
    }

    /// Returns a copy of this grid with one cell's cost replaced
    pub fn with_cost(&self, cell: Cell, cost: f64) -> Result<Self> {
        let idx = self.check(cell)?;
        let mut costs = self.costs.clone();
        costs[idx] = cost;
        Self::from_flat(self.rows, self.cols, costs)
    }

    /// Iterates over the grid one row slice at a time
    pub fn row_slices(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.costs.chunks(self.cols)
    }
}
