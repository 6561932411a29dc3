use serde::{Deserialize, Serialize};

use crate::grid::{Cell, CostGrid, Graph};
use crate::{Error, Result};

/// Whether a move changes one coordinate or both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionClass {
    Orthogonal,
    Diagonal,
}

/// One of the 8 moves out of a cell. North is towards row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// Enumeration order used everywhere neighbours are produced. Search
    /// tie-breaking depends on it, so it must not change.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// `(d_row, d_col)` step for this direction
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (-1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
        }
    }

    pub const fn class(self) -> DirectionClass {
        match self {
            Direction::North | Direction::South | Direction::East | Direction::West => {
                DirectionClass::Orthogonal
            }
            _ => DirectionClass::Diagonal,
        }
    }
}

/// Per-class weight multipliers applied to the destination cell's cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMultipliers")]
pub struct Multipliers {
    orthogonal: f64,
    diagonal: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Multipliers {
            orthogonal: 1.0,
            diagonal: 1.0,
        }
    }
}

/// Unchecked wire form of [`Multipliers`]
#[derive(Deserialize)]
struct RawMultipliers {
    orthogonal: f64,
    diagonal: f64,
}

impl TryFrom<RawMultipliers> for Multipliers {
    type Error = Error;

    fn try_from(raw: RawMultipliers) -> Result<Self> {
        Multipliers::new(raw.orthogonal, raw.diagonal)
    }
}

impl Multipliers {
    /// Both multipliers must be finite and strictly positive. A zero
    /// multiplier would make a whole direction class free.
    pub fn new(orthogonal: f64, diagonal: f64) -> Result<Self> {
        for (name, value) in [("orthogonal", orthogonal), ("diagonal", diagonal)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::ConfigError(format!(
                    "{} multiplier must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        Ok(Multipliers {
            orthogonal,
            diagonal,
        })
    }

    /// Diagonal moves scaled by the true step length, `orthogonal * sqrt(2)`
    pub fn euclidean(orthogonal: f64) -> Result<Self> {
        Self::new(orthogonal, orthogonal * std::f64::consts::SQRT_2)
    }

    pub fn orthogonal(&self) -> f64 {
        self.orthogonal
    }

    pub fn diagonal(&self) -> f64 {
        self.diagonal
    }

    /// Checks that no edge weight on `grid` overflows to infinity
    pub fn check_grid(&self, grid: &CostGrid) -> Result<()> {
        let largest = self.orthogonal.max(self.diagonal);
        let weight = grid.max_cost() * largest;
        if !weight.is_finite() {
            return Err(Error::ConfigError(format!(
                "largest cost {} times multiplier {} overflows",
                grid.max_cost(),
                largest
            )));
        }
        Ok(())
    }

    pub fn for_class(&self, class: DirectionClass) -> f64 {
        match class {
            DirectionClass::Orthogonal => self.orthogonal,
            DirectionClass::Diagonal => self.diagonal,
        }
    }
}

/// An in-bounds neighbour of some cell together with the directed weight
/// of stepping into it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub cell: Cell,
    pub direction: Direction,
    pub weight: f64,
}

/// The implicit 8-connected directed graph of a cost grid.
///
/// `weight(A -> B) = cost(B) * multiplier(class(A, B))`, so the graph is
/// asymmetric wherever neighbouring costs differ. Nothing is materialised;
/// edges are computed when asked for.
#[derive(Debug, Clone, Copy)]
pub struct GridGraph<'a> {
    grid: &'a CostGrid,
    multipliers: Multipliers,
}

impl<'a> GridGraph<'a> {
    pub fn new(grid: &'a CostGrid, multipliers: Multipliers) -> Self {
        GridGraph { grid, multipliers }
    }

    pub fn grid(&self) -> &'a CostGrid {
        self.grid
    }

    pub fn multipliers(&self) -> Multipliers {
        self.multipliers
    }

    /// In-bounds neighbours of `cell` in [`Direction::ALL`] order.
    /// Yields nothing for a cell outside the grid.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Neighbor> + 'a {
        let grid = self.grid;
        let multipliers = self.multipliers;
        let inside = grid.contains(cell);
        Direction::ALL.into_iter().filter_map(move |direction| {
            if !inside {
                return None;
            }
            let (dr, dc) = direction.delta();
            let next = cell.offset(dr, dc)?;
            let idx = grid.index_of(next)?;
            Some(Neighbor {
                cell: next,
                direction,
                weight: grid.cost_at(idx) * multipliers.for_class(direction.class()),
            })
        })
    }

    /// Directed weight of moving from `from` into the adjacent cell `to`
    pub fn edge_weight(&self, from: Cell, to: Cell) -> Option<f64> {
        self.neighbors(from)
            .find(|n| n.cell == to)
            .map(|n| n.weight)
    }

    /// Sum of edge weights along `path`; `None` if two consecutive cells
    /// are not adjacent or a cell is off the grid
    pub fn path_weight(&self, path: &[Cell]) -> Option<f64> {
        if let Some(first) = path.first() {
            if !self.grid.contains(*first) {
                return None;
            }
        }
        path.windows(2)
            .map(|pair| self.edge_weight(pair[0], pair[1]))
            .sum()
    }
}

impl Graph for GridGraph<'_> {
    fn vertex_count(&self) -> usize {
        self.grid.len()
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, f64)> + '_> {
        if !self.has_vertex(vertex) {
            return Box::new(std::iter::empty());
        }
        let grid = self.grid;
        Box::new(
            self.neighbors(grid.cell_at(vertex))
                .map(move |n| (n.cell.row * grid.cols() + n.cell.col, n.weight)),
        )
    }
}
