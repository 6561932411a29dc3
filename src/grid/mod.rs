pub mod cell;
pub mod cost_grid;
pub mod generators;
pub mod neighbors;
pub mod traits;

pub use cell::Cell;
pub use cost_grid::CostGrid;
pub use neighbors::{Direction, DirectionClass, GridGraph, Multipliers, Neighbor};
pub use traits::Graph;
