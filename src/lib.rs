//! Grid SSSP - shortest paths over rectangular cost grids
//!
//! A grid of positive per-cell costs is read as an implicit, 8-connected
//! directed graph. Moving from a cell into a neighbour costs the
//! destination cell's cost times a per-direction multiplier, so the graph
//! is generally asymmetric. Queries are answered with Dijkstra's algorithm
//! and can be run in batches over one shared grid.

pub mod algorithm;
pub mod data_structures;
pub mod grid;
pub mod planner;
pub mod report;

pub use algorithm::{dijkstra::Dijkstra, PathResult, ShortestPathAlgorithm};
/// Re-export main types for convenient use
pub use grid::{Cell, CostGrid, Direction, DirectionClass, GridGraph, Multipliers};
pub use planner::{plan, BatchPlanner, BatchResult, BoundsPolicy, Query, QueryResult};

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Cell {cell} is outside the {rows}x{cols} grid")]
    OutOfBounds { cell: Cell, rows: usize, cols: usize },

    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Negative edge weight: {0}")]
    NegativeWeight(f64),

    #[error("Edge weight is not finite: {0}")]
    NonFiniteWeight(f64),

    #[error("Algorithm execution error: {0}")]
    AlgorithmError(String),

    #[error("Search cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
