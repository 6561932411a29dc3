//! JSON batch requests and reports.
//!
//! This is the file-facing edge of the crate: a request maps onto a grid,
//! a query list and a configured planner, and a [`BatchResult`] maps onto a
//! serialisable report.

pub mod models;

pub use models::{BatchReport, BatchRequest, QueryReport, QueryStatus};

use std::fs;
use std::path::Path;

use crate::algorithm::PathResult;
use crate::grid::{CostGrid, Multipliers};
use crate::planner::{BatchPlanner, BatchResult, Query};
use crate::Result;

impl BatchRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validates the grid and multipliers and builds a matching planner
    pub fn build(&self) -> Result<(CostGrid, BatchPlanner)> {
        let grid = CostGrid::new(self.grid.clone())?;
        let multipliers = Multipliers::new(self.hv_multiplier, self.diag_multiplier)?;
        multipliers.check_grid(&grid)?;
        let planner = BatchPlanner::new()
            .with_multipliers(multipliers)
            .with_parallel(self.parallel)
            .with_bounds_policy(self.bounds_policy);
        Ok((grid, planner))
    }

    /// Runs the whole request
    pub fn run(&self) -> Result<BatchReport> {
        let (grid, planner) = self.build()?;
        let batch = planner.plan(&grid, &self.queries)?;
        Ok(BatchReport::new(&grid, planner.multipliers(), &self.queries, &batch))
    }
}

impl BatchReport {
    pub fn new(grid: &CostGrid, multipliers: Multipliers, queries: &[Query], batch: &BatchResult) -> Self {
        let rows = queries
            .iter()
            .zip(&batch.results)
            .enumerate()
            .map(|(index, (query, result))| {
                let mut row = QueryReport {
                    index,
                    start: query.start,
                    end: query.end,
                    status: QueryStatus::Unreachable,
                    distance: None,
                    path: None,
                    error: None,
                };
                match result {
                    Ok(PathResult::Found { distance, path }) => {
                        row.status = QueryStatus::Found;
                        row.distance = Some(*distance);
                        row.path = Some(path.clone());
                    }
                    Ok(PathResult::Unreachable) => {}
                    Err(e) => {
                        row.status = QueryStatus::Error;
                        row.error = Some(e.to_string());
                    }
                }
                row
            })
            .collect();

        BatchReport {
            rows: grid.rows(),
            cols: grid.cols(),
            hv_multiplier: multipliers.orthogonal(),
            diag_multiplier: multipliers.diagonal(),
            total_distance: batch.total_distance,
            had_unreachable: batch.had_unreachable,
            had_errors: batch.had_errors(),
            queries: rows,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
