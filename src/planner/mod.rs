//! Batches of independent queries over one shared grid.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::algorithm::{dijkstra::Dijkstra, PathResult};
use crate::grid::{Cell, CostGrid, GridGraph, Multipliers};
use crate::{Error, Result};

/// A single start/end request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub start: Cell,
    pub end: Cell,
}

impl Query {
    pub fn new(start: impl Into<Cell>, end: impl Into<Cell>) -> Self {
        Query {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Per-query outcome on a grid
pub type QueryResult = PathResult<Cell>;

/// What to do with a query whose start or end lies off the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Record `Err(OutOfBounds)` for that query and keep going
    #[default]
    PerQuery,
    /// Check every query before searching and fail the whole call
    FailBatch,
}

/// Results of a batch, aligned with the input queries
#[derive(Debug)]
pub struct BatchResult {
    pub results: Vec<Result<QueryResult>>,
    /// Sum of distances over found paths only
    pub total_distance: f64,
    pub had_unreachable: bool,
}

impl BatchResult {
    fn from_results(results: Vec<Result<QueryResult>>) -> Self {
        let total_distance = results
            .iter()
            .filter_map(|r| r.as_ref().ok().and_then(PathResult::distance))
            .sum();
        let had_unreachable = results
            .iter()
            .any(|r| matches!(r, Ok(PathResult::Unreachable)));

        BatchResult {
            results,
            total_distance,
            had_unreachable,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn found_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, Ok(PathResult::Found { .. })))
            .count()
    }

    pub fn unreachable_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, Ok(PathResult::Unreachable)))
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_err()).count()
    }

    /// True when any query failed with an error rather than an outcome
    pub fn had_errors(&self) -> bool {
        self.results.iter().any(|r| r.is_err())
    }

    /// Error of the query at `index`, if it failed
    pub fn error(&self, index: usize) -> Option<&Error> {
        self.results.get(index).and_then(|r| r.as_ref().err())
    }

    /// True when every query found a path
    pub fn is_complete(&self) -> bool {
        self.found_count() == self.results.len()
    }

    /// Found paths with their query index
    pub fn paths(&self) -> impl Iterator<Item = (usize, &[Cell])> + '_ {
        self.results
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().ok().and_then(|r| r.path()).map(|p| (i, p)))
    }
}

/// Runs batches of queries against a grid
#[derive(Debug, Clone, Default)]
pub struct BatchPlanner {
    multipliers: Multipliers,
    parallel: bool,
    bounds_policy: BoundsPolicy,
    cancel: Option<Arc<AtomicBool>>,
}

impl BatchPlanner {
    /// Planner with 1.0/1.0 multipliers, sequential execution and
    /// per-query bounds errors
    pub fn new() -> Self {
        BatchPlanner::default()
    }

    pub fn with_multipliers(mut self, multipliers: Multipliers) -> Self {
        self.multipliers = multipliers;
        self
    }

    /// Run queries on the rayon pool. Results keep input order.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_bounds_policy(mut self, policy: BoundsPolicy) -> Self {
        self.bounds_policy = policy;
        self
    }

    /// Shared flag; once set, remaining searches report `Err(Cancelled)`
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn multipliers(&self) -> Multipliers {
        self.multipliers
    }

    pub fn plan(&self, grid: &CostGrid, queries: &[Query]) -> Result<BatchResult> {
        self.multipliers.check_grid(grid)?;
        if self.bounds_policy == BoundsPolicy::FailBatch {
            for query in queries {
                grid.check(query.start)?;
                grid.check(query.end)?;
            }
        }

        let graph = GridGraph::new(grid, self.multipliers);
        let mut engine = Dijkstra::new();
        if let Some(flag) = &self.cancel {
            engine = engine.with_cancel_flag(Arc::clone(flag));
        }

        log::debug!(
            "planning {} queries on a {}x{} grid (parallel: {})",
            queries.len(),
            grid.rows(),
            grid.cols(),
            self.parallel
        );

        let run = |query: &Query| engine.search(&graph, query.start, query.end);
        let results: Vec<Result<QueryResult>> = if self.parallel {
            queries.par_iter().map(run).collect()
        } else {
            queries.iter().map(run).collect()
        };

        let batch = BatchResult::from_results(results);
        log::debug!(
            "batch done: {} found, {} unreachable, {} failed, total {}",
            batch.found_count(),
            batch.unreachable_count(),
            batch.error_count(),
            batch.total_distance
        );
        if batch.had_unreachable || batch.had_errors() {
            log::warn!(
                "batch incomplete: {} of {} queries without a path",
                batch.len() - batch.found_count(),
                batch.len()
            );
        }

        Ok(batch)
    }
}

/// Plans `queries` with the given orthogonal and diagonal multipliers.
///
/// Fails before any search if a multiplier is invalid. Off-grid queries are
/// reported in their own slot.
pub fn plan(
    grid: &CostGrid,
    queries: &[Query],
    hv_multiplier: f64,
    diag_multiplier: f64,
) -> Result<BatchResult> {
    let multipliers = Multipliers::new(hv_multiplier, diag_multiplier)?;
    BatchPlanner::new().with_multipliers(multipliers).plan(grid, queries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> CostGrid {
        CostGrid::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap()
    }

    #[test]
    fn totals_only_count_found_paths() {
        let queries = [
            Query::new((0, 0), (1, 1)),
            Query::new((0, 0), (5, 5)),
            Query::new((1, 1), (1, 1)),
        ];
        let batch = plan(&grid(), &queries, 1.0, 1.0).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.results[0].as_ref().unwrap().distance(), Some(4.0));
        assert!(matches!(batch.error(1), Some(Error::OutOfBounds { .. })));
        assert_eq!(batch.total_distance, 4.0);
        assert!(!batch.had_unreachable);
        assert!(batch.had_errors());
        assert!(!batch.is_complete());
        assert_eq!(batch.paths().map(|(i, _)| i).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn unreachable_entries_keep_their_slot_and_add_nothing() {
        let results = vec![
            Ok(PathResult::Found {
                distance: 3.5,
                path: vec![Cell::new(0, 0), Cell::new(0, 1)],
            }),
            Ok(PathResult::Unreachable),
            Err(Error::Cancelled),
            Ok(PathResult::Found {
                distance: 0.0,
                path: vec![Cell::new(1, 1)],
            }),
        ];
        let batch = BatchResult::from_results(results);

        assert_eq!(batch.len(), 4);
        assert_eq!(batch.total_distance, 3.5);
        assert!(batch.had_unreachable);
        assert!(batch.had_errors());
        assert_eq!(batch.found_count(), 2);
        assert_eq!(batch.unreachable_count(), 1);
        assert_eq!(batch.error_count(), 1);
        assert!(!batch.is_complete());
        assert!(matches!(batch.results[1], Ok(PathResult::Unreachable)));
        assert!(matches!(batch.error(2), Some(Error::Cancelled)));
        assert!(batch.error(1).is_none());
        assert_eq!(batch.paths().map(|(i, _)| i).collect::<Vec<_>>(), vec![0, 3]);
    }

    #[test]
    fn overflowing_weights_fail_the_batch() {
        let grid = CostGrid::new(vec![vec![1.0, 1.0e300]]).unwrap();
        let queries = [Query::new((0, 0), (0, 1))];
        assert!(matches!(plan(&grid, &queries, 1.0e10, 1.0), Err(Error::ConfigError(_))));
    }

    #[test]
    fn deserialized_multipliers_cannot_bypass_validation() {
        let parsed = serde_json::from_str::<Multipliers>(r#"{"orthogonal": -1.0, "diagonal": 0.0}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn fail_batch_policy_stops_before_searching() {
        let queries = [Query::new((0, 0), (1, 1)), Query::new((2, 0), (0, 0))];
        let err = BatchPlanner::new()
            .with_bounds_policy(BoundsPolicy::FailBatch)
            .plan(&grid(), &queries)
            .unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { cell, .. } if cell == Cell::new(2, 0)));
    }

    #[test]
    fn bad_multipliers_fail_fast() {
        let queries = [Query::new((0, 0), (1, 1))];
        assert!(matches!(plan(&grid(), &queries, -1.0, 1.0), Err(Error::ConfigError(_))));
        assert!(matches!(plan(&grid(), &queries, 1.0, 0.0), Err(Error::ConfigError(_))));
    }

    #[test]
    fn empty_batch_is_complete() {
        let batch = plan(&grid(), &[], 1.0, 1.0).unwrap();
        assert!(batch.is_empty());
        assert!(batch.is_complete());
        assert_eq!(batch.total_distance, 0.0);
    }
}
