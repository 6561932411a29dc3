use serde::{Deserialize, Serialize};

use crate::grid::Graph;
use crate::Result;

/// Outcome of a single shortest-path query.
///
/// Failing to reach the target is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathResult<V> {
    /// Cheapest route found; `path` runs from source to target inclusive
    Found { distance: f64, path: Vec<V> },
    /// No directed path exists from source to target
    Unreachable,
}

impl<V> PathResult<V> {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found { .. })
    }

    pub fn distance(&self) -> Option<f64> {
        match self {
            PathResult::Found { distance, .. } => Some(*distance),
            PathResult::Unreachable => None,
        }
    }

    pub fn path(&self) -> Option<&[V]> {
        match self {
            PathResult::Found { path, .. } => Some(path),
            PathResult::Unreachable => None,
        }
    }

    /// Converts every vertex on the path, keeping the distance
    pub fn map_path<U>(self, f: impl FnMut(V) -> U) -> PathResult<U> {
        match self {
            PathResult::Found { distance, path } => PathResult::Found {
                distance,
                path: path.into_iter().map(f).collect(),
            },
            PathResult::Unreachable => PathResult::Unreachable,
        }
    }
}

/// Trait for point-to-point shortest path algorithms
pub trait ShortestPathAlgorithm {
    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Compute the cheapest path from `source` to `target`
    fn shortest_path<G>(&self, graph: &G, source: usize, target: usize) -> Result<PathResult<usize>>
    where
        G: Graph + ?Sized;

    /// Walk a predecessor table back from `target` to `source`.
    ///
    /// Returns `None` if the chain breaks or loops.
    fn get_path(&self, predecessors: &[Option<usize>], source: usize, target: usize) -> Option<Vec<usize>> {
        if target >= predecessors.len() || source >= predecessors.len() {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;

        while current != source {
            current = predecessors[current]?;
            path.push(current);

            if path.len() > predecessors.len() {
                log::warn!("predecessor chain from {} does not reach {}", target, source);
                return None;
            }
        }

        path.reverse();
        Some(path)
    }
}
