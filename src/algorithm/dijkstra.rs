use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::algorithm::{PathResult, ShortestPathAlgorithm};
use crate::data_structures::Frontier;
use crate::grid::{Cell, Graph, GridGraph};
use crate::{Error, Result};

/// Counters collected during one search
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Vertices whose distance became final
    pub settled: usize,
    /// Frontier entries discarded because a shorter distance was known
    pub stale: usize,
    pub pushed: u64,
}

/// Classic Dijkstra's algorithm, stopping as soon as the target is settled.
///
/// Each call allocates its own distance, predecessor and frontier state, so
/// one instance can serve many queries, including concurrently.
#[derive(Debug, Default, Clone)]
pub struct Dijkstra {
    cancel: Option<Arc<AtomicBool>>,
}

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra { cancel: None }
    }

    /// Searches stop with [`Error::Cancelled`] once `flag` is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Cheapest route between two grid cells.
    ///
    /// Both cells must lie inside the grid; otherwise this fails with
    /// [`Error::OutOfBounds`] rather than reporting `Unreachable`.
    pub fn search(&self, graph: &GridGraph<'_>, start: Cell, end: Cell) -> Result<PathResult<Cell>> {
        let grid = graph.grid();
        let source = grid.check(start)?;
        let target = grid.check(end)?;

        let result = self.shortest_path(graph, source, target)?;
        Ok(result.map_path(|v| grid.cell_at(v)))
    }

    /// Like [`ShortestPathAlgorithm::shortest_path`], also returning counters
    pub fn search_with_stats<G>(
        &self,
        graph: &G,
        source: usize,
        target: usize,
    ) -> Result<(PathResult<usize>, SearchStats)>
    where
        G: Graph + ?Sized,
    {
        for vertex in [source, target] {
            if !graph.has_vertex(vertex) {
                return Err(Error::InvalidVertex(vertex));
            }
        }

        let mut stats = SearchStats::default();
        if source == target {
            return Ok((
                PathResult::Found {
                    distance: 0.0,
                    path: vec![source],
                },
                stats,
            ));
        }

        let n = graph.vertex_count();
        let mut distances: Vec<Option<f64>> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        let mut settled = vec![false; n];

        distances[source] = Some(0.0);
        let mut frontier = Frontier::new();
        frontier.push(source, 0.0);

        while let Some((u, dist_u)) = frontier.pop() {
            // A shorter route to u was recorded after this entry was pushed
            if settled[u] || distances[u].is_some_and(|d| d < dist_u) {
                stats.stale += 1;
                continue;
            }
            if self.cancelled() {
                return Err(Error::Cancelled);
            }

            settled[u] = true;
            stats.settled += 1;

            if u == target {
                stats.pushed = frontier.pushed();
                let path = self.get_path(&predecessors, source, target).ok_or_else(|| {
                    Error::AlgorithmError(format!("broken predecessor chain to vertex {}", target))
                })?;
                return Ok((
                    PathResult::Found {
                        distance: dist_u,
                        path,
                    },
                    stats,
                ));
            }

            for (v, weight) in graph.outgoing_edges(u) {
                if v >= n {
                    return Err(Error::InvalidVertex(v));
                }
                if !weight.is_finite() {
                    return Err(Error::NonFiniteWeight(weight));
                }
                if weight < 0.0 {
                    return Err(Error::NegativeWeight(weight));
                }
                if settled[v] {
                    continue;
                }

                let new_dist = dist_u + weight;
                if distances[v].map_or(true, |current| new_dist < current) {
                    distances[v] = Some(new_dist);
                    predecessors[v] = Some(u);
                    frontier.push(v, new_dist);
                }
            }
        }

        stats.pushed = frontier.pushed();
        Ok((PathResult::Unreachable, stats))
    }
}

impl ShortestPathAlgorithm for Dijkstra {
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn shortest_path<G>(&self, graph: &G, source: usize, target: usize) -> Result<PathResult<usize>>
    where
        G: Graph + ?Sized,
    {
        let (result, stats) = self.search_with_stats(graph, source, target)?;
        log::trace!(
            "{} {} -> {}: settled {}, stale {}, pushed {}",
            self.name(),
            source,
            target,
            stats.settled,
            stats.stale,
            stats.pushed
        );
        Ok(result)
    }
}
