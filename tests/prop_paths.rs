//! Property-based tests for grid searches using proptest.
//!
//! Covers: agreement with a brute-force relaxation, path validity,
//! determinism, monotonicity under cost increases, batch independence.

use grid_sssp::grid::Graph;
use grid_sssp::{plan, Cell, CostGrid, Dijkstra, GridGraph, Multipliers, Query};
use proptest::prelude::*;

/// Bellman-Ford style relaxation until nothing changes
fn reference_distance(graph: &GridGraph<'_>, source: usize, target: usize) -> f64 {
    let n = graph.vertex_count();
    let mut dist = vec![f64::INFINITY; n];
    dist[source] = 0.0;
    loop {
        let mut changed = false;
        for u in 0..n {
            if !dist[u].is_finite() {
                continue;
            }
            for (v, w) in graph.outgoing_edges(u) {
                if dist[u] + w < dist[v] {
                    dist[v] = dist[u] + w;
                    changed = true;
                }
            }
        }
        if !changed {
            return dist[target];
        }
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

prop_compose! {
    fn arb_grid()(rows in 1usize..7, cols in 1usize..7)
        (costs in prop::collection::vec(0.5f64..100.0, rows * cols), rows in Just(rows), cols in Just(cols))
        -> CostGrid {
        CostGrid::from_flat(rows, cols, costs).unwrap()
    }
}

prop_compose! {
    fn arb_case()(grid in arb_grid())
        (sr in 0..grid.rows(), sc in 0..grid.cols(), er in 0..grid.rows(), ec in 0..grid.cols(), grid in Just(grid))
        -> (CostGrid, Cell, Cell) {
        (grid, Cell::new(sr, sc), Cell::new(er, ec))
    }
}

fn arb_multipliers() -> impl Strategy<Value = Multipliers> {
    (0.1f64..3.0, 0.1f64..3.0).prop_map(|(o, d)| Multipliers::new(o, d).unwrap())
}

proptest! {
    /// Found distances match exhaustive relaxation and are never negative.
    #[test]
    fn matches_reference((grid, start, end) in arb_case(), m in arb_multipliers()) {
        let graph = GridGraph::new(&grid, m);
        let result = Dijkstra::new().search(&graph, start, end).unwrap();
        let distance = result.distance().unwrap();
        let source = grid.index_of(start).unwrap();
        let target = grid.index_of(end).unwrap();

        prop_assert!(distance >= 0.0);
        prop_assert!(close(distance, reference_distance(&graph, source, target)));
    }

    /// Paths start and end where asked, step between neighbours and cost
    /// exactly the reported distance.
    #[test]
    fn paths_are_valid((grid, start, end) in arb_case(), m in arb_multipliers()) {
        let graph = GridGraph::new(&grid, m);
        let result = Dijkstra::new().search(&graph, start, end).unwrap();
        let path = result.path().unwrap();

        prop_assert_eq!(path.first(), Some(&start));
        prop_assert_eq!(path.last(), Some(&end));
        for pair in path.windows(2) {
            prop_assert!(pair[0].is_adjacent(pair[1]));
        }
        let weight = graph.path_weight(path).unwrap();
        prop_assert!(close(weight, result.distance().unwrap()));
        if start == end {
            prop_assert_eq!(path.len(), 1);
            prop_assert_eq!(result.distance(), Some(0.0));
        }
    }

    /// Same grid and query, same bits.
    #[test]
    fn searches_are_deterministic((grid, start, end) in arb_case()) {
        let graph = GridGraph::new(&grid, Multipliers::default());
        let a = Dijkstra::new().search(&graph, start, end).unwrap();
        let b = Dijkstra::new().search(&graph, start, end).unwrap();
        prop_assert_eq!(a.path(), b.path());
        prop_assert_eq!(a.distance().map(f64::to_bits), b.distance().map(f64::to_bits));
    }

    /// Raising one cell's cost never makes any route cheaper.
    #[test]
    fn raising_a_cost_never_helps(
        (grid, start, end) in arb_case(),
        pick in any::<prop::sample::Index>(),
        extra in 0.1f64..500.0,
    ) {
        let cell = grid.cell_at(pick.index(grid.len()));
        let raised = grid.with_cost(cell, grid.cost(cell).unwrap() + extra).unwrap();

        let before = Dijkstra::new()
            .search(&GridGraph::new(&grid, Multipliers::default()), start, end)
            .unwrap();
        let after = Dijkstra::new()
            .search(&GridGraph::new(&raised, Multipliers::default()), start, end)
            .unwrap();

        let (before, after) = (before.distance().unwrap(), after.distance().unwrap());
        prop_assert!(after >= before - 1e-9 * before.max(1.0));
    }

    /// A query's result does not depend on the rest of the batch.
    #[test]
    fn batch_entries_are_independent(
        (grid, start, end) in arb_case(),
        extra in prop::collection::vec((0usize..10, 0usize..10, 0usize..10, 0usize..10), 0..4),
    ) {
        let mut queries = vec![Query::new(start, end)];
        queries.extend(extra.into_iter().map(|(a, b, c, d)| Query::new((a, b), (c, d))));

        let alone = plan(&grid, &queries[..1], 1.0, 1.4).unwrap();
        let batch = plan(&grid, &queries, 1.0, 1.4).unwrap();

        prop_assert_eq!(batch.len(), queries.len());
        prop_assert_eq!(batch.results[0].as_ref().unwrap(), alone.results[0].as_ref().unwrap());
    }
}
