use std::time::{Duration, Instant};

use grid_sssp::grid::generators::{random_pairs, random_terrain, with_soft_obstacles};
use grid_sssp::{BatchPlanner, CostGrid, Multipliers, Query};

// Function to benchmark one planner configuration on a grid
fn benchmark_planner(name: &str, planner: &BatchPlanner, grid: &CostGrid, queries: &[Query]) -> Duration {
    println!(
        "Running {} on {}x{} grid with {} queries...",
        name,
        grid.rows(),
        grid.cols(),
        queries.len()
    );

    let start = Instant::now();
    let batch = match planner.plan(grid, queries) {
        Ok(batch) => batch,
        Err(e) => {
            println!("  - failed: {}", e);
            return Duration::ZERO;
        }
    };
    let duration = start.elapsed();

    println!(
        "  - {} found, total distance {:.1} in {:?}",
        batch.found_count(),
        batch.total_distance,
        duration
    );

    duration
}

fn main() {
    env_logger::init();

    // Define grid sizes to test
    let grid_sizes = vec![64, 128, 256, 512];
    let query_count = 64;

    println!("=====================================================");
    println!("Benchmark: sequential vs parallel batches");
    println!("Queries per batch: {}", query_count);
    println!("=====================================================");

    let multipliers = Multipliers::euclidean(1.0).unwrap_or_default();
    let sequential = BatchPlanner::new().with_multipliers(multipliers);
    let parallel = BatchPlanner::new().with_multipliers(multipliers).with_parallel(true);

    let mut results = Vec::new();

    for (i, &size) in grid_sizes.iter().enumerate() {
        let seed = 1000 + i as u64;
        let grid = match random_terrain(size, size, 1.0, 100.0, seed)
            .and_then(|terrain| with_soft_obstacles(&terrain, 0.1, &[], seed))
        {
            Ok(grid) => grid,
            Err(e) => {
                println!("Skipping {}x{}: {}", size, size, e);
                continue;
            }
        };
        let queries: Vec<Query> = random_pairs(&grid, query_count, seed)
            .into_iter()
            .map(|(s, e)| Query::new(s, e))
            .collect();

        let seq_time = benchmark_planner("sequential", &sequential, &grid, &queries);
        let par_time = benchmark_planner("parallel", &parallel, &grid, &queries);
        results.push((size, seq_time, par_time));
        println!();
    }

    println!("=====================================================");
    println!("Summary");
    println!("=====================================================");
    println!("{:<10} | {:<15} | {:<15} | {:<10}", "Size", "Sequential (ms)", "Parallel (ms)", "Speedup");
    println!("-----------------------------------------------------");
    for (size, seq, par) in &results {
        let speedup = seq.as_secs_f64() / par.as_secs_f64().max(f64::EPSILON);
        println!(
            "{:<10} | {:<15.2} | {:<15.2} | {:<10.2}",
            size,
            seq.as_secs_f64() * 1000.0,
            par.as_secs_f64() * 1000.0,
            speedup
        );
    }
}
