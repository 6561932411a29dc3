use grid_sssp::report::BatchRequest;
use std::env;
use std::process;
use std::time::Instant;

fn main() {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("usage: {} <request.json>", args[0]);
        process::exit(2);
    };

    if let Err(e) = run(path) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(path: &str) -> grid_sssp::Result<()> {
    let request = BatchRequest::load(path)?;

    let start = Instant::now();
    let report = request.run()?;
    log::info!(
        "solved {} queries on a {}x{} grid in {:?}",
        report.queries.len(),
        report.rows,
        report.cols,
        start.elapsed()
    );

    println!("{}", report.to_json_pretty()?);
    Ok(())
}
