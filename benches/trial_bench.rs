use ci_rust::ci_config::STANDARD_BUDGET_MAPPINGS;
use ci_rust::{
    create_topology, prepare_network, run_trial, CompromiseTable, DegreeCentrality, ErdosRenyi,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simple_logger::SimpleLogger;
use std::time::Instant;

/// Benchmark single-trial cost per population size and budget pair
fn main() {
    // Engine trace output would land inside the timed region
    let _ = SimpleLogger::new().with_level(log::LevelFilter::Error).init();

    println!("\n=== Cyber Infiltration Trial Benchmark ===\n");

    let sizes = [50, 100, 250, 500];
    let table = CompromiseTable::default();
    let samples = 200;

    println!("{:<8} {:<12} {:>14} {:>12} {:>16}",
             "Nodes", "Budget", "Time (µs)", "Trials/s", "Mean compromised");
    println!("{}", "-".repeat(66));

    for &size in &sizes {
        let mut rng = StdRng::seed_from_u64(size as u64);
        let mut base = create_topology(&ErdosRenyi, size, 0.5, 1000, &mut rng).unwrap();
        base.annotate_centrality(&DegreeCentrality).unwrap();

        for pair in STANDARD_BUDGET_MAPPINGS {
            // Warm-up
            let mut warm = base.fresh_copy();
            let plan = prepare_network(&mut warm, pair).unwrap();
            let _ = run_trial(&mut warm, &plan, &table, &mut rng);

            let mut total_time = 0.0;
            let mut total_fraction = 0.0;

            for _ in 0..samples {
                let mut copy = base.fresh_copy();
                let start = Instant::now();
                let plan = prepare_network(&mut copy, pair).unwrap();
                let outcome = run_trial(&mut copy, &plan, &table, &mut rng);
                total_time += start.elapsed().as_secs_f64();
                total_fraction += outcome.fraction;
            }

            let avg_time_us = (total_time / samples as f64) * 1_000_000.0;
            let trials_per_sec = 1_000_000.0 / avg_time_us;

            println!("{:<8} {:<12} {:>14.2} {:>12.0} {:>16.4}",
                     size, pair.to_string(), avg_time_us, trials_per_sec,
                     total_fraction / samples as f64);
        }
    }

    println!("\n{}", "=".repeat(66));

    println!("\nStandard experiment volume:");
    let trials: usize = sizes.len() * 1000 * STANDARD_BUDGET_MAPPINGS.len();
    println!("  - {} populations × 1000 topologies × {} budget pairs = {} trials",
             sizes.len(), STANDARD_BUDGET_MAPPINGS.len(), trials);
    println!("  - Topology generation and centrality are paid once per sample, not per pair");
}
