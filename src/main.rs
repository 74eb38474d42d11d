use log::info;
use simple_logger::SimpleLogger;

use ci_rust::ci_seed::seed_to_hex;
use ci_rust::{ExperimentConfig, MonteCarloRunner};

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
        .unwrap();

    info!("starting");

    // Standard experiment: 4 populations × 1000 topologies × 8 budget pairs
    let config = ExperimentConfig::default();

    let runner = MonteCarloRunner::standard(config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });
    info!("seed = 0x{}", seed_to_hex(&runner.seed()));

    let report = runner.run().unwrap_or_else(|e| {
        eprintln!("Experiment failed: {}", e);
        std::process::exit(1);
    });

    for set in &report.result_sets {
        for pair in set.pairs() {
            if let Some(mean) = set.mean(pair) {
                info!(
                    "n={:>4} (defense, attack)={:<10} mean fraction compromised {:.4}",
                    set.node_count,
                    pair.to_string(),
                    mean
                );
            }
        }
    }

    info!("let seed = 0x{};", seed_to_hex(&report.seed_used));
}
