// Experiment Runner - Load and execute experiment YAML files
//
// Usage:
//   cargo run --release --bin experiment_runner scenarios/standard.yaml
//   cargo run --release --bin experiment_runner scenarios/  (runs all .yaml files in directory)
//   cargo run --release --bin experiment_runner scenarios/small.yaml --seed 0x1234...
//   cargo run --release --bin experiment_runner scenarios/small.yaml --sequential

mod experiment;

use ci_rust::ci_seed::parse_seed_hex;
use ci_rust::MonteCarloRunner;
use experiment::scenario::find_scenarios;
use experiment::{ExperimentSummary, ScenarioFile};
use log::info;
use simple_logger::SimpleLogger;
use std::env;
use std::path::Path;
use std::time::Instant;

/// Command-line overrides applied on top of every scenario
#[derive(Debug, Default)]
struct Overrides {
    seed: Option<[u8; 32]>,
    sequential: bool,
}

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
        .unwrap();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <scenario.yaml | directory/> [--seed SEED_HEX] [--sequential]", args[0]);
        eprintln!("\nExamples:");
        eprintln!("  {} scenarios/standard.yaml", args[0]);
        eprintln!("  {} scenarios/", args[0]);
        eprintln!("  {} scenarios/small.yaml --seed 0x123456...", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let overrides = parse_overrides(&args[2..]);

    if path.is_file() {
        run_scenario_file(path, &overrides);
    } else if path.is_dir() {
        run_scenario_directory(path, &overrides);
    } else {
        eprintln!("Error: Path does not exist: {}", path.display());
        std::process::exit(1);
    }
}

fn parse_overrides(args: &[String]) -> Overrides {
    let mut overrides = Overrides::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let hex = iter.next().unwrap_or_else(|| {
                    eprintln!("--seed requires a hex value");
                    std::process::exit(1);
                });
                let seed = parse_seed_hex(hex).unwrap_or_else(|e| {
                    eprintln!("{}", e);
                    std::process::exit(1);
                });
                overrides.seed = Some(seed);
            }
            "--sequential" => overrides.sequential = true,
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
    }

    overrides
}

fn run_scenario_directory(dir: &Path, overrides: &Overrides) {
    let scenarios = find_scenarios(dir);

    if scenarios.is_empty() {
        eprintln!("No .yaml files found in {}", dir.display());
        std::process::exit(1);
    }

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  EXPERIMENT RUNNER - Multiple Scenarios                ║");
    println!("╚════════════════════════════════════════════════════════╝\n");
    println!("Found {} scenario(s) to run\n", scenarios.len());

    for (i, scenario_path) in scenarios.iter().enumerate() {
        println!("\n{}/{} Running: {}\n", i + 1, scenarios.len(), scenario_path.display());
        run_scenario_file(scenario_path, overrides);
    }

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  All scenarios complete!                               ║");
    println!("╚════════════════════════════════════════════════════════╝\n");
}

fn run_scenario_file(path: &Path, overrides: &Overrides) {
    println!("Loading scenario from: {}", path.display());

    let scenario = ScenarioFile::load(path).unwrap_or_else(|e| {
        eprintln!("Failed to load {}: {}", path.display(), e);
        std::process::exit(1);
    });

    let name = scenario.display_name(path);
    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  {}{}║", name, " ".repeat(54_usize.saturating_sub(name.len())));
    println!("╚════════════════════════════════════════════════════════╝\n");

    if let Some(ref desc) = scenario.meta.description {
        println!("{}\n", desc);
    }

    if let Some(ref hypothesis) = scenario.meta.hypothesis {
        println!("Hypothesis:");
        println!("  {}\n", hypothesis);
    }

    let mut config = scenario.config;
    if overrides.seed.is_some() {
        config.seed = overrides.seed;
    }
    if overrides.sequential {
        config.parallel = false;
    }

    println!("Configuration:");
    println!("  Population sizes: {:?}", config.population_sizes);
    println!("  Samples per size: {}", config.samples_per_size);
    println!("  Edge probability: {}", config.edge_probability);
    println!("  Budget pairs: {}", config.budget_mappings.len());
    println!("  Parallel: {}", config.parallel);
    println!("\nStarting experiment...\n");

    let runner = MonteCarloRunner::standard(config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration in {}: {}", path.display(), e);
        std::process::exit(1);
    });

    let start = Instant::now();
    let report = runner.run().unwrap_or_else(|e| {
        eprintln!("Experiment failed: {}", e);
        std::process::exit(1);
    });
    info!("Experiment finished in {:?}", start.elapsed());

    ExperimentSummary::from_report(&report).print_summary();

    println!("\n✓ Scenario complete!\n");
}
