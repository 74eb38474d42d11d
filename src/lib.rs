//! # ciRust - Cyber Infiltration Monte Carlo
//!
//! Models an attacker with a fixed budget compromising a network that a
//! defender has partially hardened with a separate fixed budget, and estimates
//! the expected fraction of the network that falls by repeating the attack over
//! many random topologies.
//!
//! ## Core Components
//!
//! - **NetworkTopology**: arena of nodes with centrality, defense and attack state
//! - **Budget allocation**: defense units and opening attacks by centrality rank
//! - **Propagation engine**: direct attacks, then indirect spread along edges
//!   against an attack-budget ledger
//! - **Monte Carlo driver**: populations of topologies × budget pairs → result sets
//!
//! Graph generation, centrality and adjacency are capabilities
//! (`GraphProvider`, `CentralityOracle`, `Topology`); petgraph-backed defaults
//! live in `ci_graph`.
//!
//! ```no_run
//! use ci_rust::{ExperimentConfig, MonteCarloRunner};
//!
//! let config = ExperimentConfig {
//!     population_sizes: vec![50],
//!     samples_per_size: 100,
//!     seed: Some([42u8; 32]),
//!     ..Default::default()
//! };
//!
//! let runner = MonteCarloRunner::standard(config)?;
//! let report = runner.run()?;
//! for set in &report.result_sets {
//!     for pair in set.pairs() {
//!         println!("n={} {}: {:?}", set.node_count, pair, set.mean(pair));
//!     }
//! }
//! # Ok::<(), ci_rust::SimError>(())
//! ```
//!
//! ## Running Experiments
//!
//! The `experiment_runner` binary in `simulator/` loads experiments from YAML
//! files and prints a summary per population and budget pair.

// Core model
pub mod ci_interface;
pub mod ci_error;
pub mod ci_network;
pub mod ci_budget;
pub mod ci_propagation;

// Experiment driver
pub mod ci_seed;
pub mod ci_config;
pub mod ci_monte_carlo;

// Default graph capabilities
pub mod ci_graph;

// Re-export commonly used types
pub use ci_budget::{
    allocate_defense, allocate_initial_attack, direct_attack_budget, prepare_network,
    AttackPlan, BudgetPair,
};
pub use ci_config::ExperimentConfig;
pub use ci_error::SimError;
pub use ci_graph::{DegreeCentrality, ErdosRenyi, NetworkGraph};
pub use ci_interface::{
    AttackState, CentralityOracle, GraphProvider, Node, NodeId, Topology,
};
pub use ci_monte_carlo::{
    build_experiment, centrality_trial, generate_population, run_trials, ExperimentReport,
    ExperimentResultSet, MonteCarloRunner, Population, Trial,
};
pub use ci_network::{create_topology, NetworkTopology};
pub use ci_propagation::{run_trial, AttackLedger, CompromiseTable, TrialOutcome};
