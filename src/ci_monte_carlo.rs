// Monte Carlo orchestration
//
// 1. Generate populations: `samples_per_size` connected, centrality-annotated
//    topologies per node count, each from its own seeded stream.
// 2. For every budget pair, copy every base topology, allocate budgets on the
//    copy and run one trial on it.
// 3. Collect the compromised fraction of every trial under its budget pair.
//
// Trials share nothing mutable. Each owns its topology copy and draws from an
// RNG derived from (master seed, population, budget pair, sample), so
// parallel and sequential runs produce identical result sets.

use crate::ci_budget::{prepare_network, AttackPlan, BudgetPair};
use crate::ci_config::{validate_budget_mappings, ExperimentConfig};
use crate::ci_error::SimError;
use crate::ci_graph::{DegreeCentrality, ErdosRenyi};
use crate::ci_interface::{CentralityOracle, GraphProvider, Topology};
use crate::ci_network::{create_topology, NetworkTopology};
use crate::ci_propagation::{run_trial, CompromiseTable};
use crate::ci_seed::{derive_seed, stream_rng, TOPOLOGY_CONTEXT, TRIAL_CONTEXT};
use indexmap::IndexMap;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// Topologies copied and prepared at a time while running one budget pair
const TRIAL_BATCH: usize = 64;

/// Base topologies of one node count
#[derive(Debug, Clone)]
pub struct Population<G> {
    pub node_count: usize,
    pub topologies: Vec<NetworkTopology<G>>,
}

/// One prepared trial: its own topology copy, attack plan and random stream
pub struct Trial<G> {
    pub topology: NetworkTopology<G>,
    pub plan: AttackPlan,
    pub rng: StdRng,
}

/// Compromised fractions per budget pair for one population
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentResultSet {
    pub node_count: usize,
    /// In budget-catalogue order; one entry per topology sample
    pub results: IndexMap<BudgetPair, Vec<f64>>,
}

impl ExperimentResultSet {
    pub fn get(&self, pair: &BudgetPair) -> Option<&[f64]> {
        self.results.get(pair).map(Vec::as_slice)
    }

    /// Mean compromised fraction for a pair
    pub fn mean(&self, pair: &BudgetPair) -> Option<f64> {
        let fractions = self.get(pair)?;
        if fractions.is_empty() {
            return None;
        }
        Some(fractions.iter().sum::<f64>() / fractions.len() as f64)
    }

    pub fn pairs(&self) -> impl Iterator<Item = &BudgetPair> {
        self.results.keys()
    }
}

/// Result of a full experiment run
#[derive(Debug, Clone)]
pub struct ExperimentReport {
    pub seed_used: [u8; 32],
    pub result_sets: Vec<ExperimentResultSet>,
}

/// Trial function that attacks and defends by centrality rank
pub fn centrality_trial<G: Topology>(
    table: CompromiseTable,
) -> impl Fn(&mut NetworkTopology<G>, &AttackPlan, &mut StdRng) -> f64 + Sync {
    move |topology: &mut NetworkTopology<G>, plan: &AttackPlan, rng: &mut StdRng| {
        run_trial(topology, plan, &table, rng).fraction
    }
}

/// Generate `config.samples_per_size` connected, centrality-annotated
/// topologies of one size
///
/// Edge probability, attempt cap and threading come from `config`. Sample `i`
/// draws from the stream (`population_index`, `i`) of `master_seed`.
pub fn generate_population<P, C>(
    provider: &P,
    oracle: &C,
    config: &ExperimentConfig,
    node_count: usize,
    population_index: usize,
    master_seed: &[u8; 32],
) -> Result<Population<P::Graph>, SimError>
where
    P: GraphProvider + Sync,
    C: CentralityOracle + Sync,
{
    let edge_probability = config.edge_probability;
    let max_attempts = config.max_generation_attempts;
    let make = |sample: usize| -> Result<NetworkTopology<P::Graph>, SimError> {
        let mut rng = stream_rng(
            master_seed,
            TOPOLOGY_CONTEXT,
            &[population_index as u64, sample as u64],
        );
        let mut topology =
            create_topology(provider, node_count, edge_probability, max_attempts, &mut rng)?;
        topology.annotate_centrality(oracle)?;
        Ok(topology)
    };

    let samples = config.samples_per_size;
    let topologies: Result<Vec<_>, SimError> = if config.parallel {
        (0..samples).into_par_iter().map(make).collect()
    } else {
        (0..samples).map(make).collect()
    };

    let topologies = topologies?;
    info!(
        "Generated population n={} ({} topologies, p={})",
        node_count,
        topologies.len(),
        edge_probability
    );

    Ok(Population {
        node_count,
        topologies,
    })
}

/// Apply `trial_fn` once per trial; output order mirrors input order
pub fn run_trials<G, F>(trials: Vec<Trial<G>>, trial_fn: &F, parallel: bool) -> Vec<f64>
where
    G: Topology + Send,
    F: Fn(&mut NetworkTopology<G>, &AttackPlan, &mut StdRng) -> f64 + Sync,
{
    let run = |mut trial: Trial<G>| trial_fn(&mut trial.topology, &trial.plan, &mut trial.rng);

    if parallel {
        trials.into_par_iter().map(run).collect()
    } else {
        trials.into_iter().map(run).collect()
    }
}

/// Run every budget pair against fresh copies of every base topology
///
/// All inputs are validated before the first trial; a rejected configuration
/// produces no partial result.
pub fn build_experiment<G, F>(
    populations: &[Population<G>],
    budget_mappings: &[BudgetPair],
    master_seed: &[u8; 32],
    trial_fn: &F,
    parallel: bool,
) -> Result<Vec<ExperimentResultSet>, SimError>
where
    G: Topology + Clone + Send + Sync,
    F: Fn(&mut NetworkTopology<G>, &AttackPlan, &mut StdRng) -> f64 + Sync,
{
    validate_budget_mappings(budget_mappings)?;
    for population in populations {
        if population.topologies.iter().any(|t| !t.has_centrality()) {
            return Err(SimError::CentralityMissing);
        }
    }

    let mut result_sets = Vec::with_capacity(populations.len());

    for (population_index, population) in populations.iter().enumerate() {
        let mut results = IndexMap::with_capacity(budget_mappings.len());

        for (pair_index, &pair) in budget_mappings.iter().enumerate() {
            let mut fractions = Vec::with_capacity(population.topologies.len());

            for (batch_index, batch) in population.topologies.chunks(TRIAL_BATCH).enumerate() {
                let mut trials = Vec::with_capacity(batch.len());
                for (offset, base) in batch.iter().enumerate() {
                    let sample = batch_index * TRIAL_BATCH + offset;
                    let mut topology = base.fresh_copy();
                    let plan = prepare_network(&mut topology, pair)?;
                    let seed = derive_seed(
                        master_seed,
                        TRIAL_CONTEXT,
                        &[population_index as u64, pair_index as u64, sample as u64],
                    );
                    trials.push(Trial {
                        topology,
                        plan,
                        rng: StdRng::from_seed(seed),
                    });
                }
                fractions.extend(run_trials(trials, trial_fn, parallel));
            }

            debug!(
                "n={} budget {}: {} trials",
                population.node_count,
                pair,
                fractions.len()
            );
            results.insert(pair, fractions);
        }

        let result_set = ExperimentResultSet {
            node_count: population.node_count,
            results,
        };
        for pair in budget_mappings {
            if let Some(mean) = result_set.mean(pair) {
                info!(
                    "n={} budget {}: mean compromised fraction {:.4}",
                    result_set.node_count, pair, mean
                );
            }
        }
        result_sets.push(result_set);
    }

    Ok(result_sets)
}

/// Runs a configured experiment end to end
pub struct MonteCarloRunner<P, C> {
    config: ExperimentConfig,
    provider: P,
    oracle: C,
    seed: [u8; 32],
}

impl MonteCarloRunner<ErdosRenyi, DegreeCentrality> {
    /// Erdős–Rényi topologies ranked by degree centrality
    pub fn standard(config: ExperimentConfig) -> Result<Self, SimError> {
        Self::new(config, ErdosRenyi, DegreeCentrality)
    }
}

impl<P, C> MonteCarloRunner<P, C>
where
    P: GraphProvider + Sync,
    C: CentralityOracle + Sync,
{
    pub fn new(config: ExperimentConfig, provider: P, oracle: C) -> Result<Self, SimError> {
        config.validate()?;
        let seed = config.resolve_seed();
        Ok(Self {
            config,
            provider,
            oracle,
            seed,
        })
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn seed(&self) -> [u8; 32] {
        self.seed
    }

    /// Base topologies for every configured population size
    pub fn generate_populations(&self) -> Result<Vec<Population<P::Graph>>, SimError> {
        self.config
            .population_sizes
            .iter()
            .enumerate()
            .map(|(index, &node_count)| {
                generate_population(
                    &self.provider,
                    &self.oracle,
                    &self.config,
                    node_count,
                    index,
                    &self.seed,
                )
            })
            .collect()
    }

    /// Run the configured budget catalogue on existing base topologies
    pub fn run_on(&self, populations: &[Population<P::Graph>]) -> Result<ExperimentReport, SimError> {
        let trial_fn = centrality_trial(self.config.compromise);
        let result_sets = build_experiment(
            populations,
            &self.config.budget_mappings,
            &self.seed,
            &trial_fn,
            self.config.parallel,
        )?;

        Ok(ExperimentReport {
            seed_used: self.seed,
            result_sets,
        })
    }

    /// Generate populations and run the full experiment
    pub fn run(&self) -> Result<ExperimentReport, SimError> {
        info!(
            "Starting experiment: sizes={:?}, samples={}, {} budget pairs",
            self.config.population_sizes,
            self.config.samples_per_size,
            self.config.budget_mappings.len()
        );
        let populations = self.generate_populations()?;
        self.run_on(&populations)
    }
}
