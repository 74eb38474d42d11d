// Experiment configuration
//
// Loaded from YAML (every field optional, defaults reproduce the standard
// experiment) and validated as a whole before any topology is generated.

use crate::ci_budget::BudgetPair;
use crate::ci_error::SimError;
use crate::ci_network::{DEFAULT_EDGE_PROBABILITY, DEFAULT_MAX_GENERATION_ATTEMPTS};
use crate::ci_propagation::CompromiseTable;
use crate::ci_seed;
use serde::{Deserialize, Serialize};
use hashbrown::HashSet;

/// Standard (defense budget, attack budget) catalogue
pub const STANDARD_BUDGET_MAPPINGS: [BudgetPair; 8] = [
    BudgetPair::from_units(60, 60),
    BudgetPair::from_units(60, 100),
    BudgetPair::from_units(45, 100),
    BudgetPair::from_units(25, 100),
    BudgetPair::from_units(60, 75),
    BudgetPair::from_units(25, 75),
    BudgetPair::from_units(35, 75),
    BudgetPair::from_units(60, 50),
];

/// Standard topology-size populations
pub const STANDARD_POPULATION_SIZES: [usize; 4] = [50, 100, 250, 500];

/// Standard number of topology samples per population
pub const STANDARD_SAMPLES_PER_SIZE: usize = 1000;

/// Full configuration for one Monte Carlo experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Node count of each population
    pub population_sizes: Vec<usize>,

    /// Independent topology samples per population
    pub samples_per_size: usize,

    /// Independent-edge probability for generated topologies
    pub edge_probability: f64,

    /// Budget pairs to evaluate on every population
    pub budget_mappings: Vec<BudgetPair>,

    /// Regeneration cap per topology sample
    pub max_generation_attempts: usize,

    /// Master seed as hex (None = draw from entropy)
    #[serde(with = "seed_hex")]
    pub seed: Option<[u8; 32]>,

    /// Run trials on the rayon thread pool
    pub parallel: bool,

    /// Compromise probabilities
    pub compromise: CompromiseTable,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            population_sizes: STANDARD_POPULATION_SIZES.to_vec(),
            samples_per_size: STANDARD_SAMPLES_PER_SIZE,
            edge_probability: DEFAULT_EDGE_PROBABILITY,
            budget_mappings: STANDARD_BUDGET_MAPPINGS.to_vec(),
            max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
            seed: None,
            parallel: true,
            compromise: CompromiseTable::default(),
        }
    }
}

impl ExperimentConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SimError> {
        let config: ExperimentConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, SimError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Get or generate seed
    pub fn resolve_seed(&self) -> [u8; 32] {
        self.seed.unwrap_or_else(ci_seed::random_seed)
    }

    /// Check everything that would make the experiment ill-defined
    pub fn validate(&self) -> Result<(), SimError> {
        if self.population_sizes.is_empty() {
            return Err(SimError::Config("population_sizes is empty".to_string()));
        }
        if let Some(&size) = self.population_sizes.iter().find(|&&s| s == 0) {
            return Err(SimError::EmptyTopology { requested: size });
        }
        if self.samples_per_size == 0 {
            return Err(SimError::Config("samples_per_size must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(SimError::InvalidEdgeProbability(self.edge_probability));
        }
        if self.max_generation_attempts == 0 {
            return Err(SimError::Config(
                "max_generation_attempts must be positive".to_string(),
            ));
        }
        validate_budget_mappings(&self.budget_mappings)?;
        self.compromise.validate()
    }
}

/// Budget pairs must be present and distinct
pub fn validate_budget_mappings(mappings: &[BudgetPair]) -> Result<(), SimError> {
    if mappings.is_empty() {
        return Err(SimError::EmptyBudgetMappings);
    }

    let mut seen = HashSet::with_capacity(mappings.len());
    for pair in mappings {
        if !seen.insert(*pair) {
            return Err(SimError::DuplicateBudgetPair {
                defense: pair.defense(),
                attack: pair.attack(),
            });
        }
    }
    Ok(())
}

mod seed_hex {
    use crate::ci_seed::{parse_seed_hex, seed_to_hex};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(seed: &Option<[u8; 32]>, s: S) -> Result<S::Ok, S::Error> {
        match seed {
            Some(seed) => s.serialize_some(&seed_to_hex(seed)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<[u8; 32]>, D::Error> {
        let hex: Option<String> = Option::deserialize(d)?;
        hex.map(|h| parse_seed_hex(&h).map_err(serde::de::Error::custom))
            .transpose()
    }
}
