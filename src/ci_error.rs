//! Errors surfaced while setting up an experiment
//!
//! Running out of attack budget or targets during a trial is a normal
//! termination path and never produces one of these.

/// Setup-time failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// A defense or attack budget below zero
    #[error("Invalid budget pair (defense={defense}, attack={attack}): budgets must be non-negative")]
    InvalidBudget { defense: i64, attack: i64 },

    /// Requested node count of zero
    #[error("Cannot build a topology with {requested} nodes")]
    EmptyTopology { requested: usize },

    /// Edge probability outside [0, 1] or not a number
    #[error("Edge probability {0} is outside [0, 1]")]
    InvalidEdgeProbability(f64),

    /// Generation never produced a connected graph within the attempt cap
    #[error(
        "No connected graph after {attempts} attempts (n={node_count}, p={edge_probability})"
    )]
    NonConvergentGeneration {
        node_count: usize,
        edge_probability: f64,
        attempts: usize,
    },

    /// Centrality was written to this topology before
    #[error("Centrality has already been assigned to this topology")]
    CentralityAlreadyAssigned,

    /// Ranking requested before centrality was assigned
    #[error("Centrality has not been assigned to this topology")]
    CentralityMissing,

    /// Oracle returned the wrong number of scores
    #[error("Centrality oracle returned {actual} scores for {expected} nodes")]
    CentralityLengthMismatch { expected: usize, actual: usize },

    /// The same (defense, attack) pair appears twice in one experiment
    #[error("Budget pair (defense={defense}, attack={attack}) is listed more than once")]
    DuplicateBudgetPair { defense: u32, attack: u32 },

    /// An experiment with no budget pairs would produce an empty result
    #[error("Experiment has no budget mappings")]
    EmptyBudgetMappings,

    /// Malformed configuration input
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for SimError {
    fn from(e: serde_yaml::Error) -> Self {
        SimError::Config(e.to_string())
    }
}
