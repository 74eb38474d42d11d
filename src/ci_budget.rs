// Budget allocation by structural importance
//
// Runs once per topology copy, before any trial:
// 1. Defense units go to the highest-centrality nodes (1 unit = 1 budget).
// 2. 5% of the attack budget (rounded up) selects the opening targets.
//
// The opening-wave size is computed once here and carried in `AttackPlan`, so
// the propagation engine charges the ledger with exactly the value that chose
// the targets.

use crate::ci_error::SimError;
use crate::ci_interface::{NodeId, Topology};
use crate::ci_network::NetworkTopology;
use serde::{Deserialize, Serialize};

/// One twentieth (5%) of the attack budget funds the direct attacks
const DIRECT_ATTACK_DIVISOR: u32 = 20;

/// Validated (defense budget, attack budget) configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawBudgetPair", into = "RawBudgetPair")]
pub struct BudgetPair {
    defense: u32,
    attack: u32,
}

/// Budget pair as written in configuration files: `[60, 100]` or
/// `{ defense_budget: 60, attack_budget: 100 }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawBudgetPair {
    Tuple(i64, i64),
    Named { defense_budget: i64, attack_budget: i64 },
}

impl TryFrom<RawBudgetPair> for BudgetPair {
    type Error = SimError;

    fn try_from(raw: RawBudgetPair) -> Result<Self, Self::Error> {
        match raw {
            RawBudgetPair::Tuple(defense, attack) => BudgetPair::new(defense, attack),
            RawBudgetPair::Named {
                defense_budget,
                attack_budget,
            } => BudgetPair::new(defense_budget, attack_budget),
        }
    }
}

impl From<BudgetPair> for RawBudgetPair {
    fn from(pair: BudgetPair) -> Self {
        RawBudgetPair::Named {
            defense_budget: pair.defense as i64,
            attack_budget: pair.attack as i64,
        }
    }
}

impl BudgetPair {
    /// Reject negative (or unrepresentably large) budgets
    pub fn new(defense: i64, attack: i64) -> Result<Self, SimError> {
        match (u32::try_from(defense), u32::try_from(attack)) {
            (Ok(d), Ok(a)) => Ok(Self {
                defense: d,
                attack: a,
            }),
            _ => Err(SimError::InvalidBudget { defense, attack }),
        }
    }

    pub const fn from_units(defense: u32, attack: u32) -> Self {
        Self { defense, attack }
    }

    pub fn defense(&self) -> u32 {
        self.defense
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }
}

impl std::fmt::Display for BudgetPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.defense, self.attack)
    }
}

/// Outcome of attack allocation, consumed by the propagation engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackPlan {
    /// Full attack budget for the trial
    pub attack_budget: u32,

    /// `ceil(0.05 * attack_budget)`, charged to the ledger up front
    pub direct_budget: u32,

    /// Directly attacked nodes, highest centrality first
    pub targets: Vec<NodeId>,
}

/// Number of nodes in the opening wave: `ceil(0.05 * attack_budget)`
pub fn direct_attack_budget(attack_budget: u32) -> u32 {
    attack_budget.div_ceil(DIRECT_ATTACK_DIVISOR)
}

/// Harden the top `min(defense_budget, n)` ranked nodes; everyone else gets 0
///
/// Returns the number of defended nodes.
pub fn allocate_defense<G: Topology>(
    topology: &mut NetworkTopology<G>,
    ranked: &[NodeId],
    defense_budget: u32,
) -> usize {
    topology.clear_defense();

    let count = (defense_budget as usize).min(ranked.len());
    for &id in &ranked[..count] {
        topology.set_defense(id, 1);
    }
    count
}

/// Mark the top `direct_attack_budget(attack_budget)` ranked nodes `Attacked`
///
/// The number of targets is capped at the node count; the plan still records
/// the uncapped direct budget for the ledger.
pub fn allocate_initial_attack<G: Topology>(
    topology: &mut NetworkTopology<G>,
    ranked: &[NodeId],
    attack_budget: u32,
) -> AttackPlan {
    let direct_budget = direct_attack_budget(attack_budget);
    let count = (direct_budget as usize).min(ranked.len());

    let mut targets = Vec::with_capacity(count);
    for &id in &ranked[..count] {
        if topology.mark_attacked(id) {
            targets.push(id);
        }
    }

    AttackPlan {
        attack_budget,
        direct_budget,
        targets,
    }
}

/// Rank, defend and target a fresh topology copy for one budget pair
pub fn prepare_network<G: Topology>(
    topology: &mut NetworkTopology<G>,
    budget: BudgetPair,
) -> Result<AttackPlan, SimError> {
    let ranked = topology.rank_by_centrality()?;
    allocate_defense(topology, &ranked, budget.defense());
    Ok(allocate_initial_attack(topology, &ranked, budget.attack()))
}
