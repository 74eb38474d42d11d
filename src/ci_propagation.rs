// Attack propagation engine: executes one trial on a prepared topology
//
// Direct phase: every planned target is resolved once (70% if defended, 90%
// otherwise) and the ledger is charged the opening-wave budget.
//
// Spread phase: nodes are taken from the tail of the attack queue. A
// compromised node attacks each not-yet-attacked neighbor, highest centrality
// first, for 0.5 budget each, resolving the outcome with the joint-defense
// table. Attacks stop being issued as soon as the ledger is empty or no
// uncompromised node remains.

use crate::ci_budget::AttackPlan;
use crate::ci_error::SimError;
use crate::ci_interface::{DefenseValue, NodeId, Topology};
use crate::ci_network::NetworkTopology;
use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ledger cost of one direct attack
pub const DIRECT_ATTACK_COST: f64 = 1.0;

/// Ledger cost of one indirect attack
pub const INDIRECT_ATTACK_COST: f64 = 0.5;

/// Compromise probabilities for direct and indirect attacks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompromiseTable {
    /// Direct attack on a defended node
    pub direct_defended: f64,
    /// Direct attack on an undefended node (inherent defense only)
    pub direct_undefended: f64,
    /// Undefended attacker, defended target
    pub undefended_to_defended: f64,
    /// Defended attacker, undefended target
    pub defended_to_undefended: f64,
    /// Both defended
    pub defended_to_defended: f64,
    /// Neither defended
    pub undefended_to_undefended: f64,
}

impl Default for CompromiseTable {
    fn default() -> Self {
        Self {
            direct_defended: 0.70,
            direct_undefended: 0.90,
            undefended_to_defended: 0.50,
            defended_to_undefended: 0.75,
            defended_to_defended: 0.25,
            undefended_to_undefended: 0.90,
        }
    }
}

impl CompromiseTable {
    /// Same probability for every attack
    pub fn uniform(p: f64) -> Self {
        Self {
            direct_defended: p,
            direct_undefended: p,
            undefended_to_defended: p,
            defended_to_undefended: p,
            defended_to_defended: p,
            undefended_to_undefended: p,
        }
    }

    pub fn direct(&self, target: DefenseValue) -> f64 {
        if target > 0 {
            self.direct_defended
        } else {
            self.direct_undefended
        }
    }

    pub fn indirect(&self, attacker: DefenseValue, target: DefenseValue) -> f64 {
        match (attacker > 0, target > 0) {
            (false, true) => self.undefended_to_defended,
            (true, false) => self.defended_to_undefended,
            (true, true) => self.defended_to_defended,
            (false, false) => self.undefended_to_undefended,
        }
    }

    /// Every probability must lie in [0, 1]
    pub fn validate(&self) -> Result<(), SimError> {
        let entries = [
            ("direct_defended", self.direct_defended),
            ("direct_undefended", self.direct_undefended),
            ("undefended_to_defended", self.undefended_to_defended),
            ("defended_to_undefended", self.defended_to_undefended),
            ("defended_to_defended", self.defended_to_defended),
            ("undefended_to_undefended", self.undefended_to_undefended),
        ];
        for (name, p) in entries {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::Config(format!(
                    "compromise probability {} = {} is outside [0, 1]",
                    name, p
                )));
            }
        }
        Ok(())
    }
}

/// Remaining attack budget during one trial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackLedger {
    remaining: f64,
}

impl AttackLedger {
    pub fn new(budget: f64) -> Self {
        Self { remaining: budget }
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    pub fn has_budget(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn charge(&mut self, cost: f64) {
        self.remaining -= cost;
    }
}

/// Result of one trial
#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    pub node_count: usize,
    pub compromised: usize,
    pub direct_attacks: usize,
    pub indirect_attacks: usize,
    pub ledger_remaining: f64,
    /// `compromised / node_count`
    pub fraction: f64,
}

/// Mutable bookkeeping for the continuation predicate
struct TrialState {
    ledger: AttackLedger,
    uncompromised: usize,
}

impl TrialState {
    fn continues(&self) -> bool {
        self.ledger.has_budget() && self.uncompromised > 0
    }
}

fn resolve<G: Topology, R: Rng>(
    topology: &mut NetworkTopology<G>,
    state: &mut TrialState,
    node: NodeId,
    p: f64,
    rng: &mut R,
) -> bool {
    if rng.gen::<f64>() < p && topology.mark_compromised(node) {
        state.uncompromised -= 1;
        return true;
    }
    false
}

/// Run one trial on a topology prepared by `prepare_network`
pub fn run_trial<G: Topology, R: Rng>(
    topology: &mut NetworkTopology<G>,
    plan: &AttackPlan,
    table: &CompromiseTable,
    rng: &mut R,
) -> TrialOutcome {
    let node_count = topology.len();
    let mut state = TrialState {
        ledger: AttackLedger::new(plan.attack_budget as f64),
        uncompromised: node_count - topology.compromised_count(),
    };

    // Direct phase
    let mut queue: Vec<NodeId> = Vec::with_capacity(node_count);
    for &target in &plan.targets {
        let p = table.direct(topology.defense(target));
        resolve(topology, &mut state, target, p, rng);
        queue.push(target);
    }
    state
        .ledger
        .charge(plan.direct_budget as f64 * DIRECT_ATTACK_COST);

    // Spread phase
    let mut indirect_attacks = 0;
    while state.continues() {
        let Some(current) = queue.pop() else {
            break;
        };
        if !topology.state(current).is_compromised() {
            continue;
        }

        let attacker_defense = topology.defense(current);
        for target in topology.neighbors_by_centrality(current) {
            if !state.continues() {
                break;
            }
            if !topology.mark_attacked(target) {
                continue;
            }

            queue.push(target);
            state.ledger.charge(INDIRECT_ATTACK_COST);
            indirect_attacks += 1;

            let p = table.indirect(attacker_defense, topology.defense(target));
            let compromised = resolve(topology, &mut state, target, p, rng);
            trace!(
                "indirect {} -> {} p={} compromised={} ledger={}",
                current,
                target,
                p,
                compromised,
                state.ledger.remaining()
            );
        }
    }

    let compromised = topology.compromised_count();
    TrialOutcome {
        node_count,
        compromised,
        direct_attacks: plan.targets.len(),
        indirect_attacks,
        ledger_remaining: state.ledger.remaining(),
        fraction: compromised as f64 / node_count as f64,
    }
}
