// Shared types and the graph capabilities the simulation consumes.
//
// The engine never talks to a graph library directly. Everything structural
// goes through `Topology` (adjacency + connectivity), `GraphProvider` (random
// generation) and `CentralityOracle` (structural-importance scores), so the
// propagation rules can be driven by hand-built graphs in tests.

use rand::rngs::StdRng;

/// Stable arena index of a node inside one topology
pub type NodeId = usize;

/// Hardening units on a node (0 or 1)
pub type DefenseValue = u8;

/// Per-node attack state within one trial
///
/// Transitions only move forward: `Unattacked -> Attacked -> Compromised`.
/// A node reaches `Compromised` only through the single probabilistic
/// resolution made when it becomes `Attacked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackState {
    #[default]
    Unattacked,
    Attacked,
    Compromised,
}

impl AttackState {
    /// True for both `Attacked` and `Compromised`
    pub fn is_attacked(self) -> bool {
        !matches!(self, AttackState::Unattacked)
    }

    pub fn is_compromised(self) -> bool {
        matches!(self, AttackState::Compromised)
    }
}

/// Snapshot of one node's security state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub centrality_value: f64,
    pub defense_value: DefenseValue,
    pub attack_state: AttackState,
}

/// Read-only structure of an undirected graph over nodes `0..size()`
pub trait Topology {
    /// Number of nodes
    fn size(&self) -> usize;

    /// Number of undirected edges
    fn edge_count(&self) -> usize;

    /// Adjacent nodes, in no particular order
    fn adjacent(&self, node: NodeId) -> Vec<NodeId>;

    /// Whether every node is reachable from every other node
    fn is_connected(&self) -> bool;
}

/// Source of random topologies
///
/// Implementations only build a graph; the network model is responsible for
/// rejecting disconnected results and asking again.
pub trait GraphProvider {
    type Graph: Topology + Clone + Send + Sync;

    /// Random simple undirected graph over `node_count` nodes where each pair
    /// is joined independently with probability `edge_probability`
    fn random_graph(&self, node_count: usize, edge_probability: f64, rng: &mut StdRng)
        -> Self::Graph;
}

/// Structural-importance scoring over an arbitrary topology
pub trait CentralityOracle {
    /// One score per node, indexed by `NodeId`
    fn centrality<T: Topology>(&self, topology: &T) -> Vec<f64>;
}
