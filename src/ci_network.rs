// Network model: a topology plus per-node security state
//
// Nodes live in an arena addressed by `NodeId`. Centrality, defense and attack
// state are parallel vectors, so cloning a topology is a full deep copy and
// no state is shared between a base topology and its per-experiment copies.

use crate::ci_error::SimError;
use crate::ci_interface::{
    AttackState, CentralityOracle, DefenseValue, GraphProvider, Node, NodeId, Topology,
};
use log::{debug, warn};
use rand::rngs::StdRng;

/// Default independent-edge probability for generated topologies
pub const DEFAULT_EDGE_PROBABILITY: f64 = 0.5;

/// Default cap on regeneration attempts before giving up on connectivity
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: usize = 1000;

/// A topology instance with mutable security state
#[derive(Debug, Clone)]
pub struct NetworkTopology<G> {
    graph: G,
    centrality: Vec<f64>,
    centrality_assigned: bool,
    defense: Vec<DefenseValue>,
    state: Vec<AttackState>,
}

impl<G: Topology> NetworkTopology<G> {
    /// Wrap an existing graph
    ///
    /// Connectivity is not checked here; use [`create_topology`] for generated
    /// networks.
    pub fn from_graph(graph: G) -> Result<Self, SimError> {
        let n = graph.size();
        if n == 0 {
            return Err(SimError::EmptyTopology { requested: 0 });
        }

        Ok(Self {
            graph,
            centrality: vec![0.0; n],
            centrality_assigned: false,
            defense: vec![0; n],
            state: vec![AttackState::Unattacked; n],
        })
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Write oracle scores onto every node
    ///
    /// Allowed once per topology instance; copies inherit the scores.
    pub fn annotate_centrality<C: CentralityOracle>(&mut self, oracle: &C) -> Result<(), SimError> {
        if self.centrality_assigned {
            return Err(SimError::CentralityAlreadyAssigned);
        }

        let scores = oracle.centrality(&self.graph);
        if scores.len() != self.len() {
            return Err(SimError::CentralityLengthMismatch {
                expected: self.len(),
                actual: scores.len(),
            });
        }

        self.centrality = scores;
        self.centrality_assigned = true;
        Ok(())
    }

    pub fn has_centrality(&self) -> bool {
        self.centrality_assigned
    }

    /// All nodes ordered by centrality, highest first (ties by ascending id)
    pub fn rank_by_centrality(&self) -> Result<Vec<NodeId>, SimError> {
        if !self.centrality_assigned {
            return Err(SimError::CentralityMissing);
        }

        let mut ranked: Vec<NodeId> = (0..self.len()).collect();
        self.sort_by_centrality(&mut ranked);
        Ok(ranked)
    }

    /// Topology neighbors of `node`, highest centrality first
    pub fn neighbors_by_centrality(&self, node: NodeId) -> Vec<NodeId> {
        let mut neighbors = self.graph.adjacent(node);
        self.sort_by_centrality(&mut neighbors);
        neighbors
    }

    /// Sort ids by centrality descending; equal scores keep id order
    pub fn sort_by_centrality(&self, ids: &mut [NodeId]) {
        ids.sort_by(|&a, &b| {
            self.centrality[b]
                .total_cmp(&self.centrality[a])
                .then(a.cmp(&b))
        });
    }

    /// Independent copy with every node back to `Unattacked`
    ///
    /// Structure, centrality and defense values carry over unchanged.
    pub fn fresh_copy(&self) -> Self
    where
        G: Clone,
    {
        let mut copy = self.clone();
        copy.state.fill(AttackState::Unattacked);
        copy
    }

    pub fn node(&self, id: NodeId) -> Node {
        Node {
            id,
            centrality_value: self.centrality[id],
            defense_value: self.defense[id],
            attack_state: self.state[id],
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        (0..self.len()).map(move |id| self.node(id))
    }

    pub fn centrality(&self, id: NodeId) -> f64 {
        self.centrality[id]
    }

    pub fn defense(&self, id: NodeId) -> DefenseValue {
        self.defense[id]
    }

    pub fn state(&self, id: NodeId) -> AttackState {
        self.state[id]
    }

    /// Set hardening on a node (anything non-zero counts as one unit)
    pub fn set_defense(&mut self, id: NodeId, value: DefenseValue) {
        self.defense[id] = value.min(1);
    }

    /// Clear all hardening
    pub fn clear_defense(&mut self) {
        self.defense.fill(0);
    }

    /// `Unattacked -> Attacked`; false if the node was attacked before
    pub fn mark_attacked(&mut self, id: NodeId) -> bool {
        if self.state[id].is_attacked() {
            return false;
        }
        self.state[id] = AttackState::Attacked;
        true
    }

    /// `Attacked -> Compromised`; false for any other starting state
    pub fn mark_compromised(&mut self, id: NodeId) -> bool {
        if self.state[id] != AttackState::Attacked {
            return false;
        }
        self.state[id] = AttackState::Compromised;
        true
    }

    /// Nodes currently in the `Attacked` state, highest centrality first
    pub fn attacked_nodes(&self) -> Vec<NodeId> {
        let mut attacked: Vec<NodeId> = (0..self.len())
            .filter(|&id| self.state[id] == AttackState::Attacked)
            .collect();
        self.sort_by_centrality(&mut attacked);
        attacked
    }

    pub fn defended_count(&self) -> usize {
        self.defense.iter().filter(|&&d| d > 0).count()
    }

    pub fn attacked_count(&self) -> usize {
        self.state.iter().filter(|s| s.is_attacked()).count()
    }

    pub fn compromised_count(&self) -> usize {
        self.state.iter().filter(|s| s.is_compromised()).count()
    }

    /// Fraction of nodes compromised, in [0, 1]
    pub fn fraction_compromised(&self) -> f64 {
        self.compromised_count() as f64 / self.len() as f64
    }
}

/// Generate a connected topology of `size` nodes
///
/// Disconnected draws are discarded and regenerated, up to `max_attempts`
/// times in total.
pub fn create_topology<P: GraphProvider>(
    provider: &P,
    size: usize,
    edge_probability: f64,
    max_attempts: usize,
    rng: &mut StdRng,
) -> Result<NetworkTopology<P::Graph>, SimError> {
    if size == 0 {
        return Err(SimError::EmptyTopology { requested: size });
    }
    if !(0.0..=1.0).contains(&edge_probability) {
        return Err(SimError::InvalidEdgeProbability(edge_probability));
    }

    for attempt in 1..=max_attempts {
        let graph = provider.random_graph(size, edge_probability, rng);
        if graph.is_connected() {
            if attempt > 1 {
                debug!(
                    "Connected topology (n={}, p={}) after {} attempts",
                    size, edge_probability, attempt
                );
            }
            if attempt > max_attempts / 2 {
                warn!(
                    "Topology generation needed {} of {} attempts (n={}, p={})",
                    attempt, max_attempts, size, edge_probability
                );
            }
            return NetworkTopology::from_graph(graph);
        }
    }

    Err(SimError::NonConvergentGeneration {
        node_count: size,
        edge_probability,
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ci_graph::{graph_from_edges, DegreeCentrality, ErdosRenyi, NetworkGraph};
    use rand::{Rng, SeedableRng};

    fn path_topology(n: usize) -> NetworkTopology<NetworkGraph> {
        let edges: Vec<(NodeId, NodeId)> = (1..n).map(|i| (i - 1, i)).collect();
        let mut topology = NetworkTopology::from_graph(graph_from_edges(n, &edges)).unwrap();
        topology.annotate_centrality(&DegreeCentrality).unwrap();
        topology
    }

    #[test]
    fn test_create_topology_rejects_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = create_topology(&ErdosRenyi, 0, 0.5, 10, &mut rng);
        assert_eq!(result.unwrap_err(), SimError::EmptyTopology { requested: 0 });
    }

    #[test]
    fn test_create_topology_rejects_bad_probability() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            create_topology(&ErdosRenyi, 5, 1.5, 10, &mut rng),
            Err(SimError::InvalidEdgeProbability(_))
        ));
        assert!(matches!(
            create_topology(&ErdosRenyi, 5, f64::NAN, 10, &mut rng),
            Err(SimError::InvalidEdgeProbability(_))
        ));
    }

    #[test]
    fn test_create_topology_caps_retries() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = create_topology(&ErdosRenyi, 5, 0.0, 3, &mut rng);
        assert_eq!(
            result.unwrap_err(),
            SimError::NonConvergentGeneration {
                node_count: 5,
                edge_probability: 0.0,
                attempts: 3,
            }
        );
    }

    #[test]
    fn test_generated_topologies_connected_with_requested_size() {
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..50 {
            let size = rng.gen_range(1..40);
            let p = rng.gen_range(0.3..1.0);
            let topology = create_topology(&ErdosRenyi, size, p, 10_000, &mut rng).unwrap();

            assert_eq!(topology.len(), size);
            assert!(topology.graph().is_connected());
        }
    }

    #[test]
    fn test_single_node_topology_is_accepted() {
        let mut rng = StdRng::seed_from_u64(3);
        let topology = create_topology(&ErdosRenyi, 1, 0.5, 1, &mut rng).unwrap();
        assert_eq!(topology.len(), 1);
    }

    #[test]
    fn test_annotate_centrality_once() {
        let mut topology = path_topology(3);
        assert!(topology.has_centrality());
        assert_eq!(
            topology.annotate_centrality(&DegreeCentrality),
            Err(SimError::CentralityAlreadyAssigned)
        );
    }

    #[test]
    fn test_rank_requires_centrality() {
        let topology = NetworkTopology::from_graph(graph_from_edges(2, &[(0, 1)])).unwrap();
        assert_eq!(topology.rank_by_centrality(), Err(SimError::CentralityMissing));
    }

    #[test]
    fn test_rank_by_centrality_descending_with_id_ties() {
        // Path 0-1-2-3-4: interior nodes have degree 2, ends degree 1
        let topology = path_topology(5);
        let ranked = topology.rank_by_centrality().unwrap();

        assert_eq!(ranked, vec![1, 2, 3, 0, 4]);
        for pair in ranked.windows(2) {
            assert!(topology.centrality(pair[0]) >= topology.centrality(pair[1]));
        }
    }

    #[test]
    fn test_neighbors_by_centrality() {
        // Node 0 touches hub 1 (degree 3) and leaf 4 (degree 1)
        let graph = graph_from_edges(5, &[(0, 4), (0, 1), (1, 2), (1, 3)]);
        let mut topology = NetworkTopology::from_graph(graph).unwrap();
        topology.annotate_centrality(&DegreeCentrality).unwrap();

        assert_eq!(topology.neighbors_by_centrality(0), vec![1, 4]);
    }

    #[test]
    fn test_state_transitions_only_move_forward() {
        let mut topology = path_topology(2);

        assert!(!topology.mark_compromised(0), "Unattacked node cannot be compromised");
        assert!(topology.mark_attacked(0));
        assert!(!topology.mark_attacked(0));
        assert!(topology.mark_compromised(0));
        assert!(!topology.mark_compromised(0));
        assert!(!topology.mark_attacked(0));
        assert_eq!(topology.state(0), AttackState::Compromised);
    }

    #[test]
    fn test_fresh_copy_resets_attack_state_only() {
        let mut base = path_topology(4);
        base.set_defense(1, 1);
        base.mark_attacked(1);
        base.mark_compromised(1);

        let copy = base.fresh_copy();

        assert_eq!(copy.compromised_count(), 0);
        assert_eq!(copy.attacked_count(), 0);
        assert_eq!(copy.defense(1), 1);
        assert_eq!(copy.centrality(1), base.centrality(1));
        assert!(copy.has_centrality());
        // Base is untouched by the copy
        assert_eq!(base.state(1), AttackState::Compromised);
    }

    #[test]
    fn test_fraction_compromised() {
        let mut topology = path_topology(4);
        assert_eq!(topology.fraction_compromised(), 0.0);

        topology.mark_attacked(0);
        topology.mark_compromised(0);
        topology.mark_attacked(3);
        assert!((topology.fraction_compromised() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_set_defense_clamps_to_one_unit() {
        let mut topology = path_topology(2);
        topology.set_defense(0, 5);
        assert_eq!(topology.defense(0), 1);
        assert_eq!(topology.defended_count(), 1);
        topology.clear_defense();
        assert_eq!(topology.defended_count(), 0);
    }
}
