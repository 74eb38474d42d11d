// Default graph capabilities backed by petgraph
//
// - `NetworkGraph`: undirected petgraph graph with unit node/edge weights
// - `ErdosRenyi`: G(n, p) generation
// - `DegreeCentrality`: degree / (n - 1)

use crate::ci_interface::{CentralityOracle, GraphProvider, NodeId, Topology};
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use rand::rngs::StdRng;
use rand::Rng;

/// Graph storage used by the default provider
pub type NetworkGraph = UnGraph<(), ()>;

impl Topology for NetworkGraph {
    fn size(&self) -> usize {
        self.node_count()
    }

    fn edge_count(&self) -> usize {
        UnGraph::edge_count(self)
    }

    fn adjacent(&self, node: NodeId) -> Vec<NodeId> {
        self.neighbors(NodeIndex::new(node))
            .map(|n| n.index())
            .collect()
    }

    fn is_connected(&self) -> bool {
        self.node_count() > 0 && connected_components(self) == 1
    }
}

/// Build a graph over `node_count` nodes from an explicit edge list
///
/// Nodes without edges are kept, so the result may be disconnected.
///
/// # Panics
///
/// If an edge endpoint is not below `node_count`.
pub fn graph_from_edges(node_count: usize, edges: &[(NodeId, NodeId)]) -> NetworkGraph {
    let mut graph = NetworkGraph::with_capacity(node_count, edges.len());
    let nodes: Vec<NodeIndex> = (0..node_count).map(|_| graph.add_node(())).collect();
    for &(a, b) in edges {
        graph.add_edge(nodes[a], nodes[b], ());
    }
    graph
}

/// Erdős–Rényi G(n, p) generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ErdosRenyi;

impl GraphProvider for ErdosRenyi {
    type Graph = NetworkGraph;

    fn random_graph(
        &self,
        node_count: usize,
        edge_probability: f64,
        rng: &mut StdRng,
    ) -> NetworkGraph {
        let mut graph = NetworkGraph::with_capacity(node_count, 0);
        let nodes: Vec<NodeIndex> = (0..node_count).map(|_| graph.add_node(())).collect();

        for i in 0..node_count {
            for j in (i + 1)..node_count {
                if rng.gen::<f64>() < edge_probability {
                    graph.add_edge(nodes[i], nodes[j], ());
                }
            }
        }

        graph
    }
}

/// Degree centrality: fraction of other nodes each node is adjacent to
///
/// Graphs with one node (or none) score every node 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeCentrality;

impl CentralityOracle for DegreeCentrality {
    fn centrality<T: Topology>(&self, topology: &T) -> Vec<f64> {
        let n = topology.size();
        if n <= 1 {
            return vec![1.0; n];
        }

        let scale = 1.0 / (n - 1) as f64;
        (0..n)
            .map(|node| topology.adjacent(node).len() as f64 * scale)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_graph_from_edges_keeps_isolated_nodes() {
        let graph = graph_from_edges(4, &[(0, 1), (1, 2)]);

        assert_eq!(graph.size(), 4);
        assert_eq!(Topology::edge_count(&graph), 2);
        assert!(graph.adjacent(3).is_empty());
        assert!(!graph.is_connected());
    }

    #[test]
    fn test_adjacent_is_symmetric() {
        let graph = graph_from_edges(3, &[(0, 1), (0, 2)]);

        let mut from_zero = graph.adjacent(0);
        from_zero.sort();
        assert_eq!(from_zero, vec![1, 2]);
        assert_eq!(graph.adjacent(1), vec![0]);
        assert_eq!(graph.adjacent(2), vec![0]);
    }

    #[test]
    fn test_empty_graph_is_not_connected() {
        let graph = graph_from_edges(0, &[]);
        assert!(!graph.is_connected());

        let single = graph_from_edges(1, &[]);
        assert!(single.is_connected());
    }

    #[test]
    fn test_erdos_renyi_extremes() {
        let mut rng = StdRng::seed_from_u64(42);

        let complete = ErdosRenyi.random_graph(10, 1.0, &mut rng);
        assert_eq!(complete.size(), 10);
        assert_eq!(Topology::edge_count(&complete), 45);
        assert!(complete.is_connected());

        let empty = ErdosRenyi.random_graph(10, 0.0, &mut rng);
        assert_eq!(Topology::edge_count(&empty), 0);
        assert!(!empty.is_connected());
    }

    #[test]
    fn test_erdos_renyi_is_simple() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = ErdosRenyi.random_graph(30, 0.5, &mut rng);

        for node in 0..graph.size() {
            let mut adjacent = graph.adjacent(node);
            assert!(!adjacent.contains(&node), "Self loop on {}", node);
            let before = adjacent.len();
            adjacent.sort();
            adjacent.dedup();
            assert_eq!(adjacent.len(), before, "Parallel edge on {}", node);
        }
    }

    #[test]
    fn test_erdos_renyi_deterministic_under_seed() {
        let a = ErdosRenyi.random_graph(20, 0.3, &mut StdRng::seed_from_u64(99));
        let b = ErdosRenyi.random_graph(20, 0.3, &mut StdRng::seed_from_u64(99));

        for node in 0..20 {
            assert_eq!(a.adjacent(node), b.adjacent(node));
        }
    }

    #[test]
    fn test_degree_centrality_star() {
        // Hub 0 joined to 1..=4
        let graph = graph_from_edges(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let scores = DegreeCentrality.centrality(&graph);

        assert_eq!(scores.len(), 5);
        assert!((scores[0] - 1.0).abs() < 1e-12);
        for &leaf in &scores[1..] {
            assert!((leaf - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_degree_centrality_single_node() {
        let graph = graph_from_edges(1, &[]);
        assert_eq!(DegreeCentrality.centrality(&graph), vec![1.0]);
    }

    #[test]
    #[should_panic]
    fn test_graph_from_edges_rejects_out_of_range_endpoint() {
        graph_from_edges(3, &[(0, 1), (1, 3)]);
    }
}
