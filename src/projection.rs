//! Projection of the bipartite graph onto names.
//!
//! Two names are linked when they share at least one bigram, with weight
//! `|N(u) ∩ N(v)| / |N(u) ∪ N(v)|` over their bigram neighbourhoods.

use std::collections::BTreeMap;

use petgraph::graph::NodeIndex;
use tracing::info;

use crate::bipartite::{BipartiteGraph, BipartiteNode};
use crate::network::NameGraph;

/// Jaccard overlap of two neighbourhood sizes sharing `shared` members.
pub fn jaccard(shared: usize, left: usize, right: usize) -> f64 {
    let union = left + right - shared;
    if union == 0 {
        return 0.0;
    }
    shared as f64 / union as f64
}

/// Project onto the name vertices, carrying their attributes unchanged.
pub fn project(bipartite: &BipartiteGraph) -> NameGraph {
    let graph = bipartite.inner();
    let mut network = NameGraph::new();
    let mut mapped: BTreeMap<NodeIndex, _> = BTreeMap::new();

    for idx in bipartite.name_indices() {
        if let BipartiteNode::Name(node) = &graph[idx] {
            mapped.insert(idx, network.add_name(node.clone()));
        }
    }

    for (&u, &u_new) in &mapped {
        let degree_u = graph.neighbors(u).count();

        // Count bigrams shared with every later name reachable through a bigram.
        let mut shared: BTreeMap<NodeIndex, usize> = BTreeMap::new();
        for bigram in graph.neighbors(u) {
            for v in graph.neighbors(bigram) {
                if v > u {
                    *shared.entry(v).or_insert(0) += 1;
                }
            }
        }

        for (v, common) in shared {
            let degree_v = graph.neighbors(v).count();
            network.set_similarity(u_new, mapped[&v], jaccard(common, degree_u, degree_v));
        }
    }

    info!(
        names = network.node_count(),
        edges = network.edge_count(),
        "projected name network"
    );
    network
}
