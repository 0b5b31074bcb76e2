//! Pruning logic: similarity threshold on edges, then minimum degree on names.

use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use tracing::{debug, info};

use crate::bipartite::NameNode;
use crate::config::NetworkConfig;
use crate::input::MustHave;
use crate::network::NameGraph;

/// Thresholds used by [`GraphPruner`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PruneThresholds {
    pub sim_threshold: f64,
    pub degree_threshold: f64,
    /// Names ranked at or below this are important.
    pub rank_threshold: u32,
    /// Weight multiplier for edges touching a name ranked above `rank_threshold`.
    pub bonus_multiplier: f64,
}

impl From<&NetworkConfig> for PruneThresholds {
    fn from(config: &NetworkConfig) -> Self {
        Self {
            sim_threshold: config.sim_threshold,
            degree_threshold: config.degree_threshold,
            rank_threshold: config.rank_threshold,
            bonus_multiplier: config.bonus_multiplier,
        }
    }
}

impl PruneThresholds {
    // The mean rank is truncated before the comparison, so 100.5 passes a
    // threshold of 100.
    fn is_important(&self, node: &NameNode) -> bool {
        node.rank.trunc() <= f64::from(self.rank_threshold)
    }

    /// Whether an edge between `u` and `v` with `weight` survives.
    pub fn keeps_edge(&self, u: &NameNode, v: &NameNode, weight: f64) -> bool {
        if !self.is_important(u) || !self.is_important(v) {
            weight * self.bonus_multiplier >= self.sim_threshold
        } else {
            weight >= self.sim_threshold
        }
    }
}

/// Functions related to pruning edges and names.
#[derive(Debug)]
pub struct GraphPruner;

impl GraphPruner {
    /// Edge pass followed by node pass, in that order.
    pub fn prune(graph: &mut NameGraph, thresholds: &PruneThresholds, must_have: Option<&MustHave>) {
        Self::prune_edges(graph, thresholds);
        Self::prune_nodes(graph, thresholds, must_have);
    }

    /// Remove every edge that fails [`PruneThresholds::keeps_edge`].
    pub fn prune_edges(graph: &mut NameGraph, thresholds: &PruneThresholds) {
        info!(
            names = graph.node_count(),
            edges = graph.edge_count(),
            "deleting edges with too low weight"
        );

        let doomed: Vec<_> = {
            let inner = graph.inner();
            inner
                .edge_references()
                .filter(|edge| {
                    !thresholds.keeps_edge(&inner[edge.source()], &inner[edge.target()], *edge.weight())
                })
                .map(|edge| edge.id())
                .collect()
        };

        let inner = graph.inner_mut();
        for edge in doomed {
            inner.remove_edge(edge);
        }

        info!(edges = graph.edge_count(), "edge pruning done");
    }

    /// Remove names whose degree is below the threshold, unless they are
    /// important by rank or listed in `must_have`.
    ///
    /// Removing a name lowers its neighbours' degrees, so the pass repeats
    /// until every remaining name meets the threshold or is exempt.
    pub fn prune_nodes(graph: &mut NameGraph, thresholds: &PruneThresholds, must_have: Option<&MustHave>) {
        info!(
            names = graph.node_count(),
            edges = graph.edge_count(),
            "deleting names with too low degree"
        );

        let mut round = 0;
        loop {
            let doomed: Vec<_> = graph
                .inner()
                .node_indices()
                .filter(|&idx| {
                    let node = &graph.inner()[idx];
                    (graph.degree(idx) as f64) < thresholds.degree_threshold
                        && !thresholds.is_important(node)
                        && !must_have.is_some_and(|list| list.contains(&node.label))
                })
                .collect();
            if doomed.is_empty() {
                break;
            }

            round += 1;
            debug!(round, removed = doomed.len(), "removing low-degree names");
            for idx in doomed {
                graph.remove_name(idx);
            }
        }

        info!(
            names = graph.node_count(),
            edges = graph.edge_count(),
            "node pruning done"
        );
    }
}
