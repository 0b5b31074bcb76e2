//! Orchestrates: rows -> bipartite graph -> bigram index -> name network
//! -> pruning -> communities -> colors.

use std::collections::HashMap;

use petgraph::stable_graph::StableUnGraph;
use tracing::info;

use crate::bipartite::BipartiteGraph;
use crate::color::{ColorAssigner, Hsl};
use crate::community::{Louvain, Partition};
use crate::config::NetworkConfig;
use crate::error::Result;
use crate::frequency::{BigramIndex, HistogramEntry};
use crate::input::{MustHave, NameRow};
use crate::projection::project;
use crate::pruning::{GraphPruner, PruneThresholds};

/// A name as it appears in the final artifact; frequency, rank and node kind
/// are gone by this point.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledName {
    pub label: String,
    pub size: u32,
    /// Community id (opaque).
    pub community: usize,
    pub color: Hsl,
}

/// The finalized name-similarity graph.
pub type StyledGraph = StableUnGraph<StyledName, f64>;

/// Everything a run hands to the writers.
#[derive(Debug, Clone)]
pub struct NetworkOutput {
    pub graph: StyledGraph,
    /// Bigram counts and percentages, most frequent first.
    pub histogram: Vec<HistogramEntry>,
    pub partition: Partition,
    pub modularity: f64,
}

impl NetworkOutput {
    /// Names of the final graph in index order.
    pub fn names(&self) -> impl Iterator<Item = &StyledName> + '_ {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Similarity weights of the final graph.
    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.graph.edge_indices().map(|edge| self.graph[edge])
    }

    /// Find a name in the final graph.
    pub fn name(&self, label: &str) -> Option<&StyledName> {
        self.names().find(|node| node.label == label)
    }
}

/// High-level pipeline: rows -> styled name network.
#[derive(Debug, Clone)]
pub struct NetworkPipeline {
    config: NetworkConfig,
}

impl NetworkPipeline {
    /// Validates the config up front.
    pub fn new(config: NetworkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Run every stage. `must_have` enables the allowlist exemption.
    pub fn run(&self, rows: &[NameRow], must_have: Option<&MustHave>) -> Result<NetworkOutput> {
        let bipartite = BipartiteGraph::from_rows(rows, self.config.min_freq);
        let index = BigramIndex::from_names(bipartite.name_labels());
        info!(bigrams = index.len(), occurrences = index.total(), "indexed bigrams");

        let mut network = project(&bipartite);
        GraphPruner::prune(&mut network, &PruneThresholds::from(&self.config), must_have);

        let louvain = Louvain::from_config(&self.config);
        let partition = louvain.detect(&network);
        let modularity = partition.modularity(&network, louvain.resolution());
        info!(modularity, "partition quality");

        let colors = ColorAssigner::new(&index)?;
        let mut styles = HashMap::with_capacity(network.node_count());
        for idx in network.inner().node_indices() {
            let node = &network.inner()[idx];
            let community = partition.community_of(&node.label).unwrap_or_default();
            let color = colors.assign(
                &node.label,
                node.frequency,
                partition.community_frequency(community),
            )?;
            styles.insert(idx, (community, color));
        }

        let graph: StyledGraph = network.inner().map(
            |idx, node| {
                let (community, color) = styles[&idx];
                StyledName {
                    label: node.label.clone(),
                    size: node.size,
                    community,
                    color,
                }
            },
            |_, &weight| weight,
        );

        info!(
            names = graph.node_count(),
            edges = graph.edge_count(),
            "name network ready"
        );
        Ok(NetworkOutput {
            graph,
            histogram: index.histogram(),
            partition,
            modularity,
        })
    }
}
