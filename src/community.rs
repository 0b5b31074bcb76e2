//! Louvain community detection on the name network.
//!
//! Multi-level modularity optimization (Blondel et al. 2008):
//!
//! 1. **Local moving**: every node starts alone and is repeatedly moved to the
//!    neighbouring community with the highest modularity gain, until no move
//!    helps.
//! 2. **Aggregation**: communities become single nodes of a meta-graph; edges
//!    between communities are summed and internal edges become self-loops.
//! 3. Repeat on the meta-graph until a level brings no improvement.
//!
//! Modularity with resolution γ:
//!
//! ```text
//! Q = Σ_c [ in_c / m − γ (tot_c / 2m)² ]
//! ```
//!
//! where `in_c` is the internal edge weight of community `c`, `tot_c` the sum
//! of its weighted degrees and `m` the total edge weight.

use std::collections::{BTreeMap, HashMap};

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::config::NetworkConfig;
use crate::network::NameGraph;

/// Weighted graph in compact form, one per aggregation level.
#[derive(Debug, Clone)]
struct Level {
    /// Neighbours without self-loops; every edge is listed from both ends.
    adj: Vec<Vec<(usize, f64)>>,
    /// Self-loop weight per node.
    loops: Vec<f64>,
}

impl Level {
    fn from_graph(graph: &NameGraph) -> (Self, Vec<NodeIndex>) {
        let inner = graph.inner();
        let nodes: Vec<NodeIndex> = inner.node_indices().collect();
        let position: HashMap<NodeIndex, usize> =
            nodes.iter().enumerate().map(|(i, &idx)| (idx, i)).collect();

        let mut adj = vec![Vec::new(); nodes.len()];
        for edge in inner.edge_references() {
            let i = position[&edge.source()];
            let j = position[&edge.target()];
            if i != j {
                adj[i].push((j, *edge.weight()));
                adj[j].push((i, *edge.weight()));
            }
        }
        let loops = vec![0.0; nodes.len()];
        (Self { adj, loops }, nodes)
    }

    fn len(&self) -> usize {
        self.adj.len()
    }

    fn total_weight(&self) -> f64 {
        let edges: f64 = self.adj.iter().flatten().map(|&(_, w)| w).sum();
        edges / 2.0 + self.loops.iter().sum::<f64>()
    }

    fn degrees(&self) -> Vec<f64> {
        self.adj
            .iter()
            .zip(&self.loops)
            .map(|(links, &sl)| links.iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * sl)
            .collect()
    }

    fn modularity(&self, community: &[usize], resolution: f64) -> f64 {
        let m = self.total_weight();
        if m == 0.0 {
            return 0.0;
        }
        let degrees = self.degrees();
        let mut internal: HashMap<usize, f64> = HashMap::new();
        let mut total: HashMap<usize, f64> = HashMap::new();

        for node in 0..self.len() {
            let c = community[node];
            *total.entry(c).or_insert(0.0) += degrees[node];
            let mut inside = self.loops[node];
            for &(nb, w) in &self.adj[node] {
                if community[nb] == c {
                    // Seen once from each end.
                    inside += w / 2.0;
                }
            }
            *internal.entry(c).or_insert(0.0) += inside;
        }

        total
            .iter()
            .map(|(c, &tot)| {
                let inside = internal.get(c).copied().unwrap_or(0.0);
                inside / m - resolution * (tot / (2.0 * m)).powi(2)
            })
            .sum()
    }

    /// Contract communities into nodes. Returns the meta-graph and, for each
    /// node of `self`, its node in the meta-graph.
    fn aggregate(&self, community: &[usize]) -> (Self, Vec<usize>) {
        let renumbered = renumber(community);
        let n_new = renumbered.iter().copied().max().map_or(0, |max| max + 1);

        let mut links: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); n_new];
        let mut loops = vec![0.0; n_new];

        for node in 0..self.len() {
            let ci = renumbered[node];
            loops[ci] += self.loops[node];
            for &(nb, w) in &self.adj[node] {
                let cj = renumbered[nb];
                if ci == cj {
                    loops[ci] += w / 2.0;
                } else {
                    *links[ci].entry(cj).or_insert(0.0) += w;
                }
            }
        }

        let adj = links
            .into_iter()
            .map(|m| m.into_iter().collect())
            .collect();
        (Self { adj, loops }, renumbered)
    }
}

/// Relabel communities to `0..k` in order of first appearance.
fn renumber(community: &[usize]) -> Vec<usize> {
    let mut mapping: HashMap<usize, usize> = HashMap::new();
    community
        .iter()
        .map(|&c| {
            let next = mapping.len();
            *mapping.entry(c).or_insert(next)
        })
        .collect()
}

/// Louvain community detection algorithm.
#[derive(Debug, Clone)]
pub struct Louvain {
    resolution: f64,
    max_passes: usize,
    max_levels: usize,
    /// Minimum modularity improvement for another sweep.
    min_modularity_gain: f64,
    /// Seed for shuffling the node visiting order.
    seed: Option<u64>,
}

impl Default for Louvain {
    fn default() -> Self {
        Self::new()
    }
}

impl Louvain {
    /// Create a detector with resolution 1 and index-order node visits.
    pub fn new() -> Self {
        Self {
            resolution: 1.0,
            max_passes: 100,
            max_levels: 32,
            min_modularity_gain: 1e-7,
            seed: None,
        }
    }

    /// Detector configured from a pipeline config.
    pub fn from_config(config: &NetworkConfig) -> Self {
        let louvain = Self::new().with_resolution(config.resolution);
        match config.seed {
            Some(seed) => louvain.with_seed(seed),
            None => louvain,
        }
    }

    /// Set resolution parameter. Higher values produce smaller communities.
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Shuffle the node visiting order with a seeded RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Phase 1. Returns the community of every node and whether any node moved.
    fn local_moving(&self, level: &Level, order: &[usize]) -> (Vec<usize>, bool) {
        let n = level.len();
        let mut community: Vec<usize> = (0..n).collect();
        let m = level.total_weight();
        if m == 0.0 {
            return (community, false);
        }

        let degrees = level.degrees();
        let mut totals = degrees.clone();
        let mut modularity = level.modularity(&community, self.resolution);
        let mut any_moved = false;

        for _ in 0..self.max_passes {
            let mut moved = false;

            for &node in order {
                let own = community[node];
                let k = degrees[node];

                let mut links: BTreeMap<usize, f64> = BTreeMap::new();
                for &(nb, w) in &level.adj[node] {
                    *links.entry(community[nb]).or_insert(0.0) += w;
                }

                totals[own] -= k;
                let own_links = links.get(&own).copied().unwrap_or(0.0);
                let mut best = own;
                let mut best_gain = own_links - self.resolution * totals[own] * k / (2.0 * m);

                for (&target, &k_in) in &links {
                    let gain = k_in - self.resolution * totals[target] * k / (2.0 * m);
                    if gain > best_gain {
                        best_gain = gain;
                        best = target;
                    }
                }

                totals[best] += k;
                if best != own {
                    community[node] = best;
                    moved = true;
                    any_moved = true;
                }
            }

            if !moved {
                break;
            }
            let now = level.modularity(&community, self.resolution);
            if now - modularity < self.min_modularity_gain {
                break;
            }
            modularity = now;
        }

        (community, any_moved)
    }

    /// Partition the graph. An empty graph yields an empty partition and
    /// isolated names end up in singleton communities.
    pub fn detect(&self, graph: &NameGraph) -> Partition {
        info!(
            names = graph.node_count(),
            edges = graph.edge_count(),
            "partitioning name network"
        );

        let (mut level, nodes) = Level::from_graph(graph);
        let mut membership: Vec<usize> = (0..nodes.len()).collect();
        let mut rng = self.seed.map(StdRng::seed_from_u64);

        for depth in 0..self.max_levels {
            let mut order: Vec<usize> = (0..level.len()).collect();
            if let Some(rng) = rng.as_mut() {
                order.shuffle(rng);
            }

            let (community, moved) = self.local_moving(&level, &order);
            if !moved {
                break;
            }

            let (next, renumbered) = level.aggregate(&community);
            for slot in membership.iter_mut() {
                *slot = renumbered[*slot];
            }
            let stalled = next.len() == level.len();
            debug!(depth, communities = next.len(), "aggregated level");
            level = next;
            if stalled {
                break;
            }
        }

        let membership = renumber(&membership);
        let partition = Partition::new(graph, &nodes, &membership);
        info!(communities = partition.len(), "partitioning done");
        partition
    }
}

/// Community assignment of every name, with per-community frequency totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    labels: HashMap<String, usize>,
    totals: Vec<u64>,
}

impl Partition {
    fn new(graph: &NameGraph, nodes: &[NodeIndex], membership: &[usize]) -> Self {
        let count = membership.iter().copied().max().map_or(0, |max| max + 1);
        let mut totals = vec![0u64; count];
        let mut labels = HashMap::with_capacity(nodes.len());

        for (&idx, &community) in nodes.iter().zip(membership) {
            let node = &graph.inner()[idx];
            totals[community] += node.frequency;
            labels.insert(node.label.clone(), community);
        }
        Self { labels, totals }
    }

    /// Community of a name.
    pub fn community_of(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    /// Sum of member frequencies of a community (0 for unknown ids).
    pub fn community_frequency(&self, community: usize) -> u64 {
        self.totals.get(community).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Member labels of every community, sorted.
    pub fn communities(&self) -> BTreeMap<usize, Vec<String>> {
        let mut communities: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for (name, &community) in &self.labels {
            communities.entry(community).or_default().push(name.clone());
        }
        for members in communities.values_mut() {
            members.sort();
        }
        communities
    }

    /// Weighted modularity of this partition on `graph`.
    pub fn modularity(&self, graph: &NameGraph, resolution: f64) -> f64 {
        let (level, nodes) = Level::from_graph(graph);
        let community: Vec<usize> = nodes
            .iter()
            .map(|&idx| {
                self.community_of(&graph.inner()[idx].label)
                    .unwrap_or(usize::MAX)
            })
            .collect();
        level.modularity(&community, resolution)
    }
}
