//! Name ↔ bigram bipartite graph.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use tracing::info;

use crate::bigram::{Bigram, bigrams};
use crate::input::NameRow;

/// Aggregated attributes of a first name.
#[derive(Debug, Clone, PartialEq)]
pub struct NameNode {
    pub label: String,
    pub frequency: u64,
    /// Mean of the ranks observed for this name.
    pub rank: f64,
    /// `floor(ln(frequency)) * 2`, used as the display size.
    pub size: u32,
}

impl NameNode {
    /// Finalize a name from its total frequency and the ranks seen on its rows.
    pub fn from_rows(label: String, frequency: u64, ranks: &[u32]) -> Self {
        let rank = if ranks.is_empty() {
            0.0
        } else {
            ranks.iter().map(|&r| f64::from(r)).sum::<f64>() / ranks.len() as f64
        };
        Self {
            label,
            frequency,
            rank,
            size: log_size(frequency),
        }
    }
}

fn log_size(frequency: u64) -> u32 {
    if frequency == 0 {
        return 0;
    }
    (frequency as f64).ln().floor() as u32 * 2
}

/// A vertex of the bipartite graph.
#[derive(Debug, Clone, PartialEq)]
pub enum BipartiteNode {
    /// A first name.
    Name(NameNode),
    /// A character bigram.
    Bigram(Bigram),
}

impl BipartiteNode {
    /// The name payload, if this is a name vertex.
    pub fn as_name(&self) -> Option<&NameNode> {
        match self {
            BipartiteNode::Name(name) => Some(name),
            BipartiteNode::Bigram(_) => None,
        }
    }
}

#[derive(Debug)]
enum PendingNode {
    Name {
        label: String,
        frequency: u64,
        ranks: Vec<u32>,
    },
    Bigram(Bigram),
}

/// Incrementally builds the bipartite graph from frequency rows.
#[derive(Debug)]
pub struct BipartiteBuilder {
    min_freq: u64,
    graph: UnGraph<PendingNode, ()>,
    names: HashMap<String, NodeIndex>,
    bigrams: HashMap<Bigram, NodeIndex>,
}

impl BipartiteBuilder {
    /// Rows with a frequency below `min_freq` are skipped.
    pub fn new(min_freq: u64) -> Self {
        Self {
            min_freq,
            graph: UnGraph::new_undirected(),
            names: HashMap::new(),
            bigrams: HashMap::new(),
        }
    }

    /// Add one row. Returns false if the row was below the frequency threshold.
    pub fn add_row(&mut self, row: &NameRow) -> bool {
        if row.frequency < self.min_freq {
            return false;
        }

        let name_idx = match self.names.get(&row.name) {
            Some(&idx) => {
                if let PendingNode::Name {
                    frequency, ranks, ..
                } = &mut self.graph[idx]
                {
                    *frequency += row.frequency;
                    ranks.push(row.rank);
                }
                idx
            }
            None => {
                let idx = self.graph.add_node(PendingNode::Name {
                    label: row.name.clone(),
                    frequency: row.frequency,
                    ranks: vec![row.rank],
                });
                self.names.insert(row.name.clone(), idx);
                idx
            }
        };

        for bigram in bigrams(&row.name) {
            let graph = &mut self.graph;
            let bigram_idx = *self
                .bigrams
                .entry(bigram)
                .or_insert_with(|| graph.add_node(PendingNode::Bigram(bigram)));
            if graph.find_edge(name_idx, bigram_idx).is_none() {
                graph.add_edge(name_idx, bigram_idx, ());
            }
        }
        true
    }

    /// Add every row of an iterator.
    pub fn extend<'a, I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = &'a NameRow>,
    {
        for row in rows {
            self.add_row(row);
        }
    }

    /// Compute sizes and mean ranks, then drop the per-row rank lists.
    pub fn finish(self) -> BipartiteGraph {
        let graph = self.graph.map(
            |_, node| match node {
                PendingNode::Name {
                    label,
                    frequency,
                    ranks,
                } => BipartiteNode::Name(NameNode::from_rows(label.clone(), *frequency, ranks)),
                PendingNode::Bigram(bigram) => BipartiteNode::Bigram(*bigram),
            },
            |_, _| (),
        );

        let bipartite = BipartiteGraph {
            graph,
            names: self.names,
            bigrams: self.bigrams,
        };
        info!(
            names = bipartite.name_count(),
            bigrams = bipartite.bigram_count(),
            edges = bipartite.edge_count(),
            "built bipartite graph"
        );
        bipartite
    }
}

/// Names and bigrams, with an edge wherever a name contains a bigram.
#[derive(Debug, Clone)]
pub struct BipartiteGraph {
    graph: UnGraph<BipartiteNode, ()>,
    names: HashMap<String, NodeIndex>,
    bigrams: HashMap<Bigram, NodeIndex>,
}

impl BipartiteGraph {
    /// Build directly from rows.
    pub fn from_rows<'a, I>(rows: I, min_freq: u64) -> Self
    where
        I: IntoIterator<Item = &'a NameRow>,
    {
        let mut builder = BipartiteBuilder::new(min_freq);
        builder.extend(rows);
        builder.finish()
    }

    pub fn inner(&self) -> &UnGraph<BipartiteNode, ()> {
        &self.graph
    }

    pub fn name_index(&self, name: &str) -> Option<NodeIndex> {
        self.names.get(name).copied()
    }

    /// Aggregated attributes of a name.
    pub fn name(&self, name: &str) -> Option<&NameNode> {
        self.name_index(name)
            .and_then(|idx| self.graph[idx].as_name())
    }

    /// Name vertices in insertion order.
    pub fn name_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(|&idx| matches!(self.graph[idx], BipartiteNode::Name(_)))
    }

    /// Labels of all name vertices in insertion order.
    pub fn name_labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph[idx].as_name().map(|n| n.label.as_str()))
    }

    /// Whether a bigram vertex exists.
    pub fn contains_bigram(&self, bigram: &Bigram) -> bool {
        self.bigrams.contains_key(bigram)
    }

    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    pub fn bigram_count(&self) -> usize {
        self.bigrams.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bg(s: &str) -> Bigram {
        let mut chars = s.chars();
        Bigram::new(chars.next().unwrap(), chars.next().unwrap())
    }

    #[test]
    fn row_filter_applies_per_row() {
        let rows = [
            NameRow::new("Amy", 50, 1),
            NameRow::new("Amy", 10, 1),
            NameRow::new("Amber", 5, 2),
        ];
        let graph = BipartiteGraph::from_rows(&rows, 10);

        assert_eq!(graph.name_count(), 1);
        assert!(graph.name("Amber").is_none());
        assert_eq!(graph.name("Amy").unwrap().frequency, 60);
        assert_eq!(graph.bigram_count(), 3);
        for b in ["_a", "am", "my"] {
            assert!(graph.contains_bigram(&bg(b)));
        }
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn rank_is_mean_of_rows() {
        let rows = [NameRow::new("Zoe", 20, 3), NameRow::new("Zoe", 20, 6)];
        let graph = BipartiteGraph::from_rows(&rows, 0);
        let zoe = graph.name("Zoe").unwrap();
        assert_eq!(zoe.rank, 4.5);
        assert_eq!(zoe.frequency, 40);
        // ln(40) = 3.68
        assert_eq!(zoe.size, 6);
    }

    #[test]
    fn aggregation_is_order_independent() {
        let a = [NameRow::new("Eva", 10, 1), NameRow::new("Eva", 30, 7)];
        let b = [NameRow::new("Eva", 30, 7), NameRow::new("Eva", 10, 1)];
        assert_eq!(
            BipartiteGraph::from_rows(&a, 0).name("Eva"),
            BipartiteGraph::from_rows(&b, 0).name("Eva")
        );
    }

    #[test]
    fn repeated_bigram_gets_one_edge() {
        let rows = [NameRow::new("Nana", 10, 1)];
        let graph = BipartiteGraph::from_rows(&rows, 0);
        // _n, na, an
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn shared_bigrams_are_single_vertices() {
        let rows = [NameRow::new("Amy", 10, 1), NameRow::new("Ami", 10, 2)];
        let graph = BipartiteGraph::from_rows(&rows, 0);
        assert_eq!(graph.bigram_count(), 4);
        assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn empty_input_gives_empty_graph() {
        let graph = BipartiteGraph::from_rows(&[], 10);
        assert_eq!(graph.name_count(), 0);
        assert_eq!(graph.inner().node_count(), 0);
    }

    #[test]
    fn size_of_frequency_one_is_zero() {
        assert_eq!(log_size(1), 0);
        assert_eq!(log_size(0), 0);
        assert_eq!(log_size(60), 8);
    }
}
