//! # name-network
//!
//! Builds a similarity network of first names from shared character bigrams
//! and partitions it into colored communities:
//!
//! 1. names and their boundary-marked bigrams form a bipartite graph,
//! 2. the graph is projected onto names with a Jaccard overlap weight,
//! 3. weak edges and poorly connected names are pruned,
//! 4. Louvain finds communities,
//! 5. each name gets a hue from its bigram rarity and a luminosity from its
//!    share of its community.
//!
//! ```no_run
//! use name_network::{NetworkConfig, NetworkPipeline, input::read_rows_from_path};
//!
//! let rows = read_rows_from_path("names.csv")?;
//! let output = NetworkPipeline::new(NetworkConfig::default())?.run(&rows, None)?;
//! name_network::output::save_graph_to_graphml(&output.graph, "names.graphml")?;
//! # Ok::<(), name_network::NetworkError>(())
//! ```

pub mod bigram;
pub mod bipartite;
pub mod color;
pub mod community;
pub mod config;
pub mod error;
pub mod frequency;
pub mod input;
pub mod network;
pub mod output;
pub mod pipeline;
pub mod projection;
pub mod pruning;

pub use bigram::{Bigram, bigrams};
pub use bipartite::{BipartiteBuilder, BipartiteGraph, NameNode};
pub use color::{ColorAssigner, Hsl, Rgb};
pub use community::{Louvain, Partition};
pub use config::NetworkConfig;
pub use error::{NetworkError, Result};
pub use frequency::{BigramIndex, HistogramEntry};
pub use input::{MustHave, NameRow};
pub use network::NameGraph;
pub use pipeline::{NetworkOutput, NetworkPipeline, StyledGraph, StyledName};
pub use projection::project;
pub use pruning::{GraphPruner, PruneThresholds};
