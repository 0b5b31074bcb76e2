//! Writers for the finished name network and the bigram histogram.

mod dot;
mod graphml;
mod histogram;

pub use dot::{save_graph_to_dot, write_dot};
pub use graphml::{save_graph_to_graphml, write_graphml};
pub use histogram::{save_histogram, write_histogram};
