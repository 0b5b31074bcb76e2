//! Graphviz DOT export.

use std::fs;
use std::io::Write;
use std::path::Path;

use petgraph::dot::{Config, Dot};

use crate::error::Result;
use crate::pipeline::StyledGraph;

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render the styled graph as DOT, one filled node per name.
pub fn write_dot<W: Write>(graph: &StyledGraph, mut out: W) -> Result<()> {
    let dot = Dot::with_attr_getters(
        graph,
        &[Config::EdgeNoLabel, Config::NodeNoLabel],
        &|_, edge| format!("label=\"{:.3}\"", edge.weight()),
        &|_, (_, name)| {
            format!(
                "label=\"{}\", style=filled, fillcolor=\"{}\", width={:.2}, community={}",
                escape(&name.label),
                name.color.to_rgb(),
                f64::from(name.size.max(1)) / 4.0,
                name.community
            )
        },
    );

    write!(out, "{:?}", dot)?;
    Ok(())
}

/// Write DOT to a file.
pub fn save_graph_to_dot(graph: &StyledGraph, path: impl AsRef<Path>) -> Result<()> {
    let mut buf = Vec::new();
    write_dot(graph, &mut buf)?;
    fs::write(path, buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Hsl;
    use crate::pipeline::StyledName;

    #[test]
    fn nodes_carry_fill_color() {
        let mut graph = StyledGraph::default();
        let red = Hsl {
            hue: 0.0,
            saturation: 1.0,
            luminosity: 0.5,
        };
        let a = graph.add_node(StyledName {
            label: "Amy".into(),
            size: 8,
            community: 0,
            color: red,
        });
        let b = graph.add_node(StyledName {
            label: "Ami".into(),
            size: 4,
            community: 0,
            color: red,
        });
        graph.add_edge(a, b, 0.5);

        let mut buf = Vec::new();
        write_dot(&graph, &mut buf).unwrap();
        let dot = String::from_utf8(buf).unwrap();

        assert!(dot.starts_with("graph {"));
        assert!(dot.contains("label=\"Amy\""));
        assert!(dot.contains("fillcolor=\"#ff0000\""));
        assert!(dot.contains("label=\"0.500\""));
    }
}
