//! GraphML export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use crate::error::Result;
use crate::pipeline::StyledGraph;

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";

/// `(id, for, attr.name, attr.type)` of every declared attribute.
const KEYS: [(&str, &str, &str, &str); 7] = [
    ("d0", "node", "label", "string"),
    ("d1", "node", "size", "int"),
    ("d2", "node", "community", "int"),
    ("d3", "node", "hue", "double"),
    ("d4", "node", "luminosity", "double"),
    ("d5", "node", "color", "string"),
    ("d6", "edge", "weight", "double"),
];

fn data<W: Write>(writer: &mut Writer<W>, key: &str, value: &str) -> quick_xml::Result<()> {
    writer
        .create_element("data")
        .with_attribute(("key", key))
        .write_text_content(BytesText::new(value))?;
    Ok(())
}

/// Serialize the styled graph as a GraphML document.
pub fn write_graphml<W: Write>(graph: &StyledGraph, out: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element("graphml")
        .with_attribute(("xmlns", GRAPHML_NS))
        .write_inner_content::<_, quick_xml::Error>(|w| {
            for (id, domain, name, ty) in KEYS {
                w.create_element("key")
                    .with_attributes([
                        ("id", id),
                        ("for", domain),
                        ("attr.name", name),
                        ("attr.type", ty),
                    ])
                    .write_empty()?;
            }

            w.create_element("graph")
                .with_attributes([("id", "G"), ("edgedefault", "undirected")])
                .write_inner_content::<_, quick_xml::Error>(|w| {
                    for idx in graph.node_indices() {
                        let node = &graph[idx];
                        let id = format!("n{}", idx.index());
                        w.create_element("node")
                            .with_attribute(("id", id.as_str()))
                            .write_inner_content::<_, quick_xml::Error>(|w| {
                                data(w, "d0", &node.label)?;
                                data(w, "d1", &node.size.to_string())?;
                                data(w, "d2", &node.community.to_string())?;
                                data(w, "d3", &node.color.hue.to_string())?;
                                data(w, "d4", &node.color.luminosity.to_string())?;
                                data(w, "d5", &node.color.to_rgb().to_string())?;
                                Ok(())
                            })?;
                    }

                    for edge in graph.edge_references() {
                        let source = format!("n{}", edge.source().index());
                        let target = format!("n{}", edge.target().index());
                        w.create_element("edge")
                            .with_attributes([("source", source.as_str()), ("target", target.as_str())])
                            .write_inner_content::<_, quick_xml::Error>(|w| {
                                data(w, "d6", &edge.weight().to_string())
                            })?;
                    }
                    Ok(())
                })?;
            Ok(())
        })?;

    writer.into_inner().flush()?;
    Ok(())
}

/// Write GraphML to a file.
pub fn save_graph_to_graphml(graph: &StyledGraph, path: impl AsRef<Path>) -> Result<()> {
    write_graphml(graph, BufWriter::new(File::create(path)?))
}
