//! Output formatting for a built tree.
//!
//! Provides functions to write a [`PathTree`] as rendered tree text or as JSON, to
//! any writer or to a file.

use crate::options::{ArboOptions, OutputFormat};
use crate::render::Renderer;
use crate::tree::{NodeId, PathTree};
use crate::ArboError;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serializable view of one node: its component text and its children.
#[derive(Debug, Serialize)]
pub struct JsonNode<'t> {
    pub name: &'t str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<JsonNode<'t>>,
}

impl<'t> JsonNode<'t> {
    fn from_tree(tree: &'t PathTree, id: NodeId) -> Self {
        let node = tree.node(id);
        Self {
            name: node.value().map_or("", |value| value.as_str()),
            children: node
                .children()
                .iter()
                .map(|&child| JsonNode::from_tree(tree, child))
                .collect(),
        }
    }
}

/// The children of the synthetic root, as [`JsonNode`]s.
pub fn json_nodes(tree: &PathTree) -> Vec<JsonNode<'_>> {
    tree.node(tree.root())
        .children()
        .iter()
        .map(|&id| JsonNode::from_tree(tree, id))
        .collect()
}

/// Writes the tree to `out` in the configured format.
pub fn write_tree<W: Write>(
    tree: &PathTree,
    options: &ArboOptions,
    out: &mut W,
) -> Result<(), ArboError> {
    match options.format {
        OutputFormat::Tree => Renderer::new(options.style, options.charset)
            .separator(options.separator)
            .write(tree, out),
        OutputFormat::Json => {
            let nodes = json_nodes(tree);
            let written = if options.pretty {
                serde_json::to_writer_pretty(&mut *out, &nodes)
            } else {
                serde_json::to_writer(&mut *out, &nodes)
            };
            written.map_err(|e| ArboError::Write(e.into()))?;
            writeln!(out).map_err(ArboError::Write)?;
            out.flush().map_err(ArboError::Write)
        }
    }
}

/// Formats the tree into a string.
pub fn format_tree(tree: &PathTree, options: &ArboOptions) -> String {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_tree(tree, options, &mut out);
    String::from_utf8_lossy(&out).into_owned()
}

/// Writes the formatted tree to a file.
pub fn write_tree_to_file(
    tree: &PathTree,
    options: &ArboOptions,
    path: impl AsRef<Path>,
) -> Result<(), ArboError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| ArboError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_tree(tree, options, &mut out).map_err(|e| match e {
        ArboError::Write(source) => ArboError::io(path, source),
        other => other,
    })
}
