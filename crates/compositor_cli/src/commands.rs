// SPDX-License-Identifier: MIT OR Apache-2.0
//! Subcommand implementations.

use anyhow::Context as _;
use compositor_graph::document::{GRAPH_EXTENSION, PRESET_EXTENSION};
use compositor_graph::{
    Document, DocumentError, DocumentFormat, LibraryConfig, NodeGraph, Preset,
};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A decoded file, before validation
enum Loaded {
    Graph(NodeGraph),
    Preset(Preset),
}

impl Loaded {
    fn graph(&self) -> &NodeGraph {
        match self {
            Self::Graph(graph) => graph,
            Self::Preset(preset) => &preset.internal_graph,
        }
    }

    fn check(&self) -> Result<(), DocumentError> {
        match self {
            Self::Graph(graph) => graph.check(),
            Self::Preset(preset) => preset.check(),
        }
    }
}

/// Decode a file as a graph or preset by extension. Generic `.json`/`.ron`
/// files are tried as a preset first. A preset document also decodes as an
/// empty graph, since it shares `id` and `name` and the graph's node and edge
/// lists default to empty, but a graph document never carries `internalGraph`.
fn read(path: &Path) -> anyhow::Result<Loaded> {
    let format = DocumentFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some(GRAPH_EXTENSION) => Ok(Loaded::Graph(NodeGraph::decode_unchecked(&text, format)?)),
        Some(PRESET_EXTENSION) => Ok(Loaded::Preset(Preset::decode_unchecked(&text, format)?)),
        _ => match Preset::decode_unchecked(&text, format) {
            Ok(preset) => Ok(Loaded::Preset(preset)),
            Err(_) => Ok(Loaded::Graph(NodeGraph::decode_unchecked(&text, format)?)),
        },
    }
}

fn read_valid(path: &Path) -> anyhow::Result<Loaded> {
    let loaded = read(path)?;
    loaded.check().with_context(|| format!("validating {}", path.display()))?;
    Ok(loaded)
}

/// Render a validation failure for humans
fn describe(err: &DocumentError) -> String {
    match err {
        DocumentError::Invalid(graph_err) => format!(
            "error {}: {}: {}",
            graph_err.code(),
            graph_err.title(),
            graph_err.description()
        ),
        other => format!("error: {other}"),
    }
}

/// Check each file; returns the number of failures
pub fn validate(files: &[PathBuf], out: &mut impl Write) -> anyhow::Result<usize> {
    let mut failures = 0;
    for path in files {
        let result = read(path).and_then(|loaded| loaded.check().map_err(anyhow::Error::from));
        match result {
            Ok(()) => writeln!(out, "{}: ok", path.display())?,
            Err(err) => {
                failures += 1;
                let message = match err.downcast_ref::<DocumentError>() {
                    Some(doc_err) => describe(doc_err),
                    None => format!("error: {err:#}"),
                };
                tracing::warn!("{} failed validation", path.display());
                writeln!(out, "{}: {message}", path.display())?;
            }
        }
    }
    Ok(failures)
}

/// Print node and edge summaries
pub fn info(path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let loaded = read(path)?;
    if let Loaded::Preset(preset) = &loaded {
        writeln!(out, "preset {} ({})", preset.name, preset.id)?;
        if !preset.description.is_empty() {
            writeln!(out, "  {}", preset.description)?;
        }
    }

    let graph = loaded.graph();
    writeln!(
        out,
        "graph {} ({}): {} node(s), {} edge(s)",
        graph.name,
        graph.id,
        graph.node_count(),
        graph.edge_count()
    )?;
    for node in graph.nodes() {
        writeln!(
            out,
            "  {} [{}] in={} out={} props={}{}",
            node.name,
            node.operation_type,
            node.inputs.len(),
            node.outputs.len(),
            node.properties.len(),
            node.sub_graph_id.map(|id| format!(" subgraph={id}")).unwrap_or_default()
        )?;
    }
    if let Err(err) = loaded.check() {
        writeln!(out, "{}", describe(&err))?;
    }
    Ok(())
}

/// Print nodes in an order consistent with edge direction
pub fn order(path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let loaded = read_valid(path)?;
    let graph = loaded.graph();
    for (index, id) in graph.topological_order()?.into_iter().enumerate() {
        if let Some(node) = graph.node(id) {
            writeln!(out, "{index:>4}  {} [{}]", node.name, node.operation_type)?;
        }
    }
    Ok(())
}

/// List exposed parameters and whether they resolve
pub fn params(preset: &str, config: &LibraryConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let path = Path::new(preset);
    let path = if path.is_file() {
        path.to_path_buf()
    } else {
        config
            .resolve(preset)
            .with_context(|| format!("preset '{preset}' not found in search paths"))?
    };

    let preset = Preset::load(&path)?;
    writeln!(out, "{} ({} parameter(s))", preset.name, preset.exposed_parameters.len())?;
    for (name, raw) in &preset.exposed_parameters {
        match preset.resolve_parameter(name) {
            Ok((_, value)) => writeln!(out, "  {name} -> {raw} = {value:?}")?,
            Err(err) => writeln!(out, "  {name} -> {raw} (unresolved: {err})")?,
        }
    }
    Ok(())
}
