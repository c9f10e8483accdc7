// SPDX-License-Identifier: MIT OR Apache-2.0
//! Authoring-time graph model for a compositing engine.
//!
//! This crate provides a typed, acyclic dataflow graph that describes:
//! - Sources (media, audio, text)
//! - Transforms and effects
//! - Composites and outputs
//! - Presets (reusable subgraphs with exposed parameters)
//!
//! ## Architecture
//!
//! The model is built around a single owning container, [`NodeGraph`]:
//! - Nodes and edges reference each other by id only
//! - Every edge goes through [`NodeGraph::connect`], which rejects
//!   self-loops, missing ports, type mismatches, duplicates and cycles
//! - Bulk-loaded graphs are checked with [`NodeGraph::validate`]
//! - Graphs are plain values; cloning gives an independent copy
//!
//! Execution is out of scope. An engine reads a validated graph, resolves
//! `sub_graph_id` through a [`PresetRegistry`] and walks
//! [`NodeGraph::topological_order`].

pub mod value;
pub mod port;
pub mod node;
pub mod edge;
pub mod error;
pub mod graph;
pub mod preset;
pub mod document;
pub mod config;
pub mod library;
pub mod operations;

pub use value::NodeValue;
pub use port::{NodePort, PortDirection, PortType};
pub use node::{Node, NodeId, OperationCategory, OperationRegistry, OperationType};
pub use edge::{Edge, EdgeId};
pub use error::{DocumentError, GraphError, ParameterError};
pub use graph::{GraphId, NodeGraph};
pub use preset::{ParameterPath, Preset, PresetId, PresetRegistry};
pub use document::{Document, DocumentFormat};
pub use config::LibraryConfig;
pub use library::{LibraryError, PresetLibrary};
pub use operations::builtin_registry;
