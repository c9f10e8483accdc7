// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and edges.
//!
//! [`NodeGraph`] owns every node and edge and relates them by id. All edge
//! insertion goes through [`NodeGraph::connect`], which keeps the graph
//! acyclic and type-consistent. Graphs loaded in bulk must be checked with
//! [`NodeGraph::validate`] before they are handed to an execution engine.

use crate::edge::{Edge, EdgeId};
use crate::error::{GraphError, Result};
use crate::node::{Node, NodeId};
use crate::value::NodeValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(pub Uuid);

impl GraphId {
    /// Create a new random graph ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GraphId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A node graph.
///
/// Cloning produces an independent graph; there is no shared state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeGraph {
    /// Graph ID
    pub id: GraphId,
    /// Graph name
    pub name: String,
    /// Nodes in the graph
    #[serde(default)]
    nodes: IndexMap<NodeId, Node>,
    /// Edges between nodes
    #[serde(default)]
    edges: Vec<Edge>,
}

impl NodeGraph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GraphId::new(),
            name: name.into(),
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    /// Add a node, replacing any node with the same id.
    ///
    /// Edges are left alone on replacement. If the new node drops or retypes
    /// a port that an edge uses, the graph no longer passes [`Self::validate`]
    /// until the caller reconnects or removes those edges.
    pub fn add(&mut self, node: Node) -> NodeId {
        let id = node.id;
        if self.nodes.insert(id, node).is_some() {
            let incident = self.edges_for_node(id).count();
            if incident > 0 {
                tracing::warn!(
                    graph = %self.name,
                    node = %id,
                    edges = incident,
                    "replaced node with incident edges"
                );
            } else {
                tracing::debug!(graph = %self.name, node = %id, "replaced node");
            }
        } else {
            tracing::debug!(graph = %self.name, node = %id, "added node");
        }
        id
    }

    /// Remove a node and every edge touching it
    pub fn remove(&mut self, node_id: NodeId) -> Option<Node> {
        let node = self.nodes.shift_remove(&node_id)?;
        let before = self.edges.len();
        self.edges.retain(|e| !e.involves_node(node_id));
        tracing::debug!(
            graph = %self.name,
            node = %node_id,
            edges_removed = before - self.edges.len(),
            "removed node"
        );
        Some(node)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Whether a node is in the graph
    pub fn contains_node(&self, node_id: NodeId) -> bool {
        self.nodes.contains_key(&node_id)
    }

    /// Get all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Replace a node property. Returns false if the node is missing.
    pub fn set_property(
        &mut self,
        node_id: NodeId,
        key: impl Into<String>,
        value: NodeValue,
    ) -> bool {
        match self.nodes.get_mut(&node_id) {
            Some(node) => {
                node.properties.insert(key.into(), value);
                true
            }
            None => false,
        }
    }

    /// Move a node. Returns false if the node is missing.
    pub fn set_position(&mut self, node_id: NodeId, position: [f64; 2]) -> bool {
        match self.nodes.get_mut(&node_id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// Connect an output port to an input port.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// nodes exist, nodes differ, ports exist, types match, the edge is new,
    /// and the edge does not close a cycle.
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_port: &str,
        to_node: NodeId,
        to_port: &str,
    ) -> Result<EdgeId> {
        match self.check_connection(from_node, from_port, to_node, to_port) {
            Ok(()) => {
                let edge = Edge::new(from_node, from_port, to_node, to_port);
                let id = edge.id;
                self.edges.push(edge);
                tracing::debug!(
                    graph = %self.name,
                    edge = %id,
                    from = %from_node,
                    to = %to_node,
                    "connected"
                );
                Ok(id)
            }
            Err(err) => {
                tracing::trace!(graph = %self.name, code = err.code(), "rejected connection: {err}");
                Err(err)
            }
        }
    }

    /// Run every `connect` check without mutating the graph
    pub fn check_connection(
        &self,
        from_node: NodeId,
        from_port: &str,
        to_node: NodeId,
        to_port: &str,
    ) -> Result<()> {
        self.check_edge_shape(from_node, from_port, to_node, to_port)?;

        if self.edges.iter().any(|e| e.connects(from_node, from_port, to_node, to_port)) {
            return Err(GraphError::DuplicateEdge);
        }

        if self.would_create_cycle(from_node, to_node) {
            return Err(GraphError::CycleDetected);
        }

        Ok(())
    }

    /// Node existence, self-connection, port existence and type checks
    fn check_edge_shape(
        &self,
        from_node: NodeId,
        from_port: &str,
        to_node: NodeId,
        to_port: &str,
    ) -> Result<()> {
        let source_node = self.nodes.get(&from_node)
            .ok_or(GraphError::NodeNotFound(from_node))?;
        let target_node = self.nodes.get(&to_node)
            .ok_or(GraphError::NodeNotFound(to_node))?;

        if from_node == to_node {
            return Err(GraphError::SelfConnection);
        }

        let source_port = source_node.output(from_port)
            .ok_or_else(|| GraphError::PortNotFound(from_port.to_string()))?;
        let target_port = target_node.input(to_port)
            .ok_or_else(|| GraphError::PortNotFound(to_port.to_string()))?;

        if !source_port.can_connect(target_port) {
            return Err(GraphError::PortTypeMismatch {
                from: source_port.port_type,
                to: target_port.port_type,
            });
        }

        Ok(())
    }

    /// Whether adding `source -> target` would close a loop.
    ///
    /// True iff `source` is already reachable from `target`. Breadth-first
    /// over existing edges, so the cost is bounded by the edge count.
    pub fn would_create_cycle(&self, source: NodeId, target: NodeId) -> bool {
        if source == target {
            return true;
        }

        let adjacency = self.adjacency();
        let mut visited = HashSet::from([target]);
        let mut queue = VecDeque::from([target]);

        while let Some(current) = queue.pop_front() {
            let Some(next) = adjacency.get(&current) else {
                continue;
            };
            for &neighbor in next {
                if neighbor == source {
                    return true;
                }
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        false
    }

    /// Remove an edge
    pub fn disconnect(&mut self, edge_id: EdgeId) -> Option<Edge> {
        let index = self.edges.iter().position(|e| e.id == edge_id)?;
        let edge = self.edges.remove(index);
        tracing::debug!(graph = %self.name, edge = %edge_id, "disconnected");
        Some(edge)
    }

    /// Append an edge without any checks.
    ///
    /// For bulk loading only; run [`NodeGraph::validate`] afterwards.
    pub fn push_edge_unchecked(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Get an edge by ID
    pub fn edge(&self, edge_id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == edge_id)
    }

    /// Get all edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get edges leaving a node
    pub fn edges_from(&self, node_id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.from_node == node_id)
    }

    /// Get edges entering a node
    pub fn edges_to(&self, node_id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.to_node == node_id)
    }

    /// Get edges touching a node
    pub fn edges_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.involves_node(node_id))
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Outgoing neighbors per node, in edge order
    fn adjacency(&self) -> HashMap<NodeId, Vec<NodeId>> {
        let mut adjacency: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for edge in &self.edges {
            adjacency.entry(edge.from_node).or_default().push(edge.to_node);
        }
        adjacency
    }

    /// Whether the edge set contains a directed cycle.
    ///
    /// Depth-first with an explicit `(node, next neighbor)` stack so long
    /// chains cannot exhaust the call stack. Edges that point at missing
    /// nodes are still followed.
    pub fn has_cycle(&self) -> bool {
        let adjacency = self.adjacency();
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut on_path: HashSet<NodeId> = HashSet::new();
        let mut stack: Vec<(NodeId, usize)> = Vec::new();

        let roots = self.nodes.keys().chain(adjacency.keys());
        for &root in roots {
            if visited.contains(&root) {
                continue;
            }
            stack.push((root, 0));
            on_path.insert(root);

            while let Some((node, index)) = stack.last_mut() {
                let node = *node;
                let neighbors = adjacency.get(&node).map_or(&[][..], Vec::as_slice);

                if let Some(&neighbor) = neighbors.get(*index) {
                    *index += 1;
                    if on_path.contains(&neighbor) {
                        return true;
                    }
                    if !visited.contains(&neighbor) {
                        on_path.insert(neighbor);
                        stack.push((neighbor, 0));
                    }
                } else {
                    stack.pop();
                    on_path.remove(&node);
                    visited.insert(node);
                }
            }
        }

        false
    }

    /// Check every invariant of a bulk-loaded graph.
    ///
    /// Edges are checked in order with the same precedence as `connect`;
    /// cycles are checked last over the whole edge set.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for edge in &self.edges {
            self.check_edge_shape(edge.from_node, &edge.from_port, edge.to_node, &edge.to_port)?;
            let key = (edge.from_node, edge.from_port.as_str(), edge.to_node, edge.to_port.as_str());
            if !seen.insert(key) {
                return Err(GraphError::DuplicateEdge);
            }
        }

        if self.has_cycle() {
            return Err(GraphError::CycleDetected);
        }

        Ok(())
    }

    /// Get nodes in an order consistent with edge direction.
    ///
    /// Kahn's algorithm; ready nodes are taken in insertion order.
    pub fn topological_order(&self) -> Result<Vec<NodeId>> {
        let mut in_degree: IndexMap<NodeId, usize> = self.nodes.keys().map(|&id| (id, 0)).collect();
        for edge in &self.edges {
            if let Some(degree) = in_degree.get_mut(&edge.to_node) {
                *degree += 1;
            }
        }

        let adjacency = self.adjacency();
        let mut ready: VecDeque<NodeId> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(&id, _)| id)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(node) = ready.pop_front() {
            order.push(node);
            for neighbor in adjacency.get(&node).into_iter().flatten() {
                if let Some(degree) = in_degree.get_mut(neighbor) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push_back(*neighbor);
                    }
                }
            }
        }

        if order.len() != self.nodes.len() {
            return Err(GraphError::CycleDetected);
        }
        Ok(order)
    }
}

impl Default for NodeGraph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{NodePort, PortType};

    fn image_node(name: &str) -> Node {
        Node::new(name, "pass")
            .with_input(NodePort::named("in", PortType::Image))
            .with_output(NodePort::named("out", PortType::Image))
    }

    fn chain(len: usize) -> (NodeGraph, Vec<NodeId>) {
        let mut graph = NodeGraph::new("chain");
        let ids: Vec<NodeId> = (0..len).map(|i| graph.add(image_node(&format!("n{i}")))).collect();
        for pair in ids.windows(2) {
            graph.connect(pair[0], "out", pair[1], "in").unwrap();
        }
        (graph, ids)
    }

    /// Source -> Blur -> Sink
    fn scenario() -> (NodeGraph, NodeId, NodeId, NodeId) {
        let mut graph = NodeGraph::new("scenario");
        let source = graph.add(Node::new("Source", "source").with_output(NodePort::named("o1", PortType::Image)));
        let blur = graph.add(
            Node::new("Blur", "blur")
                .with_input(NodePort::named("i1", PortType::Image))
                .with_output(NodePort::named("o2", PortType::Image)),
        );
        let sink = graph.add(Node::new("Sink", "sink").with_input(NodePort::named("i1", PortType::Image)));
        (graph, source, blur, sink)
    }

    #[test]
    fn test_scenario_check_ordering() {
        let (mut graph, source, blur, sink) = scenario();

        graph.connect(source, "o1", blur, "i1").unwrap();
        graph.connect(blur, "o2", sink, "i1").unwrap();
        assert_eq!(graph.edge_count(), 2);

        // Sink has no outputs, so the port check fires before the cycle check
        let err = graph.connect(sink, "i1", source, "o1").unwrap_err();
        assert_eq!(err, GraphError::PortNotFound("i1".to_string()));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_self_connection_rejected_even_with_bad_ports() {
        let mut graph = NodeGraph::new("self");
        let node = graph.add(image_node("a"));

        assert_eq!(graph.connect(node, "out", node, "in"), Err(GraphError::SelfConnection));
        assert_eq!(graph.connect(node, "nope", node, "nope"), Err(GraphError::SelfConnection));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_missing_nodes() {
        let mut graph = NodeGraph::new("missing");
        let a = graph.add(image_node("a"));
        let ghost = NodeId::new();

        assert_eq!(graph.connect(ghost, "out", a, "in"), Err(GraphError::NodeNotFound(ghost)));
        assert_eq!(graph.connect(a, "out", ghost, "in"), Err(GraphError::NodeNotFound(ghost)));
    }

    #[test]
    fn test_port_direction_matters() {
        let mut graph = NodeGraph::new("direction");
        let a = graph.add(image_node("a"));
        let b = graph.add(image_node("b"));

        assert_eq!(graph.connect(a, "in", b, "in"), Err(GraphError::PortNotFound("in".to_string())));
        assert_eq!(graph.connect(a, "out", b, "out"), Err(GraphError::PortNotFound("out".to_string())));
    }

    #[test]
    fn test_type_mismatch_leaves_edges_unchanged() {
        for &from in PortType::all() {
            for &to in PortType::all() {
                if from == to {
                    continue;
                }
                let mut graph = NodeGraph::new("types");
                let a = graph.add(Node::new("a", "x").with_output(NodePort::named("o", from)));
                let b = graph.add(Node::new("b", "x").with_input(NodePort::named("i", to)));

                assert_eq!(
                    graph.connect(a, "o", b, "i"),
                    Err(GraphError::PortTypeMismatch { from, to })
                );
                assert_eq!(graph.edge_count(), 0);
            }
        }
    }

    #[test]
    fn test_unknown_ports_never_connect() {
        let mut graph = NodeGraph::new("unknown");
        let a = graph.add(Node::new("a", "x").with_output(NodePort::named("o", PortType::Unknown)));
        let b = graph.add(Node::new("b", "x").with_input(NodePort::named("i", PortType::Unknown)));

        assert!(matches!(graph.connect(a, "o", b, "i"), Err(GraphError::PortTypeMismatch { .. })));
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let mut graph = NodeGraph::new("dup");
        let a = graph.add(image_node("a"));
        let b = graph.add(image_node("b"));

        graph.connect(a, "out", b, "in").unwrap();
        assert_eq!(graph.connect(a, "out", b, "in"), Err(GraphError::DuplicateEdge));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_two_node_cycle_rejected() {
        let (mut graph, ids) = chain(2);
        assert_eq!(graph.connect(ids[1], "out", ids[0], "in"), Err(GraphError::CycleDetected));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_chain_cycle_rejected_and_detected() {
        let (mut graph, ids) = chain(12);
        let first = ids[0];
        let last = ids[ids.len() - 1];

        assert_eq!(graph.connect(last, "out", first, "in"), Err(GraphError::CycleDetected));
        assert!(!graph.has_cycle());
        assert!(graph.validate().is_ok());

        graph.push_edge_unchecked(Edge::new(last, "out", first, "in"));
        assert!(graph.has_cycle());
        assert_eq!(graph.validate(), Err(GraphError::CycleDetected));
        assert_eq!(graph.topological_order(), Err(GraphError::CycleDetected));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let mut graph = NodeGraph::new("diamond");
        let top = graph.add(image_node("top"));
        let left = graph.add(image_node("left"));
        let right = graph.add(image_node("right"));
        let bottom = graph.add(
            Node::new("bottom", "merge")
                .with_input(NodePort::named("a", PortType::Image))
                .with_input(NodePort::named("b", PortType::Image)),
        );

        graph.connect(top, "out", left, "in").unwrap();
        graph.connect(top, "out", right, "in").unwrap();
        graph.connect(left, "out", bottom, "a").unwrap();
        graph.connect(right, "out", bottom, "b").unwrap();

        assert!(!graph.has_cycle());
        assert!(!graph.would_create_cycle(left, right));
        assert!(graph.would_create_cycle(bottom, top));
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut graph = NodeGraph::new("deep");
        let ids: Vec<NodeId> = (0..50_000).map(|i| graph.add(image_node(&i.to_string()))).collect();
        for pair in ids.windows(2) {
            graph.push_edge_unchecked(Edge::new(pair[0], "out", pair[1], "in"));
        }
        assert!(!graph.has_cycle());

        graph.push_edge_unchecked(Edge::new(ids[ids.len() - 1], "out", ids[0], "in"));
        assert!(graph.has_cycle());
    }

    #[test]
    fn test_forced_self_loop_detected() {
        let mut graph = NodeGraph::new("loop");
        let a = graph.add(image_node("a"));
        graph.push_edge_unchecked(Edge::new(a, "out", a, "in"));

        assert!(graph.has_cycle());
        assert_eq!(graph.validate(), Err(GraphError::SelfConnection));
    }

    #[test]
    fn test_validate_reports_forced_problems() {
        let (mut graph, ids) = chain(3);
        graph.push_edge_unchecked(Edge::new(ids[0], "out", ids[1], "in"));
        assert_eq!(graph.validate(), Err(GraphError::DuplicateEdge));

        let (mut graph, ids) = chain(2);
        let ghost = NodeId::new();
        graph.push_edge_unchecked(Edge::new(ids[1], "out", ghost, "in"));
        assert_eq!(graph.validate(), Err(GraphError::NodeNotFound(ghost)));

        let (mut graph, ids) = chain(2);
        let audio = graph.add(Node::new("mix", "mix").with_input(NodePort::named("in", PortType::Audio)));
        graph.push_edge_unchecked(Edge::new(ids[1], "out", audio, "in"));
        assert_eq!(
            graph.validate(),
            Err(GraphError::PortTypeMismatch { from: PortType::Image, to: PortType::Audio })
        );
    }

    #[test]
    fn test_remove_cascades_incident_edges_only() {
        let mut graph = NodeGraph::new("cascade");
        let a = graph.add(image_node("a"));
        let b = graph.add(
            Node::new("b", "merge")
                .with_input(NodePort::named("in", PortType::Image))
                .with_output(NodePort::named("out", PortType::Image)),
        );
        let c = graph.add(image_node("c"));
        let d = graph.add(image_node("d"));
        let e = graph.add(image_node("e"));

        graph.connect(a, "out", b, "in").unwrap();
        graph.connect(b, "out", c, "in").unwrap();
        graph.connect(b, "out", d, "in").unwrap();
        graph.connect(d, "out", e, "in").unwrap();

        let incident = graph.edges_for_node(b).count();
        let before = graph.edge_count();
        let removed = graph.remove(b).unwrap();

        assert_eq!(removed.name, "b");
        assert_eq!(graph.edge_count(), before - incident);
        assert!(graph.edges().iter().all(|edge| !edge.involves_node(b)));
        assert_eq!(graph.edges_from(d).count(), 1);
        assert!(graph.remove(b).is_none());
        assert_eq!(graph.node_count(), 4);
    }

    #[test]
    fn test_add_is_an_upsert() {
        let mut graph = NodeGraph::new("upsert");
        let id = graph.add(image_node("first").with_property("radius", 1.0));
        graph.add(Node::new("second", "blur").with_id(id).with_position(5.0, 6.0));

        assert_eq!(graph.node_count(), 1);
        let node = graph.node(id).unwrap();
        assert_eq!(node.name, "second");
        assert_eq!(node.operation_type, "blur");
        assert_eq!(node.position, [5.0, 6.0]);
        assert!(node.properties.is_empty());
        assert!(node.inputs.is_empty());
    }

    #[test]
    fn test_replacing_a_connected_node_keeps_edges() {
        let (mut graph, ids) = chain(2);
        graph.add(Node::new("bare", "blur").with_id(ids[1]));

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.validate(), Err(GraphError::PortNotFound("in".to_string())));

        graph.add(image_node("restored").with_id(ids[1]));
        assert_eq!(graph.validate(), Ok(()));
    }

    #[test]
    fn test_disconnect() {
        let (mut graph, ids) = chain(3);
        let edge_id = graph.edges_from(ids[0]).next().unwrap().id;

        let edge = graph.disconnect(edge_id).unwrap();
        assert_eq!(edge.to_node, ids[1]);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.disconnect(edge_id).is_none());

        // The removed edge can now be re-created
        graph.connect(ids[0], "out", ids[1], "in").unwrap();
    }

    #[test]
    fn test_topological_order_respects_edges() {
        let mut graph = NodeGraph::new("order");
        let c = graph.add(image_node("c"));
        let a = graph.add(image_node("a"));
        let b = graph.add(image_node("b"));
        graph.connect(a, "out", b, "in").unwrap();
        graph.connect(b, "out", c, "in").unwrap();

        assert_eq!(graph.topological_order().unwrap(), vec![a, b, c]);
    }

    #[test]
    fn test_clones_are_independent() {
        let (graph, ids) = chain(3);
        let mut copy = graph.clone();
        copy.remove(ids[1]);
        copy.set_property(ids[0], "gain", NodeValue::Float(2.0));

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.node(ids[0]).unwrap().property("gain").is_none());
    }

    #[test]
    fn test_property_and_position_edits() {
        let (mut graph, ids) = chain(1);
        assert!(graph.set_property(ids[0], "radius", NodeValue::Float(3.0)));
        assert!(graph.set_property(ids[0], "radius", NodeValue::Int(4)));
        assert!(graph.set_position(ids[0], [1.0, 2.0]));
        assert!(!graph.set_property(NodeId::new(), "radius", NodeValue::Int(0)));

        let node = graph.node(ids[0]).unwrap();
        assert_eq!(node.property("radius"), Some(&NodeValue::Int(4)));
        assert_eq!(node.position, [1.0, 2.0]);
    }

    #[test]
    fn test_serialization_round_trip() {
        let (graph, ids) = chain(3);
        let json = serde_json::to_value(&graph).unwrap();
        assert!(json["nodes"][ids[0].0.to_string()].is_object());
        assert_eq!(json["edges"].as_array().unwrap().len(), 2);

        let loaded: NodeGraph = serde_json::from_value(json).unwrap();
        assert_eq!(loaded, graph);
    }
}
