//! Node graph store: nodes, edges, viewport, and the intent reducer
//!
//! The store is the single source of truth. Every mutation is expressed
//! as a pure function from the old node collection to a new one and the
//! whole collection is swapped, so readers mid-render never observe a
//! torn state.

use super::grouping;
use super::handles::handles_compatible;
use super::node::{Node, NodeId};
use super::resize::{self, TextMeasure};
use super::transform;
use egui::Vec2;
use serde::{Deserialize, Serialize};

/// Unique identifier for an edge
pub type EdgeId = usize;

/// A connection between two handles on different nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from_node: NodeId,
    pub from_handle: String,
    pub to_node: NodeId,
    pub to_handle: String,
}

/// Canvas pan/zoom state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Discrete mutation intents accepted by the store
///
/// Callers never mutate nodes in place; each intent is reduced to a fresh
/// collection.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphIntent {
    Expand(NodeId),
    Collapse(NodeId),
    ResizeCorner { id: NodeId, size: Vec2 },
    ResizeEdge { id: NodeId, size: Vec2 },
    Detach(NodeId),
    SetLabel { id: NodeId, label: String },
}

/// A graph of nodes and their edges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub viewport: Viewport,
    next_node_id: NodeId,
    next_edge_id: EdgeId,
}

impl NodeGraph {
    /// Creates a new empty graph
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            viewport: Viewport::default(),
            next_node_id: 0,
            next_edge_id: 0,
        }
    }

    /// Reassembles a graph from loaded parts, restoring the id allocators
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>, viewport: Viewport) -> Self {
        let next_node_id = nodes.iter().map(|n| n.id + 1).max().unwrap_or(0);
        let next_edge_id = edges.iter().map(|e| e.id + 1).max().unwrap_or(0);
        Self {
            nodes,
            edges,
            viewport,
            next_node_id,
            next_edge_id,
        }
    }

    /// All nodes in canvas order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node by id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Replaces the whole node collection
    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        for node in &nodes {
            if node.id >= self.next_node_id {
                self.next_node_id = node.id + 1;
            }
        }
        self.nodes = nodes;
    }

    /// Adds a node to the graph and returns its id
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = self.next_node_id;
        node.id = id;
        self.nodes.push(node);
        self.next_node_id += 1;
        id
    }

    /// Adds a node with a specific id, keeping the allocator monotonic
    pub fn add_node_with_id(&mut self, id: NodeId, mut node: Node) -> NodeId {
        node.id = id;
        self.nodes.push(node);
        if id >= self.next_node_id {
            self.next_node_id = id + 1;
        }
        id
    }

    /// Direct children of a group node
    ///
    /// The store never re-parents on its own; callers removing a group use
    /// this to apply their delete-or-reparent policy to the children.
    pub fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.parent_id == Some(id))
            .map(|n| n.id)
            .collect()
    }

    /// Removes a node and every edge touching it
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        self.edges
            .retain(|e| e.from_node != id && e.to_node != id);
        let index = self.nodes.iter().position(|n| n.id == id)?;
        Some(self.nodes.remove(index))
    }

    /// Admits a new edge between two handles
    ///
    /// The compatibility matcher gates every admission; a missing node,
    /// missing handle, or incompatible contract is rejected. Edges already
    /// in the graph are not re-validated.
    pub fn add_edge(
        &mut self,
        from_node: NodeId,
        from_handle: &str,
        to_node: NodeId,
        to_handle: &str,
    ) -> Result<EdgeId, &'static str> {
        if from_node == to_node {
            return Err("cannot connect a node to itself");
        }
        let from = self.node(from_node).ok_or("source node does not exist")?;
        let to = self.node(to_node).ok_or("target node does not exist")?;
        let from_spec = from.handle(from_handle).ok_or("source handle does not exist")?;
        let to_spec = to.handle(to_handle).ok_or("target handle does not exist")?;
        if !handles_compatible(from_spec, to_spec) {
            return Err("handles are not compatible");
        }

        let id = self.next_edge_id;
        self.next_edge_id += 1;
        self.edges.push(Edge {
            id,
            from_node,
            from_handle: from_handle.to_string(),
            to_node,
            to_handle: to_handle.to_string(),
        });
        Ok(id)
    }

    /// Removes an edge by id
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let index = self.edges.iter().position(|e| e.id == id)?;
        Some(self.edges.remove(index))
    }

    /// Applies an intent by swapping in the reduced collection
    pub fn dispatch(&mut self, intent: GraphIntent, measure: &dyn TextMeasure) {
        self.nodes = reduce(&self.nodes, &intent, measure);
    }
}

impl Default for NodeGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure reducer from an old node collection to a new one
///
/// Unknown ids reduce to an unchanged collection.
pub fn reduce(nodes: &[Node], intent: &GraphIntent, measure: &dyn TextMeasure) -> Vec<Node> {
    match intent {
        GraphIntent::Detach(id) => grouping::detach(nodes, *id),
        GraphIntent::Expand(id) => map_node(nodes, *id, transform::expand),
        GraphIntent::Collapse(id) => map_node(nodes, *id, transform::collapse),
        GraphIntent::ResizeCorner { id, size } => {
            map_node(nodes, *id, |n| resize::corner_resize(n, *size))
        }
        GraphIntent::ResizeEdge { id, size } => {
            map_node(nodes, *id, |n| resize::edge_resize(n, *size))
        }
        GraphIntent::SetLabel { id, label } => {
            map_node(nodes, *id, |n| resize::apply_label_edit(n, label, measure))
        }
    }
}

fn map_node(nodes: &[Node], id: NodeId, edit: impl Fn(&mut Node)) -> Vec<Node> {
    nodes
        .iter()
        .map(|n| {
            if n.id == id {
                let mut next = n.clone();
                edit(&mut next);
                next
            } else {
                n.clone()
            }
        })
        .collect()
}
