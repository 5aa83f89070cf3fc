//! Per-kind node schemas and document hydration
//!
//! Handle contracts and default payloads are re-derivable, so they are
//! never persisted; the registry rebuilds them when a document is loaded
//! and when a node is created.

use super::data::{
    AgentData, ConnectorData, GroupData, NodeData, NodeKind, TextData, ToolData,
};
use super::handles::HandleSpec;
use super::node::Node;
use crate::constants::handle::WILDCARD;
use egui::{Pos2, Vec2};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Static description of a node kind
pub struct NodeSchema {
    pub kind: NodeKind,
    pub type_label: &'static str,
    pub default_size: Vec2,
    build_data: fn() -> NodeData,
    build_handles: fn() -> HashMap<String, HandleSpec>,
}

impl NodeSchema {
    /// Default payload for this kind
    pub fn default_data(&self) -> NodeData {
        (self.build_data)()
    }

    /// Handle contracts for this kind
    pub fn handle_types(&self) -> HashMap<String, HandleSpec> {
        (self.build_handles)()
    }
}

fn no_handles() -> HashMap<String, HandleSpec> {
    HashMap::new()
}

fn agent_handles() -> HashMap<String, HandleSpec> {
    HashMap::from([
        (
            "in".to_string(),
            HandleSpec::input(&["prompt", "agent", "context"], &["str", "message"]),
        ),
        ("out".to_string(), HandleSpec::output("agent", "message")),
    ])
}

fn tool_handles() -> HashMap<String, HandleSpec> {
    HashMap::from([
        (
            "in".to_string(),
            HandleSpec::input(&["agent"], &["message", "str"]),
        ),
        ("out".to_string(), HandleSpec::output("tool", "json")),
    ])
}

fn connector_in_handles() -> HashMap<String, HandleSpec> {
    HashMap::from([("out".to_string(), HandleSpec::output(WILDCARD, WILDCARD))])
}

fn connector_out_handles() -> HashMap<String, HandleSpec> {
    HashMap::from([(
        "in".to_string(),
        HandleSpec::input(&[WILDCARD], &[WILDCARD]),
    )])
}

static SCHEMAS: Lazy<HashMap<NodeKind, NodeSchema>> = Lazy::new(|| {
    let entries = [
        NodeSchema {
            kind: NodeKind::Label,
            type_label: NodeKind::Label.type_label(),
            default_size: NodeKind::Label.default_size(),
            build_data: || NodeData::Label(TextData::default()),
            build_handles: no_handles,
        },
        NodeSchema {
            kind: NodeKind::Agent,
            type_label: NodeKind::Agent.type_label(),
            default_size: NodeKind::Agent.default_size(),
            build_data: || NodeData::Agent(AgentData::default()),
            build_handles: agent_handles,
        },
        NodeSchema {
            kind: NodeKind::Tool,
            type_label: NodeKind::Tool.type_label(),
            default_size: NodeKind::Tool.default_size(),
            build_data: || NodeData::Tool(ToolData::default()),
            build_handles: tool_handles,
        },
        NodeSchema {
            kind: NodeKind::Group,
            type_label: NodeKind::Group.type_label(),
            default_size: NodeKind::Group.default_size(),
            build_data: || NodeData::Group(GroupData::default()),
            build_handles: no_handles,
        },
        NodeSchema {
            kind: NodeKind::ConnectorIn,
            type_label: NodeKind::ConnectorIn.type_label(),
            default_size: NodeKind::ConnectorIn.default_size(),
            build_data: || NodeData::ConnectorIn(ConnectorData::default()),
            build_handles: connector_in_handles,
        },
        NodeSchema {
            kind: NodeKind::ConnectorOut,
            type_label: NodeKind::ConnectorOut.type_label(),
            default_size: NodeKind::ConnectorOut.default_size(),
            build_data: || NodeData::ConnectorOut(ConnectorData::default()),
            build_handles: connector_out_handles,
        },
    ];
    entries.into_iter().map(|s| (s.kind, s)).collect()
});

/// Schema for a node kind
pub fn schema(kind: NodeKind) -> Option<&'static NodeSchema> {
    SCHEMAS.get(&kind)
}

/// Creates a node of the given kind with default payload and hydrated
/// handle contracts. The store assigns the real id on insertion.
pub fn create_node(kind: NodeKind, position: Pos2) -> Node {
    let mut node = match schema(kind) {
        Some(schema) => Node::new(0, position, schema.default_data()),
        None => Node::new(0, position, NodeData::Label(TextData::default())),
    };
    node.handle_types = schema(kind).map(|s| s.handle_types()).unwrap_or_default();
    node
}

/// Rebuilds the transient handle contracts on freshly loaded nodes
pub fn hydrate(nodes: &mut [Node]) {
    for node in nodes {
        node.handle_types = schema(node.kind)
            .map(|s| s.handle_types())
            .unwrap_or_default();
    }
}
