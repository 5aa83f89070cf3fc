//! Node system - entities, containment, transforms, and connection rules

// Core node system modules
pub mod data;
pub mod graph;
pub mod grouping;
pub mod handles;
pub mod node;
pub mod resize;
pub mod schema;
pub mod transform;

// Re-export core types
pub use data::{
    AgentData, ConnectorData, DisplayModeState, FontStyle, FontWeight, GroupData, NodeData,
    NodeKind, TextAlign, TextData, ToolData,
};
pub use graph::{Edge, EdgeId, GraphIntent, NodeGraph, Viewport};
pub use handles::{handles_compatible, is_compatible, HandleSpec};
pub use node::{Extent, Node, NodeId};
pub use resize::{font_size, FontMetrics, TextMeasure};
pub use schema::{create_node, hydrate, schema, NodeSchema};
