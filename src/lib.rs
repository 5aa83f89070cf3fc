//! Weft - structural core for an agent workflow graph editor
//!
//! Users place typed nodes on a canvas, connect them through typed
//! handles, and group them hierarchically. This crate owns the entity
//! model and the transition rules: coordinate frames across
//! expand/collapse and grouping, the two resize protocols, the handle
//! compatibility matcher gating every new edge, and the cross-document
//! node search index. Rendering and execution live elsewhere.

pub mod constants;
pub mod editor;
pub mod nodes;

// Re-export commonly used types
pub use editor::{FileManager, FlowDocument, NodeSearchIndex, SearchOverlay};
pub use nodes::{
    Edge, GraphIntent, HandleSpec, Node, NodeData, NodeGraph, NodeId, NodeKind, Viewport,
};
