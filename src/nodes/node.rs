//! Node entity and core node functionality

use super::data::{NodeData, NodeKind};
use super::handles::HandleSpec;
use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a node
pub type NodeId = usize;

/// Containment constraint limiting a child node's drag bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extent {
    /// Clamped to the owning parent's box
    Parent,
}

/// A node on the canvas
///
/// `position` is interpreted relative to the owning parent's frame when
/// `parent_id` is set, otherwise relative to the canvas's absolute frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    #[serde(with = "pos2_serde")]
    pub position: Pos2,
    /// Explicit box size; `None` falls back to the kind's default
    #[serde(default, with = "vec2_opt_serde", skip_serializing_if = "Option::is_none")]
    pub size: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,
    pub data: NodeData,
    /// Handle contracts keyed by node-local handle id. Re-derivable from the
    /// schema registry, so stripped on save and rebuilt on hydration.
    #[serde(skip)]
    pub handle_types: HashMap<String, HandleSpec>,
}

impl Node {
    /// Creates a new node with the given payload
    pub fn new(id: NodeId, position: Pos2, data: NodeData) -> Self {
        Self {
            id,
            kind: data.kind(),
            position,
            size: None,
            parent_id: None,
            extent: None,
            data,
            handle_types: HashMap::new(),
        }
    }

    /// Sets an explicit box size
    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    /// Places the node inside a parent group, parent-constrained
    pub fn with_parent(mut self, parent_id: NodeId) -> Self {
        self.parent_id = Some(parent_id);
        self.extent = Some(Extent::Parent);
        self
    }

    /// Current box size, falling back to the kind default
    pub fn current_size(&self) -> Vec2 {
        self.size.unwrap_or_else(|| self.kind.default_size())
    }

    /// Bounding rectangle in the node's own coordinate frame
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.current_size())
    }

    /// Whether the node is in expanded display mode
    pub fn is_expanded(&self) -> bool {
        self.data.display().map_or(false, |d| d.is_expanded)
    }

    /// Handle contract by node-local handle id
    pub fn handle(&self, handle_id: &str) -> Option<&HandleSpec> {
        self.handle_types.get(handle_id)
    }
}

// Serde helper module for Pos2
pub(crate) mod pos2_serde {
    use egui::Pos2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(pos: &Pos2, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [pos.x, pos.y].serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Pos2, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y] = <[f32; 2]>::deserialize(deserializer)?;
        Ok(Pos2::new(x, y))
    }
}

// Serde helper module for Option<Pos2>
pub(crate) mod pos2_opt_serde {
    use egui::Pos2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(pos: &Option<Pos2>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        pos.map(|p| [p.x, p.y]).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Pos2>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = <Option<[f32; 2]>>::deserialize(deserializer)?;
        Ok(raw.map(|[x, y]| Pos2::new(x, y)))
    }
}

// Serde helper module for Option<Vec2>
pub(crate) mod vec2_opt_serde {
    use egui::Vec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(size: &Option<Vec2>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        size.map(|v| [v.x, v.y]).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec2>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = <Option<[f32; 2]>>::deserialize(deserializer)?;
        Ok(raw.map(|[x, y]| Vec2::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::data::{AgentData, GroupData, TextData};

    #[test]
    fn test_size_falls_back_to_kind_default() {
        let node = Node::new(0, Pos2::ZERO, NodeData::Label(TextData::default()));
        assert_eq!(node.current_size(), NodeKind::Label.default_size());

        let sized = node.with_size(Vec2::new(220.0, 40.0));
        assert_eq!(sized.current_size(), Vec2::new(220.0, 40.0));
    }

    #[test]
    fn test_with_parent_applies_extent() {
        let node = Node::new(3, Pos2::new(10.0, 20.0), NodeData::Agent(AgentData::default()))
            .with_parent(1);
        assert_eq!(node.parent_id, Some(1));
        assert_eq!(node.extent, Some(Extent::Parent));
    }

    #[test]
    fn test_handle_types_are_not_serialized() {
        let mut node = Node::new(0, Pos2::ZERO, NodeData::Group(GroupData::default()));
        node.handle_types.insert(
            "out".to_string(),
            HandleSpec::Output {
                source: "agent".to_string(),
                data_type: "message".to_string(),
            },
        );
        let json = serde_json::to_string(&node).unwrap();
        assert!(!json.contains("handle_types"));

        let back: Node = serde_json::from_str(&json).unwrap();
        assert!(back.handle_types.is_empty());
    }
}
