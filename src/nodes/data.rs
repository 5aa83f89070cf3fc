//! Node kinds and their typed payloads
//!
//! Each node kind carries its own payload struct; consumers branch with an
//! exhaustive match instead of downcasting an untyped bag.

use crate::constants;
use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Tag selecting which payload variant a node carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Label,
    Agent,
    Tool,
    Group,
    ConnectorIn,
    ConnectorOut,
}

impl NodeKind {
    /// Human-readable label for this kind
    pub fn type_label(self) -> &'static str {
        match self {
            NodeKind::Label => "Label",
            NodeKind::Agent => "Agent",
            NodeKind::Tool => "Tool",
            NodeKind::Group => "Group",
            NodeKind::ConnectorIn => "Connector In",
            NodeKind::ConnectorOut => "Connector Out",
        }
    }

    /// Default box size for nodes of this kind without an explicit size
    pub fn default_size(self) -> Vec2 {
        match self {
            NodeKind::Label => Vec2::new(constants::node::DEFAULT_WIDTH, 34.0),
            NodeKind::Agent => Vec2::new(180.0, 80.0),
            NodeKind::Tool => Vec2::new(160.0, 60.0),
            NodeKind::Group => Vec2::new(300.0, 200.0),
            NodeKind::ConnectorIn | NodeKind::ConnectorOut => {
                Vec2::from(constants::node::DEFAULT_SIZE)
            }
        }
    }
}

/// Font weight for text nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Font style for text nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
}

/// Horizontal text alignment for text nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Cached geometry for the expand/collapse display modes
///
/// Positions and sizes are remembered across toggles so each toggle is
/// reversible without data loss. `expanded_size` is applied by the renderer
/// while the node is expanded; the core never writes it into the node box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayModeState {
    #[serde(default)]
    pub is_expanded: bool,
    #[serde(default, with = "super::node::vec2_opt_serde")]
    pub expanded_size: Option<Vec2>,
    #[serde(default, with = "super::node::pos2_opt_serde")]
    pub expanded_position: Option<Pos2>,
    #[serde(default, with = "super::node::pos2_opt_serde")]
    pub contracted_position: Option<Pos2>,
}

/// Payload for label nodes: styled, resizable text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    pub label: String,
    pub font_family: String,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub text_align: TextAlign,
    pub color: [u8; 4],
    /// Once set, text edits never change the box size
    #[serde(default)]
    pub manually_resized: bool,
    /// Width basis for the derived font size; diverges from the box width
    /// only after a resize that preserves font size independent of the box
    pub font_scale_width: f32,
    #[serde(default)]
    pub display: DisplayModeState,
}

impl Default for TextData {
    fn default() -> Self {
        Self {
            label: String::new(),
            font_family: "sans-serif".to_string(),
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            text_align: TextAlign::Center,
            color: [255, 255, 255, 255],
            manually_resized: false,
            font_scale_width: constants::node::DEFAULT_WIDTH,
            display: DisplayModeState::default(),
        }
    }
}

/// Payload for agent nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentData {
    pub label: String,
    pub prompt: String,
    pub model: String,
    #[serde(default)]
    pub display: DisplayModeState,
}

/// Payload for tool nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolData {
    pub label: String,
    pub command: String,
    #[serde(default)]
    pub display: DisplayModeState,
}

/// Payload for group nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupData {
    pub label: String,
    pub color: [u8; 4],
}

/// Payload for connector-in / connector-out nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectorData {
    pub label: String,
    /// Named channel linking a connector-out to its connector-in twin
    pub channel: String,
}

/// Kind-specific node payload, always carrying at least a display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "kebab-case")]
pub enum NodeData {
    Label(TextData),
    Agent(AgentData),
    Tool(ToolData),
    Group(GroupData),
    ConnectorIn(ConnectorData),
    ConnectorOut(ConnectorData),
}

impl NodeData {
    /// Kind tag matching this payload variant
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Label(_) => NodeKind::Label,
            NodeData::Agent(_) => NodeKind::Agent,
            NodeData::Tool(_) => NodeKind::Tool,
            NodeData::Group(_) => NodeKind::Group,
            NodeData::ConnectorIn(_) => NodeKind::ConnectorIn,
            NodeData::ConnectorOut(_) => NodeKind::ConnectorOut,
        }
    }

    /// Display label for this node
    pub fn label(&self) -> &str {
        match self {
            NodeData::Label(d) => &d.label,
            NodeData::Agent(d) => &d.label,
            NodeData::Tool(d) => &d.label,
            NodeData::Group(d) => &d.label,
            NodeData::ConnectorIn(d) | NodeData::ConnectorOut(d) => &d.label,
        }
    }

    /// Replaces the display label
    pub fn set_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        match self {
            NodeData::Label(d) => d.label = label,
            NodeData::Agent(d) => d.label = label,
            NodeData::Tool(d) => d.label = label,
            NodeData::Group(d) => d.label = label,
            NodeData::ConnectorIn(d) | NodeData::ConnectorOut(d) => d.label = label,
        }
    }

    /// Text payload, for kinds whose box auto-fits to their text
    pub fn text(&self) -> Option<&TextData> {
        match self {
            NodeData::Label(d) => Some(d),
            _ => None,
        }
    }

    /// Mutable text payload
    pub fn text_mut(&mut self) -> Option<&mut TextData> {
        match self {
            NodeData::Label(d) => Some(d),
            _ => None,
        }
    }

    /// Display-mode cache, for kinds that support expand/collapse
    pub fn display(&self) -> Option<&DisplayModeState> {
        match self {
            NodeData::Label(d) => Some(&d.display),
            NodeData::Agent(d) => Some(&d.display),
            NodeData::Tool(d) => Some(&d.display),
            NodeData::Group(_) | NodeData::ConnectorIn(_) | NodeData::ConnectorOut(_) => None,
        }
    }

    /// Mutable display-mode cache
    pub fn display_mut(&mut self) -> Option<&mut DisplayModeState> {
        match self {
            NodeData::Label(d) => Some(&mut d.display),
            NodeData::Agent(d) => Some(&mut d.display),
            NodeData::Tool(d) => Some(&mut d.display),
            NodeData::Group(_) | NodeData::ConnectorIn(_) | NodeData::ConnectorOut(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_payload() {
        let data = NodeData::Agent(AgentData {
            label: "Planner".to_string(),
            ..Default::default()
        });
        assert_eq!(data.kind(), NodeKind::Agent);
        assert_eq!(data.label(), "Planner");
    }

    #[test]
    fn test_set_label_reaches_every_variant() {
        let mut variants = vec![
            NodeData::Label(TextData::default()),
            NodeData::Agent(AgentData::default()),
            NodeData::Tool(ToolData::default()),
            NodeData::Group(GroupData::default()),
            NodeData::ConnectorIn(ConnectorData::default()),
            NodeData::ConnectorOut(ConnectorData::default()),
        ];
        for data in &mut variants {
            data.set_label("renamed");
            assert_eq!(data.label(), "renamed");
        }
    }

    #[test]
    fn test_display_cache_only_on_expandable_kinds() {
        assert!(NodeData::Agent(AgentData::default()).display().is_some());
        assert!(NodeData::Group(GroupData::default()).display().is_none());
        assert!(NodeData::ConnectorIn(ConnectorData::default()).display().is_none());
    }
}
