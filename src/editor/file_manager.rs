//! Document format and file state management
//!
//! A flow document is the persisted shape of one canvas: nodes, edges,
//! and viewport, plus metadata. Transient, re-derivable node state
//! (handle contracts) is stripped on save and rebuilt from the schema
//! registry on load.

use crate::nodes::{schema, Edge, NodeGraph, Node, Viewport};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persisted canvas document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowDocument {
    pub version: String,
    pub metadata: FlowMetadata,
    pub viewport: Viewport,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Metadata for flow documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowMetadata {
    pub created: String,  // ISO 8601 timestamp
    pub modified: String, // ISO 8601 timestamp
    pub creator: String,
    pub description: String,
}

impl FlowDocument {
    /// Snapshots a live graph into document form
    pub fn from_graph(graph: &NodeGraph) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            version: "1.0".to_string(),
            metadata: FlowMetadata {
                created: now.clone(),
                modified: now,
                creator: "Weft 0.1".to_string(),
                description: "Agent workflow created with Weft".to_string(),
            },
            viewport: graph.viewport,
            nodes: graph.nodes().to_vec(),
            edges: graph.edges.clone(),
        }
    }

    /// Rebuilds a live graph, hydrating transient node state
    pub fn into_graph(self) -> NodeGraph {
        let mut nodes = self.nodes;
        schema::hydrate(&mut nodes);
        NodeGraph::from_parts(nodes, self.edges, self.viewport)
    }
}

/// Manages file operations for the editor
pub struct FileManager {
    /// Current file path (None if unsaved/new file)
    current_file_path: Option<PathBuf>,
    /// Whether the document has been modified since last save
    is_modified: bool,
}

impl FileManager {
    /// Create a new file manager
    pub fn new() -> Self {
        Self {
            current_file_path: None,
            is_modified: false,
        }
    }

    /// Get the current file path
    pub fn current_file_path(&self) -> Option<&PathBuf> {
        self.current_file_path.as_ref()
    }

    /// Check if there are unsaved changes
    pub fn has_unsaved_changes(&self) -> bool {
        self.is_modified
    }

    /// Mark the document as modified
    pub fn mark_modified(&mut self) {
        self.is_modified = true;
    }

    /// Mark the document as saved (no modifications)
    pub fn mark_saved(&mut self) {
        self.is_modified = false;
    }

    /// Get display name for the current file
    pub fn get_file_display_name(&self) -> String {
        match &self.current_file_path {
            Some(path) => {
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("Unknown");

                if self.is_modified {
                    format!("{}*", file_name)
                } else {
                    file_name.to_string()
                }
            }
            None => {
                if self.is_modified {
                    "Untitled*".to_string()
                } else {
                    "Untitled".to_string()
                }
            }
        }
    }

    /// Create a new file (reset state)
    pub fn new_file(&mut self) {
        self.current_file_path = None;
        self.is_modified = false;
    }

    /// Save the current graph to a file
    pub fn save_to_file(&mut self, file_path: &Path, graph: &NodeGraph) -> Result<(), String> {
        let document = FlowDocument::from_graph(graph);

        let json_content = serde_json::to_string_pretty(&document)
            .map_err(|e| format!("Failed to serialize document: {}", e))?;

        std::fs::write(file_path, json_content)
            .map_err(|e| format!("Failed to write file: {}", e))?;

        self.current_file_path = Some(file_path.to_path_buf());
        self.is_modified = false;
        log::debug!("Saved flow to {}", file_path.display());

        Ok(())
    }

    /// Load a graph from a file
    pub fn load_from_file(&mut self, file_path: &Path) -> Result<NodeGraph, String> {
        let json_content = std::fs::read_to_string(file_path)
            .map_err(|e| format!("Failed to read file: {}", e))?;

        let document: FlowDocument = serde_json::from_str(&json_content)
            .map_err(|e| format!("Failed to parse document: {}", e))?;

        self.current_file_path = Some(file_path.to_path_buf());
        self.is_modified = false;

        Ok(document.into_graph())
    }
}

impl Default for FileManager {
    fn default() -> Self {
        Self::new()
    }
}
