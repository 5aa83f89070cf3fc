//! Cross-document node search
//!
//! A flattened snapshot of every open document's nodes, rebuilt on demand
//! when the cache ages out. The active document is read from the live
//! canvas snapshot so unsaved edits are searchable; all other documents
//! come from the external loader, one at a time, in tab order. A slow or
//! failing load for one document never aborts the rest of the rebuild.

use crate::constants::search::{INDEX_TTL, MAX_RESULTS};
use crate::editor::file_manager::FlowDocument;
use crate::nodes::{NodeId, NodeKind};
use std::path::Path;
use std::time::Instant;

/// One open document tab
#[derive(Debug, Clone)]
pub struct TabInfo {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

/// Where document flows come from
///
/// `current_flow` snapshots the live canvas of the active tab;
/// `load_tab_flow` fetches any other tab's persisted flow. `Ok(None)`
/// means "no saved content" and is not an error.
pub trait FlowSource {
    fn current_flow(&self) -> FlowDocument;
    fn load_tab_flow(&self, project_path: &Path, tab_id: &str)
        -> Result<Option<FlowDocument>, String>;
}

/// Flattened, searchable snapshot of one node
#[derive(Debug, Clone, PartialEq)]
pub struct SearchEntry {
    pub node_id: NodeId,
    pub node_name: String,
    pub node_kind: NodeKind,
    pub kind_label: String,
    pub tab_id: String,
    pub tab_name: String,
    /// Precomputed lowercase blob the query is matched against
    pub searchable: String,
}

/// A search hit handed to the overlay; drops the searchable blob
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub node_id: NodeId,
    pub node_name: String,
    pub node_kind: NodeKind,
    pub kind_label: String,
    pub tab_id: String,
    pub tab_name: String,
}

impl SearchEntry {
    fn to_result(&self) -> SearchResult {
        SearchResult {
            node_id: self.node_id,
            node_name: self.node_name.clone(),
            node_kind: self.node_kind,
            kind_label: self.kind_label.clone(),
            tab_id: self.tab_id.clone(),
            tab_name: self.tab_name.clone(),
        }
    }
}

/// TTL-cached flat index over all open documents
#[derive(Debug, Default)]
pub struct NodeSearchIndex {
    entries: Vec<SearchEntry>,
    built_at: Option<Instant>,
    building: bool,
}

impl NodeSearchIndex {
    /// Creates an empty, stale index
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a rebuild is currently running
    pub fn is_building(&self) -> bool {
        self.building
    }

    /// Whether the cache is absent or older than the TTL at `now`
    ///
    /// Staleness is a scheduling decision, never an error.
    pub fn is_stale(&self, now: Instant) -> bool {
        match self.built_at {
            Some(built_at) => now.duration_since(built_at) >= INDEX_TTL,
            None => true,
        }
    }

    /// All cached entries
    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    /// Rebuilds the index if it is stale; returns whether a rebuild ran
    ///
    /// A request arriving while a rebuild is already in flight collapses
    /// into the running one instead of queueing.
    pub fn ensure_built(
        &mut self,
        now: Instant,
        project_path: &Path,
        tabs: &[TabInfo],
        source: &dyn FlowSource,
    ) -> bool {
        if self.building {
            return false;
        }
        if !self.is_stale(now) {
            return false;
        }
        self.rebuild(now, project_path, tabs, source);
        true
    }

    /// Unconditionally rebuilds the cached entries, tab by tab
    pub fn rebuild(
        &mut self,
        now: Instant,
        project_path: &Path,
        tabs: &[TabInfo],
        source: &dyn FlowSource,
    ) {
        self.building = true;
        let mut entries = Vec::new();

        for tab in tabs {
            let document = if tab.is_active {
                Some(source.current_flow())
            } else {
                match source.load_tab_flow(project_path, &tab.id) {
                    Ok(document) => document,
                    Err(e) => {
                        log::warn!("search index: failed to load tab {}: {}", tab.id, e);
                        None
                    }
                }
            };
            let Some(document) = document else {
                continue;
            };
            for node in &document.nodes {
                entries.push(entry_for(node, tab));
            }
        }

        log::debug!(
            "search index rebuilt: {} entries across {} tabs",
            entries.len(),
            tabs.len()
        );
        self.entries = entries;
        self.built_at = Some(now);
        self.building = false;
    }

    /// Substring query over the cached entries
    ///
    /// Preserves entry order and truncates to the result cap. An empty
    /// query matches nothing.
    pub fn query(&self, text: &str) -> Vec<SearchResult> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|e| e.searchable.contains(&needle))
            .take(MAX_RESULTS)
            .map(SearchEntry::to_result)
            .collect()
    }
}

fn entry_for(node: &crate::nodes::Node, tab: &TabInfo) -> SearchEntry {
    let kind_label = node.kind.type_label().to_string();
    let node_name = if node.data.label().is_empty() {
        kind_label.clone()
    } else {
        node.data.label().to_string()
    };
    let searchable = format!("{} {} {}", node_name, kind_label, tab.name).to_lowercase();
    SearchEntry {
        node_id: node.id,
        node_name,
        node_kind: node.kind,
        kind_label,
        tab_id: tab.id.clone(),
        tab_name: tab.name.clone(),
        searchable,
    }
}

/// Display state of the search overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    /// Focused while the index is still rebuilding
    Building,
    /// Focused with no query text yet
    Idle,
    ShowingResults,
    ShowingEmpty,
}

impl Default for OverlayState {
    fn default() -> Self {
        OverlayState::Closed
    }
}

/// Keys the open overlay reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
}

/// Search overlay state machine
///
/// `Closed -> focus -> Building|Idle -> typing -> ShowingResults|
/// ShowingEmpty -> select/escape/blur -> Closed`. The selection cursor is
/// clamped to the result range and resets whenever the query or result
/// set changes.
#[derive(Debug, Default)]
pub struct SearchOverlay {
    state: OverlayState,
    query: String,
    results: Vec<SearchResult>,
    selected: usize,
}

impl SearchOverlay {
    /// Creates a closed overlay
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Index of the highlighted result
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Focuses the search field (the global shortcut lands here)
    pub fn focus(&mut self, index: &NodeSearchIndex) {
        self.state = if index.is_building() {
            OverlayState::Building
        } else {
            OverlayState::Idle
        };
        self.query.clear();
        self.results.clear();
        self.selected = 0;
    }

    /// Replaces the query text and refreshes the result list
    pub fn set_query(&mut self, text: &str, index: &NodeSearchIndex) {
        if self.state == OverlayState::Closed {
            return;
        }
        self.query = text.to_string();
        self.results = index.query(text);
        self.selected = 0;
        self.state = if self.query.trim().is_empty() {
            OverlayState::Idle
        } else if self.results.is_empty() {
            OverlayState::ShowingEmpty
        } else {
            OverlayState::ShowingResults
        };
    }

    /// Handles a key press; returns the committed result on Enter
    pub fn handle_key(&mut self, key: SearchKey) -> Option<SearchResult> {
        if self.state == OverlayState::Closed {
            return None;
        }
        match key {
            SearchKey::ArrowDown => {
                if !self.results.is_empty() {
                    self.selected = (self.selected + 1).min(self.results.len() - 1);
                }
                None
            }
            SearchKey::ArrowUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            SearchKey::Enter => {
                let committed = self.results.get(self.selected).cloned();
                if committed.is_some() {
                    self.close();
                }
                committed
            }
            SearchKey::Escape => {
                self.close();
                None
            }
        }
    }

    /// Blur outside the container closes without committing
    pub fn blur(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.state = OverlayState::Closed;
        self.query.clear();
        self.results.clear();
        self.selected = 0;
    }
}
