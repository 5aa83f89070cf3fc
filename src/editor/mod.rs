//! Editor-facing state: documents, files, and node search

// Module declarations
pub mod file_manager;
pub mod search;

// Re-exports
pub use file_manager::{FileManager, FlowDocument, FlowMetadata};
pub use search::{
    FlowSource, NodeSearchIndex, OverlayState, SearchEntry, SearchKey, SearchOverlay,
    SearchResult, TabInfo,
};
