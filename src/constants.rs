//! Crate-wide constants and default values
//!
//! Centralized location for all hard-coded values to improve maintainability

/// Node sizing and typography constants
pub mod node {
    /// Width basis at which a text node renders at the base font size
    pub const DEFAULT_WIDTH: f32 = 100.0;

    /// Base font size for an unresized text node
    pub const DEFAULT_FONT_SIZE: f32 = 14.0;

    /// Line-height multiplier used by text measurement
    pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

    /// Minimum node size while collapsed
    pub const MIN_SIZE: [f32; 2] = [50.0, 20.0];

    /// Minimum node size while expanded, keeps the settings surface usable
    pub const EXPANDED_MIN_SIZE: [f32; 2] = [240.0, 200.0];

    /// Fallback box size for kinds whose schema gives no explicit size
    pub const DEFAULT_SIZE: [f32; 2] = [150.0, 40.0];
}

/// Handle contract constants
pub mod handle {
    /// Wildcard matching any source kind or data kind
    pub const WILDCARD: &str = "*";
}

/// Node search index constants
pub mod search {
    use std::time::Duration;

    /// Maximum age of the cached index before the next use triggers a
    /// rebuild. A heuristic, tunable rather than contractual.
    pub const INDEX_TTL: Duration = Duration::from_secs(30);

    /// Maximum number of results returned by a single query
    pub const MAX_RESULTS: usize = 20;
}
