//! Resize protocols and text-driven auto-sizing
//!
//! Two protocols, keyed by which control the user dragged: a corner resize
//! scales the rendered font with the box, an edge resize changes
//! dimensions only. Font size is always derived from the width basis,
//! never stored.

use super::data::{FontStyle, FontWeight, TextData};
use super::node::Node;
use crate::constants;
use egui::Vec2;

/// Text-metrics seam used by auto-fit
///
/// The renderer may supply a galley-backed implementation; the core ships
/// a deterministic estimator. `None` signals an unavailable measurement
/// context and leaves the node's size untouched.
pub trait TextMeasure {
    /// Measured box of `text` rendered at the base font size with the
    /// given font configuration. Multi-line aware.
    fn measure(&self, text: &str, style: &TextData) -> Option<Vec2>;
}

/// Glyph-advance estimator used when no real text context is available
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    /// Average glyph advance as a fraction of the font size
    pub advance_factor: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self { advance_factor: 0.6 }
    }
}

impl TextMeasure for FontMetrics {
    fn measure(&self, text: &str, style: &TextData) -> Option<Vec2> {
        let font_size = constants::node::DEFAULT_FONT_SIZE;
        let mut advance = self.advance_factor;
        if style.font_weight == FontWeight::Bold {
            advance *= 1.05;
        }
        if style.font_style == FontStyle::Italic {
            advance *= 1.02;
        }
        let lines: Vec<&str> = text.split('\n').collect();
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let width = widest as f32 * font_size * advance;
        let height = lines.len() as f32 * font_size * constants::node::LINE_HEIGHT_FACTOR;
        Some(Vec2::new(
            width.max(constants::node::MIN_SIZE[0]),
            height.max(constants::node::MIN_SIZE[1]),
        ))
    }
}

/// Rendered font size for a text payload, derived from the width basis
pub fn font_size(text: &TextData) -> f32 {
    text.font_scale_width / constants::node::DEFAULT_WIDTH * constants::node::DEFAULT_FONT_SIZE
}

/// Minimum size floor for the node's current display mode
fn size_floor(node: &Node) -> [f32; 2] {
    if node.is_expanded() {
        constants::node::EXPANDED_MIN_SIZE
    } else {
        constants::node::MIN_SIZE
    }
}

fn clamp_size(node: &Node, size: Vec2) -> Vec2 {
    let floor = size_floor(node);
    Vec2::new(size.x.max(floor[0]), size.y.max(floor[1]))
}

/// Proportional resize from a corner drag
///
/// The width basis follows the box width, so the rendered font scales
/// with the box. Disables auto-fit for all subsequent text edits.
pub fn corner_resize(node: &mut Node, size: Vec2) {
    let size = clamp_size(node, size);
    node.size = Some(size);
    if let Some(text) = node.data.text_mut() {
        text.font_scale_width = size.x;
        text.manually_resized = true;
    }
}

/// Dimension-only resize from an edge drag
///
/// The width basis is left untouched, so the rendered font size stays
/// constant. Disables auto-fit for all subsequent text edits.
pub fn edge_resize(node: &mut Node, size: Vec2) {
    let size = clamp_size(node, size);
    node.size = Some(size);
    if let Some(text) = node.data.text_mut() {
        text.manually_resized = true;
    }
}

/// Applies a label edit, auto-fitting the box to the new text
///
/// Auto-fit only runs while the node has never been manually resized:
/// the new text is measured with the node's current font configuration
/// and the box takes the measured extent, with the width basis reset so
/// the font renders at the base size relative to the fitted box. A failed
/// measurement keeps the current size.
pub fn apply_label_edit(node: &mut Node, label: &str, measure: &dyn TextMeasure) {
    node.data.set_label(label);
    let node_id = node.id;
    let Some(text) = node.data.text_mut() else {
        return;
    };
    if text.manually_resized {
        return;
    }
    match measure.measure(label, text) {
        Some(measured) => {
            text.font_scale_width = constants::node::DEFAULT_WIDTH;
            node.size = Some(measured);
        }
        None => {
            log::warn!("text measurement unavailable, keeping size of node {}", node_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::data::{NodeData, TextData, ToolData};
    use egui::Pos2;

    struct NoMeasure;

    impl TextMeasure for NoMeasure {
        fn measure(&self, _text: &str, _style: &TextData) -> Option<Vec2> {
            None
        }
    }

    fn label_node() -> Node {
        Node::new(0, Pos2::ZERO, NodeData::Label(TextData::default()))
    }

    #[test]
    fn test_corner_resize_scales_font_with_box() {
        let mut node = label_node();
        corner_resize(&mut node, Vec2::new(200.0, 68.0));
        let text = node.data.text().unwrap();
        assert_eq!(node.current_size(), Vec2::new(200.0, 68.0));
        assert_eq!(text.font_scale_width, 200.0);
        assert!(text.manually_resized);
        assert_eq!(font_size(text), 28.0);
    }

    #[test]
    fn test_edge_resize_keeps_font_size_constant() {
        let mut node = label_node();
        let before = font_size(node.data.text().unwrap());
        edge_resize(&mut node, Vec2::new(300.0, 24.0));
        let text = node.data.text().unwrap();
        assert_eq!(node.current_size(), Vec2::new(300.0, 24.0));
        assert_eq!(font_size(text), before);
        assert!(text.manually_resized);
    }

    #[test]
    fn test_resize_clamps_to_collapsed_floor() {
        let mut node = label_node();
        edge_resize(&mut node, Vec2::new(5.0, 5.0));
        assert_eq!(node.current_size(), Vec2::new(50.0, 20.0));
    }

    #[test]
    fn test_resize_clamps_to_expanded_floor() {
        let mut node = Node::new(0, Pos2::ZERO, NodeData::Tool(ToolData::default()));
        crate::nodes::transform::expand(&mut node);
        corner_resize(&mut node, Vec2::new(100.0, 100.0));
        assert_eq!(node.current_size(), Vec2::new(240.0, 200.0));
    }

    #[test]
    fn test_auto_fit_tracks_text_extent() {
        let mut node = label_node();
        apply_label_edit(&mut node, "hello", &FontMetrics::default());
        let one_line = node.current_size();
        assert_eq!(node.data.label(), "hello");

        apply_label_edit(&mut node, "hello\nworld of agents", &FontMetrics::default());
        let two_lines = node.current_size();
        assert!(two_lines.x > one_line.x);
        assert!(two_lines.y > one_line.y);
        // fitted box renders at the base font size
        assert_eq!(font_size(node.data.text().unwrap()), 14.0);
    }

    #[test]
    fn test_auto_fit_suppressed_after_manual_resize() {
        let mut node = label_node();
        edge_resize(&mut node, Vec2::new(300.0, 24.0));
        apply_label_edit(
            &mut node,
            "a very long label that would normally grow the box far beyond its size",
            &FontMetrics::default(),
        );
        assert_eq!(node.current_size(), Vec2::new(300.0, 24.0));
        assert!(node.data.label().starts_with("a very long"));
    }

    #[test]
    fn test_measurement_failure_keeps_current_size() {
        let mut node = label_node().with_size(Vec2::new(120.0, 30.0));
        apply_label_edit(&mut node, "new text", &NoMeasure);
        assert_eq!(node.current_size(), Vec2::new(120.0, 30.0));
        assert_eq!(node.data.label(), "new text");
    }

    #[test]
    fn test_label_edit_on_non_text_kind_only_sets_label() {
        let mut node = Node::new(0, Pos2::ZERO, NodeData::Tool(ToolData::default()));
        apply_label_edit(&mut node, "shell", &FontMetrics::default());
        assert_eq!(node.data.label(), "shell");
        assert_eq!(node.size, None);
    }
}
