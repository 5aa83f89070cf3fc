//! Coordinate-frame conversions and display-mode transitions
//!
//! A node's stored position is parent-relative while it has a parent and
//! canvas-absolute otherwise. The transforms here keep that invariant
//! intact across expand/collapse toggles and group membership changes.

use super::node::{Extent, Node, NodeId};
use egui::Pos2;
use std::collections::HashSet;

/// Canvas-absolute position of a node, summing the full ancestor chain
///
/// Containment is a forest, but a corrupt document could still contain a
/// parent cycle; the walk stops at the first repeated ancestor.
pub fn absolute_position(node: &Node, nodes: &[Node]) -> Pos2 {
    let mut position = node.position;
    let mut parent = node.parent_id;
    let mut seen: HashSet<NodeId> = HashSet::new();
    seen.insert(node.id);

    while let Some(parent_id) = parent {
        if !seen.insert(parent_id) {
            log::warn!("containment cycle through node {}", parent_id);
            break;
        }
        match nodes.iter().find(|n| n.id == parent_id) {
            Some(p) => {
                position += p.position.to_vec2();
                parent = p.parent_id;
            }
            None => break,
        }
    }
    position
}

/// Switches a node into expanded display mode
///
/// Caches the contracted position, lifts the parent extent so the node
/// renders without containment clipping, and reuses the last known
/// expanded position. A no-op for already-expanded nodes and for kinds
/// without a display-mode cache.
pub fn expand(node: &mut Node) {
    let position = node.position;
    let Some(display) = node.data.display_mut() else {
        return;
    };
    if display.is_expanded {
        return;
    }
    let target = display.expanded_position.unwrap_or(position);
    display.contracted_position = Some(position);
    display.is_expanded = true;
    node.position = target;
    node.extent = None;
}

/// Switches a node back into collapsed display mode
///
/// Caches the expanded position and size, restores the parent-constrained
/// extent if the node still has a parent, and returns to the cached
/// contracted position. Idempotent on collapsed nodes.
pub fn collapse(node: &mut Node) {
    let position = node.position;
    let size = node.current_size();
    let has_parent = node.parent_id.is_some();
    let Some(display) = node.data.display_mut() else {
        return;
    };
    if !display.is_expanded {
        return;
    }
    display.expanded_position = Some(position);
    display.expanded_size = Some(size);
    let target = display.contracted_position.unwrap_or(position);
    display.is_expanded = false;
    node.position = target;
    node.extent = if has_parent { Some(Extent::Parent) } else { None };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::data::{AgentData, GroupData, NodeData};
    use egui::Vec2;

    fn agent(id: NodeId, x: f32, y: f32) -> Node {
        Node::new(id, Pos2::new(x, y), NodeData::Agent(AgentData::default()))
    }

    fn group(id: NodeId, x: f32, y: f32) -> Node {
        Node::new(id, Pos2::new(x, y), NodeData::Group(GroupData::default()))
    }

    #[test]
    fn test_absolute_position_without_parent_is_identity() {
        let node = agent(0, 40.0, 60.0);
        assert_eq!(absolute_position(&node, &[node.clone()]), Pos2::new(40.0, 60.0));
    }

    #[test]
    fn test_absolute_position_sums_ancestor_chain() {
        let outer = group(1, 100.0, 100.0);
        let inner = group(2, 30.0, 10.0).with_parent(1);
        let child = agent(3, 10.0, 20.0).with_parent(2);
        let nodes = vec![outer, inner, child.clone()];
        assert_eq!(absolute_position(&child, &nodes), Pos2::new(140.0, 130.0));
    }

    #[test]
    fn test_absolute_position_survives_parent_cycle() {
        let mut a = group(1, 10.0, 0.0);
        let mut b = group(2, 0.0, 10.0);
        a.parent_id = Some(2);
        b.parent_id = Some(1);
        let nodes = vec![a.clone(), b];
        // walk terminates; exact value is whatever was accumulated
        let _ = absolute_position(&a, &nodes);
    }

    #[test]
    fn test_expand_collapse_round_trip_restores_position() {
        let mut node = agent(0, 25.0, 35.0).with_parent(7);
        expand(&mut node);
        assert!(node.is_expanded());
        assert_eq!(node.extent, None);

        // user drags the expanded node somewhere else
        node.position = Pos2::new(400.0, 300.0);

        collapse(&mut node);
        assert!(!node.is_expanded());
        assert_eq!(node.position, Pos2::new(25.0, 35.0));
        assert_eq!(node.extent, Some(Extent::Parent));

        // re-expand returns to the cached expanded position
        expand(&mut node);
        assert_eq!(node.position, Pos2::new(400.0, 300.0));
    }

    #[test]
    fn test_collapse_caches_expanded_size_without_touching_box() {
        let mut node = agent(0, 0.0, 0.0).with_size(Vec2::new(320.0, 260.0));
        expand(&mut node);
        collapse(&mut node);
        let display = node.data.display().unwrap();
        assert_eq!(display.expanded_size, Some(Vec2::new(320.0, 260.0)));
        assert_eq!(node.size, Some(Vec2::new(320.0, 260.0)));
    }

    #[test]
    fn test_expand_is_idempotent() {
        let mut node = agent(0, 5.0, 5.0);
        expand(&mut node);
        let snapshot = node.clone();
        expand(&mut node);
        assert_eq!(node, snapshot);
    }

    #[test]
    fn test_collapse_on_collapsed_node_is_noop() {
        let mut node = agent(0, 5.0, 5.0);
        let snapshot = node.clone();
        collapse(&mut node);
        assert_eq!(node, snapshot);
    }

    #[test]
    fn test_collapse_without_parent_leaves_extent_clear() {
        let mut node = agent(0, 0.0, 0.0);
        expand(&mut node);
        collapse(&mut node);
        assert_eq!(node.extent, None);
    }
}
