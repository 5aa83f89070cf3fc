//! Group membership edits
//!
//! Detaching rewrites a node's position from the parent-relative frame
//! into the canvas-absolute frame and clears the ownership edge. Placing
//! a node *into* a group is the drag-and-drop subsystem's job and is not
//! modeled here.

use super::node::{Node, NodeId};
use super::transform::absolute_position;

/// Detaches a node from its parent group
///
/// Returns a new collection with the node rewritten into the absolute
/// frame, its `parent_id` and extent cleared. The collection is returned
/// unchanged when the node has no parent or the parent cannot be
/// resolved; a dangling `parent_id` must not corrupt the graph.
pub fn detach(nodes: &[Node], id: NodeId) -> Vec<Node> {
    let Some(node) = nodes.iter().find(|n| n.id == id) else {
        return nodes.to_vec();
    };
    let Some(parent_id) = node.parent_id else {
        return nodes.to_vec();
    };
    if !nodes.iter().any(|n| n.id == parent_id) {
        log::warn!(
            "detach: parent {} of node {} not found, leaving graph unchanged",
            parent_id,
            id
        );
        return nodes.to_vec();
    }

    let absolute = absolute_position(node, nodes);
    nodes
        .iter()
        .map(|n| {
            if n.id == id {
                let mut detached = n.clone();
                detached.position = absolute;
                detached.parent_id = None;
                detached.extent = None;
                detached
            } else {
                n.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::data::{AgentData, GroupData, NodeData};
    use egui::Pos2;

    fn nodes_one_level() -> Vec<Node> {
        vec![
            Node::new(1, Pos2::new(100.0, 100.0), NodeData::Group(GroupData::default())),
            Node::new(2, Pos2::new(10.0, 20.0), NodeData::Agent(AgentData::default()))
                .with_parent(1),
        ]
    }

    #[test]
    fn test_detach_rewrites_into_absolute_frame() {
        let detached = detach(&nodes_one_level(), 2);
        let node = detached.iter().find(|n| n.id == 2).unwrap();
        assert_eq!(node.position, Pos2::new(110.0, 120.0));
        assert_eq!(node.parent_id, None);
        assert_eq!(node.extent, None);
    }

    #[test]
    fn test_detach_from_nested_groups_sums_chain() {
        let nodes = vec![
            Node::new(1, Pos2::new(100.0, 100.0), NodeData::Group(GroupData::default())),
            Node::new(2, Pos2::new(50.0, 5.0), NodeData::Group(GroupData::default()))
                .with_parent(1),
            Node::new(3, Pos2::new(10.0, 20.0), NodeData::Agent(AgentData::default()))
                .with_parent(2),
        ];
        let detached = detach(&nodes, 3);
        let node = detached.iter().find(|n| n.id == 3).unwrap();
        assert_eq!(node.position, Pos2::new(160.0, 125.0));
        assert_eq!(node.parent_id, None);
    }

    #[test]
    fn test_detach_with_unresolved_parent_is_noop() {
        let mut nodes = nodes_one_level();
        nodes.remove(0);
        let out = detach(&nodes, 2);
        assert_eq!(out, nodes);
    }

    #[test]
    fn test_detach_without_parent_is_noop() {
        let nodes = vec![Node::new(
            5,
            Pos2::new(1.0, 2.0),
            NodeData::Agent(AgentData::default()),
        )];
        let out = detach(&nodes, 5);
        assert_eq!(out, nodes);
    }

    #[test]
    fn test_detach_leaves_siblings_untouched() {
        let mut nodes = nodes_one_level();
        nodes.push(
            Node::new(3, Pos2::new(1.0, 1.0), NodeData::Agent(AgentData::default()))
                .with_parent(1),
        );
        let out = detach(&nodes, 2);
        let sibling = out.iter().find(|n| n.id == 3).unwrap();
        assert_eq!(sibling.parent_id, Some(1));
        assert_eq!(sibling.position, Pos2::new(1.0, 1.0));
    }
}
