//! Wireframe mode toggling
//!
//! Walks the scene graph and flips the wireframe rendering flag on every
//! assigned material. Independent of bounds and normalization; re-run it
//! whenever the desired mode changes or the scene graph is replaced while
//! the mode is active, since a freshly mounted graph starts unflagged.

use crate::scene::graph::SceneGraph;

/// Set the wireframe flag on every assigned material in the graph
///
/// Nodes without materials are skipped; material arrays have the flag set
/// on each assigned slot independently. Idempotent: applying the same mode
/// twice produces no further change.
pub fn set_wireframe(graph: &mut SceneGraph, enabled: bool) {
    let mut flagged = 0usize;
    for node in graph.nodes_mut() {
        node.materials.for_each_mut(|material| {
            material.wireframe = enabled;
            flagged += 1;
        });
    }
    log::debug!("Wireframe {} on {flagged} material(s)", if enabled { "enabled" } else { "disabled" });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Material, MaterialSlots};
    use crate::scene::graph::SceneNode;

    fn build_graph() -> SceneGraph {
        let mut graph = SceneGraph::new();
        graph.insert_child(
            graph.root(),
            SceneNode::new("single").with_material(Material::new()),
        );
        graph.insert_child(
            graph.root(),
            SceneNode::new("multi").with_materials(vec![
                Some(Material::new()),
                None,
                Some(Material::new().with_color(0.2, 0.4, 0.8)),
            ]),
        );
        graph.insert_child(graph.root(), SceneNode::new("bare"));
        graph
    }

    fn wireframe_states(graph: &SceneGraph) -> Vec<bool> {
        let mut states = Vec::new();
        for id in graph.depth_first() {
            let node = graph.node(id).unwrap();
            match &node.materials {
                MaterialSlots::Empty => {}
                MaterialSlots::Single(m) => states.push(m.wireframe),
                MaterialSlots::Multiple(slots) => {
                    states.extend(slots.iter().flatten().map(|m| m.wireframe));
                }
            }
        }
        states
    }

    #[test]
    fn enables_wireframe_on_single_and_array_materials() {
        let mut graph = build_graph();
        set_wireframe(&mut graph, true);
        assert_eq!(wireframe_states(&graph), vec![true, true, true]);
    }

    #[test]
    fn toggling_is_idempotent() {
        let mut graph = build_graph();
        set_wireframe(&mut graph, true);
        let once = graph.clone();
        set_wireframe(&mut graph, true);
        assert_eq!(wireframe_states(&graph), wireframe_states(&once));
    }

    #[test]
    fn disabling_restores_the_original_material_state() {
        let mut graph = build_graph();
        let original = wireframe_states(&graph);
        set_wireframe(&mut graph, true);
        set_wireframe(&mut graph, false);
        assert_eq!(wireframe_states(&graph), original);
        assert!(original.iter().all(|w| !w));
    }

    #[test]
    fn nodes_without_materials_are_tolerated() {
        let mut graph = SceneGraph::new();
        graph.insert_child(graph.root(), SceneNode::new("bare"));
        // No materials anywhere; must not panic.
        set_wireframe(&mut graph, true);
    }
}
