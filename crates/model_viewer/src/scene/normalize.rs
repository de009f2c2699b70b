//! Geometry normalization and ground reference tracking
//!
//! Brings an arbitrary-sized model into a consistent visual envelope:
//! centered at the origin, uniformly scaled by a two-sided clamp policy, and
//! grounded on a reference plane derived from the post-normalization bounds.

use crate::config::NormalizeSettings;
use crate::scene::bounds::scene_bounds;
use crate::scene::graph::SceneGraph;

/// Result of normalizing a scene graph
///
/// Derived once per model load, together with the scene graph it belongs
/// to, and discarded with it on unmount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    /// Uniform scale factor applied to the root; always `> 0`
    pub scale: f32,

    /// Vertical position of the reference grid: the post-normalization
    /// minimum Y, minus a small clearance so the grid does not z-fight the
    /// model's lowest faces
    pub ground_y: f32,
}

/// Normalize a scene graph in place and derive its ground reference
///
/// The transform is written to the graph root: the model's center maps to
/// the origin after scaling, and the uniform scale follows the two-sided
/// clamp policy in `settings`. The bounding volume is recomputed from the
/// transformed geometry before the ground reference is derived, so
/// `ground_y` always reflects what will actually be rendered.
///
/// # Edge cases
/// A degenerate (zero-size) bounding volume skips scaling entirely; the
/// scale stays `1` and no division occurs. This is recovered locally and is
/// never an error.
pub fn normalize(graph: &mut SceneGraph, settings: &NormalizeSettings) -> Normalization {
    let bounds = scene_bounds(graph);
    let center = bounds.center();
    let max_dimension = bounds.max_dimension();

    let scale = if max_dimension > settings.max_extent {
        settings.max_extent / max_dimension
    } else if max_dimension > 0.0 && max_dimension < settings.min_extent {
        settings.grow_target / max_dimension
    } else {
        // Already well-sized, or degenerate (avoid dividing by zero).
        1.0
    };

    {
        let root = &mut graph.root_node_mut().transform;
        root.scale *= scale;
        root.position -= center * scale;
    }

    // Ground reference comes from up-to-date geometry, not the
    // pre-normalization volume.
    let normalized_bounds = scene_bounds(graph);
    let ground_y = normalized_bounds.min.y - settings.ground_clearance;

    log::info!(
        "Normalized model: max_dimension {max_dimension:.3} -> scale {scale:.3}, ground_y {ground_y:.3}"
    );

    Normalization { scale, ground_y }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Mesh;
    use crate::scene::graph::SceneNode;
    use approx::assert_relative_eq;

    /// Box spanning `min..max` on every axis, attached under the root.
    fn graph_with_box(min: [f32; 3], max: [f32; 3]) -> SceneGraph {
        let positions = [
            [min[0], min[1], min[2]],
            [max[0], min[1], min[2]],
            [max[0], max[1], min[2]],
            [min[0], max[1], min[2]],
            [min[0], min[1], max[2]],
            [max[0], min[1], max[2]],
            [max[0], max[1], max[2]],
            [min[0], max[1], max[2]],
        ];
        let mesh = Mesh::from_positions(&positions, vec![0, 1, 2, 0, 2, 3]);
        let mut graph = SceneGraph::new();
        graph.insert_child(graph.root(), SceneNode::new("box").with_mesh(mesh));
        graph
    }

    #[test]
    fn oversized_model_is_shrunk_to_the_envelope() {
        // size 20 on each axis -> max_dimension 20 -> scale 5/20.
        let mut graph = graph_with_box([-10.0, -10.0, -10.0], [10.0, 10.0, 10.0]);
        let result = normalize(&mut graph, &NormalizeSettings::default());

        assert_relative_eq!(result.scale, 0.25);
        let bounds = scene_bounds(&graph);
        assert_relative_eq!(bounds.max_dimension(), 5.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.center().norm(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn undersized_model_is_grown() {
        // max_dimension 0.4 -> scale 2.5/0.4 = 6.25.
        let mut graph = graph_with_box([0.0, 0.0, 0.0], [0.4, 0.4, 0.4]);
        let result = normalize(&mut graph, &NormalizeSettings::default());

        assert_relative_eq!(result.scale, 6.25);
        let bounds = scene_bounds(&graph);
        assert_relative_eq!(bounds.max_dimension(), 2.5, epsilon = 1e-4);
    }

    #[test]
    fn well_sized_model_is_left_alone() {
        let mut graph = graph_with_box([0.0, 0.0, 0.0], [3.0, 2.0, 1.0]);
        let result = normalize(&mut graph, &NormalizeSettings::default());

        assert_relative_eq!(result.scale, 1.0);
        let bounds = scene_bounds(&graph);
        assert_relative_eq!(bounds.max_dimension(), 3.0, epsilon = 1e-4);
        // Still centered, though.
        assert_relative_eq!(bounds.center().norm(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn boundary_dimensions_are_inside_the_no_change_band() {
        for extent in [1.0_f32, 5.0] {
            let mut graph = graph_with_box([0.0, 0.0, 0.0], [extent, extent, extent]);
            let result = normalize(&mut graph, &NormalizeSettings::default());
            assert_relative_eq!(result.scale, 1.0);
        }
    }

    #[test]
    fn degenerate_geometry_skips_scaling() {
        let mut graph = SceneGraph::new();
        let result = normalize(&mut graph, &NormalizeSettings::default());

        assert_relative_eq!(result.scale, 1.0);
        assert!(result.scale.is_finite());
        assert!(result.ground_y.is_finite());
    }

    #[test]
    fn ground_reference_sits_below_the_scaled_model() {
        let mut graph = graph_with_box([-10.0, -10.0, -10.0], [10.0, 10.0, 10.0]);
        let settings = NormalizeSettings::default();
        let result = normalize(&mut graph, &settings);

        let bounds = scene_bounds(&graph);
        assert_relative_eq!(
            result.ground_y,
            bounds.min.y - settings.ground_clearance,
            epsilon = 1e-4
        );
        // Scaled box has min.y = -2.5, clearance 0.1.
        assert_relative_eq!(result.ground_y, -2.6, epsilon = 1e-4);
    }

    #[test]
    fn off_center_model_is_recentered() {
        let mut graph = graph_with_box([100.0, 50.0, -20.0], [102.0, 52.0, -18.0]);
        normalize(&mut graph, &NormalizeSettings::default());

        let bounds = scene_bounds(&graph);
        assert_relative_eq!(bounds.center().x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(bounds.center().y, 0.0, epsilon = 1e-3);
        assert_relative_eq!(bounds.center().z, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn ground_reference_is_recomputed_per_model() {
        let mut tall = graph_with_box([0.0, 0.0, 0.0], [1.0, 4.0, 1.0]);
        let mut flat = graph_with_box([0.0, 0.0, 0.0], [4.0, 1.0, 4.0]);
        let settings = NormalizeSettings::default();

        let tall_result = normalize(&mut tall, &settings);
        let flat_result = normalize(&mut flat, &settings);

        assert_relative_eq!(tall_result.ground_y, -2.1, epsilon = 1e-4);
        assert_relative_eq!(flat_result.ground_y, -0.6, epsilon = 1e-4);
    }
}
