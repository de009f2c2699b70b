//! Scene graph: an ownership tree of renderable nodes
//!
//! The graph is a slot-map arena with parent/child links. It is owned
//! exclusively by the viewer orchestrator while one model is loaded and is
//! replaced wholesale when the model reference changes.

use crate::foundation::math::{Mat4, Transform};
use crate::render::{Material, MaterialSlots, Mesh};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable identifier of a scene node
    pub struct NodeId;
}

/// A single node in the scene graph
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Human-readable node name (for logs and debugging)
    pub name: String,

    /// Local transform relative to the parent node
    pub transform: Transform,

    /// Invisible nodes (and their subtrees) are excluded from bounds
    pub visible: bool,

    /// Mesh geometry, if this node is renderable
    pub mesh: Option<Mesh>,

    /// Material assignment
    pub materials: MaterialSlots,

    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    /// Create an empty, visible node with an identity transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            visible: true,
            mesh: None,
            materials: MaterialSlots::Empty,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Attach mesh geometry
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Assign a single material
    pub fn with_material(mut self, material: Material) -> Self {
        self.materials = MaterialSlots::Single(material);
        self
    }

    /// Assign a material array (slots may be unassigned)
    pub fn with_materials(mut self, materials: Vec<Option<Material>>) -> Self {
        self.materials = MaterialSlots::Multiple(materials);
        self
    }

    /// Set the local transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Mark the node invisible
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Parent node, if any
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child node ids
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Ownership tree of renderable nodes
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, SceneNode>,
    root: NodeId,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph containing only an empty root node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new("root"));
        Self { nodes, root }
    }

    /// The root node id
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Shared access to the root node
    pub fn root_node(&self) -> &SceneNode {
        &self.nodes[self.root]
    }

    /// Mutable access to the root node (normalization writes its transform)
    pub fn root_node_mut(&mut self) -> &mut SceneNode {
        &mut self.nodes[self.root]
    }

    /// Insert a node as a child of `parent`
    ///
    /// Returns the id of the inserted node. The parent must exist; inserting
    /// under a stale id is a programming error and panics like indexing.
    pub fn insert_child(&mut self, parent: NodeId, mut node: SceneNode) -> NodeId {
        assert!(self.nodes.contains_key(parent), "parent node does not exist");
        node.parent = Some(parent);
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        id
    }

    /// Shared access to a node
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Mutable access to a node
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Total number of nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over every node in arbitrary order
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut SceneNode> {
        self.nodes.values_mut()
    }

    /// Depth-first node order starting at the root
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                order.push(id);
                stack.extend(node.children.iter().rev());
            }
        }
        order
    }

    /// World-space transform of a node (composition of all ancestors)
    pub fn world_transform(&self, id: NodeId) -> Mat4 {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.nodes.get(node_id) else { break };
            chain.push(node.transform.to_matrix());
            current = node.parent;
        }
        chain
            .into_iter()
            .rev()
            .fold(Mat4::identity(), |acc, local| acc * local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn new_graph_has_only_a_root() {
        let graph = SceneGraph::new();
        assert_eq!(graph.node_count(), 1);
        assert!(graph.root_node().mesh.is_none());
    }

    #[test]
    fn insert_child_links_parent_and_child() {
        let mut graph = SceneGraph::new();
        let child = graph.insert_child(graph.root(), SceneNode::new("child"));

        assert_eq!(graph.node(child).unwrap().parent(), Some(graph.root()));
        assert_eq!(graph.root_node().children(), &[child]);
    }

    #[test]
    fn depth_first_visits_all_nodes() {
        let mut graph = SceneGraph::new();
        let a = graph.insert_child(graph.root(), SceneNode::new("a"));
        graph.insert_child(a, SceneNode::new("a1"));
        graph.insert_child(graph.root(), SceneNode::new("b"));

        let order = graph.depth_first();
        assert_eq!(order.len(), 4);
        assert_eq!(order[0], graph.root());
    }

    #[test]
    fn world_transform_composes_ancestor_transforms() {
        let mut graph = SceneGraph::new();
        graph.root_node_mut().transform = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
        let child = graph.insert_child(
            graph.root(),
            SceneNode::new("child")
                .with_transform(Transform::from_position(Vec3::new(0.0, 2.0, 0.0))),
        );

        let world = graph.world_transform(child);
        let p = world.transform_point(&Point3::origin());
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, 0.0);
    }
}
