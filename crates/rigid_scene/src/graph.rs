//! Scene graph of nested coordinate systems.

use crate::fsc;
use anyhow::{Result, anyhow, bail};
use nalgebra::Vector3;
use nohash_hasher::BuildNoHashHasher;
use rigid_math::{DualQuaternion, Quaternion};
use std::{collections::HashMap, fmt, hash::Hash};
use tinyvec::TinyVec;

/// A tree of nested coordinate systems.
///
/// Every node holds a rigid transform from its own space to the space of its
/// parent. The root node represents the world frame and never has a parent.
/// Nodes that are detached from the tree remain in the node storage, together
/// with their subtrees, until they are attached again or removed.
#[derive(Debug)]
pub struct HierarchicalCoordinateSystem {
    root_node_id: SceneNodeID,
    nodes: NodeStorage,
}

/// Flat storage for all the nodes of a [`HierarchicalCoordinateSystem`].
#[derive(Clone, Debug, Default)]
pub struct NodeStorage {
    nodes: NoHashMap<SceneNodeID, SceneNode>,
    next_id: u64,
}

/// Identifier for a [`SceneNode`] in a [`HierarchicalCoordinateSystem`].
///
/// IDs are never reused, so the ID of a removed node stays invalid.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SceneNodeID(u64);

/// A node in a [`HierarchicalCoordinateSystem`], holding the transform from
/// the node's space to the space of its parent.
#[derive(Clone, Debug)]
pub struct SceneNode {
    parent_id: Option<SceneNodeID>,
    coordinate_system: DualQuaternion<fsc>,
    child_ids: ChildNodeIDs,
    name: Option<String>,
}

type NoHashMap<K, V> = HashMap<K, V, BuildNoHashHasher<K>>;

/// Type alias for a collection of child node IDs with inline capacity of 8.
type ChildNodeIDs = TinyVec<[SceneNodeID; 8]>;

impl HierarchicalCoordinateSystem {
    /// Creates a new coordinate system hierarchy containing only the root
    /// node, whose transform is the identity.
    pub fn new() -> Self {
        let mut nodes = NodeStorage::new();
        let root_node_id = nodes.add_node(SceneNode::root());

        rigid_log::debug!("Created coordinate system hierarchy with root node {root_node_id}");

        Self {
            root_node_id,
            nodes,
        }
    }

    /// Returns the ID of the root node.
    pub fn root_node_id(&self) -> SceneNodeID {
        self.root_node_id
    }

    /// Returns a reference to the storage of nodes in the hierarchy.
    pub fn nodes(&self) -> &NodeStorage {
        &self.nodes
    }

    /// Returns a reference to the root node.
    pub fn root_node(&self) -> &SceneNode {
        self.nodes.node(self.root_node_id)
    }

    /// Creates a new node with the given local transform and optional name.
    /// The node has no parent and no children until it is attached with
    /// [`Self::attach_child`].
    ///
    /// # Panics
    /// If the rotation of the transform is not a unit quaternion.
    pub fn create_node(
        &mut self,
        coordinate_system: DualQuaternion<fsc>,
        name: Option<String>,
    ) -> SceneNodeID {
        assert!(
            coordinate_system.rotation().is_unit(),
            "Tried to create scene node with non-unit rotation"
        );
        let node_id = self.nodes.add_node(SceneNode::new(None, coordinate_system, name));
        rigid_log::debug!("Created detached scene node {node_id}");
        node_id
    }

    /// Creates a new node whose local transform first rotates by the given
    /// unit quaternion and then translates by the given vector, and adds it
    /// as the last child of the given parent node.
    ///
    /// # Errors
    /// Returns an error if the specified parent node does not exist.
    ///
    /// # Panics
    /// If the rotation is not a unit quaternion.
    pub fn create_child_node(
        &mut self,
        parent_id: SceneNodeID,
        translation: &Vector3<fsc>,
        rotation: &Quaternion<fsc>,
    ) -> Result<SceneNodeID> {
        self.create_child_node_with_name(parent_id, translation, rotation, None)
    }

    /// Like [`Self::create_child_node`], but gives the new node a name that
    /// can be looked up with [`Self::find_node_by_name`].
    ///
    /// # Errors
    /// Returns an error if the specified parent node does not exist.
    ///
    /// # Panics
    /// If the rotation is not a unit quaternion.
    pub fn create_named_child_node(
        &mut self,
        parent_id: SceneNodeID,
        name: impl Into<String>,
        translation: &Vector3<fsc>,
        rotation: &Quaternion<fsc>,
    ) -> Result<SceneNodeID> {
        self.create_child_node_with_name(parent_id, translation, rotation, Some(name.into()))
    }

    fn create_child_node_with_name(
        &mut self,
        parent_id: SceneNodeID,
        translation: &Vector3<fsc>,
        rotation: &Quaternion<fsc>,
        name: Option<String>,
    ) -> Result<SceneNodeID> {
        if !self.nodes.has_node(parent_id) {
            bail!("Missing parent node with ID {parent_id} for new child node");
        }

        let coordinate_system = DualQuaternion::make_coordinate_system(rotation, translation);
        let node_id = self
            .nodes
            .add_node(SceneNode::new(Some(parent_id), coordinate_system, name));

        self.nodes.node_mut(parent_id).add_child(node_id);

        rigid_log::debug!("Created scene node {node_id} as child of {parent_id}");

        Ok(node_id)
    }

    /// Removes the given node from the children of the given parent node and
    /// clears its parent. The node and its subtree stay in the storage.
    ///
    /// Does nothing if the node is not a child of the parent.
    pub fn detach_child(&mut self, parent_id: SceneNodeID, child_id: SceneNodeID) {
        let Some(parent_node) = self.nodes.get_node_mut(parent_id) else {
            return;
        };
        if !parent_node.remove_child(child_id) {
            return;
        }
        if let Some(child_node) = self.nodes.get_node_mut(child_id) {
            child_node.parent_id = None;
        }
        rigid_log::debug!("Detached scene node {child_id} from {parent_id}");
    }

    /// Adds the given parentless node as the last child of the given parent
    /// node.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Either of the nodes does not exist.
    /// - The child is the root node or the parent itself.
    /// - The child already has a parent (it must be detached first).
    /// - The child is an ancestor of the parent, so attaching would create a
    ///   cycle.
    pub fn attach_child(&mut self, parent_id: SceneNodeID, child_id: SceneNodeID) -> Result<()> {
        if let Err(error) = self.check_attachable(parent_id, child_id) {
            rigid_log::warn!("Rejected attaching scene node {child_id} to {parent_id}: {error}");
            return Err(error);
        }

        self.nodes.node_mut(parent_id).add_child(child_id);
        self.nodes.node_mut(child_id).parent_id = Some(parent_id);

        rigid_log::debug!("Attached scene node {child_id} to {parent_id}");

        Ok(())
    }

    fn check_attachable(&self, parent_id: SceneNodeID, child_id: SceneNodeID) -> Result<()> {
        let parent_node = self
            .nodes
            .get_node(parent_id)
            .ok_or_else(|| anyhow!("Missing parent node with ID {parent_id}"))?;

        let child_node = self
            .nodes
            .get_node(child_id)
            .ok_or_else(|| anyhow!("Missing child node with ID {child_id}"))?;

        if child_id == self.root_node_id {
            bail!("Cannot attach root node");
        }
        if child_id == parent_id {
            bail!("Cannot attach node {child_id} to itself");
        }
        if parent_node.has_child(child_id) {
            bail!("Node {child_id} is already a child of {parent_id}");
        }
        if let Some(current_parent_id) = child_node.parent_id {
            bail!("Node {child_id} already has parent {current_parent_id} and must be detached first");
        }
        if self.is_ancestor(child_id, parent_id) {
            bail!("Node {child_id} is an ancestor of {parent_id}");
        }
        Ok(())
    }

    /// Removes the node with the given ID and its whole subtree from the
    /// hierarchy, and removes it from the children of its parent.
    ///
    /// Does nothing if the node does not exist.
    ///
    /// # Errors
    /// Returns an error if the specified node is the root node.
    pub fn remove_node(&mut self, node_id: SceneNodeID) -> Result<()> {
        if node_id == self.root_node_id {
            bail!("Cannot remove root node");
        }

        let Some(node) = self.nodes.get_node(node_id) else {
            return Ok(());
        };
        let parent_id = node.parent_id;

        self.remove_subtree(node_id);

        if let Some(parent_node) = parent_id.and_then(|id| self.nodes.get_node_mut(id)) {
            parent_node.remove_child(node_id);
        }

        rigid_log::debug!("Removed scene node {node_id} and its descendants");

        Ok(())
    }

    fn remove_subtree(&mut self, node_id: SceneNodeID) {
        let mut pending_ids = vec![node_id];
        while let Some(id) = pending_ids.pop() {
            if let Some(node) = self.nodes.remove_node(id) {
                pending_ids.extend(node.child_ids);
            }
        }
    }

    /// Sets the given transform as the local transform of the node with the
    /// given ID if it exists.
    ///
    /// # Panics
    /// If the rotation of the transform is not a unit quaternion.
    pub fn set_local_transform(
        &mut self,
        node_id: SceneNodeID,
        coordinate_system: DualQuaternion<fsc>,
    ) {
        assert!(
            coordinate_system.rotation().is_unit(),
            "Tried to set non-unit rotation for scene node"
        );
        if let Some(node) = self.nodes.get_node_mut(node_id) {
            node.coordinate_system = coordinate_system;
        }
    }

    /// Returns the ID of the parent of the given node, or [`None`] if the
    /// node does not exist or has no parent.
    pub fn resolve_parent(&self, node_id: SceneNodeID) -> Option<SceneNodeID> {
        self.nodes
            .get_node(node_id)?
            .parent_id
            .filter(|&parent_id| self.nodes.has_node(parent_id))
    }

    /// Whether the first node is a proper ancestor of the second node.
    pub fn is_ancestor(&self, ancestor_id: SceneNodeID, node_id: SceneNodeID) -> bool {
        let mut current_id = self.resolve_parent(node_id);
        while let Some(id) = current_id {
            if id == ancestor_id {
                return true;
            }
            current_id = self.resolve_parent(id);
        }
        false
    }

    /// Returns the ID of the first created node with the given name, or
    /// [`None`] if no node has that name.
    pub fn find_node_by_name(&self, name: &str) -> Option<SceneNodeID> {
        self.nodes
            .nodes
            .iter()
            .filter(|(_, node)| node.name() == Some(name))
            .map(|(&node_id, _)| node_id)
            .min()
    }

    /// Computes the transform from the space of the given node to the space
    /// of the topmost ancestor in its tree, which is the world frame for
    /// nodes attached under the root. The result is recomputed on every call.
    ///
    /// # Panics
    /// If the node does not exist.
    pub fn concatenated_transforms(&self, node_id: SceneNodeID) -> DualQuaternion<fsc> {
        rigid_log::with_trace_logging!("Concatenating transforms for scene node {}", node_id;
            self.concatenate_transforms(node_id)
        )
    }

    fn concatenate_transforms(&self, node_id: SceneNodeID) -> DualQuaternion<fsc> {
        let node = self.nodes.node(node_id);
        let mut transform = node.coordinate_system;
        let mut parent_id = node.parent_id;

        // Prepending each ancestor gives the same product as composing from
        // the top down
        while let Some(id) = parent_id {
            let parent_node = self.nodes.node(id);
            transform = parent_node.coordinate_system * transform;
            parent_id = parent_node.parent_id;
        }
        transform
    }

    /// Transforms the given point from the space of the given node to world
    /// space.
    ///
    /// # Panics
    /// If the node does not exist.
    pub fn local_to_world(&self, node_id: SceneNodeID, point: &Vector3<fsc>) -> Vector3<fsc> {
        let transform = self.concatenated_transforms(node_id);
        let rotated = Quaternion::passively_rotate_encoded_point(
            &transform.rotation(),
            &Quaternion::encode_point(point),
        );
        rotated.imag() + transform.translation()
    }

    /// Transforms the given point from world space to the space of the given
    /// node.
    ///
    /// # Panics
    /// If the node does not exist.
    pub fn world_to_local(&self, node_id: SceneNodeID, point: &Vector3<fsc>) -> Vector3<fsc> {
        let transform = self.concatenated_transforms(node_id);
        transform
            .rotation()
            .conjugate()
            .rotate_vector(&(point - transform.translation()))
    }
}

impl Default for HierarchicalCoordinateSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStorage {
    fn new() -> Self {
        Self {
            nodes: NoHashMap::default(),
            next_id: 0,
        }
    }

    /// Returns the number of nodes in the storage.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Whether a node with the given ID exists in the storage.
    pub fn has_node(&self, node_id: SceneNodeID) -> bool {
        self.nodes.contains_key(&node_id)
    }

    /// Returns a reference to the node with the given ID, or [`None`] if the
    /// node does not exist.
    pub fn get_node(&self, node_id: SceneNodeID) -> Option<&SceneNode> {
        self.nodes.get(&node_id)
    }

    /// Returns a reference to the node with the given ID.
    pub fn node(&self, node_id: SceneNodeID) -> &SceneNode {
        self.get_node(node_id).expect("Tried to get missing node")
    }

    fn get_node_mut(&mut self, node_id: SceneNodeID) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&node_id)
    }

    fn node_mut(&mut self, node_id: SceneNodeID) -> &mut SceneNode {
        self.get_node_mut(node_id)
            .expect("Tried to get missing node")
    }

    fn add_node(&mut self, node: SceneNode) -> SceneNodeID {
        let node_id = SceneNodeID(self.next_id);
        self.next_id += 1;
        self.nodes.insert(node_id, node);
        node_id
    }

    fn remove_node(&mut self, node_id: SceneNodeID) -> Option<SceneNode> {
        self.nodes.remove(&node_id)
    }
}

impl SceneNodeID {
    /// Returns the `u64` value corresponding to the ID.
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Hash for SceneNodeID {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        hasher.write_u64(self.0);
    }
}

impl nohash_hasher::IsEnabled for SceneNodeID {}

impl fmt::Display for SceneNodeID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl SceneNode {
    fn new(
        parent_id: Option<SceneNodeID>,
        coordinate_system: DualQuaternion<fsc>,
        name: Option<String>,
    ) -> Self {
        Self {
            parent_id,
            coordinate_system,
            child_ids: ChildNodeIDs::default(),
            name,
        }
    }

    fn root() -> Self {
        Self::new(None, DualQuaternion::identity(), None)
    }

    /// Returns the ID of the parent node, or [`None`] if the node is the root
    /// or detached.
    pub fn parent_id(&self) -> Option<SceneNodeID> {
        self.parent_id
    }

    /// Whether the node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns the transform from the space of the node to the space of its
    /// parent.
    pub fn local_transform(&self) -> &DualQuaternion<fsc> {
        &self.coordinate_system
    }

    /// Returns the IDs of the children of the node in the order they were
    /// added.
    pub fn child_ids(&self) -> &[SceneNodeID] {
        &self.child_ids
    }

    /// Returns the number of children of the node.
    pub fn n_children(&self) -> usize {
        self.child_ids.len()
    }

    /// Whether the node with the given ID is a child of this node.
    pub fn has_child(&self, node_id: SceneNodeID) -> bool {
        self.child_ids.contains(&node_id)
    }

    /// Returns the name of the node, if it was given one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn add_child(&mut self, node_id: SceneNodeID) {
        self.child_ids.push(node_id);
    }

    fn remove_child(&mut self, node_id: SceneNodeID) -> bool {
        if let Some(pos) = self.child_ids.iter().position(|&id| id == node_id) {
            self.child_ids.remove(pos);
            true
        } else {
            false
        }
    }
}
