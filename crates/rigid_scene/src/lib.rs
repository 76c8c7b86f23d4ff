//! Hierarchies of nested rigid coordinate systems.

pub mod graph;

pub use graph::{HierarchicalCoordinateSystem, NodeStorage, SceneNode, SceneNodeID};

/// Floating point type used for scene transforms.
#[allow(non_camel_case_types)]
pub type fsc = f64;
