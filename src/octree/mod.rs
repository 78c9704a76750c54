//a Modules
//! Magnitude-aware octree: a build-time [dynamic::DynamicOctree] that
//! objects are inserted into one at a time, and a query-time
//! [static_tree::StaticOctree] produced by flattening it once loading
//! is complete
//!
//! Grounded on `original_source/src/celengine/octreebuilder.h` (dynamic
//! tree, insertion/split policy) and `octree.h` /
//! `processoctree.cpp` (static tree, depth-first traversal, visible
//! and close queries)
mod dynamic;
mod static_tree;

pub use dynamic::DynamicOctree;
pub use static_tree::{OctreeVisitor, StaticOctree, StaticOctreeNode};

//a OctreeObject
//tp OctreeObject
/// The surface an octree needs from the objects it stores: a position
/// (light years, root-cell-relative), an optional bounding radius (for
/// objects that can straddle an octant split, such as a wide star
/// orbit or a large galaxy), a magnitude to sort on, and a class-level
/// decay function describing how the brightness threshold relaxes one
/// level deeper in the tree
pub trait OctreeObject {
    /// Position in light years
    fn position(&self) -> [f64; 3];

    /// Radius of a bounding sphere around [OctreeObject::position];
    /// objects whose sphere crosses an octant-splitting plane are kept
    /// at the parent node rather than pushed into a child
    fn bounding_radius(&self) -> f64 {
        0.0
    }

    /// The magnitude used to decide whether this object is bright
    /// enough to be kept at a node rather than pushed deeper
    fn magnitude(&self) -> f32;

    /// Given the brightness threshold of a node, compute the threshold
    /// that applies one level deeper (stars: luminosity halves per
    /// level, i.e. the magnitude threshold roughly doubles; DSOs:
    /// a flat addition per level)
    fn decay_magnitude(magnitude: f32) -> f32;
}

//fi straddles
/// True if an object's bounding sphere crosses one of the three
/// splitting planes through `center`, and so cannot be cleanly assigned
/// to a single child octant
pub(crate) fn straddles(position: [f64; 3], bounding_radius: f64, center: [f64; 3]) -> bool {
    (0..3).any(|i| (position[i] - center[i]).abs() < bounding_radius)
}

//fi child_index
/// Which of the 8 child octants a position falls into, relative to
/// `center`; bit 0 is set for +x, bit 1 for +y, bit 2 for +z, matching
/// `OctreeXPos`/`YPos`/`ZPos` in `octreebuilder.h`
pub(crate) fn child_index(position: [f64; 3], center: [f64; 3]) -> usize {
    let mut index = 0;
    if position[0] >= center[0] {
        index |= 1;
    }
    if position[1] >= center[1] {
        index |= 2;
    }
    if position[2] >= center[2] {
        index |= 4;
    }
    index
}

//fi child_center
/// Center of child octant `index` of a node with the given `center`
/// and `half_extent`
pub(crate) fn child_center(center: [f64; 3], half_extent: f64, index: usize) -> [f64; 3] {
    let quarter = half_extent / 2.0;
    let sign = |bit: usize| if index & bit != 0 { 1.0 } else { -1.0 };
    [
        center[0] + sign(1) * quarter,
        center[1] + sign(2) * quarter,
        center[2] + sign(4) * quarter,
    ]
}

//fi min_distance_to_node
/// Shortest possible distance from `point` to any position within the
/// cube centered at `center` with half-width `half_extent`
pub(crate) fn min_distance_to_node(point: [f64; 3], center: [f64; 3], half_extent: f64) -> f64 {
    let mut d2 = 0.0;
    for i in 0..3 {
        let delta = (point[i] - center[i]).abs() - half_extent;
        if delta > 0.0 {
            d2 += delta * delta;
        }
    }
    d2.sqrt()
}
