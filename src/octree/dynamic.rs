//a Imports
use super::static_tree::{StaticOctree, StaticOctreeNode};
use super::{child_center, child_index, straddles, OctreeObject};

//a DynamicOctreeNode
//tp DynamicOctreeNode
struct DynamicOctreeNode<OBJ> {
    center: [f64; 3],
    half_extent: f64,
    exclusive_magnitude: f32,
    objects: Vec<OBJ>,
    children: Option<Box<[DynamicOctreeNode<OBJ>; 8]>>,
}

//ip DynamicOctreeNode
impl<OBJ: OctreeObject> DynamicOctreeNode<OBJ> {
    //cp new
    fn new(center: [f64; 3], half_extent: f64, exclusive_magnitude: f32) -> Self {
        Self {
            center,
            half_extent,
            exclusive_magnitude,
            objects: Vec::new(),
            children: None,
        }
    }

    //mp insert
    /// Insert an object, splitting this node if it is a leaf that has
    /// exceeded `split_threshold`
    fn insert(&mut self, obj: OBJ, split_threshold: usize) {
        match &mut self.children {
            None => {
                self.objects.push(obj);
                if self.objects.len() > split_threshold {
                    self.split(split_threshold);
                }
            }
            Some(children) => {
                if obj.magnitude() <= self.exclusive_magnitude
                    || straddles(obj.position(), obj.bounding_radius(), self.center)
                {
                    self.objects.push(obj);
                } else {
                    let i = child_index(obj.position(), self.center);
                    children[i].insert(obj, split_threshold);
                }
            }
        }
    }

    //mi split
    /// Turn a leaf into an internal node: materialize all eight
    /// children, decay the brightness threshold one level, and
    /// re-sort the objects currently held here between staying (bright
    /// enough, or straddling) and being pushed down into a child
    fn split(&mut self, split_threshold: usize) {
        let child_half_extent = self.half_extent / 2.0;
        let children: [DynamicOctreeNode<OBJ>; 8] = std::array::from_fn(|i| {
            DynamicOctreeNode::new(
                child_center(self.center, self.half_extent, i),
                child_half_extent,
                self.exclusive_magnitude,
            )
        });
        self.children = Some(Box::new(children));
        self.exclusive_magnitude = OBJ::decay_magnitude(self.exclusive_magnitude);

        let previous = std::mem::take(&mut self.objects);
        let children = self.children.as_mut().unwrap();
        for obj in previous {
            if obj.magnitude() <= self.exclusive_magnitude
                || straddles(obj.position(), obj.bounding_radius(), self.center)
            {
                self.objects.push(obj);
            } else {
                let i = child_index(obj.position(), self.center);
                children[i].insert(obj, split_threshold);
            }
        }
    }

    //mp flatten_into
    /// Depth-first pre-order flatten: push this node, then its objects
    /// into `objects`, then recurse into children; returns the minimum
    /// (brightest) magnitude anywhere in this subtree, for the parent
    /// to fold into its own bright_factor
    fn flatten_into(self, nodes: &mut Vec<StaticOctreeNode>, objects: &mut Vec<OBJ>) -> f32 {
        let idx = nodes.len();
        nodes.push(StaticOctreeNode {
            center: self.center,
            half_extent: self.half_extent,
            first: 0,
            last: 0,
            right: 0,
            bright_factor: f32::INFINITY,
        });

        let first = objects.len();
        let mut bright_factor = f32::INFINITY;
        for obj in &self.objects {
            bright_factor = bright_factor.min(obj.magnitude());
        }
        objects.extend(self.objects);
        let last = objects.len();

        if let Some(children) = self.children {
            for child in *children {
                bright_factor = bright_factor.min(child.flatten_into(nodes, objects));
            }
        }

        let node = &mut nodes[idx];
        node.first = first;
        node.last = last;
        node.right = nodes.len();
        node.bright_factor = bright_factor;
        bright_factor
    }
}

//a DynamicOctree
//tp DynamicOctree
/// The build-time spatial structure objects are inserted into one at a
/// time; once loading is finished, call [DynamicOctree::flatten] to
/// produce the query-time [StaticOctree]
pub struct DynamicOctree<OBJ> {
    root: DynamicOctreeNode<OBJ>,
    split_threshold: usize,
}

//ip DynamicOctree
impl<OBJ: OctreeObject> DynamicOctree<OBJ> {
    //cp new
    /// Create a new dynamic octree
    ///
    /// `root_half_extent` is half the side length of the cube rooted
    /// at `center`; `root_magnitude_limit` is the brightness threshold
    /// objects are compared against the first time the root splits;
    /// `split_threshold` is the number of objects a leaf tolerates
    /// before splitting
    pub fn new(center: [f64; 3], root_half_extent: f64, root_magnitude_limit: f32, split_threshold: usize) -> Self {
        Self {
            root: DynamicOctreeNode::new(center, root_half_extent, root_magnitude_limit),
            split_threshold,
        }
    }

    //mp insert
    /// Insert a single object
    pub fn insert(&mut self, obj: OBJ) {
        self.root.insert(obj, self.split_threshold);
    }

    //mp flatten
    /// Consume this tree, producing the flattened, query-time form
    pub fn flatten(self) -> StaticOctree<OBJ> {
        let mut nodes = Vec::new();
        let mut objects = Vec::new();
        self.root.flatten_into(&mut nodes, &mut objects);
        StaticOctree::from_parts(nodes, objects)
    }
}

//a Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug)]
    struct Point {
        pos: [f64; 3],
        mag: f32,
    }

    impl OctreeObject for Point {
        fn position(&self) -> [f64; 3] {
            self.pos
        }
        fn magnitude(&self) -> f32 {
            self.mag
        }
        fn decay_magnitude(magnitude: f32) -> f32 {
            magnitude + 1.0
        }
    }

    #[test]
    fn flatten_preserves_object_count() {
        let mut tree = DynamicOctree::new([0.0; 3], 1000.0, -5.0, 4);
        for i in 0..50 {
            tree.insert(Point {
                pos: [i as f64 - 25.0, (i * 3 % 17) as f64 - 8.0, (i * 7 % 13) as f64 - 6.0],
                mag: (i % 10) as f32,
            });
        }
        let flat = tree.flatten();
        assert_eq!(flat.objects().len(), 50);
    }

    #[test]
    fn every_object_is_contained_in_its_nodes_cube() {
        let mut tree = DynamicOctree::new([0.0; 3], 100.0, -5.0, 2);
        for i in 0..40 {
            tree.insert(Point {
                pos: [
                    (i as f64 * 1.7) % 90.0 - 45.0,
                    (i as f64 * 2.3) % 90.0 - 45.0,
                    (i as f64 * 3.1) % 90.0 - 45.0,
                ],
                mag: (i % 5) as f32,
            });
        }
        let flat = tree.flatten();
        for node in flat.nodes() {
            for obj in &flat.objects()[node.first..node.last] {
                for axis in 0..3 {
                    assert!((obj.pos[axis] - node.center[axis]).abs() <= node.half_extent + 1e-9);
                }
            }
        }
    }

    #[test]
    fn depth_first_right_pointers_cover_exactly_the_subtree() {
        let mut tree = DynamicOctree::new([0.0; 3], 100.0, -5.0, 1);
        for i in 0..60 {
            tree.insert(Point {
                pos: [
                    (i as f64 * 1.7) % 90.0 - 45.0,
                    (i as f64 * 2.3) % 90.0 - 45.0,
                    (i as f64 * 3.1) % 90.0 - 45.0,
                ],
                mag: (i % 5) as f32,
            });
        }
        let flat = tree.flatten();
        for (i, node) in flat.nodes().iter().enumerate() {
            assert!(node.right > i);
            assert!(node.right <= flat.nodes().len());
        }
    }
}
