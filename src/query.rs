//a Imports
use crate::astro;
use crate::dso::DeepSkyObject;
use crate::octree::{min_distance_to_node, OctreeVisitor, StaticOctreeNode};
use crate::star::Star;
use crate::CatalogNumber;

//a Plane
//tp Plane
/// A half-space boundary: points `p` with `normal.dot(p) + d >= 0` are
/// inside
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub normal: [f64; 3],
    pub d: f64,
}

//ip Plane
impl Plane {
    //mp signed_distance
    fn signed_distance(&self, p: [f64; 3]) -> f64 {
        self.normal[0] * p[0] + self.normal[1] * p[1] + self.normal[2] * p[2] + self.d
    }

    //mp l1_norm
    fn l1_norm(&self) -> f64 {
        self.normal[0].abs() + self.normal[1].abs() + self.normal[2].abs()
    }
}

//a Frustum
//tp Frustum
/// A 5-plane view frustum (the four side planes plus a near plane; far
/// is left unbounded since nothing in this database is too distant to
/// matter), grounded on
/// `original_source/src/celengine/processoctree.cpp`'s
/// `create5FrustumPlanes`
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    pub planes: [Plane; 5],
}

//ip Frustum
impl Frustum {
    //mp safety_factor
    /// A conservative (> 1) safety factor applied to a node's
    /// half-extent when testing it against the frustum, so that a
    /// node barely inside the frustum is never wrongly culled
    const SAFETY_FACTOR: f64 = 1.1;

    //mp node_is_outside
    /// True if a cube node is entirely outside at least one plane of
    /// the frustum, and so can be skipped in full
    fn node_is_outside(&self, center: [f64; 3], half_extent: f64) -> bool {
        self.planes.iter().any(|plane| {
            plane.signed_distance(center) < -Self::SAFETY_FACTOR * plane.l1_norm() * half_extent
        })
    }

    //mp contains_point
    /// True if a single point lies inside every plane of the frustum
    ///
    /// [Frustum::node_is_outside] only rules out a whole node at once;
    /// an accepted node can still hold individual objects outside the
    /// frustum; this is the exact per-object test
    pub fn contains_point(&self, point: [f64; 3]) -> bool {
        self.planes.iter().all(|plane| plane.signed_distance(point) >= 0.0)
    }
}

//a VisibleStars
//tp VisibleStars
/// Finds every star whose apparent magnitude, at `observer`, is no
/// fainter than `faintest_magnitude`, and whose position falls inside
/// `frustum` — except for stars within an orbiting system closer than
/// [VisibleStars::NEAR_FIELD_RADIUS_LY], which are always reported
/// regardless of brightness or frustum, since a nearby orbiting
/// companion matters however faint it looks from afar
pub struct VisibleStars<'a> {
    observer: [f64; 3],
    frustum: &'a Frustum,
    faintest_magnitude: f32,
    results: Vec<CatalogNumber>,
}

//ip VisibleStars
impl<'a> VisibleStars<'a> {
    /// Stars with an orbit closer than this (light years) are always
    /// reported, matching `MAX_STAR_ORBIT_RADIUS` handling in
    /// `processoctree.cpp`
    const NEAR_FIELD_RADIUS_LY: f64 = 1.0;

    //cp new
    pub fn new(observer: [f64; 3], frustum: &'a Frustum, faintest_magnitude: f32) -> Self {
        Self {
            observer,
            frustum,
            faintest_magnitude,
            results: Vec::new(),
        }
    }

    //mp into_results
    pub fn into_results(self) -> Vec<CatalogNumber> {
        self.results
    }
}

//ip OctreeVisitor<Star> for VisibleStars
impl<'a> OctreeVisitor<Star> for VisibleStars<'a> {
    fn check_node(&mut self, node: &StaticOctreeNode) -> bool {
        if self.frustum.node_is_outside(node.center, node.half_extent) {
            return false;
        }
        let distance = min_distance_to_node(self.observer, node.center, node.half_extent);
        let best_possible = astro::abs_to_app_mag(node.bright_factor, distance.max(1.0) as f32);
        best_possible <= self.faintest_magnitude
    }

    fn process_object(&mut self, obj: &Star) {
        use crate::octree::OctreeObject;
        if !obj.details().visible {
            return;
        }
        let pos = obj.position();
        let dx = pos[0] - self.observer[0];
        let dy = pos[1] - self.observer[1];
        let dz = pos[2] - self.observer[2];
        let distance = (dx * dx + dy * dy + dz * dz).sqrt();

        if distance < Self::NEAR_FIELD_RADIUS_LY && obj.has_orbit() {
            self.results.push(obj.index());
            return;
        }

        if !self.frustum.contains_point(pos) {
            return;
        }

        if obj.apparent_magnitude(distance as f32) <= self.faintest_magnitude {
            self.results.push(obj.index());
        }
    }
}

//a VisibleDsos
//tp VisibleDsos
/// Finds every deep-sky object bright enough to see from `observer`
/// within `faintest_magnitude`, inside `frustum`
///
/// Grounded on `processVisibleDsos` in
/// `original_source/src/celengine/processoctree.cpp`: the distance
/// used for the magnitude conversion is reduced by the object's own
/// bounding radius, and objects within 10 parsecs are compared by
/// absolute rather than apparent magnitude (the two coincide there, and
/// it avoids a division blowing up as distance approaches zero)
pub struct VisibleDsos<'a> {
    observer: [f64; 3],
    frustum: &'a Frustum,
    faintest_magnitude: f32,
    results: Vec<CatalogNumber>,
}

//ip VisibleDsos
impl<'a> VisibleDsos<'a> {
    pub fn new(observer: [f64; 3], frustum: &'a Frustum, faintest_magnitude: f32) -> Self {
        Self {
            observer,
            frustum,
            faintest_magnitude,
            results: Vec::new(),
        }
    }

    pub fn into_results(self) -> Vec<CatalogNumber> {
        self.results
    }
}

//ip OctreeVisitor<DeepSkyObject> for VisibleDsos
impl<'a> OctreeVisitor<DeepSkyObject> for VisibleDsos<'a> {
    fn check_node(&mut self, node: &StaticOctreeNode) -> bool {
        if self.frustum.node_is_outside(node.center, node.half_extent) {
            return false;
        }
        let distance = min_distance_to_node(self.observer, node.center, node.half_extent);
        let best_possible = astro::abs_to_app_mag(node.bright_factor, distance.max(1.0) as f32);
        best_possible <= self.faintest_magnitude
    }

    fn process_object(&mut self, obj: &DeepSkyObject) {
        use crate::octree::OctreeObject;
        if !obj.has_known_magnitude() {
            return;
        }
        let pos = obj.position();
        if !self.frustum.contains_point(pos) {
            return;
        }
        let dx = pos[0] - self.observer[0];
        let dy = pos[1] - self.observer[1];
        let dz = pos[2] - self.observer[2];
        let distance = ((dx * dx + dy * dy + dz * dz).sqrt() - obj.radius() as f64).max(0.0);

        let mag = if distance > astro::TEN_PARSECS_LY as f64 {
            astro::abs_to_app_mag(obj.abs_magnitude(), distance as f32)
        } else {
            obj.abs_magnitude()
        };

        if mag <= self.faintest_magnitude {
            self.results.push(obj.index());
        }
    }
}

//a CloseObjects
//tp CloseObjects
/// Finds every object within `radius` light years of `observer`,
/// regardless of brightness; generic over anything with a position,
/// so it serves both stars and DSOs
pub struct CloseObjects {
    observer: [f64; 3],
    radius: f64,
    results: Vec<CatalogNumber>,
}

//ip CloseObjects
impl CloseObjects {
    pub fn new(observer: [f64; 3], radius: f64) -> Self {
        Self {
            observer,
            radius,
            results: Vec::new(),
        }
    }

    pub fn into_results(self) -> Vec<CatalogNumber> {
        self.results
    }
}

//ip OctreeVisitor<Star> for CloseObjects
impl OctreeVisitor<Star> for CloseObjects {
    fn check_node(&mut self, node: &StaticOctreeNode) -> bool {
        min_distance_to_node(self.observer, node.center, node.half_extent) <= self.radius
    }

    fn process_object(&mut self, obj: &Star) {
        use crate::octree::OctreeObject;
        if !obj.details().visible {
            return;
        }
        let pos = obj.position();
        let dx = pos[0] - self.observer[0];
        let dy = pos[1] - self.observer[1];
        let dz = pos[2] - self.observer[2];
        if dx * dx + dy * dy + dz * dz <= self.radius * self.radius {
            self.results.push(obj.index());
        }
    }
}

//ip OctreeVisitor<DeepSkyObject> for CloseObjects
impl OctreeVisitor<DeepSkyObject> for CloseObjects {
    fn check_node(&mut self, node: &StaticOctreeNode) -> bool {
        min_distance_to_node(self.observer, node.center, node.half_extent) <= self.radius
    }

    fn process_object(&mut self, obj: &DeepSkyObject) {
        use crate::octree::OctreeObject;
        let pos = obj.position();
        let dx = pos[0] - self.observer[0];
        let dy = pos[1] - self.observer[1];
        let dz = pos[2] - self.observer[2];
        if dx * dx + dy * dy + dz * dz <= self.radius * self.radius {
            self.results.push(obj.index());
        }
    }
}
