//a Imports
use crate::octree::OctreeObject;
use crate::{CatalogNumber, Quat, Vec3};

/// Magnitude decay applied one octree level deeper, per
/// `original_source/src/celengine/dsodbbuilder.cpp`'s
/// `DSOOctreeTraits::applyDecay`
const DSO_MAGNITUDE_DECAY_PER_LEVEL: f32 = 0.5;

//a DeepSkyObjectType
//tp DeepSkyObjectType
/// The kind of deep-sky object, as grounded on
/// `original_source/src/celengine/deepskyobj.h`'s `DeepSkyObjectType`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeepSkyObjectType {
    Galaxy,
    Globular,
    Nebula,
    OpenCluster,
}

//a DeepSkyObject
//tp DSO_DEFAULT_ABS_MAGNITUDE
/// Sentinel used when a deep-sky object's absolute magnitude is
/// unknown; excluded from any magnitude averaging
pub const DSO_DEFAULT_ABS_MAGNITUDE: f32 = -1000.0;

//tp DeepSkyObject
/// A galaxy, globular cluster, nebula, or open cluster
#[derive(Debug, Clone)]
pub struct DeepSkyObject {
    index: CatalogNumber,
    position: Vec3,
    orientation: Quat,
    radius: f32,
    abs_magnitude: f32,
    object_type: DeepSkyObjectType,
}

//ip DeepSkyObject
impl DeepSkyObject {
    //cp new
    pub fn new(index: CatalogNumber, position: Vec3, radius: f32, object_type: DeepSkyObjectType) -> Self {
        Self {
            index,
            position,
            orientation: Quat::default(),
            radius,
            abs_magnitude: DSO_DEFAULT_ABS_MAGNITUDE,
            object_type,
        }
    }

    //ap index
    pub fn index(&self) -> CatalogNumber {
        self.index
    }

    //ap position
    pub fn position(&self) -> &Vec3 {
        &self.position
    }

    //mp set_position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    //ap orientation
    pub fn orientation(&self) -> &Quat {
        &self.orientation
    }

    //mp set_orientation
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }

    //ap radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    //mp set_radius
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    //ap abs_magnitude
    pub fn abs_magnitude(&self) -> f32 {
        self.abs_magnitude
    }

    //mp set_abs_magnitude
    pub fn set_abs_magnitude(&mut self, abs_magnitude: f32) {
        self.abs_magnitude = abs_magnitude;
    }

    //mp has_known_magnitude
    pub fn has_known_magnitude(&self) -> bool {
        self.abs_magnitude != DSO_DEFAULT_ABS_MAGNITUDE
    }

    //ap object_type
    pub fn object_type(&self) -> DeepSkyObjectType {
        self.object_type
    }
}

//a OctreeObject
//ip OctreeObject for DeepSkyObject
impl OctreeObject for DeepSkyObject {
    fn position(&self) -> [f64; 3] {
        [
            self.position[0] as f64,
            self.position[1] as f64,
            self.position[2] as f64,
        ]
    }

    fn bounding_radius(&self) -> f64 {
        self.radius as f64
    }

    fn magnitude(&self) -> f32 {
        self.abs_magnitude
    }

    fn decay_magnitude(magnitude: f32) -> f32 {
        magnitude + DSO_MAGNITUDE_DECAY_PER_LEVEL
    }
}

//a Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_abs_magnitude_is_the_sentinel() {
        let dso = DeepSkyObject::new(1, [0.0, 0.0, 0.0].into(), 1.0, DeepSkyObjectType::Galaxy);
        assert!(!dso.has_known_magnitude());
    }
}
