//a Imports
use std::sync::Arc;

use crate::astro;
use crate::octree::OctreeObject;
use crate::spectral::StarDetails;
use crate::{CatalogNumber, Vec3};

//a Star
//tp Star
/// A single star: position, brightness, and a (usually shared)
/// [StarDetails] record
///
/// Stars are placed in the octree by [Star::position] and
/// [Star::abs_magnitude]; a star that belongs to an orbiting system has
/// `position` set to its barycenter's position, with the orbit's radius
/// recorded in its [StarDetails] so the octree can still decide whether
/// the system straddles an octant boundary (see [Star::straddles])
#[derive(Debug, Clone)]
pub struct Star {
    index: CatalogNumber,
    position: Vec3,
    abs_magnitude: f32,
    extinction: f32,
    details: Arc<StarDetails>,
}

//ip Star
impl Star {
    //cp new
    /// Create a new star
    pub fn new(index: CatalogNumber, position: Vec3, abs_magnitude: f32, details: Arc<StarDetails>) -> Self {
        Self {
            index,
            position,
            abs_magnitude,
            extinction: 0.0,
            details,
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

    //ap abs_magnitude
    pub fn abs_magnitude(&self) -> f32 {
        self.abs_magnitude
    }

    //mp set_abs_magnitude
    pub fn set_abs_magnitude(&mut self, abs_magnitude: f32) {
        self.abs_magnitude = abs_magnitude;
    }

    //ap extinction
    pub fn extinction(&self) -> f32 {
        self.extinction
    }

    //mp set_extinction
    pub fn set_extinction(&mut self, extinction: f32) {
        self.extinction = extinction;
    }

    //mp apparent_magnitude
    /// Apparent magnitude as seen from a given distance (light years),
    /// including this star's extinction coefficient
    pub fn apparent_magnitude(&self, distance_ly: f32) -> f32 {
        astro::abs_to_app_mag(self.abs_magnitude, distance_ly) + self.extinction * distance_ly
    }

    //mp bolometric_magnitude
    pub fn bolometric_magnitude(&self) -> f32 {
        self.abs_magnitude + self.details.bolometric_correction
    }

    //ap details
    pub fn details(&self) -> &StarDetails {
        &self.details
    }

    //mp details_mut
    /// Get a mutable reference to this star's details, cloning out of
    /// the shared registry entry first if this is the first
    /// customization of an otherwise-shared record
    pub fn details_mut(&mut self) -> &mut StarDetails {
        Arc::make_mut(&mut self.details)
    }

    //mp set_details
    pub fn set_details(&mut self, details: Arc<StarDetails>) {
        self.details = details;
    }

    //mp orbital_radius
    pub fn orbital_radius(&self) -> f32 {
        self.details.orbital_radius
    }

    //mp has_orbit
    pub fn has_orbit(&self) -> bool {
        self.details.orbit_barycenter.is_some()
    }

    //mp straddles
    /// True if this star's orbit radius is large enough that it could
    /// extend across an octant boundary placed `half_extent` from the
    /// octant's center
    pub fn straddles(&self, half_extent: f32) -> bool {
        self.orbital_radius() > half_extent
    }
}

//a OctreeObject
//ip OctreeObject for Star
impl OctreeObject for Star {
    fn position(&self) -> [f64; 3] {
        [
            self.position[0] as f64,
            self.position[1] as f64,
            self.position[2] as f64,
        ]
    }

    fn bounding_radius(&self) -> f64 {
        self.orbital_radius() as f64
    }

    fn magnitude(&self) -> f32 {
        self.abs_magnitude
    }

    //fp decay_magnitude
    /// Luminosity drops to a quarter of its value one level deeper,
    /// which (since `lum = 10^((4.83-mag)/2.5)`) is a fixed additive
    /// step in magnitude; computed via the luminosity round-trip to
    /// mirror `original_source/src/celengine/octree.cpp` exactly
    fn decay_magnitude(magnitude: f32) -> f32 {
        astro::lum_to_abs_mag(astro::abs_mag_to_lum(magnitude) / 4.0)
    }
}

//a Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectral::{LuminosityClass, SpectralClass, StarDetailsRegistry};

    #[test]
    fn apparent_magnitude_dims_with_distance() {
        let mut reg = StarDetailsRegistry::new();
        let details = reg.get_or_create(SpectralClass::G, 2, LuminosityClass::MainSequence);
        let star = Star::new(1, [0.0, 0.0, 0.0].into(), 4.83, details);
        let near = star.apparent_magnitude(10.0);
        let far = star.apparent_magnitude(1000.0);
        assert!(far > near);
    }

    #[test]
    fn details_mut_is_copy_on_write() {
        let mut reg = StarDetailsRegistry::new();
        let details = reg.get_or_create(SpectralClass::G, 2, LuminosityClass::MainSequence);
        let mut star_a = Star::new(1, [0.0, 0.0, 0.0].into(), 4.83, details.clone());
        let star_b = Star::new(2, [0.0, 0.0, 0.0].into(), 4.83, details);

        star_a.details_mut().radius = Some(2.0);

        assert_eq!(star_a.details().radius, Some(2.0));
        assert_eq!(star_b.details().radius, None);
    }
}
