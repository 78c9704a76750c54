//a Imports
use std::collections::{HashMap, HashSet};

use crate::crossindex::CrossIndex;
use crate::database::{Database, ObjectRef};
use crate::dso::DeepSkyObject;
use crate::name::NameDatabase;
use crate::octree::{DynamicOctree, OctreeObject};
use crate::spectral::StarDetailsRegistry;
use crate::star::Star;
use crate::{CatalogNumber, Error, AUTO_INDEX_MAX, AUTO_INDEX_MIN};

//a Constants
/// Half the side length of the stars octree's root cell (light years)
const STAR_ROOT_HALF_EXTENT: f64 = 5.0e8;
/// Half the side length of the DSOs octree's root cell (light years)
const DSO_ROOT_HALF_EXTENT: f64 = 5.0e10;

/// A leaf splits once it holds more stars than this
const STAR_SPLIT_THRESHOLD: usize = 100;
/// A leaf splits once it holds more DSOs than this
const DSO_SPLIT_THRESHOLD: usize = 10;

/// Brightness threshold a star must beat to stay at the root once it splits
const STAR_ROOT_MAGNITUDE_LIMIT: f32 = -1.0;
/// Brightness threshold a DSO must beat to stay at the root once it
/// splits, matching `DSO_OCTREE_MAGNITUDE` in
/// `original_source/src/celengine/dsodbbuilder.cpp`
const DSO_ROOT_MAGNITUDE_LIMIT: f32 = 8.0;

//a DatabaseBuilder
//tp DatabaseBuilder
/// Accumulates stars, DSOs, names and cross-indexes from one or more
/// sources, then [DatabaseBuilder::seal]s them into an immutable,
/// queryable [Database]
///
/// This is the only part of the crate where mutation happens; once
/// `seal` returns, the result is read-only
pub struct DatabaseBuilder {
    stars: Vec<Star>,
    dsos: Vec<DeepSkyObject>,
    names: NameDatabase,
    cross_indexes: HashMap<String, CrossIndex>,
    seen_numbers: HashSet<CatalogNumber>,
    pending_barycenters: Vec<(usize, CatalogNumber)>,
    details_registry: StarDetailsRegistry,
    next_auto_number: CatalogNumber,
}

//ip Default for DatabaseBuilder
impl Default for DatabaseBuilder {
    fn default() -> Self {
        Self {
            stars: Vec::new(),
            dsos: Vec::new(),
            names: NameDatabase::new(),
            cross_indexes: HashMap::new(),
            seen_numbers: HashSet::new(),
            pending_barycenters: Vec::new(),
            details_registry: StarDetailsRegistry::new(),
            next_auto_number: AUTO_INDEX_MAX,
        }
    }
}

//ip DatabaseBuilder
impl DatabaseBuilder {
    //cp new
    pub fn new() -> Self {
        Self::default()
    }

    //ap details_registry
    /// The shared [StarDetailsRegistry] used while constructing stars
    /// from a loader
    pub fn details_registry(&mut self) -> &mut StarDetailsRegistry {
        &mut self.details_registry
    }

    //mp allocate_auto_number
    /// Hand out the next free catalog number from the runtime-allocated
    /// range, descending from [AUTO_INDEX_MAX]
    pub fn allocate_auto_number(&mut self) -> Result<CatalogNumber, Error> {
        if self.next_auto_number < AUTO_INDEX_MIN {
            return Err(Error::ExceededCapacity("auto-allocated catalog numbers"));
        }
        let n = self.next_auto_number;
        self.next_auto_number -= 1;
        Ok(n)
    }

    //mp add_star
    /// Add a star record; errors if its catalog number is already in use
    pub fn add_star(&mut self, star: Star) -> Result<(), Error> {
        if !self.seen_numbers.insert(star.index()) {
            return Err(Error::DuplicateCatalogNumber(star.index()));
        }
        self.stars.push(star);
        Ok(())
    }

    //mp add_dso
    /// Add a deep-sky object record; errors if its catalog number is
    /// already in use
    pub fn add_dso(&mut self, dso: DeepSkyObject) -> Result<(), Error> {
        if !self.seen_numbers.insert(dso.index()) {
            return Err(Error::DuplicateCatalogNumber(dso.index()));
        }
        self.dsos.push(dso);
        Ok(())
    }

    //mp add_name
    pub fn add_name(&mut self, number: CatalogNumber, name: &str) {
        self.names.add(number, name);
    }

    //mp find_number_by_name
    /// Resolve a name against the names registered so far; used by a
    /// text loader (e.g. `stc`) to resolve a catalog number from a name
    /// when a record gives no explicit number
    pub fn find_number_by_name(&self, name: &str, i18n: bool) -> Option<CatalogNumber> {
        self.names.find_number_by_name(name, i18n)
    }

    //mp find_star
    pub fn find_star(&self, number: CatalogNumber) -> Option<&Star> {
        self.stars.iter().find(|s| s.index() == number)
    }

    //mp find_star_mut
    pub fn find_star_mut(&mut self, number: CatalogNumber) -> Option<&mut Star> {
        self.stars.iter_mut().find(|s| s.index() == number)
    }

    //mp put_star
    /// Insert a star, replacing any existing star with the same catalog
    /// number in place
    ///
    /// Unlike [DatabaseBuilder::add_star], this does not error on a
    /// duplicate catalog number: it is used by disposition-aware
    /// loaders like the `stc` text reader, where `Add` and `Replace`
    /// may legitimately redefine an already-loaded star
    pub fn put_star(&mut self, star: Star) {
        self.seen_numbers.insert(star.index());
        if let Some(existing) = self.find_star_mut(star.index()) {
            *existing = star;
        } else {
            self.stars.push(star);
        }
    }

    //mp set_orbit_barycenter_for
    /// Like [DatabaseBuilder::set_orbit_barycenter], but for a star
    /// identified by catalog number rather than "most recently added";
    /// used by a loader that may apply properties after the star has
    /// already been inserted
    pub fn set_orbit_barycenter_for(&mut self, star_number: CatalogNumber, barycenter: CatalogNumber) {
        if let Some(i) = self.stars.iter().position(|s| s.index() == star_number) {
            self.pending_barycenters.push((i, barycenter));
        }
    }

    //mp add_localized_name
    pub fn add_localized_name(&mut self, number: CatalogNumber, name: &str) {
        self.names.add_localized(number, name);
    }

    //mp add_cross_index_range
    pub fn add_cross_index_range(
        &mut self,
        catalog: &str,
        start: u32,
        shift: i32,
        length: u32,
        overwrite: bool,
    ) -> Result<(), Error> {
        self.cross_indexes
            .entry(catalog.to_string())
            .or_default()
            .insert(start, shift, length, overwrite)
    }

    //mp require_barycenter_identity
    /// Reject a `Barycenter` object that has neither an explicit
    /// catalog number nor a name: such an object could never again be
    /// referenced by a later `OrbitBarycenter`, so there is no point
    /// adding it
    pub fn require_barycenter_identity(
        number: Option<CatalogNumber>,
        name: Option<&str>,
    ) -> Result<(), Error> {
        if number.is_none() && name.is_none() {
            Err(Error::InvalidName(
                "barycenter with neither a catalog number nor a name".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    //mp set_orbit_barycenter
    /// Record that the star most recently added orbits the star with
    /// catalog number `barycenter`
    ///
    /// Resolution is deferred to [DatabaseBuilder::seal], since the
    /// barycenter star may not have been loaded yet (orbit references
    /// can form forward references, or even cycles, across a text
    /// source)
    pub fn set_orbit_barycenter(&mut self, barycenter: CatalogNumber) {
        if let Some(last) = self.stars.len().checked_sub(1) {
            self.pending_barycenters.push((last, barycenter));
        }
    }

    //mp seal
    /// Resolve deferred references, build both octrees, and return the
    /// immutable database
    pub fn seal(mut self) -> Database {
        let index_by_number: HashMap<CatalogNumber, usize> = self
            .stars
            .iter()
            .enumerate()
            .map(|(i, s)| (s.index(), i))
            .collect();

        for (star_i, barycenter_number) in std::mem::take(&mut self.pending_barycenters) {
            let Some(&bary_i) = index_by_number.get(&barycenter_number) else {
                log::warn!("unresolved orbit barycenter reference to {barycenter_number}");
                continue;
            };
            let barycenter_position = self.stars[bary_i].position().clone();
            let distance = {
                let d = self.stars[star_i].position().clone();
                let dx = d[0] - barycenter_position[0];
                let dy = d[1] - barycenter_position[1];
                let dz = d[2] - barycenter_position[2];
                (dx * dx + dy * dy + dz * dz).sqrt()
            };
            let star_number = self.stars[star_i].index();

            {
                let details = self.stars[star_i].details_mut();
                details.orbit_barycenter = Some(barycenter_number);
                details.orbital_radius = distance;
            }
            self.stars[star_i].set_position(barycenter_position);
            self.stars[bary_i]
                .details_mut()
                .orbiting_stars
                .push(star_number);
        }

        let average_dso_magnitude = {
            let known: Vec<f32> = self
                .dsos
                .iter()
                .filter(|d| d.has_known_magnitude())
                .map(|d| d.abs_magnitude())
                .collect();
            if known.is_empty() {
                0.0
            } else {
                known.iter().sum::<f32>() / known.len() as f32
            }
        };

        let mut star_tree = DynamicOctree::new(
            [0.0; 3],
            STAR_ROOT_HALF_EXTENT,
            STAR_ROOT_MAGNITUDE_LIMIT,
            STAR_SPLIT_THRESHOLD,
        );
        for star in self.stars {
            star_tree.insert(star);
        }
        let stars = star_tree.flatten();

        let mut dso_tree = DynamicOctree::new(
            [0.0; 3],
            DSO_ROOT_HALF_EXTENT,
            DSO_ROOT_MAGNITUDE_LIMIT,
            DSO_SPLIT_THRESHOLD,
        );
        for dso in self.dsos {
            dso_tree.insert(dso);
        }
        let dsos = dso_tree.flatten();

        let mut by_number = HashMap::new();
        for (i, star) in stars.objects().iter().enumerate() {
            by_number.insert(star.index(), ObjectRef::Star(i));
        }
        for (i, dso) in dsos.objects().iter().enumerate() {
            by_number.insert(dso.index(), ObjectRef::Dso(i));
        }

        log::debug!(
            "sealed database: {} stars, {} dsos",
            stars.len(),
            dsos.len()
        );

        Database {
            stars,
            dsos,
            names: self.names,
            cross_indexes: self.cross_indexes,
            by_number,
            average_dso_magnitude,
        }
    }
}

//a Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectral::{LuminosityClass, SpectralClass};

    fn star(number: CatalogNumber, pos: [f32; 3], mag: f32, builder: &mut DatabaseBuilder) -> Star {
        let details = builder
            .details_registry()
            .get_or_create(SpectralClass::G, 2, LuminosityClass::MainSequence);
        Star::new(number, pos.into(), mag, details)
    }

    #[test]
    fn duplicate_catalog_number_is_rejected() {
        let mut b = DatabaseBuilder::new();
        let s1 = star(1, [0.0, 0.0, 0.0], 1.0, &mut b);
        let s2 = star(1, [1.0, 0.0, 0.0], 2.0, &mut b);
        b.add_star(s1).unwrap();
        assert!(b.add_star(s2).is_err());
    }

    #[test]
    fn seal_makes_stars_findable_by_number() {
        let mut b = DatabaseBuilder::new();
        let s = star(42, [1.0, 2.0, 3.0], 1.0, &mut b);
        b.add_star(s).unwrap();
        let db = b.seal();
        assert!(db.find_star(42).is_some());
        assert!(db.find_star(43).is_none());
    }

    #[test]
    fn unresolved_barycenter_is_dropped_not_fatal() {
        let mut b = DatabaseBuilder::new();
        let s = star(1, [0.0, 0.0, 0.0], 1.0, &mut b);
        b.add_star(s).unwrap();
        b.set_orbit_barycenter(999); // never added
        let db = b.seal();
        assert!(db.find_star(1).unwrap().has_orbit() == false);
    }

    #[test]
    fn barycenter_with_neither_number_nor_name_is_rejected() {
        assert!(DatabaseBuilder::require_barycenter_identity(None, None).is_err());
        assert!(DatabaseBuilder::require_barycenter_identity(Some(1), None).is_ok());
        assert!(DatabaseBuilder::require_barycenter_identity(None, Some("Foo")).is_ok());
    }

    #[test]
    fn resolved_barycenter_moves_star_to_its_position() {
        let mut b = DatabaseBuilder::new();
        let bary = star(1, [10.0, 0.0, 0.0], 1.0, &mut b);
        b.add_star(bary).unwrap();
        let orbiter = star(2, [20.0, 0.0, 0.0], 3.0, &mut b);
        b.add_star(orbiter).unwrap();
        b.set_orbit_barycenter(1);
        let db = b.seal();
        let s2 = db.find_star(2).unwrap();
        assert_eq!(s2.position()[0], 10.0);
        assert!(s2.has_orbit());
    }
}
