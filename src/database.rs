//a Imports
use std::collections::HashMap;

use crate::crossindex::CrossIndex;
use crate::dso::DeepSkyObject;
use crate::name::NameDatabase;
use crate::octree::StaticOctree;
use crate::query::{CloseObjects, Frustum, VisibleDsos, VisibleStars};
use crate::star::Star;
use crate::{infer_catalog_kind, format_name, CatalogNumber};

//a ObjectRef
//tp ObjectRef
/// Which of the two object spaces a catalog number resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRef {
    Star(usize),
    Dso(usize),
}

//a Database
//tp Database
/// A sealed, immutable celestial-object database: the two static
/// octrees (stars and deep-sky objects), the name directory, the
/// per-catalog cross-indexes, and the catalog-number lookup built once
/// at seal time
///
/// Every operation here is read-only; nothing in this crate ever
/// mutates a sealed [Database]
pub struct Database {
    pub(crate) stars: StaticOctree<Star>,
    pub(crate) dsos: StaticOctree<DeepSkyObject>,
    pub(crate) names: NameDatabase,
    pub(crate) cross_indexes: HashMap<String, CrossIndex>,
    pub(crate) by_number: HashMap<CatalogNumber, ObjectRef>,
    pub(crate) average_dso_magnitude: f32,
}

//ip Database
impl Database {
    //mp star_count
    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    //mp dso_count
    pub fn dso_count(&self) -> usize {
        self.dsos.len()
    }

    //mp len
    pub fn len(&self) -> usize {
        self.star_count() + self.dso_count()
    }

    //mp is_empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    //mp find_star
    /// Look up a star by catalog number
    pub fn find_star(&self, number: CatalogNumber) -> Option<&Star> {
        match self.by_number.get(&number) {
            Some(ObjectRef::Star(i)) => Some(&self.stars.objects()[*i]),
            _ => None,
        }
    }

    //mp find_dso
    /// Look up a deep-sky object by catalog number
    pub fn find_dso(&self, number: CatalogNumber) -> Option<&DeepSkyObject> {
        match self.by_number.get(&number) {
            Some(ObjectRef::Dso(i)) => Some(&self.dsos.objects()[*i]),
            _ => None,
        }
    }

    //mp find_by_number
    pub fn find_by_number(&self, number: CatalogNumber) -> Option<ObjectRef> {
        self.by_number.get(&number).copied()
    }

    //mp find_number_by_name
    pub fn find_number_by_name(&self, name: &str, i18n: bool) -> Option<CatalogNumber> {
        self.names.find_number_by_name(name, i18n)
    }

    //mp find_by_name
    /// Resolve a name to whichever object it refers to
    ///
    /// Tries, in order: the exact (normalized) name; the name with a
    /// secondary `"1"` component suffix; and the name with a tertiary
    /// `" A"` component suffix — covering a lookup that omits a
    /// numbered or lettered component present in the stored name (e.g.
    /// `"Alf Cen"` resolving to the star stored as `"Alpha Centauri A"`)
    pub fn find_by_name(&self, name: &str, i18n: bool) -> Option<ObjectRef> {
        let number = self
            .names
            .find_number_by_name(name, i18n)
            .or_else(|| self.names.find_number_by_name(&format!("{name} 1"), i18n))
            .or_else(|| self.names.find_number_by_name(&format!("{name} A"), i18n))?;
        self.find_by_number(number)
    }

    //mp find_star_by_name
    pub fn find_star_by_name(&self, name: &str, i18n: bool) -> Option<&Star> {
        match self.find_by_name(name, i18n)? {
            ObjectRef::Star(i) => Some(&self.stars.objects()[i]),
            ObjectRef::Dso(_) => None,
        }
    }

    //mp find_dso_by_name
    pub fn find_dso_by_name(&self, name: &str, i18n: bool) -> Option<&DeepSkyObject> {
        match self.find_by_name(name, i18n)? {
            ObjectRef::Dso(i) => Some(&self.dsos.objects()[i]),
            ObjectRef::Star(_) => None,
        }
    }

    //mp name_of
    /// The display name for a catalog number: its first registered
    /// name, or — if it has none — the number formatted under its
    /// inferred catalog, e.g. `"HIP 11767"`
    pub fn name_of(&self, number: CatalogNumber) -> String {
        self.names
            .first_name_of(number)
            .map(str::to_string)
            .unwrap_or_else(|| format_name(number, infer_catalog_kind(number)))
    }

    //mp name_list_of
    /// Up to `max` names for a catalog number, joined with `" / "`:
    /// every registered name followed by a cross-index projection
    /// (e.g. `"HD 48915"`) for every cross-index this number appears in
    ///
    /// Falls back to the same number-formatted placeholder as
    /// [Database::name_of] when nothing at all is registered
    pub fn name_list_of(&self, number: CatalogNumber, max: usize) -> String {
        let mut names: Vec<String> = self.names.names_of(number).map(str::to_string).collect();

        let mut catalogs: Vec<&String> = self.cross_indexes.keys().collect();
        catalogs.sort();
        for catalog in catalogs {
            if let Some(external) = self.cross_indexes[catalog].get_reverse(number) {
                names.push(format!("{} {external}", catalog.to_uppercase()));
            }
        }

        if names.is_empty() {
            names.push(format_name(number, infer_catalog_kind(number)));
        }

        names.truncate(max);
        names.join(" / ")
    }

    //mp completion
    pub fn completion(&self, prefix: &str, i18n: bool) -> Vec<String> {
        self.names.completion(prefix, i18n)
    }

    //mp cross_index
    /// Map an external catalog's number (e.g. Henry Draper) to this
    /// database's catalog number, for a named cross-index
    pub fn cross_index(&self, catalog: &str, external: u32) -> Option<CatalogNumber> {
        self.cross_indexes.get(catalog)?.get(external)
    }

    //mp cross_index_reverse
    pub fn cross_index_reverse(&self, catalog: &str, internal: CatalogNumber) -> Option<u32> {
        self.cross_indexes.get(catalog)?.get_reverse(internal)
    }

    //mp average_dso_magnitude
    /// Average absolute magnitude across deep-sky objects with a known
    /// magnitude, grounded on `calcAvgAbsMag` in
    /// `original_source/src/celengine/dsodbbuilder.cpp`
    pub fn average_dso_magnitude(&self) -> f32 {
        self.average_dso_magnitude
    }

    //mp find_visible_stars
    /// Stars visible from `observer` within `frustum`, no fainter than
    /// `faintest_magnitude`
    pub fn find_visible_stars(
        &self,
        observer: [f64; 3],
        frustum: &Frustum,
        faintest_magnitude: f32,
    ) -> Vec<CatalogNumber> {
        let mut visitor = VisibleStars::new(observer, frustum, faintest_magnitude);
        self.stars.process_depth_first(&mut visitor);
        visitor.into_results()
    }

    //mp find_visible_dsos
    pub fn find_visible_dsos(
        &self,
        observer: [f64; 3],
        frustum: &Frustum,
        faintest_magnitude: f32,
    ) -> Vec<CatalogNumber> {
        let mut visitor = VisibleDsos::new(observer, frustum, faintest_magnitude);
        self.dsos.process_depth_first(&mut visitor);
        visitor.into_results()
    }

    //mp find_close_stars
    pub fn find_close_stars(&self, observer: [f64; 3], radius: f64) -> Vec<CatalogNumber> {
        let mut visitor = CloseObjects::new(observer, radius);
        self.stars.process_depth_first(&mut visitor);
        visitor.into_results()
    }

    //mp find_close_dsos
    pub fn find_close_dsos(&self, observer: [f64; 3], radius: f64) -> Vec<CatalogNumber> {
        let mut visitor = CloseObjects::new(observer, radius);
        self.dsos.process_depth_first(&mut visitor);
        visitor.into_results()
    }
}
