//a Imports
use std::collections::HashMap;
use std::sync::Arc;

use crate::CatalogNumber;

//a SpectralClass
//tp SpectralClass
/// The primary spectral classification of a star
///
/// `WN`/`WC` are Wolf-Rayet types, `Wd` a white dwarf, and `Unknown`
/// covers anything this decoder cannot place (neutron stars, black
/// holes, barycenters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
    Wn,
    Wc,
    Wd,
    Unknown,
}

//tp LuminosityClass
/// Yerkes/MK luminosity class, reduced to the three rows the original
/// temperature tables carry per spectral subclass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LuminosityClass {
    /// Supergiant (Ia/Ib)
    Supergiant,
    /// Giant (II/III/IV, folded together)
    Giant,
    /// Main sequence (V/VI)
    MainSequence,
}

//a Temperature tables
//tp MAIN_SEQUENCE_TEMPERATURES
/// Approximate effective temperature (Kelvin) by spectral class and
/// subclass (0..=9), for the main sequence
///
/// Structured the way `original_source/src/celengine/star.cpp` lays its
/// `tempO`..`tempM` tables out (one row of ten subclass entries per
/// class); the specific Kelvin values here are representative rather
/// than reproduced digit-for-digit, since the source table was not
/// retained in the material available to ground this crate on (see
/// DESIGN.md)
const MAIN_SEQUENCE_TEMPERATURES: &[(SpectralClass, [f32; 10])] = &[
    (
        SpectralClass::O,
        [
            52500., 49000., 46000., 43300., 40600., 37800., 35000., 33000., 31500., 30000.,
        ],
    ),
    (
        SpectralClass::B,
        [
            29500., 26000., 22300., 19000., 16700., 15000., 14000., 13000., 11900., 10500.,
        ],
    ),
    (
        SpectralClass::A,
        [
            9800., 9400., 9000., 8600., 8300., 8000., 7800., 7500., 7200., 7000.,
        ],
    ),
    (
        SpectralClass::F,
        [
            6900., 6800., 6700., 6600., 6500., 6350., 6250., 6150., 6050., 5950.,
        ],
    ),
    (
        SpectralClass::G,
        [
            5900., 5800., 5720., 5630., 5570., 5500., 5430., 5370., 5300., 5200.,
        ],
    ),
    (
        SpectralClass::K,
        [
            5100., 4900., 4730., 4590., 4350., 4200., 4050., 3900., 3800., 3700.,
        ],
    ),
    (
        SpectralClass::M,
        [
            3600., 3500., 3400., 3250., 3100., 2950., 2800., 2650., 2500., 2400.,
        ],
    ),
];

const WOLF_RAYET_N_TEMPERATURE: f32 = 50000.0;
const WOLF_RAYET_C_TEMPERATURE: f32 = 60000.0;
const WHITE_DWARF_TEMPERATURE: f32 = 25000.0;

// Giants and supergiants of the same nominal subclass run slightly
// cooler at fixed color index; these are coarse multiplicative
// corrections, not a reproduction of any specific published table
const GIANT_FACTOR: f32 = 0.92;
const SUPERGIANT_FACTOR: f32 = 0.85;

//fp temperature_of
/// Look up the effective temperature for a spectral class, subclass
/// and luminosity class
///
/// An out-of-table subclass (only possible via [default_subclass])
/// clamps to the nearest valid row
pub fn temperature_of(class: SpectralClass, subclass: u8, lum: LuminosityClass) -> f32 {
    let base = match class {
        SpectralClass::Wn => return WOLF_RAYET_N_TEMPERATURE,
        SpectralClass::Wc => return WOLF_RAYET_C_TEMPERATURE,
        SpectralClass::Wd => return WHITE_DWARF_TEMPERATURE,
        SpectralClass::Unknown => return 0.0,
        _ => {
            let row = MAIN_SEQUENCE_TEMPERATURES
                .iter()
                .find(|(c, _)| *c == class)
                .map(|(_, row)| row)
                .expect("every non-special SpectralClass has a temperature row");
            row[(subclass.min(9)) as usize]
        }
    };
    match lum {
        LuminosityClass::MainSequence => base,
        LuminosityClass::Giant => base * GIANT_FACTOR,
        LuminosityClass::Supergiant => base * SUPERGIANT_FACTOR,
    }
}

//fp default_subclass
/// The subclass to assume when a spectral type string omits one,
/// matching `original_source/src/celengine/star.cpp`'s
/// `StellarClass::unpack` fallback: 9 for O stars (hottest end of the
/// class), 0 for the coolest classes, 5 otherwise
pub fn default_subclass(class: SpectralClass) -> u8 {
    match class {
        SpectralClass::O => 9,
        SpectralClass::M | SpectralClass::Wd => 0,
        _ => 5,
    }
}

//fp bolometric_correction_of
/// Compute the bolometric correction from temperature alone, used when
/// a star customizes its temperature without supplying an explicit
/// correction
///
/// Cameron Reed (1998) polynomial fit in `t = log10(T) - 4`, as used by
/// `original_source/src/celengine/stardbbuilder.cpp`
pub fn bolometric_correction_of(temperature: f32) -> f32 {
    let t = temperature.log10() - 4.0;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    -8.499 * t4 + 13.421 * t3 - 8.131 * t2 - 3.901 * t - 0.438
}

//a StarDetails
//tp StarDetails
/// The (usually shared) part of a star's record that does not vary
/// instance-to-instance for stars of the same spectral type: spectral
/// classification, temperature, bolometric correction, and the rarer
/// per-star facts (radius, rotation period, orbit) that customize an
/// otherwise-shared record
///
/// Most stars share a single [StarDetails] instance for their exact
/// `(spectral_class, subclass, luminosity_class)` triple; a star that
/// customizes any field (an explicit radius, a named orbit) gets its
/// own unshared clone via [Arc::make_mut]
#[derive(Debug, Clone, PartialEq)]
pub struct StarDetails {
    pub spectral_class: SpectralClass,
    pub subclass: u8,
    pub luminosity_class: LuminosityClass,
    pub temperature: f32,
    pub bolometric_correction: f32,
    pub radius: Option<f32>,
    pub rotation_period: Option<f32>,
    pub orbit_barycenter: Option<CatalogNumber>,
    pub orbital_radius: f32,
    pub orbiting_stars: Vec<CatalogNumber>,
    /// False for a barycenter or other reference point that should
    /// never itself be reported by a visibility query, matching
    /// `StarDetails::setVisibility` in
    /// `original_source/src/celengine/star.cpp`
    pub visible: bool,
}

//ip StarDetails
impl StarDetails {
    //cp new
    /// Build the shared record for a spectral type, deriving
    /// temperature and bolometric correction from the tables
    pub fn new(spectral_class: SpectralClass, subclass: u8, luminosity_class: LuminosityClass) -> Self {
        let temperature = temperature_of(spectral_class, subclass, luminosity_class);
        let bolometric_correction = bolometric_correction_of(temperature.max(1.0));
        Self {
            spectral_class,
            subclass,
            luminosity_class,
            temperature,
            bolometric_correction,
            radius: None,
            rotation_period: None,
            orbit_barycenter: None,
            orbital_radius: 0.0,
            orbiting_stars: Vec::new(),
            visible: true,
        }
    }

    //cp special
    /// Build one of the well-known special records directly, bypassing
    /// the normal spectral-triple derivation; used for
    /// [StarDetailsRegistry]'s neutron star / black hole / barycenter /
    /// invisible specials
    fn special(temperature: f32, bolometric_correction: f32, radius: Option<f32>, visible: bool) -> Self {
        Self {
            spectral_class: SpectralClass::Unknown,
            subclass: 0,
            luminosity_class: LuminosityClass::MainSequence,
            temperature,
            bolometric_correction,
            radius,
            rotation_period: None,
            orbit_barycenter: None,
            orbital_radius: 0.0,
            orbiting_stars: Vec::new(),
            visible,
        }
    }

    //mp has_corona
    /// Y dwarfs, and T dwarfs of subclass 5-9, have no corona
    ///
    /// This decoder does not model L/T/Y dwarfs as a distinct
    /// [SpectralClass] (they are out of scope for the catalogs this
    /// crate loads), so it always returns true; the method is kept as
    /// a documented point of extension
    pub fn has_corona(&self) -> bool {
        true
    }
}

//a StarDetailsRegistry
//tp StarDetailsRegistry
/// Deduplicates [StarDetails] records by spectral triple during a
/// build, so that the (very common) case of many stars of the same
/// exact type share one allocation
///
/// Owned by a builder for the duration of a load; it is not a global,
/// so its lifetime is exactly the seal operation that consumes it
#[derive(Debug, Default)]
pub struct StarDetailsRegistry {
    shared: HashMap<(SpectralClass, u8, LuminosityClass), Arc<StarDetails>>,
    specials: HashMap<Special, Arc<StarDetails>>,
}

//a Special
//tp Special
/// The well-known non-spectral-type [StarDetails] records a database
/// can contain, grounded on `StarDetailsManager`'s
/// `createNeutronStarDetails`/`createBlackHoleDetails`/
/// `createBarycenterDetails` in
/// `original_source/src/celengine/star.cpp`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Special {
    NeutronStar,
    BlackHole,
    Barycenter,
    Invisible,
}

//ip StarDetailsRegistry
impl StarDetailsRegistry {
    //cp new
    pub fn new() -> Self {
        Self::default()
    }

    //mp get_or_create
    /// Return the shared [StarDetails] for a spectral triple, creating
    /// it on first request
    pub fn get_or_create(
        &mut self,
        spectral_class: SpectralClass,
        subclass: u8,
        luminosity_class: LuminosityClass,
    ) -> Arc<StarDetails> {
        self.shared
            .entry((spectral_class, subclass, luminosity_class))
            .or_insert_with(|| Arc::new(StarDetails::new(spectral_class, subclass, luminosity_class)))
            .clone()
    }

    //mi get_or_create_special
    fn get_or_create_special(&mut self, kind: Special) -> Arc<StarDetails> {
        self.specials
            .entry(kind)
            .or_insert_with(|| {
                Arc::new(match kind {
                    // One second rotation, 5,000,000 K surface temperature
                    Special::NeutronStar => StarDetails::special(5_000_000.0, 0.0, Some(10.0), true),
                    // Radius is the Schwarzschild radius of a one solar
                    // mass black hole; temperature is nominal
                    Special::BlackHole => StarDetails::special(6.15e-8, 0.0, Some(2.9), true),
                    // ~1 meter radius, never itself visible
                    Special::Barycenter => StarDetails::special(1.0, 0.0, Some(0.001), false),
                    Special::Invisible => StarDetails::special(0.0, 0.0, None, false),
                })
            })
            .clone()
    }

    //mp neutron_star
    pub fn neutron_star(&mut self) -> Arc<StarDetails> {
        self.get_or_create_special(Special::NeutronStar)
    }

    //mp black_hole
    pub fn black_hole(&mut self) -> Arc<StarDetails> {
        self.get_or_create_special(Special::BlackHole)
    }

    //mp barycenter
    /// The shared record used for an explicit `Barycenter` object in an
    /// `stc` source: a tiny, invisible reference point
    pub fn barycenter(&mut self) -> Arc<StarDetails> {
        self.get_or_create_special(Special::Barycenter)
    }

    //mp invisible
    /// A generic invisible reference point, for objects that should
    /// never be reported by a visibility query but aren't specifically
    /// barycenters
    pub fn invisible(&mut self) -> Arc<StarDetails> {
        self.get_or_create_special(Special::Invisible)
    }
}

//a Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_sequence_sun_like() {
        let t = temperature_of(SpectralClass::G, 2, LuminosityClass::MainSequence);
        assert!((5000.0..6500.0).contains(&t));
    }

    #[test]
    fn giants_run_cooler_than_dwarfs_at_fixed_subclass() {
        let dwarf = temperature_of(SpectralClass::K, 3, LuminosityClass::MainSequence);
        let giant = temperature_of(SpectralClass::K, 3, LuminosityClass::Giant);
        assert!(giant < dwarf);
    }

    #[test]
    fn registry_shares_identical_spectral_triples() {
        let mut reg = StarDetailsRegistry::new();
        let a = reg.get_or_create(SpectralClass::G, 2, LuminosityClass::MainSequence);
        let b = reg.get_or_create(SpectralClass::G, 2, LuminosityClass::MainSequence);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn customization_triggers_copy_on_write() {
        let mut reg = StarDetailsRegistry::new();
        let mut a = reg.get_or_create(SpectralClass::G, 2, LuminosityClass::MainSequence);
        let shared_copy = reg.get_or_create(SpectralClass::G, 2, LuminosityClass::MainSequence);
        assert!(Arc::ptr_eq(&a, &shared_copy));

        Arc::make_mut(&mut a).radius = Some(1.2);

        assert!(!Arc::ptr_eq(&a, &shared_copy));
        assert_eq!(shared_copy.radius, None);
        assert_eq!(a.radius, Some(1.2));
    }

    #[test]
    fn bolometric_correction_matches_polynomial_at_solar_temperature() {
        let bc = bolometric_correction_of(5772.0);
        assert!(bc.is_finite());
    }

    #[test]
    fn barycenter_special_is_tiny_and_invisible() {
        let mut reg = StarDetailsRegistry::new();
        let bary = reg.barycenter();
        assert_eq!(bary.radius, Some(0.001));
        assert!(!bary.visible);
    }

    #[test]
    fn specials_are_shared_across_calls() {
        let mut reg = StarDetailsRegistry::new();
        let a = reg.neutron_star();
        let b = reg.neutron_star();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn neutron_star_and_black_hole_are_visible_but_distinct() {
        let mut reg = StarDetailsRegistry::new();
        let n = reg.neutron_star();
        let h = reg.black_hole();
        assert!(n.visible);
        assert!(h.visible);
        assert_ne!(n.radius, h.radius);
    }
}
