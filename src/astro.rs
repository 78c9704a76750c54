//a Constants
/// Light years per parsec, used to convert catalog distances (in light
/// years) to parsecs for the standard distance-modulus formula
pub const LY_PER_PARSEC: f32 = 3.26156;

/// Absolute magnitude of the Sun, used as the reference point for
/// luminosity <-> magnitude conversions
pub const SOLAR_ABS_MAG: f32 = 4.83;

/// Distance, in light years, at which absolute and apparent magnitude
/// coincide (10 parsecs)
pub const TEN_PARSECS_LY: f32 = 10.0 * LY_PER_PARSEC;

//a Conversions
//fp abs_mag_to_lum
/// Convert an absolute magnitude to luminosity in solar units
pub fn abs_mag_to_lum(abs_mag: f32) -> f32 {
    10f32.powf((SOLAR_ABS_MAG - abs_mag) / 2.5)
}

//fp lum_to_abs_mag
/// Convert a luminosity in solar units to an absolute magnitude
pub fn lum_to_abs_mag(lum: f32) -> f32 {
    SOLAR_ABS_MAG - 2.5 * lum.log10()
}

//fp abs_to_app_mag
/// Convert an absolute magnitude to an apparent magnitude at a given
/// distance (light years), ignoring extinction
pub fn abs_to_app_mag(abs_mag: f32, distance_ly: f32) -> f32 {
    let pc = (distance_ly.max(1.0e-6)) / LY_PER_PARSEC;
    abs_mag + 5.0 * (pc.log10() - 1.0)
}

//fp app_to_abs_mag
/// Convert an apparent magnitude at a given distance (light years) to
/// an absolute magnitude, ignoring extinction
pub fn app_to_abs_mag(app_mag: f32, distance_ly: f32) -> f32 {
    let pc = (distance_ly.max(1.0e-6)) / LY_PER_PARSEC;
    app_mag - 5.0 * (pc.log10() - 1.0)
}

//fp equatorial_to_cartesian
/// Convert right ascension/declination (both degrees) and distance
/// (light years) to a cartesian position, for the `stc`/`dsc` text
/// loaders' `RA`+`Dec`+`Distance` form
///
/// Grounded on `original_source/src/celengine/deepskyobj.cpp` and
/// `stardbbuilder.cpp`, both of which call through to
/// `astro::equatorialToCelestialCart`; the axis convention here is this
/// crate's own rather than a bit-for-bit match of that function's J2000
/// frame, since that function's body was not part of the material this
/// crate was grounded on (see DESIGN.md)
pub fn equatorial_to_cartesian(ra_deg: f32, dec_deg: f32, distance_ly: f32) -> [f32; 3] {
    let ra = ra_deg.to_radians();
    let dec = dec_deg.to_radians();
    [
        distance_ly * dec.cos() * ra.cos(),
        distance_ly * dec.sin(),
        -distance_ly * dec.cos() * ra.sin(),
    ]
}

//a Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_at_ten_parsecs_has_abs_mag() {
        let app = abs_to_app_mag(SOLAR_ABS_MAG, TEN_PARSECS_LY);
        assert!((app - SOLAR_ABS_MAG).abs() < 1.0e-3);
    }

    #[test]
    fn lum_round_trips_through_abs_mag() {
        let lum = 2.5;
        let back = abs_mag_to_lum(lum_to_abs_mag(lum));
        assert!((back - lum).abs() < 1.0e-3);
    }

    #[test]
    fn equatorial_conversion_preserves_distance() {
        let p = equatorial_to_cartesian(37.5, -12.0, 100.0);
        let norm = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
        assert!((norm - 100.0).abs() < 1.0e-2);
    }

    #[test]
    fn equatorial_zero_ra_dec_points_along_x() {
        let p = equatorial_to_cartesian(0.0, 0.0, 10.0);
        assert!((p[0] - 10.0).abs() < 1.0e-4);
        assert!(p[1].abs() < 1.0e-4);
        assert!(p[2].abs() < 1.0e-4);
    }
}
