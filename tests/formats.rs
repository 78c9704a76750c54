use std::error::Error;
use std::io::Write;

use astro_catalog::{formats, DatabaseBuilder};

fn celstars_bytes(records: &[(u32, [f32; 3], f32, u16)]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"CELSTARS");
    bytes.extend_from_slice(&0x0100u16.to_le_bytes());
    bytes.extend_from_slice(&(records.len() as u32).to_le_bytes());
    for (number, pos, abs_mag, spectral_code) in records {
        bytes.extend_from_slice(&number.to_le_bytes());
        for c in pos {
            bytes.extend_from_slice(&c.to_le_bytes());
        }
        bytes.extend_from_slice(&((abs_mag * 256.0) as i16).to_le_bytes());
        bytes.extend_from_slice(&spectral_code.to_le_bytes());
    }
    bytes
}

#[test]
fn read_celstars_loads_every_record() -> Result<(), Box<dyn Error>> {
    let code = formats::encode_spectral_code(
        astro_catalog::SpectralClass::G,
        2,
        astro_catalog::LuminosityClass::MainSequence,
    );
    let bytes = celstars_bytes(&[
        (11767, [1.0, 2.0, 3.0], 1.97, code),
        (32349, [4.0, 5.0, 6.0], 1.45, code),
    ]);

    let mut builder = DatabaseBuilder::new();
    let loaded = formats::read_celstars(&bytes[..], &mut builder)?;
    assert_eq!(loaded, 2);

    let db = builder.seal();
    assert!(db.find_star(11767).is_some());
    assert!(db.find_star(32349).is_some());
    Ok(())
}

#[test]
fn read_celstars_rejects_truncated_file() {
    let mut bytes = celstars_bytes(&[(1, [0.0; 3], 1.0, 0)]);
    bytes.truncate(bytes.len() - 2); // chop off half the last record
    let mut builder = DatabaseBuilder::new();
    assert!(formats::read_celstars(&bytes[..], &mut builder).is_err());
}

#[test]
fn read_celindex_feeds_cross_index_ranges() -> Result<(), Box<dyn Error>> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"CELINDEX");
    bytes.extend_from_slice(&0x0100u16.to_le_bytes());
    bytes.extend_from_slice(&8890u32.to_le_bytes());
    bytes.extend_from_slice(&11767u32.to_le_bytes());

    let mut builder = DatabaseBuilder::new();
    let loaded = formats::read_celindex(&bytes[..], "hd", &mut builder)?;
    assert_eq!(loaded, 1);

    let db = builder.seal();
    assert_eq!(db.cross_index("hd", 8890), Some(11767));
    Ok(())
}

#[test]
fn read_names_from_a_real_file() -> Result<(), Box<dyn Error>> {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("astro-catalog-test-names-{}.txt", std::process::id()));
    {
        let mut f = std::fs::File::create(&path)?;
        writeln!(f, "11767 Polaris:alf UMi")?;
    }
    let text = std::fs::read_to_string(&path)?;
    std::fs::remove_file(&path)?;

    let mut builder = DatabaseBuilder::new();
    let loaded = formats::read_names(&text, &mut builder);
    assert_eq!(loaded, 2);
    Ok(())
}

#[test]
fn read_stc_loads_a_position_and_spectral_type() -> Result<(), Box<dyn Error>> {
    let text = r#"
        Add 70890 "Proxima Centauri"
        {
            SpectralType "M5V"
            Position [ 1.0 2.0 3.0 ]
            AbsMag 15.5
        }
    "#;
    let mut builder = DatabaseBuilder::new();
    let loaded = formats::read_stc(text, &mut builder)?;
    assert_eq!(loaded, 1);

    let db = builder.seal();
    let star = db.find_star(70890).ok_or("star not found")?;
    assert_eq!(star.position()[0], 1.0);
    assert_eq!(star.abs_magnitude(), 15.5);
    assert_eq!(db.find_number_by_name("Proxima Centauri", false), Some(70890));
    Ok(())
}

#[test]
fn read_stc_resolves_ra_dec_distance() -> Result<(), Box<dyn Error>> {
    let text = r#"
        71681 "Alpha Centauri B"
        {
            SpectralType "K1V"
            RA 14.660
            Dec -60.8
            Distance 4.36
            AppMag 1.35
        }
    "#;
    let mut builder = DatabaseBuilder::new();
    formats::read_stc(text, &mut builder)?;
    let db = builder.seal();
    let star = db.find_star(71681).ok_or("star not found")?;
    let pos = star.position();
    let distance = (pos[0] * pos[0] + pos[1] * pos[1] + pos[2] * pos[2]).sqrt();
    assert!((distance - 4.36).abs() < 1.0e-3);
    Ok(())
}

#[test]
fn read_stc_replace_then_modify_a_star() -> Result<(), Box<dyn Error>> {
    let first = r#"Add 1000 "Test Star" { SpectralType "G2V" Position [ 1.0 0.0 0.0 ] AbsMag 5.0 }"#;
    let replace = r#"Replace 1000 { SpectralType "K0III" Position [ 2.0 0.0 0.0 ] AbsMag 6.0 }"#;
    let modify = r#"Modify 1000 { Radius 1.5 }"#;

    let mut builder = DatabaseBuilder::new();
    formats::read_stc(first, &mut builder)?;
    formats::read_stc(replace, &mut builder)?;
    formats::read_stc(modify, &mut builder)?;

    let db = builder.seal();
    let star = db.find_star(1000).ok_or("star not found")?;
    // Replace overwrote the position entirely
    assert_eq!(star.position()[0], 2.0);
    assert_eq!(star.abs_magnitude(), 6.0);
    // Modify only touched radius, leaving the rest as Replace left it
    assert_eq!(star.details().radius, Some(1.5));
    Ok(())
}

#[test]
fn read_stc_modify_of_unknown_star_is_an_error() {
    let text = r#"Modify 99999999 { Radius 1.0 }"#;
    let mut builder = DatabaseBuilder::new();
    assert!(formats::read_stc(text, &mut builder).is_err());
}

#[test]
fn read_stc_barycenter_without_number_or_name_is_rejected() {
    let text = r#"Barycenter { Position [ 0.0 0.0 0.0 ] }"#;
    let mut builder = DatabaseBuilder::new();
    assert!(formats::read_stc(text, &mut builder).is_err());
}

#[test]
fn read_stc_barycenter_is_invisible_and_orbit_links_resolve() -> Result<(), Box<dyn Error>> {
    let text = r#"
        Barycenter 500 "Alpha Centauri" { Position [ 0.0 0.0 0.0 ] }
        Add 501 "Alpha Centauri A"
        {
            SpectralType "G2V"
            Position [ 0.1 0.0 0.0 ]
            AbsMag 4.3
            OrbitBarycenter 500
        }
    "#;
    let mut builder = DatabaseBuilder::new();
    formats::read_stc(text, &mut builder)?;
    let db = builder.seal();

    assert!(!db.find_star(500).ok_or("barycenter not found")?.details().visible);
    let orbiter = db.find_star(501).ok_or("star not found")?;
    assert!(orbiter.has_orbit());
    // the orbiting star is repositioned onto its barycenter
    assert_eq!(orbiter.position()[0], 0.0);
    Ok(())
}

#[test]
fn read_dsc_loads_a_galaxy_record() -> Result<(), Box<dyn Error>> {
    let text = r#"
        Galaxy 3031 "M81:NGC 3031"
        {
            Position [ 10.0 0.0 0.0 ]
            Radius 50000.0
            AbsMag -20.0
        }
    "#;
    let mut builder = DatabaseBuilder::new();
    let loaded = formats::read_dsc(text, &mut builder)?;
    assert_eq!(loaded, 1);

    let db = builder.seal();
    let dso = db.find_dso(3031).ok_or("dso not found")?;
    assert_eq!(dso.object_type(), astro_catalog::DeepSkyObjectType::Galaxy);
    assert_eq!(dso.radius(), 50000.0);
    assert_eq!(db.find_number_by_name("M81", false), Some(3031));
    Ok(())
}

#[test]
fn read_dsc_requires_a_name() {
    let text = r#"Nebula 1 { Position [ 0.0 0.0 0.0 ] }"#;
    let mut builder = DatabaseBuilder::new();
    assert!(formats::read_dsc(text, &mut builder).is_err());
}
