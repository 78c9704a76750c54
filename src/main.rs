//a Imports
use std::path::PathBuf;

use anyhow::anyhow;
use astro_catalog::{formats, CatalogNumber, Database, DatabaseBuilder, Frustum, Plane};
use clap::{ArgMatches, Command};

mod cmdline;

//a main
fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let cmd = Command::new("astro_catalog")
        .about("Inspect a magnitude-aware star and deep-sky-object catalog")
        .version(env!("CARGO_PKG_VERSION"));

    let cmd = cmdline::add_catalog_arg(cmd);
    let cmd = cmdline::add_names_arg(cmd);

    let list_subcmd = Command::new("list").about("Summarize the loaded catalog");
    let find_subcmd = Command::new("find").about("Find objects by catalog number or name");
    let find_subcmd = cmdline::add_ids_arg(find_subcmd);
    let visible_subcmd = Command::new("visible").about("List objects visible from an observer");
    let visible_subcmd = cmdline::add_observer_arg(visible_subcmd);
    let visible_subcmd = cmdline::add_fov_arg(visible_subcmd);
    let visible_subcmd = cmdline::add_magnitude_arg(visible_subcmd);
    let close_subcmd = Command::new("close").about("List objects within a radius of an observer");
    let close_subcmd = cmdline::add_observer_arg(close_subcmd);
    let close_subcmd = cmdline::add_radius_arg(close_subcmd);

    let cmd = cmd
        .subcommand(list_subcmd)
        .subcommand(find_subcmd)
        .subcommand(visible_subcmd)
        .subcommand(close_subcmd);

    let matches = cmd.get_matches();

    let catalog_filename: PathBuf = cmdline::catalog(&matches).into();
    let mut builder = DatabaseBuilder::new();
    let f = std::fs::File::open(&catalog_filename)?;
    let loaded = formats::read_celstars(f, &mut builder)?;
    log::info!("loaded {loaded} stars from {}", catalog_filename.display());

    if let Some(names_filename) = cmdline::names(&matches) {
        let text = std::fs::read_to_string(names_filename)?;
        let loaded = formats::read_names(&text, &mut builder);
        log::info!("loaded {loaded} names");
    }

    let db = builder.seal();

    match matches.subcommand() {
        Some(("list", sub_matches)) => list(&db, sub_matches),
        Some(("find", sub_matches)) => find(&db, sub_matches),
        Some(("visible", sub_matches)) => visible(&db, sub_matches),
        Some(("close", sub_matches)) => close(&db, sub_matches),
        _ => {
            println!(
                "Catalog has {} stars and {} deep-sky objects",
                db.star_count(),
                db.dso_count()
            );
            Ok(())
        }
    }
}

//fi list
fn list(db: &Database, _matches: &ArgMatches) -> Result<(), anyhow::Error> {
    println!("{} stars, {} deep-sky objects", db.star_count(), db.dso_count());
    Ok(())
}

//fi resolve_id
/// Resolve a command-line token to a catalog number: try it as a
/// catalog-prefixed name first (`"HIP 11767"`), then as a registered
/// star/DSO name
fn resolve_id(db: &Database, token: &str) -> Option<CatalogNumber> {
    astro_catalog::parse_name(token)
        .ok()
        .or_else(|| db.find_number_by_name(token, false))
}

//fi find
fn find(db: &Database, matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let Some(ids) = cmdline::ids(matches) else {
        return Ok(());
    };
    for token in ids {
        let Some(number) = resolve_id(db, token) else {
            eprintln!("could not resolve {token:?}");
            continue;
        };
        if let Some(star) = db.find_star(number) {
            let pos = star.position();
            println!(
                "{number:8} star  pos=({:.2},{:.2},{:.2}) mag={:.2} name={}",
                pos[0],
                pos[1],
                pos[2],
                star.abs_magnitude(),
                db.name_of(number)
            );
        } else if let Some(dso) = db.find_dso(number) {
            let pos = dso.position();
            println!(
                "{number:8} dso   pos=({:.2},{:.2},{:.2}) type={:?} name={}",
                pos[0],
                pos[1],
                pos[2],
                dso.object_type(),
                db.name_of(number)
            );
        } else {
            eprintln!("no object with catalog number {number}");
        }
    }
    Ok(())
}

//fi build_frustum
/// A symmetric frustum looking down +z from `observer`, with no roll;
/// good enough for command-line inspection, not for real rendering
fn build_frustum(observer: [f64; 3], half_fov: f64) -> Frustum {
    let (s, c) = half_fov.sin_cos();
    let local = [
        [c, 0.0, s],
        [-c, 0.0, s],
        [0.0, c, s],
        [0.0, -c, s],
        [0.0, 0.0, 1.0],
    ];
    let planes = local.map(|normal| {
        let d = -(normal[0] * observer[0] + normal[1] * observer[1] + normal[2] * observer[2]);
        Plane { normal, d }
    });
    Frustum { planes }
}

//fi visible
fn visible(db: &Database, matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let observer = cmdline::observer(matches);
    let faintest = cmdline::magnitude(matches);
    let frustum = build_frustum(observer, cmdline::fov(matches) / 2.0);

    let stars = db.find_visible_stars(observer, &frustum, faintest);
    let dsos = db.find_visible_dsos(observer, &frustum, faintest);
    println!("{} stars, {} dsos visible", stars.len(), dsos.len());
    for number in stars.iter().chain(dsos.iter()) {
        println!("{number:8} {}", db.name_of(*number));
    }
    Ok(())
}

//fi close
fn close(db: &Database, matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let observer = cmdline::observer(matches);
    let radius = cmdline::radius(matches);
    if radius <= 0.0 {
        return Err(anyhow!("radius must be positive"));
    }

    let stars = db.find_close_stars(observer, radius);
    let dsos = db.find_close_dsos(observer, radius);
    println!("{} stars, {} dsos within {radius} ly", stars.len(), dsos.len());
    for number in stars.iter().chain(dsos.iter()) {
        println!("{number:8} {}", db.name_of(*number));
    }
    Ok(())
}
