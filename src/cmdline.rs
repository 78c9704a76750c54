//a Imports
use clap::{parser::ValuesRef, value_parser, Arg, ArgAction, ArgMatches, Command};

//a Catalog and names
//fp add_catalog_arg
pub fn add_catalog_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("catalog")
            .long("catalog")
            .short('c')
            .required(true)
            .help("Binary CELSTARS file to load")
            .action(ArgAction::Set),
    )
}
pub fn catalog(matches: &ArgMatches) -> String {
    matches.get_one::<String>("catalog").unwrap().to_string()
}

//fp add_names_arg
pub fn add_names_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("names")
            .long("names")
            .short('n')
            .help("Text name file to load")
            .action(ArgAction::Set),
    )
}
pub fn names(matches: &ArgMatches) -> Option<String> {
    matches.get_one::<String>("names").map(|s| s.to_string())
}

//a Query parameters
//fp add_magnitude_arg
pub fn add_magnitude_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("magnitude")
            .long("magnitude")
            .short('m')
            .help("Faintest magnitude to report")
            .value_parser(value_parser!(f32))
            .action(ArgAction::Set),
    )
}
pub fn magnitude(matches: &ArgMatches) -> f32 {
    *matches.get_one::<f32>("magnitude").unwrap_or(&6.0)
}

//fp add_radius_arg
pub fn add_radius_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("radius")
            .long("radius")
            .short('r')
            .help("Search radius in light years")
            .value_parser(value_parser!(f64))
            .action(ArgAction::Set),
    )
}
pub fn radius(matches: &ArgMatches) -> f64 {
    *matches.get_one::<f64>("radius").unwrap_or(&10.0)
}

//fp add_observer_arg
pub fn add_observer_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("observer")
            .long("observer")
            .short('o')
            .help("Observer position as 'x,y,z' in light years")
            .action(ArgAction::Set),
    )
}
pub fn observer(matches: &ArgMatches) -> [f64; 3] {
    let Some(s) = matches.get_one::<String>("observer") else {
        return [0.0; 3];
    };
    let mut parts = s.split(',').map(|p| p.trim().parse::<f64>().unwrap_or(0.0));
    [
        parts.next().unwrap_or(0.0),
        parts.next().unwrap_or(0.0),
        parts.next().unwrap_or(0.0),
    ]
}

//fp add_fov_arg
pub fn add_fov_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("fov")
            .long("fov")
            .short('f')
            .help("Field of view in degrees, for the 'visible' command's frustum")
            .value_parser(value_parser!(f64))
            .action(ArgAction::Set),
    )
}
pub fn fov(matches: &ArgMatches) -> f64 {
    matches
        .get_one::<f64>("fov")
        .map(|x| *x * std::f64::consts::PI / 180.0)
        .unwrap_or(60.0 * std::f64::consts::PI / 180.0)
}

//a Identifiers
//fp add_ids_arg
pub fn add_ids_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("ids")
            .help("Catalog numbers or names to look up")
            .action(ArgAction::Append),
    )
}
pub fn ids(matches: &ArgMatches) -> Option<ValuesRef<'_, String>> {
    matches.get_many::<String>("ids")
}
