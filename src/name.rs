//a Imports
use std::collections::HashMap;

use crate::CatalogNumber;

//a Greek letter normalization
//tp GREEK_ABBREVIATIONS
/// IAU three/four-letter Greek-letter abbreviations (as used in Bayer
/// designations, e.g. "alf CMa") mapped to the full lower-case Greek
/// letter name, so that "alf", "alpha" and "Alpha" all normalize the
/// same way
const GREEK_ABBREVIATIONS: &[(&str, &str)] = &[
    ("alf", "alpha"),
    ("bet", "beta"),
    ("gam", "gamma"),
    ("del", "delta"),
    ("eps", "epsilon"),
    ("zet", "zeta"),
    ("eta", "eta"),
    ("the", "theta"),
    ("tet", "theta"),
    ("iot", "iota"),
    ("kap", "kappa"),
    ("lam", "lambda"),
    ("mu", "mu"),
    ("nu", "nu"),
    ("xi", "xi"),
    ("omi", "omicron"),
    ("pi", "pi"),
    ("rho", "rho"),
    ("sig", "sigma"),
    ("tau", "tau"),
    ("ups", "upsilon"),
    ("phi", "phi"),
    ("chi", "chi"),
    ("psi", "psi"),
    ("ome", "omega"),
];

//a Constellation abbreviation normalization
//tp CONSTELLATION_ABBREVIATIONS
/// IAU three-letter constellation abbreviations mapped to the Latin
/// genitive form used in a Bayer designation's second word, e.g. "Cen"
/// in "Alf Cen" denotes "Centauri" in "Alpha Centauri"
const CONSTELLATION_ABBREVIATIONS: &[(&str, &str)] = &[
    ("and", "andromedae"),
    ("ant", "antliae"),
    ("aps", "apodis"),
    ("aqr", "aquarii"),
    ("aql", "aquilae"),
    ("ara", "arae"),
    ("ari", "arietis"),
    ("aur", "aurigae"),
    ("boo", "bootis"),
    ("cae", "caeli"),
    ("cam", "camelopardalis"),
    ("cnc", "cancri"),
    ("cvn", "canum venaticorum"),
    ("cma", "canis majoris"),
    ("cmi", "canis minoris"),
    ("cap", "capricorni"),
    ("car", "carinae"),
    ("cas", "cassiopeiae"),
    ("cen", "centauri"),
    ("cep", "cephei"),
    ("cet", "ceti"),
    ("cha", "chamaeleontis"),
    ("cir", "circini"),
    ("col", "columbae"),
    ("com", "comae berenices"),
    ("cra", "coronae australis"),
    ("crb", "coronae borealis"),
    ("crv", "corvi"),
    ("crt", "crateris"),
    ("cru", "crucis"),
    ("cyg", "cygni"),
    ("del", "delphini"),
    ("dor", "doradus"),
    ("dra", "draconis"),
    ("equ", "equulei"),
    ("eri", "eridani"),
    ("for", "fornacis"),
    ("gem", "geminorum"),
    ("gru", "gruis"),
    ("her", "herculis"),
    ("hor", "horologii"),
    ("hya", "hydrae"),
    ("hyi", "hydri"),
    ("ind", "indi"),
    ("lac", "lacertae"),
    ("leo", "leonis"),
    ("lmi", "leonis minoris"),
    ("lep", "leporis"),
    ("lib", "librae"),
    ("lup", "lupi"),
    ("lyn", "lyncis"),
    ("lyr", "lyrae"),
    ("men", "mensae"),
    ("mic", "microscopii"),
    ("mon", "monocerotis"),
    ("mus", "muscae"),
    ("nor", "normae"),
    ("oct", "octantis"),
    ("oph", "ophiuchi"),
    ("ori", "orionis"),
    ("pav", "pavonis"),
    ("peg", "pegasi"),
    ("per", "persei"),
    ("phe", "phoenicis"),
    ("pic", "pictoris"),
    ("psc", "piscium"),
    ("psa", "piscis austrini"),
    ("pup", "puppis"),
    ("pyx", "pyxidis"),
    ("ret", "reticuli"),
    ("sge", "sagittae"),
    ("sgr", "sagittarii"),
    ("sco", "scorpii"),
    ("scl", "sculptoris"),
    ("sct", "scuti"),
    ("ser", "serpentis"),
    ("sex", "sextantis"),
    ("tau", "tauri"),
    ("tel", "telescopii"),
    ("tri", "trianguli"),
    ("tra", "trianguli australis"),
    ("tuc", "tucanae"),
    ("uma", "ursae majoris"),
    ("umi", "ursae minoris"),
    ("vel", "velorum"),
    ("vir", "virginis"),
    ("vol", "volantis"),
    ("vul", "vulpeculae"),
];

//fp normalize_key
/// Produce the lookup key for a name: lower-cased, with a leading
/// Greek-letter abbreviation expanded to its full name, and a
/// constellation abbreviation in the following word expanded to its
/// genitive form, so that "alf CMa", "Alf CMa" and "Alpha Canis
/// Majoris" all resolve to the same star
pub fn normalize_key(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    let mut words = lower.split(' ');
    let Some(first) = words.next() else {
        return lower;
    };
    let first = replace_greek_word(first);

    let Some(second) = words.next() else {
        return first;
    };
    let second = replace_constellation_word(second);

    let rest: Vec<&str> = words.collect();
    if rest.is_empty() {
        format!("{first} {second}")
    } else {
        format!("{first} {second} {}", rest.join(" "))
    }
}

//fi replace_greek_word
fn replace_greek_word(word: &str) -> String {
    for (abbr, full) in GREEK_ABBREVIATIONS {
        if word == *abbr {
            return (*full).to_string();
        }
    }
    word.to_string()
}

//fi replace_constellation_word
fn replace_constellation_word(word: &str) -> String {
    for (abbr, full) in CONSTELLATION_ABBREVIATIONS {
        if word == *abbr {
            return (*full).to_string();
        }
    }
    word.to_string()
}

//a NameDatabase
//tp NameDatabase
/// A bidirectional directory between names and catalog numbers
///
/// Several names may map to a single catalog number (stored in
/// insertion order); a name maps to exactly one catalog number, with
/// the most recently added entry winning on collision. A secondary
/// localized table is checked only when a lookup explicitly asks for
/// it
#[derive(Debug, Default, Clone)]
pub struct NameDatabase {
    name_to_number: HashMap<String, CatalogNumber>,
    localized_to_number: HashMap<String, CatalogNumber>,
    number_to_names: HashMap<CatalogNumber, Vec<String>>,
}

//ip NameDatabase
impl NameDatabase {
    //cp new
    /// Create an empty name directory
    pub fn new() -> Self {
        Self::default()
    }

    //mp add
    /// Register a name for a catalog number
    ///
    /// If `name` is already registered to a different number, the new
    /// mapping wins in the name-to-number direction; this is logged
    /// since it usually indicates a data error
    pub fn add(&mut self, number: CatalogNumber, name: &str) {
        let key = normalize_key(name);
        if let Some(existing) = self.name_to_number.get(&key) {
            if *existing != number {
                log::warn!(
                    "name {name:?} reassigned from catalog number {existing} to {number}"
                );
            }
        }
        self.name_to_number.insert(key, number);
        self.number_to_names
            .entry(number)
            .or_default()
            .push(name.to_string());
    }

    //mp add_localized
    /// Register a localized (translated) variant of a name; localized
    /// names are only consulted when a lookup passes `i18n = true`
    pub fn add_localized(&mut self, number: CatalogNumber, name: &str) {
        self.localized_to_number
            .insert(normalize_key(name), number);
    }

    //mp erase
    /// Remove every name registered for a catalog number
    pub fn erase(&mut self, number: CatalogNumber) {
        if let Some(names) = self.number_to_names.remove(&number) {
            for name in names {
                let key = normalize_key(&name);
                if self.name_to_number.get(&key) == Some(&number) {
                    self.name_to_number.remove(&key);
                }
            }
        }
    }

    //mp find_number_by_name
    /// Find the catalog number for a name, optionally also checking the
    /// localized table; the canonical table is always tried first
    pub fn find_number_by_name(&self, name: &str, i18n: bool) -> Option<CatalogNumber> {
        let key = normalize_key(name);
        if let Some(n) = self.name_to_number.get(&key) {
            return Some(*n);
        }
        if i18n {
            if let Some(n) = self.localized_to_number.get(&key) {
                return Some(*n);
            }
        }
        None
    }

    //mp first_name_of
    /// Get the first (earliest-added) name registered for a catalog number
    pub fn first_name_of(&self, number: CatalogNumber) -> Option<&str> {
        self.number_to_names
            .get(&number)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    //mp names_of
    /// Iterate over every name registered for a catalog number, in the
    /// order they were added
    pub fn names_of(&self, number: CatalogNumber) -> impl Iterator<Item = &str> {
        self.number_to_names
            .get(&number)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    //mp completion
    /// List every distinct name (canonical, and localized if
    /// requested) whose normalized form starts with `prefix`
    pub fn completion(&self, prefix: &str, i18n: bool) -> Vec<String> {
        let prefix = normalize_key(prefix);
        let mut result: Vec<String> = self
            .number_to_names
            .values()
            .flatten()
            .filter(|n| normalize_key(n).starts_with(&prefix))
            .cloned()
            .collect();
        if i18n {
            for key in self.localized_to_number.keys() {
                if key.starts_with(&prefix) && !result.iter().any(|r| normalize_key(r) == *key) {
                    result.push(key.clone());
                }
            }
        }
        result.sort();
        result.dedup();
        result
    }

    //mp is_empty
    pub fn is_empty(&self) -> bool {
        self.number_to_names.is_empty()
    }

    //mp len
    pub fn len(&self) -> usize {
        self.number_to_names.len()
    }
}

//a Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let mut nd = NameDatabase::new();
        nd.add(32349, "Sirius");
        assert_eq!(nd.find_number_by_name("sirius", false), Some(32349));
        assert_eq!(nd.first_name_of(32349), Some("Sirius"));
    }

    #[test]
    fn greek_abbreviation_resolves_same_star() {
        let mut nd = NameDatabase::new();
        nd.add(30438, "Alpha Car");
        assert_eq!(nd.find_number_by_name("alf Car", false), Some(30438));
        assert_eq!(nd.find_number_by_name("ALF CAR", false), Some(30438));
    }

    #[test]
    fn constellation_abbreviation_resolves_same_star() {
        let mut nd = NameDatabase::new();
        nd.add(71683, "Alpha Centauri A");
        assert_eq!(nd.find_number_by_name("Alf Cen A", false), Some(71683));
    }

    #[test]
    fn insertion_order_preserved() {
        let mut nd = NameDatabase::new();
        nd.add(1, "First");
        nd.add(1, "Second");
        assert_eq!(nd.names_of(1).collect::<Vec<_>>(), vec!["First", "Second"]);
    }

    #[test]
    fn localized_only_checked_when_requested() {
        let mut nd = NameDatabase::new();
        nd.add_localized(1, "Etoile Polaire");
        assert_eq!(nd.find_number_by_name("Etoile Polaire", false), None);
        assert_eq!(
            nd.find_number_by_name("Etoile Polaire", true),
            Some(1)
        );
    }

    #[test]
    fn erase_removes_all_names() {
        let mut nd = NameDatabase::new();
        nd.add(1, "Foo");
        nd.add(1, "Bar");
        nd.erase(1);
        assert_eq!(nd.find_number_by_name("Foo", false), None);
        assert_eq!(nd.find_number_by_name("Bar", false), None);
    }

    #[test]
    fn completion_is_prefix_based() {
        let mut nd = NameDatabase::new();
        nd.add(1, "Alpha Centauri");
        nd.add(2, "Alpha Orionis");
        nd.add(3, "Beta Orionis");
        let mut names = nd.completion("Alpha", false);
        names.sort();
        assert_eq!(names, vec!["Alpha Centauri", "Alpha Orionis"]);
    }
}
