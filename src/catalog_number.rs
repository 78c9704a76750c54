//a Imports
use crate::Error;

//a Constants
//tp CatalogNumber
/// The identifier type used to refer to any star or deep-sky object
/// throughout the database
///
/// Numbers in `[0, HIP_MAX]` are reserved for the Hipparcos catalog;
/// numbers above that (up to [AUTO_INDEX_MIN]) encode a Tycho
/// `(a, b, c)` triple; numbers from [AUTO_INDEX_MIN] up to
/// [AUTO_INDEX_MAX] are allocated at load time to objects that arrive
/// without a catalog number of their own
pub type CatalogNumber = u32;

/// Sentinel meaning "no catalog number" / "not found"
pub const INVALID_CATALOG_NUMBER: CatalogNumber = u32::MAX;

/// Highest catalog number ever handed out automatically (descending
/// watermark)
pub const AUTO_INDEX_MAX: CatalogNumber = u32::MAX - 1;

/// Lowest catalog number considered part of the auto-allocated range
pub const AUTO_INDEX_MIN: CatalogNumber = u32::MAX / 2;

/// Highest Hipparcos number; everything at or below this is a plain HIP number
pub const HIP_MAX: u32 = 999_999;

const TYC_A_MAX: u32 = 9_999;
const TYC_B_MAX: u32 = 99_999;
const TYC_B_MULT: u32 = 10_000;
const TYC_C_MULT: u32 = 1_000_000_000;

//a CatalogKind
//tp CatalogKind
/// The external catalogs this codec knows how to parse and format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    /// Hipparcos, plain number in `[0, HIP_MAX]`
    Hip,
    /// Tycho, `a-b-c` triple encoded into the high range
    Tyc,
    /// Henry Draper, a plain unencoded number with no range check
    /// beyond `u32`
    Hd,
}

//a Free functions
//fp encode_tyc
/// Encode a Tycho `(a, b, c)` triple into a single catalog number
///
/// `a` identifies the region, `b` the star within the region, `c` the
/// (rare) component letter
pub fn encode_tyc(a: u32, b: u32, c: u32) -> Result<CatalogNumber, Error> {
    if a > TYC_A_MAX || b > TYC_B_MAX {
        return Err(Error::InvalidName(format!("TYC {a}-{b}-{c}")));
    }
    Ok(c * TYC_C_MULT + b * TYC_B_MULT + a)
}

//fp decode_tyc
/// Decode a catalog number previously produced by [encode_tyc]
pub fn decode_tyc(n: CatalogNumber) -> (u32, u32, u32) {
    let a = n % TYC_B_MULT;
    let b = (n / TYC_B_MULT) % (TYC_B_MAX + 1);
    let c = n / TYC_C_MULT;
    (a, b, c)
}

//fp is_hip
/// True if `n` falls in the plain Hipparcos range
pub fn is_hip(n: CatalogNumber) -> bool {
    n <= HIP_MAX
}

//fp is_auto_allocated
/// True if `n` falls in the runtime-allocated range
pub fn is_auto_allocated(n: CatalogNumber) -> bool {
    n >= AUTO_INDEX_MIN && n <= AUTO_INDEX_MAX
}

//fp parse_name
/// Parse a prefix-qualified catalog name such as `"HIP 11767"`,
/// `"TYC 1-2-3"`, or `"HD 48915"` into a [CatalogNumber]
///
/// The prefix is matched case-insensitively; any amount of whitespace
/// (including none) may separate the prefix from the number. Any other
/// form, trailing garbage, or an out-of-range component is an error
pub fn parse_name(s: &str) -> Result<CatalogNumber, Error> {
    let s = s.trim();
    let err = || Error::InvalidName(s.to_string());

    let (prefix, rest) = split_prefix(s);
    let rest = rest.trim_start();
    match prefix.to_ascii_uppercase().as_str() {
        "HIP" => {
            let n: u32 = rest.parse().map_err(|_| err())?;
            if n > HIP_MAX {
                return Err(err());
            }
            Ok(n)
        }
        "HD" => rest.parse().map_err(|_| err()),
        "TYC" => {
            let mut parts = rest.split('-');
            let a: u32 = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
            let b: u32 = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
            let c: u32 = match parts.next() {
                Some(c) => c.parse().map_err(|_| err())?,
                None => 0,
            };
            if parts.next().is_some() {
                return Err(err());
            }
            encode_tyc(a, b, c)
        }
        "" => {
            // bare number is accepted as a Hipparcos number
            let n: u32 = rest.parse().map_err(|_| err())?;
            if n > HIP_MAX {
                return Err(err());
            }
            Ok(n)
        }
        _ => Err(err()),
    }
}

//fi split_prefix
/// Split a leading run of alphabetic characters from the rest of the string
fn split_prefix(s: &str) -> (&str, &str) {
    let split = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphabetic())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s.split_at(split)
}

//fp infer_catalog_kind
/// Guess which catalog a bare number belongs to, for formatting a
/// fallback display name when no name is registered
///
/// A number in the Hipparcos range is `Hip`; a number in the
/// runtime-allocated range has no real external catalog identity, and
/// is formatted as `Hip` purely so callers get a readable placeholder;
/// everything else is assumed to be Tycho-encoded, since that range
/// covers the remainder of the catalog-number space this crate uses
pub fn infer_catalog_kind(n: CatalogNumber) -> CatalogKind {
    if is_hip(n) || is_auto_allocated(n) {
        CatalogKind::Hip
    } else {
        CatalogKind::Tyc
    }
}

//fp format_name
/// Format a catalog number under a given catalog's naming convention
pub fn format_name(n: CatalogNumber, kind: CatalogKind) -> String {
    match kind {
        CatalogKind::Hip => format!("HIP {n}"),
        CatalogKind::Hd => format!("HD {n}"),
        CatalogKind::Tyc => {
            let (a, b, c) = decode_tyc(n);
            if c == 0 {
                format!("TYC {a}-{b}")
            } else {
                format!("TYC {a}-{b}-{c}")
            }
        }
    }
}

//a Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hip_round_trip() {
        let n = parse_name("HIP 11767").unwrap();
        assert_eq!(n, 11767);
        assert_eq!(format_name(n, CatalogKind::Hip), "HIP 11767");
    }

    #[test]
    fn hip_case_and_whitespace_insensitive() {
        assert_eq!(parse_name("hip11767").unwrap(), 11767);
        assert_eq!(parse_name("  Hip   11767 ").unwrap(), 11767);
    }

    #[test]
    fn hip_out_of_range_rejected() {
        assert!(parse_name("HIP 1000000").is_err());
    }

    #[test]
    fn tyc_round_trip() {
        let n = parse_name("TYC 1-2-3").unwrap();
        let (a, b, c) = decode_tyc(n);
        assert_eq!((a, b, c), (1, 2, 3));
        assert_eq!(format_name(n, CatalogKind::Tyc), "TYC 1-2-3");
    }

    #[test]
    fn tyc_without_component_defaults_to_zero() {
        let n = parse_name("TYC 1-2").unwrap();
        assert_eq!(decode_tyc(n), (1, 2, 0));
    }

    #[test]
    fn tyc_out_of_range_component_rejected() {
        assert!(encode_tyc(10_000, 0, 0).is_err());
        assert!(encode_tyc(0, 100_000, 0).is_err());
    }

    #[test]
    fn hd_round_trip() {
        let n = parse_name("HD 48915").unwrap();
        assert_eq!(n, 48915);
        assert_eq!(format_name(n, CatalogKind::Hd), "HD 48915");
    }

    #[test]
    fn infer_catalog_kind_picks_hip_for_hip_range() {
        assert_eq!(infer_catalog_kind(11767), CatalogKind::Hip);
        assert_eq!(infer_catalog_kind(AUTO_INDEX_MAX), CatalogKind::Hip);
    }

    #[test]
    fn infer_catalog_kind_falls_back_to_tyc() {
        assert_eq!(infer_catalog_kind(HIP_MAX + 1), CatalogKind::Tyc);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_name("not a catalog number").is_err());
        assert!(parse_name("HIP 123extra").is_err());
    }
}
