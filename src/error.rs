//a Imports
use thiserror::Error as ThisError;

//a Error
//tp Error
/// Errors that can arise while parsing catalog data or building a
/// sealed database
///
/// Query-time operations on a sealed database never return an error;
/// anything that can go wrong there (a missing name, an out-of-range
/// number) is represented with `Option` instead
#[derive(Debug, ThisError)]
pub enum Error {
    /// A binary file did not begin with the expected magic string
    #[error("invalid header: expected {expected:?}, found {found:?}")]
    InvalidHeader {
        expected: &'static str,
        found: String,
    },

    /// A binary file's declared version is not one this reader understands
    #[error("unsupported version {0:#06x}")]
    UnsupportedVersion(u16),

    /// The file ended before the declared record count was reached
    #[error("truncated file: expected {expected} records, found {found}")]
    TruncatedFile { expected: usize, found: usize },

    /// A text-format record could not be parsed
    #[error("malformed record at line {line}, column {column}: {message}")]
    MalformedRecord {
        line: usize,
        column: usize,
        message: String,
    },

    /// A spectral-type string did not match any known encoding
    #[error("unknown spectral type: {0:?}")]
    UnknownSpectralType(String),

    /// A catalog number appeared twice where uniqueness is required
    #[error("duplicate catalog number: {0}")]
    DuplicateCatalogNumber(u32),

    /// A cross-index insertion range overlapped an existing one without
    /// requesting an overwrite
    #[error("overlapping cross-index range starting at {0}")]
    OverlappingRange(u32),

    /// An orbit barycenter (or other catalog-number reference) could not
    /// be resolved during sealing
    #[error("unresolved reference to catalog number {0}")]
    UnresolvedReference(u32),

    /// A fixed-capacity table (e.g. the auto-index watermark) has no room left
    #[error("exceeded capacity: {0}")]
    ExceededCapacity(&'static str),

    /// A catalog-number name string did not parse (bad prefix, bad
    /// digits, or out-of-range component)
    #[error("invalid catalog name: {0:?}")]
    InvalidName(String),

    /// Propagated I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
