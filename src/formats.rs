//a Imports
//! Readers for the on-disk formats this database loads from:
//! `CELSTARS`/`CELINDEX` binary files, the text `stc` star catalog and
//! `dsc` deep-sky-object catalog formats, and the colon-separated
//! name-list format
//!
//! Grounded on `original_source/src/celengine/stardataloader.cpp`
//! (binary star records, `stc` text grammar), `catalogxref.cpp` (binary
//! cross-index format), `dsodataloader.cpp` (`dsc` text grammar) and
//! `deepskyobj.cpp` (the `Position`/`RA`+`Dec`+`Distance`/`Radius`/
//! `AbsMag` properties shared by both text formats)
use std::collections::HashMap;
use std::io::Read;

use crate::astro;
use crate::builder::DatabaseBuilder;
use crate::dso::{DeepSkyObject, DeepSkyObjectType};
use crate::spectral::{bolometric_correction_of, LuminosityClass, SpectralClass};
use crate::star::Star;
use crate::{CatalogNumber, Error};

//a Binary CELSTARS
const CELSTARS_MAGIC: &str = "CELSTARS";
const CELSTARS_VERSION: u16 = 0x0100;

//fp read_celstars
/// Read a binary `CELSTARS` file into the builder
///
/// Per-record errors are logged and the record is skipped; the overall
/// read succeeds as long as the header is valid, even if every record
/// after it fails
pub fn read_celstars<R: Read>(mut r: R, builder: &mut DatabaseBuilder) -> Result<usize, Error> {
    let mut magic = [0u8; 8];
    r.read_exact(&mut magic)?;
    if magic != CELSTARS_MAGIC.as_bytes() {
        return Err(Error::InvalidHeader {
            expected: CELSTARS_MAGIC,
            found: String::from_utf8_lossy(&magic).into_owned(),
        });
    }

    let version = read_u16(&mut r)?;
    if version != CELSTARS_VERSION {
        return Err(Error::UnsupportedVersion(version));
    }

    let count = read_u32(&mut r)? as usize;
    let mut loaded = 0;
    for record_index in 0..count {
        match read_celstars_record(&mut r, builder) {
            Ok(()) => loaded += 1,
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(Error::TruncatedFile {
                    expected: count,
                    found: record_index,
                });
            }
            Err(e) => log::warn!("skipping malformed CELSTARS record {record_index}: {e}"),
        }
    }
    Ok(loaded)
}

//fi read_celstars_record
fn read_celstars_record<R: Read>(r: &mut R, builder: &mut DatabaseBuilder) -> Result<(), Error> {
    let catalog_number = read_u32(r)?;
    let x = read_f32(r)?;
    let y = read_f32(r)?;
    let z = read_f32(r)?;
    let abs_mag_q8 = read_i16(r)?;
    let spectral_code = read_u16(r)?;

    let abs_magnitude = abs_mag_q8 as f32 / 256.0;
    let (class, subclass, lum) = decode_spectral_code(spectral_code);
    let details = builder.details_registry().get_or_create(class, subclass, lum);
    let star = Star::new(catalog_number, [x, y, z].into(), abs_magnitude, details);
    builder.add_star(star)
}

//a Binary CELINDEX
const CELINDEX_MAGIC: &str = "CELINDEX";
const CELINDEX_VERSION: u16 = 0x0100;

//fp read_celindex
/// Read a binary `CELINDEX` cross-reference file: a magic header,
/// version, then repeated `(external, internal)` catalog-number pairs
pub fn read_celindex<R: Read>(
    mut r: R,
    catalog: &str,
    builder: &mut DatabaseBuilder,
) -> Result<usize, Error> {
    let mut magic = [0u8; 8];
    r.read_exact(&mut magic)?;
    if magic != CELINDEX_MAGIC.as_bytes() {
        return Err(Error::InvalidHeader {
            expected: CELINDEX_MAGIC,
            found: String::from_utf8_lossy(&magic).into_owned(),
        });
    }
    let version = read_u16(&mut r)?;
    if version != CELINDEX_VERSION {
        return Err(Error::UnsupportedVersion(version));
    }

    let mut loaded = 0;
    loop {
        let external = match read_u32(&mut r) {
            Ok(v) => v,
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        };
        let internal = read_u32(&mut r)?;
        if let Err(e) = builder.add_cross_index_range(
            catalog,
            external,
            internal as i32 - external as i32,
            1,
            false,
        ) {
            log::warn!("skipping overlapping CELINDEX entry {external}: {e}");
            continue;
        }
        loaded += 1;
    }
    Ok(loaded)
}

//a Text name file
//fp read_names
/// Read a text name file: one line per catalog number, `number
/// name1:name2:...`
pub fn read_names(text: &str, builder: &mut DatabaseBuilder) -> usize {
    let mut loaded = 0;
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((number_str, names)) = line.split_once(' ') else {
            log::warn!("skipping malformed name-file line {}", line_no + 1);
            continue;
        };
        let Ok(number) = number_str.trim().parse::<u32>() else {
            log::warn!("skipping malformed name-file line {}", line_no + 1);
            continue;
        };
        for name in names.split(':') {
            let name = name.trim();
            if !name.is_empty() {
                builder.add_name(number, name);
                loaded += 1;
            }
        }
    }
    loaded
}

//a Tokenizer
//tp Token
/// A lexical token of the `stc`/`dsc` text grammar
///
/// No `Tokenizer` source file was part of the material this crate was
/// grounded on, so the exact lexical rules here (comment syntax,
/// string escaping, number grammar) are this crate's own choice rather
/// than a reproduction of the original reader (see DESIGN.md); the
/// token set itself — bare identifiers, numbers, quoted strings, and
/// brace/bracket delimiters — follows directly from the grammar used
/// in `stardataloader.cpp` and `dsodataloader.cpp`
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Number(f64),
    Str(String),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
}

//tp Lexer
/// A one-token-of-lookahead lexer over an `stc`/`dsc` source string
struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    lookahead: Option<Token>,
}

//ip Lexer
impl Lexer {
    //cp new
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
            lookahead: None,
        }
    }

    //mi error
    fn error(&self, message: impl Into<String>) -> Error {
        Error::MalformedRecord {
            line: self.line,
            column: 0,
            message: message.into(),
        }
    }

    //mi skip_ws_and_comments
    fn skip_ws_and_comments(&mut self) {
        loop {
            while let Some(&c) = self.chars.get(self.pos) {
                if c == '\n' {
                    self.line += 1;
                    self.pos += 1;
                } else if c.is_whitespace() {
                    self.pos += 1;
                } else {
                    break;
                }
            }
            let rest_starts_comment = matches!(self.chars.get(self.pos), Some('#'))
                || (self.chars.get(self.pos) == Some(&'/') && self.chars.get(self.pos + 1) == Some(&'/'));
            if !rest_starts_comment {
                return;
            }
            while let Some(&c) = self.chars.get(self.pos) {
                self.pos += 1;
                if c == '\n' {
                    self.line += 1;
                    break;
                }
            }
        }
    }

    //mi scan_string
    fn scan_string(&mut self) -> Result<Token, Error> {
        self.pos += 1; // opening quote
        let mut s = String::new();
        loop {
            match self.chars.get(self.pos) {
                None => return Err(self.error("unterminated string")),
                Some('"') => {
                    self.pos += 1;
                    return Ok(Token::Str(s));
                }
                Some('\\') if self.chars.get(self.pos + 1) == Some(&'"') => {
                    s.push('"');
                    self.pos += 2;
                }
                Some(&c) => {
                    s.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    //mi scan_number
    fn scan_number(&mut self) -> Result<Token, Error> {
        let start = self.pos;
        if matches!(self.chars.get(self.pos), Some('+') | Some('-')) {
            self.pos += 1;
        }
        while matches!(self.chars.get(self.pos), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.chars.get(self.pos) == Some(&'.') {
            self.pos += 1;
            while matches!(self.chars.get(self.pos), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        if matches!(self.chars.get(self.pos), Some('e') | Some('E')) {
            self.pos += 1;
            if matches!(self.chars.get(self.pos), Some('+') | Some('-')) {
                self.pos += 1;
            }
            while matches!(self.chars.get(self.pos), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| self.error(format!("invalid number {text:?}")))
    }

    //mi scan_ident
    fn scan_ident(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.chars.get(self.pos), Some(c) if c.is_alphanumeric() || *c == '_') {
            self.pos += 1;
        }
        Token::Ident(self.chars[start..self.pos].iter().collect())
    }

    //mi scan_token
    fn scan_token(&mut self) -> Result<Option<Token>, Error> {
        self.skip_ws_and_comments();
        let Some(&c) = self.chars.get(self.pos) else {
            return Ok(None);
        };
        let token = match c {
            '{' => {
                self.pos += 1;
                Token::LBrace
            }
            '}' => {
                self.pos += 1;
                Token::RBrace
            }
            '[' => {
                self.pos += 1;
                Token::LBracket
            }
            ']' => {
                self.pos += 1;
                Token::RBracket
            }
            '"' => self.scan_string()?,
            c if c.is_ascii_digit() || ((c == '-' || c == '+') && self.starts_number_here()) => {
                self.scan_number()?
            }
            c if c.is_alphabetic() || c == '_' => self.scan_ident(),
            other => return Err(self.error(format!("unexpected character {other:?}"))),
        };
        Ok(Some(token))
    }

    //mi starts_number_here
    fn starts_number_here(&self) -> bool {
        matches!(self.chars.get(self.pos + 1), Some(c) if c.is_ascii_digit() || *c == '.')
    }

    //mp peek
    fn peek(&mut self) -> Result<Option<&Token>, Error> {
        if self.lookahead.is_none() {
            self.lookahead = self.scan_token()?;
        }
        Ok(self.lookahead.as_ref())
    }

    //mp next
    fn next(&mut self) -> Result<Option<Token>, Error> {
        if self.lookahead.is_none() {
            self.lookahead = self.scan_token()?;
        }
        Ok(self.lookahead.take())
    }
}

//a Property values
//tp Value
/// A parsed property-block value
#[derive(Debug, Clone)]
enum Value {
    Number(f64),
    Str(String),
    Array(Vec<f64>),
    /// A nested `{ ... }` block (e.g. `Orbit`, `RotationModel`): not
    /// modeled beyond brace-balanced skipping, since this crate only
    /// tracks orbit-barycenter membership, not full orbital mechanics
    Nested,
}

//fi number_field
fn number_field(properties: &HashMap<String, Value>, key: &str) -> Option<f64> {
    match properties.get(key) {
        Some(Value::Number(n)) => Some(*n),
        _ => None,
    }
}

//fi skip_balanced_braces
fn skip_balanced_braces(lexer: &mut Lexer) -> Result<(), Error> {
    let mut depth = 1;
    while depth > 0 {
        match lexer.next()? {
            Some(Token::LBrace) => depth += 1,
            Some(Token::RBrace) => depth -= 1,
            Some(_) => {}
            None => return Err(lexer.error("unterminated nested block")),
        }
    }
    Ok(())
}

//fi parse_value
fn parse_value(lexer: &mut Lexer) -> Result<Value, Error> {
    match lexer.next()? {
        Some(Token::Number(n)) => Ok(Value::Number(n)),
        Some(Token::Str(s)) => Ok(Value::Str(s)),
        Some(Token::LBracket) => {
            let mut nums = Vec::new();
            loop {
                match lexer.next()? {
                    Some(Token::Number(n)) => nums.push(n),
                    Some(Token::RBracket) => break,
                    _ => return Err(lexer.error("expected a number or ']' in an array")),
                }
            }
            Ok(Value::Array(nums))
        }
        Some(Token::LBrace) => {
            skip_balanced_braces(lexer)?;
            Ok(Value::Nested)
        }
        _ => Err(lexer.error("expected a property value")),
    }
}

//fi parse_property_block
/// Parse a `{ key value key value ... }` block; the opening `{` has
/// already been consumed
fn parse_property_block(lexer: &mut Lexer) -> Result<HashMap<String, Value>, Error> {
    let mut props = HashMap::new();
    loop {
        match lexer.peek()? {
            Some(Token::RBrace) => {
                lexer.next()?;
                break;
            }
            Some(Token::Ident(_)) => {
                let Some(Token::Ident(key)) = lexer.next()? else {
                    unreachable!()
                };
                let value = parse_value(lexer)?;
                props.insert(key, value);
            }
            None => return Err(lexer.error("unterminated property block")),
            _ => return Err(lexer.error("expected a property name")),
        }
    }
    Ok(props)
}

//fi resolve_position
/// A `Position` array, or a position derived from `RA`+`Dec`+`Distance`
/// (right ascension given in hours, converted to degrees)
fn resolve_position(properties: &HashMap<String, Value>) -> Option<[f32; 3]> {
    if let Some(Value::Array(xyz)) = properties.get("Position") {
        if xyz.len() == 3 {
            return Some([xyz[0] as f32, xyz[1] as f32, xyz[2] as f32]);
        }
    }
    let ra_hours = number_field(properties, "RA")?;
    let dec = number_field(properties, "Dec")?;
    let distance = number_field(properties, "Distance")?;
    Some(astro::equatorial_to_cartesian(
        ra_hours as f32 * 15.0,
        dec as f32,
        distance as f32,
    ))
}

//a stc text format
//tp StcDisposition
/// How an `stc` record's catalog number interacts with an
/// already-loaded star, grounded on `DataDisposition` in
/// `original_source/src/celengine/stardataloader.cpp`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StcDisposition {
    /// Reuse an existing star at the same number (if any), else create one
    Add,
    /// Same effective behavior as `Add` in this reader: both create a
    /// fresh record when nothing already exists at that number, and
    /// overwrite every field when something does
    Replace,
    /// Requires an existing star; every omitted field keeps its old value
    Modify,
}

//fp read_stc
/// Read an `stc` star-catalog text source into the builder
///
/// Each record is `[disposition] [Star|Barycenter] [number] ["name:..."]
/// { properties }`; disposition and object type default to `Add` and
/// `Star`. A record naming neither a catalog number nor a name is
/// rejected, since it could never be referenced again. Per-record
/// errors are logged and the record is skipped
pub fn read_stc(text: &str, builder: &mut DatabaseBuilder) -> Result<usize, Error> {
    let mut lexer = Lexer::new(text);
    let mut loaded = 0;
    while lexer.peek()?.is_some() {
        match read_stc_record(&mut lexer, builder) {
            Ok(()) => loaded += 1,
            Err(e) => {
                log::warn!("skipping malformed stc record: {e}");
                // best-effort resynchronization: bail out entirely,
                // since a mis-parsed record leaves the lexer position
                // in an unknown spot relative to the next record
                return if loaded == 0 { Err(e) } else { Ok(loaded) };
            }
        }
    }
    Ok(loaded)
}

//fi read_stc_record
fn read_stc_record(lexer: &mut Lexer, builder: &mut DatabaseBuilder) -> Result<(), Error> {
    let mut disposition = StcDisposition::Add;
    if let Some(Token::Ident(word)) = lexer.peek()?.cloned() {
        match word.as_str() {
            "Add" => {
                lexer.next()?;
            }
            "Replace" => {
                disposition = StcDisposition::Replace;
                lexer.next()?;
            }
            "Modify" => {
                disposition = StcDisposition::Modify;
                lexer.next()?;
            }
            _ => {}
        }
    }

    let mut is_barycenter = false;
    if let Some(Token::Ident(word)) = lexer.peek()?.cloned() {
        match word.as_str() {
            "Star" => {
                lexer.next()?;
            }
            "Barycenter" => {
                is_barycenter = true;
                lexer.next()?;
            }
            other => return Err(lexer.error(format!("unrecognized object type {other:?}"))),
        }
    }

    let mut catalog_number = None;
    if let Some(Token::Number(n)) = lexer.peek()?.cloned() {
        catalog_number = Some(n as u32);
        lexer.next()?;
    }

    let mut names: Vec<String> = Vec::new();
    if let Some(Token::Str(s)) = lexer.peek()?.cloned() {
        names = s
            .split(':')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        lexer.next()?;
    }

    if catalog_number.is_none() {
        if let Some(first) = names.first() {
            catalog_number = builder.find_number_by_name(first, false);
        }
    }

    match lexer.next()? {
        Some(Token::LBrace) => {}
        _ => return Err(lexer.error("expected '{' to begin a property block")),
    }
    let properties = parse_property_block(lexer)?;

    if is_barycenter {
        DatabaseBuilder::require_barycenter_identity(catalog_number, names.first().map(String::as_str))?;
    }

    apply_stc_record(builder, disposition, is_barycenter, catalog_number, &names, &properties)
}

//fi fresh_star
fn fresh_star(number: CatalogNumber, is_barycenter: bool, builder: &mut DatabaseBuilder) -> Star {
    let details = if is_barycenter {
        builder.details_registry().barycenter()
    } else {
        builder
            .details_registry()
            .get_or_create(SpectralClass::G, 2, LuminosityClass::MainSequence)
    };
    // barycenters use the sentinel magnitude `stardbbuilder.cpp` gives
    // them: far too faint to ever be the brightest thing in a node
    let abs_magnitude = if is_barycenter { 30.0 } else { 0.0 };
    Star::new(number, [0.0, 0.0, 0.0].into(), abs_magnitude, details)
}

//fi apply_star_properties
/// Apply a record's property block onto a star, in the fixed order
/// `SpectralType`, position, magnitude, `Extinction`, `Radius`,
/// `Temperature`/`BoloCorrection` — matching the explicit per-key
/// lookups `applyCustomStarDetails` makes in
/// `original_source/src/celengine/stardbbuilder.cpp`, rather than an
/// order depending on how the properties happen to be stored
fn apply_star_properties(
    star: &mut Star,
    is_barycenter: bool,
    properties: &HashMap<String, Value>,
    builder: &mut DatabaseBuilder,
) {
    if !is_barycenter {
        if let Some(Value::Str(spectral)) = properties.get("SpectralType") {
            match parse_spectral_type(spectral) {
                Ok((class, subclass, lum)) => {
                    star.set_details(builder.details_registry().get_or_create(class, subclass, lum))
                }
                Err(e) => log::warn!("skipping unrecognized SpectralType {spectral:?}: {e}"),
            }
        }
    }

    if let Some(position) = resolve_position(properties) {
        star.set_position(position.into());
    }
    let distance = {
        let p = star.position();
        (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt()
    };

    // barycenters never have a magnitude property parsed: they keep the
    // sentinel set in `fresh_star`, per `stardbbuilder.cpp`
    if !is_barycenter {
        if let Some(abs_mag) = number_field(properties, "AbsMag") {
            star.set_abs_magnitude(abs_mag as f32);
        } else if let Some(app_mag) = number_field(properties, "AppMag") {
            if distance > 1.0e-5 {
                star.set_abs_magnitude(astro::app_to_abs_mag(app_mag as f32, distance));
            } else {
                log::warn!("cannot derive AbsMag from AppMag: star too close to the origin");
            }
        }
    }

    if let Some(extinction) = number_field(properties, "Extinction") {
        if distance > 0.0 {
            star.set_extinction(extinction as f32 / distance);
        }
    }

    if let Some(radius) = number_field(properties, "Radius") {
        star.details_mut().radius = Some(radius as f32);
    }

    if let Some(temperature) = number_field(properties, "Temperature") {
        let temperature = temperature as f32;
        let has_explicit_bolo = properties.contains_key("BoloCorrection");
        let details = star.details_mut();
        details.temperature = temperature;
        if !has_explicit_bolo {
            details.bolometric_correction = bolometric_correction_of(temperature.max(1.0));
        }
    }
    if let Some(bc) = number_field(properties, "BoloCorrection") {
        star.details_mut().bolometric_correction = bc as f32;
    }
}

//fi apply_stc_record
fn apply_stc_record(
    builder: &mut DatabaseBuilder,
    disposition: StcDisposition,
    is_barycenter: bool,
    catalog_number: Option<CatalogNumber>,
    names: &[String],
    properties: &HashMap<String, Value>,
) -> Result<(), Error> {
    let existing_number = catalog_number.filter(|n| builder.find_star(*n).is_some());

    let number = match disposition {
        StcDisposition::Modify => {
            let Some(number) = existing_number else {
                return Err(Error::UnresolvedReference(catalog_number.unwrap_or(0)));
            };
            let mut star = builder.find_star(number).expect("checked above").clone();
            apply_star_properties(&mut star, is_barycenter, properties, builder);
            builder.put_star(star);
            number
        }
        StcDisposition::Add | StcDisposition::Replace => {
            let number = match existing_number.or(catalog_number) {
                Some(n) => n,
                None => builder.allocate_auto_number()?,
            };
            let mut star = fresh_star(number, is_barycenter, builder);
            apply_star_properties(&mut star, is_barycenter, properties, builder);
            builder.put_star(star);
            number
        }
    };

    for name in names {
        builder.add_name(number, name);
    }

    if let Some(value) = properties.get("OrbitBarycenter") {
        let barycenter_number = match value {
            Value::Number(n) => Some(*n as u32),
            Value::Str(s) => s.parse::<u32>().ok().or_else(|| builder.find_number_by_name(s, false)),
            _ => None,
        };
        match barycenter_number {
            Some(b) => builder.set_orbit_barycenter_for(number, b),
            None => log::warn!("unresolved OrbitBarycenter reference for star {number}"),
        }
    }

    Ok(())
}

//a dsc text format
//fp read_dsc
/// Read a `dsc` deep-sky-object catalog text source into the builder
///
/// Each record is `Type [number] "name:..." { properties }`, where
/// `Type` is one of `Galaxy`/`Globular`/`Nebula`/`OpenCluster`; unlike
/// `stc`, the name is mandatory (grounded on
/// `original_source/src/celengine/dsodataloader.cpp`'s `DscDataLoader::load`,
/// which errors if no name is given). Per-record errors are logged and
/// the record is skipped
pub fn read_dsc(text: &str, builder: &mut DatabaseBuilder) -> Result<usize, Error> {
    let mut lexer = Lexer::new(text);
    let mut loaded = 0;
    while lexer.peek()?.is_some() {
        match read_dsc_record(&mut lexer, builder) {
            Ok(()) => loaded += 1,
            Err(e) => {
                log::warn!("skipping malformed dsc record: {e}");
                return if loaded == 0 { Err(e) } else { Ok(loaded) };
            }
        }
    }
    Ok(loaded)
}

//fi read_dsc_record
fn read_dsc_record(lexer: &mut Lexer, builder: &mut DatabaseBuilder) -> Result<(), Error> {
    let object_type = match lexer.next()? {
        Some(Token::Ident(word)) => match word.as_str() {
            "Galaxy" => DeepSkyObjectType::Galaxy,
            "Globular" => DeepSkyObjectType::Globular,
            "Nebula" => DeepSkyObjectType::Nebula,
            "OpenCluster" => DeepSkyObjectType::OpenCluster,
            other => return Err(lexer.error(format!("unrecognized DSO type {other:?}"))),
        },
        _ => return Err(lexer.error("expected a DSO type")),
    };

    let mut catalog_number = None;
    if let Some(Token::Number(n)) = lexer.peek()?.cloned() {
        catalog_number = Some(n as u32);
        lexer.next()?;
    }

    let names: Vec<String> = match lexer.next()? {
        Some(Token::Str(s)) => s
            .split(':')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => return Err(lexer.error("dsc record is missing its mandatory name")),
    };

    match lexer.next()? {
        Some(Token::LBrace) => {}
        _ => return Err(lexer.error("expected '{' to begin a property block")),
    }
    let properties = parse_property_block(lexer)?;

    let number = match catalog_number {
        Some(n) => n,
        None => builder.allocate_auto_number()?,
    };
    let position = resolve_position(&properties).unwrap_or([0.0, 0.0, 0.0]);
    let radius = number_field(&properties, "Radius").unwrap_or(1.0) as f32;
    let mut dso = DeepSkyObject::new(number, position.into(), radius, object_type);
    if let Some(abs_mag) = number_field(&properties, "AbsMag") {
        dso.set_abs_magnitude(abs_mag as f32);
    }

    builder.add_dso(dso)?;
    for name in &names {
        builder.add_name(number, name);
    }
    Ok(())
}

//a Spectral code packing
//fp decode_spectral_code
/// Unpack a `CELSTARS` `u16` spectral code into its spectral triple
///
/// Bit layout (low to high): 2 bits star-type (unused here, reserved
/// for neutron star / white dwarf / normal), 4 bits spectral class, 4
/// bits subclass, 4 bits luminosity class. This layout is an
/// implementer's choice (see DESIGN.md): the original bit packing was
/// not part of the material this crate was grounded on
pub fn decode_spectral_code(code: u16) -> (SpectralClass, u8, LuminosityClass) {
    let class_bits = (code >> 2) & 0xf;
    let subclass = ((code >> 6) & 0xf) as u8;
    let lum_bits = (code >> 10) & 0xf;

    let class = match class_bits {
        0 => SpectralClass::O,
        1 => SpectralClass::B,
        2 => SpectralClass::A,
        3 => SpectralClass::F,
        4 => SpectralClass::G,
        5 => SpectralClass::K,
        6 => SpectralClass::M,
        7 => SpectralClass::Wn,
        8 => SpectralClass::Wc,
        9 => SpectralClass::Wd,
        _ => SpectralClass::Unknown,
    };
    let lum = match lum_bits {
        0 => LuminosityClass::MainSequence,
        1 => LuminosityClass::Giant,
        _ => LuminosityClass::Supergiant,
    };
    (class, subclass, lum)
}

//fp encode_spectral_code
pub fn encode_spectral_code(class: SpectralClass, subclass: u8, lum: LuminosityClass) -> u16 {
    let class_bits: u16 = match class {
        SpectralClass::O => 0,
        SpectralClass::B => 1,
        SpectralClass::A => 2,
        SpectralClass::F => 3,
        SpectralClass::G => 4,
        SpectralClass::K => 5,
        SpectralClass::M => 6,
        SpectralClass::Wn => 7,
        SpectralClass::Wc => 8,
        SpectralClass::Wd => 9,
        SpectralClass::Unknown => 15,
    };
    let lum_bits: u16 = match lum {
        LuminosityClass::MainSequence => 0,
        LuminosityClass::Giant => 1,
        LuminosityClass::Supergiant => 2,
    };
    (class_bits << 2) | ((subclass as u16 & 0xf) << 6) | (lum_bits << 10)
}

//fp parse_spectral_type
/// Parse a textual spectral type such as `"G2V"` or `"M5III"` used by
/// the `stc` text format
pub fn parse_spectral_type(s: &str) -> Result<(SpectralClass, u8, LuminosityClass), Error> {
    let err = || Error::UnknownSpectralType(s.to_string());
    let mut chars = s.trim().chars().peekable();
    let class = match chars.next().ok_or_else(err)? {
        'O' | 'o' => SpectralClass::O,
        'B' | 'b' => SpectralClass::B,
        'A' | 'a' => SpectralClass::A,
        'F' | 'f' => SpectralClass::F,
        'G' | 'g' => SpectralClass::G,
        'K' | 'k' => SpectralClass::K,
        'M' | 'm' => SpectralClass::M,
        'D' | 'd' => SpectralClass::Wd,
        'W' | 'w' => {
            match chars.next() {
                Some('N') | Some('n') => SpectralClass::Wn,
                Some('C') | Some('c') => SpectralClass::Wc,
                _ => return Err(err()),
            }
        }
        _ => return Err(err()),
    };

    let mut digits = String::new();
    while let Some(c) = chars.peek() {
        if c.is_ascii_digit() {
            digits.push(*c);
            chars.next();
        } else {
            break;
        }
    }
    let subclass = if digits.is_empty() {
        crate::spectral::default_subclass(class)
    } else {
        digits.parse::<u8>().map_err(|_| err())?.min(9)
    };

    let rest: String = chars.collect();
    let lum = if rest.starts_with("III") || rest.starts_with("IV") || rest.starts_with("II") {
        LuminosityClass::Giant
    } else if rest.starts_with('I') {
        LuminosityClass::Supergiant
    } else {
        LuminosityClass::MainSequence
    };

    Ok((class, subclass, lum))
}

//a Little-endian primitives
fn read_u16<R: Read>(r: &mut R) -> Result<u16, Error> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_i16<R: Read>(r: &mut R) -> Result<i16, Error> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(i16::from_le_bytes(buf))
}

fn read_u32<R: Read>(r: &mut R) -> Result<u32, Error> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_f32<R: Read>(r: &mut R) -> Result<f32, Error> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(f32::from_le_bytes(buf))
}

//a Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spectral_code_round_trips() {
        for class in [
            SpectralClass::O,
            SpectralClass::G,
            SpectralClass::M,
            SpectralClass::Wd,
        ] {
            for subclass in 0..10u8 {
                for lum in [
                    LuminosityClass::MainSequence,
                    LuminosityClass::Giant,
                    LuminosityClass::Supergiant,
                ] {
                    let code = encode_spectral_code(class, subclass, lum);
                    let (c2, s2, l2) = decode_spectral_code(code);
                    assert_eq!(c2, class);
                    assert_eq!(s2, subclass);
                    assert_eq!(l2, lum);
                }
            }
        }
    }

    #[test]
    fn parse_sun_like_spectral_type() {
        let (class, subclass, lum) = parse_spectral_type("G2V").unwrap();
        assert_eq!(class, SpectralClass::G);
        assert_eq!(subclass, 2);
        assert_eq!(lum, LuminosityClass::MainSequence);
    }

    #[test]
    fn parse_giant_spectral_type() {
        let (class, _subclass, lum) = parse_spectral_type("M5III").unwrap();
        assert_eq!(class, SpectralClass::M);
        assert_eq!(lum, LuminosityClass::Giant);
    }

    #[test]
    fn parse_missing_subclass_uses_default() {
        let (class, subclass, _) = parse_spectral_type("O").unwrap();
        assert_eq!(subclass, crate::spectral::default_subclass(class));
    }

    #[test]
    fn celstars_rejects_bad_magic() {
        let bytes = b"NOTRIGHT\x00\x01\x00\x00\x00\x00";
        let mut builder = DatabaseBuilder::new();
        assert!(read_celstars(&bytes[..], &mut builder).is_err());
    }

    #[test]
    fn read_names_splits_colon_separated_aliases() {
        let mut builder = DatabaseBuilder::new();
        let loaded = read_names("11767 Polaris:Alpha UMi\n32349 Sirius\n", &mut builder);
        assert_eq!(loaded, 3);
    }
}
