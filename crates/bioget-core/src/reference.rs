//! Object reference parsing.
//!
//! A reference is either a bare unsigned integer (treated as an
//! OriginalFile id) or `<Kind>:<digits>` where the kind is one of
//! `OriginalFile`, `FileAnnotation`, or `Image`. The parse produces a
//! tagged variant, so the kind prefix fully determines which fetch path
//! the resolver takes; no shape is ever tried against another kind's rule.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Identifier of a downloadable file resource on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub i64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Object kinds that can appear in a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    OriginalFile,
    FileAnnotation,
    Image,
}

impl ObjectKind {
    /// Stable name used in reference prefixes and wire paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::OriginalFile => "OriginalFile",
            ObjectKind::FileAnnotation => "FileAnnotation",
            ObjectKind::Image => "Image",
        }
    }

    /// Parse an object kind from a reference prefix.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "OriginalFile" => Some(ObjectKind::OriginalFile),
            "FileAnnotation" => Some(ObjectKind::FileAnnotation),
            "Image" => Some(ObjectKind::Image),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed object reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectReference {
    /// Bare integer with no kind prefix; an OriginalFile id is assumed.
    Bare(i64),
    /// `OriginalFile:<id>`
    OriginalFile(i64),
    /// `FileAnnotation:<id>`
    FileAnnotation(i64),
    /// `Image:<id>`
    Image(i64),
}

impl ObjectReference {
    /// Parse a reference string.
    ///
    /// Fails with [`Error::InvalidInput`] for unknown kinds, non-digit or
    /// empty ids, and ids that do not fit in 64 bits. No server call is
    /// made here; parse failures always precede any fetch.
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    /// The id carried by this reference.
    pub fn id(&self) -> i64 {
        match *self {
            ObjectReference::Bare(id)
            | ObjectReference::OriginalFile(id)
            | ObjectReference::FileAnnotation(id)
            | ObjectReference::Image(id) => id,
        }
    }
}

impl FromStr for ObjectReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            None => parse_id(s)
                .map(ObjectReference::Bare)
                .ok_or_else(|| Error::invalid_input("invalid OriginalFile id input")),
            Some((prefix, digits)) => {
                let kind = ObjectKind::from_prefix(prefix)
                    .ok_or_else(|| Error::invalid_input("invalid object input"))?;
                let id = parse_id(digits)
                    .ok_or_else(|| Error::invalid_input("invalid object input"))?;
                Ok(match kind {
                    ObjectKind::OriginalFile => ObjectReference::OriginalFile(id),
                    ObjectKind::FileAnnotation => ObjectReference::FileAnnotation(id),
                    ObjectKind::Image => ObjectReference::Image(id),
                })
            }
        }
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ObjectReference::Bare(id) => write!(f, "{}", id),
            ObjectReference::OriginalFile(id) => write!(f, "OriginalFile:{}", id),
            ObjectReference::FileAnnotation(id) => write!(f, "FileAnnotation:{}", id),
            ObjectReference::Image(id) => write!(f, "Image:{}", id),
        }
    }
}

/// Parse an unsigned decimal id. Digits only; rejects signs, whitespace,
/// empty strings, and values that overflow i64.
fn parse_id(digits: &str) -> Option<i64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_id() {
        assert_eq!(ObjectReference::parse("2").unwrap(), ObjectReference::Bare(2));
        assert_eq!(
            ObjectReference::parse("123456789").unwrap(),
            ObjectReference::Bare(123456789)
        );
    }

    #[test]
    fn parse_original_file() {
        assert_eq!(
            ObjectReference::parse("OriginalFile:2").unwrap(),
            ObjectReference::OriginalFile(2)
        );
    }

    #[test]
    fn parse_file_annotation() {
        assert_eq!(
            ObjectReference::parse("FileAnnotation:20").unwrap(),
            ObjectReference::FileAnnotation(20)
        );
    }

    #[test]
    fn parse_image() {
        assert_eq!(
            ObjectReference::parse("Image:5").unwrap(),
            ObjectReference::Image(5)
        );
    }

    #[test]
    fn bare_non_numeric_is_invalid() {
        assert!(matches!(
            ObjectReference::parse("abc"),
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            ObjectReference::parse(""),
            Err(Error::InvalidInput { .. })
        ));
        // Signs and whitespace are not digits
        assert!(ObjectReference::parse("-2").is_err());
        assert!(ObjectReference::parse("+2").is_err());
        assert!(ObjectReference::parse(" 2").is_err());
    }

    #[test]
    fn unknown_kind_is_invalid() {
        assert!(matches!(
            ObjectReference::parse("Dataset:5"),
            Err(Error::InvalidInput { .. })
        ));
        assert!(ObjectReference::parse("originalfile:5").is_err());
    }

    #[test]
    fn non_digit_id_is_invalid() {
        assert!(ObjectReference::parse("OriginalFile:abc").is_err());
        assert!(ObjectReference::parse("FileAnnotation:").is_err());
        assert!(ObjectReference::parse("Image:1x").is_err());
        assert!(ObjectReference::parse("Image:-5").is_err());
    }

    #[test]
    fn overflowing_id_is_invalid() {
        // One past i64::MAX
        assert!(ObjectReference::parse("9223372036854775808").is_err());
        assert!(ObjectReference::parse("Image:9223372036854775808").is_err());
        // i64::MAX itself is fine
        assert_eq!(
            ObjectReference::parse("9223372036854775807").unwrap(),
            ObjectReference::Bare(i64::MAX)
        );
    }

    #[test]
    fn kind_prefix_is_exclusive() {
        // The tag fully determines the fetch path; an Image reference never
        // parses as anything else.
        let reference = ObjectReference::parse("Image:5").unwrap();
        assert!(matches!(reference, ObjectReference::Image(5)));
    }

    #[test]
    fn display_round_trips() {
        for input in ["2", "OriginalFile:2", "FileAnnotation:20", "Image:5"] {
            let reference = ObjectReference::parse(input).unwrap();
            assert_eq!(reference.to_string(), input);
        }
    }

    #[test]
    fn kind_prefix_round_trips() {
        for kind in [
            ObjectKind::OriginalFile,
            ObjectKind::FileAnnotation,
            ObjectKind::Image,
        ] {
            assert_eq!(ObjectKind::from_prefix(kind.as_str()), Some(kind));
        }
    }
}
