//! Header tokenizer for FASTA and FASTQ records
//!
//! A header carries the pair identifier followed by a single non-alphanumeric
//! separator and the mate number, e.g. `>read42/1`, `@read42 2` or `>read42_1`.
//! Both mates of a pair share the identifier, which is what the selector keys on.
//! The mate tag may be followed by an annotation, as in Casava 1.8 headers
//! (`@M00123:55:000:1:1101:15589:1331 1:N:0:ATCACG`).

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Marker byte opening a FASTA header
pub const FASTA_MARKER: u8 = b'>';

/// Marker byte opening a FASTQ header
pub const FASTQ_MARKER: u8 = b'@';

/// Mate number of a paired-end read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mate {
    One,
    Two,
}
impl Mate {
    /// Parses the ASCII mate digit (`1` or `2`)
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'1' => Some(Self::One),
            b'2' => Some(Self::Two),
            _ => None,
        }
    }

    /// Returns the ASCII digit of the mate
    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            Self::One => b'1',
            Self::Two => b'2',
        }
    }

    #[must_use]
    pub fn as_u8(self) -> u8 {
        self.as_byte() - b'0'
    }
}
impl fmt::Display for Mate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
impl FromStr for Mate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().as_bytes() {
            [byte] => Self::from_byte(*byte).ok_or_else(|| ConfigError::InvalidMate(s.to_string())),
            _ => Err(ConfigError::InvalidMate(s.to_string())),
        }
    }
}

/// Pair identifier and mate number extracted from a header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadName<'a> {
    /// Header text between the marker and the mate separator
    pub identifier: &'a [u8],

    /// Mate number parsed from the header suffix
    pub mate: Mate,
}

/// Returns the header text following the `>` or `@` marker
///
/// Leading and trailing whitespace is removed. Returns `None` if the line is
/// not a header.
#[must_use]
pub fn header_body(line: &[u8]) -> Option<&[u8]> {
    match line.split_first() {
        Some((&(FASTA_MARKER | FASTQ_MARKER), body)) => Some(body.trim_ascii()),
        _ => None,
    }
}

/// Splits a header body into its identifier and mate number
///
/// A body ending in a non-alphanumeric separator and `1` or `2` is split
/// there. Otherwise the last whitespace, `/` or `_` separator followed by
/// `1` or `2` and then a non-alphanumeric byte marks the mate, so trailing
/// annotations such as the Casava 1.8 ` 1:N:0:ATCACG` are tolerated. The
/// identifier must be non-empty.
#[must_use]
pub fn split_mate(body: &[u8]) -> Option<(&[u8], Mate)> {
    let suffix = match body {
        [identifier @ .., separator, digit]
            if !identifier.is_empty() && !separator.is_ascii_alphanumeric() =>
        {
            Mate::from_byte(*digit).map(|mate| (identifier, mate))
        }
        _ => None,
    };
    suffix.or_else(|| split_embedded_mate(body))
}

fn is_mate_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b'/' || byte == b'_'
}

/// Finds the last `<separator><1|2>` not followed by an alphanumeric byte
fn split_embedded_mate(body: &[u8]) -> Option<(&[u8], Mate)> {
    (1..body.len().saturating_sub(1)).rev().find_map(|sep| {
        let bounded = body
            .get(sep + 2)
            .is_none_or(|next| !next.is_ascii_alphanumeric());
        if !bounded || !is_mate_separator(body[sep]) {
            return None;
        }
        Mate::from_byte(body[sep + 1]).map(|mate| (&body[..sep], mate))
    })
}

/// Parses a header line into a [`ReadName`]
///
/// Returns `None` when the line is not a header or carries no mate suffix.
#[must_use]
pub fn parse_header(line: &[u8]) -> Option<ReadName<'_>> {
    let body = header_body(line)?;
    let (identifier, mate) = split_mate(body)?;
    Some(ReadName { identifier, mate })
}

/// Parses a header line, falling back to an assumed mate number
///
/// Archives holding a single end of the library often omit the mate suffix.
/// When `assumed` is set such headers are given that mate and their whole
/// body becomes the identifier. An explicit suffix always wins.
#[must_use]
pub fn parse_header_with_default(line: &[u8], assumed: Option<Mate>) -> Option<ReadName<'_>> {
    let body = header_body(line)?;
    if let Some((identifier, mate)) = split_mate(body) {
        return Some(ReadName { identifier, mate });
    }
    match assumed {
        Some(mate) if !body.is_empty() => Some(ReadName {
            identifier: body,
            mate,
        }),
        _ => None,
    }
}
