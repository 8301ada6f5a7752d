//! Deterministic pair selection
//!
//! Every record is reduced to a small integer key derived only from its pair
//! identifier and two run-wide constants ([`SelectionParams`]). A key of `0`
//! keeps the record. Both mates share the identifier and therefore the key,
//! so a pair is always kept or dropped as a whole.
//!
//! The key is computed in discrete steps:
//!
//! 1. [`strip_mate_suffix`] removes a trailing `/1` or `/2`
//! 2. [`strip_annotation`] removes a `#...` index annotation
//! 3. [`digits`] keeps the ASCII digits
//! 4. [`trailing_window`] reads the last [`KEY_WIDTH`] digits as a number
//! 5. the number is multiplied by the multiplier and reduced modulo the bucket count
//!
//! This is not a uniform sampler. The arithmetic is fixed so that a given
//! archive and fraction always select the same reads.

use crate::error::{ConfigError, Result, SelectError};

/// Multiplier table, indexed by `archive_size % 35`
pub const PRIMES: [u64; 35] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149,
];

/// Number of trailing identifier digits that form the key
pub const KEY_WIDTH: usize = 8;

/// Run-wide selection constants
///
/// Computed once from the archive byte size and the requested fraction, then
/// shared by every record of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionParams {
    /// Prime chosen by the archive size
    multiplier: u64,

    /// Odd modulus derived from the fraction
    bucket_count: u64,
}
impl SelectionParams {
    /// Creates selection constants from explicit values
    ///
    /// The bucket count is forced odd, so `0` becomes `1`.
    #[must_use]
    pub fn new(multiplier: u64, bucket_count: u64) -> Self {
        Self {
            multiplier,
            bucket_count: force_odd(bucket_count),
        }
    }

    /// Derives the selection constants of an archive
    ///
    /// # Arguments
    ///
    /// * `archive_size` - Byte size of the input archive
    /// * `fraction` - Fraction of pairs to keep, within `(0, 1]`
    pub fn from_archive(archive_size: u64, fraction: f64) -> Result<Self> {
        validate_fraction(fraction)?;
        Ok(Self {
            multiplier: multiplier_for(archive_size),
            bucket_count: force_odd(bucket_ratio(archive_size, fraction)),
        })
    }

    #[must_use]
    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    #[must_use]
    pub fn bucket_count(&self) -> u64 {
        self.bucket_count
    }

    /// Computes the selection key of a pair identifier
    pub fn select(&self, identifier: &[u8]) -> std::result::Result<u64, SelectError> {
        select(identifier, self.multiplier, self.bucket_count)
    }

    /// Returns `true` if the pair identifier is kept
    pub fn is_selected(&self, identifier: &[u8]) -> std::result::Result<bool, SelectError> {
        self.select(identifier).map(|key| key == 0)
    }
}

/// Checks that a fraction lies within `(0, 1]`
pub fn validate_fraction(fraction: f64) -> std::result::Result<(), ConfigError> {
    if fraction > 0.0 && fraction <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidFraction(fraction))
    }
}

/// Picks the multiplier for an archive of the given byte size
#[must_use]
pub fn multiplier_for(archive_size: u64) -> u64 {
    PRIMES[(archive_size % PRIMES.len() as u64) as usize]
}

/// Truncated `size / (size * fraction)`, or `1 / fraction` for an empty archive
#[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn bucket_ratio(archive_size: u64, fraction: f64) -> u64 {
    let ratio = if archive_size == 0 {
        1.0 / fraction
    } else {
        let size = archive_size as f64;
        size / (size * fraction)
    };
    ratio as u64
}

/// Increments even values so the modulus never splits even suffixes trivially
#[must_use]
pub fn force_odd(n: u64) -> u64 {
    if n % 2 == 0 {
        n + 1
    } else {
        n
    }
}

/// Removes a trailing `/1` or `/2`
#[must_use]
pub fn strip_mate_suffix(identifier: &[u8]) -> &[u8] {
    match identifier {
        [head @ .., b'/', b'1' | b'2'] => head,
        _ => identifier,
    }
}

/// Removes everything from the first `#`
#[must_use]
pub fn strip_annotation(identifier: &[u8]) -> &[u8] {
    match memchr::memchr(b'#', identifier) {
        Some(pos) => &identifier[..pos],
        None => identifier,
    }
}

/// Iterates over the ASCII digits of an identifier
pub fn digits(identifier: &[u8]) -> impl DoubleEndedIterator<Item = u8> + '_ {
    identifier.iter().copied().filter(u8::is_ascii_digit)
}

/// Reads the last [`KEY_WIDTH`] digits as a number
///
/// Fewer digits are read as-is, which equals left zero-padding. Returns
/// `None` if there are no digits at all.
pub fn trailing_window<I>(digits: I) -> Option<u64>
where
    I: DoubleEndedIterator<Item = u8>,
{
    let mut value = 0;
    let mut place = 1;
    let mut seen = false;
    for digit in digits.rev().take(KEY_WIDTH) {
        value += u64::from(digit - b'0') * place;
        place *= 10;
        seen = true;
    }
    seen.then_some(value)
}

/// Computes the selection key of a pair identifier
///
/// # Arguments
///
/// * `identifier` - Pair identifier, with or without its `/1` or `/2` suffix
/// * `multiplier` - Run-wide multiplier
/// * `bucket_count` - Run-wide modulus
///
/// # Errors
///
/// Returns [`SelectError::DegenerateIdentifier`] if the identifier has no digits.
///
/// # Panics
///
/// Panics if `bucket_count` is zero.
pub fn select(
    identifier: &[u8],
    multiplier: u64,
    bucket_count: u64,
) -> std::result::Result<u64, SelectError> {
    let core = strip_annotation(strip_mate_suffix(identifier));
    let value = trailing_window(digits(core)).ok_or_else(|| {
        SelectError::DegenerateIdentifier(String::from_utf8_lossy(identifier).into_owned())
    })?;
    let key = u128::from(value) * u128::from(multiplier) % u128::from(bucket_count);
    Ok(key as u64)
}
