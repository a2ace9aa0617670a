//! Low-level word reading utilities

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};

use crate::fa::types::error::{FaError, Result};
use crate::fa::types::models::WORD;

/// Read `count` consecutive big-endian unsigned words from the reader.
pub fn read_words(reader: &mut impl Read, count: usize) -> Result<Vec<u64>> {
    let mut words = vec![0u64; count];
    reader.read_u64_into::<BigEndian>(&mut words)?;
    Ok(words)
}

/// Decode the first `count` big-endian unsigned words of a field payload.
pub fn decode_words(field: &str, bytes: &[u8], count: usize) -> Result<Vec<u64>> {
    let needed = prefix(field, bytes, count)?;
    let mut words = vec![0u64; count];
    BigEndian::read_u64_into(needed, &mut words);
    Ok(words)
}

/// Decode the first `count` big-endian signed words of a field payload.
pub fn decode_signed_words(field: &str, bytes: &[u8], count: usize) -> Result<Vec<i64>> {
    let needed = prefix(field, bytes, count)?;
    let mut words = vec![0i64; count];
    BigEndian::read_i64_into(needed, &mut words);
    Ok(words)
}

fn prefix<'a>(field: &str, bytes: &'a [u8], count: usize) -> Result<&'a [u8]> {
    let too_short = |expected: u64| FaError::FieldTooShort {
        field: field.to_string(),
        expected,
        found: bytes.len() as u64,
    };
    let expected = count.checked_mul(WORD as usize).ok_or_else(|| too_short(u64::MAX))?;
    bytes.get(..expected).ok_or_else(|| too_short(expected as u64))
}

/// Byte offset of a 0-based sector.
pub fn sector_offset(sector: u64, sector_size: u64) -> Result<u64> {
    sector
        .checked_mul(sector_size)
        .and_then(|words| words.checked_mul(WORD))
        .ok_or_else(|| FaError::InvalidFormat(format!("Sector {} out of addressable range", sector)))
}

/// Byte length of `count` units of `unit` bytes at `offset`, provided the
/// whole span lies inside the stream.
pub fn checked_span<R: Seek>(file: &mut R, what: &str, offset: u64, count: u64, unit: u64) -> Result<usize> {
    let len = count
        .checked_mul(unit)
        .ok_or_else(|| FaError::InvalidFormat(format!("{} of {} entries is out of addressable range", what, count)))?;
    let stream_len = file.seek(SeekFrom::End(0))?;
    match offset.checked_add(len) {
        Some(end) if end <= stream_len => usize::try_from(len)
            .map_err(|_| FaError::InvalidFormat(format!("{} of {} bytes is too large", what, len))),
        _ => Err(FaError::InvalidFormat(format!(
            "{} of {} bytes at offset {} runs past the end of the file ({} bytes)",
            what, len, offset, stream_len
        ))),
    }
}
