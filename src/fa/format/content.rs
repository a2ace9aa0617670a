//! # Field Content Access
//!
//! Exact byte-range reads against locations resolved by the catalog. Field
//! payloads are opaque here; the domain decoders interpret the few fields
//! that have a fixed schema.

use std::io::{Read, Seek, SeekFrom};

use log::trace;

use crate::fa::types::error::{FaError, Result};
use crate::fa::types::models::FieldLocation;

/// Upper bound on the buffer reserved up front; lengths come from the file.
const MAX_PREALLOC: u64 = 1 << 24;

/// Reads exactly `location.length` bytes starting at `location.offset`.
///
/// A short read is reported as [`FaError::Truncated`] with the number of
/// bytes that were actually available; no partial buffer is returned.
pub fn read_field<R: Read + Seek>(file: &mut R, location: &FieldLocation) -> Result<Vec<u8>> {
    trace!("Reading {} bytes at offset {}", location.length, location.offset);
    file.seek(SeekFrom::Start(location.offset))?;

    let mut bytes = Vec::with_capacity(location.length.min(MAX_PREALLOC) as usize);
    let found = file.by_ref().take(location.length).read_to_end(&mut bytes)? as u64;
    if found != location.length {
        return Err(FaError::Truncated {
            offset: location.offset,
            expected: location.length,
            found,
        });
    }
    Ok(bytes)
}

/// Reads at most the first `max_len` bytes of a field.
///
/// Used by probes that only look at a field's leading words.
pub fn read_field_prefix<R: Read + Seek>(
    file: &mut R,
    location: &FieldLocation,
    max_len: u64,
) -> Result<Vec<u8>> {
    let prefix = FieldLocation {
        offset: location.offset,
        length: location.length.min(max_len),
    };
    read_field(file, &prefix)
}
