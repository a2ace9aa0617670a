//! In-place patch of one 64-bit scalar inside a named field.
//!
//! This is the only mutation the crate performs. It is gated on the
//! handle's [`AccessMode`], checked before any seek or write.

use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use log::info;

use crate::fa::domain::geometry::FRAME_FIELD;
use crate::fa::format::catalog::FieldCatalog;
use crate::fa::types::access::AccessMode;
use crate::fa::types::error::{FaError, Result};
use crate::fa::types::models::WORD;

/// Frame fix for recent global LBC files: word 0 of `CADRE-REDPOINPOL` set to 10.
pub const FRAME_FIX_FIELD: &str = FRAME_FIELD;
pub const FRAME_FIX_WORD: u64 = 0;
pub const FRAME_FIX_VALUE: u64 = 10;

/// What a patch replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub field: String,
    pub word_offset: u64,
    /// Absolute byte position of the patched word.
    pub byte_offset: u64,
    pub old_value: u64,
    pub new_value: u64,
}

/// Fails with [`FaError::PermissionDenied`] unless `mode` is write-capable.
pub fn ensure_writable(mode: AccessMode, field: &str) -> Result<()> {
    if mode.is_writable() {
        Ok(())
    } else {
        Err(FaError::PermissionDenied {
            field: field.to_string(),
        })
    }
}

/// Replaces word `word_offset` of `field` with `new_value` and returns the old value.
///
/// The written value is not read back.
pub fn patch_scalar<R: Read + Write + Seek>(
    file: &mut R,
    mode: AccessMode,
    catalog: &FieldCatalog,
    field: &str,
    word_offset: u64,
    new_value: u64,
) -> Result<PatchOutcome> {
    ensure_writable(mode, field)?;

    let location = catalog.require(field)?.location;
    if word_offset >= location.words() {
        return Err(FaError::PatchOutOfRange {
            field: field.to_string(),
            word_offset,
            words: location.words(),
        });
    }

    let byte_offset = location.offset + word_offset * WORD;
    file.seek(SeekFrom::Start(byte_offset))?;
    let old_value = file.read_u64::<BigEndian>()?;

    file.seek(SeekFrom::Start(byte_offset))?;
    file.write_u64::<BigEndian>(new_value)?;
    file.flush()?;

    info!(
        "Patched {} word {} at byte {}: {} -> {}",
        field, word_offset, byte_offset, old_value, new_value
    );

    Ok(PatchOutcome {
        field: field.to_string(),
        word_offset,
        byte_offset,
        old_value,
        new_value,
    })
}
