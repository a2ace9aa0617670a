//! Grid-point vs spectral probe.
//!
//! The second leading word of a field payload is zero for grid-point fields
//! and non-zero for spectral ones.

use std::fmt;
use std::io::{Read, Seek};

use log::debug;

use crate::fa::format::catalog::FieldCatalog;
use crate::fa::format::content;
use crate::fa::types::error::Result;
use crate::fa::types::models::WORD;
use crate::fa::utils;

/// Field probed when the caller names none: surface specific humidity.
pub const DEFAULT_PROBE_FIELD: &str = "S001HUMI.SPECIFI";

const PROBE_WORDS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    GridPoint,
    Spectral,
}

impl Representation {
    /// Classifies a field from its second leading word.
    pub fn from_marker(marker: u64) -> Self {
        if marker == 0 {
            Representation::GridPoint
        } else {
            Representation::Spectral
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Representation::GridPoint => write!(f, "grid-point"),
            Representation::Spectral => write!(f, "spectral"),
        }
    }
}

/// Reads the two leading words of `field` and classifies it.
///
/// A field missing from the catalog yields [`FaError::FieldNotFound`](crate::FaError::FieldNotFound).
pub fn probe<R: Read + Seek>(file: &mut R, catalog: &FieldCatalog, field: &str) -> Result<Representation> {
    let entry = catalog.require(field)?;
    let bytes = content::read_field_prefix(file, &entry.location, PROBE_WORDS as u64 * WORD)?;
    let words = utils::decode_words(field, &bytes, PROBE_WORDS)?;
    let kind = Representation::from_marker(words[1]);
    debug!("{} marker word {} -> {}", field, words[1], kind);
    Ok(kind)
}
