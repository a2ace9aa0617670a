//! Model domain geometry.
//!
//! `CADRE-DIMENSIONS` holds five signed words:
//! ```text
//! [0] NSMAX   spectral truncation
//! [1] NDGL    latitudes
//! [2] NDLON   longitudes
//! [3] NFLEVG  levels
//! [4] < 0: limited-area, -NMSMAX (secondary truncation)
//!     >= 0: global, NSTTYP (stretching type)
//! ```
//! Limited-area files additionally carry the frame in `CADRE-REDPOINPOL`,
//! `8 + 2 * (NSMAX + 2)` signed words of which the first eight are decoded.

use std::fmt;
use std::io::{Read, Seek};

use log::debug;

use crate::fa::format::catalog::FieldCatalog;
use crate::fa::format::content;
use crate::fa::types::error::{FaError, Result};
use crate::fa::utils;

pub const DIMENSIONS_FIELD: &str = "CADRE-DIMENSIONS";
pub const FRAME_FIELD: &str = "CADRE-REDPOINPOL";

const DIMENSION_WORDS: usize = 5;
const FRAME_HEAD_WORDS: i64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// NSMAX
    pub truncation: i64,
    /// NDGL
    pub latitudes: i64,
    /// NDLON
    pub longitudes: i64,
    /// NFLEVG
    pub levels: i64,
}

/// Limited-area frame: the leading words of `CADRE-REDPOINPOL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LamFrame {
    /// SPTRUNC
    pub truncation_value: i64,
    pub reserved: i64,
    /// NDLUX
    pub lon_last: i64,
    /// NDLUN
    pub lon_first: i64,
    /// NDGUX
    pub lat_last: i64,
    /// NDGUN
    pub lat_first: i64,
    /// IX
    pub extent_x: i64,
    /// IY
    pub extent_y: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainKind {
    Global {
        /// NSTTYP
        stretching_type: i64,
    },
    LimitedArea {
        /// NMSMAX
        secondary_truncation: i64,
        frame: LamFrame,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    pub dimensions: Dimensions,
    pub kind: DomainKind,
}

impl Domain {
    pub fn is_limited_area(&self) -> bool {
        matches!(self.kind, DomainKind::LimitedArea { .. })
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let d = &self.dimensions;
        match &self.kind {
            DomainKind::Global { stretching_type } => writeln!(f, "Global domain (NSTTYP={})", stretching_type)?,
            DomainKind::LimitedArea { .. } => writeln!(f, "Limited-area domain")?,
        }
        writeln!(f, "  NSMAX={} NDGL={} NDLON={} NFLEVG={}", d.truncation, d.latitudes, d.longitudes, d.levels)?;
        if let DomainKind::LimitedArea { secondary_truncation, frame } = &self.kind {
            writeln!(f, "  NMSMAX={} SPTRUNC={}", secondary_truncation, frame.truncation_value)?;
            writeln!(
                f,
                "  NDLUN={} NDLUX={} NDGUN={} NDGUX={}",
                frame.lon_first, frame.lon_last, frame.lat_first, frame.lat_last
            )?;
            write!(f, "  IX={} IY={}", frame.extent_x, frame.extent_y)?;
        }
        Ok(())
    }
}

/// Decodes the domain geometry from the catalogued frame fields.
pub fn decode<R: Read + Seek>(file: &mut R, catalog: &FieldCatalog) -> Result<Domain> {
    let dims_entry = catalog.require(DIMENSIONS_FIELD)?;
    let bytes = content::read_field(file, &dims_entry.location)?;
    let w = utils::decode_signed_words(DIMENSIONS_FIELD, &bytes, DIMENSION_WORDS)?;

    let dimensions = Dimensions {
        truncation: w[0],
        latitudes: w[1],
        longitudes: w[2],
        levels: w[3],
    };

    let disambiguator = w[4];
    let kind = if disambiguator < 0 {
        DomainKind::LimitedArea {
            secondary_truncation: disambiguator.saturating_neg(),
            frame: read_frame(file, catalog, dimensions.truncation)?,
        }
    } else {
        DomainKind::Global {
            stretching_type: disambiguator,
        }
    };
    debug!("Domain decoded: {:?} {:?}", dimensions, kind);

    Ok(Domain { dimensions, kind })
}

/// Word count of `CADRE-REDPOINPOL` for a limited-area truncation.
pub fn frame_words(truncation: i64) -> Option<usize> {
    let words = truncation
        .checked_add(2)?
        .checked_mul(2)?
        .checked_add(FRAME_HEAD_WORDS)?;
    if words < FRAME_HEAD_WORDS {
        return None;
    }
    usize::try_from(words).ok()
}

fn read_frame<R: Read + Seek>(file: &mut R, catalog: &FieldCatalog, truncation: i64) -> Result<LamFrame> {
    let count = frame_words(truncation).ok_or_else(|| {
        FaError::InvalidFormat(format!("Truncation {} gives no valid {} length", truncation, FRAME_FIELD))
    })?;
    let entry = catalog.require(FRAME_FIELD)?;
    let bytes = content::read_field(file, &entry.location)?;
    let w = utils::decode_signed_words(FRAME_FIELD, &bytes, count)?;

    Ok(LamFrame {
        truncation_value: w[0],
        reserved: w[1],
        lon_last: w[2],
        lon_first: w[3],
        lat_last: w[4],
        lat_first: w[5],
        extent_x: w[6],
        extent_y: w[7],
    })
}
