//! Core data structures for FA format components.
//!
//! This module defines the fundamental types used throughout the library:
//! - The fixed 22-word file header
//! - Index block descriptors and field locations
//! - Catalog entries (live fields and holes)
//! - Lead-time units

use std::fmt;

use super::error::{FaError, Result};

/// Size of one FA word in bytes. Every integer in the container is a word.
pub const WORD: u64 = 8;

/// Number of words in the leading header.
pub const HEADER_WORDS: usize = 22;

/// Width in bytes of a field name slot in the index.
pub const NAME_LENGTH: u64 = 16;

/// A raw `(date, time)` pair from the header, as `YYYYMMDD` and `HHMMSS`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stamp {
    pub date: u64,
    pub time: u64,
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:08} : {:06}", self.date, self.time)
    }
}

/// Parsed leading header of an FA file.
///
/// Words are mapped positionally; the comment on each field gives its word
/// index. Lengths are in words unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// 0: sector size in words.
    pub sector_size: u64,
    /// 1: name slot width, always 16.
    pub name_length: u64,
    /// 2: 0 when the file was closed cleanly.
    pub closure: u64,
    /// 3: header word count, always 22.
    pub header_len: u64,
    /// 4: sectors in the file.
    pub sector_count: u64,
    /// 5: index slots, holes included.
    pub record_count: u64,
    /// 6: shortest data record.
    pub min_record_len: u64,
    /// 7: longest data record.
    pub max_record_len: u64,
    /// 8: total length of data records.
    pub data_len: u64,
    /// 9: rewrites with the same length.
    pub rewrites_same: u64,
    /// 10: rewrites with a shorter length (small data hole).
    pub rewrites_shorter: u64,
    /// 11: rewrites with a longer length (leaves a hole in the index).
    pub rewrites_longer: u64,
    /// 12: records per index sequence.
    pub records_per_sequence: u64,
    /// 13-14: creation date and time.
    pub created: Stamp,
    /// 15-16: date and time of the last modification.
    pub last_modified: Stamp,
    /// 17-18: date and time of the first modification.
    pub first_modified: Stamp,
    /// 19: sectors taken by the index sequences.
    pub index_sector_count: u64,
    /// 20: empty index slots left by deleted or moved records.
    pub hole_count: u64,
    /// 21: data sectors in use.
    pub data_sector_count: u64,
    /// Resolved index layout, ascending by record position.
    pub index_blocks: Vec<IndexBlock>,
}

impl Header {
    /// Sector size in bytes.
    pub fn sector_bytes(&self) -> u64 {
        self.sector_size.saturating_mul(WORD)
    }

    /// File size implied by the sector count.
    pub fn expected_file_size(&self) -> u64 {
        self.sector_bytes().saturating_mul(self.sector_count)
    }

    /// Number of live (non-hole) fields the header announces.
    pub fn field_count(&self) -> u64 {
        self.record_count.saturating_sub(self.hole_count)
    }
}

/// One index sequence: a name-table sector followed by its location table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBlock {
    /// 0-based sector holding the name table.
    pub start_sector: u64,
    /// Slots in this block.
    pub record_count: u64,
}

/// Absolute byte range of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldLocation {
    pub offset: u64,
    pub length: u64,
}

impl FieldLocation {
    /// Length in words, rounded down.
    pub fn words(&self) -> u64 {
        self.length / WORD
    }
}

/// A live, named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub name: String,
    /// 0-based slot in the concatenated index.
    pub position: u64,
    pub location: FieldLocation,
}

/// An index slot with no live field behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hole {
    /// 1-based slot in the concatenated index.
    pub position: u64,
    pub location: FieldLocation,
}

impl Hole {
    /// Catalog key of the hole, `h` followed by its 1-based position.
    pub fn key(&self) -> String {
        format!("h{}", self.position)
    }
}

/// Unit in which the forecast lead time is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadUnit {
    Minutes,
    Hours,
    Seconds,
}

impl LeadUnit {
    pub fn seconds(&self) -> i64 {
        match self {
            LeadUnit::Minutes => 60,
            LeadUnit::Hours => 3600,
            LeadUnit::Seconds => 1,
        }
    }
}

impl TryFrom<u64> for LeadUnit {
    type Error = FaError;
    fn try_from(code: u64) -> Result<Self> {
        match code {
            0 => Ok(Self::Minutes),
            1 => Ok(Self::Hours),
            254 => Ok(Self::Seconds),
            _ => Err(FaError::UnsupportedLeadUnit(code)),
        }
    }
}

impl fmt::Display for LeadUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LeadUnit::Minutes => write!(f, "minutes"),
            LeadUnit::Hours => write!(f, "hours"),
            LeadUnit::Seconds => write!(f, "seconds"),
        }
    }
}
