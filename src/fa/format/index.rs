//! # Index Layout Resolution
//!
//! The FA index is a sequence of name tables, each followed by a location
//! table in the next sector. Small files have a single sequence starting in
//! the second sector. Larger files chain further sequences through a table
//! of sector numbers stored at the tail of the first sector, newest first.

use std::io::{Read, Seek, SeekFrom};

use log::{debug, info};

use crate::fa::types::error::{FaError, Result};
use crate::fa::types::models::{HEADER_WORDS, Header, IndexBlock, WORD};
use crate::fa::utils;

/// 0-based sector of the first name table.
pub const FIRST_INDEX_SECTOR: u64 = 1;

/// Sectors between a name table and its location table.
pub const LOCATION_TABLE_STRIDE: u64 = 1;

/// Number of index sequences beyond the first one.
///
/// Zero whenever every slot fits in one sequence. Otherwise this is the
/// integer quotient of slots by sequence capacity, which leaves a trailing
/// block of zero slots when the division is exact.
pub fn chain_block_count(header: &Header) -> u64 {
    if header.record_count <= header.records_per_sequence {
        0
    } else {
        header.record_count / header.records_per_sequence
    }
}

/// Resolves the ordered list of index blocks for a header.
///
/// Performs at most one read: the chain-pointer table, and only when more
/// than one sequence exists.
pub fn resolve<R: Read + Seek>(file: &mut R, header: &Header) -> Result<Vec<IndexBlock>> {
    let extra = chain_block_count(header);
    if extra == 0 {
        debug!("Single index block: {} records from sector {}", header.record_count, FIRST_INDEX_SECTOR);
        return Ok(vec![IndexBlock {
            start_sector: FIRST_INDEX_SECTOR,
            record_count: header.record_count,
        }]);
    }

    if extra.saturating_add(HEADER_WORDS as u64) > header.sector_size {
        return Err(FaError::InvalidFormat(format!(
            "Chain table of {} sectors does not fit in a {}-word first sector",
            extra, header.sector_size
        )));
    }

    let table_offset = WORD * (header.sector_size - extra);
    info!("Reading {} chained index sector pointers at byte {}", extra, table_offset);
    let count = utils::checked_span(file, "Chain table", table_offset, extra, WORD)? / WORD as usize;
    file.seek(SeekFrom::Start(table_offset))?;
    let pointers = utils::read_words(file, count)?;

    layout(header, &pointers)
}

/// Builds the block list from the raw chain pointers, as stored on disk.
///
/// Stored pointers are 1-based and newest first. The first sequence
/// implicitly starts at 1-based sector 2.
pub fn layout(header: &Header, pointers: &[u64]) -> Result<Vec<IndexBlock>> {
    let per_sequence = header.records_per_sequence;
    let starts = std::iter::once(FIRST_INDEX_SECTOR + 1).chain(pointers.iter().rev().copied());

    let mut blocks = Vec::with_capacity(pointers.len() + 1);
    for (i, one_based) in starts.enumerate() {
        let start_sector = one_based.checked_sub(1).ok_or_else(|| {
            FaError::InvalidFormat(format!("Chained index pointer {} is zero", i))
        })?;
        let record_count = if i < pointers.len() {
            per_sequence
        } else {
            header.record_count % per_sequence
        };
        blocks.push(IndexBlock {
            start_sector,
            record_count,
        });
    }

    debug!("Index layout: {:?}", blocks);
    Ok(blocks)
}

/// 0-based sector of the location table paired with a block.
pub fn location_sector(block: &IndexBlock) -> u64 {
    block.start_sector + LOCATION_TABLE_STRIDE
}
