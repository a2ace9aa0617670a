//! FA file header parsing.
//!
//! This module handles:
//! - Reading the 22 leading header words
//! - Validating the structural constants (name width, header length)
//! - Mapping words onto the fixed [`Header`] fields
//! - Triggering index layout resolution

use std::io::{Read, Seek, SeekFrom};

use log::{debug, info, trace};

use crate::fa::format::index;
use crate::fa::types::{
    error::{FaError, Result},
    models::{HEADER_WORDS, Header, NAME_LENGTH, Stamp, WORD},
};
use crate::fa::utils;

/// Bytes per index slot in both the name and the location table.
const SLOT_BYTES: u64 = NAME_LENGTH;

/// Parses the FA header from the beginning of the file.
///
/// # Header Structure
/// ```text
/// [22 x 8 bytes] big-endian unsigned words, see `Header` for positions
/// ```
///
/// The returned header already carries its resolved index blocks, which may
/// require one further read of the chain-pointer table at the tail of the
/// first sector.
pub fn parse<R: Read + Seek>(file: &mut R) -> Result<Header> {
    info!("Parsing FA header");

    // Step 1: Read the header words
    file.seek(SeekFrom::Start(0))?;
    let words = utils::read_words(file, HEADER_WORDS)?;
    trace!("Header words: {:?}", words);

    // Step 2: Map and validate
    let mut header = build_header_from_words(&words)?;

    // Step 3: Locate the index sequences
    header.index_blocks = index::resolve(file, &header)?;

    info!(
        "Header parsed successfully: sector_size={} words, sectors={}, records={}, holes={}, index blocks={}",
        header.sector_size,
        header.sector_count,
        header.record_count,
        header.hole_count,
        header.index_blocks.len()
    );

    Ok(header)
}

/// Constructs the header from its positional words.
fn build_header_from_words(w: &[u64]) -> Result<Header> {
    if w.len() != HEADER_WORDS {
        return Err(FaError::InvalidFormat(format!(
            "Header holds {} words, expected {}",
            w.len(),
            HEADER_WORDS
        )));
    }

    if w[1] != NAME_LENGTH || w[3] != HEADER_WORDS as u64 {
        return Err(FaError::NotAnFaFile {
            name_length: w[1],
            header_len: w[3],
        });
    }

    if w[0] == 0 {
        return Err(FaError::InvalidFormat("Sector size is zero".to_string()));
    }
    if w[12] == 0 {
        return Err(FaError::InvalidFormat("Records per index sequence is zero".to_string()));
    }
    let sector_bytes = w[0]
        .checked_mul(WORD)
        .ok_or_else(|| FaError::InvalidFormat(format!("Sector size {} words is out of range", w[0])))?;
    // Name table and location table each take 16 bytes per slot, one sector apiece.
    if w[12].checked_mul(SLOT_BYTES).is_none_or(|table| table > sector_bytes) {
        return Err(FaError::InvalidFormat(format!(
            "{} records per sequence do not fit in a {}-byte sector",
            w[12], sector_bytes
        )));
    }
    if w[2] != 0 {
        debug!("Closure word is {}, file may not have been closed cleanly", w[2]);
    }

    Ok(Header {
        sector_size: w[0],
        name_length: w[1],
        closure: w[2],
        header_len: w[3],
        sector_count: w[4],
        record_count: w[5],
        min_record_len: w[6],
        max_record_len: w[7],
        data_len: w[8],
        rewrites_same: w[9],
        rewrites_shorter: w[10],
        rewrites_longer: w[11],
        records_per_sequence: w[12],
        created: Stamp { date: w[13], time: w[14] },
        last_modified: Stamp { date: w[15], time: w[16] },
        first_modified: Stamp { date: w[17], time: w[18] },
        index_sector_count: w[19],
        hole_count: w[20],
        data_sector_count: w[21],
        index_blocks: Vec::new(),
    })
}
