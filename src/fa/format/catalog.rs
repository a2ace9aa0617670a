//! Field catalog: the name -> location map behind every lookup.
//!
//! Built by walking the index blocks of a header in ascending order. Each
//! block contributes `record_count` 16-byte names from its name table and as
//! many `(length_words, offset_words_plus_one)` pairs from the location table
//! in the following sector. Slots whose name is all spaces are holes.

use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom};

use log::{debug, info, trace, warn};
use regex::Regex;

use crate::fa::format::index;
use crate::fa::types::error::{ConsistencyWarning, FaError, Result};
use crate::fa::types::models::{FieldEntry, FieldLocation, Header, Hole, IndexBlock, NAME_LENGTH, WORD};
use crate::fa::utils;

/// Immutable mapping from field names (and hole keys) to byte locations.
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    fields: Vec<FieldEntry>,
    by_name: HashMap<String, usize>,
    holes: Vec<Hole>,
    warning: Option<ConsistencyWarning>,
}

impl FieldCatalog {
    /// Live fields in index order.
    pub fn fields(&self) -> &[FieldEntry] {
        &self.fields
    }

    /// Holes in index order.
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldEntry> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// Like [`get`](Self::get), but a missing field is an error.
    pub fn require(&self, name: &str) -> Result<&FieldEntry> {
        self.get(name)
            .ok_or_else(|| FaError::FieldNotFound(name.to_string()))
    }

    /// Finds a hole by its `h<position>` key.
    pub fn hole(&self, key: &str) -> Option<&Hole> {
        let position: u64 = key.strip_prefix('h')?.parse().ok()?;
        self.holes
            .binary_search_by_key(&position, |h| h.position)
            .ok()
            .map(|i| &self.holes[i])
    }

    /// Location of a field name or a hole key.
    pub fn lookup(&self, key: &str) -> Option<FieldLocation> {
        self.get(key)
            .map(|f| f.location)
            .or_else(|| self.hole(key).map(|h| h.location))
    }

    /// Hole-count mismatch found while building, if any.
    pub fn warning(&self) -> Option<&ConsistencyWarning> {
        self.warning.as_ref()
    }

    /// Fields whose name matches at least one of the templates, in index order.
    pub fn matching(&self, templates: &[Regex]) -> Vec<&FieldEntry> {
        self.fields
            .iter()
            .filter(|f| templates.iter().any(|t| t.is_match(&f.name)))
            .collect()
    }
}

/// Reads the index described by `header` and builds its catalog.
///
/// A hole count that disagrees with the header is logged and stored as the
/// catalog's [`warning`](FieldCatalog::warning); it never fails the build.
pub fn build<R: Read + Seek>(file: &mut R, header: &Header) -> Result<FieldCatalog> {
    info!("Building field catalog from {} index blocks", header.index_blocks.len());

    let mut catalog = FieldCatalog::default();
    let mut position = 0u64;

    for block in &header.index_blocks {
        let names = read_names(file, header, block)?;
        let locations = read_locations(file, header, block)?;

        for (raw, &(length_words, offset_plus_one)) in names.chunks_exact(NAME_LENGTH as usize).zip(&locations) {
            let slot = position;
            position += 1;

            if raw.iter().all(|&b| b == b' ') {
                let hole = Hole {
                    position: slot + 1,
                    location: FieldLocation {
                        offset: offset_plus_one.saturating_sub(1).saturating_mul(WORD),
                        length: length_words.saturating_mul(WORD),
                    },
                };
                trace!("Slot {}: hole {}", slot, hole.key());
                catalog.holes.push(hole);
                continue;
            }

            let name = decode_name(raw, slot)?;
            let offset_words = offset_plus_one.checked_sub(1).ok_or_else(|| {
                FaError::InvalidFormat(format!("Field {} at slot {} has a zero offset", name, slot))
            })?;
            let location = match (offset_words.checked_mul(WORD), length_words.checked_mul(WORD)) {
                (Some(offset), Some(length)) => FieldLocation { offset, length },
                _ => {
                    return Err(FaError::InvalidFormat(format!(
                        "Field {} at slot {} points outside the addressable range",
                        name, slot
                    )));
                }
            };
            let entry = FieldEntry {
                name,
                position: slot,
                location,
            };
            trace!("Slot {}: {} at {:?}", slot, entry.name, entry.location);
            insert(&mut catalog, entry);
        }
    }

    let found = catalog.holes.len() as u64;
    if found != header.hole_count {
        let warning = ConsistencyWarning {
            declared: header.hole_count,
            found,
        };
        warn!("{}", warning);
        catalog.warning = Some(warning);
    }

    info!("Field catalog built: {} fields, {} holes", catalog.fields.len(), found);
    Ok(catalog)
}

fn read_names<R: Read + Seek>(file: &mut R, header: &Header, block: &IndexBlock) -> Result<Vec<u8>> {
    let offset = utils::sector_offset(block.start_sector, header.sector_size)?;
    debug!("Reading {} names at byte {}", block.record_count, offset);
    let len = utils::checked_span(file, "Name table", offset, block.record_count, NAME_LENGTH)?;
    file.seek(SeekFrom::Start(offset))?;
    let mut names = vec![0u8; len];
    file.read_exact(&mut names)?;
    Ok(names)
}

fn read_locations<R: Read + Seek>(
    file: &mut R,
    header: &Header,
    block: &IndexBlock,
) -> Result<Vec<(u64, u64)>> {
    let offset = utils::sector_offset(index::location_sector(block), header.sector_size)?;
    debug!("Reading {} locations at byte {}", block.record_count, offset);
    let len = utils::checked_span(file, "Location table", offset, block.record_count, 2 * WORD)?;
    file.seek(SeekFrom::Start(offset))?;
    let words = utils::read_words(file, len / WORD as usize)?;
    Ok(words.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect())
}

fn decode_name(raw: &[u8], slot: u64) -> Result<String> {
    if !raw.is_ascii() {
        return Err(FaError::InvalidFieldName {
            position: slot,
            raw: raw.to_vec(),
        });
    }
    let text = String::from_utf8_lossy(raw);
    Ok(text.trim_end_matches(' ').to_string())
}

fn insert(catalog: &mut FieldCatalog, entry: FieldEntry) {
    match catalog.by_name.get(&entry.name) {
        Some(&i) => {
            warn!(
                "Field {} appears again at slot {}, replacing slot {}",
                entry.name, entry.position, catalog.fields[i].position
            );
            catalog.fields[i] = entry;
        }
        None => {
            catalog.by_name.insert(entry.name.clone(), catalog.fields.len());
            catalog.fields.push(entry);
        }
    }
}
