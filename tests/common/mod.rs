//! Synthetic FA image builder shared by the integration tests.
#![allow(dead_code)]

use std::io::Cursor;

use fa_reader::{FaFile, ReadOnly, ReadWrite};

pub const WORD: usize = 8;

pub enum Slot {
    Field(String, Vec<u8>),
    Hole(Vec<u8>),
}

/// Lays out sector 0 (header + chain table), the index sequences in
/// consecutive name/location sector pairs, then the data sectors.
pub struct FaBuilder {
    sector_size: u64,
    per_sequence: u64,
    slots: Vec<Slot>,
    declared_holes: Option<u64>,
    header_overrides: Vec<(usize, u64)>,
}

pub struct Image {
    pub bytes: Vec<u8>,
    /// 0-based start sector of every index sequence, ascending.
    pub block_starts: Vec<u64>,
    /// `(offset, length)` in bytes per slot, in slot order.
    pub locations: Vec<(u64, u64)>,
}

impl FaBuilder {
    pub fn new(sector_size: u64, per_sequence: u64) -> Self {
        Self {
            sector_size,
            per_sequence,
            slots: Vec::new(),
            declared_holes: None,
            header_overrides: Vec::new(),
        }
    }

    pub fn field(mut self, name: &str, payload: Vec<u8>) -> Self {
        self.slots.push(Slot::Field(name.to_string(), payload));
        self
    }

    pub fn hole(mut self, words: usize) -> Self {
        self.slots.push(Slot::Hole(vec![0u8; words * WORD]));
        self
    }

    /// Adds `count` filler fields named `F0000`, `F0001`, ... of one word each.
    pub fn fillers(mut self, count: usize) -> Self {
        for i in 0..count {
            let name = format!("F{:04}", i);
            self.slots.push(Slot::Field(name, words(&[i as u64])));
        }
        self
    }

    pub fn declared_holes(mut self, holes: u64) -> Self {
        self.declared_holes = Some(holes);
        self
    }

    pub fn header_word(mut self, index: usize, value: u64) -> Self {
        self.header_overrides.push((index, value));
        self
    }

    pub fn build(self) -> Image {
        let sector_bytes = self.sector_size as usize * WORD;
        let n = self.slots.len() as u64;
        let extra = if n <= self.per_sequence { 0 } else { n / self.per_sequence };
        let block_count = extra + 1;

        let block_starts: Vec<u64> = (0..block_count).map(|k| 1 + 2 * k).collect();
        let data_start = (1 + 2 * block_count) as usize * sector_bytes;

        // Data region
        let mut data = Vec::new();
        let mut locations = Vec::new();
        for slot in &self.slots {
            let payload = match slot {
                Slot::Field(_, p) | Slot::Hole(p) => p,
            };
            let offset = (data_start + data.len()) as u64;
            data.extend_from_slice(payload);
            while data.len() % WORD != 0 {
                data.push(0);
            }
            let length = (payload.len().div_ceil(WORD) * WORD) as u64;
            locations.push((offset, length));
        }
        while data.len() % sector_bytes != 0 {
            data.push(0);
        }

        let total_len = data_start + data.len();
        let mut bytes = vec![0u8; total_len];
        bytes[data_start..].copy_from_slice(&data);

        // Index sequences
        let mut slot_index = 0usize;
        for (k, &start) in block_starts.iter().enumerate() {
            let count = if (k as u64) < extra {
                self.per_sequence
            } else {
                n % self.per_sequence.max(1)
            };
            let count = if extra == 0 { n } else { count };
            let names_at = start as usize * sector_bytes;
            let locs_at = (start as usize + 1) * sector_bytes;
            for j in 0..count as usize {
                let (name_bytes, (offset, length)) = match &self.slots[slot_index] {
                    Slot::Field(name, _) => (padded(name), locations[slot_index]),
                    Slot::Hole(_) => ([b' '; 16], locations[slot_index]),
                };
                bytes[names_at + 16 * j..names_at + 16 * (j + 1)].copy_from_slice(&name_bytes);
                put(&mut bytes, locs_at + 16 * j, length / WORD as u64);
                put(&mut bytes, locs_at + 16 * j + 8, offset / WORD as u64 + 1);
                slot_index += 1;
            }
        }

        // Chain table, 1-based sectors, newest first
        for (i, &start) in block_starts[1..].iter().rev().enumerate() {
            let at = (self.sector_size as usize - extra as usize + i) * WORD;
            put(&mut bytes, at, start + 1);
        }

        // Header
        let holes = self.slots.iter().filter(|s| matches!(s, Slot::Hole(_))).count() as u64;
        let lengths: Vec<u64> = locations.iter().map(|&(_, l)| l / WORD as u64).collect();
        let sectors = (total_len / sector_bytes) as u64;
        let mut header = [
            self.sector_size,
            16,
            0,
            22,
            sectors,
            n,
            lengths.iter().copied().min().unwrap_or(0),
            lengths.iter().copied().max().unwrap_or(0),
            lengths.iter().sum(),
            0,
            0,
            0,
            self.per_sequence,
            20240115,
            120000,
            20240116,
            130500,
            20240115,
            120001,
            1,
            self.declared_holes.unwrap_or(holes),
            sectors - 1 - 2 * block_count,
        ];
        for &(i, v) in &self.header_overrides {
            header[i] = v;
        }
        for (i, &w) in header.iter().enumerate() {
            put(&mut bytes, i * WORD, w);
        }

        Image {
            bytes,
            block_starts,
            locations,
        }
    }
}

impl Image {
    pub fn open(&self) -> FaFile<ReadOnly, Cursor<Vec<u8>>> {
        FaFile::from_handle(Cursor::new(self.bytes.clone())).expect("open image")
    }

    pub fn open_rw(&self) -> FaFile<ReadWrite, Cursor<Vec<u8>>> {
        FaFile::from_handle(Cursor::new(self.bytes.clone())).expect("open image")
    }
}

pub fn put(bytes: &mut [u8], at: usize, value: u64) {
    bytes[at..at + WORD].copy_from_slice(&value.to_be_bytes());
}

pub fn words(values: &[u64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

pub fn signed_words(values: &[i64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

fn padded(name: &str) -> [u8; 16] {
    let mut out = [b' '; 16];
    out[..name.len()].copy_from_slice(name.as_bytes());
    out
}
