//! File format parsing layer for FA files.
//!
//! This module provides the mid-level parsing layer that bridges between
//! raw file I/O and the high-level [`FaFile`](crate::fa::reader::FaFile).
//!
//! # Module Organization
//!
//! - [`header`]: Parses and validates the 22-word header
//! - [`index`]: Resolves single and chained index sequences
//! - [`catalog`]: Builds the field name -> location map and the hole set
//! - [`content`]: Reads exact byte ranges of fields
//!
//! # Architecture
//!
//! ```text
//! File Structure (sector = sector_size words):
//! ┌──────────────────────┐
//! │ sector 0: header     │ ← header::parse()
//! │   ... chain table    │ ← index::resolve()
//! ├──────────────────────┤
//! │ sector 1: names      │ ← catalog::build()
//! │ sector 2: locations  │
//! ├──────────────────────┤
//! │ data sectors,        │ ← content::read_field()
//! │ further index pairs  │
//! └──────────────────────┘
//! ```

pub mod catalog;
pub mod content;
pub mod header;
pub mod index;
