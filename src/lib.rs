//! # fa-reader
//!
//! A reader for FA files, the sector-organised container in which numerical
//! weather models store their fields.
//! Resolves the chained index, catalogs fields by name, reads raw field bytes
//! and decodes forecast date/time, grid-point/spectral representation and
//! domain geometry. One scalar patch is supported on write-capable handles.
pub mod fa;

// Re-export the main types for convenience
pub use fa::{
    domain::{Dimensions, Domain, DomainKind, ForecastTime, LamFrame, LeadTime, Representation, TimeSource},
    format::catalog::FieldCatalog,
    patch::PatchOutcome,
    reader::FaFile,
    types::{
        access::{Access, AccessMode, ReadOnly, ReadWrite},
        error::{ConsistencyWarning, FaError, Result},
        models::{FieldEntry, FieldLocation, Header, Hole, IndexBlock, LeadUnit, Stamp},
    },
};
