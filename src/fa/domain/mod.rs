//! Decoders for the few FA fields that have a fixed schema.
//!
//! - [`date`]: forecast base date/time and lead time
//! - [`representation`]: grid-point vs spectral probe of any field
//! - [`geometry`]: global or limited-area domain dimensions
//!
//! Each decoder takes an already-built catalog; [`FaFile`](crate::FaFile)
//! builds one on demand when the caller does not supply it.

pub mod date;
pub mod geometry;
pub mod representation;

pub use date::{ForecastTime, LeadTime, TimeSource};
pub use geometry::{Dimensions, Domain, DomainKind, LamFrame};
pub use representation::Representation;
