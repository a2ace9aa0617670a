use std::borrow::Cow;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::marker::PhantomData;
use std::path::Path;

use log::info;

use super::domain::{self, Domain, ForecastTime, Representation};
use super::format::{self, catalog::FieldCatalog, content};
use super::patch::{self, PatchOutcome};
use super::types::access::{Access, AccessMode, ReadOnly};
use super::types::error::Result;
use super::types::models::{FieldLocation, Header};

/// An open FA file together with its parsed header.
///
/// The access mode is part of the type: `FaFile<ReadOnly>` (the default) can
/// decode everything, only `FaFile<ReadWrite>` may patch. The header is read
/// once when the handle is opened. The field catalog is not cached: every
/// query given `None` rebuilds it, so callers doing several queries should
/// build it once with [`catalog`](Self::catalog) and pass it along.
///
/// All I/O goes through one handle whose position is shared state, hence
/// `&mut self` everywhere.
#[derive(Debug)]
pub struct FaFile<A: Access = ReadOnly, R = File> {
    handle: R,
    header: Header,
    _access: PhantomData<A>,
}

impl<A: Access> FaFile<A, File> {
    /// Opens an FA file from the given path with access mode `A`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - File cannot be opened with the requested access
    /// - The header is not a regular FA header
    /// - The chained index table is malformed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening FA file ({}): {}", A::DEBUG_NAME, path.display());
        let file = A::open_options().open(path)?;
        Self::from_handle(file)
    }
}

impl<A: Access, R: Read + Seek> FaFile<A, R> {
    /// Wraps an already-open handle and parses its header.
    pub fn from_handle(mut handle: R) -> Result<Self> {
        let header = format::header::parse(&mut handle)?;
        Ok(Self {
            handle,
            header,
            _access: PhantomData,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn access_mode(&self) -> AccessMode {
        A::MODE
    }

    /// Builds a fresh field catalog from the index.
    pub fn catalog(&mut self) -> Result<FieldCatalog> {
        format::catalog::build(&mut self.handle, &self.header)
    }

    /// Reads exactly the bytes of a resolved location.
    pub fn read_field(&mut self, location: &FieldLocation) -> Result<Vec<u8>> {
        content::read_field(&mut self.handle, location)
    }

    /// Reads the payload of a named field.
    pub fn read_named(&mut self, name: &str, catalog: Option<&FieldCatalog>) -> Result<Vec<u8>> {
        let catalog = self.resolve_catalog(catalog)?;
        let location = catalog.require(name)?.location;
        self.read_field(&location)
    }

    /// Decodes the forecast base date/time and lead time.
    pub fn forecast_time(&mut self, catalog: Option<&FieldCatalog>) -> Result<ForecastTime> {
        let catalog = self.resolve_catalog(catalog)?;
        domain::date::decode(&mut self.handle, &catalog)
    }

    /// Probes whether `field` is stored as grid-point or spectral data.
    pub fn representation(&mut self, field: &str, catalog: Option<&FieldCatalog>) -> Result<Representation> {
        let catalog = self.resolve_catalog(catalog)?;
        domain::representation::probe(&mut self.handle, &catalog, field)
    }

    /// Decodes the model domain geometry.
    pub fn domain(&mut self, catalog: Option<&FieldCatalog>) -> Result<Domain> {
        let catalog = self.resolve_catalog(catalog)?;
        domain::geometry::decode(&mut self.handle, &catalog)
    }

    /// Gives the underlying handle back.
    pub fn into_inner(self) -> R {
        self.handle
    }

    fn resolve_catalog<'c>(&mut self, catalog: Option<&'c FieldCatalog>) -> Result<Cow<'c, FieldCatalog>> {
        match catalog {
            Some(catalog) => Ok(Cow::Borrowed(catalog)),
            None => Ok(Cow::Owned(self.catalog()?)),
        }
    }
}

impl<A: Access, R: Read + Write + Seek> FaFile<A, R> {
    /// Overwrites word `word_offset` of `field` with `new_value`.
    ///
    /// On a read-only handle this fails with
    /// [`FaError::PermissionDenied`](crate::FaError::PermissionDenied) before
    /// touching the file, including before any catalog is built.
    pub fn patch_scalar(
        &mut self,
        field: &str,
        word_offset: u64,
        new_value: u64,
        catalog: Option<&FieldCatalog>,
    ) -> Result<PatchOutcome> {
        patch::ensure_writable(A::MODE, field)?;
        let catalog = self.resolve_catalog(catalog)?;
        patch::patch_scalar(&mut self.handle, A::MODE, &catalog, field, word_offset, new_value)
    }
}
