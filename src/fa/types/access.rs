//! Access-mode specialization for FA handles (read-only vs read-write).

use std::fs::OpenOptions;

/// Runtime view of a handle's access mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    ReadWrite,
}

impl AccessMode {
    pub fn is_writable(&self) -> bool {
        matches!(self, AccessMode::ReadWrite)
    }
}

/// A trait that defines how a handle of a given access mode is opened.
pub trait Access {
    /// A short name used for debugging and logging.
    const DEBUG_NAME: &'static str;

    /// Mode checked by mutating operations before any side effect.
    const MODE: AccessMode;

    /// Options used to open a file path with this access mode.
    fn open_options() -> OpenOptions;
}

/// Zero-cost marker struct for read-only handles.
#[derive(Debug)]
pub struct ReadOnly;

impl Access for ReadOnly {
    const DEBUG_NAME: &'static str = "read-only";
    const MODE: AccessMode = AccessMode::ReadOnly;

    fn open_options() -> OpenOptions {
        let mut options = OpenOptions::new();
        options.read(true);
        options
    }
}

/// Zero-cost marker struct for write-capable handles.
#[derive(Debug)]
pub struct ReadWrite;

impl Access for ReadWrite {
    const DEBUG_NAME: &'static str = "read-write";
    const MODE: AccessMode = AccessMode::ReadWrite;

    fn open_options() -> OpenOptions {
        let mut options = OpenOptions::new();
        options.read(true).write(true);
        options
    }
}
