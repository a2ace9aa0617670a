//! Core FA reader module

pub mod domain;
pub mod format;
pub mod patch;
pub mod reader;
pub mod types;
pub mod utils;
