//! Foundational data structures, error types, and access-mode definitions.

pub mod access;
pub mod error;
pub mod models;
