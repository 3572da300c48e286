//! Shared infrastructure for the directory aggregates.

pub mod error;
pub mod ids;
