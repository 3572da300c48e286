//! Cloudmock shared utilities.

pub mod logging;
