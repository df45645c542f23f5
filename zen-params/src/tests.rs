//! Shared test utilities.

pub mod util;
