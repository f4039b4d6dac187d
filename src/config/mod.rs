//! Configuration constants
//!
//! Fixed platform restrictions, cache settings, and default locations.

pub mod defaults;
pub mod urls;
