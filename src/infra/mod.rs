//! Infrastructure layer
//!
//! Handles all I/O operations: fetching release index documents, reading
//! Debian repository indexes, and dispatching jobs to the build backend.
//! This module is the only place where side effects occur.

pub mod dispatch;
pub mod index;
pub mod repo_index;
