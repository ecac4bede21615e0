//! Data access for wind-farm configuration tables.
//!
//! Checks never query a database directly; they go through the
//! [`ConfigSource`] trait. Two implementations ship with the crate:
//!
//! - [`CsvDirectorySource`]: one CSV export per table in a directory
//! - [`MemorySource`]: records held in memory, for tests and tooling

mod csv_source;
mod error;
mod memory;
mod source;

pub use csv_source::CsvDirectorySource;
pub use error::{Result, SourceError};
pub use memory::MemorySource;
pub use source::ConfigSource;
