//! Loading federal bracket schedules from CSV into [`tax_core::TaxTables`].

mod loader;

pub use loader::{BracketLoaderError, BracketRecord, BracketTableLoader};
