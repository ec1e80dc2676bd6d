// src/lib.rs
// Offer catalog ingestion: HTML tables in, normalized offers and a pair diff out.

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;

pub mod coerce;
pub mod diff;
pub mod extract;
pub mod headers;
pub mod pairs;
pub mod records;
pub mod runner;
pub mod select;

pub use config::aliases::{AliasTable, CanonicalField};
pub use diff::{compare, ComparisonResult};
pub use error::{ConfigError, OfferError, RowsError};
pub use extract::{extract_tables, Row, Table, TableExtractor};
pub use pairs::{Pair, PairCounts, PairSet};
pub use records::OfferRecord;
pub use runner::{Pipeline, RunReport};
