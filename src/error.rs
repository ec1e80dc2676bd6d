// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, OfferError>;

/// Fatal pipeline conditions. None of them is retried here; each one means
/// the page or the alias table needs a human look.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OfferError {
    /// The document holds no table at all (error page, placeholder, redesign).
    #[error("no tables found on the page; page structure may have changed")]
    NoOfferTable,

    /// Tables exist but not a single column matched an alias.
    #[error(
        "unable to map table headers to expected fields in {tables} table(s); \
         update the alias table (first rows seen: {sample:?})"
    )]
    HeaderResolutionFailed { tables: usize, sample: Vec<String> },

    /// A header row was chosen but nothing below it carried data.
    #[error("parsed table but found no offer rows below header row {header_row} ({header:?}, {scanned} row(s) scanned)")]
    NoOfferRows {
        header_row: usize,
        header: Vec<String>,
        scanned: usize,
    },
}

/// Problems loading an alias table from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read alias file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid alias config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown canonical field in alias config: '{0}'")]
    UnknownField(String),
}

/// Problems reading or writing persisted offer rows.
#[derive(Debug, Error)]
pub enum RowsError {
    #[error("cannot access offer rows at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed offer rows: {0}")]
    Csv(#[from] ::csv::Error),
}
