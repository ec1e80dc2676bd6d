//! # Table extraction
//!
//! Turns raw HTML text into tables of trimmed cell text. Two interchangeable
//! implementations sit behind [`TableExtractor`]:
//!
//! - [`ScanExtractor`]: hand-rolled streaming tag scanner over
//!   [`core::html::Tokens`](crate::core::html::Tokens). Always available.
//! - `TreeExtractor`: builds a full markup tree with `scraper` (html5ever) and
//!   walks it. Compiled in with the `tree` feature.
//!
//! [`probe`] picks the default; callers hold a `Box<dyn TableExtractor>` and
//! never branch on which one they got.
//!
//! ## Shared conventions
//! - Output order is document order.
//! - Only top-level `<table>` elements become tables. A row belongs to its
//!   nearest enclosing table; the text of a table nested inside a cell is
//!   flattened into that outer cell.
//! - Cell text is the concatenation of all descendant text, whitespace runs
//!   collapsed to one space and trimmed.
//! - Rows with zero cells and tables with zero rows are dropped.
//!
//! ## Broken markup
//! The scanner follows the recovery rules in `scan.rs`: a row never closed
//! with `</tr>` is dropped, so a truncated page loses its partial last row
//! instead of reporting half an offer. The tree applies HTML5 error recovery
//! and keeps such rows. That is why [`probe`] returns the scanner; the tree is
//! only used when asked for by name. On well-formed input they agree.

mod scan;
#[cfg(feature = "tree")]
mod tree;

use std::fmt;
use std::str::FromStr;

pub use scan::ScanExtractor;
#[cfg(feature = "tree")]
pub use tree::TreeExtractor;

/// One table row: cell texts in column order.
pub type Row = Vec<String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Table-extraction capability. Implementations are pure: no I/O, no state
/// kept between calls.
pub trait TableExtractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, html: &str) -> Vec<Table>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractorKind {
    /// Whatever [`probe`] returns.
    #[default]
    Auto,
    Scan,
    Tree,
}

impl FromStr for ExtractorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "scan" => Ok(Self::Scan),
            "tree" => Ok(Self::Tree),
            other => Err(format!("unknown extractor: {other} (expected auto, scan or tree)")),
        }
    }
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Scan => "scan",
            Self::Tree => "tree",
        })
    }
}

/// Default strategy: the scanner, the one that drops rows left open by a
/// truncated page.
pub fn probe() -> Box<dyn TableExtractor> {
    let extractor: Box<dyn TableExtractor> = Box::new(ScanExtractor);
    logd!(extractor = extractor.name(), "table extractor selected by probe");
    extractor
}

/// A specific strategy, or `None` when it is not compiled in.
pub fn by_kind(kind: ExtractorKind) -> Option<Box<dyn TableExtractor>> {
    match kind {
        ExtractorKind::Auto => Some(probe()),
        ExtractorKind::Scan => Some(Box::new(ScanExtractor)),
        #[cfg(feature = "tree")]
        ExtractorKind::Tree => Some(Box::new(TreeExtractor)),
        #[cfg(not(feature = "tree"))]
        ExtractorKind::Tree => None,
    }
}

/// Extract with whatever [`probe`] selects.
pub fn extract_tables(html: &str) -> Vec<Table> {
    probe().extract(html)
}
