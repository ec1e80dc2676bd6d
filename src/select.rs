// src/select.rs
// Pick "the" offer table: every row of every table is a header candidate;
// the candidate mapping the most columns wins, first seen on ties.

use crate::config::aliases::AliasTable;
use crate::config::consts::{SAMPLE_CELLS, SAMPLE_TABLES};
use crate::error::{OfferError, Result};
use crate::extract::{Row, Table};
use crate::headers::{HeaderMapping, HeaderResolver};

/// A table/header-row pair together with its resolved mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'t> {
    pub table_index: usize,
    pub table: &'t Table,
    pub header_row: usize,
    pub mapping: HeaderMapping,
}

impl<'t> Selection<'t> {
    pub fn header(&self) -> &'t Row {
        &self.table.rows[self.header_row]
    }

    /// Rows strictly after the header row.
    pub fn data_rows(&self) -> &'t [Row] {
        &self.table.rows[self.header_row + 1..]
    }
}

/// Every (table, row) pair in document order, resolved as a header.
pub fn candidates<'t, 'a>(
    tables: &'t [Table],
    resolver: &'a HeaderResolver<'a>,
) -> impl Iterator<Item = Selection<'t>> {
    tables.iter().enumerate().flat_map(move |(table_index, table)| {
        table.rows.iter().enumerate().map(move |(header_row, row)| Selection {
            table_index,
            table,
            header_row,
            mapping: resolver.resolve(row.as_slice()),
        })
    })
}

/// Fold keeping the first item with the strictly greatest key.
pub fn first_max_by_key<T, K, I, F>(items: I, key: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    K: Ord,
    F: Fn(&T) -> K,
{
    items
        .into_iter()
        .fold(None, |best: Option<(K, T)>, item| {
            let k = key(&item);
            match best {
                Some((best_k, best_item)) if k <= best_k => Some((best_k, best_item)),
                _ => Some((k, item)),
            }
        })
        .map(|(_, item)| item)
}

/// Best candidate that maps at least one column.
pub fn pick_best<'t, I>(candidates: I) -> Option<Selection<'t>>
where
    I: IntoIterator<Item = Selection<'t>>,
{
    first_max_by_key(
        candidates.into_iter().filter(|c| !c.mapping.is_empty()),
        |c| c.mapping.len(),
    )
}

pub fn select_best<'t>(tables: &'t [Table], aliases: &AliasTable) -> Result<Selection<'t>> {
    if tables.is_empty() {
        return Err(OfferError::NoOfferTable);
    }
    let resolver = HeaderResolver::new(aliases);
    let best = pick_best(candidates(tables, &resolver)).ok_or_else(|| {
        OfferError::HeaderResolutionFailed {
            tables: tables.len(),
            sample: sample_rows(tables),
        }
    })?;

    logf!(
        table = best.table_index,
        header_row = best.header_row,
        mapped = best.mapping.len(),
        "offer table selected"
    );
    Ok(best)
}

/// First row of the first few tables, for the operator.
fn sample_rows(tables: &[Table]) -> Vec<String> {
    tables
        .iter()
        .take(SAMPLE_TABLES)
        .filter_map(|t| t.rows.first())
        .map(|row| {
            row.iter()
                .take(SAMPLE_CELLS)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect()
}
