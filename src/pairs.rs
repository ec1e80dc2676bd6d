// src/pairs.rs
// (domain, sale) identity pairs used to tell one run from the next.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::config::aliases::CanonicalField;
use crate::config::consts::PAIR_SEP;
use crate::records::OfferRecord;

/// Ordered by domain, then sale.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Pair {
    pub domain: String,
    pub sale: String,
}

impl Pair {
    pub fn new(domain: impl Into<String>, sale: impl Into<String>) -> Self {
        Self { domain: domain.into(), sale: sale.into() }
    }

    /// Both components empty: carries no identity.
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty() && self.sale.is_empty()
    }

    pub fn from_record(record: &OfferRecord) -> Option<Self> {
        Some(Self::new(record.domain(), record.sale())).filter(|p| !p.is_empty())
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{PAIR_SEP}{}", self.domain, self.sale)
    }
}

pub type PairCounts = BTreeMap<Pair, usize>;
pub type PairSet = BTreeSet<Pair>;

/// Occurrences of each non-empty pair. Counts are for diagnostics only; the
/// diff works on the key set.
pub fn reduce_pairs(records: &[OfferRecord]) -> PairCounts {
    let mut counts = PairCounts::new();
    for pair in records.iter().filter_map(Pair::from_record) {
        *counts.entry(pair).or_default() += 1;
    }
    for (pair, n) in counts.iter().filter(|(_, n)| **n > 1) {
        logd!(pair = %pair, count = n, "duplicate pair");
    }
    counts
}

pub fn key_set(counts: &PairCounts) -> PairSet {
    counts.keys().cloned().collect()
}

/// Pairs from rows persisted in canonical column order (domain at 2, sale
/// at 4). Rows too short to hold a sale are skipped.
pub fn pairs_from_rows(rows: &[Vec<String>]) -> PairSet {
    let domain = CanonicalField::Domain.index();
    let sale = CanonicalField::Sale.index();
    rows.iter()
        .filter(|row| row.len() > sale)
        .map(|row| Pair::new(row[domain].as_str(), row[sale].as_str()))
        .filter(|p| !p.is_empty())
        .collect()
}
