// src/runner.rs
// One run of the offer pipeline:
//   extract → select → build → (coerce) → reduce → compare → render
// Pure over its inputs; safe to share across threads.

use crate::coerce::{coerce_record, CoercedOffer};
use crate::config::aliases::AliasTable;
use crate::config::options::Variant;
use crate::diff::{compare, ComparisonResult};
use crate::error::Result;
use crate::extract::{self, TableExtractor};
use crate::pairs::{key_set, reduce_pairs, PairCounts, PairSet};
use crate::records::{build_records, offers_to_rows, OfferRecord};
use crate::select::select_best;

pub struct Pipeline {
    aliases: AliasTable,
    extractor: Box<dyn TableExtractor>,
    variant: Variant,
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Offers in their final text form (post-coercion in the coercing variant).
    pub offers: Vec<OfferRecord>,
    /// Typed values, present in the coercing variant only.
    pub coerced: Option<Vec<CoercedOffer>>,
    pub counts: PairCounts,
    pub comparison: ComparisonResult,
    pub message: String,
}

impl RunReport {
    pub fn current_pairs(&self) -> PairSet {
        key_set(&self.counts)
    }

    /// Offers as persisted rows (canonical column order).
    pub fn rows(&self) -> Vec<Vec<String>> {
        offers_to_rows(&self.offers)
    }
}

impl Pipeline {
    pub fn new(aliases: AliasTable, extractor: Box<dyn TableExtractor>) -> Self {
        Self { aliases, extractor, variant: Variant::Raw }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn extractor_name(&self) -> &'static str {
        self.extractor.name()
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Raw offer records from one HTML document.
    pub fn parse_offers(&self, html: &str) -> Result<Vec<OfferRecord>> {
        let tables = self.extractor.extract(html);
        logd!(tables = tables.len(), extractor = self.extractor.name(), "tables extracted");

        let selection = select_best(&tables, &self.aliases)?;
        build_records(selection.table, &selection.mapping, selection.header_row)
    }

    pub fn run(&self, html: &str, previous: &PairSet) -> Result<RunReport> {
        let raw = self.parse_offers(html).inspect_err(|e| loge!("offer parsing failed: {e}"))?;

        let (offers, coerced) = match self.variant {
            Variant::Raw => (raw, None),
            Variant::Coerced => {
                let typed: Vec<CoercedOffer> = raw.iter().map(coerce_record).collect();
                (typed.iter().map(CoercedOffer::to_record).collect(), Some(typed))
            }
        };

        let counts = reduce_pairs(&offers);
        let comparison = compare(&key_set(&counts), previous);
        logf!(
            offers = offers.len(),
            pairs = counts.len(),
            added = comparison.added().len(),
            removed = comparison.removed().len(),
            "run compared with previous pairs"
        );
        let message = comparison.render();

        Ok(RunReport { offers, coerced, counts, comparison, message })
    }
}

impl Default for Pipeline {
    /// Built-in aliases and the probe's extractor.
    fn default() -> Self {
        Self::new(AliasTable::builtin(), extract::probe())
    }
}
