// src/headers.rs
// Header resolution: one candidate header row → column index to canonical field.
//
// Per column, after normalizing (lower-case, non-word runs → one space):
//   1. exact match against any alias, first field in declaration order wins
//   2. otherwise the first field with an alias contained in the header
// A column maps to at most one field. Nothing here fails; an empty mapping
// is for the table selector to judge.

use std::collections::BTreeMap;

use crate::config::aliases::{AliasTable, CanonicalField};
use crate::core::sanitize::normalize_key;

/// Partial column → field mapping for one table. Unmapped columns are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMapping {
    columns: BTreeMap<usize, CanonicalField>,
}

impl HeaderMapping {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, column: usize) -> Option<CanonicalField> {
        self.columns.get(&column).copied()
    }

    /// Mapped columns in ascending column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, CanonicalField)> + '_ {
        self.columns.iter().map(|(&c, &f)| (c, f))
    }
}

impl FromIterator<(usize, CanonicalField)> for HeaderMapping {
    fn from_iter<I: IntoIterator<Item = (usize, CanonicalField)>>(iter: I) -> Self {
        Self { columns: iter.into_iter().collect() }
    }
}

pub struct HeaderResolver<'a> {
    aliases: &'a AliasTable,
}

impl<'a> HeaderResolver<'a> {
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self { aliases }
    }

    pub fn resolve<S: AsRef<str>>(&self, cells: &[S]) -> HeaderMapping {
        cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| {
                let field = self.resolve_one(cell.as_ref());
                if field.is_none() {
                    logd!(column = idx, header = cell.as_ref(), "unmatched header");
                }
                field.map(|f| (idx, f))
            })
            .collect()
    }

    pub fn resolve_one(&self, header: &str) -> Option<CanonicalField> {
        let key = normalize_key(header);
        if key.is_empty() {
            return None;
        }
        self.aliases
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|a| *a == key))
            .or_else(|| {
                self.aliases
                    .iter()
                    .find(|(_, aliases)| aliases.iter().any(|a| key.contains(a.as_str())))
            })
            .map(|(field, _)| field)
    }
}

/// Resolve one header row against `aliases`.
pub fn resolve_headers<S: AsRef<str>>(aliases: &AliasTable, cells: &[S]) -> HeaderMapping {
    HeaderResolver::new(aliases).resolve(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use CanonicalField::*;

    fn resolve(cells: &[&str]) -> Vec<(usize, CanonicalField)> {
        resolve_headers(&AliasTable::builtin(), cells).iter().collect()
    }

    #[test]
    fn bilingual_header_row_maps_all_ten() {
        let cells = [
            "Offer ID", "Сайт", "Домен", "Категория", "Продажа", "Условия",
            "Motivation Amount", "Offer Duration, days", "Юридическое лицо", "Green Probability",
        ];
        let got = resolve(&cells);
        assert_eq!(got.len(), 10);
        assert_eq!(got.iter().map(|(_, f)| *f).collect::<Vec<_>>(), CanonicalField::ALL);
    }

    #[test]
    fn no_alias_match_yields_empty_mapping() {
        assert!(resolve(&["Not", "Relevant", "", "   "]).is_empty());
    }

    #[test]
    fn exact_match_beats_earlier_substring() {
        // exact matching runs over every field before any substring check
        let aliases = AliasTable::empty()
            .with_aliases(Site, ["green"])
            .with_aliases(GreenProbability, ["green site"]);
        let r = HeaderResolver::new(&aliases);
        assert_eq!(r.resolve_one("Green site"), Some(GreenProbability));
        assert_eq!(r.resolve_one("Green site total"), Some(Site));
    }

    #[test]
    fn substring_takes_first_field_in_declaration_order() {
        assert_eq!(resolve(&["Скидка партнёра"]), vec![(0, Sale)]);
        assert_eq!(resolve(&["Legal entity"]), vec![(0, LegalName)]);
    }

    #[test]
    fn alias_must_be_inside_header_not_the_reverse() {
        let aliases = AliasTable::empty().with_aliases(Domain, ["domain name"]);
        assert!(resolve_headers(&aliases, &["domain"]).is_empty());
    }

    #[test]
    fn custom_table_swaps_without_globals() {
        let aliases = AliasTable::empty().with_aliases(Domain, ["host"]);
        let m = resolve_headers(&aliases, &["Домен", "Host"]);
        assert_eq!(m.get(0), None);
        assert_eq!(m.get(1), Some(Domain));
    }
}
