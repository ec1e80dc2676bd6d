// src/diff.rs
// Run-to-run comparison of pair sets and its human-readable report.

use std::fmt;

use crate::config::consts::{ADDED_HEADING, ADDED_MARK, NO_CHANGES, REMOVED_HEADING, REMOVED_MARK};
use crate::pairs::{Pair, PairSet};

/// Pairs that appeared (`added`) and disappeared (`removed`) since the
/// previous run. Built once by [`compare`]; read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonResult {
    added: PairSet,
    removed: PairSet,
}

impl ComparisonResult {
    pub fn added(&self) -> &PairSet {
        &self.added
    }

    pub fn removed(&self) -> &PairSet {
        &self.removed
    }

    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }

    /// Report text: the fixed no-changes sentence, or a "new" section then a
    /// "removed" section, each sorted by (domain, sale), blank line between.
    pub fn render(&self) -> String {
        if !self.has_changes() {
            return s!(NO_CHANGES);
        }
        let mut lines: Vec<String> = Vec::new();
        if !self.added.is_empty() {
            lines.push(s!(ADDED_HEADING));
            lines.extend(section(&self.added, ADDED_MARK));
        }
        if !self.removed.is_empty() {
            if !lines.is_empty() {
                lines.push(s!());
            }
            lines.push(s!(REMOVED_HEADING));
            lines.extend(section(&self.removed, REMOVED_MARK));
        }
        lines.join("\n")
    }
}

// PairSet iterates in (domain, sale) order already.
fn section<'a>(pairs: &'a PairSet, mark: &'a str) -> impl Iterator<Item = String> + 'a {
    pairs.iter().map(move |p: &Pair| format!("{mark} {p}"))
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// `added = current − previous`, `removed = previous − current`.
pub fn compare(current: &PairSet, previous: &PairSet) -> ComparisonResult {
    ComparisonResult {
        added: current.difference(previous).cloned().collect(),
        removed: previous.difference(current).cloned().collect(),
    }
}

pub fn format_comparison(result: &ComparisonResult) -> String {
    result.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pairs: &[(&str, &str)]) -> PairSet {
        pairs.iter().map(|(d, s)| Pair::new(*d, *s)).collect()
    }

    #[test]
    fn both_sections_with_blank_line() {
        let r = compare(&set(&[("b.com", "7%"), ("a.com", "1%")]), &set(&[("c.com", "2%")]));
        assert_eq!(
            r.render(),
            "Новые пары (domain + sale):\n\
             + a.com | 1%\n\
             + b.com | 7%\n\
             \n\
             Удаленные пары (domain + sale):\n\
             - c.com | 2%"
        );
    }

    #[test]
    fn only_removed_section() {
        let r = compare(&set(&[]), &set(&[("a.com", "5%")]));
        assert_eq!(r.to_string(), "Удаленные пары (domain + sale):\n- a.com | 5%");
    }

    #[test]
    fn unchanged_is_fixed_sentence() {
        let s = set(&[("a.com", "5%")]);
        let r = compare(&s, &s);
        assert!(!r.has_changes());
        assert_eq!(format_comparison(&r), NO_CHANGES);
    }
}
