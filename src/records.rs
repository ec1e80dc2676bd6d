// src/records.rs
// Offer records: the selected table's data rows, one value per canonical field.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::aliases::CanonicalField;
use crate::error::{OfferError, Result};
use crate::extract::{Row, Table};
use crate::headers::HeaderMapping;

/// One catalog entry. Always carries all ten fields; missing data is "".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OfferRecord {
    values: [String; CanonicalField::COUNT],
}

impl OfferRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: CanonicalField) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: CanonicalField, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    pub fn with(mut self, field: CanonicalField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn domain(&self) -> &str {
        self.get(CanonicalField::Domain)
    }

    pub fn sale(&self) -> &str {
        self.get(CanonicalField::Sale)
    }

    /// True when no field carries any text.
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(String::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        CanonicalField::ALL.into_iter().map(|f| (f, self.get(f)))
    }

    /// Values in persisted column order.
    pub fn to_row(&self) -> Row {
        self.values.to_vec()
    }
}

impl Serialize for OfferRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CanonicalField::COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}

/// Map one data row. Returns `None` when every mapped cell is empty.
/// Cells past the row's end or in unmapped columns are ignored; when two
/// columns map to the same field the leftmost one keeps it.
pub fn build_record(row: &[String], mapping: &HeaderMapping) -> Option<OfferRecord> {
    let mut record = OfferRecord::new();
    let mut filled = [false; CanonicalField::COUNT];
    for (column, field) in mapping.iter() {
        let Some(cell) = row.get(column) else { continue };
        if std::mem::replace(&mut filled[field.index()], true) {
            continue;
        }
        record.set(field, cell.as_str());
    }
    (!record.is_blank()).then_some(record)
}

/// Records for every row strictly below `header_row`.
pub fn build_records(table: &Table, mapping: &HeaderMapping, header_row: usize) -> Result<Vec<OfferRecord>> {
    let data = table.rows.get(header_row + 1..).unwrap_or_default();
    let records: Vec<OfferRecord> = data.iter().filter_map(|row| build_record(row, mapping)).collect();

    let dropped = data.len() - records.len();
    if dropped > 0 {
        logd!(dropped, "rows without any mapped value dropped");
    }
    if records.is_empty() {
        return Err(OfferError::NoOfferRows {
            header_row,
            header: table.rows.get(header_row).cloned().unwrap_or_default(),
            scanned: data.len(),
        });
    }
    logf!(records = records.len(), "offer records built");
    Ok(records)
}

/// Canonical field names, the header row of persisted offers.
pub fn field_names() -> Row {
    CanonicalField::ALL.iter().map(|f| s!(f.name())).collect()
}

/// Records as rows in canonical column order.
pub fn offers_to_rows(records: &[OfferRecord]) -> Vec<Row> {
    records.iter().map(OfferRecord::to_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use CanonicalField::*;

    fn mapping(pairs: &[(usize, CanonicalField)]) -> HeaderMapping {
        pairs.iter().copied().collect()
    }

    #[test]
    fn unmapped_fields_are_empty_strings() {
        let rec = build_record(&row!["x", "a.com"], &mapping(&[(1, Domain)])).unwrap();
        assert_eq!(rec.domain(), "a.com");
        assert_eq!(rec.get(Id), "");
        assert_eq!(rec.to_row().len(), 10);
    }

    #[test]
    fn row_with_only_unmapped_data_is_dropped() {
        assert_eq!(build_record(&row!["junk", ""], &mapping(&[(1, Domain)])), None);
    }

    #[test]
    fn ragged_rows_are_tolerated() {
        let m = mapping(&[(0, Id), (5, Sale)]);
        let short = build_record(&row!["7"], &m).unwrap();
        assert_eq!(short.get(Id), "7");
        assert_eq!(short.sale(), "");
        let long = build_record(&row!["8", "", "", "", "", "3%", "extra", "more"], &m).unwrap();
        assert_eq!(long.sale(), "3%");
    }

    #[test]
    fn leftmost_column_keeps_duplicate_field() {
        let m = mapping(&[(0, Sale), (1, Sale)]);
        let rec = build_record(&row!["5%", "7%"], &m).unwrap();
        assert_eq!(rec.sale(), "5%");
    }

    #[test]
    fn no_rows_after_header_is_an_error() {
        let table = Table::new(vec![row!["Домен"], row![""]]);
        let err = build_records(&table, &mapping(&[(0, Domain)]), 0).unwrap_err();
        assert_eq!(
            err,
            OfferError::NoOfferRows { header_row: 0, header: row!["Домен"], scanned: 1 }
        );
    }

    #[test]
    fn serializes_with_canonical_names() {
        let rec = OfferRecord::new().with(Domain, "a.com").with(MotivationAmount, "500");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["domain"], "a.com");
        assert_eq!(json["motivationAmount"], "500");
        assert_eq!(json["legalName"], "");
    }
}
