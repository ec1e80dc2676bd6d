// src/csv.rs
// Persisted offer rows: this run's offers go out through here and come back
// in as the next run's previous pairs.
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use ::csv::{ReaderBuilder, WriterBuilder};

use crate::config::aliases::CanonicalField;
use crate::config::options::ExportFormat;
use crate::error::RowsError;
use crate::extract::Row;
use crate::pairs::{pairs_from_rows, PairSet};
use crate::records::field_names;

/// Rows read back from disk, header split off when there was one.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StoredRows {
    pub header: Option<Row>,
    pub rows: Vec<Row>,
}

fn is_header(row: &[String]) -> bool {
    row.first()
        .is_some_and(|c| c.trim().eq_ignore_ascii_case(CanonicalField::Id.name()))
}

/// Parse persisted rows. A leading BOM is ignored, ragged rows are kept, and
/// a first row starting with the `id` field name is taken as the header.
pub fn read_rows(text: &str, format: &ExportFormat) -> Result<StoredRows, RowsError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .delimiter(format.delim())
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Row> = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_owned).collect());
    }
    let header = rows.first().is_some_and(|r| is_header(r)).then(|| rows.remove(0));
    Ok(StoredRows { header, rows })
}

/// Offer rows in canonical column order, field-name header first when asked.
pub fn write_rows<W: Write>(w: W, rows: &[Row], format: &ExportFormat, include_headers: bool) -> Result<(), RowsError> {
    let mut out = WriterBuilder::new()
        .delimiter(format.delim())
        .flexible(true)
        .from_writer(w);
    if include_headers {
        out.write_record(field_names())?;
    }
    for row in rows {
        out.write_record(row)?;
    }
    out.flush().map_err(::csv::Error::from)?;
    Ok(())
}

pub fn export_string(rows: &[Row], format: &ExportFormat, include_headers: bool) -> Result<String, RowsError> {
    let mut buf = Vec::new();
    write_rows(&mut buf, rows, format, include_headers)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn write_offers(path: &Path, rows: &[Row], format: &ExportFormat, include_headers: bool) -> Result<(), RowsError> {
    let io_err = |source: io::Error| RowsError::Io { path: path.to_path_buf(), source };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let file = File::create(path).map_err(io_err)?;
    write_rows(BufWriter::new(file), rows, format, include_headers)?;
    logf!(path = %path.display(), rows = rows.len(), "offers written");
    Ok(())
}

/// Pairs persisted by an earlier run. A file that does not exist yet is a
/// first run: empty set.
pub fn load_previous_pairs(path: &Path, format: &ExportFormat) -> Result<PairSet, RowsError> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            logf!(path = %path.display(), "no previous offers, treating as first run");
            return Ok(PairSet::new());
        }
        Err(source) => return Err(RowsError::Io { path: path.to_path_buf(), source }),
    };
    let stored = read_rows(&text, format)?;
    let pairs = pairs_from_rows(&stored.rows);
    logd!(path = %path.display(), rows = stored.rows.len(), pairs = pairs.len(), "previous offers loaded");
    Ok(pairs)
}
