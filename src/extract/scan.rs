// src/extract/scan.rs
// Streaming table scanner. Recovery rules for broken markup:
// - an open cell is closed by the next <td>/<th> or by </tr>
// - an open <tr> is dropped if a new <tr>, </table> or end of input comes
//   before its </tr>
// - cells found outside any <tr> form an implicit row, which ends at the next
//   <tr> or </table> and is kept
// - unmatched end tags are ignored
// - a table is kept at </table> or end of input if it holds a complete row

use crate::core::html::{Token, Tokens};
use crate::core::sanitize::{decode_entities, normalize_ws};

use super::{Row, Table, TableExtractor};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanExtractor;

impl TableExtractor for ScanExtractor {
    fn name(&self) -> &'static str {
        "scan"
    }

    fn extract(&self, html: &str) -> Vec<Table> {
        let mut state = ScanState::default();
        for tok in Tokens::new(html) {
            state.feed(tok);
        }
        state.finish()
    }
}

struct OpenRow {
    cells: Row,
    implicit: bool,
}

#[derive(Default)]
struct ScanState {
    tables: Vec<Table>,
    table: Option<Vec<Row>>,
    row: Option<OpenRow>,
    cell: Option<String>,
    // depth of tables opened inside the current top-level table
    nested: usize,
}

impl ScanState {
    fn feed(&mut self, tok: Token<'_>) {
        if self.nested > 0 {
            self.feed_nested(tok);
            return;
        }
        match tok {
            Token::Text(t) => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.push_str(t);
                }
            }
            Token::Open { name, .. } => match name.as_str() {
                "table" => {
                    if self.table.is_some() {
                        self.nested = 1;
                    } else {
                        self.table = Some(Vec::new());
                    }
                }
                "tr" if self.table.is_some() => {
                    self.end_implicit_row();
                    if let Some(open) = self.row.take() {
                        logw!(cells = open.cells.len(), "unclosed <tr> dropped");
                    }
                    self.cell = None;
                    self.row = Some(OpenRow { cells: Vec::new(), implicit: false });
                }
                "td" | "th" if self.table.is_some() => {
                    self.close_cell();
                    if self.row.is_none() {
                        self.row = Some(OpenRow { cells: Vec::new(), implicit: true });
                    }
                    self.cell = Some(String::new());
                }
                _ => {}
            },
            Token::Close { name } => match name.as_str() {
                "td" | "th" => self.close_cell(),
                "tr" => {
                    self.close_cell();
                    if let Some(open) = self.row.take() {
                        self.push_row(open.cells);
                    }
                }
                "table" => {
                    self.end_implicit_row();
                    self.cell = None;
                    if let Some(open) = self.row.take() {
                        logw!(cells = open.cells.len(), "unclosed <tr> dropped at </table>");
                    }
                    self.end_table();
                }
                _ => {}
            },
        }
    }

    /// Inside a nested table: only track depth, everything else is cell text.
    fn feed_nested(&mut self, tok: Token<'_>) {
        match tok {
            Token::Text(t) => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.push_str(t);
                }
            }
            Token::Open { name, .. } if name == "table" => self.nested += 1,
            Token::Close { name } if name == "table" => self.nested -= 1,
            _ => {}
        }
    }

    fn close_cell(&mut self) {
        if let (Some(raw), Some(row)) = (self.cell.take(), self.row.as_mut()) {
            row.cells.push(normalize_ws(&decode_entities(&raw)));
        }
    }

    fn end_implicit_row(&mut self) {
        if self.row.as_ref().is_some_and(|r| r.implicit) {
            self.close_cell();
            if let Some(open) = self.row.take() {
                self.push_row(open.cells);
            }
        }
    }

    fn push_row(&mut self, cells: Row) {
        if cells.is_empty() {
            return;
        }
        if let Some(rows) = self.table.as_mut() {
            rows.push(cells);
        }
    }

    fn end_table(&mut self) {
        if let Some(rows) = self.table.take() {
            if !rows.is_empty() {
                self.tables.push(Table::new(rows));
            }
        }
    }

    fn finish(mut self) -> Vec<Table> {
        if let Some(open) = self.row.take() {
            logw!(cells = open.cells.len(), "row still open at end of input dropped");
        }
        self.end_table();
        self.tables
    }
}
