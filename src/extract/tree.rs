// src/extract/tree.rs
// Markup-tree strategy: let html5ever repair the document, then walk it.

use scraper::{ElementRef, Html};

use crate::core::sanitize::normalize_ws;

use super::{Row, Table, TableExtractor};

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeExtractor;

impl TableExtractor for TreeExtractor {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn extract(&self, html: &str) -> Vec<Table> {
        let doc = Html::parse_document(html);

        doc.root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| is_named(el, "table") && enclosing_table(el).is_none())
            .filter_map(|table| {
                let rows: Vec<Row> = table
                    .descendants()
                    .filter_map(ElementRef::wrap)
                    .filter(|el| is_named(el, "tr"))
                    .filter(|tr| enclosing_table(tr).is_some_and(|t| t.id() == table.id()))
                    .map(row_cells)
                    .filter(|cells| !cells.is_empty())
                    .collect();
                (!rows.is_empty()).then(|| Table::new(rows))
            })
            .collect()
    }
}

fn is_named(el: &ElementRef<'_>, name: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(name)
}

/// Nearest `<table>` ancestor.
fn enclosing_table<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| is_named(a, "table"))
}

fn row_cells(tr: ElementRef<'_>) -> Row {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| is_named(c, "td") || is_named(c, "th"))
        .map(|cell| normalize_ws(&cell.text().collect::<String>()))
        .collect()
}
