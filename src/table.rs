//! Generic HTML table parsing
//!
//! Locates every `<table>` in a document in order, captures the nearest
//! preceding paragraph as that table's context text, and flattens headers
//! and body rows into plain strings. Column semantics are left to the
//! extraction layer; this module only deals with document structure.

use crate::normalize::normalize_label;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

lazy_static! {
    static ref TR_SEL: Selector = Selector::parse("tr").unwrap();
    static ref CELL_SEL: Selector = Selector::parse("th, td").unwrap();
    static ref TH_SEL: Selector = Selector::parse("th").unwrap();
}

/// One table lifted out of the document: context paragraph, normalized
/// per-column header labels, and body rows as trimmed cell text.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub context: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Visible text of an element with whitespace collapsed.
fn element_text(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn span_attr(cell: ElementRef, name: &str) -> usize {
    cell.value()
        .attr(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(1)
        .max(1)
}

/// Cells of a row with `colspan` expanded, so merged cells line up with the
/// columns they span.
fn row_cells(row: ElementRef) -> Vec<String> {
    let mut cells = Vec::new();
    for cell in row.select(&CELL_SEL) {
        let text = element_text(cell);
        for _ in 0..span_attr(cell, "colspan") {
            cells.push(text.clone());
        }
    }
    cells
}

/// Expand header rows into a rectangular grid, honoring both `colspan` and
/// `rowspan`, so a merged label repeats over every column and row it spans.
fn header_grid(rows: &[ElementRef]) -> Vec<Vec<String>> {
    let mut grid: Vec<Vec<String>> = Vec::new();
    // cells carried down from earlier rows: (column, text, rows remaining)
    let mut carried: Vec<(usize, String, usize)> = Vec::new();

    for row in rows {
        let mut out: Vec<Option<String>> = Vec::new();

        for (col, text, _) in &carried {
            if out.len() <= *col {
                out.resize(*col + 1, None);
            }
            out[*col] = Some(text.clone());
        }
        carried = carried
            .into_iter()
            .filter_map(|(c, t, r)| (r > 1).then(|| (c, t, r - 1)))
            .collect();

        let mut col = 0;
        for cell in row.select(&CELL_SEL) {
            while col < out.len() && out[col].is_some() {
                col += 1;
            }
            let colspan = span_attr(cell, "colspan");
            let rowspan = span_attr(cell, "rowspan");
            let text = element_text(cell);
            for i in 0..colspan {
                let c = col + i;
                if out.len() <= c {
                    out.resize(c + 1, None);
                }
                out[c] = Some(text.clone());
                if rowspan > 1 {
                    carried.push((c, text.clone(), rowspan - 1));
                }
            }
            col += colspan;
        }

        grid.push(out.into_iter().map(|c| c.unwrap_or_default()).collect());
    }

    grid
}

/// Whether every cell in the row is a `<th>`.
fn is_header_row(row: ElementRef) -> bool {
    let th_count = row.select(&TH_SEL).count();
    th_count > 0 && th_count == row.select(&CELL_SEL).count()
}

fn parse_table(table: ElementRef, context: String) -> RawTable {
    let all_rows: Vec<ElementRef> = table.select(&TR_SEL).collect();

    // Leading all-<th> rows form the (possibly multi-level) header; pages
    // without <th> markup use the first row as the header instead.
    let header_count = all_rows
        .iter()
        .take_while(|r| is_header_row(**r))
        .count()
        .max(if all_rows.is_empty() { 0 } else { 1 });

    let header_rows = header_grid(&all_rows[..header_count]);
    let column_count = header_rows.iter().map(|r| r.len()).max().unwrap_or(0);

    let headers: Vec<String> = (0..column_count)
        .map(|i| {
            let parts: Vec<&str> = header_rows
                .iter()
                .map(|r| r.get(i).map(String::as_str).unwrap_or(""))
                .collect();
            normalize_label(&parts)
        })
        .collect();

    let rows: Vec<Vec<String>> = all_rows
        .iter()
        .skip(header_count)
        .map(|r| row_cells(*r))
        .filter(|cells| !cells.is_empty())
        .collect();

    RawTable {
        context,
        headers,
        rows,
    }
}

/// Parse every table in the document, preserving document order. Each
/// table carries the text of the nearest `<p>` that precedes it, used
/// downstream for tenure-band inference.
pub fn parse_tables(html: &str) -> Vec<RawTable> {
    let document = Html::parse_document(html);

    let mut last_paragraph = String::new();
    let mut tables = Vec::new();

    for node in document.root_element().descendants() {
        let el = match ElementRef::wrap(node) {
            Some(el) => el,
            None => continue,
        };
        match el.value().name() {
            "p" => last_paragraph = element_text(el),
            "table" => tables.push(parse_table(el, last_paragraph.clone())),
            _ => {}
        }
    }

    tables
}
