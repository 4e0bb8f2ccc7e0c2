//! Table element to rows-of-named-columns decoding.

use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A decoded table: column names in source order plus one map per data row.
///
/// `headers` keeps every header cell, duplicates included, so the source
/// column count stays observable. Row maps collapse duplicate names
/// last-wins; a padded cell is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, Option<String>>>,
}

impl Table {
    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Decode a located table element.
///
/// The first row supplies the column names; every later row becomes a map
/// from column name to trimmed, tag-flattened cell text. Rows shorter than
/// the header are padded with `None` and longer rows are truncated, so
/// decoding always succeeds once a table was located. A table with no data
/// rows decodes to an empty row sequence.
pub fn decode_table(table: ElementRef<'_>) -> Table {
    let row_sel = Selector::parse("tr").expect("static selector");
    let cell_sel = Selector::parse("th, td").expect("static selector");

    let mut row_iter = table.select(&row_sel);
    let Some(header_row) = row_iter.next() else {
        return Table::default();
    };
    let headers: Vec<String> = header_row.select(&cell_sel).map(cell_text).collect();

    let mut rows = Vec::new();
    for row in row_iter {
        let mut cells: Vec<Option<String>> = row
            .select(&cell_sel)
            .map(|cell| Some(cell_text(cell)))
            .collect();
        // Pad or truncate to the header width; shape anomalies are
        // recovered here, never surfaced as errors.
        cells.resize(headers.len(), None);

        let mut record = HashMap::with_capacity(headers.len());
        for (name, value) in headers.iter().zip(cells) {
            record.insert(name.clone(), value);
        }
        rows.push(record);
    }

    Table { headers, rows }
}

/// Flatten a cell to its text content, trimmed of surrounding whitespace.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}
