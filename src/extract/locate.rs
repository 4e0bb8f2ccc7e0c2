//! Exact-id table lookup over a parsed document.

use scraper::{ElementRef, Html, Selector};

/// First `<table>` in document order whose `id` attribute equals
/// `table_id` exactly.
///
/// Matching is case-sensitive whole-value equality. A page that lacks the
/// id yields `None`; another table is never substituted.
pub fn find_table<'a>(doc: &'a Html, table_id: &str) -> Option<ElementRef<'a>> {
    let tables = Selector::parse("table").expect("static selector");
    doc.select(&tables)
        .find(|el| el.value().attr("id") == Some(table_id))
}
