//! The pure extraction core.
//!
//! Sanitize rendered markup, locate the target table by exact id, decode it
//! into rows of named columns, and optionally resolve a profile-image URL.
//! Everything here is synchronous and free of I/O: input is the rendered
//! HTML string a renderer produced, output is data or a typed error.

pub mod decode;
pub mod image;
pub mod locate;
pub mod sanitize;

use crate::error::ExtractError;
use decode::Table;
use image::ImageCandidate;
use scraper::Html;

/// Run the full pipeline over one page's rendered HTML.
///
/// `page_url` is carried into errors and used as the base for resolving
/// site-root-relative image paths. With `resolve_image` false the image
/// slot stays absent; the fallback chain is not consulted at all.
pub fn extract_document(
    html: &str,
    page_url: &str,
    table_id: &str,
    resolve_image: bool,
) -> Result<(Table, Option<ImageCandidate>), ExtractError> {
    let sanitized = sanitize::strip_comment_tokens(html);
    let doc = Html::parse_document(&sanitized);

    let element = locate::find_table(&doc, table_id).ok_or_else(|| ExtractError::TableNotFound {
        url: page_url.to_string(),
        table_id: table_id.to_string(),
    })?;
    let table = decode::decode_table(element);

    let image = resolve_image.then(|| image::resolve(&doc, page_url));
    Ok((table, image))
}
