//! Profile-image resolution: an ordered chain of candidate strategies.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

/// Placeholder returned when no page-local candidate exists.
pub const DEFAULT_IMAGE_URL: &str = "https://assets-fr.imgfoot.com/mbappe-chute.jpg";

/// Which strategy produced the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageSource {
    MediaItem,
    HeadshotAlt,
    DefaultFallback,
}

/// A resolved image URL plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCandidate {
    pub url: String,
    pub source: ImageSource,
}

/// Resolve the page's profile image.
///
/// Strategies run in a fixed order and the first hit wins; a page-local
/// hit that is site-root-relative is joined against the page URL. When
/// nothing hits, the result is exactly the placeholder, which is never
/// rewritten.
pub fn resolve(doc: &Html, page_url: &str) -> ImageCandidate {
    let strategies: [(ImageSource, fn(&Html) -> Option<String>); 2] = [
        (ImageSource::MediaItem, media_item_src),
        (ImageSource::HeadshotAlt, headshot_alt_src),
    ];

    for (source, strategy) in strategies {
        if let Some(src) = strategy(doc) {
            return ImageCandidate {
                url: absolutize(&src, page_url),
                source,
            };
        }
    }

    ImageCandidate {
        url: DEFAULT_IMAGE_URL.to_string(),
        source: ImageSource::DefaultFallback,
    }
}

/// `src` of the first image nested under a `media-item` classed element,
/// if non-empty.
fn media_item_src(doc: &Html) -> Option<String> {
    let sel = Selector::parse(".media-item img").expect("static selector");
    doc.select(&sel)
        .next()
        .and_then(|img| img.value().attr("src"))
        .filter(|src| !src.is_empty())
        .map(str::to_string)
}

/// `src` of the first image whose alt text mentions a headshot.
///
/// Only the first alt match is considered: an empty `src` on it fails the
/// strategy rather than scanning further images.
fn headshot_alt_src(doc: &Html) -> Option<String> {
    let sel = Selector::parse("img").expect("static selector");
    doc.select(&sel)
        .find(|img| {
            img.value()
                .attr("alt")
                .is_some_and(|alt| alt.to_ascii_lowercase().contains("headshot"))
        })
        .and_then(|img| img.value().attr("src"))
        .filter(|src| !src.is_empty())
        .map(str::to_string)
}

/// Join a site-root-relative path against the page URL; anything else is
/// already usable as-is.
fn absolutize(src: &str, page_url: &str) -> String {
    if !src.starts_with('/') {
        return src.to_string();
    }
    match Url::parse(page_url).and_then(|base| base.join(src)) {
        Ok(joined) => joined.to_string(),
        Err(_) => src.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_html(html: &str, page_url: &str) -> ImageCandidate {
        resolve(&Html::parse_document(html), page_url)
    }

    #[test]
    fn test_media_item_beats_headshot_alt() {
        let c = resolve_html(
            r#"<img alt="player headshot" src="https://cdn.example/alt.jpg">
               <div class="media-item"><img src="https://cdn.example/media.jpg"></div>"#,
            "https://site.example",
        );
        assert_eq!(c.url, "https://cdn.example/media.jpg");
        assert_eq!(c.source, ImageSource::MediaItem);
    }

    #[test]
    fn test_headshot_alt_is_second_choice() {
        let c = resolve_html(
            r#"<img alt="Official HEADSHOT 2024" src="https://cdn.example/h.jpg">"#,
            "https://site.example",
        );
        assert_eq!(c.url, "https://cdn.example/h.jpg");
        assert_eq!(c.source, ImageSource::HeadshotAlt);
    }

    #[test]
    fn test_default_when_nothing_matches() {
        let c = resolve_html(r#"<img alt="stadium" src="/s.jpg">"#, "https://site.example");
        assert_eq!(c.url, DEFAULT_IMAGE_URL);
        assert_eq!(c.source, ImageSource::DefaultFallback);
    }

    #[test]
    fn test_empty_media_item_src_falls_through() {
        let c = resolve_html(
            r#"<div class="media-item"><img src=""></div>
               <img alt="headshot" src="/h.jpg">"#,
            "https://site.example",
        );
        assert_eq!(c.source, ImageSource::HeadshotAlt);
        assert_eq!(c.url, "https://site.example/h.jpg");
    }

    #[test]
    fn test_first_headshot_with_empty_src_fails_the_strategy() {
        // The chain checks only the first alt match; it does not scan
        // further headshot images.
        let c = resolve_html(
            r#"<img alt="headshot" src="">
               <img alt="another headshot" src="/h2.jpg">"#,
            "https://site.example",
        );
        assert_eq!(c.source, ImageSource::DefaultFallback);
        assert_eq!(c.url, DEFAULT_IMAGE_URL);
    }

    #[test]
    fn test_root_relative_src_joined_to_page_origin() {
        let c = resolve_html(
            r#"<div class="media-item"><img src="/img/x.jpg"></div>"#,
            "https://site.example/a/b",
        );
        assert_eq!(c.url, "https://site.example/img/x.jpg");
    }

    #[test]
    fn test_absolute_src_unchanged() {
        let c = resolve_html(
            r#"<div class="media-item"><img src="https://cdn.example/x.jpg"></div>"#,
            "https://site.example/a/b",
        );
        assert_eq!(c.url, "https://cdn.example/x.jpg");
    }

    #[test]
    fn test_placeholder_never_rewritten() {
        // Even resolved against a page, the fallback constant passes
        // through untouched.
        let c = resolve_html("<p>no images at all</p>", "https://site.example/a/b");
        assert_eq!(c.url, DEFAULT_IMAGE_URL);
    }
}
