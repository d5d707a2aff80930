use crate::error::{AuditError, Result};
use crate::fetcher::FetchedPage;
use crate::models::PageMetrics;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

// Cached selectors to avoid repeated parsing and eliminate unwrap() calls
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector should be valid"));
static META_DESC_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name='description']").expect("meta description selector should be valid")
});
static VIEWPORT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name='viewport']").expect("viewport selector should be valid")
});
static CANONICAL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("link[rel~='canonical']").expect("canonical selector should be valid")
});
static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("a[href] selector should be valid"));
static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("img selector should be valid"));
static H1_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("h1 selector should be valid"));
static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("body selector should be valid"));

/// Elements whose text never reaches the reader
const NON_VISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

pub struct MetricExtractor;

impl MetricExtractor {
    /// Parses a fetched response into metrics.
    ///
    /// Any text body is parsed best-effort: missing page elements, or an
    /// empty body, degrade to absent fields. Only binary content types fail.
    pub fn parse(page: &FetchedPage) -> Result<PageMetrics> {
        if let Some(content_type) = &page.content_type
            && is_binary_content_type(content_type)
        {
            return Err(AuditError::Parse(format!(
                "unsupported content type '{}' for {}",
                content_type, page.url
            )));
        }

        if page.body.trim().is_empty() {
            tracing::warn!(url = %page.url, "Empty document, every metric will be absent");
        }

        Ok(Self::extract_from_str(
            &page.body,
            page.elapsed.as_secs_f64(),
        ))
    }

    pub fn extract_from_str(html: &str, load_time_seconds: f64) -> PageMetrics {
        let document = Html::parse_document(html);
        Self::extract(&document, load_time_seconds)
    }

    pub fn extract(document: &Html, load_time_seconds: f64) -> PageMetrics {
        let title = Self::extract_title(document);
        let meta_description = Self::extract_meta_description(document);

        PageMetrics {
            title_length: title.as_deref().map_or(0, char_count),
            title,
            meta_description_length: meta_description.as_deref().map_or(0, char_count),
            meta_description,
            word_count: Self::count_visible_words(document),
            link_count: document.select(&ANCHOR_SELECTOR).count(),
            missing_alt_count: Self::count_missing_alt(document),
            h1_count: document.select(&H1_SELECTOR).count(),
            has_viewport_tag: document.select(&VIEWPORT_SELECTOR).next().is_some(),
            canonical_url: Self::extract_canonical(document),
            load_time_seconds: load_time_seconds.max(0.0),
        }
    }

    fn extract_title(document: &Html) -> Option<String> {
        document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
    }

    fn extract_meta_description(document: &Html) -> Option<String> {
        document
            .select(&META_DESC_SELECTOR)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .map(|s| s.to_string())
    }

    fn extract_canonical(document: &Html) -> Option<String> {
        document
            .select(&CANONICAL_SELECTOR)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(|s| s.to_string())
    }

    fn count_missing_alt(document: &Html) -> usize {
        document
            .select(&IMG_SELECTOR)
            .filter(|img| img.value().attr("alt").is_none_or(str::is_empty))
            .count()
    }

    /// Whitespace-delimited tokens in the body text, skipping script-like subtrees.
    fn count_visible_words(document: &Html) -> usize {
        let Some(body) = document.select(&BODY_SELECTOR).next() else {
            return 0;
        };

        let mut text = String::new();
        for node in body.descendants() {
            let Some(fragment) = node.value().as_text() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| NON_VISIBLE_ELEMENTS.contains(&el.name()))
            });
            if !hidden {
                text.push_str(fragment);
            }
        }

        text.split_whitespace().count()
    }
}

/// Media types that can never hold a markup document
const BINARY_TYPE_PREFIXES: &[&str] = &[
    "image/",
    "audio/",
    "video/",
    "font/",
    "application/octet-stream",
    "application/pdf",
    "application/zip",
];

fn is_binary_content_type(content_type: &str) -> bool {
    let lower = content_type.trim().to_ascii_lowercase();
    BINARY_TYPE_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

fn char_count(s: &str) -> usize {
    s.chars().count()
}
