//! Chapter body extraction.
//!
//! Three stages, tried in order until one yields enough text:
//!
//! 1. the structural content container (`#chapter-content`);
//! 2. the secondary text container (`div.txt`);
//! 3. a raw substring slice between the "Previous Chapter" phrase and the
//!    earliest of several end markers.
//!
//! Every stage is cleaned the same way (script/style/comment/nav removal,
//! entity decoding, whitespace collapsing) and must clear the configured
//! minimum length, otherwise the next stage runs.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::{Result, SourceError};

/// Returned without fetching when a chapter id has no novel prefix.
pub const INVALID_ID_FRAGMENT: &str =
    "<p>Error: Unable to fetch chapter content. Invalid chapter ID format.</p>";

/// Terminal fragment once every extraction stage has failed.
pub const NOT_FOUND_FRAGMENT: &str = "<p>Error: Could not locate chapter content.</p>";

const START_MARKER: &str = "Previous Chapter";

/// Markers that end the chapter body. The earliest occurrence wins so the
/// slice captures as little trailing page chrome as possible.
const END_MARKERS: &[&str] = &[
    "Prev Chapter",
    r#"<div class="m-b-15 text-center">"#,
    r#"<div class="comment">"#,
    "Use arrow keys",
    "Add to Library",
];

/// End markers are only searched this many bytes past the start marker, so
/// the nav block containing the start marker cannot terminate the slice.
const END_SEARCH_OFFSET: usize = 100;

struct Selectors {
    primary: Selector,
    secondary: Selector,
    paragraph: Selector,
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| Selectors {
    primary: Selector::parse("#chapter-content").unwrap(),
    secondary: Selector::parse("div.txt").unwrap(),
    paragraph: Selector::parse("p").unwrap(),
});

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static NAV_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?is)<a[^>]+class="[^"]*btn[^"]*"[^>]*>.*?</a>"#).unwrap());
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p[^>]*>(.*?)</p>").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static MULTI_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Runs the extraction stages and returns the first qualifying fragment.
pub fn extract_chapter_html(html: &str, config: &SourceConfig) -> Result<String> {
    let document = Html::parse_document(html);

    let mut last_err = SourceError::ElementNotFound("chapter content container");
    for (stage, selector) in [
        ("primary", &SELECTORS.primary),
        ("secondary", &SELECTORS.secondary),
    ] {
        if let Some(fragment) = container_paragraphs(&document, selector) {
            let cleaned = clean_fragment(&fragment);
            let len = cleaned.chars().count();
            if len >= config.min_content_len {
                debug!(stage, chars = len, "container stage succeeded");
                return Ok(cleaned);
            }
            debug!(stage, chars = len, "container stage under threshold");
            last_err = SourceError::ContentTooShort(len);
        }
    }

    match marker_slice(html, config) {
        Ok(cleaned) => {
            debug!(chars = cleaned.chars().count(), "marker stage succeeded");
            Ok(cleaned)
        }
        // An earlier stage's too-short diagnostic is the more useful error
        // when the markers were never there to begin with.
        Err(SourceError::ElementNotFound(_)) if matches!(last_err, SourceError::ContentTooShort(_)) => {
            Err(last_err)
        }
        Err(e) => Err(e),
    }
}

/// Collects the `<p>` elements of the first container matching `selector`.
fn container_paragraphs(document: &Html, selector: &Selector) -> Option<String> {
    let container = document.select(selector).next()?;

    let paragraphs: Vec<String> = container
        .select(&SELECTORS.paragraph)
        .filter_map(|p| {
            let text = p.text().collect::<String>();
            let text = text.trim();
            if text.is_empty() || is_nav_text(text) {
                None
            } else {
                Some(p.html())
            }
        })
        .collect();

    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join("\n"))
    }
}

/// Marker-based fallback: slices the raw document between the
/// "Previous Chapter" phrase and the earliest end marker.
fn marker_slice(html: &str, config: &SourceConfig) -> Result<String> {
    let start = html
        .find(START_MARKER)
        .ok_or(SourceError::ElementNotFound("previous-chapter marker"))?;

    let search_from = ceil_char_boundary(html, start + END_SEARCH_OFFSET);
    let end = END_MARKERS
        .iter()
        .filter_map(|marker| html[search_from..].find(marker).map(|i| search_from + i))
        .min()
        .unwrap_or(html.len());

    let section = html[start..end].replace(START_MARKER, "");
    let section = strip_noise(&section);

    // Prefer the section's own paragraph tags; otherwise fall back to a
    // tag-stripped text blob.
    let paragraphs: Vec<String> = PARAGRAPH_RE
        .captures_iter(&section)
        .filter_map(|caps| {
            let inner = caps[1].trim().to_string();
            if inner.is_empty() || is_nav_text(&inner) {
                None
            } else {
                Some(format!("<p>{}</p>", inner))
            }
        })
        .collect();

    let fragment = if paragraphs.is_empty() {
        let text = TAG_RE.replace_all(&section, " ");
        let text = collapse_ws(&decode_entities(&text));
        let text = text.trim();
        if text.chars().count() > 20 {
            format!("<p>{}</p>", text)
        } else {
            String::new()
        }
    } else {
        paragraphs.join("\n")
    };

    let cleaned = clean_fragment(&fragment);
    let len = cleaned.chars().count();
    if len < config.min_content_len {
        return Err(SourceError::ContentTooShort(len));
    }
    Ok(cleaned)
}

fn is_nav_text(text: &str) -> bool {
    matches!(text, "Previous Chapter" | "Prev Chapter" | "Next Chapter")
}

fn strip_noise(fragment: &str) -> String {
    let fragment = SCRIPT_RE.replace_all(fragment, "");
    let fragment = STYLE_RE.replace_all(&fragment, "");
    let fragment = COMMENT_RE.replace_all(&fragment, "");
    NAV_LINK_RE.replace_all(&fragment, "").into_owned()
}

fn decode_entities(fragment: &str) -> String {
    // &amp; last, so "&amp;nbsp;" is not decoded twice.
    fragment
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn collapse_ws(fragment: &str) -> String {
    MULTI_WS_RE.replace_all(fragment, " ").into_owned()
}

fn clean_fragment(fragment: &str) -> String {
    let fragment = strip_noise(fragment);
    let fragment = collapse_ws(&decode_entities(&fragment));
    fragment.trim().to_string()
}

/// Rounds `index` up to the next char boundary, clamped to the string end.
fn ceil_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index += 1;
    }
    index
}
