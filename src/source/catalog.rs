//! Listing, search result and novel detail extraction.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::config::SourceConfig;
use crate::error::{Result, SourceError};
use crate::models::{NovelDetail, NovelStatus, NovelSummary};

/// CSS selectors for catalog pages, parsed once.
struct Selectors {
    /// Novel card anchors on listing and search pages.
    novel_anchor: Selector,
    img: Selector,
    /// Detail page title, with a bare-heading fallback.
    title: Selector,
    title_fallback: Selector,
    cover: Selector,
    /// Labelled metadata rows (author, status, rating).
    info_item: Selector,
    info_name: Selector,
    info_value: Selector,
    genre_anchor: Selector,
    description: Selector,
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| Selectors {
    novel_anchor: Selector::parse(r#"a[href^="/novel/"]"#).unwrap(),
    img: Selector::parse("img").unwrap(),
    title: Selector::parse("h1.tit").unwrap(),
    title_fallback: Selector::parse("h1").unwrap(),
    cover: Selector::parse("div.pic img").unwrap(),
    info_item: Selector::parse("div.info-item").unwrap(),
    info_name: Selector::parse("span.info-name").unwrap(),
    info_value: Selector::parse("span.info-value").unwrap(),
    genre_anchor: Selector::parse(r#"a[href^="/genre/"]"#).unwrap(),
    description: Selector::parse("div.m-desc p, div.desc p").unwrap(),
});

static RATING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

/// Extracts novel summaries from a listing or search results page.
///
/// Scans anchors pointing at `/novel/<id>` that contain a cover image,
/// skipping chapter links (ids with a further path segment). Duplicate ids
/// keep their first occurrence; the result is capped at
/// `config.max_list_results` in document order.
pub fn parse_novel_list(html: &str, config: &SourceConfig) -> Vec<NovelSummary> {
    let document = Html::parse_document(html);
    let mut novels = Vec::new();
    let mut seen = HashSet::new();

    for anchor in document.select(&SELECTORS.novel_anchor) {
        if novels.len() >= config.max_list_results {
            break;
        }

        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(id) = novel_id_from_href(href) else {
            continue;
        };

        let Some(img) = anchor.select(&SELECTORS.img).next() else {
            continue;
        };
        let cover_url = img
            .value()
            .attr("src")
            .map(|src| absolutize(&config.base_url, src))
            .unwrap_or_default();

        // Title comes from the image alt text, falling back to the
        // anchor's title attribute.
        let title = img
            .value()
            .attr("alt")
            .filter(|alt| !alt.trim().is_empty())
            .or_else(|| anchor.value().attr("title"))
            .map(|t| t.trim().to_string())
            .unwrap_or_default();

        if title.is_empty() || !seen.insert(id.to_string()) {
            continue;
        }

        novels.push(NovelSummary {
            id: id.to_string(),
            title,
            cover_url,
            author: String::new(),
            description: String::new(),
        });
    }

    novels
}

/// Extracts full metadata from a novel's detail page.
pub fn parse_novel_detail(
    html: &str,
    novel_id: &str,
    config: &SourceConfig,
) -> Result<NovelDetail> {
    let document = Html::parse_document(html);

    let title = document
        .select(&SELECTORS.title)
        .next()
        .or_else(|| document.select(&SELECTORS.title_fallback).next())
        .map(|elem| elem.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(SourceError::ElementNotFound("novel title"))?;

    let cover_url = document
        .select(&SELECTORS.cover)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|src| absolutize(&config.base_url, src))
        .unwrap_or_default();

    let mut author = String::new();
    let mut status = NovelStatus::Unknown;
    let mut rating = String::new();

    for item in document.select(&SELECTORS.info_item) {
        let Some(name) = item.select(&SELECTORS.info_name).next() else {
            continue;
        };
        let label = name.text().collect::<String>();
        let value = item
            .select(&SELECTORS.info_value)
            .next()
            .map(|v| v.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        if label.contains("Author") {
            author = value;
        } else if label.contains("Status") {
            status = NovelStatus::parse(&value);
        } else if label.contains("Rating") {
            rating = RATING_RE
                .find(&value)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
        }
    }

    let genres: Vec<String> = document
        .select(&SELECTORS.genre_anchor)
        .map(|a| a.text().collect::<String>().trim().to_string())
        .filter(|g| !g.is_empty())
        .take(config.max_genres)
        .collect();

    let paragraphs: Vec<String> = document
        .select(&SELECTORS.description)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();
    let description = paragraphs.join("\n");

    Ok(NovelDetail {
        id: novel_id.to_string(),
        title,
        cover_url,
        author,
        genres,
        status,
        rating,
        description,
    })
}

/// Returns the novel id from an `/novel/<id>` href, rejecting chapter links
/// (`/novel/<id>/<slug>`) and empty segments.
fn novel_id_from_href(href: &str) -> Option<&str> {
    let id = href.strip_prefix("/novel/")?.trim_end_matches('/');
    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(id)
}

/// Resolves a possibly relative image URL against the site base URL.
pub fn absolutize(base_url: &str, src: &str) -> String {
    if src.starts_with("http://") || src.starts_with("https://") {
        return src.to_string();
    }
    if let Ok(base) = url::Url::parse(base_url)
        && let Ok(resolved) = base.join(src)
    {
        return resolved.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        src.trim_start_matches('/')
    )
}
