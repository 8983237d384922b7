//! Chapter list extraction.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::models::ChapterRef;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Redundant `Chapter N` prefixes on chapter titles, with the separator
/// variants seen in the wild (`-`, `–`, `:`).
static CHAPTER_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Chapter\s+\d+\s*[-–:]\s*").unwrap());

/// Extracts the chapter list from a novel's detail page.
///
/// Only anchors under the novel's own path (`/novel/<id>/<slug>`) count.
/// Slugs seen more than once keep their first occurrence (title and index
/// included); indices are zero-based in first-seen order. A page with no
/// recognizable chapters yields one synthetic `chapter-1` entry so the
/// host can still attempt a content fetch.
pub fn parse_chapter_list(html: &str, novel_id: &str) -> Vec<ChapterRef> {
    let document = Html::parse_document(html);
    let prefix = format!("/novel/{}/", novel_id);

    let mut chapters = Vec::new();
    let mut seen = HashSet::new();

    for anchor in document.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(slug) = href
            .strip_prefix(prefix.as_str())
            .map(|s| s.trim_end_matches('/'))
        else {
            continue;
        };
        if slug.is_empty() || slug.contains('/') || !seen.insert(slug.to_string()) {
            continue;
        }

        let raw_title = anchor.text().collect::<String>().trim().to_string();
        if raw_title.is_empty() {
            seen.remove(slug);
            continue;
        }

        chapters.push(ChapterRef {
            id: format!("{}/{}", novel_id, slug),
            title: strip_chapter_prefix(&raw_title),
            index: chapters.len() as u32,
        });
    }

    if chapters.is_empty() {
        chapters.push(ChapterRef {
            id: format!("{}/chapter-1", novel_id),
            title: "Chapter 1".to_string(),
            index: 0,
        });
    }

    chapters
}

/// Strips one leading `Chapter N <sep>` prefix. Titles that are nothing
/// but the prefix are kept as-is.
fn strip_chapter_prefix(title: &str) -> String {
    let stripped = CHAPTER_PREFIX_RE.replace(title, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        title.to_string()
    } else {
        stripped.to_string()
    }
}
