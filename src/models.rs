use serde::{Deserialize, Serialize};

/// One entry in a listing or search result page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NovelSummary {
    pub id: String,
    pub title: String,
    pub cover_url: String,
    pub author: String, // usually empty on listing pages
    pub description: String,
}

/// Full metadata scraped from a novel's detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NovelDetail {
    pub id: String,
    pub title: String,
    pub cover_url: String,
    pub author: String,
    pub genres: Vec<String>,
    pub status: NovelStatus,
    pub rating: String, // decimal string, e.g. "4.5"; empty when absent
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NovelStatus {
    Ongoing,
    Completed,
    Unknown,
}

impl NovelStatus {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.eq_ignore_ascii_case("ongoing") {
            NovelStatus::Ongoing
        } else if text.eq_ignore_ascii_case("completed") {
            NovelStatus::Completed
        } else {
            NovelStatus::Unknown
        }
    }
}

impl std::fmt::Display for NovelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NovelStatus::Ongoing => "Ongoing",
            NovelStatus::Completed => "Completed",
            NovelStatus::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// A chapter reference from a novel's chapter list.
///
/// `id` is `"<novel-id>/<chapter-slug>"`; the owning novel is embedded so
/// the chapter URL can be rebuilt from the id alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChapterRef {
    pub id: String,
    pub title: String,
    pub index: u32,
}

/// Cleaned chapter body as an HTML fragment of `<p>` elements.
///
/// Failure paths produce a `ChapterContent` too, carrying a fixed
/// human-readable error fragment instead of chapter text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChapterContent {
    pub html: String,
}

impl ChapterContent {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}
