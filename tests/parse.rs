//! Fixture-driven extraction tests. Every fixture is a saved-off page
//! shape the plugin has to cope with; nothing here touches the network.

use fwn_source::source::{catalog, chapters, content};
use fwn_source::{NovelStatus, SourceConfig, SourceError};

const LISTING: &str = include_str!("fixtures/listing.html");
const NOVEL: &str = include_str!("fixtures/novel.html");
const CHAPTER_PRIMARY: &str = include_str!("fixtures/chapter_primary.html");
const CHAPTER_SECONDARY: &str = include_str!("fixtures/chapter_secondary.html");
const CHAPTER_FALLBACK: &str = include_str!("fixtures/chapter_fallback.html");
const CHAPTER_MARKERS: &str = include_str!("fixtures/chapter_markers.html");
const CHAPTER_NONE: &str = include_str!("fixtures/chapter_none.html");

#[test]
fn listing_returns_each_valid_entry_in_document_order() {
    let novels = catalog::parse_novel_list(LISTING, &SourceConfig::default());

    // Three unique cards with a cover image; the text-only link and the
    // duplicate card do not count.
    assert_eq!(novels.len(), 3);
    assert_eq!(novels[0].id, "martial-god-asura-novel");
    assert_eq!(novels[1].id, "shadow-slave-novel");
    assert_eq!(novels[2].id, "reverend-insanity-novel");
    for novel in &novels {
        assert!(!novel.id.is_empty());
        assert!(!novel.title.is_empty());
    }
}

#[test]
fn listing_covers_are_absolutized() {
    let novels = catalog::parse_novel_list(LISTING, &SourceConfig::default());

    assert_eq!(
        novels[0].cover_url,
        "https://freewebnovel.com/files/article/image/martial-god-asura.jpg"
    );
    // Already-absolute CDN URLs pass through untouched.
    assert_eq!(novels[1].cover_url, "https://cdn.example.com/shadow-slave.jpg");
}

#[test]
fn detail_page_yields_full_metadata() {
    let detail =
        catalog::parse_novel_detail(NOVEL, "shadow-slave-novel", &SourceConfig::default())
            .unwrap();

    assert_eq!(detail.id, "shadow-slave-novel");
    assert_eq!(detail.title, "Shadow Slave");
    assert_eq!(detail.author, "Guiltythree");
    assert_eq!(detail.status, NovelStatus::Ongoing);
    assert_eq!(detail.rating, "4.7");
    assert_eq!(
        detail.cover_url,
        "https://freewebnovel.com/files/article/image/shadow-slave.jpg"
    );
    // Seven genres on the page, bounded to the configured six.
    assert_eq!(detail.genres.len(), 6);
    assert_eq!(detail.genres[0], "Fantasy");
    assert_eq!(detail.genres[5], "Horror");
    assert!(detail.description.contains("Nightmare Spell"));
    assert_eq!(detail.description.lines().count(), 2);
}

#[test]
fn detail_page_without_title_is_rejected() {
    let err = catalog::parse_novel_detail(CHAPTER_NONE, "whatever", &SourceConfig::default())
        .unwrap_err();
    assert!(matches!(err, SourceError::ElementNotFound(_)));
}

#[test]
fn chapter_list_dedups_and_strips_prefixes() {
    let list = chapters::parse_chapter_list(NOVEL, "shadow-slave-novel");

    // Five anchors: one foreign novel, one duplicate slug.
    assert_eq!(list.len(), 3);

    assert_eq!(list[0].id, "shadow-slave-novel/chapter-1");
    assert_eq!(list[0].title, "Nightmare Begins"); // first-seen title wins
    assert_eq!(list[0].index, 0);

    assert_eq!(list[1].id, "shadow-slave-novel/chapter-2");
    assert_eq!(list[1].title, "Second Attempt");
    assert_eq!(list[1].index, 1);

    // Bare "Chapter 3" has no redundant prefix to strip.
    assert_eq!(list[2].title, "Chapter 3");
    assert_eq!(list[2].index, 2);
}

#[test]
fn chapterless_page_yields_synthetic_entry() {
    let list = chapters::parse_chapter_list(CHAPTER_NONE, "shadow-slave-novel");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, "shadow-slave-novel/chapter-1");
    assert_eq!(list[0].index, 0);
}

#[test]
fn primary_container_extraction() {
    let html = content::extract_chapter_html(CHAPTER_PRIMARY, &SourceConfig::default()).unwrap();

    assert!(html.contains("The nightmare always started"));
    assert!(html.contains("a bell began to toll"));
    // Noise never survives: inline scripts, tracker setup, comments feed.
    assert!(!html.contains("adSlot"));
    assert!(!html.contains("tracker"));
    assert!(!html.contains("Great chapter"));
    assert!(html.starts_with("<p>"));
}

#[test]
fn secondary_container_used_when_primary_absent() {
    let html = content::extract_chapter_html(CHAPTER_SECONDARY, &SourceConfig::default()).unwrap();

    assert!(html.contains("patient and unchanged"));
    assert!(html.contains("rules of the Nightmare"));
    // Built from the secondary container only.
    assert!(!html.contains("Comment section chatter"));
    assert!(!html.contains("Previous Chapter"));
}

#[test]
fn short_primary_never_beats_longer_fallback() {
    let html = content::extract_chapter_html(CHAPTER_FALLBACK, &SourceConfig::default()).unwrap();

    assert!(!html.contains("Loading..."));
    assert!(html.contains("slow, exhausted river"));
}

#[test]
fn marker_slice_bounds_at_earliest_end_marker() {
    let html = content::extract_chapter_html(CHAPTER_MARKERS, &SourceConfig::default()).unwrap();

    assert!(html.contains("wheels wrapped in cloth"));
    assert!(html.contains("grey smudge on the horizon"));
    // The comment div precedes "Use arrow keys" and closes the slice.
    assert!(!html.contains("typo in paragraph two"));
    assert!(!html.contains("Use arrow keys"));
}

#[test]
fn unrecognizable_page_exhausts_all_stages() {
    let err =
        content::extract_chapter_html(CHAPTER_NONE, &SourceConfig::default()).unwrap_err();
    assert!(matches!(err, SourceError::ElementNotFound(_)));
}
