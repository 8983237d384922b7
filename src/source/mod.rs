pub mod catalog;
pub mod chapters;
pub mod content;

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::SourceConfig;
use crate::error::{Result, SourceError};
use crate::models::{ChapterContent, ChapterRef, NovelDetail, NovelSummary};

/// Listing filter for [`FreeWebNovelSource::popular`].
#[derive(Debug, Clone)]
pub enum CatalogFilter {
    /// Sort key, e.g. `latest-release`. Without a filter the configured
    /// default sort is used.
    Sort(String),
    /// Genre slug, e.g. `fantasy`.
    Genre(String),
}

/// Stateless scraper for a FreeWebNovel-style site.
///
/// Each operation performs exactly one HTTP GET and extracts records from
/// the returned HTML. No operation returns an error to the caller: failures
/// degrade to an empty list, `None`, or a placeholder fragment, so a broken
/// page never takes the host application down with it.
pub struct FreeWebNovelSource {
    client: reqwest::Client,
    config: SourceConfig,
}

impl FreeWebNovelSource {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!(%url, "fetching page");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    fn popular_url(&self, page: u32, filter: Option<&CatalogFilter>) -> String {
        let path = match filter {
            None => format!("/sort/{}", self.config.popular_sort),
            Some(CatalogFilter::Sort(key)) => format!("/sort/{}", key),
            Some(CatalogFilter::Genre(genre)) => format!("/genre/{}", genre),
        };

        if page > 1 {
            format!("{}{}/{}", self.config.base_url, path, page)
        } else {
            format!("{}{}", self.config.base_url, path)
        }
    }

    fn search_url(&self, query: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        format!(
            "{}/search?{}={}",
            self.config.base_url, self.config.search_param, encoded
        )
    }

    /// Lists novels from the popular (or filtered) catalog page.
    pub async fn popular(&self, page: u32, filter: Option<CatalogFilter>) -> Vec<NovelSummary> {
        let url = self.popular_url(page, filter.as_ref());
        info!(page, %url, "listing novels");

        match self.fetch_page(&url).await {
            Ok(html) => {
                let novels = catalog::parse_novel_list(&html, &self.config);
                info!(count = novels.len(), page, "listing extracted");
                novels
            }
            Err(e) => {
                warn!(error = %e, %url, "listing failed");
                Vec::new()
            }
        }
    }

    /// Searches the catalog. The site paginates search results server-side
    /// only for some revisions, so `page` is informational here.
    pub async fn search(&self, query: &str, page: u32) -> Vec<NovelSummary> {
        let url = self.search_url(query);
        info!(query, page, %url, "searching novels");

        match self.fetch_page(&url).await {
            Ok(html) => {
                let novels = catalog::parse_novel_list(&html, &self.config);
                info!(count = novels.len(), query, "search extracted");
                novels
            }
            Err(e) => {
                warn!(error = %e, %url, "search failed");
                Vec::new()
            }
        }
    }

    /// Fetches full metadata for one novel. `None` when the page cannot be
    /// fetched or lacks the expected structure.
    pub async fn details(&self, novel_id: &str) -> Option<NovelDetail> {
        let url = format!("{}/novel/{}", self.config.base_url, novel_id);
        info!(novel_id, %url, "fetching novel details");

        let html = match self.fetch_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, novel_id, "detail fetch failed");
                return None;
            }
        };

        match catalog::parse_novel_detail(&html, novel_id, &self.config) {
            Ok(detail) => Some(detail),
            Err(e) => {
                warn!(error = %e, novel_id, "detail extraction failed");
                None
            }
        }
    }

    /// Lists a novel's chapters in document order.
    pub async fn chapters(&self, novel_id: &str) -> Vec<ChapterRef> {
        let url = format!("{}/novel/{}", self.config.base_url, novel_id);
        info!(novel_id, %url, "listing chapters");

        match self.fetch_page(&url).await {
            Ok(html) => {
                let chapters = chapters::parse_chapter_list(&html, novel_id);
                info!(count = chapters.len(), novel_id, "chapters extracted");
                chapters
            }
            Err(e) => {
                warn!(error = %e, novel_id, "chapter listing failed");
                Vec::new()
            }
        }
    }

    /// Fetches and cleans one chapter's body.
    ///
    /// `chapter_id` must be `"<novel-id>/<chapter-slug>"`; a malformed id is
    /// rejected before any request is made.
    pub async fn chapter_content(&self, chapter_id: &str) -> ChapterContent {
        let parsed = match chapter_id.split_once('/') {
            Some((novel_id, rest)) => {
                let slug = rest.split('/').next().unwrap_or(rest);
                if novel_id.is_empty() || slug.is_empty() {
                    Err(SourceError::InvalidChapterId(chapter_id.to_string()))
                } else {
                    Ok((novel_id, slug))
                }
            }
            None => Err(SourceError::InvalidChapterId(chapter_id.to_string())),
        };
        let (novel_id, slug) = match parsed {
            Ok(parts) => parts,
            Err(e) => {
                warn!(error = %e, "rejected chapter id");
                return ChapterContent::new(content::INVALID_ID_FRAGMENT);
            }
        };

        let url = format!("{}/novel/{}/{}", self.config.base_url, novel_id, slug);
        info!(chapter_id, %url, "fetching chapter content");

        let html = match self.fetch_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, chapter_id, "chapter fetch failed");
                let fragment = match e {
                    SourceError::Status(code) => {
                        format!("<p>Error loading chapter content. Status: {}</p>", code)
                    }
                    _ => "<p>Error loading chapter content.</p>".to_string(),
                };
                return ChapterContent::new(fragment);
            }
        };

        match content::extract_chapter_html(&html, &self.config) {
            Ok(body) => {
                info!(chars = body.len(), chapter_id, "chapter content extracted");
                ChapterContent::new(body)
            }
            Err(e) => {
                warn!(error = %e, chapter_id, "all extraction stages failed");
                ChapterContent::new(content::NOT_FOUND_FRAGMENT)
            }
        }
    }
}
