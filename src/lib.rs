pub mod config;
pub mod error;
pub mod models;
pub mod source;

pub use config::SourceConfig;
pub use error::{Result, SourceError};
pub use models::{ChapterContent, ChapterRef, NovelDetail, NovelStatus, NovelSummary};
pub use source::{CatalogFilter, FreeWebNovelSource};
