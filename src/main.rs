use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fwn_source::{CatalogFilter, FreeWebNovelSource, SourceConfig};

#[derive(Parser)]
#[command(name = "fwn-source", about = "FreeWebNovel source plugin CLI")]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List popular novels.
    Popular {
        #[arg(default_value_t = 1)]
        page: u32,
        /// Genre filter, e.g. "fantasy".
        #[arg(long, conflicts_with = "sort")]
        genre: Option<String>,
        /// Sort key, e.g. "latest-release".
        #[arg(long)]
        sort: Option<String>,
    },
    /// Search novels by title.
    Search {
        query: String,
        #[arg(default_value_t = 1)]
        page: u32,
    },
    /// Show a novel's full metadata.
    Details { novel_id: String },
    /// List a novel's chapters.
    Chapters { novel_id: String },
    /// Fetch one chapter's body ("<novel-id>/<chapter-slug>").
    Content { chapter_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SourceConfig::from_file(path)?,
        None => SourceConfig::default(),
    };
    let source = FreeWebNovelSource::new(config)?;

    match cli.command {
        Command::Popular { page, genre, sort } => {
            let filter = genre
                .map(CatalogFilter::Genre)
                .or(sort.map(CatalogFilter::Sort));
            let novels = source.popular(page, filter).await;
            println!("{}", serde_json::to_string_pretty(&novels)?);
        }
        Command::Search { query, page } => {
            let novels = source.search(&query, page).await;
            println!("{}", serde_json::to_string_pretty(&novels)?);
        }
        Command::Details { novel_id } => {
            let detail = source.details(&novel_id).await;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Command::Chapters { novel_id } => {
            let chapters = source.chapters(&novel_id).await;
            println!("{}", serde_json::to_string_pretty(&chapters)?);
        }
        Command::Content { chapter_id } => {
            let content = source.chapter_content(&chapter_id).await;
            println!("{}", serde_json::to_string_pretty(&content)?);
        }
    }

    Ok(())
}
