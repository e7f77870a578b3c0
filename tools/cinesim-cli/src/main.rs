//! Cinesim command-line front-end.
//!
//! Loads the embedded title table and prints recommendations for a title.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cinesim::{
    DEFAULT_DATA_PATH, DEFAULT_TOP_N, Dataset, Engine, EngineConfig, MediaType, Recommendation,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser)]
#[command(name = "cinesim")]
#[command(about = "Find movies and TV shows similar to a title")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// CSV file with titles and embeddings
    #[arg(short, long, env = "CINESIM_DATA", default_value = DEFAULT_DATA_PATH, global = true)]
    data: PathBuf,

    /// Cache the full similarity matrix across lookups
    #[arg(long, env = "CINESIM_MATRIX", global = true)]
    matrix: bool,

    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend titles similar to the given one
    Recommend {
        /// Title (or part of one) to search for
        #[arg(short, long)]
        title: String,

        /// Maximum number of recommendations
        #[arg(short = 'n', long, env = "CINESIM_TOP_N", default_value_t = DEFAULT_TOP_N)]
        top_n: usize,

        /// Show the score breakdown next to each title
        #[arg(short, long)]
        scores: bool,

        /// Print results as JSON
        #[arg(long, conflicts_with = "scores")]
        json: bool,
    },
    /// Show dataset statistics
    Stats,
    /// List known genre ids
    Genres {
        /// Only list genres for this media type
        #[arg(short, long, value_enum)]
        media_type: Option<MediaKind>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MediaKind {
    Movie,
    Tv,
}

impl From<MediaKind> for MediaType {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Movie => MediaType::Movie,
            MediaKind::Tv => MediaType::Tv,
        }
    }
}

#[derive(Serialize)]
struct RecommendOutput<'a> {
    query: &'a str,
    recommendations: &'a [Recommendation],
}

/// Explains an empty result: the query matched nothing, or it matched a
/// title whose every neighbour was excluded as a near-duplicate.
fn empty_result_message(dataset: &Dataset, query: &str) -> String {
    match dataset.find_title(query).and_then(|index| dataset.get(index)) {
        Some(item) => format!(
            "{query:?} matched {:?}, but no other titles remain after excluding near-duplicates.",
            item.title
        ),
        None => format!("No matches found for {query:?}."),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = EngineConfig::new()
        .with_data_path(&cli.data)
        .with_similarity_matrix(cli.matrix);
    debug!(?config, "starting");

    match cli.command {
        Commands::Recommend {
            title,
            top_n,
            scores,
            json,
        } => {
            let engine = Engine::new(config).context("Invalid engine configuration")?;
            let recs = engine
                .recommend_scored(&title, top_n)
                .with_context(|| format!("Failed to recommend titles for {title:?}"))?;

            if json {
                let output = RecommendOutput {
                    query: &title,
                    recommendations: &recs,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else if recs.is_empty() {
                let dataset = engine
                    .get_dataset()
                    .with_context(|| format!("Failed to load {}", cli.data.display()))?;
                println!("{}", empty_result_message(&dataset, &title));
            } else {
                println!("Recommendations for {title}:");
                for rec in &recs {
                    if scores {
                        println!(
                            "- {} [{}] score={:.4} semantic={:.4} genre={:.4}",
                            rec.title, rec.media_type, rec.score, rec.semantic, rec.genre
                        );
                    } else {
                        println!("- {}", rec.title);
                    }
                }
            }
        }
        Commands::Stats => {
            let engine = Engine::new(config).context("Invalid engine configuration")?;
            let dataset = engine
                .get_dataset()
                .with_context(|| format!("Failed to load {}", cli.data.display()))?;
            let movies = dataset
                .iter()
                .filter(|item| item.media_type == MediaType::Movie)
                .count();

            println!("Dataset:   {}", cli.data.display());
            println!("Items:     {}", dataset.len());
            println!("Movies:    {movies}");
            println!("TV shows:  {}", dataset.len() - movies);
            match dataset.dimension() {
                Some(dim) => println!("Dimension: {dim}"),
                None => println!("Dimension: n/a"),
            }
        }
        Commands::Genres { media_type } => {
            let kinds = match media_type {
                Some(kind) => vec![MediaType::from(kind)],
                None => vec![MediaType::Movie, MediaType::Tv],
            };
            for kind in kinds {
                println!("{kind}:");
                for (id, name) in kind.genres() {
                    println!("  {id:>6}  {name}");
                }
            }
        }
    }

    Ok(())
}
