//! Citenet CLI — build a citation network from a paper fixture.
//!
//! Usage:
//!   citenet build <fixture.json> [--sort relevance|citations|year]
//!                 [--weighting balanced|citations|recency|keywords]
//!                 [--year-range N]
//!
//! The fixture file carries the root paper and the papers a search would
//! return, so the full pipeline can be exercised without a live provider.

use citenet::search::{JobStatusSnapshot, MockJobClient, MockPaperLookup};
use citenet::{
    analytics, BuildOptions, CancellationToken, CitationNetworkService, Paper, PaperRef,
    PollConfig, SortAlgorithm, UserInputs, WeightingMode,
};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "citenet",
    version,
    about = "Citation network builder for academic papers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a network from a fixture file and print it as JSON
    Build {
        /// Path to the fixture JSON file
        fixture: PathBuf,
        /// Node ordering: relevance, citations, or year
        #[arg(long, default_value = "relevance")]
        sort: String,
        /// Weighting mode: balanced, citations, recency, or keywords
        #[arg(long, default_value = "balanced")]
        weighting: String,
        /// Also print year clusters with buckets of this width
        #[arg(long)]
        year_range: Option<i32>,
    },
}

/// Offline stand-in for a search run: the root paper, the papers the
/// provider would return, and optionally the root's known references and
/// the user's search inputs.
#[derive(Deserialize)]
struct Fixture {
    root: Paper,
    #[serde(default)]
    results: Vec<Paper>,
    #[serde(default)]
    referenced: Vec<Paper>,
    #[serde(default)]
    inputs: UserInputs,
}

fn parse_sort(value: &str) -> Result<SortAlgorithm, String> {
    match value {
        "relevance" => Ok(SortAlgorithm::Relevance),
        "citations" => Ok(SortAlgorithm::Citations),
        "year" => Ok(SortAlgorithm::Year),
        other => Err(format!("unknown sort algorithm '{other}'")),
    }
}

fn parse_weighting(value: &str) -> Result<WeightingMode, String> {
    match value {
        "balanced" => Ok(WeightingMode::Balanced),
        "citations" => Ok(WeightingMode::Citations),
        "recency" => Ok(WeightingMode::Recency),
        "keywords" => Ok(WeightingMode::Keywords),
        other => Err(format!("unknown weighting mode '{other}'")),
    }
}

async fn cmd_build(
    fixture_path: &PathBuf,
    sort: SortAlgorithm,
    weighting: WeightingMode,
    year_range: Option<i32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(fixture_path)?;
    let fixture: Fixture = serde_json::from_str(&raw)?;

    let root_id = fixture.root.id.clone();
    let lookup = MockPaperLookup::new().with_paper(fixture.root);
    let client = MockJobClient::new().with_snapshots([
        JobStatusSnapshot::queued(),
        JobStatusSnapshot::success(fixture.results),
    ]);

    let service = CitationNetworkService::new(Arc::new(client), Arc::new(lookup))
        .with_poll_config(PollConfig {
            interval: Duration::from_millis(10),
            max_attempts: 5,
        });

    let options = BuildOptions {
        sort,
        weighting,
        known_references: fixture.referenced,
        ..BuildOptions::default()
    };
    let outcome = service
        .build(
            &PaperRef::Id { id: root_id },
            &fixture.inputs,
            &options,
            &CancellationToken::new(),
        )
        .await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if let Some(range) = year_range {
        let clusters = analytics::cluster_by_year(&outcome.network, range);
        println!("{}", serde_json::to_string_pretty(&clusters)?);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build {
            fixture,
            sort,
            weighting,
            year_range,
        } => {
            let sort = match parse_sort(&sort) {
                Ok(sort) => sort,
                Err(message) => {
                    eprintln!("Error: {message}");
                    std::process::exit(2);
                }
            };
            let weighting = match parse_weighting(&weighting) {
                Ok(weighting) => weighting,
                Err(message) => {
                    eprintln!("Error: {message}");
                    std::process::exit(2);
                }
            };
            if let Err(err) = cmd_build(&fixture, sort, weighting, year_range).await {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        }
    }
}
