//! Culture Map CLI Module
//!
//! Command-line interface for inspecting dimension tables, distance matrices
//! and embeddings of a JSON file of country records.

use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::country::{load_countries, CountryRecord, Dimension};
use crate::distance::{DistanceMatrix, DistanceMetric};
use crate::embedding::{EmbeddingAlgorithm, EmbeddingConfig};
use crate::pipeline::{CultureMap, PipelineConfig};

// ─── Styling helpers ───────────────────────────────────────────────────────────

const LABEL_WIDTH: usize = 14;

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn muted(s: &str) -> ColoredString { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString    { s.truecolor(100, 210, 120) }

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn step_ok(msg: &str) {
    println!("  {} {}", ok("✓"), msg);
}

fn label(title: &str) -> String {
    let truncated: String = title.chars().take(LABEL_WIDTH - 1).collect();
    format!("{:<width$}", truncated, width = LABEL_WIDTH)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_matrix(matrix: &DistanceMatrix) {
    let header: String = matrix
        .index()
        .iter()
        .map(|t| format!("{:>10}", t.chars().take(9).collect::<String>()))
        .collect();
    println!("  {}{}", " ".repeat(LABEL_WIDTH), muted(&header));
    for (i, title) in matrix.index().iter().enumerate() {
        let row: String = (0..matrix.len()).map(|j| format!("{:>10.2}", matrix.get(i, j))).collect();
        println!("  {}{}", muted(&label(title)), row);
    }
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "culture-map")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cultural distance between countries on the Hofstede dimensions")]
#[command(long_about = None)]
pub struct Cli {
    /// Pipeline configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the dimension table of the selected countries
    Dimensions {
        /// Country records file (JSON array)
        #[arg(short, long)]
        data: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Compute the pairwise distance matrix
    Distances {
        /// Country records file (JSON array)
        #[arg(short, long)]
        data: PathBuf,

        /// Distance metric (Euclidean, Cosine, Manhattan, Correlation)
        #[arg(short, long)]
        metric: Option<String>,

        /// Rescale so the largest distance is 100
        #[arg(short, long)]
        normalise: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Project countries to 2D
    Embed {
        /// Country records file (JSON array)
        #[arg(short, long)]
        data: PathBuf,

        /// Algorithm (PCA, MDS, UMAP)
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Random seed for UMAP
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run the full pipeline and print a JSON report
    Report {
        /// Country records file (JSON array)
        #[arg(short, long)]
        data: PathBuf,

        /// Distance metric (Euclidean, Cosine, Manhattan, Correlation)
        #[arg(short, long)]
        metric: Option<String>,

        /// Algorithm (PCA, MDS, UMAP)
        #[arg(short, long)]
        algorithm: Option<String>,
    },

    /// List available metrics, algorithms and dimensions
    List,
}

/// Build the pipeline from an optional configuration file.
pub fn build_pipeline(config_path: Option<&Path>, seed: Option<u64>) -> anyhow::Result<CultureMap> {
    let mut config = match config_path {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(seed) = seed {
        config = config.with_random_state(seed);
    }
    Ok(CultureMap::new(config)?)
}

fn load(data_path: &Path) -> anyhow::Result<Vec<CountryRecord>> {
    let countries = load_countries(data_path)?;
    info!(path = %data_path.display(), n_countries = countries.len(), "Loaded country records");
    Ok(countries)
}

fn resolve_metric(map: &CultureMap, metric: Option<&str>) -> anyhow::Result<DistanceMetric> {
    Ok(match metric {
        Some(m) => m.parse()?,
        None => map.config().default_metric,
    })
}

fn resolve_algorithm(map: &CultureMap, algorithm: Option<&str>) -> anyhow::Result<EmbeddingAlgorithm> {
    Ok(match algorithm {
        Some(a) => a.parse()?,
        None => map.config().default_algorithm,
    })
}

// ─── Dimensions ────────────────────────────────────────────────────────────────

pub fn cmd_dimensions(map: &CultureMap, data_path: &Path, json: bool) -> anyhow::Result<()> {
    let countries = load(data_path)?;
    let table = map.dimensions(&countries)?;

    if json {
        return print_json(&table);
    }

    section("Dimensions");
    let header: String = Dimension::ALL.iter().map(|d| format!("{:>8}", d.name().to_uppercase())).collect();
    println!("  {}{}", " ".repeat(LABEL_WIDTH), muted(&header));
    for (i, title) in table.index().iter().enumerate() {
        let row: String = table.row(i).iter().map(|v| format!("{:>8.1}", v)).collect();
        println!("  {}{}", muted(&label(title)), row);
    }
    println!();
    Ok(())
}

// ─── Distances ─────────────────────────────────────────────────────────────────

pub fn cmd_distances(
    map: &CultureMap,
    data_path: &Path,
    metric: Option<&str>,
    normalise: bool,
    json: bool,
) -> anyhow::Result<()> {
    let metric = resolve_metric(map, metric)?;
    let countries = load(data_path)?;

    let start = Instant::now();
    let raw = map.distances(&countries, metric)?;
    let matrix = if normalise {
        (*map.normalised_distances(&countries, metric)?).clone()
    } else {
        raw.matrix.clone()
    };
    let elapsed = start.elapsed();

    if json {
        #[derive(Serialize)]
        struct Output<'a> {
            metric: DistanceMetric,
            normalised: bool,
            max_distance: f64,
            matrix: &'a DistanceMatrix,
        }
        return print_json(&Output {
            metric,
            normalised: normalise,
            max_distance: raw.max_distance,
            matrix: &matrix,
        });
    }

    section(&format!(
        "{} distances{}",
        metric,
        if normalise { " (normalised)" } else { "" }
    ));
    print_matrix(&matrix);
    println!();
    println!("  {:<12} {:.4}", muted("Max"), raw.max_distance);
    step_ok(&format!("{} countries in {:.2?}", countries.len(), elapsed));
    println!();
    Ok(())
}

// ─── Embed ─────────────────────────────────────────────────────────────────────

pub fn cmd_embed(
    map: &CultureMap,
    data_path: &Path,
    algorithm: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let algorithm = resolve_algorithm(map, algorithm)?;
    let countries = load(data_path)?;

    let start = Instant::now();
    let embedding = map.embedding(&countries, algorithm)?;
    let elapsed = start.elapsed();

    if json {
        return print_json(&embedding);
    }

    section(&format!("{} embedding", algorithm));
    println!("  {}{:>10}{:>10}", " ".repeat(LABEL_WIDTH), muted("x"), muted("y"));
    for (title, [x, y]) in embedding.iter() {
        println!("  {}{:>10.3}{:>10.3}", muted(&label(title)), x, y);
    }
    println!();
    step_ok(&format!(
        "{} countries in {:.2?} (seed {})",
        embedding.len(),
        elapsed,
        map.config().embedding.random_state
    ));
    println!();
    Ok(())
}

// ─── Report ────────────────────────────────────────────────────────────────────

pub fn cmd_report(
    map: &CultureMap,
    data_path: &Path,
    metric: Option<&str>,
    algorithm: Option<&str>,
) -> anyhow::Result<()> {
    let metric = resolve_metric(map, metric)?;
    let algorithm = resolve_algorithm(map, algorithm)?;
    let countries = load(data_path)?;

    let report = map.report(&countries, metric, algorithm)?;
    info!(metric = %metric, algorithm = %algorithm, max_distance = report.max_distance, "Report ready");
    print_json(&report)
}

// ─── List ──────────────────────────────────────────────────────────────────────

pub fn cmd_list() -> anyhow::Result<()> {
    section("Distance metrics");
    for metric in DistanceMetric::ALL {
        println!("  {}", metric);
    }

    section("Embedding algorithms");
    let defaults = EmbeddingConfig::default();
    for algorithm in EmbeddingAlgorithm::ALL {
        println!("  {:<8} {}", algorithm.to_string(), dim(&format!("min {} countries", algorithm.min_samples())));
    }
    println!("  {:<8} {}", "", dim(&format!("default seed {}", defaults.random_state)));

    section("Dimensions");
    for dimension in Dimension::ALL {
        let shown = if Dimension::DISPLAYED.contains(&dimension) { "" } else { " (not shown per-dimension)" };
        println!("  {}{}", dimension.name().to_uppercase(), dim(shown));
    }
    println!();
    Ok(())
}
