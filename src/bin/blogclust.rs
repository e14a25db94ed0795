//! CLI entry point for the `blogclust` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use log::info;

use blogclust::render;
use blogclust::{Agglomerative, Dataset, Iterations, Kmeans};

#[derive(Parser)]
#[command(
    name = "blogclust",
    about = "Cluster blog word-count vectors by Pearson distance"
)]
struct Cli {
    /// Tab-separated blog data file
    file: PathBuf,

    /// Clustering method
    #[arg(value_enum)]
    method: Method,

    /// Number of k-means clusters
    #[arg(long, default_value = "5")]
    clusters: usize,

    /// Number of k-means passes
    #[arg(long, default_value = "20", conflicts_with = "until_converged")]
    iterations: usize,

    /// Run k-means until assignments stop changing
    #[arg(long)]
    until_converged: bool,

    /// Seed for k-means centroid initialization
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: Format,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,

    /// Write the result to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Method {
    #[value(alias = "hierarch")]
    Hierarchical,
    #[value(alias = "k-means")]
    Kmeans,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Nested `leaf` / `connector` / `node` objects
    Json,
    /// `{text, children}` tree-view objects
    Jstree,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> blogclust::Result<()> {
    let dataset = Dataset::open(&cli.file)?;
    info!(
        "{} blogs, {} words",
        dataset.len(),
        dataset.vocabulary().len()
    );

    let value = match cli.method {
        Method::Hierarchical => {
            let tree = Agglomerative::new().fit(dataset.blogs(), dataset.vocabulary())?;
            match cli.format {
                Format::Json => serde_json::to_value(tree.to_nested())?,
                Format::Jstree => serde_json::to_value(tree.to_tree_view())?,
            }
        }
        Method::Kmeans => {
            let iterations = if cli.until_converged {
                Iterations::UntilConverged
            } else {
                Iterations::Fixed(cli.iterations)
            };
            let mut kmeans = Kmeans::new(cli.clusters).with_iterations(iterations);
            if let Some(seed) = cli.seed {
                kmeans = kmeans.with_seed(seed);
            }
            let fit = kmeans.fit(dataset.blogs(), dataset.vocabulary())?;
            info!("k-means ran {} iterations", fit.iterations());
            match cli.format {
                Format::Json => serde_json::to_value(render::centroid_summaries(&fit))?,
                Format::Jstree => serde_json::to_value(render::centroid_tree_view(&fit))?,
            }
        }
    };

    match &cli.output {
        Some(path) => render::dump(&value, path, cli.pretty),
        None => {
            println!("{}", render::to_json_string(&value, cli.pretty)?);
            Ok(())
        }
    }
}
