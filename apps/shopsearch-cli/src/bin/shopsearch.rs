use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shopsearch_core::catalog::load_catalog;
use shopsearch_core::config::{expand_path, Config, DisplaySettings};
use shopsearch_core::types::Product;
use shopsearch_fuzzy::BuildReport;
use shopsearch_live::{LiveCatalog, LiveResults};

/// Fuzzy product search over a JSON catalog, as a search box would see it.
#[derive(Parser)]
#[command(name = "shopsearch", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Catalog file (JSON array of products); defaults to data.catalog_path
    #[arg(short, long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single query and print the suggestions
    Query {
        query: String,

        /// Override search.max_results
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print suggestions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Treat each stdin line as the current contents of the search box
    Interactive,

    /// Build the index and print the build report
    Inspect,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().context("loading configuration")?;
    let mut settings = config.search()?;
    let display = config.display()?;
    let catalog_path = match &cli.catalog {
        Some(path) => expand_path(path),
        None => expand_path(config.data()?.catalog_path),
    };

    if let Commands::Query { limit: Some(limit), .. } = &cli.command {
        settings.max_results = *limit;
        settings.validate()?;
    }

    tracing::debug!(catalog = %catalog_path.display(), ?settings, "resolved configuration");
    let live = LiveCatalog::new(settings);
    let report = live.replace(read_catalog(&catalog_path)?);

    match cli.command {
        Commands::Query { query, json, .. } => {
            let results = live.search(&query);
            if json {
                println!("{}", serde_json::to_string_pretty(&results.suggestions(&display))?);
            } else {
                print_report(&catalog_path, &report);
                println!("Query: {query}\n");
                print_results(&results, &display);
            }
        }
        Commands::Interactive => {
            print_report(&catalog_path, &report);
            interactive(&live, &catalog_path, &display)?;
        }
        Commands::Inspect => print_report(&catalog_path, &report),
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(io::stderr).init();
}

fn read_catalog(path: &Path) -> anyhow::Result<Vec<Product>> {
    load_catalog(path).with_context(|| format!("reading catalog {}", path.display()))
}

fn print_report(path: &Path, report: &BuildReport) {
    println!("Catalog: {}", path.display());
    println!("Indexed {} products", report.indexed);
    if report.skipped_missing_id > 0 {
        println!("⚠️  Skipped {} records without an id", report.skipped_missing_id);
    }
    for id in &report.duplicate_ids {
        println!("⚠️  Skipped duplicate id {id}");
    }
}

fn print_results(results: &LiveResults, display: &DisplaySettings) {
    if results.is_empty() {
        println!("(no suggestions)");
        return;
    }
    for (i, (hit, row)) in results.hits().zip(results.suggestions(display)).enumerate() {
        println!("{:>2}. {}  [{}]  score={:.3} field={}", i + 1, row.label, row.id, hit.score, hit.field);
        if !row.subtitle.is_empty() {
            println!("    {}", row.subtitle);
        }
    }
}

fn interactive(live: &LiveCatalog, catalog_path: &Path, display: &DisplaySettings) -> anyhow::Result<()> {
    println!("\nType to search. Commands: :select N, :reload, :quit");
    let mut shown: Option<LiveResults> = None;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim_end() {
            ":quit" | ":q" => break,
            ":reload" => {
                let report = live.replace(read_catalog(catalog_path)?);
                println!("🔄 Reloaded (generation {})", live.generation());
                print_report(catalog_path, &report);
            }
            cmd if cmd.starts_with(":select") => {
                let position = cmd.trim_start_matches(":select").trim().parse::<usize>().ok();
                let selection = position
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|n| shown.as_ref().and_then(|r| r.select(n)));
                match selection {
                    Some(selection) => {
                        println!("→ {}", selection.path(display));
                        shown = None;
                    }
                    None => println!("No such suggestion"),
                }
            }
            _ => {
                let results = live.search(&line);
                print_results(&results, display);
                shown = Some(results);
            }
        }
        stdout.flush()?;
    }
    Ok(())
}
