//! Pricesync CLI - Vendor Pricelist Reconciliation
//!
//! This binary provides the command-line interface for the pricesync system.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use pricesync_catalog::{create_catalog_provider, CatalogProvider, ProductPatch};
use pricesync_core::config::Config;
use pricesync_core::{ExistingProduct, ProductAction};
use pricesync_engine::ReconcileOutcome;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "pricesync")]
#[command(about = "Vendor pricelist to catalog reconciliation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server for the dashboard
    Serve,
    /// Reconcile a parsed pricelist batch against the catalog
    Reconcile {
        /// JSON file with raw parsed records
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Reconcile against a catalog snapshot file instead of the live API
        #[arg(long, value_name = "FILE")]
        snapshot: Option<PathBuf>,

        /// Write the full result payload to this file
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Execute create/update actions against the live catalog
        /// (dry-run is the default)
        #[arg(long)]
        apply: bool,
    },
    /// Dump the current catalog snapshot to JSON
    FetchCatalog {
        /// Write to this file instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Serve) => serve(cli.config.as_deref()).await,
        Some(Commands::Reconcile {
            input,
            snapshot,
            output,
            apply,
        }) => {
            reconcile_batch(
                cli.config.as_deref(),
                &input,
                snapshot.as_deref(),
                output.as_deref(),
                apply,
            )
            .await
        }
        Some(Commands::FetchCatalog { output }) => {
            fetch_catalog(cli.config.as_deref(), output.as_deref()).await
        }
        None => {
            println!("Run 'pricesync serve' to start the API server, or --help for more options");
            Ok(())
        }
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "pricesync={level},pricesync_core={level},pricesync_engine={level},\
             pricesync_ingest={level},pricesync_catalog={level},pricesync_server={level}"
        ))
        .init();
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load(config_path)?;
    config.validate()?;
    Ok(config)
}

/// Start the REST API server
async fn serve(config_path: Option<&Path>) -> Result<()> {
    info!("Preparing to start pricesync API server...");

    let config = load_config(config_path)?;
    let catalog = create_catalog_provider(&config.catalog, &config.ingest)?;
    catalog.test_connection().await?;

    pricesync_server::run_server(config, catalog).await?;
    Ok(())
}

/// Run one reconciliation batch from the command line
async fn reconcile_batch(
    config_path: Option<&Path>,
    input: &Path,
    snapshot: Option<&Path>,
    output: Option<&Path>,
    apply: bool,
) -> Result<()> {
    let config = load_config(config_path)?;

    let records = read_records(input)?;
    info!("Loaded {} raw records from {}", records.len(), input.display());
    let parsed = pricesync_ingest::map_batch(&records, &config.ingest);

    // A live provider is needed to fetch the catalog (unless a snapshot file
    // stands in) and to apply actions afterwards
    let catalog: Option<Arc<dyn CatalogProvider>> = if snapshot.is_none() || apply {
        Some(create_catalog_provider(&config.catalog, &config.ingest)?)
    } else {
        None
    };

    let existing = match snapshot {
        Some(path) => read_snapshot(path)?,
        None => {
            let provider = catalog
                .as_ref()
                .ok_or_else(|| anyhow!("no catalog source available"))?;
            provider.fetch_products().await?
        }
    };
    info!("Reconciling against {} catalog products", existing.len());

    let matching = config.matching;
    let outcome =
        tokio::task::spawn_blocking(move || pricesync_engine::reconcile(parsed, existing, &matching))
            .await
            .context("reconciliation task failed")?;

    print_summary(&outcome);

    if let Some(path) = output {
        write_payload(path, &outcome)?;
        info!("Result payload written to {}", path.display());
    }

    if apply {
        let provider = catalog
            .as_ref()
            .ok_or_else(|| anyhow!("no catalog provider available for --apply"))?;
        apply_actions(provider.as_ref(), &outcome).await?;
    } else {
        info!("Dry run complete; re-run with --apply to execute actions");
    }

    Ok(())
}

/// Dump the catalog snapshot
async fn fetch_catalog(config_path: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let catalog = create_catalog_provider(&config.catalog, &config.ingest)?;

    let products = catalog.fetch_products().await?;
    info!("Fetched {} catalog products", products.len());

    let json = serde_json::to_string_pretty(&products)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Snapshot written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Read raw records from a JSON file: either a bare array or an object with
/// a "products" array, matching what the document parser exports.
fn read_records(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;

    match value {
        Value::Array(records) => Ok(records),
        Value::Object(mut obj) => match obj.remove("products") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(anyhow!(
                "{} must be a JSON array or an object with a 'products' array",
                path.display()
            )),
        },
        _ => Err(anyhow!(
            "{} must be a JSON array or an object with a 'products' array",
            path.display()
        )),
    }
}

fn read_snapshot(path: &Path) -> Result<Vec<ExistingProduct>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid catalog snapshot in {}", path.display()))
}

fn write_payload(path: &Path, outcome: &ReconcileOutcome) -> Result<()> {
    let payload = serde_json::json!({
        "results": outcome.results,
        "summary": outcome.summary,
    });
    std::fs::write(path, serde_json::to_string_pretty(&payload)?)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn print_summary(outcome: &ReconcileOutcome) {
    let s = &outcome.summary;
    println!("Reconciled {} products", s.total_products);
    println!(
        "  create: {}  update: {}  skip: {}",
        s.actions.create, s.actions.update, s.actions.skip
    );
    println!(
        "  confidence: {} high, {} medium, {} low, {} none",
        s.confidence_levels.high, s.confidence_levels.medium, s.confidence_levels.low,
        s.confidence_levels.none
    );
    println!("  average similarity: {:.1}", s.average_similarity);

    if s.products_with_issues > 0 {
        println!(
            "  {} products with {} issues:",
            s.products_with_issues, s.issues_count
        );
        for result in &outcome.results {
            for issue in &result.issues {
                println!("    {} - {}", result.parsed_product.name, issue);
            }
        }
    }
}

/// Execute create/update actions via the catalog provider. Skips are never
/// written.
async fn apply_actions(catalog: &dyn CatalogProvider, outcome: &ReconcileOutcome) -> Result<()> {
    let mut created = 0usize;
    let mut updated = 0usize;

    for result in &outcome.results {
        match result.action {
            ProductAction::Create => {
                let id = catalog.create_product(&result.parsed_product).await?;
                info!("Created {} as catalog id {id}", result.parsed_product.name);
                created += 1;
            }
            ProductAction::Update => {
                let Some(existing) = &result.existing_product else {
                    warn!(
                        "update action without a matched product for {}, skipping",
                        result.parsed_product.name
                    );
                    continue;
                };
                catalog
                    .update_product(&existing.id, &ProductPatch::price_only(result.parsed_product.price))
                    .await?;
                updated += 1;
            }
            ProductAction::Skip => {}
        }
    }

    info!("Applied actions: {created} created, {updated} updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::read_records;
    use std::io::Write;

    #[test]
    fn records_accept_bare_arrays_and_wrapped_objects() {
        let mut bare = tempfile::NamedTempFile::new().expect("tempfile");
        write!(bare, r#"[{{"name": "A", "price": 1.0}}]"#).expect("write");
        assert_eq!(read_records(bare.path()).expect("records").len(), 1);

        let mut wrapped = tempfile::NamedTempFile::new().expect("tempfile");
        write!(wrapped, r#"{{"products": [{{"name": "A"}}, {{"name": "B"}}]}}"#).expect("write");
        assert_eq!(read_records(wrapped.path()).expect("records").len(), 2);

        let mut scalar = tempfile::NamedTempFile::new().expect("tempfile");
        write!(scalar, "42").expect("write");
        assert!(read_records(scalar.path()).is_err());
    }
}
