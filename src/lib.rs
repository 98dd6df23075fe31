pub mod aggregate;
pub mod baselinker;
pub mod model;
pub mod normalization;
pub mod store;

pub mod util {
    pub mod env;
}

// Order report pipeline (library function, not a bin): fetch -> persist raw ->
// project -> map -> persist clean -> aggregate -> report.
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use aggregate::{aggregate_products, split_by_source};
use baselinker::{BaselinkerClient, DateFrom};
use model::clean_orders;
use normalization::mapping::apply_mapping;
use normalization::tables::{product_mapping, source_mapping, status_mapping, PROMO_SOURCE};
use store::ResponseStore;

/// Runtime configuration for one report run, assembled in `main` so the
/// pipeline itself carries no global state.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub token: String,
    /// Connector endpoint override; `None` uses the production URL.
    pub api_url: Option<String>,
    pub timeout_secs: u64,
    /// Base directory receiving `raw/` and `clean/` output files.
    pub output_dir: PathBuf,
}

#[derive(Debug)]
pub struct ReportSummary {
    pub orders: usize,
    pub raw_path: PathBuf,
    pub clean_path: PathBuf,
}

/// Run the whole report once for the given lower bound. Any failure aborts
/// the run; files already written stay on disk.
pub async fn run_report(cfg: &ReportConfig, date_from: DateFrom) -> Result<ReportSummary> {
    let client = BaselinkerClient::new(&cfg.token, cfg.api_url.as_deref(), Some(cfg.timeout_secs))?;
    let response = client.fetch_orders(date_from).await?;

    let store = ResponseStore::create(&cfg.output_dir)?;
    let stamp = ResponseStore::stamp();
    let raw_path = store.write_raw(&stamp, &response)?;
    info!(path = %raw_path.display(), "raw response saved");

    let mut orders = clean_orders(&response)?;
    info!(orders = orders.len(), "projected clean orders");

    // The pre-mapping projection is part of the report surface.
    println!("{}", serde_json::to_string_pretty(&orders)?);

    apply_mapping(&mut orders, &source_mapping());
    apply_mapping(&mut orders, &status_mapping());
    apply_mapping(&mut orders, &product_mapping());

    let clean_path = store.write_clean(&stamp, &orders)?;
    info!(path = %clean_path.display(), "clean orders saved");

    let aggregated = aggregate_products(&orders);
    let (promo, other) = split_by_source(&aggregated, PROMO_SOURCE);

    println!("Promotional orders product counts:");
    println!("{}", serde_json::to_string_pretty(&promo)?);
    println!("Other orders product counts:");
    println!("{}", serde_json::to_string_pretty(&other)?);

    Ok(ReportSummary {
        orders: orders.len(),
        raw_path,
        clean_path,
    })
}
