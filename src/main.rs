use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use order_report::baselinker::DateFrom;
use order_report::util::env as env_util;
use order_report::{run_report, ReportConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "order-report",
    version,
    about = "Fetch BaseLinker orders for a date and report product counts per source"
)]
struct Cli {
    /// Target date (YYYY-MM-DD); orders from local midnight onwards
    #[arg(long, conflicts_with = "date_from")]
    date: Option<String>,
    /// Explicit Unix timestamp lower bound instead of a date
    #[arg(long)]
    date_from: Option<i64>,
    /// Base directory for raw/ and clean/ output files
    #[arg(long, default_value = "responses")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_util::init_env();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init();

    let cli = Cli::parse();

    let token = env_util::env_req("BASELINKER_TOKEN")
        .context("BASELINKER_TOKEN must be set (directly or via .env)")?;

    let date_from = match (cli.date, cli.date_from) {
        (Some(date), None) => DateFrom::parse_date(&date)?,
        (None, Some(ts)) => DateFrom::Timestamp(ts),
        (None, None) => DateFrom::parse_date(&prompt_date()?)?,
        // clap already rejects this combination
        (Some(_), Some(_)) => bail!("--date and --date-from are mutually exclusive"),
    };

    let cfg = ReportConfig {
        token,
        api_url: env_util::env_opt("BASELINKER_API_URL"),
        timeout_secs: env_util::env_parse("BASELINKER_TIMEOUT_SECS", 30u64),
        output_dir: cli.output_dir,
    };

    let summary = run_report(&cfg, date_from).await?;
    info!(
        orders = summary.orders,
        raw = %summary.raw_path.display(),
        clean = %summary.clean_path.display(),
        "report finished"
    );
    Ok(())
}

fn prompt_date() -> Result<String> {
    print!("Enter date (YYYY-MM-DD): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("reading date from stdin")?;
    Ok(line.trim().to_string())
}
