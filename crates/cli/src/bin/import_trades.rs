use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use backend_api::{FileTradeRepository, TradeRepository};
use trade_ingest::parse_trades_csv;

/// Import a broker trade CSV export into the JSON trade store.
#[derive(Parser, Debug)]
#[command(name = "import_trades")]
struct Args {
    /// Path to the broker CSV export
    csv_file: PathBuf,

    /// Path to the JSON trade store
    #[arg(short, long, default_value = "store/trades.json")]
    store: PathBuf,

    /// Print each rejected row with its reason
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let data = std::fs::read_to_string(&args.csv_file)
        .with_context(|| format!("Cannot open {}", args.csv_file.display()))?;

    let report = parse_trades_csv(&data);

    if args.verbose {
        for err in &report.errors {
            eprintln!("Rejected [{}]: {}", err.row, err.reason);
        }
    }

    let imported = report.imported_count();
    let rejected = report.error_count();

    let repo = FileTradeRepository::new(&args.store);
    repo.insert_trades(report.imported)
        .await
        .with_context(|| format!("Cannot write store {}", args.store.display()))?;

    println!(
        "Imported {} trades into {} ({} rows rejected)",
        imported,
        args.store.display(),
        rejected
    );

    Ok(())
}
