//! pettable: browse and manage pet records from the command line.
//!
//! Usage:
//!   pettable --base-url http://localhost:5000 page --sort PetName --search rex
//!   pettable --config table.json lookups
//!   pettable delete 7

use anyhow::Result;
use clap::Parser;
use pettable_cli::{Args, run};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let output = run(&args).await?;
    println!("{output}");
    Ok(())
}
