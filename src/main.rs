use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Single-file banking registry", long_about = None)]
struct Cli {
    /// Path to the JSON database file
    #[arg(long, default_value = "db/database.json")]
    db: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    teller::session::execute(&cli.db)
}
