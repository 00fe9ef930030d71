use anyhow::Result;
use clap::Parser;

use repo2md::{run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("[ERROR] Conversion failed: {e}");
            std::process::exit(1);
        }
    }
}
